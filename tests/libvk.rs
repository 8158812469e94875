use vkhelper::{extensions, layers, libvk};

#[test]
fn instance_error_names_failed_call() {
    let err: Box<dyn std::error::Error> = Box::new(libvk::InstanceError::Instance);

    assert!(err.to_string().contains("vkCreateInstance"));

    let err: Box<dyn std::error::Error> = Box::new(libvk::InstanceError::DebugUtilsCreating);

    assert!(err.to_string().contains("vkCreateDebugUtilsMessengerEXT"));
}

#[test]
#[ignore = "requires the Vulkan loader"]
fn default_instance() {
    let lib = libvk::Instance::new(&libvk::InstanceType::default());

    assert!(lib.is_ok());
}

#[test]
#[ignore = "requires the Vulkan loader and validation layers"]
fn debug_instance() {
    let lib_type = libvk::InstanceType {
        debug_layer: Some(layers::DebugLayer::default()),
        extensions: &[extensions::DEBUG_EXT_NAME],
        ..libvk::InstanceType::default()
    };

    let lib = libvk::Instance::new(&lib_type);

    assert!(lib.is_ok());
}
