#![allow(dead_code)]
use vkhelper::{dev, extensions, hw, layers, libvk, surface, window};

use std::sync::OnceLock;

static WINDOW: OnceLock<window::Window> = OnceLock::new();

static INSTANCE: OnceLock<libvk::Instance> = OnceLock::new();

static SURFACE: OnceLock<surface::Surface> = OnceLock::new();

static DESCRIPTION: OnceLock<hw::Description> = OnceLock::new();

static DEVICE: OnceLock<dev::Device> = OnceLock::new();

pub fn get_window() -> &'static window::Window {
    WINDOW.get_or_init(|| {
        let event_loop = window::eventloop().expect("Failed to create event loop");
        let win = window::create_window(&event_loop).expect("Failed to create window");

        // The window outlives this scope, keep the loop alive with it
        std::mem::forget(event_loop);

        win
    })
}

pub fn get_instance() -> &'static libvk::Instance {
    INSTANCE.get_or_init(|| {
        let mut ext = extensions::required_extensions(get_window())
            .expect("Failed to enumerate required extensions");
        ext.push(extensions::DEBUG_EXT_NAME);

        let lib_type = libvk::InstanceType {
            debug_layer: Some(layers::DebugLayer::default()),
            extensions: &ext,
            ..libvk::InstanceType::default()
        };

        libvk::Instance::new(&lib_type).expect("Failed to init instance")
    })
}

pub fn get_surface() -> &'static surface::Surface {
    SURFACE.get_or_init(|| {
        surface::Surface::new(get_instance(), get_window()).expect("Failed to create surface")
    })
}

pub fn get_description() -> &'static hw::Description {
    DESCRIPTION.get_or_init(|| {
        hw::Description::poll(get_instance(), Some(get_surface()))
            .expect("Failed to list hardware")
    })
}

pub fn get_best_hw() -> &'static hw::HWDevice {
    get_description()
        .best()
        .expect("Failed to find suitable hardware device")
}

pub fn get_graphics_queue() -> &'static hw::QueueFamilyDescription {
    get_best_hw()
        .find_first_queue(hw::QueueFamilyDescription::is_graphics)
        .expect("Failed to find graphics queue family")
}

pub fn get_device() -> &'static dev::Device {
    DEVICE.get_or_init(|| {
        let dev_type = dev::DeviceCfg {
            lib: get_instance(),
            hw: get_best_hw(),
            queues_cfg: &[dev::QueueFamilyCfg {
                queue_family_index: get_graphics_queue().index(),
                priorities: &[1.0_f32],
            }],
            extensions: &[extensions::SWAPCHAIN_EXT_NAME],
        };

        dev::Device::new(&dev_type).expect("Failed to create device")
    })
}

pub fn get_capabilities() -> surface::Capabilities {
    surface::Capabilities::get(get_best_hw(), get_surface())
        .expect("Failed to query capabilities")
}
