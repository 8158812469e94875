mod test_context;

#[cfg(test)]
mod surface {
    use vkhelper::{extensions, select, surface};

    use super::test_context;

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn window_surface_extensions() {
        let ext = extensions::required_extensions(test_context::get_window())
            .expect("Failed to enumerate required extensions");

        assert!(!ext.is_empty());
        assert!(ext.contains(&extensions::SURFACE_EXT_NAME));
    }

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn init_surface() {
        let lib = test_context::get_instance();
        let window = test_context::get_window();

        assert!(surface::Surface::new(lib, window).is_ok());
    }

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn capability_selection() {
        let capabilities = test_context::get_capabilities();

        let format = capabilities
            .best_format()
            .expect("Suitable device must expose at least one format");

        assert!(capabilities.is_format_supported(format));

        let mode = capabilities.best_mode();

        assert!(
            mode == select::PREFERRED_PRESENT_MODE || mode == select::FALLBACK_PRESENT_MODE
        );

        let extent = capabilities.adjusted_extent(test_context::get_window());

        assert!(extent.width > 0 && extent.height > 0);
    }
}
