mod test_context;

#[cfg(test)]
mod swapchain {
    use vkhelper::swapchain;

    use super::test_context;

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn recommended_swapchain() {
        let capabilities = test_context::get_capabilities();

        let cfg = swapchain::SwapchainCfg::recommended(&capabilities, test_context::get_window())
            .expect("Suitable device must expose at least one format");

        let swapchain = swapchain::Swapchain::new(
            test_context::get_instance(),
            test_context::get_device(),
            test_context::get_surface(),
            &cfg,
        )
        .expect("Failed to create swapchain");

        let images = swapchain.images().expect("Failed to get swapchain images");

        assert!(images.len() as u32 >= capabilities.min_img_count());
    }
}
