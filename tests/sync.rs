mod test_context;

#[cfg(test)]
mod sync {
    use vkhelper::{swapchain, sync};

    use super::test_context;

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn create_sync_primitives() {
        let device = test_context::get_device();

        assert!(sync::Semaphore::new(device).is_ok());
        assert!(sync::Fence::new(device, false).is_ok());
        assert!(sync::Fence::new(device, true).is_ok());
    }

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn acquire_image_with_semaphore_and_fence() {
        let device = test_context::get_device();

        let sem = sync::Semaphore::new(device).expect("Failed to create semaphore");
        let fence = sync::Fence::new(device, false).expect("Failed to create fence");

        let capabilities = test_context::get_capabilities();

        let cfg = swapchain::SwapchainCfg::recommended(&capabilities, test_context::get_window())
            .expect("Suitable device must expose at least one format");

        let swapchain = swapchain::Swapchain::new(
            test_context::get_instance(),
            device,
            test_context::get_surface(),
            &cfg,
        )
        .expect("Failed to create swapchain");

        let index = swapchain
            .next_image(u64::MAX, Some(&sem), Some(&fence))
            .expect("Failed to acquire next image");

        let images = swapchain.images().expect("Failed to get swapchain images");

        assert!((index as usize) < images.len());
    }
}
