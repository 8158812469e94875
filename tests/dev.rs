mod test_context;

#[cfg(test)]
mod dev {
    use super::test_context;

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn create_device() {
        let device = test_context::get_device();

        assert_eq!(device.queue_family_count(), 1);
        assert_eq!(device.queue(0).count(), 1);
    }
}
