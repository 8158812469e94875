mod test_context;

#[cfg(test)]
mod hw {
    use super::test_context;

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn hardware_inspection() {
        let hw_list = test_context::get_description();

        // To enable stdout in tests run cargo test -- --nocapture
        for (i, hw) in hw_list.list().enumerate() {
            print!("\nDevice number {}\n", i);
            print!("{}", hw);
        }
    }

    #[test]
    #[ignore = "requires a Vulkan-capable device and a display"]
    fn best_device_scores_positive() {
        let hw_dev = test_context::get_best_hw();

        assert!(hw_dev.score() > 0);
        assert!(hw_dev.caps().swapchain_ext);
        assert!(hw_dev.queues().any(|q| q.is_present()));
    }
}
