use ash::vk;

use vkhelper::select;
use vkhelper::select::{AdapterCaps, QueueCaps, SelectError, SurfaceCaps};

/// Adapter that passes every hard check and earns the queue bonuses
fn capable_adapter() -> AdapterCaps {
    AdapterCaps {
        max_color_attachments: 8,
        max_input_attachments: 4,
        max_image_dimension_2d: 4096,
        max_image_array_layers: 256,
        max_viewports: 16,
        memory_heap_count: 2,
        multi_viewport: true,
        queues: vec![QueueCaps {
            graphics: true,
            compute: true,
            present: true,
        }],
        swapchain_ext: true,
        surface: Some(SurfaceCaps {
            format_count: 3,
            present_mode_count: 2,
        }),
    }
}

#[test]
fn no_present_queue_disqualifies() {
    let mut caps = capable_adapter();

    for queue in &mut caps.queues {
        queue.present = false;
    }

    assert_eq!(select::score(&caps), 0);
}

#[test]
fn missing_swapchain_ext_disqualifies() {
    let mut caps = capable_adapter();
    caps.swapchain_ext = false;

    assert_eq!(select::score(&caps), 0);

    // Even for off-screen rating, without a surface
    caps.surface = None;
    assert_eq!(select::score(&caps), 0);
}

#[test]
fn empty_format_or_mode_list_disqualifies() {
    let mut caps = capable_adapter();
    caps.surface = Some(SurfaceCaps {
        format_count: 0,
        present_mode_count: 2,
    });

    assert_eq!(select::score(&caps), 0);

    caps.surface = Some(SurfaceCaps {
        format_count: 3,
        present_mode_count: 0,
    });

    assert_eq!(select::score(&caps), 0);
}

#[test]
fn missing_graphics_queue_does_not_zero_score() {
    let mut caps = capable_adapter();

    for queue in &mut caps.queues {
        queue.graphics = false;
    }

    let rated = select::score(&caps);

    assert!(rated > 0);
    assert_eq!(rated + select::GRAPHICS_QUEUE_BONUS, select::score(&capable_adapter()));
}

#[test]
fn score_is_weighted_sum() {
    let caps = AdapterCaps {
        max_color_attachments: 1,
        max_image_dimension_2d: 2,
        memory_heap_count: 3,
        queues: vec![QueueCaps {
            graphics: true,
            compute: false,
            present: false,
        }],
        swapchain_ext: true,
        surface: None,
        ..AdapterCaps::default()
    };

    let expected = select::COLOR_ATTACHMENT_WEIGHT
        + 2 * select::IMAGE_DIMENSION_WEIGHT
        + 3 * select::MEMORY_HEAP_WEIGHT
        + select::GRAPHICS_QUEUE_BONUS;

    assert_eq!(select::score(&caps), expected);
}

#[test]
fn best_picks_highest_scoring_candidate() {
    let mut weak = capable_adapter();
    weak.max_image_dimension_2d = 1024;

    let mut unsuitable = capable_adapter();
    unsuitable.swapchain_ext = false;

    let strong = capable_adapter();

    let candidates = [weak, unsuitable, strong];
    let index = select::best(candidates.iter()).expect("A suitable candidate exists");

    assert_eq!(index, 2);
    assert!(select::score(&candidates[index]) > 0);

    for caps in &candidates {
        assert!(select::score(caps) <= select::score(&candidates[index]));
    }
}

#[test]
fn best_breaks_ties_by_first_encountered() {
    let candidates = [capable_adapter(), capable_adapter(), capable_adapter()];

    assert_eq!(select::best(candidates.iter()), Ok(0));
}

#[test]
fn best_fails_on_all_zero_candidates() {
    let mut first = capable_adapter();
    first.swapchain_ext = false;

    let mut second = capable_adapter();
    second.queues.clear();

    let candidates = [first, second];

    assert_eq!(
        select::best(candidates.iter()),
        Err(SelectError::NoSuitableDevice)
    );
}

#[test]
fn best_fails_on_empty_candidate_list() {
    let candidates: [AdapterCaps; 0] = [];

    assert_eq!(
        select::best(candidates.iter()),
        Err(SelectError::NoSuitableDevice)
    );
}

#[test]
fn preferred_format_wins_regardless_of_position() {
    let formats = [
        vk::SurfaceFormatKHR {
            format: vk::Format::R8G8B8A8_UNORM,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        },
        vk::SurfaceFormatKHR {
            format: vk::Format::B8G8R8A8_UNORM,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        },
        vk::SurfaceFormatKHR {
            format: select::PREFERRED_FORMAT,
            color_space: select::PREFERRED_COLOR_SPACE,
        },
    ];

    let picked = select::surface_format(&formats).expect("Format list is not empty");

    assert_eq!(picked.format, select::PREFERRED_FORMAT);
    assert_eq!(picked.color_space, select::PREFERRED_COLOR_SPACE);
}

#[test]
fn format_falls_back_to_first_element() {
    let formats = [
        vk::SurfaceFormatKHR {
            format: vk::Format::R8G8B8A8_UNORM,
            color_space: vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
        },
        vk::SurfaceFormatKHR {
            format: vk::Format::B8G8R8A8_UNORM,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        },
    ];

    let picked = select::surface_format(&formats).expect("Format list is not empty");

    assert_eq!(picked.format, vk::Format::R8G8B8A8_UNORM);
    assert_eq!(picked.color_space, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT);
}

#[test]
fn empty_format_list_is_an_error() {
    assert_eq!(select::surface_format(&[]), Err(SelectError::NoFormats));
}

#[test]
fn mailbox_mode_preferred_when_present() {
    let modes = [
        vk::PresentModeKHR::IMMEDIATE,
        vk::PresentModeKHR::FIFO,
        vk::PresentModeKHR::MAILBOX,
    ];

    assert_eq!(select::present_mode(&modes), vk::PresentModeKHR::MAILBOX);
}

#[test]
fn present_mode_falls_back_to_fifo() {
    let modes = [vk::PresentModeKHR::IMMEDIATE, vk::PresentModeKHR::FIFO_RELAXED];

    assert_eq!(select::present_mode(&modes), vk::PresentModeKHR::FIFO);
}

#[test]
fn defined_current_extent_wins_over_window_size() {
    let caps = vk::SurfaceCapabilitiesKHR {
        current_extent: vk::Extent2D {
            width: 800,
            height: 600,
        },
        min_image_extent: vk::Extent2D { width: 1, height: 1 },
        max_image_extent: vk::Extent2D {
            width: 4096,
            height: 4096,
        },
        ..vk::SurfaceCapabilitiesKHR::default()
    };

    let window = vk::Extent2D {
        width: 1920,
        height: 1080,
    };

    let extent = select::image_extent(window, &caps);

    assert_eq!(extent.width, 800);
    assert_eq!(extent.height, 600);
}

#[test]
fn undefined_current_extent_clamps_window_size() {
    let caps = vk::SurfaceCapabilitiesKHR {
        current_extent: vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        },
        min_image_extent: vk::Extent2D { width: 1, height: 1 },
        max_image_extent: vk::Extent2D {
            width: 1024,
            height: 1024,
        },
        ..vk::SurfaceCapabilitiesKHR::default()
    };

    let window = vk::Extent2D {
        width: 1920,
        height: 1080,
    };

    let extent = select::image_extent(window, &caps);

    assert_eq!(extent.width, 1024);
    assert_eq!(extent.height, 1024);
}

#[test]
fn small_window_clamps_to_min_extent() {
    let caps = vk::SurfaceCapabilitiesKHR {
        current_extent: vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        },
        min_image_extent: vk::Extent2D {
            width: 64,
            height: 64,
        },
        max_image_extent: vk::Extent2D {
            width: 1024,
            height: 1024,
        },
        ..vk::SurfaceCapabilitiesKHR::default()
    };

    let window = vk::Extent2D {
        width: 16,
        height: 900,
    };

    let extent = select::image_extent(window, &caps);

    assert_eq!(extent.width, 64);
    assert_eq!(extent.height, 900);
}
