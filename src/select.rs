//! Physical device scoring and presentation parameter heuristics
//!
//! Everything here is pure computation over already-queried data:
//! no Vulkan calls, no mutation, no caching
//!
//! [`AdapterCaps`] is a snapshot of the attributes that matter for rating
//! one device; [hw::Description::poll](crate::hw::Description::poll) fills it
//! from real hardware, tests may fill it by hand

use ash::vk;

use std::error::Error;
use std::fmt;

/// Weight per supported color attachment
pub const COLOR_ATTACHMENT_WEIGHT: u32 = 100;

/// Weight per supported descriptor set input attachment
pub const INPUT_ATTACHMENT_WEIGHT: u32 = 100;

/// Weight per unit of the maximum 2D image dimension
pub const IMAGE_DIMENSION_WEIGHT: u32 = 1000;

/// Weight per supported image array layer
pub const ARRAY_LAYER_WEIGHT: u32 = 10;

/// Weight per supported viewport
pub const VIEWPORT_WEIGHT: u32 = 500;

/// Weight per memory heap
pub const MEMORY_HEAP_WEIGHT: u32 = 1000;

/// Bonus for the multi-viewport feature
pub const MULTI_VIEWPORT_BONUS: u32 = 500;

/// Bonus for at least one graphics-capable queue family
pub const GRAPHICS_QUEUE_BONUS: u32 = 100_000;

/// Bonus for at least one compute-capable queue family
pub const COMPUTE_QUEUE_BONUS: u32 = 50_000;

/// Bonus for at least one queue family that can present to the target surface
///
/// Deliberately larger than [`GRAPHICS_QUEUE_BONUS`]
pub const PRESENT_QUEUE_BONUS: u32 = 110_000;

/// Preferred swapchain image format
pub const PREFERRED_FORMAT: vk::Format = vk::Format::B8G8R8A8_SRGB;

/// Preferred swapchain color space
pub const PREFERRED_COLOR_SPACE: vk::ColorSpaceKHR = vk::ColorSpaceKHR::SRGB_NONLINEAR;

/// Preferred present mode (low latency, no tearing)
pub const PREFERRED_PRESENT_MODE: vk::PresentModeKHR = vk::PresentModeKHR::MAILBOX;

/// Present mode the Vulkan specification guarantees to be available
pub const FALLBACK_PRESENT_MODE: vk::PresentModeKHR = vk::PresentModeKHR::FIFO;

#[derive(Debug, PartialEq, Eq)]
pub enum SelectError {
    /// Every candidate scored zero
    NoSuitableDevice,
    /// Format selection was handed an empty list
    ///
    /// The caller is expected to have verified surface format support
    /// beforehand (a device without formats scores zero)
    NoFormats,
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            SelectError::NoSuitableDevice => "No suitable physical device found on host",
            SelectError::NoFormats => "Surface format list is empty",
        };

        write!(f, "{:?}", err_msg)
    }
}

impl Error for SelectError {}

/// Capabilities of a single queue family, as far as rating is concerned
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueCaps {
    pub graphics: bool,
    pub compute: bool,
    /// Can this family present to the target surface
    ///
    /// Only meaningful when [`AdapterCaps::surface`] is set
    pub present: bool,
}

/// What the adapter reports for the target surface
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceCaps {
    pub format_count: u32,
    pub present_mode_count: u32,
}

/// Rating input: one adapter's queried attributes
#[derive(Debug, Clone, Default)]
pub struct AdapterCaps {
    pub max_color_attachments: u32,
    pub max_input_attachments: u32,
    pub max_image_dimension_2d: u32,
    pub max_image_array_layers: u32,
    pub max_viewports: u32,
    pub memory_heap_count: u32,
    pub multi_viewport: bool,
    pub queues: Vec<QueueCaps>,
    /// Does the adapter expose VK_KHR_swapchain
    pub swapchain_ext: bool,
    /// Set when a target surface was supplied at query time
    pub surface: Option<SurfaceCaps>,
}

/// Rate one adapter
///
/// Zero means unsuitable, higher is better
///
/// Hard disqualifications (score forced to zero):
/// - a surface was supplied and no queue family can present to it
/// - a surface was supplied and the format or present mode list is empty
/// - VK_KHR_swapchain is not available (regardless of surface presence)
pub fn score(caps: &AdapterCaps) -> u32 {
    let mut total = caps.max_color_attachments * COLOR_ATTACHMENT_WEIGHT
        + caps.max_input_attachments * INPUT_ATTACHMENT_WEIGHT
        + caps.max_image_dimension_2d * IMAGE_DIMENSION_WEIGHT
        + caps.max_image_array_layers * ARRAY_LAYER_WEIGHT
        + caps.max_viewports * VIEWPORT_WEIGHT
        + caps.memory_heap_count * MEMORY_HEAP_WEIGHT;

    if caps.multi_viewport {
        total += MULTI_VIEWPORT_BONUS;
    }

    // Absence of a graphics family does not zero the score by itself,
    // it only loses the bonus
    if caps.queues.iter().any(|q| q.graphics) {
        total += GRAPHICS_QUEUE_BONUS;
    }

    if caps.queues.iter().any(|q| q.compute) {
        total += COMPUTE_QUEUE_BONUS;
    }

    if let Some(surface) = &caps.surface {
        let mut present_found = false;

        for queue in &caps.queues {
            if queue.present {
                present_found = true;
                break;
            }
        }

        if !present_found {
            return 0;
        }

        total += PRESENT_QUEUE_BONUS;

        if surface.format_count == 0 || surface.present_mode_count == 0 {
            return 0;
        }
    }

    // No swapchain support means no multi-image rendering at all
    if !caps.swapchain_ext {
        return 0;
    }

    total
}

/// Return the index of the highest-scoring candidate
///
/// Ties are won by the first-encountered candidate (strict comparison)
///
/// Fails with [`SelectError::NoSuitableDevice`] if every candidate
/// scored zero (or the list is empty)
pub fn best<'a, I>(candidates: I) -> Result<usize, SelectError>
where
    I: IntoIterator<Item = &'a AdapterCaps>,
{
    let mut best_score = 0u32;
    let mut best_index: Option<usize> = None;

    for (i, caps) in candidates.into_iter().enumerate() {
        let candidate_score = score(caps);

        if candidate_score > best_score {
            best_score = candidate_score;
            best_index = Some(i);
        }
    }

    best_index.ok_or(SelectError::NoSuitableDevice)
}

/// Pick the preferred surface format
///
/// Returns the ([`PREFERRED_FORMAT`], [`PREFERRED_COLOR_SPACE`]) pair if the
/// list contains it, otherwise the first element in its original order
pub fn surface_format(formats: &[vk::SurfaceFormatKHR]) -> Result<vk::SurfaceFormatKHR, SelectError> {
    if formats.is_empty() {
        return Err(SelectError::NoFormats);
    }

    Ok(*formats
        .iter()
        .find(|f| f.format == PREFERRED_FORMAT && f.color_space == PREFERRED_COLOR_SPACE)
        .unwrap_or(&formats[0]))
}

/// Pick the preferred present mode
///
/// [`PREFERRED_PRESENT_MODE`] if supported, otherwise
/// [`FALLBACK_PRESENT_MODE`] which is always available
pub fn present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    if modes.contains(&PREFERRED_PRESENT_MODE) {
        PREFERRED_PRESENT_MODE
    } else {
        FALLBACK_PRESENT_MODE
    }
}

/// Pick the extent for presentation images
///
/// When the surface reports a definite current extent (width is not the
/// "undefined" sentinel) the platform dictates the size and it is returned
/// unchanged. Otherwise the window size is clamped per dimension into
/// [min_image_extent, max_image_extent], low bound first
pub fn image_extent(window: vk::Extent2D, caps: &vk::SurfaceCapabilitiesKHR) -> vk::Extent2D {
    if caps.current_extent.width != u32::MAX {
        return caps.current_extent;
    }

    vk::Extent2D {
        width: window
            .width
            .max(caps.min_image_extent.width)
            .min(caps.max_image_extent.width),
        height: window
            .height
            .max(caps.min_image_extent.height)
            .min(caps.max_image_extent.height),
    }
}
