//! Abstraction over native surface or window object

use ash::khr;
use ash::vk;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::on_error_ret;
use crate::{hw, libvk, select, swapchain, window};

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SurfaceError {
    Handle,
    Create,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            SurfaceError::Handle => "Failed to get native window or display handle",
            SurfaceError::Create => {
                "Failed to create surface (vkCreateXlibSurfaceKHR or relative call failed)"
            }
        };

        write!(f, "{:?}", err_msg)
    }
}

impl Error for SurfaceError {}

/// Note: custom allocator is not supported
pub struct Surface {
    i_loader: khr::surface::Instance,
    i_surface: vk::SurfaceKHR,
}

impl Surface {
    pub fn new(lib: &libvk::Instance, window: &window::Window) -> Result<Surface, SurfaceError> {
        let display = on_error_ret!(window.display_handle(), SurfaceError::Handle);
        let handle = on_error_ret!(window.window_handle(), SurfaceError::Handle);

        let surface = on_error_ret!(
            unsafe {
                ash_window::create_surface(
                    lib.entry(),
                    lib.instance(),
                    display.as_raw(),
                    handle.as_raw(),
                    None,
                )
            },
            SurfaceError::Create
        );

        let surface_loader = khr::surface::Instance::new(lib.entry(), lib.instance());

        Ok(Surface {
            i_loader: surface_loader,
            i_surface: surface,
        })
    }

    #[doc(hidden)]
    pub fn loader(&self) -> &khr::surface::Instance {
        &self.i_loader
    }

    #[doc(hidden)]
    pub fn surface(&self) -> vk::SurfaceKHR {
        self.i_surface
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe { self.i_loader.destroy_surface(self.i_surface, None) };
    }
}

/// Surface formats
///
/// Contains two fields: `format` and `color_space`
///
#[doc = "Ash documentation: <https://docs.rs/ash/latest/ash/vk/struct.SurfaceFormatKHR.html>"]
///
#[doc = "Vulkan documentation: <https://registry.khronos.org/vulkan/specs/1.3-extensions/man/html/VkSurfaceFormatKHR.html>"]
pub type SurfaceFormat = vk::SurfaceFormatKHR;

/// Image format
pub type ImageFormat = vk::Format;

/// Color space
pub type ColorSpace = vk::ColorSpaceKHR;

/// Image usage flags
pub type UsageFlags = vk::ImageUsageFlags;

/// Two-dimensional extent in pixels
pub type Extent2D = vk::Extent2D;

/// Alpha compositing modes
pub type CompositeAlphaFlags = vk::CompositeAlphaFlagsKHR;

/// Value describing the transform, relative to the presentation engine's natural orientation
///
/// It is applied to the image content prior to presentation
///
#[doc = "Values: <https://docs.rs/ash/latest/ash/vk/struct.SurfaceTransformFlagsKHR.html>"]
pub type PreTransformation = vk::SurfaceTransformFlagsKHR;

#[derive(Debug)]
pub enum CapabilitiesError {
    Modes,
    Surface,
    Formats,
}

impl fmt::Display for CapabilitiesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            CapabilitiesError::Modes => {
                "Failed to get present modes (vkGetPhysicalDeviceSurfacePresentModesKHR call failed)"
            }
            CapabilitiesError::Surface => {
                "Failed to get surface capabilities (vkGetPhysicalDeviceSurfaceCapabilitiesKHR call failed)"
            }
            CapabilitiesError::Formats => {
                "Failed to get surface formats (vkGetPhysicalDeviceSurfaceFormatsKHR call failed)"
            }
        };

        write!(f, "{:?}", err_msg)
    }
}

impl Error for CapabilitiesError {}

pub struct Capabilities {
    i_modes: Vec<vk::PresentModeKHR>,
    i_capabilities: vk::SurfaceCapabilitiesKHR,
    i_formats: Vec<vk::SurfaceFormatKHR>,
}

impl Capabilities {
    /// Query for surface capabilities for the selected hw device
    pub fn get(hw: &hw::HWDevice, surface: &Surface) -> Result<Capabilities, CapabilitiesError> {
        let mods = on_error_ret!(
            unsafe {
                surface
                    .loader()
                    .get_physical_device_surface_present_modes(hw.device(), surface.surface())
            },
            CapabilitiesError::Modes
        );

        let capabilities = on_error_ret!(
            unsafe {
                surface
                    .loader()
                    .get_physical_device_surface_capabilities(hw.device(), surface.surface())
            },
            CapabilitiesError::Surface
        );

        let formats = on_error_ret!(
            unsafe {
                surface
                    .loader()
                    .get_physical_device_surface_formats(hw.device(), surface.surface())
            },
            CapabilitiesError::Formats
        );

        Ok(Capabilities {
            i_modes: mods,
            i_capabilities: capabilities,
            i_formats: formats,
        })
    }

    /// Return number of minimal number of images required for the swapchain
    pub fn min_img_count(&self) -> u32 {
        self.i_capabilities.min_image_count
    }

    /// Return number of max number of images supported for the swapchain
    ///
    /// Note: function return [u32::MAX] if there is no limit (max = 0) or limit is equal to [u32::MAX]
    pub fn max_img_count(&self) -> u32 {
        if self.i_capabilities.max_image_count == 0 {
            u32::MAX
        } else {
            self.i_capabilities.max_image_count
        }
    }

    /// Return true if `count` is in range [min_img_count; max_img_count]
    pub fn is_img_count_supported(&self, count: u32) -> bool {
        (self.min_img_count()..=self.max_img_count()).contains(&count)
    }

    /// Does surface support provided combination of format and color
    pub fn is_format_supported(&self, format: SurfaceFormat) -> bool {
        self.i_formats.contains(&format)
    }

    /// Return iterator over available surface formats and corresponding color schemes
    pub fn formats(&self) -> impl Iterator<Item = &SurfaceFormat> {
        self.i_formats.iter()
    }

    /// Return iterator over all available presentation modes
    pub fn modes(&self) -> impl Iterator<Item = &swapchain::PresentMode> {
        self.i_modes.iter()
    }

    /// Does surface support provided presentation mode
    pub fn is_mode_supported(&self, mode: swapchain::PresentMode) -> bool {
        self.i_modes.contains(&mode)
    }

    /// Check if selected flags is supported
    pub fn is_flags_supported(&self, flags: UsageFlags) -> bool {
        self.i_capabilities.supported_usage_flags.contains(flags)
    }

    /// Return 2d extent reported by surface
    pub fn extent2d(&self) -> Extent2D {
        self.i_capabilities.current_extent
    }

    /// Return current transformation
    pub fn pre_transformation(&self) -> PreTransformation {
        self.i_capabilities.current_transform
    }

    /// Retrun current composite alpha flags
    pub fn alpha_composition(&self) -> CompositeAlphaFlags {
        self.i_capabilities.supported_composite_alpha
    }

    /// Does surface support provided alpha composition flag(s)
    pub fn is_alpha_supported(&self, alpha: CompositeAlphaFlags) -> bool {
        self.i_capabilities.supported_composite_alpha.contains(alpha)
    }

    pub fn first_alpha_composition(&self) -> Option<CompositeAlphaFlags> {
        for i in 0..4 {
            if self
                .i_capabilities
                .supported_composite_alpha
                .contains(vk::CompositeAlphaFlagsKHR::from_raw(1 << i))
            {
                return Some(vk::CompositeAlphaFlagsKHR::from_raw(1 << i));
            }
        }

        None
    }

    /// Preferred surface format
    ///
    /// See [select::surface_format](crate::select::surface_format)
    pub fn best_format(&self) -> Result<SurfaceFormat, select::SelectError> {
        select::surface_format(&self.i_formats)
    }

    /// Preferred present mode
    ///
    /// See [select::present_mode](crate::select::present_mode)
    pub fn best_mode(&self) -> swapchain::PresentMode {
        select::present_mode(&self.i_modes)
    }

    /// Extent to use for presentation images within the window
    ///
    /// See [select::image_extent](crate::select::image_extent)
    pub fn adjusted_extent(&self, window: &window::Window) -> Extent2D {
        select::image_extent(window::extent(window), &self.i_capabilities)
    }
}
