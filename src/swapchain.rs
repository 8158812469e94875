//! Array of presentable images
//!
//! See [more](https://registry.khronos.org/vulkan/specs/1.2-extensions/html/chap34.html#_wsi_swapchain)

use ash::khr::swapchain;
use ash::vk;

use crate::on_error_ret;
use crate::{dev, libvk, select, surface, sync, window};

use std::error::Error;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::sync::Arc;

#[derive(Debug)]
pub enum SwapchainError {
    Creating,
    NextImage,
    Images,
}

impl fmt::Display for SwapchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            SwapchainError::Creating => {
                "Failed to create swapchain (vkCreateSwapchainKHR call failed)"
            }
            SwapchainError::NextImage => {
                "Failed to acquire next image (vkAcquireNextImageKHR call failed)"
            }
            SwapchainError::Images => "Failed to get images from swapchain",
        };

        write!(f, "{:?}", err_msg)
    }
}

impl Error for SwapchainError {}

/// Present modes
///
#[doc = "Values: <https://docs.rs/ash/latest/ash/vk/struct.PresentModeKHR.html>"]
///
#[doc = "Vulkan documentation: <https://registry.khronos.org/vulkan/specs/1.3-extensions/man/html/VkPresentModeKHR.html>"]
pub type PresentMode = vk::PresentModeKHR;

/// Swapchain configuration struct
///
/// Note:
///
/// Swapchain creation process **does not** check if `format` and `color` are supported by surface or not
///
/// See [Capabilities::is_format_supported](crate::surface::Capabilities::is_format_supported)
///
/// Swapchain creation process **does not** check if `num_of_images` is valid
///
/// See [Capabilities::is_img_count_supported](crate::surface::Capabilities::is_img_count_supported)
///
/// Swapchain creation process **does not** check if `present_mode` is supported
///
/// See [Capabilities::is_mode_supported](crate::surface::Capabilities::is_mode_supported)
///
/// # Default
///
/// [`SwapchainCfg::recommended`] fills every field from queried
/// [Capabilities](crate::surface::Capabilities) via the
/// [select](crate::select) preference rules
pub struct SwapchainCfg {
    pub num_of_images: u32,
    pub format: surface::ImageFormat,
    pub color: surface::ColorSpace,
    pub present_mode: PresentMode,
    pub flags: surface::UsageFlags,
    pub extent: surface::Extent2D,
    pub transform: surface::PreTransformation,
    pub alpha: surface::CompositeAlphaFlags,
}

impl SwapchainCfg {
    /// Fill the whole configuration from surface capabilities
    ///
    /// Format, present mode and extent follow the preference rules of
    /// [select](crate::select); image count is one above the supported
    /// minimum, capped by the supported maximum
    pub fn recommended(
        capabilities: &surface::Capabilities,
        window: &window::Window,
    ) -> Result<SwapchainCfg, select::SelectError> {
        let format = capabilities.best_format()?;

        Ok(SwapchainCfg {
            num_of_images: (capabilities.min_img_count() + 1).min(capabilities.max_img_count()),
            format: format.format,
            color: format.color_space,
            present_mode: capabilities.best_mode(),
            flags: surface::UsageFlags::COLOR_ATTACHMENT,
            extent: capabilities.adjusted_extent(window),
            transform: capabilities.pre_transformation(),
            alpha: capabilities
                .first_alpha_composition()
                .unwrap_or(surface::CompositeAlphaFlags::OPAQUE),
        })
    }
}

pub struct Swapchain {
    i_core: Arc<dev::Core>,
    i_loader: swapchain::Device,
    i_swapchain: vk::SwapchainKHR,
    i_format: vk::Format,
    i_extent: surface::Extent2D,
}

impl Swapchain {
    pub fn new(
        lib: &libvk::Instance,
        dev: &dev::Device,
        surface: &surface::Surface,
        swp_type: &SwapchainCfg,
    ) -> Result<Swapchain, SwapchainError> {
        let loader = swapchain::Device::new(lib.instance(), dev.device());

        let create_info = vk::SwapchainCreateInfoKHR {
            s_type: vk::StructureType::SWAPCHAIN_CREATE_INFO_KHR,
            p_next: ptr::null(),
            flags: vk::SwapchainCreateFlagsKHR::empty(),
            surface: surface.surface(),
            min_image_count: swp_type.num_of_images,
            image_format: swp_type.format,
            image_color_space: swp_type.color,
            image_extent: swp_type.extent,
            image_array_layers: 1,
            image_usage: swp_type.flags,
            image_sharing_mode: vk::SharingMode::EXCLUSIVE,
            queue_family_index_count: 0,
            p_queue_family_indices: ptr::null(),
            pre_transform: swp_type.transform,
            composite_alpha: swp_type.alpha,
            present_mode: swp_type.present_mode,
            clipped: ash::vk::TRUE,
            old_swapchain: vk::SwapchainKHR::null(),
            _marker: PhantomData,
        };

        let swapchain = on_error_ret!(
            unsafe { loader.create_swapchain(&create_info, None) },
            SwapchainError::Creating
        );

        Ok(Swapchain {
            i_core: dev.core().clone(),
            i_loader: loader,
            i_swapchain: swapchain,
            i_format: swp_type.format,
            i_extent: swp_type.extent,
        })
    }

    pub fn next_image(
        &self,
        timeout: u64,
        sem: Option<&sync::Semaphore>,
        fence: Option<&sync::Fence>,
    ) -> Result<u32, SwapchainError> {
        let (image_index, _) = on_error_ret!(
            unsafe {
                self.i_loader.acquire_next_image(
                    self.i_swapchain,
                    timeout,
                    if let Some(s) = sem {
                        s.semaphore()
                    } else {
                        vk::Semaphore::null()
                    },
                    if let Some(f) = fence {
                        f.fence()
                    } else {
                        vk::Fence::null()
                    },
                )
            },
            SwapchainError::NextImage
        );

        Ok(image_index)
    }

    /// Return raw handles of the presentable images
    pub fn images(&self) -> Result<Vec<vk::Image>, SwapchainError> {
        Ok(on_error_ret!(
            unsafe { self.i_loader.get_swapchain_images(self.i_swapchain) },
            SwapchainError::Images
        ))
    }

    #[doc(hidden)]
    pub fn loader(&self) -> &swapchain::Device {
        &self.i_loader
    }

    #[doc(hidden)]
    pub fn swapchain(&self) -> vk::SwapchainKHR {
        self.i_swapchain
    }

    #[doc(hidden)]
    pub fn format(&self) -> vk::Format {
        self.i_format
    }

    #[doc(hidden)]
    pub fn extent(&self) -> surface::Extent2D {
        self.i_extent
    }
}

impl Drop for Swapchain {
    fn drop(&mut self) {
        unsafe { self.i_loader.destroy_swapchain(self.i_swapchain, None) };
    }
}
