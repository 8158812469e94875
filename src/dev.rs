//! Provides API to the selected GPU (Logical device)
//!
//! Instead of [hw module](crate::hw) `dev` represents logical level

use ash::vk;

use crate::on_error_ret;
use crate::{hw, libvk};

use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;
use std::sync::Arc;

#[doc(hidden)]
pub struct Core {
    i_device: ash::Device,
}

impl Core {
    fn new(device: ash::Device) -> Core {
        Core { i_device: device }
    }

    pub fn device(&self) -> &ash::Device {
        &self.i_device
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("i_device", &(&self.i_device as *const ash::Device))
            .finish()
    }
}

/// Requested queue configuration
///
/// Example
/// ```rust
/// use vkhelper::dev::QueueFamilyCfg;
///
/// let cfg = QueueFamilyCfg {
///     queue_family_index: 0,
///     priorities: &[1.0, 0.5],
/// };
/// ```
///
/// Device will use `2` queues from queue family with index `0`
/// with priorities `1.0` and `0.5` respectively
#[derive(Debug)]
pub struct QueueFamilyCfg<'a> {
    /// Which queue family [`Device`] should use
    ///
    /// See [`QueueFamilyDescription::index`](crate::hw::QueueFamilyDescription::index)
    pub queue_family_index: u32,
    /// `priorities.len()` defines how many queues will be used by [`Device`]
    ///
    /// `priorities.len()` **must be** less or equal to the
    /// [number of queues](crate::hw::QueueFamilyDescription::count)
    pub priorities: &'a [f32],
}

/// Device configuration structure
///
/// Note: to prevent lifetime bounds [HWDevice](crate::hw::HWDevice) will be cloned
pub struct DeviceCfg<'a> {
    pub lib: &'a libvk::Instance,
    pub hw: &'a hw::HWDevice,
    pub queues_cfg: &'a [QueueFamilyCfg<'a>],
    pub extensions: &'a [&'static CStr],
}

#[derive(Debug)]
pub enum DeviceError {
    Creating,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to create device (vkCreateDevice call failed)")
    }
}

impl std::error::Error for DeviceError {}

/// Information about what queue family [`Device`] uses
#[derive(Debug)]
pub struct QueueInfo {
    i_index: u32,
    i_count: u32,
}

impl QueueInfo {
    /// Queue family index
    pub fn index(&self) -> u32 {
        self.i_index
    }

    /// How many queues in use
    pub fn count(&self) -> u32 {
        self.i_count
    }
}

/// `Device` represents logical device and provide API to the selected GPU
///
/// As Vulkan API specification demands instance must outlive device
/// (and any other object which created via instance)
pub struct Device {
    i_core: Arc<Core>,
    i_queues: Vec<QueueInfo>,
    i_hw: hw::HWDevice,
}

impl Device {
    pub fn new(dev_type: &DeviceCfg) -> Result<Device, DeviceError> {
        let dev_queue_info: Vec<QueueInfo> = dev_type
            .queues_cfg
            .iter()
            .map(|info| QueueInfo {
                i_index: info.queue_family_index,
                i_count: info.priorities.len() as u32,
            })
            .collect();

        let dev_queue_create_info: Vec<vk::DeviceQueueCreateInfo> = dev_type
            .queues_cfg
            .iter()
            .map(|info| vk::DeviceQueueCreateInfo {
                s_type: vk::StructureType::DEVICE_QUEUE_CREATE_INFO,
                p_next: ptr::null(),
                flags: vk::DeviceQueueCreateFlags::empty(),
                queue_family_index: info.queue_family_index,
                queue_count: info.priorities.len() as u32,
                p_queue_priorities: info.priorities.as_ptr(),
                _marker: PhantomData,
            })
            .collect();

        let extensions: Vec<*const c_char> =
            dev_type.extensions.iter().map(|ext| ext.as_ptr()).collect();

        let create_info = vk::DeviceCreateInfo {
            s_type: vk::StructureType::DEVICE_CREATE_INFO,
            p_next: ptr::null(),
            flags: vk::DeviceCreateFlags::empty(),
            queue_create_info_count: dev_queue_create_info.len() as u32,
            p_queue_create_infos: dev_queue_create_info.as_ptr(),
            enabled_layer_count: 0,
            pp_enabled_layer_names: ptr::null(),
            enabled_extension_count: extensions.len() as u32,
            pp_enabled_extension_names: if extensions.is_empty() {
                ptr::null()
            } else {
                extensions.as_ptr()
            },
            p_enabled_features: dev_type.hw.features(),
            _marker: PhantomData,
        };

        let dev: ash::Device = on_error_ret!(
            unsafe {
                dev_type
                    .lib
                    .instance()
                    .create_device(dev_type.hw.device(), &create_info, None)
            },
            DeviceError::Creating
        );

        Ok(Device {
            i_core: Arc::new(Core::new(dev)),
            i_queues: dev_queue_info,
            i_hw: dev_type.hw.clone(),
        })
    }

    /// Return information about i-th queue family in use
    ///
    /// `i` **must be** less than [`Device::queue_family_count`]
    pub fn queue(&self, i: u32) -> &QueueInfo {
        &self.i_queues[i as usize]
    }

    /// Return information about how many queue families in use
    pub fn queue_family_count(&self) -> u32 {
        self.i_queues.len() as u32
    }

    #[doc(hidden)]
    pub fn core(&self) -> &Arc<Core> {
        &self.i_core
    }

    #[doc(hidden)]
    pub fn device(&self) -> &ash::Device {
        self.i_core.device()
    }

    #[doc(hidden)]
    pub fn hw(&self) -> &hw::HWDevice {
        &self.i_hw
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        unsafe { self.i_core.device().destroy_device(None) };
    }
}
