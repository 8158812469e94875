//! Convenience layer over the Vulkan API
//!
//! Each module wraps one group of native objects: call the native function,
//! validate the result code, return an error value instead of aborting
//!
//! The only logic of its own lives in [select](crate::select): scoring of
//! physical devices and the preference rules for surface format, present mode
//! and image extent
//!
//! Usually each object is created by filling a configuration struct and
//! passing it to `new`

pub mod macros;
pub mod debug;
pub mod layers;
pub mod extensions;
pub mod libvk;
pub mod hw;
pub mod select;
pub mod surface;
pub mod dev;
pub mod sync;
pub mod swapchain;
pub mod window;
