//! Instance and device extensions

use ash::{ext, khr};

use std::error::Error;
use std::ffi::CStr;
use std::fmt;

use crate::on_error_ret;
use crate::window;
use raw_window_handle::HasDisplayHandle;

pub const DEBUG_EXT_NAME: &CStr = ext::debug_utils::NAME;

pub const SURFACE_EXT_NAME: &CStr = khr::surface::NAME;

pub const XLIB_SURFACE_EXT_NAME: &CStr = khr::xlib_surface::NAME;

pub const WAYLAND_SURFACE_EXT_NAME: &CStr = khr::wayland_surface::NAME;

/// Device ext
pub const SWAPCHAIN_EXT_NAME: &CStr = khr::swapchain::NAME;

#[derive(Debug)]
pub enum ExtensionsError {
    Handle,
    Enumerate,
}

impl fmt::Display for ExtensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            ExtensionsError::Handle => "Failed to get native display handle",
            ExtensionsError::Enumerate => {
                "Failed to enumerate required surface extensions for the platform"
            }
        };

        write!(f, "{:?}", err_msg)
    }
}

impl Error for ExtensionsError {}

/// Return required instance extensions for presenting to the window
pub fn required_extensions(
    window: &window::Window,
) -> Result<Vec<&'static CStr>, ExtensionsError> {
    let display = on_error_ret!(window.display_handle(), ExtensionsError::Handle);

    let names = on_error_ret!(
        ash_window::enumerate_required_extensions(display.as_raw()),
        ExtensionsError::Enumerate
    );

    // Names returned by ash-window are static nul-terminated strings
    Ok(names
        .iter()
        .map(|&name| unsafe { CStr::from_ptr(name) })
        .collect())
}
