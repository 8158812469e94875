//! Validation layer message routing
//!
//! Messages from the debug utils messenger are forwarded to the [`log`]
//! facade instead of being printed, the library installs no subscriber

use ash::vk;

use std::borrow::Cow;
use std::ffi::{c_void, CStr};

/// Callback for [DebugLayer](crate::layers::DebugLayer)
///
/// Maps message severity to the matching log level and never aborts
pub unsafe extern "system" fn vulkan_debug_utils_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _p_user_data: *mut c_void,
) -> vk::Bool32 {
    let message: Cow<str> = if p_callback_data.is_null() || (*p_callback_data).p_message.is_null() {
        Cow::from("(empty message)")
    } else {
        CStr::from_ptr((*p_callback_data).p_message).to_string_lossy()
    };

    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::error!("[{:?}] {}", message_type, message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        log::warn!("[{:?}] {}", message_type, message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        log::info!("[{:?}] {}", message_type, message);
    } else {
        log::debug!("[{:?}] {}", message_type, message);
    }

    vk::FALSE
}
