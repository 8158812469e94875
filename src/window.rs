//! Helper functions around `winit` library

use ash::vk;

use winit::error::{EventLoopError, OsError};
use winit::event_loop::EventLoopBuilder;

pub type EventLoop = winit::event_loop::EventLoop<()>;
pub type Window = winit::window::Window;

#[cfg(target_os = "linux")]
/// Create new eventloop
///
/// Event loop can be used in different thread (unlike original winit event loop)
pub fn eventloop() -> Result<EventLoop, EventLoopError> {
    use winit::platform::wayland::EventLoopBuilderExtWayland;
    use winit::platform::x11::EventLoopBuilderExtX11;

    let mut builder = EventLoopBuilder::new();
    EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    EventLoopBuilderExtX11::with_any_thread(&mut builder, true).build()
}

#[cfg(not(target_os = "linux"))]
/// Create new eventloop
pub fn eventloop() -> Result<EventLoop, EventLoopError> {
    EventLoopBuilder::new().build()
}

pub fn create_window(eventloop: &EventLoop) -> Result<Window, OsError> {
    winit::window::Window::new(eventloop)
}

/// Window size in physical pixels
pub fn extent(window: &Window) -> vk::Extent2D {
    let size = window.inner_size();

    vk::Extent2D {
        width: size.width,
        height: size.height,
    }
}
