//! GLFW window with an OpenGL context

use glfw::Context;
use thiserror::Error;

use super::WindowHints;
use crate::core::config::WindowConfig;
use crate::render::graphics::Graphics;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW refused to create the window or its context
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// Configuration rejected before creation
    #[error("Invalid window configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management
///
/// Holds a [`Graphics`] handle so the subsystem outlives every window.
pub struct Window {
    // Field order matters: the window must drop before the subsystem handle.
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    graphics: Graphics,
}

impl Window {
    /// Create a window and make its OpenGL context current
    pub fn new(graphics: &Graphics, config: &WindowConfig) -> WindowResult<Self> {
        config
            .validate()
            .map_err(|e| WindowError::InvalidConfig(e.to_string()))?;

        let hints = config.hints();
        let (major, minor) = config.gl_version;

        let created = {
            let mut glfw = graphics.glfw();
            glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(cfg!(target_os = "macos")));
            glfw.window_hint(glfw::WindowHint::Visible(hints.contains(WindowHints::VISIBLE)));
            glfw.window_hint(glfw::WindowHint::Resizable(hints.contains(WindowHints::RESIZABLE)));
            glfw.create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
        };
        let (mut window, events) = created.ok_or_else(|| {
            WindowError::CreationFailed(format!(
                "'{}' {}x{} with OpenGL {major}.{minor} core",
                config.title, config.width, config.height
            ))
        })?;

        window.make_current();
        window.set_close_polling(true);
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        let version = window.get_context_version();
        log::info!(
            "Created window '{}' {}x{}, OpenGL {}.{}",
            config.title,
            config.width,
            config.height,
            version.major,
            version.minor
        );

        Ok(Self {
            window,
            events,
            title: config.title.clone(),
            graphics: graphics.clone(),
        })
    }

    /// Whether the user or the application asked the window to close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request or cancel closing
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Take the events received since the last call
    ///
    /// Events are queued by [`Graphics::poll_events`] or
    /// [`Graphics::wait_events`].
    pub fn drain_events(&mut self) -> Vec<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events).collect()
    }

    /// Process pending events and take them, marking close requests
    ///
    /// A [`glfw::WindowEvent::Close`] sets [`Window::should_close`].
    pub fn handle_events(&mut self) -> Vec<(f64, glfw::WindowEvent)> {
        self.graphics.poll_events();
        let events = self.drain_events();
        if events.iter().any(|(_, event)| is_close_request(event)) {
            self.window.set_should_close(true);
        }
        events
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Make this window's context current on the calling thread
    pub fn make_current(&mut self) {
        self.window.make_current();
    }

    /// Client area size in screen coordinates
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Current title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title
    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.title = title.to_string();
    }

    /// Put text on the system clipboard
    pub fn set_clipboard(&mut self, text: &str) {
        self.window.set_clipboard_string(text);
    }

    /// Text currently on the system clipboard
    pub fn clipboard(&self) -> Option<String> {
        self.window.get_clipboard_string()
    }

    /// Look up an OpenGL function for a GL loader
    pub fn get_proc_address(&mut self, name: &str) -> glfw::GLProc {
        self.window.get_proc_address(name)
    }

    /// The subsystem handle this window keeps alive
    pub const fn graphics(&self) -> &Graphics {
        &self.graphics
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::trace!("Window '{}' destroyed", self.title);
    }
}

const fn is_close_request(event: &glfw::WindowEvent) -> bool {
    matches!(event, glfw::WindowEvent::Close)
}

fn clamp_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_request() {
        assert!(is_close_request(&glfw::WindowEvent::Close));
        assert!(!is_close_request(&glfw::WindowEvent::Focus(true)));
    }

    #[test]
    fn test_negative_dimension_clamps_to_zero() {
        assert_eq!(clamp_dimension(-4), 0);
        assert_eq!(clamp_dimension(640), 640);
    }
}
