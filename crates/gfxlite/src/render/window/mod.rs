//! Window management using GLFW
//!
//! Windows are created through a [`Graphics`] handle and carry an OpenGL core
//! profile context that is made current on creation.
//!
//! [`Graphics`]: crate::render::graphics::Graphics

mod handle;

pub use handle::{Window, WindowError, WindowResult};

/// Event types delivered by [`Window::drain_events`]
pub use glfw::{Action, Key, Modifiers, WindowEvent};

bitflags::bitflags! {
    /// Window creation hints
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowHints: u32 {
        /// Show the window as soon as it is created
        const VISIBLE = 0x01;
        /// Let the user resize the window
        const RESIZABLE = 0x02;
    }
}

impl Default for WindowHints {
    fn default() -> Self {
        Self::VISIBLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hint_is_visible() {
        assert_eq!(WindowHints::default(), WindowHints::VISIBLE);
        assert_eq!(WindowHints::VISIBLE.bits(), 0x01);
    }
}
