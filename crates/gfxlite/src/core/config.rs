//! # Graphics Configuration
//!
//! Configuration structures for the windowing subsystem and logging. Every
//! structure is serializable so applications can keep it in a TOML or RON file
//! next to their assets.
//!
//! ## Configuration Categories
//!
//! - **Window Config**: title, size, visibility and the requested OpenGL context
//! - **Logging Config**: default log filter
//! - **Graphics Config**: top-level structure bundling the above

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use crate::config::{Config, ConfigError};
use crate::render::window::WindowHints;

/// # Window Configuration
///
/// Parameters used when creating a window and its OpenGL context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether the window is shown on creation
    pub visible: bool,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Requested OpenGL context version (major, minor)
    pub gl_version: (u32, u32),
}

impl WindowConfig {
    /// Create a new window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Set visibility on creation
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Allow or forbid resizing
    #[must_use]
    pub const fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Request a specific OpenGL context version
    #[must_use]
    pub const fn with_gl_version(mut self, major: u32, minor: u32) -> Self {
        self.gl_version = (major, minor);
        self
    }

    /// Creation hints derived from the boolean flags
    pub fn hints(&self) -> WindowHints {
        let mut hints = WindowHints::empty();
        hints.set(WindowHints::VISIBLE, self.visible);
        hints.set(WindowHints::RESIZABLE, self.resizable);
        hints
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.gl_version.0 < 3 {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} predates core profiles",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gfxlite".to_string(),
            width: 800,
            height: 600,
            visible: true,
            resizable: false,
            gl_version: (4, 3),
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter in `env_logger` syntax (`info`, `gfxlite=debug`, ...)
    pub level: String,
}

impl LoggingConfig {
    /// Set the default filter
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// # Complete Graphics Configuration
///
/// Top-level configuration applications load at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Main window configuration
    pub window: WindowConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Upper bound on how long an event wait may block, in seconds
    pub event_timeout_secs: f64,
}

impl GraphicsConfig {
    /// Event wait timeout as a `Duration`
    pub fn event_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.event_timeout_secs.max(0.0))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        if !self.event_timeout_secs.is_finite() || self.event_timeout_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "event timeout must be a non-negative number of seconds, got {}",
                self.event_timeout_secs
            )));
        }
        Ok(())
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
            event_timeout_secs: 1.0 / 60.0,
        }
    }
}

impl Config for GraphicsConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GraphicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = WindowConfig::new("empty", 0, 600);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_legacy_gl_rejected() {
        let config = WindowConfig::default().with_gl_version(2, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let config = GraphicsConfig {
            event_timeout_secs: -1.0,
            ..GraphicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hints_follow_flags() {
        let hidden = WindowConfig::default().with_visible(false).with_resizable(true);
        assert_eq!(hidden.hints(), WindowHints::RESIZABLE);
        assert!(WindowConfig::default().hints().contains(WindowHints::VISIBLE));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GraphicsConfig::from_toml(
            r#"
            event_timeout_secs = 0.5

            [window]
            title = "atlas viewer"
            width = 320
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "atlas viewer");
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.event_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let file = format!("gfxlite_graphics_{}.ron", std::process::id());
        let path = std::env::temp_dir().join(file);
        let config = GraphicsConfig {
            window: WindowConfig::new("ron", 640, 480).with_gl_version(3, 3),
            logging: LoggingConfig::default().with_level("debug"),
            event_timeout_secs: 0.25,
        };

        config.save_to_file(&path).unwrap();
        let loaded = GraphicsConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
