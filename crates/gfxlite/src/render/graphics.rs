//! Windowing subsystem handle
//!
//! GLFW is process-wide state: it must be initialized before the first window
//! is created and terminated after the last one is gone. [`Graphics`] makes
//! that lifetime explicit. It is a reference-counted handle; every [`Window`]
//! keeps a clone, and the subsystem is torn down when the last handle drops.
//!
//! [`Graphics::acquire`] reuses a live subsystem on the current thread if one
//! exists and initializes a new one otherwise, so independent parts of an
//! application can share it without passing a handle around first.
//!
//! [`Window`]: crate::render::window::Window

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::time::Duration;
use thiserror::Error;

use crate::core::config::GraphicsConfig;

/// Windowing subsystem errors
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Configuration rejected before initialization
    #[error("Invalid graphics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for subsystem operations
pub type GraphicsResult<T> = Result<T, GraphicsError>;

thread_local! {
    static ACTIVE: RefCell<Weak<GraphicsInner>> = RefCell::new(Weak::new());
}

struct GraphicsInner {
    glfw: RefCell<glfw::Glfw>,
}

impl Drop for GraphicsInner {
    fn drop(&mut self) {
        log::trace!("Graphics subsystem released");
    }
}

/// Shared handle to the initialized windowing subsystem
///
/// Handles are cheap to clone and are not `Send`: GLFW must be driven from
/// the thread that initialized it.
#[derive(Clone)]
pub struct Graphics {
    inner: Rc<GraphicsInner>,
}

impl Graphics {
    /// Initialize a new subsystem instance
    ///
    /// GLFW errors reported after initialization are forwarded to the `log`
    /// facade at error level.
    pub fn init(config: &GraphicsConfig) -> GraphicsResult<Self> {
        Self::init_with_error_callback(config, log_glfw_error)
    }

    /// Initialize a new subsystem instance that reports GLFW errors to
    /// `callback` instead of the log
    ///
    /// Errors raised while initializing are delivered to `callback` too.
    pub fn init_with_error_callback<F>(
        config: &GraphicsConfig,
        callback: F,
    ) -> GraphicsResult<Self>
    where
        F: FnMut(glfw::Error, String) + 'static,
    {
        config
            .validate()
            .map_err(|e| GraphicsError::InvalidConfig(e.to_string()))?;

        let glfw = glfw::init(callback)
            .map_err(|e| GraphicsError::InitializationFailed(format!("{e:?}")))?;

        log::info!("Loaded GLFW {}", glfw::get_version_string());

        let inner = Rc::new(GraphicsInner {
            glfw: RefCell::new(glfw),
        });
        ACTIVE.with(|active| *active.borrow_mut() = Rc::downgrade(&inner));

        log::trace!("Graphics subsystem initialized");
        Ok(Self { inner })
    }

    /// Handle to the live subsystem, initializing it on first use
    pub fn acquire(config: &GraphicsConfig) -> GraphicsResult<Self> {
        match Self::active() {
            Some(graphics) => Ok(graphics),
            None => Self::init(config),
        }
    }

    /// Handle to the live subsystem on this thread, if any
    pub fn active() -> Option<Self> {
        ACTIVE
            .with(|active| active.borrow().upgrade())
            .map(|inner| Self { inner })
    }

    /// Number of live handles, including those held by windows
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Process pending events without blocking
    pub fn poll_events(&self) {
        self.glfw().poll_events();
    }

    /// Block until an event arrives or `timeout` elapses, then process events
    pub fn wait_events(&self, timeout: Duration) {
        self.glfw().wait_events_timeout(timeout.as_secs_f64());
    }

    /// Replace the GLFW error handler for every handle
    pub fn set_error_callback<F>(&self, callback: F)
    where
        F: FnMut(glfw::Error, String) + 'static,
    {
        self.glfw().set_error_callback(callback);
    }

    /// Route GLFW errors back to the log
    pub fn log_errors(&self) {
        self.set_error_callback(log_glfw_error);
    }

    /// Seconds since initialization, as reported by GLFW
    pub fn time(&self) -> f64 {
        self.glfw().get_time()
    }

    pub(crate) fn glfw(&self) -> RefMut<'_, glfw::Glfw> {
        self.inner.glfw.borrow_mut()
    }
}

impl std::fmt::Debug for Graphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graphics")
            .field("handles", &self.handle_count())
            .finish()
    }
}

#[allow(clippy::needless_pass_by_value)] // signature fixed by glfw::init
fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error ({:?}): {}", error, description);
}
