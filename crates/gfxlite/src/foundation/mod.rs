//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types (integer rectangles, points)
//! - Logging setup

pub mod logging;
pub mod math;
