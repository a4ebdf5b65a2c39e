//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - RGBA color values
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;

pub use color::Color4;
