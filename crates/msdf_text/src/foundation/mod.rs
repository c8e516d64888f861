//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types shared by layout and geometry code
//! - Logging utilities

pub mod math;
pub mod logging;
