//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Entity handles
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod math;
