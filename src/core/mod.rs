//! Core module - Pure domain logic and ambient plumbing
//!
//! This module provides:
//! - Token classification
//! - Destination URLs and run configuration
//! - Dispatch records and rendering
//! - Interactive token input
//! - Logging setup

pub mod classify;
pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
