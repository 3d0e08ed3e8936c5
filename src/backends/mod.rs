//! Backends module - Side-effecting collaborators
//!
//! Provides:
//! - browser: OS opener invocation (and a dry-run launcher for debug mode)
//! - dispatch: per-token task fan-out and sequential launching

pub mod browser;
pub mod dispatch;
