//! Shared utilities for omod.
//!
//! This crate provides cross-cutting concerns used by the other omod crates:
//! the unified error type, filesystem helpers, and terminal status and
//! progress indicators.

pub mod errors;
pub mod fs;
pub mod progress;
