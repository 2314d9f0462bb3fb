//! Shared utilities and common types for the Doclink analytics engine.
//!
//! This crate provides common functionality used across all other crates:
//! - Email domain and company heuristics
//! - Human-readable formatting (durations, country flags)
//! - Common validation logic
//! - Logging initialization

pub mod email;
pub mod format;
pub mod logging;
pub mod validation;
