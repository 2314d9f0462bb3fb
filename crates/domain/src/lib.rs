//! Analytics engine for Doclink shared links.
//!
//! Turns a flat list of access logs into engagement scores, return-visitor
//! statistics, a precomputed insights summary, and ranked insight and action
//! lists for a dashboard section. The crate does no I/O beyond loading its
//! own configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
