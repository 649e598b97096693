//! # Folio Library
//!
//! This library exposes the Folio server and CLI modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod api;
pub mod cli;
pub mod config;

// Re-export folio_core for convenience
pub use folio_core;
