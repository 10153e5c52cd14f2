//! # apidecl Library
//!
//! This library exposes the apidecl command modules for testing.
//!
//! The binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;

// Re-export apidecl_core for convenience
pub use apidecl_core;
