//! Shared building blocks for the Tandem scheduling assistant.
//!
//! Holds configuration loading, the core error type, remote API route
//! constants and the small value types every other crate agrees on.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
