//! Interactive terminal client of the scheduling assistant.
//!
//! ## Module Organization
//!
//! - `app`: view routing, command parsing and text rendering
//! - `config`: command-line overrides and backend selection
//! - `error`: application-level errors

pub mod app;
pub mod config;
pub mod error;
