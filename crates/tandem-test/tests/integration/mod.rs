#![allow(clippy::unused_async)]
//! Integration tests for the client against the stub scheduling API.
//!
//! ## Running Tests
//!
//! No external service is needed; each test starts its own stub:
//!
//! ```sh
//! cargo test -p tandem-test --test integration
//! ```

mod helpers;
mod agents;
mod availability;
mod login;
mod schedule;
