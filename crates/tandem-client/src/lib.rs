//! Remote collaborators of the scheduling assistant.
//!
//! ## Module Organization
//!
//! - `api`: the `SchedulingApi` trait every backend implements
//! - `http`: `reqwest` implementation talking to the scheduling service
//! - `memory`: process-local implementation for offline use and tests
//! - `wire`: request and response payloads as they travel on the wire

pub mod api;
pub mod error;
pub mod http;
pub mod memory;
pub mod wire;

pub use api::{SchedulingApi, SharedApi};
pub use error::{ClientError, ClientResult};
pub use http::HttpSchedulingApi;
pub use memory::MemorySchedulingApi;
