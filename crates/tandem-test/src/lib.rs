//! Tandem scheduling client - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every layer
//! through `tandem_test::` paths.

pub mod component {
    pub use tandem_client as client;
    pub use tandem_core as core;
    pub use tandem_service as service;
}

pub mod app {
    pub use tandem_app::app::*;
}
