//! REST API server for the swap-confirmation reconciliation engine
//!
//! This crate exposes the reconciliation pipeline over HTTP:
//! `POST /process` for batch reconciliation, `POST /aliases/save` for
//! alias save acknowledgements, plus health and readiness probes.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export reconciliation dependencies for integration
pub use adapter_docs;
pub use recon_core;
pub use recon_engine;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
