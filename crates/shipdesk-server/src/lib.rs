//! HTTP server for the shipdesk back office.
//!
//! A thin JSON routing layer: every route decodes its body, calls one
//! [`shipdesk_office::BackOffice`] operation on the blocking pool, and maps
//! the outcome to a response. Acknowledgements are `{"mensaje": ...}`;
//! failures are `{"error": ...}` with 404 for unknown documents or
//! accounts, 400 for rejected input, and 500 otherwise.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, PORT_ENV};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::ShipdeskServer;
