//! HTTP front for the dashboard: forwards task mutations to ClickUp with the
//! server-held credential and serves the local workload views.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ProxyError;
pub use server::{router, serve, AppState};
