pub mod client;
pub mod types;

pub use client::{ClickUpClient, DEFAULT_API_BASE};
pub use types::*;
