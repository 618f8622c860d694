pub mod analytics;
pub mod cli;
pub mod clickup;
pub mod config;
pub mod error;
pub mod proxy;
pub mod source;
pub mod tasks;
pub mod workload;
