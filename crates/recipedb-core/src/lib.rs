//! Shared service plumbing: config loading, tracing, HTTP middleware and error envelope.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
