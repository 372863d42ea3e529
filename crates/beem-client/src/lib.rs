//! Beem bulk SMS REST API client.

mod client;
mod error;
mod types;

pub use client::{BeemClient, DEFAULT_BASE_URL};
pub use error::BeemError;
pub use types::*;
