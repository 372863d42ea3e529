//! UKSS SMS relay - forwards batches of SMS requests to Beem.
//!
//! Every item in a submitted batch becomes one authenticated Beem call,
//! issued sequentially. The first failed call abandons the batch.

pub mod api;
pub mod config;
pub mod error;
pub mod relay;

pub use config::Config;
pub use error::RelayError;
pub use relay::{normalize_phone, relay_batch, BatchOutcome, BatchPlan, SmsItem, SmsResult};
