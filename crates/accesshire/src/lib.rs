//! Core library for the AccessHire job marketplace.
//!
//! The `marketplace` module holds the engine itself: the job catalog index,
//! the application lifecycle manager, the profile synchronizer, and the
//! employer listing aggregator, all working over a persistence gateway
//! contract. The remaining modules carry the service plumbing shared with
//! the API binary: configuration, telemetry, and the top-level error type.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
