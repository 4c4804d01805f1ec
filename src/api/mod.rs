//! REST API client for the reporting backend.
//!
//! This module provides the `ApiClient`, the single entry point views use
//! for organization management and report calculation. The client wraps the
//! remote HTTP surface with a cache/fallback policy: reads are served from a
//! short-lived cache when possible, and every operation degrades to locally
//! generated data when the server cannot be reached.

pub mod client;
pub mod error;

pub use client::{ApiClient, ClientContext};
pub use error::ApiError;
