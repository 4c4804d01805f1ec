//! fincache - client core for a financial reporting front end.
//!
//! This crate backs an administrative UI in which an authenticated user
//! selects an organization and a date range, requests a computed report and
//! views the results, while an admin additionally manages the organization
//! list. The interesting part is the resilience layer: every operation goes
//! through an [`api::ApiClient`] that caches the organization list for a
//! short TTL and transparently falls back to locally generated data when the
//! backend is unreachable, flipping a shared status flag that views surface
//! as an offline banner instead of an error page.
//!
//! Module map:
//!
//! - [`api`]: the client itself plus its error taxonomy
//! - [`cache`]: TTL-keyed in-memory cache
//! - [`status`]: last known server reachability
//! - [`mock`]: fallback organization directory and report generator
//! - [`auth`]: local login against statically configured credentials
//! - [`config`]: environment-driven settings
//! - [`models`]: wire/domain types shared with the view layer

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod mock;
pub mod models;
pub mod status;

pub use api::{ApiClient, ApiError, ClientContext};
pub use config::Config;
