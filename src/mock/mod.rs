//! Locally generated fallback data.
//!
//! When the remote API is unreachable the client serves data from here
//! instead of failing: a fixed directory of five organizations that acts as
//! the session's pseudo-database, and a report generator that synthesizes
//! numerically plausible line items for any requested period.

pub mod directory;
pub mod report;

pub use directory::{MemoryDirectory, OrganizationDirectory};
pub use report::generate_rows;
