//! Data models for the reporting front end.
//!
//! This module contains the data structures shared between the API client
//! and the view layer:
//!
//! - `Organization` plus its create/update/delete payloads
//! - `Report`, `ReportRecord`, `ReportMeta`: computed report results
//! - `ReportPeriod` / `Period`: raw and validated date ranges
//!
//! All types use camelCase field names on the wire. With the `ts` feature
//! enabled they also export TypeScript definitions for the web views.

pub mod organization;
pub mod report;

pub use organization::{DeleteReceipt, NewOrganization, Organization, OrganizationPatch};
pub use report::{Category, Period, Report, ReportMeta, ReportPeriod, ReportRecord};
