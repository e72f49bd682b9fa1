//! Domain models shared across the pipeline stages

use serde::Serialize;

/// One job listing row as shown on the source page.
///
/// Field order matches the page's column order, with the absolute link last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub category: String,
    pub organization: String,
    /// Display date, e.g. "Dec. 3, 2020"
    pub updated: String,
    pub county: String,
    pub link: String,
}
