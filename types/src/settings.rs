//! Report settings shared between the core pipeline and the CLI.

use serde::{Deserialize, Serialize};

/// How the podium report is computed and ranked.
///
/// Loaded from the `[report]` table of the config file; every field has a
/// default so the table may be omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    /// Trailing window length in days.
    pub days: u32,

    /// Number of actors shown per ranked subsection.
    pub top_n: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { days: 7, top_n: 5 }
    }
}
