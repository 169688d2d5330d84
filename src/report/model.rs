use chrono::NaiveDateTime;
use serde_derive::Serialize;
use std::fmt;

pub const UNKNOWN_MODULE: &str = "Unknown";
pub const GRAND_TOTAL: &str = "Total";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Pass => f.write_str("PASS"),
            Status::Fail => f.write_str("FAIL"),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub sequence_number: usize,
    pub name: String,
    #[serde(with = "crate::reporter::serialize::timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "crate::reporter::serialize::timestamp")]
    pub end_time: NaiveDateTime,
    pub duration_seconds: f64,
    pub status: Status,
    pub log_text: Vec<String>,
    pub module: String,
    /// Left empty for manual annotation of the rendered report.
    pub comment: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub module: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl ModuleSummary {
    pub fn new<S: Into<String>>(module: S) -> Self {
        Self {
            module: module.into(),
            total: 0,
            passed: 0,
            failed: 0,
        }
    }

    pub fn count(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Pass => self.passed += 1,
            Status::Fail => self.failed += 1,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecords {
    pub module: String,
    pub records: Vec<TestRecord>,
}

/// Records of a single run grouped by module, with the derived counts.
///
/// Only [`crate::report::aggregate`] builds a report, so the summaries always
/// agree with the records they were computed from.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    modules: Vec<ModuleRecords>,
    summaries: Vec<ModuleSummary>,
    grand_total: ModuleSummary,
}

impl Report {
    pub(in crate::report) fn new(
        modules: Vec<ModuleRecords>,
        summaries: Vec<ModuleSummary>,
        grand_total: ModuleSummary,
    ) -> Self {
        Self {
            modules,
            summaries,
            grand_total,
        }
    }

    pub fn modules(&self) -> &[ModuleRecords] {
        &self.modules
    }

    pub fn summaries(&self) -> &[ModuleSummary] {
        &self.summaries
    }

    pub fn grand_total(&self) -> &ModuleSummary {
        &self.grand_total
    }
}
