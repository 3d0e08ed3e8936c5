//! Dispatch result model
//!
//! Every processed token maps to one [`DispatchRecord`] before rendering.

use serde::Serialize;

use crate::core::classify::ClassKind;

/// What happened to a resolved URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStatus {
    /// Handed to the OS opener
    Opened,
    /// Dry run: printed/logged only
    Printed,
    /// The opener could not be started
    Failed,
}

/// A classified token with its resolved destination, as published by a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// Position of the token in the input (diagnostics only)
    pub index: usize,
    pub token: String,
    pub kind: ClassKind,
    pub url: String,
}

/// Outcome of one token after the launcher ran
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRecord {
    pub index: usize,
    pub token: String,
    pub kind: ClassKind,
    pub url: String,
    pub status: LaunchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchRecord {
    pub fn new(result: DispatchResult, status: LaunchStatus) -> Self {
        Self {
            index: result.index,
            token: result.token,
            kind: result.kind,
            url: result.url,
            status,
            error: None,
        }
    }

    pub fn failed(result: DispatchResult, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(result, LaunchStatus::Failed)
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == LaunchStatus::Failed
    }
}

/// All records of a run, in the order results were received
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub records: Vec<DispatchRecord>,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DispatchRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose launch failed
    pub fn failures(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter().filter(|r| r.is_failure())
    }
}
