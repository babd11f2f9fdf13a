//! Workflow outcome consumed by the payload builder.

use serde::{Deserialize, Serialize};

/// Per-task results of a finished workflow.
///
/// Task order reflects execution order and is preserved when the lists are
/// joined into the default notification body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(default)]
    pub passed_tasks: Vec<String>,
    #[serde(default)]
    pub failed_tasks: Vec<String>,
    /// Overall status code of the run (0 means success)
    #[serde(default)]
    pub overall_status: i32,
}

impl OutcomeRecord {
    pub fn new<P, F>(passed_tasks: P, failed_tasks: F, overall_status: i32) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            passed_tasks: passed_tasks.into_iter().map(Into::into).collect(),
            failed_tasks: failed_tasks.into_iter().map(Into::into).collect(),
            overall_status,
        }
    }

    /// Passed task names joined with commas.
    pub fn passed_summary(&self) -> String {
        self.passed_tasks.join(",")
    }

    /// Failed task names joined with commas.
    pub fn failed_summary(&self) -> String {
        self.failed_tasks.join(",")
    }

    pub fn is_success(&self) -> bool {
        self.overall_status == 0
    }
}
