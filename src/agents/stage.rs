//! Stage definitions
//!
//! A stage pairs a rendered instruction with the worker that carries it out.
//! Stages are built fresh for every query and never reused.

use std::fmt;

use crate::agents::worker::{Assignment, Worker};
use crate::types::AppResult;

/// The three pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Search,
    Summarize,
    VerifyFormat,
}

impl StageKind {
    pub const ORDER: [StageKind; 3] = [StageKind::Search, StageKind::Summarize, StageKind::VerifyFormat];
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Search => write!(f, "Search"),
            StageKind::Summarize => write!(f, "Summarize"),
            StageKind::VerifyFormat => write!(f, "Verify/Format"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub kind: StageKind,
    pub instruction: String,
    /// Guidance for the worker only; the output is never checked against it.
    pub expected_output: String,
    pub worker: Worker,
}

impl Stage {
    pub fn new(
        kind: StageKind,
        instruction: impl Into<String>,
        expected_output: impl Into<String>,
        worker: Worker,
    ) -> Self {
        Self {
            kind,
            instruction: instruction.into(),
            expected_output: expected_output.into(),
            worker,
        }
    }

    /// Run this stage with the previous stage's output as context.
    pub async fn execute(&self, query: &str, prior: &str) -> AppResult<String> {
        let assignment = Assignment {
            query,
            instruction: &self.instruction,
            expected_output: &self.expected_output,
        };

        self.worker.perform(&assignment, prior).await
    }
}
