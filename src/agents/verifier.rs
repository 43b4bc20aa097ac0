//! Verify/Format stage: checks the summary and turns it into the final report.
//!
//! This is the last step of the pipeline; its output is the report body.

use std::sync::Arc;

use crate::agents::stage::{Stage, StageKind};
use crate::agents::worker::Worker;
use crate::llm::TextGenerator;

pub const ROLE: &str = "Fact Checker and Report Formatter";
pub const GOAL: &str = "Verify information accuracy and format it into a professional research report";
pub const BACKSTORY: &str = "You are a meticulous fact-checker and report formatter. You ensure all information is accurate, well-organized, and professionally presented.";
pub const EXPECTED_OUTPUT: &str = "Professional research report with executive summary, key findings, detailed analysis, and conclusion";

pub fn worker(generator: Option<Arc<dyn TextGenerator>>) -> Worker {
    Worker::new(ROLE, GOAL, BACKSTORY, generator)
}

pub fn instruction(query: &str) -> String {
    format!(
        r#"Create a final research report about: {query}

Review the summarized information for accuracy and completeness.
Format it into a professional research report with:
- Executive summary
- Key findings
- Detailed analysis
- Conclusion

Ensure all information is factually correct and well-presented."#
    )
}

pub fn stage(query: &str, worker: Worker) -> Stage {
    Stage::new(StageKind::VerifyFormat, instruction(query), EXPECTED_OUTPUT, worker)
}
