//! Summarize stage: condenses the search output into bullet points.

use std::sync::Arc;

use crate::agents::stage::{Stage, StageKind};
use crate::agents::worker::Worker;
use crate::llm::TextGenerator;

pub const ROLE: &str = "Information Summarizer";
pub const GOAL: &str = "Condense research findings into clear, organized bullet points";
pub const BACKSTORY: &str = "You are a skilled technical writer who specializes in distilling complex information into digestible summaries. You maintain accuracy while improving readability.";
pub const EXPECTED_OUTPUT: &str =
    "Well-organized summary with bullet points covering the main aspects of the topic";

pub fn worker(generator: Option<Arc<dyn TextGenerator>>) -> Worker {
    Worker::new(ROLE, GOAL, BACKSTORY, generator)
}

pub fn instruction(query: &str) -> String {
    format!(
        r#"Summarize the research findings about: {query}

Take the search results and condense them into clear, organized bullet points.
Maintain accuracy while improving readability.
Structure the information logically with key points highlighted."#
    )
}

pub fn stage(query: &str, worker: Worker) -> Stage {
    Stage::new(StageKind::Summarize, instruction(query), EXPECTED_OUTPUT, worker)
}
