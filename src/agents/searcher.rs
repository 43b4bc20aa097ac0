//! Search stage: gathers raw material on the query using the knowledge lookup tool.

use std::sync::Arc;

use crate::agents::stage::{Stage, StageKind};
use crate::agents::worker::Worker;
use crate::llm::TextGenerator;
use crate::search::Tool;

pub const ROLE: &str = "Research Searcher";
pub const GOAL: &str = "Find comprehensive and relevant information about the given topic";
pub const BACKSTORY: &str = "You are an expert researcher with access to web search capabilities. You excel at finding accurate and up-to-date information from various sources.";
pub const EXPECTED_OUTPUT: &str =
    "Detailed search results with comprehensive information about the topic";

pub fn worker(generator: Option<Arc<dyn TextGenerator>>, lookup: Arc<dyn Tool>) -> Worker {
    Worker::new(ROLE, GOAL, BACKSTORY, generator).with_tool(lookup)
}

pub fn instruction(query: &str) -> String {
    format!(
        r#"Search for comprehensive information about: {query}

Use the web search tool to find relevant, accurate, and up-to-date information.
Focus on finding multiple perspectives and credible sources.
Return detailed findings that can be used for further processing."#
    )
}

pub fn stage(query: &str, worker: Worker) -> Stage {
    Stage::new(StageKind::Search, instruction(query), EXPECTED_OUTPUT, worker)
}
