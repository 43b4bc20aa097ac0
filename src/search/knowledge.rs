//! Static knowledge store used by the Search stage.
//!
//! Entries are consulted in insertion order. An entry matches when any word
//! of its topic phrase occurs anywhere in the lowercased query, so
//! `"AI intelligence topics"` hits `"artificial intelligence"` through
//! `"intelligence"`.

use super::Tool;

pub const NOT_FOUND_MESSAGE: &str =
    "No specific information found. Please try a different query or be more specific about your research topic.";

const TOOL_NAME: &str = "web_search";
const TOOL_DESCRIPTION: &str = "Search the web for information about a given topic";

/// A topic phrase and the snippets returned when it matches
#[derive(Debug, Clone)]
pub struct TopicEntry {
    pub topic: String,
    pub snippets: Vec<String>,
}

impl TopicEntry {
    pub fn new(topic: impl Into<String>, snippets: &[&str]) -> Self {
        Self {
            topic: topic.into().to_lowercase(),
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.topic
            .split_whitespace()
            .any(|word| query_lower.contains(word))
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<TopicEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<TopicEntry>) -> Self {
        Self { entries }
    }

    /// Snippets for the first matching topic, newline-joined, or the not-found message.
    pub fn lookup(&self, topic: &str) -> String {
        let query_lower = topic.to_lowercase();

        self.entries
            .iter()
            .find(|entry| entry.matches(&query_lower))
            .map(|entry| entry.snippets.join("\n"))
            .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string())
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.topic.as_str())
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(vec![
            TopicEntry::new(
                "artificial intelligence",
                &[
                    "AI is transforming industries worldwide with machine learning and deep learning technologies.",
                    "Recent advances in large language models have revolutionized natural language processing.",
                    "AI applications include healthcare, finance, autonomous vehicles, and robotics.",
                ],
            ),
            TopicEntry::new(
                "climate change",
                &[
                    "Climate change refers to long-term shifts in global temperatures and weather patterns.",
                    "Human activities, particularly greenhouse gas emissions, are the primary driver of recent climate change.",
                    "Effects include rising sea levels, extreme weather events, and ecosystem disruptions.",
                ],
            ),
            TopicEntry::new(
                "quantum computing",
                &[
                    "Quantum computing uses quantum mechanical phenomena to process information.",
                    "Quantum computers could potentially solve certain problems exponentially faster than classical computers.",
                    "Major challenges include quantum decoherence and error correction.",
                ],
            ),
        ])
    }
}

impl Tool for KnowledgeBase {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn call(&self, input: &str) -> String {
        self.lookup(input)
    }
}
