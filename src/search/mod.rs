//! Search Module
//!
//! Tool capabilities that workers can consult while executing a stage.
//! The only backend today is a static, topic-keyed knowledge store; there is
//! no crawling or network access behind it.

pub mod knowledge;

pub use knowledge::{KnowledgeBase, TopicEntry, NOT_FOUND_MESSAGE};

/// A capability a worker can call with plain text.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn call(&self, input: &str) -> String;
}
