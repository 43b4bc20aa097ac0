//! Worker
//!
//! A role-bound capability bundle: persona data, an optional text generator
//! and zero or more tools. Every worker is driven through [`Worker::perform`],
//! whether or not it carries tools.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::llm::TextGenerator;
use crate::search::Tool;
use crate::types::{AppError, AppResult};

/// What a stage asks a worker to do
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub query: &'a str,
    pub instruction: &'a str,
    pub expected_output: &'a str,
}

#[derive(Clone)]
pub struct Worker {
    pub role: String,
    pub goal: String,
    pub persona: String,
    generator: Option<Arc<dyn TextGenerator>>,
    tools: Vec<Arc<dyn Tool>>,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("has_generator", &self.generator.is_some())
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl Worker {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        persona: impl Into<String>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            persona: persona.into(),
            generator,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Run an assignment: consult tools, then ask the generator.
    pub async fn perform(&self, assignment: &Assignment<'_>, context: &str) -> AppResult<String> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            AppError::Execution(format!("worker '{}' has no generation capability", self.role))
        })?;

        let instruction = self.compose_instruction(assignment);
        let context = self.gather_context(assignment.query, context);

        debug!(
            role = %self.role,
            tools = self.tools.len(),
            context_len = context.len(),
            "Worker performing assignment"
        );

        generator.generate(&instruction, &context).await
    }

    fn compose_instruction(&self, assignment: &Assignment<'_>) -> String {
        let mut instruction = format!(
            "You are {role}.\n{persona}\n\nYour goal: {goal}\n\nTASK:\n{task}\n\nEXPECTED OUTPUT:\n{expected}",
            role = self.role,
            persona = self.persona,
            goal = self.goal,
            task = assignment.instruction.trim(),
            expected = assignment.expected_output,
        );

        if !self.tools.is_empty() {
            instruction.push_str("\n\nTOOLS CONSULTED:\n");
            for tool in &self.tools {
                instruction.push_str(&format!("- {}: {}\n", tool.name(), tool.description()));
            }
        }

        instruction
    }

    fn gather_context(&self, query: &str, prior: &str) -> String {
        let mut context = prior.to_string();

        for tool in &self.tools {
            let output = tool.call(query);
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&format!("[{} results]\n{}", tool.name(), output));
        }

        context
    }
}
