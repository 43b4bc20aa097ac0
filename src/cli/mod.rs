//! Interactive command-line front end
//!
//! A menu loop that talks to a running research server over HTTP and keeps
//! an in-memory history of completed reports for the current session.
//!
//! ```text
//! 1. 🔍 Conduct Research   → POST /research
//! 2. 📚 View Research History
//! 3. ❌ Exit
//! ```

pub mod client;
pub mod smoke;

pub use client::{ApiClient, ClientError};

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::models::ReportResult;

pub const PREVIEW_CHARS: usize = 200;

const RULE: &str = "============================================================";

/// One completed research run, as remembered by the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub query: String,
    pub timestamp: String,
    pub report_preview: String,
}

impl HistoryEntry {
    pub fn from_report(report: &ReportResult) -> Self {
        Self {
            query: report.query.clone(),
            timestamp: report.timestamp.to_rfc3339(),
            report_preview: preview(&report.report),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters, with `...` appended only when cut.
pub fn preview(report: &str) -> String {
    if report.chars().count() > PREVIEW_CHARS {
        let head: String = report.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        report.to_string()
    }
}

pub struct ResearchCli<R, W> {
    client: ApiClient,
    input: Lines<R>,
    output: W,
    history: Vec<HistoryEntry>,
}

impl<R, W> ResearchCli<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(client: ApiClient, input: R, output: W) -> Self {
        Self {
            client,
            input: input.lines(),
            output,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Main application loop. Returns when the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        self.display_banner()?;

        if !self.check_api_connection().await? {
            writeln!(self.output, "\n💡 To start the backend server, run:")?;
            writeln!(self.output, "   research-crew serve")?;
            return Ok(());
        }

        loop {
            self.display_menu()?;

            let Some(choice) = self.prompt("Select an option (1-3): ").await? else {
                writeln!(self.output, "\n\n👋 Goodbye!")?;
                break;
            };

            match choice.trim() {
                "1" => self.conduct_research().await?,
                "2" => self.view_history()?,
                "3" => {
                    writeln!(self.output, "\n👋 Thank you for using AI Research Assistant!")?;
                    break;
                }
                _ => writeln!(self.output, "❌ Invalid choice. Please select 1, 2, or 3.")?,
            }
        }

        Ok(())
    }

    fn display_banner(&mut self) -> Result<()> {
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "🤖 AI Research Assistant CLI")?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "Search → Summarize → Verify, powered by Gemini")?;
        writeln!(self.output, "{}\n", RULE)?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n📋 Menu Options:")?;
        writeln!(self.output, "1. 🔍 Conduct Research")?;
        writeln!(self.output, "2. 📚 View Research History")?;
        writeln!(self.output, "3. ❌ Exit\n")?;
        Ok(())
    }

    async fn check_api_connection(&mut self) -> Result<bool> {
        match self.client.health().await {
            Ok(health) => {
                writeln!(self.output, "✅ API connection successful! ({} mode)", health.mode)?;
                Ok(true)
            }
            Err(e) => {
                debug!(error = %e, "Health check failed");
                writeln!(
                    self.output,
                    "❌ Cannot connect to API. Make sure the backend is running on {}",
                    self.client.base_url()
                )?;
                Ok(false)
            }
        }
    }

    async fn conduct_research(&mut self) -> Result<()> {
        writeln!(self.output, "\n🔍 Research Mode")?;
        writeln!(self.output, "------------------------------")?;

        let query = self
            .prompt("Enter your research topic: ")
            .await?
            .unwrap_or_default();
        let query = query.trim();

        if query.is_empty() {
            writeln!(self.output, "❌ Please enter a valid research topic.")?;
            return Ok(());
        }

        writeln!(self.output, "\n🚀 Starting research on: '{}'", query)?;
        writeln!(self.output, "⏳ This may take a few moments...")?;

        match self.client.research(query).await {
            Ok(report) => {
                self.display_research_results(&report)?;
                self.history.push(HistoryEntry::from_report(&report));
            }
            Err(ClientError::Timeout) => {
                writeln!(
                    self.output,
                    "⏰ Request timed out. The research might be taking longer than expected."
                )?;
            }
            Err(ClientError::Status { status, body }) => {
                writeln!(self.output, "❌ Research failed: {}", status)?;
                writeln!(self.output, "Error: {}", body)?;
            }
            Err(e) => {
                writeln!(self.output, "❌ Network error: {}", e)?;
            }
        }

        Ok(())
    }

    fn display_research_results(&mut self, report: &ReportResult) -> Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "📊 RESEARCH RESULTS")?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "🔍 Query: {}", report.query)?;
        writeln!(self.output, "⏰ Timestamp: {}", report.timestamp.to_rfc3339())?;
        writeln!(self.output, "📚 Sources: {}", report.sources.join(", "))?;
        writeln!(self.output, "\n📋 Report:")?;
        writeln!(self.output, "----------------------------------------")?;
        writeln!(self.output, "{}", report.report)?;
        writeln!(self.output, "{}", RULE)?;
        Ok(())
    }

    fn view_history(&mut self) -> Result<()> {
        if self.history.is_empty() {
            writeln!(self.output, "\n📚 No research history found.")?;
            return Ok(());
        }

        writeln!(self.output, "\n📚 Research History")?;
        writeln!(self.output, "==================================================")?;

        for (i, entry) in self.history.iter().enumerate() {
            writeln!(self.output, "\n{}. 🔍 Query: {}", i + 1, entry.query)?;
            writeln!(self.output, "   ⏰ Time: {}", entry.timestamp)?;
            writeln!(self.output, "   📄 Preview: {}", entry.report_preview)?;
            writeln!(self.output, "--------------------------------------------------")?;
        }

        Ok(())
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(self.input.next_line().await?)
    }
}
