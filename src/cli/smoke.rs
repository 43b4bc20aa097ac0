//! End-to-end smoke test against a running server.

use std::io::Write;

use anyhow::Result;

use super::{ApiClient, ClientError};

pub const SMOKE_QUERIES: [&str; 3] = ["artificial intelligence", "climate change", "quantum computing"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SmokeSummary {
    pub passed: usize,
    pub failed: usize,
}

impl SmokeSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.passed > 0
    }
}

pub async fn run_smoke<W: Write>(client: &ApiClient, out: &mut W) -> Result<SmokeSummary> {
    writeln!(out, "🧪 AI Research Assistant Test Suite")?;
    writeln!(out, "========================================")?;

    let mut summary = SmokeSummary::default();

    match client.health().await {
        Ok(health) => writeln!(out, "✅ API connection successful! ({} mode)", health.mode)?,
        Err(e) => {
            writeln!(out, "❌ Cannot connect to API: {}", e)?;
            writeln!(out, "\n💡 To start the backend server, run:")?;
            writeln!(out, "   research-crew serve")?;
            summary.failed += 1;
            return Ok(summary);
        }
    }

    for query in SMOKE_QUERIES {
        writeln!(out, "\n🔍 Testing research query: '{}'", query)?;

        match client.research(query).await {
            Ok(report) => {
                writeln!(out, "✅ Research completed successfully!")?;
                writeln!(out, "📊 Report length: {} characters", report.report.chars().count())?;
                writeln!(out, "📚 Sources: {}", report.sources.join(", "))?;
                summary.passed += 1;
            }
            Err(ClientError::Timeout) => {
                writeln!(out, "⏰ Request timed out")?;
                summary.failed += 1;
            }
            Err(ClientError::Status { status, body }) => {
                writeln!(out, "❌ Research failed: {}", status)?;
                writeln!(out, "Error: {}", body)?;
                summary.failed += 1;
            }
            Err(e) => {
                writeln!(out, "❌ Network error: {}", e)?;
                summary.failed += 1;
            }
        }
    }

    writeln!(
        out,
        "\n🎉 Test suite completed! {} passed, {} failed",
        summary.passed, summary.failed
    )?;

    Ok(summary)
}
