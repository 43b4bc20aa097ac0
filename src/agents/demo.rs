//! Demo mode
//!
//! Used whenever no model credential is configured. Produces a templated
//! report without constructing any worker.

use crate::models::ReportResult;

pub const DEMO_SOURCES: [&str; 2] = ["Demo Mode", "Mock Analysis"];

pub fn demo_report(query: &str) -> ReportResult {
    ReportResult::new(query, render(query), &DEMO_SOURCES)
}

fn render(query: &str) -> String {
    format!(
        r#"
# Research Report: {query}

## Executive Summary
This is a demo response. To get real AI-powered research, please set your GEMINI_API_KEY in the .env file.

## Key Findings
• This is a demonstration of the AI Research Assistant
• The system runs a sequential pipeline of specialized workers
• Each worker has a specific role in the research process

## Detailed Analysis
The AI Research Assistant consists of three main components:
1. **Searcher Worker**: Finds relevant information using the knowledge lookup tool
2. **Summarizer Worker**: Condenses findings into organized bullet points
3. **Verifier Worker**: Fact-checks and formats professional reports

## Conclusion
This demo shows the system architecture. With a valid Gemini API key, the workers would run in sequence to provide comprehensive research on any topic.

## Next Steps
1. Get a Gemini API key from: https://makersuite.google.com/app/apikey
2. Create a .env file with: GEMINI_API_KEY=your_actual_key_here
3. Restart the application for full functionality
"#
    )
}
