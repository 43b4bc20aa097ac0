//! Agent System
//!
//! Three role-specialised workers run as a strict producer/consumer chain:
//!
//! - **Research Searcher**: gathers material, with the knowledge lookup tool
//! - **Information Summarizer**: condenses it into bullet points
//! - **Fact Checker and Report Formatter**: checks and formats the final report
//!
//! ## Pipeline Overview
//!
//! ```text
//! Research Query
//!      │
//!      ├── no model configured ──▶ Demo report
//!      ▼
//! ┌─────────────┐
//! │   Search    │  → lookup snippets + findings
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Summarize  │  → bullet points
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Verify /  │  → final report
//! │   Format    │
//! └─────────────┘
//!      │
//!      ▼
//!  ReportResult
//! ```

pub mod demo;
pub mod pipeline;
pub mod searcher;
pub mod stage;
pub mod summarizer;
pub mod verifier;
pub mod worker;

pub use demo::{demo_report, DEMO_SOURCES};
pub use pipeline::{ResearchPipeline, PIPELINE_SOURCES};
pub use stage::{Stage, StageKind};
pub use worker::{Assignment, Worker};
