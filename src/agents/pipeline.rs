//! Research pipeline orchestrator
//!
//! Holds the process-wide, read-only pieces (the optional text generator and
//! the knowledge store) and builds fresh workers and stages for every query.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::agents::stage::Stage;
use crate::agents::{demo, searcher, summarizer, verifier};
use crate::config::Config;
use crate::llm::{TextGenerator, LLM};
use crate::models::ReportResult;
use crate::search::KnowledgeBase;
use crate::types::{AppError, AppResult};

pub const PIPELINE_SOURCES: [&str; 2] = ["Web Search", "AI Analysis"];

pub struct ResearchPipeline {
    generator: Option<Arc<dyn TextGenerator>>,
    knowledge: Arc<KnowledgeBase>,
}

impl ResearchPipeline {
    /// `None` puts the pipeline in demo mode for its whole lifetime.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            knowledge: Arc::new(KnowledgeBase::default()),
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = Arc::new(knowledge);
        self
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let generator = LLM::from_config(&config.llm)?.map(|llm| {
            info!(provider = llm.provider_name(), model = llm.model(), "Generation backend configured");
            Arc::new(llm) as Arc<dyn TextGenerator>
        });

        if generator.is_none() {
            warn!("GEMINI_API_KEY not set, running in demo mode");
        }

        Ok(Self::new(generator))
    }

    pub fn is_demo(&self) -> bool {
        self.generator.is_none()
    }

    /// Answer one research query.
    pub async fn run(&self, query: &str) -> AppResult<ReportResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "research query must not be empty".to_string(),
            ));
        }

        let Some(generator) = &self.generator else {
            info!(query = %query, "Demo mode, returning templated report");
            return Ok(demo::demo_report(query));
        };

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, query = %query, "Starting research pipeline");

        let stages = self.assemble(query, generator.clone());
        let report = Self::execute_stages(run_id, query, &stages).await?;

        info!(run_id = %run_id, report_len = report.len(), "Research pipeline complete");

        Ok(ReportResult::new(query, report, &PIPELINE_SOURCES))
    }

    fn assemble(&self, query: &str, generator: Arc<dyn TextGenerator>) -> Vec<Stage> {
        let lookup = self.knowledge.clone();

        vec![
            searcher::stage(query, searcher::worker(Some(generator.clone()), lookup)),
            summarizer::stage(query, summarizer::worker(Some(generator.clone()))),
            verifier::stage(query, verifier::worker(Some(generator))),
        ]
    }

    /// Each stage sees only the previous stage's output; the last output is the report.
    async fn execute_stages(run_id: Uuid, query: &str, stages: &[Stage]) -> AppResult<String> {
        let mut context = String::new();

        for (index, stage) in stages.iter().enumerate() {
            info!(
                run_id = %run_id,
                stage = %stage.kind,
                role = %stage.worker.role,
                step = index + 1,
                total = stages.len(),
                "Executing stage"
            );

            context = stage.execute(query, &context).await.map_err(|e| {
                error!(run_id = %run_id, stage = %stage.kind, error = %e, "Stage failed");
                AppError::Execution(format!("{} stage failed: {}", stage.kind, e))
            })?;
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::stage::StageKind;
    use crate::search::{TopicEntry, NOT_FOUND_MESSAGE};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    /// Records every call and answers with a stage-tagged string.
    #[derive(Default)]
    struct ScriptedGenerator {
        calls: Mutex<Vec<(String, String)>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedGenerator {
        fn failing_on(call: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: Some(call),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, instruction: &str, context: &str) -> AppResult<String> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((instruction.to_string(), context.to_string()));
                calls.len()
            };

            if self.fail_on_call == Some(call) {
                return Err(AppError::LLMApi("upstream unavailable".to_string()));
            }

            Ok(format!("<stage-{call} output>"))
        }
    }

    /// Answers each stage by echoing the context it was handed, so a run's
    /// report is a pure function of its own lookup result.
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _instruction: &str, context: &str) -> AppResult<String> {
            tokio::task::yield_now().await;
            Ok(format!("echo: {context}"))
        }
    }

    fn live(generator: Arc<ScriptedGenerator>) -> ResearchPipeline {
        ResearchPipeline::new(Some(generator))
    }

    #[tokio::test]
    async fn test_demo_mode_climate_change() {
        let pipeline = ResearchPipeline::new(None);
        assert!(pipeline.is_demo());

        let result = pipeline.run("climate change").await.unwrap();

        assert!(result.report.contains("climate change"));
        assert_eq!(result.sources, vec!["Demo Mode", "Mock Analysis"]);
        let wire = serde_json::to_value(&result).unwrap();
        assert!(DateTime::parse_from_rfc3339(wire["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_demo_mode_any_query_is_embedded() {
        let pipeline = ResearchPipeline::new(None);
        for query in ["quantum computing", "Why is the sky blue?", "研究 主题"] {
            let result = pipeline.run(query).await.unwrap();
            assert!(result.report.contains(query));
            assert_eq!(result.query, query);
        }
    }

    #[tokio::test]
    async fn test_empty_query_rejected_in_both_modes() {
        let generator = Arc::new(ScriptedGenerator::default());
        let pipelines = [ResearchPipeline::new(None), live(generator.clone())];

        for pipeline in &pipelines {
            for query in ["", "   ", "\t\n"] {
                let err = pipeline.run(query).await.unwrap_err();
                assert!(matches!(err, AppError::InvalidInput(_)));
            }
        }
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let pipeline = ResearchPipeline::new(None);
        let result = pipeline.run("  climate change \n").await.unwrap();
        assert_eq!(result.query, "climate change");
    }

    #[tokio::test]
    async fn test_stages_chain_in_order() {
        let generator = Arc::new(ScriptedGenerator::default());
        let pipeline = live(generator.clone());

        let result = pipeline.run("artificial intelligence").await.unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 3);

        // Search: role + lookup output, no prior stage output.
        assert!(calls[0].0.contains(searcher::ROLE));
        assert!(calls[0].1.contains("[web_search results]"));
        assert!(calls[0].1.contains("large language models"));

        // Summarize consumes Search output.
        assert!(calls[1].0.contains(summarizer::ROLE));
        assert_eq!(calls[1].1, "<stage-1 output>");

        // Verify/Format consumes Summarize output.
        assert!(calls[2].0.contains(verifier::ROLE));
        assert_eq!(calls[2].1, "<stage-2 output>");

        assert_eq!(result.report, "<stage-3 output>");
        assert_eq!(result.sources, vec!["Web Search", "AI Analysis"]);
        assert_eq!(result.query, "artificial intelligence");
    }

    #[tokio::test]
    async fn test_only_search_stage_gets_lookup() {
        let generator = Arc::new(ScriptedGenerator::default());
        let stages = live(generator.clone()).assemble("climate change", generator);

        let kinds: Vec<StageKind> = stages.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StageKind::ORDER.to_vec());
        assert_eq!(stages[0].worker.tool_names(), vec!["web_search"]);
        assert!(stages[1].worker.tool_names().is_empty());
        assert!(stages[2].worker.tool_names().is_empty());
        assert!(stages.iter().all(|s| s.worker.has_generator()));
    }

    #[tokio::test]
    async fn test_second_stage_failure_is_execution_error() {
        let generator = Arc::new(ScriptedGenerator::failing_on(2));
        let pipeline = live(generator.clone());

        let err = pipeline.run("climate change").await.unwrap_err();

        match err {
            AppError::Execution(message) => {
                assert!(message.starts_with("Summarize stage failed"));
                assert!(message.contains("upstream unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // First stage already ran, third never started.
        let calls = generator.calls();
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_custom_knowledge_base() {
        let generator = Arc::new(ScriptedGenerator::default());
        let pipeline = live(generator.clone()).with_knowledge(KnowledgeBase::new(vec![
            TopicEntry::new("tide pools", &["Tide pools host anemones."]),
        ]));

        pipeline.run("pools of the Pacific").await.unwrap();
        assert!(generator.calls()[0].1.contains("Tide pools host anemones."));

        pipeline.run("volcanoes").await.unwrap();
        assert!(generator.calls()[3].1.contains(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let pipeline = Arc::new(ResearchPipeline::new(None));
        let queries = ["alpha", "beta", "gamma", "delta"];

        let results = futures::future::join_all(queries.iter().map(|q| {
            let pipeline = pipeline.clone();
            async move { pipeline.run(q).await }
        }))
        .await;

        for (query, result) in queries.iter().zip(results) {
            let result = result.unwrap();
            assert_eq!(&result.query, query);
            assert!(result.timestamp <= Utc::now());
        }
    }

    #[tokio::test]
    async fn test_concurrent_live_runs_share_pipeline_without_leaking() {
        let pipeline = Arc::new(ResearchPipeline::new(Some(Arc::new(EchoGenerator))));
        let cases = [
            ("artificial intelligence", "large language models"),
            ("climate change", "greenhouse gas emissions"),
            ("quantum computing", "quantum decoherence"),
            ("volcanoes", NOT_FOUND_MESSAGE),
        ];
        let markers: Vec<&str> = cases.iter().map(|(_, marker)| *marker).collect();

        let results = futures::future::join_all(cases.iter().map(|(query, _)| {
            let pipeline = pipeline.clone();
            async move { pipeline.run(query).await }
        }))
        .await;

        for ((query, marker), result) in cases.iter().zip(results) {
            let result = result.unwrap();
            assert_eq!(&result.query, query);
            assert!(result.report.starts_with("echo: echo: echo: "));
            assert!(result.report.contains(marker));
            for other in markers.iter().filter(|m| *m != marker) {
                assert!(!result.report.contains(other), "{query} report leaked {other}");
            }
            assert_eq!(result.sources, vec!["Web Search", "AI Analysis"]);
        }
    }

    #[tokio::test]
    async fn test_concurrent_live_runs_with_separate_generators() {
        let generators: Vec<Arc<ScriptedGenerator>> =
            (0..3).map(|_| Arc::new(ScriptedGenerator::default())).collect();
        let queries = ["artificial intelligence", "climate change", "quantum computing"];

        let results = futures::future::join_all(generators.iter().zip(queries).map(|(generator, query)| {
            let pipeline = live(generator.clone());
            async move { pipeline.run(query).await }
        }))
        .await;

        for ((generator, query), result) in generators.iter().zip(queries).zip(results) {
            let result = result.unwrap();
            assert_eq!(result.query, query);
            assert_eq!(result.report, "<stage-3 output>");

            let calls = generator.calls();
            assert_eq!(calls.len(), 3);
            assert!(calls[0].0.contains(query));
            assert_eq!(calls[1].1, "<stage-1 output>");
            assert_eq!(calls[2].1, "<stage-2 output>");
        }
    }

    #[tokio::test]
    async fn test_blocked_model_reply_fails_the_run() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
            .create_async()
            .await;

        let config = Config::from_vars(|key| match key {
            "GEMINI_API_KEY" => Some("live-key".to_string()),
            "GEMINI_API_BASE" => Some(server.url()),
            _ => None,
        })
        .unwrap();
        let pipeline = ResearchPipeline::from_config(&config).unwrap();
        assert!(!pipeline.is_demo());

        let err = pipeline.run("climate change").await.unwrap_err();
        match err {
            AppError::Execution(message) => {
                assert!(message.starts_with("Search stage failed"));
                assert!(message.contains("SAFETY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
