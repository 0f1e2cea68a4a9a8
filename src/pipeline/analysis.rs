use std::sync::Arc;

use tracing::{error, info, warn};

use crate::db::Database;
use crate::engine::{parse_assessment, EngineOutput, RecommendationEngine, DEFAULT_SCORE};
use crate::errors::{with_retry, RetryConfig, WardenError};
use crate::inspector::ResourceInspector;
use crate::models::{Finding, Recommendation, ReviewStatus};
use crate::rules;
use crate::utils::truncation::{truncate_error, truncate_output};

use super::prompt;

/// Parameters of one analysis run, extracted from the dispatch payload.
#[derive(Debug, Clone)]
pub struct ReviewTask {
    pub review_id: String,
    pub aws_account_id: String,
    pub region: String,
    pub pillars: Vec<String>,
}

struct AnalysisResults {
    findings: Vec<Finding>,
    recommendations: Vec<Recommendation>,
    score: f64,
}

/// Runs the analysis for a dispatched review: inventory snapshot, rule
/// evaluation, engine consult, merge, and the terminal store write.
pub struct AnalysisPipeline {
    db: Database,
    inspector: Arc<dyn ResourceInspector>,
    engine: Arc<dyn RecommendationEngine>,
    retry: RetryConfig,
}

impl AnalysisPipeline {
    pub fn new(
        db: Database,
        inspector: Arc<dyn ResourceInspector>,
        engine: Arc<dyn RecommendationEngine>,
    ) -> Self {
        Self { db, inspector, engine, retry: RetryConfig::default() }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Run the pipeline to a terminal state.
    ///
    /// Every analysis error is converted into a persisted FAILED record. The
    /// one exception is a store failure while writing the results themselves:
    /// that is logged and re-raised to the caller, since there is no store
    /// left to record it in.
    pub async fn run(&self, task: &ReviewTask) -> Result<(), WardenError> {
        info!(
            review_id = %task.review_id,
            account = %task.aws_account_id,
            region = %task.region,
            inspector = self.inspector.name(),
            engine = self.engine.provider_name(),
            "Analysis pipeline started"
        );

        let results = match self.analyze(task).await {
            Ok(results) => results,
            Err(e) => {
                warn!(review_id = %task.review_id, error = %e, "Analysis failed");
                let message = truncate_error(&e.to_string());
                let updated = self
                    .db
                    .update_review_status(&task.review_id, ReviewStatus::Failed, Some(&message))
                    .map_err(|pe| {
                        error!(review_id = %task.review_id, error = %pe, "Could not record analysis failure");
                        pe
                    })?;
                if !updated {
                    warn!(review_id = %task.review_id, "No review record found while recording failure");
                }
                return Ok(());
            }
        };

        let updated = self
            .db
            .complete_review(
                &task.review_id,
                &results.findings,
                &results.recommendations,
                results.score,
            )
            .map_err(|e| {
                error!(review_id = %task.review_id, error = %e, "Could not persist completed review");
                e
            })?;
        if !updated {
            warn!(review_id = %task.review_id, "No review record found while persisting results");
        }

        info!(
            review_id = %task.review_id,
            findings = results.findings.len(),
            recommendations = results.recommendations.len(),
            score = results.score,
            "Review completed"
        );
        Ok(())
    }

    async fn analyze(&self, task: &ReviewTask) -> Result<AnalysisResults, WardenError> {
        let snapshot = self
            .inspector
            .snapshot(&task.aws_account_id, &task.region)
            .await?;
        for (category, error) in snapshot.services.category_errors() {
            warn!(review_id = %task.review_id, category, error, "Partial inventory");
        }
        info!(
            review_id = %task.review_id,
            resources = snapshot.services.total_resources(),
            "Inventory snapshot collected"
        );

        let mut outcome = rules::evaluate(&snapshot, &task.pillars);
        info!(
            review_id = %task.review_id,
            rule_findings = outcome.findings.len(),
            "Rule evaluation complete"
        );

        let assessment = self.consult_engine(task, &snapshot).await?;
        let score = assessment.score;
        outcome.findings.extend(assessment.findings);
        outcome.recommendations.extend(assessment.recommendations);

        Ok(AnalysisResults {
            findings: outcome.findings,
            recommendations: outcome.recommendations,
            score,
        })
    }

    /// Ask the engine for its assessment. Transport failures (after retries)
    /// abort the analysis; an unparseable response only degrades to empty
    /// results with the neutral default score.
    async fn consult_engine(
        &self,
        task: &ReviewTask,
        snapshot: &crate::inspector::ResourceSnapshot,
    ) -> Result<AnalysisResults, WardenError> {
        let prompt = prompt::review_prompt(task, snapshot)?;
        let raw = with_retry("engine assessment", &self.retry, || {
            self.engine.assess(&prompt, Some(prompt::SYSTEM_PROMPT))
        })
        .await?;

        match parse_assessment(&raw) {
            EngineOutput::Structured(payload) => {
                let score = payload.score_or_default();
                info!(
                    review_id = %task.review_id,
                    engine_findings = payload.findings.len(),
                    engine_recommendations = payload.recommendations.len(),
                    score,
                    "Engine assessment parsed"
                );
                Ok(AnalysisResults {
                    findings: payload.findings,
                    recommendations: payload.recommendations,
                    score,
                })
            }
            EngineOutput::Unstructured(text) => {
                warn!(
                    review_id = %task.review_id,
                    raw = %truncate_output(&text),
                    "Engine response not structured, continuing with rule results and default score"
                );
                Ok(AnalysisResults {
                    findings: Vec::new(),
                    recommendations: Vec::new(),
                    score: DEFAULT_SCORE,
                })
            }
        }
    }
}
