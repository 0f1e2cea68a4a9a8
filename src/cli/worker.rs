use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::commands::WorkerArgs;
use crate::config::{self, InspectorMode, WardenConfig};
use crate::db::Database;
use crate::engine::{self, RecommendationEngine};
use crate::errors::WardenError;
use crate::inspector::{FixtureInspector, HttpInspector, ResourceInspector};
use crate::pipeline::AnalysisPipeline;
use crate::queue::{JobQueue, SqliteQueue};
use crate::worker::{ReviewWorker, SpawnDispatcher};

pub async fn handle_worker(args: WorkerArgs) -> Result<(), WardenError> {
    let config = config::load_config(args.config.as_deref()).await?;

    let db = Database::new(&args.db)?;
    let queue: Arc<dyn JobQueue> = Arc::new(
        SqliteQueue::new(db.clone()).with_visibility_timeout(config.queue_visibility_secs()),
    );
    let worker = build_worker(db, queue, &config)?;

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown requested");
        signal_token.cancel();
    });

    let poll = args
        .poll_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());
    let batch = args.batch.unwrap_or_else(|| config.batch_size());

    worker.run(poll, batch, cancel).await;
    Ok(())
}

pub(crate) fn build_worker(
    db: Database,
    queue: Arc<dyn JobQueue>,
    config: &WardenConfig,
) -> Result<ReviewWorker, WardenError> {
    let inspector = build_inspector(config)?;
    let engine = build_engine(config)?;
    let pipeline = Arc::new(AnalysisPipeline::new(db.clone(), inspector, engine));
    let dispatcher = Arc::new(SpawnDispatcher::new(pipeline));
    Ok(ReviewWorker::new(db, queue, dispatcher))
}

fn build_inspector(config: &WardenConfig) -> Result<Arc<dyn ResourceInspector>, WardenError> {
    match config.inspector_mode() {
        InspectorMode::Http => {
            let base_url = config.inspector_base_url().ok_or_else(|| {
                WardenError::Config("inspector.base_url is required for http mode".into())
            })?;
            Ok(Arc::new(HttpInspector::new(&base_url)))
        }
        InspectorMode::Fixture => {
            Ok(Arc::new(FixtureInspector::new(config.inspector_fixture_path())))
        }
    }
}

fn build_engine(config: &WardenConfig) -> Result<Arc<dyn RecommendationEngine>, WardenError> {
    engine::create_engine(
        &config.engine_provider(),
        &config.engine_api_key(),
        config.engine_model().as_deref(),
        config.engine_base_url().as_deref(),
    )
}
