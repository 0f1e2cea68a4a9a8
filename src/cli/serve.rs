use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::{self, AppState};
use crate::cli::commands::ServeArgs;
use crate::config;
use crate::db::Database;
use crate::errors::WardenError;
use crate::queue::{JobQueue, SqliteQueue};

pub async fn handle_serve(args: ServeArgs) -> Result<(), WardenError> {
    let config = config::load_config(args.config.as_deref()).await?;

    let db = Database::new(&args.db)?;
    let queue: Arc<dyn JobQueue> = Arc::new(
        SqliteQueue::new(db.clone()).with_visibility_timeout(config.queue_visibility_secs()),
    );
    let state = AppState {
        db: db.clone(),
        queue: queue.clone(),
        default_region: config.default_region(),
    };

    let cancel = CancellationToken::new();
    if args.with_worker {
        let worker = super::worker::build_worker(db, queue, &config)?;
        let token = cancel.clone();
        let poll = config.poll_interval();
        let batch = config.batch_size();
        tokio::spawn(async move {
            worker.run(poll, batch, token).await;
        });
        info!("Embedded review worker started");
    }

    let app = api::build_router(state);
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .map_err(|e| WardenError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown requested");
    cancel.cancel();
}
