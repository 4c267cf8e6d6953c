use std::future::Future;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use yatr_config::Config;
use yatr_types::HistoryFilter;

pub mod state;


use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(AppState::new(Config::new())?);

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
        }
    };

    run(state, shutdown).await;

    Ok(())
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) {
    // Warm the language cache before the scheduler looks at it
    match state.languages.graph().await {
        Ok(graph) => tracing::info!(
            "{} source languages, {} directions supported",
            graph.source_languages().len(),
            graph.len()
        ),
        Err(e) => tracing::warn!("Supported languages unavailable: {e}"),
    }

    match state.resolver.history().search(None, HistoryFilter::All) {
        Ok(items) => tracing::info!("{} translations in history", items.len()),
        Err(e) => tracing::warn!("History unavailable: {e}"),
    }

    let sync = if state.config.sync.enabled {
        state.scheduler.ensure_scheduled()
    } else {
        tracing::info!("Language sync disabled");
        None
    };

    match sync {
        Some(task) => {
            tokio::select! {
                _ = shutdown => {
                    tracing::info!("Shutdown requested");
                }
                result = task => {
                    match result {
                        Ok(_) => tracing::warn!("sync task exited"),
                        Err(e) => tracing::error!("sync task panicked: {e}"),
                    }
                }
            }
        }
        None => {
            shutdown.await;
            tracing::info!("Shutdown requested");
        }
    }

    state.scheduler.shutdown();
}
