use std::sync::Arc;

use anyhow::{Context, Result};
use casestore::SqliteCaseStore;
use tracing::{info, warn};

use investigator::config::AppConfig;
use investigator::export::Exporter;
use investigator::investigation::Investigator;
use investigator::provider::LLMProvider;
use investigator::provider_openrouter::OpenRouterProvider;
use investigator::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    // --- SQLite ---
    let store = SqliteCaseStore::connect(&cfg.database_url)
        .await
        .context("Failed to open case store")?;

    // --- Startup health checks (fail fast) ---
    store.ping().await.context("Case store ping failed")?;
    info!("case store: ok");

    let provider: Option<Arc<dyn LLMProvider>> = match &cfg.llm {
        Some(llm) => {
            let p = OpenRouterProvider::new(llm).context("Failed to build LLM client")?;
            let info = p.info();
            info!(model = %info.model, base_url = %info.base_url, "language model: configured");
            Some(Arc::new(p))
        }
        None => {
            warn!("OPENROUTER_API_KEY not set; running keyword-only analysis");
            None
        }
    };

    tokio::fs::create_dir_all(&cfg.output_dir)
        .await
        .with_context(|| format!("Failed to create output dir {}", cfg.output_dir.display()))?;

    let service = Investigator::new(Arc::new(store), provider, Exporter::new(cfg.output_dir.clone()));
    let app = investigator::router(Arc::new(AppState::new(service)));

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("investigator listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
