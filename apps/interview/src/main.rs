mod chat;
mod config;
mod db;
mod errors;
mod gateway;
mod history;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::service::ChatService;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::gateway::TextCompletionGateway;
use crate::history::{HistoryStore, PgHistoryStore};
use crate::interview::catalog::QuestionCatalog;
use crate::interview::service::InterviewService;
use crate::interview::store::InMemorySessionStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; missing provider settings abort startup here.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL-backed history
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let history: Arc<dyn HistoryStore> = Arc::new(PgHistoryStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm.clone())?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm.timeout.as_secs()
    );
    let gateway = TextCompletionGateway::new(Arc::new(llm), config.llm.timeout);

    let catalog = Arc::new(QuestionCatalog::standard());
    info!("Question catalog loaded: {} questions", catalog.len());

    // Build app state
    let state = AppState {
        interviews: Arc::new(InterviewService::new(
            catalog,
            Arc::new(InMemorySessionStore::new()),
            Arc::clone(&history),
            gateway.clone(),
        )),
        chat: Arc::new(ChatService::new(history, gateway)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
