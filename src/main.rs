use content_gateway::llm_wrapper::LlmClient;
use content_gateway::logger::AuditLog;
use content_gateway::routes;
use content_gateway::service::CompletionService;
use content_gateway::settings::Settings;
use content_gateway::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging first
    init_logging();

    dotenv::dotenv().ok();
    let settings = Arc::new(Settings::new()?);

    let audit = Arc::new(AuditLog::new(
        settings.log_root.clone(),
        settings.log_utc_offset,
    ));
    let llm = LlmClient::new(&settings)?;
    let service = CompletionService::new(settings.clone(), audit, llm);

    let state = Arc::new(AppState {
        settings: settings.clone(),
        service,
    });

    let app = routes::build(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "content-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("content-gateway stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install CTRL+C signal handler");
    }
    info!("shutdown signal received; starting graceful shutdown");
}
