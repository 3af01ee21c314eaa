use deal_service::config::DealConfig;
use deal_service::startup::Application;
use service_core::observability::logging::init_tracing;
use service_core::observability::metrics as core_metrics;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DealConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("deal-service", "info");

    core_metrics::init_metrics();
    deal_service::services::metrics::init_metrics();

    let app = Application::build(config)
        .await
        .map_err(|e| anyhow::anyhow!("Startup error: {}", e))?;

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
