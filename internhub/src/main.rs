// InternHub - placement portal data layer
// Entry point: opens the store, seeds it on first run and prints a summary

use internhub::app::AppState;
use internhub::config::Config;
use internhub::services::PortalStats;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "internhub=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting InternHub");

    let config = Config::from_env();
    tracing::debug!("Configuration: {:?}", config);

    let state = AppState::open(&config).await?;
    let stats = PortalStats::collect(&state).await?;

    tracing::info!(
        "Portal ready: {} students, {} companies ({} awaiting approval), {} active jobs, {} applications, {} open tickets",
        stats.students,
        stats.companies,
        stats.pending_approvals,
        stats.active_jobs,
        stats.applications,
        stats.open_tickets
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    match state.gateway.current_token().await? {
        Some(_) => tracing::info!("Remote session present for {}", state.gateway.base_url()),
        None => tracing::info!("No remote session; auth gateway at {}", state.gateway.base_url()),
    }

    state.store.pool().close().await;
    Ok(())
}
