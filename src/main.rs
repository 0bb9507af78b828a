mod analysis;
mod azure;
mod config;
mod errors;
mod jobs;
mod models;
mod report;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::azure::{ArmClient, TokenProvider};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "azquota=info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        tenant_id = %config.azure.tenant_id,
        location = %config.report.location,
        "Configuration loaded"
    );

    let http = azure::http_client(&config.http)?;

    // Authenticate; failure here aborts before any subscription is touched
    let token = TokenProvider::from_config(&config.azure)?
        .acquire(&http)
        .await
        .inspect_err(|e| tracing::error!(code = e.code(), error = %e, "Authentication failed"))?;
    tracing::info!("Authenticated against Azure Resource Manager");

    let client = ArmClient::new(http, &config.azure.management_endpoint, token);

    let outcome = jobs::run_report(&client, &config)
        .await
        .inspect_err(|e| tracing::error!(code = e.code(), error = %e, "Report run failed"))?;

    tracing::info!(
        path = %outcome.output_path.display(),
        subscriptions = outcome.subscriptions_scanned,
        records = outcome.records,
        failed_fetches = outcome.failed_fetches,
        high_usage = outcome.alerts.len(),
        "Quota report complete"
    );
    println!("{}", outcome.output_path.display());

    Ok(())
}
