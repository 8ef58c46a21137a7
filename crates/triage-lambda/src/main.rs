use std::env;

use tracing_subscriber::EnvFilter;

use triage_lambda::config::Config;
use triage_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    let missing = config.missing_required();
    if !missing.is_empty() {
        tracing::warn!(?missing, "required environment variables are not set");
    }

    let state = AppState::from_config(&config).await?;
    let app = triage_lambda::app(state);

    // The Lambda runtime sets AWS_LAMBDA_RUNTIME_API; anywhere else we serve
    // plain HTTP for local development.
    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
    } else {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
        tracing::info!(port = config.port, "serving webhook locally");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
