use anyhow::{Context, Result};
use echo_mock_line::MockLine;
use echo_telemetry::{TelemetryConfig, init_telemetry};
use tokio::net::TcpListener;

const DEFAULT_PORT: u16 = 9090;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry(TelemetryConfig::from_env(
        "mock-line",
        env!("CARGO_PKG_VERSION"),
    ))?;

    let port = match std::env::var("PORT").ok().filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid PORT {value:?}"))?,
        None => DEFAULT_PORT,
    };
    let access_token = std::env::var("LINE_BOT_CHANNEL_ACCESS_TOKEN")
        .ok()
        .filter(|v| !v.is_empty());
    if access_token.is_none() {
        tracing::info!("no access token configured; accepting any bearer token");
    }

    let mock = MockLine::new(access_token);
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("bind 0.0.0.0:{port}"))?;
    tracing::info!("mock-line listening on {}", listener.local_addr()?);
    axum::serve(listener, mock.router()).await?;
    Ok(())
}
