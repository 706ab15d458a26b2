use anyhow::Result;
use echo_ingress_line::{config::IngressConfig, run};
use echo_telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry(TelemetryConfig::from_env(
        "ingress-line",
        env!("CARGO_PKG_VERSION"),
    ))?;

    let config = IngressConfig::from_env()?;
    run(config).await
}
