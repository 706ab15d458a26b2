use anyhow::Result;
use echo_status_server::{bind_addr, run};
use echo_telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry(TelemetryConfig::from_env(
        "status-server",
        env!("CARGO_PKG_VERSION"),
    ))?;

    let addr = bind_addr(std::env::var("PORT").ok())?;
    run(addr).await
}
