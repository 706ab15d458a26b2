//! LINE echo webhook server.
//!
//! ```text
//! LINE POSTs signed event batches to `/hook`; every text message is answered
//! through the reply API with its own text.
//! ```

pub mod config;
pub mod http;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::serve;
use echo_core::LineClient;
use echo_ingress_common::LineSignatureConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::IngressConfig;
use crate::http::{AppState, build_router};

/// Builds the LINE client once and serves the webhook until ctrl-c.
pub async fn run(config: IngressConfig) -> Result<()> {
    for name in config.missing_credentials() {
        warn!(variable = name, "credential is empty; LINE requests will fail authentication");
    }

    let client = LineClient::new(config.channel_access_token.clone(), config.api_base.clone())
        .context("build LINE client")?;
    info!(api_base = %client.api_base(), "LINE reply client ready");
    let state = AppState::new(Arc::new(client));
    let router = build_router(
        state,
        LineSignatureConfig {
            channel_secret: config.channel_secret.clone(),
        },
    );

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    info!("ingress-line listening on http://{}", config.addr);

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
