//! Logging setup shared by the LINE echo binaries.
//!
//! Every service calls [`init_telemetry`] once at startup; the subscriber is
//! configured from `RUST_LOG` and `LOG_FORMAT`.

mod config;
mod tracing_init;

pub use config::{LogFormat, TelemetryConfig};
pub use tracing_init::init_telemetry;
