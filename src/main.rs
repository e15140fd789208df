use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use wsgate::gate::format_gate_stats;
use wsgate::{Config, ConnectionGate, GateError, server};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const APP_NAME: &str = "wsgate";

// -----------------------------------------------------------------------------
// ----- Main ------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), GateError> {
    // Config comes first, the log level lives in it
    let config = Config::init().await?;

    init_tracing(config);
    run_forever(config).await
}

// -----------------------------------------------------------------------------
// ----- Setup -----------------------------------------------------------------

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(config.log_level.as_str())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// -----------------------------------------------------------------------------
// ----- Run -------------------------------------------------------------------

async fn run_forever(config: &Config) -> Result<(), GateError> {
    let listener = server::bind(config.listen_addr)?;
    let gate = Arc::new(ConnectionGate::from_config(config));

    info!(
        "{} listening on {}, sharing {}",
        APP_NAME,
        listener.local_addr()?,
        config.endpoint
    );

    server::accept_loop(listener, gate.clone(), async {
        let _ = signal::ctrl_c().await;
    })
    .await;

    info!(
        "{} shutting down\n{}",
        APP_NAME,
        format_gate_stats(gate.stats())
    );

    Ok(())
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
