//! opsgate gateway
//!
//! - `/ops/...`: arithmetic over query or JSON operands
//! - `/auth/...`: single shared-secret header check
//!
//! Usage: `opsgate-gateway [config.yaml]` (defaults apply without a path).

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use opsgate_core::error::{OpsGateError, Result};
use opsgate_emitter::signal::shutdown_signal;
use opsgate_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "opsgate-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1);
    let cfg = config::load_or_default(path.as_deref())?;
    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        OpsGateError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = AppState::new(&cfg)?;
    let prefixes = state.routes().registered_prefixes();
    let app = router::build_router(state);

    tracing::info!(%listen, ?prefixes, "opsgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| OpsGateError::Internal(format!("bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OpsGateError::Internal(format!("server failed: {e}")))?;

    tracing::info!("opsgate-gateway stopped");
    Ok(())
}
