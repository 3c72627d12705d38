//! json-dumper: writes a random metric as a JSON line to stdout on every
//! tick until SIGINT/SIGTERM.
//!
//! Usage: `json-dumper [emitter.yaml]`. Logs go to stderr.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use opsgate_emitter::{config, signal, Emitter};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1);
    let cfg = match config::load_or_default(path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "json-dumper config failed");
            return ExitCode::FAILURE;
        }
    };

    let mut emitter = Emitter::new(cfg);
    let mut out = std::io::stdout();
    emitter.run(&mut out, signal::shutdown_signal()).await;
    ExitCode::SUCCESS
}
