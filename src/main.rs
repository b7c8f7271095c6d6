//! Console runner (default binary).
//!
//! Reads commands from stdin and answers with one JSON message per line on stdout.
//! Set `RUST_LOG` to see session logs on stderr.

use anyhow::Result;

use melody_memory::console::{run_stdio, ConsoleConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ConsoleConfig::from_env();
    log::debug!("config: {config:?}");
    run_stdio(config).await
}
