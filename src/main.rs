// GDB MCP server over stdio
//
// stdout carries the MCP protocol; logs go to stderr.

use anyhow::Result;
use std::sync::Arc;

use kodegen_tools_gdb::{GdbOptions, SessionRegistry, VERSION, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let options = GdbOptions::from_env()?;
    log::info!(
        "Starting GDB MCP server v{VERSION} on stdio (gdb: {})",
        options.gdb_path.display()
    );

    let registry = Arc::new(SessionRegistry::with_options(options));
    let served = serve_stdio(Arc::clone(&registry)).await;

    registry.shutdown().await;
    log::info!("GDB MCP server stopped");

    served
}
