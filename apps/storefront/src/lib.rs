//! # Shopfinity Storefront Library
//!
//! The storefront session service: configuration, state, commands and the
//! invoke loop the UI talks to.
//!
//! ## Module Organization
//! ```text
//! shopfinity_storefront/
//! ├── lib.rs          ◄─── You are here (startup & invoke loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── AppState (store + catalog + config)
//! │   └── config.rs   ◄─── Environment configuration
//! ├── commands/
//! │   ├── session.rs  ◄─── Session snapshot, logout
//! │   ├── account.rs  ◄─── Register, login, profile
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── order.rs    ◄─── Checkout, order history
//! │   └── catalog.rs  ◄─── Product listing
//! ├── invoke.rs       ◄─── JSON-lines request/response protocol
//! ├── demo.rs         ◄─── Deterministic demo catalog
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod demo;
pub mod error;
pub mod invoke;
pub mod state;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use state::{AppConfig, AppState};

/// Runs the storefront service until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Service Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,shopfinity=debug, override with RUST_LOG            │
/// │                                                                         │
/// │  2. Read Configuration ───────────────────────────────────────────────► │
/// │     • SHOP_* environment variables over defaults                        │
/// │                                                                         │
/// │  3. Open State ───────────────────────────────────────────────────────► │
/// │     • Storage (file or memory), catalog (file or demo)                  │
/// │     • Restore the persisted session                                     │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One request line in, one response line out                        │
/// │                                                                         │
/// │  5. Close on EOF ─────────────────────────────────────────────────────► │
/// │     • Flush the active user's cart and orders                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Shopfinity storefront");

    let config = AppConfig::from_env();
    debug!(?config, "Configuration loaded");

    let mut state = AppState::open(config).context("Failed to start storefront")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = invoke::handle_line(&mut state, &line);
        serde_json::to_writer(&mut out, &response).context("Failed to write response")?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    state.close().context("Failed to flush session on shutdown")?;
    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfinity_store=trace` - Trace the session store only
/// - Default: `info,shopfinity=debug`
///
/// Logs go to stderr; stdout carries responses.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfinity=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
