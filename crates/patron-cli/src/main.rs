#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use patron_server::handler::routes;
use patron_server::service::ServiceState;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Cli;

/// Tracing target for startup events.
pub const TRACING_TARGET_SERVER_STARTUP: &str = "patron_cli::server::startup";
/// Tracing target for shutdown events.
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "patron_cli::server::shutdown";

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is a development convenience; absence is fine. Loaded
    // before clap parses so env-backed flags pick its values up.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing();

    match run(cli).await {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "patron server exited cleanly"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                "patron server exited with error"
            );
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Connects the collaborators and serves the API until shutdown.
async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting patron server"
    );

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;

    let router = create_router(state, &cli);
    server::serve(router, &cli.server).await
}

/// Assembles the router with its middleware stack.
///
/// Layers are listed innermost-first: the trace layer added last wraps
/// everything, the timeout bounds each request end to end (store calls and
/// the image upload included).
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    routes(state.clone())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            cli.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Installs the global tracing subscriber, filtered by `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
