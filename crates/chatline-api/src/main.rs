//! Chatline CLI and REST API entry point.
//!
//! Binary name: `chatline`
//!
//! Parses CLI arguments, loads configuration, opens the store, then either
//! runs one operation and prints its envelope or starts the HTTP server.

mod cli;
mod http;
mod state;

use std::process::ExitCode;

use clap::Parser;

use chatline_infra::config::{default_config_path, load_config, resolve_data_dir};
use chatline_observe::tracing_setup::{init_tracing, shutdown_tracing};
use chatline_types::config::StorageBackend;

use cli::output::OutputMode;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatline=debug",
        _ => "trace",
    };
    init_tracing(cli.otel, filter).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let data_dir = resolve_data_dir();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&data_dir));
    let mut config = load_config(&config_path).await;
    if cli.in_memory {
        config.storage.backend = StorageBackend::Memory;
    }

    let state = AppState::init(config, &data_dir).await?;
    let mode = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "HTTP server listening");
            if !cli.quiet {
                println!();
                println!(
                    "  {} Chatline API listening on {}",
                    console::style("▶").green().bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!();
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Register { username, password } => {
            cli::identity::register(&state, &username, &password, mode).await
        }

        Commands::Login { username, password } => {
            cli::identity::login(&state, &username, &password, mode).await
        }

        Commands::Verify { username } => cli::identity::verify(&state, &username, mode).await,

        Commands::History { u1, u2, from, to } => {
            cli::conversation::history(&state, &u1, &u2, from, to, mode).await
        }

        Commands::Contacts { username } => {
            cli::conversation::contacts(&state, &username, mode).await
        }

        Commands::Send {
            from,
            to,
            message,
            timestamp,
        } => cli::conversation::send(&state, &from, &to, &message, timestamp, mode).await,
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
