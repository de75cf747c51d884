//! CLI command definitions for the `chatline` binary.
//!
//! Uses clap derive macros for argument parsing. Every command except
//! `serve` runs one service operation and prints its response envelope.

pub mod conversation;
pub mod identity;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chatline_types::chat::TimeBound;

/// Chat identity and conversation service.
#[derive(Parser)]
#[command(name = "chatline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: {data_dir}/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a throwaway in-memory store instead of SQLite.
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Register a new user.
    Register {
        username: String,

        #[arg(long, env = "CHATLINE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check a username/password pair.
    Login {
        username: String,

        #[arg(long, env = "CHATLINE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check that a username is registered.
    Verify { username: String },

    /// Show the chat history between two users.
    History {
        u1: String,
        u2: String,

        /// Window start: integer seconds, or -inf/+inf.
        #[arg(long, allow_hyphen_values = true)]
        from: Option<TimeBound>,

        /// Window end: integer seconds, or -inf/+inf.
        #[arg(long, allow_hyphen_values = true)]
        to: Option<TimeBound>,
    },

    /// List the users someone has exchanged messages with.
    Contacts { username: String },

    /// Send a message.
    Send {
        from: String,
        to: String,
        message: String,

        /// Seconds since the epoch (default: now).
        #[arg(long, allow_hyphen_values = true)]
        timestamp: Option<i64>,
    },
}
