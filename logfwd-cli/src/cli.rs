//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "logfwd.toml";

/// logfwd -- log forwarding specification normalizer.
///
/// Use `logfwd <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logfwd", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logfwd.toml configuration file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a forwarding spec and print the result with its status.
    Normalize(NormalizeArgs),

    /// Validate a forwarding spec; fails if any entity is rejected or degraded.
    Validate(ValidateArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

/// Log store and secret overrides shared by `normalize` and `validate`.
#[derive(Args, Debug, Default, Clone)]
pub struct StoreArgs {
    /// Override the log store type (none, elasticsearch, lokistack).
    #[arg(long)]
    pub store: Option<String>,

    /// Override the log store name.
    #[arg(long)]
    pub store_name: Option<String>,

    /// Override the secrets directory.
    #[arg(long)]
    pub secrets_dir: Option<PathBuf>,
}

// ---- normalize ----

/// Normalize a forwarding spec.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Spec file (.yaml, .yml or .json).
    pub spec: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

// ---- validate ----

/// Validate a forwarding spec.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Spec file (.yaml, .yml or .json).
    pub spec: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

// ---- config ----

/// Manage logfwd configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, log_store, operator, secrets).
        #[arg(long)]
        section: Option<String>,
    },
}
