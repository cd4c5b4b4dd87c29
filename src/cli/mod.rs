//! CLI interface and argument parsing
//!
//! This module provides the `qualtrics` command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Qualtrics survey and response export client
#[derive(Parser, Debug)]
#[command(name = "qualtrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "qualtrics.toml", env = "QUALTRICS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error); defaults to application.log_level
    #[arg(short, long, env = "QUALTRICS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export survey responses and extract them locally
    Export(commands::export::ExportArgs),

    /// List, inspect, activate, deactivate or delete surveys
    Surveys(commands::surveys::SurveysArgs),

    /// List the saved response filters of a survey
    Filters(commands::filters::FiltersArgs),

    /// List contact directories
    Directories(commands::directories::DirectoriesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
