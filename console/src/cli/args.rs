//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logs::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "msconsole",
    version,
    about = "Author, deploy and test containerized microservices"
)]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the settings file
    #[arg(long, global = true, env = "MSCONSOLE_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Log level, overriding the settings file
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List microservices
    List,

    /// Show the code of a microservice
    Show { id: String },

    /// Deploy a new microservice
    Create {
        #[arg(long)]
        name: String,

        /// Source file; the starter template is used when omitted
        #[arg(long)]
        code_file: Option<PathBuf>,

        /// Deploy without the Roble capability
        #[arg(long)]
        plain: bool,
    },

    /// Replace the code or configuration of a microservice
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        code_file: Option<PathBuf>,

        /// Set the Roble capability flag
        #[arg(long)]
        roble: Option<bool>,
    },

    /// Restart a microservice
    Restart { id: String },

    /// Stop a running microservice
    Stop { id: String },

    /// Delete a microservice
    Delete { id: String },

    /// Send a test request to a running microservice
    Test {
        id: String,

        /// JSON payload
        #[arg(long, default_value = "{}")]
        payload: String,

        /// Read the JSON payload from a file instead
        #[arg(long, conflicts_with = "payload")]
        payload_file: Option<PathBuf>,

        /// Roble project identifier
        #[arg(long, default_value = "")]
        project_id: String,

        /// Access token for Roble microservices
        #[arg(long, env = "MSCONSOLE_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Interactive console
    Shell,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Print build information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a settings file with defaults
    Init,

    /// Print the effective options
    Show,
}
