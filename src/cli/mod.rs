//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the teamcity binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ADDRESS_ENV_VAR;
use crate::error::TeamCityError;

/// TeamCity REST API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "teamcity", about = "TeamCity REST API CLI", version)]
pub struct Cli {
    /// Server address, e.g. http://teamcity.local:8111.
    #[arg(long, global = true, env = ADDRESS_ENV_VAR)]
    pub address: Option<String>,

    /// User name for HTTP Basic authentication.
    #[arg(long, global = true, env = "TEAMCITY_USER", default_value = "")]
    pub user: String,

    /// Password for HTTP Basic authentication.
    #[arg(
        long,
        global = true,
        env = "TEAMCITY_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Dump every outgoing request to stdout.
    #[arg(long, global = true)]
    pub trace_requests: bool,

    /// Dump every response to stdout.
    #[arg(long, global = true)]
    pub trace_responses: bool,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the server is reachable with the given credentials.
    Validate,

    /// Show server version and runtime details.
    Server,

    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: String,
    },

    /// Manage parameters of a project or build configuration.
    Params {
        #[command(subcommand)]
        action: ParamsAction,
    },
}

/// Parameter operations.
#[derive(Subcommand, Debug)]
pub enum ParamsAction {
    /// List all parameters.
    List {
        #[command(flatten)]
        owner: ParamOwner,
    },

    /// Show one parameter.
    Get {
        name: String,

        #[command(flatten)]
        owner: ParamOwner,
    },

    /// Create or overwrite a parameter.
    Set {
        name: String,

        value: String,

        #[command(flatten)]
        owner: ParamOwner,
    },

    /// Remove a parameter.
    Delete {
        name: String,

        #[command(flatten)]
        owner: ParamOwner,
    },
}

/// The project or build configuration that owns the parameters.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct ParamOwner {
    /// Project ID.
    #[arg(long)]
    pub project: Option<String>,

    /// Build configuration ID.
    #[arg(long)]
    pub build_type: Option<String>,
}

/// Entity types that can be fetched.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A project.
    #[value(alias = "projects")]
    Project,
    /// A build configuration.
    #[value(alias = "build-types", alias = "buildtype")]
    BuildType,
    /// A VCS root.
    #[value(alias = "vcs-roots")]
    VcsRoot,
}

/// Hint printed after a failure to set up the client.
///
/// Only configuration problems get one; transport setup failures are
/// reported as they are.
pub fn startup_hint(err: &TeamCityError) -> Option<&'static str> {
    match err {
        TeamCityError::Configuration(_) => Some("Hint: Set TEAMCITY_ADDR or pass --address"),
        _ => None,
    }
}
