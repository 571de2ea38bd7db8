//! Command-line interface definition for PCForge
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for recommendation queries, account management,
//! and saved-build operations.

use crate::workflow::UseCase;
use clap::{Parser, Subcommand};

/// PCForge - PC build recommendation client
///
/// Request build recommendations from the PCForge backend and manage
/// your saved builds and ratings.
#[derive(Parser, Debug, Clone)]
#[command(name = "pcforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long, env = "PCFORGE_API_BASE")]
    pub api_base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for PCForge
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Get a PC build recommendation
    Recommend {
        /// Build budget (minimum 100)
        #[arg(short, long)]
        budget: u32,

        /// Use case for the build
        #[arg(short, long, value_enum, default_value_t = UseCase::General)]
        use_case: UseCase,

        /// Game title; required when the use case is gaming
        #[arg(short, long)]
        game: Option<String>,

        /// Save the recommended build to your account
        #[arg(long)]
        save: bool,

        /// Rate the recommended build (1-5)
        #[arg(long)]
        rate: Option<u8>,
    },

    /// Create a new account
    Register {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log in and store the session credential
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the stored credential
    Logout,

    /// Show the current session and account profile
    Whoami,

    /// Manage saved builds
    Builds {
        /// Saved-build subcommand
        #[command(subcommand)]
        command: BuildsCommand,
    },

    /// List ratings you have submitted
    Ratings,
}

/// Saved-build subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum BuildsCommand {
    /// List your saved builds
    List,

    /// Rate a build by id
    Rate {
        /// Build identifier
        #[arg(short, long)]
        build_id: String,

        /// Rating value (1-5)
        #[arg(short, long)]
        rating: u8,

        /// Optional comment to attach
        #[arg(long)]
        comment: Option<String>,
    },

    /// Delete a saved build by id
    Delete {
        /// Build identifier
        #[arg(short, long)]
        build_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            api_base: None,
            verbose: false,
            command: Commands::Whoami,
        }
    }
}
