//! Command-line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    auth::AuthCommands, config::ConfigCommands, products::ProductsCommands,
    profile::ProfileCommands, users::UsersCommands,
};
use crate::output::OutputFormat;

/// Storefront admin from the command line
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, propagate_version = true)]
pub struct Cli {
    /// Configuration profile to use
    #[arg(long, global = true, env = "STOREFRONT_PROFILE")]
    pub profile: Option<String>,

    /// API base URL, overriding the profile
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token, overriding the stored login
    #[arg(long, global = true, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.toml and credentials.toml
    #[arg(long, global = true, env = "STOREFRONT_CONFIG_DIR", hide = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out and inspect the session
    Auth(AuthCommands),

    /// Manage the product catalog
    Products(ProductsCommands),

    /// Manage users
    Users(UsersCommands),

    /// View or edit the logged-in user
    Profile(ProfileCommands),

    /// Manage CLI configuration
    Config(ConfigCommands),
}
