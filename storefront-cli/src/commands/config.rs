//! Configuration commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::CliConfig;
use crate::context::Context;
use crate::output::OutputFormat;

/// Configuration management commands
#[derive(Debug, Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. settings.timeout_secs, api_url, default_profile)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file paths
    Path,
}

/// Execute configuration commands
pub async fn execute(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => {
            show(ctx);
            Ok(())
        }
        ConfigSubcommand::Set { key, value } => set(ctx, &key, &value),
        ConfigSubcommand::Path => {
            show_paths(ctx);
            Ok(())
        }
    }
}

fn show(ctx: &Context) {
    let config = &ctx.config;
    println!("{}", "Configuration".bold().underline());
    println!();

    println!("{}", "Settings:".cyan());
    println!("  output_format: {}", config.settings.output_format);
    println!("  color: {}", config.settings.color);
    println!("  verbose: {}", config.settings.verbose);
    println!("  timeout_secs: {}", config.settings.timeout_secs);
    println!("  page_size: {}", config.settings.page_size);

    println!();
    println!("{}: {}", "Active profile".cyan(), ctx.profile_name);
    println!("{}: {}", "Effective API URL".cyan(), ctx.api_url());

    println!();
    println!("{}", "Profiles:".cyan());
    if config.profiles.is_empty() {
        println!("  No profiles configured");
    }
    for name in config.list_profiles() {
        let Some(p) = config.profiles.get(name) else {
            continue;
        };
        let default_marker = if config.default_profile.as_deref() == Some(name) {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        let login = match ctx.credentials.get(name) {
            Some(c) => format!("logged in as {}", c.username),
            None => "not logged in".dimmed().to_string(),
        };
        println!("  [{}]{}", name, default_marker);
        println!("    api_url: {}", p.api_url());
        if let Some(format) = &p.output_format {
            println!("    output_format: {}", format);
        }
        println!("    {}", login);
    }
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    apply_setting(&mut config, &ctx.profile_name, key, value)?;

    config
        .save(&ctx.paths.config_file())
        .context("Failed to save configuration")?;
    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

/// Apply `key = value` to the config; bare profile keys go to `profile`
fn apply_setting(config: &mut CliConfig, profile: &str, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["settings", setting] => match *setting {
            "output_format" => config.settings.output_format = parse_format(value)?,
            "color" => config.settings.color = value.parse().context("Invalid boolean value")?,
            "verbose" => config.settings.verbose = value.parse().context("Invalid boolean value")?,
            "timeout_secs" => {
                let secs: u64 = value.parse().context("Invalid number")?;
                if secs == 0 {
                    bail!("Timeout must be greater than zero");
                }
                config.settings.timeout_secs = secs;
            }
            "page_size" => {
                let size: u32 = value.parse().context("Invalid number")?;
                if size == 0 {
                    bail!("Page size must be greater than zero");
                }
                config.settings.page_size = size;
            }
            _ => bail!("Unknown setting: {}", setting),
        },
        ["default_profile"] => config.set_default_profile(value),
        ["profile", name, field] => set_profile_field(config, name, field, value)?,
        [field] => set_profile_field(config, profile, field, value)?,
        _ => bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

fn set_profile_field(config: &mut CliConfig, profile: &str, field: &str, value: &str) -> Result<()> {
    match field {
        "api_url" => {
            let url = url::Url::parse(value).with_context(|| format!("Invalid URL: {}", value))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!("API URL must use http or https");
            }
            config.get_or_create_profile(profile).api_url = Some(value.to_string());
        }
        "output_format" => {
            config.get_or_create_profile(profile).output_format = Some(parse_format(value)?);
        }
        _ => bail!("Unknown profile field: {}", field),
    }
    Ok(())
}

fn parse_format(value: &str) -> Result<String> {
    match OutputFormat::parse(value) {
        Some(format) => Ok(format.to_string()),
        None => bail!("Unknown output format: {} (expected table, json, yaml or compact)", value),
    }
}

fn show_paths(ctx: &Context) {
    println!("{}", "Configuration paths:".bold());
    println!();

    let entries = [
        ("Config:     ", ctx.paths.config_file()),
        ("Credentials:", ctx.paths.credentials_file()),
    ];
    for (label, path) in entries {
        let status = if path.exists() { "✓".green() } else { "✗".red() };
        println!("  {} {} {}", label, status, path.display());
    }
}
