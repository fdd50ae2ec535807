//! CLI execution context

use anyhow::{Context as _, Result};
use std::time::Duration;
use storefront_sdk::{AuthConfig, SdkConfig, StorefrontClient};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::{CliConfig, ConfigPaths, Credentials, Profile, DEFAULT_PROFILE};
use crate::output::{OutputFormat, OutputWriter};

/// Execution context for CLI commands
pub struct Context {
    /// CLI configuration
    pub config: CliConfig,

    /// Credentials storage
    pub credentials: Credentials,

    /// Config and credentials file locations
    pub paths: ConfigPaths,

    /// Active profile name
    pub profile_name: String,

    /// Active profile
    pub profile: Profile,

    /// Output writer
    pub output: OutputWriter,

    /// Verbose mode
    pub verbose: bool,

    /// API URL override
    pub api_url_override: Option<String>,

    /// Token override
    pub token_override: Option<String>,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let paths = ConfigPaths::resolve(cli.config_dir.as_deref())?;

        let config = CliConfig::load(&paths.config_file()).unwrap_or_else(|e| {
            warn!(error = %format!("{:#}", e), "ignoring unreadable config");
            CliConfig::default()
        });
        let credentials = Credentials::load(&paths.credentials_file()).unwrap_or_else(|e| {
            warn!(error = %format!("{:#}", e), "ignoring unreadable credentials");
            Credentials::default()
        });

        let profile_name = cli
            .profile
            .clone()
            .or_else(|| config.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let profile = config
            .get_profile(Some(&profile_name))
            .cloned()
            .unwrap_or_default();
        debug!(profile = %profile_name, "using profile");

        // Flag, then profile, then global setting
        let output_format = cli
            .output
            .or_else(|| profile.output_format.as_deref().and_then(OutputFormat::parse))
            .or_else(|| OutputFormat::parse(&config.settings.output_format))
            .unwrap_or_default();
        let output = OutputWriter::new(output_format, cli.no_color || !config.settings.color);

        Ok(Self {
            verbose: cli.verbose || config.settings.verbose,
            config,
            credentials,
            paths,
            profile_name,
            profile,
            output,
            api_url_override: cli.api_url.clone(),
            token_override: cli.token.clone(),
        })
    }

    /// Get the effective API URL
    pub fn api_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .unwrap_or_else(|| self.profile.api_url())
    }

    /// Bearer token from the override or the stored login
    pub fn token(&self) -> Option<&str> {
        self.token_override.as_deref().or_else(|| {
            self.credentials
                .get(&self.profile_name)
                .map(|c| c.token.as_str())
        })
    }

    /// Create an SDK client
    pub fn create_client(&self) -> Result<StorefrontClient> {
        let auth = match self.token() {
            Some(token) => AuthConfig::BearerToken(token.to_string()),
            None => AuthConfig::None,
        };
        let timeout = Duration::from_secs(self.config.settings.timeout_secs);

        let mut config = SdkConfig::new(self.api_url())
            .with_auth(auth)
            .with_timeout(timeout)
            .with_user_agent(format!("storefront-cli/{}", env!("CARGO_PKG_VERSION")))
            .with_logging(self.verbose);

        for (name, value) in &self.profile.headers {
            config = config.with_header(name.clone(), value.clone());
        }

        StorefrontClient::new(config).context("Failed to create API client")
    }

    /// Page size for list commands when none is given
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.config.settings.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileCredentials;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn context(dir: &TempDir, args: &[&str]) -> Context {
        let dir_arg = dir.path().to_string_lossy().to_string();
        let mut argv = vec!["storefront", "--config-dir", dir_arg.as_str()];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Context::new(&Cli::parse_from(argv)).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &[]);

        assert_eq!(ctx.profile_name, "default");
        assert_eq!(ctx.api_url(), "http://localhost:3000/api");
        assert!(ctx.token().is_none());
        assert_eq!(ctx.output.format(), OutputFormat::Table);
    }

    #[test]
    fn test_profile_settings_apply() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(dir.path());

        let mut config = CliConfig::default();
        let profile = config.get_or_create_profile("staging");
        profile.api_url = Some("https://staging.example.com/api".to_string());
        profile.output_format = Some("json".to_string());
        config.set_default_profile("staging");
        config.save(&paths.config_file()).unwrap();

        let mut creds = Credentials::default();
        creds.set(
            "staging",
            ProfileCredentials {
                username: "emilys".to_string(),
                token: "stored".to_string(),
                refresh_token: None,
            },
        );
        creds.save(&paths.credentials_file()).unwrap();

        let ctx = context(&dir, &[]);

        assert_eq!(ctx.profile_name, "staging");
        assert_eq!(ctx.api_url(), "https://staging.example.com/api");
        assert_eq!(ctx.token(), Some("stored"));
        assert_eq!(ctx.output.format(), OutputFormat::Json);
    }

    #[test]
    fn test_flags_override_profile() {
        let dir = TempDir::new().unwrap();
        let ctx = context(
            &dir,
            &[
                "--api-url",
                "http://127.0.0.1:8080/api",
                "--token",
                "flag-token",
                "--output",
                "yaml",
            ],
        );

        assert_eq!(ctx.api_url(), "http://127.0.0.1:8080/api");
        assert_eq!(ctx.token(), Some("flag-token"));
        assert_eq!(ctx.output.format(), OutputFormat::Yaml);
    }

    #[test]
    fn test_create_client_uses_api_url() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &["--api-url", "https://shop.example.com/api"]);

        let client = ctx.create_client().unwrap();
        assert_eq!(client.base_url(), "https://shop.example.com/api");
    }

    #[test]
    fn test_page_size_falls_back_to_setting() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &[]);

        assert_eq!(ctx.page_size(None), 10);
        assert_eq!(ctx.page_size(Some(25)), 25);
    }
}
