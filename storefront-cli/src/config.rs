//! CLI configuration management

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use storefront_sdk::DEFAULT_BASE_URL as DEFAULT_API_URL;

/// Profile used when neither `--profile` nor a default is set
pub const DEFAULT_PROFILE: &str = "default";

/// Where the config and credentials files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Use `dir` if given, otherwise the platform config directory
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = dir {
            return Ok(Self::in_dir(dir));
        }
        let dirs = ProjectDirs::from("com", "storefront", "storefront-cli")
            .context("Could not determine config directory")?;
        Ok(Self::in_dir(dirs.config_dir()))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.dir.join("credentials.toml")
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// Default profile to use
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Named profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl CliConfig {
    /// Load configuration, returning defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save configuration, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Get a profile by name, falling back to the default profile
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(profile_name)
    }

    /// Get or create a profile
    pub fn get_or_create_profile(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }

    /// Set the default profile
    pub fn set_default_profile(&mut self, name: &str) {
        self.default_profile = Some(name.to_string());
    }

    /// Profile names in sorted order
    pub fn list_profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// A configuration profile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    /// API base URL
    #[serde(default)]
    pub api_url: Option<String>,

    /// Default output format
    #[serde(default)]
    pub output_format: Option<String>,

    /// Additional headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Profile {
    /// Get the API URL, falling back to default
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Enable verbose output by default
    #[serde(default)]
    pub verbose: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size for list commands
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            color: true,
            verbose: false,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    storefront_sdk::pagination::DEFAULT_PAGE_SIZE
}

/// Credential storage
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Credentials {
    /// Stored credentials by profile name
    #[serde(default)]
    pub profiles: HashMap<String, ProfileCredentials>,
}

impl Credentials {
    /// Load credentials, returning none if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse credentials from {:?}", path))
    }

    /// Save credentials readable by the owner only
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;

        let content = toml::to_string_pretty(self).context("Failed to serialize credentials")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(path)
            .with_context(|| format!("Failed to open {:?}", path))?;

        // mode() only applies on creation; tighten a file left by an older save
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write credentials to {:?}", path))?;
        Ok(())
    }

    /// Get credentials for a profile
    pub fn get(&self, profile: &str) -> Option<&ProfileCredentials> {
        self.profiles.get(profile)
    }

    /// Set credentials for a profile
    pub fn set(&mut self, profile: &str, creds: ProfileCredentials) {
        self.profiles.insert(profile.to_string(), creds);
    }

    /// Remove credentials for a profile
    pub fn remove(&mut self, profile: &str) -> Option<ProfileCredentials> {
        self.profiles.remove(profile)
    }
}

/// Credentials for a single profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileCredentials {
    /// Who logged in
    pub username: String,
    /// Access token sent as a bearer token
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl ProfileCredentials {
    /// Credentials from a successful login
    pub fn from_login(username: impl Into<String>, token: &storefront_sdk::AuthToken) -> Self {
        Self {
            username: username.into(),
            token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use storefront_sdk::AuthToken;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.default_profile.is_none());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_profile_api_url() {
        let profile = Profile::default();
        assert_eq!(profile.api_url(), DEFAULT_API_URL);

        let profile = Profile {
            api_url: Some("https://shop.example.com/api".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.api_url(), "https://shop.example.com/api");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_format, "table");
        assert!(settings.color);
        assert!(!settings.verbose);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.page_size, 10);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config: CliConfig = toml::from_str("[settings]\ncolor = false\n").unwrap();

        assert!(!config.settings.color);
        assert_eq!(config.settings.output_format, "table");
        assert_eq!(config.settings.timeout_secs, 30);
    }

    #[test]
    fn test_missing_files_load_as_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(dir.path());

        assert_eq!(CliConfig::load(&paths.config_file()).unwrap(), CliConfig::default());
        assert_eq!(
            Credentials::load(&paths.credentials_file()).unwrap(),
            Credentials::default()
        );
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(dir.path().join("nested"));

        let mut config = CliConfig::default();
        config.get_or_create_profile("staging").api_url =
            Some("https://staging.example.com/api".to_string());
        config.set_default_profile("staging");
        config.save(&paths.config_file()).unwrap();

        let loaded = CliConfig::load(&paths.config_file()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.get_profile(None).unwrap().api_url(),
            "https://staging.example.com/api"
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "profiles = 3").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_credentials_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = ConfigPaths::in_dir(dir.path()).credentials_file();

        let token = AuthToken {
            access_token: "abc".to_string(),
            refresh_token: None,
        };
        let mut creds = Credentials::default();
        creds.set("default", ProfileCredentials::from_login("emilys", &token));
        creds.save(&path).unwrap();

        let loaded = Credentials::load(&path).unwrap();
        assert_eq!(loaded.get("default").unwrap().token, "abc");
        assert_eq!(loaded.get("default").unwrap().username, "emilys");
    }

    #[cfg(unix)]
    #[test]
    fn test_credentials_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        Credentials::default().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_credentials_save_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        fs::write(&path, "stale contents that are longer than the new file").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        Credentials::default().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(Credentials::load(&path).unwrap().get("default").is_none());
    }

    #[test]
    fn test_list_profiles_sorted() {
        let mut config = CliConfig::default();
        config.get_or_create_profile("prod");
        config.get_or_create_profile("dev");

        assert_eq!(config.list_profiles(), vec!["dev", "prod"]);
    }
}
