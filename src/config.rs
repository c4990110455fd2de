//! Configuration loading from files and environment.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulation::upload::{UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};

pub const DEFAULT_LOG_FILTER: &str = "info,portal_sim=debug";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub auth: AuthConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    /// Artificial pause before a login attempt is answered.
    pub login_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "123456".to_string(),
            password: "123456".to_string(),
            login_delay_ms: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub upload_success_rate: f64,
    pub api_success_rate: f64,
    pub max_upload_bytes: u64,
    pub accepted_extensions: Vec<String>,
    /// Fixed seed for reproducible outcomes.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_success_rate: 0.7,
            api_success_rate: 0.6,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_extensions: vec!["xlsx".to_string(), "xls".to_string()],
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_bytes: self.max_upload_bytes,
            accepted_extensions: self
                .accepted_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a `.toml` or `.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PortalConfig> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading configuration");

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            Some("json") => Self::from_json(&contents)?,
            _ => anyhow::bail!("Unsupported config format: {}", path.display()),
        };

        Self::validate_config(&config)?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<PortalConfig> {
        toml::from_str(contents).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))
    }

    pub fn from_json(contents: &str) -> Result<PortalConfig> {
        serde_json::from_str(contents).context("Failed to parse JSON")
    }

    /// Defaults or `file_path`, then `PORTAL_*` environment overrides.
    pub fn from_env_and_file(file_path: Option<&Path>) -> Result<PortalConfig> {
        let mut config = match file_path {
            Some(path) => Self::from_file(path)?,
            None => PortalConfig::default(),
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Apply overrides looked up through `var`.
    pub fn apply_overrides<F>(config: &mut PortalConfig, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = var("PORTAL_USERNAME") {
            tracing::debug!("Overriding username from environment");
            config.auth.username = username;
        }
        if let Some(password) = var("PORTAL_PASSWORD") {
            tracing::debug!("Overriding password from environment");
            config.auth.password = password;
        }
        if let Some(filter) = var("PORTAL_LOG_FILTER") {
            config.logging.filter = filter;
        }
        if let Some(rate) = var("PORTAL_UPLOAD_SUCCESS_RATE") {
            config.simulation.upload_success_rate = rate
                .parse()
                .with_context(|| format!("PORTAL_UPLOAD_SUCCESS_RATE is not a number: {}", rate))?;
        }
        if let Some(rate) = var("PORTAL_API_SUCCESS_RATE") {
            config.simulation.api_success_rate = rate
                .parse()
                .with_context(|| format!("PORTAL_API_SUCCESS_RATE is not a number: {}", rate))?;
        }
        Ok(())
    }

    pub fn validate_config(config: &PortalConfig) -> Result<()> {
        if config.auth.username.is_empty() || config.auth.password.is_empty() {
            anyhow::bail!("Username and password must not be empty");
        }

        for (name, rate) in [
            ("upload_success_rate", config.simulation.upload_success_rate),
            ("api_success_rate", config.simulation.api_success_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                anyhow::bail!("{} must be between 0 and 1, got {}", name, rate);
            }
        }

        if config.simulation.max_upload_bytes == 0 {
            anyhow::bail!("max_upload_bytes must be positive");
        }
        if config.simulation.accepted_extensions.is_empty() {
            anyhow::bail!("At least one accepted upload extension is required");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.auth.username, "123456");
        assert_eq!(config.simulation.upload_success_rate, 0.7);
        assert_eq!(config.simulation.api_success_rate, 0.6);
        assert_eq!(config.logging.filter, "info,portal_sim=debug");
        assert!(ConfigLoader::validate_config(&config).is_ok());
    }

    #[test]
    fn test_toml_parsing_with_partial_sections() {
        let toml = r#"
[auth]
username = "trainer"

[simulation]
api_success_rate = 1.0
seed = 42
"#;
        let config = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(config.auth.username, "trainer");
        assert_eq!(config.auth.password, "123456");
        assert_eq!(config.simulation.api_success_rate, 1.0);
        assert_eq!(config.simulation.upload_success_rate, 0.7);
        assert_eq!(config.simulation.seed, Some(42));
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "[auth]\nlogin_delay_ms = 0").unwrap();
        let config = ConfigLoader::from_file(toml_file.path()).unwrap();
        assert_eq!(config.auth.login_delay_ms, 0);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json_file, r#"{{"simulation": {{"max_upload_bytes": 2048}}}}"#).unwrap();
        let config = ConfigLoader::from_file(json_file.path()).unwrap();
        assert_eq!(config.simulation.max_upload_bytes, 2048);

        let yaml_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(ConfigLoader::from_file(yaml_file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORTAL_USERNAME", "demo"),
            ("PORTAL_UPLOAD_SUCCESS_RATE", "0.25"),
            ("PORTAL_LOG_FILTER", "warn"),
        ]
        .into_iter()
        .collect();
        let mut config = PortalConfig::default();

        ConfigLoader::apply_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.auth.username, "demo");
        assert_eq!(config.simulation.upload_success_rate, 0.25);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_bad_override_rate() {
        let mut config = PortalConfig::default();
        let result = ConfigLoader::apply_overrides(&mut config, |k| {
            (k == "PORTAL_API_SUCCESS_RATE").then(|| "often".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PortalConfig::default();
        config.simulation.api_success_rate = 1.5;
        assert!(ConfigLoader::validate_config(&config).is_err());

        let mut config = PortalConfig::default();
        config.auth.password.clear();
        assert!(ConfigLoader::validate_config(&config).is_err());

        let mut config = PortalConfig::default();
        config.simulation.max_upload_bytes = 0;
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_upload_policy_normalises_extensions() {
        let simulation = SimulationConfig {
            accepted_extensions: vec![".XLSX".to_string()],
            ..SimulationConfig::default()
        };
        assert_eq!(simulation.upload_policy().accepted_extensions, vec!["xlsx".to_string()]);
    }
}
