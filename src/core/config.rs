//! Configuration file management.
//!
//! Handles reading and validating `launcher.toml`. The file is optional:
//! without it the launcher runs `hardhat run` with the stock network and
//! credential names.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::network::NetworkResolver;
use crate::core::validation::var_name_problem;
use crate::error::{ConfigError, Result};

/// Launcher configuration stored in `launcher.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub network: NetworkConfig,
    pub runtime: RuntimeConfig,
    pub credential: CredentialConfig,
}

/// Network selection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Network used when no `--network` is forwarded.
    pub default: String,
    /// Networks that run without a signing key.
    pub local: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            default: constants::DEFAULT_NETWORK.to_string(),
            local: constants::LOCAL_NETWORKS
                .iter()
                .map(|n| n.to_string())
                .collect(),
        }
    }
}

/// The scripting runtime that executes a script.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Program name or path, resolved through `PATH`.
    pub program: String,
    /// Arguments placed before the script path (the "run script" subcommand).
    pub args: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: constants::RUNTIME_PROGRAM.to_string(),
            args: constants::RUNTIME_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Where the encrypted key comes from and where the decrypted one goes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialConfig {
    /// Variable holding the encrypted key.
    pub encrypted_var: String,
    /// Variable set in the child environment only.
    pub runtime_var: String,
    /// Dotenv file consulted when `encrypted_var` is not in the environment.
    pub env_file: PathBuf,
    /// scrypt work factor (log2 N) used by `--import`. Defaults to age's
    /// calibrated value.
    pub work_factor: Option<u8>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            encrypted_var: constants::ENCRYPTED_KEY_VAR.to_string(),
            runtime_var: constants::RUNTIME_KEY_VAR.to_string(),
            env_file: PathBuf::from(constants::ENV_FILE),
            work_factor: None,
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `launcher.toml` in the
    /// current directory is used if present, defaults otherwise.
    /// `LAUNCHER_DEFAULT_NETWORK` overrides the default network.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path,
    /// `ConfigError::Parse` for malformed TOML, or `ConfigError::InvalidValue`
    /// when validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(Self::config_path()).filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
                toml::from_str(&contents).map_err(ConfigError::Parse)?
            }
            None => {
                debug!("no config file, using defaults");
                Self::default()
            }
        };

        if let Ok(network) = std::env::var(constants::DEFAULT_NETWORK_ENV) {
            if !network.is_empty() {
                debug!(network = %network, "default network overridden from environment");
                config.network.default = network;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// The two credential variables must be valid and distinct, so a script
    /// can never mistake the encrypted blob for the usable key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first violation.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.network.default.trim().is_empty() {
            return Err(invalid("network.default", "cannot be empty"));
        }

        if self.runtime.program.trim().is_empty() {
            return Err(invalid("runtime.program", "cannot be empty"));
        }

        let credential = &self.credential;
        for (field, name) in [
            ("credential.encrypted_var", &credential.encrypted_var),
            ("credential.runtime_var", &credential.runtime_var),
        ] {
            if let Some(problem) = var_name_problem(name) {
                return Err(invalid(field, format!("'{}' {}", name, problem)));
            }
        }
        if credential.encrypted_var == credential.runtime_var {
            return Err(invalid(
                "credential.runtime_var",
                "must differ from credential.encrypted_var",
            ));
        }

        if let Some(log_n) = credential.work_factor {
            if !(1..=constants::MAX_WORK_FACTOR).contains(&log_n) {
                return Err(invalid(
                    "credential.work_factor",
                    format!("must be between 1 and {}, got {}", constants::MAX_WORK_FACTOR, log_n),
                ));
            }
        }

        Ok(())
    }

    /// Network resolver for this configuration.
    pub fn resolver(&self) -> NetworkResolver {
        NetworkResolver::new(&self.network.default, &self.network.local)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
