//! Error types.
//!
//! Every failure is terminal for the current invocation. `main` prints the
//! message and exits with [`FAILURE_EXIT_CODE`](crate::core::constants::FAILURE_EXIT_CODE).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// No script path on the command line.
    #[error("no script given")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("no answer to '{0}': stdin is closed")]
    NoInput(String),
}

/// Errors loading or validating `launcher.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors around the encrypted deployer key.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Remote network requested but no encrypted key is available.
    #[error("no deployer account configured ({var} is not set)")]
    NotConfigured { var: String },

    /// Wrong passphrase or unreadable record. The two are not told apart.
    #[error("failed to decrypt private key. Wrong password?")]
    DecryptionFailed,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("{var} already exists in {path} (use --force to overwrite)")]
    AlreadyExists { var: String, path: String },
}

/// Errors before or while starting the child process.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("runtime not found on PATH: {program}")]
    RuntimeNotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyValue(String),
}

pub type Result<T> = std::result::Result<T, Error>;
