//! Launcher - run deployment scripts with an on-demand deployer key.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use launcher::cli::output;
use launcher::cli::{execute, Cli};
use launcher::core::constants::{FAILURE_EXIT_CODE, LOG_ENV, USAGE};
use launcher::error::{ConfigError, CredentialError, DispatchError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("launcher=debug")
        } else {
            EnvFilter::new("launcher=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = hint(&e) {
                output::hint(&hint);
            }
            std::process::exit(FAILURE_EXIT_CODE);
        }
    }
}

/// Suggested next step for an error, if there is one.
fn hint(e: &Error) -> Option<String> {
    match e {
        Error::Usage => Some(format!("usage: {}", USAGE)),
        Error::Credential(CredentialError::NotConfigured { .. }) => {
            Some("run: launcher --import".to_string())
        }
        Error::Credential(CredentialError::DecryptionFailed) => {
            Some("re-run and enter the password used with --import".to_string())
        }
        Error::NoInput(_) => Some("run from a terminal or pipe one answer per line".to_string()),
        Error::Dispatch(DispatchError::RuntimeNotFound { .. }) => {
            Some("install the runtime or set [runtime] program in launcher.toml".to_string())
        }
        Error::Config(ConfigError::Parse(_)) | Error::Config(ConfigError::InvalidValue { .. }) => {
            Some("check launcher.toml".to_string())
        }
        _ => None,
    }
}
