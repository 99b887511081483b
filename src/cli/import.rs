//! Import command.
//!
//! Encrypts a deployer private key with a passphrase and stores it in the
//! configured `.env` file.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::cipher;
use crate::core::config::Config;
use crate::core::env_file::EnvFile;
use crate::core::prompt::Prompt;
use crate::core::validation::validate_value;
use crate::error::{CredentialError, Result};

/// Encrypt a private key into the env file.
pub fn execute(config: &Config, force: bool) -> Result<()> {
    let credential = &config.credential;
    let var = credential.encrypted_var.as_str();
    let mut env = EnvFile::load_or_empty(&credential.env_file)?;

    // An empty entry counts as unset, matching how the key is loaded.
    if env.get(var).is_some_and(|v| !v.trim().is_empty()) {
        if !force {
            return Err(CredentialError::AlreadyExists {
                var: var.to_string(),
                path: env.path().display().to_string(),
            }
            .into());
        }
        output::warn(&format!("overwriting {}", output::key(var)));
    }

    let prompt = TerminalPrompt;
    let key = prompt.ask("Private key")?;
    let key = key.trim();
    validate_value("private key", key)?;

    let passphrase = prompt.ask_new("Password to encrypt the key")?;
    validate_value("password", &passphrase)?;

    let sealed = cipher::seal(key, &passphrase, credential.work_factor)?;
    env.set(var, sealed.as_str());
    env.save()?;

    info!(var, path = %env.path().display(), "encrypted key stored");
    output::success(&format!(
        "encrypted key written to {} as {}",
        env.path().display(),
        output::key(var)
    ));

    Ok(())
}
