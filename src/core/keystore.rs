//! Encrypted deployer key storage.
//!
//! The encrypted key is read from an environment variable, falling back to
//! the project's `.env` file. Not finding it is a normal state: it means no
//! deployer account has been set up.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::config::CredentialConfig;
use crate::core::env_file::EnvFile;
use crate::error::Result;

/// Opaque encrypted key record.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedCredential(String);

impl EncryptedCredential {
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncryptedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedCredential({} bytes)", self.0.len())
    }
}

/// A decrypted signing key.
///
/// Only ever held in memory. The buffer is wiped when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedSecret(Zeroizing<String>);

impl DecryptedSecret {
    pub fn new(secret: Zeroizing<String>) -> Self {
        Self(secret)
    }

    /// The raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_inner(self) -> Zeroizing<String> {
        self.0
    }
}

impl fmt::Debug for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptedSecret(***)")
    }
}

/// Source of the encrypted key and the means to unlock it.
pub trait SecretStore {
    /// Load the encrypted key, or `None` when none is configured.
    ///
    /// # Errors
    ///
    /// Returns error only when a configured source exists but cannot be read.
    fn load(&self) -> Result<Option<EncryptedCredential>>;

    /// Decrypt `credential` with `passphrase`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::DecryptionFailed` on a wrong passphrase or
    /// a corrupted record.
    fn decrypt(&self, credential: &EncryptedCredential, passphrase: &str)
        -> Result<DecryptedSecret>;

    /// Human-readable name of where the key is expected, for messages.
    fn location(&self) -> &str;
}

/// Reads the encrypted key from the environment, then from a dotenv file.
#[derive(Debug, Clone)]
pub struct EnvKeystore {
    var: String,
    env_file: PathBuf,
}

impl EnvKeystore {
    pub fn new(var: impl Into<String>, env_file: impl Into<PathBuf>) -> Self {
        Self {
            var: var.into(),
            env_file: env_file.into(),
        }
    }

    pub fn from_config(config: &CredentialConfig) -> Self {
        Self::new(&config.encrypted_var, &config.env_file)
    }

    fn read_env_file(&self) -> Result<Option<String>> {
        Ok(EnvFile::load_optional(&self.env_file)?
            .and_then(|env| env.get(&self.var).map(str::to_string))
            .filter(|v| !v.trim().is_empty()))
    }
}

impl SecretStore for EnvKeystore {
    fn load(&self) -> Result<Option<EncryptedCredential>> {
        if let Some(value) = std::env::var(&self.var).ok().filter(|v| !v.trim().is_empty()) {
            debug!(var = %self.var, "encrypted key found in environment");
            return Ok(Some(EncryptedCredential::new(value)));
        }

        match self.read_env_file()? {
            Some(value) => {
                debug!(var = %self.var, path = %self.env_file.display(), "encrypted key found in env file");
                Ok(Some(EncryptedCredential::new(value)))
            }
            None => {
                debug!(var = %self.var, "no encrypted key configured");
                Ok(None)
            }
        }
    }

    fn decrypt(
        &self,
        credential: &EncryptedCredential,
        passphrase: &str,
    ) -> Result<DecryptedSecret> {
        cipher::open(credential, passphrase)
    }

    fn location(&self) -> &str {
        &self.var
    }
}
