//! Passphrase encryption for the deployer key.
//!
//! Two stored forms are understood:
//!
//! - **age**: an age file with a single scrypt (passphrase) recipient, kept
//!   as one line of standard base64 (or ASCII armor). This is what
//!   `--import` writes.
//! - **JSON keystore**: a Web3 Secret Storage v3 document, as written by
//!   ethers `Wallet.encrypt`. Opened read-only so existing projects keep
//!   working.

mod age;
mod web3;

use tracing::debug;

use crate::core::keystore::{DecryptedSecret, EncryptedCredential};
use crate::error::{CredentialError, Result};

pub use self::age::seal;

/// Decrypt a stored credential with `passphrase`, whichever form it is in.
///
/// Pure function of its inputs: the same credential and passphrase always
/// give the same secret.
///
/// # Errors
///
/// Returns `CredentialError::DecryptionFailed` for a wrong passphrase and for
/// any unreadable record alike. The underlying cause is only logged.
pub fn open(credential: &EncryptedCredential, passphrase: &str) -> Result<DecryptedSecret> {
    let blob = credential.as_str().trim();

    if web3::is_keystore(blob) {
        web3::open(blob, passphrase)
    } else {
        age::open(blob, passphrase)
    }
}

fn failed(stage: &str, err: impl std::fmt::Display) -> CredentialError {
    debug!(stage, error = %err, "decryption failed");
    CredentialError::DecryptionFailed
}
