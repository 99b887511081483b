//! age scrypt recipient, stored as single-line base64.

use std::io::{Read, Write};

use ::age::secrecy::SecretString;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::trace;
use zeroize::Zeroizing;

use super::failed;
use crate::core::constants::MAX_WORK_FACTOR;
use crate::core::keystore::{DecryptedSecret, EncryptedCredential};
use crate::error::{CredentialError, Result};

const ARMOR_BEGIN: &str = "-----BEGIN AGE ENCRYPTED FILE-----";

/// Encrypt `plaintext` under `passphrase`.
///
/// `work_factor` is the scrypt log2(N); `None` lets age pick a value that
/// takes about a second on this machine.
///
/// # Errors
///
/// Returns `CredentialError::EncryptionFailed` if age rejects the input.
pub fn seal(
    plaintext: &str,
    passphrase: &str,
    work_factor: Option<u8>,
) -> Result<EncryptedCredential> {
    trace!(plaintext_len = plaintext.len(), ?work_factor, "sealing");

    let mut recipient = age::scrypt::Recipient::new(SecretString::from(passphrase.to_owned()));
    if let Some(log_n) = work_factor {
        recipient.set_work_factor(log_n);
    }

    let encryptor =
        age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
            .map_err(|e| CredentialError::EncryptionFailed(format!("{}", e)))?;

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| CredentialError::EncryptionFailed(format!("{}", e)))?;
    writer.write_all(plaintext.as_bytes())?;
    writer
        .finish()
        .map_err(|e| CredentialError::EncryptionFailed(format!("{}", e)))?;

    trace!(ciphertext_len = encrypted.len(), "sealed");

    Ok(EncryptedCredential::new(STANDARD.encode(&encrypted)))
}

/// Open an age credential. `blob` is already trimmed.
pub(super) fn open(blob: &str, passphrase: &str) -> Result<DecryptedSecret> {
    trace!(blob_len = blob.len(), "opening");

    let bytes = if blob.starts_with(ARMOR_BEGIN) {
        blob.as_bytes().to_vec()
    } else {
        STANDARD.decode(blob).map_err(|e| failed("base64", e))?
    };

    let reader = age::armor::ArmoredReader::new(bytes.as_slice());
    let decryptor = age::Decryptor::new(reader).map_err(|e| failed("header", e))?;

    // The default ceiling is calibrated to this machine, which would reject
    // keys sealed on a faster one.
    let mut identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_owned()));
    identity.set_max_work_factor(MAX_WORK_FACTOR);

    let mut reader = decryptor
        .decrypt(std::iter::once(&identity as &dyn age::Identity))
        .map_err(|e| failed("unwrap", e))?;

    let mut decrypted = Zeroizing::new(Vec::new());
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| failed("payload", e))?;

    let plaintext = std::str::from_utf8(&decrypted).map_err(|e| failed("utf-8", e))?;

    trace!(plaintext_len = plaintext.len(), "opened");

    Ok(DecryptedSecret::new(Zeroizing::new(plaintext.to_owned())))
}
