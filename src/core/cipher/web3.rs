//! Web3 Secret Storage (v3 JSON keystore) support.

use std::io::Write;

use eth_keystore::{EthKeystore, KdfparamsType};
use serde_json::Value;
use tracing::trace;
use zeroize::Zeroizing;

use super::failed;
use crate::core::keystore::DecryptedSecret;
use crate::error::Result;

/// True when `blob` looks like a JSON document rather than an age file.
pub(super) fn is_keystore(blob: &str) -> bool {
    blob.starts_with('{')
}

/// Open a JSON keystore. The secret is returned as `0x`-prefixed hex, the
/// form ethers gives for `wallet.privateKey`.
pub(super) fn open(blob: &str, passphrase: &str) -> Result<DecryptedSecret> {
    trace!(blob_len = blob.len(), "opening json keystore");

    let document = normalize(blob).map_err(|e| failed("json", e))?;
    let keystore: EthKeystore =
        serde_json::from_str(&document).map_err(|e| failed("json", e))?;
    check_params(&keystore).map_err(|e| failed("kdfparams", e))?;

    // eth-keystore only decrypts from a path. The file holds the still
    // encrypted document and is removed on drop.
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(document.as_bytes())?;
    file.flush()?;

    let key = Zeroizing::new(
        eth_keystore::decrypt_key(file.path(), passphrase).map_err(|e| failed("keystore", e))?,
    );

    let mut secret = Zeroizing::new(String::with_capacity(2 + key.len() * 2));
    secret.push_str("0x");
    secret.push_str(&Zeroizing::new(hex::encode(key.as_slice())));

    trace!(key_len = key.len(), "opened json keystore");

    Ok(DecryptedSecret::new(secret))
}

/// ethers v6 writes the `crypto` section as `Crypto`; eth-keystore only
/// reads the lowercase key.
fn normalize(blob: &str) -> std::result::Result<String, serde_json::Error> {
    let mut document: Value = serde_json::from_str(blob)?;

    if let Value::Object(map) = &mut document {
        if !map.contains_key("crypto") {
            let alias = map
                .keys()
                .find(|k| k.eq_ignore_ascii_case("crypto"))
                .cloned();
            if let Some(section) = alias.and_then(|k| map.remove(&k)) {
                map.insert("crypto".to_string(), section);
            }
        }
    }

    serde_json::to_string(&document)
}

/// Reject parameters that eth-keystore would panic on instead of erroring.
fn check_params(keystore: &EthKeystore) -> std::result::Result<(), String> {
    let crypto = &keystore.crypto;

    if !crypto.cipher.eq_ignore_ascii_case("aes-128-ctr") {
        return Err(format!("unsupported cipher '{}'", crypto.cipher));
    }
    if crypto.cipherparams.iv.len() != 16 {
        return Err(format!("iv is {} bytes, expected 16", crypto.cipherparams.iv.len()));
    }

    let dklen = match &crypto.kdfparams {
        KdfparamsType::Pbkdf2 { c, dklen, .. } => {
            if *c == 0 {
                return Err("pbkdf2 iteration count is zero".to_string());
            }
            *dklen
        }
        KdfparamsType::Scrypt { dklen, n, .. } => {
            if *n < 2 || !n.is_power_of_two() {
                return Err(format!("scrypt n = {} is not a power of two", n));
            }
            *dklen
        }
    };

    if dklen < 32 {
        return Err(format!("derived key length {} is below 32", dklen));
    }

    Ok(())
}
