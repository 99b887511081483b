//! Invocation flow.
//!
//! ```text
//! start -> resolve network -+-> local  -----------------------> dispatch -> done
//!                           +-> remote -> load key -> unlock -> dispatch -> done
//! ```
//!
//! Every failure ends the invocation: a missing script, a remote network
//! with no key configured, or a failed decryption. Nothing is retried.

use tracing::{debug, info};

use crate::core::constants::PASSPHRASE_PROMPT;
use crate::core::dispatch::{DispatchRequest, Dispatcher};
use crate::core::keystore::{DecryptedSecret, SecretStore};
use crate::core::network::{NetworkKind, NetworkResolver};
use crate::core::prompt::Prompt;
use crate::error::{CredentialError, Error, Result};

/// Ties the resolver, key store, prompt and dispatcher together.
pub struct Launcher<S, P, D> {
    resolver: NetworkResolver,
    store: S,
    prompt: P,
    dispatcher: D,
}

impl<S, P, D> Launcher<S, P, D>
where
    S: SecretStore,
    P: Prompt,
    D: Dispatcher,
{
    pub fn new(resolver: NetworkResolver, store: S, prompt: P, dispatcher: D) -> Self {
        Self {
            resolver,
            store,
            prompt,
            dispatcher,
        }
    }

    /// Run `script` with `args` and return the exit code to use.
    ///
    /// # Errors
    ///
    /// - `Error::Usage` if no script is given
    /// - `DispatchError::ScriptNotFound` if the script does not exist
    /// - `CredentialError::NotConfigured` for a remote network without a key
    /// - `CredentialError::DecryptionFailed` for a wrong passphrase
    /// - `DispatchError` if the child cannot be started
    pub fn launch(&self, script: Option<&str>, args: &[String]) -> Result<i32> {
        let script = script.filter(|s| !s.is_empty()).ok_or(Error::Usage)?;

        let network = self.resolver.resolve(args);
        let request = DispatchRequest::new(script, network.name(), args.to_vec())?;

        let secret = match network.kind() {
            NetworkKind::Local => {
                debug!(network = %network, "local network, no key needed");
                None
            }
            NetworkKind::Remote => Some(self.unlock()?),
        };

        self.dispatcher.run(&request, secret)
    }

    fn unlock(&self) -> Result<DecryptedSecret> {
        let credential = self.store.load()?.ok_or_else(|| CredentialError::NotConfigured {
            var: self.store.location().to_string(),
        })?;

        let passphrase = self.prompt.ask(PASSPHRASE_PROMPT)?;
        let secret = self.store.decrypt(&credential, &passphrase)?;
        info!("deployer key unlocked");

        Ok(secret)
    }
}
