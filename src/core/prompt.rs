//! Passphrase prompt contract.
//!
//! The launcher asks for a passphrase through this trait so the interactive
//! terminal prompt can be swapped for a fixed answer in tests.

use zeroize::Zeroizing;

use crate::error::Result;

/// A blocking source of passphrases.
pub trait Prompt {
    /// Ask once and return the answer. Never logged or persisted.
    ///
    /// # Errors
    ///
    /// Returns error if input cannot be read.
    fn ask(&self, prompt: &str) -> Result<Zeroizing<String>>;
}

impl<P: Prompt + ?Sized> Prompt for &P {
    fn ask(&self, prompt: &str) -> Result<Zeroizing<String>> {
        (**self).ask(prompt)
    }
}
