//! Core library components.
//!
//! Network resolution, the encrypted key store, and script dispatch, wired
//! together by [`launcher::Launcher`].

pub mod cipher;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod env_file;
pub mod keystore;
pub mod launcher;
pub mod network;
pub mod prompt;
pub mod validation;
