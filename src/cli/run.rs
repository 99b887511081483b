//! Run command.
//!
//! Runs a script through the configured runtime, unlocking the deployer key
//! first when the target network is not local.

use crate::cli::prompt::TerminalPrompt;
use crate::core::config::Config;
use crate::core::dispatch::ProcessDispatcher;
use crate::core::keystore::EnvKeystore;
use crate::core::launcher::Launcher;
use crate::error::Result;

/// Run `command` (script path followed by forwarded arguments).
///
/// Returns the exit code this process should exit with.
pub fn execute(config: &Config, command: &[String]) -> Result<i32> {
    let (script, args) = match command.split_first() {
        Some((script, args)) => (Some(script.as_str()), args),
        None => (None, command),
    };

    let launcher = Launcher::new(
        config.resolver(),
        EnvKeystore::from_config(&config.credential),
        TerminalPrompt,
        ProcessDispatcher::from_config(config),
    );

    launcher.launch(script, args)
}
