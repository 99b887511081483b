//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak the developer's own setup into a test.
const ISOLATED_VARS: &[&str] = &[
    "DEPLOYER_PRIVATE_KEY_ENCRYPTED",
    "__RUNTIME_DEPLOYER_PRIVATE_KEY",
    "LAUNCHER_CONFIG",
    "LAUNCHER_DEFAULT_NETWORK",
    "LAUNCHER_LOG",
];

impl Test {
    /// Create a launcher command running in the test project.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("launcher").expect("failed to find launcher binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run the launcher with `args` and empty stdin.
    pub fn launch(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .write_stdin("")
            .output()
            .expect("failed to run launcher")
    }

    /// Run the launcher with the encrypted key in the environment and
    /// `passphrase` on stdin.
    pub fn launch_with_key(&self, args: &[&str], passphrase: &str) -> Output {
        self.cmd()
            .env("DEPLOYER_PRIVATE_KEY_ENCRYPTED", super::sealed_key())
            .args(args)
            .write_stdin(format!("{}\n", passphrase))
            .output()
            .expect("failed to run launcher")
    }

    /// Shortcut for `launcher --import`, answering the prompts from stdin.
    pub fn import(&self, key: &str, passphrase: &str, force: bool) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("--import");
        if force {
            cmd.arg("--force");
        }
        cmd.write_stdin(format!("{}\n{}\n", key, passphrase))
            .output()
            .expect("failed to run launcher --import")
    }
}
