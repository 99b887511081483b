//! Constants used throughout launcher.
//!
//! Centralizes magic strings and default configuration values.

/// Configuration file name (launcher.toml).
pub const CONFIG_FILE: &str = "launcher.toml";

/// Environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Variable holding the encrypted deployer key.
pub const ENCRYPTED_KEY_VAR: &str = "DEPLOYER_PRIVATE_KEY_ENCRYPTED";

/// Variable set only in the child environment, holding the decrypted key.
pub const RUNTIME_KEY_VAR: &str = "__RUNTIME_DEPLOYER_PRIVATE_KEY";

/// Network used when no `--network` flag is forwarded.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Overrides the configured default network.
pub const DEFAULT_NETWORK_ENV: &str = "LAUNCHER_DEFAULT_NETWORK";

/// Networks that never need a signing key.
pub const LOCAL_NETWORKS: &[&str] = &["localhost", "hardhat"];

/// Scripting runtime and its "run script" subcommand.
pub const RUNTIME_PROGRAM: &str = "hardhat";
pub const RUNTIME_ARGS: &[&str] = &["run"];

/// Highest scrypt work factor (log2 N) accepted when sealing or opening.
///
/// age's scrypt recipient uses r = 8, so this caps key derivation at 4 GiB.
pub const MAX_WORK_FACTOR: u8 = 22;

/// Network selector flag scanned in the forwarded arguments.
pub const NETWORK_FLAG: &str = "--network";

/// Exit code for every failure that happens before or instead of a dispatch.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Prompt shown before reading the passphrase.
pub const PASSPHRASE_PROMPT: &str = "Enter password to decrypt private key";

/// Filter variable for tracing output.
pub const LOG_ENV: &str = "LAUNCHER_LOG";

/// One-line usage shown on a usage error.
pub const USAGE: &str = "launcher <script> [--network <name>] [args...]";
