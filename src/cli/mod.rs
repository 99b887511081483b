//! Command-line interface.

pub mod import;
pub mod output;
pub mod prompt;
pub mod run;

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Config;
use crate::error::{Error, Result};

/// Launcher - run deployment scripts with an on-demand deployer key.
#[derive(Parser, Debug)]
#[command(
    name = "launcher",
    about = "Run a deployment script, unlocking the deployer key for remote networks",
    version,
    after_help = "Launcher options go before the script. Everything after the script, \
                  including --network, is passed to it unchanged."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to launcher.toml
    #[arg(long, env = "LAUNCHER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Encrypt a deployer private key into the env file
    #[arg(long, conflicts_with = "command")]
    pub import: bool,

    /// Overwrite an existing encrypted key (with --import)
    #[arg(long, requires = "import")]
    pub force: bool,

    /// Script to run, followed by its arguments
    #[arg(
        value_name = "SCRIPT [ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Execute the parsed command line and return the exit code.
pub fn execute(cli: Cli) -> Result<i32> {
    if !cli.import && cli.command.is_empty() {
        return Err(Error::Usage);
    }

    let config = Config::load(cli.config.as_deref())?;

    if cli.import {
        import::execute(&config, cli.force)?;
        return Ok(0);
    }

    run::execute(&config, &cli.command)
}
