//! Script dispatch.
//!
//! Spawns the scripting runtime on a script with inherited stdio, waits for
//! it, and reports its exit code. The decrypted key, if any, is placed only
//! in the child's own environment; the launcher's environment is never
//! modified.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::core::constants::FAILURE_EXIT_CODE;
use crate::core::keystore::DecryptedSecret;
use crate::error::{DispatchError, Error, Result};

/// One invocation's script, network and forwarded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    script: String,
    network: String,
    args: Vec<String>,
}

impl DispatchRequest {
    /// Build a request for an existing script.
    ///
    /// # Errors
    ///
    /// Returns `Error::Usage` for an empty path and
    /// `DispatchError::ScriptNotFound` if nothing exists at it.
    pub fn new(script: &str, network: &str, args: Vec<String>) -> Result<Self> {
        if script.is_empty() {
            return Err(Error::Usage);
        }
        if !Path::new(script).exists() {
            return Err(DispatchError::ScriptNotFound(script.to_string()).into());
        }

        Ok(Self {
            script: script.to_string(),
            network: network.to_string(),
            args,
        })
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Arguments forwarded verbatim, `--network` included.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Environment for exactly one child process.
///
/// A copy of a base environment, minus any stale runtime key, plus the
/// decrypted key when one is given. The key buffer is wiped on drop.
pub struct ChildEnv {
    vars: BTreeMap<OsString, OsString>,
    secret: Option<(OsString, Zeroizing<String>)>,
}

impl ChildEnv {
    /// Copy of the current process environment.
    pub fn inherit(runtime_var: &str) -> Self {
        Self::from_vars(std::env::vars_os(), runtime_var)
    }

    /// Build from explicit variables. `runtime_var` is always dropped from
    /// the copy so only a freshly decrypted key can ever appear under it.
    pub fn from_vars<I, K, V>(vars: I, runtime_var: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut vars: BTreeMap<OsString, OsString> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        vars.remove(OsStr::new(runtime_var));

        Self { vars, secret: None }
    }

    /// Add the decrypted key under `runtime_var`.
    pub fn with_secret(mut self, runtime_var: &str, secret: DecryptedSecret) -> Self {
        self.secret = Some((OsString::from(runtime_var), secret.into_inner()));
        self
    }

    /// Whether a decrypted key is present.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        match &self.secret {
            Some((name, value)) if name == key => Some(OsStr::new(value.as_str())),
            _ => self.vars.get(OsStr::new(key)).map(OsString::as_os_str),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len() + usize::from(self.secret.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace `cmd`'s environment with this one.
    fn apply(&self, cmd: &mut Command) {
        cmd.env_clear().envs(&self.vars);
        if let Some((name, value)) = &self.secret {
            cmd.env(name, value.as_str());
        }
    }
}

impl std::fmt::Debug for ChildEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildEnv")
            .field("vars", &self.vars.len())
            .field("secret", &self.secret.as_ref().map(|(name, _)| name))
            .finish()
    }
}

/// Runs a dispatch request.
pub trait Dispatcher {
    /// Run the script and return the exit code this process should use.
    ///
    /// The secret is consumed; it does not outlive the call.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the child cannot be started. A child that
    /// runs and fails is not an error: its code is returned.
    fn run(&self, request: &DispatchRequest, secret: Option<DecryptedSecret>) -> Result<i32>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn run(&self, request: &DispatchRequest, secret: Option<DecryptedSecret>) -> Result<i32> {
        (**self).run(request, secret)
    }
}

/// Dispatches to a real child process.
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    program: String,
    program_args: Vec<String>,
    runtime_var: String,
}

impl ProcessDispatcher {
    pub fn new(program: &str, program_args: &[String], runtime_var: &str) -> Self {
        Self {
            program: program.to_string(),
            program_args: program_args.to_vec(),
            runtime_var: runtime_var.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.runtime.program,
            &config.runtime.args,
            &config.credential.runtime_var,
        )
    }

    /// Arguments after the program: run subcommand, script, forwarded args.
    pub fn command_args(&self, request: &DispatchRequest) -> Vec<String> {
        self.program_args
            .iter()
            .cloned()
            .chain(std::iter::once(request.script().to_string()))
            .chain(request.args().iter().cloned())
            .collect()
    }

    /// Child environment for one run.
    pub fn child_env(&self, secret: Option<DecryptedSecret>) -> ChildEnv {
        let env = ChildEnv::inherit(&self.runtime_var);
        match secret {
            Some(secret) => env.with_secret(&self.runtime_var, secret),
            None => env,
        }
    }

    fn resolve_program(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            debug!(program = %self.program, error = %e, "runtime lookup failed");
            Error::from(DispatchError::RuntimeNotFound {
                program: self.program.clone(),
            })
        })
    }

    fn command(&self, program: &Path, request: &DispatchRequest) -> Command {
        // .cmd/.bat shims need the shell on Windows.
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(program);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = Command::new(program);

        cmd.args(self.command_args(request));
        cmd
    }
}

impl Dispatcher for ProcessDispatcher {
    fn run(&self, request: &DispatchRequest, secret: Option<DecryptedSecret>) -> Result<i32> {
        let program = self.resolve_program()?;

        let env = self.child_env(secret);
        let mut cmd = self.command(&program, request);
        env.apply(&mut cmd);

        info!(
            program = %program.display(),
            script = %request.script(),
            network = %request.network(),
            with_key = env.has_secret(),
            "dispatching"
        );

        let spawned = cmd.spawn();
        // The child has its own copy now.
        drop(cmd);
        drop(env);

        let mut child = spawned.map_err(|source| DispatchError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let status = child.wait()?;
        let code = exit_code(status);
        debug!(%status, code, "child exited");

        Ok(code)
    }
}

/// Map a child's termination to this process's exit code.
///
/// Normal exit passes the code through. A signal-killed child maps to
/// `128 + signal` on unix; anything else without a code is a plain failure.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    FAILURE_EXIT_CODE
}
