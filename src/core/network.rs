//! Network resolution.
//!
//! Picks the target network out of the arguments forwarded to the script and
//! decides whether it is a throwaway local chain or a real network that
//! needs the deployer key.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::core::constants::NETWORK_FLAG;

/// Whether a network needs a real signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// Ephemeral or locally hosted chain; no key needed.
    Local,
    /// Anything else. Unknown names land here.
    Remote,
}

/// A resolved network name and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    name: String,
    kind: NetworkKind,
}

impl Network {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn is_local(&self) -> bool {
        self.kind == NetworkKind::Local
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Value of the first `--network <name>` or `--network=<name>` in `args`.
///
/// A trailing `--network` with no value, or an empty value, counts as absent.
pub fn network_arg(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == NETWORK_FLAG {
            return iter.next().map(String::as_str).filter(|v| !v.is_empty());
        }
        if let Some(value) = arg
            .strip_prefix(NETWORK_FLAG)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return Some(value).filter(|v| !v.is_empty());
        }
    }
    None
}

/// Network name selected by `args`, falling back to `default`.
pub fn resolve<'a>(args: &'a [String], default: &'a str) -> &'a str {
    network_arg(args).unwrap_or(default)
}

/// Resolves and classifies networks against a fixed local set.
#[derive(Debug, Clone)]
pub struct NetworkResolver {
    default: String,
    local: BTreeSet<String>,
}

impl NetworkResolver {
    pub fn new<I, S>(default: &str, local: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            default: default.to_string(),
            local: local.into_iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    /// Classify a network name. Matching is exact.
    pub fn classify(&self, name: &str) -> NetworkKind {
        if self.local.contains(name) {
            NetworkKind::Local
        } else {
            NetworkKind::Remote
        }
    }

    /// Resolve the target network from forwarded script arguments.
    pub fn resolve(&self, args: &[String]) -> Network {
        let name = resolve(args, &self.default).to_string();
        let kind = self.classify(&name);
        debug!(network = %name, ?kind, "network resolved");
        Network { name, kind }
    }
}
