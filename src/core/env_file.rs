//! Dotenv file support.
//!
//! The encrypted deployer key usually lives in the project's `.env` file.
//! Entries are read on demand and never merged into the process environment.
//! The file is kept line by line, so writing one entry back leaves every
//! other line (comments, blank lines, `export` prefixes, quoting) as it was.

use std::collections::HashSet;
#[cfg(unix)]
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// A `.env` file, kept as its original lines.
#[derive(Debug, Clone)]
pub struct EnvFile {
    lines: Vec<Line>,
    path: PathBuf,
}

/// One line including its line ending, plus the entry it defines, if any.
#[derive(Debug, Clone)]
struct Line {
    raw: String,
    entry: Option<(String, String)>,
}

impl Line {
    fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            entry: parse_entry(raw),
        }
    }

    fn key(&self) -> Option<&str> {
        self.entry.as_ref().map(|(k, _)| k.as_str())
    }

    fn ending(&self) -> &str {
        if self.raw.ends_with("\r\n") {
            "\r\n"
        } else if self.raw.ends_with('\n') {
            "\n"
        } else {
            ""
        }
    }
}

impl EnvFile {
    /// Parse a `.env` file from disk.
    ///
    /// Skips blank lines and `#` comments. Accepts an optional leading
    /// `export `, single or double quoted values, and trailing ` # comments`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let lines: Vec<Line> = contents.split_inclusive('\n').map(Line::parse).collect();

        let env = Self {
            lines,
            path: path.to_path_buf(),
        };
        debug!(path = %path.display(), entries = env.len(), "env file loaded");

        Ok(env)
    }

    /// Load the file if it exists, `None` otherwise.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no env file");
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load the file, or start an empty one bound to `path`.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self::load_optional(path)?.unwrap_or_else(|| Self {
            lines: Vec::new(),
            path: path.to_path_buf(),
        }))
    }

    /// Value for `key`. Later definitions win, like dotenv loaders do.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .rev()
            .filter_map(|line| line.entry.as_ref())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace `key`.
    ///
    /// Rewrites only the line holding the effective definition, keeping its
    /// `export` prefix and line ending. A new key is appended at the end.
    pub fn set(&mut self, key: &str, value: &str) {
        let entry = format_entry(key, value);

        match self.lines.iter_mut().rev().find(|line| line.key() == Some(key)) {
            Some(line) => {
                let export = if line.raw.trim_start().starts_with("export ") {
                    "export "
                } else {
                    ""
                };
                line.raw = format!("{}{}{}", export, entry, line.ending());
                line.entry = Some((key.to_string(), value.to_string()));
            }
            None => {
                if let Some(last) = self.lines.last_mut() {
                    if last.ending().is_empty() {
                        last.raw.push('\n');
                    }
                }
                self.lines.push(Line {
                    raw: format!("{}\n", entry),
                    entry: Some((key.to_string(), value.to_string())),
                });
            }
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.lines
            .iter()
            .filter_map(Line::key)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.entry.is_none())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the file back to disk with owner-only permissions on unix.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let content = self.to_string();

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;

            // mode() only applies on creation
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&self.path, content)?;
        }

        debug!(path = %self.path.display(), entries = self.len(), "env file saved");
        Ok(())
    }
}

impl std::fmt::Display for EnvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            f.write_str(&line.raw)?;
        }
        Ok(())
    }
}

fn parse_entry(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_string(), parse_value(value.trim())))
}

fn format_entry(key: &str, value: &str) -> String {
    if needs_quotes(value) {
        format!("{}=\"{}\"", key, escape_value(value))
    } else {
        format!("{}={}", key, value)
    }
}

/// Parse a value, dropping its quotes and any trailing ` # comment`.
fn parse_value(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('"') {
        if let Some(end) = closing_double_quote(rest) {
            return unescape_double_quoted(&rest[..end]);
        }
    }

    if let Some(rest) = raw.strip_prefix('\'') {
        if let Some(end) = rest.find('\'') {
            return rest[..end].to_string();
        }
    }

    match raw.find(" #") {
        Some(idx) => raw[..idx].trim_end().to_string(),
        None => raw.to_string(),
    }
}

/// Byte offset of the first unescaped `"` in `value`.
fn closing_double_quote(value: &str) -> Option<usize> {
    let mut escaped = false;

    for (idx, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(idx),
            _ => {}
        }
    }

    None
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
