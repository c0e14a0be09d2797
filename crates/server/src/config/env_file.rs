use std::collections::HashMap;
use std::path::Path;

use crate::error::ServerError;

/// Variables loaded from a `key=value` env file.
///
/// The values are kept in this map and never exported into the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Parse env-file contents.
    ///
    /// Lines starting with `#` and lines without `=` are skipped. Each
    /// remaining line is split on its first `=`, and key and value are
    /// trimmed. A later assignment of the same key wins.
    pub fn parse(contents: &str) -> Self {
        let vars = contents
            .lines()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self { vars }
    }

    /// Load an env file. A missing file yields an empty set.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Self::parse(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ServerError::Config(format!(
                "failed to read env file {}: {e}",
                path.display()
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Resolve a secret: the env file wins over the process environment.
    ///
    /// Returns `None` when the variable is absent or blank.
    pub fn resolve(&self, key: &str) -> Option<String> {
        let value = match self.get(key) {
            Some(value) => value.to_owned(),
            None => std::env::var(key).ok()?,
        };
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }
}
