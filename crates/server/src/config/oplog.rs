use serde::Deserialize;

/// Operational error log configuration.
#[derive(Debug, Deserialize)]
pub struct OpLogConfig {
    /// Log file path. Relative paths resolve against the config file's
    /// directory.
    #[serde(default = "default_path")]
    pub path: String,
    /// Writes are skipped once the file reaches this size.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for OpLogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_path() -> String {
    "webhook.log".to_owned()
}

fn default_max_bytes() -> u64 {
    10 * 1024
}
