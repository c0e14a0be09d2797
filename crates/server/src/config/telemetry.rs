use serde::Deserialize;

/// Log output configuration.
///
/// # Example
///
/// ```toml
/// [telemetry]
/// filter = "hookrelay_server=debug,info"
/// ```
#[derive(Debug, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_owned()
}
