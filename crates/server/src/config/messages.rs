use serde::Deserialize;

use hookrelay_core::MessageSettings;
use hookrelay_core::message::{DEFAULT_CREATED_ALERT, DEFAULT_PROPERTY_URL_BASE};

/// Message text configuration.
#[derive(Debug, Deserialize)]
pub struct MessagesConfig {
    /// Base URL for property overview links.
    #[serde(default = "default_property_url_base")]
    pub property_url_base: String,
    /// Alert/mention line posted first for `property.created`.
    #[serde(default = "default_created_alert")]
    pub created_alert: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            property_url_base: default_property_url_base(),
            created_alert: default_created_alert(),
        }
    }
}

impl MessagesConfig {
    pub fn settings(&self) -> MessageSettings {
        MessageSettings {
            property_url_base: self.property_url_base.clone(),
            created_alert: self.created_alert.clone(),
        }
    }
}

fn default_property_url_base() -> String {
    DEFAULT_PROPERTY_URL_BASE.to_owned()
}

fn default_created_alert() -> String {
    DEFAULT_CREATED_ALERT.to_owned()
}
