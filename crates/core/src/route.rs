use crate::kind::EventKind;

/// Channel that receives every announcement without an override.
pub const DEFAULT_CHANNEL: &str = "C03RV3V94AY";

/// Channel that receives `property.changed` announcements.
pub const DEFAULT_CHANGED_CHANNEL: &str = "C08R24HBK7F";

/// Picks the destination channel for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRouter {
    default_channel: String,
    changed_channel: String,
}

impl Default for ChannelRouter {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL, DEFAULT_CHANGED_CHANNEL)
    }
}

impl ChannelRouter {
    pub fn new(default_channel: impl Into<String>, changed_channel: impl Into<String>) -> Self {
        Self {
            default_channel: default_channel.into(),
            changed_channel: changed_channel.into(),
        }
    }

    /// Only `property.changed` is overridden; everything else, including
    /// actions the relay does not know, goes to the default channel.
    pub fn route(&self, action: &str) -> &str {
        match EventKind::from_action(action) {
            Some(EventKind::Changed) => &self.changed_channel,
            _ => &self.default_channel,
        }
    }

    pub fn default_channel(&self) -> &str {
        &self.default_channel
    }

    pub fn changed_channel(&self) -> &str {
        &self.changed_channel
    }
}
