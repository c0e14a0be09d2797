use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::{UNKNOWN, UNNAMED, render_field};
use crate::kind::EventKind;

/// Default base for property overview links.
pub const DEFAULT_PROPERTY_URL_BASE: &str = "https://my.hospitable.com/properties/property";

/// Default alert line posted ahead of a `property.created` announcement.
pub const DEFAULT_CREATED_ALERT: &str = "<!subteam^S07MKA258KW> A property just got added to \
     Hospitable. Please ensure it was supposed to be added.";

// ─── Block Kit ───────────────────────────────────────────────────────

/// Text element inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    /// Slack `mrkdwn` markup.
    Mrkdwn { text: String },
}

/// A single layout block in the destination message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
}

impl Block {
    /// A section block holding `mrkdwn` text.
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::Mrkdwn { text: text.into() },
        }
    }

    /// The markup text carried by this block.
    pub fn text(&self) -> &str {
        match self {
            Self::Section {
                text: TextObject::Mrkdwn { text },
            } => text,
        }
    }
}

/// Ordered blocks making up one outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBlocks(Vec<Block>);

impl MessageBlocks {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode the block array as a JSON string, as required by form-encoded
    /// Slack API calls.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Tunable text used while rendering announcements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSettings {
    /// Base URL for property links; `/{id}/overview` is appended.
    pub property_url_base: String,

    /// Alert/mention line that opens a `property.created` announcement.
    pub created_alert: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            property_url_base: DEFAULT_PROPERTY_URL_BASE.to_owned(),
            created_alert: DEFAULT_CREATED_ALERT.to_owned(),
        }
    }
}

/// Renders property events into message blocks.
///
/// Field values are interpolated verbatim. Markup in a remote-supplied name or
/// identifier is passed through to the destination unchanged.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    settings: MessageSettings,
}

impl MessageBuilder {
    pub fn new(settings: MessageSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MessageSettings {
        &self.settings
    }

    /// Build the message for `action`, or `None` when the action is not one
    /// the relay announces.
    pub fn build(&self, action: &str, data: &Map<String, Value>) -> Option<MessageBlocks> {
        EventKind::from_action(action).map(|kind| self.render(kind, data))
    }

    /// Render a known event kind.
    pub fn render(&self, kind: EventKind, data: &Map<String, Value>) -> MessageBlocks {
        let blocks = match kind {
            EventKind::Created => {
                let id = render_field(data, "id", UNKNOWN);
                let name = render_field(data, "name", UNNAMED);
                let url = self.property_url(&id);
                vec![
                    Block::section(self.settings.created_alert.clone()),
                    Block::section(format!("*Property:* <{url}|{name}>\n*ID:* {id}")),
                ]
            }
            EventKind::Deleted => {
                let id = render_field(data, "id", UNKNOWN);
                vec![Block::section(format!("🗑️ Property Deleted\nID: {id}"))]
            }
            EventKind::Merged => {
                let previous = render_field(data, "previous_id", UNKNOWN);
                let new = render_field(data, "new_id", UNKNOWN);
                vec![Block::section(format!(
                    "🔗 Property Merged\nOld ID: {previous}\nNew ID: {new}"
                ))]
            }
            EventKind::Changed => {
                let id = render_field(data, "id", UNKNOWN);
                let name = render_field(data, "name", UNNAMED);
                vec![Block::section(format!(
                    "📝 Property Updated\nID: {id}\nName: {name}"
                ))]
            }
        };
        MessageBlocks::new(blocks)
    }

    /// Overview link for a property.
    pub fn property_url(&self, id: &str) -> String {
        let base = self.settings.property_url_base.trim_end_matches('/');
        format!("{base}/{id}/overview")
    }
}
