use std::fmt;

/// The property lifecycle events the relay knows how to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    Deleted,
    Merged,
    Changed,
}

impl EventKind {
    /// Every known kind, in announcement order.
    pub const ALL: [Self; 4] = [Self::Created, Self::Deleted, Self::Merged, Self::Changed];

    /// Look up the kind for an action string. Unknown actions return `None`.
    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == action)
    }

    /// The wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "property.created",
            Self::Deleted => "property.deleted",
            Self::Merged => "property.merged",
            Self::Changed => "property.changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
