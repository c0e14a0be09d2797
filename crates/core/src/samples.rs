//! Representative deliveries for each announced event kind, shaped the way
//! the property platform sends them.

use serde_json::{Value, json};

use crate::kind::EventKind;

/// A sample delivery wrapped under `body`, as sent by the platform.
pub fn sample_event(kind: EventKind) -> Value {
    let (data, triggers) = match kind {
        EventKind::Created => (
            json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "Beachfront Villa",
                "address": "Miami, FL"
            }),
            None,
        ),
        EventKind::Deleted => (json!({ "id": "550e8400-e29b-41d4-a716-446655440000" }), None),
        EventKind::Merged => (
            json!({
                "previous_id": "550e8400-e29b-41d4-a716-446655440001",
                "new_id": "550e8400-e29b-41d4-a716-446655440000"
            }),
            None,
        ),
        EventKind::Changed => (
            json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "Beachfront Villa Updated",
                "address": "Miami, FL"
            }),
            Some(json!(["name"])),
        ),
    };

    let mut body = json!({
        "id": "497f6eca-6276-4993-bfeb-53cbbbba6f08",
        "action": kind.as_str(),
        "data": data,
        "created": "2024-10-08T07:03:34Z",
        "version": "v2"
    });
    if let Some(triggers) = triggers {
        body["triggers"] = triggers;
    }
    json!({ "body": body })
}

/// Samples in the order a smoke test sends them.
pub fn sample_events() -> Vec<(EventKind, Value)> {
    [
        EventKind::Created,
        EventKind::Changed,
        EventKind::Deleted,
        EventKind::Merged,
    ]
    .into_iter()
    .map(|kind| (kind, sample_event(kind)))
    .collect()
}
