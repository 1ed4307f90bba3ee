use std::collections::BTreeMap;

use crate::message::Message;

/// Host telemetry readings keyed by metric name (`cpu`, `temp`, …).
/// The console stores and displays these without interpretation.
pub type Vitals = BTreeMap<String, f64>;

/// Everything the agent process can push over the event channel.
///
/// Each text frame on the channel is one of these, tagged by `type`. Apart
/// from `new_message` (an append) every event replaces its slice of console
/// state wholesale, so applying them is idempotent per event and safe under
/// interleaving of *different* kinds; for same-kind reordering the last one
/// applied wins.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum ConsoleEvent {
    /// Full-state snapshot, sent once when the channel comes up. Either
    /// field may be absent on the wire.
    #[serde(rename = "init_state")]
    InitState {
        #[serde(default)]
        messages: Vec<Message>,
        #[serde(default)]
        speaking: bool,
    },
    #[serde(rename = "status_change")]
    StatusChange { speaking: bool },
    #[serde(rename = "new_message")]
    NewMessage { message: Message },
    /// One sample of audio-derived magnitudes from the agent's vocalizer.
    #[serde(rename = "frequency_data")]
    SpectralFrame { magnitudes: Vec<f32> },
    #[serde(rename = "vitals_update")]
    VitalsUpdate { vitals: Vitals },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn events_parse_by_tag() {
        let event: ConsoleEvent = serde_json::from_str(
            r#"{"type": "status_change", "speaking": true}"#,
        )
        .unwrap();
        assert!(matches!(event, ConsoleEvent::StatusChange { speaking: true }));

        let event: ConsoleEvent = serde_json::from_str(
            r#"{"type": "frequency_data", "magnitudes": [0.2, 0.8]}"#,
        )
        .unwrap();
        match event {
            ConsoleEvent::SpectralFrame { magnitudes } => {
                assert_eq!(magnitudes, [0.2, 0.8]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn init_state_defaults_missing_fields() {
        let event: ConsoleEvent = serde_json::from_str(r#"{"type": "init_state"}"#).unwrap();
        match event {
            ConsoleEvent::InitState { messages, speaking } => {
                assert!(messages.is_empty());
                assert!(!speaking);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn new_message_carries_message() {
        let event: ConsoleEvent = serde_json::from_str(
            r#"{
                "type": "new_message",
                "message": {"role": "agent", "text": "Done.", "timestamp": "09:12:45"}
            }"#,
        )
        .unwrap();
        match event {
            ConsoleEvent::NewMessage { message } => {
                assert_eq!(message.role, Role::Agent);
                assert!(!message.id.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let result = serde_json::from_str::<ConsoleEvent>(r#"{"type": "vitals_snapshot"}"#);
        assert!(result.is_err());
    }
}
