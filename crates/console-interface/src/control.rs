/// Client-to-server control frames. `KeepAlive` is sent on an interval while
/// the subscription is idle; `CloseStream` is the farewell sent on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum ControlMessage {
    KeepAlive,
    CloseStream,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_messages_tag_by_variant_name() {
        assert_eq!(
            serde_json::to_string(&ControlMessage::KeepAlive).unwrap(),
            r#"{"type":"KeepAlive"}"#
        );
        assert_eq!(
            serde_json::to_string(&ControlMessage::CloseStream).unwrap(),
            r#"{"type":"CloseStream"}"#
        );
    }
}
