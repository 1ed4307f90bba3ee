#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One conversation entry as it appears on the wire and in the transcript.
///
/// Immutable once constructed. `timestamp` is a display label formatted by
/// the producer (e.g. `14:03:22`); the console never parses it. The producer
/// may omit `id`, in which case deserialization assigns a fresh UUID so every
/// stored message carries an opaque unique id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Message {
    #[serde(default = "generate_message_id")]
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: String,
}

fn generate_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
