use vigil_console_interface::{ConsoleEvent, Message, Vitals};
use vigil_transcript::TranscriptBuffer;

/// Complete snapshot of console state at a point in time.
///
/// This is the rendering contract: everything a view layer needs to draw one
/// frame, whether that is the transcript panel, the speaking indicator, the
/// spectral data feeding the visualization, or the telemetry side panel.
/// Produced by [`ConsoleState::frame`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct ConsoleFrame {
    pub messages: Vec<Message>,
    pub speaking: bool,
    pub spectral: Vec<f32>,
    pub vitals: Vitals,
}

/// Live view of the remote agent, folded from channel events.
///
/// Owned by exactly one consuming view at a time and mutated only from its
/// thread of control. Apart from the message append, every operation
/// replaces its slice of state wholesale; nothing here reads a previous
/// speaking flag or spectral frame, so application is idempotent per event.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    transcript: TranscriptBuffer,
    speaking: bool,
    spectral: Vec<f32>,
    vitals: Vitals,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose transcript retains the last `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Result<Self, vigil_transcript::Error> {
        Ok(Self {
            transcript: TranscriptBuffer::new(capacity)?,
            ..Self::default()
        })
    }

    /// Fold one inbound event into the store. The single demux point for
    /// the channel: every event kind maps to exactly one operation below.
    pub fn apply(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::InitState { messages, speaking } => {
                self.apply_init_state(messages, speaking)
            }
            ConsoleEvent::StatusChange { speaking } => self.apply_status_change(speaking),
            ConsoleEvent::NewMessage { message } => self.apply_new_message(message),
            ConsoleEvent::SpectralFrame { magnitudes } => self.apply_spectral_frame(magnitudes),
            ConsoleEvent::VitalsUpdate { vitals } => self.apply_vitals(vitals),
        }
    }

    /// Full-state hydration from the channel's initial snapshot. Replaces
    /// the transcript (bounded by its capacity) and the speaking flag.
    pub fn apply_init_state(&mut self, messages: Vec<Message>, speaking: bool) {
        self.transcript.hydrate(messages);
        self.speaking = speaking;
    }

    pub fn apply_status_change(&mut self, speaking: bool) {
        self.speaking = speaking;
    }

    pub fn apply_new_message(&mut self, message: Message) {
        self.transcript.push(message);
    }

    pub fn apply_spectral_frame(&mut self, magnitudes: Vec<f32>) {
        self.spectral = magnitudes;
    }

    pub fn apply_vitals(&mut self, vitals: Vitals) {
        self.vitals = vitals;
    }

    /// Returns the complete snapshot needed to render the current console.
    pub fn frame(&self) -> ConsoleFrame {
        ConsoleFrame {
            messages: self.transcript.to_vec(),
            speaking: self.speaking,
            spectral: self.spectral.clone(),
            vitals: self.vitals.clone(),
        }
    }

    pub fn transcript(&self) -> &TranscriptBuffer {
        &self.transcript
    }

    pub fn speaking(&self) -> bool {
        self.speaking
    }

    pub fn spectral(&self) -> &[f32] {
        &self.spectral
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_console_interface::Role;

    fn message(id: &str, role: Role, text: &str) -> Message {
        Message {
            id: id.to_string(),
            role,
            text: text.to_string(),
            timestamp: "14:03:22".to_string(),
        }
    }

    fn init_event(count: usize, speaking: bool) -> ConsoleEvent {
        ConsoleEvent::InitState {
            messages: (0..count)
                .map(|n| message(&format!("m-{n}"), Role::User, &format!("msg {n}")))
                .collect(),
            speaking,
        }
    }

    #[test]
    fn starts_empty_and_silent() {
        let state = ConsoleState::new();
        let frame = state.frame();

        assert!(frame.messages.is_empty());
        assert!(!frame.speaking);
        assert!(frame.spectral.is_empty());
        assert!(frame.vitals.is_empty());
    }

    #[test]
    fn init_state_hydrates_transcript_and_flag() {
        let mut state = ConsoleState::new();
        state.apply(init_event(3, true));

        let frame = state.frame();
        assert_eq!(frame.messages.len(), 3);
        assert!(frame.speaking);
    }

    #[test]
    fn init_state_respects_transcript_capacity() {
        let mut state = ConsoleState::with_capacity(2).unwrap();
        state.apply(init_event(5, false));

        let ids: Vec<String> = state.frame().messages.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["m-3", "m-4"]);
    }

    #[test]
    fn status_change_replaces_flag_wholesale() {
        let mut state = ConsoleState::new();
        state.apply(ConsoleEvent::StatusChange { speaking: true });
        assert!(state.speaking());
        state.apply(ConsoleEvent::StatusChange { speaking: false });
        assert!(!state.speaking());
    }

    #[test]
    fn spectral_frame_replaces_not_merges() {
        let mut state = ConsoleState::new();
        state.apply(ConsoleEvent::SpectralFrame {
            magnitudes: vec![0.1, 0.2, 0.3],
        });
        state.apply(ConsoleEvent::SpectralFrame {
            magnitudes: vec![0.9],
        });

        assert_eq!(state.spectral(), [0.9]);
    }

    #[test]
    fn vitals_replace_not_merge() {
        let mut state = ConsoleState::new();
        state.apply(ConsoleEvent::VitalsUpdate {
            vitals: [("cpu".to_string(), 20.0), ("temp".to_string(), 45.0)]
                .into_iter()
                .collect(),
        });
        state.apply(ConsoleEvent::VitalsUpdate {
            vitals: [("cpu".to_string(), 35.0)].into_iter().collect(),
        });

        assert_eq!(state.vitals().len(), 1);
        assert_eq!(state.vitals().get("cpu"), Some(&35.0));
    }

    #[test]
    fn event_sequence_matches_live_session() {
        // snapshot of three while silent, then a reply, speech, spectral data
        let mut state = ConsoleState::new();
        state.apply(init_event(3, false));
        state.apply(ConsoleEvent::NewMessage {
            message: message("m-new", Role::Agent, "On it."),
        });
        state.apply(ConsoleEvent::StatusChange { speaking: true });
        state.apply(ConsoleEvent::SpectralFrame {
            magnitudes: vec![0.2, 0.8],
        });

        let frame = state.frame();
        assert_eq!(frame.messages.len(), 4);
        assert_eq!(frame.messages.last().unwrap().id, "m-new");
        assert_eq!(
            frame.messages[..3]
                .iter()
                .map(|m| m.id.as_str())
                .collect::<Vec<_>>(),
            ["m-0", "m-1", "m-2"],
            "hydration order must be preserved"
        );
        assert!(frame.speaking);
        assert_eq!(frame.spectral, [0.2, 0.8]);
    }

    #[test]
    fn frame_is_a_snapshot_not_a_view() {
        let mut state = ConsoleState::new();
        state.apply(ConsoleEvent::StatusChange { speaking: true });

        let frame = state.frame();
        state.apply(ConsoleEvent::StatusChange { speaking: false });

        assert!(frame.speaking, "earlier snapshots must not change");
    }
}
