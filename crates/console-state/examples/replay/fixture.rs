#[derive(Clone, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Fixture {
    /// A short mission briefing: hydration, replies, speech bursts, vitals.
    Briefing,
    /// An idle channel that only breathes: vitals and sparse status flips.
    Quiet,
}

impl Fixture {
    pub fn json(&self) -> &'static str {
        match self {
            Self::Briefing => include_str!("data/briefing.json"),
            Self::Quiet => include_str!("data/quiet.json"),
        }
    }
}
