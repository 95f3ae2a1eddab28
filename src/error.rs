//! Error types for the tabseq library

/// Library error type for tab compilation.
///
/// Every failure is fatal to the call and carries the offending raw
/// fragment so the host can surface an actionable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    /// Missing or mismatched bar delimiters
    #[error("invalid tab: {0}")]
    MalformedTab(String),

    /// Rows or bars of unequal width
    #[error("incorrect width in tab element: |{content}| {actual} <> {expected}")]
    StepWidthMismatch {
        expected: usize,
        actual: usize,
        content: String,
    },

    /// Step count not an integer multiple of beats per bar
    #[error("step count {step} must be a multiple of beats per bar {beats_per_bar}")]
    StepAlignment { step: usize, beats_per_bar: u32 },

    /// Degenerate timing configuration, the per-step increment is non-positive
    #[error(
        "non-positive step delta: beats_per_bar={beats_per_bar} beat_division={beat_division} step={step}"
    )]
    InvalidDelta {
        beats_per_bar: u32,
        beat_division: u32,
        step: usize,
    },

    /// A cell outside the dialect alphabet
    #[error("invalid note '{found}' at step {step} of |{content}|")]
    InvalidNote {
        found: char,
        step: usize,
        content: String,
    },

    /// Maximum volume level outside 1..9
    #[error("level must be 1 .. 9, not {0}")]
    InvalidLevel(u8),
}
