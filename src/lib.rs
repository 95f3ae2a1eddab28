//! Tabseq - ASCII tablature to accompaniment sequence compiler
//!
//! This library provides:
//! - Parsing of bar-oriented ASCII tabs in two dialects: single-row
//!   percussion tabs and per-string fingerpicking tabs
//! - Compilation into normalized sequences of timed
//!   (onset, channel, velocity) events rendered as a command string
//! - Assembly of the companion directives a host accompaniment program
//!   consumes around the sequence
//!
//! # Example
//!
//! ```
//! use tabseq::{compile_percussion, PercussionParams};
//!
//! let seq = compile_percussion("|9-9-6-9-|9-6-9--9|", &PercussionParams::default()).unwrap();
//! assert_eq!(
//!     seq,
//!     "{ 1 0 90; 2 0 90; 3 0 60; 4 0 90 } { 1 0 90; 2 0 60; 3 0 90; 4.5 0 90 }"
//! );
//! ```

pub mod command;
pub mod dialect;
pub mod error;
pub mod parser;
pub mod sequence;

// Re-export main types for convenience
pub use dialect::{Dialect, VelocityScale, FINGERPICKING, PERCUSSION};
pub use error::TabError;
pub use parser::tab_parser::{fingerpicking_grid, percussion_grid, Bar, BarKind, Grid};
pub use parser::tab_tokenizer::{flatten_macro, MacroRow, MacroValue};
pub use sequence::{
    sequence_builder::{
        compile_fingerpicking, compile_fingerpicking_macro, compile_percussion,
        FingerpickingParams, PercussionParams, SequenceBuilder, REPEAT_MARKER, SILENT_MARKER,
        WILDCARD_MARKER,
    },
    sequence_event::SequenceEvent,
    timing::{OnsetFormat, StepClock},
    FIRST_BEAT, QUARTER_DIVISION,
};
