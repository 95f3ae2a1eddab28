//! Assembly of the host directives surrounding a compiled sequence.
//!
//! Everything here is plain text production; the host consumes the
//! returned strings as commands.

use crate::error::TabError;
use crate::sequence::sequence_builder::{
    compile_fingerpicking, compile_percussion, FingerpickingParams, PercussionParams,
};

/// Instrument names as used by Zoom percussion devices.
pub const ZOOM_NAMES: [&str; 16] = [
    "Kick",       "Snare",    "ClosedHat",  "OpenHat",
    "Crash",      "Ride",     "Tom1",       "Tom2",
    "Tom3",       "Stick",    "Bell",       "Maracas",
    "Tambourine", "LowConga", "MutHiConga", "OpenHiConga",
];

/// Corresponding percussion tones.
pub const ZOOM_TONES: [&str; 16] = [
    "KickDrum1",    "SnareDrum1",  "ClosedHiHat",   "OpenHiHat",
    "CrashCymbal1", "RideCymbal1", "MidTom1",       "LowTom1",
    "HighTom1",     "SideKick",    "RideBell",      "Maracas",
    "Tambourine",   "LowConga",    "MuteHighConga", "OpenHighConga",
];

/// Resolve an instrument token into a track name and a tone.
///
/// Purely numeric tokens `1..=16` index the Zoom tables; anything else
/// is used verbatim for both.
pub fn resolve_instrument(token: &str) -> (String, String) {
    if let Ok(number) = token.parse::<usize>() {
        if (1..=ZOOM_NAMES.len()).contains(&number) {
            return (
                ZOOM_NAMES[number - 1].to_string(),
                ZOOM_TONES[number - 1].to_string(),
            );
        }
        log::warn!("instrument number {number} outside the Zoom table, using it verbatim");
    }
    (token.to_string(), token.to_string())
}

/// Split a groove body into instrument/tab pairs.
///
/// A trailing token without a tab is dropped.
pub fn instrument_pairs(body: &str) -> Vec<(String, String)> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    tokens
        .chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect()
}

/// Groove-level options beyond the compilation parameters.
///
/// The randomizers are opaque pass-throughs; they shape the emitted
/// directives, never the compiled sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GrooveOptions {
    /// `RTime` pass-through, omitted when zero
    pub time_randomization: u32,
    /// `RVolume` pass-through, omitted when zero
    pub volume_randomization: u32,
    /// Issue a leading `SeqClear`
    pub seq_clear: bool,
    /// Issue `SeqSize n`, omitted when zero
    pub seq_size: u32,
}

/// Expand a groove definition into its directive list.
pub fn groove_commands(
    groove: &str,
    pairs: &[(String, String)],
    params: &PercussionParams,
    opts: &GrooveOptions,
) -> Result<Vec<String>, TabError> {
    let mut commands = Vec::new();
    if opts.seq_clear {
        commands.push("SeqClear".to_string());
    }
    if opts.seq_size > 0 {
        commands.push(format!("SeqSize {}", opts.seq_size));
    }
    for (instrument, tab) in pairs {
        let (name, tone) = resolve_instrument(instrument);
        let sequence = compile_percussion(tab, params)?;
        commands.push(format!("Begin Drum-{name}"));
        commands.push(format!("  Tone     {tone}"));
        if opts.time_randomization > 0 {
            commands.push(format!("  RTime    {}", opts.time_randomization));
        }
        if opts.volume_randomization > 0 {
            commands.push(format!("  RVolume  {}", opts.volume_randomization));
        }
        commands.push(format!("  Sequence {sequence}"));
        commands.push("End".to_string());
    }
    commands.push(format!("DefGroove {groove}"));
    Ok(commands)
}

/// Track-level percussion sequence command.
///
/// Inside a `Begin Drum-…` block the track prefix must be elided; the
/// caller states that context explicitly.
pub fn track_sequence_command(
    track: &str,
    tab: &str,
    params: &PercussionParams,
    in_begin_block: bool,
) -> Result<String, TabError> {
    let sequence = compile_percussion(tab, params)?;
    Ok(if in_begin_block {
        format!("Sequence {sequence}")
    } else {
        format!("{track} Sequence {sequence}")
    })
}

/// Expand a fingerpicking pattern into its define-and-call directives.
///
/// The pattern is defined, then wrapped in a call that plays it and
/// expands an optional chord argument, and finally bound so the pattern
/// name invokes the call.
pub fn picking_commands(
    track: &str,
    pattern: &str,
    rows: &[String],
    params: &FingerpickingParams,
    in_begin_block: bool,
) -> Result<Vec<String>, TabError> {
    let body = compile_fingerpicking(rows, params)?;
    let define = format!("Define {pattern} {body}");
    let mut commands = vec![if in_begin_block {
        define
    } else {
        format!("{track} {define}")
    }];
    let name = pattern.to_uppercase();
    commands.push(format!("DefCall {name} Chords=__OMITTED__"));
    commands.push(format!("{track} Sequence {name}"));
    commands.push(" If Ne $$Chords __OMITTED__".to_string());
    commands.push("  $Chords".to_string());
    commands.push(" EndIf".to_string());
    commands.push("EndDefCall".to_string());
    commands.push(format!("Set {name} Call {name}"));
    Ok(commands)
}

/// Default voice and volume directives for a picking track.
pub fn picking_setup(
    track: &str,
    voice: &str,
    time_randomization: Option<&str>,
    volume_randomization: Option<&str>,
) -> Vec<String> {
    let mut commands = vec![
        format!("{track} Voice {voice}"),
        format!("{track} Volume 100"),
    ];
    if let Some(rtime) = time_randomization {
        commands.push(format!("{track} RTime {rtime}"));
    }
    if let Some(rvolume) = volume_randomization {
        commands.push(format!("{track} RVolume {rvolume}"));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_instrument() {
        assert_eq!(
            resolve_instrument("1"),
            ("Kick".to_string(), "KickDrum1".to_string())
        );
        assert_eq!(
            resolve_instrument("16"),
            ("OpenHiConga".to_string(), "OpenHighConga".to_string())
        );
        assert_eq!(
            resolve_instrument("Cowbell"),
            ("Cowbell".to_string(), "Cowbell".to_string())
        );
        // out of table, used verbatim
        assert_eq!(
            resolve_instrument("17"),
            ("17".to_string(), "17".to_string())
        );
    }

    #[test]
    fn test_instrument_pairs_drops_trailing_token() {
        let pairs = instrument_pairs("Kick |9-9-| Snare |--9-| Ride");
        assert_eq!(
            pairs,
            vec![
                ("Kick".to_string(), "|9-9-|".to_string()),
                ("Snare".to_string(), "|--9-|".to_string()),
            ]
        );
    }

    #[test]
    fn test_groove_commands() {
        let pairs = instrument_pairs("1 |9---| Snare |--9-|");
        let opts = GrooveOptions {
            time_randomization: 5,
            seq_clear: true,
            seq_size: 2,
            ..GrooveOptions::default()
        };
        let commands =
            groove_commands("Pop", &pairs, &PercussionParams::default(), &opts).unwrap();
        assert_eq!(
            commands,
            vec![
                "SeqClear",
                "SeqSize 2",
                "Begin Drum-Kick",
                "  Tone     KickDrum1",
                "  RTime    5",
                "  Sequence { 1 0 90 }",
                "End",
                "Begin Drum-Snare",
                "  Tone     Snare",
                "  RTime    5",
                "  Sequence { 3 0 90 }",
                "End",
                "DefGroove Pop",
            ]
        );
    }

    #[test]
    fn test_track_sequence_command() {
        let params = PercussionParams::default();
        let inside = track_sequence_command("Drum-Kick", "|9---|", &params, true).unwrap();
        assert_eq!(inside, "Sequence { 1 0 90 }");
        let outside = track_sequence_command("Drum-Kick", "|9---|", &params, false).unwrap();
        assert_eq!(outside, "Drum-Kick Sequence { 1 0 90 }");
    }

    #[test]
    fn test_picking_commands() {
        let rows = vec!["|9---|".to_string()];
        let commands = picking_commands(
            "Plectrum",
            "Folky",
            &rows,
            &FingerpickingParams::default(),
            false,
        )
        .unwrap();
        assert_eq!(
            commands,
            vec![
                "Plectrum Define Folky 1 0 1:90",
                "DefCall FOLKY Chords=__OMITTED__",
                "Plectrum Sequence FOLKY",
                " If Ne $$Chords __OMITTED__",
                "  $Chords",
                " EndIf",
                "EndDefCall",
                "Set FOLKY Call FOLKY",
            ]
        );
    }

    #[test]
    fn test_picking_setup() {
        let commands = picking_setup("Plectrum", "NylonGuitar", Some("4"), None);
        assert_eq!(
            commands,
            vec![
                "Plectrum Voice NylonGuitar",
                "Plectrum Volume 100",
                "Plectrum RTime 4",
            ]
        );
    }
}
