use crate::error::TabError;
use crate::sequence::sequence_builder::{
    compile_fingerpicking, compile_percussion, FingerpickingParams, PercussionParams,
};

fn init_logger() {
    env_logger::builder()
        .is_test(true)
        .try_init()
        .unwrap_or_default();
}

fn rows(tabs: &[&str]) -> Vec<String> {
    tabs.iter().map(|tab| (*tab).to_string()).collect()
}

#[test]
fn compile_two_bar_groove() {
    init_logger();
    let seq = compile_percussion("|9-9-6-9-|9-6-9--9|", &PercussionParams::default()).unwrap();
    assert_eq!(
        seq,
        "{ 1 0 90; 2 0 90; 3 0 60; 4 0 90 } { 1 0 90; 2 0 60; 3 0 90; 4.5 0 90 }"
    );
}

#[test]
fn quoted_tab_compiles_like_bare() {
    init_logger();
    let params = PercussionParams::default();
    let bare = compile_percussion("|9-9-|", &params).unwrap();
    let quoted = compile_percussion("\"|9-9-|\"", &params).unwrap();
    assert_eq!(bare, quoted);
}

#[test]
fn delimiters_are_mandatory() {
    init_logger();
    let params = PercussionParams::default();
    assert!(compile_percussion("|9-9|", &params).is_ok());
    assert_eq!(
        compile_percussion("9-9|", &params),
        Err(TabError::MalformedTab("9-9|".to_string()))
    );
    assert_eq!(
        compile_percussion("|9-9", &params),
        Err(TabError::MalformedTab("|9-9".to_string()))
    );
}

#[test]
fn repeated_bars_collapse_to_markers() {
    init_logger();
    let seq = compile_percussion("|9-9-|9-9-|9-9-|", &PercussionParams::default()).unwrap();
    assert_eq!(seq, "{ 1 0 90; 3 0 90 } / /");
}

#[test]
fn empty_first_bar_is_silent() {
    init_logger();
    let seq = compile_percussion("||9-9-|", &PercussionParams::default()).unwrap();
    assert_eq!(seq, "Z { 1 0 90; 3 0 90 }");
}

#[test]
fn empty_later_bar_repeats() {
    init_logger();
    let seq = compile_percussion("|9-9-||", &PercussionParams::default()).unwrap();
    assert_eq!(seq, "{ 1 0 90; 3 0 90 } /");
}

#[test]
fn levels_rescale_to_ninety() {
    init_logger();
    let narrow = PercussionParams {
        max_level: 3,
        ..PercussionParams::default()
    };
    let seq = compile_percussion("|3-1-|", &narrow).unwrap();
    assert_eq!(seq, "{ 1 0 90; 3 0 30 }");
}

#[test]
fn level_out_of_range_is_rejected() {
    init_logger();
    let params = PercussionParams {
        max_level: 10,
        ..PercussionParams::default()
    };
    assert_eq!(
        compile_percussion("|9-9-|", &params),
        Err(TabError::InvalidLevel(10))
    );
}

#[test]
fn wildcard_bar_passes_through() {
    init_logger();
    let params = PercussionParams::default();
    assert_eq!(compile_percussion("|*|", &params).unwrap(), "*");
    let seq = compile_percussion("|9-9-|*|9-9-|", &params).unwrap();
    assert_eq!(seq, "{ 1 0 90; 3 0 90 } * /");
}

#[test]
fn foreign_characters_are_named() {
    init_logger();
    assert_eq!(
        compile_percussion("|9-a-|", &PercussionParams::default()),
        Err(TabError::InvalidNote {
            found: 'a',
            step: 2,
            content: "9-a-".to_string(),
        })
    );
    // the wildcard is only a bar on its own, not a cell
    assert!(matches!(
        compile_percussion("|9*9-|", &PercussionParams::default()),
        Err(TabError::InvalidNote { found: '*', .. })
    ));
}

#[test]
fn mismatched_bar_widths_are_rejected() {
    init_logger();
    assert_eq!(
        compile_percussion("|9-9-|9-9|", &PercussionParams::default()),
        Err(TabError::StepWidthMismatch {
            expected: 4,
            actual: 3,
            content: "9-9".to_string(),
        })
    );
}

#[test]
fn degenerate_timing_is_rejected() {
    init_logger();
    let params = PercussionParams {
        beats_per_bar: 0,
        ..PercussionParams::default()
    };
    assert_eq!(
        compile_percussion("|9---|", &params),
        Err(TabError::InvalidDelta {
            beats_per_bar: 0,
            beat_division: 4,
            step: 4,
        })
    );
}

#[test]
fn picking_rows_interleave_strings() {
    init_logger();
    let body = compile_fingerpicking(
        &rows(&["E|9---8---|", "A|--7---6-|"]),
        &FingerpickingParams::default(),
    )
    .unwrap();
    assert_eq!(body, "1.0 0 1:90; 2.0 0 2:70; 3.0 0 1:80; 4.0 0 2:60");
}

#[test]
fn picking_chords_share_one_onset_marker() {
    init_logger();
    let body = compile_fingerpicking(
        &rows(&["|9---|", "|8---|", "|X---|"]),
        &FingerpickingParams::default(),
    )
    .unwrap();
    assert_eq!(body, "1 0 1:90 2:80 3:0");
}

#[test]
fn picking_onsets_share_one_precision() {
    init_logger();
    // delta 0.5 classifies to one decimal for every onset
    let body = compile_fingerpicking(
        &rows(&["|9-9-9-9-|"]),
        &FingerpickingParams::default(),
    )
    .unwrap();
    assert_eq!(body, "1.0 0 1:90; 2.0 0 1:90; 3.0 0 1:90; 4.0 0 1:90");
    for marker in body.split("; ") {
        let onset = marker.split(' ').next().unwrap();
        let decimals = onset.split('.').nth(1).unwrap();
        assert_eq!(decimals.len(), 1, "onset {onset} in {body}");
    }
}

#[test]
fn picking_eighth_note_meter() {
    init_logger();
    let params = FingerpickingParams::from_meter(6, 8);
    let body = compile_fingerpicking(&rows(&["|9--9--9--9--|"]), &params).unwrap();
    assert_eq!(body, "1.00 0 1:90; 1.75 0 1:90; 2.50 0 1:90; 3.25 0 1:90");
}

#[test]
fn picking_rows_must_align_with_beats() {
    init_logger();
    assert_eq!(
        compile_fingerpicking(&rows(&["|9-9-9-|"]), &FingerpickingParams::default()),
        Err(TabError::StepAlignment {
            step: 6,
            beats_per_bar: 4,
        })
    );
}

#[test]
fn picking_rows_must_match_widths() {
    init_logger();
    assert_eq!(
        compile_fingerpicking(
            &rows(&["|9---|", "|8-----|"]),
            &FingerpickingParams::default(),
        ),
        Err(TabError::StepWidthMismatch {
            expected: 4,
            actual: 6,
            content: "8-----".to_string(),
        })
    );
}

#[test]
fn picking_rejects_mute_free_alphabet_violations() {
    init_logger();
    assert!(matches!(
        compile_fingerpicking(&rows(&["|9-?-|"]), &FingerpickingParams::default()),
        Err(TabError::InvalidNote { found: '?', .. })
    ));
}
