use crate::dialect::{Dialect, VelocityScale, FINGERPICKING, PERCUSSION};
use crate::error::TabError;
use crate::parser::tab_parser::{fingerpicking_grid, percussion_grid, Bar, BarKind, Grid};
use crate::parser::tab_tokenizer::{flatten_macro, MacroValue};
use crate::sequence::sequence_event::SequenceEvent;
use crate::sequence::timing::StepClock;
use crate::sequence::QUARTER_DIVISION;

/// Stands in for a repeat of the previous non-empty bar.
pub const REPEAT_MARKER: &str = "/";
/// A bar with no sound.
pub const SILENT_MARKER: &str = "Z";
/// Reuse of the caller's currently active sequence.
pub const WILDCARD_MARKER: &str = "*";

/// Percussion compilation parameters, fully resolved by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PercussionParams {
    pub beats_per_bar: u32,
    /// Loudest digit of the tab, rescaled to velocity 90
    pub max_level: u8,
}

impl Default for PercussionParams {
    fn default() -> Self {
        Self {
            beats_per_bar: 4,
            max_level: 9,
        }
    }
}

/// Fingerpicking compilation parameters, fully resolved by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FingerpickingParams {
    pub beats_per_bar: u32,
    /// Beat length denominator (8 for eighth-note beats, 4 for quarters)
    pub beat_division: u32,
}

impl Default for FingerpickingParams {
    fn default() -> Self {
        Self {
            beats_per_bar: 4,
            beat_division: QUARTER_DIVISION,
        }
    }
}

impl FingerpickingParams {
    /// Resolve from a time signature: numerator as beats per bar,
    /// denominator as beat length.
    pub const fn from_meter(numerator: u32, denominator: u32) -> Self {
        Self {
            beats_per_bar: numerator,
            beat_division: denominator,
        }
    }
}

/// Accumulates rendered bars left to right with explicit dedup state.
///
/// The accumulator lives for a single compilation and is handed back by
/// [`SequenceBuilder::finish`] so the dedup decisions stay observable.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    rendered: Vec<String>,
    prev: Option<String>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// Push a rendered bar, collapsing a byte-identical repeat of the
    /// previous one into `/`. The repeat marker never refreshes the
    /// comparison state, so three identical bars come out as one
    /// rendering and two markers.
    pub fn push_bar(&mut self, bar: String) {
        if self.prev.as_deref() == Some(bar.as_str()) {
            self.rendered.push(REPEAT_MARKER.to_string());
        } else {
            self.rendered.push(bar.clone());
            self.prev = Some(bar);
        }
    }

    /// Empty bar: repeat of the previous bar, or a silent bar when
    /// nothing has been rendered yet.
    pub fn push_empty(&mut self) {
        if self.rendered.is_empty() {
            self.rendered.push(SILENT_MARKER.to_string());
        } else {
            self.rendered.push(REPEAT_MARKER.to_string());
        }
    }

    /// Pass the wildcard through for one bar.
    pub fn push_wildcard(&mut self) {
        self.rendered.push(WILDCARD_MARKER.to_string());
    }

    /// Final sequence and the dedup accumulator.
    pub fn finish(self) -> (String, Option<String>) {
        (self.rendered.join(" "), self.prev)
    }
}

/// Compile a percussion tab into its sequence expression.
///
/// ```
/// use tabseq::{compile_percussion, PercussionParams};
///
/// let seq = compile_percussion("|9-9-6-9-|9-6-9--9|", &PercussionParams::default()).unwrap();
/// assert_eq!(
///     seq,
///     "{ 1 0 90; 2 0 90; 3 0 60; 4 0 90 } { 1 0 90; 2 0 60; 3 0 90; 4.5 0 90 }"
/// );
/// ```
pub fn compile_percussion(tab: &str, params: &PercussionParams) -> Result<String, TabError> {
    let scale = VelocityScale::max_level(params.max_level)?;
    let grid = percussion_grid(tab)?;
    log::debug!(
        "compiling {} tab {tab:?}: {} bars, step {:?}",
        PERCUSSION.name,
        grid.bars.len(),
        grid.step
    );
    let (sequence, _prev) = compile_grid(
        &grid,
        &PERCUSSION,
        scale,
        params.beats_per_bar,
        QUARTER_DIVISION,
    )?;
    Ok(sequence)
}

/// Compile per-string fingerpicking rows into a pattern body.
///
/// ```
/// use tabseq::{compile_fingerpicking, FingerpickingParams};
///
/// let rows = vec!["E|9-X-|".to_string(), "A|--8-|".to_string()];
/// let body = compile_fingerpicking(&rows, &FingerpickingParams::default()).unwrap();
/// assert_eq!(body, "1 0 1:90; 3 0 1:0 2:80");
/// ```
pub fn compile_fingerpicking(
    rows: &[String],
    params: &FingerpickingParams,
) -> Result<String, TabError> {
    let grid = fingerpicking_grid(rows)?;
    log::debug!(
        "compiling {} rows {rows:?}: step {:?}",
        FINGERPICKING.name,
        grid.step
    );
    let (body, _prev) = compile_grid(
        &grid,
        &FINGERPICKING,
        VelocityScale::Tenfold,
        params.beats_per_bar,
        params.beat_division,
    )?;
    Ok(body)
}

/// Compile a fingerpicking pattern resolved from the host's macro store.
pub fn compile_fingerpicking_macro(
    value: &MacroValue,
    params: &FingerpickingParams,
) -> Result<String, TabError> {
    let rows = flatten_macro(value);
    compile_fingerpicking(&rows, params)
}

/// Shared dialect-parameterized engine: validated grid in, rendered
/// sequence and final dedup state out.
fn compile_grid(
    grid: &Grid,
    dialect: &Dialect,
    scale: VelocityScale,
    beats_per_bar: u32,
    beat_division: u32,
) -> Result<(String, Option<String>), TabError> {
    if dialect.aligned_steps {
        grid.check_alignment(beats_per_bar)?;
    }
    let mut builder = SequenceBuilder::new();
    if dialect.bar_substitutions {
        // one segment per bar
        for bar in &grid.bars {
            match bar.kind() {
                BarKind::Empty => builder.push_empty(),
                BarKind::Wildcard => builder.push_wildcard(),
                BarKind::Content => {
                    let clock = pattern_clock(dialect, beats_per_bar, beat_division, bar.width())?;
                    let rendered =
                        render_rows(std::slice::from_ref(bar), &clock, dialect, scale)?;
                    builder.push_bar(rendered);
                }
            }
        }
    } else {
        // the whole grid is one segment of per-string rows
        let step = grid.step.unwrap_or(0);
        let clock = pattern_clock(dialect, beats_per_bar, beat_division, step)?;
        let rendered = render_rows(&grid.bars, &clock, dialect, scale)?;
        builder.push_bar(rendered);
    }
    Ok(builder.finish())
}

fn pattern_clock(
    dialect: &Dialect,
    beats_per_bar: u32,
    beat_division: u32,
    step: usize,
) -> Result<StepClock, TabError> {
    let clock = StepClock::new(beats_per_bar, beat_division, step)?;
    Ok(if dialect.uniform_onsets {
        clock.with_uniform_precision()
    } else {
        clock
    })
}

/// Encode one equal-width segment of rows and render it.
fn render_rows(
    rows: &[Bar],
    clock: &StepClock,
    dialect: &Dialect,
    scale: VelocityScale,
) -> Result<String, TabError> {
    let step = rows.first().map_or(0, Bar::width);
    let cells: Vec<Vec<char>> = rows.iter().map(|bar| bar.content.chars().collect()).collect();
    let mut steps = Vec::new();
    for i in 0..step {
        let mut events = Vec::new();
        for (row, row_cells) in cells.iter().enumerate() {
            let Some(velocity) = dialect.decode_cell(row_cells[i], scale, i, &rows[row].content)?
            else {
                continue;
            };
            let onset = clock.onset(i);
            let event = if dialect.string_channels {
                SequenceEvent::string_hit(onset, (row + 1) as u8, velocity)
            } else {
                SequenceEvent::percussion_hit(onset, velocity)
            };
            events.push(event);
        }
        if events.is_empty() {
            continue;
        }
        steps.push(render_step(clock, &events));
    }
    Ok(if dialect.braced_bars {
        if steps.is_empty() {
            SILENT_MARKER.to_string()
        } else {
            format!("{{ {} }}", steps.join("; "))
        }
    } else {
        steps.join("; ")
    })
}

/// One step's chord marker: the onset, the aggregate `0`, then either a
/// bare velocity (aggregate channel) or `channel:velocity` pairs.
fn render_step(clock: &StepClock, events: &[SequenceEvent]) -> String {
    let mut parts = vec![format!("{} 0", clock.render_onset(events[0].onset))];
    for event in events {
        if event.channel == 0 {
            parts.push(event.velocity.to_string());
        } else {
            parts.push(format!("{}:{}", event.channel, event.velocity));
        }
    }
    parts.join(" ")
}
