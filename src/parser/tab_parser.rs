use crate::dialect::FINGERPICKING;
use crate::error::TabError;
use crate::parser::tab_tokenizer::{scan_bars, strip_label, strip_quotes};

/// Rest cell, no sound at that step
pub const REST: char = '-';
/// Content of the wildcard bar reusing the active sequence
pub const WILDCARD: char = '*';

/// How a bar participates in the rendered sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BarKind {
    /// Regular cell content
    Content,
    /// Zero-width bar, repeat of the previous bar or silent if first
    Empty,
    /// Lone `*`, reuse the currently active sequence
    Wildcard,
}

/// One delimited segment of a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Ordinal position within the tab
    pub index: usize,
    /// Raw cell content between the delimiters
    pub content: String,
}

impl Bar {
    pub fn new(index: usize, content: &str) -> Self {
        Self {
            index,
            content: content.to_string(),
        }
    }

    pub fn kind(&self) -> BarKind {
        if self.content.is_empty() {
            BarKind::Empty
        } else if self.width() == 1 && self.content.starts_with(WILDCARD) {
            BarKind::Wildcard
        } else {
            BarKind::Content
        }
    }

    /// Number of steps, one per cell.
    pub fn width(&self) -> usize {
        self.content.chars().count()
    }
}

/// Validated set of bars sharing one step width.
///
/// Percussion tabs contribute one row of many bars; fingerpicking tabs
/// contribute one single-bar row per instrument string. Either way the
/// width of the content bars is the authoritative division count for
/// the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub bars: Vec<Bar>,
    /// Authoritative step count, `None` when no content bar is present
    pub step: Option<usize>,
}

impl Grid {
    /// Build from the bars of a single percussion row.
    ///
    /// Empty and wildcard bars carry no steps and are exempt from the
    /// width check.
    pub fn of_bars(contents: &[&str]) -> Result<Self, TabError> {
        Self::build(contents, true)
    }

    /// Build from per-instrument-string rows, one bar each.
    ///
    /// Every row is content here; a lone `*` or an empty row is a width
    /// mismatch like any other.
    pub fn of_rows(contents: &[&str]) -> Result<Self, TabError> {
        Self::build(contents, false)
    }

    fn build(contents: &[&str], exempt_special: bool) -> Result<Self, TabError> {
        let bars: Vec<Bar> = contents
            .iter()
            .enumerate()
            .map(|(index, content)| Bar::new(index, content))
            .collect();
        let mut step = None;
        for bar in &bars {
            if exempt_special && bar.kind() != BarKind::Content {
                continue;
            }
            let actual = bar.width();
            match step {
                None => step = Some(actual),
                Some(expected) if expected != actual => {
                    return Err(TabError::StepWidthMismatch {
                        expected,
                        actual,
                        content: bar.content.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self { bars, step })
    }

    /// Fail unless the step count divides evenly into the beats of a bar.
    ///
    /// Required by the fingerpicking dialect where the per-step time
    /// delta must be exact.
    pub fn check_alignment(&self, beats_per_bar: u32) -> Result<(), TabError> {
        if beats_per_bar == 0 {
            // degenerate, reported as an InvalidDelta by the timing model
            return Ok(());
        }
        if let Some(step) = self.step {
            if step % beats_per_bar as usize != 0 {
                return Err(TabError::StepAlignment {
                    step,
                    beats_per_bar,
                });
            }
        }
        Ok(())
    }
}

/// Tokenize one percussion tab line into its grid.
pub fn percussion_grid(tab: &str) -> Result<Grid, TabError> {
    let tab = strip_quotes(tab);
    let bars = scan_bars(tab)?;
    Grid::of_bars(&bars)
}

/// Tokenize per-instrument-string fingerpicking rows into their grid.
///
/// Each row may carry a quoted wrapper and a leading string label; after
/// stripping, the whole row must be exactly one bar.
pub fn fingerpicking_grid(rows: &[String]) -> Result<Grid, TabError> {
    let mut contents = Vec::with_capacity(rows.len());
    for row in rows {
        let mut stripped = strip_quotes(row);
        if FINGERPICKING.labeled_rows {
            stripped = strip_label(stripped);
        }
        let bars = scan_bars(stripped)?;
        if bars.len() != 1 {
            return Err(TabError::MalformedTab(row.clone()));
        }
        contents.push(bars[0]);
    }
    Grid::of_rows(&contents)
}
