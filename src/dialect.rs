use crate::error::TabError;
use crate::parser::tab_parser::REST;

/// Velocity rescaling rule for digit cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VelocityScale {
    /// `round(digit * 90 / max_level)`, percussion tabs
    MaxLevel(u8),
    /// `digit * 10`, fingerpicking tabs
    Tenfold,
}

impl VelocityScale {
    /// Percussion scale with a validated maximum level.
    pub fn max_level(level: u8) -> Result<Self, TabError> {
        if (1..=9).contains(&level) {
            Ok(Self::MaxLevel(level))
        } else {
            Err(TabError::InvalidLevel(level))
        }
    }

    pub fn apply(self, digit: u8) -> u16 {
        match self {
            Self::MaxLevel(max) => (f64::from(digit) * 90.0 / f64::from(max)).round() as u16,
            Self::Tenfold => u16::from(digit) * 10,
        }
    }
}

/// The grammar and encoding knobs separating the two tab dialects.
///
/// Everything else, tokenizing, width validation, timing and dedup, is
/// shared.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    /// Rows carry a leading instrument-string label
    pub labeled_rows: bool,
    /// Accept `X`/`x` as a zero-velocity hit
    pub mute_cells: bool,
    /// Whole-bar `/`, `Z` and `*` substitutions apply
    pub bar_substitutions: bool,
    /// Step count must divide evenly into beats per bar
    pub aligned_steps: bool,
    /// One uniform onset precision per pattern instead of per-onset
    /// shortest rendering
    pub uniform_onsets: bool,
    /// Bars render as braced chord groups (`{ ... }`)
    pub braced_bars: bool,
    /// Events carry 1-based row channels instead of the aggregate
    /// channel 0
    pub string_channels: bool,
}

/// Single-row percussion tabs (`|9-9-6-9-|`).
pub const PERCUSSION: Dialect = Dialect {
    name: "percussion",
    labeled_rows: false,
    mute_cells: false,
    bar_substitutions: true,
    aligned_steps: false,
    uniform_onsets: false,
    braced_bars: true,
    string_channels: false,
};

/// Per-string fingerpicking tabs (`E|0-2-|`).
pub const FINGERPICKING: Dialect = Dialect {
    name: "fingerpicking",
    labeled_rows: true,
    mute_cells: true,
    bar_substitutions: false,
    aligned_steps: true,
    uniform_onsets: true,
    braced_bars: false,
    string_channels: true,
};

impl Dialect {
    /// Decode one cell into a velocity, `None` for a rest.
    pub fn decode_cell(
        &self,
        cell: char,
        scale: VelocityScale,
        step: usize,
        content: &str,
    ) -> Result<Option<u16>, TabError> {
        if cell == REST {
            return Ok(None);
        }
        if self.mute_cells && cell.eq_ignore_ascii_case(&'x') {
            return Ok(Some(0));
        }
        match cell.to_digit(10) {
            Some(digit) => Ok(Some(scale.apply(digit as u8))),
            None => Err(TabError::InvalidNote {
                found: cell,
                step,
                content: content.to_string(),
            }),
        }
    }
}
