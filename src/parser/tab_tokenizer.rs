use crate::error::TabError;
use nom::bytes::complete::take_while;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::multi::many1;
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};

/// Remove one leading and one trailing quote character, independently.
///
/// Tab arguments may arrive quoted from the host command line.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}

/// Drop a leading alphanumeric instrument-string label (`E`, `A`, `D`, ...).
pub fn strip_label(s: &str) -> &str {
    match s.chars().next() {
        Some(c) if c.is_alphanumeric() => &s[c.len_utf8()..],
        _ => s,
    }
}

/// One run of cells terminated by a bar delimiter.
fn bar_run(i: &str) -> IResult<&str, &str> {
    terminated(take_while(|c: char| c != '|'), char('|')).parse(i)
}

/// Split a bar-wrapped tab into per-bar cell runs.
///
/// `|9-9-|--9-|` yields `["9-9-", "--9-"]` and `||9-9-|` yields
/// `["", "9-9-"]`. Cell alphabets are not checked here so that the
/// encoder can report the offending character with its step position.
pub fn scan_bars(s: &str) -> Result<Vec<&str>, TabError> {
    if s.len() < 3 {
        return Err(TabError::MalformedTab(s.to_string()));
    }
    match all_consuming(preceded(char('|'), many1(bar_run))).parse(s) {
        Ok((_rest, bars)) => Ok(bars),
        Err(err) => {
            log::debug!("bar scan failed on {s:?}: {err:?}");
            Err(TabError::MalformedTab(s.to_string()))
        }
    }
}

/// Resolved value from the host's named-value store.
///
/// The store hands over either a flat token list or one entry per
/// instrument string; the shape is tagged explicitly instead of being
/// inferred from the first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroValue {
    /// Whitespace-separated tab tokens.
    Flat(String),
    /// One entry per instrument string.
    Rows(Vec<MacroRow>),
}

/// A single instrument-string entry of a multi-row macro value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRow {
    /// Instrument-string name, dropped on flattening.
    pub label: Option<String>,
    /// Tab fragments, concatenated on flattening.
    pub cells: Vec<String>,
}

/// Flatten a macro-store value into one tab string per row.
pub fn flatten_macro(value: &MacroValue) -> Vec<String> {
    match value {
        MacroValue::Flat(tokens) => tokens.split_whitespace().map(str::to_string).collect(),
        MacroValue::Rows(rows) => rows.iter().map(|row| row.cells.concat()).collect(),
    }
}
