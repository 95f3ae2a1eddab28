use crate::error::TabError;
use crate::sequence::FIRST_BEAT;
use num_rational::Rational64;

/// Onset display style, derived once per pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OnsetFormat {
    /// Shortest decimal rendering per onset (`1`, `4.5`, `2.333333`)
    Shortest,
    /// The same decimal count for every onset of the pattern
    Fixed(usize),
}

/// Converts step indices into beat-relative onset times for one pattern.
///
/// Onsets are exact rationals, `onset(i) = 1 + i * delta`, so long
/// patterns cannot drift the way an accumulated floating-point clock
/// would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepClock {
    delta: Rational64,
    format: OnsetFormat,
}

impl StepClock {
    /// Per-step increment `(beats_per_bar * 4) / (beat_division * step)`.
    ///
    /// With a quarter-note beat (`beat_division` 4) this collapses to
    /// `beats_per_bar / step`.
    pub fn new(beats_per_bar: u32, beat_division: u32, step: usize) -> Result<Self, TabError> {
        if beats_per_bar == 0 || beat_division == 0 || step == 0 {
            return Err(TabError::InvalidDelta {
                beats_per_bar,
                beat_division,
                step,
            });
        }
        let delta = Rational64::new(
            i64::from(beats_per_bar) * 4,
            i64::from(beat_division) * step as i64,
        );
        Ok(Self {
            delta,
            format: OnsetFormat::Shortest,
        })
    }

    /// Switch to one uniform decimal count classified from `delta`.
    pub fn with_uniform_precision(mut self) -> Self {
        self.format = OnsetFormat::Fixed(display_precision(self.delta));
        self
    }

    pub const fn delta(&self) -> Rational64 {
        self.delta
    }

    pub const fn format(&self) -> OnsetFormat {
        self.format
    }

    /// Beat-relative onset of step `index`, 1-based beat numbering.
    pub fn onset(&self, index: usize) -> Rational64 {
        Rational64::from_integer(FIRST_BEAT) + self.delta * index as i64
    }

    /// Render an onset according to the pattern's display style.
    pub fn render_onset(&self, onset: Rational64) -> String {
        match self.format {
            OnsetFormat::Shortest => shortest_decimal(onset),
            OnsetFormat::Fixed(places) => fixed_decimal(onset, places),
        }
    }
}

/// Decimal places to display for a pattern, classified from the
/// shortest rendering of its step delta: one character means whole
/// beats, three characters one decimal, anything longer two.
pub fn display_precision(delta: Rational64) -> usize {
    match shortest_decimal(delta).len() {
        1 => 0,
        3 => 1,
        _ => 2,
    }
}

/// Six-decimal rendering with trailing zeros and a dangling point
/// stripped (`2`, `1.5`, `0.333333`).
pub fn shortest_decimal(value: Rational64) -> String {
    let rendered = fixed_decimal(value, 6);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Render `value` with exactly `places` decimals, half rounding away
/// from zero.
pub fn fixed_decimal(value: Rational64, places: usize) -> String {
    let scale = 10_i64.pow(places as u32);
    let rounded = (value * scale).round().to_integer();
    if places == 0 {
        return rounded.to_string();
    }
    let sign = if rounded < 0 { "-" } else { "" };
    let magnitude = rounded.abs();
    let whole = magnitude / scale;
    let frac = magnitude % scale;
    format!("{sign}{whole}.{frac:0places$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_decimal() {
        assert_eq!(fixed_decimal(Rational64::new(3, 2), 1), "1.5");
        assert_eq!(fixed_decimal(Rational64::new(4, 3), 2), "1.33");
        assert_eq!(fixed_decimal(Rational64::new(5, 3), 2), "1.67");
        assert_eq!(fixed_decimal(Rational64::from_integer(2), 0), "2");
        assert_eq!(fixed_decimal(Rational64::from_integer(2), 1), "2.0");
    }

    #[test]
    fn test_shortest_decimal() {
        assert_eq!(shortest_decimal(Rational64::from_integer(2)), "2");
        assert_eq!(shortest_decimal(Rational64::new(3, 2)), "1.5");
        assert_eq!(shortest_decimal(Rational64::new(1, 3)), "0.333333");
        assert_eq!(shortest_decimal(Rational64::new(9, 2)), "4.5");
    }

    #[test]
    fn test_display_precision_classes() {
        assert_eq!(display_precision(Rational64::from_integer(2)), 0);
        assert_eq!(display_precision(Rational64::new(1, 2)), 1);
        assert_eq!(display_precision(Rational64::new(3, 2)), 1);
        assert_eq!(display_precision(Rational64::new(1, 4)), 2);
        assert_eq!(display_precision(Rational64::new(1, 3)), 2);
    }

    #[test]
    fn test_onsets_are_exact() {
        // 4 beats over 12 steps, a ternary subdivision
        let clock = StepClock::new(4, 4, 12).unwrap();
        assert_eq!(clock.delta(), Rational64::new(1, 3));
        assert_eq!(clock.onset(3), Rational64::from_integer(2));
        // no drift at the end of a long pattern
        assert_eq!(clock.onset(12), Rational64::from_integer(5));
    }

    #[test]
    fn test_uniform_onset_rendering() {
        let clock = StepClock::new(4, 4, 12).unwrap().with_uniform_precision();
        assert_eq!(clock.format(), OnsetFormat::Fixed(2));
        assert_eq!(clock.render_onset(clock.onset(0)), "1.00");
        assert_eq!(clock.render_onset(clock.onset(1)), "1.33");
        assert_eq!(clock.render_onset(clock.onset(5)), "2.67");
    }

    #[test]
    fn test_shortest_onset_rendering() {
        let clock = StepClock::new(4, 4, 8).unwrap();
        assert_eq!(clock.render_onset(clock.onset(0)), "1");
        assert_eq!(clock.render_onset(clock.onset(7)), "4.5");
    }

    #[test]
    fn test_degenerate_delta() {
        assert_eq!(
            StepClock::new(4, 4, 0),
            Err(TabError::InvalidDelta {
                beats_per_bar: 4,
                beat_division: 4,
                step: 0,
            })
        );
        assert!(StepClock::new(0, 4, 8).is_err());
        assert!(StepClock::new(4, 0, 8).is_err());
    }
}
