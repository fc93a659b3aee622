// Immutable diatonic interval value.
//
// An interval is measured on an ascending pitch pair and carries a separate
// direction flag:
// - `generic`: letter steps spanned, 0-based (unison = 0, third = 2,
//   octave = 7).
// - `transposition`: semitones by which the actual distance deviates from
//   the natural size of that generic interval (major/perfect = 0).
// - `descending`: the original pair went downwards.
//
// `from_pitch_pair` puts the pair in `Pitch` order (sounding height, then
// letter position) before measuring, so an interval and its reverse differ
// only in `descending`, and enharmonic pairs like B#3/C4 measure as a
// diminished second rather than a backwards unison. Spellings whose letters
// run against a strictly rising sound (Cb4 up to B#3) still give a negative
// `generic`; arithmetic uses euclidean division so those round-trip too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::interval_name;
use crate::pitch::{NATURAL_SEMITONES, Pitch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    generic: i32,
    transposition: i32,
    descending: bool,
}

/// Semitone size of the natural (major/perfect) interval with this generic size.
pub fn natural_size(generic: i32) -> i32 {
    NATURAL_SEMITONES[generic.rem_euclid(7) as usize] + 12 * generic.div_euclid(7)
}

impl Interval {
    pub fn new(generic: i32, transposition: i32, descending: bool) -> Self {
        Interval {
            generic,
            transposition,
            descending,
        }
    }

    /// Parse an interval name such as `"M3"`, `"-P5"` or `"AA4"`.
    pub fn from_name(name: &str) -> Result<Self> {
        let (generic, transposition, descending) = interval_name::parse(name)?;
        Ok(Interval::new(generic, transposition, descending))
    }

    /// The interval that leads from `from` to `to`.
    pub fn from_pitch_pair(from: Pitch, to: Pitch) -> Self {
        let (low, high, descending) = if from > to {
            (to, from, true)
        } else {
            (from, to, false)
        };
        let generic = high.base_pitch_id() - low.base_pitch_id();
        let actual = high.midi() - low.midi();
        Interval::new(generic, actual - natural_size(generic), descending)
    }

    pub fn generic(&self) -> i32 {
        self.generic
    }

    pub fn transposition(&self) -> i32 {
        self.transposition
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Larger than an octave.
    pub fn is_compound(&self) -> bool {
        self.generic > 7
    }

    pub fn is_perfect_class(&self) -> bool {
        interval_name::is_perfect_class(self.generic)
    }

    /// Chromatic size of the natural interval, ignoring `transposition`.
    pub fn steps(&self) -> i32 {
        natural_size(self.generic)
    }

    /// Signed semitone distance this interval actually moves.
    pub fn semitones(&self) -> i32 {
        let size = self.steps() + self.transposition;
        if self.descending { -size } else { size }
    }

    /// Same interval in the opposite direction.
    pub fn negate(&self) -> Interval {
        Interval {
            descending: !self.descending,
            ..*self
        }
    }

    /// Compound intervals folded into a single octave (a tenth becomes a
    /// third). Octaves themselves are kept.
    pub fn simple(&self) -> Interval {
        if self.generic <= 7 {
            return *self;
        }
        let folded = (self.generic - 1).rem_euclid(7) + 1;
        Interval { generic: folded, ..*self }
    }

    /// Quality letters only: `P`, `m`, `M`, `d`, `AA`, ...
    pub fn quality(&self) -> String {
        interval_name::transposition_to_quality(self.transposition, self.is_perfect_class())
    }

    /// Quality and 1-based size without direction, e.g. `M3`.
    pub fn name(&self) -> String {
        interval_name::format(self.generic, self.transposition)
    }
}

impl FromStr for Interval {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::from_name(s)
    }
}

/// Renders with an explicit direction sign (`+M3`, `-P5`), which parses back
/// to an equal value.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&interval_name::format_directed(
            self.generic,
            self.transposition,
            self.descending,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Pitch {
        Pitch::from_name(name).unwrap()
    }

    fn i(name: &str) -> Interval {
        Interval::from_name(name).unwrap()
    }

    #[test]
    fn unison_from_identical_pitches() {
        for name in ["c4", "fis2", "as5", "bisis3"] {
            let unison = Interval::from_pitch_pair(p(name), p(name));
            assert_eq!(unison.generic(), 0);
            assert_eq!(unison.transposition(), 0);
            assert_eq!(unison.name(), "P1");
        }
    }

    #[test]
    fn enharmonic_pair_is_a_diminished_second() {
        let up = Interval::from_pitch_pair(p("bis3"), p("c4"));
        let down = Interval::from_pitch_pair(p("c4"), p("bis3"));
        assert_eq!(up.generic(), 1);
        assert_eq!(up.name(), "d2");
        assert!(!up.is_descending());
        assert_eq!(down, up.negate());
        assert_eq!(down.to_string(), "-d2");
        assert_eq!(down.to_string().parse::<Interval>().unwrap(), down);
        assert_eq!(down.semitones(), 0);
    }

    #[test]
    fn measures_qualities() {
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("e4")).name(), "M3");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("es4")).name(), "m3");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("g4")).name(), "P5");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("ges4")).name(), "d5");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("fis4")).name(), "A4");
        assert_eq!(Interval::from_pitch_pair(p("cis4"), p("es4")).name(), "d3");
        assert_eq!(Interval::from_pitch_pair(p("e4"), p("f4")).name(), "m2");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("c5")).name(), "P8");
        assert_eq!(Interval::from_pitch_pair(p("c4"), p("e5")).name(), "M10");
    }

    #[test]
    fn direction_from_sounding_height() {
        let up = Interval::from_pitch_pair(p("c4"), p("a4"));
        let down = Interval::from_pitch_pair(p("a4"), p("c4"));
        assert!(!up.is_descending());
        assert!(down.is_descending());
        assert_eq!(up.negate(), down);
        assert_eq!(up.name(), down.name());
    }

    #[test]
    fn steps_and_semitones() {
        assert_eq!(i("M3").steps(), 4);
        assert_eq!(i("m3").steps(), 4);
        assert_eq!(i("m3").semitones(), 3);
        assert_eq!(i("-P5").semitones(), -7);
        assert_eq!(i("M9").steps(), 14);
    }

    #[test]
    fn widest_parsable_interval_stays_in_range() {
        assert_eq!(i("P1252698795").semitones(), i32::MAX);
        assert_eq!(i("-P1252698795").semitones(), -i32::MAX);
        assert!(Interval::from_name("M2147483647").is_err());
    }

    #[test]
    fn compound_and_simple() {
        assert!(!i("P8").is_compound());
        assert!(i("M9").is_compound());
        assert_eq!(i("M10").simple(), i("M3"));
        assert_eq!(i("-P12").simple(), i("-P5"));
        assert_eq!(i("P8").simple(), i("P8"));
        assert_eq!(i("P15").simple(), i("P8"));
    }

    #[test]
    fn name_parse_inverse() {
        for name in ["P1", "A1", "d2", "m2", "M2", "A2", "dd3", "d4", "AA4", "P5", "m6", "M7", "d8", "m9"] {
            let interval = i(name);
            assert_eq!(interval.name(), name);
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
    }

    #[test]
    fn negate_is_involution() {
        let m6 = i("m6");
        assert_eq!(m6.negate().negate(), m6);
        assert_eq!(m6.negate().to_string(), "-m6");
    }

    #[test]
    fn quality_letters() {
        assert_eq!(i("dd5").quality(), "dd");
        assert_eq!(i("M6").quality(), "M");
        assert!(i("P4").is_perfect_class());
        assert!(!i("M6").is_perfect_class());
    }
}
