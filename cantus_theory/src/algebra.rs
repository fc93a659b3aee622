// Pitch/interval arithmetic.
//
//   Pitch + Interval -> Pitch      transpose_by
//   Pitch - Interval -> Pitch      transpose_down_by (adds the negated interval)
//   Pitch - Pitch    -> Interval   interval_from
//
// Transposition moves letters and semitones as two independent quantities.
// The letter position moves by `generic`; the accidental on the target
// letter is then whatever is needed to land on the requested semitone
// height. Adding semitones alone would give the right sound with the wrong
// spelling (A3 + A3 must be C##4, not D4).
//
// The `std::ops` impls are thin wrappers over the named methods; mixing
// operand kinds that have no meaning (Interval + Pitch, Pitch + Pitch) does
// not type-check.

use std::ops::{Add, Neg, Sub};

use crate::interval::Interval;
use crate::pitch::Pitch;

impl Pitch {
    /// Move by `interval`, up or down according to its direction.
    pub fn transpose_by(&self, interval: Interval) -> Pitch {
        let letter_steps = if interval.is_descending() {
            -interval.generic()
        } else {
            interval.generic()
        };
        let natural = Pitch::natural(self.base_pitch_id() + letter_steps);
        let target_midi = self.midi() + interval.semitones();
        Pitch::from_parts(natural.base_pitch_id(), target_midi - natural.midi())
    }

    /// Move by the reverse of `interval`.
    pub fn transpose_down_by(&self, interval: Interval) -> Pitch {
        self.transpose_by(interval.negate())
    }

    /// The interval leading from `self` to `other`.
    pub fn interval_to(&self, other: Pitch) -> Interval {
        Interval::from_pitch_pair(*self, other)
    }

    /// The interval leading from `other` to `self` (`self - other`).
    pub fn interval_from(&self, other: Pitch) -> Interval {
        Interval::from_pitch_pair(other, *self)
    }
}

impl Add<Interval> for Pitch {
    type Output = Pitch;

    fn add(self, rhs: Interval) -> Pitch {
        self.transpose_by(rhs)
    }
}

impl Sub<Interval> for Pitch {
    type Output = Pitch;

    fn sub(self, rhs: Interval) -> Pitch {
        self.transpose_down_by(rhs)
    }
}

impl Sub<Pitch> for Pitch {
    type Output = Interval;

    fn sub(self, rhs: Pitch) -> Interval {
        self.interval_from(rhs)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        self.negate()
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
    fn transposes_with_correct_spelling() {
        assert_eq!(p("a3") + i("m3"), p("c4"));
        assert_eq!(p("a3") + i("A3"), p("cisis4"));
        assert_eq!(p("a3") + i("P4"), p("d4"));
        assert_eq!(p("a3") + i("d4"), p("des4"));
        assert_eq!(p("c4") + i("A4"), p("fis4"));
        assert_eq!(p("c4") + i("d5"), p("ges4"));
        assert_eq!(p("e4") + i("M2"), p("fis4"));
        assert_eq!(p("bes3") + i("M3"), p("d4"));
    }

    #[test]
    fn descending_transposition() {
        assert_eq!(p("c4") + i("-m3"), p("a3"));
        assert_eq!(p("c4") - i("m3"), p("a3"));
        assert_eq!(p("c4") - i("M3"), p("as3"));
        assert_eq!(p("fis4") - i("A4"), p("c4"));
        assert_eq!(p("g5") - i("P8"), p("g4"));
    }

    #[test]
    fn compound_transposition() {
        assert_eq!(p("c4") + i("M10"), p("e5"));
        assert_eq!(p("d4") + i("m9"), p("es5"));
    }

    #[test]
    fn difference_of_pitches() {
        let up = p("a4") - p("c4");
        assert_eq!(up.name(), "M6");
        assert!(!up.is_descending());

        let down = p("c4") - p("a4");
        assert_eq!(down.name(), "M6");
        assert!(down.is_descending());
        assert_eq!(up, -down);

        assert_eq!(p("c4") - p("a3"), i("m3"));
        assert_eq!(p("c4").interval_to(p("a3")), i("-m3"));
    }

    #[test]
    fn transposition_then_difference_recovers_interval() {
        let pitches = ["c4", "fis3", "bes2", "as4", "e5", "cisis4", "ces3"];
        let intervals = [
            "P1", "m2", "M2", "A2", "d3", "m3", "M3", "d4", "P4", "A4", "d5", "P5", "A5", "m6",
            "M6", "d7", "m7", "M7", "P8", "m9", "M10", "P12", "-m2", "-M3", "-P4", "-A4", "-P5",
            "-M6", "-P8", "-M9",
        ];
        for pn in pitches {
            for iname in intervals {
                let pitch = p(pn);
                let interval = i(iname);
                let moved = pitch + interval;
                assert_eq!(moved - pitch, interval, "{pn} + {iname} = {moved}");
                assert_eq!(moved.midi() - pitch.midi(), interval.semitones());
            }
        }
    }

    #[test]
    fn up_then_down_returns_home() {
        let start = p("es4");
        for iname in ["m2", "M3", "A4", "P5", "m7", "M9"] {
            let interval = i(iname);
            assert_eq!(start + interval - interval, start, "{iname}");
        }
    }
}
