// Immutable diatonic pitch value.
//
// A pitch is stored as two integers:
// - `base_pitch_id = octave * 7 + letter_index` (C=0 .. B=6), the generic
//   letter position. This is what interval *numbers* are measured in.
// - `transposition`, the signed semitone offset from the natural pitch at
//   that letter (sharps positive, flats negative).
//
// Everything else (octave, letter, MIDI number, frequency) is derived.
//
// Two equality relations exist and are deliberately kept apart:
// - `==` / `same_spelling` compare spelling: letter, accidentals and
//   (optionally) octave. C4 and B#3 are different pitches.
// - `is_enharmonic` compares sounding height (`midi`) only.
//
// `Ord` sorts by sounding height. Enharmonic ties are broken by
// `base_pitch_id` so ordering stays consistent with `==`.
//
// Arithmetic with intervals lives in `algebra.rs`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::pitch_name;

/// Semitones above C for each natural letter, indexed by `base_pitch_id % 7`.
/// Doubles as the chromatic size of each simple major/perfect interval.
pub const NATURAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    base_pitch_id: i32,
    transposition: i32,
}

impl Pitch {
    /// Parse a pitch name such as `"cis4"`, `"as3"` or `"Bb2"`.
    pub fn from_name(name: &str) -> Result<Self> {
        let (base_pitch_id, transposition) = pitch_name::parse(name)?;
        Ok(Pitch {
            base_pitch_id,
            transposition,
        })
    }

    pub fn from_parts(base_pitch_id: i32, transposition: i32) -> Self {
        Pitch {
            base_pitch_id,
            transposition,
        }
    }

    /// The accidental-free pitch at a letter position.
    pub fn natural(base_pitch_id: i32) -> Self {
        Pitch::from_parts(base_pitch_id, 0)
    }

    pub fn base_pitch_id(&self) -> i32 {
        self.base_pitch_id
    }

    pub fn transposition(&self) -> i32 {
        self.transposition
    }

    pub fn octave(&self) -> i32 {
        self.base_pitch_id.div_euclid(7)
    }

    /// Letter index 0..=6 (C..B).
    pub fn pitch_class(&self) -> usize {
        self.base_pitch_id.rem_euclid(7) as usize
    }

    /// Lower-case letter name.
    pub fn letter(&self) -> char {
        pitch_name::LETTERS[self.pitch_class()]
    }

    /// MIDI note number (C4 = 60). Not clamped to 0..=127.
    pub fn midi(&self) -> i32 {
        (self.octave() + 1) * 12 + NATURAL_SEMITONES[self.pitch_class()] + self.transposition
    }

    /// Equal-tempered frequency in Hz, A4 = 440.
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf(f64::from(self.midi() - 69) / 12.0)
    }

    /// Canonical name with flat/sharp glyphs, e.g. `c♯4`.
    pub fn name(&self) -> String {
        pitch_name::format(self.base_pitch_id, self.transposition)
    }

    /// Dutch-style ASCII name, e.g. `cis4`, that parses back to `self`.
    pub fn ascii_name(&self) -> String {
        pitch_name::format_ascii(self.base_pitch_id, self.transposition)
    }

    /// Same letter and accidentals, and the same octave unless `ignore_octave`.
    pub fn same_spelling(&self, other: &Pitch, ignore_octave: bool) -> bool {
        if ignore_octave {
            self.pitch_class() == other.pitch_class() && self.transposition == other.transposition
        } else {
            self == other
        }
    }

    /// Same sounding pitch, regardless of spelling.
    pub fn is_enharmonic(&self, other: &Pitch) -> bool {
        self.midi() == other.midi()
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi()
            .cmp(&other.midi())
            .then(self.base_pitch_id.cmp(&other.base_pitch_id))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Pitch::from_name(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
