// Interval name codec: text <-> (generic, transposition, descending).
//
// Grammar:
//
//   [+-]? (P | M | m | d+ | A+) [1-9][0-9]*
//
// The number is the 1-based interval size ("3" = third); it is stored
// 0-based as `generic`. The quality is translated into a chromatic offset
// from the natural size of that interval, and which qualities are legal
// depends on the interval class:
//
//   perfect class (unison, 4th, 5th):   ..ddd dd  d  P  A  AA ..
//                                        -3  -2 -1  0 +1  +2
//   imperfect class (2nd, 3rd, 6th, 7th): ..dd  d  m  M  A  AA ..
//                                          -3 -2 -1  0 +1  +2
//
// `quality_to_transposition` and `transposition_to_quality` are exact
// inverses on every legal (quality, class) pair.

use crate::error::{Result, TheoryError};
use crate::pitch::NATURAL_SEMITONES;

/// `generic % 7` values of the unison, fourth and fifth.
const PERFECT_CLASSES: [i32; 3] = [0, 3, 4];

/// Quality token of an interval name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quality {
    Perfect,
    Major,
    Minor,
    Diminished(usize),
    Augmented(usize),
}

impl Quality {
    fn parse(letters: &str) -> Option<Quality> {
        match letters {
            "P" => Some(Quality::Perfect),
            "M" => Some(Quality::Major),
            "m" => Some(Quality::Minor),
            _ if !letters.is_empty() && letters.bytes().all(|b| b == b'd') => {
                Some(Quality::Diminished(letters.len()))
            }
            _ if !letters.is_empty() && letters.bytes().all(|b| b == b'A') => {
                Some(Quality::Augmented(letters.len()))
            }
            _ => None,
        }
    }

    fn transposition(self, is_perfect: bool) -> Option<i32> {
        match (self, is_perfect) {
            (Quality::Perfect, true) => Some(0),
            (Quality::Major, false) => Some(0),
            (Quality::Minor, false) => Some(-1),
            (Quality::Perfect, false) | (Quality::Major, true) | (Quality::Minor, true) => None,
            (Quality::Diminished(n), true) => Some(-(n as i32)),
            (Quality::Diminished(n), false) => Some(-(n as i32) - 1),
            (Quality::Augmented(n), _) => Some(n as i32),
        }
    }
}

/// Whether a 0-based generic size belongs to the unison/fourth/fifth family.
pub fn is_perfect_class(generic: i32) -> bool {
    PERFECT_CLASSES.contains(&generic.rem_euclid(7))
}

/// Chromatic offset for a quality token, or `None` if the token is unknown
/// or not legal for the interval class.
pub fn quality_to_transposition(letters: &str, is_perfect: bool) -> Option<i32> {
    Quality::parse(letters)?.transposition(is_perfect)
}

/// Quality letters for a chromatic offset; inverse of `quality_to_transposition`.
pub fn transposition_to_quality(transposition: i32, is_perfect: bool) -> String {
    if transposition > 0 {
        return "A".repeat(transposition as usize);
    }
    match (transposition, is_perfect) {
        (0, true) => "P".to_string(),
        (0, false) => "M".to_string(),
        (-1, false) => "m".to_string(),
        (t, true) => "d".repeat(t.unsigned_abs() as usize),
        (t, false) => "d".repeat(t.unsigned_abs() as usize - 1),
    }
}

/// Parse an interval name into `(generic, transposition, descending)`.
pub fn parse(name: &str) -> Result<(i32, i32, bool)> {
    let invalid = || TheoryError::InvalidIntervalName {
        name: name.to_string(),
    };

    let (descending, rest) = if let Some(rest) = name.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = name.strip_prefix('+') {
        (false, rest)
    } else {
        (false, name)
    };

    let digits_at = rest.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
    let (letters, digits) = rest.split_at(digits_at);
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let quality = Quality::parse(letters).ok_or_else(invalid)?;
    let size: u32 = digits.parse().map_err(|_| invalid())?;
    let generic = i32::try_from(size - 1).map_err(|_| invalid())?;

    let transposition = quality
        .transposition(is_perfect_class(generic))
        .ok_or_else(|| TheoryError::InvalidIntervalQuality {
            quality: letters.to_string(),
            size,
        })?;
    // Reject sizes whose semitone span does not fit in an i32.
    generic
        .div_euclid(7)
        .checked_mul(12)
        .and_then(|v| v.checked_add(NATURAL_SEMITONES[generic.rem_euclid(7) as usize]))
        .and_then(|v| v.checked_add(transposition))
        .ok_or_else(invalid)?;
    Ok((generic, transposition, descending))
}

/// Quality letters followed by the 1-based size, e.g. `M3`, `dd5`.
pub fn format(generic: i32, transposition: i32) -> String {
    let quality = transposition_to_quality(transposition, is_perfect_class(generic));
    format!("{quality}{}", i64::from(generic) + 1)
}

/// `format` with an explicit `+`/`-` direction prefix; parses back unchanged.
pub fn format_directed(generic: i32, transposition: i32, descending: bool) -> String {
    let sign = if descending { '-' } else { '+' };
    format!("{sign}{}", format(generic, transposition))
}
