// Pitch name codec: text <-> (base_pitch_id, transposition).
//
// Accepted names are a letter class, an accidental run, and an octave:
//
//   (as|es|[a-g]) ((es)* | (is)* | b* | #*) [0-9]+      (case-insensitive)
//
// The accidental run must be homogeneous: Dutch suffixes (`es` = flat,
// `is` = sharp) or glyph-style markers (`b` = flat, `#` = sharp), never a
// mixture. `as` and `es` are the contracted Dutch spellings of A-flat and
// E-flat, so the leading token carries one implicit flat before the rest of
// the run is counted.
//
// Parsing is two-phase: `tokenize` splits the name into a `PitchTokens`
// struct (pure syntax), then `parse` turns the tokens into numbers. Names
// are canonicalized on output: `format` always uses the Unicode flat/sharp
// glyphs, and `format_ascii` emits the Dutch spelling, which is the one
// textual form that re-parses to the same value.

use crate::error::{Result, TheoryError};
use crate::pitch::NATURAL_SEMITONES;

/// Letter names indexed by `base_pitch_id % 7`.
pub const LETTERS: [char; 7] = ['c', 'd', 'e', 'f', 'g', 'a', 'b'];

pub const FLAT_GLYPH: char = '\u{266D}';
pub const SHARP_GLYPH: char = '\u{266F}';

/// Which family of accidental markers a name uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccidentalRun {
    /// No markers at all.
    None,
    /// `es` repeated.
    DutchFlat(usize),
    /// `is` repeated.
    DutchSharp(usize),
    /// `b` repeated.
    Flat(usize),
    /// `#` repeated.
    Sharp(usize),
}

/// Syntactic pieces of a pitch name, before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PitchTokens<'a> {
    /// Lower-case letter, `a`..=`g`.
    letter: char,
    /// The name started with the `as`/`es` contraction.
    contracted_flat: bool,
    accidentals: AccidentalRun,
    octave: &'a str,
}

/// Parse a pitch name into `(base_pitch_id, transposition)`.
pub fn parse(name: &str) -> Result<(i32, i32)> {
    let invalid = || TheoryError::InvalidPitchName {
        name: name.to_string(),
    };
    let lowered = name.to_ascii_lowercase();
    let tokens = tokenize(&lowered).ok_or_else(invalid)?;

    let letter_index = LETTERS
        .iter()
        .position(|&l| l == tokens.letter)
        .ok_or_else(invalid)? as i32;
    let octave: i32 = tokens.octave.parse().map_err(|_| invalid())?;

    let mut transposition: i32 = match tokens.accidentals {
        AccidentalRun::None => 0,
        AccidentalRun::DutchFlat(n) | AccidentalRun::Flat(n) => -(n as i32),
        AccidentalRun::DutchSharp(n) | AccidentalRun::Sharp(n) => n as i32,
    };
    if tokens.contracted_flat {
        transposition -= 1;
    }

    let base_pitch_id = octave
        .checked_mul(7)
        .and_then(|v| v.checked_add(letter_index))
        .ok_or_else(invalid)?;
    // The MIDI number must be representable as well.
    octave
        .checked_add(1)
        .and_then(|v| v.checked_mul(12))
        .and_then(|v| v.checked_add(NATURAL_SEMITONES[letter_index as usize]))
        .and_then(|v| v.checked_add(transposition))
        .ok_or_else(invalid)?;
    Ok((base_pitch_id, transposition))
}

/// Canonical display name: letter, `|transposition|` flat or sharp glyphs,
/// then the octave.
pub fn format(base_pitch_id: i32, transposition: i32) -> String {
    let mut out = String::new();
    out.push(letter_for(base_pitch_id));
    let glyph = if transposition > 0 { SHARP_GLYPH } else { FLAT_GLYPH };
    for _ in 0..transposition.unsigned_abs() {
        out.push(glyph);
    }
    out.push_str(&base_pitch_id.div_euclid(7).to_string());
    out
}

/// Dutch-style ASCII name (`cis4`, `bes3`, `as4`, `eses2`). Re-parses to the
/// same `(base_pitch_id, transposition)` for non-negative octaves.
pub fn format_ascii(base_pitch_id: i32, transposition: i32) -> String {
    let letter = letter_for(base_pitch_id);
    let mut out = String::new();
    out.push(letter);
    if transposition > 0 {
        out.push_str(&"is".repeat(transposition as usize));
    } else if transposition < 0 {
        let flats = transposition.unsigned_abs() as usize;
        // a + es and e + es contract to "as" / "es".
        if letter == 'a' || letter == 'e' {
            out.push('s');
            out.push_str(&"es".repeat(flats - 1));
        } else {
            out.push_str(&"es".repeat(flats));
        }
    }
    out.push_str(&base_pitch_id.div_euclid(7).to_string());
    out
}

fn letter_for(base_pitch_id: i32) -> char {
    LETTERS[base_pitch_id.rem_euclid(7) as usize]
}

/// Split a lower-cased name into tokens. Returns `None` on any syntax error.
fn tokenize(name: &str) -> Option<PitchTokens<'_>> {
    let (letter, contracted_flat, rest) = if let Some(rest) = name.strip_prefix("as") {
        ('a', true, rest)
    } else if let Some(rest) = name.strip_prefix("es") {
        ('e', true, rest)
    } else {
        let letter = name.chars().next()?;
        if !('a'..='g').contains(&letter) {
            return None;
        }
        (letter, false, &name[1..])
    };

    let (accidentals, octave) = split_accidentals(rest);
    if octave.is_empty() || !octave.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(PitchTokens {
        letter,
        contracted_flat,
        accidentals,
        octave,
    })
}

/// Consume the longest homogeneous accidental run at the front of `rest`.
/// The family is fixed by the first marker; whatever follows is returned
/// unparsed so the caller can demand an octave there.
fn split_accidentals(rest: &str) -> (AccidentalRun, &str) {
    if rest.starts_with("es") {
        let (n, tail) = count_repeats(rest, "es");
        (AccidentalRun::DutchFlat(n), tail)
    } else if rest.starts_with("is") {
        let (n, tail) = count_repeats(rest, "is");
        (AccidentalRun::DutchSharp(n), tail)
    } else if rest.starts_with('b') {
        let (n, tail) = count_repeats(rest, "b");
        (AccidentalRun::Flat(n), tail)
    } else if rest.starts_with('#') {
        let (n, tail) = count_repeats(rest, "#");
        (AccidentalRun::Sharp(n), tail)
    } else {
        (AccidentalRun::None, rest)
    }
}

fn count_repeats<'a>(mut rest: &'a str, unit: &str) -> (usize, &'a str) {
    let mut n = 0;
    while let Some(tail) = rest.strip_prefix(unit) {
        n += 1;
        rest = tail;
    }
    (n, rest)
}
