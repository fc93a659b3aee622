// Diatonic scales built by interval arithmetic from a tonic.
//
// A scale is seven spelled pitches: each degree is the tonic transposed by
// that degree's interval (P1, M2, M3, P4, P5, M6, M7 for major), so the
// scale always uses each letter exactly once and picks up whatever sharps or
// flats the tonic implies. F# major gets E#, not F.
//
// The seven diatonic modes differ only in the qualities of those intervals;
// `Mode::Ionian` is the major scale and is what `DiatonicScale::build` uses.
//
// Membership (`is_diatonic`, `degree_of`) compares spelling with the octave
// ignored, NOT sounding pitch: in C major, F is diatonic and E# is not.
//
// Used by callers of `progression.rs` to turn generated scale degrees into
// pitches in a key.

use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::pitch::Pitch;

/// The seven diatonic modes, each defined by its interval pattern from the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Major: P1 M2 M3 P4 P5 M6 M7
    #[default]
    Ionian,
    /// P1 M2 m3 P4 P5 M6 m7
    Dorian,
    /// P1 m2 m3 P4 P5 m6 m7
    Phrygian,
    /// P1 M2 M3 A4 P5 M6 M7
    Lydian,
    /// P1 M2 M3 P4 P5 M6 m7
    Mixolydian,
    /// Natural minor: P1 M2 m3 P4 P5 m6 m7
    Aeolian,
    /// P1 m2 m3 P4 d5 m6 m7
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// Chromatic offset of each degree from the major/perfect interval of the
    /// same size.
    fn alterations(self) -> [i32; 7] {
        match self {
            Mode::Ionian => [0, 0, 0, 0, 0, 0, 0],
            Mode::Dorian => [0, 0, -1, 0, 0, 0, -1],
            Mode::Phrygian => [0, -1, -1, 0, 0, -1, -1],
            Mode::Lydian => [0, 0, 0, 1, 0, 0, 0],
            Mode::Mixolydian => [0, 0, 0, 0, 0, 0, -1],
            Mode::Aeolian => [0, 0, -1, 0, 0, -1, -1],
            Mode::Locrian => [0, -1, -1, 0, -1, -1, -1],
        }
    }

    /// Ascending intervals from the tonic to degrees 1-7.
    pub fn intervals(self) -> [Interval; 7] {
        let alterations = self.alterations();
        std::array::from_fn(|degree| Interval::new(degree as i32, alterations[degree], false))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiatonicScale {
    tonic: Pitch,
    mode: Mode,
    pitches: [Pitch; 7],
}

impl DiatonicScale {
    /// Major scale on `tonic`.
    pub fn build(tonic: Pitch) -> Self {
        DiatonicScale::with_mode(tonic, Mode::Ionian)
    }

    pub fn with_mode(tonic: Pitch, mode: Mode) -> Self {
        let pitches = mode.intervals().map(|interval| tonic.transpose_by(interval));
        DiatonicScale {
            tonic,
            mode,
            pitches,
        }
    }

    pub fn tonic(&self) -> Pitch {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Degrees 1-7 in ascending order, starting at the tonic.
    pub fn pitches(&self) -> &[Pitch; 7] {
        &self.pitches
    }

    /// Whether `pitch` is spelled as one of the scale's degrees, in any octave.
    pub fn is_diatonic(&self, pitch: &Pitch) -> bool {
        self.degree_of(pitch).is_some()
    }

    /// 1-based scale degree of `pitch` (octave ignored), or `None`.
    pub fn degree_of(&self, pitch: &Pitch) -> Option<u8> {
        self.pitches
            .iter()
            .position(|p| p.same_spelling(pitch, true))
            .map(|idx| idx as u8 + 1)
    }

    /// The pitch of a 1-based degree, shifted by whole octaves from the
    /// tonic's octave. `None` outside 1..=7.
    pub fn pitch_for_degree(&self, degree: u8, octave_offset: i32) -> Option<Pitch> {
        let idx = usize::from(degree).checked_sub(1)?;
        let pitch = self.pitches.get(idx)?;
        Some(Pitch::from_parts(
            pitch.base_pitch_id() + 7 * octave_offset,
            pitch.transposition(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Pitch {
        Pitch::from_name(name).unwrap()
    }

    fn names(scale: &DiatonicScale) -> Vec<String> {
        scale.pitches().iter().map(|p| p.ascii_name()).collect()
    }

    #[test]
    fn c_major() {
        let scale = DiatonicScale::build(p("c4"));
        assert_eq!(names(&scale), ["c4", "d4", "e4", "f4", "g4", "a4", "b4"]);
        assert_eq!(scale.pitches()[0], scale.tonic());
    }

    #[test]
    fn sharp_and_flat_keys() {
        let d = DiatonicScale::build(p("d4"));
        assert_eq!(names(&d), ["d4", "e4", "fis4", "g4", "a4", "b4", "cis5"]);

        let fis = DiatonicScale::build(p("fis3"));
        assert_eq!(names(&fis), ["fis3", "gis3", "ais3", "b3", "cis4", "dis4", "eis4"]);

        let es = DiatonicScale::build(p("es4"));
        assert_eq!(names(&es), ["es4", "f4", "g4", "as4", "bes4", "c5", "d5"]);
    }

    #[test]
    fn membership_ignores_octave_but_not_spelling() {
        let scale = DiatonicScale::build(p("c4"));
        assert!(scale.is_diatonic(&p("d5")));
        assert!(scale.is_diatonic(&p("b0")));
        assert!(!scale.is_diatonic(&p("eis3")));
        assert!(!scale.is_diatonic(&p("fis4")));
        // Enharmonic to C but spelled as B#.
        assert!(!scale.is_diatonic(&p("bis3")));
    }

    #[test]
    fn degrees() {
        let scale = DiatonicScale::build(p("g3"));
        assert_eq!(scale.degree_of(&p("g5")), Some(1));
        assert_eq!(scale.degree_of(&p("fis2")), Some(7));
        assert_eq!(scale.degree_of(&p("f2")), None);
        assert_eq!(scale.pitch_for_degree(5, 0), Some(p("d4")));
        assert_eq!(scale.pitch_for_degree(1, 1), Some(p("g4")));
        assert_eq!(scale.pitch_for_degree(7, -1), Some(p("fis3")));
        assert_eq!(scale.pitch_for_degree(0, 0), None);
        assert_eq!(scale.pitch_for_degree(8, 0), None);
    }

    #[test]
    fn church_modes_on_white_keys() {
        // Each mode starting on its traditional final uses only naturals.
        let finals = [
            (Mode::Ionian, "c4"),
            (Mode::Dorian, "d4"),
            (Mode::Phrygian, "e4"),
            (Mode::Lydian, "f4"),
            (Mode::Mixolydian, "g4"),
            (Mode::Aeolian, "a4"),
            (Mode::Locrian, "b4"),
        ];
        for (mode, final_name) in finals {
            let scale = DiatonicScale::with_mode(p(final_name), mode);
            assert!(
                scale.pitches().iter().all(|p| p.transposition() == 0),
                "{mode:?} on {final_name}: {:?}",
                names(&scale)
            );
        }
    }

    #[test]
    fn modes_on_a_shared_tonic() {
        let dorian = DiatonicScale::with_mode(p("c4"), Mode::Dorian);
        assert_eq!(names(&dorian), ["c4", "d4", "es4", "f4", "g4", "a4", "bes4"]);
        let locrian = DiatonicScale::with_mode(p("c4"), Mode::Locrian);
        assert_eq!(names(&locrian), ["c4", "des4", "es4", "f4", "ges4", "as4", "bes4"]);
    }

    #[test]
    fn mode_intervals_have_expected_names() {
        let major: Vec<String> = Mode::Ionian.intervals().iter().map(|i| i.name()).collect();
        assert_eq!(major, ["P1", "M2", "M3", "P4", "P5", "M6", "M7"]);
        let lydian: Vec<String> = Mode::Lydian.intervals().iter().map(|i| i.name()).collect();
        assert_eq!(lydian, ["P1", "M2", "M3", "A4", "P5", "M6", "M7"]);
    }
}
