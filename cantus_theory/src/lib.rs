// Cantus music theory core.
//
// A diatonic pitch/interval algebra plus a small cadence-driven chord
// progression generator. Pitches and intervals are tracked as two
// independent quantities (letter steps and semitones), which is what lets
// the algebra spell results correctly: A3 + A3 is C##4, not D4, and C4 to
// Bb4 is a minor seventh, not an augmented sixth.
//
// Architecture:
// - pitch_name.rs: pitch name parser/formatter (`cis4`, `as3`, `Bb2`)
// - pitch.rs: `Pitch` value type, spelling vs enharmonic equality, ordering
// - interval_name.rs: interval name parser/formatter and quality tables
// - interval.rs: `Interval` value type, measured from pitch pairs
// - algebra.rs: transposition and pitch differences (+ `std::ops` impls)
// - scale.rs: `DiatonicScale` and `Mode`, scale membership by spelling
// - progression.rs: transition-table random walk producing cadenced phrases
// - error.rs: `TheoryError`
//
// All theory types are small immutable `Copy`/`Clone` values; the only
// mutable state anywhere is the caller-owned `CantusRng` passed into
// `generate_progression`.

pub mod algebra;
pub mod error;
pub mod interval;
pub mod interval_name;
pub mod pitch;
pub mod pitch_name;
pub mod progression;
pub mod scale;

pub use error::{Result, TheoryError};
pub use interval::Interval;
pub use pitch::Pitch;
pub use progression::{
    Cadence, Phrase, Progression, ProgressionConfig, Successor, TransitionTable,
    generate_progression,
};
pub use scale::{DiatonicScale, Mode};
