// Cadence-terminated chord progression generator.
//
// A progression is a list of phrases; each phrase is a random walk over
// scale degrees (1-7) driven by a transition table. Each degree maps to a
// list of successors, and a successor is either a single degree or a tied
// pair of degrees that are equally valid next steps. Resolving an entry
// picks one successor uniformly, then one side of a tie uniformly.
//
// Walk for phrase `n`:
// 1. Draw a length threshold uniformly from
//    `min_phrase_threshold..=max_phrase_threshold` (3..=9 by default).
// 2. Open with a degree resolved from the start entry (degree 1's entry
//    unless the table supplies an explicit `start`).
// 3. Repeatedly resolve a successor of the last degree and append it. Once
//    the phrase is longer than the threshold, the phrase closes as soon as
//    the last degree fits the cadence for `n`'s parity:
//    - even `n`, half cadence: last in {1, 2, 4, 6}, then append 5
//    - odd `n`, authentic cadence: last in {1, 2, 4, 6, 7}, then append 5, 1
//
// The walk terminates with probability 1 for any sensible table, but a
// table can make a cadence unreachable, so `max_phrase_len` caps the walk
// and the call fails with `ProgressionTooLong` instead of looping forever.
//
// The generator only deals in degree numbers. A caller that wants pitches
// passes the result through `Progression::realize` with a `DiatonicScale`.
//
// Randomness comes from a caller-owned `CantusRng`; the same seed and
// config always produce the same progression.

use std::collections::BTreeMap;

use cantus_prng::CantusRng;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::pitch::Pitch;
use crate::scale::DiatonicScale;

/// One possible next step in a transition table.
///
/// Serialized as a bare number for `Single` and a two-element array for
/// `Tied`, so tables read naturally in JSON: `[3, 6, [2, 4], [5, 7]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Successor {
    Single(u8),
    /// Either degree, chosen uniformly when the successor is resolved.
    Tied(u8, u8),
}

impl Successor {
    fn degrees(self) -> impl Iterator<Item = u8> {
        let (a, b) = match self {
            Successor::Single(d) => (d, None),
            Successor::Tied(d1, d2) => (d1, Some(d2)),
        };
        std::iter::once(a).chain(b)
    }

    fn resolve(self, rng: &mut CantusRng) -> u8 {
        match self {
            Successor::Single(d) => d,
            Successor::Tied(a, b) => {
                if rng.range_usize(0, 2) == 0 {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Successor lists keyed by scale degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    /// Opening entry for every phrase. Degree 1's entry is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec<Successor>>,
    pub successors: BTreeMap<u8, Vec<Successor>>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        use Successor::{Single, Tied};
        let successors = BTreeMap::from([
            (1, vec![Single(3), Single(6), Tied(2, 4), Tied(5, 7)]),
            (2, vec![Single(4), Tied(5, 7), Single(1)]),
            (3, vec![Single(6), Tied(2, 4), Tied(5, 7), Single(1)]),
            (4, vec![Single(2), Tied(5, 7), Single(1)]),
            (5, vec![Single(7), Single(6), Single(1)]),
            (6, vec![Tied(2, 4), Tied(5, 7), Single(1)]),
            (7, vec![Single(5), Single(1)]),
        ]);
        TransitionTable {
            start: None,
            successors,
        }
    }
}

impl TransitionTable {
    /// Check that every degree 1-7 has a non-empty entry and that every
    /// successor names a degree 1-7.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TheoryError::InvalidTransitionTable(msg));

        for degree in 1..=7u8 {
            match self.successors.get(&degree) {
                None => return invalid(format!("degree {degree} has no entry")),
                Some(entry) if entry.is_empty() => {
                    return invalid(format!("degree {degree} has no successors"));
                }
                Some(_) => {}
            }
        }
        if let Some(&extra) = self.successors.keys().find(|d| !(1..=7u8).contains(*d)) {
            return invalid(format!("entry for unknown degree {extra}"));
        }
        if self.start.as_ref().is_some_and(Vec::is_empty) {
            return invalid("start entry is empty".to_string());
        }

        let entries = self.successors.values().chain(self.start.iter());
        for successor in entries.flatten() {
            if let Some(bad) = successor.degrees().find(|d| !(1..=7u8).contains(d)) {
                return invalid(format!("successor degree {bad} is outside 1-7"));
            }
        }
        Ok(())
    }

    fn opening(&self) -> Result<&[Successor]> {
        match &self.start {
            Some(start) => Ok(start.as_slice()),
            None => self.entry(1),
        }
    }

    fn entry(&self, degree: u8) -> Result<&[Successor]> {
        self.successors
            .get(&degree)
            .map(Vec::as_slice)
            .ok_or_else(|| TheoryError::InvalidTransitionTable(format!("degree {degree} has no entry")))
    }
}

/// Tunables for `generate_progression`. Deserializes from partial JSON;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Number of phrases to generate.
    pub phrase_count: usize,
    /// Lower bound (inclusive) of the per-phrase length threshold.
    pub min_phrase_threshold: usize,
    /// Upper bound (inclusive) of the per-phrase length threshold.
    pub max_phrase_threshold: usize,
    /// Walk length at which a phrase that still has no cadence is abandoned.
    pub max_phrase_len: usize,
    pub transitions: TransitionTable,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        ProgressionConfig {
            phrase_count: 2,
            min_phrase_threshold: 3,
            max_phrase_threshold: 9,
            max_phrase_len: 256,
            transitions: TransitionTable::default(),
        }
    }
}

impl ProgressionConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ProgressionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_phrase_threshold > self.max_phrase_threshold {
            return Err(TheoryError::InvalidConfig(format!(
                "min_phrase_threshold {} exceeds max_phrase_threshold {}",
                self.min_phrase_threshold, self.max_phrase_threshold
            )));
        }
        if self.max_phrase_len <= self.max_phrase_threshold {
            return Err(TheoryError::InvalidConfig(format!(
                "max_phrase_len {} leaves no room past max_phrase_threshold {}",
                self.max_phrase_len, self.max_phrase_threshold
            )));
        }
        self.transitions.validate()
    }
}

/// How a phrase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    /// Ends on V.
    Half,
    /// Ends on V-I.
    Authentic,
}

impl Cadence {
    /// Even phrases end with a half cadence, odd phrases with an authentic one.
    pub fn for_phrase(index: usize) -> Cadence {
        if index % 2 == 0 {
            Cadence::Half
        } else {
            Cadence::Authentic
        }
    }

    /// Whether a phrase whose last degree is `degree` may close here.
    pub fn accepts(self, degree: u8) -> bool {
        match self {
            Cadence::Half => matches!(degree, 1 | 2 | 4 | 6),
            Cadence::Authentic => matches!(degree, 1 | 2 | 4 | 6 | 7),
        }
    }

    /// Degrees appended to close the phrase.
    pub fn resolution(self) -> &'static [u8] {
        match self {
            Cadence::Half => &[5],
            Cadence::Authentic => &[5, 1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub cadence: Cadence,
    /// Resolved scale degrees, cadence included.
    pub degrees: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub phrases: Vec<Phrase>,
}

impl Progression {
    /// Degree lists only, one per phrase.
    pub fn degrees(&self) -> Vec<Vec<u8>> {
        self.phrases.iter().map(|p| p.degrees.clone()).collect()
    }

    /// Map every degree to the scale pitch in the tonic's octave. `None` if
    /// any phrase holds a degree outside 1-7.
    pub fn realize(&self, scale: &DiatonicScale) -> Option<Vec<Vec<Pitch>>> {
        self.phrases
            .iter()
            .map(|phrase| {
                phrase
                    .degrees
                    .iter()
                    .map(|&d| scale.pitch_for_degree(d, 0))
                    .collect::<Option<Vec<_>>>()
            })
            .collect()
    }
}

/// Generate `config.phrase_count` phrases.
pub fn generate_progression(config: &ProgressionConfig, rng: &mut CantusRng) -> Result<Progression> {
    config.validate()?;
    let phrases = (0..config.phrase_count)
        .map(|index| generate_phrase(index, config, rng))
        .collect::<Result<Vec<_>>>()?;
    Ok(Progression { phrases })
}

fn generate_phrase(index: usize, config: &ProgressionConfig, rng: &mut CantusRng) -> Result<Phrase> {
    let table = &config.transitions;
    let cadence = Cadence::for_phrase(index);
    let threshold =
        rng.range_usize_inclusive(config.min_phrase_threshold, config.max_phrase_threshold);
    trace!("phrase {index}: {cadence:?} cadence, length threshold {threshold}");

    let mut degrees = vec![resolve_entry(table.opening()?, rng)?];
    loop {
        if degrees.len() >= config.max_phrase_len {
            warn!(
                "phrase {index}: no {cadence:?} cadence after {} degrees, giving up",
                degrees.len()
            );
            return Err(TheoryError::ProgressionTooLong {
                phrase: index,
                limit: config.max_phrase_len,
            });
        }

        let current = degrees[degrees.len() - 1];
        let next = resolve_entry(table.entry(current)?, rng)?;
        degrees.push(next);

        if degrees.len() > threshold && cadence.accepts(next) {
            degrees.extend_from_slice(cadence.resolution());
            debug!("phrase {index}: {cadence:?} cadence, {} degrees", degrees.len());
            return Ok(Phrase { cadence, degrees });
        }
    }
}

fn resolve_entry(entry: &[Successor], rng: &mut CantusRng) -> Result<u8> {
    let successor = rng
        .choose(entry)
        .ok_or_else(|| TheoryError::InvalidTransitionTable("empty successor list".to_string()))?;
    Ok(successor.resolve(rng))
}
