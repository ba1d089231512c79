use std::{borrow::Cow, cmp::Ordering, fmt::Display};

use clap::ValueEnum;
use tracing::debug;

use super::{
    english::{Reference, Scorer},
    histogram::{ByteHistogram, ByteScoreHistogram, Score},
};
use crate::{
    encode::hex::from_hex,
    encrypt::xor::XOREnc,
    error::{LowConfidence, ToolsError, ToolsResult},
};

/// Scores below this are probably not English, on the scale of the bundled reference.
pub const DEFAULT_THRESHOLD: Score = 350.0;

/// Pairs of (ciphertext rank, reference rank) whose bytes are xored into candidate keys.
/// The most frequent ciphertext byte is very likely one of the most frequent plaintext bytes.
pub const RANK_PAIRINGS: [(usize, usize); 7] =
    [(0, 0), (1, 1), (2, 2), (0, 1), (1, 0), (1, 2), (2, 1)];

/// How candidate keys for a single-byte-xor attack are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Only keys matching the top ranked ciphertext bytes with the top ranked reference bytes.
    #[default]
    Heuristic,
    /// All 256 keys.
    Exhaustive,
}

/// A decryption candidate together with the single-byte key that produced it and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedPlaintext {
    key: u8,
    plaintext: Vec<u8>,
    score: Score,
    threshold: Score,
}

impl KeyedPlaintext {
    pub fn get_key(&self) -> u8 {
        self.key
    }

    pub fn get_score(&self) -> Score {
        self.score
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    pub fn into_plaintext(self) -> Vec<u8> {
        self.plaintext
    }

    /// The plaintext as text, invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.plaintext)
    }

    /// Whether the score clears the english threshold of the breaker that produced it.
    pub fn is_confident(&self) -> bool {
        self.score >= self.threshold
    }

    /// Turns a low score into an error for callers that only want confident results.
    pub fn check(&self) -> Result<&Self, LowConfidence> {
        if self.is_confident() {
            Ok(self)
        } else {
            Err(LowConfidence {
                score: self.score,
                threshold: self.threshold,
            })
        }
    }

    /// Orders by score. On equal scores the smaller key is considered better.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl Display for KeyedPlaintext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " key |  score  |  N  |")?;
        writeln!(
            f,
            "{:5}|{:9.2}|{:5}|",
            self.key,
            self.score,
            self.plaintext.len()
        )
    }
}

/// A TaggedPlaintext decorates a KeyedPlaintext with a tag, e.g. the line a ciphertext was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedPlaintext<T> {
    tag: T,
    plaintext: KeyedPlaintext,
}

impl<T> TaggedPlaintext<T> {
    pub fn add_tag(plaintext: KeyedPlaintext, tag: T) -> Self {
        Self { tag, plaintext }
    }

    pub fn get_tag(&self) -> &T {
        &self.tag
    }

    pub fn get_key(&self) -> u8 {
        self.plaintext.get_key()
    }

    pub fn get_score(&self) -> Score {
        self.plaintext.get_score()
    }

    pub fn plaintext(&self) -> &KeyedPlaintext {
        &self.plaintext
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.plaintext.compare(&other.plaintext)
    }
}

impl<T: Display> Display for TaggedPlaintext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " tag | key |  score  |  N  |")?;
        writeln!(
            f,
            "{:5}|{:5}|{:9.2}|{:5}|",
            self.tag,
            self.get_key(),
            self.get_score(),
            self.plaintext.plaintext.len()
        )
    }
}

/// Statistical attack on ciphertext assumed to be English xored with one repeated byte.
#[derive(Debug)]
pub struct SingleByteBreaker<'a, S: Scorer = Reference> {
    scorer: &'a S,
    strategy: Strategy,
    threshold: Score,
}

impl<S: Scorer> Clone for SingleByteBreaker<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Scorer> Copy for SingleByteBreaker<'_, S> {}

impl<'a, S: Scorer> SingleByteBreaker<'a, S> {
    pub fn new(scorer: &'a S) -> Self {
        Self {
            scorer,
            strategy: Strategy::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn threshold(mut self, threshold: Score) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn scorer(&self) -> &'a S {
        self.scorer
    }

    /// Keys worth trying for the given ciphertext. May contain duplicates.
    pub fn candidate_keys(&self, ciphertext: &[u8]) -> Vec<u8> {
        match self.strategy {
            Strategy::Exhaustive => (0..=u8::MAX).collect(),
            Strategy::Heuristic => {
                let frequencies = ByteHistogram::count(ciphertext.iter().copied());
                let reference = self.scorer.ranked_bytes();

                RANK_PAIRINGS
                    .iter()
                    .filter_map(|&(encrypted, plain)| {
                        let encrypted = frequencies.get_high(encrypted).ok()?;
                        let plain = reference.get_high(plain).ok()?;
                        Some(encrypted.key ^ plain.key)
                    })
                    .collect()
            }
        }
    }

    /// Decrypts with every candidate key and keeps the best scoring plaintext. A result below
    /// the threshold is still returned; see [`KeyedPlaintext::check`].
    pub fn attack(&self, ciphertext: &[u8]) -> ToolsResult<KeyedPlaintext> {
        if ciphertext.is_empty() {
            return Err(ToolsError::EmptyInput);
        }

        let scores: ByteScoreHistogram = self
            .candidate_keys(ciphertext)
            .into_iter()
            .map(|key| {
                let candidate = XOREnc::single(ciphertext, key);
                (key, self.scorer.score_bytes(&candidate))
            })
            .collect();

        let best = scores.get_high(0)?;
        let result = KeyedPlaintext {
            key: best.key,
            plaintext: XOREnc::single(ciphertext, best.key),
            score: best.value,
            threshold: self.threshold,
        };

        if !result.is_confident() {
            debug!(
                "key {:#04x} has score {:.2}, probably not english",
                result.key, result.score
            );
        }
        Ok(result)
    }

    /// Finds the single-byte-xor encrypted line among hex encoded lines. Blank lines are skipped,
    /// lines that are not valid hex abort the search. Returns None if there is no line at all.
    pub fn detect<'l, I>(&self, lines: I) -> ToolsResult<Option<TaggedPlaintext<usize>>>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut best: Option<TaggedPlaintext<usize>> = None;

        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let candidate = TaggedPlaintext::add_tag(self.attack(&from_hex(line)?)?, index);
            debug!(
                "line {}: key {:#04x}, score {:.2}",
                index,
                candidate.get_key(),
                candidate.get_score()
            );

            best = match best {
                Some(current) if current.compare(&candidate) != Ordering::Less => Some(current),
                _ => Some(candidate),
            };
        }

        Ok(best)
    }
}

#[cfg(test)]
const COOKING: &str = "1b37373331363f78151b7f2b783431333d78397828372d363c78373e783a393b3736";

#[test]
fn test_heuristic_attack() {
    let reference = super::english::english();
    let bytes = from_hex(COOKING).unwrap();

    let result = SingleByteBreaker::new(reference).attack(&bytes).unwrap();
    assert_eq!(result.get_key(), b'X');
    assert_eq!(result.text(), "Cooking MC's like a pound of bacon");
    assert!(result.check().is_ok());
}

#[test]
fn test_exhaustive_attack() {
    let reference = super::english::english();
    let bytes = from_hex(COOKING).unwrap();

    let breaker = SingleByteBreaker::new(reference).strategy(Strategy::Exhaustive);
    assert_eq!(breaker.candidate_keys(&bytes).len(), 256);

    let result = breaker.attack(&bytes).unwrap();
    assert_eq!(result.get_key(), b'X');
    assert_eq!(result.plaintext(), b"Cooking MC's like a pound of bacon");
}

#[test]
fn test_candidate_keys() {
    let reference = super::english::english();
    let breaker = SingleByteBreaker::new(reference);

    assert_eq!(breaker.candidate_keys(&from_hex(COOKING).unwrap()).len(), 7);
    // a single distinct byte only has rank 0, so only (0,0) and (0,1) apply
    assert_eq!(breaker.candidate_keys(&[0x41, 0x41]), vec![0x41 ^ b' ', 0x41 ^ b'e']);
}

#[test]
fn test_empty_input() {
    let reference = super::english::english();
    assert!(matches!(
        SingleByteBreaker::new(reference).attack(&[]),
        Err(ToolsError::EmptyInput)
    ));
}

#[test]
fn test_threshold() {
    let reference = super::english::english();
    let bytes = from_hex(COOKING).unwrap();

    let result = SingleByteBreaker::new(reference)
        .threshold(1000.0)
        .attack(&bytes)
        .unwrap();
    assert_eq!(result.get_key(), b'X');
    assert!(!result.is_confident());
    let err = result.check().unwrap_err();
    assert_eq!(err.threshold, 1000.0);
    assert_eq!(err.score, result.get_score());
}
