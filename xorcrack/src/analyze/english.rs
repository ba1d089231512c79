use once_cell::sync::Lazy;
use tracing::debug;

use super::histogram::{relative_score, ByteHistogram, CharHistogram, Score};

/// A sample of modern English prose, the opening of the hut scene in Lady Chatterley's Lover.
pub const ENGLISH_TEXT: &str = include_str!("../../data/english_reference.txt");

/// How far a score may drift from the reference's own score and still count as English.
/// Chosen empirically.
pub const DEFAULT_TOLERANCE: Score = 50.0;

static ENGLISH: Lazy<Reference> = Lazy::new(|| Reference::build(ENGLISH_TEXT));

/// The reference distribution of the bundled English sample, built on first use.
pub fn english() -> &'static Reference {
    &ENGLISH
}

/// Scores a text against the bundled English reference.
pub fn score(text: &str) -> Score {
    english().score(text)
}

/// Returns whether a text is considered modern English by the bundled reference.
pub fn is_english(text: &str) -> bool {
    english().is_english(text)
}

/// A trait which allows to score a piece of plaintext by its similarity to a language.
///
/// The score of a text is the sum of the weights of all of its characters divided by its
/// length in bytes, so longer texts do not score higher and multi-byte scripts score low.
pub trait Scorer {
    /// Weight of a single character, 0 if it does not occur in the language.
    fn weight(&self, c: char) -> usize;

    /// Bytes of the language, ranked by how often they occur.
    fn ranked_bytes(&self) -> &ByteHistogram;

    /// Whether a score is close enough to the language to accept the text.
    fn is_english_score(&self, score: Score) -> bool;

    fn score(&self, text: &str) -> Score {
        relative_score(text.chars().map(|c| self.weight(c)).sum(), text.len())
    }

    /// Scores raw bytes. Invalid UTF-8 decodes to U+FFFD, which weighs nothing,
    /// and the divisor stays the number of bytes.
    fn score_bytes(&self, bytes: &[u8]) -> Score {
        let text = String::from_utf8_lossy(bytes);
        relative_score(text.chars().map(|c| self.weight(c)).sum(), bytes.len())
    }

    fn is_english(&self, text: &str) -> bool {
        self.is_english_score(self.score(text))
    }
}

/// Character frequencies of a reference corpus together with the corpus's score against itself.
/// Immutable once built.
#[derive(Clone, Debug)]
pub struct Reference {
    chars: CharHistogram,
    bytes: ByteHistogram,
    self_score: Score,
    tolerance: Score,
}

impl Reference {
    /// Counts every character of the corpus. Characters that fit into a single byte
    /// also make up the byte ranking used to guess single-byte keys.
    pub fn build(corpus: &str) -> Self {
        let chars = CharHistogram::count(corpus.chars());
        let bytes: ByteHistogram = chars
            .iter_high()
            .filter_map(|entry| u8::try_from(entry.key).ok().map(|b| (b, entry.value)))
            .collect();

        let mut reference = Self {
            chars,
            bytes,
            self_score: 0.0,
            tolerance: DEFAULT_TOLERANCE,
        };
        reference.self_score = reference.score(corpus);

        debug!(
            "reference built: {} distinct chars, self score {:.2}",
            reference.chars.len(),
            reference.self_score
        );
        reference
    }

    pub fn with_tolerance(mut self, tolerance: Score) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The score of the corpus against itself, the baseline of a fully English text.
    pub fn self_score(&self) -> Score {
        self.self_score
    }

    pub fn tolerance(&self) -> Score {
        self.tolerance
    }

    pub fn chars(&self) -> &CharHistogram {
        &self.chars
    }
}

impl Scorer for Reference {
    fn weight(&self, c: char) -> usize {
        self.chars.get(&c).unwrap_or(0)
    }

    fn ranked_bytes(&self) -> &ByteHistogram {
        &self.bytes
    }

    fn is_english_score(&self, score: Score) -> bool {
        self.self_score - self.tolerance < score && score < self.self_score + self.tolerance
    }
}

#[test]
fn test_reference() {
    let reference = english();
    assert!((410.0..411.0).contains(&reference.self_score()));
    assert_eq!(reference.weight(' '), 1101);
    assert_eq!(reference.weight('e'), 566);
    assert_eq!(reference.weight('€'), 0);

    let top: Vec<u8> = reference.ranked_bytes().iter_high().take(3).map(|e| e.key).collect();
    assert_eq!(top, b" et");
}

#[test]
fn test_score_empty() {
    assert_eq!(score(""), 0.0);
    assert_eq!(english().score_bytes(&[]), 0.0);
}

#[test]
fn test_score_bytes_matches_text() {
    let text = "I wish to watch my Irish wristwatch";
    assert_eq!(english().score_bytes(text.as_bytes()), score(text));
    // 0xff is never valid UTF-8 and must count towards the length only
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0xff);
    assert!(english().score_bytes(&bytes) < score(text));
}

#[test]
fn test_tolerance() {
    let strict = Reference::build(ENGLISH_TEXT).with_tolerance(0.0);
    assert!(!strict.is_english(ENGLISH_TEXT));
    assert!(english().is_english(ENGLISH_TEXT));
}
