use std::{borrow::Cow, iter, ops::RangeInclusive};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{
    english::{Reference, Scorer},
    histogram::{relative_score, Score, SizeScoreHistogram},
    single_byte::{KeyedPlaintext, SingleByteBreaker},
};
use crate::error::{ToolsError, ToolsResult, UnreliableKeyLength};

/// Number of differing bits between two bytes.
pub fn hamming(byte1: u8, byte2: u8) -> usize {
    (byte1 ^ byte2).count_ones() as usize
}

/// Extends the single byte hamming distance to byte slices. The shorter slice is padded with zeros.
pub fn hamming_distance(bytes1: &[u8], bytes2: &[u8]) -> usize {
    let (long, short) = if bytes1.len() >= bytes2.len() {
        (bytes1, bytes2)
    } else {
        (bytes2, bytes1)
    };

    long.iter()
        .zip(short.iter().chain(iter::repeat(&0)))
        .map(|(&u, &v)| hamming(u, v))
        .sum()
}

/// Splits bytes into `keylength` streams, where stream i holds every byte at a position p with p % keylength == i.
pub fn transpose(bytes: &[u8], keylength: usize) -> Vec<Vec<u8>> {
    (0..keylength)
        .map(|index| bytes.iter().skip(index).step_by(keylength).copied().collect())
        .collect()
}

/// Inverse of [`transpose`]: stream i fills the positions i, i + n, i + 2n, ... for n streams.
pub fn interleave(streams: &[Vec<u8>]) -> Vec<u8> {
    let keylength = streams.len();
    let mut bytes = vec![0; streams.iter().map(Vec::len).sum()];

    for (index, stream) in streams.iter().enumerate() {
        for (position, &byte) in stream.iter().enumerate() {
            if let Some(slot) = bytes.get_mut(index + position * keylength) {
                *slot = byte;
            }
        }
    }
    bytes
}

/// Ranks the keylengths of a repeating-key-xor ciphertext by the normalized hamming distance of
/// consecutive keylength-sized blocks. Blocks aligned with the key xor the same key bytes, so their
/// distance is the distance of the plaintext blocks, which is small for English.
#[derive(Clone, Debug)]
pub struct KeyLengthEstimator {
    keylengths: RangeInclusive<usize>,
    samples: usize,
}

impl KeyLengthEstimator {
    pub fn new(keylengths: RangeInclusive<usize>) -> ToolsResult<Self> {
        if *keylengths.start() == 0 || keylengths.is_empty() {
            return Err(ToolsError::InvalidKeyLengthRange {
                min: *keylengths.start(),
                max: *keylengths.end(),
            });
        }
        Ok(Self {
            keylengths,
            samples: 1,
        })
    }

    /// Number of consecutive block pairs averaged per keylength. At least one pair is always taken.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn keylengths(&self) -> RangeInclusive<usize> {
        self.keylengths.clone()
    }

    /// Average bit distance per byte between block 2j and block 2j+1, over all sample pairs j that fit.
    pub fn normalized_distance(&self, bytes: &[u8], keylength: usize) -> ToolsResult<Score> {
        let needed = 2 * keylength;
        if keylength == 0 || bytes.len() < needed {
            return Err(ToolsError::InputTooShort {
                keylength,
                needed,
                actual: bytes.len(),
            });
        }

        let distances: Vec<Score> = bytes
            .chunks_exact(needed)
            .take(self.samples)
            .map(|pair| {
                let (first, second) = pair.split_at(keylength);
                relative_score(hamming_distance(first, second), keylength)
            })
            .collect();

        Ok(distances.iter().sum::<Score>() / distances.len() as Score)
    }

    /// Scores every keylength of the range. Keylengths the ciphertext is too short for are left out.
    /// The most probable keylength has the lowest score, see [`SizeScoreHistogram::iter_low`].
    pub fn rank(&self, bytes: &[u8]) -> ToolsResult<SizeScoreHistogram> {
        let mut scores = Vec::new();
        for keylength in self.keylengths() {
            match self.normalized_distance(bytes, keylength) {
                Ok(score) => scores.push((keylength, score)),
                Err(ToolsError::InputTooShort { .. }) => {
                    debug!("keylength {}: input too short, skipped", keylength);
                }
                Err(err) => return Err(err),
            }
        }

        if scores.is_empty() {
            let keylength = *self.keylengths.start();
            return Err(ToolsError::InputTooShort {
                keylength,
                needed: 2 * keylength,
                actual: bytes.len(),
            });
        }

        let ranking: SizeScoreHistogram = scores.into_iter().collect();
        debug!("keylength ranking: {}", ranking);
        Ok(ranking)
    }
}

/// The outcome of decrypting with an assumed keylength.
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatingKeyAttempt {
    key: Vec<u8>,
    plaintext: Vec<u8>,
    failures: usize,
}

impl RepeatingKeyAttempt {
    pub fn keylength(&self) -> usize {
        self.key.len()
    }

    pub fn get_key(&self) -> &[u8] {
        &self.key
    }

    /// The smallest period of the recovered key, e.g. `ICE` for a key recovered as `ICEICE`.
    pub fn shortest_key(&self) -> &[u8] {
        let len = self.key.len();
        let period = (1..=len)
            .find(|&p| len % p == 0 && self.key.iter().enumerate().all(|(i, &b)| b == self.key[i % p]))
            .unwrap_or(len);
        &self.key[..period]
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    pub fn into_plaintext(self) -> Vec<u8> {
        self.plaintext
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.plaintext)
    }

    /// Number of streams whose single-byte attack did not clear the english threshold.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Fewer than half of the streams failed.
    pub fn is_reliable(&self) -> bool {
        2 * self.failures < self.keylength()
    }

    pub fn check(&self) -> Result<&Self, UnreliableKeyLength> {
        if self.is_reliable() {
            Ok(self)
        } else {
            Err(UnreliableKeyLength {
                keylength: self.keylength(),
                failures: self.failures,
            })
        }
    }
}

/// Breaks repeating-key-xor by splitting the ciphertext into one single-byte-xor problem per key byte.
#[derive(Clone, Debug)]
pub struct RepeatingKeyBreaker<'a, S: Scorer = Reference> {
    single: SingleByteBreaker<'a, S>,
    estimator: KeyLengthEstimator,
}

impl<'a, S: Scorer + Sync> RepeatingKeyBreaker<'a, S> {
    pub fn new(single: SingleByteBreaker<'a, S>, estimator: KeyLengthEstimator) -> Self {
        Self { single, estimator }
    }

    pub fn estimator(&self) -> &KeyLengthEstimator {
        &self.estimator
    }

    /// Decrypts assuming the given keylength. The streams are attacked in parallel.
    pub fn try_keylength(&self, ciphertext: &[u8], keylength: usize) -> ToolsResult<RepeatingKeyAttempt> {
        if keylength == 0 {
            return Err(ToolsError::InvalidKeyLengthRange { min: 0, max: 0 });
        }
        if ciphertext.len() < keylength {
            return Err(ToolsError::InputTooShort {
                keylength,
                needed: keylength,
                actual: ciphertext.len(),
            });
        }

        let results = transpose(ciphertext, keylength)
            .par_iter()
            .map(|stream| self.single.attack(stream))
            .collect::<ToolsResult<Vec<KeyedPlaintext>>>()?;

        let failures = results.iter().filter(|v| !v.is_confident()).count();
        let key: Vec<u8> = results.iter().map(KeyedPlaintext::get_key).collect();
        let streams: Vec<Vec<u8>> = results.into_iter().map(KeyedPlaintext::into_plaintext).collect();

        debug!(
            "keylength {}: {} out of {} blocks look non-english",
            keylength, failures, keylength
        );

        Ok(RepeatingKeyAttempt {
            key,
            plaintext: interleave(&streams),
            failures,
        })
    }

    /// Tries keylengths from the most to the least probable and accepts the first reliable attempt
    /// whose failure count is not above the lowest failure count seen so far. If none is accepted,
    /// the best effort is returned, reliable attempts first, then by fewest failures;
    /// see [`RepeatingKeyAttempt::check`].
    pub fn attack(&self, ciphertext: &[u8]) -> ToolsResult<RepeatingKeyAttempt> {
        let ranking = self.estimator.rank(ciphertext)?;

        let mut lowest = usize::MAX;
        let mut fallback: Option<RepeatingKeyAttempt> = None;

        for entry in ranking.iter_low() {
            debug!("trying keylength {} with distance {:.3}", entry.key, entry.value);
            let attempt = self.try_keylength(ciphertext, entry.key)?;
            lowest = lowest.min(attempt.failures);

            if attempt.is_reliable() && attempt.failures <= lowest {
                info!(
                    "accepted keylength {} with {} failing blocks",
                    attempt.keylength(),
                    attempt.failures
                );
                return Ok(attempt);
            }

            let better = fallback.as_ref().map_or(true, |best| {
                (!attempt.is_reliable(), attempt.failures) < (!best.is_reliable(), best.failures)
            });
            if better {
                fallback = Some(attempt);
            }
        }

        let attempt = fallback.ok_or(ToolsError::EmptyInput)?;
        warn!(
            "no keylength in {:?} accepted, best effort has {} out of {} blocks failing",
            self.estimator.keylengths(),
            attempt.failures,
            attempt.keylength()
        );
        Ok(attempt)
    }
}

#[test]
fn test_hamming_dist() {
    assert_eq!(hamming_distance(b"this is a test", b"wokka wokka!!!"), 37);
    assert_eq!(hamming_distance(b"abc", b"abc"), 0);
    // padding with zero bytes counts every set bit of the longer slice
    assert_eq!(hamming_distance(&[0xff, 0x01], &[0xff]), 1);
    assert_eq!(hamming_distance(&[], &[0x0f]), 4);
}

#[test]
fn test_transpose_interleave() {
    let bytes = b"abcdefgh";
    let streams = transpose(bytes, 3);
    assert_eq!(streams, vec![b"adg".to_vec(), b"beh".to_vec(), b"cf".to_vec()]);
    assert_eq!(interleave(&streams), bytes.to_vec());
    assert!(interleave(&[]).is_empty());
}

#[test]
fn test_estimator_range() {
    assert!(KeyLengthEstimator::new(2..=40).is_ok());
    assert!(matches!(
        KeyLengthEstimator::new(0..=4),
        Err(ToolsError::InvalidKeyLengthRange { min: 0, max: 4 })
    ));
    assert!(KeyLengthEstimator::new(5..=4).is_err());
}

#[test]
fn test_estimator_skips_short_input() {
    let estimator = KeyLengthEstimator::new(2..=10).unwrap();
    let ranking = estimator.rank(&[0u8; 9]).unwrap();
    let keylengths: Vec<usize> = ranking.iter_low().map(|e| e.key).collect();
    assert_eq!(keylengths, vec![2, 3, 4]);

    assert!(matches!(
        estimator.rank(&[1, 2, 3]),
        Err(ToolsError::InputTooShort { keylength: 2, needed: 4, actual: 3 })
    ));
}

#[test]
fn test_normalized_distance_samples() {
    // blocks: [0x00 0x00] [0xff 0xff] [0x00 0x00] [0x00 0x00]
    let bytes = [0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00];
    let one = KeyLengthEstimator::new(2..=2).unwrap();
    assert_eq!(one.normalized_distance(&bytes, 2).unwrap(), 8.0);

    let two = one.clone().samples(2);
    assert_eq!(two.normalized_distance(&bytes, 2).unwrap(), 4.0);

    // a third pair does not fit and is left out of the average
    let three = one.samples(3);
    assert_eq!(three.normalized_distance(&bytes, 2).unwrap(), 4.0);
}

#[test]
fn test_shortest_key() {
    let attempt = RepeatingKeyAttempt {
        key: b"ICEICE".to_vec(),
        plaintext: Vec::new(),
        failures: 0,
    };
    assert_eq!(attempt.shortest_key(), b"ICE");
    assert!(attempt.is_reliable());

    let attempt = RepeatingKeyAttempt {
        key: b"ICEIC".to_vec(),
        plaintext: Vec::new(),
        failures: 3,
    };
    assert_eq!(attempt.shortest_key(), b"ICEIC");
    assert_eq!(
        attempt.check().unwrap_err(),
        UnreliableKeyLength { keylength: 5, failures: 3 }
    );
}
