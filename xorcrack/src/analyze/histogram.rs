use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self, Debug, Display},
};

use crate::error::{ToolsError, ToolsResult};

/// A Score is a number that is used to rank something.
pub type Score = f64;

/// Returns numerator/denominator as Score, or 0 for an empty denominator.
pub fn relative_score(numerator: usize, denominator: usize) -> Score {
    if denominator == 0 {
        return 0.0;
    }
    numerator as Score / denominator as Score
}

/// Values a Histogram can be ranked by: plain counts and scores.
pub trait Tally: Copy {
    fn rank(&self, other: &Self) -> Ordering;

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Tally for usize {
    fn rank(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Tally for Score {
    fn rank(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self)
    }
}

/// A single (key, value) pair of a Histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// A map between unique keys and counts or scores, which can be queried by rank.
///
/// Both rankings are computed once on construction. Entries with equal values are
/// always ordered by ascending key, so `get_high`/`get_low` are reproducible.
#[derive(Clone, Debug)]
pub struct Histogram<K, V> {
    values: BTreeMap<K, V>,
    high: Vec<Entry<K, V>>,
    low: Vec<Entry<K, V>>,
}

pub type CharHistogram = Histogram<char, usize>;
pub type ByteHistogram = Histogram<u8, usize>;
pub type ByteScoreHistogram = Histogram<u8, Score>;
pub type SizeScoreHistogram = Histogram<usize, Score>;

impl<K: Ord + Copy, V: Tally> Histogram<K, V> {
    pub fn new(values: BTreeMap<K, V>) -> Self {
        let entries = values.iter().map(|(&key, &value)| Entry { key, value });

        let mut high: Vec<Entry<K, V>> = entries.clone().collect();
        high.sort_by(|a, b| b.value.rank(&a.value).then_with(|| a.key.cmp(&b.key)));

        let mut low: Vec<Entry<K, V>> = entries.collect();
        low.sort_by(|a, b| a.value.rank(&b.value).then_with(|| a.key.cmp(&b.key)));

        Self { values, high, low }
    }

    /// Returns the entry with the index-th highest value, 0 being the highest.
    pub fn get_high(&self, index: usize) -> ToolsResult<Entry<K, V>> {
        self.high
            .get(index)
            .copied()
            .ok_or(ToolsError::IndexOutOfRange {
                index,
                len: self.high.len(),
            })
    }

    /// Returns the entry with the index-th lowest value, 0 being the lowest.
    pub fn get_low(&self, index: usize) -> ToolsResult<Entry<K, V>> {
        self.low
            .get(index)
            .copied()
            .ok_or(ToolsError::IndexOutOfRange {
                index,
                len: self.low.len(),
            })
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.values.get(key).copied()
    }

    /// Entries from the highest to the lowest value.
    pub fn iter_high(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.high.iter()
    }

    /// Entries from the lowest to the highest value.
    pub fn iter_low(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.low.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Ord + Copy> Histogram<K, usize> {
    /// Counts how often every key occurs.
    pub fn count<I: IntoIterator<Item = K>>(items: I) -> Self {
        let mut values = BTreeMap::new();
        for item in items {
            *values.entry(item).or_insert(0) += 1;
        }
        Self::new(values)
    }
}

impl<K: Ord + Copy, V: Tally> FromIterator<(K, V)> for Histogram<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<K: Debug, V: Tally> Display for Histogram<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.high.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: ", entry.key)?;
            entry.value.write(f)?;
        }
        Ok(())
    }
}

#[test]
fn test_get_high() {
    let hist = ByteHistogram::count(b"abracadabra".iter().copied());
    assert_eq!(hist.get_high(0).unwrap(), Entry { key: b'a', value: 5 });
    // b and r both occur twice, ties go to the smaller key
    assert_eq!(hist.get_high(1).unwrap(), Entry { key: b'b', value: 2 });
    assert_eq!(hist.get_high(2).unwrap(), Entry { key: b'r', value: 2 });
    assert_eq!(hist.get_high(4).unwrap(), Entry { key: b'd', value: 1 });
}

#[test]
fn test_get_low() {
    let hist: SizeScoreHistogram = [(3, 2.5), (5, 0.5), (2, 0.5), (7, 1.0)].into_iter().collect();
    let order: Vec<usize> = hist.iter_low().map(|e| e.key).collect();
    assert_eq!(order, vec![2, 5, 7, 3]);
    assert_eq!(hist.get_low(0).unwrap().key, 2);
    assert_eq!(hist.get_high(0).unwrap().key, 3);
}

#[test]
fn test_out_of_range() {
    let hist = ByteHistogram::count(Vec::<u8>::new());
    assert!(hist.is_empty());
    assert!(matches!(
        hist.get_high(0),
        Err(ToolsError::IndexOutOfRange { index: 0, len: 0 })
    ));

    let hist = ByteHistogram::count(b"aab".iter().copied());
    assert!(hist.get_high(1).is_ok());
    assert!(matches!(
        hist.get_low(2),
        Err(ToolsError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn test_display() {
    let hist: ByteScoreHistogram = [(b'x', 1.0), (b'y', 12.5)].into_iter().collect();
    assert_eq!(hist.to_string(), "121: 12.50, 120: 1.00");
    assert_eq!(hist.get(&b'x'), Some(1.0));
    assert_eq!(hist.get(&b'z'), None);
}

#[test]
fn test_relative_score() {
    assert_eq!(relative_score(37, 2), 18.5);
    assert_eq!(relative_score(5, 0), 0.0);
}
