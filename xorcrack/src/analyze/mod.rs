//! Frequency analysis of English text and the xor attacks built on top of it.
//!
//! Scores always follow "higher is more English". Keylength distances are the exception:
//! there the lowest value is the most probable keylength.

pub mod english;
pub mod histogram;
pub mod multibyte;
pub mod single_byte;

pub use english::{english, Reference, Scorer};
pub use histogram::{Histogram, Score};
pub use multibyte::{KeyLengthEstimator, RepeatingKeyAttempt, RepeatingKeyBreaker};
pub use single_byte::{KeyedPlaintext, SingleByteBreaker, Strategy, TaggedPlaintext};
