use proptest::prelude::*;
use xorcrack::{
    analyze::{
        english::score,
        histogram::{ByteHistogram, SizeScoreHistogram},
        multibyte::{hamming_distance, interleave, transpose},
    },
    encrypt::xor::XOREnc,
};

proptest! {
    #[test]
    fn hamming_self_distance_is_zero(bytes in proptest::collection::vec(any::<u8>(), 1..256)) {
        prop_assert_eq!(hamming_distance(&bytes, &bytes), 0);
    }

    #[test]
    fn hamming_is_symmetric(
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64)
    ) {
        prop_assert_eq!(hamming_distance(&a, &b), hamming_distance(&b, &a));
        prop_assert!(hamming_distance(&a, &b) <= 8 * a.len().max(b.len()));
    }

    #[test]
    fn single_byte_xor_is_involution(bytes in proptest::collection::vec(any::<u8>(), 0..256), key in any::<u8>()) {
        let encrypted = XOREnc::single(&bytes, key);
        prop_assert_eq!(XOREnc::single(&encrypted, key), bytes);
    }

    #[test]
    fn repeating_key_xor_is_involution(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        key in proptest::collection::vec(any::<u8>(), 1..16)
    ) {
        let encrypted = XOREnc::repeating(&bytes, &key).unwrap();
        prop_assert_eq!(XOREnc::repeating(&encrypted, &key).unwrap(), bytes);
    }

    #[test]
    fn transpose_then_interleave_restores(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        keylength in 1usize..41
    ) {
        let streams = transpose(&bytes, keylength);
        prop_assert_eq!(streams.len(), keylength);
        prop_assert_eq!(interleave(&streams), bytes);
    }

    #[test]
    fn score_is_length_invariant(text in "[ -~]{1,80}", times in 1usize..6) {
        prop_assert_eq!(score(&text.repeat(times)), score(&text));
    }

    #[test]
    fn get_high_is_non_increasing(bytes in proptest::collection::vec(any::<u8>(), 1..256)) {
        let hist = ByteHistogram::count(bytes.iter().copied());
        let values: Vec<usize> = (0..hist.len()).map(|i| hist.get_high(i).unwrap().value).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(values.iter().sum::<usize>(), bytes.len());
        prop_assert!(hist.get_high(hist.len()).is_err());
    }

    #[test]
    fn get_low_breaks_ties_by_key(scores in proptest::collection::btree_map(1usize..64, 0u8..4, 1..32)) {
        let hist: SizeScoreHistogram = scores.iter().map(|(&k, &v)| (k, f64::from(v))).collect();
        let ranked: Vec<(f64, usize)> = hist.iter_low().map(|e| (e.value, e.key)).collect();
        prop_assert!(ranked.windows(2).all(|w| w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1)));
    }
}
