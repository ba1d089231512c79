use rand::Rng;
use rstest::rstest;
use xorcrack::{
    analyze::{english, multibyte::RepeatingKeyBreaker, single_byte::SingleByteBreaker, Strategy},
    config::AttackConfig,
    encode::hex::to_hex,
    encrypt::xor::{random_key, XOREnc},
    ToolsError,
};

const LIGHTHOUSE: &str = include_str!("data/lighthouse.txt");

fn lighthouse() -> &'static [u8] {
    LIGHTHOUSE.trim_end().as_bytes()
}

#[rstest]
fn test_single_byte_roundtrip(
    #[values(
        "Now that the party is jumping",
        "The quick brown fox jumps over the lazy dog while the farmer sleeps in the barn",
        "I wish to watch my Irish wristwatch"
    )]
    plaintext: &str,
    #[values(0x00, 0x1f, 0x42, 0x58, 0xa7, 0xff)] key: u8,
    #[values(Strategy::Heuristic, Strategy::Exhaustive)] strategy: Strategy,
) {
    let ciphertext = XOREnc::single(plaintext.as_bytes(), key);
    let result = SingleByteBreaker::new(english())
        .strategy(strategy)
        .attack(&ciphertext)
        .unwrap();

    assert_eq!(result.get_key(), key);
    assert_eq!(result.plaintext(), plaintext.as_bytes());
    assert!(result.check().is_ok(), "score {:.2}", result.get_score());
}

#[test]
fn test_single_byte_random_key() {
    let plaintext = b"The quick brown fox jumps over the lazy dog while the farmer sleeps in the barn";
    let key: u8 = rand::thread_rng().gen();

    let result = SingleByteBreaker::new(english())
        .attack(&XOREnc::single(plaintext, key))
        .unwrap();
    assert_eq!(result.get_key(), key);
    assert_eq!(result.plaintext(), plaintext);
}

#[test]
fn test_single_byte_low_confidence() {
    let ciphertext = XOREnc::single("ごめんなさい！".as_bytes(), 0x20);
    let result = SingleByteBreaker::new(english()).attack(&ciphertext).unwrap();

    let err = result.check().unwrap_err();
    assert!(err.score < err.threshold);
    assert!(!result.is_confident());
}

#[test]
fn test_detect_line() {
    let noise: Vec<u8> = (0..30u32).map(|i| ((i * 37 + 11) % 256) as u8).collect();
    let garbage = XOREnc::single(b"f240t9ujgn elnfi u2pweiodwd qeu1", 0x99);
    let noise_hex = to_hex(&noise);
    let garbage_hex = to_hex(&garbage);

    let lines = [
        noise_hex.as_str(),
        "",
        "1b37373331363f78151b7f2b783431333d78397828372d363c78373e783a393b3736",
        garbage_hex.as_str(),
    ];

    let found = SingleByteBreaker::new(english())
        .detect(lines)
        .unwrap()
        .unwrap();
    assert_eq!(*found.get_tag(), 2);
    assert_eq!(found.get_key(), b'X');
    assert_eq!(found.plaintext().text(), "Cooking MC's like a pound of bacon");
}

#[test]
fn test_detect_bad_hex() {
    let result = SingleByteBreaker::new(english()).detect(["1b37", "not hex"]);
    assert!(matches!(result, Err(ToolsError::Hex(_))));

    let nothing = SingleByteBreaker::new(english()).detect(["", "  "]).unwrap();
    assert!(nothing.is_none());
}

#[rstest]
#[case::ice(b"ICE")]
#[case::yellow(b"YELLOW")]
#[case::short(b"ab")]
fn test_repeating_key_roundtrip(#[case] key: &[u8]) {
    let ciphertext = XOREnc::repeating(lighthouse(), key).unwrap();
    let breaker = AttackConfig::default().repeating_key(english()).unwrap();

    let attempt = breaker.attack(&ciphertext).unwrap();
    assert_eq!(attempt.plaintext(), lighthouse());
    assert_eq!(attempt.shortest_key(), key);
    assert!(attempt.check().is_ok());
}

#[test]
fn test_repeating_key_random_key() {
    let len = rand::thread_rng().gen_range(2..=8);
    let key = random_key(len);
    let ciphertext = XOREnc::repeating(lighthouse(), &key).unwrap();

    let attempt = AttackConfig::default()
        .repeating_key(english())
        .unwrap()
        .attack(&ciphertext)
        .unwrap();
    assert_eq!(attempt.plaintext(), lighthouse(), "key {:02x?}", key);
}

#[test]
fn test_try_keylength() {
    let ciphertext = XOREnc::repeating(lighthouse(), b"ICE").unwrap();
    let breaker = AttackConfig::default().repeating_key(english()).unwrap();

    let attempt = breaker.try_keylength(&ciphertext, 3).unwrap();
    assert_eq!(attempt.get_key(), b"ICE");
    assert_eq!(attempt.failures(), 0);
    assert_eq!(attempt.text(), LIGHTHOUSE.trim_end());

    assert!(matches!(
        breaker.try_keylength(&ciphertext, 0),
        Err(ToolsError::InvalidKeyLengthRange { .. })
    ));
    assert!(matches!(
        breaker.try_keylength(b"ab", 3),
        Err(ToolsError::InputTooShort { keylength: 3, .. })
    ));
}

#[test]
fn test_repeating_key_unreliable() {
    let noise: Vec<u8> = (0..400u32).map(|i| ((i * 7 + 3) % 256) as u8).collect();
    let breaker = RepeatingKeyBreaker::new(
        SingleByteBreaker::new(english()),
        AttackConfig::default().estimator().unwrap(),
    );

    let attempt = breaker.attack(&noise).unwrap();
    assert!(!attempt.is_reliable());
    let err = attempt.check().unwrap_err();
    assert_eq!(err.keylength, attempt.keylength());
    assert_eq!(attempt.plaintext().len(), noise.len());
}

#[test]
fn test_repeating_key_too_short() {
    let breaker = AttackConfig::default().repeating_key(english()).unwrap();
    assert!(matches!(
        breaker.attack(b"abc"),
        Err(ToolsError::InputTooShort { keylength: 2, needed: 4, actual: 3 })
    ));
}
