use rstest::rstest;
use xorcrack::analyze::english::{english, is_english, score, Reference, Scorer, ENGLISH_TEXT};

#[rstest]
#[case::wristwatch("I wish to watch my Irish wristwatch", true)]
#[case::reference(ENGLISH_TEXT, true)]
#[case::german(
    "Deutscher Beispieltext, überhaupt nicht englisch, denn er enthält viel mehr Umlaute und Kapitänsmützen und lange Wörter und sowas.",
    false
)]
#[case::german2("Ja, ich versuch ihn mal noch ein bißchen ordentlich aufzuschreiben.", false)]
#[case::japanese("ごめんなさい！", false)]
#[case::japanese2(
    "『ヒックとドラゴン』（原題: How to Train Your Dragon）は、2010年のアメリカの3Dアニメ映画。監督は『リロ・アンド・スティッチ』のディーン・デュボアとクリス・サンダース。",
    false
)]
#[case::garbage("f240t9ujgn elnfi u2pweiodwd qeu109mq dssd lak;lkasd ckj", false)]
fn test_is_english(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(
        is_english(text),
        expected,
        "score {:.2} against reference {:.2}",
        score(text),
        english().self_score()
    );
}

#[rstest]
fn test_repeated_reference(#[values(1, 2, 3, 7)] times: usize) {
    let text = ENGLISH_TEXT.repeat(times);
    assert_eq!(score(&text), english().self_score());
    assert!(is_english(&text));
}

#[test]
fn test_custom_reference() {
    let reference = Reference::build("aab");
    // a weighs 2, b weighs 1
    assert_eq!(reference.score("ab"), 1.5);
    assert_eq!(reference.self_score(), 5.0 / 3.0);
    assert!(reference.is_english("aab"));
    assert_eq!(reference.ranked_bytes().get_high(0).unwrap().key, b'a');
}

#[test]
fn test_multibyte_characters_count_bytes() {
    // 'ï' is part of the reference, but its two bytes both count towards the length
    let reference = Reference::build("ï");
    assert_eq!(reference.score("ï"), 0.5);
    assert_eq!(reference.ranked_bytes().get_high(0).unwrap().key, 0xef);
}
