// compare_test.rs - Integration tests for ordering and collation.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use test_case::test_case;
use unitext::collator::COLLATE_UNINITIALIZED;
use unitext::compare::{alpha_numeric_compare_with, alpha_numeric_ordering};
use unitext::context::{configure_thread, with_thread_context};
use unitext::prelude::*;

const FOLD: AlphaNumericMode = AlphaNumericMode::AccentFolding;

// === Natural Ordering ===

#[test]
fn digits_before_letters() {
    assert!(alpha_numeric_compare("123abc", "abc123", FOLD) < 0);
}

#[test_case("Season 2", "Season 10" ; "numeric run")]
#[test_case("a", "B" ; "case folded")]
#[test_case("(live)", "album" ; "punctuation first")]
#[test_case("resume", "résumés" ; "accents folded then length")]
#[test_case("x9y", "x10a" ; "run decides before tail")]
fn natural_less(a: &str, b: &str) {
    assert!(alpha_numeric_compare(a, b, FOLD) < 0);
    assert!(alpha_numeric_compare(b, a, FOLD) > 0);
}

#[test]
fn collation_fast_path_matches_character_path() {
    assert_eq!(alpha_numeric_collation(b"abc", b"abcd", FOLD), -1);
    assert_eq!(alpha_numeric_compare("abc", "abcd", FOLD), -1);
    assert_eq!(alpha_numeric_collation(b"", b"", FOLD), 0);
}

#[test]
fn byte_and_string_forms_agree() {
    let corpus = [
        "", "a", "A", "a1", "a01", "a2", "a10", "a10b", "ab", "Äb", "äc", "z", "_z", "-", "日本", "日本1",
        "Ωmega", "ωmega9", "ωmega10", "ﬁle", "file",
    ];
    for a in corpus {
        for b in corpus {
            let by_str = alpha_numeric_compare(a, b, FOLD).signum();
            let by_bytes = alpha_numeric_collation(a.as_bytes(), b.as_bytes(), FOLD).signum() as i64;
            assert_eq!(by_str, by_bytes, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn sort_with_configured_mode() {
    let mut titles = vec!["Track 10", "track 9", "Track 1", "(Hidden)", "Träck 2"];
    titles.sort_by(|a, b| alpha_numeric_ordering(a, b));
    assert_eq!(titles, ["(Hidden)", "Track 1", "Träck 2", "track 9", "Track 10"]);
}

// === Case-Insensitive ===

#[test]
fn no_case_comparisons() {
    assert!(equals_no_case("", "", StringOptions::empty(), false));
    assert!(!equals_no_case("", "a", StringOptions::empty(), false));
    assert!(equals_no_case("KÖLN", "köln", StringOptions::empty(), false));
    assert!(!equals_no_case("I", "ı", StringOptions::empty(), false));
    assert!(equals_no_case("I", "ı", StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I, false));
    assert_eq!(compare_no_case("ABC", "abd", StringOptions::empty(), false), Ordering::Less);
    assert_eq!(compare_no_case_n("PREFIX-one", "prefix-two", 7, StringOptions::empty()), Ordering::Equal);
    assert!(equals("same", "same"));
    assert_eq!(compare("b", "a"), Ordering::Greater);
}

// === Collator ===

#[test]
fn collator_is_per_thread() {
    let handle = std::thread::spawn(|| {
        let before = collate("a", "b");
        let ok = initialize_collator(&Locale::new("de", Some("DE")), false);
        (before, ok, collate("Äpfel", "Birnen"), collate("file10", "file9"))
    });
    let (before, ok, apples, files) = handle.join().unwrap();
    assert_eq!(before, COLLATE_UNINITIALIZED);
    assert!(ok);
    assert_eq!(apples, -1);
    assert_eq!(files, 1);
}

#[test]
fn collator_mode_uses_thread_collator() {
    std::thread::spawn(|| {
        let config = TextConfig::builder()
            .default_locale(Locale::new("sv", Some("SE")))
            .alpha_numeric_mode(AlphaNumericMode::Collator)
            .collator_locale(Locale::new("sv", Some("SE")))
            .build()
            .unwrap();
        configure_thread(config);
        // Swedish: å sorts after z.
        assert_eq!(alpha_numeric_ordering("ål", "zebra"), Ordering::Greater);
        assert_eq!(alpha_numeric_compare("ål", "zebra", FOLD).signum(), -1);
        with_thread_context(|ctx| {
            let svc = ctx.collator().unwrap();
            let mode = AlphaNumericMode::LocaleCharacters;
            assert!(alpha_numeric_compare_with("ål", "zebra", mode, Some(svc)) > 0);
        });
    })
    .join()
    .unwrap();
}
