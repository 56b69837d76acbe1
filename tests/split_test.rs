// split_test.rs - Integration tests for split, replace, trim and the
// numeric helpers.

use pretty_assertions::assert_eq;
use test_case::test_case;
use unitext::find::{count_occurrences, find, join, remove_crlf, replace_char, trim_left_chars};
use unitext::numeric::{is_integer, is_natural_number, seconds_to_time_string, time_string_to_seconds, TimeFormat};
use unitext::prelude::*;

// === Split ===

#[test]
fn split_empty_input() {
    assert!(split("", ",", 0).is_empty());
}

#[test]
fn split_keeps_empty_fields() {
    assert_eq!(split(",a,,aa,,", ",", 0), ["", "a", "", "aa", "", ""]);
}

#[test]
fn split_limit_absorbs_rest() {
    let parts = split("a bc  d ef ghi ", " ", 4);
    assert_eq!(parts.len(), 4);
    assert_eq!(parts, ["a", "bc", "", "d ef ghi "]);
}

#[test]
fn split_any_unifies_delimiters() {
    assert_eq!(split_any("k1=v1;k2=v2", &[";", "="]), ["k1", "v1", "k2", "v2"]);
}

#[test]
fn split_any_overlapping_delimiters_depend_on_order() {
    assert_eq!(split_any("a--b-c", &["-", "--"]), ["a", "b", "c"]);
    assert_eq!(split_any("a--b-c", &["--", "-"]), ["a", "", "b", "c"]);
}

#[test]
fn split_multi_drops_empties() {
    assert_eq!(split_multi(&[",h,ij,k,lm,,n,"], &[","], 0), ["h", "ij", "k", "lm", "n"]);
}

#[test]
fn split_multi_several_delimiters() {
    let inputs = vec!["a b,c".to_string(), "d;e f".to_string()];
    assert_eq!(split_multi(&inputs, &[",", " ", ";"], 0), ["a", "b", "c", "d", "e", "f"]);
}

#[test_case(1, &["a,b,c", "d,e"] ; "limit below inputs")]
#[test_case(2, &["a,b,c", "d,e"] ; "limit equals inputs")]
#[test_case(3, &["a", "b,c", "d,e"] ; "one extra")]
#[test_case(4, &["a", "b", "c", "d,e"] ; "budget spent on first")]
#[test_case(9, &["a", "b", "c", "d", "e"] ; "budget larger than parts")]
fn split_multi_limits(max: usize, expected: &[&str]) {
    assert_eq!(split_multi(&["a,b,c", "d,e"], &[","], max), expected);
}

#[test]
fn tokenize_skips_empty_tokens() {
    assert_eq!(tokenize(",,a,,b;c;", ",;"), ["a", "b", "c"]);
    assert_eq!(join(&tokenize(" x  y ", " "), "+"), "x+y");
}

// === Replace and Search ===

#[test]
fn replace_counts() {
    assert_eq!(find_and_replace("x.y.z", ".", "::"), ("x::y::z".to_string(), 2));
    assert_eq!(find_and_replace("abab", "ab", "abab"), ("abababab".to_string(), 2));
    assert_eq!(replace_char("ä-ä", 'ä', 'a'), ("a-a".to_string(), 2));
    assert_eq!(count_occurrences("banana", "an"), 2);
    assert_eq!(find("banana", "na", 3), Some(4));
}

#[test]
fn regex_replace() {
    assert_eq!(regex_replace_all("a1b22c333", r"\d+", "#", RegexpFlags::empty()), "a#b#c#");
    assert_eq!(regex_replace_all("1+1", "1+1", "2", RegexpFlags::LITERAL), "2");
    assert_eq!(regex_replace_all("bad", "[", "x", RegexpFlags::empty()), "bad");
}

// === Trim ===

#[test]
fn trims() {
    assert_eq!(trim("\t padded \u{00A0}"), "padded");
    assert_eq!(trim_chars("**bold**", "*"), "bold");
    assert_eq!(trim_left_chars("0007", "0"), "7");
    assert_eq!(remove_crlf("dos line\r\n\r\n"), "dos line");
}

// === Numeric ===

#[test_case("21:30:55", 77455 ; "hms")]
#[test_case("7 min", 420 ; "minutes")]
#[test_case("blah", 0 ; "garbage")]
fn time_to_seconds(input: &str, expected: i64) {
    assert_eq!(time_string_to_seconds(input), expected);
}

#[test]
fn seconds_round_trip_through_time_string() {
    for secs in [0, 59, 61, 3599, 3600, 77455] {
        let text = seconds_to_time_string(secs, TimeFormat::GUESS);
        assert_eq!(time_string_to_seconds(&text), secs, "{text}");
    }
}

#[test]
fn number_classification() {
    assert!(is_natural_number(" 10"));
    assert!(!is_natural_number("1.0"));
    assert!(is_integer(" -10"));
    assert!(!is_integer("0x1"));
}
