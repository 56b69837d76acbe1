// find.rs - Search, replace, split and trim.
//
// Plain substring search runs on `memchr::memmem`; pattern operations go
// through the `regex` crate. Offsets are byte offsets into the input.

use std::ops::Range;

use memchr::memmem;
use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::case::fold_case;
use crate::error::Result;
use crate::options::{RegexpFlags, StringOptions};

// === Search ===

/// First occurrence of `needle` at or after byte `start`.
pub fn find(s: &str, needle: &str, start: usize) -> Option<usize> {
    if start > s.len() {
        return None;
    }
    memmem::find(&s.as_bytes()[start..], needle.as_bytes()).map(|i| i + start)
}

/// Last occurrence of `needle`.
pub fn rfind(s: &str, needle: &str) -> Option<usize> {
    memmem::rfind(s.as_bytes(), needle.as_bytes())
}

/// Non-overlapping occurrences of `needle`. An empty needle counts zero.
pub fn count_occurrences(s: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(s.as_bytes(), needle.as_bytes()).count()
}

pub fn starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

pub fn ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

/// Prefix test after full case folding.
pub fn starts_with_no_case(s: &str, prefix: &str) -> bool {
    fold_case(s, StringOptions::empty()).starts_with(&fold_case(prefix, StringOptions::empty()))
}

/// Suffix test after full case folding.
pub fn ends_with_no_case(s: &str, suffix: &str) -> bool {
    fold_case(s, StringOptions::empty()).ends_with(&fold_case(suffix, StringOptions::empty()))
}

/// Byte offset of the first occurrence of `words` that starts a word,
/// ignoring ASCII case.
pub fn find_words(s: &str, words: &str) -> Option<usize> {
    if words.is_empty() {
        return None;
    }
    let haystack = s.to_ascii_lowercase();
    let needle = words.to_ascii_lowercase();
    let bytes = haystack.as_bytes();
    memmem::find_iter(bytes, needle.as_bytes())
        .find(|&i| i == 0 || !bytes[i - 1].is_ascii_alphanumeric() && bytes[i - 1] < 0x80)
}

/// Index of the `close` that balances an already-open `open`, scanning from
/// byte `start`.
pub fn find_end_bracket(s: &str, open: char, close: char, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.get(start..)?.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + i);
            }
        }
    }
    None
}

// === Replace ===

/// Replace every non-overlapping `from` with `to`, left to right. Returns
/// the result and the number of replacements. Inserted text is never
/// re-scanned.
///
/// ```
/// use unitext::find::find_and_replace;
///
/// assert_eq!(find_and_replace("aaa", "a", "aa"), ("aaaaaa".to_string(), 3));
/// assert_eq!(find_and_replace("abc", "", "x"), ("abc".to_string(), 0));
/// ```
pub fn find_and_replace(s: &str, from: &str, to: &str) -> (String, usize) {
    if from.is_empty() {
        return (s.to_string(), 0);
    }
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    let mut count = 0;
    for i in memmem::find_iter(s.as_bytes(), from.as_bytes()) {
        out.push_str(&s[last..i]);
        out.push_str(to);
        last = i + from.len();
        count += 1;
    }
    out.push_str(&s[last..]);
    (out, count)
}

/// Replace every `from` character with `to`.
pub fn replace_char(s: &str, from: char, to: char) -> (String, usize) {
    let mut count = 0;
    let out = s
        .chars()
        .map(|c| {
            if c == from {
                count += 1;
                to
            } else {
                c
            }
        })
        .collect();
    (out, count)
}

// === Regular Expressions ===

/// Compile `pattern` with `flags`.
///
/// `LITERAL` escapes the pattern. Unknown escapes are always errors and
/// word boundaries are always Unicode-aware, whatever
/// `ERROR_ON_UNKNOWN_ESCAPES` and `UWORD` say.
pub fn build_regex(pattern: &str, flags: RegexpFlags) -> Result<Regex> {
    let source = if flags.contains(RegexpFlags::LITERAL) {
        regex::escape(pattern)
    } else {
        pattern.to_string()
    };
    let re = RegexBuilder::new(&source)
        .case_insensitive(flags.contains(RegexpFlags::CASE_INSENSITIVE))
        .multi_line(flags.contains(RegexpFlags::MULTILINE))
        .dot_matches_new_line(flags.contains(RegexpFlags::DOTALL))
        .ignore_whitespace(flags.contains(RegexpFlags::COMMENTS) && !flags.contains(RegexpFlags::LITERAL))
        .unicode(true)
        .build()?;
    Ok(re)
}

/// Replace every match of `pattern`. `$1` and `${name}` in `replacement`
/// refer to groups.
///
/// An invalid pattern logs an error and returns `s` unchanged.
pub fn regex_replace_all(s: &str, pattern: &str, replacement: &str, flags: RegexpFlags) -> String {
    match build_regex(pattern, flags) {
        Ok(re) => re.replace_all(s, replacement).into_owned(),
        Err(err) => {
            tracing::error!(pattern, "invalid regular expression: {}", err);
            s.to_string()
        }
    }
}

/// Byte range of the first match at or after `start`.
pub fn regex_find(s: &str, pattern: &str, flags: RegexpFlags, start: usize) -> Result<Option<Range<usize>>> {
    let re = build_regex(pattern, flags)?;
    if start > s.len() {
        return Ok(None);
    }
    Ok(re.find_at(s, start).map(|m| m.range()))
}

/// Number of capture groups, not counting the implicit whole-match group.
pub fn regex_group_count(pattern: &str, flags: RegexpFlags) -> Result<usize> {
    Ok(build_regex(pattern, flags)?.captures_len() - 1)
}

// === Split ===

/// Split on `delimiter`. With `max_strings > 0`, at most that many parts
/// are returned and the last one holds the unsplit rest.
///
/// An empty input yields no parts; an empty delimiter yields the input.
///
/// ```
/// use unitext::find::split;
///
/// assert_eq!(split("a,b,,c", ",", 0), ["a", "b", "", "c"]);
/// assert_eq!(split("a,b,c", ",", 2), ["a", "b,c"]);
/// assert!(split("", ",", 0).is_empty());
/// ```
pub fn split(input: &str, delimiter: &str, max_strings: usize) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    if delimiter.is_empty() {
        return vec![input.to_string()];
    }
    if max_strings == 0 {
        input.split(delimiter).map(String::from).collect()
    } else {
        input.splitn(max_strings, delimiter).map(String::from).collect()
    }
}

/// [`split`] on a single character.
pub fn split_char(input: &str, delimiter: char, max_strings: usize) -> Vec<String> {
    let mut buf = [0u8; 4];
    split(input, delimiter.encode_utf8(&mut buf), max_strings)
}

/// Split on any of `delimiters`. Every delimiter is first rewritten to the
/// first one, so a later delimiter containing an earlier one interacts
/// with it in order.
pub fn split_any(input: &str, delimiters: &[&str]) -> Vec<String> {
    let Some((first, rest)) = delimiters.split_first() else {
        return vec![input.to_string()];
    };
    let mut unified = input.to_string();
    for delimiter in rest {
        unified = find_and_replace(&unified, delimiter, first).0;
    }
    split(&unified, first, 0)
}

/// Split every input on each delimiter in turn, dropping empty parts.
///
/// With `max_strings > 0`, splitting stops once that many parts exist; the
/// budget is spent left to right, so later inputs may stay whole.
///
/// ```
/// use unitext::find::split_multi;
///
/// let parts = split_multi(&[",h,ij,k,lm,,n,"], &[","], 0);
/// assert_eq!(parts, ["h", "ij", "k", "lm", "n"]);
/// ```
pub fn split_multi<S: AsRef<str>>(inputs: &[S], delimiters: &[&str], max_strings: usize) -> Vec<String> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<String> = inputs.iter().map(|s| s.as_ref().to_string()).collect();
    if delimiters.is_empty() || (max_strings > 0 && max_strings <= inputs.len()) {
        return results;
    }

    if max_strings == 0 {
        for delimiter in delimiters {
            results = results
                .iter()
                .flat_map(|s| split(s, delimiter, 0))
                .filter(|part| !part.is_empty())
                .collect();
        }
        return results;
    }

    let mut budget = max_strings as isize - results.len() as isize;
    for delimiter in delimiters {
        let mut next = Vec::with_capacity(results.len());
        for s in &results {
            if budget > 0 {
                let parts = split(s, delimiter, budget as usize + 1);
                budget -= parts.len() as isize - 1;
                next.extend(parts.into_iter().filter(|part| !part.is_empty()));
            } else {
                next.push(s.clone());
            }
        }
        results = next;
        budget = max_strings as isize - results.len() as isize;
        if budget <= 0 {
            break;
        }
    }
    results
}

/// Split on any character of `delimiters`, dropping empty tokens.
pub fn tokenize(input: &str, delimiters: &str) -> Vec<String> {
    if !delimiters.is_ascii() {
        tracing::warn!(delimiters, "non-ASCII tokenizer delimiters match whole characters");
    }
    let set: SmallVec<[char; 8]> = delimiters.chars().collect();
    input
        .split(|c: char| set.contains(&c))
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Join `parts` with `delimiter`.
pub fn join<S: AsRef<str>>(parts: &[S], delimiter: &str) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        out.push_str(part.as_ref());
    }
    out
}

// === Trim ===

/// Strip Unicode white space from both ends.
pub fn trim(s: &str) -> &str {
    s.trim()
}

pub fn trim_left(s: &str) -> &str {
    s.trim_start()
}

pub fn trim_right(s: &str) -> &str {
    s.trim_end()
}

/// Strip any character of `chars` from both ends. `chars` is read as a set
/// of characters, so "e" + U+0301 is one entry and never strips a bare "e".
pub fn trim_chars<'a>(s: &'a str, chars: &str) -> &'a str {
    trim_set(s, chars, true, true)
}

pub fn trim_left_chars<'a>(s: &'a str, chars: &str) -> &'a str {
    trim_set(s, chars, true, false)
}

pub fn trim_right_chars<'a>(s: &'a str, chars: &str) -> &'a str {
    trim_set(s, chars, false, true)
}

fn trim_set<'a>(s: &'a str, chars: &str, from_start: bool, from_end: bool) -> &'a str {
    let set: SmallVec<[&str; 8]> = chars.graphemes(true).collect();
    if set.is_empty() {
        return s;
    }
    let mut start = 0;
    if from_start {
        for (i, g) in s.grapheme_indices(true) {
            if !set.contains(&g) {
                break;
            }
            start = i + g.len();
        }
    }
    let mut end = s.len();
    if from_end {
        for (i, g) in s[start..].grapheme_indices(true).rev() {
            if !set.contains(&g) {
                break;
            }
            end = start + i;
        }
    }
    &s[start..end]
}

// === Cleanup ===

/// Tabs become spaces and runs of spaces collapse to one.
pub fn remove_duplicated_spaces_and_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_space = false;
    for c in s.chars() {
        let space = c == ' ' || c == '\t';
        if space && previous_space {
            continue;
        }
        out.push(if space { ' ' } else { c });
        previous_space = space;
    }
    out
}

/// Drop trailing carriage returns and line feeds.
pub fn remove_crlf(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn search() {
        assert_eq!(find("abcabc", "bc", 0), Some(1));
        assert_eq!(find("abcabc", "bc", 2), Some(4));
        assert_eq!(find("abc", "x", 0), None);
        assert_eq!(find("abc", "a", 9), None);
        assert_eq!(rfind("abcabc", "bc"), Some(4));
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("aaaa", ""), 0);
    }

    #[test]
    fn prefixes() {
        assert!(starts_with_no_case("Straße am See", "STRASSE"));
        assert!(ends_with_no_case("file.MKV", ".mkv"));
        assert!(!starts_with("abc", "B"));
        assert!(ends_with("abc", "bc"));
    }

    #[test]
    fn words() {
        assert_eq!(find_words("The Matrix Reloaded", "reload"), Some(11));
        assert_eq!(find_words("prereloaded", "reload"), None);
        assert_eq!(find_words("x reload", ""), None);
    }

    #[test]
    fn brackets() {
        assert_eq!(find_end_bracket("(a(b)c)d", '(', ')', 1), Some(6));
        assert_eq!(find_end_bracket("[x", '[', ']', 1), None);
    }

    #[test_case("hello world", "o", "0", "hell0 w0rld", 2 ; "simple")]
    #[test_case("aaa", "a", "aa", "aaaaaa", 3 ; "no rescan")]
    #[test_case("aaaa", "aa", "b", "bb", 2 ; "non overlapping")]
    #[test_case("abc", "", "x", "abc", 0 ; "empty pattern")]
    #[test_case("héllo", "é", "e", "hello", 1 ; "multibyte")]
    fn replacing(s: &str, from: &str, to: &str, expected: &str, count: usize) {
        assert_eq!(find_and_replace(s, from, to), (expected.to_string(), count));
    }

    #[test]
    fn replacing_chars() {
        assert_eq!(replace_char("a-b-c", '-', '_'), ("a_b_c".to_string(), 2));
    }

    #[test]
    fn regex_flags() {
        assert_eq!(regex_replace_all("Foo foo", "foo", "bar", RegexpFlags::CASE_INSENSITIVE), "bar bar");
        assert_eq!(regex_replace_all("a.b", ".", "!", RegexpFlags::LITERAL), "a!b");
        assert_eq!(regex_replace_all("2024-01-31", r"(\d+)-(\d+)-(\d+)", "$3/$2/$1", RegexpFlags::empty()), "31/01/2024");
        assert_eq!(regex_replace_all("keep", "(", "x", RegexpFlags::empty()), "keep");
        assert_eq!(regex_find("one\ntwo", "^two$", RegexpFlags::MULTILINE, 0).unwrap(), Some(4..7));
        assert_eq!(regex_find("abcabc", "abc", RegexpFlags::empty(), 1).unwrap(), Some(3..6));
        assert_eq!(regex_group_count(r"(a)(?:b)(?P<c>c)", RegexpFlags::empty()).unwrap(), 2);
        assert!(regex_group_count("(", RegexpFlags::empty()).is_err());
    }

    #[test_case("a,b,c", ",", 0, &["a", "b", "c"] ; "unlimited")]
    #[test_case("a,b,c", ",", 2, &["a", "b,c"] ; "limited")]
    #[test_case("a,b,c", ",", 1, &["a,b,c"] ; "limit one")]
    #[test_case(",a,", ",", 0, &["", "a", ""] ; "keeps empties")]
    #[test_case("a::b", "::", 0, &["a", "b"] ; "multi char delimiter")]
    #[test_case("abc", "", 0, &["abc"] ; "empty delimiter")]
    #[test_case("", ",", 0, &[] ; "empty input")]
    fn splitting(input: &str, delimiter: &str, max: usize, expected: &[&str]) {
        assert_eq!(split(input, delimiter, max), expected);
    }

    #[test]
    fn split_on_any() {
        assert_eq!(split_any("a,b;c", &[",", ";"]), ["a", "b", "c"]);
        assert_eq!(split_any("abc", &[]), ["abc"]);
        assert_eq!(split_char("1.2.3", '.', 0), ["1", "2", "3"]);
    }

    #[test]
    fn split_multi_limits() {
        let inputs = ["a,b,c", "d,e"];
        assert_eq!(split_multi(&inputs, &[","], 0), ["a", "b", "c", "d", "e"]);
        assert_eq!(split_multi(&inputs, &[","], 2), ["a,b,c", "d,e"]);
        assert_eq!(split_multi(&inputs, &[","], 3), ["a", "b,c", "d,e"]);
        assert_eq!(split_multi(&["a,b c"], &[",", " "], 3), ["a", "b", "c"]);
        assert!(split_multi::<&str>(&[], &[","], 0).is_empty());
        assert_eq!(split_multi(&["x"], &[], 0), ["x"]);
    }

    #[test]
    fn tokens() {
        assert_eq!(tokenize("  a b\tc  ", " \t"), ["a", "b", "c"]);
        assert_eq!(tokenize("a→b", "→"), ["a", "b"]);
        assert!(tokenize("", ",").is_empty());
    }

    #[test]
    fn joining() {
        assert_eq!(join(&["a", "b", "c"], ", "), "a, b, c");
        assert_eq!(join::<&str>(&[], ","), "");
    }

    #[test]
    fn trimming() {
        assert_eq!(trim("\u{3000} x \n"), "x");
        assert_eq!(trim_left("  x "), "x ");
        assert_eq!(trim_right("  x "), "  x");
        assert_eq!(trim_chars("--x--", "-"), "x");
        assert_eq!(trim_left_chars("-.x.-", ".-"), "x.-");
        assert_eq!(trim_right_chars("-.x.-", ".-"), "-.x");
        assert_eq!(trim_chars("----", "-"), "");
        assert_eq!(trim_chars("abc", ""), "abc");
    }

    #[test]
    fn trimming_respects_clusters() {
        // "é" decomposed in the set does not strip a bare "e".
        assert_eq!(trim_chars("exe", "e\u{0301}"), "exe");
        assert_eq!(trim_chars("e\u{0301}xe\u{0301}", "e\u{0301}"), "x");
        assert_eq!(trim_chars("🇩🇪x🇩🇪", "🇩🇪"), "x");
    }

    #[test]
    fn cleanup() {
        assert_eq!(remove_duplicated_spaces_and_tabs("a \t  b\t\tc"), "a b c");
        assert_eq!(remove_crlf("line\r\n"), "line");
        assert_eq!(remove_crlf("line"), "line");
    }
}
