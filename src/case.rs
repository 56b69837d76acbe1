// case.rs - Locale-sensitive case mapping and locale-independent folding.
//
// Full case mappings come from the standard library's Unicode tables and
// full case folding from `unicode-casefold`. Locale tailoring covers the
// languages with special casing rules in SpecialCasing.txt: Turkish and
// Azeri (dotted/dotless i) and Lithuanian (combining dot above).

use unicode_casefold::UnicodeCaseFold;
use unicode_normalization::char::{canonical_combining_class, is_combining_mark};
use unicode_segmentation::UnicodeSegmentation;

use crate::locale::Locale;
use crate::options::StringOptions;

const COMBINING_DOT_ABOVE: char = '\u{0307}';
const CAPITAL_I_WITH_DOT: char = '\u{0130}';
const SMALL_DOTLESS_I: char = '\u{0131}';

// === Upper / Lower ===

/// Uppercase `s` using the casing rules of `locale`.
///
/// Output length may differ from the input (`ß → SS`).
///
/// # Examples
///
/// ```
/// use unitext::case::to_upper;
/// use unitext::locale::Locale;
///
/// assert_eq!(to_upper("straße", &Locale::new("de", Some("DE"))), "STRASSE");
/// assert_eq!(to_upper("istanbul", &Locale::new("tr", Some("TR"))), "İSTANBUL");
/// ```
pub fn to_upper(s: &str, locale: &Locale) -> String {
    if s.is_ascii() && !locale.is_turkic() {
        return s.to_ascii_uppercase();
    }
    if locale.is_turkic() {
        let dotted: String = s.chars().map(|c| if c == 'i' { CAPITAL_I_WITH_DOT } else { c }).collect();
        return dotted.to_uppercase();
    }
    if locale.is_lithuanian() {
        return remove_soft_dotted_dots(s).to_uppercase();
    }
    s.to_uppercase()
}

/// Lowercase `s` using the casing rules of `locale`. Final sigma is handled.
pub fn to_lower(s: &str, locale: &Locale) -> String {
    if s.is_ascii() && !locale.is_turkic() {
        return s.to_ascii_lowercase();
    }
    if locale.is_turkic() {
        return turkic_dotless_prepass(s).to_lowercase();
    }
    s.to_lowercase()
}

/// `to_upper` with the calling thread's default locale.
pub fn to_upper_default(s: &str) -> String {
    to_upper(s, &crate::context::default_locale())
}

/// `to_lower` with the calling thread's default locale.
pub fn to_lower_default(s: &str) -> String {
    to_lower(s, &crate::context::default_locale())
}

// Turkic lowercasing: İ → i, I + U+0307 → i, remaining I → ı.
fn turkic_dotless_prepass(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            CAPITAL_I_WITH_DOT => out.push('i'),
            'I' => {
                if chars.peek() == Some(&COMBINING_DOT_ABOVE) {
                    chars.next();
                    out.push('i');
                } else {
                    out.push(SMALL_DOTLESS_I);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn is_soft_dotted(c: char) -> bool {
    matches!(c, 'i' | 'j' | 'į' | 'ɨ' | 'ʝ' | 'ị' | 'ỉ' | 'ĳ')
}

// Lithuanian uppercasing drops U+0307 after a soft-dotted letter, unless a
// mark of the same combining class sits in between.
fn remove_soft_dotted_dots(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_soft_dotted = false;
    for c in s.chars() {
        if c == COMBINING_DOT_ABOVE && after_soft_dotted {
            continue;
        }
        if is_soft_dotted(c) {
            after_soft_dotted = true;
        } else if is_combining_mark(c) {
            let ccc = canonical_combining_class(c);
            if ccc == 0 || ccc == 230 {
                after_soft_dotted = false;
            }
        } else {
            after_soft_dotted = false;
        }
        out.push(c);
    }
    out
}

fn push_upper(out: &mut String, c: char, locale: &Locale) {
    if c == 'i' && locale.is_turkic() {
        out.push(CAPITAL_I_WITH_DOT);
    } else {
        out.extend(c.to_uppercase());
    }
}

// Titlecase differs from uppercase for the Latin digraphs and for
// characters whose uppercase expands.
fn push_title(out: &mut String, c: char, locale: &Locale) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        'ß' => out.push_str("Ss"),
        'ﬀ' => out.push_str("Ff"),
        'ﬁ' => out.push_str("Fi"),
        'ﬂ' => out.push_str("Fl"),
        'ﬃ' => out.push_str("Ffi"),
        'ﬄ' => out.push_str("Ffl"),
        'ﬅ' | 'ﬆ' => out.push_str("St"),
        _ => push_upper(out, c, locale),
    }
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || matches!(c, 'ǅ' | 'ǈ' | 'ǋ' | 'ǲ')
}

// Punctuation as `iswpunct` sees it: anything printable that is neither a
// letter, a digit, whitespace nor a combining mark.
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || (!c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control() && !is_combining_mark(c))
}

// === Capitalize ===

/// Uppercase the first letter of every word, leaving the rest untouched.
///
/// A word starts after whitespace or punctuation; the apostrophe does not
/// start a word, so `it's` stays one word.
pub fn capitalize(s: &str, locale: &Locale) -> String {
    let mut out = String::with_capacity(s.len());
    let mut first_letter = true;
    for c in s.chars() {
        if c.is_whitespace() || (is_punctuation(c) && c != '\'') {
            first_letter = true;
            out.push(c);
        } else if first_letter {
            push_upper(&mut out, c, locale);
            first_letter = false;
        } else {
            out.push(c);
        }
    }
    out
}

// === Title Case ===

/// Titlecase `s` on word boundaries (UAX #29).
///
/// Unlike [`capitalize`], the remainder of each word is lowercased unless
/// `TITLE_CASE_NO_LOWERCASE` is set. `TITLE_CASE_WHOLE_STRING` and
/// `TITLE_CASE_SENTENCES` change the segmentation unit.
///
/// # Examples
///
/// ```
/// use unitext::case::title_case;
/// use unitext::locale::Locale;
/// use unitext::options::StringOptions;
///
/// let en = Locale::default();
/// assert_eq!(title_case("the QUICK brown fox", &en, StringOptions::empty()), "The Quick Brown Fox");
/// assert_eq!(
///     title_case("the QUICK brown fox", &en, StringOptions::TITLE_CASE_WHOLE_STRING),
///     "The quick brown fox"
/// );
/// ```
pub fn title_case(s: &str, locale: &Locale, options: StringOptions) -> String {
    if options.contains(StringOptions::TITLE_CASE_WHOLE_STRING) {
        return title_segment(s, locale, options);
    }
    let mut out = String::with_capacity(s.len());
    if options.contains(StringOptions::TITLE_CASE_SENTENCES) {
        for sentence in s.split_sentence_bounds() {
            out.push_str(&title_segment(sentence, locale, options));
        }
    } else {
        for word in s.split_word_bounds() {
            out.push_str(&title_segment(word, locale, options));
        }
    }
    out
}

fn title_segment(segment: &str, locale: &Locale, options: StringOptions) -> String {
    let position = if options.contains(StringOptions::TITLE_CASE_NO_BREAK_ADJUSTMENT) {
        segment.char_indices().next()
    } else if options.contains(StringOptions::TITLE_CASE_ADJUST_TO_CASED) {
        segment.char_indices().find(|&(_, c)| is_cased(c))
    } else {
        segment.char_indices().find(|&(_, c)| c.is_alphanumeric())
    };
    let Some((at, c)) = position else {
        return segment.to_string();
    };

    let mut out = String::with_capacity(segment.len());
    out.push_str(&segment[..at]);
    push_title(&mut out, c, locale);
    let rest = &segment[at + c.len_utf8()..];
    if options.contains(StringOptions::TITLE_CASE_NO_LOWERCASE) {
        out.push_str(rest);
    } else {
        out.push_str(&to_lower(rest, locale));
    }
    out
}

// === Fold Case ===

/// Locale-independent full case folding for map keys and lookups.
///
/// The Turkic I table:
///
/// | input | default | `FOLD_CASE_EXCLUDE_SPECIAL_I` |
/// |-------|---------|-------------------------------|
/// | `I`   | `i`     | `ı`                           |
/// | `İ`   | `i̇` (i + U+0307) | `i`                  |
/// | `i`   | `i`     | `i`                           |
/// | `ı`   | `ı`     | `ı`                           |
///
/// # Examples
///
/// ```
/// use unitext::case::fold_case;
/// use unitext::options::StringOptions;
///
/// assert_eq!(fold_case("Straße", StringOptions::FOLD_CASE_DEFAULT), "strasse");
/// assert_eq!(fold_case("I İ i ı", StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I), "ı i i ı");
/// ```
pub fn fold_case(s: &str, options: StringOptions) -> String {
    let turkic = options.contains(StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I);
    if s.is_ascii() && !(turkic && s.contains('I')) {
        return s.to_ascii_lowercase();
    }
    if turkic {
        s.chars().map(turkic_fold_special_i).case_fold().collect()
    } else {
        s.chars().case_fold().collect()
    }
}

#[inline]
pub(crate) fn turkic_fold_special_i(c: char) -> char {
    match c {
        'I' => SMALL_DOTLESS_I,
        CAPITAL_I_WITH_DOT => 'i',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn en() -> Locale {
        Locale::new("en", Some("US"))
    }

    fn tr() -> Locale {
        Locale::new("tr", Some("TR"))
    }

    #[test]
    fn upper_expands_sharp_s() {
        assert_eq!(to_upper("Fußball", &en()), "FUSSBALL");
    }

    #[test]
    fn turkic_upper_and_lower() {
        assert_eq!(to_upper("istanbul ılık", &tr()), "İSTANBUL ILIK");
        assert_eq!(to_lower("İSTANBUL ILIK", &tr()), "istanbul ılık");
        assert_eq!(to_lower("I\u{0307}", &tr()), "i");
        assert_eq!(to_upper("istanbul", &en()), "ISTANBUL");
        assert_eq!(to_lower("ISTANBUL", &en()), "istanbul");
    }

    #[test]
    fn final_sigma() {
        assert_eq!(to_lower("ΟΔΥΣΣΕΥΣ", &en()), "οδυσσευς");
    }

    #[test]
    fn lithuanian_upper_drops_dot_above() {
        let lt = Locale::new("lt", Some("LT"));
        assert_eq!(to_upper("i\u{0307}\u{0301}", &lt), "I\u{0301}");
        assert_eq!(to_upper("i\u{0307}", &en()), "I\u{0307}");
    }

    #[test_case("hello world", "Hello World" ; "spaces")]
    #[test_case("it's a dog's life", "It's A Dog's Life" ; "apostrophe is not a boundary")]
    #[test_case("hello-world/foo", "Hello-World/Foo" ; "punctuation is a boundary")]
    #[test_case("ALREADY upper", "ALREADY Upper" ; "rest untouched")]
    #[test_case("éclair «crème»", "Éclair «Crème»" ; "non ascii")]
    fn capitalize_words(input: &str, expected: &str) {
        assert_eq!(capitalize(input, &en()), expected);
    }

    #[test]
    fn capitalize_turkic() {
        assert_eq!(capitalize("izmir iyi", &tr()), "İzmir İyi");
    }

    #[test]
    fn title_case_lowercases_rest() {
        assert_eq!(title_case("hELLO wORLD", &en(), StringOptions::empty()), "Hello World");
        assert_eq!(
            title_case("hELLO wORLD", &en(), StringOptions::TITLE_CASE_NO_LOWERCASE),
            "HELLO WORLD"
        );
    }

    #[test]
    fn title_case_contractions_stay_one_word() {
        assert_eq!(title_case("don't stop", &en(), StringOptions::empty()), "Don't Stop");
    }

    #[test]
    fn title_case_sentences() {
        assert_eq!(
            title_case("first SENTENCE. second one.", &en(), StringOptions::TITLE_CASE_SENTENCES),
            "First sentence. Second one."
        );
    }

    #[test]
    fn title_case_break_adjustment() {
        let quoted = "\"hello\"";
        assert_eq!(title_case(quoted, &en(), StringOptions::TITLE_CASE_WHOLE_STRING), "\"Hello\"");
        let no_adjust = StringOptions::TITLE_CASE_WHOLE_STRING | StringOptions::TITLE_CASE_NO_BREAK_ADJUSTMENT;
        assert_eq!(title_case(quoted, &en(), no_adjust), "\"hello\"");
        let to_cased = StringOptions::TITLE_CASE_WHOLE_STRING | StringOptions::TITLE_CASE_ADJUST_TO_CASED;
        assert_eq!(title_case("1st place", &en(), to_cased), "1St place");
        assert_eq!(title_case("1st place", &en(), StringOptions::TITLE_CASE_WHOLE_STRING), "1st place");
    }

    #[test]
    fn title_case_digraphs() {
        assert_eq!(title_case("ǆungla", &en(), StringOptions::empty()), "ǅungla");
    }

    #[test]
    fn fold_turkic_table_default() {
        assert_eq!(fold_case("I İ İ i ı", StringOptions::FOLD_CASE_DEFAULT), "i i\u{0307} i\u{0307} i ı");
    }

    #[test]
    fn fold_turkic_table_exclude_special_i() {
        assert_eq!(fold_case("I İ i ı", StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I), "ı i i ı");
        assert_eq!(fold_case("ILIK", StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I), "ılık");
    }

    #[test]
    fn fold_is_idempotent() {
        let samples = ["Straße", "ΣΊΣΥΦΟΣ", "I İ İ i ı", "ﬃ ligature", "Ǆ DŽ", "ascii ONLY"];
        for opts in [StringOptions::FOLD_CASE_DEFAULT, StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I] {
            for s in samples {
                let once = fold_case(s, opts);
                assert_eq!(fold_case(&once, opts), once, "input {:?}", s);
            }
        }
    }

    #[test]
    fn fold_expands_special_forms() {
        assert_eq!(fold_case("MASSE Maße", StringOptions::FOLD_CASE_DEFAULT), "masse masse");
    }
}
