// grapheme.rs - User-perceived character boundaries and substrings.
//
// A "character" here is a grapheme cluster: "e" + U+0301 or a flag emoji
// counts as one. Substring operations NFC-normalize their input first, so
// byte offsets refer to the normalized text.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::context;
use crate::locale::Locale;

/// Result of a character boundary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharBoundary {
    /// Byte offset into the input.
    Offset(usize),
    /// The requested boundary lies before the first character.
    BeforeStart,
    /// The requested boundary lies past the last character.
    AfterEnd,
    /// The input could not be segmented.
    NotFound,
}

impl CharBoundary {
    pub fn offset(self) -> Option<usize> {
        match self {
            CharBoundary::Offset(o) => Some(o),
            _ => None,
        }
    }
}

// === Break Iterator ===

/// Grapheme break iterator configured for one locale.
///
/// Grapheme clustering in UAX #29 has no locale tailoring, but the iterator
/// is still keyed on the locale so a tailored segmenter can slot in.
#[derive(Debug, Clone)]
pub struct CharacterBreaker {
    locale_key: String,
    extended: bool,
}

impl CharacterBreaker {
    pub fn new(locale: &Locale, extended: bool) -> CharacterBreaker {
        CharacterBreaker { locale_key: locale.identity(), extended }
    }

    pub fn locale_key(&self) -> &str {
        &self.locale_key
    }

    /// Byte range of the `n`th character from the start.
    fn nth_from_start(&self, s: &str, n: usize) -> Option<(usize, usize)> {
        s.grapheme_indices(self.extended).nth(n).map(|(i, g)| (i, i + g.len()))
    }

    /// Byte range of the `n`th character from the end.
    fn nth_from_end(&self, s: &str, n: usize) -> Option<(usize, usize)> {
        s.grapheme_indices(self.extended).rev().nth(n).map(|(i, g)| (i, i + g.len()))
    }

    /// Number of characters in `s`.
    pub fn count(&self, s: &str) -> usize {
        s.graphemes(self.extended).count()
    }

    /// Locate a character boundary.
    ///
    /// | `left` | `keep_left` | result for `char_count = k` |
    /// |--------|-------------|-----------------------------|
    /// | true   | true        | last byte of the kth character (0-based) |
    /// | true   | false       | last byte of the kth character counting from the end |
    /// | false  | true        | first byte of the kth character |
    /// | false  | false       | first byte of the kth character counting from the end, 1-based; `k = 0` is the end of the string |
    pub fn boundary(&self, s: &str, char_count: usize, left: bool, keep_left: bool) -> CharBoundary {
        match (left, keep_left) {
            (true, true) => self
                .nth_from_start(s, char_count)
                .map_or(CharBoundary::AfterEnd, |(_, end)| CharBoundary::Offset(end - 1)),
            (true, false) => self
                .nth_from_end(s, char_count)
                .map_or(CharBoundary::BeforeStart, |(_, end)| CharBoundary::Offset(end - 1)),
            (false, true) => self
                .nth_from_start(s, char_count)
                .map_or(CharBoundary::AfterEnd, |(start, _)| CharBoundary::Offset(start)),
            (false, false) => {
                if char_count == 0 {
                    return CharBoundary::Offset(s.len());
                }
                self.nth_from_end(s, char_count - 1)
                    .map_or(CharBoundary::BeforeStart, |(start, _)| CharBoundary::Offset(start))
            }
        }
    }
}

/// Holds the current break iterator, rebuilding it when the locale changes.
#[derive(Debug)]
pub struct BreakIteratorCache {
    current: Option<CharacterBreaker>,
    extended: bool,
    rebuilds: usize,
}

impl BreakIteratorCache {
    pub fn new(extended: bool) -> BreakIteratorCache {
        BreakIteratorCache { current: None, extended, rebuilds: 0 }
    }

    /// Break iterator for `locale`, reusing the cached one when the locale
    /// identity matches.
    pub fn get(&mut self, locale: &Locale) -> &CharacterBreaker {
        let key = locale.identity();
        if self.current.as_ref().is_some_and(|b| b.locale_key != key) {
            self.current = None;
        }
        let (extended, rebuilds) = (self.extended, &mut self.rebuilds);
        self.current.get_or_insert_with(|| {
            tracing::debug!(locale = %key, "building character break iterator");
            *rebuilds += 1;
            CharacterBreaker::new(locale, extended)
        })
    }

    /// How many times an iterator was built.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

// === Boundary Lookup ===

/// [`CharacterBreaker::boundary`] through a cache.
pub fn character_boundary_with(
    cache: &mut BreakIteratorCache,
    s: &str,
    char_count: usize,
    left: bool,
    keep_left: bool,
    locale: &Locale,
) -> CharBoundary {
    cache.get(locale).boundary(s, char_count, left, keep_left)
}

/// Boundary lookup over raw bytes.
///
/// Input starting in the middle of a character yields the offset of its
/// last byte with a warning. Other malformed input yields `NotFound`.
pub fn character_boundary_bytes_with(
    cache: &mut BreakIteratorCache,
    bytes: &[u8],
    char_count: usize,
    left: bool,
    keep_left: bool,
    locale: &Locale,
) -> CharBoundary {
    match std::str::from_utf8(bytes) {
        Ok(s) => character_boundary_with(cache, s, char_count, left, keep_left, locale),
        Err(_) if bytes[0] & 0xC0 == 0x80 => {
            tracing::warn!(len = bytes.len(), "input does not start on a character boundary");
            CharBoundary::Offset(bytes.len() - 1)
        }
        Err(err) => {
            tracing::error!(valid_up_to = err.valid_up_to(), "cannot segment malformed UTF-8");
            CharBoundary::NotFound
        }
    }
}

/// Boundary lookup with the calling thread's break iterator cache.
pub fn character_boundary(s: &str, char_count: usize, left: bool, keep_left: bool, locale: &Locale) -> CharBoundary {
    context::with_thread_context(|ctx| ctx.character_boundary(s, char_count, left, keep_left, locale))
}

/// Byte-slice form of [`character_boundary`].
pub fn character_boundary_bytes(
    bytes: &[u8],
    char_count: usize,
    left: bool,
    keep_left: bool,
    locale: &Locale,
) -> CharBoundary {
    context::with_thread_context(|ctx| ctx.character_boundary_bytes(bytes, char_count, left, keep_left, locale))
}

// === Substrings ===

fn nfc(s: &str) -> String {
    let normalized: String = s.nfc().collect();
    if normalized != s {
        tracing::debug!(before = s.len(), after = normalized.len(), "input NFC-normalized before slicing");
    }
    normalized
}

/// Leftmost `char_count` characters; with `keep_left = false`, everything
/// except the rightmost `char_count` characters.
pub fn left_with(cache: &mut BreakIteratorCache, s: &str, char_count: usize, keep_left: bool, locale: &Locale) -> String {
    let s = nfc(s);
    let total = cache.get(locale).count(&s);
    if keep_left {
        if char_count == 0 {
            return String::new();
        }
        if char_count >= total {
            return s;
        }
        match character_boundary_with(cache, &s, char_count - 1, true, true, locale) {
            CharBoundary::Offset(b) => s[..=b].to_string(),
            CharBoundary::AfterEnd => s,
            _ => String::new(),
        }
    } else {
        if char_count == 0 {
            return s;
        }
        if char_count >= total {
            return String::new();
        }
        match character_boundary_with(cache, &s, char_count, true, false, locale) {
            CharBoundary::Offset(b) => s[..=b].to_string(),
            _ => String::new(),
        }
    }
}

/// Rightmost `char_count` characters; with `keep_right = false`,
/// everything except the leftmost `char_count` characters.
pub fn right_with(cache: &mut BreakIteratorCache, s: &str, char_count: usize, keep_right: bool, locale: &Locale) -> String {
    let s = nfc(s);
    let total = cache.get(locale).count(&s);
    if keep_right {
        if char_count == 0 {
            return String::new();
        }
        if char_count >= total {
            return s;
        }
        match character_boundary_with(cache, &s, char_count, false, false, locale) {
            CharBoundary::Offset(b) => s[b..].to_string(),
            CharBoundary::BeforeStart => s,
            _ => String::new(),
        }
    } else {
        if char_count == 0 {
            return s;
        }
        if char_count >= total {
            return String::new();
        }
        match character_boundary_with(cache, &s, char_count, false, true, locale) {
            CharBoundary::Offset(b) => s[b..].to_string(),
            _ => String::new(),
        }
    }
}

/// `char_count` characters starting at character `start`; `None` takes the
/// rest of the string.
pub fn mid_with(cache: &mut BreakIteratorCache, s: &str, start: usize, char_count: Option<usize>, locale: &Locale) -> String {
    let s = nfc(s);
    let from = if start == 0 {
        0
    } else {
        match character_boundary_with(cache, &s, start, false, true, locale) {
            CharBoundary::Offset(b) => b,
            _ => return String::new(),
        }
    };
    let tail = &s[from..];
    match char_count {
        None => tail.to_string(),
        Some(0) => String::new(),
        Some(n) => match character_boundary_with(cache, tail, n - 1, true, true, locale) {
            CharBoundary::Offset(e) => tail[..=e].to_string(),
            CharBoundary::AfterEnd => tail.to_string(),
            _ => String::new(),
        },
    }
}

/// [`left_with`] using the calling thread's cache.
///
/// # Examples
///
/// ```
/// use unitext::grapheme::left;
/// use unitext::locale::Locale;
///
/// let en = Locale::new("en", Some("US"));
/// assert_eq!(left("Hello", 2, true, &en), "He");
/// assert_eq!(left("Hello", 2, false, &en), "Hel");
/// // "e" + combining acute is a single character.
/// assert_eq!(left("ne\u{0301}e", 2, true, &en), "n\u{e9}");
/// ```
pub fn left(s: &str, char_count: usize, keep_left: bool, locale: &Locale) -> String {
    context::with_thread_context(|ctx| ctx.left(s, char_count, keep_left, locale))
}

/// [`right_with`] using the calling thread's cache.
pub fn right(s: &str, char_count: usize, keep_right: bool, locale: &Locale) -> String {
    context::with_thread_context(|ctx| ctx.right(s, char_count, keep_right, locale))
}

/// [`mid_with`] using the calling thread's cache and default locale.
pub fn mid(s: &str, start: usize, char_count: Option<usize>) -> String {
    context::with_thread_context(|ctx| ctx.mid(s, start, char_count))
}

/// Character (grapheme cluster) count.
pub fn char_count(s: &str) -> usize {
    s.graphemes(true).count()
}
