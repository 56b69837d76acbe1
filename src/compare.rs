// compare.rs - Equality, case-insensitive and natural ("alphanumeric") ordering.
//
// Natural ordering compares runs of ASCII digits by value (at most 15
// digits per run), orders ASCII punctuation before everything else, and
// compares letters case-insensitively, folding accents through the
// collation weight table unless the locale collator is asked to decide.

use std::cmp::Ordering;

use widestring::WideChar;

use crate::case::fold_case;
use crate::codec;
use crate::collation_table::collation_weight;
use crate::collator::{ordering_to_i32, CollatorService};
use crate::config::AlphaNumericMode;
use crate::context;
use crate::normalize::normalize;
use crate::options::{NormalizerType, StringOptions};

/// Longest digit run read as one number.
const MAX_DIGITS: usize = 15;

// === Exact and Case-Insensitive ===

/// Byte-exact equality.
pub fn equals(a: &str, b: &str) -> bool {
    a.as_bytes() == b.as_bytes()
}

/// Code point order.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

fn fold_for_compare(s: &str, options: StringOptions, normalize_first: bool) -> String {
    if normalize_first {
        fold_case(&normalize(s, StringOptions::empty(), NormalizerType::Nfd), options)
    } else {
        fold_case(s, options)
    }
}

fn compare_folded(a: &str, b: &str, options: StringOptions) -> Ordering {
    if options.contains(StringOptions::COMPARE_CODE_POINT_ORDER) {
        a.cmp(b)
    } else {
        // UTF-16 code unit order: supplementary characters sort below U+E000.
        a.encode_utf16().cmp(b.encode_utf16())
    }
}

/// Equal after full case folding. With `normalize_first`, both sides are
/// NFD-normalized before folding.
pub fn equals_no_case(a: &str, b: &str, options: StringOptions, normalize_first: bool) -> bool {
    if a.is_ascii() && b.is_ascii() && !options.contains(StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I) {
        return a.eq_ignore_ascii_case(b);
    }
    fold_for_compare(a, options, normalize_first) == fold_for_compare(b, options, normalize_first)
}

/// Case-insensitive ordering on the folded strings.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use unitext::compare::compare_no_case;
/// use unitext::options::StringOptions;
///
/// assert_eq!(compare_no_case("Straße", "STRASSE", StringOptions::empty(), false), Ordering::Equal);
/// assert_eq!(compare_no_case("apple", "Banana", StringOptions::empty(), false), Ordering::Less);
/// ```
pub fn compare_no_case(a: &str, b: &str, options: StringOptions, normalize_first: bool) -> Ordering {
    let fa = fold_for_compare(a, options, normalize_first);
    let fb = fold_for_compare(b, options, normalize_first);
    compare_folded(&fa, &fb, options)
}

/// Case-insensitive ordering of the first `n` bytes of each side.
///
/// A cut through a multi-byte character leaves a partial sequence, which
/// compares as U+FFFD.
pub fn compare_no_case_n(a: &str, b: &str, n: usize, options: StringOptions) -> Ordering {
    let cut = |s: &str| {
        let bytes = &s.as_bytes()[..n.min(s.len())];
        let decoded = codec::utf8_lossy(bytes);
        if !decoded.is_lossless() {
            tracing::debug!(n, "byte limit splits a character");
        }
        decoded.into_inner()
    };
    compare_no_case(&cut(a), &cut(b), options, false)
}

// === Natural Ordering ===

#[inline]
fn is_digit(c: u32) -> bool {
    (0x30..=0x39).contains(&c)
}

/// ASCII punctuation and space: sorts before digits and letters.
#[inline]
fn is_symbol(c: u32) -> bool {
    (32..0x30).contains(&c) || (0x3A..0x41).contains(&c) || (0x5B..0x61).contains(&c) || (0x7B..128).contains(&c)
}

#[inline]
fn ascii_lower(c: u32) -> u32 {
    if (0x41..=0x5A).contains(&c) {
        c + 0x20
    } else {
        c
    }
}

/// Read a run of at most 15 digits. Returns the value and the index after
/// the run.
fn read_number<T: Copy + Into<u32>>(s: &[T], start: usize) -> (i64, usize) {
    let mut value = 0i64;
    let mut i = start;
    while i < s.len() && i < start + MAX_DIGITS {
        let d: u32 = s[i].into();
        if !is_digit(d) {
            break;
        }
        value = value * 10 + (d - 0x30) as i64;
        i += 1;
    }
    (value, i)
}

enum Step {
    Return(i64),
    Advance,
}

/// One character pair outside of digit runs.
fn compare_chars(lc: u32, rc: u32, mode: AlphaNumericMode, collator: Option<&CollatorService>) -> Step {
    let lsym = is_symbol(lc);
    let rsym = is_symbol(rc);
    match (lsym, rsym) {
        (true, false) => return Step::Return(-1),
        (false, true) => return Step::Return(1),
        (true, true) if lc != rc => return Step::Return(lc as i64 - rc as i64),
        (true, true) => return Step::Advance,
        (false, false) => {}
    }

    let use_locale = mode == AlphaNumericMode::LocaleCharacters;
    let (mut lw, mut rw) = (lc, rc);
    if !use_locale {
        lw = collation_weight(lw);
        rw = collation_weight(rw);
    }
    lw = ascii_lower(lw);
    rw = ascii_lower(rw);
    if lw == rw {
        return Step::Advance;
    }
    if !use_locale || (lw <= 128 && rw <= 128) {
        return Step::Return(lw as i64 - rw as i64);
    }
    let by_locale = collator.zip(char::from_u32(lw)).zip(char::from_u32(rw));
    match by_locale {
        Some(((svc, l), r)) => match svc.compare_chars(l, r) {
            Ordering::Equal => Step::Advance,
            ord => Step::Return(ordering_to_i32(ord) as i64),
        },
        None => Step::Return(lw as i64 - rw as i64),
    }
}

/// Natural ordering over wide strings.
///
/// Negative, zero or positive. Equal digit runs continue the comparison;
/// when one side runs out first it sorts first.
pub fn alpha_numeric_compare_wide(
    left: &[WideChar],
    right: &[WideChar],
    mode: AlphaNumericMode,
    collator: Option<&CollatorService>,
) -> i64 {
    let mut l = 0;
    let mut r = 0;
    while l < left.len() && r < right.len() {
        let lc = left[l] as u32;
        let rc = right[r] as u32;
        if is_digit(lc) && is_digit(rc) {
            let (lnum, lend) = read_number(left, l);
            let (rnum, rend) = read_number(right, r);
            if lnum != rnum {
                return lnum - rnum;
            }
            l = lend;
            r = rend;
            continue;
        }
        match compare_chars(lc, rc, mode, collator) {
            Step::Return(diff) => return diff,
            Step::Advance => {
                l += 1;
                r += 1;
            }
        }
    }
    if r < right.len() {
        -1
    } else if l < left.len() {
        1
    } else {
        0
    }
}

/// How a natural-order comparison runs for a requested mode.
enum Route<'a> {
    /// Whole strings through the collator.
    Whole(&'a CollatorService),
    /// Character by character in the given mode.
    PerChar(AlphaNumericMode),
}

fn route(mode: AlphaNumericMode, collator: Option<&CollatorService>) -> Route<'_> {
    match (mode, collator) {
        (AlphaNumericMode::Collator, Some(svc)) => Route::Whole(svc),
        (AlphaNumericMode::Collator, None) => {
            tracing::warn!("collator ordering requested without a collator, folding accents instead");
            Route::PerChar(AlphaNumericMode::AccentFolding)
        }
        (mode, _) => Route::PerChar(mode),
    }
}

/// Natural ordering of two strings.
pub fn alpha_numeric_compare_with(
    left: &str,
    right: &str,
    mode: AlphaNumericMode,
    collator: Option<&CollatorService>,
) -> i64 {
    let mode = match route(mode, collator) {
        Route::Whole(svc) => return ordering_to_i32(svc.compare(left, right)) as i64,
        Route::PerChar(mode) => mode,
    };
    let l = codec::utf8_to_wide(left.as_bytes()).into_inner();
    let r = codec::utf8_to_wide(right.as_bytes()).into_inner();
    alpha_numeric_compare_wide(l.as_slice(), r.as_slice(), mode, collator)
}

fn saturate(diff: i64) -> i32 {
    diff.clamp(i32::MIN as i64 + 1, i32::MAX as i64) as i32
}

/// Natural ordering over UTF-8 bytes, as used by a database collation hook.
///
/// Identical prefixes short-circuit to a length comparison. Malformed
/// sequences compare as U+FFFD and advance by their maximal subpart.
pub fn alpha_numeric_collation_with(
    left: &[u8],
    right: &[u8],
    mode: AlphaNumericMode,
    collator: Option<&CollatorService>,
) -> i32 {
    let common = left.len().min(right.len());
    if left[..common] == right[..common] {
        return saturate(left.len() as i64 - right.len() as i64);
    }

    let mode = match route(mode, collator) {
        Route::Whole(svc) => {
            let l = codec::utf8_lossy(left).into_inner();
            let r = codec::utf8_lossy(right).into_inner();
            return ordering_to_i32(svc.compare(&l, &r));
        }
        Route::PerChar(mode) => mode,
    };

    let mut i = 0;
    let mut j = 0;
    while i < left.len() && j < right.len() {
        if is_digit(left[i] as u32) && is_digit(right[j] as u32) {
            let (lnum, lend) = read_number(left, i);
            let (rnum, rend) = read_number(right, j);
            if lnum != rnum {
                return saturate(lnum - rnum);
            }
            i = lend;
            j = rend;
            continue;
        }
        let ld = codec::decode_utf8_at(left, i);
        let rd = codec::decode_utf8_at(right, j);
        let lc = ld.ch.unwrap_or(codec::REPLACEMENT_CHARACTER) as u32;
        let rc = rd.ch.unwrap_or(codec::REPLACEMENT_CHARACTER) as u32;
        match compare_chars(lc, rc, mode, collator) {
            Step::Return(diff) => return saturate(diff),
            Step::Advance => {
                i += ld.len;
                j += rd.len;
            }
        }
    }
    saturate((left.len() - i) as i64 - (right.len() - j) as i64)
}

/// Natural ordering using the calling thread's collator for the
/// collator-backed modes.
///
/// # Examples
///
/// ```
/// use unitext::compare::alpha_numeric_compare;
/// use unitext::config::AlphaNumericMode;
///
/// let mode = AlphaNumericMode::AccentFolding;
/// assert!(alpha_numeric_compare("track2", "track10", mode) < 0);
/// assert!(alpha_numeric_compare("Épisode", "episode", mode) == 0);
/// assert!(alpha_numeric_compare("(b)", "a", mode) < 0);
/// ```
pub fn alpha_numeric_compare(left: &str, right: &str, mode: AlphaNumericMode) -> i64 {
    context::with_thread_context(|ctx| alpha_numeric_compare_with(left, right, mode, ctx.collator()))
}

/// Byte form of [`alpha_numeric_compare`].
pub fn alpha_numeric_collation(left: &[u8], right: &[u8], mode: AlphaNumericMode) -> i32 {
    context::with_thread_context(|ctx| alpha_numeric_collation_with(left, right, mode, ctx.collator()))
}

/// Natural ordering in the calling thread's configured mode, as an
/// `Ordering` for `sort_by`.
pub fn alpha_numeric_ordering(left: &str, right: &str) -> Ordering {
    context::with_thread_context(|ctx| ctx.alpha_numeric_compare(left, right)).cmp(&0)
}
