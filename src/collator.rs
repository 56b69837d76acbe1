// collator.rs - Locale-scoped collator backed by ICU4X.
//
// A `CollatorService` is owned by a `TextContext`; the free functions here
// act on the calling thread's context. Nothing is shared across threads.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Numeric};
use icu_provider::DataLocale;
use unicode_normalization::UnicodeNormalization;

use crate::context;
use crate::error::{Result, TextError};
use crate::locale::Locale;

/// Returned by [`collate`] when the calling thread has no collator.
pub const COLLATE_UNINITIALIZED: i32 = i32::MIN;

/// A collator for one locale, with numeric ordering of digit runs.
pub struct CollatorService {
    locale: Locale,
    collator: Collator,
    normalize: bool,
}

impl CollatorService {
    /// Build a collator for `locale`. With `normalize`, inputs are
    /// NFD-normalized before comparison.
    pub fn new(locale: &Locale, normalize: bool) -> Result<CollatorService> {
        let icu_locale = locale.to_icu()?;
        let data_locale = DataLocale::from(&icu_locale);
        let mut options = CollatorOptions::new();
        options.numeric = Some(Numeric::On);
        let collator = Collator::try_new(&data_locale, options)
            .map_err(|e| TextError::Collator(e.to_string()))?;
        tracing::debug!(locale = %locale, normalize, "collator built");
        Ok(CollatorService { locale: locale.clone(), collator, normalize })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn normalizes(&self) -> bool {
        self.normalize
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        if self.normalize {
            let left: String = left.nfd().collect();
            let right: String = right.nfd().collect();
            self.collator.compare(&left, &right)
        } else {
            self.collator.compare(left, right)
        }
    }

    /// Single-character comparison for per-character natural ordering.
    pub fn compare_chars(&self, left: char, right: char) -> Ordering {
        let mut lbuf = [0u8; 4];
        let mut rbuf = [0u8; 4];
        self.collator.compare(left.encode_utf8(&mut lbuf), right.encode_utf8(&mut rbuf))
    }
}

impl fmt::Debug for CollatorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollatorService")
            .field("locale", &self.locale)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}

#[inline]
pub(crate) fn ordering_to_i32(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Build (or rebuild) the calling thread's collator.
///
/// Must run on a thread before [`collate`] or collator-backed natural
/// ordering is used there. Returns `false` when the collator could not be
/// built; the failure is logged.
pub fn initialize_collator(locale: &Locale, normalize: bool) -> bool {
    context::with_thread_context(|ctx| ctx.initialize_collator(locale, normalize))
}

/// Compare with the calling thread's collator: -1, 0 or 1.
///
/// Returns [`COLLATE_UNINITIALIZED`] and logs a warning when no collator
/// was initialized on this thread.
pub fn collate(left: &str, right: &str) -> i32 {
    context::with_thread_context(|ctx| ctx.collate(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ordering_of_digit_runs() {
        let svc = CollatorService::new(&Locale::new("en", Some("US")), false).unwrap();
        assert_eq!(svc.compare("file2", "file10"), Ordering::Less);
        assert_eq!(svc.compare("file10", "file10"), Ordering::Equal);
    }

    #[test]
    fn locale_tailoring() {
        let sv = CollatorService::new(&Locale::new("sv", Some("SE")), false).unwrap();
        let en = CollatorService::new(&Locale::new("en", Some("US")), false).unwrap();
        // Swedish sorts ä after z.
        assert_eq!(sv.compare("ä", "z"), Ordering::Greater);
        assert_eq!(en.compare("ä", "z"), Ordering::Less);
    }

    #[test]
    fn normalizing_collator_equates_forms() {
        let svc = CollatorService::new(&Locale::new("en", None), true).unwrap();
        assert!(svc.normalizes());
        assert_eq!(svc.compare("e\u{0301}", "\u{e9}"), Ordering::Equal);
    }

    #[test]
    fn single_character_comparison() {
        let svc = CollatorService::new(&Locale::new("en", None), false).unwrap();
        assert_eq!(svc.compare_chars('a', 'b'), Ordering::Less);
        assert_eq!(svc.compare_chars('é', 'f'), Ordering::Less);
    }

    #[test]
    fn uninitialized_thread_gets_sentinel() {
        let result = std::thread::spawn(|| collate("a", "b")).join().unwrap();
        assert_eq!(result, COLLATE_UNINITIALIZED);
    }

    #[test]
    fn thread_local_collator() {
        let result = std::thread::spawn(|| {
            assert!(initialize_collator(&Locale::new("en", Some("US")), false));
            (collate("a", "b"), collate("b", "a"), collate("x10", "x9"))
        })
        .join()
        .unwrap();
        assert_eq!(result, (-1, 1, 1));
    }
}
