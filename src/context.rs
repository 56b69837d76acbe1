// context.rs - Per-thread engine state.
//
// A `TextContext` owns the configuration, the break iterator cache and the
// collator. Each thread gets its own context lazily; contexts never cross
// threads, so none of the caches need locking.

use std::cell::RefCell;
use std::cmp::Ordering;

use crate::collator::{ordering_to_i32, CollatorService, COLLATE_UNINITIALIZED};
use crate::compare;
use crate::config::TextConfig;
use crate::error::{Result, TextError};
use crate::grapheme::{self, BreakIteratorCache, CharBoundary};
use crate::locale::Locale;

/// Engine state for one thread.
#[derive(Debug)]
pub struct TextContext {
    config: TextConfig,
    breaker: BreakIteratorCache,
    collator: Option<CollatorService>,
}

impl TextContext {
    /// Create a context. If the config names a collator locale, the
    /// collator is built now; a failure is logged and leaves it unset.
    pub fn new(config: TextConfig) -> TextContext {
        let breaker = BreakIteratorCache::new(config.extended_graphemes());
        let mut ctx = TextContext { config, breaker, collator: None };
        if let Some(locale) = ctx.config.collator_locale().cloned() {
            let normalize = ctx.config.normalize_collation();
            ctx.initialize_collator(&locale, normalize);
        }
        ctx
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    pub fn default_locale(&self) -> &Locale {
        self.config.default_locale()
    }

    pub fn break_iterators(&self) -> &BreakIteratorCache {
        &self.breaker
    }

    // === Collation ===

    /// Build the collator for `locale`. An existing collator for the same
    /// locale identity and normalization setting is kept.
    pub fn initialize_collator(&mut self, locale: &Locale, normalize: bool) -> bool {
        if let Some(existing) = &self.collator {
            if existing.locale().identity() == locale.identity() && existing.normalizes() == normalize {
                return true;
            }
        }
        match CollatorService::new(locale, normalize) {
            Ok(service) => {
                self.collator = Some(service);
                true
            }
            Err(err) => {
                tracing::error!(locale = %locale, "failed to build collator: {}", err);
                self.collator = None;
                false
            }
        }
    }

    pub fn collator(&self) -> Option<&CollatorService> {
        self.collator.as_ref()
    }

    /// Compare with this context's collator.
    pub fn try_collate(&self, left: &str, right: &str) -> Result<Ordering> {
        let service = self.collator.as_ref().ok_or(TextError::NotInitialized)?;
        Ok(service.compare(left, right))
    }

    /// -1, 0 or 1; [`COLLATE_UNINITIALIZED`] with a warning when no
    /// collator was built.
    pub fn collate(&self, left: &str, right: &str) -> i32 {
        match self.try_collate(left, right) {
            Ok(ord) => ordering_to_i32(ord),
            Err(err) => {
                tracing::warn!("collate called before initialize_collator on this thread: {}", err);
                COLLATE_UNINITIALIZED
            }
        }
    }

    /// Natural ordering with this context's mode and collator.
    pub fn alpha_numeric_compare(&self, left: &str, right: &str) -> i64 {
        compare::alpha_numeric_compare_with(left, right, self.config.alpha_numeric_mode(), self.collator())
    }

    pub fn alpha_numeric_collation(&self, left: &[u8], right: &[u8]) -> i32 {
        compare::alpha_numeric_collation_with(left, right, self.config.alpha_numeric_mode(), self.collator())
    }

    // === Characters ===

    pub fn character_boundary(
        &mut self,
        s: &str,
        char_count: usize,
        left: bool,
        keep_left: bool,
        locale: &Locale,
    ) -> CharBoundary {
        grapheme::character_boundary_with(&mut self.breaker, s, char_count, left, keep_left, locale)
    }

    pub fn character_boundary_bytes(
        &mut self,
        bytes: &[u8],
        char_count: usize,
        left: bool,
        keep_left: bool,
        locale: &Locale,
    ) -> CharBoundary {
        grapheme::character_boundary_bytes_with(&mut self.breaker, bytes, char_count, left, keep_left, locale)
    }

    pub fn left(&mut self, s: &str, char_count: usize, keep_left: bool, locale: &Locale) -> String {
        grapheme::left_with(&mut self.breaker, s, char_count, keep_left, locale)
    }

    pub fn right(&mut self, s: &str, char_count: usize, keep_right: bool, locale: &Locale) -> String {
        grapheme::right_with(&mut self.breaker, s, char_count, keep_right, locale)
    }

    pub fn mid(&mut self, s: &str, start: usize, char_count: Option<usize>) -> String {
        let locale = self.config.default_locale().clone();
        grapheme::mid_with(&mut self.breaker, s, start, char_count, &locale)
    }
}

impl Default for TextContext {
    fn default() -> Self {
        TextContext::new(TextConfig::default())
    }
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Option<TextContext>> = const { RefCell::new(None) };
}

/// Run `f` with the calling thread's context, creating it on first use.
///
/// A nested call from inside `f` gets a temporary default context rather
/// than the thread's own.
pub fn with_thread_context<R>(f: impl FnOnce(&mut TextContext) -> R) -> R {
    THREAD_CONTEXT.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => f(slot.get_or_insert_with(TextContext::default)),
        Err(_) => {
            tracing::warn!("re-entrant thread context access, using a temporary context");
            f(&mut TextContext::default())
        }
    })
}

/// Replace the calling thread's context with one built from `config`.
/// Drops any collator and cached break iterator.
pub fn configure_thread(config: TextConfig) {
    let ctx = TextContext::new(config);
    THREAD_CONTEXT.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => *slot = Some(ctx),
        Err(_) => tracing::error!("cannot reconfigure the thread context while it is in use"),
    });
}

/// Default locale of the calling thread's context.
pub fn default_locale() -> Locale {
    with_thread_context(|ctx| ctx.default_locale().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlphaNumericMode;

    fn config(lang: &str, region: &str) -> TextConfig {
        TextConfig::builder().default_locale(Locale::new(lang, Some(region))).build().unwrap()
    }

    #[test]
    fn configure_sets_default_locale() {
        std::thread::spawn(|| {
            configure_thread(config("tr", "TR"));
            assert!(default_locale().is_turkic());
            configure_thread(config("de", "DE"));
            assert_eq!(default_locale().language(), "de");
        })
        .join()
        .unwrap();
    }

    #[test]
    fn contexts_are_per_thread() {
        configure_thread(config("lt", "LT"));
        let other = std::thread::spawn(|| default_locale().identity()).join().unwrap();
        assert!(default_locale().is_lithuanian());
        assert_ne!(other, "lt_LT");
    }

    #[test]
    fn collator_reused_for_same_locale() {
        let mut ctx = TextContext::new(config("en", "US"));
        assert!(ctx.collator().is_none());
        assert!(ctx.initialize_collator(&Locale::new("en", Some("US")), false));
        let first = ctx.collator().map(|c| c as *const CollatorService);
        assert!(ctx.initialize_collator(&Locale::parse("en_US.UTF-8").unwrap(), false));
        assert_eq!(ctx.collator().map(|c| c as *const CollatorService), first);
        assert!(ctx.initialize_collator(&Locale::new("sv", Some("SE")), false));
        assert_eq!(ctx.collator().map(|c| c.locale().language()), Some("sv"));
    }

    #[test]
    fn collate_without_collator() {
        let ctx = TextContext::new(config("en", "US"));
        assert_eq!(ctx.try_collate("a", "b"), Err(TextError::NotInitialized));
        assert_eq!(ctx.collate("a", "b"), COLLATE_UNINITIALIZED);
    }

    #[test]
    fn eager_collator_from_config() {
        let cfg = TextConfig::builder()
            .default_locale(Locale::default())
            .collator_locale(Locale::new("en", Some("US")))
            .alpha_numeric_mode(AlphaNumericMode::Collator)
            .build()
            .unwrap();
        let ctx = TextContext::new(cfg);
        assert_eq!(ctx.collate("b", "a"), 1);
        assert!(ctx.alpha_numeric_compare("track2", "track10") < 0);
    }

    #[test]
    fn context_substrings_share_cache() {
        let mut ctx = TextContext::new(config("en", "US"));
        let en = Locale::new("en", Some("US"));
        assert_eq!(ctx.left("Hello", 2, true, &en), "He");
        assert_eq!(ctx.right("Hello", 2, true, &en), "lo");
        assert_eq!(ctx.mid("Hello", 1, Some(3)), "ell");
        assert_eq!(ctx.break_iterators().rebuilds(), 1);
    }

    #[test]
    fn nested_access_does_not_panic() {
        let nested = with_thread_context(|_| default_locale());
        assert!(!nested.language().is_empty());
    }
}
