// config.rs - Engine configuration and its builder.

use std::sync::Arc;

use crate::error::Result;
use crate::locale::{Locale, LocaleService, SystemLocaleService};

/// Which character comparison natural ("alphanumeric") ordering uses
/// outside of digit runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaNumericMode {
    /// Fold accents through the built-in weight table (`é` sorts as `e`).
    #[default]
    AccentFolding,
    /// Per-character comparison with the thread's collator for non-ASCII
    /// characters.
    LocaleCharacters,
    /// Whole-string comparison with the thread's numeric collator.
    Collator,
}

/// Configuration for a [`TextContext`](crate::context::TextContext).
#[derive(Debug, Clone)]
pub struct TextConfig {
    default_locale: Locale,
    alpha_numeric: AlphaNumericMode,
    normalize_collation: bool,
    extended_graphemes: bool,
    collator_locale: Option<Locale>,
}

impl TextConfig {
    pub fn builder() -> TextConfigBuilder {
        TextConfigBuilder::new()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn alpha_numeric_mode(&self) -> AlphaNumericMode {
        self.alpha_numeric
    }

    pub fn normalize_collation(&self) -> bool {
        self.normalize_collation
    }

    pub fn extended_graphemes(&self) -> bool {
        self.extended_graphemes
    }

    /// Locale to build the collator for eagerly, if any.
    pub fn collator_locale(&self) -> Option<&Locale> {
        self.collator_locale.as_ref()
    }
}

impl Default for TextConfig {
    /// Default locale from the process environment, accent-folding natural
    /// order, extended grapheme clusters, no eager collator.
    fn default() -> Self {
        TextConfig {
            default_locale: SystemLocaleService.default_locale(),
            alpha_numeric: AlphaNumericMode::default(),
            normalize_collation: false,
            extended_graphemes: true,
            collator_locale: None,
        }
    }
}

/// Builder for [`TextConfig`].
///
/// ```
/// use unitext::config::{AlphaNumericMode, TextConfig};
///
/// let config = TextConfig::builder()
///     .locale_id("tr_TR.UTF-8")
///     .alpha_numeric_mode(AlphaNumericMode::LocaleCharacters)
///     .build()
///     .unwrap();
/// assert!(config.default_locale().is_turkic());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextConfigBuilder {
    locale: Option<Locale>,
    locale_id: Option<String>,
    locale_service: Option<Arc<dyn LocaleService>>,
    alpha_numeric: AlphaNumericMode,
    normalize_collation: bool,
    extended_graphemes: Option<bool>,
    collator_locale: Option<Locale>,
}

impl TextConfigBuilder {
    pub fn new() -> Self {
        TextConfigBuilder::default()
    }

    /// Use `locale` as the default locale.
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Parse `id` as the default locale when building.
    pub fn locale_id(mut self, id: &str) -> Self {
        self.locale_id = Some(id.to_string());
        self
    }

    /// Ask `service` for the default locale. Ignored when a locale was set
    /// directly.
    pub fn locale_service(mut self, service: Arc<dyn LocaleService>) -> Self {
        self.locale_service = Some(service);
        self
    }

    pub fn alpha_numeric_mode(mut self, mode: AlphaNumericMode) -> Self {
        self.alpha_numeric = mode;
        self
    }

    /// NFD-normalize collator inputs.
    pub fn normalize_collation(mut self, yes: bool) -> Self {
        self.normalize_collation = yes;
        self
    }

    /// Extended (default) or legacy grapheme clusters.
    pub fn extended_graphemes(mut self, yes: bool) -> Self {
        self.extended_graphemes = Some(yes);
        self
    }

    /// Build a collator for `locale` as soon as a context is created.
    pub fn collator_locale(mut self, locale: Locale) -> Self {
        self.collator_locale = Some(locale);
        self
    }

    /// Resolve the default locale: explicit locale, then locale id, then
    /// locale service, then the process environment.
    pub fn build(self) -> Result<TextConfig> {
        let default_locale = match (self.locale, self.locale_id, self.locale_service) {
            (Some(locale), _, _) => locale,
            (None, Some(id), _) => Locale::parse(&id)?,
            (None, None, Some(service)) => service.default_locale(),
            (None, None, None) => SystemLocaleService.default_locale(),
        };
        Ok(TextConfig {
            default_locale,
            alpha_numeric: self.alpha_numeric,
            normalize_collation: self.normalize_collation,
            extended_graphemes: self.extended_graphemes.unwrap_or(true),
            collator_locale: self.collator_locale,
        })
    }
}
