// locale.rs - Locale identifiers and the locale service interface.
//
// A `Locale` is an immutable language + region (+ script, variant,
// keywords) value. Caches key on `identity()`, which is the language and
// region only: two locales differing just in variant or keywords share a
// break iterator and a collator.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TextError};

/// Locale identifier such as `en_US`, `tr_TR` or `sr_RS@latin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
    variant: Option<String>,
    keywords: Option<String>,
}

impl Locale {
    /// Build a locale from explicit language and country codes.
    ///
    /// Language is lowercased, region uppercased. No validation beyond that.
    pub fn new(language: &str, region: Option<&str>) -> Locale {
        Locale {
            language: language.to_ascii_lowercase(),
            script: None,
            region: region.filter(|r| !r.is_empty()).map(|r| r.to_ascii_uppercase()),
            variant: None,
            keywords: None,
        }
    }

    /// Parse a POSIX (`de_DE.UTF-8@euro`) or BCP-47 (`tr-TR`) identifier.
    ///
    /// `C` and `POSIX` map to `en_US`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unitext::locale::Locale;
    ///
    /// let loc = Locale::parse("sr_RS.UTF-8@latin").unwrap();
    /// assert_eq!(loc.language(), "sr");
    /// assert_eq!(loc.region(), Some("RS"));
    /// assert_eq!(loc.keywords(), Some("latin"));
    /// assert_eq!(loc.identity(), "sr_RS");
    /// ```
    pub fn parse(id: &str) -> Result<Locale> {
        let id = id.trim();
        let (body, keywords) = match id.split_once('@') {
            Some((body, kw)) => (body, Some(kw)),
            None => (id, None),
        };
        // Codeset suffix (".UTF-8") carries no locale information.
        let body = body.split_once('.').map_or(body, |(b, _)| b);

        if body == "C" || body == "POSIX" {
            return Ok(Locale::new("en", Some("US")));
        }

        let mut parts = body.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(TextError::InvalidLocale(id.to_string()));
        }

        let mut locale = Locale::new(language, None);
        let mut variants: Vec<&str> = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(TextError::InvalidLocale(id.to_string()));
            }
            let alpha = part.bytes().all(|b| b.is_ascii_alphabetic());
            let digits = part.bytes().all(|b| b.is_ascii_digit());
            if locale.script.is_none() && locale.region.is_none() && variants.is_empty() && alpha && part.len() == 4 {
                let mut script = part.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                locale.script = Some(script);
            } else if locale.region.is_none() && variants.is_empty() && ((alpha && part.len() == 2) || (digits && part.len() == 3)) {
                locale.region = Some(part.to_ascii_uppercase());
            } else {
                variants.push(part);
            }
        }
        if !variants.is_empty() {
            locale.variant = Some(variants.join("_"));
        }
        locale.keywords = keywords.filter(|k| !k.is_empty()).map(str::to_string);
        Ok(locale)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    /// Cache key: `language` or `language_REGION`.
    pub fn identity(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// BCP-47 form restricted to language, script and region.
    pub fn to_bcp47(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(script) = &self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(region) = &self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Turkish and Azeri, which map `i`/`I` to the dotted/dotless pair.
    pub fn is_turkic(&self) -> bool {
        matches!(self.language.as_str(), "tr" | "az")
    }

    pub fn is_lithuanian(&self) -> bool {
        self.language == "lt"
    }

    /// Convert to the ICU4X identifier used by the collator.
    pub fn to_icu(&self) -> Result<icu_locid::Locale> {
        self.to_bcp47()
            .parse::<icu_locid::Locale>()
            .map_err(|_| TextError::InvalidLocale(self.to_string()))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en", Some("US"))
    }
}

impl FromStr for Locale {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "_{}", region)?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{}", variant)?;
        }
        if let Some(keywords) = &self.keywords {
            write!(f, "@{}", keywords)?;
        }
        Ok(())
    }
}

// === Locale Service ===

/// Supplies the process default locale. Implemented by the host
/// application; `SystemLocaleService` reads the POSIX environment.
pub trait LocaleService: fmt::Debug + Send + Sync {
    /// The locale used when a caller does not pass one.
    fn default_locale(&self) -> Locale;

    /// Language and region decomposition of `locale`.
    fn language_and_region(&self, locale: &Locale) -> (String, Option<String>) {
        (locale.language().to_string(), locale.region().map(str::to_string))
    }
}

/// Reads `LC_ALL`, `LC_CTYPE` then `LANG`; falls back to `en_US`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleService;

impl LocaleService for SystemLocaleService {
    fn default_locale(&self) -> Locale {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| match Locale::parse(&value) {
                Ok(locale) => Some(locale),
                Err(err) => {
                    tracing::warn!(value = %value, "ignoring unparsable locale from environment: {}", err);
                    None
                }
            })
            .unwrap_or_default()
    }
}

/// Always answers with the same locale.
#[derive(Debug, Clone)]
pub struct FixedLocaleService(pub Locale);

impl LocaleService for FixedLocaleService {
    fn default_locale(&self) -> Locale {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("en_US", "en", Some("US") ; "posix")]
    #[test_case("tr-TR", "tr", Some("TR") ; "bcp47")]
    #[test_case("de_DE.UTF-8", "de", Some("DE") ; "codeset stripped")]
    #[test_case("fr", "fr", None ; "language only")]
    #[test_case("C", "en", Some("US") ; "c locale")]
    #[test_case("es-419", "es", Some("419") ; "numeric region")]
    fn parse_language_region(id: &str, language: &str, region: Option<&str>) {
        let loc = Locale::parse(id).unwrap();
        assert_eq!(loc.language(), language);
        assert_eq!(loc.region(), region);
    }

    #[test]
    fn parse_script_and_variant() {
        let loc = Locale::parse("sr_Latn_RS_POSIX").unwrap();
        assert_eq!(loc.script(), Some("Latn"));
        assert_eq!(loc.region(), Some("RS"));
        assert_eq!(loc.variant(), Some("POSIX"));
        assert_eq!(loc.to_bcp47(), "sr-Latn-RS");
        assert_eq!(loc.to_string(), "sr_Latn_RS_POSIX");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("e").is_err());
        assert!(Locale::parse("en__US").is_err());
        assert!(Locale::parse("1234").is_err());
    }

    #[test]
    fn identity_ignores_variant_and_keywords() {
        let a = Locale::parse("de_DE@collation=phonebook").unwrap();
        let b = Locale::parse("de_DE").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn turkic_detection() {
        assert!(Locale::new("tr", Some("TR")).is_turkic());
        assert!(Locale::new("AZ", None).is_turkic());
        assert!(!Locale::new("en", Some("US")).is_turkic());
    }

    #[test]
    fn converts_to_icu() {
        let loc = Locale::new("tr", Some("tr"));
        assert_eq!(loc.to_icu().unwrap().to_string(), "tr-TR");
    }

    #[test]
    fn fixed_service() {
        let service = FixedLocaleService(Locale::new("tr", Some("TR")));
        assert_eq!(service.default_locale().identity(), "tr_TR");
        let (lang, region) = service.language_and_region(&Locale::new("pt", Some("BR")));
        assert_eq!(lang, "pt");
        assert_eq!(region.as_deref(), Some("BR"));
    }
}
