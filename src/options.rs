// options.rs - Option flags and enums shared across the engine.
//
// Bit values of `StringOptions` follow the ICU option constants they
// select, so hosts that persist them keep working.

use bitflags::bitflags;

bitflags! {
    /// Case folding, title casing and comparison options.
    ///
    /// The empty set is [`StringOptions::FOLD_CASE_DEFAULT`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StringOptions: u32 {
        /// Fold `I`/`İ` the Turkic way: `I → ı`, `İ → i`.
        const FOLD_CASE_EXCLUDE_SPECIAL_I = 0x0000_0001;
        /// Titlecase only the first word; lowercase the rest of the string.
        const TITLE_CASE_WHOLE_STRING = 0x0000_0020;
        /// Titlecase the first word of each sentence.
        const TITLE_CASE_SENTENCES = 0x0000_0040;
        /// Leave the remainder of each word untouched.
        const TITLE_CASE_NO_LOWERCASE = 0x0000_0100;
        /// Titlecase the first character of each segment even if uncased.
        const TITLE_CASE_NO_BREAK_ADJUSTMENT = 0x0000_0200;
        /// Move the titlecase position to the first cased letter.
        const TITLE_CASE_ADJUST_TO_CASED = 0x0000_0400;
        /// Compare in code point order instead of UTF-16 code unit order.
        const COMPARE_CODE_POINT_ORDER = 0x0000_8000;
        /// Ignore case differences.
        const COMPARE_IGNORE_CASE = 0x0001_0000;
        /// Caller guarantees input is already FCD.
        const NORMALIZE_INPUT_IS_FCD = 0x0002_0000;
    }
}

impl StringOptions {
    /// Default full case folding.
    pub const FOLD_CASE_DEFAULT: StringOptions = StringOptions::empty();
}

bitflags! {
    /// Flags passed through to the regex engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RegexpFlags: u32 {
        /// Treat the pattern as literal text.
        const LITERAL = 0x0000_0010;
        const CASE_INSENSITIVE = 0x0000_0002;
        /// `^` and `$` match at line boundaries.
        const MULTILINE = 0x0000_0008;
        /// `.` matches line terminators.
        const DOTALL = 0x0000_0020;
        /// Whitespace and `#` comments in the pattern are ignored.
        const COMMENTS = 0x0000_0004;
        /// Unicode-aware word boundaries for `\b`.
        const UWORD = 0x0000_0100;
        /// Unknown backslash escapes are errors.
        const ERROR_ON_UNKNOWN_ESCAPES = 0x0000_0200;
    }
}

/// Unicode normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NormalizerType {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
    /// NFKC with case folding and default-ignorable removal.
    NfkcCasefold,
}

impl NormalizerType {
    pub const ALL: [NormalizerType; 5] = [
        NormalizerType::Nfc,
        NormalizerType::Nfd,
        NormalizerType::Nfkc,
        NormalizerType::Nfkd,
        NormalizerType::NfkcCasefold,
    ];

    /// Decomposing forms run through the wide-string path.
    pub fn is_decomposing(self) -> bool {
        matches!(self, NormalizerType::Nfd | NormalizerType::Nfkd)
    }

    pub fn name(self) -> &'static str {
        match self {
            NormalizerType::Nfc => "NFC",
            NormalizerType::Nfd => "NFD",
            NormalizerType::Nfkc => "NFKC",
            NormalizerType::Nfkd => "NFKD",
            NormalizerType::NfkcCasefold => "NFKC_CF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_is_fold_case_default() {
        assert_eq!(StringOptions::default(), StringOptions::FOLD_CASE_DEFAULT);
        assert!(StringOptions::FOLD_CASE_DEFAULT.is_empty());
    }

    #[test]
    fn options_compose() {
        let opts = StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I | StringOptions::COMPARE_CODE_POINT_ORDER;
        assert!(opts.contains(StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I));
        assert!(!opts.contains(StringOptions::TITLE_CASE_SENTENCES));
        assert_eq!(opts.bits(), 0x8001);
    }

    #[test]
    fn decomposing_forms() {
        let decomposing: Vec<_> = NormalizerType::ALL.iter().filter(|f| f.is_decomposing()).collect();
        assert_eq!(decomposing, [&NormalizerType::Nfd, &NormalizerType::Nfkd]);
    }
}
