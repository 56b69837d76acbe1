// normalize.rs - Unicode normalization forms.
//
// Composing forms (NFC, NFKC, NFKC_CF) stream straight over the UTF-8
// input. Decomposing forms (NFD, NFKD) go through the wide representation:
// UTF-8 -> wide -> decompose -> UTF-8. Failures return the input unchanged
// and log an error.

use unicode_casefold::UnicodeCaseFold;
use unicode_normalization::{is_nfc_quick, is_nfd_quick, is_nfkc_quick, is_nfkd_quick, IsNormalized};
use unicode_normalization::UnicodeNormalization;
use widestring::WideChar;

use crate::case::turkic_fold_special_i;
use crate::codec;
use crate::error::Result;
use crate::options::{NormalizerType, StringOptions};

/// A normalizer for one form. Obtain shared instances with [`instance`].
#[derive(Debug)]
pub struct Normalizer {
    form: NormalizerType,
}

static NORMALIZERS: [Normalizer; 5] = [
    Normalizer { form: NormalizerType::Nfc },
    Normalizer { form: NormalizerType::Nfd },
    Normalizer { form: NormalizerType::Nfkc },
    Normalizer { form: NormalizerType::Nfkd },
    Normalizer { form: NormalizerType::NfkcCasefold },
];

/// Shared normalizer for `form`.
pub fn instance(form: NormalizerType) -> &'static Normalizer {
    match form {
        NormalizerType::Nfc => &NORMALIZERS[0],
        NormalizerType::Nfd => &NORMALIZERS[1],
        NormalizerType::Nfkc => &NORMALIZERS[2],
        NormalizerType::Nfkd => &NORMALIZERS[3],
        NormalizerType::NfkcCasefold => &NORMALIZERS[4],
    }
}

impl Normalizer {
    pub fn form(&self) -> NormalizerType {
        self.form
    }

    /// Quick check. `Maybe` answers are resolved by normalizing.
    pub fn is_normalized(&self, s: &str) -> bool {
        let quick = match self.form {
            NormalizerType::Nfc => is_nfc_quick(s.chars()),
            NormalizerType::Nfd => is_nfd_quick(s.chars()),
            NormalizerType::Nfkc => is_nfkc_quick(s.chars()),
            NormalizerType::Nfkd => is_nfkd_quick(s.chars()),
            NormalizerType::NfkcCasefold => IsNormalized::Maybe,
        };
        match quick {
            IsNormalized::Yes => true,
            IsNormalized::No => false,
            IsNormalized::Maybe => self
                .try_normalize(s, StringOptions::empty())
                .map(|n| n == s)
                .unwrap_or(false),
        }
    }

    /// Normalize, surfacing conversion failures.
    pub fn try_normalize(&self, s: &str, options: StringOptions) -> Result<String> {
        match self.form {
            NormalizerType::Nfc => Ok(s.nfc().collect()),
            NormalizerType::Nfkc => Ok(s.nfkc().collect()),
            NormalizerType::NfkcCasefold => Ok(nfkc_casefold(s, options)),
            NormalizerType::Nfd | NormalizerType::Nfkd => self.decompose_wide(s),
        }
    }

    fn decompose_wide(&self, s: &str) -> Result<String> {
        let wide = codec::try_utf8_to_wide(s.as_bytes())?;
        let chars = codec::wide_scalars(wide.value.as_slice()).map(|c| c.unwrap_or(codec::REPLACEMENT_CHARACTER));
        let mut decomposed: Vec<WideChar> = Vec::new();
        decomposed.try_reserve(wide.value.len() + wide.value.len() / 2)?;
        if self.form == NormalizerType::Nfd {
            chars.nfd().for_each(|c| codec::push_wide(&mut decomposed, c));
        } else {
            chars.nfkd().for_each(|c| codec::push_wide(&mut decomposed, c));
        }
        Ok(codec::try_wide_to_utf8(&decomposed)?.value)
    }
}

/// NFKC_Casefold: decompose, fold, drop default ignorables, recompose.
/// The Turkic `I` mapping applies before decomposition splits `İ`.
fn nfkc_casefold(s: &str, options: StringOptions) -> String {
    let turkic = options.contains(StringOptions::FOLD_CASE_EXCLUDE_SPECIAL_I);
    s.chars()
        .map(|c| if turkic { turkic_fold_special_i(c) } else { c })
        .nfd()
        .case_fold()
        .filter(|&c| !is_default_ignorable(c))
        .nfkc()
        .collect()
}

fn is_default_ignorable(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x034F
            | 0x061C
            | 0x115F..=0x1160
            | 0x17B4..=0x17B5
            | 0x180B..=0x180F
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x206F
            | 0x3164
            | 0xFE00..=0xFE0F
            | 0xFEFF
            | 0xFFA0
            | 0xFFF0..=0xFFF8
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0000..=0xE0FFF
    )
}

/// Normalize `s` to `form`. Returns `s` unchanged if normalization fails.
///
/// # Examples
///
/// ```
/// use unitext::normalize::normalize;
/// use unitext::options::{NormalizerType, StringOptions};
///
/// let decomposed = "e\u{0301}";
/// assert_eq!(normalize(decomposed, StringOptions::empty(), NormalizerType::Nfc), "\u{e9}");
/// assert_eq!(normalize("\u{e9}", StringOptions::empty(), NormalizerType::Nfd), decomposed);
/// assert_eq!(normalize("ﬁ", StringOptions::empty(), NormalizerType::Nfkc), "fi");
/// ```
pub fn normalize(s: &str, options: StringOptions, form: NormalizerType) -> String {
    let normalizer = instance(form);
    if options.contains(StringOptions::NORMALIZE_INPUT_IS_FCD) && normalizer.is_normalized(s) {
        return s.to_string();
    }
    match normalizer.try_normalize(s, options) {
        Ok(normalized) => normalized,
        Err(err) => {
            tracing::error!(form = form.name(), "normalization failed, returning input: {}", err);
            s.to_string()
        }
    }
}

/// Quick check whether `s` is already in `form`.
pub fn is_normalized(s: &str, form: NormalizerType) -> bool {
    instance(form).is_normalized(s)
}
