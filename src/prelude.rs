// prelude.rs - Convenient re-exports of the everyday API.
//
//! # Prelude
//!
//! ```
//! use unitext::prelude::*;
//!
//! assert_eq!(split("a,b,c", ",", 2), ["a", "b,c"]);
//! assert!(equals_no_case("ΣΑΣ", "σας", StringOptions::empty(), false));
//! ```

pub use crate::case::{capitalize, fold_case, title_case, to_lower, to_upper};
pub use crate::codec::{utf16_to_utf8, utf8_to_utf16, utf8_to_wide, wide_to_utf8, Converted};
pub use crate::collator::{collate, initialize_collator, CollatorService};
pub use crate::compare::{
    alpha_numeric_collation, alpha_numeric_compare, compare, compare_no_case, compare_no_case_n, equals,
    equals_no_case,
};
pub use crate::config::{AlphaNumericMode, TextConfig, TextConfigBuilder};
pub use crate::context::TextContext;
pub use crate::error::{Result, TextError};
pub use crate::find::{
    find_and_replace, regex_replace_all, split, split_any, split_multi, tokenize, trim, trim_chars,
};
pub use crate::grapheme::{character_boundary, left, mid, right, CharBoundary};
pub use crate::locale::{Locale, LocaleService};
pub use crate::normalize::normalize;
pub use crate::options::{NormalizerType, RegexpFlags, StringOptions};
