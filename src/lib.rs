//! # Unitext
//!
//! Locale-aware Unicode string primitives: case mapping and folding,
//! normalization, grapheme-correct substrings, natural ("alphanumeric")
//! ordering, collation, and search/replace/split helpers over UTF-8.
//!
//! ## Quick Start
//!
//! ```rust
//! use unitext::prelude::*;
//!
//! let tr = Locale::parse("tr_TR").unwrap();
//! assert_eq!(to_upper("istanbul", &tr), "İSTANBUL");
//!
//! assert_eq!(fold_case("Straße", StringOptions::empty()), "strasse");
//!
//! let en = Locale::new("en", Some("US"));
//! assert_eq!(left("cafe\u{0301} noir", 4, true, &en), "caf\u{e9}");
//!
//! let mut names = vec!["ep10", "ep2", "Ep1"];
//! names.sort_by(|a, b| alpha_numeric_compare(a, b, AlphaNumericMode::AccentFolding).cmp(&0));
//! assert_eq!(names, ["Ep1", "ep2", "ep10"]);
//! ```
//!
//! ## Per-Thread State
//!
//! Break iterators and the collator live in a [`context::TextContext`]. The
//! free functions use one lazily created context per thread; call
//! [`collator::initialize_collator`] on each thread before collating
//! there, or own a `TextContext` and call its methods directly.
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`codec`] | UTF-8 / UTF-16 / wide conversion with substitution counts |
//! | [`buffer_size`] | Destination capacity estimates for conversions |
//! | [`case`] | Upper/lower/title case, capitalization, case folding |
//! | [`normalize`] | NFC, NFD, NFKC, NFKD and NFKC_Casefold |
//! | [`compare`] | Equality, case-insensitive and natural ordering |
//! | [`collation_table`] | Accent-folding weights for natural ordering |
//! | [`collator`] | Locale collator and its per-thread entry points |
//! | [`grapheme`] | Character boundaries, `left` / `right` / `mid` |
//! | [`find`] | Search, replace, regex, split, tokenize, trim |
//! | [`numeric`] | Number classification and time strings |
//! | [`locale`] | Locale identifiers and the locale service |
//! | [`config`] | `TextConfig` and its builder |
//! | [`context`] | Per-thread engine state |
//! | [`options`] | Option, regex and normalization flags |
//! | [`error`] | `TextError` and `Result` |

pub mod buffer_size;
pub mod case;
pub mod codec;
pub mod collation_table;
pub mod collator;
pub mod compare;
pub mod config;
pub mod context;
pub mod error;
pub mod find;
pub mod grapheme;
pub mod locale;
pub mod normalize;
pub mod numeric;
pub mod options;
pub mod prelude;
