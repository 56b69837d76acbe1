// codec.rs - Conversions between UTF-8, UTF-16 and platform wide strings.
//
// Malformed input never fails a conversion. Each maximal ill-formed subpart
// (per Unicode §3.9, the policy ICU's converters also use) becomes one
// U+FFFD and bumps `Converted::substitutions`. The only real failure is a
// buffer reservation error, which is logged and yields an empty result.

use widestring::{WideChar, WideString};

use crate::buffer_size::{self, ByteLen, CodeUnitLen, WideLen};
use crate::error::{Result, TextError};

pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

// === UTF-8 Sequence Length Table ===
// Maps a lead byte to the length of the sequence it announces (RFC 3629:
// max 4 bytes). Continuation bytes and never-valid leads (C0, C1, F5..FF)
// map to 1.

static SEQUENCE_LEN: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

#[inline]
fn is_tail(b: u8) -> bool {
    (b & 0xc0) == 0x80
}

/// Length of the sequence announced by `lead`, 1 for invalid leads.
#[inline]
pub fn sequence_len(lead: u8) -> usize {
    SEQUENCE_LEN[lead as usize] as usize
}

/// One decoded UTF-8 unit: a scalar value, or `None` for an ill-formed
/// subpart, plus the number of bytes consumed (always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub ch: Option<char>,
    pub len: usize,
}

/// Decode the character starting at `src[pos]`.
///
/// `pos` must be in bounds. Rejects overlongs, encoded surrogates and
/// values above U+10FFFF, consuming only the maximal ill-formed subpart.
pub fn decode_utf8_at(src: &[u8], pos: usize) -> Decoded {
    let lead = src[pos];
    if lead < 0x80 {
        return Decoded { ch: Some(lead as char), len: 1 };
    }
    let need = sequence_len(lead);
    if need == 1 {
        return Decoded { ch: None, len: 1 };
    }

    // Valid range of the second byte depends on the lead.
    let (lo, hi) = match lead {
        0xe0 => (0xa0, 0xbf),
        0xed => (0x80, 0x9f),
        0xf0 => (0x90, 0xbf),
        0xf4 => (0x80, 0x8f),
        _ => (0x80, 0xbf),
    };

    let mut code = (lead as u32) & (0x7f >> need);
    for i in 1..need {
        let Some(&b) = src.get(pos + i) else {
            return Decoded { ch: None, len: i };
        };
        let ok = if i == 1 { (lo..=hi).contains(&b) } else { is_tail(b) };
        if !ok {
            return Decoded { ch: None, len: i };
        }
        code = (code << 6) | (b as u32 & 0x3f);
    }
    Decoded { ch: char::from_u32(code), len: need }
}

/// Result of a conversion with the number of replacement characters
/// substituted for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Converted<T> {
    pub value: T,
    pub substitutions: usize,
}

impl<T> Converted<T> {
    /// No substitution took place.
    pub fn is_lossless(&self) -> bool {
        self.substitutions == 0
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

fn reserve<T>(capacity: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve(capacity)
        .map_err(|_| TextError::Memory { requested: capacity })?;
    Ok(buf)
}

/// Log a reservation failure and fall back to an empty value.
fn or_empty<T: Default>(result: Result<Converted<T>>, what: &str) -> Converted<T> {
    match result {
        Ok(converted) => converted,
        Err(err) => {
            tracing::error!(conversion = what, "conversion failed: {}", err);
            Converted::default()
        }
    }
}

#[inline]
pub(crate) fn push_wide(out: &mut Vec<WideChar>, c: char) {
    if buffer_size::wide_is_32_bit() {
        out.push(c as u32 as WideChar);
    } else {
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
            out.push(*unit as WideChar);
        }
    }
}

/// Iterate over scalar values of UTF-8 bytes, `None` per ill-formed subpart.
fn utf8_scalars(src: &[u8]) -> impl Iterator<Item = Option<char>> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos >= src.len() {
            return None;
        }
        let decoded = decode_utf8_at(src, pos);
        pos += decoded.len;
        Some(decoded.ch)
    })
}

/// Iterate over scalar values of a wide string, `None` per invalid unit.
pub(crate) fn wide_scalars(src: &[WideChar]) -> Box<dyn Iterator<Item = Option<char>> + '_> {
    if buffer_size::wide_is_32_bit() {
        Box::new(src.iter().map(|&w| char::from_u32(w as u32)))
    } else {
        Box::new(char::decode_utf16(src.iter().map(|&w| w as u16)).map(|r| r.ok()))
    }
}

// === Fallible Layer ===

pub fn try_utf8_to_utf16(src: &[u8]) -> Result<Converted<Vec<u16>>> {
    let mut out: Vec<u16> = reserve(buffer_size::utf8_to_utf16(ByteLen(src.len()), 1.0).0)?;
    let mut substitutions = 0;
    let mut units = [0u16; 2];
    for ch in utf8_scalars(src) {
        let c = ch.unwrap_or_else(|| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        });
        out.extend_from_slice(c.encode_utf16(&mut units));
    }
    Ok(Converted { value: out, substitutions })
}

pub fn try_utf16_to_utf8(src: &[u16]) -> Result<Converted<String>> {
    let buf: Vec<u8> = reserve(buffer_size::utf16_to_utf8(CodeUnitLen(src.len()), 1.0).0)?;
    let mut out = String::from_utf8(buf).unwrap_or_default();
    let mut substitutions = 0;
    for r in char::decode_utf16(src.iter().copied()) {
        out.push(r.unwrap_or_else(|_| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        }));
    }
    Ok(Converted { value: out, substitutions })
}

pub fn try_utf8_to_wide(src: &[u8]) -> Result<Converted<WideString>> {
    let mut out: Vec<WideChar> = reserve(buffer_size::utf8_to_wide(ByteLen(src.len()), 1.0).0)?;
    let mut substitutions = 0;
    for ch in utf8_scalars(src) {
        let c = ch.unwrap_or_else(|| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        });
        push_wide(&mut out, c);
    }
    Ok(Converted { value: WideString::from_vec(out), substitutions })
}

pub fn try_wide_to_utf8(src: &[WideChar]) -> Result<Converted<String>> {
    let buf: Vec<u8> = reserve(buffer_size::wide_to_utf8(WideLen(src.len()), 1.0).0)?;
    let mut out = String::from_utf8(buf).unwrap_or_default();
    let mut substitutions = 0;
    for ch in wide_scalars(src) {
        out.push(ch.unwrap_or_else(|| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        }));
    }
    Ok(Converted { value: out, substitutions })
}

pub fn try_utf16_to_wide(src: &[u16]) -> Result<Converted<WideString>> {
    let mut out: Vec<WideChar> = reserve(buffer_size::utf16_to_wide(CodeUnitLen(src.len()), 1.0).0)?;
    let mut substitutions = 0;
    for r in char::decode_utf16(src.iter().copied()) {
        let c = r.unwrap_or_else(|_| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        });
        push_wide(&mut out, c);
    }
    Ok(Converted { value: WideString::from_vec(out), substitutions })
}

pub fn try_wide_to_utf16(src: &[WideChar]) -> Result<Converted<Vec<u16>>> {
    let mut out: Vec<u16> = reserve(buffer_size::wide_to_utf16(WideLen(src.len()), 1.0).0)?;
    let mut substitutions = 0;
    let mut units = [0u16; 2];
    for ch in wide_scalars(src) {
        let c = ch.unwrap_or_else(|| {
            substitutions += 1;
            REPLACEMENT_CHARACTER
        });
        out.extend_from_slice(c.encode_utf16(&mut units));
    }
    Ok(Converted { value: out, substitutions })
}

// === Total Layer ===

/// UTF-8 bytes → UTF-16 code units.
///
/// # Examples
///
/// ```
/// use unitext::codec::utf8_to_utf16;
///
/// let out = utf8_to_utf16(b"h\xC3\xA9\xFF");
/// assert_eq!(out.value, [0x68, 0xE9, 0xFFFD]);
/// assert_eq!(out.substitutions, 1);
/// ```
pub fn utf8_to_utf16(src: &[u8]) -> Converted<Vec<u16>> {
    or_empty(try_utf8_to_utf16(src), "utf8->utf16")
}

/// Convert `byte_len` bytes of `src` starting at `byte_offset`. The range is
/// clamped to the input and may split a character; the split part is
/// substituted.
pub fn utf8_range_to_utf16(src: &[u8], byte_offset: usize, byte_len: usize) -> Converted<Vec<u16>> {
    let start = byte_offset.min(src.len());
    let end = start.saturating_add(byte_len).min(src.len());
    utf8_to_utf16(&src[start..end])
}

/// UTF-16 code units → UTF-8. Lone surrogates are substituted.
pub fn utf16_to_utf8(src: &[u16]) -> Converted<String> {
    or_empty(try_utf16_to_utf8(src), "utf16->utf8")
}

/// UTF-8 bytes → platform wide string.
pub fn utf8_to_wide(src: &[u8]) -> Converted<WideString> {
    or_empty(try_utf8_to_wide(src), "utf8->wide")
}

/// Platform wide string → UTF-8.
pub fn wide_to_utf8(src: &[WideChar]) -> Converted<String> {
    or_empty(try_wide_to_utf8(src), "wide->utf8")
}

/// UTF-16 code units → platform wide string.
pub fn utf16_to_wide(src: &[u16]) -> Converted<WideString> {
    or_empty(try_utf16_to_wide(src), "utf16->wide")
}

/// Platform wide string → UTF-16 code units.
pub fn wide_to_utf16(src: &[WideChar]) -> Converted<Vec<u16>> {
    or_empty(try_wide_to_utf16(src), "wide->utf16")
}

/// Arbitrary bytes → `String`, substituting malformed sequences.
pub fn utf8_lossy(src: &[u8]) -> Converted<String> {
    match std::str::from_utf8(src) {
        Ok(s) => Converted { value: s.to_string(), substitutions: 0 },
        Err(_) => {
            let mut out = String::with_capacity(src.len() + 3);
            let mut substitutions = 0;
            for ch in utf8_scalars(src) {
                out.push(ch.unwrap_or_else(|| {
                    substitutions += 1;
                    REPLACEMENT_CHARACTER
                }));
            }
            Converted { value: out, substitutions }
        }
    }
}

/// Check bytes for well-formed UTF-8.
pub fn validate_utf8(src: &[u8]) -> Result<&str> {
    std::str::from_utf8(src).map_err(|e| TextError::MalformedInput { valid_up_to: e.valid_up_to() })
}

pub fn is_valid_utf8(src: &[u8]) -> bool {
    validate_utf8(src).is_ok()
}
