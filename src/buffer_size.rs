// buffer_size.rs - Destination capacity estimates for encoding conversions.
//
// Each estimate is `ceil(len * multiplier * scale) + PADDING` in the
// destination's own unit. Estimates may be oversized, never undersized for
// scale >= 1.0.

use widestring::WideChar;

/// Fixed safety pad added to every estimate, in destination units.
pub const PADDING: usize = 200;

/// Length in UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteLen(pub usize);

/// Length in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CodeUnitLen(pub usize);

/// Length in platform wide characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WideLen(pub usize);

/// True when the platform wide character holds a full code point.
#[inline]
pub const fn wide_is_32_bit() -> bool {
    std::mem::size_of::<WideChar>() == 4
}

#[inline]
fn estimate(len: usize, multiplier: usize, scale: f32) -> usize {
    let scale = if scale.is_finite() && scale > 0.0 { scale as f64 } else { 1.0 };
    ((len as f64) * (multiplier as f64) * scale).ceil() as usize + PADDING
}

/// UTF-8 → UTF-16. A code point never needs more code units than bytes.
pub fn utf8_to_utf16(len: ByteLen, scale: f32) -> CodeUnitLen {
    CodeUnitLen(estimate(len.0, 1, scale))
}

/// UTF-16 → UTF-8. Worst case three bytes per unit (BMP scripts such as
/// CJK, Indic and Thai).
pub fn utf16_to_utf8(len: CodeUnitLen, scale: f32) -> ByteLen {
    ByteLen(estimate(len.0, 3, scale))
}

/// UTF-16 → wide.
pub fn utf16_to_wide(len: CodeUnitLen, scale: f32) -> WideLen {
    let multiplier = if wide_is_32_bit() { 2 } else { 1 };
    WideLen(estimate(len.0, multiplier, scale))
}

/// Wide → UTF-16. A 32-bit wide char may become a surrogate pair.
pub fn wide_to_utf16(len: WideLen, scale: f32) -> CodeUnitLen {
    let multiplier = if wide_is_32_bit() { 2 } else { 1 };
    CodeUnitLen(estimate(len.0, multiplier, scale))
}

/// UTF-8 → wide.
pub fn utf8_to_wide(len: ByteLen, scale: f32) -> WideLen {
    WideLen(estimate(len.0, 1, scale))
}

/// Wide → UTF-8.
pub fn wide_to_utf8(len: WideLen, scale: f32) -> ByteLen {
    ByteLen(estimate(len.0, 4, scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gets_padding() {
        assert_eq!(utf8_to_utf16(ByteLen(0), 1.0), CodeUnitLen(PADDING));
        assert_eq!(wide_to_utf8(WideLen(0), 1.0), ByteLen(PADDING));
    }

    #[test]
    fn utf16_to_utf8_triples() {
        assert_eq!(utf16_to_utf8(CodeUnitLen(10), 1.0), ByteLen(230));
        assert_eq!(utf16_to_utf8(CodeUnitLen(10), 2.0), ByteLen(260));
    }

    #[test]
    fn wide_multiplier_follows_platform() {
        let expected = if wide_is_32_bit() { 220 } else { 210 };
        assert_eq!(utf16_to_wide(CodeUnitLen(10), 1.0), WideLen(expected));
        assert_eq!(wide_to_utf16(WideLen(10), 1.0), CodeUnitLen(expected));
    }

    #[test]
    fn fractional_scale_rounds_up() {
        assert_eq!(utf8_to_utf16(ByteLen(3), 1.5), CodeUnitLen(205));
    }

    #[test]
    fn nonsense_scale_treated_as_one() {
        assert_eq!(utf8_to_wide(ByteLen(4), f32::NAN), WideLen(204));
        assert_eq!(utf8_to_wide(ByteLen(4), -2.0), WideLen(204));
    }
}
