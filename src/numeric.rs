// numeric.rs - Number classification and time string conversion.

use bitflags::bitflags;

bitflags! {
    /// Fields emitted by [`seconds_to_time_string`]. The empty set picks
    /// `MM:SS` or `HH:MM:SS` from the magnitude.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TimeFormat: u32 {
        /// Two-digit seconds.
        const SS = 1;
        /// Two-digit minutes.
        const MM = 2;
        /// Two-digit hours.
        const HH = 8;
        /// Unpadded hours.
        const H = 16;
    }
}

impl TimeFormat {
    pub const GUESS: TimeFormat = TimeFormat::empty();
    pub const MM_SS: TimeFormat = TimeFormat::MM.union(TimeFormat::SS);
    pub const HH_MM: TimeFormat = TimeFormat::HH.union(TimeFormat::MM);
    pub const HH_MM_SS: TimeFormat = TimeFormat::HH.union(TimeFormat::MM).union(TimeFormat::SS);
    pub const H_MM_SS: TimeFormat = TimeFormat::H.union(TimeFormat::MM).union(TimeFormat::SS);
}

/// Leading-integer parse: optional white space and sign, then digits up to
/// the first non-digit. No digits gives 0. Saturates on overflow.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value = 0i64;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Seconds in `"HH:MM:SS"`, `"MM:SS"`, `"SS"` or `"N min"`.
///
/// ```
/// use unitext::numeric::time_string_to_seconds;
///
/// assert_eq!(time_string_to_seconds("01:02:03"), 3723);
/// assert_eq!(time_string_to_seconds(" 90 min "), 5400);
/// assert_eq!(time_string_to_seconds(""), 0);
/// ```
pub fn time_string_to_seconds(time: &str) -> i64 {
    let time = time.trim();
    let lower = time.to_ascii_lowercase();
    if lower.ends_with(" min") {
        return leading_int(time).saturating_mul(60);
    }
    time.split(':')
        .take(3)
        .fold(0i64, |acc, field| acc.saturating_mul(60).saturating_add(leading_int(field)))
}

/// Format `seconds` as a clock string. Negative values get a leading `-`.
///
/// ```
/// use unitext::numeric::{seconds_to_time_string, TimeFormat};
///
/// assert_eq!(seconds_to_time_string(75, TimeFormat::GUESS), "01:15");
/// assert_eq!(seconds_to_time_string(3723, TimeFormat::GUESS), "01:02:03");
/// assert_eq!(seconds_to_time_string(3723, TimeFormat::H_MM_SS), "1:02:03");
/// ```
pub fn seconds_to_time_string(seconds: i64, format: TimeFormat) -> String {
    let negative = seconds < 0;
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let secs = total % 60;

    let format = if format.is_empty() {
        if hours >= 1 {
            TimeFormat::HH_MM_SS
        } else {
            TimeFormat::MM_SS
        }
    } else {
        format
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let mut fields: Vec<String> = Vec::with_capacity(3);
    if format.contains(TimeFormat::HH) {
        fields.push(format!("{hours:02}"));
    } else if format.contains(TimeFormat::H) {
        fields.push(hours.to_string());
    }
    if format.contains(TimeFormat::MM) {
        fields.push(format!("{minutes:02}"));
    }
    if format.contains(TimeFormat::SS) {
        fields.push(format!("{secs:02}"));
    }
    out.push_str(&fields.join(":"));
    out
}

fn classify(s: &str, allow_sign: bool) -> bool {
    let body = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = match body.strip_prefix('-') {
        Some(rest) if allow_sign => rest,
        _ => body,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional surrounding white space around one or more ASCII digits.
pub fn is_natural_number(s: &str) -> bool {
    classify(s, false)
}

/// [`is_natural_number`] with an optional leading `-`.
pub fn is_integer(s: &str) -> bool {
    classify(s, true)
}

/// The ASCII digits of `s`, in order.
pub fn return_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Occurrences of `number` in `s` that are not part of a longer digit run.
pub fn find_number(s: &str, number: &str) -> usize {
    if number.is_empty() {
        return 0;
    }
    let bytes = s.as_bytes();
    memchr::memmem::find_iter(bytes, number.as_bytes())
        .filter(|&i| {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + number.len()).copied();
            !before.is_some_and(|b| b.is_ascii_digit()) && !after.is_some_and(|b| b.is_ascii_digit())
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", 0 ; "empty")]
    #[test_case("45", 45 ; "seconds")]
    #[test_case("1:30", 90 ; "minutes seconds")]
    #[test_case("01:02:03", 3723 ; "hours minutes seconds")]
    #[test_case("1:2:3:4", 3723 ; "extra fields ignored")]
    #[test_case("12 min", 720 ; "minutes suffix")]
    #[test_case("12 MIN", 720 ; "suffix ignores case")]
    #[test_case("  2:05  ", 125 ; "trimmed")]
    #[test_case("ab:10", 10 ; "non numeric field is zero")]
    #[test_case("99999999999999999999:00", i64::MAX ; "huge hours saturate")]
    #[test_case("999999999999999999 min", i64::MAX ; "huge minutes saturate")]
    #[test_case("-99999999999999999999:00", i64::MIN ; "huge negative saturates")]
    fn time_strings(input: &str, expected: i64) {
        assert_eq!(time_string_to_seconds(input), expected);
    }

    #[test_case(0, TimeFormat::GUESS, "00:00" ; "zero")]
    #[test_case(59, TimeFormat::GUESS, "00:59" ; "under a minute")]
    #[test_case(3600, TimeFormat::GUESS, "01:00:00" ; "one hour")]
    #[test_case(-75, TimeFormat::GUESS, "-01:15" ; "negative")]
    #[test_case(3723, TimeFormat::HH_MM, "01:02" ; "hours minutes")]
    #[test_case(45, TimeFormat::SS, "45" ; "seconds only")]
    fn formatting(seconds: i64, format: TimeFormat, expected: &str) {
        assert_eq!(seconds_to_time_string(seconds, format), expected);
    }

    #[test_case(" 12 ", true, true ; "padded")]
    #[test_case("-12", false, true ; "negative")]
    #[test_case("1 2", false, false ; "inner space")]
    #[test_case("", false, false ; "empty")]
    #[test_case("-", false, false ; "sign only")]
    #[test_case("12a", false, false ; "trailing letter")]
    #[test_case("+1", false, false ; "plus sign")]
    fn numbers(s: &str, natural: bool, integer: bool) {
        assert_eq!(is_natural_number(s), natural);
        assert_eq!(is_integer(s), integer);
    }

    #[test]
    fn digits() {
        assert_eq!(return_digits("S01E02 (720p)"), "0102720");
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(find_number("1 12 21 1", "1"), 2);
        assert_eq!(find_number("x12y 12", "12"), 2);
        assert_eq!(find_number("123", "12"), 0);
        assert_eq!(find_number("12", ""), 0);
    }
}
