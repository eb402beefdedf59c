pub mod controller;
pub mod input;
pub mod models;
pub mod payload;

pub use controller::{FormController, SubmitError};
pub use input::{parse_assignment, values_from_json, InputError};
pub use models::{Field, FieldParseError, FormData, Touched};
pub use payload::PredictionRequest;

/// Reads the leading integer of a raw input value.
///
/// Leading whitespace and a single sign are accepted and anything after the
/// first run of digits is ignored, so `"12 sq ft"` reads as 12 and `"1.9"` as 1.
/// Returns `None` when no digit follows, which callers treat like any other
/// invalid value.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in rest[..digits_len].bytes() {
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }

    Some(if negative { -value } else { value })
}
