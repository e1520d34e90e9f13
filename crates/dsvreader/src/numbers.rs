use core::{
    num::{IntErrorKind, ParseIntError},
    str::FromStr,
};

use crate::error::ColumnError;

/// Borrows column bytes as text without copying them.
#[inline]
pub(crate) fn as_text(raw: &[u8]) -> Result<&str, ColumnError> {
    core::str::from_utf8(raw).map_err(|_| ColumnError::InvalidSyntax)
}

/// Parses a decimal integer of any width.
///
/// Most columns fit their declared type, so the value is first parsed as an
/// `i64` and narrowed. Only when that fails is the text parsed again at the
/// target width, which is what distinguishes malformed input from input that
/// is merely out of range (and accepts the upper half of `u64`).
pub(crate) fn parse_int<T>(raw: &[u8]) -> Result<T, ColumnError>
where
    T: TryFrom<i64> + FromStr<Err = ParseIntError>,
{
    let s = as_text(raw)?;
    if let Ok(wide) = s.parse::<i64>() {
        if let Ok(n) = T::try_from(wide) {
            return Ok(n);
        }
    }
    s.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ColumnError::OutOfRange,
        _ => ColumnError::InvalidSyntax,
    })
}

/// Parses a floating-point literal at the precision of `T`.
///
/// Finite literals too large for `T` are out of range rather than infinite.
pub(crate) fn parse_float<T>(raw: &[u8]) -> Result<T, ColumnError>
where
    T: FromStr + Into<f64> + Copy,
{
    let s = as_text(raw)?;
    let value = s.parse::<T>().map_err(|_| ColumnError::InvalidSyntax)?;
    if value.into().is_infinite() && !names_infinity(s) {
        return Err(ColumnError::OutOfRange);
    }
    Ok(value)
}

fn names_infinity(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
