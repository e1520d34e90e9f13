//! Fixed-width `YYYY-MM-DD` and `YYYY-MM-DD hh:mm:ss` decoding.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{ColumnError, DateError, DateField};

/// The value returned for the all-zero date `0000-00-00`, and the zero value
/// of the sticky date accessors.
///
/// Some warehouses (ClickHouse among them) export unset dates as
/// `0000-00-00`, which is not a calendar day.
pub const ZERO_TIME: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

const DATE_LEN: usize = "YYYY-MM-DD".len();
const DATETIME_LEN: usize = "YYYY-MM-DD hh:mm:ss".len();

fn digits(raw: &[u8], field: DateField) -> Result<u32, DateError> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return Err(DateError::Field(field));
    }
    Ok(raw
        .iter()
        .fold(0, |acc, &b| acc * 10 + u32::from(b - b'0')))
}

fn split_date(raw: &[u8]) -> Result<(u32, u32, u32), DateError> {
    if raw.len() != DATE_LEN {
        return Err(DateError::DateLength(raw.len()));
    }
    if raw[4] != b'-' || raw[7] != b'-' {
        return Err(DateError::DateFormat);
    }
    let year = digits(&raw[..4], DateField::Year)?;
    let month = digits(&raw[5..7], DateField::Month)?;
    let day = digits(&raw[8..], DateField::Day)?;
    Ok((year, month, day))
}

#[expect(clippy::cast_possible_wrap)]
fn calendar(year: u32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    // at most four digits
    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(DateError::Calendar { year, month, day })
}

pub(crate) fn parse_date(raw: &[u8]) -> Result<DateTime<Utc>, ColumnError> {
    let (year, month, day) = split_date(raw)?;
    if (year, month, day) == (0, 0, 0) {
        return Ok(ZERO_TIME);
    }
    Ok(calendar(year, month, day)?.and_time(NaiveTime::MIN).and_utc())
}

pub(crate) fn parse_datetime(raw: &[u8]) -> Result<DateTime<Utc>, ColumnError> {
    if raw.len() != DATETIME_LEN {
        return Err(DateError::DateTimeLength(raw.len()).into());
    }
    let (year, month, day) = split_date(&raw[..DATE_LEN])?;

    let time = &raw[DATE_LEN..];
    if time[0] != b' ' || time[3] != b':' || time[6] != b':' {
        return Err(DateError::TimeFormat.into());
    }
    let hour = digits(&time[1..3], DateField::Hour)?;
    let minute = digits(&time[4..6], DateField::Minute)?;
    let second = digits(&time[7..], DateField::Second)?;

    if (year, month, day) == (0, 0, 0) {
        return Ok(ZERO_TIME);
    }
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(DateError::TimeOfDay {
        hour,
        minute,
        second,
    })?;
    Ok(calendar(year, month, day)?.and_time(time).and_utc())
}
