use std::{fmt, io, sync::Arc};

use bstr::BString;
use thiserror::Error;

/// An error recorded by a [`Reader`](crate::Reader).
///
/// Errors are sticky: once one is recorded, every later operation on the
/// same reader fails with a clone of it until
/// [`Reader::reset_error`](crate::Reader::reset_error) is called.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The underlying stream failed.
    #[error("cannot read row #{row}: {source}")]
    Stream {
        /// Row being read when the stream failed.
        row: usize,
        /// The stream's error.
        source: Arc<io::Error>,
    },
    /// The stream ended in the middle of a row.
    #[error("cannot find newline at the end of row #{row}; row: {content:?}")]
    Truncated {
        /// Index of the incomplete row.
        row: usize,
        /// Bytes staged for the incomplete row.
        content: BString,
    },
    /// [`Reader::next_row`](crate::Reader::next_row) was called before all
    /// columns of the current row were consumed.
    #[error("row #{row} {content:?} contains unread columns: {unread:?}")]
    UnreadColumns {
        /// Index of the offending row.
        row: usize,
        /// The full row.
        content: BString,
        /// The unconsumed tail of the row.
        unread: BString,
    },
    /// A column could not be read or decoded.
    #[error("{action} at row #{row}, col #{col} {content:?}: {cause}")]
    Column {
        /// What the caller asked for.
        action: Action,
        /// Row index, starting at 1.
        row: usize,
        /// Column index, starting at 1.
        col: usize,
        /// The row the column belongs to.
        content: BString,
        /// Why the column was rejected.
        #[source]
        cause: ColumnError,
    },
    /// The stream ended cleanly on a row boundary.
    ///
    /// [`Reader::error`](crate::Reader::error) never reports this variant;
    /// only the `try_*` accessors return it.
    #[error("end of stream")]
    EndOfStream,
}

impl Error {
    /// Returns the column-level cause, if this is a column error.
    #[must_use]
    pub fn column_cause(&self) -> Option<&ColumnError> {
        match self {
            Self::Column { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// The operation that failed on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The column could not be sliced from the row.
    Read(&'static str),
    /// The column was sliced but its bytes did not decode.
    Parse(&'static str),
    /// The column could not be skipped.
    Skip,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(ty) => write!(f, "cannot read `{ty}`"),
            Self::Parse(ty) => write!(f, "cannot parse `{ty}`"),
            Self::Skip => f.write_str("cannot skip column"),
        }
    }
}

/// Why a single column was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnError {
    #[error("missing next_row call")]
    /// No row has been read yet.
    NoRow,
    #[error("no more columns")]
    /// The current row has no columns left.
    NoMoreColumns,
    #[error("invalid syntax")]
    /// The bytes are not a valid literal of the requested type.
    InvalidSyntax,
    #[error("out of range")]
    /// The literal is well formed but does not fit the requested type.
    OutOfRange,
    #[error("invalid UTF-8")]
    /// The text accessor was used on bytes that are not UTF-8.
    InvalidUtf8,
    #[error(transparent)]
    /// The date or date-time decoder rejected the column.
    Date(#[from] DateError),
}

/// A fixed-position field of a date or date-time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `YYYY`
    Year,
    /// `MM`
    Month,
    /// `DD`
    Day,
    /// `hh`
    Hour,
    /// `mm`
    Minute,
    /// `ss`
    Second,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        })
    }
}

/// Why a date or date-time column was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    /// The column is not exactly `YYYY-MM-DD` long.
    #[error("invalid date length {0}; must be YYYY-MM-DD")]
    DateLength(usize),
    /// The dashes are missing.
    #[error("invalid date format. Must be YYYY-MM-DD")]
    DateFormat,
    /// The column is not exactly `YYYY-MM-DD hh:mm:ss` long.
    #[error("invalid datetime length {0}; must be YYYY-MM-DD hh:mm:ss")]
    DateTimeLength(usize),
    /// The space or colons are missing.
    #[error("invalid time format. Must be hh:mm:ss")]
    TimeFormat,
    /// A field contains something other than decimal digits.
    #[error("invalid {0}")]
    Field(DateField),
    /// The fields do not name a day of the proleptic Gregorian calendar.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    Calendar {
        /// Parsed year.
        year: u32,
        /// Parsed month.
        month: u32,
        /// Parsed day.
        day: u32,
    },
    /// The fields do not name a time of day.
    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    TimeOfDay {
        /// Parsed hour.
        hour: u32,
        /// Parsed minute.
        minute: u32,
        /// Parsed second.
        second: u32,
    },
}
