//! Column cursor and typed accessors.

use std::ops::Range;

use bstr::ByteSlice;
use chrono::{DateTime, Utc};

use super::Reader;
use crate::{
    date::{parse_date, parse_datetime},
    error::{Action, ColumnError, Error},
    escape::unescape_in_place,
    numbers::{parse_float, parse_int},
};

impl<R> Reader<R> {
    /// Slices the next column off the current row, as a range of the row.
    ///
    /// The column counter advances even when this fails, so that errors point
    /// at the column the caller asked for.
    fn next_col(&mut self) -> Result<Range<usize>, ColumnError> {
        if self.row_index == 0 {
            return Err(ColumnError::NoRow);
        }
        self.col_index += 1;
        let Some(pos) = self.cursor else {
            return Err(ColumnError::NoMoreColumns);
        };

        let rest = &self.row_bytes()[pos..];
        let (len, next) = match rest.find_byte(self.options.delimiter.as_byte()) {
            Some(n) => (n, Some(pos + n + 1)),
            None => (rest.len(), None),
        };
        self.cursor = next;
        Ok(pos..pos + len)
    }

    fn column_error(&mut self, action: Action, cause: ColumnError) -> Error {
        let err = Error::Column {
            action,
            row: self.row_index,
            col: self.col_index,
            content: self.row_bytes().into(),
            cause,
        };
        self.fail(err)
    }

    /// The single entry point shared by every typed accessor.
    fn decode<T>(
        &mut self,
        ty: &'static str,
        parse: impl FnOnce(&[u8]) -> Result<T, ColumnError>,
    ) -> Result<T, Error> {
        self.check()?;
        let range = self
            .next_col()
            .map_err(|cause| self.column_error(Action::Read(ty), cause))?;
        let parsed = parse(&self.row_bytes()[range]);
        parsed.map_err(|cause| self.column_error(Action::Parse(ty), cause))
    }

    /// Skips the next column of the current row.
    ///
    /// # Errors
    ///
    /// Fails like [`try_bytes`](Self::try_bytes) when there is no column to
    /// skip.
    pub fn try_skip_col(&mut self) -> Result<(), Error> {
        self.check()?;
        match self.next_col() {
            Ok(_) => Ok(()),
            Err(cause) => Err(self.column_error(Action::Skip, cause)),
        }
    }

    /// Skips the next column of the current row, recording any error.
    pub fn skip_col(&mut self) {
        let _ = self.try_skip_col();
    }

    /// Returns the next column's bytes, with escape sequences decoded.
    ///
    /// The slice borrows the reader's buffer and is valid until the next call.
    /// Decoding happens in place and only for columns that contain a
    /// backslash, so this never allocates.
    ///
    /// # Errors
    ///
    /// Fails if no row has been read, if the row has no columns left, or if
    /// an error is already recorded.
    pub fn try_bytes(&mut self) -> Result<&[u8], Error> {
        self.check()?;
        let range = self
            .next_col()
            .map_err(|cause| self.column_error(Action::Read("bytes"), cause))?;
        let unescape =
            self.options.unescape && self.row.is_some_and(|row| row.needs_unescape);

        let col = &mut self.row_bytes_mut()[range];
        let len = if unescape {
            unescape_in_place(col)
        } else {
            col.len()
        };
        Ok(&col[..len])
    }

    /// Returns the next column's bytes, or an empty slice on error.
    pub fn bytes(&mut self) -> &[u8] {
        self.try_bytes().unwrap_or_default()
    }

    /// Returns the next column as an owned string.
    ///
    /// This allocates; prefer [`try_bytes`](Self::try_bytes) on hot paths.
    ///
    /// # Errors
    ///
    /// Fails like [`try_bytes`](Self::try_bytes), or if the decoded column is
    /// not valid UTF-8.
    pub fn try_string(&mut self) -> Result<String, Error> {
        let owned = self.try_bytes()?.to_vec();
        String::from_utf8(owned)
            .map_err(|_| self.column_error(Action::Parse("string"), ColumnError::InvalidUtf8))
    }

    /// Returns the next column as an owned string, or an empty string on
    /// error.
    pub fn string(&mut self) -> String {
        self.try_string().unwrap_or_default()
    }
}

macro_rules! decoders {
    ($( $(#[$meta:meta])* $name:ident / $try_name:ident -> $ty:ty = $label:literal, $parse:expr; )*) => {
        impl<R> Reader<R> {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Fails if there is no column to read, if the column is not a
                /// valid literal of the type, or if an error is already
                /// recorded.
                pub fn $try_name(&mut self) -> Result<$ty, Error> {
                    self.decode($label, $parse)
                }

                #[doc = concat!(
                    "Like [`", stringify!($try_name), "`](Self::", stringify!($try_name),
                    "), but returns the zero value on error and records it."
                )]
                pub fn $name(&mut self) -> $ty {
                    self.$try_name().unwrap_or_default()
                }
            )*
        }
    };
}

decoders! {
    /// Decodes the next column as an `i8`.
    int8 / try_int8 -> i8 = "int8", parse_int::<i8>;
    /// Decodes the next column as a `u8`.
    uint8 / try_uint8 -> u8 = "uint8", parse_int::<u8>;
    /// Decodes the next column as an `i16`.
    int16 / try_int16 -> i16 = "int16", parse_int::<i16>;
    /// Decodes the next column as a `u16`.
    uint16 / try_uint16 -> u16 = "uint16", parse_int::<u16>;
    /// Decodes the next column as an `i32`.
    int32 / try_int32 -> i32 = "int32", parse_int::<i32>;
    /// Decodes the next column as a `u32`.
    uint32 / try_uint32 -> u32 = "uint32", parse_int::<u32>;
    /// Decodes the next column as an `i64`.
    int64 / try_int64 -> i64 = "int64", parse_int::<i64>;
    /// Decodes the next column as a `u64`.
    uint64 / try_uint64 -> u64 = "uint64", parse_int::<u64>;
    /// Decodes the next column as an `f32`.
    float32 / try_float32 -> f32 = "float32", parse_float::<f32>;
    /// Decodes the next column as an `f64`.
    float64 / try_float64 -> f64 = "float64", parse_float::<f64>;
    /// Decodes the next column as a `YYYY-MM-DD` date at midnight UTC.
    ///
    /// `0000-00-00` decodes to [`ZERO_TIME`](crate::ZERO_TIME).
    date / try_date -> DateTime<Utc> = "date", parse_date;
    /// Decodes the next column as a `YYYY-MM-DD hh:mm:ss` UTC date-time.
    ///
    /// Any time on the date `0000-00-00` decodes to
    /// [`ZERO_TIME`](crate::ZERO_TIME).
    datetime / try_datetime -> DateTime<Utc> = "datetime", parse_datetime;
}
