//! A streaming reader for delimiter-separated values (CSV, TSV, PSV or any
//! single-byte delimiter).
//!
//! Rows are terminated by `\n` and columns are separated by one configured
//! byte. Quoting is not supported; instead, column bytes may carry
//! backslash escapes (`\t`, `\n`, `\\`, ...) which the bytes and text
//! accessors decode in place.
//!
//! The reader pulls input through a fixed 4 KiB buffer and hands out column
//! slices that borrow directly from it, so reading a stream allocates only
//! when a row straddles two reads.
//!
//! ```rust
//! use dsvreader::Reader;
//!
//! let input = "alice\t42\t2024-01-15\nbob\t7\t0000-00-00\n";
//! let mut reader = Reader::tsv(input.as_bytes());
//! let mut total = 0u64;
//! while reader.next_row() {
//!     let _name = reader.bytes();
//!     total += u64::from(reader.uint32());
//!     let _joined = reader.date();
//! }
//! assert!(reader.error().is_none());
//! assert_eq!(total, 49);
//! ```
//!
//! Every accessor also exists as a `try_*` variant returning
//! `Result<T, Error>`. The plain variants return the type's zero value on
//! failure and record the error, which [`Reader::error`] reports once the
//! caller is done with a batch of columns.

mod date;
mod error;
mod escape;
mod numbers;
mod options;
mod reader;

#[cfg(test)]
mod tests;

pub use date::ZERO_TIME;
pub use error::{Action, ColumnError, DateError, DateField, Error};
pub use options::{Delimiter, ReaderOptions};
pub use reader::{READ_BUFFER_SIZE, Reader};
