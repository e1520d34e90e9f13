//! Buffered row splitting.
//!
//! Overview
//! - `buf` is a fixed 4 KiB array owned inline by the reader. Each refill
//!   replaces its contents wholesale; `pending` is the unconsumed tail of the
//!   last refill.
//! - A row whose newline lies in `pending` is handed out as a range of `buf`
//!   without copying. A row that runs off the end of `buf` is staged in
//!   `overflow` across as many refills as it takes, and handed out from there.
//!   `overflow` is truncated, never shrunk, once its row is done.
//! - Column slicing and the typed decoders live in [`columns`]; they only see
//!   the current row through [`Reader::row_bytes`] and the column cursor.
//!
//! Errors
//! - The first failure is stored in `err` and every later call reports it
//!   until [`Reader::reset_error`]. Clean end of stream is stored the same way
//!   as [`Error::EndOfStream`] so that all accessors stop, but
//!   [`Reader::error`] hides it.
//! - Stream failures are remembered separately in `stream_end` and are never
//!   retried, so resetting the error after a broken stream reports the same
//!   failure on the next row.

mod columns;

use std::{fmt, io, io::Read, mem, ops::Range, sync::Arc};

use bstr::{BString, ByteSlice};
use tracing::{debug, trace};

use crate::{
    error::Error,
    escape::ESCAPE,
    options::{Delimiter, ReaderOptions},
};

/// Size of the reader's inline read buffer.
pub const READ_BUFFER_SIZE: usize = 4 << 10;

#[derive(Debug)]
enum StreamEnd {
    Eof,
    Failed(Arc<io::Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowSource {
    Buffer,
    Overflow,
}

#[derive(Debug, Clone, Copy)]
struct Row {
    source: RowSource,
    span: (usize, usize),
    needs_unescape: bool,
}

/// A forward-only reader of delimiter-separated rows.
///
/// Call [`next_row`](Self::next_row) to move to a row, then read each of its
/// columns exactly once, in order, with one of the column accessors or
/// [`skip_col`](Self::skip_col). Once `next_row` returns `false`, check
/// [`error`](Self::error): `None` means the input ended cleanly.
///
/// The reader is not meant to be shared; slices returned by
/// [`bytes`](Self::bytes) borrow the reader and stay valid only until the
/// next call.
pub struct Reader<R> {
    stream: R,
    buf: [u8; READ_BUFFER_SIZE],
    pending: Range<usize>,
    stream_end: Option<StreamEnd>,
    needs_unescape: bool,

    overflow: Vec<u8>,
    overflow_escaped: bool,

    row: Option<Row>,
    cursor: Option<usize>,
    row_index: usize,
    col_index: usize,

    err: Option<Error>,
    options: ReaderOptions,
}

impl<R: Read> Reader<R> {
    /// Creates a reader splitting columns on `delimiter`.
    pub fn new(delimiter: impl Into<Delimiter>, stream: R) -> Self {
        Self::with_options(
            ReaderOptions {
                delimiter: delimiter.into(),
                ..ReaderOptions::default()
            },
            stream,
        )
    }

    /// Creates a reader with explicit options.
    pub fn with_options(options: ReaderOptions, stream: R) -> Self {
        Self {
            stream,
            buf: [0; READ_BUFFER_SIZE],
            pending: 0..0,
            stream_end: None,
            needs_unescape: false,
            overflow: Vec::new(),
            overflow_escaped: false,
            row: None,
            cursor: None,
            row_index: 0,
            col_index: 0,
            err: None,
            options,
        }
    }

    /// Creates a reader for comma-separated values.
    pub fn csv(stream: R) -> Self {
        Self::new(Delimiter::Comma, stream)
    }

    /// Creates a reader for tab-separated values.
    pub fn tsv(stream: R) -> Self {
        Self::new(Delimiter::Tab, stream)
    }

    /// Creates a reader for pipe-separated values.
    pub fn psv(stream: R) -> Self {
        Self::new(Delimiter::Pipe, stream)
    }

    /// Advances to the next row.
    ///
    /// Returns `Ok(false)` at a clean end of input. Fails if the previous row
    /// still has unread columns, if the stream fails, or if the stream ends
    /// in the middle of a row.
    ///
    /// # Errors
    ///
    /// Returns the sticky error if one is recorded, or the error this call
    /// records.
    pub fn try_next_row(&mut self) -> Result<bool, Error> {
        match &self.err {
            None => {}
            Some(Error::EndOfStream) => return Ok(false),
            Some(err) => return Err(err.clone()),
        }
        if self.has_cols() {
            let err = Error::UnreadColumns {
                row: self.row_index,
                content: BString::from(self.row_bytes()),
                unread: BString::from(self.unread_bytes()),
            };
            return Err(self.fail(err));
        }
        if self.row.is_some_and(|row| row.source == RowSource::Overflow) {
            self.overflow.clear();
        }

        self.row_index += 1;
        self.col_index = 0;
        self.row = None;
        self.cursor = None;

        loop {
            if self.pending.is_empty() {
                if let Some(end) = &self.stream_end {
                    let err = match end {
                        StreamEnd::Eof if self.overflow.is_empty() => Error::EndOfStream,
                        StreamEnd::Eof => Error::Truncated {
                            row: self.row_index,
                            content: BString::from(self.overflow.as_slice()),
                        },
                        StreamEnd::Failed(source) => Error::Stream {
                            row: self.row_index,
                            source: Arc::clone(source),
                        },
                    };
                    return match self.fail(err) {
                        Error::EndOfStream => Ok(false),
                        err => Err(err),
                    };
                }
                self.fill();
                continue;
            }

            let window = &self.buf[self.pending.clone()];
            if let Some(n) = window.find_byte(b'\n') {
                let (start, end) = (self.pending.start, self.pending.start + n);
                self.pending.start = end + 1;
                let row = if self.overflow.is_empty() {
                    Row {
                        source: RowSource::Buffer,
                        span: (start, end),
                        needs_unescape: self.needs_unescape,
                    }
                } else {
                    self.overflow.extend_from_slice(&self.buf[start..end]);
                    Row {
                        source: RowSource::Overflow,
                        span: (0, self.overflow.len()),
                        needs_unescape: self.needs_unescape || self.overflow_escaped,
                    }
                };
                self.overflow_escaped = false;
                self.row = Some(row);
                self.cursor = Some(0);
                return Ok(true);
            }

            self.overflow.extend_from_slice(window);
            self.overflow_escaped |= self.needs_unescape;
            self.pending = 0..0;
            trace!(
                row = self.row_index,
                staged = self.overflow.len(),
                "row spans read buffer"
            );
        }
    }

    /// Advances to the next row, returning `false` at the end of input or on
    /// error.
    ///
    /// Check [`error`](Self::error) after this returns `false`.
    pub fn next_row(&mut self) -> bool {
        self.try_next_row().unwrap_or(false)
    }

    /// Rebinds the reader to `stream`, returning the previous one.
    ///
    /// Counters, buffered input and the recorded error are cleared; the
    /// delimiter and allocated buffers are kept.
    pub fn reset(&mut self, stream: R) -> R {
        self.pending = 0..0;
        self.stream_end = None;
        self.needs_unescape = false;
        self.overflow.clear();
        self.overflow_escaped = false;
        self.row = None;
        self.cursor = None;
        self.row_index = 0;
        self.col_index = 0;
        self.err = None;
        mem::replace(&mut self.stream, stream)
    }

    fn fill(&mut self) {
        loop {
            match self.stream.read(&mut self.buf) {
                Ok(0) => {
                    self.pending = 0..0;
                    self.stream_end = Some(StreamEnd::Eof);
                }
                Ok(n) => {
                    self.pending = 0..n;
                    self.needs_unescape = self.buf[..n].find_byte(ESCAPE).is_some();
                    trace!(bytes = n, escaped = self.needs_unescape, "filled read buffer");
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.pending = 0..0;
                    self.stream_end = Some(StreamEnd::Failed(Arc::new(e)));
                }
            }
            return;
        }
    }
}

impl<R> Reader<R> {
    /// Returns the recorded error, if any.
    ///
    /// A clean end of input is not an error: after the last row this returns
    /// `None`.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.err
            .as_ref()
            .filter(|err| !matches!(err, Error::EndOfStream))
    }

    /// Clears the recorded error so that reading can continue.
    ///
    /// After a column error this allows skipping the malformed row: the next
    /// call to [`next_row`](Self::next_row) discards whatever is left of it.
    pub fn reset_error(&mut self) {
        if self.err.take().is_some() {
            self.cursor = None;
        }
    }

    /// Returns `true` if the current row has columns left to read.
    ///
    /// An empty row has no columns. Useful for rows of varying width.
    #[must_use]
    pub fn has_cols(&self) -> bool {
        self.row.is_some_and(|row| row.span.0 < row.span.1) && self.cursor.is_some()
    }

    /// Index of the current row, starting at 1. Zero before the first row.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row_index
    }

    /// Number of columns read or skipped from the current row.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col_index
    }

    /// Returns the configured delimiter byte.
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.options.delimiter.as_byte()
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.stream
    }

    /// Returns a mutable reference to the underlying stream.
    ///
    /// Reading from it directly desynchronises the reader from the stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.stream
    }

    /// Consumes the reader, returning the underlying stream.
    ///
    /// Buffered input that was not consumed yet is lost.
    pub fn into_inner(self) -> R {
        self.stream
    }

    fn row_bytes(&self) -> &[u8] {
        match self.row {
            None => &[],
            Some(Row {
                source: RowSource::Buffer,
                span: (start, end),
                ..
            }) => &self.buf[start..end],
            Some(Row {
                source: RowSource::Overflow,
                span: (start, end),
                ..
            }) => &self.overflow[start..end],
        }
    }

    fn row_bytes_mut(&mut self) -> &mut [u8] {
        match self.row {
            None => &mut [],
            Some(Row {
                source: RowSource::Buffer,
                span: (start, end),
                ..
            }) => &mut self.buf[start..end],
            Some(Row {
                source: RowSource::Overflow,
                span: (start, end),
                ..
            }) => &mut self.overflow[start..end],
        }
    }

    fn unread_bytes(&self) -> &[u8] {
        match self.cursor {
            Some(pos) => &self.row_bytes()[pos..],
            None => &[],
        }
    }

    /// Returns the recorded error, if any, so callers can bail out early.
    fn check(&self) -> Result<(), Error> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Records `err` as the sticky error and hands it back.
    fn fail(&mut self, err: Error) -> Error {
        if !matches!(err, Error::EndOfStream) {
            debug!(error = %err, "reader stopped");
        }
        self.err = Some(err.clone());
        err
    }
}

impl<R> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("delimiter", &char::from(self.delimiter()))
            .field("row", &self.row_index)
            .field("col", &self.col_index)
            .field("pending", &self.pending.len())
            .field("overflow", &self.overflow.len())
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}
