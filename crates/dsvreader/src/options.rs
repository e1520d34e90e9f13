/// The byte separating columns within a row.
///
/// # Examples
///
/// ```rust
/// use dsvreader::Delimiter;
///
/// assert_eq!(Delimiter::from(b'\t'), Delimiter::Tab);
/// assert_eq!(Delimiter::from(b';').as_byte(), b';');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// `,`
    #[default]
    Comma,
    /// `\t`
    Tab,
    /// `|`
    Pipe,
    /// Any other byte.
    ///
    /// Neither `\n` nor `\\` can act as a column delimiter: the former always
    /// ends the row and the latter always starts an escape sequence.
    Custom(u8),
}

impl Delimiter {
    /// Returns the delimiter byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Pipe => b'|',
            Self::Custom(b) => b,
        }
    }
}

impl From<u8> for Delimiter {
    fn from(b: u8) -> Self {
        match b {
            b',' => Self::Comma,
            b'\t' => Self::Tab,
            b'|' => Self::Pipe,
            other => Self::Custom(other),
        }
    }
}

/// Configuration options for a [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust
/// use dsvreader::{Delimiter, Reader, ReaderOptions};
///
/// let options = ReaderOptions {
///     delimiter: Delimiter::Pipe,
///     ..Default::default()
/// };
/// let mut reader = Reader::with_options(options, &b"a|b\n"[..]);
/// assert!(reader.next_row());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// The column delimiter.
    ///
    /// # Default
    ///
    /// [`Delimiter::Comma`]
    pub delimiter: Delimiter,

    /// Whether the bytes and text accessors decode backslash escapes.
    ///
    /// When `false`, columns are returned exactly as they appear in the
    /// stream. Typed decoders never unescape regardless of this setting.
    ///
    /// # Default
    ///
    /// `true`
    pub unescape: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            unescape: true,
        }
    }
}
