//! In-place decoding of backslash escape sequences.
//!
//! The mapping follows the ClickHouse `TabSeparated` convention: `\b`, `\f`,
//! `\r`, `\n`, `\t` and `\0` decode to their control bytes, while any other
//! escaped byte (including `\\` and `\'`) decodes to itself. A marker at the
//! very end of a column has nothing to escape and is kept as is.
//!
//! Decoding never lengthens the input, so the output is written over the
//! input from the left and the caller keeps the returned prefix.

use bstr::ByteSlice;

/// The byte that introduces an escape sequence.
pub(crate) const ESCAPE: u8 = b'\\';

#[inline]
fn decode(b: u8) -> u8 {
    match b {
        b'b' => 0x08,
        b'f' => 0x0c,
        b'r' => b'\r',
        b'n' => b'\n',
        b't' => b'\t',
        b'0' => 0,
        other => other,
    }
}

/// Decodes the escape sequences in `col` in place and returns the length of
/// the decoded prefix.
pub(crate) fn unescape_in_place(col: &mut [u8]) -> usize {
    let Some(first) = col.find_byte(ESCAPE) else {
        return col.len();
    };

    // `col[read]` is always an escape marker at the top of the loop.
    let mut read = first;
    let mut write = first;
    loop {
        let Some(&escaped) = col.get(read + 1) else {
            col[write] = ESCAPE;
            return write + 1;
        };
        col[write] = decode(escaped);
        write += 1;
        read += 2;

        let run = col[read..].find_byte(ESCAPE);
        let len = run.unwrap_or(col.len() - read);
        col.copy_within(read..read + len, write);
        write += len;
        read += len;
        if run.is_none() {
            return write;
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::unescape_in_place;

    fn unescape(input: &[u8]) -> Vec<u8> {
        let mut buf = input.to_vec();
        let n = unescape_in_place(&mut buf);
        buf.truncate(n);
        buf
    }

    #[rstest]
    #[case(br"plain", b"plain")]
    #[case(br"", b"")]
    #[case(br"a\tb", b"a\tb")]
    #[case(br"\n", b"\n")]
    #[case(br"\b\f\r\0", b"\x08\x0c\r\0")]
    #[case(br"it\'s", b"it's")]
    #[case(br"c:\\dir", br"c:\dir")]
    #[case(br"\x", b"x")]
    #[case(br"\\\\", br"\\")]
    #[case(br"tail\", br"tail\")]
    #[case(br"a\nb\tc\\d", b"a\nb\tc\\d")]
    fn decodes_sequences(#[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(unescape(input), expected);
    }

    #[test]
    fn leaves_suffix_untouched_beyond_result() {
        let mut buf = br"x\ny".to_vec();
        let n = unescape_in_place(&mut buf);
        assert_eq!(&buf[..n], b"x\ny");
        assert_eq!(buf.len(), 4);
    }
}
