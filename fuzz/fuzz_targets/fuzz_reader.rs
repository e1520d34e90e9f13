#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use dsvreader::Reader;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    delimiter: u8,
    /// Read sizes, cycled; zero stands for one byte.
    splits: Vec<u8>,
    /// Which accessor to use for each column, cycled.
    accessors: Vec<u8>,
    data: Vec<u8>,
}

struct Chunked<'a> {
    data: &'a [u8],
    splits: &'a [u8],
    reads: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = match self.splits {
            [] => usize::MAX,
            splits => usize::from(splits[self.reads % splits.len()].max(1)),
        };
        self.reads += 1;
        let n = want.min(self.data.len()).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Everything observable about one pass over the input.
#[derive(Debug, PartialEq)]
enum Outcome {
    Row(usize),
    Column(Vec<u8>),
    Error(String),
}

fn drive<R: Read>(mut reader: Reader<R>, accessors: &[u8]) -> Vec<Outcome> {
    let mut out = Vec::new();
    let mut col = 0usize;
    loop {
        match reader.try_next_row() {
            Ok(true) => out.push(Outcome::Row(reader.row())),
            Ok(false) => break,
            Err(err) => {
                out.push(Outcome::Error(err.to_string()));
                break;
            }
        }
        while reader.has_cols() {
            let pick = accessors.get(col % accessors.len().max(1)).copied().unwrap_or(0);
            col += 1;
            let value = match pick % 6 {
                0 => reader.try_bytes().map(<[u8]>::to_vec),
                1 => reader.try_string().map(String::into_bytes),
                2 => reader.try_int64().map(|n| n.to_string().into_bytes()),
                3 => reader.try_uint8().map(|n| n.to_string().into_bytes()),
                4 => reader.try_float64().map(|n| n.to_bits().to_string().into_bytes()),
                _ => reader.try_datetime().map(|t| t.to_rfc3339().into_bytes()),
            };
            match value {
                Ok(bytes) => out.push(Outcome::Column(bytes)),
                Err(err) => {
                    out.push(Outcome::Error(err.to_string()));
                    reader.reset_error();
                    break;
                }
            }
        }
    }
    assert!(reader.error().is_none() || matches!(out.last(), Some(Outcome::Error(_))));
    out
}

fuzz_target!(|input: Input| {
    if input.delimiter == b'\n' || input.delimiter == b'\\' {
        return;
    }
    let whole = drive(Reader::new(input.delimiter, input.data.as_slice()), &input.accessors);
    let chunked = drive(
        Reader::new(
            input.delimiter,
            Chunked {
                data: &input.data,
                splits: &input.splits,
                reads: 0,
            },
        ),
        &input.accessors,
    );
    assert_eq!(whole, chunked);
});
