use std::io::{self, Read};

use crate::Reader;

/// Serves `data` in reads no longer than the sizes in `splits`, cycling
/// through them. A zero size stands for a one-byte read.
pub(crate) struct ChunkedReader {
    data: Vec<u8>,
    splits: Vec<usize>,
    pos: usize,
    reads: usize,
}

impl ChunkedReader {
    pub(crate) fn new(data: impl Into<Vec<u8>>, splits: &[usize]) -> Self {
        Self {
            data: data.into(),
            splits: if splits.is_empty() {
                vec![usize::MAX]
            } else {
                splits.to_vec()
            },
            pos: 0,
            reads: 0,
        }
    }

    /// Serves the concatenation of `chunks`, one chunk per read.
    pub(crate) fn from_chunks(chunks: &[&[u8]]) -> Self {
        let splits: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        Self::new(chunks.concat(), &splits)
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rest = &self.data[self.pos..];
        let want = self.splits[self.reads % self.splits.len()].max(1);
        self.reads += 1;
        let n = want.min(rest.len()).min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Serves `data`, then fails every later read with `kind`.
pub(crate) struct FailingReader {
    data: Option<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub(crate) fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
        Self {
            data: Some(data.into()),
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take().filter(|data| !data.is_empty()) {
            Some(data) => {
                assert!(data.len() <= buf.len(), "test payload exceeds read buffer");
                buf[..data.len()].copy_from_slice(&data);
                Ok(data.len())
            }
            None => Err(io::Error::new(self.kind, "stream broke")),
        }
    }
}

/// Interrupts every other read before serving data one byte at a time.
pub(crate) struct InterruptingReader {
    inner: ChunkedReader,
    interrupt: bool,
}

impl InterruptingReader {
    pub(crate) fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: ChunkedReader::new(data, &[1]),
            interrupt: true,
        }
    }
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            self.inner.read(buf)
        } else {
            Err(io::ErrorKind::Interrupted.into())
        }
    }
}

/// Reads every row and column with the bytes accessor.
pub(crate) fn collect_rows<R: Read>(reader: &mut Reader<R>) -> Vec<Vec<Vec<u8>>> {
    let mut rows = Vec::new();
    while reader.next_row() {
        let mut cols = Vec::new();
        while reader.has_cols() {
            cols.push(reader.bytes().to_vec());
        }
        rows.push(cols);
    }
    rows
}

/// Reads every row and column with the text accessor.
pub(crate) fn collect_strings<R: Read>(reader: &mut Reader<R>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    while reader.next_row() {
        let mut cols = Vec::new();
        while reader.has_cols() {
            cols.push(reader.string());
        }
        rows.push(cols);
    }
    rows
}

pub(crate) fn owned(rows: &[&[&str]]) -> Vec<Vec<Vec<u8>>> {
    rows.iter()
        .map(|row| row.iter().map(|col| col.as_bytes().to_vec()).collect())
        .collect()
}
