#![allow(missing_docs, dead_code)]

use std::io::{self, Read};

/// A day of page views, one row per hour: `hour \t path \t views \t ratio \t seen_at`.
pub const PAGE_VIEWS: &str = "\
0\t/index.html\t120\t0.25\t2024-01-15 00:00:00
1\t/about\\thtml\t7\t0.5\t2024-01-15 01:00:00
2\t/index.html\t0\t0\t0000-00-00 00:00:00
3\t/contact\t65535\t1e-3\t2024-01-15 03:59:59
";

/// Serves a byte slice, then fails.
pub struct BrokenPipe<'a> {
    pub data: &'a [u8],
}

impl Read for BrokenPipe<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Serves `data` one byte per read.
pub struct Trickle<'a>(pub &'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&b, rest)), Some(slot)) => {
                *slot = b;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
