//! Byte sources for the encoder.
//!
//! The stream header records the original length up front, so a source must
//! know its total size before the first byte is read.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

pub trait ByteSource {
    /// Next input byte, or `None` once the source is exhausted.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;

    /// Total number of bytes the source yields.
    fn total_len(&self) -> u64;
}

/// In-memory input.
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos:  usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn total_len(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Buffered reader with a length known in advance.
pub struct ReadSource<R: Read> {
    reader: BufReader<R>,
    len:    u64,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R, len: u64) -> Self {
        Self { reader: BufReader::new(reader), len }
    }
}

impl ReadSource<File> {
    /// Open a file, taking its length from the filesystem metadata.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self::new(file, len))
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()? {
            [] => return Ok(None),
            [b, ..] => *b,
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }

    fn total_len(&self) -> u64 {
        self.len
    }
}
