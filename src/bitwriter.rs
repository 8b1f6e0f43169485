// src/bitwriter.rs
//! Writes the length header and a Token stream as a packed bitstream.
//! Fields are written MSB-first; the final partial byte is padded with zeros.

use std::io::{self, Write};

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::params::*;

pub struct TokenWriter<W: Write> {
    bits: BitWriter<W, BigEndian>,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { bits: BitWriter::endian(sink, BigEndian) }
    }

    /// Original byte count. Must be the first field of the stream.
    pub fn write_count(&mut self, count: u32) -> io::Result<()> {
        self.bits.write(COUNT_BITS, count)
    }

    pub fn write_token(&mut self, token: &Token) -> io::Result<()> {
        match *token {
            Token::Literal(byte) => {
                self.bits.write(FLAG_BITS, FLAG_LITERAL)?;
                self.bits.write(BYTE_BITS, byte)?;
            }
            Token::Match { distance, length } => {
                debug_assert!((1..=HISTORY_SIZE as u32).contains(&distance));
                debug_assert!((MIN_LENGTH as u32..=MAX_LENGTH as u32).contains(&length));
                self.bits.write(FLAG_BITS, FLAG_MATCH)?;
                self.bits.write(HISTORY_BITS, distance_field(distance))?;
                self.bits.write(LENGTH_BITS, length - MIN_LENGTH as u32)?;
            }
        }
        Ok(())
    }

    /// Pad to a byte boundary, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.bits.byte_align()?;
        let mut sink = self.bits.into_writer();
        sink.flush()?;
        Ok(sink)
    }
}

/// Serialise a complete stream into memory.
pub fn write_tokens(count: u32, tokens: &[Token]) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut writer = TokenWriter::new(&mut output);
        writer.write_count(count)?;
        for token in tokens {
            writer.write_token(token)?;
        }
        writer.finish()?;
    }
    Ok(output)
}
