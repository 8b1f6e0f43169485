//! Rebuilds the original bytes from a token stream.
//!
//! Matches are staged through the lookahead buffer before they reach
//! history. Bytes within `distance` of the match start come from history as
//! it stood before the copy; bytes past that repeat what was staged
//! `distance` positions earlier, which is how a match can be longer than
//! its own distance.

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::bitreader::TokenReader;
use crate::error::{Error, Result};
use crate::params::{stream_bytes, token_bit_cost, Token, HISTORY_SIZE};
use crate::window::{History, LookAhead};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Compressed bytes covered by the header and tokens, padding included.
    pub input_bytes:  u64,
    pub output_bytes: u64,
    pub literals:     u64,
    pub matches:      u64,
}

pub struct Decoder {
    lookahead: LookAhead,
    history:   History,
}

impl Decoder {
    pub fn new() -> Result<Self> {
        Ok(Self { lookahead: LookAhead::new(), history: History::new()? })
    }

    pub fn decode<R, W>(mut self, source: R, sink: &mut W) -> Result<DecodeStats>
    where
        R: Read,
        W: Write,
    {
        let mut reader = TokenReader::new(source);
        let expected = reader.read_count().map_err(Error::from_header_read)? as u64;

        let mut stats = DecodeStats::default();
        let mut token_bits = 0u64;
        while stats.output_bytes < expected {
            let token = reader
                .read_token()
                .map_err(|e| Error::from_read(e, stats.output_bytes, expected))?;
            trace!(?token, "replay");
            token_bits += token_bit_cost(&token) as u64;

            match token {
                Token::Literal(byte) => {
                    sink.write_all(&[byte])?;
                    self.history.push(byte);
                    stats.output_bytes += 1;
                    stats.literals += 1;
                }
                Token::Match { distance, length } => {
                    let remaining = expected - stats.output_bytes;
                    if distance as u64 > stats.output_bytes {
                        return Err(Error::InvalidDistance {
                            distance,
                            available: stats.output_bytes,
                        });
                    }
                    if length as u64 > remaining {
                        return Err(Error::MatchOverrun { length, remaining });
                    }
                    self.copy_match(distance as usize, length as usize, sink)?;
                    stats.output_bytes += length as u64;
                    stats.matches += 1;
                }
            }
        }
        sink.flush()?;
        stats.input_bytes = stream_bytes(token_bits);

        debug!(
            output_bytes = stats.output_bytes,
            literals = stats.literals,
            matches = stats.matches,
            "decoded stream"
        );
        Ok(stats)
    }

    fn copy_match<W: Write>(&mut self, distance: usize, length: usize, sink: &mut W) -> Result<()> {
        debug_assert_eq!(self.lookahead.pos(), 0);
        let start = self.history.pos() + HISTORY_SIZE - distance;

        for k in 0..length {
            let byte = if k < distance {
                self.history.at(start + k)
            } else {
                self.lookahead.slot(k - distance)
            };
            self.lookahead.push(Some(byte));
            sink.write_all(&[byte])?;
        }

        self.lookahead.reset_pos();
        for k in 0..length {
            self.history.push(self.lookahead.at(k));
        }
        Ok(())
    }
}
