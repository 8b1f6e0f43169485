// src/encoder.rs
//! Greedy LZSS encoder over a sliding 64 KiB window.
//!
//! The lookahead holds the next `LOOKAHEAD_SIZE` input bytes. Each step asks
//! the searcher for the longest match of the lookahead against history,
//! emits a literal or a match, then slides the window one byte at a time so
//! the index always describes exactly the live history slots:
//!   1. evict the slot about to be overwritten
//!   2. index that slot under the hash of the lookahead's first four bytes
//!   3. move the lookahead's first byte into history
//!   4. refill the lookahead from the source (or mark end of input)

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::bitwriter::TokenWriter;
use crate::error::{Error, Result};
use crate::params::{stream_bytes, token_bit_cost, Token, LOOKAHEAD_SIZE, MIN_LENGTH};
use crate::searcher::Searcher;
use crate::source::ByteSource;
use crate::window::{History, LookAhead};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub input_bytes:   u64,
    pub output_bytes:  u64,
    pub literals:      u64,
    pub matches:       u64,
    pub matched_bytes: u64,
}

impl EncodeStats {
    fn record(&mut self, token: &Token) {
        match token {
            Token::Literal(_) => self.literals += 1,
            Token::Match { length, .. } => {
                self.matches += 1;
                self.matched_bytes += *length as u64;
            }
        }
    }
}

pub struct Encoder {
    lookahead: LookAhead,
    history:   History,
    searcher:  Searcher,
    consumed:  u64,
}

impl Encoder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            lookahead: LookAhead::new(),
            history:   History::new()?,
            searcher:  Searcher::new()?,
            consumed:  0,
        })
    }

    /// Compress `source` into `sink`: 32-bit length header, then the token stream.
    pub fn encode<S, W>(self, source: &mut S, sink: &mut W) -> Result<EncodeStats>
    where
        S: ByteSource,
        W: Write,
    {
        let total = source.total_len();
        let count = u32::try_from(total).map_err(|_| Error::InputTooLarge { len: total })?;

        let mut writer = TokenWriter::new(&mut *sink);
        writer.write_count(count)?;
        let stats = self.encode_tokens(source, |token| Ok(writer.write_token(&token)?))?;
        writer.finish()?;

        debug!(
            input_bytes = stats.input_bytes,
            output_bytes = stats.output_bytes,
            literals = stats.literals,
            matches = stats.matches,
            "encoded stream"
        );
        Ok(stats)
    }

    /// Run the match loop, handing each token to `emit` in stream order.
    pub fn encode_tokens<S, F>(mut self, source: &mut S, mut emit: F) -> Result<EncodeStats>
    where
        S: ByteSource,
        F: FnMut(Token) -> Result<()>,
    {
        let total = source.total_len();

        while self.lookahead.size() < LOOKAHEAD_SIZE {
            match self.pull(source)? {
                Some(b) => self.lookahead.push(Some(b)),
                None => break,
            }
        }
        self.lookahead.reset_pos();

        let mut stats = EncodeStats { input_bytes: total, ..EncodeStats::default() };
        let mut output_bits = 0u64;

        while self.lookahead.size() > 0 {
            let (distance, length) = self.searcher.find_match(&self.lookahead, &self.history);

            let (token, advance) = if length < MIN_LENGTH {
                (Token::Literal(self.lookahead.first()), 1)
            } else {
                (Token::Match { distance: distance as u32, length: length as u32 }, length)
            };
            trace!(?token, "emit");

            emit(token)?;
            stats.record(&token);
            output_bits += token_bit_cost(&token) as u64;
            self.slide(source, advance)?;
        }

        if self.consumed != total {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("source declared {} bytes but yielded {}", total, self.consumed),
            )
            .into());
        }

        stats.output_bytes = stream_bytes(output_bits);
        Ok(stats)
    }

    fn slide<S: ByteSource>(&mut self, source: &mut S, n: usize) -> io::Result<()> {
        for _ in 0..n {
            self.searcher.remove(&self.history);
            self.searcher.add(&self.lookahead, &self.history);
            self.history.push(self.lookahead.first());
            let next = self.pull(source)?;
            self.lookahead.push(next);
        }
        Ok(())
    }

    #[inline]
    fn pull<S: ByteSource>(&mut self, source: &mut S) -> io::Result<Option<u8>> {
        let byte = source.next_byte()?;
        if byte.is_some() {
            self.consumed += 1;
        }
        Ok(byte)
    }
}
