// src/bitreader.rs
//! Reads the length header and Tokens back out of a packed bitstream.
//! Field order and widths mirror `bitwriter.rs`.

use std::io::{self, Read};

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::{Error, Result};
use crate::params::*;

pub struct TokenReader<R: Read> {
    bits: BitReader<R, BigEndian>,
}

impl<R: Read> TokenReader<R> {
    pub fn new(source: R) -> Self {
        Self { bits: BitReader::endian(source, BigEndian) }
    }

    pub fn read_count(&mut self) -> io::Result<u32> {
        self.bits.read::<u32>(COUNT_BITS)
    }

    pub fn read_token(&mut self) -> io::Result<Token> {
        let flag = self.bits.read::<u32>(FLAG_BITS)?;
        if flag == FLAG_LITERAL {
            let byte = self.bits.read::<u8>(BYTE_BITS)?;
            Ok(Token::Literal(byte))
        } else {
            let field  = self.bits.read::<u32>(HISTORY_BITS)?;
            let length = self.bits.read::<u32>(LENGTH_BITS)?;
            Ok(Token::Match {
                distance: distance_from_field(field),
                length:   length + MIN_LENGTH as u32,
            })
        }
    }
}

/// Parse a complete in-memory stream into its byte count and tokens.
///
/// Stops once the tokens cover the declared count; trailing padding is ignored.
pub fn read_tokens(input: &[u8]) -> Result<(u32, Vec<Token>)> {
    let mut reader = TokenReader::new(input);
    let count = reader.read_count().map_err(Error::from_header_read)?;

    let expected = count as u64;
    let mut covered = 0u64;
    let mut tokens = Vec::new();
    while covered < expected {
        let token = reader
            .read_token()
            .map_err(|e| Error::from_read(e, covered, expected))?;
        covered += match token {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => length as u64,
        };
        tokens.push(token);
    }

    Ok((count, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitwriter::write_tokens;

    #[test]
    fn reads_what_the_writer_wrote() {
        let tokens = vec![
            Token::Literal(0),
            Token::Match { distance: HISTORY_SIZE as u32, length: MAX_LENGTH as u32 },
            Token::Literal(0xff),
            Token::Match { distance: 1, length: MIN_LENGTH as u32 },
        ];
        let stream = write_tokens(265, &tokens).unwrap();
        assert_eq!(read_tokens(&stream).unwrap(), (265, tokens));
    }

    #[test]
    fn short_header_is_reported() {
        assert!(matches!(read_tokens(&[0, 0, 1]), Err(Error::MissingHeader)));
    }

    #[test]
    fn missing_tokens_are_truncation() {
        let stream = write_tokens(2, &[Token::Literal(b'x')]).unwrap();
        // one literal (9 bits) padded to two bytes; the second literal is absent
        match read_tokens(&stream) {
            Err(Error::Truncated { decoded, expected }) => {
                assert_eq!((decoded, expected), (1, 2));
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }
}
