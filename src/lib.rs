// src/lib.rs
//! LZSS: greedy Lempel-Ziv compression over a 64 KiB sliding window.
pub mod params;
pub mod error;
pub mod window;
pub mod searcher;
pub mod source;
pub mod bitwriter;
pub mod bitreader;
pub mod encoder;
pub mod decoder;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

pub use decoder::{DecodeStats, Decoder};
pub use encoder::{EncodeStats, Encoder};
pub use error::{Error, Result};
pub use params::Token;
pub use source::{ByteSource, ReadSource, SliceSource};

/// Stream layout:
///   Bits 0..32:    original byte count, big-endian
///   Then tokens, packed MSB-first with no byte alignment:
///     0 + 8 bits                       literal byte
///     1 + 16 bits + 8 bits             match: distance (0 = 65536),
///                                      length - 4
///   Zero padding up to the next byte boundary.
///
/// The distance field is a backward distance, not an absolute history slot,
/// so these streams are not readable by decoders that expect slot indices.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Encoder::new()?.encode(&mut SliceSource::new(input), &mut output)?;
    Ok(output)
}

pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Decoder::new()?.decode(input, &mut output)?;
    Ok(output)
}

/// The tokens `compress` would write for `input`, without serialising them.
pub fn tokenize(input: &[u8]) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    Encoder::new()?.encode_tokens(&mut SliceSource::new(input), |token| {
        tokens.push(token);
        Ok(())
    })?;
    Ok(tokens)
}

pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<EncodeStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    debug!(input = %input.display(), output = %output.display(), "compressing file");

    let mut source = ReadSource::open(input)?;
    let mut sink = BufWriter::new(File::create(output)?);
    Encoder::new()?.encode(&mut source, &mut sink)
}

pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DecodeStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    debug!(input = %input.display(), output = %output.display(), "decompressing file");

    let source = BufReader::new(File::open(input)?);
    let mut sink = BufWriter::new(File::create(output)?);
    Decoder::new()?.decode(source, &mut sink)
}
