//! Fixed stream parameters, known to both encoder and decoder.
//! Never transmitted; the stream carries only the original byte count.
//! Single source of truth for all bit widths and buffer capacities.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    /// `distance` counts back from the current output position, 1..=HISTORY_SIZE.
    Match { distance: u32, length: u32 },
}

// ── Field widths ──────────────────────────────────────────────────────────────
pub const COUNT_BITS:   u32 = 32;
pub const FLAG_BITS:    u32 = 1;
pub const BYTE_BITS:    u32 = 8;
pub const LENGTH_BITS:  u32 = 8;
pub const HISTORY_BITS: u32 = 16;

pub const FLAG_LITERAL: u32 = 0;
pub const FLAG_MATCH:   u32 = 1;

// ── Window geometry ───────────────────────────────────────────────────────────
/// Shortest match worth a back-reference; the length field stores `length - MIN_LENGTH`.
pub const MIN_LENGTH: usize = 4;

/// Lookahead capacity. Not a power of two, so cursor arithmetic is a true modulo.
pub const LOOKAHEAD_SIZE: usize = (1 << LENGTH_BITS) + MIN_LENGTH;

/// Longest encodable match: `MIN_LENGTH + 2^LENGTH_BITS - 1`.
pub const MAX_LENGTH: usize = LOOKAHEAD_SIZE - 1;

/// History capacity. Power of two, so cursor arithmetic is a bitmask.
pub const HISTORY_SIZE: usize = 1 << HISTORY_BITS;
pub const HISTORY_MASK: usize = HISTORY_SIZE - 1;

/// One bucket per history slot.
pub const HASH_SIZE: usize = HISTORY_SIZE;

/// Maximum number of chain entries visited per match query.
pub const SEARCH_DEPTH: usize = 512;

// ── Token bit costs ───────────────────────────────────────────────────────────
pub const LITERAL_TOTAL_BITS: u32 = FLAG_BITS + BYTE_BITS;                    // 9
pub const MATCH_TOTAL_BITS:   u32 = FLAG_BITS + HISTORY_BITS + LENGTH_BITS;   // 25

pub fn token_bit_cost(token: &Token) -> u32 {
    match token {
        Token::Literal(_)   => LITERAL_TOTAL_BITS,
        Token::Match { .. } => MATCH_TOTAL_BITS,
    }
}

/// Stream size in bytes for `token_bits` bits of tokens, header and padding included.
pub fn stream_bytes(token_bits: u64) -> u64 {
    (COUNT_BITS as u64 + token_bits + 7) / 8
}

/// Value stored in the distance field. A full window (`HISTORY_SIZE`) wraps to 0.
pub fn distance_field(distance: u32) -> u32 {
    distance & HISTORY_MASK as u32
}

/// Inverse of [`distance_field`].
pub fn distance_from_field(field: u32) -> u32 {
    if field == 0 { HISTORY_SIZE as u32 } else { field }
}
