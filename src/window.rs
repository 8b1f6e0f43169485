//! The two circular byte buffers shared by encoder and decoder.
//!
//! `LookAhead` holds bytes not yet encoded (or, while decoding, a match being
//! staged). `History` holds the bytes already emitted and is the only valid
//! copy source. The lookahead capacity is not a power of two and wraps with
//! `%`; the history capacity is and wraps with a mask.

use crate::error::{Error, Result};
use crate::params::{HASH_SIZE, HISTORY_MASK, HISTORY_SIZE, LOOKAHEAD_SIZE};

/// Bucket index for four consecutive bytes.
///
/// Grouping is `((d << 8) ^ ((c << 5) + (b << 2))) + a`; changing it changes
/// which candidates a bucket surfaces and therefore the compressed bytes.
#[inline]
pub fn hash4(a: u8, b: u8, c: u8, d: u8) -> usize {
    let (a, b, c, d) = (a as u32, b as u32, c as u32, d as u32);
    let h = ((d << 8) ^ ((c << 5) + (b << 2))) + a;
    h as usize & (HASH_SIZE - 1)
}

/// Heap-allocate a fixed table, reporting failure instead of aborting.
pub(crate) fn alloc_table<T: Clone>(len: usize, fill: T) -> Result<Box<[T]>> {
    let mut table = Vec::new();
    table.try_reserve_exact(len).map_err(|_| Error::Allocation {
        requested_bytes: len * std::mem::size_of::<T>(),
    })?;
    table.resize(len, fill);
    Ok(table.into_boxed_slice())
}

pub struct LookAhead {
    data: [u8; LOOKAHEAD_SIZE],
    pos:  usize,
    size: usize,
}

impl LookAhead {
    pub fn new() -> Self {
        Self { data: [0; LOOKAHEAD_SIZE], pos: 0, size: 0 }
    }

    /// Push the next source byte, or `None` once the source is exhausted.
    ///
    /// A byte fills the slot under the cursor; the end marker leaves the slot
    /// untouched and shrinks the valid region by one.
    #[inline]
    pub fn push(&mut self, byte: Option<u8>) {
        match byte {
            Some(b) => {
                self.data[self.pos] = b;
                if self.size < LOOKAHEAD_SIZE {
                    self.size += 1;
                }
            }
            None => self.size = self.size.saturating_sub(1),
        }
        self.pos = (self.pos + 1) % LOOKAHEAD_SIZE;
    }

    #[inline]
    pub fn first(&self) -> u8 {
        self.data[self.pos]
    }

    /// Byte `i` positions after the cursor.
    #[inline]
    pub fn at(&self, i: usize) -> u8 {
        self.data[(self.pos + i) % LOOKAHEAD_SIZE]
    }

    /// Byte at absolute slot `i`, ignoring the cursor.
    #[inline]
    pub fn slot(&self, i: usize) -> u8 {
        self.data[i % LOOKAHEAD_SIZE]
    }

    #[inline]
    pub fn hash(&self) -> usize {
        hash4(self.at(0), self.at(1), self.at(2), self.at(3))
    }

    /// Rebase the cursor to slot 0 without moving data.
    pub fn reset_pos(&mut self) {
        self.pos = 0;
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of valid bytes starting at the cursor.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for LookAhead {
    fn default() -> Self {
        Self::new()
    }
}

pub struct History {
    data: Box<[u8]>,
    pos:  usize,
    len:  usize,
}

impl History {
    pub fn new() -> Result<Self> {
        Ok(Self { data: alloc_table(HISTORY_SIZE, 0u8)?, pos: 0, len: 0 })
    }

    /// Overwrite the slot under the cursor and advance.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.data[self.pos] = byte;
        self.pos = (self.pos + 1) & HISTORY_MASK;
        if self.len < HISTORY_SIZE {
            self.len += 1;
        }
    }

    #[inline]
    pub fn at(&self, i: usize) -> u8 {
        self.data[i & HISTORY_MASK]
    }

    /// Hash of the four bytes starting at the cursor, i.e. the oldest live
    /// position once the buffer is full.
    #[inline]
    pub fn hash(&self) -> usize {
        let p = self.pos;
        hash4(self.at(p), self.at(p + 1), self.at(p + 2), self.at(p + 3))
    }

    /// Next write slot.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of live slots, saturating at `HISTORY_SIZE`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Once full, the cursor points at the oldest live byte.
    pub fn is_full(&self) -> bool {
        self.len == HISTORY_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_reference_values() {
        assert_eq!(hash4(b'A', b'A', b'A', b'A'), 18533);
        assert_eq!(hash4(0xff, 0xff, 0xff, 0xff), 56795);
        assert_eq!(hash4(b'A', b'B', b'A', b'B'), 19305);
        assert_eq!(hash4(0, 0, 0, 0), 0);
    }

    #[test]
    fn lookahead_wraps_with_true_modulo() {
        let mut la = LookAhead::new();
        for i in 0..LOOKAHEAD_SIZE + 3 {
            la.push(Some(i as u8));
        }
        assert_eq!(la.size(), LOOKAHEAD_SIZE);
        assert_eq!(la.pos(), 3);
        // slots 0..3 were overwritten by the wrap
        assert_eq!(la.slot(0), LOOKAHEAD_SIZE as u8);
        assert_eq!(la.first(), 3);
        assert_eq!(la.at(LOOKAHEAD_SIZE - 1), (LOOKAHEAD_SIZE + 2) as u8);
    }

    #[test]
    fn lookahead_end_marker_drains() {
        let mut la = LookAhead::new();
        for b in b"wxyz" {
            la.push(Some(*b));
        }
        la.reset_pos();
        assert_eq!(la.size(), 4);
        assert_eq!(la.hash(), hash4(b'w', b'x', b'y', b'z'));

        la.push(None);
        assert_eq!(la.size(), 3);
        assert_eq!(la.first(), b'x');
        // end marker leaves data in place
        assert_eq!(la.slot(0), b'w');

        for _ in 0..5 {
            la.push(None);
        }
        assert_eq!(la.size(), 0);
    }

    #[test]
    fn history_wraps_with_mask() {
        let mut h = History::new().unwrap();
        assert!(h.is_empty());
        for i in 0..HISTORY_SIZE {
            h.push(i as u8);
        }
        assert!(h.is_full());
        assert_eq!(h.pos(), 0);
        assert_eq!(h.at(HISTORY_SIZE + 5), 5);

        h.push(0xaa);
        assert_eq!(h.pos(), 1);
        assert_eq!(h.len(), HISTORY_SIZE);
        assert_eq!(h.at(0), 0xaa);
        assert_eq!(h.hash(), hash4(1, 2, 3, 4));
    }
}
