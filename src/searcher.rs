//! Hash-chain match index over the history window.
//!
//! Every live history slot sits in exactly one chain, keyed by the hash of
//! the four bytes starting at that slot. Chains are doubly linked through
//! per-slot `Link` records and ordered by insertion time, so eviction pops
//! the chain head and search walks back from the tail.

use crate::error::Result;
use crate::params::{HASH_SIZE, HISTORY_MASK, HISTORY_SIZE, MAX_LENGTH, MIN_LENGTH, SEARCH_DEPTH};
use crate::window::{alloc_table, History, LookAhead};

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    /// Oldest entry.
    first: Option<u32>,
    /// Newest entry.
    last: Option<u32>,
}

pub struct Searcher {
    nodes:   Box<[Link]>,
    buckets: Box<[Bucket]>,
}

impl Searcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            nodes:   alloc_table(HISTORY_SIZE, Link::default())?,
            buckets: alloc_table(HASH_SIZE, Bucket::default())?,
        })
    }

    /// Index the slot about to receive the lookahead's first byte.
    pub fn add(&mut self, lookahead: &LookAhead, history: &History) {
        let hash = lookahead.hash();
        let pos = history.pos() as u32;
        let bucket = &mut self.buckets[hash];

        match bucket.last {
            Some(last) => self.nodes[last as usize].next = Some(pos),
            None => bucket.first = Some(pos),
        }
        self.nodes[pos as usize] = Link { prev: bucket.last, next: None };
        bucket.last = Some(pos);
    }

    /// Evict the slot about to be overwritten. Must run right before [`add`](Self::add)
    /// in every slide step.
    pub fn remove(&mut self, history: &History) {
        // Until the window fills, the cursor slot has never been indexed.
        if !history.is_full() {
            return;
        }
        let bucket = &mut self.buckets[history.hash()];
        debug_assert!(bucket.first.is_some(), "live slot {} missing from index", history.pos());
        let Some(oldest) = bucket.first else {
            return;
        };
        debug_assert_eq!(oldest as usize, history.pos());

        let next = self.nodes[oldest as usize].next;
        match next {
            Some(n) => self.nodes[n as usize].prev = None,
            None => bucket.last = None,
        }
        bucket.first = next;
        self.nodes[oldest as usize].next = None;
    }

    /// Longest match for the lookahead's current contents.
    ///
    /// Returns `(distance, length)`. A length below `MIN_LENGTH` (always
    /// `MIN_LENGTH - 1`) means "emit a literal"; otherwise `distance` counts
    /// back from the history cursor, with a full window reported as
    /// `HISTORY_SIZE`.
    pub fn find_match(&self, lookahead: &LookAhead, history: &History) -> (usize, usize) {
        let mut best_distance = 0;
        let mut best_len = MIN_LENGTH - 1;

        if lookahead.size() < MIN_LENGTH {
            return (best_distance, best_len);
        }
        let limit = lookahead.size().min(MAX_LENGTH);
        let cursor = history.pos();

        let mut cur = self.buckets[lookahead.hash()].last;
        let mut steps = 0;
        while let Some(candidate) = cur {
            if steps == SEARCH_DEPTH {
                break;
            }
            steps += 1;

            let candidate = candidate as usize;
            let distance = match cursor.wrapping_sub(candidate) & HISTORY_MASK {
                0 => HISTORY_SIZE,
                d => d,
            };

            // Cheap reject: a longer match must also agree at offset best_len.
            if candidate_byte(lookahead, history, candidate, distance, best_len)
                == lookahead.at(best_len)
            {
                let len = common_prefix(lookahead, history, candidate, distance, limit);
                if len > best_len {
                    best_len = len;
                    best_distance = distance;
                    if best_len == limit {
                        break;
                    }
                }
            }

            cur = self.nodes[candidate].prev;
        }

        (best_distance, best_len)
    }

    /// Every indexed slot, in bucket order. Used to check the index against the window.
    #[cfg(test)]
    pub(crate) fn indexed_positions(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for bucket in self.buckets.iter() {
            let mut cur = bucket.first;
            let mut prev = None;
            while let Some(p) = cur {
                assert_eq!(self.nodes[p as usize].prev, prev, "broken back link at {}", p);
                out.push(p as usize);
                prev = cur;
                cur = self.nodes[p as usize].next;
            }
            assert_eq!(bucket.last, prev);
        }
        out
    }
}

/// Byte `k` of the candidate string. Offsets at or past `distance` run over
/// the history cursor into bytes that only exist in the lookahead so far.
#[inline]
fn candidate_byte(
    lookahead: &LookAhead,
    history:   &History,
    candidate: usize,
    distance:  usize,
    k:         usize,
) -> u8 {
    if k < distance {
        history.at(candidate + k)
    } else {
        lookahead.at(k - distance)
    }
}

#[inline]
fn common_prefix(
    lookahead: &LookAhead,
    history:   &History,
    candidate: usize,
    distance:  usize,
    limit:     usize,
) -> usize {
    let mut len = 0;
    while len < limit
        && candidate_byte(lookahead, history, candidate, distance, len) == lookahead.at(len)
    {
        len += 1;
    }
    len
}
