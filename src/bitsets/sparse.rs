/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::bit_block::*;
use super::scan::{SparseDrainOnes, SparseDrainOnesRev, SparseOnes, SparseOnesRev};
use super::BitSet;

/// One stored block of a [`SparseBitSet`]: a block index and its 64-bit
/// word.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SparseBlock {
    pub idx: u32,
    pub word: u64,
}

impl SparseBlock {
    #[inline(always)]
    fn new(idx: usize, word: u64) -> Self {
        Self {
            idx: idx as u32,
            word,
        }
    }
}

/// A bitset stored as a sorted sequence of non-zero blocks.
///
/// Invariants, restored by every public operation before it returns:
/// stored blocks are strictly ascending by index, and no stored block has a
/// zero word. Operators may append out of order or zero a word internally;
/// a terminal sort/compaction pass re-establishes the invariant. The
/// exception is a [destructive scan](SparseBitSet::drain_ones), which
/// compacts when the scan value is dropped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseBitSet {
    pub(crate) blocks: Vec<SparseBlock>,
    num_blocks: usize,
    capacity: usize,
}

impl SparseBitSet {
    /// Position of the stored block with index `idx`, or the insertion
    /// position when no such block is stored.
    #[inline]
    fn find_pos(&self, idx: usize) -> Result<usize, usize> {
        self.blocks.binary_search_by_key(&(idx as u32), |b| b.idx)
    }

    /// The word stored for block `idx`, if any.
    pub fn find_block(&self, idx: usize) -> Option<u64> {
        self.find_pos(idx).ok().map(|pos| self.blocks[pos].word)
    }

    /// Like [`find_block`](SparseBitSet::find_block), but also yields the
    /// position: `Ok(pos)` of the stored block with index `idx`, or
    /// `Err(pos)` with the position where it would be inserted.
    pub fn find_block_pos(&self, idx: usize) -> Result<usize, usize> {
        self.find_pos(idx)
    }

    /// Number of blocks actually stored (`≤` [`num_blocks`](BitSet::num_blocks)).
    pub fn num_stored_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Iterates over the stored blocks in ascending index order.
    pub fn stored_blocks(&self) -> impl Iterator<Item = &SparseBlock> {
        self.blocks.iter()
    }

    pub(crate) fn compact(&mut self) {
        self.blocks.retain(|b| b.word != 0);
    }

    fn sort_blocks(&mut self) {
        self.blocks.sort_unstable_by_key(|b| b.idx);
    }

    /// Clears every bit at position `≥ lo`.
    pub fn remove_from(&mut self, lo: usize) {
        debug_assert!(lo < self.capacity);
        match self.find_pos(block_index(lo)) {
            Ok(pos) => {
                self.blocks[pos].word &= mask_low(bit_offset(lo));
                let cut = if self.blocks[pos].word == 0 {
                    pos
                } else {
                    pos + 1
                };
                self.blocks.truncate(cut);
            }
            Err(pos) => self.blocks.truncate(pos),
        }
    }

    /// Clears every bit at position `≤ hi`.
    pub fn remove_up_to(&mut self, hi: usize) {
        debug_assert!(hi < self.capacity);
        match self.find_pos(block_index(hi)) {
            Ok(pos) => {
                self.blocks[pos].word &= mask_high(bit_offset(hi) + 1);
                let cut = if self.blocks[pos].word == 0 {
                    pos + 1
                } else {
                    pos
                };
                self.blocks.drain(..cut);
            }
            Err(pos) => {
                self.blocks.drain(..pos);
            }
        }
    }

    /// Number of elements at positions `≥ lo`.
    pub fn count_from(&self, lo: usize) -> usize {
        if lo >= self.capacity {
            return 0;
        }
        self.count_in_range(lo, self.capacity - 1)
    }

    /// Out-of-place union of two sets of the same capacity.
    pub fn union(a: &Self, b: &Self) -> Self {
        let mut out = a.clone();
        out.union_with(b);
        out
    }

    /// Out-of-place intersection of two sets of the same capacity.
    pub fn intersection(a: &Self, b: &Self) -> Self {
        let mut out = a.clone();
        out.intersect_with(b);
        out
    }

    /// Out-of-place difference `a ∖ b` of two sets of the same capacity.
    pub fn difference(a: &Self, b: &Self) -> Self {
        let mut out = a.clone();
        out.difference_with(b);
        out
    }

    /// Destructive ascending scan: every returned bit is also cleared in
    /// the set.
    pub fn drain_ones(&mut self) -> SparseDrainOnes<'_> {
        SparseDrainOnes::new(self)
    }

    /// Destructive descending scan: every returned bit is also cleared in
    /// the set.
    pub fn drain_ones_rev(&mut self) -> SparseDrainOnesRev<'_> {
        SparseDrainOnesRev::new(self)
    }
}

impl BitSet for SparseBitSet {
    type Ones<'a>
        = SparseOnes<'a>
    where
        Self: 'a;
    type OnesRev<'a>
        = SparseOnesRev<'a>
    where
        Self: 'a;

    fn empty(capacity: usize) -> Self {
        Self {
            blocks: Vec::new(),
            num_blocks: capacity.div_ceil(WORD_BITS),
            capacity,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    #[inline]
    fn block(&self, idx: usize) -> u64 {
        debug_assert!(idx < self.num_blocks);
        self.find_block(idx).unwrap_or(0)
    }

    #[inline]
    fn contains(&self, bit: usize) -> bool {
        debug_assert!(bit < self.capacity);
        match self.find_pos(block_index(bit)) {
            Ok(pos) => self.blocks[pos].word & (1u64 << bit_offset(bit)) != 0,
            Err(_) => false,
        }
    }

    fn insert(&mut self, bit: usize) {
        debug_assert!(bit < self.capacity);
        let mask = 1u64 << bit_offset(bit);
        match self.find_pos(block_index(bit)) {
            Ok(pos) => self.blocks[pos].word |= mask,
            Err(pos) => self
                .blocks
                .insert(pos, SparseBlock::new(block_index(bit), mask)),
        }
    }

    fn remove(&mut self, bit: usize) {
        debug_assert!(bit < self.capacity);
        if let Ok(pos) = self.find_pos(block_index(bit)) {
            self.blocks[pos].word &= !(1u64 << bit_offset(bit));
            if self.blocks[pos].word == 0 {
                self.blocks.remove(pos);
            }
        }
    }

    fn insert_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        let (offl, offh) = (bit_offset(lo), bit_offset(hi));

        // singleton-block range
        if bbl == bbh {
            let mask = mask_range(offl, offh);
            match self.find_pos(bbl) {
                Ok(pos) => self.blocks[pos].word |= mask,
                Err(pos) => self.blocks.insert(pos, SparseBlock::new(bbl, mask)),
            }
            return;
        }

        // general range: walk the run of blocks in sync with the stored
        // ones, appending the missing blocks and sorting at the end
        let start = match self.find_pos(bbl) {
            Ok(pos) | Err(pos) => pos,
        };
        let stored_len = self.blocks.len();
        let mut pos = start;
        let mut appended = false;
        for blk in bbl..=bbh {
            let mask = if blk == bbl {
                mask_high(offl)
            } else if blk == bbh {
                mask_low(offh + 1)
            } else {
                !0
            };
            if pos < stored_len && self.blocks[pos].idx as usize == blk {
                self.blocks[pos].word |= mask;
                pos += 1;
            } else {
                self.blocks.push(SparseBlock::new(blk, mask));
                appended = true;
            }
        }
        if appended {
            self.sort_blocks();
        }
    }

    fn remove_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        let (offl, offh) = (bit_offset(lo), bit_offset(hi));

        if bbl == bbh {
            if let Ok(pos) = self.find_pos(bbl) {
                self.blocks[pos].word &= !mask_range(offl, offh);
                if self.blocks[pos].word == 0 {
                    self.blocks.remove(pos);
                }
            }
            return;
        }

        let start = match self.find_pos(bbl) {
            Ok(pos) => {
                self.blocks[pos].word &= mask_low(offl);
                pos + 1
            }
            Err(pos) => pos,
        };
        let end = match self.find_pos(bbh) {
            Ok(pos) => {
                self.blocks[pos].word &= mask_high(offh + 1);
                pos
            }
            Err(pos) => pos,
        };
        if start < end {
            self.blocks.drain(start..end);
        }
        self.compact();
    }

    fn clear(&mut self) {
        self.blocks.clear();
    }

    #[inline]
    fn count(&self) -> usize {
        self.blocks.iter().map(|b| popcount(b.word)).sum()
    }

    fn count_in_range(&self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        let (offl, offh) = (bit_offset(lo), bit_offset(hi));
        if bbl == bbh {
            return popcount(self.block(bbl) & mask_range(offl, offh));
        }
        let mut count = popcount(self.block(bbl) & mask_high(offl));
        let from = match self.find_pos(bbl) {
            Ok(pos) => pos + 1,
            Err(pos) => pos,
        };
        count += self.blocks[from..]
            .iter()
            .take_while(|b| (b.idx as usize) < bbh)
            .map(|b| popcount(b.word))
            .sum::<usize>();
        count + popcount(self.block(bbh) & mask_low(offh + 1))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn first(&self) -> Option<usize> {
        self.blocks
            .first()
            .map(|b| b.idx as usize * WORD_BITS + lsb(b.word).unwrap())
    }

    fn last(&self) -> Option<usize> {
        self.blocks
            .last()
            .map(|b| b.idx as usize * WORD_BITS + msb(b.word).unwrap())
    }

    fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let stored_len = self.blocks.len();
        let mut pos = 0;
        let mut appended = false;
        for rb in &other.blocks {
            while pos < stored_len && self.blocks[pos].idx < rb.idx {
                pos += 1;
            }
            if pos < stored_len && self.blocks[pos].idx == rb.idx {
                self.blocks[pos].word |= rb.word;
                pos += 1;
            } else {
                self.blocks.push(*rb);
                appended = true;
            }
        }
        if appended {
            self.sort_blocks();
        }
    }

    fn intersect_with(&mut self, other: &Self) {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let mut r = 0;
        for lb in self.blocks.iter_mut() {
            while r < other.blocks.len() && other.blocks[r].idx < lb.idx {
                r += 1;
            }
            if r < other.blocks.len() && other.blocks[r].idx == lb.idx {
                lb.word &= other.blocks[r].word;
                r += 1;
            } else {
                lb.word = 0;
            }
        }
        self.compact();
    }

    fn difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let mut r = 0;
        for lb in self.blocks.iter_mut() {
            while r < other.blocks.len() && other.blocks[r].idx < lb.idx {
                r += 1;
            }
            if r < other.blocks.len() && other.blocks[r].idx == lb.idx {
                lb.word &= !other.blocks[r].word;
                r += 1;
            }
        }
        self.compact();
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let stored_len = self.blocks.len();
        let mut pos = 0;
        let mut appended = false;
        for rb in &other.blocks {
            while pos < stored_len && self.blocks[pos].idx < rb.idx {
                pos += 1;
            }
            if pos < stored_len && self.blocks[pos].idx == rb.idx {
                self.blocks[pos].word ^= rb.word;
                pos += 1;
            } else {
                self.blocks.push(*rb);
                appended = true;
            }
        }
        if appended {
            self.sort_blocks();
        }
        self.compact();
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let mut r = 0;
        for lb in &self.blocks {
            while r < other.blocks.len() && other.blocks[r].idx < lb.idx {
                r += 1;
            }
            if r < other.blocks.len() && other.blocks[r].idx == lb.idx {
                if lb.word & other.blocks[r].word != 0 {
                    return false;
                }
                r += 1;
            }
        }
        true
    }

    fn is_subset(&self, other: &Self) -> bool {
        debug_assert_eq!(self.num_blocks, other.num_blocks);
        let mut r = 0;
        for lb in &self.blocks {
            while r < other.blocks.len() && other.blocks[r].idx < lb.idx {
                r += 1;
            }
            if r < other.blocks.len() && other.blocks[r].idx == lb.idx {
                if lb.word & !other.blocks[r].word != 0 {
                    return false;
                }
                r += 1;
            } else {
                return false;
            }
        }
        true
    }

    fn ones(&self) -> SparseOnes<'_> {
        SparseOnes::new(&self.blocks)
    }

    fn ones_rev(&self) -> SparseOnesRev<'_> {
        SparseOnesRev::new(&self.blocks)
    }
}
