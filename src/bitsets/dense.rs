/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::bit_block::*;
use super::scan::{DrainOnes, DrainOnesRev, Ones, OnesRev};
use super::BitSet;

/// A fixed-capacity bitset stored as a contiguous array of 64-bit blocks.
///
/// Bits at positions `≥ capacity` in the final block are always zero; every
/// mutating operation re-masks the tail block, so [`count`](BitSet::count)
/// is always the plain sum of block popcounts and equality is plain block
/// equality.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseBitSet {
    pub(crate) blocks: Vec<u64>,
    capacity: usize,
}

impl DenseBitSet {
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
    pub fn drain_ones(&mut self) -> DrainOnes<'_> {
        DrainOnes::new(self)
    }

    /// Destructive descending scan: every returned bit is also cleared in
    /// the set.
    pub fn drain_ones_rev(&mut self) -> DrainOnesRev<'_> {
        DrainOnesRev::new(self)
    }
}

impl BitSet for DenseBitSet {
    type Ones<'a>
        = Ones<'a>
    where
        Self: 'a;
    type OnesRev<'a>
        = OnesRev<'a>
    where
        Self: 'a;

    fn empty(capacity: usize) -> Self {
        Self {
            blocks: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    #[inline(always)]
    fn block(&self, idx: usize) -> u64 {
        self.blocks[idx]
    }

    #[inline(always)]
    fn contains(&self, bit: usize) -> bool {
        debug_assert!(bit < self.capacity);
        self.blocks[block_index(bit)] & (1u64 << bit_offset(bit)) != 0
    }

    #[inline(always)]
    fn insert(&mut self, bit: usize) {
        debug_assert!(bit < self.capacity);
        self.blocks[block_index(bit)] |= 1u64 << bit_offset(bit);
    }

    #[inline(always)]
    fn remove(&mut self, bit: usize) {
        debug_assert!(bit < self.capacity);
        self.blocks[block_index(bit)] &= !(1u64 << bit_offset(bit));
    }

    fn insert_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        if bbl == bbh {
            self.blocks[bbl] |= mask_range(bit_offset(lo), bit_offset(hi));
            return;
        }
        self.blocks[bbl] |= mask_high(bit_offset(lo));
        for block in &mut self.blocks[bbl + 1..bbh] {
            *block = !0;
        }
        self.blocks[bbh] |= mask_low(bit_offset(hi) + 1);
    }

    fn remove_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        if bbl == bbh {
            self.blocks[bbl] &= !mask_range(bit_offset(lo), bit_offset(hi));
            return;
        }
        self.blocks[bbl] &= mask_low(bit_offset(lo));
        for block in &mut self.blocks[bbl + 1..bbh] {
            *block = 0;
        }
        self.blocks[bbh] &= mask_high(bit_offset(hi) + 1);
    }

    fn clear(&mut self) {
        self.blocks.fill(0);
    }

    #[inline]
    fn count(&self) -> usize {
        self.blocks.iter().map(|&b| popcount(b)).sum()
    }

    fn count_in_range(&self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi && hi < self.capacity);
        let (bbl, bbh) = (block_index(lo), block_index(hi));
        if bbl == bbh {
            return popcount(self.blocks[bbl] & mask_range(bit_offset(lo), bit_offset(hi)));
        }
        let mut count = popcount(self.blocks[bbl] & mask_high(bit_offset(lo)));
        count += self.blocks[bbl + 1..bbh]
            .iter()
            .map(|&b| popcount(b))
            .sum::<usize>();
        count + popcount(self.blocks[bbh] & mask_low(bit_offset(hi) + 1))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    fn first(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|&b| b != 0)
            .map(|idx| idx * WORD_BITS + lsb(self.blocks[idx]).unwrap())
    }

    fn last(&self) -> Option<usize> {
        self.blocks
            .iter()
            .rposition(|&b| b != 0)
            .map(|idx| idx * WORD_BITS + msb(self.blocks[idx]).unwrap())
    }

    fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.blocks.iter_mut().zip(&other.blocks) {
            *dst |= src;
        }
    }

    fn intersect_with(&mut self, other: &Self) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.blocks.iter_mut().zip(&other.blocks) {
            *dst &= src;
        }
    }

    fn difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.blocks.iter_mut().zip(&other.blocks) {
            *dst &= !src;
        }
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.blocks.iter_mut().zip(&other.blocks) {
            *dst ^= src;
        }
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        debug_assert_eq!(self.capacity, other.capacity);
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(&a, &b)| a & b == 0)
    }

    fn is_subset(&self, other: &Self) -> bool {
        debug_assert_eq!(self.capacity, other.capacity);
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(&a, &b)| a & !b == 0)
    }

    fn ones(&self) -> Ones<'_> {
        Ones::new(&self.blocks)
    }

    fn ones_rev(&self) -> OnesRev<'_> {
        OnesRev::new(&self.blocks)
    }
}
