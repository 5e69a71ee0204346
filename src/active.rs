// Active-set traversals: range enumeration restricted to symbols a caller
// has marked. The marks live in a caller-owned array indexed by conceptual
// tree position (heap order: root at 1, children of p at 2p and 2p+1), one
// mask word per node, so a whole subtree can be skipped with a single AND.
// The index itself stays immutable; only the caller's array is written.

use crate::bit_vec::BitVec;
use crate::wavelet_matrix::{Node, WaveletMatrix};
use num::PrimInt;
use std::ops::Range;

impl<V: BitVec> WaveletMatrix<V> {
    /// Required length of a heap-indexed mark array: `2^(num_levels + 1)`
    /// slots (slot 0 unused). Grows exponentially with the level count, so
    /// large alphabets make this impractically big.
    pub fn active_set_len(&self) -> usize {
        assert!(
            self.num_levels + 1 < usize::BITS,
            "active-set array is not addressable for {} levels",
            self.num_levels
        );
        if self.num_levels >= 28 {
            log::warn!(
                "active-set array needs 2^{} slots for {} levels; consider a smaller alphabet",
                self.num_levels + 1,
                self.num_levels
            );
        }
        1usize << (self.num_levels + 1)
    }

    // Heap positions along the root-to-leaf path of `c` are a pure
    // function of the bits of c: left = 2*pos, right = 2*pos + 1.
    fn path_positions(&self, c: u64) -> impl Iterator<Item = usize> + '_ {
        let levels = self.num_levels;
        (0..=levels).scan(1usize, move |pos, k| {
            let current = *pos;
            if k < levels {
                let bit = (c >> (levels - 1 - k)) & 1;
                *pos = 2 * current + bit as usize;
            }
            Some(current)
        })
    }

    /// OR `mask` into every slot on the root-to-leaf path of symbol `c`,
    /// leaf included. `marks.len()` must be at least
    /// [`Self::active_set_len`].
    pub fn mark<W: PrimInt>(&self, c: u64, marks: &mut [W], mask: W) {
        debug_assert!(marks.len() >= self.active_set_len());
        for pos in self.path_positions(c) {
            marks[pos] = marks[pos] | mask;
        }
    }

    /// Zero every slot on the root-to-leaf path of symbol `c`. Clears all
    /// mask bits, not just one caller's: paths of other marked symbols
    /// that share a prefix with `c` must be re-marked if they should stay
    /// active.
    pub fn unmark<W: PrimInt>(&self, c: u64, marks: &mut [W]) {
        debug_assert!(marks.len() >= self.active_set_len());
        for pos in self.path_positions(c) {
            marks[pos] = W::zero();
        }
    }

    /// Symbols in positions `[lb, rb]` whose tree path is marked with at
    /// least one bit of `d`, one entry per position, ascending by symbol.
    /// Subtrees with `marks[pos] & d == 0` are pruned without expansion.
    pub fn active_values_in_range<W: PrimInt>(
        &self,
        lb: usize,
        rb: usize,
        marks: &[W],
        d: W,
    ) -> Vec<u64> {
        debug_assert!(marks.len() >= self.active_set_len());
        let mut values = Vec::new();
        if lb <= rb && lb < self.len {
            debug_assert!(rb < self.len);
            self.active_values_rec(self.root(), lb..rb + 1, marks, d, 1, &mut values);
        }
        values
    }

    fn active_values_rec<W: PrimInt>(
        &self,
        v: Node,
        r: Range<usize>,
        marks: &[W],
        d: W,
        pos: usize,
        values: &mut Vec<u64>,
    ) {
        if (marks[pos] & d).is_zero() {
            return;
        }
        if r.is_empty() {
            return;
        }
        if self.is_leaf(&v) {
            values.extend(std::iter::repeat(v.sym()).take(r.len()));
            return;
        }
        let (left, right) = self.expand(&v);
        let (left_range, right_range) = self.expand_range(&v, r);
        self.active_values_rec(left, left_range, marks, d, 2 * pos, values);
        self.active_values_rec(right, right_range, marks, d, 2 * pos + 1, values);
    }

    /// Subsumption variant over a writable mask set: enumerate `(symbol,
    /// fresh)` pairs for leaves in `[lb, rb]` where `fresh = d & !set[pos]`
    /// is the part of `d` the leaf has not yet absorbed, recording it into
    /// the set as it goes. A subtree already covering all of `d`
    /// (`set[pos] | d == set[pos]`) is pruned. On the way out, each inner
    /// slot becomes the intersection of its children, so a node subsumes
    /// exactly what all of its leaves subsume.
    pub fn fresh_active_values_in_range<W: PrimInt>(
        &self,
        lb: usize,
        rb: usize,
        set: &mut [W],
        d: W,
    ) -> Vec<(u64, W)> {
        debug_assert!(set.len() >= self.active_set_len());
        let mut values = Vec::new();
        if lb <= rb && lb < self.len {
            debug_assert!(rb < self.len);
            self.fresh_active_values_rec(self.root(), lb..rb + 1, set, d, 1, &mut values);
        }
        values
    }

    fn fresh_active_values_rec<W: PrimInt>(
        &self,
        v: Node,
        r: Range<usize>,
        set: &mut [W],
        d: W,
        pos: usize,
        values: &mut Vec<(u64, W)>,
    ) {
        let current = set[pos];
        if (current | d) == current {
            return;
        }
        if r.is_empty() {
            return;
        }
        if self.is_leaf(&v) {
            let fresh = d & !current;
            set[pos] = current | fresh;
            values.push((v.sym(), fresh));
            return;
        }
        let (left, right) = self.expand(&v);
        let (left_range, right_range) = self.expand_range(&v, r);
        self.fresh_active_values_rec(left, left_range, set, d, 2 * pos, values);
        self.fresh_active_values_rec(right, right_range, set, d, 2 * pos + 1, values);
        set[pos] = set[2 * pos] & set[2 * pos + 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(data: &[u64], levels: Option<u32>) -> WaveletMatrix {
        WaveletMatrix::from_slice(data, levels).unwrap()
    }

    #[test]
    fn test_active_set_len() {
        let wm = build(&[2, 1, 3, 1, 2], None);
        assert_eq!(wm.num_levels(), 2);
        assert_eq!(wm.active_set_len(), 8);
    }

    #[test]
    fn test_mark_and_enumerate() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, None);
        let mut marks = vec![0u64; wm.active_set_len()];

        wm.mark(1, &mut marks, 0b01);
        wm.mark(3, &mut marks, 0b10);

        // paths: 1 = 01 -> positions 1, 2, 5; 3 = 11 -> positions 1, 3, 7
        assert_eq!(marks[1], 0b11);
        assert_eq!(marks[2], 0b01);
        assert_eq!(marks[5], 0b01);
        assert_eq!(marks[3], 0b10);
        assert_eq!(marks[7], 0b10);
        assert_eq!(marks[4], 0);
        assert_eq!(marks[6], 0);

        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b01), vec![1, 1]);
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b10), vec![3]);
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b11), vec![1, 1, 3]);
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b100), vec![]);

        // restricting the position range drops occurrences
        assert_eq!(wm.active_values_in_range(0, 1, &marks, 0b01), vec![1]);
        assert_eq!(wm.active_values_in_range(4, 4, &marks, 0b11), vec![]);
    }

    #[test]
    fn test_unmark() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, None);
        let mut marks = vec![0u64; wm.active_set_len()];

        wm.mark(1, &mut marks, 0b01);
        wm.unmark(1, &mut marks);
        assert!(marks.iter().all(|&m| m == 0));
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b01), vec![]);

        // unmarking a shared prefix wipes the sibling's root slot too
        wm.mark(1, &mut marks, 0b01);
        wm.mark(3, &mut marks, 0b10);
        wm.unmark(3, &mut marks);
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b01), vec![]);
        wm.mark(1, &mut marks, 0b01);
        assert_eq!(wm.active_values_in_range(0, 4, &marks, 0b01), vec![1, 1]);
    }

    #[test]
    fn test_fresh_active_values() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, None);
        let mut set = vec![0u64; wm.active_set_len()];

        // first pass: both leaves in range report all of d as fresh
        let got = wm.fresh_active_values_in_range(0, 4, &mut set, 0b11);
        assert_eq!(got, vec![(1, 0b11), (2, 0b11), (3, 0b11)]);

        // second pass with the same d: everything subsumed, nothing reported
        let got = wm.fresh_active_values_in_range(0, 4, &mut set, 0b11);
        assert_eq!(got, vec![]);

        // a wider mask reports only the new bit
        let got = wm.fresh_active_values_in_range(0, 4, &mut set, 0b111);
        assert_eq!(got, vec![(1, 0b100), (2, 0b100), (3, 0b100)]);
    }

    #[test]
    fn test_fresh_active_values_partial_range() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, None);
        let mut set = vec![0u64; wm.active_set_len()];

        // only the leaves under positions [0, 1] absorb d
        let got = wm.fresh_active_values_in_range(0, 1, &mut set, 0b1);
        assert_eq!(got, vec![(1, 0b1), (2, 0b1)]);

        // the symbol-3 leaf still reports d as fresh; the others are subsumed
        let got = wm.fresh_active_values_in_range(0, 4, &mut set, 0b1);
        assert_eq!(got, vec![(3, 0b1)]);

        let got = wm.fresh_active_values_in_range(0, 4, &mut set, 0b1);
        assert_eq!(got, vec![]);
    }

    #[test]
    fn test_internal_slots_are_child_intersections() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, None);
        let mut set = vec![0u64; wm.active_set_len()];
        wm.fresh_active_values_in_range(0, 4, &mut set, 0b11);

        // leaves visited: 1 (pos 5), 2 (pos 6), 3 (pos 7); pos 4 (symbol 0)
        // was never entered and stays 0, pinning its parent to 0
        assert_eq!(set[5], 0b11);
        assert_eq!(set[6], 0b11);
        assert_eq!(set[7], 0b11);
        assert_eq!(set[4], 0);
        assert_eq!(set[2], set[4] & set[5]);
        assert_eq!(set[3], set[6] & set[7]);
        assert_eq!(set[1], set[2] & set[3]);
    }
}
