// Range queries over the wavelet matrix. Every traversal starts at the
// root node with a node-local half-open range and recurses through
// `expand`/`expand_range`, pruning empty child ranges and stopping at
// leaves. Symbol intervals are tracked alongside: a node at `level` with
// low symbol bound `ilb` covers symbols `ilb .. ilb + 2^(levels - level)`.

use crate::bit_vec::BitVec;
use crate::wavelet_matrix::{Node, WaveletMatrix};
use std::ops::Range;

impl<V: BitVec> WaveletMatrix<V> {
    // Width of half of a node's symbol interval. Split into two additions
    // where it is used so that symbol arithmetic cannot overflow even with
    // 64 significant levels.
    fn half_width(&self, level: u32) -> u64 {
        1u64 << (self.num_levels - level - 1)
    }

    /// Count (and, with `report`, collect) the positions in `[lb, rb]`
    /// whose value lies in `[vlb, vrb]`. Points are `(position, value)`
    /// pairs in symbol-major order. Bounds are inclusive; `rb < len()`.
    pub fn range_search_2d(
        &self,
        lb: usize,
        rb: usize,
        vlb: u64,
        vrb: u64,
        report: bool,
    ) -> (usize, Vec<(usize, u64)>) {
        debug_assert!(rb < self.len);
        let vrb = vrb.min(self.max_symbol());
        let mut points = Vec::new();
        let mut count = 0;
        if vlb > vrb || lb > rb {
            return (count, points);
        }
        let levels = self.num_levels as usize;
        let mut path_offsets = vec![0; levels + 1];
        let mut path_ranks = vec![0; levels + 1];
        self.search_2d_rec(
            self.root(),
            lb..rb + 1,
            vlb,
            vrb,
            0,
            &mut path_offsets,
            &mut path_ranks,
            report,
            &mut count,
            &mut points,
        );
        (count, points)
    }

    /// Count of positions in `[lb, rb]` with value in `[vlb, vrb]`,
    /// without materializing the points. Subtrees whose whole symbol
    /// interval is inside `[vlb, vrb]` contribute their range length
    /// without further descent.
    pub fn count_range_search_2d(&self, lb: usize, rb: usize, vlb: u64, vrb: u64) -> usize {
        debug_assert!(rb < self.len);
        let vrb = vrb.min(self.max_symbol());
        if vlb > vrb || lb > rb {
            return 0;
        }
        let mut count = 0;
        self.count_2d_rec(self.root(), lb..rb + 1, vlb, vrb, 0, &mut count);
        count
    }

    #[allow(clippy::too_many_arguments)]
    fn search_2d_rec(
        &self,
        v: Node,
        r: Range<usize>,
        vlb: u64,
        vrb: u64,
        ilb: u64,
        path_offsets: &mut [usize],
        path_ranks: &mut [usize],
        report: bool,
        count: &mut usize,
        points: &mut Vec<(usize, u64)>,
    ) {
        if r.is_empty() {
            return;
        }
        let level = v.level() as usize;
        // absolute start of the active range in this node, for the upward
        // select phase at the leaves below
        path_offsets[level] = v.offset + r.start;

        if self.is_leaf(&v) {
            if report {
                let levels = self.num_levels as usize;
                for j in 1..=r.len() {
                    // lift the j-th match from the leaf back to its
                    // original position, one select per level
                    let mut pos = j;
                    let mut c = v.sym();
                    for k in (1..=levels).rev() {
                        let offset = path_offsets[k - 1];
                        let rank_offset = path_ranks[k - 1];
                        if c & 1 != 0 {
                            pos = self.tree.select1(rank_offset + pos) - offset + 1;
                        } else {
                            pos = self.tree.select0(offset - rank_offset + pos) - offset + 1;
                        }
                        c >>= 1;
                    }
                    points.push((path_offsets[0] + pos - 1, v.sym()));
                }
            }
            *count += r.len();
            return;
        }
        path_ranks[level] = self.tree.rank1(path_offsets[level]);

        let half = self.half_width(v.level());
        let mid = ilb + half;
        let (left, right) = self.expand(&v);
        let (left_range, right_range) = self.expand_range(&v, r);

        if !left_range.is_empty() && vlb < mid {
            self.search_2d_rec(
                left,
                left_range,
                vlb,
                vrb.min(mid - 1),
                ilb,
                path_offsets,
                path_ranks,
                report,
                count,
                points,
            );
        }
        if !right_range.is_empty() && vrb >= mid {
            self.search_2d_rec(
                right,
                right_range,
                vlb.max(mid),
                vrb,
                mid,
                path_offsets,
                path_ranks,
                report,
                count,
                points,
            );
        }
    }

    fn count_2d_rec(
        &self,
        v: Node,
        r: Range<usize>,
        vlb: u64,
        vrb: u64,
        ilb: u64,
        count: &mut usize,
    ) {
        if r.is_empty() {
            return;
        }
        if self.is_leaf(&v) {
            *count += r.len();
            return;
        }
        let half = self.half_width(v.level());
        // the node covers ilb ..= node_last
        let node_last = ilb + (half - 1) + half;
        if vlb <= ilb && node_last <= vrb {
            *count += r.len();
            return;
        }

        let mid = ilb + half;
        let (left, right) = self.expand(&v);
        let (left_range, right_range) = self.expand_range(&v, r);

        if !left_range.is_empty() && vlb < mid {
            self.count_2d_rec(left, left_range, vlb, vrb.min(mid - 1), ilb, count);
        }
        if !right_range.is_empty() && vrb >= mid {
            self.count_2d_rec(right, right_range, vlb.max(mid), vrb, mid, count);
        }
    }

    /// Minimum value in `S[i..=j]`. Requires `i <= j < len()`.
    ///
    /// Smaller values share longer zero-prefixes, so descending into the
    /// leftmost non-empty child at every level spells out the minimum,
    /// most significant bit first.
    pub fn range_minimum_query(&self, i: usize, j: usize) -> u64 {
        debug_assert!(i <= j && j < self.len);
        self.min_descent(i..j + 1, 0, 0, 0)
    }

    // Shared descent for RMQ and the right-subtree fallback of
    // range_next_value. The range must be non-empty.
    fn min_descent(&self, r: Range<usize>, depth: u32, b: usize, acc: u64) -> u64 {
        if depth == self.num_levels {
            return acc;
        }
        let step = self.min_step(&r, depth, b);
        match step {
            MinStep::Left { range, offset } => self.min_descent(range, depth + 1, offset, acc << 1),
            MinStep::Right { range, offset } => {
                self.min_descent(range, depth + 1, offset, (acc << 1) | 1)
            }
        }
    }

    // Expand one level of a min-descent: left child range if non-empty,
    // otherwise right.
    fn min_step(&self, r: &Range<usize>, depth: u32, b: usize) -> MinStep {
        let k = depth as usize;
        let rank_b = self.tree.rank1(b);
        let ones_start = self.tree.rank1(b + r.start) - rank_b;
        let ones_end = self.tree.rank1(b + r.end) - rank_b;
        let ones_before = rank_b - self.level_ranks[k];

        let left = (r.start - ones_start)..(r.end - ones_end);
        if !left.is_empty() {
            MinStep::Left {
                range: left,
                offset: (k + 1) * self.len + (b - k * self.len) - ones_before,
            }
        } else {
            MinStep::Right {
                range: ones_start..ones_end,
                offset: (k + 1) * self.len + self.zero_counts[k] + ones_before,
            }
        }
    }

    /// Smallest value `>= x` occurring in `S[i..=j]`, or 0 when none.
    /// 0 doubles as a data symbol; use [`Self::range_next_value_pos`] when
    /// that matters. `x` past the alphabet yields 0.
    pub fn range_next_value(&self, x: u64, i: usize, j: usize) -> u64 {
        debug_assert!(i <= j && j < self.len);
        if self.symbol_out_of_range(x) {
            return 0;
        }
        self.next_value_rec(x, i..j + 1, 0, 0, 0)
    }

    fn next_value_rec(&self, x: u64, r: Range<usize>, depth: u32, b: usize, acc: u64) -> u64 {
        if r.is_empty() {
            return 0;
        }
        if depth == self.num_levels {
            return acc;
        }
        let k = depth as usize;
        let rank_b = self.tree.rank1(b);
        let ones_start = self.tree.rank1(b + r.start) - rank_b;
        let ones_end = self.tree.rank1(b + r.end) - rank_b;
        let ones_before = rank_b - self.level_ranks[k];

        let left = (r.start - ones_start)..(r.end - ones_end);
        let right = ones_start..ones_end;
        let left_offset = (k + 1) * self.len + (b - k * self.len) - ones_before;
        let right_offset = (k + 1) * self.len + self.zero_counts[k] + ones_before;

        if x & (1 << (self.num_levels - 1 - depth)) != 0 {
            // only the right subtree can hold values >= x
            self.next_value_rec(x, right, depth + 1, right_offset, (acc << 1) | 1)
        } else {
            // prefer the left subtree; fall back to the minimum of the right
            let y = self.next_value_rec(x, left, depth + 1, left_offset, acc << 1);
            if y != 0 {
                y
            } else if right.is_empty() {
                0
            } else {
                self.min_descent(right, depth + 1, right_offset, (acc << 1) | 1)
            }
        }
    }

    /// Like [`Self::range_next_value`], additionally reporting the
    /// position of the leftmost such value. `None` when no value in the
    /// range is `>= x`, which keeps a genuine match of symbol 0
    /// distinguishable.
    pub fn range_next_value_pos(&self, x: u64, i: usize, j: usize) -> Option<(u64, usize)> {
        debug_assert!(i <= j && j < self.len);
        if self.symbol_out_of_range(x) {
            return None;
        }
        self.next_value_pos_rec(x, i..j + 1, 0, 0, 0)
    }

    // Position-reporting variants return the match as a node-local index;
    // each unwinding step lifts it to the parent with one select.
    fn next_value_pos_rec(
        &self,
        x: u64,
        r: Range<usize>,
        depth: u32,
        b: usize,
        acc: u64,
    ) -> Option<(u64, usize)> {
        if r.is_empty() {
            return None;
        }
        if depth == self.num_levels {
            return Some((acc, r.start));
        }
        let k = depth as usize;
        let rank_b = self.tree.rank1(b);
        let ones_start = self.tree.rank1(b + r.start) - rank_b;
        let ones_end = self.tree.rank1(b + r.end) - rank_b;
        let ones_before = rank_b - self.level_ranks[k];

        let left = (r.start - ones_start)..(r.end - ones_end);
        let right = ones_start..ones_end;
        let left_offset = (k + 1) * self.len + (b - k * self.len) - ones_before;
        let right_offset = (k + 1) * self.len + self.zero_counts[k] + ones_before;

        if x & (1 << (self.num_levels - 1 - depth)) != 0 {
            let (value, pos) = self.next_value_pos_rec(x, right, depth + 1, right_offset, (acc << 1) | 1)?;
            Some((value, self.lift_one(b, rank_b, pos)))
        } else if let Some((value, pos)) =
            self.next_value_pos_rec(x, left, depth + 1, left_offset, acc << 1)
        {
            Some((value, self.lift_zero(b, rank_b, pos)))
        } else {
            let (value, pos) = self.min_pos_descent(right, depth + 1, right_offset, (acc << 1) | 1)?;
            Some((value, self.lift_one(b, rank_b, pos)))
        }
    }

    fn min_pos_descent(
        &self,
        r: Range<usize>,
        depth: u32,
        b: usize,
        acc: u64,
    ) -> Option<(u64, usize)> {
        if r.is_empty() {
            return None;
        }
        if depth == self.num_levels {
            return Some((acc, r.start));
        }
        let rank_b = self.tree.rank1(b);
        match self.min_step(&r, depth, b) {
            MinStep::Left { range, offset } => {
                let (value, pos) = self.min_pos_descent(range, depth + 1, offset, acc << 1)?;
                Some((value, self.lift_zero(b, rank_b, pos)))
            }
            MinStep::Right { range, offset } => {
                let (value, pos) = self.min_pos_descent(range, depth + 1, offset, (acc << 1) | 1)?;
                Some((value, self.lift_one(b, rank_b, pos)))
            }
        }
    }

    // Map a left-child-local 0-based index to its 0-based position within
    // the parent node starting at `b`: the (pos+1)-th zero of the node.
    fn lift_zero(&self, b: usize, rank_b: usize, pos: usize) -> usize {
        self.tree.select0((b - rank_b) + pos + 1) - b
    }

    // Right-child counterpart: the (pos+1)-th one of the node.
    fn lift_one(&self, b: usize, rank_b: usize, pos: usize) -> usize {
        self.tree.select1(rank_b + pos + 1) - b
    }

    /// Smallest index `k >= lb` with `S[k]` in `[vlb, vrb]`, or `len() + 1`
    /// when no such position exists. Any return `>= len()` means "none".
    pub fn next_in_value_range(&self, vlb: u64, vrb: u64, lb: usize) -> usize {
        let vrb = vrb.min(self.max_symbol());
        if vlb > vrb || lb >= self.len {
            return self.len + 1;
        }
        self.next_in_value_range_rec(self.root(), vlb, vrb, lb..self.len, 0)
    }

    fn next_in_value_range_rec(
        &self,
        v: Node,
        vlb: u64,
        vrb: u64,
        r: Range<usize>,
        ilb: u64,
    ) -> usize {
        let none = self.len + 1;
        if r.is_empty() {
            return none;
        }
        if self.is_leaf(&v) {
            return r.start;
        }
        let half = self.half_width(v.level());
        let mid = ilb + half;
        let node_last = ilb + (half - 1) + half;
        // every symbol below this node matches: its leftmost position wins
        if vlb <= ilb && node_last <= vrb {
            return r.start;
        }

        let exp = self.expand_full(&v, &r);
        let mut best = none;
        let mut left_local = none;
        if !exp.left_range.is_empty() && vlb < mid {
            left_local =
                self.next_in_value_range_rec(exp.left, vlb, vrb.min(mid - 1), exp.left_range, ilb);
            if left_local != none {
                best = self.lift_zero(v.offset, exp.rank_at_offset, left_local);
            }
        }
        if !exp.right_range.is_empty() && vrb >= mid {
            // with a left result in hand, only right-child positions that
            // map before it can still win
            let right_range = if best != none {
                let cap = exp.right_range.start + (best - left_local);
                exp.right_range.start..exp.right_range.end.min(cap)
            } else {
                exp.right_range
            };
            let right_local =
                self.next_in_value_range_rec(exp.right, vlb.max(mid), vrb, right_range, mid);
            if right_local != none {
                let right_pos = self.lift_one(v.offset, exp.rank_at_offset, right_local);
                if right_pos < best {
                    best = right_pos;
                }
            }
        }
        best
    }

    /// Symbols occurring in positions `[lb, rb]`, one entry per position,
    /// in ascending symbol order.
    pub fn all_values_in_range(&self, lb: usize, rb: usize) -> Vec<u64> {
        self.all_values_in_range_bounded(lb, rb, usize::MAX)
    }

    /// Like [`Self::all_values_in_range`] but returns at most `bound`
    /// entries.
    pub fn all_values_in_range_bounded(&self, lb: usize, rb: usize, bound: usize) -> Vec<u64> {
        let mut values = Vec::new();
        if lb <= rb && lb < self.len {
            debug_assert!(rb < self.len);
            self.all_values_rec(self.root(), lb..rb + 1, bound, &mut values);
        }
        values
    }

    fn all_values_rec(&self, v: Node, r: Range<usize>, bound: usize, values: &mut Vec<u64>) {
        if r.is_empty() || values.len() >= bound {
            return;
        }
        if self.is_leaf(&v) {
            let take = r.len().min(bound - values.len());
            values.extend(std::iter::repeat(v.sym()).take(take));
            return;
        }
        let (left, right) = self.expand(&v);
        let (left_range, right_range) = self.expand_range(&v, r);
        self.all_values_rec(left, left_range, bound, values);
        self.all_values_rec(right, right_range, bound, values);
    }
}

enum MinStep {
    Left { range: Range<usize>, offset: usize },
    Right { range: Range<usize>, offset: usize },
}
