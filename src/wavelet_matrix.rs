// Wavelet matrix for integer sequences over large alphabets, after
// "The Wavelet Matrix" (Claude & Navarro, SPIRE 2012).
//
// The conceptual wavelet tree is stored without pointers: a single bitmap
// of `len * num_levels` bits holds one stripe per bit level, where stripe k
// records bit (num_levels-1-k) of every element after the elements have
// been stably partitioned by the bits above. Children of a tree node are
// not stored below their parent; all left children of a level precede all
// right children in the next stripe. Two small vectors -- the per-level
// zero counts and the ranks at stripe boundaries -- are enough to recover
// any node's position, so tree nodes exist only as transient `Node` values
// materialized during traversal.

use crate::bincode_helpers::{
    bincode_borrow_decode_impl, bincode_decode_impl, bincode_encode_impl,
};
use crate::bit_buf::BitBuf;
use crate::bit_vec::BitVec;
use crate::dense_bit_vec::DenseBitVec;
use crate::error::{Error, Result};
use crate::int_vec::IntVec;
use std::ops::Range;

#[derive(Debug)]
pub struct WaveletMatrix<V: BitVec = DenseBitVec> {
    pub(crate) len: usize,               // number of symbols (n)
    pub(crate) sigma: usize,             // number of distinct symbols
    pub(crate) tree: V,                  // all level stripes, concatenated
    pub(crate) num_levels: u32,          // bits per symbol (L)
    pub(crate) zero_counts: Box<[usize]>, // zeros in stripe k
    pub(crate) level_ranks: Box<[usize]>, // rank1 at the start of stripe k
}

// Field order matches the on-disk layout: size, sigma, tree (rank support
// travels inside the bitmap type), max level, zero counts, level ranks.
impl<V: BitVec + 'static> bincode::Encode for WaveletMatrix<V> {
    bincode_encode_impl!(len, sigma, tree, num_levels, zero_counts, level_ranks);
}
impl<V: BitVec + 'static> bincode::Decode for WaveletMatrix<V> {
    bincode_decode_impl!(len, sigma, tree, num_levels, zero_counts, level_ranks);
}
impl<'de, V: BitVec + 'de> bincode::BorrowDecode<'de> for WaveletMatrix<V> {
    bincode_borrow_decode_impl!(len, sigma, tree, num_levels, zero_counts, level_ranks);
}

/// A virtual wavelet tree node: a contiguous slice of one bitmap stripe.
/// The node at `level` holds exactly the elements whose top `level` bits
/// equal `sym`; a node with `level == num_levels` is a leaf and `sym` is
/// the full symbol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub(crate) offset: usize, // absolute start position in the bitmap
    pub(crate) size: usize,   // number of elements in the node
    pub(crate) level: u32,
    pub(crate) sym: u64,
}

impl Node {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Symbol bit-prefix of this node (the full symbol at a leaf).
    pub fn sym(&self) -> u64 {
        self.sym
    }
}

// One-pass expansion of a node and a node-local subrange: both children,
// both child ranges, and the rank at the node start (reused by callers that
// lift child-local positions back to parent positions via select).
#[derive(Debug, Clone)]
pub(crate) struct Expansion {
    pub(crate) left: Node,
    pub(crate) right: Node,
    pub(crate) left_range: Range<usize>,
    pub(crate) right_range: Range<usize>,
    pub(crate) rank_at_offset: usize,
}

impl WaveletMatrix<DenseBitVec> {
    /// Build from a prefix of `size` elements of a buffered input.
    ///
    /// `num_levels` fixes the number of bit levels; `None` derives
    /// `floor(log2(max(S))) + 1` (at least 1). A supplied level count must
    /// be large enough to represent every element, or high bits are lost.
    ///
    /// Runs in `O(size * num_levels)` time with one `size`-element working
    /// buffer plus a scratch buffer for the one-partition per level.
    pub fn new(buf: &IntVec, size: usize, num_levels: Option<u32>) -> Result<Self> {
        if buf.len() < size {
            return Err(Error::PrefixTooLong {
                available: buf.len(),
                requested: size,
            });
        }
        if size == 0 {
            return Ok(Self {
                len: 0,
                sigma: 0,
                tree: DenseBitVec::new(BitBuf::new(0)),
                num_levels: 0,
                zero_counts: Box::new([]),
                level_ranks: Box::new([]),
            });
        }

        let mut rac: Vec<u64> = (0..size).map(|i| buf.get(i)).collect();
        let max = rac.iter().copied().max().unwrap_or(0).max(1);
        let num_levels = num_levels.unwrap_or(u64::BITS - max.leading_zeros());
        debug_assert!(num_levels >= 1 && num_levels <= u64::BITS);
        let levels = num_levels as usize;

        let mut bits = BitBuf::new(size * levels);
        let mut zero_counts = vec![0; levels].into_boxed_slice();
        let mut ones_scratch: Vec<u64> = Vec::new();

        // Stable partition per level: zero-bit elements stay in `rac` in
        // order, one-bit elements queue in the scratch buffer and are
        // appended afterwards. The stripe records the bits in the
        // pre-partition order.
        for k in 0..levels {
            let mask = 1u64 << (levels - 1 - k);
            let mut zeros = 0;
            ones_scratch.clear();
            for i in 0..size {
                let x = rac[i];
                if x & mask != 0 {
                    bits.set(k * size + i);
                    ones_scratch.push(x);
                } else {
                    rac[zeros] = x;
                    zeros += 1;
                }
            }
            zero_counts[k] = zeros;
            rac[zeros..].copy_from_slice(&ones_scratch);
        }

        // After the last partition equal symbols are adjacent, so the
        // distinct count is the adjacent-distinct count.
        let mut sigma = 1;
        for w in rac.windows(2) {
            if w[0] != w[1] {
                sigma += 1;
            }
        }

        let tree = DenseBitVec::new(bits);
        let mut level_ranks = vec![0; levels].into_boxed_slice();
        for (k, rank) in level_ranks.iter_mut().enumerate() {
            *rank = tree.rank1(k * size);
        }

        log::debug!(
            "built wavelet matrix: len={} levels={} sigma={}",
            size,
            num_levels,
            sigma
        );

        Ok(Self {
            len: size,
            sigma,
            tree,
            num_levels,
            zero_counts,
            level_ranks,
        })
    }

    /// Build from an in-memory slice.
    pub fn from_slice(data: &[u64], num_levels: Option<u32>) -> Result<Self> {
        let buf = IntVec::from_slice(data);
        Self::new(&buf, data.len(), num_levels)
    }
}

impl<V: BitVec> WaveletMatrix<V> {
    /// Length of the indexed sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bit levels.
    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    /// Effective alphabet size (number of distinct symbols present).
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /// Largest symbol representable with `num_levels` bits.
    pub fn max_symbol(&self) -> u64 {
        if self.num_levels == 0 {
            0
        } else {
            u64::MAX >> (u64::BITS - self.num_levels)
        }
    }

    pub(crate) fn symbol_out_of_range(&self, c: u64) -> bool {
        c > self.max_symbol()
    }

    // ------------------------------------------------------------------
    // Navigator

    /// The root node, covering the whole first stripe.
    pub fn root(&self) -> Node {
        Node {
            offset: 0,
            size: self.len,
            level: 0,
            sym: 0,
        }
    }

    pub fn is_leaf(&self, v: &Node) -> bool {
        v.level == self.num_levels
    }

    /// Offset of the left child of a node at `level` starting at `offset`,
    /// given the count of 1-bits in the stripe strictly before the node.
    fn left_child_offset(&self, level: usize, offset: usize, ones_before: usize) -> usize {
        (level + 1) * self.len + (offset - level * self.len) - ones_before
    }

    /// Offset of the right child: past all of the next stripe's zeros,
    /// after the one-children of the nodes to the left.
    fn right_child_offset(&self, level: usize, ones_before: usize) -> usize {
        (level + 1) * self.len + self.zero_counts[level] + ones_before
    }

    /// Both children of an inner node. Must not be called on leaves.
    pub fn expand(&self, v: &Node) -> (Node, Node) {
        debug_assert!(!self.is_leaf(v));
        let k = v.level as usize;
        let rank_b = self.tree.rank1(v.offset);
        let ones = self.tree.rank1(v.offset + v.size) - rank_b;
        let ones_before = rank_b - self.level_ranks[k];
        let left = Node {
            offset: self.left_child_offset(k, v.offset, ones_before),
            size: v.size - ones,
            level: v.level + 1,
            sym: v.sym << 1,
        };
        let right = Node {
            offset: self.right_child_offset(k, ones_before),
            size: ones,
            level: v.level + 1,
            sym: (v.sym << 1) | 1,
        };
        (left, right)
    }

    /// Map a node-local half-open subrange into the two child-local ranges.
    pub fn expand_range(&self, v: &Node, r: Range<usize>) -> (Range<usize>, Range<usize>) {
        debug_assert!(!self.is_leaf(v) && r.end <= v.size);
        let rank_b = self.tree.rank1(v.offset);
        let start_rank = self.tree.rank1(v.offset + r.start);
        let right_size = self.tree.rank1(v.offset + r.end) - start_rank;
        let left_size = r.len() - right_size;
        let right_start = start_rank - rank_b;
        let left_start = r.start - right_start;
        (
            left_start..left_start + left_size,
            right_start..right_start + right_size,
        )
    }

    /// Fused expansion: children, child ranges, and the node-start rank in
    /// one pass, saving the repeated rank evaluation of calling `expand`
    /// and `expand_range` separately.
    pub(crate) fn expand_full(&self, v: &Node, r: &Range<usize>) -> Expansion {
        debug_assert!(!self.is_leaf(v) && r.end <= v.size);
        let k = v.level as usize;
        let rank_b = self.tree.rank1(v.offset);
        let ones = self.tree.rank1(v.offset + v.size) - rank_b;
        let ones_before = rank_b - self.level_ranks[k];

        let start_rank = self.tree.rank1(v.offset + r.start);
        let right_size = self.tree.rank1(v.offset + r.end) - start_rank;
        let left_size = r.len() - right_size;
        let right_start = start_rank - rank_b;
        let left_start = r.start - right_start;

        Expansion {
            left: Node {
                offset: self.left_child_offset(k, v.offset, ones_before),
                size: v.size - ones,
                level: v.level + 1,
                sym: v.sym << 1,
            },
            right: Node {
                offset: self.right_child_offset(k, ones_before),
                size: ones,
                level: v.level + 1,
                sym: (v.sym << 1) | 1,
            },
            left_range: left_start..left_start + left_size,
            right_range: right_start..right_start + right_size,
            rank_at_offset: rank_b,
        }
    }

    // ------------------------------------------------------------------
    // Point queries

    /// Recover the `i`-th symbol of the original sequence. `i < len()`.
    pub fn access(&self, i: usize) -> u64 {
        debug_assert!(i < self.len);
        let mut i = i;
        let mut sym = 0u64;
        for k in 0..self.num_levels as usize {
            sym <<= 1;
            let rank_ones = self.tree.rank1(i) - self.level_ranks[k];
            if self.tree.get(i) {
                // one at position i: follow the right child
                i = self.right_child_offset(k, rank_ones);
                sym |= 1;
            } else {
                // zero at position i: follow the left child
                let rank_zeros = (i - k * self.len) - rank_ones;
                i = (k + 1) * self.len + rank_zeros;
            }
        }
        sym
    }

    /// Number of occurrences of `c` in the prefix `S[0..i)`. `i <= len()`.
    /// A symbol outside the alphabet yields 0.
    pub fn rank(&self, i: usize, c: u64) -> usize {
        debug_assert!(i <= self.len);
        if self.symbol_out_of_range(c) {
            return 0;
        }
        let levels = self.num_levels as usize;
        let mut i = i;
        let mut b = 0; // start position of the current node
        for k in 0..levels {
            if i == 0 {
                // no candidates remain; the count cannot recover
                break;
            }
            let rank_b = self.tree.rank1(b);
            let ones = self.tree.rank1(b + i) - rank_b;
            let ones_before = rank_b - self.level_ranks[k];
            if c & (1 << (levels - 1 - k)) != 0 {
                i = ones;
                b = self.right_child_offset(k, ones_before);
            } else {
                i -= ones;
                b = self.left_child_offset(k, b, ones_before);
            }
        }
        i
    }

    /// `(rank(i, S[i]), S[i])` in a single downward pass. `i < len()`.
    pub fn inverse_select(&self, i: usize) -> (usize, u64) {
        debug_assert!(i < self.len);
        let levels = self.num_levels as usize;
        let mut i = i;
        let mut b = 0;
        let mut c = 0u64;
        for k in 0..levels {
            let rank_b = self.tree.rank1(b);
            let ones = self.tree.rank1(b + i) - rank_b;
            let ones_before = rank_b - self.level_ranks[k];
            c <<= 1;
            if self.tree.get(b + i) {
                i = ones;
                b = self.right_child_offset(k, ones_before);
                c |= 1;
            } else {
                i -= ones;
                b = self.left_child_offset(k, b, ones_before);
            }
        }
        (i, c)
    }

    // Downward pass along the canonical path of symbol `c`, recording the
    // node offset and node-start rank per level for the upward select
    // phase. Returns (path offsets, path ranks, occurrences of c before
    // position `prefix` of the original sequence).
    fn descend_path(&self, c: u64, prefix: usize) -> (Vec<usize>, Vec<usize>, usize) {
        let levels = self.num_levels as usize;
        let mut path_offsets = vec![0; levels + 1];
        let mut path_ranks = vec![0; levels + 1];
        let mut b = 0;
        let mut r = prefix;
        for k in 0..levels {
            let rank_b = self.tree.rank1(b);
            let ones = self.tree.rank1(b + r) - rank_b;
            let ones_before = rank_b - self.level_ranks[k];
            if c & (1 << (levels - 1 - k)) != 0 {
                r = ones;
                b = self.right_child_offset(k, ones_before);
            } else {
                r -= ones;
                b = self.left_child_offset(k, b, ones_before);
            }
            path_offsets[k + 1] = b;
            path_ranks[k] = rank_b;
        }
        (path_offsets, path_ranks, r)
    }

    // Upward phase shared by select and select_next: map the 1-based
    // occurrence index `k` at the leaf back to a position in the original
    // sequence, one select per level.
    fn ascend_path(&self, c: u64, k: usize, path_offsets: &[usize], path_ranks: &[usize]) -> usize {
        let levels = self.num_levels as usize;
        let mut pos = k;
        for k in (1..=levels).rev() {
            let b = path_offsets[k - 1];
            let rank_b = path_ranks[k - 1];
            if c & (1 << (levels - k)) != 0 {
                // right child: find the pos-th one of the parent node
                pos = self.tree.select1(rank_b + pos) - b + 1;
            } else {
                // left child: find the pos-th zero of the parent node
                pos = self.tree.select0(b - rank_b + pos) - b + 1;
            }
        }
        pos - 1
    }

    /// Position of the `k`-th occurrence of `c` (1-based `k`).
    /// Requires `1 <= k <= rank(len(), c)`.
    pub fn select(&self, k: usize, c: u64) -> usize {
        debug_assert!(k >= 1 && k <= self.rank(self.len, c));
        let (path_offsets, path_ranks, _) = self.descend_path(c, k);
        self.ascend_path(c, k, &path_offsets, &path_ranks)
    }

    /// Position of the first occurrence of `c` at or after position `i`,
    /// together with `r = rank(i, c)`. Returns `(0, 0)` when fewer than
    /// `r + 1` occurrences exist among the first `n_elems` of them.
    pub fn select_next(&self, i: usize, c: u64, n_elems: usize) -> (usize, usize) {
        debug_assert!(i <= self.len);
        let (path_offsets, path_ranks, r) = self.descend_path(c, i);
        if r + 1 > n_elems {
            return (0, 0);
        }
        let pos = self.ascend_path(c, r + 1, &path_offsets, &path_ranks);
        (pos, r)
    }

    // ------------------------------------------------------------------
    // Serialization

    pub fn encode(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard().with_fixed_int_encoding();
        Ok(bincode::encode_to_vec(self, config)?)
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let config = bincode::config::standard().with_fixed_int_encoding();
        let (ret, _) = bincode::decode_from_slice(data, config)?;
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn build(data: &[u64], levels: Option<u32>) -> WaveletMatrix {
        WaveletMatrix::from_slice(data, levels).unwrap()
    }

    #[test]
    fn test_access_rank_select_small() {
        let data = [4u64, 7, 6, 5, 3, 2, 1, 0, 4, 7];
        let wm = build(&data, Some(3));

        assert_eq!(wm.len(), 10);
        assert_eq!(wm.num_levels(), 3);
        assert_eq!(wm.sigma(), 8);
        assert_eq!(wm.max_symbol(), 7);

        assert_eq!(wm.access(0), 4);
        assert_eq!(wm.access(7), 0);
        for (i, &x) in data.iter().enumerate() {
            assert_eq!(wm.access(i), x, "access({})", i);
        }

        assert_eq!(wm.rank(10, 4), 2);
        assert_eq!(wm.rank(6, 7), 1);
        assert_eq!(wm.rank(0, 4), 0);
        assert_eq!(wm.rank(10, 8), 0); // out of alphabet

        assert_eq!(wm.select(2, 4), 8);
        assert_eq!(wm.select(1, 4), 0);
        assert_eq!(wm.select(1, 0), 7);
    }

    #[test]
    fn test_binary_alphabet() {
        let wm = build(&[0, 0, 0, 1, 1], Some(1));
        assert_eq!(wm.rank(5, 0), 3);
        assert_eq!(wm.rank(5, 1), 2);
        assert_eq!(wm.select(1, 1), 3);
        assert_eq!(wm.select(2, 1), 4);
        assert_eq!(wm.select(3, 0), 2);
    }

    #[test]
    fn test_single_element() {
        let wm = build(&[5], Some(3));
        assert_eq!(wm.len(), 1);
        assert_eq!(wm.access(0), 5);
        assert_eq!(wm.rank(1, 5), 1);
        assert_eq!(wm.rank(1, 4), 0);
        assert_eq!(wm.select(1, 5), 0);
        assert_eq!(wm.inverse_select(0), (0, 5));
    }

    #[test]
    fn test_empty() {
        let wm = build(&[], None);
        assert!(wm.is_empty());
        assert_eq!(wm.num_levels(), 0);
        assert_eq!(wm.sigma(), 0);
        assert_eq!(wm.rank(0, 0), 0);
        assert_eq!(wm.rank(0, 99), 0);
    }

    #[test]
    fn test_prefix_too_long() {
        let buf = IntVec::from_slice(&[1, 2, 3]);
        assert!(matches!(
            WaveletMatrix::new(&buf, 4, None),
            Err(Error::PrefixTooLong {
                available: 3,
                requested: 4
            })
        ));
        assert!(WaveletMatrix::new(&buf, 3, None).is_ok());
        assert!(WaveletMatrix::new(&buf, 2, None).is_ok());
    }

    #[test]
    fn test_derived_levels() {
        let wm = build(&[3, 1, 4, 1, 5, 9, 2, 6], None);
        assert_eq!(wm.num_levels(), 4); // 9 needs 4 bits
        assert_eq!(wm.access(5), 9);

        let wm = build(&[0, 0], None);
        assert_eq!(wm.num_levels(), 1); // at least one level even for all zeros
        assert_eq!(wm.access(1), 0);
    }

    #[test]
    fn test_prefix_construction() {
        let buf = IntVec::from_slice(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let wm = WaveletMatrix::new(&buf, 5, None).unwrap();
        assert_eq!(wm.len(), 5);
        assert_eq!(wm.num_levels(), 3); // max of the prefix is 5
        for (i, &x) in [3u64, 1, 4, 1, 5].iter().enumerate() {
            assert_eq!(wm.access(i), x);
        }
    }

    #[test]
    fn test_inverse_select_matches_rank() {
        let data = [3u64, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let wm = build(&data, Some(4));
        for i in 0..data.len() {
            let (r, c) = wm.inverse_select(i);
            assert_eq!(c, data[i]);
            assert_eq!(r, wm.rank(i, data[i]));
        }
    }

    #[test]
    fn test_select_next() {
        let data = [2u64, 1, 3, 1, 2];
        let wm = build(&data, Some(2));
        let total = wm.rank(wm.len(), 1);
        // first occurrence of 1 at or after each position
        assert_eq!(wm.select_next(0, 1, total), (1, 0));
        assert_eq!(wm.select_next(2, 1, total), (3, 1));
        assert_eq!(wm.select_next(4, 1, total), (0, 0)); // exhausted
        assert_eq!(wm.select_next(0, 3, wm.rank(wm.len(), 3)), (2, 0));
    }

    #[test]
    fn test_structural_invariants() {
        let data: Vec<u64> = (0..300).map(|i| (i * 7919) % 128).collect();
        let wm = build(&data, None);
        let n = wm.len();
        let levels = wm.num_levels() as usize;

        assert_eq!(wm.tree.len(), n * levels);
        for k in 0..levels {
            let stripe_ones = wm.tree.rank1((k + 1) * n) - wm.tree.rank1(k * n);
            assert_eq!(wm.zero_counts[k] + stripe_ones, n);
            assert_eq!(wm.level_ranks[k], wm.tree.rank1(k * n));
        }

        // child geometry per the expansion rule
        let root = wm.root();
        let (left, right) = wm.expand(&root);
        assert_eq!(left.size + right.size, n);
        assert_eq!(left.size, wm.zero_counts[0]);
        assert_eq!(left.offset, n);
        assert_eq!(right.offset, n + wm.zero_counts[0]);
    }

    #[test]
    fn test_rank_select_vs_naive_random() {
        let mut rng = rand::thread_rng();
        let data: Vec<u64> = (0..1024).map(|_| rng.gen_range(0..1024)).collect();
        let wm = build(&data, Some(10));

        for (i, &x) in data.iter().enumerate() {
            assert_eq!(wm.access(i), x);
        }

        for _ in 0..10_000 {
            let i = rng.gen_range(0..=data.len());
            let c = rng.gen_range(0..1024u64);
            let naive = data[..i].iter().filter(|&&x| x == c).count();
            assert_eq!(wm.rank(i, c), naive, "rank({}, {})", i, c);
        }

        for c in 0..1024u64 {
            let total = wm.rank(data.len(), c);
            for k in 1..=total {
                let pos = wm.select(k, c);
                assert_eq!(data[pos], c);
                assert_eq!(wm.rank(pos, c), k - 1);
            }
        }

        // every occurrence is counted exactly once
        let total: usize = (0..1024u64).map(|c| wm.rank(data.len(), c)).sum();
        assert_eq!(total, data.len());
    }

    #[test]
    fn test_rank_monotone() {
        let data = [3u64, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let wm = build(&data, None);
        for c in 0..=wm.max_symbol() {
            for i in 0..data.len() {
                let a = wm.rank(i, c);
                let b = wm.rank(i + 1, c);
                assert!(a <= b && b <= a + 1);
            }
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let data = [3u64, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let wm = build(&data, None);
        let bytes = wm.encode().unwrap();
        let decoded = WaveletMatrix::<DenseBitVec>::decode(&bytes).unwrap();
        assert_eq!(decoded.len(), wm.len());
        assert_eq!(decoded.num_levels(), wm.num_levels());
        assert_eq!(decoded.sigma(), wm.sigma());
        for i in 0..data.len() {
            assert_eq!(decoded.access(i), data[i]);
        }
        assert_eq!(decoded.select(2, 5), wm.select(2, 5));
    }

    #[test]
    fn test_wide_symbols() {
        let data = [u64::MAX, 0, u64::MAX - 3, 1 << 60, u64::MAX];
        let wm = build(&data, None);
        assert_eq!(wm.num_levels(), 64);
        for (i, &x) in data.iter().enumerate() {
            assert_eq!(wm.access(i), x);
        }
        assert_eq!(wm.rank(5, u64::MAX), 3);
        assert_eq!(wm.select(3, u64::MAX), 4);
    }
}
