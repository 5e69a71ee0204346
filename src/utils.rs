use crate::bit_block::BitBlock;

/// Bitwise binary search over the range 0..n, based on the `lower_bound_pad`
/// variant from https://orlp.net/blog/bitwise-binary-search/.
///
/// Returns the index of the partition point according to the given predicate
/// (the index of the first element of the second partition). The predicate
/// must be monotone: once it returns false it returns false for all larger
/// indices.
pub fn partition_point(n: usize, pred: impl Fn(usize) -> bool) -> usize {
    let mut b = 0;
    let mut bit = bit_floor(n);
    while bit != 0 {
        let i = (b | bit) - 1;
        if i < n && pred(i) {
            b |= bit
        }
        bit >>= 1;
    }
    b
}

/// Largest power of two less than or equal to `n`, or 0 for n == 0.
pub fn bit_floor(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        let msb = usize::BITS - 1 - n.leading_zeros();
        1 << msb
    }
}

/// Position of the `k`-th set bit of `block` (0-based `k`).
/// The block must contain more than `k` set bits.
pub fn select_in_block<Block: BitBlock>(block: Block, k: u32) -> u32 {
    debug_assert!(block.count_ones() > k);
    let mut block = block;
    for _ in 0..k {
        // clear the lowest set bit
        block = block & (block - Block::one());
    }
    block.trailing_zeros()
}

pub fn div_ceil(n: usize, m: usize) -> usize {
    (n + m - 1) / m
}
