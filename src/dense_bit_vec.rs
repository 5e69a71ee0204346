// Dense bit vector with rank and select, in the spirit of the sampled-block
// designs from "Fast, Small, Simple Rank/Select on Bitmaps". Rank stores one
// cumulative sample per 2^SR_POW2 bits; rank reads one sample plus a short
// block scan, and the selects binary-search the samples before scanning.

use crate::bincode_helpers::{
    bincode_borrow_decode_impl, bincode_decode_impl, bincode_encode_impl,
};
use crate::bit_block::BitBlock;
use crate::bit_buf::BitBuf;
use crate::bit_vec::BitVec;
use crate::utils::{partition_point, select_in_block};

// Rank sampling rate: one sample per 2^9 = 512 bits.
// Must be at least the block size of the raw storage.
const SR_POW2: u32 = 9;

#[derive(Debug)]
pub struct DenseBitVec<Raw: BitBlock = u64> {
    raw: BitBuf<Raw>, // bit data
    r: Box<[usize]>,  // rank samples: 1-bits preceding each sample boundary
    num_ones: usize,
}

impl<Raw: BitBlock> bincode::Encode for DenseBitVec<Raw> {
    bincode_encode_impl!(raw, r, num_ones);
}
impl<Raw: BitBlock> bincode::Decode for DenseBitVec<Raw> {
    bincode_decode_impl!(raw, r, num_ones);
}
impl<'de, Raw: BitBlock> bincode::BorrowDecode<'de> for DenseBitVec<Raw> {
    bincode_borrow_decode_impl!(raw, r, num_ones);
}

impl<Raw: BitBlock> DenseBitVec<Raw> {
    pub fn new(data: BitBuf<Raw>) -> Self {
        debug_assert!(SR_POW2 >= Raw::bits_pow2());
        let raw = data;
        let blocks_per_sample = Self::blocks_per_sample();

        let mut r = Vec::with_capacity(raw.blocks().len() / blocks_per_sample + 1);
        let mut cumulative_ones = 0;
        for blocks in raw.blocks().chunks(blocks_per_sample) {
            r.push(cumulative_ones);
            for block in blocks {
                cumulative_ones += block.count_ones() as usize;
            }
        }

        Self {
            raw,
            r: r.into_boxed_slice(),
            num_ones: cumulative_ones,
        }
    }

    /// Raw blocks covered by one rank sample
    fn blocks_per_sample() -> usize {
        1 << (SR_POW2 - Raw::bits_pow2())
    }

    /// First raw block of the sample chunk `s`
    fn sample_start_block(s: usize) -> usize {
        s << (SR_POW2 - Raw::bits_pow2())
    }

    /// Number of 0-bits preceding the sample boundary `s`
    fn zeros_at_sample(&self, s: usize) -> usize {
        (s << SR_POW2) - self.r[s]
    }
}

impl<Raw: BitBlock> BitVec for DenseBitVec<Raw> {
    fn rank1(&self, index: usize) -> usize {
        if index >= self.raw.len() {
            return self.num_ones;
        }

        // Start from the preceding rank sample, then scan raw blocks.
        let sample_index = index >> SR_POW2;
        let mut rank = self.r[sample_index];
        let blocks = self.raw.blocks();
        let start_block = Self::sample_start_block(sample_index);
        let end_block = Raw::block_index(index);
        for block in &blocks[start_block..end_block] {
            rank += block.count_ones() as usize;
        }

        // Ones in the final partly-covered raw block
        let bit_offset = Raw::bit_offset(index);
        if bit_offset > 0 {
            let masked = blocks[end_block] & Raw::one_mask(bit_offset as u32);
            rank += masked.count_ones() as usize;
        }
        rank
    }

    fn select1(&self, k: usize) -> usize {
        debug_assert!(k >= 1 && k <= self.num_ones, "select1({}) out of range", k);

        // Largest sample with fewer than k preceding ones; r[0] == 0 so the
        // partition point is always at least 1.
        let sample_index = partition_point(self.r.len(), |s| self.r[s] < k) - 1;
        let mut count = self.r[sample_index];
        let mut block_index = Self::sample_start_block(sample_index);
        let blocks = self.raw.blocks();
        loop {
            let block_ones = blocks[block_index].count_ones() as usize;
            if count + block_ones >= k {
                break;
            }
            count += block_ones;
            block_index += 1;
        }
        let bit_offset = select_in_block(blocks[block_index], (k - count - 1) as u32);
        block_index * Raw::BITS as usize + bit_offset as usize
    }

    fn select0(&self, k: usize) -> usize {
        debug_assert!(k >= 1 && k <= self.num_zeros(), "select0({}) out of range", k);

        let sample_index = partition_point(self.r.len(), |s| self.zeros_at_sample(s) < k) - 1;
        let mut count = self.zeros_at_sample(sample_index);
        let mut block_index = Self::sample_start_block(sample_index);
        let blocks = self.raw.blocks();
        loop {
            // Trailing padding bits of the last block read as zeros, but the
            // k-th zero lies strictly before them whenever k <= num_zeros.
            let block_zeros = blocks[block_index].count_zeros() as usize;
            if count + block_zeros >= k {
                break;
            }
            count += block_zeros;
            block_index += 1;
        }
        let bit_offset = select_in_block(!blocks[block_index], (k - count - 1) as u32);
        block_index * Raw::BITS as usize + bit_offset as usize
    }

    fn get(&self, index: usize) -> bool {
        self.raw.get(index)
    }

    fn len(&self) -> usize {
        self.raw.len()
    }

    fn num_ones(&self) -> usize {
        self.num_ones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_vec;
    use rand::Rng;

    fn from_ones(ones: &[usize], len: usize) -> DenseBitVec<u64> {
        let mut raw = BitBuf::new(len);
        for &one in ones {
            raw.set(one);
        }
        DenseBitVec::new(raw)
    }

    #[test]
    fn test_vs_naive() {
        bit_vec::test_bitvec(from_ones);
    }

    #[test]
    fn test_vs_naive_u8_blocks() {
        bit_vec::test_bitvec(|ones, len| {
            let mut raw = BitBuf::<u8>::new(len);
            for &one in ones {
                raw.set(one);
            }
            DenseBitVec::new(raw)
        });
    }

    #[test]
    fn test_ranks() {
        let bv = from_ones(&[1, 2, 5, 10, 32], 33);
        assert_eq!(bv.rank1(0), 0);
        assert_eq!(bv.rank1(1), 0);
        assert_eq!(bv.rank1(2), 1);
        assert_eq!(bv.rank1(3), 2);
        assert_eq!(bv.rank1(10), 3);
        assert_eq!(bv.rank1(11), 4);
        assert_eq!(bv.rank1(32), 4);
        assert_eq!(bv.rank1(33), 5);
        assert_eq!(bv.rank1(1000), 5);

        assert_eq!(bv.rank0(0), 0);
        assert_eq!(bv.rank0(1), 1);
        assert_eq!(bv.rank0(5), 3);
        assert_eq!(bv.rank0(33), 28);
        assert_eq!(bv.rank0(1000), 28);
    }

    #[test]
    fn test_selects() {
        let bv = from_ones(&[1, 2, 5, 10, 32], 33);
        assert_eq!(bv.select1(1), 1);
        assert_eq!(bv.select1(2), 2);
        assert_eq!(bv.select1(3), 5);
        assert_eq!(bv.select1(4), 10);
        assert_eq!(bv.select1(5), 32);

        assert_eq!(bv.select0(1), 0);
        assert_eq!(bv.select0(2), 3);
        assert_eq!(bv.select0(3), 4);
        assert_eq!(bv.select0(4), 6);
    }

    #[test]
    fn test_select_rand() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut ones = vec![];
            let mut prev = 0usize;
            for _ in 0..200 {
                prev += rng.gen_range(1..100);
                ones.push(prev);
            }
            let len = ones.last().unwrap() + 1;
            let bv = from_ones(&ones, len);
            for (k, &one) in ones.iter().enumerate() {
                assert_eq!(bv.select1(k + 1), one);
            }
            for i in 0..len {
                let naive = ones.iter().filter(|&&one| one < i).count();
                assert_eq!(bv.rank1(i), naive);
            }
        }
    }
}
