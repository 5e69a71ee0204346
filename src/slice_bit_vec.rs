// Simple bit vector implemented as a slice-backed array containing the
// sorted positions of set bits. Every operation is a binary search or an
// array read, which makes this the baseline the accelerated bitvectors are
// tested against.

use crate::bincode_helpers::{
    bincode_borrow_decode_impl, bincode_decode_impl, bincode_encode_impl,
};
use crate::bit_vec::BitVec;
use crate::utils::partition_point;

#[derive(Debug, Clone)]
pub struct SliceBitVec {
    ones: Box<[usize]>,
    len: usize,
}

impl bincode::Encode for SliceBitVec {
    bincode_encode_impl!(ones, len);
}
impl bincode::Decode for SliceBitVec {
    bincode_decode_impl!(ones, len);
}
impl<'de> bincode::BorrowDecode<'de> for SliceBitVec {
    bincode_borrow_decode_impl!(ones, len);
}

impl SliceBitVec {
    pub fn new(ones: &[usize], len: usize) -> Self {
        debug_assert!(
            ones.windows(2).all(|w| w[0] < w[1]),
            "ones must be strictly increasing"
        );
        debug_assert!(ones.iter().all(|&one| one < len));
        Self {
            ones: ones.into(),
            len,
        }
    }
}

impl BitVec for SliceBitVec {
    fn rank1(&self, index: usize) -> usize {
        partition_point(self.ones.len(), |n| self.ones[n] < index)
    }

    fn select1(&self, k: usize) -> usize {
        debug_assert!(k >= 1);
        self.ones[k - 1]
    }

    fn select0(&self, k: usize) -> usize {
        debug_assert!(k >= 1 && k <= self.num_zeros());
        // first position whose zero-prefix-count reaches k
        partition_point(self.len, |i| (i + 1) - self.rank1(i + 1) < k)
    }

    fn get(&self, index: usize) -> bool {
        self.rank1(index + 1) - self.rank1(index) == 1
    }

    fn len(&self) -> usize {
        self.len
    }

    fn num_ones(&self) -> usize {
        self.ones.len()
    }
}
