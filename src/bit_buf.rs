// A plain fixed-size bitvector with no acceleration structures, backed by an
// array of integer blocks. Supports random bit read and write; used as the
// construction target for bitmaps that are later frozen into a DenseBitVec.

use crate::bincode_helpers::{
    bincode_borrow_decode_impl, bincode_decode_impl, bincode_encode_impl,
};
use crate::bit_block::BitBlock;
use crate::utils::div_ceil;

#[derive(Debug, Clone)]
pub struct BitBuf<Block: BitBlock = u64> {
    blocks: Box<[Block]>,
    len: usize,
}

impl<Block: BitBlock> bincode::Encode for BitBuf<Block> {
    bincode_encode_impl!(blocks, len);
}
impl<Block: BitBlock> bincode::Decode for BitBuf<Block> {
    bincode_decode_impl!(blocks, len);
}
impl<'de, Block: BitBlock> bincode::BorrowDecode<'de> for BitBuf<Block> {
    bincode_borrow_decode_impl!(blocks, len);
}

impl<Block: BitBlock> BitBuf<Block> {
    pub fn new(len: usize) -> Self {
        // Just enough blocks to represent `len` bits, zero-initialized so
        // that any trailing bits in the last block are zero.
        let num_blocks = div_ceil(len, Block::BITS as usize);
        let blocks = vec![Block::zero(); num_blocks].into();
        Self { blocks, len }
    }

    /// Return the bool value of the bit at index `index`
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        let block = self.blocks[Block::block_index(index)];
        let bit = block & (Block::one() << Block::bit_offset(index));
        bit != Block::zero()
    }

    /// Write a 1-bit to index `index`.
    // The buffer is allocated at its final size up front, so bits may be
    // set in any order.
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        let block_index = Block::block_index(index);
        let set_bit = Block::one() << Block::bit_offset(index);
        self.blocks[block_index] = self.blocks[block_index] | set_bit;
    }

    /// Return an immutable reference to the underlying blocks as a slice
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Bitvector length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
