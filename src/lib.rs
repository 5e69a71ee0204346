//! A succinct wavelet matrix for integer sequences over large alphabets.
//!
//! The index is built once from a sequence of unsigned integers and is
//! immutable afterwards. It answers `access`, `rank`, `select` and a
//! family of range queries (2D range search, range minimum, range next
//! value, bounded value enumeration) in time logarithmic in the alphabet
//! size, storing one bitmap stripe per significant bit level plus two
//! small counter vectors.
//!
//! ```
//! use wavematrix::WaveletMatrix;
//!
//! let wm = WaveletMatrix::from_slice(&[3, 1, 4, 1, 5, 9, 2, 6], None).unwrap();
//! assert_eq!(wm.access(4), 5);
//! assert_eq!(wm.rank(8, 1), 2);
//! assert_eq!(wm.select(2, 1), 3);
//! assert_eq!(wm.range_minimum_query(2, 5), 1);
//! ```

mod active;
mod bincode_helpers;
pub mod bit_block;
pub mod bit_buf;
pub mod bit_vec;
pub mod dense_bit_vec;
pub mod error;
pub mod int_vec;
mod range;
pub mod slice_bit_vec;
pub mod utils;
pub mod wavelet_matrix;

pub use bit_block::BitBlock;
pub use bit_buf::BitBuf;
pub use bit_vec::BitVec;
pub use dense_bit_vec::DenseBitVec;
pub use error::{Error, Result};
pub use int_vec::IntVec;
pub use slice_bit_vec::SliceBitVec;
pub use wavelet_matrix::{Node, WaveletMatrix};
