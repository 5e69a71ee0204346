// The abstract rank/select contract the wavelet matrix is built on.
//
// Implementers should implement:
// - rank1
// - select1 and select0
// - get, len, num_ones

/// An immutable bitmap with rank and select support.
///
/// `select1`/`select0` take a 1-based occurrence index `k` and return the
/// 0-based position of the `k`-th matching bit. Callers must guarantee
/// `1 <= k <= num_ones()` (resp. `num_zeros()`); implementations are free
/// to assert. Keeping select total rather than `Option`-valued matches how
/// the query algorithms use it: every call is made under an invariant that
/// guarantees the occurrence exists.
pub trait BitVec: bincode::Encode + bincode::Decode + for<'de> bincode::BorrowDecode<'de> + 'static {
    /// Number of 1-bits in positions `0..index`. Indexes past the end are
    /// permitted and count the whole bitmap.
    fn rank1(&self, index: usize) -> usize;

    /// 0-based position of the `k`-th 1-bit (1-based `k`).
    fn select1(&self, k: usize) -> usize;

    /// 0-based position of the `k`-th 0-bit (1-based `k`).
    fn select0(&self, k: usize) -> usize;

    /// Bit read at `index < len()`.
    fn get(&self, index: usize) -> bool;

    /// Bitmap length in bits.
    fn len(&self) -> usize;

    fn num_ones(&self) -> usize;

    /// Number of 0-bits in positions `0..index`.
    fn rank0(&self, index: usize) -> usize {
        index.min(self.len()) - self.rank1(index)
    }

    fn num_zeros(&self) -> usize {
        self.len() - self.num_ones()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Shared exercises for BitVec implementations, comparing small handcrafted
// inputs and pattern sweeps against the naive baseline.
#[cfg(test)]
pub fn test_bitvec<T: BitVec>(new: impl Fn(&[usize], usize) -> T) {
    use crate::slice_bit_vec::SliceBitVec;

    struct TestCase(Vec<usize>, usize);

    // lengths straddling block and rank-sample boundaries
    let len = 700;
    let test_cases = vec![
        TestCase(vec![], 0),
        TestCase(vec![], len),
        TestCase(vec![0], len),
        TestCase(vec![len - 1], len),
        TestCase(vec![0, 10], len),
        TestCase((0..len).collect(), len),
        TestCase((10..len).collect(), len),
        TestCase((0..len - 10).collect(), len),
        TestCase((0..len).step_by(3).collect(), len),
        TestCase((0..len).step_by(64).collect(), len),
        TestCase(vec![1, 2, 5, 10, 32], 33),
        TestCase(vec![63, 64, 127, 128, 511, 512, 513], 640),
    ];

    for TestCase(ones, len) in test_cases {
        let bv = new(&ones, len);
        let nv = SliceBitVec::new(&ones, len);

        assert_eq!(bv.len(), nv.len());
        assert_eq!(bv.num_ones(), nv.num_ones());
        assert_eq!(bv.num_zeros(), nv.num_zeros());
        assert_eq!(bv.num_ones(), bv.rank1(bv.len()));
        assert_eq!(bv.num_zeros(), bv.rank0(bv.len()));

        for i in 0..len + 2 {
            assert_eq!(bv.rank1(i), nv.rank1(i), "rank1({})", i);
            assert_eq!(bv.rank0(i), nv.rank0(i), "rank0({})", i);
        }
        for k in 1..=nv.num_ones() {
            assert_eq!(bv.select1(k), nv.select1(k), "select1({})", k);
        }
        for k in 1..=nv.num_zeros() {
            assert_eq!(bv.select0(k), nv.select0(k), "select0({})", k);
        }
        for i in 0..len {
            assert_eq!(bv.get(i), nv.get(i), "get({})", i);
        }
    }
}
