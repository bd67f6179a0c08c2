use num::Num;
use serde::Serialize;

/// SpVec is a sparse vector that treats zero elements as absent.
/// It holds `inds` (element positions) and `vals` (element values).
///
/// Elements are guaranteed to be sorted by ascending index,
/// and no stored value is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpVec<N>
where
    N: Num + Copy,
{
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    /// Build from (index, value) pairs in any order.
    /// Zero values are dropped, repeated indices are summed.
    ///
    /// # Panics
    /// If an index is out of range of `len`.
    pub fn from_pairs(len: usize, mut pairs: Vec<(usize, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut inds: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut vals: Vec<N> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            assert!(idx < len, "index {idx} out of range for length {len}");
            match inds.last() {
                Some(&last) if last as usize == idx => {
                    let tail = vals.len() - 1;
                    vals[tail] = vals[tail] + val;
                }
                _ => {
                    inds.push(idx as u32);
                    vals.push(val);
                }
            }
        }
        // sum of repeated entries may cancel out
        let (inds, vals) = inds
            .into_iter()
            .zip(vals)
            .filter(|(_, v)| !v.is_zero())
            .unzip();
        SpVec { len, inds, vals }
    }

    /// Logical length (number of dimensions)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Value at `index`, zero when absent or out of range
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate non-zero elements as (index, value) in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }
}
