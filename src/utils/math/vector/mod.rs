pub mod math;

use std::fmt;

use num::Float;

use crate::utils::sort::radix_sort_u32_soa;

/// ZeroSpVec は 0 要素を疎とした過疎ベクトルです
///
/// A sparse vector over a fixed dimension `len`.
/// Only non-zero entries are stored as parallel `inds` / `vals` arrays.
///
/// `inds` is always strictly ascending, which lets the math routines walk two
/// vectors with a single merge pass.
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Float,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// Create an empty vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build a vector from unordered `(index, value)` entries.
    ///
    /// Zero values are dropped and duplicate indices are summed.
    /// Indices outside `0..len` are ignored.
    pub fn from_entries<I>(len: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut inds = Vec::new();
        let mut vals = Vec::new();
        for (idx, val) in entries {
            if idx < len && val != N::zero() {
                inds.push(idx as u32);
                vals.push(val);
            }
        }
        radix_sort_u32_soa(&mut inds, &mut vals);

        // 重複インデックスを畳み込む
        let mut out = Self {
            inds: Vec::with_capacity(inds.len()),
            vals: Vec::with_capacity(vals.len()),
            len,
        };
        for (idx, val) in inds.into_iter().zip(vals) {
            match out.inds.last() {
                Some(&last) if last == idx => {
                    if let Some(acc) = out.vals.last_mut() {
                        *acc = *acc + val;
                    }
                }
                _ => {
                    out.inds.push(idx);
                    out.vals.push(val);
                }
            }
        }
        out
    }

    /// Dimension of the vector space
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Get the value at `index`, zero when not stored
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate stored entries in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub(crate) fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    #[inline]
    pub(crate) fn parts(&self) -> (&[u32], &[N]) {
        (&self.inds, &self.vals)
    }
}

impl<N> fmt::Debug for ZeroSpVec<N>
where
    N: Float + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec {{ len: {}, nnz: {} [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {idx}: {val:?}")?;
            }
            write!(f, "] }}")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}
