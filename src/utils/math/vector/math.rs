use std::cmp::Ordering;

use num::Float;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// ドット積
    ///
    /// Raw dot product of two sparse vectors, a single merge pass over both
    /// index arrays. Vectors of different dimension are compared on their
    /// shared indices only.
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let (a_inds, a_vals) = self.parts();
        let (b_inds, b_vals) = other.parts();
        let mut result = N::zero();
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result = result + a_vals[i] * b_vals[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Squared euclidean norm
    #[inline]
    pub fn norm_sq(&self) -> N {
        self.raw_iter().fold(N::zero(), |acc, (_, v)| acc + v * v)
    }

    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Scale to unit L2 norm in place.
    /// A zero vector is left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > N::zero() {
            for v in self.vals_mut() {
                *v = *v / norm;
            }
        }
    }

    /// Element-wise product with a dense weight slice (e.g. an IDF vector).
    /// Entries without a weight become zero.
    pub fn hadamard_dense(&mut self, weights: &[N]) {
        let inds: Vec<u32> = self.parts().0.to_vec();
        for (v, idx) in self.vals_mut().iter_mut().zip(inds) {
            *v = *v * weights.get(idx as usize).copied().unwrap_or_else(N::zero);
        }
    }
}
