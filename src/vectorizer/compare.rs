use std::cmp::Ordering;

use num::Num;

/// Comparison of two sparse vectors given as ascending (index, value) iterators
pub trait Compare<N>
where
    N: Num + Copy,
{
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either side has zero norm
    fn cosine_similarity(vec: impl Iterator<Item = (usize, N)>, other: impl Iterator<Item = (usize, N)>) -> f64;
}

#[derive(Debug)]
pub struct DefaultCompare;

impl Compare<u32> for DefaultCompare {
    /// Counts are accumulated as integers, so the result only depends on the
    /// pair of vectors and not on argument order: cos(a, b) == cos(b, a) bit for bit,
    /// and cos(a, a) is exactly 1.0.
    #[inline]
    fn cosine_similarity(vec: impl Iterator<Item = (usize, u32)>, other: impl Iterator<Item = (usize, u32)>) -> f64 {
        let mut a_it = vec.fuse();
        let mut b_it = other.fuse();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut sum_a2 = 0_u64;
        let mut sum_b2 = 0_u64;
        let mut sum_ab = 0_u64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            let (va, vb) = (va as u64, vb as u64);
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    sum_a2 += va * va;
                    sum_b2 += vb * vb;
                    sum_ab += va * vb;
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => {
                    sum_a2 += va * va;
                    a_next = a_it.next();
                }
                Ordering::Greater => {
                    sum_b2 += vb * vb;
                    b_next = b_it.next();
                }
            }
        }
        while let Some((_, va)) = a_next {
            sum_a2 += va as u64 * va as u64;
            a_next = a_it.next();
        }
        while let Some((_, vb)) = b_next {
            sum_b2 += vb as u64 * vb as u64;
            b_next = b_it.next();
        }
        if sum_a2 == 0 || sum_b2 == 0 {
            return 0.0;
        }
        let denom = (sum_a2 as f64 * sum_b2 as f64).sqrt();
        (sum_ab as f64 / denom).min(1.0)
    }
}
