//! Linear indexing of spherical-harmonic coefficients.
//!
//! The (order, degree) pair `(n, m)` of every basis function maps to a single
//! non-negative linear index. Two conventions are provided: ACN (Ambisonics
//! Channel Number), the canonical ordering used by every builder in this crate,
//! and SID, the legacy ordering that lists the degrees of each order as
//! `n, -n, n-1, -(n-1), ..., 1, -1, 0` (first order comes out as the familiar
//! B-format X, Y, Z sequence).

use num_integer::Roots;

/// Number of coefficients of a basis truncated at order `n_max`, `(n_max + 1)²`.
#[inline]
pub fn n_coefficients(n_max: u32) -> usize {
    let n = n_max as usize + 1;
    n * n
}

/// ACN index of the coefficient with order `n` and degree `m`.
///
/// Computes `n² + n + m`. Requires `|m| <= n`; out-of-range degrees are a
/// contract violation and produce an index belonging to a different pair.
#[inline]
pub fn nm_to_acn(n: u32, m: i32) -> usize {
    let n = n as i64;
    (n * n + n + m as i64) as usize
}

/// Order and degree encoded by the ACN index `acn`.
///
/// Total over all `acn >= 0` and the exact inverse of [`nm_to_acn`]:
/// `n = isqrt(acn)` (every index of order `n` lies in `[n², n² + 2n]`) and
/// `m = acn - n² - n`. Branch-free apart from the integer square root.
#[inline]
pub fn acn_to_nm(acn: usize) -> (u32, i32) {
    let n = acn.sqrt();
    let m = acn as i64 - (n * n + n) as i64;
    (n as u32, m as i32)
}

/// SID-ordered (order, degree) pairs up to `n_max`.
///
/// Within each order the degrees run `n, -n, n-1, -(n-1), ..., 1, -1, 0`.
pub fn sid(n_max: u32) -> Vec<(u32, i32)> {
    let mut pairs = Vec::with_capacity(n_coefficients(n_max));
    for n in 0..=n_max {
        for k in (1..=n as i32).rev() {
            pairs.push((n, k));
            pairs.push((n, -k));
        }
        pairs.push((n, 0));
    }
    pairs
}

/// ACN index of every SID channel, in SID order.
///
/// `sid_to_acn(n_max)[s]` is the ACN index holding the coefficient that SID
/// ordering puts at channel `s`.
pub fn sid_to_acn(n_max: u32) -> Vec<usize> {
    sid(n_max).iter().map(|&(n, m)| nm_to_acn(n, m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acn_known_values() {
        assert_eq!(nm_to_acn(0, 0), 0);
        assert_eq!(nm_to_acn(1, -1), 1);
        assert_eq!(nm_to_acn(1, 0), 2);
        assert_eq!(nm_to_acn(1, 1), 3);
        assert_eq!(nm_to_acn(2, -2), 4);
        assert_eq!(nm_to_acn(2, 2), 8);
    }

    #[test]
    fn acn_bijection_to_order_50() {
        for n in 0..=50u32 {
            for m in -(n as i32)..=(n as i32) {
                let acn = nm_to_acn(n, m);
                assert_eq!(acn_to_nm(acn), (n, m), "round trip failed at ({n}, {m})");
            }
        }
    }

    #[test]
    fn acn_decode_is_total_and_contiguous() {
        // Every index decodes to a valid pair and consecutive indices walk the
        // degree range of each order in ascending order.
        let mut prev = (0u32, -1i32);
        for acn in 0..n_coefficients(20) {
            let (n, m) = acn_to_nm(acn);
            assert!(m.unsigned_abs() <= n);
            if n == prev.0 {
                assert_eq!(m, prev.1 + 1);
            } else {
                assert_eq!(n, prev.0 + 1);
                assert_eq!(m, -(n as i32));
            }
            prev = (n, m);
        }
    }

    #[test]
    fn acn_round_trip_on_sampled_indices() {
        // The exhaustive check stops at order 50; sample the decode/encode
        // round trip across the index range of order 500.
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let acn = rng.gen_range(0..n_coefficients(500));
            let (n, m) = acn_to_nm(acn);
            assert!(m.unsigned_abs() <= n);
            assert_eq!(nm_to_acn(n, m), acn);
        }
    }

    #[test]
    fn n_coefficients_squares() {
        assert_eq!(n_coefficients(0), 1);
        assert_eq!(n_coefficients(1), 4);
        assert_eq!(n_coefficients(4), 25);
    }

    #[test]
    fn sid_first_order_is_wxyz() {
        // W, X, Y, Z in ACN terms: 0, 3, 1, 2.
        assert_eq!(sid(1), vec![(0, 0), (1, 1), (1, -1), (1, 0)]);
        assert_eq!(sid_to_acn(1), vec![0, 3, 1, 2]);
    }

    #[test]
    fn sid_is_a_permutation() {
        let n_max = 6;
        let mut acns = sid_to_acn(n_max);
        acns.sort_unstable();
        let expected: Vec<usize> = (0..n_coefficients(n_max)).collect();
        assert_eq!(acns, expected);
    }
}
