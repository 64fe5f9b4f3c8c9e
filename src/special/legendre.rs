//! Associated Legendre polynomials.
//!
//! Condon-Shortley-free convention: `P_1^1(cos θ) = sin θ` is positive. The
//! `(-1)^m` phase is applied once, by the spherical-harmonic evaluator, so the
//! sign convention stays in a single place.

use super::gamma::tgamma_delta_ratio;

/// Associated Legendre `P_n^m(x)` for `x` in `[-1, 1]`.
///
/// Degenerate degrees (`m > n`) evaluate to zero. Negative `m` is mapped back
/// with `P_n^{-m} = (-1)^m (n-m)!/(n+m)! P_n^m`.
pub fn legendre_p(n: u32, m: i32, x: f64) -> f64 {
    if m < 0 {
        let mu = m.unsigned_abs();
        if mu > n {
            return 0.0;
        }
        let ratio = tgamma_delta_ratio((n - mu) as f64 + 1.0, 2.0 * mu as f64);
        let sign = if mu % 2 == 1 { -1.0 } else { 1.0 };
        return sign * ratio * legendre_p(n, mu as i32, x);
    }
    let m = m as u32;
    if m > n {
        return 0.0;
    }

    // Seed P_m^m = (2m-1)!! (1-x²)^{m/2}, then the three-term recurrence
    // upward in the order. Stable for all orders this crate targets.
    let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();
    let mut pmm = 1.0;
    let mut odd = 1.0;
    for _ in 0..m {
        pmm *= odd * somx2;
        odd += 2.0;
    }
    if n == m {
        return pmm;
    }

    let mf = m as f64;
    let mut pmmp1 = x * (2.0 * mf + 1.0) * pmm;
    if n == m + 1 {
        return pmmp1;
    }

    let mut pnm = 0.0;
    for k in (m + 2)..=n {
        let kf = k as f64;
        pnm = ((2.0 * kf - 1.0) * x * pmmp1 - (kf + mf - 1.0) * pmm) / (kf - mf);
        pmm = pmmp1;
        pmmp1 = pnm;
    }
    pnm
}
