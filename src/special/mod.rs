//! Special-function provider.
//!
//! Everything the builders need from the special-function world sits behind
//! the [`SpecialFunctions`] trait: associated Legendre polynomials, spherical
//! Bessel/Hankel functions and a stable gamma-ratio. The numeric core only
//! calls the trait, so a higher-precision backend (or a test stub) can be
//! swapped in without touching any builder. [`RecurrenceBackend`] is the
//! self-contained default.

pub mod bessel;
pub mod gamma;
pub mod legendre;

use num_complex::Complex64;
use std::f64::consts::PI;

/// `(-1)^k` as a floating-point scale factor.
#[inline]
pub fn neg_one_pow(k: i32) -> f64 {
    if k & 1 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Special-function capability consumed by the basis and operator builders.
///
/// `Sync` is a supertrait because every builder fans the provider out across
/// rayon worker threads.
pub trait SpecialFunctions: Sync {
    /// Associated Legendre `P_n^m(x)`, Condon-Shortley-free, zero for `m > n`.
    fn legendre_p(&self, n: u32, m: i32, x: f64) -> f64;

    /// Spherical Bessel function of the first kind `j_n(x)`.
    fn sph_bessel(&self, n: u32, x: f64) -> f64;

    /// Derivative `j_n'(x)`.
    fn sph_bessel_prime(&self, n: u32, x: f64) -> f64;

    /// Spherical Hankel function of the second kind `h_n⁽²⁾(x)`.
    fn sph_hankel_2(&self, n: u32, x: f64) -> Complex64;

    /// Derivative of the second-kind spherical Hankel function.
    fn sph_hankel_2_prime(&self, n: u32, x: f64) -> Complex64;

    /// `Γ(a) / Γ(a + delta)`, stable where the separate gammas overflow.
    fn tgamma_delta_ratio(&self, a: f64, delta: f64) -> f64;

    /// Fully normalized complex spherical harmonic `Y_n^m(θ, φ)` with the
    /// Condon-Shortley phase. Degenerate degrees (`|m| > n`) evaluate to zero;
    /// the derivative formulas lean on that guard at the order boundary.
    fn sph_harm(&self, n: u32, m: i32, colatitude: f64, azimuth: f64) -> Complex64 {
        let mu = m.unsigned_abs();
        if mu > n {
            return Complex64::new(0.0, 0.0);
        }
        let norm = ((2.0 * n as f64 + 1.0) / (4.0 * PI)
            * self.tgamma_delta_ratio((n - mu) as f64 + 1.0, 2.0 * mu as f64))
        .sqrt();
        let p = self.legendre_p(n, mu as i32, colatitude.cos());
        let cs = neg_one_pow(mu as i32);
        let y = cs * norm * p * Complex64::from_polar(1.0, mu as f64 * azimuth);
        if m < 0 {
            // Y_n^{-m} = (-1)^m conj(Y_n^m)
            cs * y.conj()
        } else {
            y
        }
    }

    /// Real part of `Y_n^{|m|}(θ, φ)`, the cosine component consumed by the
    /// real-valued basis construction.
    fn sph_harm_real_part(&self, n: u32, m: i32, colatitude: f64, azimuth: f64) -> f64 {
        self.sph_harm(n, m.unsigned_abs() as i32, colatitude, azimuth).re
    }

    /// Imaginary part of `Y_n^{|m|}(θ, φ)`, the sine component.
    fn sph_harm_imag_part(&self, n: u32, m: i32, colatitude: f64, azimuth: f64) -> f64 {
        self.sph_harm(n, m.unsigned_abs() as i32, colatitude, azimuth).im
    }
}

/// Fully normalized (N3D) scaling factor `N(n, |m|)`.
///
/// `sqrt((2n+1)/(4π) · Γ(n-|m|+1)/Γ(n+|m|+1) · (2 - δ_m0))`, formed through
/// the gamma-ratio so the factorial quotient never overflows (the direct
/// quotient dies somewhere past order 20). Returns `0` when `|m| > n`; the
/// real derivative formulas use that as a sentinel multiplier when they step
/// over the order boundary.
pub fn sph_harm_norm<S: SpecialFunctions + ?Sized>(sf: &S, n: u32, m: i32) -> f64 {
    let mu = m.unsigned_abs();
    if mu > n {
        return 0.0;
    }
    let ratio = sf.tgamma_delta_ratio((n - mu) as f64 + 1.0, 2.0 * mu as f64);
    let two = if m == 0 { 1.0 } else { 2.0 };
    ((2.0 * n as f64 + 1.0) / (4.0 * PI) * ratio * two).sqrt()
}

/// Default provider built on the recurrence implementations in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceBackend;

impl SpecialFunctions for RecurrenceBackend {
    fn legendre_p(&self, n: u32, m: i32, x: f64) -> f64 {
        legendre::legendre_p(n, m, x)
    }

    fn sph_bessel(&self, n: u32, x: f64) -> f64 {
        bessel::sph_bessel(n, x)
    }

    fn sph_bessel_prime(&self, n: u32, x: f64) -> f64 {
        bessel::sph_bessel_prime(n, x)
    }

    fn sph_hankel_2(&self, n: u32, x: f64) -> Complex64 {
        bessel::sph_hankel_2(n, x)
    }

    fn sph_hankel_2_prime(&self, n: u32, x: f64) -> Complex64 {
        bessel::sph_hankel_2_prime(n, x)
    }

    fn tgamma_delta_ratio(&self, a: f64, delta: f64) -> f64 {
        gamma::tgamma_delta_ratio(a, delta)
    }
}
