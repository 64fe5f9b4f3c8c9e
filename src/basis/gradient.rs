//! Angular derivatives of the spherical-harmonic basis.
//!
//! Two derivative kinds, each with a complex and a real variant. The theta
//! derivative uses the adjacent-degree recurrence and is mathematically exact,
//! but numerically unstable close to the poles (θ → 0 or π) where the implicit
//! 1/sin θ normalization of the underlying recurrence blows up cancellation
//! errors; callers must expect reduced accuracy there. The phi derivative is
//! delivered divided by sin θ, the quantity gradient consumers need,
//! and baking the division into the recurrence avoids an explicit 1/sin θ at
//! the call site. A bare `∂Y/∂φ = i·m·Y` is exposed separately.

use ndarray::{Array2, ArrayView1, Axis};
use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;
use std::cmp::Ordering;

use crate::basis::check_directions;
use crate::error::SphResult;
use crate::indexing::{acn_to_nm, n_coefficients};
use crate::special::{neg_one_pow, sph_harm_norm, SpecialFunctions};

/// Theta derivative `∂Y_n^m/∂θ` at a single direction.
///
/// Zero for `n = 0`; otherwise combines the same-order harmonics at degrees
/// `m-1` and `m+1` (the evaluator's own degree guard zeroes the out-of-range
/// neighbor at `m = ±n`). Unstable near the poles, see the module docs.
pub fn sph_harm_dtheta<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> Complex64 {
    if n == 0 || m.unsigned_abs() > n {
        return Complex64::zero();
    }
    let nf = f64::from(n);
    let mf = f64::from(m);
    let first = ((nf - mf + 1.0) * (nf + mf)).sqrt()
        * Complex64::from_polar(1.0, azimuth)
        * sf.sph_harm(n, m - 1, colatitude, azimuth);
    let second = ((nf - mf) * (nf + mf + 1.0)).sqrt()
        * Complex64::from_polar(1.0, -azimuth)
        * sf.sph_harm(n, m + 1, colatitude, azimuth);
    -0.5 * (first - second)
}

/// Bare phi derivative `∂Y_n^m/∂φ = i·m·Y_n^m`. Exact, no singularity.
pub fn sph_harm_dphi<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> Complex64 {
    Complex64::new(0.0, f64::from(m)) * sf.sph_harm(n, m, colatitude, azimuth)
}

/// Phi derivative divided by sin θ, `(∂Y_n^m/∂φ)/sin θ`.
///
/// Zero for `m = 0`. The 1/sin θ is absorbed into an order-lowering
/// recurrence over `Y_{n-1}^{m∓1}`, so the result stays finite where the
/// literal quotient would be 0/0.
pub fn sph_harm_dphi_div_sin<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> Complex64 {
    if m == 0 || m.unsigned_abs() > n {
        return Complex64::zero();
    }
    let nf = f64::from(n);
    let mf = f64::from(m);
    let factor = 0.5 * ((2.0 * nf + 1.0) / (2.0 * nf - 1.0)).sqrt();
    let first = ((nf + mf) * (nf + mf - 1.0)).sqrt()
        * Complex64::from_polar(1.0, azimuth)
        * sf.sph_harm(n - 1, m - 1, colatitude, azimuth);
    let second = ((nf - mf) * (nf - mf - 1.0)).sqrt()
        * Complex64::from_polar(1.0, -azimuth)
        * sf.sph_harm(n - 1, m + 1, colatitude, azimuth);
    Complex64::new(0.0, -1.0) * factor * (first + second)
}

/// Theta derivative of the real-valued harmonic.
///
/// Same branch-then-normalize-then-phase construction as the real basis, with
/// the Legendre value replaced by its theta derivative, assembled from the
/// adjacent degrees `|m|∓1`.
pub fn sph_harm_dtheta_real<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> f64 {
    let mu = m.unsigned_abs();
    if n == 0 || mu > n {
        return 0.0;
    }
    let x = colatitude.cos();
    let nf = f64::from(n);
    let muf = f64::from(mu);
    let dp = if mu == 0 {
        -sf.legendre_p(n, 1, x)
    } else {
        0.5 * ((nf + muf) * (nf - muf + 1.0) * sf.legendre_p(n, mu as i32 - 1, x)
            - sf.legendre_p(n, mu as i32 + 1, x))
    };
    let norm = sph_harm_norm(sf, n, m);
    match m.cmp(&0) {
        Ordering::Equal => norm * dp,
        Ordering::Greater => norm * dp * (muf * azimuth).cos(),
        Ordering::Less => neg_one_pow(mu as i32 + 1) * norm * dp * (muf * azimuth).sin(),
    }
}

/// Phi derivative of the real-valued harmonic, divided by sin θ.
pub fn sph_harm_dphi_div_sin_real<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> f64 {
    let mu = m.unsigned_abs();
    if m == 0 || mu > n {
        return 0.0;
    }
    let x = colatitude.cos();
    let nf = f64::from(n);
    let muf = f64::from(mu);
    // |m|·P_n^|m| / sin θ, by the order-lowering identity.
    let base = 0.5
        * (sf.legendre_p(n - 1, mu as i32 + 1, x)
            + (nf + muf - 1.0) * (nf + muf) * sf.legendre_p(n - 1, mu as i32 - 1, x));
    let norm = sph_harm_norm(sf, n, m);
    if m > 0 {
        -norm * (muf * azimuth).sin() * base
    } else {
        neg_one_pow(mu as i32 + 1) * norm * (muf * azimuth).cos() * base
    }
}

/// Theta and phi gradient matrices of the complex basis, one pass per point.
///
/// The phi matrix holds the sin-θ-normalized derivative, not the bare one.
pub fn spherical_harmonic_basis_gradient<S: SpecialFunctions>(
    n_max: u32,
    colatitude: ArrayView1<f64>,
    azimuth: ArrayView1<f64>,
    sf: &S,
) -> SphResult<(Array2<Complex64>, Array2<Complex64>)> {
    check_directions(&colatitude, &azimuth)?;
    let shape = (colatitude.len(), n_coefficients(n_max));
    let mut grad_theta = Array2::zeros(shape);
    let mut grad_phi = Array2::zeros(shape);

    grad_theta
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(grad_phi.axis_iter_mut(Axis(0)).into_par_iter())
        .enumerate()
        .for_each(|(i, (mut theta_row, mut phi_row))| {
            let theta = colatitude[i];
            let phi = azimuth[i];
            for acn in 0..theta_row.len() {
                let (n, m) = acn_to_nm(acn);
                theta_row[acn] = sph_harm_dtheta(sf, n, m, theta, phi);
                phi_row[acn] = sph_harm_dphi_div_sin(sf, n, m, theta, phi);
            }
        });

    Ok((grad_theta, grad_phi))
}

/// Theta and phi gradient matrices of the real basis.
pub fn spherical_harmonic_basis_gradient_real<S: SpecialFunctions>(
    n_max: u32,
    colatitude: ArrayView1<f64>,
    azimuth: ArrayView1<f64>,
    sf: &S,
) -> SphResult<(Array2<f64>, Array2<f64>)> {
    check_directions(&colatitude, &azimuth)?;
    let shape = (colatitude.len(), n_coefficients(n_max));
    let mut grad_theta = Array2::zeros(shape);
    let mut grad_phi = Array2::zeros(shape);

    grad_theta
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(grad_phi.axis_iter_mut(Axis(0)).into_par_iter())
        .enumerate()
        .for_each(|(i, (mut theta_row, mut phi_row))| {
            let theta = colatitude[i];
            let phi = azimuth[i];
            for acn in 0..theta_row.len() {
                let (n, m) = acn_to_nm(acn);
                theta_row[acn] = sph_harm_dtheta_real(sf, n, m, theta, phi);
                phi_row[acn] = sph_harm_dphi_div_sin_real(sf, n, m, theta, phi);
            }
        });

    Ok((grad_theta, grad_phi))
}
