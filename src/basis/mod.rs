//! Spherical-harmonic basis matrices.
//!
//! Every builder takes a batch of directions (colatitude θ in `[0, π]`,
//! azimuth φ in `[0, 2π)`) and returns a dense `[n_points × (n_max+1)²]`
//! matrix whose columns follow ACN ordering. The builders are pure: all state
//! lives in the inputs and the returned matrix, and the rows are filled on the
//! rayon pool since every point is independent.

pub mod gradient;

use ndarray::{Array2, ArrayView1, Axis};
use num_complex::Complex64;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::f64::consts::SQRT_2;

use crate::error::{SphError, SphResult};
use crate::indexing::{acn_to_nm, n_coefficients};
use crate::special::{neg_one_pow, SpecialFunctions};

pub(crate) fn check_directions(
    colatitude: &ArrayView1<f64>,
    azimuth: &ArrayView1<f64>,
) -> SphResult<()> {
    if colatitude.len() != azimuth.len() {
        return Err(SphError::DirectionLengthMismatch {
            colatitude: colatitude.len(),
            azimuth: azimuth.len(),
        });
    }
    Ok(())
}

/// Real-valued spherical harmonic at a single direction.
///
/// Built from the real/imaginary components of the complex harmonic at `|m|`
/// in two normative steps: first the branch on the sign of `m` (`m = 0` keeps
/// the real part, `m > 0` scales the real part by √2, `m < 0` scales the
/// imaginary part by `√2·(-1)^(m+1)`), then a uniform `(-1)^m` on every entry.
/// Folding the two steps together flips the parity for odd negative `m`, so
/// they stay separate.
pub fn sph_harm_real<S: SpecialFunctions + ?Sized>(
    sf: &S,
    n: u32,
    m: i32,
    colatitude: f64,
    azimuth: f64,
) -> f64 {
    if m.unsigned_abs() > n {
        return 0.0;
    }
    let branch = match m.cmp(&0) {
        Ordering::Equal => sf.sph_harm_real_part(n, m, colatitude, azimuth),
        Ordering::Greater => SQRT_2 * sf.sph_harm_real_part(n, m, colatitude, azimuth),
        Ordering::Less => {
            SQRT_2 * sf.sph_harm_imag_part(n, m, colatitude, azimuth) * neg_one_pow(m + 1)
        }
    };
    branch * neg_one_pow(m)
}

/// Complex spherical-harmonic basis matrix up to order `n_max`.
///
/// Entry `(i, acn)` is `Y_n^m(θ_i, φ_i)` for the order/degree decoded from the
/// ACN column index.
pub fn spherical_harmonic_basis<S: SpecialFunctions>(
    n_max: u32,
    colatitude: ArrayView1<f64>,
    azimuth: ArrayView1<f64>,
    sf: &S,
) -> SphResult<Array2<Complex64>> {
    check_directions(&colatitude, &azimuth)?;
    let mut basis = Array2::zeros((colatitude.len(), n_coefficients(n_max)));

    basis
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let theta = colatitude[i];
            let phi = azimuth[i];
            for (acn, entry) in row.iter_mut().enumerate() {
                let (n, m) = acn_to_nm(acn);
                *entry = sf.sph_harm(n, m, theta, phi);
            }
        });

    Ok(basis)
}

/// Real-valued spherical-harmonic basis matrix up to order `n_max`.
pub fn spherical_harmonic_basis_real<S: SpecialFunctions>(
    n_max: u32,
    colatitude: ArrayView1<f64>,
    azimuth: ArrayView1<f64>,
    sf: &S,
) -> SphResult<Array2<f64>> {
    check_directions(&colatitude, &azimuth)?;
    let mut basis = Array2::zeros((colatitude.len(), n_coefficients(n_max)));

    basis
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let theta = colatitude[i];
            let phi = azimuth[i];
            for (acn, entry) in row.iter_mut().enumerate() {
                let (n, m) = acn_to_nm(acn);
                *entry = sph_harm_real(sf, n, m, theta, phi);
            }
        });

    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::RecurrenceBackend;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use std::f64::consts::{FRAC_PI_2, PI};

    const SF: RecurrenceBackend = RecurrenceBackend;

    fn test_directions() -> (Array1<f64>, Array1<f64>) {
        let colatitude = Array1::from(vec![0.3, FRAC_PI_2, 1.9, 2.8]);
        let azimuth = Array1::from(vec![0.0, 0.7, 3.1, 5.5]);
        (colatitude, azimuth)
    }

    #[test]
    fn basis_shape() {
        let (theta, phi) = test_directions();
        for n_max in [0u32, 1, 4, 7] {
            let y = spherical_harmonic_basis(n_max, theta.view(), phi.view(), &SF).unwrap();
            assert_eq!(y.dim(), (4, ((n_max + 1) * (n_max + 1)) as usize));
            let yr = spherical_harmonic_basis_real(n_max, theta.view(), phi.view(), &SF).unwrap();
            assert_eq!(yr.dim(), y.dim());
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let theta = Array1::from(vec![0.1, 0.2]);
        let phi = Array1::from(vec![0.3]);
        let err = spherical_harmonic_basis(2, theta.view(), phi.view(), &SF).unwrap_err();
        assert!(matches!(
            err,
            SphError::DirectionLengthMismatch {
                colatitude: 2,
                azimuth: 1
            }
        ));
        assert!(spherical_harmonic_basis_real(2, theta.view(), phi.view(), &SF).is_err());
    }

    #[test]
    fn order_zero_is_constant() {
        // Single direction (π/2, 0): the order-0 basis is the 1x1 matrix
        // [1/√(4π)] in both variants.
        let theta = Array1::from(vec![FRAC_PI_2]);
        let phi = Array1::from(vec![0.0]);
        let y = spherical_harmonic_basis(0, theta.view(), phi.view(), &SF).unwrap();
        assert_relative_eq!(y[[0, 0]].re, 1.0 / (4.0 * PI).sqrt(), max_relative = 1e-13);
        assert_relative_eq!(y[[0, 0]].im, 0.0);
        let yr = spherical_harmonic_basis_real(0, theta.view(), phi.view(), &SF).unwrap();
        assert_relative_eq!(yr[[0, 0]], y[[0, 0]].re, max_relative = 1e-13);
    }

    #[test]
    fn real_equals_complex_real_part_for_zonal_terms() {
        // For m = 0 both variants reduce to the same zonal term, exactly.
        let (theta, phi) = test_directions();
        let y = spherical_harmonic_basis(5, theta.view(), phi.view(), &SF).unwrap();
        let yr = spherical_harmonic_basis_real(5, theta.view(), phi.view(), &SF).unwrap();
        for i in 0..theta.len() {
            for acn in 0..y.ncols() {
                let (_, m) = acn_to_nm(acn);
                if m == 0 {
                    assert_eq!(yr[[i, acn]], y[[i, acn]].re);
                }
            }
        }
    }

    #[test]
    fn gram_matrix_is_identity_on_dense_grid() {
        // Midpoint quadrature on a 64x128 grid integrates products of order-4
        // harmonics essentially exactly; the weighted Gram matrix of the basis
        // must be the identity to well below 1e-3.
        let n_theta = 64;
        let n_phi = 128;
        let mut theta = Vec::with_capacity(n_theta * n_phi);
        let mut phi = Vec::with_capacity(n_theta * n_phi);
        let mut weights = Vec::with_capacity(n_theta * n_phi);
        for it in 0..n_theta {
            let t = (it as f64 + 0.5) * PI / n_theta as f64;
            let w = t.sin() * (PI / n_theta as f64) * (2.0 * PI / n_phi as f64);
            for ip in 0..n_phi {
                theta.push(t);
                phi.push((ip as f64 + 0.5) * 2.0 * PI / n_phi as f64);
                weights.push(w);
            }
        }
        let theta = Array1::from(theta);
        let phi = Array1::from(phi);

        let y = spherical_harmonic_basis(4, theta.view(), phi.view(), &SF).unwrap();
        let n_coeff = y.ncols();
        for p in 0..n_coeff {
            for q in 0..n_coeff {
                let mut acc = Complex64::new(0.0, 0.0);
                for (i, w) in weights.iter().enumerate() {
                    acc += y[[i, p]].conj() * y[[i, q]] * *w;
                }
                let expected = if p == q { 1.0 } else { 0.0 };
                assert!(
                    (acc.re - expected).abs() < 1e-3 && acc.im.abs() < 1e-3,
                    "gram[{p}][{q}] = {acc}"
                );
            }
        }

        // The real basis is orthonormal under the same weights.
        let yr = spherical_harmonic_basis_real(4, theta.view(), phi.view(), &SF).unwrap();
        for p in 0..n_coeff {
            for q in p..n_coeff {
                let mut acc = 0.0;
                for (i, w) in weights.iter().enumerate() {
                    acc += yr[[i, p]] * yr[[i, q]] * *w;
                }
                let expected = if p == q { 1.0 } else { 0.0 };
                assert!((acc - expected).abs() < 1e-3, "real gram[{p}][{q}] = {acc}");
            }
        }
    }

    #[test]
    fn basis_rows_match_point_evaluators_at_random_directions() {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(31);
        let theta = Array1::from_iter((0..32).map(|_| rng.gen_range(0.0..PI)));
        let phi = Array1::from_iter((0..32).map(|_| rng.gen_range(0.0..2.0 * PI)));

        let y = spherical_harmonic_basis(3, theta.view(), phi.view(), &SF).unwrap();
        let yr = spherical_harmonic_basis_real(3, theta.view(), phi.view(), &SF).unwrap();
        for i in 0..theta.len() {
            for acn in 0..y.ncols() {
                let (n, m) = acn_to_nm(acn);
                assert_eq!(y[[i, acn]], SF.sph_harm(n, m, theta[i], phi[i]));
                assert_eq!(yr[[i, acn]], sph_harm_real(&SF, n, m, theta[i], phi[i]));
            }
        }
    }

    #[test]
    fn real_basis_first_order_lobes() {
        // (1, 1) points along +x, (1, -1) along +y, (1, 0) along +z, each with
        // the N3D peak value √(3/4π).
        let peak = (3.0 / (4.0 * PI)).sqrt();
        let x_dir = sph_harm_real(&SF, 1, 1, FRAC_PI_2, 0.0);
        let y_dir = sph_harm_real(&SF, 1, -1, FRAC_PI_2, FRAC_PI_2);
        let z_dir = sph_harm_real(&SF, 1, 0, 0.0, 0.0);
        assert_relative_eq!(x_dir, peak, max_relative = 1e-12);
        assert_relative_eq!(y_dir, peak, max_relative = 1e-12);
        assert_relative_eq!(z_dir, peak, max_relative = 1e-12);
    }
}
