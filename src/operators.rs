//! Frequency-dependent diagonal operators.
//!
//! Modal strength, aperture and radiation operators all share one structure:
//! a coefficient-indexed diagonal matrix whose entry depends only on the
//! decoded order `n`, never on the degree: every `m` of one order receives
//! the identical scalar, reflecting the rotational symmetry of the physical
//! effect. The frequency-dependent operators return one diagonal block per
//! bin, `[n_bins × n_coeff × n_coeff]`; bins fill in parallel.

use ndarray::{Array2, Array3, ArrayView1, Axis};
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;
use std::str::FromStr;

use crate::error::{SphError, SphResult};
use crate::indexing::{n_coefficients, nm_to_acn};
use crate::special::SpecialFunctions;

/// Density of air at 20 °C in kg/m³.
pub const DENSITY_OF_AIR: f64 = 1.2;
/// Speed of sound in air at 20 °C in m/s.
pub const SPEED_OF_SOUND: f64 = 343.0;

/// Sphere configuration of a microphone array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayConfiguration {
    /// Microphones on an open (acoustically transparent) frame
    Open,
    /// Microphones flush-mounted on a rigid scattering sphere
    Rigid,
    /// Open sphere of cardioid capsules
    Cardioid,
}

impl FromStr for ArrayConfiguration {
    type Err = SphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "rigid" => Ok(Self::Rigid),
            "cardioid" => Ok(Self::Cardioid),
            other => Err(SphError::UnknownArrayType(other.to_string())),
        }
    }
}

/// `i^k` for signed exponents.
#[inline]
fn i_pow(k: i64) -> Complex64 {
    match k.rem_euclid(4) {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

fn modal_strength_order<S: SpecialFunctions + ?Sized>(
    n: u32,
    kr: f64,
    config: ArrayConfiguration,
    sf: &S,
) -> Complex64 {
    match config {
        ArrayConfiguration::Open => 4.0 * PI * i_pow(i64::from(n)) * sf.sph_bessel(n, kr),
        ArrayConfiguration::Rigid => {
            // Second-kind Hankel by convention; swapping in the first kind
            // flips the sign of the scattered term.
            4.0 * PI * i_pow(i64::from(n) - 1) / (kr * kr * sf.sph_hankel_2_prime(n, kr))
        }
        ArrayConfiguration::Cardioid => {
            4.0 * PI
                * i_pow(i64::from(n))
                * Complex64::new(sf.sph_bessel(n, kr), -sf.sph_bessel_prime(n, kr))
        }
    }
}

/// Modal strength `b_n(kr)` of a spherical array, one diagonal block per bin.
///
/// Open: `4π iⁿ jₙ(kr)`; rigid: `4π iⁿ⁻¹ / ((kr)² h⁽²⁾ₙ′(kr))`;
/// cardioid: `4π iⁿ (jₙ(kr) - i·jₙ′(kr))`.
pub fn modal_strength<S: SpecialFunctions>(
    n_max: u32,
    kr: ArrayView1<f64>,
    config: ArrayConfiguration,
    sf: &S,
) -> Array3<Complex64> {
    let n_coeff = n_coefficients(n_max);
    let mut result = Array3::zeros((kr.len(), n_coeff, n_coeff));

    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(b, mut block)| {
            for n in 0..=n_max {
                let bn = modal_strength_order(n, kr[b], config, sf);
                for m in -(n as i32)..=(n as i32) {
                    let acn = nm_to_acn(n, m);
                    block[[acn, acn]] = bn;
                }
            }
        });

    result
}

/// Aperture function of a vibrating spherical cap on a rigid sphere.
///
/// Frequency independent, so a single diagonal block. The cap half-angle is
/// `α = asin(rad_cap / rad_sphere)`; radii outside `0 ≤ rad_cap ≤ rad_sphere`
/// (with a positive sphere) are a domain error, not a clamped value.
pub fn aperture_vibrating_spherical_cap<S: SpecialFunctions>(
    n_max: u32,
    rad_sphere: f64,
    rad_cap: f64,
    sf: &S,
) -> SphResult<Array2<f64>> {
    if rad_sphere <= 0.0 || !(0.0..=rad_sphere).contains(&rad_cap) {
        return Err(SphError::Domain(format!(
            "cap radius {rad_cap} outside [0, {rad_sphere}]"
        )));
    }
    let cos_alpha = (rad_cap / rad_sphere).asin().cos();

    let orders: Vec<f64> = (0..=n_max)
        .into_par_iter()
        .map(|n| {
            if n == 0 {
                (1.0 - cos_alpha) * 2.0 * PI * PI
            } else {
                (sf.legendre_p(n - 1, 0, cos_alpha) - sf.legendre_p(n + 1, 0, cos_alpha))
                    * 4.0
                    * PI
                    * PI
                    / (2.0 * f64::from(n) + 1.0)
            }
        })
        .collect();

    let n_coeff = n_coefficients(n_max);
    let mut result = Array2::zeros((n_coeff, n_coeff));
    for n in 0..=n_max {
        for m in -(n as i32)..=(n as i32) {
            let acn = nm_to_acn(n, m);
            result[[acn, acn]] = orders[n as usize];
        }
    }
    Ok(result)
}

/// Radiation function of a sphere with radius `rad_sphere` evaluated at
/// `distance`, one diagonal block per wavenumber bin:
/// `h⁽²⁾ₙ(k·distance) / h⁽²⁾ₙ′(k·rad_sphere) · i·ρ·c`.
pub fn radiation_from_sphere<S: SpecialFunctions>(
    n_max: u32,
    rad_sphere: f64,
    k: ArrayView1<f64>,
    distance: f64,
    density: f64,
    speed_of_sound: f64,
    sf: &S,
) -> Array3<Complex64> {
    let n_coeff = n_coefficients(n_max);
    let mut result = Array3::zeros((k.len(), n_coeff, n_coeff));
    let rho_c = Complex64::new(0.0, density * speed_of_sound);

    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(b, mut block)| {
            for n in 0..=n_max {
                let hn = sf.sph_hankel_2(n, k[b] * distance);
                let hn_prime = sf.sph_hankel_2_prime(n, k[b] * rad_sphere);
                let value = hn / hn_prime * rho_c;
                for m in -(n as i32)..=(n as i32) {
                    let acn = nm_to_acn(n, m);
                    block[[acn, acn]] = value;
                }
            }
        });

    result
}

/// [`radiation_from_sphere`] with the medium fixed to air at 20 °C.
pub fn radiation_from_sphere_in_air<S: SpecialFunctions>(
    n_max: u32,
    rad_sphere: f64,
    k: ArrayView1<f64>,
    distance: f64,
    sf: &S,
) -> Array3<Complex64> {
    radiation_from_sphere(n_max, rad_sphere, k, distance, DENSITY_OF_AIR, SPEED_OF_SOUND, sf)
}
