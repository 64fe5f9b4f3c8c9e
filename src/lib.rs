//! spharray - spherical-harmonic basis matrices and acoustic transfer
//! operators for spherical microphone/loudspeaker array processing.
//!
//! Given a batch of sampling directions and a maximum order, the crate builds
//! dense complex and real N3D basis matrices, their angular derivatives, and
//! the frequency-dependent diagonal operators (modal strength, aperture,
//! radiation) used in Ambisonics-style array pipelines. All builders are pure
//! functions over their inputs, consume special functions through the
//! injectable [`SpecialFunctions`](special::SpecialFunctions) trait, and fill
//! their output rows on the rayon pool.
//!
//! ```
//! use ndarray::Array1;
//! use spharray::{spherical_harmonic_basis, RecurrenceBackend};
//!
//! let colatitude = Array1::from(vec![std::f64::consts::FRAC_PI_2]);
//! let azimuth = Array1::from(vec![0.0]);
//! let y = spherical_harmonic_basis(2, colatitude.view(), azimuth.view(), &RecurrenceBackend)
//!     .unwrap();
//! assert_eq!(y.dim(), (1, 9));
//! ```

pub mod basis;
pub mod error;
pub mod indexing;
pub mod operators;
pub mod special;

#[cfg(feature = "python")]
mod bindings;

pub use basis::gradient::{
    sph_harm_dphi, sph_harm_dphi_div_sin, sph_harm_dphi_div_sin_real, sph_harm_dtheta,
    sph_harm_dtheta_real, spherical_harmonic_basis_gradient,
    spherical_harmonic_basis_gradient_real,
};
pub use basis::{sph_harm_real, spherical_harmonic_basis, spherical_harmonic_basis_real};
pub use error::{SphError, SphResult};
pub use indexing::{acn_to_nm, n_coefficients, nm_to_acn, sid, sid_to_acn};
pub use operators::{
    aperture_vibrating_spherical_cap, modal_strength, radiation_from_sphere,
    radiation_from_sphere_in_air, ArrayConfiguration, DENSITY_OF_AIR, SPEED_OF_SOUND,
};
pub use special::{sph_harm_norm, RecurrenceBackend, SpecialFunctions};
