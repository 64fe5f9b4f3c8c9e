//! Python bindings (feature `python`).
//!
//! Thin numpy wrappers over the library functions; the GIL is released while
//! the matrices fill.

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::error::SphError;
use crate::operators::{ArrayConfiguration, DENSITY_OF_AIR, SPEED_OF_SOUND};
use crate::special::RecurrenceBackend;

impl From<SphError> for PyErr {
    fn from(err: SphError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
fn spharray(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DENSITY_OF_AIR", DENSITY_OF_AIR)?;
    m.add("SPEED_OF_SOUND", SPEED_OF_SOUND)?;
    m.add_function(wrap_pyfunction!(nm_to_acn, m)?)?;
    m.add_function(wrap_pyfunction!(acn_to_nm, m)?)?;
    m.add_function(wrap_pyfunction!(sid_to_acn, m)?)?;
    m.add_function(wrap_pyfunction!(n_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(spherical_harmonic_basis, m)?)?;
    m.add_function(wrap_pyfunction!(spherical_harmonic_basis_real, m)?)?;
    m.add_function(wrap_pyfunction!(spherical_harmonic_basis_gradient, m)?)?;
    m.add_function(wrap_pyfunction!(spherical_harmonic_basis_gradient_real, m)?)?;
    m.add_function(wrap_pyfunction!(modal_strength, m)?)?;
    m.add_function(wrap_pyfunction!(aperture_vibrating_spherical_cap, m)?)?;
    m.add_function(wrap_pyfunction!(radiation_from_sphere, m)?)?;
    Ok(())
}

#[pyfunction]
fn nm_to_acn(n: u32, m: i32) -> usize {
    crate::indexing::nm_to_acn(n, m)
}

#[pyfunction]
fn acn_to_nm(acn: usize) -> (u32, i32) {
    crate::indexing::acn_to_nm(acn)
}

#[pyfunction]
fn sid_to_acn(n_max: u32) -> Vec<usize> {
    crate::indexing::sid_to_acn(n_max)
}

#[pyfunction]
fn n_coefficients(n_max: u32) -> usize {
    crate::indexing::n_coefficients(n_max)
}

#[pyfunction]
fn spherical_harmonic_basis<'py>(
    py: Python<'py>,
    n_max: u32,
    colatitude: PyReadonlyArray1<f64>,
    azimuth: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray2<Complex64>> {
    let theta = colatitude.as_array();
    let phi = azimuth.as_array();
    let basis = py.allow_threads(|| {
        crate::basis::spherical_harmonic_basis(n_max, theta, phi, &RecurrenceBackend)
    })?;
    Ok(basis.into_pyarray(py))
}

#[pyfunction]
fn spherical_harmonic_basis_real<'py>(
    py: Python<'py>,
    n_max: u32,
    colatitude: PyReadonlyArray1<f64>,
    azimuth: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray2<f64>> {
    let theta = colatitude.as_array();
    let phi = azimuth.as_array();
    let basis = py.allow_threads(|| {
        crate::basis::spherical_harmonic_basis_real(n_max, theta, phi, &RecurrenceBackend)
    })?;
    Ok(basis.into_pyarray(py))
}

#[pyfunction]
fn spherical_harmonic_basis_gradient<'py>(
    py: Python<'py>,
    n_max: u32,
    colatitude: PyReadonlyArray1<f64>,
    azimuth: PyReadonlyArray1<f64>,
) -> PyResult<(&'py PyArray2<Complex64>, &'py PyArray2<Complex64>)> {
    let theta = colatitude.as_array();
    let phi = azimuth.as_array();
    let (grad_theta, grad_phi) = py.allow_threads(|| {
        crate::basis::gradient::spherical_harmonic_basis_gradient(
            n_max,
            theta,
            phi,
            &RecurrenceBackend,
        )
    })?;
    Ok((grad_theta.into_pyarray(py), grad_phi.into_pyarray(py)))
}

#[pyfunction]
fn spherical_harmonic_basis_gradient_real<'py>(
    py: Python<'py>,
    n_max: u32,
    colatitude: PyReadonlyArray1<f64>,
    azimuth: PyReadonlyArray1<f64>,
) -> PyResult<(&'py PyArray2<f64>, &'py PyArray2<f64>)> {
    let theta = colatitude.as_array();
    let phi = azimuth.as_array();
    let (grad_theta, grad_phi) = py.allow_threads(|| {
        crate::basis::gradient::spherical_harmonic_basis_gradient_real(
            n_max,
            theta,
            phi,
            &RecurrenceBackend,
        )
    })?;
    Ok((grad_theta.into_pyarray(py), grad_phi.into_pyarray(py)))
}

#[pyfunction]
#[pyo3(signature = (n_max, kr, arraytype = "open"))]
fn modal_strength<'py>(
    py: Python<'py>,
    n_max: u32,
    kr: PyReadonlyArray1<f64>,
    arraytype: &str,
) -> PyResult<&'py PyArray3<Complex64>> {
    let config: ArrayConfiguration = arraytype.parse()?;
    let kr = kr.as_array();
    let b = py
        .allow_threads(|| crate::operators::modal_strength(n_max, kr, config, &RecurrenceBackend));
    Ok(b.into_pyarray(py))
}

#[pyfunction]
fn aperture_vibrating_spherical_cap<'py>(
    py: Python<'py>,
    n_max: u32,
    rad_sphere: f64,
    rad_cap: f64,
) -> PyResult<&'py PyArray2<f64>> {
    let a = crate::operators::aperture_vibrating_spherical_cap(
        n_max,
        rad_sphere,
        rad_cap,
        &RecurrenceBackend,
    )?;
    Ok(a.into_pyarray(py))
}

#[pyfunction]
#[pyo3(signature = (n_max, rad_sphere, k, distance, density = DENSITY_OF_AIR, speed_of_sound = SPEED_OF_SOUND))]
fn radiation_from_sphere<'py>(
    py: Python<'py>,
    n_max: u32,
    rad_sphere: f64,
    k: PyReadonlyArray1<f64>,
    distance: f64,
    density: f64,
    speed_of_sound: f64,
) -> PyResult<&'py PyArray3<Complex64>> {
    let k = k.as_array();
    let r = py.allow_threads(|| {
        crate::operators::radiation_from_sphere(
            n_max,
            rad_sphere,
            k,
            distance,
            density,
            speed_of_sound,
            &RecurrenceBackend,
        )
    });
    Ok(r.into_pyarray(py))
}
