//! Spherical Bessel, Neumann and Hankel functions.
//!
//! `j_n` uses the upward three-term recurrence above the turning point
//! (`x > n`, where it is stable) and Miller's normalized downward recurrence
//! below it. `y_n` is always stable upward. The second-kind Hankel function is
//! assembled as `h_n⁽²⁾ = j_n - i·y_n`.

use num_complex::Complex64;

const MILLER_TINY: f64 = 1e-30;
const RESCALE_THRESHOLD: f64 = 1e100;

/// Spherical Bessel function of the first kind `j_n(x)`.
pub fn sph_bessel(n: u32, x: f64) -> f64 {
    if x == 0.0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }
    let j0 = x.sin() / x;
    if n == 0 {
        return j0;
    }
    let j1 = x.sin() / (x * x) - x.cos() / x;
    if n == 1 {
        return j1;
    }

    if x > n as f64 {
        let (mut prev, mut curr) = (j0, j1);
        for k in 1..n {
            let next = (2.0 * k as f64 + 1.0) / x * curr - prev;
            prev = curr;
            curr = next;
        }
        return curr;
    }

    // Miller's algorithm: recurse downward from well above n with an arbitrary
    // seed, then normalize against the directly computed j_0.
    let start = n + 16 + (1.5 * x) as u32;
    let mut above = 0.0f64;
    let mut curr = MILLER_TINY;
    let mut at_n = 0.0;
    for k in (1..=start).rev() {
        let below = (2.0 * k as f64 + 1.0) / x * curr - above;
        above = curr;
        curr = below;
        if k - 1 == n {
            at_n = curr;
        }
        if curr.abs() > RESCALE_THRESHOLD {
            curr /= RESCALE_THRESHOLD;
            above /= RESCALE_THRESHOLD;
            at_n /= RESCALE_THRESHOLD;
        }
    }
    at_n * (j0 / curr)
}

/// Derivative `j_n'(x)`, from `j_n' = j_{n-1} - (n+1)/x · j_n`.
pub fn sph_bessel_prime(n: u32, x: f64) -> f64 {
    if x == 0.0 {
        return match n {
            0 => 0.0,
            1 => 1.0 / 3.0,
            _ => 0.0,
        };
    }
    if n == 0 {
        return -sph_bessel(1, x);
    }
    sph_bessel(n - 1, x) - (n as f64 + 1.0) / x * sph_bessel(n, x)
}

/// Spherical Neumann function `y_n(x)`, `x > 0`.
pub fn sph_neumann(n: u32, x: f64) -> f64 {
    let y0 = -x.cos() / x;
    if n == 0 {
        return y0;
    }
    let y1 = -x.cos() / (x * x) - x.sin() / x;
    if n == 1 {
        return y1;
    }
    let (mut prev, mut curr) = (y0, y1);
    for k in 1..n {
        let next = (2.0 * k as f64 + 1.0) / x * curr - prev;
        prev = curr;
        curr = next;
    }
    curr
}

/// Derivative `y_n'(x)`.
pub fn sph_neumann_prime(n: u32, x: f64) -> f64 {
    if n == 0 {
        return -sph_neumann(1, x);
    }
    sph_neumann(n - 1, x) - (n as f64 + 1.0) / x * sph_neumann(n, x)
}

/// Spherical Hankel function of the second kind, `h_n⁽²⁾(x) = j_n(x) - i·y_n(x)`.
pub fn sph_hankel_2(n: u32, x: f64) -> Complex64 {
    Complex64::new(sph_bessel(n, x), -sph_neumann(n, x))
}

/// Derivative of the second-kind spherical Hankel function.
pub fn sph_hankel_2_prime(n: u32, x: f64) -> Complex64 {
    Complex64::new(sph_bessel_prime(n, x), -sph_neumann_prime(n, x))
}
