// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mandelbulb power map
//!
//! Raising a point to the p-th power in spherical coordinates: the radius
//! goes to r^p and both angles are multiplied by p. Iterating
//! `z <- z^p + c` gives the 3D analog of the Mandelbrot recurrence.

use crate::params::FractalParams;
use nalgebra::Vector3;

/// Raise `v` to the power `p` in spherical coordinates.
///
/// The polar angle is measured from +Z (`atan2(|xy|, z)`) and the azimuth
/// around Z (`atan2(y, x)`). The origin maps to itself.
#[inline]
pub fn power_map(v: &Vector3<f64>, p: u32) -> Vector3<f64> {
    // Angles are undefined at the origin
    if *v == Vector3::zeros() {
        return Vector3::zeros();
    }

    let r = v.norm();
    let polar = v.x.hypot(v.y).atan2(v.z);
    let azimuth = v.y.atan2(v.x);

    let p = p as f64;
    let (sin_polar, cos_polar) = (p * polar).sin_cos();
    let (sin_azimuth, cos_azimuth) = (p * azimuth).sin_cos();

    Vector3::new(
        sin_polar * cos_azimuth,
        sin_polar * sin_azimuth,
        cos_polar,
    ) * r.powf(p)
}

/// Iterate `z <- power_map(z, p) + v` from `z = 0`.
///
/// The loop counts down from `iterations` to zero inclusive, so the map is
/// applied `iterations + 1` times. With one iteration this gives
/// `v^p + v`.
pub fn iterate(v: &Vector3<f64>, p: u32, iterations: u32) -> Vector3<f64> {
    let mut z = Vector3::zeros();
    for _ in (0..=iterations).rev() {
        z = power_map(&z, p) + v;
    }
    z
}

/// Magnitude of the iterated point, compared against the boundary
#[inline]
pub fn escape_magnitude(v: &Vector3<f64>, params: &FractalParams) -> f64 {
    iterate(v, params.power, params.iterations).norm()
}
