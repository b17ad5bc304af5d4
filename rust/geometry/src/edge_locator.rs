// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radial boundary search
//!
//! Walks a vertex along its ray from the origin until the escape magnitude
//! of the iterated power map sits within tolerance of the boundary. The walk
//! takes fixed steps until it first crosses the boundary, then halves the
//! step after every move, which brackets the crossing like a bisection.

use crate::error::{Error, Result};
use crate::mesh::normalize_or_zero;
use crate::params::FractalParams;
use crate::power_map::escape_magnitude;
use nalgebra::Vector3;

/// Seed vertices are pulled in by this factor before searching so that the
/// iterated magnitudes stay in a range f64 resolves well.
pub const SEARCH_SCALE: f64 = 0.5;

/// Outcome of one vertex search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSearch {
    /// Adjusted vertex; the best position seen when not converged
    pub position: Vector3<f64>,
    /// Escape magnitude at `position`
    pub escape: f64,
    /// Radial moves made
    pub steps: u32,
    /// Whether `|escape - boundary| < tolerance` was reached
    pub converged: bool,
}

impl EdgeSearch {
    /// Distance between the escape magnitude and the boundary
    #[inline]
    pub fn error(&self, params: &FractalParams) -> f64 {
        (self.escape - params.boundary).abs()
    }
}

/// Move `vertex` onto the fractal boundary along its radial direction.
///
/// Never fails: when `max_steps` runs out the closest position found so far
/// is returned with `converged == false`.
pub fn locate_edge(vertex: &Vector3<f64>, params: &FractalParams) -> EdgeSearch {
    let mut v = vertex * SEARCH_SCALE;
    let direction = normalize_or_zero(&v);
    let mut radius = v.norm();

    let mut push = params.initial_step;
    let mut inside: Option<bool> = None;
    let mut switched = false;

    let mut best = EdgeSearch {
        position: v,
        escape: f64::NAN,
        steps: 0,
        converged: false,
    };
    let mut best_error = f64::INFINITY;
    let mut moves = 0;

    for steps in 0..=params.max_steps {
        let escape = escape_magnitude(&v, params);
        let error = (escape - params.boundary).abs();

        if error < params.tolerance {
            return EdgeSearch {
                position: v,
                escape,
                steps,
                converged: true,
            };
        }
        // NaN errors never beat the current best
        if error < best_error || steps == 0 {
            best_error = error;
            best.position = v;
            best.escape = escape;
        }
        if steps == params.max_steps || direction == Vector3::zeros() {
            break;
        }

        // NaN escapes count as outside and pull the vertex back in
        let now_inside = escape < params.boundary;
        if inside.is_some_and(|was_inside| was_inside != now_inside) {
            switched = true;
        }
        inside = Some(now_inside);

        radius = if now_inside {
            radius + push
        } else if radius > push {
            radius - push
        } else {
            // Never step through the origin
            radius * 0.5
        };
        v = direction * radius;
        moves += 1;

        if switched {
            push *= 0.5;
        }
    }

    best.steps = moves;
    best
}

/// Like [`locate_edge`], but a search that runs out of steps is an error
pub fn locate_edge_strict(vertex: &Vector3<f64>, params: &FractalParams) -> Result<EdgeSearch> {
    let search = locate_edge(vertex, params);
    if search.converged {
        Ok(search)
    } else {
        Err(Error::NonConvergence {
            steps: params.max_steps,
            best_error: search.error(params),
        })
    }
}
