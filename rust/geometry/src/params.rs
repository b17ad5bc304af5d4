// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation parameters
//!
//! Parameters are plain immutable values. A caller that wants different
//! output builds a new set and runs generation again from the seed.

use crate::error::{Error, Result};

/// Default escape threshold for the boundary search
pub const DEFAULT_BOUNDARY: f64 = 1000.0;
/// Default tolerance on `|escape - boundary|`
pub const DEFAULT_TOLERANCE: f64 = 0.05;
/// Default first step of the radial search
pub const DEFAULT_INITIAL_STEP: f64 = 0.1;
/// Default step cap for a single vertex search
pub const DEFAULT_MAX_STEPS: u32 = 256;
/// Default vertex budget (3 subdivision rounds, 642 vertices)
pub const DEFAULT_VERTEX_BUDGET: usize = 2562;

/// Parameters of the iterated power map and the boundary search
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FractalParams {
    /// Exponent of the power map (8 gives the classic bulb)
    pub power: u32,
    /// Iteration count; 0 leaves the sphere undeformed
    pub iterations: u32,
    /// Escape magnitude the search converges on
    pub boundary: f64,
    /// Accepted distance between escape magnitude and boundary
    pub tolerance: f64,
    /// Radial distance of the first search step
    pub initial_step: f64,
    /// Search steps allowed per vertex before giving up
    pub max_steps: u32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            power: 8,
            iterations: 1,
            boundary: DEFAULT_BOUNDARY,
            tolerance: DEFAULT_TOLERANCE,
            initial_step: DEFAULT_INITIAL_STEP,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl FractalParams {
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_boundary(mut self, boundary: f64) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// True when the mesh should stay an undeformed sphere
    #[inline]
    pub fn is_sphere(&self) -> bool {
        self.iterations == 0
    }

    /// Reject values the boundary search cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.power < 1 {
            return Err(Error::invalid(format!("power must be >= 1, got {}", self.power)));
        }
        if !self.boundary.is_finite() || self.boundary <= 0.0 {
            return Err(Error::invalid(format!(
                "boundary must be a positive finite number, got {}",
                self.boundary
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::invalid(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err(Error::invalid(format!(
                "initial step must be a positive finite number, got {}",
                self.initial_step
            )));
        }
        if self.max_steps == 0 {
            return Err(Error::invalid("max steps must be at least 1"));
        }
        Ok(())
    }
}

/// How face normals are combined into vertex normals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NormalWeighting {
    /// Each new face normal is averaged with the running value (order dependent)
    #[default]
    RunningAverage,
    /// Unnormalized cross products are summed, so larger faces weigh more
    AreaWeighted,
}

/// Everything one generation run needs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MeshParams {
    /// Target vertex count for the icosphere
    pub vertex_budget: usize,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fractal: FractalParams,
    pub normal_weighting: NormalWeighting,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            vertex_budget: DEFAULT_VERTEX_BUDGET,
            fractal: FractalParams::default(),
            normal_weighting: NormalWeighting::default(),
        }
    }
}

impl MeshParams {
    pub fn new(vertex_budget: usize, fractal: FractalParams) -> Self {
        Self {
            vertex_budget,
            fractal,
            normal_weighting: NormalWeighting::default(),
        }
    }

    pub fn with_normal_weighting(mut self, weighting: NormalWeighting) -> Self {
        self.normal_weighting = weighting;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // Budgets below the seed size fall back to the seed, so only the
        // upper end needs checking (see icosphere::subdivision_depth).
        crate::icosphere::check_budget(self.vertex_budget)?;
        self.fractal.validate()
    }
}
