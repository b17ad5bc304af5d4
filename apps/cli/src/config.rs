// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator configuration loaded from environment variables.

use mandelmesh_processing::{FractalParams, MeshParams, NormalWeighting};
use std::str::FromStr;

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mesh and fractal parameters for the run.
    pub params: MeshParams,
    /// Output path for the JSON document (stdout when unset).
    pub output: Option<String>,
    /// Emit logs as JSON lines instead of pretty text.
    pub log_json: bool,
    /// Number of worker threads for the boundary search.
    pub worker_threads: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = FractalParams::default();
        let fractal = FractalParams {
            power: parse_var(&lookup, "MANDELMESH_POWER").unwrap_or(defaults.power),
            iterations: parse_var(&lookup, "MANDELMESH_ITERATIONS").unwrap_or(defaults.iterations),
            boundary: parse_var(&lookup, "MANDELMESH_BOUNDARY").unwrap_or(defaults.boundary),
            tolerance: parse_var(&lookup, "MANDELMESH_TOLERANCE").unwrap_or(defaults.tolerance),
            initial_step: parse_var(&lookup, "MANDELMESH_INITIAL_STEP").unwrap_or(defaults.initial_step),
            max_steps: parse_var(&lookup, "MANDELMESH_MAX_STEPS").unwrap_or(defaults.max_steps),
        };

        let normal_weighting = lookup("MANDELMESH_NORMALS")
            .and_then(|value| parse_weighting(&value))
            .unwrap_or_default();

        let params = MeshParams {
            vertex_budget: parse_var(&lookup, "MANDELMESH_VERTEX_BUDGET")
                .unwrap_or(MeshParams::default().vertex_budget),
            fractal,
            normal_weighting,
        };

        Self {
            params,
            output: lookup("MANDELMESH_OUTPUT")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s != "-"),
            log_json: lookup("MANDELMESH_LOG_FORMAT")
                .map(|s| s.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            worker_threads: parse_var(&lookup, "WORKER_THREADS")
                .filter(|&n: &usize| n > 0)
                .unwrap_or_else(num_cpus::get),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

/// Accepts `running` / `running-average` and `area` / `area-weighted`.
fn parse_weighting(value: &str) -> Option<NormalWeighting> {
    match value.trim().to_ascii_lowercase().as_str() {
        "running" | "running-average" => Some(NormalWeighting::RunningAverage),
        "area" | "area-weighted" => Some(NormalWeighting::AreaWeighted),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
