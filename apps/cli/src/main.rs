// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mandelmesh CLI - headless fractal mesh generator.
//!
//! Reads its parameters from the environment, generates one mesh and writes
//! it as JSON (flat positions and normals, counts, parameters and stats).
//!
//! # Environment
//!
//! - `MANDELMESH_VERTEX_BUDGET`, `MANDELMESH_POWER`, `MANDELMESH_ITERATIONS`
//! - `MANDELMESH_BOUNDARY`, `MANDELMESH_TOLERANCE`, `MANDELMESH_INITIAL_STEP`
//! - `MANDELMESH_MAX_STEPS`, `MANDELMESH_NORMALS` (`running` | `area`)
//! - `MANDELMESH_OUTPUT` - output file, stdout when unset
//! - `MANDELMESH_LOG_FORMAT` - `json` for JSON log lines
//! - `WORKER_THREADS` - rayon pool size
//! - `RUST_LOG` - log filter

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};

mod config;

use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(config.log_json);

    tracing::info!(
        vertex_budget = config.params.vertex_budget,
        power = config.params.fractal.power,
        iterations = config.params.fractal.iterations,
        boundary = config.params.fractal.boundary,
        tolerance = config.params.fractal.tolerance,
        worker_threads = config.worker_threads,
        "Starting Mandelmesh"
    );

    // Initialize rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("failed to build worker pool")?;

    let mesh = mandelmesh_processing::generate_fractal_mesh(&config.params)
        .context("fractal mesh generation failed")?;

    match &config.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path))?;
            write_mesh(BufWriter::new(file), &mesh)?;
            tracing::info!(path = %path, faces = mesh.face_count, "Wrote mesh");
        }
        None => write_mesh(BufWriter::new(io::stdout().lock()), &mesh)?,
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,mandelmesh=debug"));

    // Logs go to stderr so stdout stays clean for the JSON document
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn write_mesh(
    mut writer: impl Write,
    mesh: &mandelmesh_processing::FractalMesh,
) -> anyhow::Result<()> {
    serde_json::to_writer(&mut writer, mesh).context("failed to serialize mesh")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
