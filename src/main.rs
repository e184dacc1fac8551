//! terramesh - procedural terrain mesh generation driver
//!
//! Loads the map configuration, generates every chunk in the grid up
//! front, and reports the renderable buffer set a graphics backend would
//! upload. Windowing, shaders and draw calls live in a downstream
//! collaborator, not here.

mod cli;
mod config;

use anyhow::Result;
use cli::CliOptions;
use std::env;
use std::time::Instant;
use terramesh_terrain::TerrainGenerator;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting terramesh v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut map = config::load_map_config(cli.config.as_deref());
    cli.apply_overrides(&mut map);

    let generator = match cli.seed {
        Some(seed) => {
            info!(seed, "using fixed world seed");
            TerrainGenerator::with_seed(map, seed)?
        }
        None => TerrainGenerator::new(map)?,
    };

    let started = Instant::now();
    let chunks = generator.generate_map();
    let elapsed = started.elapsed();

    let vertices: usize = chunks.iter().map(|c| c.vertex_count()).sum();
    let triangles: usize = chunks.iter().map(|c| c.triangle_count()).sum();
    let bytes: usize = chunks.iter().map(|c| c.byte_size()).sum();

    info!(
        chunks = chunks.len(),
        vertices,
        triangles,
        upload_mib = format_args!("{:.1}", bytes as f64 / (1024.0 * 1024.0)),
        elapsed_ms = elapsed.as_millis() as u64,
        "map generation complete"
    );

    let (origin_x, origin_y) = generator.config().origin();
    info!(origin_x, origin_y, "map origin for the render collaborator");

    Ok(())
}
