//! Map-wide generation parameters.
//!
//! Everything here is fixed at startup and never mutated; generation reads
//! it, the rendering collaborator reads the derived counts and offsets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid map configuration, detected before any chunk is generated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Chunks need at least a 2x2 cell grid to produce any triangles and a
    /// nonzero world stride.
    #[error("chunk dimensions must be at least 2x2 (got {width}x{height})")]
    ChunkTooSmall { width: u32, height: u32 },
    /// Zero octaves would make every height sample degenerate.
    #[error("octave count must be positive")]
    NoOctaves,
    /// A scale parameter is zero, negative, NaN, or infinite.
    #[error("{name} must be positive and finite (got {value})")]
    BadScale { name: &'static str, value: f64 },
}

/// Fixed-at-startup parameters for the whole map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Height-field cells per chunk along x.
    pub chunk_width: u32,
    /// Height-field cells per chunk along y.
    pub chunk_height: u32,
    /// Chunks in the map grid along x.
    pub x_map_chunks: u32,
    /// Chunks in the map grid along y.
    pub y_map_chunks: u32,
    /// Noise layers summed per height sample.
    pub octaves: u32,
    /// Vertical scale applied to eased height values.
    pub mesh_height: f32,
    /// Spatial frequency divisor for noise sampling.
    pub noise_scale: f64,
    /// Amplitude decay per octave, in (0, 1).
    pub persistence: f64,
    /// Frequency growth per octave, typically >= 1.
    pub lacunarity: f64,
    /// Water surface height as a fraction of `mesh_height`.
    pub water_height: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            chunk_width: 127,
            chunk_height: 127,
            x_map_chunks: 10,
            y_map_chunks: 10,
            octaves: 6,
            mesh_height: 32.0,
            noise_scale: 64.0,
            persistence: 0.5,
            lacunarity: 2.0,
            water_height: 0.1,
        }
    }
}

impl MapConfig {
    /// Check the fail-fast invariants before generation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_width < 2 || self.chunk_height < 2 {
            return Err(ConfigError::ChunkTooSmall {
                width: self.chunk_width,
                height: self.chunk_height,
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }
        for (name, value) in [
            ("noise_scale", self.noise_scale),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("mesh_height", f64::from(self.mesh_height)),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BadScale { name, value });
            }
        }
        Ok(())
    }

    /// Vertices per chunk: `chunk_width` columns by `chunk_height + 1` rows.
    pub fn vertices_per_chunk(&self) -> usize {
        self.chunk_width as usize * (self.chunk_height as usize + 1)
    }

    /// Indices per chunk: two triangles for every interior quad cell.
    pub fn indices_per_chunk(&self) -> usize {
        (self.chunk_width as usize - 1) * (self.chunk_height as usize - 1) * 6
    }

    /// Center of the chunk grid in world units.
    ///
    /// A rendering collaborator typically spawns its camera here.
    pub fn origin(&self) -> (f32, f32) {
        (
            (self.chunk_width * self.x_map_chunks / 2 - self.chunk_width / 2) as f32,
            (self.chunk_height * self.y_map_chunks / 2 - self.chunk_height / 2) as f32,
        )
    }
}
