//! Procedural terrain mesh generation.
//!
//! Builds renderable chunk buffer sets — vertex positions, triangle
//! indices, face normals, vertex colors — from layered gradient noise.
//! Rendering is a downstream collaborator; this crate stops at the buffer
//! handoff.

mod biome;
mod chunk;
mod config;
mod heightfield;
mod mesh;
mod noise;

pub use biome::{BiomePalette, ColorBand};
pub use chunk::{ChunkBuffers, ChunkPos, TerrainGenerator};
pub use config::{ConfigError, MapConfig};
pub use heightfield::HeightField;
pub use mesh::{face_normals, grid_indices, vertex_positions};
pub use noise::Perlin;
