//! Chunk assembly: height field to renderable buffer set.
//!
//! Each chunk runs the same pipeline — height field, triangulation,
//! vertex easing, face normals, biome colors — and hands the result to a
//! rendering collaborator as flat buffers for a one-time upload.

use crate::biome::BiomePalette;
use crate::config::{ConfigError, MapConfig};
use crate::heightfield::HeightField;
use crate::mesh::{face_normals, grid_indices, vertex_positions};
use crate::noise::Perlin;
use tracing::{debug, instrument};

/// Chunk coordinates within the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The renderable buffer set for one chunk.
///
/// Everything a rendering collaborator needs: flat position, face-normal
/// and vertex-color floats, triangle indices, and the model translation
/// that places the chunk in the world. Buffers are immutable once
/// assembled; there is no update interface.
#[derive(Debug, Clone)]
pub struct ChunkBuffers {
    pos: ChunkPos,
    positions: Vec<f32>,
    indices: Vec<u32>,
    normals: Vec<f32>,
    colors: Vec<f32>,
    world_offset: [f32; 3],
}

impl ChunkBuffers {
    /// Grid position this chunk was generated for.
    pub fn position(&self) -> ChunkPos {
        self.pos
    }

    /// Vertex positions, 3 floats per vertex (x, height, y).
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Triangle indices into the position/color buffers.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Face normals, 3 floats per triangle, in index-buffer order.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Vertex colors, 3 floats per vertex.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Model-space translation placing this chunk in the world.
    ///
    /// Chunks overlap their neighbors by one cell, so the stride between
    /// chunk origins is one less than the chunk dimension.
    pub fn world_offset(&self) -> [f32; 3] {
        self.world_offset
    }

    /// Number of vertices in the position/color buffers.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Element count for the collaborator's indexed draw call.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Total payload size of the four buffers in bytes.
    pub fn byte_size(&self) -> usize {
        std::mem::size_of_val(self.positions.as_slice())
            + std::mem::size_of_val(self.indices.as_slice())
            + std::mem::size_of_val(self.normals.as_slice())
            + std::mem::size_of_val(self.colors.as_slice())
    }

    /// Position buffer as bytes, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Index buffer as bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Normal buffer as bytes, ready for upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Color buffer as bytes, ready for upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Generates renderable chunk buffers from a shared permutation table.
///
/// The table is built once at construction and read-only afterwards, so a
/// generator can be shared freely across threads even though the baseline
/// map pass is sequential.
pub struct TerrainGenerator {
    perlin: Perlin,
    palette: BiomePalette,
    config: MapConfig,
}

impl TerrainGenerator {
    /// Validate the configuration and build a generator with an
    /// entropy-seeded permutation table.
    pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
        Self::with_perlin(config, Perlin::new())
    }

    /// Deterministic variant: the same seed and configuration always
    /// produce identical buffer sets.
    pub fn with_seed(config: MapConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_perlin(config, Perlin::with_seed(seed))
    }

    fn with_perlin(config: MapConfig, perlin: Perlin) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = BiomePalette::standard(config.water_height);
        Ok(Self {
            perlin,
            palette,
            config,
        })
    }

    /// Replace the standard palette with a custom one.
    pub fn with_palette(mut self, palette: BiomePalette) -> Self {
        self.palette = palette;
        self
    }

    /// The validated map configuration this generator runs with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Generate the renderable buffer set for one chunk.
    #[instrument(skip(self), fields(chunk_x = pos.x, chunk_y = pos.y))]
    pub fn generate_chunk(&self, pos: ChunkPos) -> ChunkBuffers {
        let config = &self.config;

        let field = HeightField::generate(&self.perlin, config, pos.x, pos.y);
        let indices = grid_indices(config.chunk_width, config.chunk_height);
        let positions = vertex_positions(&field, config.mesh_height, config.water_height);
        let normals = face_normals(&indices, &positions);
        let colors = self.palette.vertex_colors(&positions, config.mesh_height);

        debug!(
            vertices = positions.len() / 3,
            triangles = indices.len() / 3,
            "chunk buffers assembled"
        );

        let world_offset = [
            -(config.chunk_width as f32) / 2.0 + (config.chunk_width - 1) as f32 * pos.x as f32,
            0.0,
            -(config.chunk_height as f32) / 2.0 + (config.chunk_height - 1) as f32 * pos.y as f32,
        ];

        ChunkBuffers {
            pos,
            positions,
            indices,
            normals,
            colors,
            world_offset,
        }
    }

    /// Generate every chunk in the configured grid, row-major.
    ///
    /// This is the sequential startup pass; all chunks exist before the
    /// rendering collaborator draws anything, and none are regenerated
    /// afterwards.
    pub fn generate_map(&self) -> Vec<ChunkBuffers> {
        let count = self.config.x_map_chunks as usize * self.config.y_map_chunks as usize;
        let mut chunks = Vec::with_capacity(count);

        for y in 0..self.config.y_map_chunks as i32 {
            for x in 0..self.config.x_map_chunks as i32 {
                chunks.push(self.generate_chunk(ChunkPos::new(x, y)));
            }
        }

        chunks
    }
}
