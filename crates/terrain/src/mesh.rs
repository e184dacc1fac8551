//! Grid triangulation, vertex easing, and flat-shading normals.
//!
//! The index layout is purely a function of the chunk dimensions, so every
//! chunk in a map shares the same triangulation; only positions, normals
//! and colors vary.

use crate::heightfield::HeightField;
use glam::Vec3;

/// Index buffer for a `width` x `height` vertex grid.
///
/// Two triangles per quad cell, iterated row-major with no quad starting
/// on the last row or column. The winding order here is what the normal
/// derivation and the renderer's backface culling both assume; it must not
/// be reordered.
pub fn grid_indices(width: u32, height: u32) -> Vec<u32> {
    let cells = width.saturating_sub(1) as usize * height.saturating_sub(1) as usize;
    let mut indices = Vec::with_capacity(cells * 6);

    for y in 0..height {
        for x in 0..width {
            if x == width - 1 || y == height - 1 {
                continue;
            }
            let pos = x + y * width;
            indices.extend_from_slice(&[
                pos + width,
                pos,
                pos + width + 1,
                pos + 1,
                pos + 1 + width,
                pos,
            ]);
        }
    }

    indices
}

/// Vertex positions for one chunk: `width` columns by `height + 1` rows of
/// `(x, eased_height, y)`, with the height written to the vertical axis.
///
/// The cubic easing exaggerates peaks and valleys; the `max` establishes a
/// flat sea floor halfway below the water surface. The extra row past the
/// height field reuses the field's last row of samples.
pub fn vertex_positions(field: &HeightField, mesh_height: f32, water_height: f32) -> Vec<f32> {
    let width = field.width();
    let height = field.height();
    let sea_floor = water_height * 0.5 * mesh_height;

    let mut positions = Vec::with_capacity(width * (height + 1) * 3);
    for y in 0..height + 1 {
        for x in 0..width {
            let eased = (field.get_clamped(x, y) * 1.1).powi(3) * mesh_height;
            positions.push(x as f32);
            positions.push(eased.max(sea_floor));
            positions.push(y as f32);
        }
    }

    positions
}

/// One flat-shading normal per index triple, in index-buffer order so the
/// renderer can zip normals to faces positionally.
///
/// The negated cross product selects the outward-facing side for the
/// winding emitted by [`grid_indices`].
pub fn face_normals(indices: &[u32], positions: &[f32]) -> Vec<f32> {
    let mut normals = Vec::with_capacity(indices.len());

    for tri in indices.chunks_exact(3) {
        let v0 = vertex(positions, tri[0]);
        let v1 = vertex(positions, tri[1]);
        let v2 = vertex(positions, tri[2]);

        let u = v1 - v0;
        let v = v2 - v0;
        let normal = (-u.cross(v)).normalize();
        normals.extend_from_slice(&normal.to_array());
    }

    normals
}

fn vertex(positions: &[f32], index: u32) -> Vec3 {
    let i = index as usize * 3;
    Vec3::new(positions[i], positions[i + 1], positions[i + 2])
}
