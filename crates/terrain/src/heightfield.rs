//! Octave-summed height synthesis per chunk.
//!
//! Combines noise layers of decaying amplitude and growing frequency into
//! a normalized height grid. Neighboring chunks sample overlapping world
//! coordinates so their shared edges match exactly.

use crate::config::MapConfig;
use crate::noise::Perlin;
use tracing::debug;

/// Fixed z coordinate for all height sampling.
///
/// Heights ride a mid-cell slice of the 3D noise lattice; replacing this
/// with true 2D noise would change every gradient and thus every world.
const Z_SLICE: f64 = 0.5;

/// Row-major grid of normalized height samples for one chunk.
///
/// Values sit approximately in [0, 1] but are not clamped; downstream
/// easing tolerates slight overshoot.
pub struct HeightField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Generate the height field for the chunk at grid position
    /// `(chunk_x, chunk_y)`.
    ///
    /// Each cell accumulates `octaves` noise samples; amplitude starts at
    /// 1 and decays by `persistence`, frequency starts at 1 and grows by
    /// `lacunarity`. The raw sum is normalized by the theoretical maximum
    /// of the amplitude series.
    pub fn generate(perlin: &Perlin, config: &MapConfig, chunk_x: i32, chunk_y: i32) -> Self {
        let width = config.chunk_width as usize;
        let height = config.chunk_height as usize;

        // Theoretical maximum of the octave series, for normalization.
        let mut max_possible_height = 0.0f64;
        let mut amp = 1.0f64;
        for _ in 0..config.octaves {
            max_possible_height += amp;
            amp *= config.persistence;
        }

        // World-space stride between chunk origins. One cell short of the
        // chunk width so adjacent chunks share their edge columns, which
        // is what keeps the terrain seamless.
        let x_stride = (config.chunk_width - 1) as f64;
        let y_stride = (config.chunk_height - 1) as f64;

        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let mut amp = 1.0f64;
                let mut freq = 1.0f64;
                let mut sum = 0.0f64;

                for _ in 0..config.octaves {
                    let sx = (x as f64 + f64::from(chunk_x) * x_stride) / config.noise_scale * freq;
                    let sy = (y as f64 + f64::from(chunk_y) * y_stride) / config.noise_scale * freq;

                    sum += perlin.sample(sx, sy, Z_SLICE) * amp;
                    amp *= config.persistence;
                    freq *= config.lacunarity;
                }

                values.push(((sum + 1.0) / max_possible_height) as f32);
            }
        }

        let field = Self {
            width,
            height,
            values,
        };
        debug!(
            chunk_x,
            chunk_y,
            min = field.min(),
            max = field.max(),
            "height field generated"
        );
        field
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Height at cell `(x, y)`.
    ///
    /// # Panics
    /// Panics if the cell is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width, "x {x} out of bounds (width {})", self.width);
        assert!(
            y < self.height,
            "y {y} out of bounds (height {})",
            self.height
        );
        self.values[x + y * self.width]
    }

    /// Like [`get`](Self::get), but with the row index clamped to the last
    /// generated row.
    ///
    /// The vertex pass walks one row beyond the field and reuses the last
    /// row's samples for it.
    pub fn get_clamped(&self, x: usize, y: usize) -> f32 {
        self.get(x, y.min(self.height - 1))
    }

    /// Raw row-major samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Smallest sample in the field.
    pub fn min(&self) -> f32 {
        self.values.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest sample in the field.
    pub fn max(&self) -> f32 {
        self.values
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }
}
