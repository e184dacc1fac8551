//! Height-banded terrain coloring.
//!
//! Maps vertex heights to biome colors through an ordered list of
//! threshold bands, lowest first. Bands are plain data so palettes can be
//! swapped without touching the pipeline.

use glam::Vec3;

/// A color band covering vertices at or below
/// `threshold * mesh_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBand {
    /// Upper height bound as a fraction of the mesh height scale.
    pub threshold: f32,
    /// Linear RGB color applied within the band.
    pub color: Vec3,
}

impl ColorBand {
    /// Convenience constructor.
    pub fn new(threshold: f32, color: Vec3) -> Self {
        Self { threshold, color }
    }
}

/// Ordered color bands, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct BiomePalette {
    bands: Vec<ColorBand>,
}

impl BiomePalette {
    /// Build a palette from bands ordered by ascending threshold.
    ///
    /// # Panics
    /// Panics on an empty band list; a palette must always be able to
    /// produce a color.
    pub fn new(bands: Vec<ColorBand>) -> Self {
        assert!(!bands.is_empty(), "palette requires at least one band");
        Self { bands }
    }

    /// The classic eight-band palette from deep water up to snow.
    ///
    /// The two water bands track the configured water height so the sea
    /// floor and shoreline move with it.
    pub fn standard(water_height: f32) -> Self {
        Self::new(vec![
            ColorBand::new(water_height * 0.5, Vec3::new(0.24, 0.37, 0.75)), // deep water
            ColorBand::new(water_height, Vec3::new(0.24, 0.4, 0.75)),        // shallow water
            ColorBand::new(0.15, Vec3::new(0.82, 0.84, 0.5)),                // sand
            ColorBand::new(0.30, Vec3::new(0.37, 0.65, 0.12)),               // grass
            ColorBand::new(0.40, Vec3::new(0.25, 0.45, 0.08)),               // dark grass
            ColorBand::new(0.50, Vec3::new(0.35, 0.25, 0.25)),               // rock
            ColorBand::new(0.80, Vec3::new(0.3, 0.25, 0.2)),                 // dark rock
            ColorBand::new(1.00, Vec3::ONE),                                 // snow
        ])
    }

    /// The bands, lowest threshold first.
    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    /// Color for a vertex height: the first band whose ceiling is at or
    /// above the height wins. Heights above every ceiling take the last
    /// band's color.
    pub fn color_at(&self, height: f32, mesh_height: f32) -> Vec3 {
        for band in &self.bands {
            if height <= band.threshold * mesh_height {
                return band.color;
            }
        }
        self.bands[self.bands.len() - 1].color
    }

    /// One RGB triple per vertex in the position buffer.
    pub fn vertex_colors(&self, positions: &[f32], mesh_height: f32) -> Vec<f32> {
        let mut colors = Vec::with_capacity(positions.len());
        for vertex in positions.chunks_exact(3) {
            let color = self.color_at(vertex[1], mesh_height);
            colors.extend_from_slice(&color.to_array());
        }
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESH_HEIGHT: f32 = 32.0;
    const WATER_HEIGHT: f32 = 0.1;

    fn palette() -> BiomePalette {
        BiomePalette::standard(WATER_HEIGHT)
    }

    #[test]
    fn test_sea_floor_is_deep_water() {
        let color = palette().color_at(0.0, MESH_HEIGHT);
        assert_eq!(color, Vec3::new(0.24, 0.37, 0.75));
    }

    #[test]
    fn test_full_height_is_snow() {
        let color = palette().color_at(MESH_HEIGHT, MESH_HEIGHT);
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn test_just_below_sand_ceiling_is_sand() {
        let color = palette().color_at(0.15 * MESH_HEIGHT - 1e-3, MESH_HEIGHT);
        assert_eq!(color, Vec3::new(0.82, 0.84, 0.5));
    }

    #[test]
    fn test_heights_above_all_bands_fall_back_to_snow() {
        // Only reachable when eased heights overshoot the mesh scale.
        let color = palette().color_at(MESH_HEIGHT * 1.3, MESH_HEIGHT);
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        // Exactly on a ceiling belongs to that band, matching <=.
        let color = palette().color_at(WATER_HEIGHT * 0.5 * MESH_HEIGHT, MESH_HEIGHT);
        assert_eq!(color, Vec3::new(0.24, 0.37, 0.75));

        let color = palette().color_at(WATER_HEIGHT * MESH_HEIGHT, MESH_HEIGHT);
        assert_eq!(color, Vec3::new(0.24, 0.4, 0.75));
    }

    #[test]
    fn test_vertex_colors_one_triple_per_vertex() {
        let positions = [
            0.0, 0.0, 0.0, // deep water
            1.0, 0.2 * MESH_HEIGHT, 0.0, // grass
            2.0, MESH_HEIGHT, 0.0, // snow
        ];
        let colors = palette().vertex_colors(&positions, MESH_HEIGHT);

        assert_eq!(colors.len(), positions.len());
        assert_eq!(&colors[..3], &[0.24, 0.37, 0.75]);
        assert_eq!(&colors[3..6], &[0.37, 0.65, 0.12]);
        assert_eq!(&colors[6..], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_custom_palette_order_is_respected() {
        let palette = BiomePalette::new(vec![
            ColorBand::new(0.5, Vec3::X),
            ColorBand::new(1.0, Vec3::Y),
        ]);
        assert_eq!(palette.color_at(0.4 * MESH_HEIGHT, MESH_HEIGHT), Vec3::X);
        assert_eq!(palette.color_at(0.9 * MESH_HEIGHT, MESH_HEIGHT), Vec3::Y);
        assert_eq!(palette.bands().len(), 2);
    }

    #[test]
    #[should_panic(expected = "at least one band")]
    fn test_empty_palette_panics() {
        BiomePalette::new(Vec::new());
    }
}
