//! Gradient noise over a shuffled permutation table.
//!
//! Provides the deterministic noise primitive the height pipeline is built
//! on. The evaluator follows the classic reference formulation (quintic
//! fade, hashed lattice corners, 16-way gradient selection) so that
//! generated terrain is reproducible down to the bit for a given table.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of distinct lattice hash values.
const TABLE_SIZE: usize = 256;

/// Classic Perlin gradient noise backed by a 512-entry permutation table.
///
/// The table is a random permutation of `[0, 255]` followed by a copy of
/// itself, so corner lookups of the form `p[p[x] + y + 1]` stay in bounds
/// without wrapping. The table is immutable after construction and can be
/// shared read-only across any number of chunk generations.
pub struct Perlin {
    p: [u8; TABLE_SIZE * 2],
}

impl Perlin {
    /// Build a table from OS entropy. Every run produces a different world.
    pub fn new() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// Build a reproducible table from a world seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut base: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        base.shuffle(rng);

        let mut p = [0u8; TABLE_SIZE * 2];
        p[..TABLE_SIZE].copy_from_slice(&base);
        p[TABLE_SIZE..].copy_from_slice(&base);
        Self { p }
    }

    /// Sample noise at a 3D point.
    ///
    /// Deterministic for a fixed table, C2-smooth across lattice
    /// boundaries, and approximately within [-1, 1]. Slight float
    /// overshoot is possible and deliberately left unclamped.
    ///
    /// The height pipeline always pins `z` to 0.5, riding a fixed slice of
    /// the 3D lattice rather than using true 2D noise; the gradient
    /// directions differ between the two, so the slice is part of the
    /// terrain's identity.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;

        let x = x - x.floor();
        let y = y - y.floor();
        let z = z - z.floor();

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        // Hash the 8 cube corners through the table. Re-lookups with the
        // +y/+z offsets decorrelate the axes.
        let p = &self.p;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
///
/// Zero first and second derivative at 0 and 1, which is what keeps the
/// blend seamless across lattice cell boundaries.
pub(crate) fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Pseudo-gradient dot product for one lattice corner.
///
/// The hash bits pick two of the point's components and their signs,
/// projecting onto cube-edge directions. The h == 12 / h == 14 cases
/// repeat earlier directions; that quirk is part of the reference noise
/// and changing it changes the terrain's visual character.
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints_and_midpoint() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn test_permutation_halves_are_identical_permutations() {
        let perlin = Perlin::with_seed(12345);
        let (first, second) = perlin.p.split_at(TABLE_SIZE);

        assert_eq!(first, second, "second half must copy the first");

        // Each half must contain every value 0..=255 exactly once.
        let mut seen = [false; TABLE_SIZE];
        for &value in first {
            assert!(!seen[value as usize], "duplicate value {value} in table");
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_seeded_tables_are_reproducible() {
        let a = Perlin::with_seed(42);
        let b = Perlin::with_seed(42);
        assert_eq!(a.p, b.p, "same seed must produce the same table");

        let c = Perlin::with_seed(43);
        assert_ne!(a.p, c.p, "different seeds should shuffle differently");
    }

    #[test]
    fn test_sample_determinism() {
        let perlin = Perlin::with_seed(7);
        for i in 0..50 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 0.73;
            assert_eq!(perlin.sample(x, y, 0.5), perlin.sample(x, y, 0.5));
        }
    }

    #[test]
    fn test_sample_bounded() {
        let perlin = Perlin::with_seed(99);
        for ix in 0..64 {
            for iy in 0..64 {
                let value = perlin.sample(ix as f64 * 0.31, iy as f64 * 0.27, 0.5);
                assert!(
                    (-1.2..=1.2).contains(&value),
                    "noise value {value} out of bounds at ({ix}, {iy})"
                );
            }
        }
    }

    #[test]
    fn test_integer_lattice_points_have_zero_blend() {
        // At integer coordinates every fractional offset is 0, so the
        // result collapses to the corner gradient dotted with the zero
        // offset vector.
        let perlin = Perlin::with_seed(5);
        for x in -4i32..4 {
            for y in -4i32..4 {
                assert_eq!(perlin.sample(x as f64, y as f64, 0.0), 0.0);
            }
        }
    }

    #[test]
    fn test_grad_reference_directions() {
        // Pin the historical branch layout, including the 12/14 repeats.
        let (x, y, z) = (2.0, 3.0, 5.0);
        assert_eq!(grad(0, x, y, z), x + y);
        assert_eq!(grad(12, x, y, z), y + x);
        assert_eq!(grad(14, x, y, z), -x + y);
        assert_eq!(grad(13, x, y, z), -y + z);
        assert_eq!(grad(4, x, y, z), x + z);
        assert_eq!(grad(15, x, y, z), -y - z);
    }

    #[test]
    fn test_entropy_tables_are_valid() {
        let perlin = Perlin::new();
        let mut seen = [false; TABLE_SIZE];
        for &value in &perlin.p[..TABLE_SIZE] {
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "entropy table must be a permutation");
    }
}
