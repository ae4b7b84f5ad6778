//! Multi-octave fractal Perlin heightfield sampler.
//!
//! The terrain surface is a pure function of (x, z): no caching, no
//! mutation after construction, so it may be queried from any code that
//! holds a reference, arbitrarily often.

use noise::{NoiseFn, Perlin};

/// Configuration for the fractal noise terrain surface.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// Seed for deterministic generation.
    pub seed: u32,
    /// Side length of the generation grid in world units. Sampling is
    /// offset by half of this so the world origin sits at the grid center.
    pub grid_size: f32,
    /// Peak height in world units; fractal output in [-1, 1] is scaled by
    /// this. Zero produces perfectly flat terrain at height zero.
    pub height_scale: f32,
    /// Spatial frequency of the broadest features. Default 0.01, one full
    /// cycle per 100 world units.
    pub frequency: f64,
    /// Number of noise octaves to composite. More octaves add finer
    /// detail at additional cost.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_size: 100.0,
            height_scale: 15.0,
            frequency: 0.01,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// Samples terrain height using fractal Brownian motion over Perlin noise.
///
/// Octave contributions are normalized by the total amplitude, so the raw
/// fractal stays in [-1, 1] and the returned height in
/// `[-height_scale, +height_scale]` regardless of octave count.
pub struct TerrainSampler {
    noise: Perlin,
    params: TerrainParams,
}

impl TerrainSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: TerrainParams) -> Self {
        let noise = Perlin::new(params.seed);
        Self { noise, params }
    }

    /// Terrain height at world position (x, z).
    ///
    /// Deterministic: equal parameters and coordinates always yield the
    /// same height.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let half_grid = f64::from(self.params.grid_size) * 0.5;
        let gx = (f64::from(x) + half_grid) * self.params.frequency;
        let gz = (f64::from(z) + half_grid) * self.params.frequency;
        (self.fractal(gx, gz) * f64::from(self.params.height_scale)) as f32
    }

    /// Normalized fBm in [-1, 1].
    fn fractal(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, y * frequency]) * amplitude;
            max_amplitude += amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        total / max_amplitude
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }
}
