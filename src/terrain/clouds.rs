//! Cloud band configuration and density sources

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Source of raw cloud density at a world cell
pub trait CloudField: Send + Sync {
    fn density(&self, x: i32, y: i32, z: i32) -> f64;
}

/// Which vertical coordinate drives the fade near the band's lower edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudFade {
    /// Fade from the requesting chunk's origin y, identical for every cell in
    /// the chunk. Reproduces the established world output.
    #[default]
    ChunkOrigin,
    /// Fade from each cell's own y.
    Cell,
}

/// Vertical band in which clouds may form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudParams {
    /// Lowest y of the band (inclusive)
    pub cloud_level: i32,
    /// Highest y of the band (inclusive)
    pub cloud_altitude: i32,
    /// Density must be strictly above this to place a cloud block
    pub cutoff: f64,
    /// Height above `cloud_level` over which density ramps up
    pub fade_height: f64,
    pub fade: CloudFade,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            cloud_level: 20,
            cloud_altitude: 50,
            cutoff: 0.6,
            fade_height: 10.0,
            fade: CloudFade::ChunkOrigin,
        }
    }
}

impl CloudParams {
    /// True if `y` lies inside the band. An inverted band contains nothing.
    pub fn in_band(&self, y: i32) -> bool {
        y >= self.cloud_level && y <= self.cloud_altitude
    }

    /// Scale raw density near the band's lower edge.
    ///
    /// `cell_y` is the cell being generated, `origin_y` the chunk origin.
    pub fn fade(&self, density: f64, cell_y: i32, origin_y: i32) -> f64 {
        let fade_y = match self.fade {
            CloudFade::ChunkOrigin => origin_y,
            CloudFade::Cell => cell_y,
        } as f64;
        let level = self.cloud_level as f64;
        if fade_y < level + self.fade_height {
            density * (fade_y - level) / self.fade_height
        } else {
            density
        }
    }
}

/// Noise parameters for [`NoiseClouds`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudNoiseParams {
    pub seed: u32,
    /// World units per noise period (larger = bigger clouds)
    pub scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for CloudNoiseParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 24.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Fractal Perlin cloud density remapped into [0, 1]
pub struct NoiseClouds {
    noise: Fbm<Perlin>,
    scale: f64,
}

impl NoiseClouds {
    pub fn new(params: &CloudNoiseParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves)
            .set_persistence(params.persistence)
            .set_lacunarity(params.lacunarity);
        Self {
            noise,
            scale: params.scale.max(f64::EPSILON),
        }
    }
}

impl CloudField for NoiseClouds {
    fn density(&self, x: i32, y: i32, z: i32) -> f64 {
        let p = [
            x as f64 / self.scale,
            y as f64 / self.scale,
            z as f64 / self.scale,
        ];
        ((self.noise.get(p) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
