//! Generation configuration: material palette, block codes and cloud band.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::BlockId;
use crate::terrain::{CloudNoiseParams, CloudParams, TerrainBlocks};
use crate::voxel::registry::Appearance;

/// A material to register before any block code
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub appearance: Appearance,
}

/// A block code and the material it is drawn with
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub id: BlockId,
    pub material: String,
}

/// Configuration for the terrain generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Materials, registered in order.
    pub materials: Vec<MaterialConfig>,
    /// Block codes, registered after all materials.
    pub blocks: Vec<BlockConfig>,
    /// Which codes the terrain generator places.
    pub terrain_blocks: TerrainBlocks,
    /// Cloud band and cutoff.
    pub clouds: CloudParams,
    /// Noise driving cloud density; `seed` is the world seed.
    pub cloud_noise: CloudNoiseParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let material = |name: &str, rgb: [f32; 3]| MaterialConfig {
            name: name.to_string(),
            appearance: Appearance::Color(rgb),
        };
        let block = |id: BlockId, name: &str| BlockConfig {
            id,
            material: name.to_string(),
        };

        Self {
            materials: vec![
                material("dirt", [0.45, 0.36, 0.22]),
                material("grass", [0.1, 0.8, 0.2]),
                material("cloud", [1.0, 1.0, 1.0]),
            ],
            blocks: vec![block(1, "dirt"), block(2, "grass"), block(3, "cloud")],
            terrain_blocks: TerrainBlocks::default(),
            clouds: CloudParams::default(),
            cloud_noise: CloudNoiseParams::default(),
        }
    }
}

impl GenerationConfig {
    /// World seed
    pub fn seed(&self) -> u32 {
        self.cloud_noise.seed
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)
    }

    /// Load from file (sync). Missing fields take their defaults.
    pub fn load_sync(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}
