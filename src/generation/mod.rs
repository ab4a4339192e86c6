//! World generation pipeline - registers the block palette and answers chunk
//! requests with the terrain generator.
//!
//! Setup order:
//! 1. Materials from the config
//! 2. Block codes referencing those materials
//! 3. Terrain generator, after checking every code it places is registered

pub mod config;

pub use config::{BlockConfig, GenerationConfig, MaterialConfig};

use std::ops::RangeInclusive;

use rayon::prelude::*;

use crate::core::{Error, Result};
use crate::terrain::{NoiseClouds, TerrainGenerator};
use crate::voxel::chunk::{ChunkCoord, ChunkData, ChunkReady, ChunkRequest};
use crate::voxel::registry::BlockRegistry;

/// Registered palette plus the generator that uses it.
pub struct GenerationPipeline {
    registry: BlockRegistry,
    terrain: TerrainGenerator,
}

impl GenerationPipeline {
    /// Create a new pipeline from configuration.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let mut registry = BlockRegistry::new();
        for material in &config.materials {
            registry.register_material(material.name.clone(), material.appearance.clone());
        }
        for block in &config.blocks {
            registry.register_block(block.id, &block.material)?;
        }

        let placed = config.terrain_blocks;
        for (role, id) in [
            ("subsurface", placed.subsurface),
            ("surface", placed.surface),
            ("cloud", placed.cloud),
        ] {
            if !registry.is_registered(id) {
                return Err(Error::Config(format!(
                    "{} block {} is not registered",
                    role, id
                )));
            }
        }

        if config.clouds.cloud_level > config.clouds.cloud_altitude {
            log::warn!(
                "Cloud level {} is above cloud altitude {}; no clouds will generate",
                config.clouds.cloud_level,
                config.clouds.cloud_altitude
            );
        }

        let terrain = TerrainGenerator::new(
            placed,
            config.clouds.clone(),
            NoiseClouds::new(&config.cloud_noise),
        );

        log::info!(
            "Generation pipeline ready: {} materials, {} blocks, seed {}",
            registry.material_count(),
            registry.block_count(),
            config.seed()
        );

        Ok(Self { registry, terrain })
    }

    /// Answer one host request.
    pub fn handle_request(&self, request: ChunkRequest) -> ChunkReady {
        self.terrain.generate(request)
    }

    /// Generate a single full-size chunk.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> ChunkData {
        let mut data = ChunkData::cube();
        self.terrain.fill_chunk(coord.world_origin(), &mut data);
        data
    }

    /// Generate every chunk within `radius` (in chunks) of `center` on the XZ
    /// plane, for each chunk layer in `layers`. Parallelized with rayon.
    pub fn generate_region(
        &self,
        center: ChunkCoord,
        radius: i32,
        layers: RangeInclusive<i32>,
    ) -> Vec<(ChunkCoord, ChunkData)> {
        let mut coords = Vec::new();
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                for y in layers.clone() {
                    coords.push(ChunkCoord::new(center.x + dx, y, center.z + dz));
                }
            }
        }

        coords
            .into_par_iter()
            .map(|coord| (coord, self.generate_chunk(coord)))
            .collect()
    }

    /// Get a reference to the terrain generator.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Get a reference to the block registry.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AIR, IVec3};
    use crate::voxel::chunk::{ChunkId, CHUNK_SIZE};

    #[test]
    fn test_pipeline_default_config() {
        let pipeline = GenerationPipeline::new(&GenerationConfig::default()).unwrap();
        assert_eq!(pipeline.registry().block_count(), 3);
        assert_eq!(pipeline.registry().block_material(2).unwrap().name, "grass");
    }

    #[test]
    fn test_pipeline_rejects_unregistered_terrain_block() {
        let mut config = GenerationConfig::default();
        config.terrain_blocks.cloud = 9;
        let err = GenerationPipeline::new(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_pipeline_rejects_block_without_material() {
        let mut config = GenerationConfig::default();
        config.blocks.push(BlockConfig { id: 4, material: "stone".into() });
        let err = GenerationPipeline::new(&config).err().unwrap();
        assert!(matches!(err, Error::Registry(_)));
    }

    #[test]
    fn test_handle_request_roundtrip() {
        let pipeline = GenerationPipeline::new(&GenerationConfig::default()).unwrap();
        let request = ChunkRequest::new(ChunkId(5), IVec3::new(0, 0, 0), ChunkData::cube());
        let ready = pipeline.handle_request(request);
        assert_eq!(ready.id, ChunkId(5));
        assert_eq!(ready.data, pipeline.generate_chunk(ChunkCoord::new(0, 0, 0)));
    }

    #[test]
    fn test_generate_region() {
        let pipeline = GenerationPipeline::new(&GenerationConfig::default()).unwrap();
        let chunks = pipeline.generate_region(ChunkCoord::new(0, 0, 0), 1, -1..=0);
        assert_eq!(chunks.len(), 3 * 3 * 2);

        let side = CHUNK_SIZE as usize;
        for (coord, data) in &chunks {
            if coord.y == -1 {
                assert_eq!(data.count(1), side * side * side);
            } else {
                // surface layer: some grass, never dirt
                assert!(data.count(2) > 0);
                assert_eq!(data.count(1), 0);
                assert!(data.count(AIR) > 0);
            }
        }
    }

    #[test]
    fn test_default_config_forms_clouds() {
        let pipeline = GenerationPipeline::new(&GenerationConfig::default()).unwrap();
        let chunks = pipeline.generate_region(ChunkCoord::new(0, 0, 0), 2, 0..=2);
        let cloud = pipeline.terrain().blocks().cloud;
        let band = pipeline.terrain().cloud_params().clone();

        let clouds: usize = chunks.iter().map(|(_, data)| data.count(cloud)).sum();
        assert!(clouds > 0);

        // only the chunk at origin y = 32 sits clear of the fade zone
        for (coord, data) in &chunks {
            if coord.y != 1 {
                assert_eq!(data.count(cloud), 0, "chunk {:?}", coord);
            }
            for (i, &cell) in data.cells().iter().enumerate() {
                if cell == cloud {
                    let j = (i / CHUNK_SIZE as usize) % CHUNK_SIZE as usize;
                    assert!(band.in_band(coord.world_origin().y + j as i32));
                }
            }
        }
    }
}
