//! Heightmap terrain with a cloud band above it

use serde::{Deserialize, Serialize};

use super::clouds::{CloudField, CloudParams};
use crate::core::{AIR, BlockId, IVec3};
use crate::voxel::chunk::{ChunkData, ChunkReady, ChunkRequest};

/// Lower bound of [`height_at`]: (0.8 - 1) + (0.4 - 1)
pub const MIN_HEIGHT: f64 = -0.8;
/// Upper bound of [`height_at`]: (0.8 + 1) + (0.4 + 1)
pub const MAX_HEIGHT: f64 = 3.2;

/// Ground height at horizontal position (x, z).
///
/// Two offset sine waves, bounded to [`MIN_HEIGHT`, `MAX_HEIGHT`].
pub fn height_at(x: f64, z: f64) -> f64 {
    let xs = 0.8 + (x / 10.0).sin();
    let zs = 0.4 + (z / 15.0 + x / 30.0).sin();
    xs + zs
}

/// Block codes the generator places
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainBlocks {
    /// Ground below y = 0
    pub subsurface: BlockId,
    /// Ground from y = 0 up to the surface
    pub surface: BlockId,
    pub cloud: BlockId,
}

impl Default for TerrainBlocks {
    fn default() -> Self {
        Self {
            subsurface: 1,
            surface: 2,
            cloud: 3,
        }
    }
}

/// Stateless terrain and cloud generator
pub struct TerrainGenerator {
    blocks: TerrainBlocks,
    clouds: CloudParams,
    field: Box<dyn CloudField>,
}

impl TerrainGenerator {
    pub fn new(blocks: TerrainBlocks, clouds: CloudParams, field: impl CloudField + 'static) -> Self {
        Self {
            blocks,
            clouds,
            field: Box::new(field),
        }
    }

    pub fn blocks(&self) -> TerrainBlocks {
        self.blocks
    }

    pub fn cloud_params(&self) -> &CloudParams {
        &self.clouds
    }

    /// Ground height at world column (x, z)
    pub fn height_at(&self, x: i32, z: i32) -> f64 {
        height_at(x as f64, z as f64)
    }

    /// Block code for one world cell.
    ///
    /// `origin_y` is the y of the chunk being generated; the cloud fade reads it.
    pub fn block_at(&self, x: i32, y: i32, z: i32, origin_y: i32) -> BlockId {
        self.column_block(self.height_at(x, z), x, y, z, origin_y)
    }

    fn column_block(&self, height: f64, x: i32, y: i32, z: i32, origin_y: i32) -> BlockId {
        if (y as f64) < height {
            return if y < 0 {
                self.blocks.subsurface
            } else {
                self.blocks.surface
            };
        }

        if self.clouds.in_band(y) {
            let density = self.clouds.fade(self.field.density(x, y, z), y, origin_y);
            if density > self.clouds.cutoff {
                return self.blocks.cloud;
            }
        }

        AIR
    }

    /// Fill `data` in place for a chunk whose cell (0, 0, 0) sits at `origin`.
    /// Every cell is written, air included.
    pub fn fill_chunk(&self, origin: IVec3, data: &mut ChunkData) {
        let [sx, sy, sz] = data.shape();
        for i in 0..sx {
            let x = origin.x + i as i32;
            for k in 0..sz {
                let z = origin.z + k as i32;
                let height = self.height_at(x, z);
                for j in 0..sy {
                    let y = origin.y + j as i32;
                    data.set(i, j, k, self.column_block(height, x, y, z, origin.y));
                }
            }
        }
    }

    /// Answer a host request: fill its grid and hand it back under the same id
    pub fn generate(&self, request: ChunkRequest) -> ChunkReady {
        let ChunkRequest { id, origin, mut data } = request;
        self.fill_chunk(origin, &mut data);
        log::trace!("Generated chunk {:?} at {}", id, origin);
        ChunkReady { id, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::clouds::CloudFade;
    use crate::voxel::chunk::ChunkId;

    struct ConstantClouds(f64);

    impl CloudField for ConstantClouds {
        fn density(&self, _x: i32, _y: i32, _z: i32) -> f64 {
            self.0
        }
    }

    fn make_generator(density: f64, clouds: CloudParams) -> TerrainGenerator {
        TerrainGenerator::new(TerrainBlocks::default(), clouds, ConstantClouds(density))
    }

    fn band_20_40(cutoff: f64) -> CloudParams {
        CloudParams {
            cloud_level: 20,
            cloud_altitude: 40,
            cutoff,
            ..Default::default()
        }
    }

    #[test]
    fn test_height_at_origin() {
        assert!((height_at(0.0, 0.0) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_height_bounds_and_determinism() {
        let (mut lowest, mut highest) = (f64::MAX, f64::MIN);
        for x in -200..200 {
            for z in -200..200 {
                let (fx, fz) = (x as f64 * 0.7, z as f64 * 1.3);
                let h = height_at(fx, fz);
                assert!(h >= MIN_HEIGHT && h <= MAX_HEIGHT, "height {} at ({}, {})", h, fx, fz);
                assert_eq!(h, height_at(fx, fz));
                lowest = lowest.min(h);
                highest = highest.max(h);
            }
        }
        // the two waves line up often enough to leave [-0.2, 2.2]
        assert!(lowest < -0.2, "lowest {}", lowest);
        assert!(highest > 2.2, "highest {}", highest);
    }

    #[test]
    fn test_height_extremes() {
        // x = -5pi (sin(x/10) = -1), z chosen so z/15 + x/30 = -pi/2
        let x = -5.0 * std::f64::consts::PI;
        let z = 15.0 * (-std::f64::consts::FRAC_PI_2 - x / 30.0);
        assert!((height_at(x, z) - MIN_HEIGHT).abs() < 1e-9);

        let x = 5.0 * std::f64::consts::PI;
        let z = 15.0 * (std::f64::consts::FRAC_PI_2 - x / 30.0);
        assert!((height_at(x, z) - MAX_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_height_is_continuous() {
        let step = 1e-4;
        for x in -50..50 {
            let fx = x as f64 * 0.37;
            let delta = (height_at(fx + step, 3.0) - height_at(fx, 3.0)).abs();
            assert!(delta < 1e-3);
        }
    }

    #[test]
    fn test_ground_layers() {
        let generator = make_generator(0.0, band_20_40(0.5));
        let mut data = ChunkData::new([1, 8, 1]);
        generator.fill_chunk(IVec3::new(0, -4, 0), &mut data);

        // height(0, 0) = 1.2
        for j in 0..4 {
            assert_eq!(data.get(0, j, 0), 1, "y = {} should be subsurface", j as i32 - 4);
        }
        assert_eq!(data.get(0, 4, 0), 2);
        assert_eq!(data.get(0, 5, 0), 2);
        assert_eq!(data.get(0, 6, 0), AIR);
        assert_eq!(data.get(0, 7, 0), AIR);
    }

    #[test]
    fn test_below_zero_column_is_subsurface() {
        let generator = make_generator(0.0, band_20_40(0.5));
        let mut data = ChunkData::new([16, 8, 16]);
        generator.fill_chunk(IVec3::new(-40, -8, 12), &mut data);
        assert_eq!(data.count(1), 16 * 8 * 16);
    }

    #[test]
    fn test_every_cell_written() {
        let generator = make_generator(0.9, band_20_40(0.5));
        let mut data = ChunkData::new([8, 64, 8]);
        for i in 0..8 {
            for j in 0..64 {
                for k in 0..8 {
                    data.set(i, j, k, 99);
                }
            }
        }
        generator.fill_chunk(IVec3::new(5, -16, -3), &mut data);
        assert_eq!(data.count(99), 0);
    }

    #[test]
    fn test_cloud_cutoff_is_strict() {
        let origin = IVec3::new(0, 32, 0);

        let mut data = ChunkData::new([2, 8, 2]);
        make_generator(0.5, band_20_40(0.5)).fill_chunk(origin, &mut data);
        assert!(data.is_empty());

        let mut data = ChunkData::new([2, 8, 2]);
        make_generator(0.51, band_20_40(0.5)).fill_chunk(origin, &mut data);
        assert_eq!(data.count(3), 2 * 8 * 2);
    }

    #[test]
    fn test_clouds_only_inside_band() {
        let generator = make_generator(1.0, band_20_40(0.5));
        let mut data = ChunkData::new([1, 32, 1]);
        generator.fill_chunk(IVec3::new(0, 32, 0), &mut data);
        for j in 0..32 {
            let y = 32 + j as i32;
            let expected = if y <= 40 { 3 } else { AIR };
            assert_eq!(data.get(0, j, 0), expected, "y = {}", y);
        }
    }

    #[test]
    fn test_cloud_fade_reads_chunk_origin() {
        // Origin 16 sits below the level: factor is negative, no clouds even
        // though cells 20..=31 lie in the band.
        let generator = make_generator(1.0, band_20_40(0.0));
        let mut data = ChunkData::new([1, 16, 1]);
        generator.fill_chunk(IVec3::new(0, 16, 0), &mut data);
        assert_eq!(data.count(3), 0);

        // Origin 24: every cell gets factor 0.4, including y = 39.
        let generator = make_generator(1.0, band_20_40(0.5));
        assert_eq!(generator.block_at(0, 39, 0, 24), AIR);
        assert_eq!(generator.block_at(0, 39, 0, 32), 3);
    }

    #[test]
    fn test_cloud_fade_per_cell() {
        let clouds = CloudParams { fade: CloudFade::Cell, ..band_20_40(0.3) };
        let generator = make_generator(1.0, clouds);
        // factor (y - 20) / 10
        assert_eq!(generator.block_at(0, 22, 0, 16), AIR);
        assert_eq!(generator.block_at(0, 25, 0, 16), 3);
        assert_eq!(generator.block_at(0, 39, 0, 16), 3);
    }

    #[test]
    fn test_inverted_band_generates_no_clouds() {
        let clouds = CloudParams { cloud_level: 40, cloud_altitude: 20, ..band_20_40(0.0) };
        let generator = make_generator(1.0, clouds);
        let mut data = ChunkData::new([4, 64, 4]);
        generator.fill_chunk(IVec3::new(0, 0, 0), &mut data);
        assert_eq!(data.count(3), 0);
    }

    #[test]
    fn test_generate_returns_same_id() {
        let generator = make_generator(0.0, band_20_40(0.5));
        let request = ChunkRequest::new(ChunkId(42), IVec3::new(0, -32, 0), ChunkData::cube());
        let ready = generator.generate(request);
        assert_eq!(ready.id, ChunkId(42));
        assert!(!ready.data.is_empty());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = make_generator(0.7, band_20_40(0.5));
        let a = generator.generate(ChunkRequest::new(ChunkId(1), IVec3::new(-32, 0, 64), ChunkData::cube()));
        let b = generator.generate(ChunkRequest::new(ChunkId(2), IVec3::new(-32, 0, 64), ChunkData::cube()));
        assert_eq!(a.data, b.data);
    }
}
