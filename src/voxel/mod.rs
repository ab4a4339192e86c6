//! Voxel data structures: chunk grids, block registry and the world cache

pub mod chunk;
pub mod registry;
pub mod world;

pub use chunk::{ChunkCoord, ChunkData, ChunkId, ChunkReady, ChunkRequest, CHUNK_SIZE};
pub use registry::{Appearance, BlockRegistry, Material};
pub use world::World;
