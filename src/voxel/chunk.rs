//! Chunk grids and the request/response pair exchanged with the host

use crate::core::{AIR, BlockId, IVec3};

/// Side length of a chunk in blocks
pub const CHUNK_SIZE: i32 = 32;

/// Opaque identifier the host attaches to a chunk request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u64);

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing the given world block position
    pub fn from_world_pos(pos: IVec3) -> Self {
        Self {
            x: pos.x.div_euclid(CHUNK_SIZE),
            y: pos.y.div_euclid(CHUNK_SIZE),
            z: pos.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Get the world-space origin (minimum corner) of this chunk
    pub fn world_origin(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z) * CHUNK_SIZE
    }
}

/// Dense 3-D grid of block codes, indexed `(i, j, k)` along x, y, z
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    shape: [usize; 3],
    cells: Vec<BlockId>,
}

impl ChunkData {
    /// Create an all-air grid with the given shape
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            shape,
            cells: vec![AIR; shape[0] * shape[1] * shape[2]],
        }
    }

    /// Create an all-air cube of `CHUNK_SIZE` per side
    pub fn cube() -> Self {
        let side = CHUNK_SIZE as usize;
        Self::new([side, side, side])
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if i < self.shape[0] && j < self.shape[1] && k < self.shape[2] {
            Some((i * self.shape[1] + j) * self.shape[2] + k)
        } else {
            None
        }
    }

    /// Block at local cell; out-of-range reads return air
    pub fn get(&self, i: usize, j: usize, k: usize) -> BlockId {
        self.index(i, j, k).map_or(AIR, |idx| self.cells[idx])
    }

    /// Write a local cell; out-of-range writes are ignored
    pub fn set(&mut self, i: usize, j: usize, k: usize, block: BlockId) {
        if let Some(idx) = self.index(i, j, k) {
            self.cells[idx] = block;
        }
    }

    /// Raw cell storage in `(i, j, k)` row-major order
    pub fn cells(&self) -> &[BlockId] {
        &self.cells
    }

    /// Number of cells holding `block`
    pub fn count(&self, block: BlockId) -> usize {
        self.cells.iter().filter(|&&c| c == block).count()
    }

    /// True if every cell is air
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == AIR)
    }
}

/// A host request for chunk data
#[derive(Clone, Debug)]
pub struct ChunkRequest {
    pub id: ChunkId,
    /// World position of cell `(0, 0, 0)`
    pub origin: IVec3,
    pub data: ChunkData,
}

impl ChunkRequest {
    pub fn new(id: ChunkId, origin: IVec3, data: ChunkData) -> Self {
        Self { id, origin, data }
    }
}

/// Filled chunk handed back to the host
#[derive(Clone, Debug)]
pub struct ChunkReady {
    pub id: ChunkId,
    pub data: ChunkData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coord_from_world_pos_negative() {
        assert_eq!(ChunkCoord::from_world_pos(IVec3::new(0, 0, 0)), ChunkCoord::new(0, 0, 0));
        assert_eq!(ChunkCoord::from_world_pos(IVec3::new(-1, 31, 32)), ChunkCoord::new(-1, 0, 1));
        assert_eq!(ChunkCoord::new(-1, 2, 0).world_origin(), IVec3::new(-32, 64, 0));
    }

    #[test]
    fn test_chunk_data_starts_empty() {
        let data = ChunkData::new([4, 5, 6]);
        assert_eq!(data.cells().len(), 120);
        assert!(data.is_empty());
        assert_eq!(data.shape(), [4, 5, 6]);
    }

    #[test]
    fn test_chunk_data_get_set() {
        let mut data = ChunkData::new([4, 5, 6]);
        data.set(3, 4, 5, 7);
        data.set(0, 1, 0, 2);
        assert_eq!(data.get(3, 4, 5), 7);
        assert_eq!(data.get(0, 1, 0), 2);
        assert_eq!(data.get(0, 0, 0), AIR);
        assert_eq!(data.count(7), 1);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_chunk_data_out_of_range() {
        let mut data = ChunkData::new([2, 2, 2]);
        data.set(2, 0, 0, 9);
        assert!(data.is_empty());
        assert_eq!(data.get(0, 2, 0), AIR);
    }
}
