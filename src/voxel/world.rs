//! Host-side world: issues chunk requests and caches the filled chunks

use super::chunk::{ChunkCoord, ChunkData, ChunkId, ChunkReady, ChunkRequest, CHUNK_SIZE};
use crate::core::{BlockId, Error, IVec3, Result};
use crate::terrain::TerrainGenerator;
use std::collections::HashMap;

/// Container for managing a world composed of multiple chunks
pub struct World {
    /// Map from chunk coordinates to loaded chunks
    chunks: HashMap<ChunkCoord, ChunkData>,
    /// Requests handed out and not yet answered
    pending: HashMap<ChunkId, ChunkCoord>,
    next_id: u64,
    /// Chunks edited after generation
    modified_chunks: Vec<ChunkCoord>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
            pending: HashMap::new(),
            next_id: 1,
            modified_chunks: Vec::new(),
        }
    }

    /// Start a request for the chunk at `coord` with a fresh all-air grid
    pub fn request_chunk(&mut self, coord: ChunkCoord) -> ChunkRequest {
        let id = ChunkId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, coord);
        ChunkRequest::new(id, coord.world_origin(), ChunkData::cube())
    }

    /// Accept filled data for an outstanding request.
    ///
    /// Fails with [`Error::UnknownChunk`] if `id` was never requested or has
    /// already been answered.
    pub fn set_chunk_data(&mut self, id: ChunkId, data: ChunkData) -> Result<ChunkCoord> {
        let coord = self.pending.remove(&id).ok_or(Error::UnknownChunk(id.0))?;
        self.chunks.insert(coord, data);
        Ok(coord)
    }

    /// Accept a generator response
    pub fn accept(&mut self, ready: ChunkReady) -> Result<ChunkCoord> {
        self.set_chunk_data(ready.id, ready.data)
    }

    /// Request, generate and store a chunk in one synchronous step.
    /// Already-loaded chunks are returned as they are.
    pub fn load_chunk(&mut self, coord: ChunkCoord, generator: &TerrainGenerator) -> Result<&ChunkData> {
        if !self.chunks.contains_key(&coord) {
            let request = self.request_chunk(coord);
            let ready = generator.generate(request);
            self.accept(ready)?;
        }
        self.chunks.get(&coord).ok_or(Error::UnknownChunk(0))
    }

    /// Get immutable reference to a chunk by coordinate
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&ChunkData> {
        self.chunks.get(&coord)
    }

    /// Remove a chunk from the world and return it
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<ChunkData> {
        self.modified_chunks.retain(|&c| c != coord);
        self.chunks.remove(&coord)
    }

    /// Get the number of loaded chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Get an iterator over all loaded chunk coordinates
    pub fn loaded_coords(&self) -> impl Iterator<Item = &ChunkCoord> {
        self.chunks.keys()
    }

    fn local(pos: IVec3) -> (ChunkCoord, usize, usize, usize) {
        let coord = ChunkCoord::from_world_pos(pos);
        let local = pos - coord.world_origin();
        debug_assert!(local.min_element() >= 0 && local.max_element() < CHUNK_SIZE);
        (coord, local.x as usize, local.y as usize, local.z as usize)
    }

    /// Block at a world position, `None` if its chunk is not loaded
    pub fn block_at(&self, pos: IVec3) -> Option<BlockId> {
        let (coord, i, j, k) = Self::local(pos);
        self.chunks.get(&coord).map(|data| data.get(i, j, k))
    }

    /// Overwrite one block (0 clears it). Returns false if the chunk is not loaded.
    pub fn set_block(&mut self, pos: IVec3, block: BlockId) -> bool {
        let (coord, i, j, k) = Self::local(pos);
        let Some(data) = self.chunks.get_mut(&coord) else {
            return false;
        };
        data.set(i, j, k, block);
        if !self.modified_chunks.contains(&coord) {
            self.modified_chunks.push(coord);
        }
        true
    }

    /// Take the list of edited chunks and clear the internal list
    pub fn take_modified(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.modified_chunks)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
