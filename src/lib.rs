//! Skyvox - procedural terrain and clouds for a block world demo

pub mod core;
pub mod voxel;
pub mod terrain;
pub mod generation;
