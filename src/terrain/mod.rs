//! Procedural terrain and cloud generation

pub mod generator;
pub use generator::{TerrainBlocks, TerrainGenerator, height_at};

pub mod clouds;
pub use clouds::{CloudFade, CloudField, CloudNoiseParams, CloudParams, NoiseClouds};
