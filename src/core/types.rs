//! Core type aliases and re-exports

pub use glam::IVec3;

/// Numeric block-type code; `0` is reserved for air
pub type BlockId = u16;

/// Block code for an empty cell
pub const AIR: BlockId = 0;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
