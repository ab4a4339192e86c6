//! Material and block-type registry.
//!
//! Materials are registered by name first; block codes then reference a
//! material by name. Code `0` is air and can never be registered.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{AIR, BlockId, Error, Result};

/// How a material is drawn by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    /// Flat RGB color, components in 0..=1
    Color([f32; 3]),
    /// Texture image path, resolved by the host
    Texture(PathBuf),
}

/// A named material
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub appearance: Appearance,
}

/// Registry mapping block codes to materials
#[derive(Debug, Default)]
pub struct BlockRegistry {
    materials: Vec<Material>,
    by_name: HashMap<String, usize>,
    blocks: HashMap<BlockId, usize>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material. Re-registering a name replaces its appearance.
    pub fn register_material(&mut self, name: impl Into<String>, appearance: Appearance) {
        let name = name.into();
        if let Some(&idx) = self.by_name.get(&name) {
            self.materials[idx].appearance = appearance;
            return;
        }
        let idx = self.materials.len();
        self.by_name.insert(name.clone(), idx);
        self.materials.push(Material { name, appearance });
    }

    /// Register block code `id` drawn with an existing material
    pub fn register_block(&mut self, id: BlockId, material: &str) -> Result<BlockId> {
        if id == AIR {
            return Err(Error::Registry("block id 0 is reserved for air".into()));
        }
        let Some(&idx) = self.by_name.get(material) else {
            return Err(Error::Registry(format!(
                "block {} references unknown material '{}'",
                id, material
            )));
        };
        if let Some(&existing) = self.blocks.get(&id) {
            return Err(Error::Registry(format!(
                "block {} already registered with material '{}'",
                id, self.materials[existing].name
            )));
        }
        self.blocks.insert(id, idx);
        log::debug!("Registered block {} -> {}", id, material);
        Ok(id)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.by_name.get(name).map(|&idx| &self.materials[idx])
    }

    /// Material drawn for a block code, `None` for air or unknown codes
    pub fn block_material(&self, id: BlockId) -> Option<&Material> {
        self.blocks.get(&id).map(|&idx| &self.materials[idx])
    }

    pub fn is_registered(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_dirt() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry.register_material("dirt", Appearance::Color([0.45, 0.36, 0.22]));
        registry
    }

    #[test]
    fn test_register_block_with_material() {
        let mut registry = registry_with_dirt();
        assert_eq!(registry.register_block(1, "dirt").unwrap(), 1);
        assert!(registry.is_registered(1));
        assert_eq!(registry.block_material(1).unwrap().name, "dirt");
        assert!(registry.block_material(AIR).is_none());
    }

    #[test]
    fn test_register_block_unknown_material() {
        let mut registry = registry_with_dirt();
        let err = registry.register_block(2, "grass").unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
        assert!(!registry.is_registered(2));
    }

    #[test]
    fn test_register_air_rejected() {
        let mut registry = registry_with_dirt();
        assert!(registry.register_block(AIR, "dirt").is_err());
    }

    #[test]
    fn test_register_duplicate_block_rejected() {
        let mut registry = registry_with_dirt();
        registry.register_block(1, "dirt").unwrap();
        assert!(registry.register_block(1, "dirt").is_err());
        assert_eq!(registry.block_count(), 1);
    }

    #[test]
    fn test_reregister_material_updates_appearance() {
        let mut registry = registry_with_dirt();
        registry.register_material("dirt", Appearance::Texture("textures/dirt.png".into()));
        assert_eq!(registry.material_count(), 1);
        assert_eq!(
            registry.material("dirt").unwrap().appearance,
            Appearance::Texture("textures/dirt.png".into())
        );
    }
}
