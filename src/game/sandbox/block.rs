//! Block Definitions
//!
//! Immutable templates for placeable blocks and the registry that loads them.
//! Definitions are shared as `Rc<BlockDefinition>` between the registry, the
//! placement store and callers receiving removed blocks back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::render::RenderTemplate;

fn default_destructible() -> bool {
    true
}

/// What a block looks like and whether it can be destroyed once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Registry key and display name
    pub name: String,
    /// Visual template the renderer instantiates
    pub template: RenderTemplate,
    /// Destructible blocks are replaced or removed freely; others are permanent
    #[serde(default = "default_destructible")]
    pub destructible: bool,
}

impl BlockDefinition {
    /// Create a destructible block definition.
    pub fn new(name: impl Into<String>, template: RenderTemplate) -> Self {
        Self {
            name: name.into(),
            template,
            destructible: true,
        }
    }

    /// Make the block permanent once placed.
    pub fn indestructible(mut self) -> Self {
        self.destructible = false;
        self
    }
}

/// Errors from loading or extending a [`BlockRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block registry {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed block registry: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("block '{0}' is already registered")]
    DuplicateName(String),
}

#[derive(Deserialize)]
struct RegistryFile {
    blocks: Vec<BlockDefinition>,
}

/// Named collection of block definitions, in registration order.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    definitions: Vec<Rc<BlockDefinition>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from JSON of the form `{"blocks": [{"name", "template", "destructible"}]}`.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for definition in file.blocks {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), blocks = registry.len(), "loaded block registry");
        Ok(registry)
    }

    /// Add a definition. Names must be unique.
    pub fn register(
        &mut self,
        definition: BlockDefinition,
    ) -> Result<Rc<BlockDefinition>, RegistryError> {
        if self.get(&definition.name).is_some() {
            return Err(RegistryError::DuplicateName(definition.name));
        }
        let definition = Rc::new(definition);
        self.definitions.push(Rc::clone(&definition));
        Ok(definition)
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<Rc<BlockDefinition>> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .map(Rc::clone)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<BlockDefinition>> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builders() {
        let grass = BlockDefinition::new("grass", RenderTemplate(1));
        assert!(grass.destructible);
        let bedrock = BlockDefinition::new("bedrock", RenderTemplate(2)).indestructible();
        assert!(!bedrock.destructible);
    }

    #[test]
    fn test_registry_from_json() {
        let json = r#"{
            "blocks": [
                { "name": "grass", "template": 1 },
                { "name": "bedrock", "template": 2, "destructible": false }
            ]
        }"#;
        let registry = BlockRegistry::from_json_str(json).unwrap();
        assert_eq!(registry.len(), 2);

        let grass = registry.get("grass").unwrap();
        assert_eq!(grass.template, RenderTemplate(1));
        assert!(grass.destructible); // default

        let bedrock = registry.get("bedrock").unwrap();
        assert!(!bedrock.destructible);

        assert!(registry.get("lava").is_none());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = BlockRegistry::new();
        registry
            .register(BlockDefinition::new("stone", RenderTemplate(3)))
            .unwrap();
        let err = registry
            .register(BlockDefinition::new("stone", RenderTemplate(4)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "stone"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_parse_error() {
        let err = BlockRegistry::from_json_str("{ \"blocks\": 3 }").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_registry_shares_definitions() {
        let mut registry = BlockRegistry::new();
        let added = registry
            .register(BlockDefinition::new("sand", RenderTemplate(5)))
            .unwrap();
        let looked_up = registry.get("sand").unwrap();
        assert!(Rc::ptr_eq(&added, &looked_up));
    }
}
