use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use super::item_def::ItemTemplate;
use crate::error::{ModError, Result};

/// Read-only view of the item catalog
pub struct ItemCatalog {
    items: HashMap<String, ItemTemplate>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Load `items.json`, a table of template id -> template
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        let table: HashMap<String, ItemTemplate> =
            serde_json::from_str(&content).map_err(|e| ModError::json(path, e))?;

        let mut catalog = Self::new();
        for (key, mut template) in table {
            if template.id.is_empty() {
                template.id = key.clone();
            } else if template.id != key {
                warn!("Template key '{}' does not match its _id '{}'", key, template.id);
            }
            catalog.insert(template);
        }

        info!("Loaded {} item templates", catalog.len());
        Ok(catalog)
    }

    pub fn insert(&mut self, template: ItemTemplate) {
        self.items.insert(template.id.clone(), template);
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.get(id)
    }

    /// Get all templates
    pub fn all(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.items.values()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if `base_class` is an ancestor of the template. Only `Item`
    /// templates have base classes; the template itself does not count.
    pub fn is_of_base_class(&self, id: &str, base_class: &str) -> bool {
        let Some(template) = self.items.get(id) else {
            return false;
        };
        if !template.is_item() {
            return false;
        }

        let mut seen = HashSet::new();
        let mut parent = template.parent.as_str();
        while !parent.is_empty() && seen.insert(parent) {
            if parent == base_class {
                return true;
            }
            parent = match self.items.get(parent) {
                Some(node) => node.parent.as_str(),
                None => break,
            };
        }
        false
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}
