//! Price Tables
//!
//! Market prices (`templates/prices.json`) and the static handbook
//! (`templates/handbook.json`) used as a fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ModError, Result};

/// Market price per template id. Entries may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ModError::json(path, e))
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.prices.get(id).copied()
    }

    pub fn insert(&mut self, id: &str, price: f64) {
        self.prices.insert(id.to_string(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandbookCategory {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ParentId", default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandbookItem {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ParentId", default)]
    pub parent_id: String,
    #[serde(rename = "Price")]
    pub price: f64,
}

/// Static reference prices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Handbook {
    #[serde(rename = "Categories", default)]
    pub categories: Vec<HandbookCategory>,
    #[serde(rename = "Items", default)]
    pub items: Vec<HandbookItem>,
}

impl Handbook {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ModError::json(path, e))
    }

    /// Price of the first entry with a matching id
    pub fn price(&self, id: &str) -> Option<f64> {
        self.items.iter().find(|item| item.id == id).map(|item| item.price)
    }

    pub fn push(&mut self, id: &str, price: f64) {
        self.items.push(HandbookItem {
            id: id.to_string(),
            parent_id: String::new(),
            price,
        });
    }
}
