//! Database Tables
//!
//! The host's in-memory table set: item templates, price tables, traders
//! and locale strings, loaded from a JSON data directory at startup.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

use super::item_registry::ItemCatalog;
use super::price_tables::{Handbook, PriceTable};
use crate::error::{ModError, Result};
use crate::trader::TraderRecord;

#[derive(Default)]
pub struct Templates {
    pub items: ItemCatalog,
    pub prices: PriceTable,
    pub handbook: Handbook,
}

/// Global locale tables keyed by locale code (`en`, `fr`, ...)
#[derive(Debug, Default)]
pub struct Locales {
    pub global: BTreeMap<String, HashMap<String, String>>,
}

#[derive(Default)]
pub struct DatabaseTables {
    pub templates: Templates,
    pub traders: HashMap<String, TraderRecord>,
    pub locales: Locales,
}

impl DatabaseTables {
    /// Load all tables from a data directory
    pub fn load_from_directory(data_dir: &Path) -> Result<Self> {
        let templates_dir = data_dir.join("templates");

        let templates = Templates {
            items: ItemCatalog::load_from_file(&templates_dir.join("items.json"))?,
            prices: PriceTable::load_from_file(&templates_dir.join("prices.json"))?,
            handbook: Handbook::load_from_file(&templates_dir.join("handbook.json"))?,
        };
        info!(
            "Loaded {} prices and {} handbook entries",
            templates.prices.len(),
            templates.handbook.items.len()
        );

        let locales = Locales::load_from_directory(&data_dir.join("locales").join("global"))?;

        Ok(Self {
            templates,
            traders: HashMap::new(),
            locales,
        })
    }
}

impl Locales {
    /// Load every `<code>.json` string table in a directory
    pub fn load_from_directory(dir: &Path) -> Result<Self> {
        let mut locales = Self::default();

        if !dir.exists() {
            warn!("Locale directory does not exist: {:?}", dir);
            return Ok(locales);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ModError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ModError::io(dir, e))?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "json") {
                let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let content = std::fs::read_to_string(&path).map_err(|e| ModError::io(&path, e))?;
                let table: HashMap<String, String> =
                    serde_json::from_str(&content).map_err(|e| ModError::json(&path, e))?;
                locales.global.insert(code.to_string(), table);
            }
        }

        info!("Loaded {} locale tables", locales.global.len());
        Ok(locales)
    }
}
