//! Trader Assort
//!
//! The purchasable offers of a trader in the layout the game client reads:
//! a flat item list (presets are parent-linked), a barter scheme and a
//! loyalty-level gate per root item.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parent and slot id of items that are sold directly
pub const ROOT_SLOT: &str = "hideout";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemUpd {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unlimited_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack_objects_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub buy_restriction_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub buy_restriction_current: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssortItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", skip_serializing_if = "Option::is_none", default)]
    pub slot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub upd: Option<ItemUpd>,
}

impl AssortItem {
    /// Child item of a preset
    pub fn child(id: &str, tpl: &str, parent_id: &str, slot_id: &str) -> Self {
        Self {
            id: id.to_string(),
            tpl: tpl.to_string(),
            parent_id: Some(parent_id.to_string()),
            slot_id: Some(slot_id.to_string()),
            upd: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref() == Some(ROOT_SLOT)
    }

    pub fn upd_mut(&mut self) -> &mut ItemUpd {
        self.upd.get_or_insert_with(ItemUpd::default)
    }
}

/// One payment requirement of a barter scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarterCost {
    pub count: u64,
    #[serde(rename = "_tpl")]
    pub tpl: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraderAssort {
    #[serde(rename = "nextResupply", default)]
    pub next_resupply: i64,
    pub items: Vec<AssortItem>,
    pub barter_scheme: HashMap<String, Vec<Vec<BarterCost>>>,
    pub loyal_level_items: HashMap<String, u32>,
}

impl TraderAssort {
    pub fn contains_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn root_items(&self) -> impl Iterator<Item = &AssortItem> {
        self.items.iter().filter(|item| item.is_root())
    }

    pub fn root_items_mut(&mut self) -> impl Iterator<Item = &mut AssortItem> {
        self.items.iter_mut().filter(|item| item.is_root())
    }

    /// Items parented (directly or through other children) to a root item
    pub fn children_of(&self, root_id: &str) -> Vec<&AssortItem> {
        let mut found: Vec<&AssortItem> = Vec::new();
        let mut frontier = vec![root_id.to_string()];

        while let Some(parent) = frontier.pop() {
            for item in &self.items {
                if item.parent_id.as_deref() == Some(parent.as_str()) {
                    frontier.push(item.id.clone());
                    found.push(item);
                }
            }
        }
        found
    }

    /// First payment option of a root item
    pub fn cost_of(&self, id: &str) -> Option<&[BarterCost]> {
        self.barter_scheme
            .get(id)
            .and_then(|options| options.first())
            .map(|costs| costs.as_slice())
    }
}
