//! Fluent Assort Builder
//!
//! Stages one offer at a time (a single item or a parent-linked preset),
//! then exports it into a trader's assort.
//!
//! ```ignore
//! builder
//!     .create_single_assort_item(tpl)
//!     .add_unlimited_stack_count()
//!     .add_money_cost(Money::Roubles, 1200)
//!     .add_loyalty_level(1)
//!     .export(&mut trader);
//! ```

use std::collections::HashMap;
use tracing::{error, warn};

use super::assort::{AssortItem, BarterCost, ItemUpd, ROOT_SLOT};
use super::definition::TraderRecord;
use crate::data::Money;

const DEFAULT_STACK_COUNT: u64 = 100;
const UNLIMITED_STACK_COUNT: u64 = 999_999;

/// New 24 character hex item id
pub fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

#[derive(Default)]
pub struct AssortBuilder {
    items_to_sell: Vec<AssortItem>,
    barter_scheme: HashMap<String, Vec<Vec<BarterCost>>>,
    loyalty_level: HashMap<String, u32>,
}

impl AssortBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a single item sold on its own, with a generated id
    pub fn create_single_assort_item(&mut self, tpl: &str) -> &mut Self {
        self.items_to_sell.push(AssortItem {
            id: generate_id(),
            tpl: tpl.to_string(),
            parent_id: Some(ROOT_SLOT.to_string()),
            slot_id: Some(ROOT_SLOT.to_string()),
            upd: Some(ItemUpd {
                unlimited_count: Some(false),
                stack_objects_count: Some(DEFAULT_STACK_COUNT),
                ..Default::default()
            }),
        });
        self
    }

    /// Stage a preset. The first item is the root; every id is replaced
    /// with a fresh one and parent links are remapped to match.
    pub fn create_complex_assort_item(&mut self, items: Vec<AssortItem>) -> &mut Self {
        let new_ids: HashMap<String, String> = items
            .iter()
            .map(|item| (item.id.clone(), generate_id()))
            .collect();

        for (index, mut item) in items.into_iter().enumerate() {
            if let Some(new_id) = new_ids.get(&item.id) {
                item.id = new_id.clone();
            }
            if index == 0 {
                item.parent_id = Some(ROOT_SLOT.to_string());
                item.slot_id = Some(ROOT_SLOT.to_string());
                let upd = item.upd_mut();
                upd.unlimited_count = Some(false);
                upd.stack_objects_count = Some(DEFAULT_STACK_COUNT);
            } else if let Some(parent) = item.parent_id.as_ref().and_then(|p| new_ids.get(p)) {
                item.parent_id = Some(parent.clone());
            }
            self.items_to_sell.push(item);
        }
        self
    }

    pub fn add_unlimited_stack_count(&mut self) -> &mut Self {
        if let Some(root) = self.root_mut() {
            let upd = root.upd_mut();
            upd.stack_objects_count = Some(UNLIMITED_STACK_COUNT);
            upd.unlimited_count = Some(true);
        }
        self
    }

    pub fn add_stack_count(&mut self, count: u64) -> &mut Self {
        if let Some(root) = self.root_mut() {
            let upd = root.upd_mut();
            upd.stack_objects_count = Some(count);
            upd.unlimited_count = Some(false);
        }
        self
    }

    /// Limit how many a player may buy per restock
    pub fn add_buy_restriction(&mut self, max: u32) -> &mut Self {
        if let Some(root) = self.root_mut() {
            let upd = root.upd_mut();
            upd.buy_restriction_max = Some(max);
            upd.buy_restriction_current = Some(0);
        }
        self
    }

    /// Replace the price with a single currency payment
    pub fn add_money_cost(&mut self, currency: Money, amount: u64) -> &mut Self {
        if let Some(root_id) = self.root_id() {
            self.barter_scheme.insert(
                root_id,
                vec![vec![BarterCost {
                    count: amount,
                    tpl: currency.tpl().to_string(),
                }]],
            );
        }
        self
    }

    /// Add an item requirement to the first payment option
    pub fn add_barter_cost(&mut self, tpl: &str, count: u64) -> &mut Self {
        if let Some(root_id) = self.root_id() {
            let options = self.barter_scheme.entry(root_id).or_default();
            if options.is_empty() {
                options.push(Vec::new());
            }
            options[0].push(BarterCost {
                count,
                tpl: tpl.to_string(),
            });
        }
        self
    }

    pub fn add_loyalty_level(&mut self, level: u32) -> &mut Self {
        if let Some(root_id) = self.root_id() {
            self.loyalty_level.insert(root_id, level);
        }
        self
    }

    /// Write the staged offer into the trader and reset the builder.
    /// Returns false (and writes nothing) if the root id is already used.
    pub fn export(&mut self, trader: &mut TraderRecord) -> bool {
        let staged = std::mem::take(&mut self.items_to_sell);
        let mut barter_scheme = std::mem::take(&mut self.barter_scheme);
        let mut loyalty_level = std::mem::take(&mut self.loyalty_level);

        let Some(root_id) = staged.first().map(|item| item.id.clone()) else {
            warn!("Nothing staged to export to trader {}", trader.id());
            return false;
        };

        if trader.assort.contains_item(&root_id) {
            error!(
                "Unable to add complex item with item key {}, key already used",
                root_id
            );
            return false;
        }

        trader.assort.items.extend(staged);
        if let Some(scheme) = barter_scheme.remove(&root_id) {
            trader.assort.barter_scheme.insert(root_id.clone(), scheme);
        }
        if let Some(level) = loyalty_level.remove(&root_id) {
            trader.assort.loyal_level_items.insert(root_id, level);
        }
        true
    }

    fn root_mut(&mut self) -> Option<&mut AssortItem> {
        let root = self.items_to_sell.first_mut();
        if root.is_none() {
            warn!("Assort builder used before an item was staged");
        }
        root
    }

    fn root_id(&mut self) -> Option<String> {
        self.root_mut().map(|root| root.id.clone())
    }
}
