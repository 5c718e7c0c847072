//! Flea-market trader offers
//!
//! Listings derived from a participating trader's assort. Rebuilt per trader
//! whenever its stock changes.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::trader::{BarterCost, TraderRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderOffer {
    pub id: String,
    pub trader_id: String,
    pub root_item_id: String,
    pub tpl: String,
    pub price: Vec<BarterCost>,
    /// `None` when the trader has unlimited stock
    pub quantity: Option<u64>,
    pub buy_restriction_max: Option<u32>,
    pub loyalty_level: u32,
    pub start_time: i64,
}

#[derive(Default)]
pub struct FleaMarket {
    offers: HashMap<String, Vec<TraderOffer>>,
}

impl FleaMarket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the trader's offers. Non-participants and sold-out
    /// entries are not listed. Returns the number of offers.
    pub fn regenerate(&mut self, trader: &TraderRecord, participating: bool) -> usize {
        let trader_id = trader.id().to_string();

        if !participating {
            self.offers.remove(&trader_id);
            return 0;
        }

        let start_time = chrono::Utc::now().timestamp();
        let offers: Vec<TraderOffer> = trader
            .assort
            .root_items()
            .filter_map(|item| {
                let upd = item.upd.clone().unwrap_or_default();
                let quantity = if upd.unlimited_count == Some(true) {
                    None
                } else {
                    Some(upd.stack_objects_count.unwrap_or(0))
                };
                if quantity == Some(0) {
                    return None;
                }

                Some(TraderOffer {
                    id: item.id.clone(),
                    trader_id: trader_id.clone(),
                    root_item_id: item.id.clone(),
                    tpl: item.tpl.clone(),
                    price: trader.assort.cost_of(&item.id).map(<[_]>::to_vec).unwrap_or_default(),
                    quantity,
                    buy_restriction_max: upd.buy_restriction_max,
                    loyalty_level: trader.assort.loyal_level_items.get(&item.id).copied().unwrap_or(1),
                    start_time,
                })
            })
            .collect();

        let count = offers.len();
        debug!("Generated {} flea offers for trader {}", count, trader_id);
        self.offers.insert(trader_id, offers);
        count
    }

    pub fn offers_for(&self, trader_id: &str) -> &[TraderOffer] {
        self.offers.get(trader_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of listed offers
    pub fn len(&self) -> usize {
        self.offers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Money;
    use crate::trader::{AssortBuilder, TraderBase};

    fn trader() -> TraderRecord {
        let mut trader = TraderRecord::new(
            TraderBase::from_json(
                r#"{ "_id": "t1", "name": "N", "nickname": "K", "location": "L", "avatar": "/a.jpg" }"#,
            )
            .unwrap(),
        );
        let mut builder = AssortBuilder::new();
        builder
            .create_single_assort_item("unlimited")
            .add_unlimited_stack_count()
            .add_money_cost(Money::Roubles, 100)
            .add_loyalty_level(2)
            .export(&mut trader);
        builder
            .create_single_assort_item("limited")
            .add_stack_count(7)
            .add_buy_restriction(3)
            .export(&mut trader);
        builder
            .create_single_assort_item("sold_out")
            .add_stack_count(0)
            .export(&mut trader);
        trader
    }

    #[test]
    fn test_regenerate_lists_in_stock_items() {
        let mut flea = FleaMarket::new();
        assert_eq!(flea.regenerate(&trader(), true), 2);

        let offers = flea.offers_for("t1");
        let unlimited = offers.iter().find(|o| o.tpl == "unlimited").unwrap();
        assert_eq!(unlimited.quantity, None);
        assert_eq!(unlimited.price[0].count, 100);
        assert_eq!(unlimited.loyalty_level, 2);

        let limited = offers.iter().find(|o| o.tpl == "limited").unwrap();
        assert_eq!(limited.quantity, Some(7));
        assert_eq!(limited.buy_restriction_max, Some(3));
        assert!(limited.price.is_empty());
    }

    #[test]
    fn test_non_participants_are_delisted() {
        let mut flea = FleaMarket::new();
        let trader = trader();
        flea.regenerate(&trader, true);
        assert_eq!(flea.len(), 2);

        assert_eq!(flea.regenerate(&trader, false), 0);
        assert!(flea.is_empty());
        assert!(flea.offers_for("t1").is_empty());
    }
}
