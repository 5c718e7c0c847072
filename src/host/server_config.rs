use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::config::RefreshWindow;

/// Restock window of one trader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTime {
    pub trader_id: String,
    pub seconds: RefreshWindow,
}

/// Host trader settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderConfig {
    pub update_time: Vec<UpdateTime>,
    /// Trader ids known to the server
    #[serde(skip)]
    pub registered: BTreeSet<String>,
}

impl TraderConfig {
    /// Window of a trader; the last pushed entry wins
    pub fn update_time_for(&self, trader_id: &str) -> Option<RefreshWindow> {
        self.update_time
            .iter()
            .rev()
            .find(|entry| entry.trader_id == trader_id)
            .map(|entry| entry.seconds)
    }
}

/// Host flea-market settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagfairConfig {
    pub traders: HashMap<String, bool>,
}

impl RagfairConfig {
    pub fn is_participating(&self, trader_id: &str) -> bool {
        self.traders.get(trader_id).copied().unwrap_or(false)
    }
}
