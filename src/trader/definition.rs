//! Trader Definition Structures
//!
//! The trader record inserted into the host database: base metadata, the
//! assort and the quest assort.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::assort::TraderAssort;

/// Static trader metadata, deserialized from `db/base.json`. Fields the mod
/// does not read are carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderBase {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub nickname: String,
    pub location: String,
    pub avatar: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "unlockedByDefault", default)]
    pub unlocked_by_default: bool,
    #[serde(rename = "loyaltyLevels", default)]
    pub loyalty_levels: Vec<LoyaltyLevel>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_currency() -> String {
    "RUB".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyLevel {
    #[serde(rename = "minLevel", default)]
    pub min_level: i32,
    #[serde(rename = "minSalesSum", default)]
    pub min_sales_sum: i64,
    #[serde(rename = "minStanding", default)]
    pub min_standing: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TraderBase {
    /// Parse the base template
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Image route key: the avatar path with its first `.jpg` removed
    pub fn avatar_route(&self) -> String {
        self.avatar.replacen(".jpg", "", 1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestAssort {
    pub started: HashMap<String, String>,
    pub success: HashMap<String, String>,
    pub fail: HashMap<String, String>,
}

/// A trader as stored in the host database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderRecord {
    pub base: TraderBase,
    pub assort: TraderAssort,
    pub questassort: QuestAssort,
}

impl TraderRecord {
    /// New record with an empty assort
    pub fn new(base: TraderBase) -> Self {
        Self {
            base,
            assort: TraderAssort::default(),
            questassort: QuestAssort::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }
}
