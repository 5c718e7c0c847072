use serde::{Deserialize, Serialize};

// ============================================================================
// Base Classes
// ============================================================================

/// Catalog node ids used as base classes
pub mod base_class {
    pub const AMMO: &str = "5485a8684bdc2da71d8b4567";
    pub const THROW_WEAPON: &str = "543be6564bdc2df4348b4568";
}

// ============================================================================
// Currencies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Money {
    #[default]
    Roubles,
    Dollars,
    Euros,
}

impl Money {
    /// Catalog template id of the currency item
    pub fn tpl(&self) -> &'static str {
        match self {
            Money::Roubles => "5449016a4bdc2d6f028b456f",
            Money::Dollars => "5696686a4bdc2da3298b456a",
            Money::Euros => "569668774bdc2da2298b4568",
        }
    }
}

// ============================================================================
// Item Templates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemplateKind {
    #[default]
    Item,
    Node,
}

/// One catalog entry as stored in `templates/items.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_type", default)]
    pub kind: TemplateKind,
    #[serde(rename = "_props", default)]
    pub props: serde_json::Value,
}

impl ItemTemplate {
    pub fn item(id: &str, name: &str, parent: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent: parent.to_string(),
            kind: TemplateKind::Item,
            props: serde_json::Value::Null,
        }
    }

    pub fn node(id: &str, name: &str, parent: &str) -> Self {
        Self {
            kind: TemplateKind::Node,
            ..Self::item(id, name, parent)
        }
    }

    pub fn is_item(&self) -> bool {
        self.kind == TemplateKind::Item
    }
}
