pub mod item_def;
pub mod item_registry;
pub mod price_tables;
pub mod tables;

pub use item_def::{base_class, ItemTemplate, Money, TemplateKind};
pub use item_registry::ItemCatalog;
pub use price_tables::{Handbook, HandbookItem, PriceTable};
pub use tables::{DatabaseTables, Locales, Templates};
