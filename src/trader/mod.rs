//! Trader Records
//!
//! Trader base metadata, assort layout, the fluent assort builder and the
//! host registration helpers.

pub mod assort;
pub mod builder;
pub mod definition;
pub mod helpers;

pub use assort::{AssortItem, BarterCost, ItemUpd, TraderAssort, ROOT_SLOT};
pub use builder::AssortBuilder;
pub use definition::{QuestAssort, TraderBase, TraderRecord};
