//! Catalog filter
//!
//! Selects catalog items belonging to any of a set of base classes.

use std::collections::BTreeSet;
use tracing::debug;

use crate::data::base_class;
use crate::host::ItemCatalogReader;

/// Shrapnel and other unusable items never sold by the trader
pub const BLACKLISTED_ITEMS: [&str; 7] = [
    "5943d9c186f7745a13413ac9",
    "67654a6759116d347b0bfb86",
    "5996f6cb86f774678763a6ca",
    "5996f6fc86f7745e585b4de3",
    "66ec2aa6daf127599c0c31f1",
    "63b35f281745dd52341e5da7",
    "5996f6d686f77467977ba6cc",
];

/// Base classes the trader stocks
pub const STOCKED_BASE_CLASSES: [&str; 2] = [base_class::AMMO, base_class::THROW_WEAPON];

/// Ids of items matching any base class, minus the blacklist. Sorted and
/// without duplicates.
pub fn filter_catalog<C: ItemCatalogReader + ?Sized>(
    catalog: &C,
    base_classes: &[&str],
    blacklist: &[&str],
) -> Vec<String> {
    let mut selected = BTreeSet::new();

    for template in catalog.templates() {
        if template.id.is_empty() {
            continue;
        }
        if !base_classes
            .iter()
            .any(|class| catalog.is_of_base_class(&template.id, class))
        {
            continue;
        }
        if blacklist.contains(&template.id.as_str()) {
            debug!("ItemID: {} is blacklisted", template.id);
            continue;
        }
        selected.insert(template.id.clone());
    }

    selected.into_iter().collect()
}
