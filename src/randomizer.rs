//! Stock randomizer
//!
//! Redraws buy limits and stock counts of a trader's directly sold items.
//! Every call draws fresh values; nothing about earlier draws is kept.

use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;

use crate::config::ModConfig;
use crate::error::{ModError, Result};
use crate::host::RouteContext;
use crate::trader::TraderAssort;

pub const BUY_RESTRICTION_RANGE: RangeInclusive<u32> = 1..=10;
pub const STOCK_RANGE: RangeInclusive<u64> = 1..=25;

#[derive(Debug, Clone, Copy, Default)]
pub struct StockSettings {
    pub randomize_stock: bool,
    /// Percent chance (0-100) of an entry being sold out
    pub out_of_stock_chance: u32,
    pub randomize_buy_restriction: bool,
}

impl From<&ModConfig> for StockSettings {
    fn from(config: &ModConfig) -> Self {
        Self {
            randomize_stock: config.randomize_stock_available,
            out_of_stock_chance: config.out_of_stock_percent(),
            randomize_buy_restriction: config.randomize_buy_restriction,
        }
    }
}

/// Randomize root entries in place. Preset children are left alone.
/// Returns true if either branch ran.
pub fn randomize_assort<R: Rng>(
    assort: &mut TraderAssort,
    settings: &StockSettings,
    rng: &mut R,
) -> bool {
    if settings.randomize_buy_restriction {
        for item in assort.root_items_mut() {
            item.upd_mut().buy_restriction_max = Some(rng.gen_range(BUY_RESTRICTION_RANGE));
        }
    }

    if settings.randomize_stock {
        for item in assort.root_items_mut() {
            let count = if rng.gen_range(0..100) < settings.out_of_stock_chance {
                0
            } else {
                rng.gen_range(STOCK_RANGE)
            };
            let upd = item.upd_mut();
            upd.unlimited_count = Some(false);
            upd.stack_objects_count = Some(count);
        }
    }

    settings.randomize_buy_restriction || settings.randomize_stock
}

/// Randomize a trader's assort and, if anything changed, rebuild its flea
/// listings so they show the new counts.
pub fn refresh_trader_stock<C: RouteContext + ?Sized, R: Rng>(
    host: &mut C,
    trader_id: &str,
    settings: &StockSettings,
    rng: &mut R,
) -> Result<bool> {
    let trader = host
        .trader_mut(trader_id)
        .ok_or_else(|| ModError::UnknownTrader(trader_id.to_string()))?;

    let changed = randomize_assort(&mut trader.assort, settings, rng);
    if changed {
        debug!("Randomized stock for trader {}", trader_id);
        host.regenerate_trader_offers(trader_id);
    }
    Ok(changed)
}
