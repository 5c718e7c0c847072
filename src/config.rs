//! Mod Configuration
//!
//! Loads the trader's `config/config.json` once at startup and validates the
//! restock window before it reaches the host trader config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::error;

use crate::error::{ModError, Result};

pub const DEFAULT_REFRESH_MIN: i64 = 1800;
pub const DEFAULT_REFRESH_MAX: i64 = 3600;

fn default_true() -> bool { true }
fn default_multiplier() -> f64 { 1.0 }
fn default_refresh_min() -> i64 { DEFAULT_REFRESH_MIN }
fn default_refresh_max() -> i64 { DEFAULT_REFRESH_MAX }

/// Settings read from `config/config.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModConfig {
    /// Accepted for compatibility with existing config files; not read.
    #[serde(default)]
    pub use_barters: bool,
    /// Accepted for compatibility; market prices are always tried first.
    #[serde(default = "default_true")]
    pub use_flea_prices: bool,
    #[serde(default = "default_multiplier")]
    pub item_price_multiplier: f64,
    #[serde(default)]
    pub randomize_stock_available: bool,
    /// Percent chance (0-100) that a randomized entry ends up out of stock
    #[serde(default)]
    pub out_of_stock_chance: i64,
    #[serde(default)]
    pub randomize_buy_restriction: bool,
    #[serde(default = "default_refresh_min")]
    pub trader_refresh_min: i64,
    #[serde(default = "default_refresh_max")]
    pub trader_refresh_max: i64,
    #[serde(default = "default_true")]
    pub add_trader_to_flea: bool,
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            use_barters: false,
            use_flea_prices: true,
            item_price_multiplier: 1.0,
            randomize_stock_available: false,
            out_of_stock_chance: 0,
            randomize_buy_restriction: false,
            trader_refresh_min: DEFAULT_REFRESH_MIN,
            trader_refresh_max: DEFAULT_REFRESH_MAX,
            add_trader_to_flea: true,
            debug_logging: false,
        }
    }
}

impl ModConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| ModError::json(path, e))
    }

    /// Out-of-stock chance clamped to a valid percentage
    pub fn out_of_stock_percent(&self) -> u32 {
        self.out_of_stock_chance.clamp(0, 100) as u32
    }

    /// Whether the assort route has anything to randomize
    pub fn randomizes_anything(&self) -> bool {
        self.randomize_stock_available || self.randomize_buy_restriction
    }

    /// Restock window to hand to the host, reset to defaults if invalid.
    /// Each violated rule is logged at error level; startup continues.
    pub fn refresh_window(&self) -> RefreshWindow {
        let (window, issues) =
            RefreshWindow::validated(self.trader_refresh_min, self.trader_refresh_max);

        for issue in issues {
            match issue {
                RefreshWindowIssue::MinNotBelowMax => error!(
                    "[CONFIG] traderRefreshMin must be less than traderRefreshMax. Refresh timers have been reset to default"
                ),
                RefreshWindowIssue::MaxTooLow => error!(
                    "[CONFIG] You set traderRefreshMax too low. Refresh timers have been reset to default."
                ),
            }
        }

        window
    }
}

// ============================================================================
// Refresh Window
// ============================================================================

/// Trader restock interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshWindow {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshWindowIssue {
    MinNotBelowMax,
    MaxTooLow,
}

impl Default for RefreshWindow {
    fn default() -> Self {
        Self {
            min: DEFAULT_REFRESH_MIN,
            max: DEFAULT_REFRESH_MAX,
        }
    }
}

impl RefreshWindow {
    /// Apply both rules in order. The second rule sees the result of the
    /// first, so a reset by rule one never triggers rule two.
    pub fn validated(min: i64, max: i64) -> (Self, Vec<RefreshWindowIssue>) {
        let mut window = Self { min, max };
        let mut issues = Vec::new();

        if window.min >= window.max {
            window = Self::default();
            issues.push(RefreshWindowIssue::MinNotBelowMax);
        }
        if window.max <= 2 {
            window = Self::default();
            issues.push(RefreshWindowIssue::MaxTooLow);
        }

        (window, issues)
    }
}
