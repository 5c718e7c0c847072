//! Host Interfaces
//!
//! The narrow set of server capabilities the trader mod calls. `HostState`
//! implements all of them over the in-memory tables; tests implement only
//! what they need.

pub mod image_router;
pub mod ragfair;
pub mod router;
pub mod server_config;
pub mod settings;
pub mod state;

pub use image_router::ImageRouter;
pub use ragfair::{FleaMarket, TraderOffer};
pub use router::{DynamicRouter, RouteAction, RouteRequest};
pub use server_config::{RagfairConfig, TraderConfig, UpdateTime};
pub use settings::ServerSettings;
pub use state::HostState;

use std::path::PathBuf;

use crate::data::ItemTemplate;
use crate::trader::TraderRecord;

/// Read access to the item catalog
pub trait ItemCatalogReader {
    fn templates(&self) -> Box<dyn Iterator<Item = &ItemTemplate> + '_>;
    fn template(&self, id: &str) -> Option<&ItemTemplate>;
    fn is_of_base_class(&self, id: &str, base_class: &str) -> bool;
}

/// Read access to market and handbook prices
pub trait PriceReader {
    fn market_price(&self, id: &str) -> Option<f64>;
    fn handbook_price(&self, id: &str) -> Option<f64>;
}

/// Insert traders and edit their records
pub trait TraderWriter {
    fn insert_trader(&mut self, record: TraderRecord);
    fn trader(&self, id: &str) -> Option<&TraderRecord>;
    fn trader_mut(&mut self, id: &str) -> Option<&mut TraderRecord>;
}

/// Write display strings into the global locale tables
pub trait LocaleWriter {
    fn locale_codes(&self) -> Vec<String>;
    fn set_locale_text(&mut self, locale: &str, key: &str, text: &str);
}

pub trait ImageRegistrar {
    fn add_image_route(&mut self, key: &str, path: PathBuf);
}

/// Host trader and flea-market configuration
pub trait TraderSettingsWriter {
    fn register_trader_id(&mut self, trader_id: &str);
    fn push_update_time(&mut self, update_time: UpdateTime);
    fn set_flea_participation(&mut self, trader_id: &str, enabled: bool);
}

pub trait RouteRegistrar {
    fn register_dynamic_route(&mut self, name: &str, url: &str, action: RouteAction);
}

pub trait OfferRegenerator {
    fn regenerate_trader_offers(&mut self, trader_id: &str);
}

/// What a dynamic route action may touch
pub trait RouteContext: TraderWriter + OfferRegenerator {}

impl<T: TraderWriter + OfferRegenerator> RouteContext for T {}
