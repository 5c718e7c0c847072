//! Host State
//!
//! Everything the server keeps in memory, and the request dispatch that
//! runs mod hooks before answering built-in client routes.

use std::path::PathBuf;
use tracing::{debug, info};

use super::{
    DynamicRouter, FleaMarket, ImageRegistrar, ImageRouter, ItemCatalogReader, LocaleWriter,
    OfferRegenerator, PriceReader, RagfairConfig, RouteAction, RouteRegistrar, RouteRequest,
    TraderConfig, TraderSettingsWriter, TraderWriter, UpdateTime,
};
use crate::data::{DatabaseTables, ItemCatalog, ItemTemplate, Templates};
use crate::error::Result;
use crate::trader::TraderRecord;

pub const ASSORT_ROUTE: &str = "/client/trading/api/getTraderAssort/";
pub const TRADER_OFFERS_ROUTE: &str = "/client/ragfair/trader/";

#[derive(Default)]
pub struct HostState {
    pub tables: DatabaseTables,
    pub trader_config: TraderConfig,
    pub ragfair_config: RagfairConfig,
    pub images: ImageRouter,
    pub router: DynamicRouter,
    pub flea: FleaMarket,
}

impl HostState {
    /// Host before the database is loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Build flea offers for every participating trader
    pub fn generate_all_offers(&mut self) {
        let ids: Vec<String> = self.tables.traders.keys().cloned().collect();
        for id in ids {
            self.regenerate_trader_offers(&id);
        }
        info!("Flea market holds {} trader offers", self.flea.len());
    }

    /// Run matching hooks, then answer the built-in route if there is one.
    /// `None` means nothing handled the URL.
    pub fn handle_request(&mut self, request: &RouteRequest) -> Result<Option<String>> {
        let actions = self.router.matching(&request.url);
        let hooked = !actions.is_empty();

        let mut output = String::new();
        for action in actions {
            output = action(request, output, &mut *self)?;
        }

        if let Some(builtin) = self.builtin_response(&request.url) {
            return Ok(Some(builtin));
        }

        if hooked {
            debug!("Request {} answered by dynamic route output", request.url);
            Ok(Some(output))
        } else {
            Ok(None)
        }
    }

    fn builtin_response(&self, url: &str) -> Option<String> {
        if let Some(trader_id) = url.strip_prefix(ASSORT_ROUTE) {
            let trader = self.tables.traders.get(trader_id)?;
            return serde_json::to_string(&trader.assort).ok();
        }
        if let Some(trader_id) = url.strip_prefix(TRADER_OFFERS_ROUTE) {
            return serde_json::to_string(self.flea.offers_for(trader_id)).ok();
        }
        None
    }
}

// ============================================================================
// Catalog and Prices
// ============================================================================

impl ItemCatalogReader for ItemCatalog {
    fn templates(&self) -> Box<dyn Iterator<Item = &ItemTemplate> + '_> {
        Box::new(self.all())
    }

    fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.get(id)
    }

    fn is_of_base_class(&self, id: &str, base_class: &str) -> bool {
        ItemCatalog::is_of_base_class(self, id, base_class)
    }
}

impl PriceReader for Templates {
    fn market_price(&self, id: &str) -> Option<f64> {
        self.prices.get(id)
    }

    fn handbook_price(&self, id: &str) -> Option<f64> {
        self.handbook.price(id)
    }
}

impl ItemCatalogReader for HostState {
    fn templates(&self) -> Box<dyn Iterator<Item = &ItemTemplate> + '_> {
        self.tables.templates.items.templates()
    }

    fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.tables.templates.items.get(id)
    }

    fn is_of_base_class(&self, id: &str, base_class: &str) -> bool {
        self.tables.templates.items.is_of_base_class(id, base_class)
    }
}

impl PriceReader for HostState {
    fn market_price(&self, id: &str) -> Option<f64> {
        self.tables.templates.market_price(id)
    }

    fn handbook_price(&self, id: &str) -> Option<f64> {
        self.tables.templates.handbook_price(id)
    }
}

// ============================================================================
// Traders and Locales
// ============================================================================

impl TraderWriter for HostState {
    fn insert_trader(&mut self, record: TraderRecord) {
        self.tables.traders.insert(record.id().to_string(), record);
    }

    fn trader(&self, id: &str) -> Option<&TraderRecord> {
        self.tables.traders.get(id)
    }

    fn trader_mut(&mut self, id: &str) -> Option<&mut TraderRecord> {
        self.tables.traders.get_mut(id)
    }
}

impl LocaleWriter for HostState {
    fn locale_codes(&self) -> Vec<String> {
        self.tables.locales.global.keys().cloned().collect()
    }

    fn set_locale_text(&mut self, locale: &str, key: &str, text: &str) {
        if let Some(table) = self.tables.locales.global.get_mut(locale) {
            table.insert(key.to_string(), text.to_string());
        }
    }
}

impl OfferRegenerator for HostState {
    fn regenerate_trader_offers(&mut self, trader_id: &str) {
        let participating = self.ragfair_config.is_participating(trader_id);
        if let Some(trader) = self.tables.traders.get(trader_id) {
            self.flea.regenerate(trader, participating);
        }
    }
}

// ============================================================================
// Pre-load Registration
// ============================================================================

impl ImageRegistrar for HostState {
    fn add_image_route(&mut self, key: &str, path: PathBuf) {
        self.images.add_route(key, path);
    }
}

impl TraderSettingsWriter for HostState {
    fn register_trader_id(&mut self, trader_id: &str) {
        self.trader_config.registered.insert(trader_id.to_string());
    }

    fn push_update_time(&mut self, update_time: UpdateTime) {
        self.trader_config.update_time.push(update_time);
    }

    fn set_flea_participation(&mut self, trader_id: &str, enabled: bool) {
        self.ragfair_config.traders.insert(trader_id.to_string(), enabled);
    }
}

impl RouteRegistrar for HostState {
    fn register_dynamic_route(&mut self, name: &str, url: &str, action: RouteAction) {
        self.router.register(name, url, action);
    }
}
