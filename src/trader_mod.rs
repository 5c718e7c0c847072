//! Kaliber Trader Mod
//!
//! The two startup hooks and the assort route hook. `pre_load` runs before
//! the host database exists; `post_db_load` runs once it is loaded.

use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::debug;

use crate::catalog_filter::{filter_catalog, BLACKLISTED_ITEMS, STOCKED_BASE_CLASSES};
use crate::config::ModConfig;
use crate::data::Money;
use crate::error::{ModError, Result};
use crate::host::state::ASSORT_ROUTE;
use crate::host::{
    ImageRegistrar, ItemCatalogReader, LocaleWriter, PriceReader, RouteAction, RouteContext,
    RouteRegistrar, RouteRequest, TraderSettingsWriter, TraderWriter,
};
use crate::pricing::assort_price;
use crate::randomizer::{refresh_trader_stock, StockSettings};
use crate::trader::helpers::{self, TraderLocale};
use crate::trader::{AssortBuilder, TraderBase};

pub const MOD_NAME: &str = "idiotturdle-kaliber";
pub const TRADER_NICKNAME: &str = "Kaliber";
pub const TRADER_IMAGE: &str = "Kaliber.jpg";

pub const PRESET_PRICE: u64 = 15_000;
pub const PRESET_BUY_RESTRICTION: u32 = 10;
pub const LOYALTY_LEVEL: u32 = 1;

const BASE_JSON: &str = include_str!("../db/base.json");

/// Result of the post-load assort generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssortSummary {
    pub stocked_items: usize,
    pub preset_exported: bool,
}

pub struct TraderMod {
    config: Arc<ModConfig>,
    base: TraderBase,
    mod_dir: PathBuf,
    rng: Arc<Mutex<StdRng>>,
    builder: AssortBuilder,
}

impl TraderMod {
    /// `mod_dir` holds `res/`; `rng` drives every stock randomization.
    pub fn new(config: Arc<ModConfig>, mod_dir: PathBuf, rng: StdRng) -> Result<Self> {
        Ok(Self {
            config,
            base: TraderBase::from_json(BASE_JSON)?,
            mod_dir,
            rng: Arc::new(Mutex::new(rng)),
            builder: AssortBuilder::new(),
        })
    }

    pub fn trader_id(&self) -> &str {
        &self.base.id
    }

    pub fn base(&self) -> &TraderBase {
        &self.base
    }

    /// Register icon, restock window, trader id, flea participation and the
    /// assort route hook.
    pub fn pre_load<H>(&self, host: &mut H) -> Result<()>
    where
        H: ImageRegistrar + TraderSettingsWriter + RouteRegistrar,
    {
        debug!("[{}] preSpt Loading...", MOD_NAME);

        let window = self.config.refresh_window();
        helpers::register_profile_image(host, &self.base, &self.mod_dir, TRADER_IMAGE);
        helpers::set_trader_update_time(host, &self.base, window);
        host.register_trader_id(&self.base.id);

        if self.config.add_trader_to_flea {
            debug!("[{}] Trader added to Flea Market.", MOD_NAME);
        } else {
            debug!("[{}] Trader removed from Flea Market.", MOD_NAME);
        }
        host.set_flea_participation(&self.base.id, self.config.add_trader_to_flea);

        // Registered even with randomization off; the hook is then a passthrough
        let url = format!("{}{}", ASSORT_ROUTE, self.base.id);
        host.register_dynamic_route(MOD_NAME, &url, self.stock_route_action());
        if self.config.randomizes_anything() {
            debug!("[{}] Stock randomization enabled on {}", MOD_NAME, url);
        }

        debug!("[{}] preSpt Loaded", MOD_NAME);
        Ok(())
    }

    /// Insert the trader, build its assort and write its locale strings
    pub fn post_db_load<H>(&mut self, host: &mut H) -> Result<AssortSummary>
    where
        H: ItemCatalogReader + PriceReader + TraderWriter + LocaleWriter,
    {
        debug!("[{}] postDb Loading...", MOD_NAME);

        helpers::add_trader_to_db(host, &self.base);
        let start = Instant::now();

        let priced: Vec<(String, u64)> =
            filter_catalog(&*host, &STOCKED_BASE_CLASSES, &BLACKLISTED_ITEMS)
                .into_iter()
                .map(|id| {
                    let price = assort_price(&id, &*host, self.config.item_price_multiplier);
                    (id, price)
                })
                .collect();

        let preset = helpers::create_glock();
        if let Some(missing) = preset.iter().find(|item| host.template(&item.tpl).is_none()) {
            return Err(ModError::UnknownItem(missing.tpl.clone()));
        }

        let trader = host
            .trader_mut(&self.base.id)
            .ok_or_else(|| ModError::UnknownTrader(self.base.id.clone()))?;

        let mut stocked_items = 0;
        for (id, price) in priced {
            let exported = self
                .builder
                .create_single_assort_item(&id)
                .add_unlimited_stack_count()
                .add_money_cost(Money::Roubles, price)
                .add_loyalty_level(LOYALTY_LEVEL)
                .export(trader);
            if exported {
                stocked_items += 1;
            }
            debug!("ItemID: {} for price: {}", id, price);
        }

        let preset_exported = self
            .builder
            .create_complex_assort_item(preset)
            .add_unlimited_stack_count()
            .add_money_cost(Money::Roubles, PRESET_PRICE)
            .add_buy_restriction(PRESET_BUY_RESTRICTION)
            .add_loyalty_level(LOYALTY_LEVEL)
            .export(trader);

        let description = format!("This is {}'s shop", TRADER_NICKNAME);
        helpers::add_trader_to_locales(
            host,
            &self.base,
            &TraderLocale {
                full_name: &self.base.name,
                first_name: TRADER_NICKNAME,
                nickname: &self.base.nickname,
                location: &self.base.location,
                description: &description,
            },
        );

        debug!(
            "[{}] postDb Loaded: Assort generation took {:.3}ms.",
            MOD_NAME,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(AssortSummary {
            stocked_items,
            preset_exported,
        })
    }

    /// Hook for the assort endpoint: randomize per config, pass output on
    fn stock_route_action(&self) -> RouteAction {
        let trader_id = self.base.id.clone();
        let settings = StockSettings::from(self.config.as_ref());
        let rng = Arc::clone(&self.rng);

        Arc::new(
            move |_request: &RouteRequest, output: String, host: &mut dyn RouteContext| -> Result<String> {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                refresh_trader_stock(host, &trader_id, &settings, &mut *rng)?;
                Ok(output)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshWindow;
    use crate::data::{base_class, ItemTemplate};
    use crate::host::HostState;
    use crate::trader::helpers::glock;
    use rand::SeedableRng;

    fn host() -> HostState {
        let mut host = HostState::new();
        let items = &mut host.tables.templates.items;
        items.insert(ItemTemplate::node(base_class::AMMO, "Ammo", ""));
        items.insert(ItemTemplate::node(base_class::THROW_WEAPON, "ThrowWeap", ""));
        items.insert(ItemTemplate::node("weapon", "Weapon", ""));
        items.insert(ItemTemplate::item("A", "Ammo A", base_class::AMMO));
        items.insert(ItemTemplate::item("B", "Ammo B", base_class::AMMO));
        items.insert(ItemTemplate::item("C", "Grenade C", base_class::THROW_WEAPON));
        items.insert(ItemTemplate::item(BLACKLISTED_ITEMS[0], "Shrapnel", base_class::AMMO));
        for tpl in [
            glock::PISTOL,
            glock::BARREL,
            glock::RECEIVER,
            glock::COMPENSATOR,
            glock::PISTOL_GRIP,
            glock::REAR_SIGHT,
            glock::FRONT_SIGHT,
            glock::MAGAZINE,
        ] {
            items.insert(ItemTemplate::item(tpl, "Glock part", "weapon"));
        }

        host.tables.templates.prices.insert("A", 100.0);
        host.tables.templates.prices.insert("B", 0.0);
        host.tables.templates.handbook.push("B", 50.0);

        for code in ["en", "ru"] {
            host.tables.locales.global.insert(code.to_string(), Default::default());
        }
        host
    }

    fn config() -> ModConfig {
        ModConfig {
            item_price_multiplier: 2.0,
            ..Default::default()
        }
    }

    fn trader_mod(config: ModConfig) -> TraderMod {
        TraderMod::new(Arc::new(config), PathBuf::from("mods/kaliber"), StdRng::seed_from_u64(5))
            .unwrap()
    }

    fn price_of(host: &HostState, trader_id: &str, tpl: &str) -> u64 {
        let assort = &host.trader(trader_id).unwrap().assort;
        let item = assort.root_items().find(|item| item.tpl == tpl).unwrap();
        assort.cost_of(&item.id).unwrap()[0].count
    }

    #[test]
    fn test_base_template_parses() {
        let m = trader_mod(config());
        assert_eq!(m.base().nickname, TRADER_NICKNAME);
        assert_eq!(m.trader_id().len(), 24);
    }

    #[test]
    fn test_pre_load_registrations() {
        let mut host = host();
        let mut config = config();
        config.trader_refresh_min = 500;
        config.trader_refresh_max = 100;
        config.add_trader_to_flea = false;
        let m = trader_mod(config);

        m.pre_load(&mut host).unwrap();

        let id = m.trader_id();
        assert!(host.trader_config.registered.contains(id));
        assert_eq!(host.trader_config.update_time_for(id), Some(RefreshWindow::default()));
        assert_eq!(host.ragfair_config.traders.get(id), Some(&false));
        assert_eq!(
            host.images.resolve(&m.base().avatar),
            Some(PathBuf::from("mods/kaliber/res/Kaliber.jpg"))
        );
        assert_eq!(host.router.len(), 1);
    }

    #[test]
    fn test_post_db_load_builds_assort() {
        let mut host = host();
        let mut m = trader_mod(config());
        m.pre_load(&mut host).unwrap();
        let summary = m.post_db_load(&mut host).unwrap();

        assert_eq!(
            summary,
            AssortSummary {
                stocked_items: 3,
                preset_exported: true
            }
        );

        let id = m.trader_id().to_string();
        assert_eq!(price_of(&host, &id, "A"), 200);
        assert_eq!(price_of(&host, &id, "B"), 100);
        assert_eq!(price_of(&host, &id, "C"), 2);
        assert_eq!(price_of(&host, &id, glock::PISTOL), PRESET_PRICE);

        let assort = &host.trader(&id).unwrap().assort;
        assert_eq!(assort.items.len(), 3 + 8);
        assert!(assort.items.iter().all(|item| item.tpl != BLACKLISTED_ITEMS[0]));
        assert!(assort.items.iter().all(|item| host.template(&item.tpl).is_some()));
        assert!(assort.loyal_level_items.values().all(|level| *level == LOYALTY_LEVEL));

        let pistol = assort.root_items().find(|item| item.tpl == glock::PISTOL).unwrap();
        let upd = pistol.upd.as_ref().unwrap();
        assert_eq!(upd.buy_restriction_max, Some(PRESET_BUY_RESTRICTION));
        assert_eq!(upd.unlimited_count, Some(true));
        assert_eq!(assort.children_of(&pistol.id).len(), 7);

        for table in host.tables.locales.global.values() {
            assert_eq!(table[&format!("{} Nickname", id)], "Kaliber");
            assert_eq!(table[&format!("{} FirstName", id)], "Kaliber");
            assert_eq!(table[&format!("{} Description", id)], "This is Kaliber's shop");
        }
    }

    #[test]
    fn test_market_price_used_whatever_use_flea_prices_says() {
        let mut host = host();
        host.tables.templates.handbook.push("A", 70.0);
        let config: ModConfig =
            serde_json::from_str(r#"{ "useFleaPrices": false, "itemPriceMultiplier": 2 }"#).unwrap();
        let mut m = trader_mod(config);
        m.pre_load(&mut host).unwrap();
        m.post_db_load(&mut host).unwrap();

        assert_eq!(price_of(&host, m.trader_id(), "A"), 200);
        assert_eq!(price_of(&host, m.trader_id(), "B"), 100);
    }

    #[test]
    fn test_missing_preset_part_is_fatal() {
        let mut host = HostState::new();
        let mut m = trader_mod(config());
        assert!(matches!(m.post_db_load(&mut host), Err(ModError::UnknownItem(_))));
    }

    #[test]
    fn test_assort_route_randomizes_and_regenerates_offers() {
        let mut host = host();
        let mut config = config();
        config.randomize_stock_available = true;
        config.out_of_stock_chance = 100;
        config.randomize_buy_restriction = true;
        let mut m = trader_mod(config);

        m.pre_load(&mut host).unwrap();
        m.post_db_load(&mut host).unwrap();
        host.generate_all_offers();
        assert_eq!(host.flea.offers_for(m.trader_id()).len(), 4);

        let request = RouteRequest {
            url: format!("{}{}", ASSORT_ROUTE, m.trader_id()),
            ..Default::default()
        };
        let body = host.handle_request(&request).unwrap().unwrap();
        let assort: serde_json::Value = serde_json::from_str(&body).unwrap();

        for item in assort["items"].as_array().unwrap() {
            if item["parentId"] == "hideout" {
                assert_eq!(item["upd"]["StackObjectsCount"], 0);
                let limit = item["upd"]["BuyRestrictionMax"].as_u64().unwrap();
                assert!((1..=10).contains(&limit));
            }
        }
        // Everything sold out, so nothing stays listed
        assert!(host.flea.offers_for(m.trader_id()).is_empty());
    }

    #[test]
    fn test_assort_route_without_toggles_changes_nothing() {
        let mut host = host();
        let mut m = trader_mod(config());
        m.pre_load(&mut host).unwrap();
        m.post_db_load(&mut host).unwrap();
        let before = host.trader(m.trader_id()).unwrap().assort.items.clone();

        let request = RouteRequest {
            url: format!("{}{}", ASSORT_ROUTE, m.trader_id()),
            ..Default::default()
        };
        host.handle_request(&request).unwrap();
        assert_eq!(host.trader(m.trader_id()).unwrap().assort.items, before);
    }
}
