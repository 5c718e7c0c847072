//! Kaliber trader: a content mod that adds an ammunition merchant to the
//! game server, plus the thin in-process host it runs against.

pub mod api;
pub mod catalog_filter;
pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod pricing;
pub mod randomizer;
pub mod trader;
pub mod trader_mod;

pub use config::ModConfig;
pub use error::{ModError, Result};
pub use trader_mod::TraderMod;
