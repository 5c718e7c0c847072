//! Trader Registration Helpers
//!
//! Fixed calls into the host that make a trader exist: icon, restock
//! window, database record and locale strings. Plus the pistol preset.

use std::path::Path;
use tracing::debug;

use super::assort::AssortItem;
use super::definition::{TraderBase, TraderRecord};
use crate::config::RefreshWindow;
use crate::host::{ImageRegistrar, LocaleWriter, TraderSettingsWriter, TraderWriter, UpdateTime};

/// Register the trader icon under the avatar route from the base record
pub fn register_profile_image<H: ImageRegistrar + ?Sized>(
    host: &mut H,
    base: &TraderBase,
    mod_dir: &Path,
    image_name: &str,
) {
    let image_path = mod_dir.join("res").join(image_name);
    debug!("Registering trader image {:?} as {}", image_path, base.avatar_route());
    host.add_image_route(&base.avatar_route(), image_path);
}

pub fn set_trader_update_time<H: TraderSettingsWriter + ?Sized>(
    host: &mut H,
    base: &TraderBase,
    window: RefreshWindow,
) {
    host.push_update_time(UpdateTime {
        trader_id: base.id.clone(),
        seconds: window,
    });
}

/// Insert the trader with an empty assort and quest assort
pub fn add_trader_to_db<H: TraderWriter + ?Sized>(host: &mut H, base: &TraderBase) {
    host.insert_trader(TraderRecord::new(base.clone()));
}

/// Display text for the trader, written to every locale
pub struct TraderLocale<'a> {
    pub full_name: &'a str,
    pub first_name: &'a str,
    pub nickname: &'a str,
    pub location: &'a str,
    pub description: &'a str,
}

/// The same text goes into every locale regardless of language.
pub fn add_trader_to_locales<H: LocaleWriter + ?Sized>(
    host: &mut H,
    base: &TraderBase,
    text: &TraderLocale<'_>,
) {
    let id = &base.id;
    for locale in host.locale_codes() {
        host.set_locale_text(&locale, &format!("{} FullName", id), text.full_name);
        host.set_locale_text(&locale, &format!("{} FirstName", id), text.first_name);
        host.set_locale_text(&locale, &format!("{} Nickname", id), text.nickname);
        host.set_locale_text(&locale, &format!("{} Location", id), text.location);
        host.set_locale_text(&locale, &format!("{} Description", id), text.description);
    }
}

// ============================================================================
// Presets
// ============================================================================

pub mod glock {
    pub const PISTOL: &str = "5a7ae0c351dfba0017554310";
    pub const BARREL: &str = "5a6b60158dc32e000a31138b";
    pub const RECEIVER: &str = "5a9685b1a2750c0032157104";
    pub const COMPENSATOR: &str = "5a7b32a2e899ef00135e345a";
    pub const PISTOL_GRIP: &str = "5a7b4960e899ef197b331a2d";
    pub const REAR_SIGHT: &str = "5a6f5d528dc32e00094b97d9";
    pub const FRONT_SIGHT: &str = "5a6f58f68dc32e000a311390";
    pub const MAGAZINE: &str = "630769c4962d0247b029dc60";
}

/// Glock 17 with barrel, receiver, compensator, grip, sights and magazine.
/// Ids are placeholders; the assort builder replaces them on staging.
pub fn create_glock() -> Vec<AssortItem> {
    vec![
        AssortItem {
            id: "glockBase".to_string(),
            tpl: glock::PISTOL.to_string(),
            parent_id: None,
            slot_id: None,
            upd: None,
        },
        AssortItem::child("glockbarrel", glock::BARREL, "glockBase", "mod_barrel"),
        AssortItem::child("glockReceiver", glock::RECEIVER, "glockBase", "mod_reciever"),
        AssortItem::child("glockCompensator", glock::COMPENSATOR, "glockReceiver", "mod_muzzle"),
        AssortItem::child("glockPistolGrip", glock::PISTOL_GRIP, "glockBase", "mod_pistol_grip"),
        AssortItem::child("glockRearSight", glock::REAR_SIGHT, "glockReceiver", "mod_sight_rear"),
        AssortItem::child("glockFrontSight", glock::FRONT_SIGHT, "glockReceiver", "mod_sight_front"),
        AssortItem::child("glockMagazine", glock::MAGAZINE, "glockBase", "mod_magazine"),
    ]
}
