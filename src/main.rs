use rand::rngs::StdRng;
use rand::SeedableRng;
use std::{net::SocketAddr, path::Path, sync::Arc};
use tracing::{info, warn};

use kaliber_trader::api::{self, AppState};
use kaliber_trader::data::DatabaseTables;
use kaliber_trader::host::{HostState, ServerSettings};
use kaliber_trader::{ModConfig, TraderMod};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let settings_path = Path::new("server.toml");
    let loaded = ServerSettings::load(settings_path).expect("Failed to load server settings");
    let settings_missing = loaded.is_none();
    let settings = loaded.unwrap_or_default();

    let config = ModConfig::load(&settings.mod_dir.join("config").join("config.json"))
        .expect("Failed to load mod config");

    // Initialize logging
    let directive = if config.debug_logging {
        "kaliber_trader=debug"
    } else {
        "kaliber_trader=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("static directive")),
        )
        .init();

    if settings_missing {
        warn!("Settings file {:?} not found, using defaults", settings_path);
    }

    let config = Arc::new(config);
    let mut trader_mod = TraderMod::new(config, settings.mod_dir.clone(), StdRng::from_entropy())
        .expect("Failed to parse trader base");

    // Pre-load hooks run before the database exists
    let mut host = HostState::new();
    trader_mod
        .pre_load(&mut host)
        .expect("Trader pre-load failed");

    host.tables = DatabaseTables::load_from_directory(&settings.data_dir)
        .expect("Failed to load database tables");

    let summary = trader_mod
        .post_db_load(&mut host)
        .expect("Trader post-load failed");
    info!(
        "Trader {} stocked {} items (preset: {})",
        trader_mod.trader_id(),
        summary.stocked_items,
        summary.preset_exported
    );

    host.generate_all_offers();

    let app = api::router(AppState::new(host));

    let addr: SocketAddr = settings.bind.parse().expect("Invalid bind address");
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
