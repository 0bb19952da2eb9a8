//! Casebook Player - desktop composition root binary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use casebook_player::application::api::Api;
use casebook_player::infrastructure::config::{load_dotenv, ClientConfig};
use casebook_player::infrastructure::platform::create_platform;
use casebook_player::infrastructure::ApiAdapter;
use casebook_player::ports::outbound::RawApiPort;
use casebook_player::presentation::Services;

fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casebook_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Casebook Player");

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    tracing::info!(
        backend_url = %config.backend_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Loaded configuration"
    );

    // Platform
    let platform = create_platform(config.storage_path.clone());

    // HTTP
    let raw_api: Arc<dyn RawApiPort> =
        Arc::new(ApiAdapter::new(&config.backend_url, config.request_timeout));
    let api = Api::new(raw_api);

    let services = Services::new(api, platform, config.poll);

    // Launch Dioxus
    let css = load_player_css();
    let cfg = dioxus::desktop::Config::new()
        .with_custom_head(format!("<style>{css}</style>"))
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Casebook"));

    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(services)
        .launch(casebook_player::app);

    Ok(())
}

fn load_player_css() -> String {
    const FALLBACK_CSS: &str = "";

    let css_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/css/casebook.css");
    std::fs::read_to_string(css_path).unwrap_or_else(|_| FALLBACK_CSS.to_string())
}
