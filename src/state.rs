use anyhow::Context;
use chrono::Weekday;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::ApiClient,
    audit::AuditRepository,
    auth::AuthRepository,
    notification::NotificationHub,
    rota::{RotaRepository, RotaService},
    site::SiteRepository,
    tracking::TrackingBoard,
    user::UserRepository,
    vehicle::VehicleRepository,
    walkaround::WalkaroundRepository,
    websocket::{Backoff, TungsteniteConnector},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub auth_repository: AuthRepository,
    pub vehicle_repository: VehicleRepository,
    pub site_repository: SiteRepository,
    pub user_repository: UserRepository,
    pub walkaround_repository: WalkaroundRepository,
    pub audit_repository: AuditRepository,
    pub rota_service: RotaService,
    pub notification_hub: NotificationHub,
    pub tracking: TrackingBoard,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let api = ApiClient::new(&config.api_base_url)?;

        let notification_hub = NotificationHub::new(
            config.ws_base_url.clone(),
            config.backoff(),
            Arc::new(TungsteniteConnector),
        );

        Ok(Self {
            auth_repository: AuthRepository::new(api.clone()),
            vehicle_repository: VehicleRepository::new(api.clone()),
            site_repository: SiteRepository::new(api.clone()),
            user_repository: UserRepository::new(api.clone()),
            walkaround_repository: WalkaroundRepository::new(api.clone()),
            audit_repository: AuditRepository::new(api.clone()),
            rota_service: RotaService::new(
                RotaRepository::new(api.clone()),
                config.week_start,
                config.currency_symbol.clone(),
            ),
            notification_hub,
            tracking: TrackingBoard::new(),
            api,
            config,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub ws_base_url: String,
    /// When set, access tokens are signature-checked; otherwise their claims are provisional.
    pub jwt_secret: Option<String>,
    pub cookie_secure: bool,
    pub ws_max_reconnect_attempts: u32,
    pub ws_reconnect_base: Duration,
    pub ws_reconnect_max: Duration,
    pub week_start: Weekday,
    pub currency_symbol: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL").context("API_BASE_URL must be set")?;
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let ws_base_url = match std::env::var("WS_BASE_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => derive_ws_url(&api_base_url),
        };

        let week_start = match env_or("WEEK_START", "monday").to_lowercase().as_str() {
            "monday" | "mon" => Weekday::Mon,
            "sunday" | "sun" => Weekday::Sun,
            other => anyhow::bail!("WEEK_START must be monday or sunday, got {}", other),
        };

        Ok(Self {
            api_base_url,
            ws_base_url,
            jwt_secret: std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            cookie_secure: env_or("COOKIE_SECURE", "false")
                .parse()
                .context("COOKIE_SECURE must be true or false")?,
            ws_max_reconnect_attempts: env_or("WS_MAX_RECONNECT_ATTEMPTS", "5")
                .parse()
                .context("WS_MAX_RECONNECT_ATTEMPTS must be a number")?,
            ws_reconnect_base: Duration::from_millis(
                env_or("WS_RECONNECT_BASE_MS", "1000")
                    .parse()
                    .context("WS_RECONNECT_BASE_MS must be a number")?,
            ),
            ws_reconnect_max: Duration::from_millis(
                env_or("WS_RECONNECT_MAX_MS", "30000")
                    .parse()
                    .context("WS_RECONNECT_MAX_MS must be a number")?,
            ),
            week_start,
            currency_symbol: env_or("CURRENCY_SYMBOL", "£"),
        })
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            self.ws_reconnect_base,
            self.ws_reconnect_max,
            self.ws_max_reconnect_attempts,
        )
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `https://api.example.com` -> `wss://api.example.com`
fn derive_ws_url(api_base_url: &str) -> String {
    if let Some(rest) = api_base_url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_base_url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_base_url.to_string()
    }
}
