//! Revamp workshop booking service
//!
//! Reads configuration from TOML (~/.config/revamp-booking/config.toml,
//! override with BOOKING_CONFIG), seeds the in-memory store and serves the
//! booking REST API.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use tracing::{error, info};

use revamp_booking::application::{BookingService, PaymentService};
use revamp_booking::auth::JwtConfig;
use revamp_booking::domain::{ModificationItem, RepositoryProvider};
use revamp_booking::shared::{listen_for_shutdown_signals, ShutdownSignal};
use revamp_booking::{
    create_router, default_config_path, AppConfig, BookingUnifiedState, InMemoryStore,
    StripeGateway,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_logging("info");
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Revamp booking service...");

    // ── Storage ────────────────────────────────────────────────
    let store = Arc::new(InMemoryStore::new());
    for date in &cfg.calendar.blackout_dates {
        store.add_blackout(*date);
    }
    info!(
        blackouts = cfg.calendar.blackout_dates.len(),
        "Blackout calendar seeded"
    );

    // Slot batches for the coming two weeks; production hands this to the
    // external scheduling job.
    let today = Utc::now().date_naive();
    for offset in 0..14 {
        store.seed_day(today + Duration::days(offset));
    }
    info!("🗓️  Time slots seeded for the next 14 days");

    for item in default_catalog() {
        store.add_modification_item(item);
    }
    info!("Modification catalog seeded");

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = store;
    let booking = Arc::new(BookingService::new(Arc::clone(&repos), cfg.shop.clone()));

    let gateway = Arc::new(StripeGateway::new(
        cfg.payment.secret_key.clone(),
        cfg.payment.api_base.clone(),
    ));
    let payments = Arc::new(PaymentService::new(
        Arc::clone(&repos),
        gateway,
        cfg.payment.currency.clone(),
    ));

    let jwt = JwtConfig {
        secret: cfg.security.jwt_secret.clone(),
        issuer: cfg.security.jwt_issuer.clone(),
    };

    // ── HTTP server ────────────────────────────────────────────
    let router = create_router(BookingUnifiedState {
        booking,
        payments,
        jwt,
        started_at: Arc::new(Instant::now()),
    });

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let listener = tokio::net::TcpListener::bind(cfg.address()).await?;
    info!("🚀 Booking service listening on {}", cfg.address());
    info!("📖 Swagger UI at http://{}/swagger-ui", cfg.address());

    axum::serve(listener, router)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.wait().await }
        })
        .await?;

    info!("Booking service stopped");
    Ok(())
}

/// Starter catalog; production replaces this with the workshop's own list.
fn default_catalog() -> Vec<ModificationItem> {
    vec![
        ModificationItem::new(
            "mod-body-kit",
            "Body kit",
            6,
            45000,
            Some("Full aerodynamic body kit with fitting".into()),
        ),
        ModificationItem::new(
            "mod-alloy-wheels",
            "Alloy wheels",
            3,
            30000,
            Some("17 inch alloy wheel set".into()),
        ),
        ModificationItem::new(
            "mod-spoiler",
            "Rear spoiler",
            2,
            12000,
            None,
        ),
        ModificationItem::new(
            "mod-tint",
            "Window tinting",
            2,
            8000,
            Some("Full vehicle ceramic tint".into()),
        ),
    ]
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
