//! # Marketing Calendar Backend
//!
//! Revenue-by-lead-source tracking and regional marketing guidance for a
//! mobile bar business. This crate provides:
//! - Synchronous domain services (no async/await, no server)
//! - Calendar content embedded in the binary
//! - A session layer that owns the tracker state for one user
//! - YAML configuration

use anyhow::{Context, Result};
use log::info;

pub mod config;
pub mod domain;
pub mod io;

pub use config::AppConfig;
pub use io::DashboardSession;

/// Main backend struct holding the configuration and the user's session
pub struct AppState {
    pub config: AppConfig,
    pub session: DashboardSession,
}

/// Load embedded content and start a session for the given configuration
pub fn initialize_backend(config: AppConfig) -> Result<AppState> {
    let content_service = domain::CalendarContentService::load()
        .context("Failed to load embedded calendar content")?;
    let session = DashboardSession::new(&config, content_service);

    info!(
        "🚀 BACKEND: Initialized for region {} ({} per booking)",
        config.default_region.slug(),
        session.format_revenue(config.tracker.revenue_per_booking)
    );
    Ok(AppState { config, session })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Region;

    #[test]
    fn test_initialize_backend_uses_config() {
        let config = AppConfig {
            default_region: Region::Colorado,
            ..AppConfig::default()
        };

        let state = initialize_backend(config).unwrap();

        assert_eq!(state.session.region(), Region::Colorado);
        assert!(state.session.results().is_none());
    }
}
