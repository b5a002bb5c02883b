use serde::Deserialize;
use std::env;

use crate::{
    constants::{FULLNODE_DEVNET, FULLNODE_MAINNET, FULLNODE_TESTNET, TREASURE_SYNC_INTERVAL_SECS},
    models::Location,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Chain
    pub network: String,
    pub fullnode_url: String,
    pub package_id: String,

    // Sync cadence
    pub sync_interval_secs: u64,

    // Fixed player position for headless runs (no platform location source)
    pub player_lat: Option<f64>,
    pub player_lng: Option<f64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let network = env::var("SUI_NETWORK").unwrap_or_else(|_| "testnet".to_string());
        let fullnode_url = env::var("SUI_FULLNODE_URL")
            .unwrap_or_else(|_| default_fullnode_url(&network).to_string());

        Ok(Config {
            network,
            fullnode_url,
            package_id: env::var("SUI_PACKAGE_ID").unwrap_or_default(),

            sync_interval_secs: env::var("TREASURE_SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(TREASURE_SYNC_INTERVAL_SECS),

            player_lat: env::var("PLAYER_LAT").ok().and_then(|s| s.parse().ok()),
            player_lng: env::var("PLAYER_LNG").ok().and_then(|s| s.parse().ok()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.package_id.trim().is_empty() {
            anyhow::bail!("SUI_PACKAGE_ID is empty");
        }
        if url::Url::parse(&self.fullnode_url).is_err() {
            anyhow::bail!("SUI_FULLNODE_URL is not a valid URL: {}", self.fullnode_url);
        }
        if self.sync_interval_secs == 0 {
            anyhow::bail!("TREASURE_SYNC_INTERVAL_SECS must be > 0");
        }

        if !self.package_id.starts_with("0x") {
            tracing::warn!("SUI_PACKAGE_ID should start with 0x");
        }
        if self.package_id.contains("your_") || self.package_id.contains("...") {
            tracing::warn!("SUI_PACKAGE_ID appears to be a placeholder value");
        }
        if self.player_lat.is_some() != self.player_lng.is_some() {
            tracing::warn!("PLAYER_LAT/PLAYER_LNG must both be set to take effect");
        }

        Ok(())
    }

    pub fn is_testnet(&self) -> bool {
        let network = self.network.to_ascii_lowercase();
        network == "testnet" || network == "devnet" || network == "localnet"
    }

    /// Fixed position feed for headless runs; `None` unless both coordinates
    /// are configured.
    pub fn fixed_player_location(&self) -> Option<Location> {
        match (self.player_lat, self.player_lng) {
            (Some(lat), Some(lng)) => Some(Location { lat, lng }),
            _ => None,
        }
    }
}

fn default_fullnode_url(network: &str) -> &'static str {
    match network.to_ascii_lowercase().as_str() {
        "mainnet" => FULLNODE_MAINNET,
        "devnet" => FULLNODE_DEVNET,
        _ => FULLNODE_TESTNET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_package(package_id: &str) -> Config {
        Config {
            network: "testnet".to_string(),
            fullnode_url: FULLNODE_TESTNET.to_string(),
            package_id: package_id.to_string(),
            sync_interval_secs: 30,
            player_lat: None,
            player_lng: None,
        }
    }

    #[test]
    fn validate_rejects_empty_package_id() {
        let config = config_with_package("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_hex_package_id() {
        let config = config_with_package("0xabc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = config_with_package("0xabc");
        config.sync_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_fullnode_url_follows_network() {
        assert_eq!(default_fullnode_url("mainnet"), FULLNODE_MAINNET);
        assert_eq!(default_fullnode_url("devnet"), FULLNODE_DEVNET);
        assert_eq!(default_fullnode_url("testnet"), FULLNODE_TESTNET);
        assert_eq!(default_fullnode_url("anything-else"), FULLNODE_TESTNET);
    }

    #[test]
    fn fixed_player_location_requires_both_coordinates() {
        let mut config = config_with_package("0xabc");
        assert!(config.fixed_player_location().is_none());

        config.player_lat = Some(40.7128);
        assert!(config.fixed_player_location().is_none());

        config.player_lng = Some(-74.0060);
        let location = config.fixed_player_location().unwrap();
        assert_eq!(location.lat, 40.7128);
        assert_eq!(location.lng, -74.0060);
    }

    #[test]
    fn testnet_detection_covers_dev_networks() {
        let mut config = config_with_package("0xabc");
        assert!(config.is_testnet());
        config.network = "mainnet".to_string();
        assert!(!config.is_testnet());
    }
}
