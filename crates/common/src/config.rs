//! Deployment configuration
//!
//! Set once at system deployment and mutable only through the engine's
//! admin surface, never per launch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LaunchpadError;
use crate::types::{AccountId, Amount, BPS_DENOMINATOR, MAX_FEE_BPS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    /// Account credited with the flat creation fee
    pub fee_recipient: AccountId,

    /// Flat fee collected from every launch deposit
    pub flat_creation_fee: Amount,

    /// A launch deposit must strictly exceed this plus the flat fee
    pub minimum_deposit: Amount,

    /// Per-trade fee in basis points, capped at [`MAX_FEE_BPS`]
    pub trade_fee_bps: u64,

    /// Virtual asset reserve level at which a launch graduates
    pub graduation_threshold: Amount,

    /// Maximum fraction of the output reserve a single trade may move,
    /// in basis points. 10,000 disables the limit.
    pub max_trade_bps: u64,
}

impl LaunchpadConfig {
    /// Configuration used by the local test deployments.
    pub fn default_local() -> Self {
        Self {
            fee_recipient: AccountId(0),
            flat_creation_fee: 1_000,
            minimum_deposit: 1_000,
            trade_fee_bps: 100,
            graduation_threshold: 42_000,
            max_trade_bps: 9_000,
        }
    }

    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.trade_fee_bps > MAX_FEE_BPS {
            return Err(LaunchpadError::FeeTooHigh);
        }
        if self.max_trade_bps == 0 || self.max_trade_bps > BPS_DENOMINATOR {
            return Err(LaunchpadError::TradeTooLarge);
        }
        if self.graduation_threshold == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        Ok(())
    }

    /// Load configuration from the TOML file named by `LIFTPAD_CONFIG`
    /// (default `liftpad.toml`).
    pub fn load() -> Result<Self> {
        let path = std::env::var("LIFTPAD_CONFIG").unwrap_or_else(|_| "liftpad.toml".to_string());

        let raw = std::fs::read_to_string(&path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Self = toml::from_str(&raw).context("Failed to parse config TOML")?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

        Ok(config)
    }

    /// Write the local defaults to `path`.
    pub fn write_default(path: &str) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(&Self::default_local()).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
