//! Launch records

use liftpad_common::{
    AccountId, Amount, LaunchpadError, LaunchId, PoolId, TokenId, VenuePoolId,
};
use serde::{Deserialize, Serialize};

/// Creator-supplied listing details. Name and symbol must be non-empty;
/// everything else is carried opaquely for the query surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_ref: String,
    pub social_links: [String; 4],
    pub tags: Vec<u32>,
}

impl LaunchMetadata {
    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.name.trim().is_empty() {
            return Err(LaunchpadError::EmptyName);
        }
        if self.symbol.trim().is_empty() {
            return Err(LaunchpadError::EmptySymbol);
        }
        Ok(())
    }
}

/// One created asset. Owned exclusively by the engine, mutated by
/// buy/sell/graduate, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub id: LaunchId,
    pub creator: AccountId,

    /// In-curve representation, minted at launch
    pub restricted_token: TokenId,

    /// Post-graduation representation; set by graduation
    pub free_token: Option<TokenId>,

    pub pool: PoolId,

    /// Ledger account holding the pool's custody
    pub vault: AccountId,

    pub metadata: LaunchMetadata,

    pub trading_enabled: bool,
    pub graduated: bool,

    /// Cumulative net reserve asset in, excluding the virtual seed.
    /// Decreases when sells pay asset back out.
    pub asset_raised: Amount,

    /// Tokens currently in circulation from curve purchases
    pub tokens_sold: Amount,

    /// Pool on the external venue; set by graduation
    pub venue_pool: Option<VenuePoolId>,

    /// Re-entrancy guard: set for the duration of one engine operation
    /// on this launch. Never persisted.
    #[serde(skip)]
    pub(crate) in_flight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> LaunchMetadata {
        LaunchMetadata {
            name: "Orbital".into(),
            symbol: "ORB".into(),
            description: "launch test".into(),
            image_ref: String::new(),
            social_links: Default::default(),
            tags: vec![1, 4],
        }
    }

    #[test]
    fn test_metadata_accepts_minimal() {
        assert!(metadata().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut m = metadata();
        m.name = "   ".into();
        assert_eq!(m.validate(), Err(LaunchpadError::EmptyName));
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let mut m = metadata();
        m.symbol = String::new();
        assert_eq!(m.validate(), Err(LaunchpadError::EmptySymbol));
    }
}
