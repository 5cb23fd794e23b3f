//! Listing facade - the public creation entry point
//!
//! Thin by design: it shapes the raw listing arguments into launch
//! metadata, confirms the deposit covers the flat creation fee, and
//! forwards to the engine, which collects the fee and runs the launch.

use liftpad_common::{AccountId, Amount, LaunchId, LaunchpadError, Ledger, Timestamp, Venue};

use crate::engine::LaunchpadEngine;
use crate::launch::LaunchMetadata;

#[allow(clippy::too_many_arguments)]
pub fn create_listing<L: Ledger, V: Venue>(
    engine: &mut LaunchpadEngine<L, V>,
    creator: AccountId,
    name: &str,
    symbol: &str,
    tags: Vec<u32>,
    description: &str,
    image_ref: &str,
    social_links: [String; 4],
    deposit: Amount,
    now: Timestamp,
) -> Result<(LaunchId, Amount), LaunchpadError> {
    if deposit <= engine.config().flat_creation_fee {
        return Err(LaunchpadError::DepositBelowMinimum);
    }
    let metadata = LaunchMetadata {
        name: name.to_string(),
        symbol: symbol.to_string(),
        description: description.to_string(),
        image_ref: image_ref.to_string(),
        social_links,
        tags,
    };
    engine.launch(creator, metadata, deposit, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftpad_common::{InMemoryLedger, InMemoryVenue, LaunchpadConfig};
    use crate::engine::CurveParams;

    #[test]
    fn test_facade_forwards_to_the_engine() {
        let mut ledger = InMemoryLedger::new();
        let creator = AccountId(10);
        let asset = ledger.create_token(1_000_000, creator);

        let (mut engine, admin) = LaunchpadEngine::<_, InMemoryVenue>::new(
            LaunchpadConfig::default_local(),
            ledger,
            asset,
            AccountId(1),
        )
        .unwrap();
        engine
            .install_pool_impl(
                &admin,
                CurveParams {
                    token_supply: 1_000_000_000,
                    virtual_asset_seed: 1_000,
                },
            )
            .unwrap();
        engine.install_venue(&admin, InMemoryVenue::new()).unwrap();

        let operator = engine.operator();
        engine
            .ledger_mut()
            .approve(asset, creator, operator, 7_000)
            .unwrap();

        let (id, tokens_out) = create_listing(
            &mut engine,
            creator,
            "Orbital",
            "ORB",
            vec![1, 2],
            "a launch",
            "img/orb",
            Default::default(),
            7_000,
            0,
        )
        .unwrap();
        assert!(tokens_out > 0);
        assert_eq!(engine.launch_info(id).unwrap().metadata.symbol, "ORB");
    }

    #[test]
    fn test_facade_rejects_deposit_below_fee() {
        let mut ledger = InMemoryLedger::new();
        let asset = ledger.create_token(1_000, AccountId(10));
        let (mut engine, _) = LaunchpadEngine::<_, InMemoryVenue>::new(
            LaunchpadConfig::default_local(),
            ledger,
            asset,
            AccountId(1),
        )
        .unwrap();

        assert_eq!(
            create_listing(
                &mut engine,
                AccountId(10),
                "Orbital",
                "ORB",
                vec![],
                "",
                "",
                Default::default(),
                500,
                0,
            ),
            Err(LaunchpadError::DepositBelowMinimum)
        );
    }
}
