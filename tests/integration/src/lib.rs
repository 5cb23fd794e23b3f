//! Liftpad integration tests
//!
//! End-to-end scenarios over the full stack: engine + router + curve
//! against the in-memory ledger and venue collaborators. This library
//! holds the shared harness; the scenarios live under `tests/`.

use liftpad_common::{
    AccountId, Amount, Capability, InMemoryLedger, LaunchpadConfig, Ledger, TokenId, Venue,
};
use liftpad_engine::{CurveParams, LaunchMetadata, LaunchpadEngine};

pub const ADMIN: AccountId = AccountId(1);
pub const FEE_SINK: AccountId = AccountId(90);
pub const CREATOR: AccountId = AccountId(10);
pub const TRADER: AccountId = AccountId(11);
pub const HOLDER: AccountId = AccountId(12);
pub const FAUCET: AccountId = AccountId(999);

pub const NOW: u64 = 1_700_000_000;

/// Initialize test logging once; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

/// The deterministic deployment used by the scenario tests: 1,000 flat
/// fee, zero trade fee, 42,000 graduation threshold, 1,000 virtual seed.
pub fn scenario_config() -> LaunchpadConfig {
    LaunchpadConfig {
        fee_recipient: FEE_SINK,
        flat_creation_fee: 1_000,
        minimum_deposit: 1_000,
        trade_fee_bps: 0,
        graduation_threshold: 42_000,
        max_trade_bps: 10_000,
    }
}

pub fn scenario_params() -> CurveParams {
    CurveParams {
        token_supply: 1_000_000_000,
        virtual_asset_seed: 1_000,
    }
}

pub fn metadata(name: &str, symbol: &str) -> LaunchMetadata {
    LaunchMetadata {
        name: name.to_string(),
        symbol: symbol.to_string(),
        description: format!("{} launch", name),
        image_ref: format!("img/{}", symbol),
        social_links: Default::default(),
        tags: vec![1],
    }
}

/// Build an engine over a funded ledger: every well-known account starts
/// with 1,000,000 reserve asset.
pub fn build_engine<V: Venue>(
    venue: V,
) -> (LaunchpadEngine<InMemoryLedger, V>, Capability, TokenId) {
    init_logger();
    let mut ledger = InMemoryLedger::new();
    let asset = ledger.create_token(100_000_000, FAUCET);
    for holder in [CREATOR, TRADER, HOLDER] {
        ledger.transfer(asset, FAUCET, holder, 1_000_000).unwrap();
    }

    let (mut engine, admin) =
        LaunchpadEngine::new(scenario_config(), ledger, asset, ADMIN).expect("valid config");
    engine
        .install_pool_impl(&admin, scenario_params())
        .expect("valid curve params");
    engine.install_venue(&admin, venue).expect("admin install");
    (engine, admin, asset)
}

/// Approve the engine's operator to debit `owner` for `amount` of `token`.
pub fn approve<V: Venue>(
    engine: &mut LaunchpadEngine<InMemoryLedger, V>,
    token: TokenId,
    owner: AccountId,
    amount: Amount,
) {
    let operator = engine.operator();
    engine
        .ledger_mut()
        .approve(token, owner, operator, amount)
        .expect("approve");
}
