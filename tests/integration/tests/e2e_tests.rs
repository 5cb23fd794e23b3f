//! E2E scenarios for the launchpad core
//!
//! Every test drives the public engine API against the in-memory ledger
//! and venue collaborators; nothing reaches into component internals.

use liftpad_common::{FlakyVenue, InMemoryVenue, LaunchpadError, Ledger, Policy, Venue};
use liftpad_integration_tests::*;

/// The canonical lifecycle: a 7,000 deposit (1,000 flat fee) opens the
/// curve with a 6,000 first buy, a 35,000 follow-up buy lands the
/// reserve exactly on the 42,000 threshold and graduates, and the
/// restricted holdings then redeem 1:1 into the free token.
#[test]
fn test_launch_to_graduation_to_redemption() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());

    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, first_out) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .expect("launch");

    println!("launched {} with first buy -> {} tokens", id, first_out);
    assert!(first_out > 0);
    let launch = engine.launch_info(id).unwrap().clone();
    assert_eq!(launch.asset_raised, 6_000);
    assert_eq!(launch.tokens_sold, first_out);
    assert!(launch.trading_enabled);
    assert_eq!(engine.graduation_progress(id).unwrap(), (7_000, 42_000));

    // The crossing buy graduates synchronously, inside the same call.
    approve(&mut engine, asset, TRADER, 35_000);
    let receipt = engine
        .buy(id, TRADER, 35_000, 0, NOW + 60, NOW)
        .expect("crossing buy");
    println!("crossing buy -> {} tokens, graduation expected", receipt.amount_out);

    let launch = engine.launch_info(id).unwrap().clone();
    assert!(launch.graduated);
    assert!(!launch.trading_enabled);
    let free = launch.free_token.expect("free token deployed");
    let venue_pool = launch.venue_pool.expect("venue pool recorded");

    // The venue received the unsold tokens and the full real reserve.
    let (unsold, _) = engine.reserves(id).unwrap();
    let seeded = engine
        .venue()
        .and_then(|v| v.get_reserves(venue_pool))
        .expect("venue pool seeded");
    assert_eq!(seeded, (unsold, 41_000));

    // A further buy on this engine is an invalid-state error the client
    // can branch on (redirect to the external venue).
    approve(&mut engine, asset, TRADER, 1_000);
    let err = engine.buy(id, TRADER, 1_000, 0, NOW + 60, NOW).unwrap_err();
    assert_eq!(err, LaunchpadError::AlreadyGraduated);
    assert!(err.is_invalid_state());

    // Redemption: restricted down, free up, supply constant.
    let restricted = launch.restricted_token;
    let held = engine.ledger().balance_of(restricted, TRADER);
    assert_eq!(held, receipt.amount_out);
    approve(&mut engine, restricted, TRADER, held);
    engine.redeem(id, TRADER, held).expect("redeem");

    assert_eq!(engine.ledger().balance_of(restricted, TRADER), 0);
    assert_eq!(engine.ledger().balance_of(free, TRADER), held);
    assert_eq!(engine.ledger().total_supply(free), 1_000_000_000);
    println!("redeemed {} restricted for free 1:1", held);
}

#[test]
fn test_buys_below_threshold_never_graduate() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());
    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, _) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();

    // 34,999 more leaves the reserve one unit short of the threshold.
    approve(&mut engine, asset, TRADER, 34_999);
    engine.buy(id, TRADER, 34_999, 0, NOW + 60, NOW).unwrap();

    let launch = engine.launch_info(id).unwrap();
    assert!(!launch.graduated);
    assert!(launch.trading_enabled);
    assert_eq!(engine.graduation_progress(id).unwrap().0, 41_999);

    // The single missing unit graduates it.
    approve(&mut engine, asset, TRADER, 1);
    engine.buy(id, TRADER, 1, 0, NOW + 60, NOW).unwrap();
    assert!(engine.launch_info(id).unwrap().graduated);
}

#[test]
fn test_expired_deadline_rejected_with_reserves_unchanged() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());
    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, _) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();

    let before = engine.reserves(id).unwrap();
    approve(&mut engine, asset, TRADER, 35_000);
    // Everything about this buy is valid except the deadline.
    assert_eq!(
        engine.buy(id, TRADER, 35_000, 0, NOW - 1, NOW),
        Err(LaunchpadError::Expired)
    );
    assert_eq!(engine.reserves(id).unwrap(), before);
    assert_eq!(engine.ledger().balance_of(asset, TRADER), 1_000_000);
}

#[test]
fn test_venue_outage_rolls_back_and_recovers() {
    let (mut engine, admin, asset) = build_engine(FlakyVenue::failing_seed());
    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, first_out) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();

    let reserves_before = engine.reserves(id).unwrap();
    approve(&mut engine, asset, TRADER, 35_000);
    let err = engine.buy(id, TRADER, 35_000, 0, NOW + 60, NOW).unwrap_err();
    assert!(matches!(err, LaunchpadError::VenueFailed(_)));

    // The whole triggering buy was unwound, reserve mutation included.
    let launch = engine.launch_info(id).unwrap().clone();
    assert!(!launch.graduated);
    assert!(launch.trading_enabled);
    assert_eq!(launch.asset_raised, 6_000);
    assert_eq!(launch.tokens_sold, first_out);
    assert_eq!(engine.reserves(id).unwrap(), reserves_before);
    assert_eq!(engine.ledger().balance_of(asset, TRADER), 1_000_000);
    assert_eq!(
        engine.ledger().balance_of(launch.restricted_token, TRADER),
        0
    );

    // The admin swaps in a healthy venue; the same buy then graduates.
    engine.install_venue(&admin, FlakyVenue::default()).unwrap();
    engine.buy(id, TRADER, 35_000, 0, NOW + 60, NOW).unwrap();
    assert!(engine.launch_info(id).unwrap().graduated);
}

#[test]
fn test_redemption_conserves_supply_across_holders() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());
    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, creator_out) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();

    // Two more buyers carry the reserve from 7,000 to exactly 42,000.
    approve(&mut engine, asset, TRADER, 20_000);
    let trader_out = engine
        .buy(id, TRADER, 20_000, 0, NOW + 60, NOW)
        .unwrap()
        .amount_out;
    approve(&mut engine, asset, HOLDER, 15_000);
    let holder_out = engine
        .buy(id, HOLDER, 15_000, 0, NOW + 60, NOW)
        .unwrap()
        .amount_out;

    let launch = engine.launch_info(id).unwrap().clone();
    assert!(launch.graduated);
    let free = launch.free_token.unwrap();
    let restricted = launch.restricted_token;

    // The vault's free custody equals circulating restricted holdings.
    assert_eq!(
        engine.ledger().balance_of(free, launch.vault),
        creator_out + trader_out + holder_out
    );

    for (holder, amount) in [(CREATOR, creator_out), (TRADER, trader_out), (HOLDER, holder_out)] {
        approve(&mut engine, restricted, holder, amount);
        engine.redeem(id, holder, amount).expect("redeem");
        assert_eq!(engine.ledger().balance_of(free, holder), amount);
        assert_eq!(engine.ledger().balance_of(restricted, holder), 0);
    }

    // Custody fully shifted; supply untouched.
    assert_eq!(engine.ledger().balance_of(free, launch.vault), 0);
    assert_eq!(engine.ledger().total_supply(free), 1_000_000_000);
}

#[test]
fn test_graduated_index_pagination() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());

    let mut ids = Vec::new();
    for (name, symbol) in [("Orbital", "ORB"), ("Meridian", "MRD"), ("Zephyr", "ZPH")] {
        approve(&mut engine, asset, CREATOR, 7_000);
        let (id, _) = engine
            .launch(CREATOR, metadata(name, symbol), 7_000, NOW)
            .unwrap();
        ids.push(id);
    }

    // Graduate the first and third launch.
    for &id in [&ids[0], &ids[2]] {
        approve(&mut engine, asset, TRADER, 35_000);
        engine.buy(id, TRADER, 35_000, 0, NOW + 60, NOW).unwrap();
    }

    assert_eq!(engine.graduated_count(), 2);
    assert_eq!(engine.graduated_launches(0, 1), vec![ids[0]]);
    assert_eq!(engine.graduated_launches(1, 10), vec![ids[2]]);
    assert!(engine.graduated_launches(2, 10).is_empty());
    assert!(!engine.launch_info(ids[1]).unwrap().graduated);
}

#[test]
fn test_second_equal_buy_yields_strictly_fewer_tokens() {
    let (mut engine, _, asset) = build_engine(InMemoryVenue::new());
    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, _) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();

    approve(&mut engine, asset, TRADER, 10_000);
    let first = engine.buy(id, TRADER, 5_000, 0, NOW + 60, NOW).unwrap();
    let second = engine.buy(id, TRADER, 5_000, 0, NOW + 60, NOW).unwrap();
    assert!(second.amount_out < first.amount_out);
}

#[test]
fn test_reserve_product_never_decreases_across_mixed_trading() {
    let (mut engine, admin, asset) = build_engine(InMemoryVenue::new());
    // A non-zero trade fee should only help the product grow.
    engine.set_trade_fee(&admin, 100).unwrap();

    approve(&mut engine, asset, CREATOR, 7_000);
    let (id, _) = engine
        .launch(CREATOR, metadata("Orbital", "ORB"), 7_000, NOW)
        .unwrap();
    let restricted = engine.launch_info(id).unwrap().restricted_token;

    fn product(reserves: (u64, u64)) -> u128 {
        reserves.0 as u128 * reserves.1 as u128
    }

    let mut k = product(engine.reserves(id).unwrap());
    approve(&mut engine, asset, TRADER, 12_000);

    let bought = engine.buy(id, TRADER, 8_000, 0, NOW + 60, NOW).unwrap();
    assert!(product(engine.reserves(id).unwrap()) >= k);
    k = product(engine.reserves(id).unwrap());

    approve(&mut engine, restricted, TRADER, bought.amount_out);
    engine
        .sell(id, TRADER, bought.amount_out / 2, 0, NOW + 60, NOW)
        .unwrap();
    assert!(product(engine.reserves(id).unwrap()) >= k);
    k = product(engine.reserves(id).unwrap());

    engine.buy(id, TRADER, 4_000, 0, NOW + 60, NOW).unwrap();
    assert!(product(engine.reserves(id).unwrap()) >= k);
    k = product(engine.reserves(id).unwrap());

    engine
        .sell(id, TRADER, bought.amount_out / 4, 0, NOW + 60, NOW)
        .unwrap();
    assert!(product(engine.reserves(id).unwrap()) >= k);
}

#[test]
fn test_foreign_capability_cannot_administer() {
    let (mut engine, _, _) = build_engine(InMemoryVenue::new());
    // Same role, same account id, different policy: still rejected,
    // because the engine's policy never granted this token.
    let (_, foreign) = Policy::new(liftpad_common::AccountId(77));
    assert_eq!(
        engine.set_trade_fee(&foreign, 0),
        Err(LaunchpadError::Unauthorized)
    );
}
