//! Launch and graduation engine
//!
//! Owns the per-launch records and drives the launch lifecycle:
//! `Created -> Trading -> Graduated`. Trading runs against the bonding
//! curve through the router until the graduation threshold is reached;
//! the crossing buy migrates the accumulated liquidity to the external
//! venue, permanently disables curve trading, and opens 1:1 redemption
//! of restricted holdings into the freely transferable token.

pub mod engine;
pub mod facade;
pub mod launch;

pub use engine::*;
pub use facade::*;
pub use launch::*;
