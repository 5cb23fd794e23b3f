//! The launch and graduation engine
//!
//! One engine instance owns every launch record, the pool registry, the
//! capability policy, the event journal, and the two collaborator
//! handles. All operations run to completion under the host's serialized
//! execution; any failure after a mutation begins is compensated before
//! control returns, so no partial effects are ever observable.

use std::collections::BTreeMap;

use liftpad_common::{
    AccountId, Amount, Capability, Event, LaunchId, LaunchpadConfig, LaunchpadError, Ledger,
    LedgerError, Policy, PoolId, Role, Side, Timestamp, TokenId, Venue, VenuePoolId,
    BPS_DENOMINATOR, MAX_FEE_BPS,
};
use liftpad_curve::{CurvePool, PoolRegistry};
use liftpad_router::{execute_buy, execute_sell, TradeLimits, TradeReceipt, TradeRequest};
use serde::{Deserialize, Serialize};

use crate::launch::{Launch, LaunchMetadata};

/// Curve shape installed by the admin: the "pool implementation" every
/// launch is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Fixed supply minted to the pool vault per launch
    pub token_supply: Amount,

    /// Virtual reserve-asset seed; shapes the opening price and keeps
    /// the pricing denominator non-zero. No custody stands behind it.
    pub virtual_asset_seed: Amount,
}

/// Durable record of a graduation in flight.
///
/// Staged before the first external-venue call and cleared when the
/// graduation commits. The record carries everything needed to either
/// re-drive the migration ([`LaunchpadEngine::resume_pending`]) or undo
/// the triggering buy ([`LaunchpadEngine::abort_pending`]) after a host
/// restart. Persisting it between those two points is the host's job;
/// the record serializes for exactly that purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingGraduation {
    pub launch: LaunchId,

    /// The buy that crossed the threshold, for compensation
    pub trigger: TradeReceipt,

    /// Pool state before the triggering buy
    pub pool_before: CurvePool,
    pub asset_raised_before: Amount,
    pub tokens_sold_before: Amount,

    /// Set once the free token has been minted
    pub free_token: Option<TokenId>,

    /// Set once the venue pool is known
    pub venue_pool: Option<VenuePoolId>,
}

pub struct LaunchpadEngine<L: Ledger, V: Venue> {
    config: LaunchpadConfig,
    reserve_asset: TokenId,
    operator: AccountId,

    policy: Policy,
    executor_cap: Capability,
    creator_cap: Capability,

    ledger: L,
    venue: Option<V>,
    pool_impl: Option<CurveParams>,

    registry: PoolRegistry,
    launches: BTreeMap<LaunchId, Launch>,
    graduated: Vec<LaunchId>,
    pending: BTreeMap<LaunchId, PendingGraduation>,
    events: Vec<Event>,
    next_launch: u64,
}

impl<L: Ledger, V: Venue> LaunchpadEngine<L, V> {
    /// Build an engine over `ledger`, trading every launch against
    /// `reserve_asset`. Returns the admin capability for `admin`; the
    /// executor and pool-creator roles are granted to the engine's own
    /// operator account and never leave it.
    pub fn new(
        config: LaunchpadConfig,
        ledger: L,
        reserve_asset: TokenId,
        admin: AccountId,
    ) -> Result<(Self, Capability), LaunchpadError> {
        config.validate()?;

        let operator = AccountId::operator();
        let (mut policy, admin_cap) = Policy::new(admin);
        let executor_cap = policy.issue(&admin_cap, Role::Executor, operator)?;
        let creator_cap = policy.issue(&admin_cap, Role::PoolCreator, operator)?;

        let engine = Self {
            config,
            reserve_asset,
            operator,
            policy,
            executor_cap,
            creator_cap,
            ledger,
            venue: None,
            pool_impl: None,
            registry: PoolRegistry::new(),
            launches: BTreeMap::new(),
            graduated: Vec::new(),
            pending: BTreeMap::new(),
            events: Vec::new(),
            next_launch: 0,
        };
        Ok((engine, admin_cap))
    }

    // ----- admin surface ---------------------------------------------------

    /// Point the engine at the external venue adapter.
    pub fn install_venue(&mut self, cap: &Capability, venue: V) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        self.venue = Some(venue);
        Ok(())
    }

    /// Install the curve parameters new launches are created from.
    pub fn install_pool_impl(
        &mut self,
        cap: &Capability,
        params: CurveParams,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        if params.token_supply == 0 || params.virtual_asset_seed == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        if params.virtual_asset_seed >= self.config.graduation_threshold {
            return Err(LaunchpadError::ZeroAmount);
        }
        self.pool_impl = Some(params);
        Ok(())
    }

    pub fn set_fee_recipient(
        &mut self,
        cap: &Capability,
        recipient: AccountId,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        self.config.fee_recipient = recipient;
        Ok(())
    }

    pub fn set_flat_creation_fee(
        &mut self,
        cap: &Capability,
        fee: Amount,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        self.config.flat_creation_fee = fee;
        Ok(())
    }

    pub fn set_minimum_deposit(
        &mut self,
        cap: &Capability,
        minimum: Amount,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        self.config.minimum_deposit = minimum;
        Ok(())
    }

    pub fn set_trade_fee(&mut self, cap: &Capability, fee_bps: u64) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        if fee_bps > MAX_FEE_BPS {
            return Err(LaunchpadError::FeeTooHigh);
        }
        self.config.trade_fee_bps = fee_bps;
        Ok(())
    }

    pub fn set_graduation_threshold(
        &mut self,
        cap: &Capability,
        threshold: Amount,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        if threshold == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        if let Some(params) = self.pool_impl {
            if params.virtual_asset_seed >= threshold {
                return Err(LaunchpadError::ZeroAmount);
            }
        }
        self.config.graduation_threshold = threshold;
        Ok(())
    }

    pub fn set_max_trade_fraction(
        &mut self,
        cap: &Capability,
        max_bps: u64,
    ) -> Result<(), LaunchpadError> {
        self.policy.verify(cap, Role::Admin)?;
        if max_bps == 0 || max_bps > BPS_DENOMINATOR {
            return Err(LaunchpadError::TradeTooLarge);
        }
        self.config.max_trade_bps = max_bps;
        Ok(())
    }

    // ----- lifecycle: Created -> Trading -----------------------------------

    /// Create a launch: collect the flat fee, mint the restricted token
    /// to a fresh pool, and execute the implicit first buy with the rest
    /// of the deposit. Returns the launch id and the tokens bought.
    ///
    /// The creator must hold `deposit` of the reserve asset and have
    /// approved the engine's operator account for at least that much.
    pub fn launch(
        &mut self,
        creator: AccountId,
        metadata: LaunchMetadata,
        deposit: Amount,
        now: Timestamp,
    ) -> Result<(LaunchId, Amount), LaunchpadError> {
        metadata.validate()?;
        let params = self.pool_impl.ok_or(LaunchpadError::NotConfigured)?;

        let fee = self.config.flat_creation_fee;
        let floor = self
            .config
            .minimum_deposit
            .checked_add(fee)
            .ok_or(LaunchpadError::Overflow)?;
        if deposit <= floor {
            return Err(LaunchpadError::DepositBelowMinimum);
        }

        // Reject an unfundable creation before anything moves.
        if self.ledger.balance_of(self.reserve_asset, creator) < deposit {
            return Err(LedgerError::InsufficientBalance.into());
        }
        if self.ledger.allowance(self.reserve_asset, creator, self.operator) < deposit {
            return Err(LedgerError::InsufficientAllowance.into());
        }

        let id = LaunchId(self.next_launch);
        let vault = AccountId::pool_vault(id);

        self.ledger.transfer_from(
            self.reserve_asset,
            creator,
            self.operator,
            self.config.fee_recipient,
            fee,
        )?;

        let restricted = self.ledger.create_token(params.token_supply, vault);
        let pool = match self.registry.create_pool(
            &self.policy,
            &self.creator_cap,
            restricted,
            self.reserve_asset,
            vault,
            params.token_supply,
            params.virtual_asset_seed,
        ) {
            Ok(pool) => pool,
            Err(e) => {
                self.refund_fee(creator, fee);
                return Err(e);
            }
        };

        self.next_launch += 1;
        let events_mark = self.events.len();
        self.launches.insert(
            id,
            Launch {
                id,
                creator,
                restricted_token: restricted,
                free_token: None,
                pool,
                vault,
                metadata,
                trading_enabled: true,
                graduated: false,
                asset_raised: 0,
                tokens_sold: 0,
                venue_pool: None,
                in_flight: false,
            },
        );
        self.events.push(Event::Launched {
            launch: id,
            creator,
            restricted_token: restricted,
            deposit,
        });

        // The first buy bootstraps the curve from the seed price; the
        // per-trade size limit only applies to steady-state trading.
        let first_buy = deposit - fee;
        match self.with_guard(id, |eng| {
            eng.trade_inner(id, Side::Buy, creator, first_buy, 0, now, now, true)
        }) {
            Ok(receipt) => {
                log::info!(
                    "engine: {} created by {} (pool {}, first buy {} -> {})",
                    id,
                    creator,
                    pool,
                    first_buy,
                    receipt.amount_out
                );
                Ok((id, receipt.amount_out))
            }
            Err(e) => {
                // Unwind the whole creation: no launch is recorded.
                self.launches.remove(&id);
                let _ = self.registry.remove_pool(&self.policy, &self.creator_cap, pool);
                self.events.truncate(events_mark);
                self.refund_fee(creator, fee);
                Err(e)
            }
        }
    }

    // ----- lifecycle: Trading ----------------------------------------------

    /// Buy launched tokens with the reserve asset. Graduation, when the
    /// buy crosses the threshold, happens inside this call.
    pub fn buy(
        &mut self,
        id: LaunchId,
        trader: AccountId,
        asset_in: Amount,
        min_tokens_out: Amount,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<TradeReceipt, LaunchpadError> {
        self.with_guard(id, |eng| {
            eng.trade_inner(
                id,
                Side::Buy,
                trader,
                asset_in,
                min_tokens_out,
                deadline,
                now,
                false,
            )
        })
    }

    /// Sell launched tokens back into the curve. Rejected outright once
    /// the launch has graduated; post-graduation selling belongs on the
    /// external venue.
    pub fn sell(
        &mut self,
        id: LaunchId,
        trader: AccountId,
        tokens_in: Amount,
        min_asset_out: Amount,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<TradeReceipt, LaunchpadError> {
        self.with_guard(id, |eng| {
            eng.trade_inner(
                id,
                Side::Sell,
                trader,
                tokens_in,
                min_asset_out,
                deadline,
                now,
                false,
            )
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn trade_inner(
        &mut self,
        id: LaunchId,
        side: Side,
        trader: AccountId,
        amount_in: Amount,
        min_out: Amount,
        deadline: Timestamp,
        now: Timestamp,
        bypass_size_limit: bool,
    ) -> Result<TradeReceipt, LaunchpadError> {
        let pool_id = {
            let launch = self.launches.get(&id).ok_or(LaunchpadError::UnknownLaunch)?;
            if launch.graduated {
                return Err(LaunchpadError::AlreadyGraduated);
            }
            if !launch.trading_enabled {
                return Err(LaunchpadError::TradingDisabled);
            }
            launch.pool
        };

        let limits = TradeLimits {
            fee_bps: self.config.trade_fee_bps,
            max_trade_bps: if bypass_size_limit {
                BPS_DENOMINATOR
            } else {
                self.config.max_trade_bps
            },
        };
        let req = TradeRequest {
            trader,
            amount_in,
            min_out,
            deadline,
            now,
        };

        let pool_before = self
            .registry
            .get_pool(pool_id)
            .ok_or(LaunchpadError::UnknownPool)?
            .clone();

        let receipt = {
            let pool = self
                .registry
                .get_pool_mut(pool_id)
                .ok_or(LaunchpadError::UnknownPool)?;
            match side {
                Side::Buy => execute_buy(
                    &self.policy,
                    &self.executor_cap,
                    &mut self.ledger,
                    pool,
                    self.operator,
                    &req,
                    limits,
                )?,
                Side::Sell => execute_sell(
                    &self.policy,
                    &self.executor_cap,
                    &mut self.ledger,
                    pool,
                    self.operator,
                    &req,
                    limits,
                )?,
            }
        };

        let (raised_before, sold_before) = {
            let launch = self
                .launches
                .get_mut(&id)
                .ok_or(LaunchpadError::UnknownLaunch)?;
            let before = (launch.asset_raised, launch.tokens_sold);
            // Counter maintenance saturates: the reserves themselves are
            // the checked source of truth, these are reporting trackers.
            match side {
                Side::Buy => {
                    launch.asset_raised =
                        launch.asset_raised.saturating_add(receipt.in_net_of_fee);
                    launch.tokens_sold = launch.tokens_sold.saturating_add(receipt.amount_out);
                }
                Side::Sell => {
                    launch.asset_raised = launch.asset_raised.saturating_sub(receipt.amount_out);
                    launch.tokens_sold = launch.tokens_sold.saturating_sub(receipt.amount_in);
                }
            }
            before
        };

        let events_mark = self.events.len();
        let (asset_amount, token_amount) = match side {
            Side::Buy => (receipt.amount_in, receipt.amount_out),
            Side::Sell => (receipt.amount_out, receipt.amount_in),
        };
        self.events.push(Event::Trade {
            launch: id,
            trader,
            side,
            asset_amount,
            token_amount,
            reserve_token: receipt.reserve_token,
            reserve_asset: receipt.reserve_asset,
        });
        log::info!(
            "engine: {} {:?} by {} asset={} tokens={} reserves=({}, {})",
            id,
            side,
            trader,
            asset_amount,
            token_amount,
            receipt.reserve_token,
            receipt.reserve_asset
        );

        if side == Side::Buy && receipt.reserve_asset >= self.config.graduation_threshold {
            self.pending.insert(
                id,
                PendingGraduation {
                    launch: id,
                    trigger: receipt,
                    pool_before,
                    asset_raised_before: raised_before,
                    tokens_sold_before: sold_before,
                    free_token: None,
                    venue_pool: None,
                },
            );
            if let Some(launch) = self.launches.get_mut(&id) {
                launch.trading_enabled = false;
            }
            if let Err(e) = self.try_complete_graduation(id) {
                // Graduation is all-or-nothing with the trade that
                // caused it: unwind the buy too.
                self.roll_back_pending(id);
                self.events.truncate(events_mark);
                return Err(e);
            }
        }

        Ok(receipt)
    }

    // ----- lifecycle: Trading -> Graduated ---------------------------------

    /// Drive a staged graduation to completion: mint the free token,
    /// get-or-create the venue pool, move the pool's custody over, and
    /// only then commit the local state transition.
    fn try_complete_graduation(&mut self, id: LaunchId) -> Result<(), LaunchpadError> {
        let (vault, restricted, pool_id) = {
            let launch = self.launches.get(&id).ok_or(LaunchpadError::UnknownLaunch)?;
            (launch.vault, launch.restricted_token, launch.pool)
        };
        let (unsold, _) = self
            .registry
            .get_pool(pool_id)
            .ok_or(LaunchpadError::UnknownPool)?
            .reserves();
        let real_asset = self
            .registry
            .get_pool(pool_id)
            .ok_or(LaunchpadError::UnknownPool)?
            .real_asset();

        // Step 1: deploy or reuse the free token, same fixed supply,
        // minted to the pool vault.
        let free = match self.pending.get(&id).and_then(|p| p.free_token) {
            Some(token) => token,
            None => {
                let supply = self.ledger.total_supply(restricted);
                let token = self.ledger.create_token(supply, vault);
                if let Some(p) = self.pending.get_mut(&id) {
                    p.free_token = Some(token);
                }
                token
            }
        };

        // Step 2: query or create the venue pool. Creation is idempotent
        // on the venue side; an existing pool is reused.
        let reserve_asset = self.reserve_asset;
        let venue_pool = {
            let venue = self.venue.as_mut().ok_or(LaunchpadError::NotConfigured)?;
            match venue.get_pool(free, reserve_asset) {
                Some(pool) => pool,
                None => venue.create_pool(free, reserve_asset)?,
            }
        };
        if let Some(p) = self.pending.get_mut(&id) {
            p.venue_pool = Some(venue_pool);
        }

        // Step 3: move the unsold free tokens and the full real asset
        // balance into venue custody, then report the seed.
        let custody = AccountId::venue_custody(venue_pool);
        self.ledger.transfer(free, vault, custody, unsold)?;
        if let Err(e) = self
            .ledger
            .transfer(reserve_asset, vault, custody, real_asset)
        {
            self.compensate(free, custody, vault, unsold);
            return Err(e.into());
        }

        let seeded = self
            .venue
            .as_mut()
            .ok_or(LaunchpadError::NotConfigured)?
            .seed_liquidity(venue_pool, unsold, real_asset);
        let lp_units = match seeded {
            Ok(lp) => lp,
            Err(e) => {
                self.compensate(free, custody, vault, unsold);
                self.compensate(reserve_asset, custody, vault, real_asset);
                return Err(e.into());
            }
        };

        // Steps 4-6: the venue is confirmed; commit the local transition.
        if let Some(pool) = self.registry.get_pool_mut(pool_id) {
            pool.freeze();
        }
        if let Some(launch) = self.launches.get_mut(&id) {
            launch.free_token = Some(free);
            launch.venue_pool = Some(venue_pool);
            launch.trading_enabled = false;
            launch.graduated = true;
        }
        self.graduated.push(id);
        self.pending.remove(&id);
        self.events.push(Event::Graduated {
            launch: id,
            free_token: free,
            venue_pool,
            seeded_tokens: unsold,
            seeded_asset: real_asset,
            lp_units,
        });
        log::info!(
            "engine: {} graduated to {} (seeded {} tokens, {} asset, {} lp)",
            id,
            venue_pool,
            unsold,
            real_asset,
            lp_units
        );
        Ok(())
    }

    /// Undo a staged graduation and the buy that triggered it.
    fn roll_back_pending(&mut self, id: LaunchId) {
        let Some(p) = self.pending.remove(&id) else {
            return;
        };
        let (pool_id, vault, restricted) = match self.launches.get(&id) {
            Some(launch) => (launch.pool, launch.vault, launch.restricted_token),
            None => return,
        };

        let asset = p.pool_before.asset;
        if let Some(pool) = self.registry.get_pool_mut(pool_id) {
            *pool = p.pool_before;
        }
        if let Some(launch) = self.launches.get_mut(&id) {
            launch.asset_raised = p.asset_raised_before;
            launch.tokens_sold = p.tokens_sold_before;
            launch.trading_enabled = true;
            launch.graduated = false;
        }

        // Compensate the triggering buy's two ledger legs.
        self.compensate(asset, vault, p.trigger.trader, p.trigger.amount_in);
        self.compensate(restricted, p.trigger.trader, vault, p.trigger.amount_out);

        if let Some(free) = p.free_token {
            // The minted free supply stays parked in the vault; the next
            // graduation attempt reuses it via the pending record it was
            // recorded in, or it simply remains unreferenced.
            log::warn!("engine: rolled back {} with free token {} already minted", id, free);
        }
        log::warn!("engine: graduation of {} rolled back", id);
    }

    /// Compensating transfer inside a rollback. The funds were placed a
    /// moment earlier in the same serialized operation, so failure here
    /// means the ledger itself is inconsistent; log and continue.
    fn compensate(&mut self, token: TokenId, from: AccountId, to: AccountId, amount: Amount) {
        if amount == 0 {
            return;
        }
        if let Err(e) = self.ledger.transfer(token, from, to, amount) {
            log::error!(
                "engine: compensation {} {} -> {} of {} failed: {}",
                token,
                from,
                to,
                amount,
                e
            );
        }
    }

    fn refund_fee(&mut self, creator: AccountId, fee: Amount) {
        let recipient = self.config.fee_recipient;
        self.compensate(self.reserve_asset, recipient, creator, fee);
    }

    // ----- pending-graduation recovery -------------------------------------

    /// Re-drive a graduation that was staged but never confirmed, e.g.
    /// after a host restart. Returns `Ok(false)` when nothing is pending.
    pub fn resume_pending(&mut self, id: LaunchId) -> Result<bool, LaunchpadError> {
        if !self.pending.contains_key(&id) {
            return Ok(false);
        }
        log::info!("engine: resuming pending graduation of {}", id);
        self.try_complete_graduation(id)?;
        Ok(true)
    }

    /// Roll a staged graduation back instead of completing it, undoing
    /// the triggering buy. Returns `Ok(false)` when nothing is pending.
    pub fn abort_pending(&mut self, id: LaunchId) -> Result<bool, LaunchpadError> {
        if !self.pending.contains_key(&id) {
            return Ok(false);
        }
        self.roll_back_pending(id);
        Ok(true)
    }

    /// Re-install a pending record the host persisted before a restart.
    pub fn restore_pending(&mut self, record: PendingGraduation) {
        self.pending.insert(record.launch, record);
    }

    pub fn pending_graduation(&self, id: LaunchId) -> Option<&PendingGraduation> {
        self.pending.get(&id)
    }

    // ----- lifecycle: Graduated --------------------------------------------

    /// Redeem restricted holdings 1:1 for the free token. The holder
    /// must have approved the engine's operator account for `amount` of
    /// the restricted token.
    pub fn redeem(
        &mut self,
        id: LaunchId,
        holder: AccountId,
        amount: Amount,
    ) -> Result<(), LaunchpadError> {
        self.with_guard(id, |eng| eng.redeem_inner(id, holder, amount))
    }

    fn redeem_inner(
        &mut self,
        id: LaunchId,
        holder: AccountId,
        amount: Amount,
    ) -> Result<(), LaunchpadError> {
        if amount == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        let (vault, restricted, free) = {
            let launch = self.launches.get(&id).ok_or(LaunchpadError::UnknownLaunch)?;
            if !launch.graduated {
                return Err(LaunchpadError::NotGraduated);
            }
            let free = launch.free_token.ok_or(LaunchpadError::NotGraduated)?;
            (launch.vault, launch.restricted_token, free)
        };

        // Restricted units return to the vault, permanently out of
        // circulation; the same amount of free units leaves pool custody.
        self.ledger
            .transfer_from(restricted, holder, self.operator, vault, amount)?;
        if let Err(e) = self.ledger.transfer(free, vault, holder, amount) {
            self.compensate(restricted, vault, holder, amount);
            return Err(e.into());
        }

        self.events.push(Event::Redeemed {
            launch: id,
            holder,
            amount,
        });
        log::info!("engine: {} redeemed {} for {}", id, amount, holder);
        Ok(())
    }

    // ----- query surface ---------------------------------------------------

    pub fn launch_info(&self, id: LaunchId) -> Option<&Launch> {
        self.launches.get(&id)
    }

    pub fn reserves(&self, id: LaunchId) -> Result<(Amount, Amount), LaunchpadError> {
        let launch = self.launches.get(&id).ok_or(LaunchpadError::UnknownLaunch)?;
        let pool = self
            .registry
            .get_pool(launch.pool)
            .ok_or(LaunchpadError::UnknownPool)?;
        Ok(pool.reserves())
    }

    pub fn spot_price(&self, id: LaunchId) -> Result<Amount, LaunchpadError> {
        let launch = self.launches.get(&id).ok_or(LaunchpadError::UnknownLaunch)?;
        let pool = self
            .registry
            .get_pool(launch.pool)
            .ok_or(LaunchpadError::UnknownPool)?;
        Ok(pool.spot_price())
    }

    /// Current virtual asset reserve next to the graduation threshold.
    pub fn graduation_progress(&self, id: LaunchId) -> Result<(Amount, Amount), LaunchpadError> {
        let (_, reserve_asset) = self.reserves(id)?;
        Ok((reserve_asset, self.config.graduation_threshold))
    }

    /// Page through launches in graduation order.
    pub fn graduated_launches(&self, offset: usize, limit: usize) -> Vec<LaunchId> {
        self.graduated
            .iter()
            .skip(offset)
            .take(limit)
            .copied()
            .collect()
    }

    pub fn graduated_count(&self) -> usize {
        self.graduated.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn operator(&self) -> AccountId {
        self.operator
    }

    pub fn reserve_asset(&self) -> TokenId {
        self.reserve_asset
    }

    pub fn pool_id(&self, id: LaunchId) -> Option<PoolId> {
        self.launches.get(&id).map(|l| l.pool)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn venue(&self) -> Option<&V> {
        self.venue.as_ref()
    }

    /// Mutable collaborator access for the host (account funding,
    /// allowance management). The engine never relies on exclusive
    /// ledger ownership between operations.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // ----- internals -------------------------------------------------------

    /// Per-launch re-entrancy guard. A nested operation on the same
    /// launch observing half-applied reserves would break the product
    /// invariant; it is rejected outright.
    fn with_guard<T>(
        &mut self,
        id: LaunchId,
        f: impl FnOnce(&mut Self) -> Result<T, LaunchpadError>,
    ) -> Result<T, LaunchpadError> {
        {
            let launch = self
                .launches
                .get_mut(&id)
                .ok_or(LaunchpadError::UnknownLaunch)?;
            if launch.in_flight {
                return Err(LaunchpadError::Reentrancy);
            }
            launch.in_flight = true;
        }
        let result = f(self);
        if let Some(launch) = self.launches.get_mut(&id) {
            launch.in_flight = false;
        }
        result
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
