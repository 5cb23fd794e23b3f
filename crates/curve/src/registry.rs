//! Pool registry - creates and indexes curve pools
//!
//! An explicit map owned by the host, with creation gated to the single
//! account holding the pool-creator capability. The registry does not
//! silently return an existing pool for a known pair: callers are meant
//! to probe `get_pool_by_pair` first, so a duplicate creation is a bug
//! worth surfacing immediately.

use std::collections::{BTreeMap, HashMap};

use liftpad_common::{
    AccountId, Amount, Capability, LaunchpadError, Policy, PoolId, Role, TokenId,
};

use crate::pool::CurvePool;

fn pair_key(a: TokenId, b: TokenId) -> (TokenId, TokenId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Default)]
pub struct PoolRegistry {
    next_pool: u64,
    pools: BTreeMap<PoolId, CurvePool>,
    pairs: HashMap<(TokenId, TokenId), PoolId>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pool for the unordered `(token, asset)` pair.
    pub fn create_pool(
        &mut self,
        policy: &Policy,
        cap: &Capability,
        token: TokenId,
        asset: TokenId,
        vault: AccountId,
        token_supply: Amount,
        virtual_asset_seed: Amount,
    ) -> Result<PoolId, LaunchpadError> {
        policy.verify(cap, Role::PoolCreator)?;

        let key = pair_key(token, asset);
        if self.pairs.contains_key(&key) {
            return Err(LaunchpadError::AlreadyExists);
        }

        let pool = CurvePool::new(token, asset, vault, token_supply, virtual_asset_seed)?;
        let id = PoolId(self.next_pool);
        self.next_pool += 1;
        self.pairs.insert(key, id);
        self.pools.insert(id, pool);
        Ok(id)
    }

    /// Remove a pool registered earlier. Only used to unwind a launch
    /// whose implicit first buy failed; an active pool is never removed.
    pub fn remove_pool(
        &mut self,
        policy: &Policy,
        cap: &Capability,
        id: PoolId,
    ) -> Result<(), LaunchpadError> {
        policy.verify(cap, Role::PoolCreator)?;
        let pool = self.pools.remove(&id).ok_or(LaunchpadError::UnknownPool)?;
        self.pairs.remove(&pair_key(pool.token, pool.asset));
        Ok(())
    }

    pub fn get_pool(&self, id: PoolId) -> Option<&CurvePool> {
        self.pools.get(&id)
    }

    pub fn get_pool_mut(&mut self, id: PoolId) -> Option<&mut CurvePool> {
        self.pools.get_mut(&id)
    }

    pub fn get_pool_by_pair(&self, a: TokenId, b: TokenId) -> Option<PoolId> {
        self.pairs.get(&pair_key(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
