//! External constant-product venue collaborator
//!
//! Consumed only through a "create pool, seed liquidity, report reserves"
//! interface. The engine treats pool creation as idempotent: it probes
//! `get_pool` first and reuses an existing pool rather than failing.

use std::collections::HashMap;

use crate::error::VenueError;
use crate::types::{Amount, TokenId, VenuePoolId};

pub trait Venue {
    fn get_pool(&self, a: TokenId, b: TokenId) -> Option<VenuePoolId>;

    fn create_pool(&mut self, a: TokenId, b: TokenId) -> Result<VenuePoolId, VenueError>;

    /// Deposit `amount_a` of the pool's first token and `amount_b` of the
    /// second, returning the LP units minted for the deposit.
    fn seed_liquidity(
        &mut self,
        pool: VenuePoolId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Amount, VenueError>;

    fn get_reserves(&self, pool: VenuePoolId) -> Option<(Amount, Amount)>;
}

fn pair_key(a: TokenId, b: TokenId) -> (TokenId, TokenId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Babylonian integer square root, for LP unit issuance.
fn isqrt(x: u128) -> u128 {
    if x < 2 {
        return x;
    }
    let mut z = x;
    let mut y = (x >> 1) + 1;
    while y < z {
        z = y;
        y = (x / y + y) >> 1;
    }
    z
}

#[derive(Debug, Clone, Default)]
struct VenuePool {
    reserve_a: Amount,
    reserve_b: Amount,
}

/// Map-backed reference venue.
#[derive(Debug, Default)]
pub struct InMemoryVenue {
    next_pool: u64,
    pairs: HashMap<(TokenId, TokenId), VenuePoolId>,
    pools: HashMap<VenuePoolId, VenuePool>,
}

impl InMemoryVenue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Venue for InMemoryVenue {
    fn get_pool(&self, a: TokenId, b: TokenId) -> Option<VenuePoolId> {
        self.pairs.get(&pair_key(a, b)).copied()
    }

    fn create_pool(&mut self, a: TokenId, b: TokenId) -> Result<VenuePoolId, VenueError> {
        let key = pair_key(a, b);
        if let Some(existing) = self.pairs.get(&key) {
            return Ok(*existing);
        }
        let pool = VenuePoolId(self.next_pool);
        self.next_pool += 1;
        self.pairs.insert(key, pool);
        self.pools.insert(pool, VenuePool::default());
        log::debug!("venue: created {} for ({}, {})", pool, key.0, key.1);
        Ok(pool)
    }

    fn seed_liquidity(
        &mut self,
        pool: VenuePoolId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Amount, VenueError> {
        if amount_a == 0 || amount_b == 0 {
            return Err(VenueError::InvalidAmounts);
        }
        let entry = self.pools.get_mut(&pool).ok_or(VenueError::UnknownPool)?;
        let new_a = entry
            .reserve_a
            .checked_add(amount_a)
            .ok_or(VenueError::InvalidAmounts)?;
        let new_b = entry
            .reserve_b
            .checked_add(amount_b)
            .ok_or(VenueError::InvalidAmounts)?;
        entry.reserve_a = new_a;
        entry.reserve_b = new_b;
        let lp = isqrt(amount_a as u128 * amount_b as u128) as Amount;
        log::debug!("venue: seeded {} with ({}, {})", pool, amount_a, amount_b);
        Ok(lp)
    }

    fn get_reserves(&self, pool: VenuePoolId) -> Option<(Amount, Amount)> {
        self.pools
            .get(&pool)
            .map(|p| (p.reserve_a, p.reserve_b))
    }
}

/// Venue double that fails on demand, for exercising graduation rollback.
#[derive(Debug, Default)]
pub struct FlakyVenue {
    pub fail_create: bool,
    pub fail_seed: bool,
    inner: InMemoryVenue,
}

impl FlakyVenue {
    pub fn failing_seed() -> Self {
        Self {
            fail_seed: true,
            ..Self::default()
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }
}

impl Venue for FlakyVenue {
    fn get_pool(&self, a: TokenId, b: TokenId) -> Option<VenuePoolId> {
        self.inner.get_pool(a, b)
    }

    fn create_pool(&mut self, a: TokenId, b: TokenId) -> Result<VenuePoolId, VenueError> {
        if self.fail_create {
            return Err(VenueError::Unavailable);
        }
        self.inner.create_pool(a, b)
    }

    fn seed_liquidity(
        &mut self,
        pool: VenuePoolId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Amount, VenueError> {
        if self.fail_seed {
            return Err(VenueError::Unavailable);
        }
        self.inner.seed_liquidity(pool, amount_a, amount_b)
    }

    fn get_reserves(&self, pool: VenuePoolId) -> Option<(Amount, Amount)> {
        self.inner.get_reserves(pool)
    }
}
