//! Ledger collaborator
//!
//! The ledger owns actual asset custody; the launchpad core only records
//! logical balances consistent with transfers it has executed. Every
//! mutation is atomic: on error nothing has moved, and the surrounding
//! operation aborts with `TransferFailed`.
//!
//! `transfer` moves funds out of accounts the caller has authority over.
//! The core is the ledger's sole caller here, acting for its own custody
//! accounts (pool vaults, venue custody) and, when compensating an
//! already-credited leg of the same logical operation, for the
//! counterparty. `transfer_from` is the allowance-gated path used
//! whenever the core debits an end user.

use std::collections::HashMap;

use crate::error::LedgerError;
use crate::types::{AccountId, Amount, TokenId};

pub trait Ledger {
    /// Create a new fungible asset with `supply` minted to `mint_to`.
    fn create_token(&mut self, supply: Amount, mint_to: AccountId) -> TokenId;

    fn total_supply(&self, token: TokenId) -> Amount;

    fn balance_of(&self, token: TokenId, holder: AccountId) -> Amount;

    fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn approve(
        &mut self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount;

    /// Move `amount` from `owner` to `to`, consuming `spender`'s allowance.
    fn transfer_from(
        &mut self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Map-backed reference ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    next_token: u64,
    supplies: HashMap<TokenId, Amount>,
    balances: HashMap<(TokenId, AccountId), Amount>,
    allowances: HashMap<(TokenId, AccountId, AccountId), Amount>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn credit(&mut self, token: TokenId, to: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let entry = self.balances.entry((token, to)).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(())
    }

    fn debit(&mut self, token: TokenId, from: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let entry = self
            .balances
            .get_mut(&(token, from))
            .ok_or(LedgerError::InsufficientBalance)?;
        if *entry < amount {
            return Err(LedgerError::InsufficientBalance);
        }
        *entry -= amount;
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn create_token(&mut self, supply: Amount, mint_to: AccountId) -> TokenId {
        let token = TokenId(self.next_token);
        self.next_token += 1;
        self.supplies.insert(token, supply);
        self.balances.insert((token, mint_to), supply);
        log::debug!("ledger: created {} supply {} to {}", token, supply, mint_to);
        token
    }

    fn total_supply(&self, token: TokenId) -> Amount {
        self.supplies.get(&token).copied().unwrap_or(0)
    }

    fn balance_of(&self, token: TokenId, holder: AccountId) -> Amount {
        self.balances.get(&(token, holder)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if !self.supplies.contains_key(&token) {
            return Err(LedgerError::UnknownToken);
        }
        // Check both legs before touching anything so failures are atomic.
        if self.balance_of(token, from) < amount {
            return Err(LedgerError::InsufficientBalance);
        }
        if self.balance_of(token, to).checked_add(amount).is_none() {
            return Err(LedgerError::BalanceOverflow);
        }
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)?;
        log::debug!("ledger: {} {} -> {} amount {}", token, from, to, amount);
        Ok(())
    }

    fn approve(
        &mut self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if !self.supplies.contains_key(&token) {
            return Err(LedgerError::UnknownToken);
        }
        self.allowances.insert((token, owner, spender), amount);
        Ok(())
    }

    fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_from(
        &mut self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(token, owner, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        self.transfer(token, owner, to, amount)?;
        self.allowances
            .insert((token, owner, spender), allowed - amount);
        Ok(())
    }
}
