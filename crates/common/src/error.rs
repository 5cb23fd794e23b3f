//! Error taxonomy shared by every crate in the workspace
//!
//! Validation errors are rejected before any state mutation. Guard errors
//! (`SlippageExceeded`, `Expired`) are retryable with updated parameters.
//! Collaborator failures (`TransferFailed`, `VenueFailed`) abort the whole
//! operation with no partial effects. Invalid-state errors are surfaced
//! distinctly so clients can branch, e.g. redirect a post-graduation buy
//! to the external venue. Nothing is retried inside the core.

use thiserror::Error;

/// Failure reported by the ledger collaborator. Every ledger mutation is
/// atomic: on error, no balance or allowance has moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unknown token")]
    UnknownToken,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("insufficient allowance")]
    InsufficientAllowance,
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Failure reported by the external venue collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VenueError {
    #[error("venue unavailable")]
    Unavailable,
    #[error("unknown venue pool")]
    UnknownPool,
    #[error("invalid liquidity amounts")]
    InvalidAmounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaunchpadError {
    // Validation: rejected before any state mutation
    #[error("name must not be empty")]
    EmptyName,
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("deposit does not cover the minimum plus the creation fee")]
    DepositBelowMinimum,
    #[error("trade would move more than the configured fraction of reserves")]
    TradeTooLarge,
    #[error("fee exceeds the configurable maximum")]
    FeeTooHigh,

    // User guards: retryable with updated parameters
    #[error("output below the requested minimum")]
    SlippageExceeded,
    #[error("deadline has passed")]
    Expired,

    // Collaborator failures: whole operation aborted, no partial effects
    #[error("ledger transfer failed: {0}")]
    TransferFailed(LedgerError),
    #[error("venue call failed: {0}")]
    VenueFailed(VenueError),

    // Invalid state for the launch's current lifecycle position
    #[error("no pool implementation or venue adapter configured")]
    NotConfigured,
    #[error("launch has already graduated")]
    AlreadyGraduated,
    #[error("launch has not graduated")]
    NotGraduated,
    #[error("trading is disabled for this launch")]
    TradingDisabled,
    #[error("reentrant call on the same launch")]
    Reentrancy,

    // Everything else
    #[error("caller lacks the required capability")]
    Unauthorized,
    #[error("insufficient liquidity")]
    InsufficientLiquidity,
    #[error("pool for this token pair already exists")]
    AlreadyExists,
    #[error("unknown launch")]
    UnknownLaunch,
    #[error("unknown pool")]
    UnknownPool,
    #[error("arithmetic overflow")]
    Overflow,
}

impl From<LedgerError> for LaunchpadError {
    fn from(e: LedgerError) -> Self {
        LaunchpadError::TransferFailed(e)
    }
}

impl From<VenueError> for LaunchpadError {
    fn from(e: VenueError) -> Self {
        LaunchpadError::VenueFailed(e)
    }
}

impl LaunchpadError {
    /// True for inputs the caller can correct and resubmit as-is.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LaunchpadError::EmptyName
                | LaunchpadError::EmptySymbol
                | LaunchpadError::ZeroAmount
                | LaunchpadError::DepositBelowMinimum
                | LaunchpadError::TradeTooLarge
                | LaunchpadError::FeeTooHigh
        )
    }

    /// True when the operation is illegal for the launch's current state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            LaunchpadError::NotConfigured
                | LaunchpadError::AlreadyGraduated
                | LaunchpadError::NotGraduated
                | LaunchpadError::TradingDisabled
                | LaunchpadError::Reentrancy
        )
    }
}
