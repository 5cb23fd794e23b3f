//! Capability policy
//!
//! Privileged operations take an explicit [`Capability`] token instead of
//! relying on ambient caller identity. The [`Policy`] object records which
//! account holds each role and is the only source of capability tokens;
//! a capability stops verifying the moment its role is granted elsewhere.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LaunchpadError;
use crate::types::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May mutate deployment configuration and grant roles.
    Admin,
    /// May mutate pool reserves through the trading router.
    Executor,
    /// May register new pools in the registry.
    PoolCreator,
}

/// Unforgeable proof that `holder` was granted `role`.
///
/// Fields are private; the only constructor is [`Policy::issue`], so a
/// capability in hand always traces back to an admin grant.
#[derive(Debug, Clone)]
pub struct Capability {
    role: Role,
    holder: AccountId,
}

impl Capability {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn holder(&self) -> AccountId {
        self.holder
    }
}

#[derive(Debug, Clone)]
pub struct Policy {
    grants: HashMap<Role, AccountId>,
}

impl Policy {
    /// Create a policy with `admin` holding the admin role, returning the
    /// admin capability alongside it.
    pub fn new(admin: AccountId) -> (Self, Capability) {
        let mut grants = HashMap::new();
        grants.insert(Role::Admin, admin);
        let cap = Capability {
            role: Role::Admin,
            holder: admin,
        };
        (Self { grants }, cap)
    }

    /// Grant `role` to `holder` and hand back the matching capability.
    /// Regranting a role revokes the previously issued capability.
    pub fn issue(
        &mut self,
        admin: &Capability,
        role: Role,
        holder: AccountId,
    ) -> Result<Capability, LaunchpadError> {
        self.verify(admin, Role::Admin)?;
        self.grants.insert(role, holder);
        Ok(Capability { role, holder })
    }

    /// Check that `cap` proves `role` and is still the current grant.
    pub fn verify(&self, cap: &Capability, role: Role) -> Result<(), LaunchpadError> {
        if cap.role != role {
            return Err(LaunchpadError::Unauthorized);
        }
        match self.grants.get(&role) {
            Some(holder) if *holder == cap.holder => Ok(()),
            _ => Err(LaunchpadError::Unauthorized),
        }
    }
}
