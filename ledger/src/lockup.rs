//! # Lock-up Vault
//!
//! A custodial vault that holds deposited token balances on behalf of
//! beneficiaries until a fixed unlock time. The lifecycle per beneficiary is:
//!
//! 1. **Deposit** — a depositor approves the vault on the token ledger,
//!    then deposits; the vault pulls the tokens into its own account and
//!    credits the beneficiary's locked balance.
//! 2. **Wait** — the locked balance is inaccessible until the unlock
//!    instant, which is fixed at construction and shared by every
//!    beneficiary of this vault.
//! 3. **Withdraw** — at or after the unlock instant, the beneficiary
//!    withdraws their full locked balance back to themselves. Further
//!    deposits re-enter the locked state.
//!
//! The vault is bound to one [`TokenLedger`] per campaign; operations take
//! the ledger as an explicit `&mut` argument, which is also what makes the
//! custody invariant checkable: the sum of locked balances always equals
//! the vault account's token balance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::address::Address;
use crate::error::LedgerError;
use crate::token::TokenLedger;

/// A single-unlock custodial vault.
///
/// Holds per-beneficiary locked balances plus the vault's own token-account
/// address. There is no teardown: a vault abandoned with unwithdrawn
/// balances keeps them locked forever.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LockupVault {
    /// Unique identifier for this vault campaign.
    vault_id: String,
    /// The vault's own account on the token ledger. Deposits land here and
    /// withdrawals leave from here.
    address: Address,
    /// The instant at which every locked balance becomes withdrawable.
    unlock_time: DateTime<Utc>,
    /// Locked balances per beneficiary, in base units.
    locked: HashMap<Address, u128>,
}

impl LockupVault {
    /// Creates a vault bound to its own token account and a fixed unlock
    /// instant.
    ///
    /// `vault_address` is the identity under which the vault holds custody
    /// on the token ledger; it must not collide with any depositor or
    /// beneficiary account.
    pub fn new(vault_address: Address, unlock_time: DateTime<Utc>) -> Self {
        debug!(vault = %vault_address, %unlock_time, "lock-up vault created");
        Self {
            vault_id: Uuid::new_v4().to_string(),
            address: vault_address,
            unlock_time,
            locked: HashMap::new(),
        }
    }

    /// Pulls `amount` from `caller`'s token balance into vault custody,
    /// credited to `beneficiary`.
    ///
    /// The caller must have approved the vault for at least `amount` on the
    /// token ledger beforehand. A zero-amount deposit succeeds as a no-op
    /// with no token movement, matching the ledger's zero-transfer policy.
    ///
    /// # Errors
    ///
    /// Token transfer failures ([`LedgerError::InsufficientAllowance`],
    /// [`LedgerError::InsufficientBalance`]) propagate unchanged.
    /// Returns [`LedgerError::Overflow`] if the beneficiary's locked
    /// balance would overflow; the pull is not attempted in that case.
    pub fn deposit(
        &mut self,
        token: &mut TokenLedger,
        caller: Address,
        beneficiary: Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }

        let new_locked = self
            .locked_balance(&beneficiary)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // The vault is both spender and recipient of the pull.
        token.transfer_from(self.address, caller, self.address, amount)?;
        self.locked.insert(beneficiary, new_locked);

        debug!(%caller, %beneficiary, amount, "deposit locked");
        Ok(())
    }

    /// Releases the caller's full locked balance back to them.
    ///
    /// `now` is the environment-supplied time of the operation. Withdrawal
    /// exactly at the unlock instant succeeds. The locked record is zeroed
    /// before the outbound transfer (checks-effects-interactions), so no
    /// call path can observe a nonzero locked balance mid-withdrawal.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::LockedPeriodNotEnded`] before the unlock
    /// instant and [`LedgerError::NothingToWithdraw`] if the caller has no
    /// locked balance.
    pub fn withdraw_at(
        &mut self,
        token: &mut TokenLedger,
        caller: Address,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if now < self.unlock_time {
            return Err(LedgerError::LockedPeriodNotEnded {
                unlock_time: self.unlock_time,
                now,
            });
        }

        let amount = match self.locked.remove(&caller) {
            Some(amount) if amount > 0 => amount,
            _ => return Err(LedgerError::NothingToWithdraw { beneficiary: caller }),
        };

        // The custody invariant guarantees the vault account covers every
        // locked balance, so this transfer only fails if that invariant was
        // broken elsewhere. Reinstate the record in that case so the
        // failure stays all-or-nothing.
        if let Err(err) = token.transfer(self.address, caller, amount) {
            self.locked.insert(caller, amount);
            return Err(err);
        }

        debug!(%caller, amount, "withdrawal released");
        Ok(())
    }

    /// Withdraws using the current wall-clock time.
    /// See [`withdraw_at`](Self::withdraw_at).
    pub fn withdraw(
        &mut self,
        token: &mut TokenLedger,
        caller: Address,
    ) -> Result<(), LedgerError> {
        self.withdraw_at(token, caller, Utc::now())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Returns `beneficiary`'s locked balance in base units, zero if none.
    pub fn locked_balance(&self, beneficiary: &Address) -> u128 {
        self.locked.get(beneficiary).copied().unwrap_or(0)
    }

    /// Returns the sum of all locked balances.
    ///
    /// Equals `token.balance_of(vault.address())` in every reachable state.
    pub fn total_locked(&self) -> u128 {
        self.locked.values().sum()
    }

    /// Returns the vault's own token-account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the fixed unlock instant.
    pub fn unlock_time(&self) -> DateTime<Utc> {
        self.unlock_time
    }

    /// Returns the vault campaign identifier.
    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
