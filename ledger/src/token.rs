//! # Token Ledger
//!
//! A fungible token ledger with role-gated, rate-limited issuance. The
//! ledger owns four pieces of state: per-account balances, an allowance
//! table for delegated spending, the set of minter identities, and the
//! rolling daily issuance window.
//!
//! ## Security Model
//!
//! - **Mint gating**: only addresses holding the minter role can mint, and
//!   only the fixed role-admin (set at construction) can grant or revoke
//!   that role. Role checks are plain set membership — no dispatch, no
//!   inheritance.
//! - **Rate limiting**: issuance is capped per fixed one-day window,
//!   ledger-wide. The window resets on the first mint call at least one day
//!   after the window opened; skipped windows do not accumulate quota.
//! - **Exact accounting**: balances, supply, and allowances are `u128` base
//!   units with checked arithmetic. Overflow rejects the operation; nothing
//!   wraps, nothing rounds.
//!
//! The ledger never authenticates anyone. The external submission layer
//! verifies the caller's identity and passes it in as an [`Address`]; the
//! ledger only enforces policy on already-authenticated identities.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::address::Address;
use crate::config::{mint_window, DAILY_MINT_LIMIT, DECIMALS, INITIAL_SUPPLY, MINTER_ROLE};
use crate::error::LedgerError;

/// The fungible token ledger.
///
/// All mutating operations are `&mut self` and synchronous: the execution
/// environment serializes calls, and each call either fully commits or
/// returns an error with no state change. Every check happens before the
/// first write.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Human-readable token name (e.g., "Sample Token").
    name: String,
    /// Ticker symbol (e.g., "STK").
    symbol: String,
    /// Display decimal places. Fixed at 18; the ledger never divides.
    decimals: u8,
    /// Total supply in base units. Equals the sum of all balances.
    total_supply: u128,
    /// Per-account balances in base units.
    balances: HashMap<Address, u128>,
    /// Allowances: owner -> spender -> remaining spend limit.
    allowances: HashMap<Address, HashMap<Address, u128>>,
    /// Addresses holding the minter role.
    minters: HashSet<Address>,
    /// The fixed role-admin identity, set at construction.
    admin: Address,
    /// Per-window issuance cap in base units.
    daily_mint_limit: u128,
    /// Opening instant of the current issuance window.
    window_start: DateTime<Utc>,
    /// Amount minted inside the current window. Never exceeds the limit.
    minted_in_window: u128,
}

impl TokenLedger {
    /// Creates a ledger and credits `owner` with the initial supply.
    ///
    /// `owner` becomes the role-admin and also receives the minter role,
    /// so a fresh ledger can issue without a separate grant call. The
    /// issuance window opens at `now` with a zero counter.
    pub fn new_at(name: &str, symbol: &str, owner: Address, now: DateTime<Utc>) -> Self {
        let mut balances = HashMap::new();
        balances.insert(owner, INITIAL_SUPPLY);

        let mut minters = HashSet::new();
        minters.insert(owner);

        debug!(%owner, supply = INITIAL_SUPPLY, "token ledger created");

        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: DECIMALS,
            total_supply: INITIAL_SUPPLY,
            balances,
            allowances: HashMap::new(),
            minters,
            admin: owner,
            daily_mint_limit: DAILY_MINT_LIMIT,
            window_start: now,
            minted_in_window: 0,
        }
    }

    /// Creates a ledger with the issuance window opening at the current
    /// wall-clock time. See [`new_at`](Self::new_at).
    pub fn new(name: &str, symbol: &str, owner: Address) -> Self {
        Self::new_at(name, symbol, owner, Utc::now())
    }

    // -----------------------------------------------------------------------
    // Issuance
    // -----------------------------------------------------------------------

    /// Mints `amount` base units to the caller's own balance.
    ///
    /// `now` is the environment-supplied time of the operation — the block
    /// time in a chain deployment — and is the sole input to window
    /// rollover. If at least one full window has elapsed since
    /// `window_start`, the window resets atomically before the limit check.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if the caller lacks the minter
    /// role, [`LedgerError::DailyLimitExceeded`] if the post-rollover window
    /// counter cannot absorb `amount`, and [`LedgerError::Overflow`] if the
    /// supply or balance representation would overflow. All rejections
    /// leave the ledger unchanged, including the window state.
    pub fn mint_at(
        &mut self,
        caller: Address,
        amount: u128,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if !self.minters.contains(&caller) {
            return Err(LedgerError::Unauthorized { caller });
        }

        // Fixed-window rollover: a single reset regardless of how many
        // whole windows were skipped.
        let mut window_start = self.window_start;
        let mut minted_in_window = self.minted_in_window;
        if now >= window_start + mint_window() {
            window_start = now;
            minted_in_window = 0;
        }

        let window_total = minted_in_window
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if window_total > self.daily_mint_limit {
            warn!(
                %caller,
                requested = amount,
                minted_in_window,
                limit = self.daily_mint_limit,
                "mint rejected: daily limit exceeded"
            );
            return Err(LedgerError::DailyLimitExceeded {
                minted_in_window,
                requested: amount,
                limit: self.daily_mint_limit,
            });
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = self
            .balance_of(&caller)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // All checks passed — commit.
        self.window_start = window_start;
        self.minted_in_window = window_total;
        self.total_supply = new_supply;
        self.balances.insert(caller, new_balance);

        debug!(%caller, amount, total_supply = self.total_supply, "minted");
        Ok(())
    }

    /// Mints using the current wall-clock time. See [`mint_at`](Self::mint_at).
    pub fn mint(&mut self, caller: Address, amount: u128) -> Result<(), LedgerError> {
        self.mint_at(caller, amount, Utc::now())
    }

    // -----------------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------------

    /// Moves `amount` base units from `from` to `to`.
    ///
    /// A zero-amount transfer succeeds as a no-op, but the recipient is
    /// still validated — sending nothing to the zero address is still an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRecipient`] if `to` is the zero
    /// sentinel and [`LedgerError::InsufficientBalance`] if `from` cannot
    /// cover `amount`.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                available: from_balance,
                requested: amount,
            });
        }

        if amount == 0 {
            return Ok(());
        }

        // Debit before credit so a self-transfer nets out exactly.
        self.balances.insert(from, from_balance - amount);
        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(to, to_balance);

        debug!(%from, %to, amount, "transfer");
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner`'s funds to `amount`.
    ///
    /// This is an absolute set, not an increment: approving twice leaves
    /// the second value, and approving zero revokes the allowance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
        debug!(%owner, %spender, amount, "allowance set");
    }

    /// Spends `owner`'s funds on their behalf: transfers `amount` from
    /// `owner` to `to`, consuming the caller's allowance.
    ///
    /// The allowance is decremented only after the transfer succeeds, so a
    /// failed transfer consumes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientAllowance`] if the caller's
    /// allowance does not cover `amount`, plus any transfer error
    /// ([`LedgerError::InsufficientBalance`], [`LedgerError::InvalidRecipient`]).
    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(&owner, &caller);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner,
                spender: caller,
                available: allowed,
                requested: amount,
            });
        }

        self.transfer(owner, to, amount)?;

        self.allowances
            .entry(owner)
            .or_default()
            .insert(caller, allowed - amount);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    /// Grants the minter role to `account`.
    ///
    /// Idempotent: granting an already-granted role is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] unless the caller is the
    /// role-admin.
    pub fn grant_role(&mut self, caller: Address, account: Address) -> Result<(), LedgerError> {
        if caller != self.admin {
            return Err(LedgerError::Unauthorized { caller });
        }
        if self.minters.insert(account) {
            debug!(%account, "minter role granted");
        }
        Ok(())
    }

    /// Revokes the minter role from `account`.
    ///
    /// Idempotent: revoking a never-granted role is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] unless the caller is the
    /// role-admin.
    pub fn revoke_role(&mut self, caller: Address, account: Address) -> Result<(), LedgerError> {
        if caller != self.admin {
            return Err(LedgerError::Unauthorized { caller });
        }
        if self.minters.remove(&account) {
            debug!(%account, "minter role revoked");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Returns `account`'s balance in base units, zero if never credited.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Returns the remaining allowance of `spender` over `owner`'s funds.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the total supply in base units.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Returns `true` if `account` holds the minter role.
    pub fn is_minter(&self, account: &Address) -> bool {
        self.minters.contains(account)
    }

    /// Returns the fixed role-admin identity.
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the stable identifier external callers use to name the
    /// minter role in grant/revoke submissions.
    pub fn minter_role_id(&self) -> &'static str {
        MINTER_ROLE
    }

    /// Returns the token name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the display decimal places.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the amount minted inside the current window.
    pub fn minted_in_window(&self) -> u128 {
        self.minted_in_window
    }

    /// Returns the per-window issuance cap.
    pub fn daily_mint_limit(&self) -> u128 {
        self.daily_mint_limit
    }

    /// Iterates over all `(address, balance)` entries.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &u128)> {
        self.balances.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
