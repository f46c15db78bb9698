//! # Error Taxonomy
//!
//! A single [`LedgerError`] enum covers both the token ledger and the
//! lock-up vault. The vault deliberately shares the token's error type so
//! that transfer failures surfaced during a deposit reach the caller
//! unchanged — the submission layer sees `InsufficientAllowance`, not some
//! vault-flavoured wrapper around it.
//!
//! Every error is rejected synchronously with no partial state mutation.
//! None of these are retried internally: rate-limit and timing rejections
//! are expected, user-visible outcomes that only the caller can resolve by
//! waiting and resubmitting.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::address::Address;

/// Errors that can occur during ledger or vault operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The caller lacks the role or admin identity this operation requires.
    #[error("unauthorized: {caller} may not perform this operation")]
    Unauthorized {
        /// The address that attempted the operation.
        caller: Address,
    },

    /// Attempted to move more than the sender's available balance.
    #[error("insufficient balance: {account} has {available}, requested {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: Address,
        /// Its current balance in base units.
        available: u128,
        /// The amount that was requested.
        requested: u128,
    },

    /// The spender's allowance does not cover the requested amount.
    #[error("insufficient allowance: {spender} may spend {available} of {owner}'s funds, requested {requested}")]
    InsufficientAllowance {
        /// The account whose funds would be spent.
        owner: Address,
        /// The account attempting the spend.
        spender: Address,
        /// The remaining allowance in base units.
        available: u128,
        /// The amount that was requested.
        requested: u128,
    },

    /// Minting this amount would push the current window past the daily cap.
    #[error("daily mint limit exceeded: {minted_in_window} already minted this window, requested {requested}, limit {limit}")]
    DailyLimitExceeded {
        /// Amount already minted inside the current window.
        minted_in_window: u128,
        /// The amount that was requested.
        requested: u128,
        /// The per-window cap.
        limit: u128,
    },

    /// Withdrawal attempted before the vault's unlock time.
    #[error("locked period not ended: unlocks at {unlock_time}, current time {now}")]
    LockedPeriodNotEnded {
        /// The vault's fixed unlock instant.
        unlock_time: DateTime<Utc>,
        /// The environment-supplied time of the attempt.
        now: DateTime<Utc>,
    },

    /// The caller has no locked balance to withdraw.
    #[error("nothing to withdraw for {beneficiary}")]
    NothingToWithdraw {
        /// The account that attempted the withdrawal.
        beneficiary: Address,
    },

    /// Arithmetic would exceed the representable range.
    ///
    /// Wrapping arithmetic and money do not mix: every addition on a
    /// balance, supply, or counter is checked, and overflow rejects the
    /// whole operation.
    #[error("amount overflow: operation would exceed the representable range")]
    Overflow,

    /// The recipient is the zero sentinel address.
    #[error("invalid recipient: transfers to the zero address are rejected")]
    InvalidRecipient,
}
