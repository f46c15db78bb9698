//! # Lock-up Ledger — Core Library
//!
//! Accounting and policy enforcement for two cooperating components: a
//! fungible token ledger with role-gated, rate-limited issuance, and a
//! custodial lock-up vault that holds deposited balances until a fixed
//! unlock time. This crate is the part that must be bit-exact and
//! adversarially robust — it directly controls asset movement.
//!
//! Everything around it is an external collaborator: the submission layer
//! authenticates callers, sequences operations one at a time, and supplies
//! the wall-clock time of each call. Transport, signing, key management,
//! and persistence live out there, not here.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants: denomination, issuance caps, window
//!   length. Every magic number lives here.
//! - **address** — 20-byte account identifiers with hex serde.
//! - **error** — The shared error taxonomy for ledger and vault.
//! - **token** — The [`TokenLedger`]: balances, allowances, minter roles,
//!   and the daily issuance window.
//! - **lockup** — The [`LockupVault`]: per-beneficiary locked balances
//!   behind a single unlock instant.
//!
//! ## Design Principles
//!
//! 1. All monetary arithmetic is checked — wrapping and money do not mix.
//! 2. Validate everything, then mutate: a rejected operation leaves no
//!    partial state behind.
//! 3. Internal state is settled before any outbound transfer
//!    (checks-effects-interactions).
//! 4. Every public state type is serializable for wire transport and
//!    persistent storage.

pub mod address;
pub mod config;
pub mod error;
pub mod lockup;
pub mod token;

pub use address::Address;
pub use error::LedgerError;
pub use lockup::LockupVault;
pub use token::TokenLedger;
