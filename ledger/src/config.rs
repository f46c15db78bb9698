//! # Ledger Configuration & Constants
//!
//! Every magic number in the ledger lives here. The values below are
//! consensus-critical for any deployment: two ledgers constructed with
//! different constants will disagree on every subsequent state root, so
//! changing them is a migration, not a patch.

use chrono::Duration;

// ---------------------------------------------------------------------------
// Token Denomination
// ---------------------------------------------------------------------------

/// Number of decimal places in the token's display representation.
///
/// Amounts are stored as integers in the smallest unit; a raw amount of
/// `10^18` displays as `1.0`. The ledger never divides — decimals exist
/// purely for rendering.
pub const DECIMALS: u8 = 18;

/// One whole token in base units: `10^18`.
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Converts a whole-token count into base units.
///
/// Returns `None` if the multiplication would overflow `u128`, which at
/// 18 decimals means more than ~3.4 * 10^20 whole tokens — far beyond any
/// supply this ledger will ever carry, but money code checks anyway.
pub fn whole(tokens: u128) -> Option<u128> {
    tokens.checked_mul(ONE_TOKEN)
}

// ---------------------------------------------------------------------------
// Issuance Policy
// ---------------------------------------------------------------------------

/// Supply credited to the owner at ledger construction, in base units.
/// 10 000 whole tokens.
pub const INITIAL_SUPPLY: u128 = 10_000 * ONE_TOKEN;

/// Maximum amount mintable inside a single issuance window, in base units.
/// 10 000 whole tokens per day, ledger-wide (not per minter).
pub const DAILY_MINT_LIMIT: u128 = 10_000 * ONE_TOKEN;

/// Length of one issuance window.
///
/// This is a fixed window, not a sliding one: once `window_start + 1 day`
/// has elapsed, the next mint call resets the counter in full. Skipped
/// windows do not bank unused quota.
pub fn mint_window() -> Duration {
    Duration::days(1)
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Stable identifier for the minter role, exposed to external callers that
/// need to name the role in grant/revoke submissions.
pub const MINTER_ROLE: &str = "MINTER_ROLE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_token_has_eighteen_zeros() {
        assert_eq!(ONE_TOKEN, 10u128.pow(DECIMALS as u32));
    }

    #[test]
    fn whole_converts_to_base_units() {
        assert_eq!(whole(1), Some(ONE_TOKEN));
        assert_eq!(whole(10_000), Some(INITIAL_SUPPLY));
        assert_eq!(whole(0), Some(0));
    }

    #[test]
    fn whole_overflow_returns_none() {
        assert_eq!(whole(u128::MAX), None);
    }

    #[test]
    fn mint_window_is_one_day() {
        assert_eq!(mint_window().num_seconds(), 86_400);
    }
}
