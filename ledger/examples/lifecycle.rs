//! Walkthrough of the full ledger lifecycle: deployment, rate-limited
//! minting, role administration, and a deposit/withdraw round trip through
//! the lock-up vault.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example lifecycle

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};

use lockup_ledger::config::whole;
use lockup_ledger::{Address, LockupVault, TokenLedger};

fn step(num: u32, title: &str) {
    println!();
    println!("=== Step {num}: {title}");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let owner = Address::from_bytes([0x0A; 20]);
    let minter = Address::from_bytes([0x0B; 20]);
    let beneficiary = Address::from_bytes([0x0C; 20]);
    let vault_account = Address::from_bytes([0xF0; 20]);

    let genesis = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    step(1, "Deploy the token ledger");
    let mut token = TokenLedger::new_at("Sample Token", "STK", owner, genesis);
    println!(
        "  {} {} minted to {owner}",
        token.total_supply(),
        token.symbol()
    );

    step(2, "Grant the minter role and mint within the daily limit");
    token.grant_role(owner, minter)?;
    token.mint_at(minter, whole(4_000).expect("in range"), genesis)?;
    println!("  minted 4000 tokens, window usage {}", token.minted_in_window());

    match token.mint_at(minter, whole(10_000).expect("in range"), genesis) {
        Err(err) => println!("  over-limit mint rejected: {err}"),
        Ok(()) => unreachable!("limit must hold"),
    }

    let next_day = genesis + Duration::days(1);
    token.mint_at(minter, whole(10_000).expect("in range"), next_day)?;
    println!("  fresh window a day later, supply now {}", token.total_supply());

    step(3, "Lock 100 tokens for the beneficiary");
    let mut vault = LockupVault::new(vault_account, next_day + Duration::days(30));
    token.approve(owner, vault.address(), whole(100).expect("in range"));
    vault.deposit(&mut token, owner, beneficiary, whole(100).expect("in range"))?;
    println!(
        "  vault {} holds {} for {beneficiary}, unlocking at {}",
        vault.vault_id(),
        vault.locked_balance(&beneficiary),
        vault.unlock_time()
    );

    step(4, "Withdraw after the unlock instant");
    let early = vault.unlock_time() - Duration::hours(1);
    match vault.withdraw_at(&mut token, beneficiary, early) {
        Err(err) => println!("  early withdrawal rejected: {err}"),
        Ok(()) => unreachable!("lock must hold"),
    }

    vault.withdraw_at(&mut token, beneficiary, vault.unlock_time())?;
    println!(
        "  released; beneficiary balance {}, vault custody {}",
        token.balance_of(&beneficiary),
        vault.total_locked()
    );

    Ok(())
}
