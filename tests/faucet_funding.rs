//! Faucet funding state machine against scripted balances.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use cosmos_client::faucet::{FaucetFunder, FundingError};
use cosmos_client::lifecycle::{CancelToken, Cancellation};

mod common;

use common::{FakeBalances, FakeFaucet, FaucetBehavior};

const ADDRESS: &str = "cosmos1qyqszqgpqyqszqgpqyqszqgpqyqszqgpjnp7du";

fn funder(balance: u64, behavior: FaucetBehavior) -> (FaucetFunder, Arc<FakeBalances>, Arc<FakeFaucet>) {
    let balances = Arc::new(FakeBalances::new(balance));
    let faucet = Arc::new(FakeFaucet::new(balances.clone(), behavior));
    let funder = FaucetFunder::new(faucet.clone(), balances.clone(), "token", 100);
    (funder, balances, faucet)
}

#[tokio::test(start_paused = true)]
async fn test_sufficient_balance_never_calls_faucet() {
    let (funder, balances, faucet) = funder(100, FaucetBehavior::Never);

    for _ in 0..3 {
        funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap();
    }

    assert_eq!(faucet.calls.load(Ordering::SeqCst), 0);
    assert_eq!(balances.queries.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_funds_land_after_polling() {
    let (funder, balances, faucet) = funder(
        10,
        FaucetBehavior::Credit { after_queries: 3, amount: 500 },
    );
    let started = Instant::now();

    funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap();

    assert_eq!(faucet.calls.load(Ordering::SeqCst), 1);
    assert_eq!(balances.amount.load(Ordering::SeqCst), 510);
    // Initial check, immediate poll, then one poll per second until the credit lands.
    assert_eq!(balances.queries.load(Ordering::SeqCst), 5);
    assert_eq!(started.elapsed(), Duration::from_secs(3));

    // Funded now: a second call is a single balance read.
    funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap();
    assert_eq!(faucet.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_funding_times_out_at_deadline() {
    let (funder, _balances, faucet) = funder(0, FaucetBehavior::Never);
    let started = Instant::now();

    let err = funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap_err();

    assert_eq!(started.elapsed(), Duration::from_secs(40));
    assert_eq!(faucet.calls.load(Ordering::SeqCst), 1);
    match err {
        FundingError::Timeout { denom, min_amount, last_error, .. } => {
            assert_eq!(denom, "token");
            assert_eq!(min_amount, 100);
            assert!(last_error.unwrap().contains("not enough"));
        }
        other => panic!("expected timeout, got {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_faucet_rejection_is_terminal() {
    let (funder, balances, faucet) = funder(0, FaucetBehavior::Reject("account already funded".to_string()));

    let err = funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap_err();

    assert!(err.is_faucet_failure());
    assert_eq!(
        err.to_string(),
        "cannot retrieve funds from faucet: account already funded"
    );
    assert_eq!(faucet.calls.load(Ordering::SeqCst), 1);
    assert_eq!(balances.queries.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_faucet_is_terminal() {
    let (funder, _balances, faucet) = funder(0, FaucetBehavior::Unreachable);
    let started = Instant::now();

    let err = funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap_err();

    assert!(matches!(err, FundingError::FaucetUnreachable(_)));
    assert_eq!(faucet.calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_polling() {
    let (funder, _balances, _faucet) = funder(0, FaucetBehavior::Never);
    let cancellation = Cancellation::new();
    let token = cancellation.token();
    let started = Instant::now();

    let waiter = tokio::spawn(async move { funder.ensure_funds(ADDRESS, &token).await });
    tokio::time::sleep(Duration::from_secs(5)).await;
    cancellation.cancel();

    let err = waiter.await.unwrap().unwrap_err();
    assert!(matches!(err, FundingError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(40));
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy_deadline() {
    let (funder, _balances, _faucet) = funder(0, FaucetBehavior::Never);
    let funder = funder.with_policy(cosmos_client::resilience::PollPolicy::new(
        Duration::from_millis(500),
        Duration::from_secs(3),
    ));
    let started = Instant::now();

    let err = funder.ensure_funds(ADDRESS, &CancelToken::never()).await.unwrap_err();
    assert!(matches!(err, FundingError::Timeout { .. }));
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}
