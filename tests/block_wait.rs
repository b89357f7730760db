//! Block height waits on a virtual clock.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use cosmos_client::chain::BlockHeightWaiter;
use cosmos_client::lifecycle::{CancelToken, Cancellation};
use cosmos_client::ClientError;

mod common;

use common::{test_config, FakeAccounts, FakeTransport, Harness};

fn waiter(transport: FakeTransport) -> (BlockHeightWaiter, Arc<FakeTransport>) {
    let transport = Arc::new(transport);
    (BlockHeightWaiter::new(transport.clone(), "http://localhost:26657"), transport)
}

#[tokio::test(start_paused = true)]
async fn test_height_reached() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(95, 1));
    let started = Instant::now();

    waiter
        .wait_for_height(100, Duration::from_secs(10), &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_height_already_reached_returns_immediately() {
    let (waiter, transport) = waiter(FakeTransport::new().with_height(120, 0));
    let started = Instant::now();

    waiter
        .wait_for_height(100, Duration::from_secs(10), &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(transport.status_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_timeout_still_reads_height() {
    let (waiter, transport) = waiter(FakeTransport::new().with_height(120, 0));

    waiter
        .wait_for_height(100, Duration::ZERO, &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(transport.status_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_timeout_below_target_times_out() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(5, 0));

    let err = waiter
        .wait_for_height(100, Duration::ZERO, &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::BlockTimeout { last_height: 5, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_does_not_panic() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(1, 1));
    let waiter = waiter.with_interval(Duration::ZERO);

    waiter
        .wait_for_height(4, Duration::from_secs(1), &CancelToken::never())
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_height_times_out() {
    let (waiter, transport) = waiter(FakeTransport::new().with_height(1, 0));
    let started = Instant::now();

    let err = waiter
        .wait_for_height(100, Duration::from_secs(5), &CancelToken::never())
        .await
        .unwrap_err();

    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert!(err.is_timeout());
    match err {
        ClientError::BlockTimeout { target, last_height, waited } => {
            assert_eq!(target, 100);
            assert_eq!(last_height, 1);
            assert_eq!(waited, Duration::from_secs(5));
        }
        other => panic!("expected block timeout, got {}", other),
    }
    // One read at start and one per second before the deadline.
    assert_eq!(transport.status_calls.load(Ordering::SeqCst), 5);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_distinct_from_timeout() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(1, 0));
    let cancellation = Cancellation::new();
    let token = cancellation.token();
    let started = Instant::now();

    let task = tokio::spawn(async move {
        waiter.wait_for_height(100, Duration::from_secs(30), &token).await
    });
    tokio::time::sleep(Duration::from_secs(2)).await;
    cancellation.cancel();

    let err = task.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert!(!err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_n_blocks() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(10, 1));
    let started = Instant::now();

    waiter
        .wait_for_n_blocks(3, Duration::from_secs(10), &CancelToken::never())
        .await
        .unwrap();

    // Start read sees 10; polls see 11, 12, 13.
    assert_eq!(started.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_n_blocks_overflow_is_error() {
    let (waiter, _) = waiter(FakeTransport::new().with_height(10, 0));

    let err = waiter
        .wait_for_n_blocks(i64::MAX, Duration::from_secs(1), &CancelToken::never())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn test_client_wait_for_next_block() {
    let h = Harness::new(FakeTransport::new().with_height(50, 1), FakeAccounts::new(1, 1));
    let client = h.client(test_config()).await.unwrap();

    let before = client.latest_block_height().await.unwrap();
    client.wait_for_next_block(&CancelToken::never()).await.unwrap();
    let after = client.latest_block_height().await.unwrap();
    assert!(after > before);
}

#[tokio::test(start_paused = true)]
async fn test_client_wait_for_block_height_timeout() {
    let h = Harness::new(FakeTransport::new().with_height(7, 0), FakeAccounts::new(1, 1));
    let client = h.client(test_config()).await.unwrap();

    let err = client
        .wait_for_block_height(100, Duration::from_secs(5), &CancelToken::never())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::BlockTimeout { last_height: 7, .. }));
}
