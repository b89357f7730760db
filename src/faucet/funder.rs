//! Make sure an account can pay fees before it signs.

use std::sync::Arc;
use std::time::Duration;

use crate::config::FaucetConfig;
use crate::faucet::balance::BalanceQuery;
use crate::faucet::client::FaucetClient;
use crate::faucet::types::{FundingError, TransferRequest};
use crate::lifecycle::CancelToken;
use crate::observability::metrics;
use crate::resilience::{poll_until, Attempt, PollError, PollPolicy};

/// Default time allowed for faucet funds to land.
pub const DEFAULT_ENSURE_TIMEOUT: Duration = Duration::from_secs(40);

/// Steps of the funding state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingState {
    CheckBalance,
    RequestFunds,
    PollBalance,
    Done,
}

/// Tops up an account from the faucet when it holds less than a minimum.
#[derive(Clone)]
pub struct FaucetFunder {
    faucet: Arc<dyn FaucetClient>,
    balances: Arc<dyn BalanceQuery>,
    denom: String,
    min_amount: u64,
    policy: PollPolicy,
}

impl FaucetFunder {
    pub fn new(
        faucet: Arc<dyn FaucetClient>,
        balances: Arc<dyn BalanceQuery>,
        denom: impl Into<String>,
        min_amount: u64,
    ) -> Self {
        Self {
            faucet,
            balances,
            denom: denom.into(),
            min_amount,
            policy: PollPolicy::new(Duration::from_secs(1), DEFAULT_ENSURE_TIMEOUT),
        }
    }

    /// Build a funder from configuration.
    pub fn from_config(
        config: &FaucetConfig,
        faucet: Arc<dyn FaucetClient>,
        balances: Arc<dyn BalanceQuery>,
    ) -> Self {
        Self::new(faucet, balances, config.denom.clone(), config.min_amount).with_policy(
            PollPolicy::new(
                Duration::from_millis(config.poll_interval_ms),
                Duration::from_secs(config.ensure_timeout_secs),
            ),
        )
    }

    /// Override the balance poll interval and deadline.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn denom(&self) -> &str {
        &self.denom
    }

    pub fn min_amount(&self) -> u64 {
        self.min_amount
    }

    /// Ensure `address` holds at least the minimum balance.
    ///
    /// An account that already holds enough is left alone, so repeated calls
    /// never request funds twice.
    pub async fn ensure_funds(&self, address: &str, cancel: &CancelToken) -> Result<(), FundingError> {
        let mut state = FundingState::CheckBalance;

        loop {
            tracing::debug!(address = %address, state = ?state, "Faucet funding step");

            state = match state {
                FundingState::CheckBalance => match self.check_balance(address).await {
                    Ok(()) => FundingState::Done,
                    Err(reason) => {
                        tracing::info!(address = %address, reason = %reason, "Requesting funds from faucet");
                        FundingState::RequestFunds
                    }
                },
                FundingState::RequestFunds => {
                    self.request_funds(address).await?;
                    FundingState::PollBalance
                }
                FundingState::PollBalance => {
                    self.wait_for_funds(address, cancel).await?;
                    FundingState::Done
                }
                FundingState::Done => return Ok(()),
            };
        }
    }

    /// `Ok` when the balance covers the minimum, otherwise the reason it does not.
    async fn check_balance(&self, address: &str) -> Result<(), String> {
        match self.balances.balance(address, &self.denom).await {
            Ok(amount) if amount >= u128::from(self.min_amount) => Ok(()),
            Ok(amount) => Err(format!(
                "account has not enough {:?} balance ({}), min. required amount: {}",
                self.denom, amount, self.min_amount
            )),
            Err(e) => Err(format!("balance query failed: {}", e)),
        }
    }

    async fn request_funds(&self, address: &str) -> Result<(), FundingError> {
        let response = match self.faucet.transfer(TransferRequest::new(address)).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_faucet_request("unreachable");
                return Err(FundingError::FaucetUnreachable(e));
            }
        };

        if !response.error.is_empty() {
            metrics::record_faucet_request("rejected");
            return Err(FundingError::FaucetRejected(response.error));
        }

        metrics::record_faucet_request("ok");
        Ok(())
    }

    async fn wait_for_funds(&self, address: &str, cancel: &CancelToken) -> Result<(), FundingError> {
        let result = poll_until(self.policy, cancel, move || async move {
            match self.check_balance(address).await {
                Ok(()) => Attempt::Ready(()),
                Err(reason) => Attempt::NotYet(Some(reason)),
            }
        })
        .await;

        match result {
            Ok(()) => {
                tracing::info!(address = %address, denom = %self.denom, "Faucet funds received");
                Ok(())
            }
            Err(PollError::Timeout { last, elapsed }) => {
                tracing::warn!(address = %address, waited = ?elapsed, "Faucet funds did not land in time");
                Err(FundingError::Timeout {
                    address: address.to_string(),
                    denom: self.denom.clone(),
                    min_amount: self.min_amount,
                    waited: elapsed,
                    last_error: last,
                })
            }
            Err(PollError::Cancelled) => Err(FundingError::Cancelled),
            // check_balance never reports a fatal attempt.
            Err(PollError::Fatal(reason)) => Err(FundingError::FaucetRejected(reason)),
        }
    }
}

impl std::fmt::Debug for FaucetFunder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaucetFunder")
            .field("denom", &self.denom)
            .field("min_amount", &self.min_amount)
            .field("policy", &self.policy)
            .finish()
    }
}
