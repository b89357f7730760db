//! Client orchestrating account resolution, transaction creation, broadcast
//! and block waits.
//!
//! # Data Flow
//! ```text
//! ClientBuilder (config + collaborators)
//!     → node status (chain id) → home / keyring dir → base TxFactory
//!     → Client
//!         create_tx:    TransactionBuilder → TxService
//!         broadcast_tx: create_tx → TxService::broadcast → Response
//!         wait_for_*:   BlockHeightWaiter
//! ```
//!
//! # Design Decisions
//! - Transport, keyring and account retriever must be supplied; the faucet
//!   client, balance query and gasometer have HTTP/simulation defaults
//! - The base factory is never mutated by a call; each call derives its own
//! - Faucet funding is wired in only when enabled and not generate-only

use prost_types::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::account::{Account, AccountResolver, Keyring};
use crate::address::AddressConfig;
use crate::chain::{AccountRetriever, BlockHeightWaiter, NodeStatus, Transport, TxResponse};
use crate::config::{validate_config, ClientConfig, ConfigError};
use crate::error::{ClientError, ClientResult};
use crate::faucet::{BalanceQuery, FaucetClient, FaucetFunder, HttpFaucetClient, RestBalanceQuery};
use crate::lifecycle::CancelToken;
use crate::tx::coins::{parse_coins, parse_dec_coins};
use crate::tx::{Gasometer, Response, SimulationGasometer, TransactionBuilder, TxFactory, TxService};

/// Collects configuration and collaborators for a [`Client`].
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    keyring: Option<Arc<dyn Keyring>>,
    accounts: Option<Arc<dyn AccountRetriever>>,
    balances: Option<Arc<dyn BalanceQuery>>,
    faucet: Option<Arc<dyn FaucetClient>>,
    gasometer: Option<Arc<dyn Gasometer>>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            keyring: None,
            accounts: None,
            balances: None,
            faucet: None,
            gasometer: None,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn keyring(mut self, keyring: Arc<dyn Keyring>) -> Self {
        self.keyring = Some(keyring);
        self
    }

    pub fn account_retriever(mut self, accounts: Arc<dyn AccountRetriever>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    /// Balance source for faucet funding. Defaults to the REST endpoint.
    pub fn balance_query(mut self, balances: Arc<dyn BalanceQuery>) -> Self {
        self.balances = Some(balances);
        self
    }

    /// Faucet used for funding. Defaults to the HTTP faucet at `faucet.address`.
    pub fn faucet_client(mut self, faucet: Arc<dyn FaucetClient>) -> Self {
        self.faucet = Some(faucet);
        self
    }

    /// Gas estimator for `auto` gas. Defaults to simulation through the transport.
    pub fn gasometer(mut self, gasometer: Arc<dyn Gasometer>) -> Self {
        self.gasometer = Some(gasometer);
        self
    }

    /// Validate the configuration, connect to the node and assemble the client.
    pub async fn build(self) -> ClientResult<Client> {
        let config = self.config;

        let transport = self
            .transport
            .ok_or_else(|| ClientError::Config("a transport is required".to_string()))?;
        let keyring = self
            .keyring
            .ok_or_else(|| ClientError::Config("a keyring is required".to_string()))?;
        let accounts = self
            .accounts
            .ok_or_else(|| ClientError::Config("an account retriever is required".to_string()))?;

        validate_config(&config).map_err(|errors| ClientError::ConfigFile(ConfigError::Validation(errors)))?;

        let fees = parse_coins(&config.fees)?;
        let gas_prices = parse_dec_coins(&config.gas_prices)?;

        let status = transport.status().await.map_err(|source| ClientError::Rpc {
            node: config.node_address.clone(),
            source,
        })?;
        let chain_id = status.network;

        let home_dir = match &config.home {
            Some(home) => home.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| ClientError::MissingHomeDir(chain_id.clone()))?
                .join(format!(".{}", chain_id)),
        };
        let keyring_dir = config.keyring_dir.clone().unwrap_or_else(|| home_dir.clone());

        AddressConfig::set_prefix(&config.address_prefix);

        let factory = TxFactory::new(chain_id.clone())
            .with_gas_adjustment(config.gas_adjustment)
            .with_memo(config.memo.clone())
            .with_account_number(config.account_number)
            .with_sequence(config.sequence);

        let gasometer = self
            .gasometer
            .unwrap_or_else(|| Arc::new(SimulationGasometer::new(transport.clone())));

        let funder = if config.faucet.enabled && !config.generate_only {
            let rpc_timeout = Duration::from_secs(config.rpc_timeout_secs);
            let faucet: Arc<dyn FaucetClient> = match self.faucet {
                Some(faucet) => faucet,
                None => Arc::new(
                    HttpFaucetClient::new(config.faucet.address.clone(), rpc_timeout)
                        .map_err(|e| ClientError::Config(format!("faucet client: {}", e)))?,
                ),
            };
            let balances: Arc<dyn BalanceQuery> = match self.balances {
                Some(balances) => balances,
                None => Arc::new(
                    RestBalanceQuery::new(config.api_address.clone(), rpc_timeout)
                        .map_err(|e| ClientError::Config(format!("balance query: {}", e)))?,
                ),
            };
            Some(FaucetFunder::from_config(&config.faucet, faucet, balances))
        } else {
            None
        };

        let builder = TransactionBuilder::new(
            config.address_prefix.clone(),
            config.node_address.clone(),
            accounts,
            gasometer,
        )
        .with_gas(config.gas.clone())
        .with_fees(fees)
        .with_gas_prices(gas_prices)
        .with_fee_granter(config.fee_granter.clone())
        .with_funder(funder);

        let waiter = BlockHeightWaiter::new(transport.clone(), config.node_address.clone())
            .with_interval(Duration::from_millis(config.wait.poll_interval_ms));

        let resolver = AccountResolver::new(keyring.clone(), config.address_prefix.clone());

        tracing::info!(
            chain_id = %chain_id,
            node = %config.node_address,
            prefix = %config.address_prefix,
            home = %home_dir.display(),
            "Client ready"
        );

        Ok(Client {
            config: Arc::new(config),
            transport,
            keyring,
            resolver,
            builder,
            waiter,
            factory,
            chain_id,
            home_dir,
            keyring_dir,
        })
    }
}

/// Transaction lifecycle client bound to one node.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    keyring: Arc<dyn Keyring>,
    resolver: AccountResolver,
    builder: TransactionBuilder,
    waiter: BlockHeightWaiter,
    factory: TxFactory,
    chain_id: String,
    home_dir: PathBuf,
    keyring_dir: PathBuf,
}

impl Client {
    /// Start building a client from `config`.
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn keyring_dir(&self) -> &Path {
        &self.keyring_dir
    }

    /// Base factory every transaction is derived from.
    pub fn tx_factory(&self) -> &TxFactory {
        &self.factory
    }

    /// Replace the base factory, e.g. to pin a sequence for offline signing.
    pub fn with_tx_factory(mut self, factory: TxFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Set the process-wide address prefix to this client's.
    pub fn set_config_address_prefix(&self) {
        AddressConfig::set_prefix(&self.config.address_prefix);
    }

    /// Account by name, or else by address.
    pub fn account(&self, name_or_address: &str) -> ClientResult<Account> {
        self.resolver.resolve(name_or_address)
    }

    /// Address of the named account under this client's prefix.
    pub fn address(&self, account_name: &str) -> ClientResult<String> {
        self.resolver.address(account_name)
    }

    pub async fn status(&self) -> ClientResult<NodeStatus> {
        self.transport.status().await.map_err(|source| ClientError::Rpc {
            node: self.config.node_address.clone(),
            source,
        })
    }

    pub async fn latest_block_height(&self) -> ClientResult<i64> {
        self.waiter.latest_block_height().await
    }

    /// Build a transaction of `msgs` signed by `account`, ready to broadcast.
    pub async fn create_tx(&self, account: &Account, msgs: Vec<Any>) -> ClientResult<TxService> {
        self.create_tx_with_cancel(account, msgs, &CancelToken::never()).await
    }

    /// [`Client::create_tx`] with a cancellation signal for faucet funding.
    pub async fn create_tx_with_cancel(
        &self,
        account: &Account,
        msgs: Vec<Any>,
        cancel: &CancelToken,
    ) -> ClientResult<TxService> {
        let built = self.builder.build(&self.factory, account, msgs, cancel).await?;
        Ok(TxService::new(
            self.transport.clone(),
            self.keyring.clone(),
            self.config.node_address.clone(),
            self.config.broadcast_mode,
            account.clone(),
            built.factory,
            built.tx,
        ))
    }

    /// Create, sign and broadcast a transaction in one call.
    pub async fn broadcast_tx(&self, account: &Account, msgs: Vec<Any>) -> ClientResult<Response> {
        let service = self.create_tx(account, msgs).await?;
        service.broadcast().await
    }

    /// Wait until block `height` is committed or `timeout` elapses.
    pub async fn wait_for_block_height(
        &self,
        height: i64,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> ClientResult<()> {
        self.waiter.wait_for_height(height, timeout, cancel).await
    }

    /// Wait for `n` blocks on top of the current height.
    pub async fn wait_for_n_blocks(
        &self,
        n: i64,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> ClientResult<()> {
        self.waiter.wait_for_n_blocks(n, timeout, cancel).await
    }

    /// Wait for the next block, bounded by the configured timeout.
    pub async fn wait_for_next_block(&self, cancel: &CancelToken) -> ClientResult<()> {
        let timeout = Duration::from_secs(self.config.wait.next_block_timeout_secs);
        self.waiter.wait_for_next_block(timeout, cancel).await
    }

    /// Fetch a committed transaction by its hex hash.
    pub async fn query_tx(&self, hash_hex: &str) -> ClientResult<TxResponse> {
        let hash = hex::decode(hash_hex)
            .map_err(|e| ClientError::Config(format!("invalid tx hash {:?}: {}", hash_hex, e)))?;
        self.transport.tx(&hash).await.map_err(|source| ClientError::Rpc {
            node: self.config.node_address.clone(),
            source,
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("chain_id", &self.chain_id)
            .field("node_address", &self.config.node_address)
            .field("home_dir", &self.home_dir)
            .field("builder", &self.builder)
            .finish()
    }
}
