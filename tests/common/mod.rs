//! Test doubles for every client collaborator.

#![allow(dead_code)]

use async_trait::async_trait;
use prost_types::Any;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cosmos_client::account::{Account, Keyring, KeyringError};
use cosmos_client::chain::{
    AccountRetriever, BroadcastMode, NodeStatus, SimulateResponse, Transport, TransportError, TxResponse,
};
use cosmos_client::config::ClientConfig;
use cosmos_client::faucet::{BalanceQuery, FaucetClient, TransferRequest, TransferResponse};
use cosmos_client::tx::{Gasometer, TxFactory, UnsignedTx};
use cosmos_client::{Client, ClientResult};

pub const CHAIN_ID: &str = "testchain";
pub const PREFIX: &str = "cosmos";

/// A message the fakes accept without looking inside.
pub fn send_msg() -> Any {
    Any {
        type_url: "/cosmos.bank.v1beta1.MsgSend".to_string(),
        value: vec![0x0a, 0x01, 0x61],
    }
}

pub fn alice() -> Account {
    Account::new("alice", vec![2u8; 33])
}

/// Config that never touches the user's home directory.
pub fn test_config() -> ClientConfig {
    ClientConfig {
        home: Some(PathBuf::from("/tmp/cosmos-client-test")),
        ..ClientConfig::default()
    }
}

/// Node double: a block height that advances on every status read, a fixed
/// simulation result and a scripted broadcast result.
pub struct FakeTransport {
    pub height: AtomicI64,
    pub step: i64,
    pub gas_used: u64,
    pub broadcast_result: Mutex<Result<TxResponse, TransportError>>,
    pub status_calls: AtomicU32,
    pub simulate_calls: AtomicU32,
    pub broadcast_calls: AtomicU32,
    pub broadcast_modes: Mutex<Vec<BroadcastMode>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            height: AtomicI64::new(1),
            step: 0,
            gas_used: 50_000,
            broadcast_result: Mutex::new(Ok(TxResponse {
                txhash: "A1B2".to_string(),
                height: 10,
                ..TxResponse::default()
            })),
            status_calls: AtomicU32::new(0),
            simulate_calls: AtomicU32::new(0),
            broadcast_calls: AtomicU32::new(0),
            broadcast_modes: Mutex::new(Vec::new()),
        }
    }

    /// Height starts at `start` and grows by `step` after each status read.
    pub fn with_height(mut self, start: i64, step: i64) -> Self {
        self.height = AtomicI64::new(start);
        self.step = step;
        self
    }

    pub fn with_broadcast_result(self, result: Result<TxResponse, TransportError>) -> Self {
        *self.broadcast_result.lock().unwrap() = result;
        self
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn status(&self) -> Result<NodeStatus, TransportError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let height = self.height.fetch_add(self.step, Ordering::SeqCst);
        Ok(NodeStatus {
            network: CHAIN_ID.to_string(),
            latest_block_height: height,
            catching_up: false,
        })
    }

    async fn simulate(&self, _tx: &UnsignedTx) -> Result<SimulateResponse, TransportError> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SimulateResponse {
            gas_wanted: 0,
            gas_used: self.gas_used,
        })
    }

    async fn broadcast_tx(&self, _tx_bytes: &[u8], mode: BroadcastMode) -> Result<TxResponse, TransportError> {
        self.broadcast_calls.fetch_add(1, Ordering::SeqCst);
        self.broadcast_modes.lock().unwrap().push(mode);
        self.broadcast_result.lock().unwrap().clone()
    }

    async fn tx(&self, hash: &[u8]) -> Result<TxResponse, TransportError> {
        Ok(TxResponse {
            txhash: hex::encode_upper(hash),
            ..TxResponse::default()
        })
    }
}

/// In-memory keyring. Addresses are derived under [`PREFIX`].
pub struct FakeKeyring {
    accounts: HashMap<String, Account>,
    pub signed: Mutex<Vec<(String, u64, u64)>>,
}

impl FakeKeyring {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: accounts.into_iter().map(|a| (a.name.clone(), a)).collect(),
            signed: Mutex::new(Vec::new()),
        }
    }
}

impl Keyring for FakeKeyring {
    fn get_by_name(&self, name: &str) -> Result<Account, KeyringError> {
        self.accounts
            .get(name)
            .cloned()
            .ok_or_else(|| KeyringError::NotFound(name.to_string()))
    }

    fn get_by_address(&self, address: &str) -> Result<Account, KeyringError> {
        self.accounts
            .values()
            .find(|a| a.address(PREFIX).map(|addr| addr == address).unwrap_or(false))
            .cloned()
            .ok_or_else(|| KeyringError::NotFound(address.to_string()))
    }

    fn sign(&self, name: &str, factory: &TxFactory, _tx: &UnsignedTx) -> Result<Vec<u8>, KeyringError> {
        self.signed
            .lock()
            .unwrap()
            .push((name.to_string(), factory.account_number(), factory.sequence()));
        Ok(vec![0xde, 0xad])
    }
}

/// Chain account state double.
pub struct FakeAccounts {
    pub exists: bool,
    pub account_number: u64,
    pub sequence: u64,
    pub lookups: AtomicU32,
}

impl FakeAccounts {
    pub fn new(account_number: u64, sequence: u64) -> Self {
        Self {
            exists: true,
            account_number,
            sequence,
            lookups: AtomicU32::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            exists: false,
            ..Self::new(0, 0)
        }
    }
}

#[async_trait]
impl AccountRetriever for FakeAccounts {
    async fn ensure_exists(&self, address: &str) -> Result<(), TransportError> {
        if self.exists {
            Ok(())
        } else {
            Err(TransportError::new(format!("account {} not found", address)))
        }
    }

    async fn account_number_sequence(&self, _address: &str) -> Result<(u64, u64), TransportError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok((self.account_number, self.sequence))
    }
}

/// Balance double. A credit scheduled by the faucet lands after a number of
/// further balance reads.
pub struct FakeBalances {
    pub amount: AtomicU64,
    pub queries: AtomicU32,
    pending: Mutex<Option<(u32, u64)>>,
}

impl FakeBalances {
    pub fn new(amount: u64) -> Self {
        Self {
            amount: AtomicU64::new(amount),
            queries: AtomicU32::new(0),
            pending: Mutex::new(None),
        }
    }

    pub fn schedule_credit(&self, after_queries: u32, amount: u64) {
        *self.pending.lock().unwrap() = Some((after_queries, amount));
    }
}

#[async_trait]
impl BalanceQuery for FakeBalances {
    async fn balance(&self, _address: &str, _denom: &str) -> Result<u128, TransportError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let mut pending = self.pending.lock().unwrap();
        if let Some((remaining, credit)) = *pending {
            if remaining == 0 {
                self.amount.fetch_add(credit, Ordering::SeqCst);
                *pending = None;
            } else {
                *pending = Some((remaining - 1, credit));
            }
        }
        Ok(u128::from(self.amount.load(Ordering::SeqCst)))
    }
}

pub enum FaucetBehavior {
    /// Credit `amount`, visible after `after_queries` further balance reads.
    Credit { after_queries: u32, amount: u64 },
    /// Accept the request but never deliver.
    Never,
    Reject(String),
    Unreachable,
}

pub struct FakeFaucet {
    balances: Arc<FakeBalances>,
    behavior: FaucetBehavior,
    pub calls: AtomicU32,
}

impl FakeFaucet {
    pub fn new(balances: Arc<FakeBalances>, behavior: FaucetBehavior) -> Self {
        Self {
            balances,
            behavior,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl FaucetClient for FakeFaucet {
    async fn transfer(&self, _request: TransferRequest) -> Result<TransferResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FaucetBehavior::Credit { after_queries, amount } => {
                self.balances.schedule_credit(*after_queries, *amount);
                Ok(TransferResponse::default())
            }
            FaucetBehavior::Never => Ok(TransferResponse::default()),
            FaucetBehavior::Reject(reason) => Ok(TransferResponse {
                error: reason.clone(),
            }),
            FaucetBehavior::Unreachable => Err(TransportError::new("connection refused")),
        }
    }
}

/// Gasometer returning a fixed estimate.
pub struct FakeGasometer {
    pub gas: u64,
    pub calls: AtomicU32,
}

impl FakeGasometer {
    pub fn new(gas: u64) -> Self {
        Self {
            gas,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Gasometer for FakeGasometer {
    async fn calculate_gas(&self, _factory: &TxFactory, _msgs: &[Any]) -> ClientResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.gas)
    }
}

/// Collaborators of one test client, kept for assertions.
pub struct Harness {
    pub transport: Arc<FakeTransport>,
    pub keyring: Arc<FakeKeyring>,
    pub accounts: Arc<FakeAccounts>,
    pub gasometer: Arc<FakeGasometer>,
    pub balances: Arc<FakeBalances>,
    pub faucet: Arc<FakeFaucet>,
}

impl Harness {
    pub fn new(transport: FakeTransport, accounts: FakeAccounts) -> Self {
        let balances = Arc::new(FakeBalances::new(1_000));
        let faucet = Arc::new(FakeFaucet::new(balances.clone(), FaucetBehavior::Never));
        Self {
            transport: Arc::new(transport),
            keyring: Arc::new(FakeKeyring::new(vec![alice()])),
            accounts: Arc::new(accounts),
            gasometer: Arc::new(FakeGasometer::new(80_000)),
            balances,
            faucet,
        }
    }

    pub fn with_funding(mut self, balances: Arc<FakeBalances>, faucet: Arc<FakeFaucet>) -> Self {
        self.balances = balances;
        self.faucet = faucet;
        self
    }

    pub async fn client(&self, config: ClientConfig) -> ClientResult<Client> {
        Client::builder(config)
            .transport(self.transport.clone())
            .keyring(self.keyring.clone())
            .account_retriever(self.accounts.clone())
            .gasometer(self.gasometer.clone())
            .balance_query(self.balances.clone())
            .faucet_client(self.faucet.clone())
            .build()
            .await
    }
}
