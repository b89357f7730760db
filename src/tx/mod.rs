//! Transaction lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Account + messages
//!     → builder.rs (signer address, faucet funding, account number/sequence)
//!     → gas.rs (explicit limit, or simulation + fixed margin)
//!     → factory.rs (fees, unsigned transaction)
//!     → service.rs (keyring signs, transport broadcasts, code interpreted)
//!     → response.rs (typed decoding of the result envelope)
//! ```
//!
//! # Design Decisions
//! - Factories are values: each resolution step derives a new one
//! - A caller-supplied non-zero account number or sequence is never replaced
//! - No silent fallbacks: bad gas strings and simulation failures surface as-is

pub mod builder;
pub mod coins;
pub mod factory;
pub mod gas;
pub mod response;
pub mod service;

pub use builder::{BuiltTx, TransactionBuilder};
pub use coins::{parse_coins, parse_dec_coins, Coin, DecCoin};
pub use factory::{Fee, SignMode, TxFactory, UnsignedTx};
pub use gas::{GasSetting, Gasometer, SimulationGasometer, GAS_SIMULATION_MARGIN};
pub use response::{DecodeError, MsgData, Response, TxMsgData};
pub use service::TxService;
