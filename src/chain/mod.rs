//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! Node (RPC, owned by the embedding application)
//!     → transport.rs (Transport / AccountRetriever traits)
//!     → waiter.rs (poll node status for block heights)
//!     → tx subsystem (simulate, broadcast, query)
//! ```
//!
//! # Design Decisions
//! - The wire client is a collaborator: this crate only defines the seam
//! - Transport errors are distinct from non-zero chain response codes
//! - Nothing here retries a transport call except the height poll loop

pub mod transport;
pub mod types;
pub mod waiter;

pub use transport::{AccountRetriever, Transport};
pub use types::{BroadcastMode, NodeStatus, SimulateResponse, TransportError, TxResponse};
pub use waiter::BlockHeightWaiter;
