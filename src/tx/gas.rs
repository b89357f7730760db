//! Gas limit resolution.

use async_trait::async_trait;
use prost_types::Any;
use std::sync::Arc;

use crate::chain::Transport;
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::tx::factory::TxFactory;

/// Gas added on top of a simulated estimate.
///
/// Simulation runs against current state and tends to under-report what the
/// real execution consumes.
pub const GAS_SIMULATION_MARGIN: u64 = 20_000;

/// Gas setting value requesting simulation.
pub const GAS_AUTO: &str = "auto";

/// How the gas limit of a transaction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasSetting {
    /// Simulate and add [`GAS_SIMULATION_MARGIN`].
    Auto,
    /// Use this limit verbatim.
    Fixed(u64),
}

impl GasSetting {
    /// Parse a gas setting. Empty and `auto` select simulation.
    pub fn parse(value: &str) -> ClientResult<Self> {
        let value = value.trim();
        if value.is_empty() || value == GAS_AUTO {
            return Ok(GasSetting::Auto);
        }
        value
            .parse::<u64>()
            .map(GasSetting::Fixed)
            .map_err(|_| ClientError::InvalidGasValue(value.to_string()))
    }
}

/// Estimates the gas a set of messages will consume.
#[async_trait]
pub trait Gasometer: Send + Sync {
    async fn calculate_gas(&self, factory: &TxFactory, msgs: &[Any]) -> ClientResult<u64>;
}

/// Gasometer simulating through the node, scaled by the factory's adjustment.
///
/// The scaled value is truncated toward zero, matching the SDK's own gas
/// estimation.
#[derive(Clone)]
pub struct SimulationGasometer {
    transport: Arc<dyn Transport>,
}

impl SimulationGasometer {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Gasometer for SimulationGasometer {
    async fn calculate_gas(&self, factory: &TxFactory, msgs: &[Any]) -> ClientResult<u64> {
        let tx = factory.build_unsigned_tx(msgs.to_vec())?;
        let simulated = self
            .transport
            .simulate(&tx)
            .await
            .map_err(|e| ClientError::Simulation(e.to_string()))?;

        let adjusted = factory.gas_adjustment() * simulated.gas_used as f64;
        Ok(adjusted as u64)
    }
}

/// Pick the gas limit for `msgs` according to `setting`.
///
/// A fixed setting never reaches the gasometer. Simulation failures are
/// returned; there is no fallback limit.
pub async fn resolve_gas(
    setting: GasSetting,
    gasometer: &dyn Gasometer,
    factory: &TxFactory,
    msgs: &[Any],
) -> ClientResult<u64> {
    match setting {
        GasSetting::Fixed(gas) => Ok(gas),
        GasSetting::Auto => match gasometer.calculate_gas(factory, msgs).await {
            Ok(simulated) => {
                metrics::record_gas_simulation("ok");
                let gas = simulated.saturating_add(GAS_SIMULATION_MARGIN);
                tracing::debug!(simulated, gas, "Gas estimated by simulation");
                Ok(gas)
            }
            Err(e) => {
                metrics::record_gas_simulation("error");
                Err(e)
            }
        },
    }
}
