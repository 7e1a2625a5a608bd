//! The two seams of the action logging pipeline.
//!
//! - `ImpactEstimator` — maps raw action input to a CO2 / credit / tip estimate
//! - `WalletStore`     — durable home of the wallet aggregate
//!
//! `ActionLogger` wires them together. Neither trait knows about the other.

use rand::RngCore;

use climadelv_contracts::{
    action::ActionInput, error::ClimaResult, estimate::Estimate, wallet::Wallet,
};

/// Estimates the impact of one eco-action.
///
/// Implementations must be pure apart from drawing on `rng`. All randomness
/// comes from the caller-supplied source so tests can seed it.
pub trait ImpactEstimator: Send + Sync {
    /// Estimate CO2 saved, credits awarded, and a tip for `input`.
    ///
    /// The caller has already rejected blank activity text.
    fn estimate(&self, input: &ActionInput, rng: &mut dyn RngCore) -> Estimate;
}

/// Loads and saves the whole wallet.
///
/// There are no partial writes: `save` replaces whatever was stored before.
/// Only one writer is assumed; concurrent sessions race and the last save wins.
pub trait WalletStore: Send + Sync {
    /// Return the stored wallet, or `Wallet::empty()` if nothing is stored yet.
    ///
    /// Returns `ClimaError::StorageCorruption` if stored state cannot be parsed.
    fn load(&self) -> ClimaResult<Wallet>;

    /// Persist `wallet` in full, overwriting prior content.
    ///
    /// Returns `ClimaError::Io` if the storage medium is unwritable.
    fn save(&self, wallet: &Wallet) -> ClimaResult<()>;
}
