//! # climadelv-core
//!
//! The action logging pipeline for ClimaDelv.
//!
//! This crate provides:
//! - The two seams (`ImpactEstimator`, `WalletStore`)
//! - The `ActionLogger` that validates, estimates, records, and persists
//!
//! ## Usage
//!
//! ```rust,ignore
//! use climadelv_core::ActionLogger;
//!
//! let mut logger = ActionLogger::open(Box::new(estimator), Box::new(store))?;
//! let outcome = logger.submit(&input, &mut rand::thread_rng())?;
//! ```

pub mod logger;
pub mod traits;

pub use logger::{ActionLogger, DEFAULT_HISTORY_LEN};
