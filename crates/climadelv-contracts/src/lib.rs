//! # climadelv-contracts
//!
//! Shared types and error contracts for the ClimaDelv action logger.
//!
//! Every crate in the workspace imports from here. Estimation rules and
//! storage live elsewhere; this crate holds the data model, the wallet's
//! totals invariant, and the error type.

pub mod action;
pub mod error;
pub mod estimate;
pub mod wallet;
