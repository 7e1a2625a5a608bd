//! # climadelv-estimate
//!
//! A TOML-driven keyword rule table that estimates the CO2 impact of an
//! eco-action and the carbon credits it earns.
//!
//! ## Overview
//!
//! This crate provides [`KeywordEstimator`], which implements the
//! [`ImpactEstimator`](climadelv_core::traits::ImpactEstimator) trait. Rules
//! are declared in TOML, tested in order against the lowercased activity text,
//! and the first keyword hit wins. New activity categories are added by
//! appending a rule; no code changes are needed.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use climadelv_estimate::KeywordEstimator;
//!
//! let estimator = KeywordEstimator::builtin()?;
//! let estimate = estimator.estimate(&input, &mut rand::thread_rng());
//! ```

pub mod engine;
pub mod rule;

pub use engine::{round_credits, KeywordEstimator, BUILTIN_RULES};
pub use rule::{EstimationRule, Fallback, Formula, RuleTable};

// ── Tests ─────────────────────────────────────────────────────────────────────
