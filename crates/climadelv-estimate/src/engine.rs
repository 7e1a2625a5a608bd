//! Keyword-driven impact estimator.
//!
//! `KeywordEstimator` loads a `RuleTable` from a TOML string or file and
//! implements the `ImpactEstimator` trait from climadelv-core.
//!
//! Estimation algorithm:
//!
//! 1. Lowercase the activity text once.
//! 2. Walk rules in declaration order; the first whose keyword is a substring
//!    supplies the formula and tip.
//! 3. If none matched, draw a whole number uniformly from
//!    `fallback.min..=fallback.max` using the caller's RNG.
//! 4. Credits are the CO2 figure rounded to two decimal places, halves to even.

use std::collections::HashSet;
use std::path::Path;

use rand::{Rng, RngCore};
use tracing::debug;

use climadelv_contracts::{
    action::ActionInput,
    error::{ClimaError, ClimaResult},
    estimate::Estimate,
};
use climadelv_core::traits::ImpactEstimator;

use crate::rule::{EstimationRule, RuleTable};

/// The rule table compiled into the binary.
pub const BUILTIN_RULES: &str = include_str!("../rules/default.toml");

/// An `ImpactEstimator` backed by an ordered keyword rule table.
///
/// ```rust,ignore
/// use climadelv_estimate::KeywordEstimator;
///
/// let estimator = KeywordEstimator::from_file(Path::new("rules.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct KeywordEstimator {
    table: RuleTable,
}

impl KeywordEstimator {
    /// The default table: trees, composting, solar, random fallback.
    pub fn builtin() -> ClimaResult<Self> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Parse `s` as TOML and build a validated estimator.
    ///
    /// Returns `ClimaError::Config` if the TOML is malformed, does not match
    /// the `RuleTable` schema, or fails validation.
    pub fn from_toml_str(s: &str) -> ClimaResult<Self> {
        let table: RuleTable = toml::from_str(s).map_err(|e| ClimaError::Config {
            reason: format!("failed to parse rule table TOML: {}", e),
        })?;
        Self::from_table(table)
    }

    /// Read the file at `path` and parse it as a TOML rule table.
    pub fn from_file(path: &Path) -> ClimaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClimaError::Config {
            reason: format!("failed to read rule file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate `table` and wrap it.
    pub fn from_table(table: RuleTable) -> ClimaResult<Self> {
        validate(&table)?;
        Ok(Self { table })
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Return the first rule matching `activity`, or `None` for the fallback.
    pub fn classify(&self, activity: &str) -> Option<&EstimationRule> {
        let lowered = activity.to_lowercase();
        self.table.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl ImpactEstimator for KeywordEstimator {
    fn estimate(&self, input: &ActionInput, rng: &mut dyn RngCore) -> Estimate {
        let (co2_saved, tip, rule_id) = match self.classify(&input.activity) {
            Some(rule) => {
                debug!(rule_id = %rule.id, keyword = %rule.keyword, "rule matched");
                (
                    rule.formula.apply(input.participants, input.trees),
                    rule.tip.clone(),
                    Some(rule.id.clone()),
                )
            }
            None => {
                let fallback = &self.table.fallback;
                let drawn = rng.gen_range(fallback.min..=fallback.max);
                debug!(drawn, "no rule matched; using fallback range");
                (f64::from(drawn), fallback.tip.clone(), None)
            }
        };

        Estimate {
            co2_saved,
            credits: round_credits(co2_saved),
            tip,
            rule_id,
        }
    }
}

/// Round to two decimal places, exact halves to even (`0.125` -> `0.12`).
pub fn round_credits(co2: f64) -> f64 {
    (co2 * 100.0).round_ties_even() / 100.0
}

fn validate(table: &RuleTable) -> ClimaResult<()> {
    let mut seen = HashSet::new();
    for rule in &table.rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(ClimaError::Config {
                reason: format!("duplicate rule id '{}'", rule.id),
            });
        }
        if rule.keyword.trim().is_empty() {
            return Err(ClimaError::Config {
                reason: format!("rule '{}' has an empty keyword", rule.id),
            });
        }
        let factor = rule.formula.factor();
        if !factor.is_finite() || factor < 0.0 {
            return Err(ClimaError::Config {
                reason: format!(
                    "rule '{}' has factor {} (must be finite and non-negative)",
                    rule.id, factor
                ),
            });
        }
    }

    let fallback = &table.fallback;
    if fallback.min > fallback.max {
        return Err(ClimaError::Config {
            reason: format!(
                "fallback min {} exceeds max {}",
                fallback.min, fallback.max
            ),
        });
    }

    Ok(())
}
