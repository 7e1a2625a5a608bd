//! Estimator output and the result handed back to the user-facing layer.

use serde::{Deserialize, Serialize};

/// What the estimator produced for one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Estimated kilograms of CO2 saved. Never negative.
    pub co2_saved: f64,
    /// `co2_saved` rounded to two decimal places.
    pub credits: f64,
    pub tip: String,
    /// Id of the rule that matched, or `None` when the fallback was used.
    pub rule_id: Option<String>,
}

/// Returned by a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub co2_saved: f64,
    pub credits: f64,
    pub tip: String,
}
