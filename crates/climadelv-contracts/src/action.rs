//! Action input and the persisted action record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::estimate::Estimate;

/// Raw field values collected by the user-facing layer for one eco-action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    /// Free-text description, e.g. "Planted 30 trees in school ground".
    pub activity: String,
    /// Number of people involved. Must be at least 1.
    pub participants: u32,
    /// Number of trees planted.
    pub trees: u32,
    /// City or area. May be empty.
    pub location: String,
}

impl ActionInput {
    pub fn new(activity: impl Into<String>, participants: u32, trees: u32) -> Self {
        Self {
            activity: activity.into(),
            participants,
            trees,
            location: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// One logged eco-action, as stored in the wallet.
///
/// Every field is fixed when the record is created. The wallet only ever
/// appends records; it never edits or removes them. Field names are part of
/// the on-disk format and must not be renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Calendar date the action was logged (ISO `YYYY-MM-DD`).
    pub date: NaiveDate,
    pub activity: String,
    pub participants: u32,
    pub trees: u32,
    pub location: String,
    /// Estimated kilograms of CO2 saved.
    pub co2_saved: f64,
    /// Carbon credits awarded.
    pub credits: f64,
    /// Advisory tip chosen by the estimator.
    pub tip: String,
}

impl ActionRecord {
    /// Merge the raw input with its estimate into a record dated `date`.
    pub fn new(date: NaiveDate, input: &ActionInput, estimate: &Estimate) -> Self {
        Self {
            date,
            activity: input.activity.clone(),
            participants: input.participants,
            trees: input.trees,
            location: input.location.clone(),
            co2_saved: estimate.co2_saved,
            credits: estimate.credits,
            tip: estimate.tip.clone(),
        }
    }
}
