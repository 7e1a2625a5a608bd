//! The wallet: the single persisted aggregate of logged actions and totals.

use serde::{Deserialize, Serialize};

use crate::action::ActionRecord;

/// Ordered action log plus running totals.
///
/// The totals are only ever changed by [`Wallet::append`], which keeps
/// `total_co2` equal to the sum of `co2_saved` and `total_credits` equal to
/// the sum of `credits` over `actions`. Serialized field names match the
/// on-disk layout: `actions`, `total_credits`, `total_co2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    actions: Vec<ActionRecord>,
    total_credits: f64,
    total_co2: f64,
}

impl Wallet {
    /// A wallet with no actions and zero totals.
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            total_credits: 0.0,
            total_co2: 0.0,
        }
    }

    /// Push `record` to the end of the log and add it to both totals.
    pub fn append(&mut self, record: ActionRecord) {
        self.total_co2 += record.co2_saved;
        self.total_credits += record.credits;
        self.actions.push(record);
    }

    /// All actions in insertion (chronological) order.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn total_credits(&self) -> f64 {
        self.total_credits
    }

    pub fn total_co2(&self) -> f64 {
        self.total_co2
    }

    pub fn summary(&self) -> Summary {
        Summary {
            action_count: self.actions.len(),
            total_co2: self.total_co2,
            total_credits: self.total_credits,
        }
    }

    /// The last `n` actions, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().rev().take(n)
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Aggregate figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub action_count: usize,
    pub total_co2: f64,
    pub total_credits: f64,
}
