//! The action logger: validate, estimate, record, persist.
//!
//! Pipeline for one submission:
//!
//!   Validate → Estimate → ActionRecord → Wallet::append → WalletStore::save
//!
//! Validation failures stop the pipeline before anything is estimated or
//! stored. A failed save does NOT roll back the in-memory append: the action
//! stays visible for the rest of the session and the logger is marked dirty.

use chrono::{Local, NaiveDate};
use rand::RngCore;
use tracing::{debug, info, warn};

use climadelv_contracts::{
    action::{ActionInput, ActionRecord},
    error::{ClimaError, ClimaResult},
    estimate::SubmitOutcome,
    wallet::{Summary, Wallet},
};

use crate::traits::{ImpactEstimator, WalletStore};

/// Number of records shown by the recent-history view.
pub const DEFAULT_HISTORY_LEN: usize = 5;

/// Owns the session's wallet and the components that fill and persist it.
///
/// The wallet is loaded once in [`ActionLogger::open`] and passed explicitly
/// through every operation; there is no process-wide state.
pub struct ActionLogger {
    estimator: Box<dyn ImpactEstimator>,
    store: Box<dyn WalletStore>,
    wallet: Wallet,
    dirty: bool,
}

impl ActionLogger {
    /// Load the wallet from `store` and build a logger around it.
    pub fn open(
        estimator: Box<dyn ImpactEstimator>,
        store: Box<dyn WalletStore>,
    ) -> ClimaResult<Self> {
        let wallet = store.load()?;
        debug!(actions = wallet.actions().len(), "wallet loaded");
        Ok(Self {
            estimator,
            store,
            wallet,
            dirty: false,
        })
    }

    /// Log an action dated today (local time).
    pub fn submit(
        &mut self,
        input: &ActionInput,
        rng: &mut dyn RngCore,
    ) -> ClimaResult<SubmitOutcome> {
        self.submit_on(Local::now().date_naive(), input, rng)
    }

    /// Log an action with an explicit date.
    ///
    /// # Errors
    ///
    /// - `ClimaError::Validation` if the activity is blank, participants is
    ///   zero, or the estimate (or a running total) would not be a finite
    ///   number. The wallet is untouched.
    /// - `ClimaError::Io` if the save fails. The action has still been
    ///   appended in memory and [`ActionLogger::is_dirty`] returns true.
    pub fn submit_on(
        &mut self,
        date: NaiveDate,
        input: &ActionInput,
        rng: &mut dyn RngCore,
    ) -> ClimaResult<SubmitOutcome> {
        validate(input)?;

        let estimate = self.estimator.estimate(input, rng);
        debug!(
            rule = estimate.rule_id.as_deref().unwrap_or("fallback"),
            co2_saved = estimate.co2_saved,
            "action estimated"
        );

        check_finite(&self.wallet, estimate.co2_saved, estimate.credits)?;

        let record = ActionRecord::new(date, input, &estimate);
        self.wallet.append(record);
        self.dirty = true;

        info!(
            co2_saved = estimate.co2_saved,
            credits = estimate.credits,
            total_credits = self.wallet.total_credits(),
            "action logged"
        );

        self.persist()?;

        Ok(SubmitOutcome {
            co2_saved: estimate.co2_saved,
            credits: estimate.credits,
            tip: estimate.tip,
        })
    }

    /// Write the wallet to the store.
    ///
    /// Called automatically after each submission. Callers may invoke it
    /// again after a failed save; nothing retries on its own.
    pub fn persist(&mut self) -> ClimaResult<()> {
        match self.store.save(&self.wallet) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "wallet save failed; unsaved action kept in memory");
                Err(e)
            }
        }
    }

    /// True when the in-memory wallet holds changes the store does not.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Action count and running totals.
    pub fn summary(&self) -> Summary {
        self.wallet.summary()
    }

    /// The most recent `n` records, newest first.
    pub fn recent_history(&self, n: usize) -> Vec<&ActionRecord> {
        self.wallet.recent(n).collect()
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }
}

fn validate(input: &ActionInput) -> ClimaResult<()> {
    if input.activity.trim().is_empty() {
        return Err(ClimaError::Validation {
            reason: "please enter a description of the action".to_string(),
        });
    }
    if input.participants == 0 {
        return Err(ClimaError::Validation {
            reason: "at least one person must be involved".to_string(),
        });
    }
    Ok(())
}

/// Every stored amount and both totals must stay finite.
fn check_finite(wallet: &Wallet, co2_saved: f64, credits: f64) -> ClimaResult<()> {
    let finite = co2_saved.is_finite()
        && credits.is_finite()
        && (wallet.total_co2() + co2_saved).is_finite()
        && (wallet.total_credits() + credits).is_finite();
    if !finite {
        warn!(co2_saved, credits, "estimate out of range; action not logged");
        return Err(ClimaError::Validation {
            reason: format!(
                "estimated impact {} kg is too large to record",
                co2_saved
            ),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
