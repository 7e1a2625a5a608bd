//! Totals consistency check.
//!
//! A wallet is consistent when `total_co2` equals the sum of `co2_saved` and
//! `total_credits` equals the sum of `credits` over its actions. Sums are
//! recomputed in insertion order, which is the order `Wallet::append` adds
//! them, so a wallet built only through `append` matches exactly.

use climadelv_contracts::wallet::Wallet;

/// Allowed absolute difference between a stored total and the recomputed sum.
pub const TOTALS_TOLERANCE: f64 = 1e-9;

/// Stored totals next to the values recomputed from the action log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsReport {
    pub stored_co2: f64,
    pub computed_co2: f64,
    pub stored_credits: f64,
    pub computed_credits: f64,
}

impl TotalsReport {
    pub fn is_consistent(&self) -> bool {
        (self.stored_co2 - self.computed_co2).abs() <= TOTALS_TOLERANCE
            && (self.stored_credits - self.computed_credits).abs() <= TOTALS_TOLERANCE
    }
}

/// Recompute both totals for `wallet`.
pub fn check_totals(wallet: &Wallet) -> TotalsReport {
    let (computed_co2, computed_credits) = wallet
        .actions()
        .iter()
        .fold((0.0, 0.0), |(co2, credits), a| (co2 + a.co2_saved, credits + a.credits));

    TotalsReport {
        stored_co2: wallet.total_co2(),
        computed_co2,
        stored_credits: wallet.total_credits(),
        computed_credits,
    }
}

/// Return true when the stored totals agree with the action log.
///
/// An empty wallet with zero totals is consistent.
pub fn verify_totals(wallet: &Wallet) -> bool {
    check_totals(wallet).is_consistent()
}

/// Return true when both totals and every record's amounts are finite.
pub fn is_finite(wallet: &Wallet) -> bool {
    wallet.total_co2().is_finite()
        && wallet.total_credits().is_finite()
        && wallet
            .actions()
            .iter()
            .all(|a| a.co2_saved.is_finite() && a.credits.is_finite())
}
