//! In-memory implementation of `WalletStore`.
//!
//! `InMemoryWalletStore` keeps the last saved wallet behind an
//! `Arc<Mutex<_>>`. Clones share the same slot, so a test can hand one clone
//! to an `ActionLogger` and inspect saves through another. Writes can be
//! switched to fail to exercise the unsaved-action path.

use std::sync::{Arc, Mutex};

use climadelv_contracts::{
    error::{ClimaError, ClimaResult},
    wallet::Wallet,
};
use climadelv_core::traits::WalletStore;

struct InMemoryState {
    wallet: Option<Wallet>,
    save_count: usize,
    fail_writes: bool,
}

/// A shared in-memory wallet slot.
#[derive(Clone)]
pub struct InMemoryWalletStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryWalletStore {
    /// A store with nothing saved yet.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState {
                wallet: None,
                save_count: 0,
                fail_writes: false,
            })),
        }
    }

    /// A store that already holds `wallet`.
    pub fn with_wallet(wallet: Wallet) -> Self {
        let store = Self::new();
        store.lock().wallet = Some(wallet);
        store
    }

    /// Make subsequent saves fail with `ClimaError::Io` (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// The last successfully saved wallet, if any.
    pub fn snapshot(&self) -> Option<Wallet> {
        self.lock().wallet.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        // A panic while holding the lock cannot leave the state half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStore for InMemoryWalletStore {
    fn load(&self) -> ClimaResult<Wallet> {
        Ok(self.lock().wallet.clone().unwrap_or_default())
    }

    fn save(&self, wallet: &Wallet) -> ClimaResult<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(ClimaError::Io {
                path: "memory".to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        state.wallet = Some(wallet.clone());
        state.save_count += 1;
        Ok(())
    }
}
