//! JSON file implementation of `WalletStore`.
//!
//! The wallet lives in a single pretty-printed JSON document (4-space
//! indent). Saves go through the write-rename pattern: bytes are written to
//! `{path}.tmp`, synced, then renamed over the final path, so a failed write
//! leaves the previous file intact.
//!
//! There is no locking. Two sessions writing the same file race and the
//! last save wins.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use climadelv_contracts::{
    error::{ClimaError, ClimaResult},
    wallet::Wallet,
};
use climadelv_core::traits::WalletStore;

use crate::totals::{check_totals, is_finite};

/// Default wallet location, relative to the working directory.
pub const DEFAULT_WALLET_FILE: &str = "wallet.json";

/// A `WalletStore` backed by one JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, e: io::Error) -> ClimaError {
        ClimaError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }

    fn write_atomic(&self, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let result = File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(data)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

impl WalletStore for JsonFileStore {
    /// Read and parse the wallet file.
    ///
    /// A missing file is the normal first-run state and yields an empty
    /// wallet. Totals that disagree with the action log are logged but kept
    /// as stored.
    fn load(&self) -> ClimaResult<Wallet> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no wallet file; starting empty");
                return Ok(Wallet::empty());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let wallet: Wallet =
            serde_json::from_str(&contents).map_err(|e| ClimaError::StorageCorruption {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let report = check_totals(&wallet);
        if !report.is_consistent() {
            warn!(
                path = %self.path.display(),
                stored_co2 = report.stored_co2,
                computed_co2 = report.computed_co2,
                stored_credits = report.stored_credits,
                computed_credits = report.computed_credits,
                "wallet totals disagree with action log; keeping stored totals"
            );
        }

        debug!(
            path = %self.path.display(),
            actions = wallet.actions().len(),
            "wallet file loaded"
        );
        Ok(wallet)
    }

    /// Write the wallet in full, replacing the previous file.
    ///
    /// A wallet holding a non-finite amount is refused with `ClimaError::Io`
    /// before anything touches the disk; JSON has no encoding for it.
    fn save(&self, wallet: &Wallet) -> ClimaResult<()> {
        if !is_finite(wallet) {
            return Err(ClimaError::Io {
                path: self.path.display().to_string(),
                reason: "wallet holds a non-finite amount; refusing to write".to_string(),
            });
        }

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        wallet
            .serialize(&mut serializer)
            .map_err(|e| self.io_error(io::Error::other(e)))?;

        self.write_atomic(&buf).map_err(|e| self.io_error(e))?;

        debug!(
            path = %self.path.display(),
            actions = wallet.actions().len(),
            bytes = buf.len(),
            "wallet file saved"
        );
        Ok(())
    }
}
