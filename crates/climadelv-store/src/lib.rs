//! # climadelv-store
//!
//! Wallet persistence for the ClimaDelv action logger.
//!
//! ## Overview
//!
//! The whole wallet (action log plus totals) is read once at session start
//! and rewritten in full after every change. [`JsonFileStore`] keeps it in a
//! local JSON file; [`InMemoryWalletStore`] keeps it in memory for tests and
//! embedding. [`verify_totals`] checks that the stored totals still match the
//! action log.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use climadelv_store::JsonFileStore;
//! use climadelv_core::traits::WalletStore;
//!
//! let store = JsonFileStore::new("wallet.json");
//! let mut wallet = store.load()?;
//! wallet.append(record);
//! store.save(&wallet)?;
//! ```

pub mod file;
pub mod memory;
pub mod totals;

pub use file::{JsonFileStore, DEFAULT_WALLET_FILE};
pub use memory::InMemoryWalletStore;
pub use totals::{check_totals, is_finite, verify_totals, TotalsReport};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use climadelv_contracts::{
        action::{ActionInput, ActionRecord},
        error::ClimaError,
        estimate::Estimate,
        wallet::Wallet,
    };
    use climadelv_core::traits::WalletStore;

    use super::{verify_totals, InMemoryWalletStore, JsonFileStore};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A fresh directory per test so runs never see each other's files.
    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "climadelv_store_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn record(activity: &str, co2: f64) -> ActionRecord {
        let input = ActionInput::new(activity, 2, 0).with_location("Chennai");
        let estimate = Estimate {
            co2_saved: co2,
            credits: co2,
            tip: "tip".to_string(),
            rule_id: None,
        };
        ActionRecord::new(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(), &input, &estimate)
    }

    fn wallet_with(amounts: &[f64]) -> Wallet {
        let mut wallet = Wallet::empty();
        for (i, co2) in amounts.iter().enumerate() {
            wallet.append(record(&format!("action {i}"), *co2));
        }
        wallet
    }

    // ── JsonFileStore ─────────────────────────────────────────────────────────

    /// No file on disk means a fresh, empty wallet.
    #[test]
    fn test_missing_file_loads_empty_wallet() {
        let dir = test_dir("missing");
        let store = JsonFileStore::new(dir.join("wallet.json"));

        let wallet = store.load().unwrap();
        assert_eq!(wallet, Wallet::empty());
        assert_eq!(wallet.total_credits(), 0.0);
        assert_eq!(wallet.total_co2(), 0.0);

        let _ = fs::remove_dir_all(&dir);
    }

    /// Loading right after saving returns an equal wallet.
    #[test]
    fn test_save_then_load_is_identity() {
        let dir = test_dir("identity");
        let store = JsonFileStore::new(dir.join("wallet.json"));
        let wallet = wallet_with(&[660.0, 2.5, 1000.0, 87.0]);

        store.save(&wallet).unwrap();
        assert_eq!(store.load().unwrap(), wallet);

        let _ = fs::remove_dir_all(&dir);
    }

    /// Each save replaces the file in full and leaves no temp file behind.
    #[test]
    fn test_save_overwrites_and_cleans_up() {
        let dir = test_dir("overwrite");
        let path = dir.join("wallet.json");
        let store = JsonFileStore::new(&path);

        store.save(&wallet_with(&[1.0, 2.0, 3.0])).unwrap();
        store.save(&wallet_with(&[9.0])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.actions().len(), 1);
        assert_eq!(loaded.total_co2(), 9.0);
        assert!(!dir.join("wallet.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    /// The file uses the documented field names and 4-space indentation.
    #[test]
    fn test_file_layout() {
        let dir = test_dir("layout");
        let path = dir.join("wallet.json");
        JsonFileStore::new(&path).save(&wallet_with(&[25.0])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"actions\": ["));
        assert!(text.contains("\"total_credits\": 25.0"));
        assert!(text.contains("\"total_co2\": 25.0"));
        assert!(text.contains("\"date\": \"2024-08-15\""));
        assert!(text.contains("\"location\": \"Chennai\""));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = test_dir("parents");
        let store = JsonFileStore::new(dir.join("nested/deep/wallet.json"));

        store.save(&wallet_with(&[5.0])).unwrap();
        assert_eq!(store.load().unwrap().actions().len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    /// Garbage on disk is reported as corruption and left untouched.
    #[test]
    fn test_corrupt_file_is_storage_corruption() {
        let dir = test_dir("corrupt");
        let path = dir.join("wallet.json");
        fs::write(&path, "{ \"actions\": [ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        match err {
            ClimaError::StorageCorruption { path: reported, .. } => {
                assert!(reported.ends_with("wallet.json"));
            }
            other => panic!("expected StorageCorruption, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"actions\": [ not json");

        let _ = fs::remove_dir_all(&dir);
    }

    /// Valid JSON with the wrong shape is also corruption.
    #[test]
    fn test_wrong_shape_is_storage_corruption() {
        let dir = test_dir("shape");
        let path = dir.join("wallet.json");
        fs::write(&path, r#"{"actions": "none", "total_credits": 0}"#).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ClimaError::StorageCorruption { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    /// Saving where a directory sits at the target path is an I/O error.
    #[test]
    fn test_unwritable_target_is_io_error() {
        let dir = test_dir("unwritable");
        let path = dir.join("wallet.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = JsonFileStore::new(&path).save(&wallet_with(&[1.0])).unwrap_err();
        assert!(matches!(err, ClimaError::Io { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    /// A wallet with an infinite amount is refused and the old file survives.
    #[test]
    fn test_non_finite_wallet_is_not_written() {
        let dir = test_dir("non_finite");
        let path = dir.join("wallet.json");
        let store = JsonFileStore::new(&path);
        let good = wallet_with(&[660.0]);
        store.save(&good).unwrap();

        let err = store.save(&wallet_with(&[660.0, f64::INFINITY])).unwrap_err();
        assert!(matches!(err, ClimaError::Io { .. }));
        assert_eq!(store.load().unwrap(), good);
        assert!(!dir.join("wallet.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    /// A failed rename does not leave the temp file behind.
    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = test_dir("tmp_cleanup");
        let path = dir.join("wallet.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        JsonFileStore::new(&path).save(&wallet_with(&[1.0])).unwrap_err();
        assert!(!dir.join("wallet.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    /// A path that exists but cannot be read as a file is an I/O error,
    /// not corruption and not an empty wallet.
    #[test]
    fn test_unreadable_file_is_io_error() {
        let dir = test_dir("unreadable");
        let path = dir.join("wallet.json");
        fs::create_dir_all(&path).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ClimaError::Io { .. }), "got {:?}", err);

        let _ = fs::remove_dir_all(&dir);
    }

    /// Totals that disagree with the log still load, and stay as stored.
    #[test]
    fn test_drifted_totals_load_as_stored() {
        let dir = test_dir("drift_load");
        let path = dir.join("wallet.json");
        fs::write(
            &path,
            r#"{
    "actions": [
        {
            "date": "2024-05-01",
            "activity": "Composting",
            "participants": 2,
            "trees": 0,
            "location": "",
            "co2_saved": 5.0,
            "credits": 5.0,
            "tip": "t"
        }
    ],
    "total_credits": 7.0,
    "total_co2": 50.0
}"#,
        )
        .unwrap();

        let wallet = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(wallet.actions().len(), 1);
        assert_eq!(wallet.total_co2(), 50.0);
        assert_eq!(wallet.total_credits(), 7.0);
        assert!(!verify_totals(&wallet));

        let _ = fs::remove_dir_all(&dir);
    }

    /// Wallets written by other tools with integer numbers still load.
    #[test]
    fn test_loads_existing_file_with_integer_numbers() {
        let dir = test_dir("integers");
        let path = dir.join("wallet.json");
        fs::write(
            &path,
            r#"{
    "actions": [
        {
            "date": "2024-05-01",
            "activity": "Installed solar",
            "participants": 1,
            "trees": 0,
            "location": "",
            "co2_saved": 250,
            "credits": 250,
            "tip": "Solar panels save energy. Consider solar water heating too."
        }
    ],
    "total_credits": 250,
    "total_co2": 250
}"#,
        )
        .unwrap();

        let wallet = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(wallet.total_co2(), 250.0);
        assert!(verify_totals(&wallet));

        let _ = fs::remove_dir_all(&dir);
    }

    // ── Totals ────────────────────────────────────────────────────────────────

    #[test]
    fn test_verify_totals_after_appends() {
        assert!(verify_totals(&Wallet::empty()));
        assert!(verify_totals(&wallet_with(&[0.1, 0.2, 2.5, 660.0, 117.0])));
    }

    #[test]
    fn test_verify_totals_detects_drift() {
        let json = r#"{
            "actions": [
                {
                    "date": "2024-05-01",
                    "activity": "Composting",
                    "participants": 2,
                    "trees": 0,
                    "location": "",
                    "co2_saved": 5.0,
                    "credits": 5.0,
                    "tip": "t"
                }
            ],
            "total_credits": 5.0,
            "total_co2": 50.0
        }"#;
        let wallet: Wallet = serde_json::from_str(json).unwrap();
        assert!(!verify_totals(&wallet));
    }

    // ── InMemoryWalletStore ───────────────────────────────────────────────────

    #[test]
    fn test_memory_store_round_trip_and_shared_clones() {
        let store = InMemoryWalletStore::new();
        let observer = store.clone();
        assert_eq!(store.load().unwrap(), Wallet::empty());

        let wallet = wallet_with(&[3.0, 4.0]);
        store.save(&wallet).unwrap();

        assert_eq!(observer.snapshot(), Some(wallet.clone()));
        assert_eq!(observer.save_count(), 1);
        assert_eq!(observer.load().unwrap(), wallet);
    }

    #[test]
    fn test_memory_store_failing_writes_keep_previous_state() {
        let store = InMemoryWalletStore::with_wallet(wallet_with(&[1.0]));
        store.set_fail_writes(true);

        let err = store.save(&wallet_with(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(err, ClimaError::Io { .. }));
        assert_eq!(store.load().unwrap().actions().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    // ── End to end ────────────────────────────────────────────────────────────

    /// Submitting through the logger with the built-in rules persists the
    /// estimated action and survives a reload.
    #[test]
    fn test_logger_with_builtin_rules_and_file_store() {
        use climadelv_core::{ActionLogger, DEFAULT_HISTORY_LEN};
        use climadelv_estimate::KeywordEstimator;
        use rand::{rngs::StdRng, SeedableRng};

        let dir = test_dir("end_to_end");
        let path = dir.join("wallet.json");
        let mut rng = StdRng::seed_from_u64(3);
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();

        let mut logger = ActionLogger::open(
            Box::new(KeywordEstimator::builtin().unwrap()),
            Box::new(JsonFileStore::new(&path)),
        )
        .unwrap();
        assert_eq!(logger.summary().action_count, 0);

        let input = ActionInput::new("Planted 30 trees in school ground", 10, 30);
        let outcome = logger.submit_on(today, &input, &mut rng).unwrap();
        assert_eq!(outcome.co2_saved, 660.0);
        assert_eq!(outcome.credits, 660.0);
        assert_eq!(
            outcome.tip,
            "Plant native trees and maintain them for long-term impact."
        );

        let rejected = logger.submit_on(today, &ActionInput::new("", 1, 0), &mut rng);
        assert!(matches!(rejected, Err(ClimaError::Validation { .. })));

        for i in 0..6 {
            let input = ActionInput::new(format!("Home composting week {i}"), 3, 0);
            logger.submit_on(today, &input, &mut rng).unwrap();
        }

        let reloaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(&reloaded, logger.wallet());
        assert_eq!(reloaded.actions().len(), 7);
        assert_eq!(reloaded.total_co2(), 660.0 + 6.0 * 7.5);
        assert!(verify_totals(&reloaded));

        let history = logger.recent_history(DEFAULT_HISTORY_LEN);
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].activity, "Home composting week 5");
        assert_eq!(history[4].activity, "Home composting week 1");

        let _ = fs::remove_dir_all(&dir);
    }
}
