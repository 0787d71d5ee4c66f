// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStorage, FileStorage, store cache across restart
// ═══════════════════════════════════════════════════════════════════

use coin_ledger_core::errors::CoreError;
use coin_ledger_core::models::coin::{Coin, CoinsData};
use coin_ledger_core::models::settings::Settings;
use coin_ledger_core::storage::file::FileStorage;
use coin_ledger_core::storage::memory::MemoryStorage;
use coin_ledger_core::storage::traits::KeyValueStorage;
use coin_ledger_core::PortfolioStore;

// ═══════════════════════════════════════════════════════════════════
// MemoryStorage
// ═══════════════════════════════════════════════════════════════════

mod memory_storage {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("COINS_DATA").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert!(storage.remove("k").unwrap());
        assert!(!storage.remove("k").unwrap());
        assert_eq!(storage.get("k").unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStorage
// ═══════════════════════════════════════════════════════════════════

mod file_storage {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("cache");
        let storage = FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(storage.dir(), dir.as_path());
    }

    #[test]
    fn missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(storage.get("COINS_DATA").unwrap(), None);
    }

    #[test]
    fn value_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut storage = FileStorage::open(tmp.path()).unwrap();
            storage.set("COINS_DATA", r#"{"data":[]}"#).unwrap();
        }
        let reopened = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(
            reopened.get("COINS_DATA").unwrap().as_deref(),
            Some(r#"{"data":[]}"#)
        );
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
        let names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[test]
    fn remove_deletes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        storage.set("k", "v").unwrap();
        assert!(storage.remove("k").unwrap());
        assert!(!storage.remove("k").unwrap());
        assert!(!tmp.path().join("k.json").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            let err = storage.set(key, "v").unwrap_err();
            assert!(matches!(err, CoreError::Storage(_)), "key {key:?}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Coin cache across a session restart
// ═══════════════════════════════════════════════════════════════════

mod session_restart {
    use super::*;

    #[test]
    fn cached_coin_list_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        let coins = CoinsData {
            added_at: chrono::DateTime::from_timestamp(1_700_000_000, 0),
            extra: Default::default(),
            data: vec![Coin {
                id: "btc".into(),
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                price_usd: 43_000.5,
                last_updated: chrono::DateTime::from_timestamp(1_700_000_100, 0),
                extra: Default::default(),
            }],
        };

        {
            let mut store =
                PortfolioStore::new(FileStorage::open(tmp.path()).unwrap(), Settings::default());
            store.apply_coins_data(Ok(coins.clone()));
        }

        let restarted =
            PortfolioStore::new(FileStorage::open(tmp.path()).unwrap(), Settings::default());
        assert_eq!(restarted.get_coins_data(), coins);
        assert!(restarted.get_portfolio().is_empty());
    }
}
