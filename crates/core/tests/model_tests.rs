// ═══════════════════════════════════════════════════════════════════
// Model Tests — Intent wire format, CoinsData, CoinRef, Transaction, Settings
// ═══════════════════════════════════════════════════════════════════

use coin_ledger_core::models::coin::{Coin, CoinRef, CoinsData};
use coin_ledger_core::models::intent::Intent;
use coin_ledger_core::models::portfolio::Portfolio;
use coin_ledger_core::models::settings::{Settings, DEFAULT_COINS_CACHE_KEY};
use coin_ledger_core::models::transaction::{Transaction, TransactionField};

// ── Intent ──────────────────────────────────────────────────────────

mod intent {
    use super::*;

    #[test]
    fn decodes_named_messages() {
        let cases = [
            (r#"{"type":"ADD_TRANSACTION"}"#, Intent::AddTransaction),
            (r#"{"type":"REMOVE_TRANSACTION","data":2}"#, Intent::RemoveTransaction(2)),
            (r#"{"type":"EDIT_TRANSACTION","data":0}"#, Intent::EditTransaction(0)),
            (
                r#"{"type":"TRANSACTION_COIN_CHANGED","data":"btc"}"#,
                Intent::TransactionCoinChanged(Some("btc".into())),
            ),
            (
                r#"{"type":"TRANSACTION_COIN_CHANGED","data":null}"#,
                Intent::TransactionCoinChanged(None),
            ),
            (
                r#"{"type":"TRANSACTION_UNITS_CHANGED","data":"1.5"}"#,
                Intent::TransactionUnitsChanged("1.5".into()),
            ),
            (
                r#"{"type":"TRANSACTION_INITIAL_PRICE_CHANGED","data":"20"}"#,
                Intent::TransactionInitialPriceChanged("20".into()),
            ),
            (r#"{"type":"SAVE_TRANSACTION"}"#, Intent::SaveTransaction),
            (r#"{"type":"CANCEL_TRANSACTION"}"#, Intent::CancelTransaction),
            (r#"{"type":"FETCH_COINS_DATA"}"#, Intent::FetchCoinsData),
        ];

        for (json, expected) in cases {
            let decoded: Intent = serde_json::from_str(json).unwrap();
            assert_eq!(decoded, expected, "decoding {json}");
        }
    }

    #[test]
    fn name_matches_wire_tag() {
        let intents = [
            Intent::AddTransaction,
            Intent::RemoveTransaction(1),
            Intent::TransactionInitialPriceChanged("3".into()),
            Intent::FetchCoinsData,
        ];
        for intent in intents {
            let value = serde_json::to_value(&intent).unwrap();
            assert_eq!(value["type"], intent.name());
            assert_eq!(intent.to_string(), intent.name());
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let result: Result<Intent, _> = serde_json::from_str(r#"{"type":"DELETE_EVERYTHING"}"#);
        assert!(result.is_err());
    }
}

// ── Coins ───────────────────────────────────────────────────────────

mod coins {
    use super::*;

    fn btc() -> Coin {
        Coin {
            id: "bitcoin".into(),
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            price_usd: 42_000.0,
            last_updated: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn default_is_empty_sentinel() {
        let coins = CoinsData::default();
        assert!(coins.is_empty());
        assert!(coins.added_at.is_none());
    }

    #[test]
    fn find_and_price_of() {
        let coins = CoinsData {
            added_at: None,
            extra: Default::default(),
            data: vec![btc()],
        };
        assert_eq!(coins.find("bitcoin").map(|c| c.symbol.as_str()), Some("BTC"));
        assert_eq!(coins.price_of("bitcoin"), Some(42_000.0));
        assert_eq!(coins.price_of("dogecoin"), None);
    }

    #[test]
    fn payload_with_missing_optional_fields_decodes() {
        let coins: CoinsData =
            serde_json::from_str(r#"{"data":[{"id":"eth","name":"Ethereum","symbol":"ETH"}]}"#)
                .unwrap();
        assert!(coins.added_at.is_none());
        assert_eq!(coins.data[0].price_usd, 0.0);
        assert!(coins.data[0].last_updated.is_none());
    }

    #[test]
    fn coin_ref_label() {
        let r = CoinRef::from_coin(&btc());
        assert_eq!(r.id, "bitcoin");
        assert_eq!(r.label, "Bitcoin (BTC)");
        assert_eq!(r.symbol, "BTC");
        assert!(r.is_selected());
    }

    #[test]
    fn coin_ref_selection() {
        assert!(!CoinRef::default().is_selected());
        assert!(CoinRef::from_id("x").is_selected());
    }
}

// ── Transaction & Portfolio ─────────────────────────────────────────

mod transaction {
    use super::*;

    #[test]
    fn drafts_have_distinct_ids() {
        let a = Transaction::new_draft();
        let b = Transaction::new_draft();
        assert_ne!(a.id, b.id);
        assert!(!a.is_valid());
        assert!(!a.has_been_saved());
    }

    #[test]
    fn field_names() {
        assert_eq!(TransactionField::Coin.to_string(), "coin");
        assert_eq!(TransactionField::Units.to_string(), "units");
        assert_eq!(TransactionField::InitialPrice.to_string(), "initial-price");
        assert_eq!(TransactionField::default(), TransactionField::Coin);
    }

    #[test]
    fn editing_index() {
        let mut portfolio = Portfolio::new();
        assert_eq!(portfolio.editing_index(), None);

        let mut saved = Transaction::new_draft();
        saved.edit_mode = false;
        portfolio.transactions.push(saved);
        portfolio.transactions.push(Transaction::new_draft());

        assert_eq!(portfolio.editing_index(), Some(1));
        assert_eq!(portfolio.len(), 2);
        assert!(portfolio.get(2).is_none());
    }
}

// ── Settings ────────────────────────────────────────────────────────

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.coins_cache_key, DEFAULT_COINS_CACHE_KEY);
        assert_eq!(s.coins_cache_key, "COINS_DATA");
        assert!(s.coins_endpoint.ends_with("/api/coins"));
    }

    #[test]
    fn serde_round_trip() {
        let s = Settings {
            coins_endpoint: "https://example.test/coins".into(),
            coins_cache_key: "K".into(),
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
