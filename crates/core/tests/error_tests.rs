// ═══════════════════════════════════════════════════════════════════
// Error Tests — messages and conversions
// ═══════════════════════════════════════════════════════════════════

use coin_ledger_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn ledger_errors() {
        assert_eq!(
            CoreError::TransactionNotFound { index: 4, len: 2 }.to_string(),
            "No transaction at index 4 (ledger holds 2)"
        );
        assert_eq!(
            CoreError::NoTransactionInEdit.to_string(),
            "No transaction is being edited"
        );
        assert_eq!(
            CoreError::TransactionInvalid { index: 0 }.to_string(),
            "Transaction at index 0 has invalid fields and cannot be saved"
        );
    }

    #[test]
    fn api_error_names_provider() {
        let err = CoreError::Api {
            provider: "CoinsEndpoint".into(),
            message: "HTTP 503".into(),
        };
        assert_eq!(err.to_string(), "API error (CoinsEndpoint): HTTP 503");
    }

    #[test]
    fn bus_closed() {
        assert_eq!(CoreError::BusClosed.to_string(), "Message bus is closed");
    }
}

mod conversions {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("denied")));
    }

    #[test]
    fn json_error_becomes_deserialization() {
        let json = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(err.to_string().starts_with("Deserialization error: "));
    }
}
