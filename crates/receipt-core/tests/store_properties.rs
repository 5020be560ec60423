//! Property-based tests for the receipt store and layout lookup

use proptest::prelude::*;

use receipt_core::{
    FieldLayoutConfig, FieldLayoutEntry, JsonFileStore, ReceiptField, ReceiptRecord, ReceiptStore,
};

// ============================================================
// Strategies
// ============================================================

/// Printable ASCII including quotes and backslashes, plus some accented text
fn field_value() -> impl Strategy<Value = String> {
    prop_oneof!["[ -~]{0,24}", "[a-zA-ZáéíóúñÑ ]{1,16}"]
}

fn receipt_record() -> impl Strategy<Value = ReceiptRecord> {
    (
        field_value(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
        field_value(),
    )
        .prop_map(
            |(date, receipt_number, received_from, amount, payment_method, concept, saldo)| {
                ReceiptRecord {
                    date,
                    receipt_number,
                    received_from,
                    amount,
                    payment_method,
                    concept,
                    saldo,
                }
            },
        )
}

fn unknown_field_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,16}".prop_filter("Must not be a receipt field", |name| {
        name.parse::<ReceiptField>().is_err()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // ============================================================
    // Store Tests
    // ============================================================

    #[test]
    fn append_grows_by_exactly_one(
        existing in proptest::collection::vec(receipt_record(), 0..6),
        new_record in receipt_record()
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("receipts.json"));
        for record in &existing {
            store.append(record.clone()).unwrap();
        }

        let before = store.list_all().unwrap();
        store.append(new_record.clone()).unwrap();
        let after = store.list_all().unwrap();

        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after[..before.len()], &before[..]);
        prop_assert_eq!(after.last(), Some(&new_record));
    }

    #[test]
    fn list_preserves_append_order(records in proptest::collection::vec(receipt_record(), 1..8)) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("receipts.json"));
        for record in &records {
            store.append(record.clone()).unwrap();
        }

        prop_assert_eq!(store.list_all().unwrap(), records);
    }

    #[test]
    fn list_is_idempotent(records in proptest::collection::vec(receipt_record(), 0..5)) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("receipts.json"));
        for record in records {
            store.append(record).unwrap();
        }

        prop_assert_eq!(store.list_all().unwrap(), store.list_all().unwrap());
    }

    #[test]
    fn search_returns_subsequence(
        records in proptest::collection::vec(receipt_record(), 0..6),
        query in "[a-z]{0,3}"
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("receipts.json"));
        for record in &records {
            store.append(record.clone()).unwrap();
        }

        let expected: Vec<ReceiptRecord> = records
            .into_iter()
            .filter(|record| record.matches(&query))
            .collect();
        prop_assert_eq!(store.search(&query).unwrap(), expected);
    }

    // ============================================================
    // Layout Tests
    // ============================================================

    #[test]
    fn unknown_fields_fall_back(name in unknown_field_name()) {
        let layout = FieldLayoutConfig::from_str(
            r#"{"date": {"x": 520, "y": 48, "size": 18}, "saldo": {"x": 600, "y": 400, "size": 16}}"#,
        )
        .unwrap();

        prop_assert_eq!(layout.lookup(&name), FieldLayoutEntry::new(100, 100, 12));
    }

    #[test]
    fn configured_fields_are_returned(x in -500i32..5000, y in -500i32..5000, size in 1u32..200) {
        let entry = FieldLayoutEntry::new(x, y, size);
        for field in ReceiptField::ALL {
            let layout = FieldLayoutConfig::default().with_entry(field.name(), entry);
            prop_assert_eq!(layout.lookup_field(field), entry);
        }
    }
}

// ============================================================
// Scenario Tests (non-property)
// ============================================================

#[test]
fn test_submitted_receipt_is_stored_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("receipts.json"));
    let before = store.list_all().unwrap().len();

    let submitted = ReceiptRecord {
        date: "2024-01-01".to_string(),
        receipt_number: "R001".to_string(),
        received_from: "Jane Doe".to_string(),
        amount: "100.00".to_string(),
        payment_method: "cash".to_string(),
        concept: "rent".to_string(),
        saldo: "0.00".to_string(),
    };
    store.append(submitted.clone()).unwrap();

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), before + 1);
    assert_eq!(records.last(), Some(&submitted));
}
