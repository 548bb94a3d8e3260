use rust_decimal::Decimal;

use contalog::{
    core::store::{LedgerError, LedgerStore},
    persist::memory::MemoryBackend,
    record::{ObligationDraft, RecordDraft, VacationDraft},
    types::{Cell, RecordKind},
};

fn open_store() -> LedgerStore {
    LedgerStore::open(Box::new(MemoryBackend::new())).expect("open")
}

fn payable(id: &str) -> RecordDraft {
    RecordDraft::Payable(ObligationDraft {
        id: id.to_string(),
        category: "fixa".to_string(),
        bank: "X".to_string(),
        date: "2024-01-01".to_string(),
        amount: "100".to_string(),
        payment_control: "ok".to_string(),
        due_date: "2024-02-01".to_string(),
        alert: None,
    })
}

fn vacation(id: &str, name: &str) -> RecordDraft {
    RecordDraft::Vacation(VacationDraft {
        id: id.to_string(),
        name: name.to_string(),
        start_date: "2024-07-01".to_string(),
        end_date: "2024-07-15".to_string(),
        category: "annual".to_string(),
    })
}

fn row_id(row: &[Cell]) -> &str {
    row.first().and_then(Cell::as_text).expect("id cell")
}

#[test]
fn insert_then_list_yields_exactly_one_matching_row() {
    let mut store = open_store();
    store.insert(payable("P1")).expect("insert");

    let rows = store.list(RecordKind::Payable).expect("list");
    assert_eq!(rows.len(), 2); // header plus the record

    let expected = vec![
        Cell::text("P1"),
        Cell::text(""),
        Cell::text("2024-02-01"),
        Cell::text("ok"),
        Cell::number(Decimal::from(100)),
        Cell::text("2024-01-01"),
        Cell::text("X"),
        Cell::text("fixa"),
    ];
    assert_eq!(rows[1], expected);
    assert_eq!(rows.iter().filter(|r| **r == expected).count(), 1);
}

#[test]
fn list_includes_header_row_at_position_zero() {
    let store = open_store();
    let rows = store.list(RecordKind::Payable).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(row_id(&rows[0]), "id");
}

#[test]
fn duplicate_id_fails_and_leaves_table_unchanged() {
    let mut store = open_store();
    store.insert(payable("P1")).expect("first insert");
    let before = store.list(RecordKind::Payable).expect("list");

    let err = store.insert(payable("P1")).expect_err("duplicate insert");
    assert!(matches!(err, LedgerError::DuplicateKey(ref id) if id == "P1"));

    let after = store.list(RecordKind::Payable).expect("list");
    assert_eq!(after, before);
}

#[test]
fn missing_required_field_fails_validation_and_appends_nothing() {
    let mut store = open_store();

    let draft = RecordDraft::Payable(ObligationDraft {
        bank: String::new(),
        ..match payable("P1") {
            RecordDraft::Payable(d) => d,
            _ => unreachable!(),
        }
    });
    let err = store.insert(draft).expect_err("missing bank");
    assert!(matches!(err, LedgerError::Validation(_)));

    let rows = store.list(RecordKind::Payable).expect("list");
    assert_eq!(rows.len(), 1); // header only
}

#[test]
fn non_numeric_amount_fails_validation_and_appends_nothing() {
    let mut store = open_store();

    let draft = RecordDraft::Payable(ObligationDraft {
        amount: "cem".to_string(),
        ..match payable("P1") {
            RecordDraft::Payable(d) => d,
            _ => unreachable!(),
        }
    });
    let err = store.insert(draft).expect_err("bad amount");
    assert!(matches!(err, LedgerError::Validation(_)));

    let rows = store.list(RecordKind::Payable).expect("list");
    assert_eq!(rows.len(), 1);
}

#[test]
fn update_replaces_non_key_fields_and_preserves_position() {
    let mut store = open_store();
    store.insert(payable("P1")).expect("insert P1");
    store.insert(payable("P2")).expect("insert P2");

    let replacement = RecordDraft::Payable(ObligationDraft {
        id: "P1".to_string(),
        category: "variavel".to_string(),
        bank: "Y".to_string(),
        date: "2024-03-01".to_string(),
        amount: "250.75".to_string(),
        payment_control: "pending".to_string(),
        due_date: "2024-04-01".to_string(),
        alert: Some("late".to_string()),
    });
    store.update_by_key("P1", replacement).expect("update");

    let rows = store.list(RecordKind::Payable).expect("list");
    assert_eq!(rows.len(), 3);
    assert_eq!(row_id(&rows[1]), "P1"); // position preserved
    assert_eq!(
        rows[1],
        vec![
            Cell::text("P1"),
            Cell::text("late"),
            Cell::text("2024-04-01"),
            Cell::text("pending"),
            Cell::number("250.75".parse().expect("decimal")),
            Cell::text("2024-03-01"),
            Cell::text("Y"),
            Cell::text("variavel"),
        ]
    );
    assert_eq!(row_id(&rows[2]), "P2"); // neighbor untouched
}

#[test]
fn update_missing_id_is_not_found_and_leaves_table_unchanged() {
    let mut store = open_store();
    store.insert(payable("P1")).expect("insert");
    let before = store.list(RecordKind::Payable).expect("list");

    let err = store
        .update_by_key("P9", payable("P9"))
        .expect_err("absent id");
    assert!(matches!(err, LedgerError::NotFound(ref id) if id == "P9"));

    let after = store.list(RecordKind::Payable).expect("list");
    assert_eq!(after, before);
}

#[test]
fn delete_removes_exactly_one_row_and_preserves_order() {
    let mut store = open_store();
    store.insert(payable("P1")).expect("insert P1");
    store.insert(payable("P2")).expect("insert P2");
    store.insert(payable("P3")).expect("insert P3");

    store
        .delete_by_key(RecordKind::Payable, "P2")
        .expect("delete");

    let rows = store.list(RecordKind::Payable).expect("list");
    let ids: Vec<&str> = rows.iter().map(|r| row_id(r)).collect();
    assert_eq!(ids, vec!["id", "P1", "P3"]);
}

#[test]
fn delete_missing_id_is_not_found() {
    let mut store = open_store();
    let err = store
        .delete_by_key(RecordKind::Payable, "P1")
        .expect_err("absent id");
    assert!(matches!(err, LedgerError::NotFound(ref id) if id == "P1"));
}

#[test]
fn vacation_rows_use_their_own_column_order() {
    let mut store = open_store();
    store.insert(vacation("V1", "Ana")).expect("insert");

    let rows = store.list(RecordKind::Vacation).expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        vec![
            Cell::text("V1"),
            Cell::text("Ana"),
            Cell::text("2024-07-01"),
            Cell::text("2024-07-15"),
            Cell::text("annual"),
        ]
    );
}

#[test]
fn kind_tables_are_disjoint() {
    let mut store = open_store();
    store.insert(payable("A1")).expect("payable");
    store
        .insert(RecordDraft::Receivable(match payable("A1") {
            RecordDraft::Payable(d) => d,
            _ => unreachable!(),
        }))
        .expect("same id in receivables is fine");

    store
        .delete_by_key(RecordKind::Payable, "A1")
        .expect("delete payable");

    let receivables = store.list(RecordKind::Receivable).expect("list");
    assert_eq!(receivables.len(), 2);
    assert_eq!(row_id(&receivables[1]), "A1");
}

#[test]
fn attach_without_provisioning_reports_unavailable() {
    let mut store = LedgerStore::attach(Box::new(MemoryBackend::new()));

    let err = store.list(RecordKind::Payable).expect_err("no table");
    assert!(matches!(err, LedgerError::Unavailable(ref t) if t == "Payables"));

    let err = store.insert(payable("P1")).expect_err("no table");
    assert!(matches!(err, LedgerError::Unavailable(_)));
}
