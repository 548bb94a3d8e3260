use proptest::prelude::*;

use contalog::{
    core::store::{LedgerError, LedgerStore},
    persist::memory::MemoryBackend,
    record::{ObligationDraft, RecordDraft},
    types::{Cell, RecordKind},
};

#[derive(Debug, Clone)]
enum Action {
    Insert { id_idx: u8, amount: u16 },
    Update { target: u8, amount: u16 },
    Delete { target: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..24, 0u16..5000).prop_map(|(id_idx, amount)| Action::Insert { id_idx, amount }),
        (0u8..24, 0u16..5000).prop_map(|(target, amount)| Action::Update { target, amount }),
        (0u8..24).prop_map(|target| Action::Delete { target }),
    ]
}

fn draft_from(id: &str, amount: u16) -> RecordDraft {
    RecordDraft::Payable(ObligationDraft {
        id: id.to_string(),
        category: "fixa".to_string(),
        bank: "X".to_string(),
        date: "2024-01-01".to_string(),
        amount: amount.to_string(),
        payment_control: "ok".to_string(),
        due_date: "2024-02-01".to_string(),
        alert: None,
    })
}

fn stored_ids(store: &LedgerStore) -> Vec<String> {
    store
        .list(RecordKind::Payable)
        .expect("list")
        .iter()
        .skip(1) // header row
        .map(|row| {
            row.first()
                .and_then(Cell::as_text)
                .expect("id cell")
                .to_string()
        })
        .collect()
}

proptest! {
    #[test]
    fn random_sequences_track_a_simple_ordered_model(actions in prop::collection::vec(action_strategy(), 1..200)) {
        let mut store = LedgerStore::open(Box::new(MemoryBackend::new())).expect("open");
        let mut model = Vec::<String>::new();

        for action in actions {
            match action {
                Action::Insert { id_idx, amount } => {
                    let id = format!("P{id_idx}");
                    match store.insert(draft_from(&id, amount)) {
                        Ok(()) => {
                            prop_assert!(!model.contains(&id));
                            model.push(id);
                        }
                        Err(LedgerError::DuplicateKey(dup)) => {
                            prop_assert_eq!(&dup, &id);
                            prop_assert!(model.contains(&id));
                        }
                        Err(other) => prop_assert!(false, "unexpected insert error: {other:?}"),
                    }
                }
                Action::Update { target, amount } => {
                    if model.is_empty() {
                        let err = store
                            .update_by_key("P0", draft_from("P0", amount))
                            .expect_err("empty table");
                        prop_assert!(matches!(err, LedgerError::NotFound(_)));
                        continue;
                    }
                    let id = model[usize::from(target) % model.len()].clone();
                    store
                        .update_by_key(&id, draft_from(&id, amount))
                        .expect("update existing");
                }
                Action::Delete { target } => {
                    if model.is_empty() {
                        let err = store
                            .delete_by_key(RecordKind::Payable, "P0")
                            .expect_err("empty table");
                        prop_assert!(matches!(err, LedgerError::NotFound(_)));
                        continue;
                    }
                    let slot = usize::from(target) % model.len();
                    let id = model.remove(slot);
                    store
                        .delete_by_key(RecordKind::Payable, &id)
                        .expect("delete existing");
                }
            }

            // Store order always mirrors insertion order minus deletions.
            prop_assert_eq!(stored_ids(&store), model.clone());
        }
    }

    #[test]
    fn any_valid_amount_text_round_trips_through_a_row(amount in 0u32..1_000_000u32, cents in 0u8..100u8) {
        let mut store = LedgerStore::open(Box::new(MemoryBackend::new())).expect("open");
        let text = format!("{amount}.{cents:02}");
        store.insert(draft_from("P1", 0)).expect("seed");
        store
            .update_by_key("P1", RecordDraft::Payable(ObligationDraft {
                amount: text.clone(),
                ..match draft_from("P1", 0) {
                    RecordDraft::Payable(d) => d,
                    _ => unreachable!(),
                }
            }))
            .expect("update amount");

        let rows = store.list(RecordKind::Payable).expect("list");
        prop_assert_eq!(
            &rows[1][4],
            &Cell::number(text.parse().expect("decimal"))
        );
    }
}
