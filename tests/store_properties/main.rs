//! Property tests for collection operations.
//!
//! Each case runs against a fresh in-memory database so properties hold
//! independently of the document's prior contents.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use proptest::prelude::*;

const COLLECTIONS: [&str; 5] = [
    "clients",
    "jobApplications",
    "serviceRequests",
    "userAccounts",
    "clientRequests",
];

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9 éè@.]{0,16}".prop_map(Value::from),
        prop::collection::vec("[a-z]{0,6}".prop_map(Value::from), 0..3).prop_map(Value::from),
    ]
}

// Field names never collide with the stamped `id`, `createdAt` or `updatedAt`.
fn record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::btree_map("f_[a-z]{1,6}", value_strategy(), 0..6)
        .prop_map(|fields| fields.into_iter().collect())
}

fn collection_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COLLECTIONS.to_vec())
}

fn id_of(record: &Record) -> String {
    record["id"].as_str().unwrap().to_string()
}

proptest! {
    // Property: append then list yields the input plus generated id/createdAt
    #[test]
    fn append_then_list_contains_record(
        collection in collection_strategy(),
        input in record_strategy()
    ) {
        let db = Database::ephemeral();
        let stored = db.append(collection, input.clone()).unwrap();

        let listed = db.list(collection).unwrap();
        prop_assert_eq!(listed.len(), 1);
        let found = listed[0].as_object().unwrap();

        prop_assert!(found["id"].is_string());
        prop_assert!(found["createdAt"].is_string());
        let mut without_stamps = found.clone();
        without_stamps.remove("id");
        without_stamps.remove("createdAt");
        prop_assert_eq!(without_stamps, input);
        prop_assert_eq!(found, &stored);
    }

    // Property: appends keep insertion order and ids stay unique
    #[test]
    fn appends_keep_order(
        collection in collection_strategy(),
        inputs in prop::collection::vec(record_strategy(), 1..8)
    ) {
        let db = Database::ephemeral();
        let ids: Vec<String> = inputs
            .iter()
            .map(|r| id_of(&db.append(collection, r.clone()).unwrap()))
            .collect();

        let listed: Vec<String> = db
            .list(collection)
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(&listed, &ids);

        let unique: std::collections::HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    // Property: update of a missing id reports NotFound and changes nothing
    #[test]
    fn update_missing_id_is_not_found(
        collection in collection_strategy(),
        existing in record_strategy(),
        partial in record_strategy()
    ) {
        let db = Database::ephemeral();
        db.append(collection, existing).unwrap();
        let before = db.list(collection).unwrap();

        let err = db.update(collection, "no-such-id", partial).unwrap_err();
        let is_not_found = matches!(err, sitedata_core::Error::NotFound { .. });
        prop_assert!(is_not_found);
        prop_assert_eq!(db.list(collection).unwrap(), before);
    }

    // Property: update of one key changes only that key and updatedAt
    #[test]
    fn update_changes_only_given_key(
        collection in collection_strategy(),
        existing in record_strategy(),
        key in "f_[a-z]{1,6}",
        value in value_strategy()
    ) {
        let db = Database::ephemeral();
        let stored = db.append(collection, existing).unwrap();
        let id = id_of(&stored);

        let mut partial = Record::new();
        partial.insert(key.clone(), value.clone());
        let updated = db.update(collection, &id, partial).unwrap();

        prop_assert_eq!(&updated[&key], &value);
        prop_assert!(updated["updatedAt"].is_string());
        for (field, original) in &stored {
            if field != &key {
                prop_assert_eq!(&updated[field], original);
            }
        }
        prop_assert_eq!(updated.len(), stored.len() + 1 + usize::from(!stored.contains_key(&key)));
    }

    // Property: remove shrinks the collection by one; removing again is NotFound
    #[test]
    fn remove_drops_exactly_one(
        collection in collection_strategy(),
        inputs in prop::collection::vec(record_strategy(), 1..6),
        pick in any::<prop::sample::Index>()
    ) {
        let db = Database::ephemeral();
        let ids: Vec<String> = inputs
            .into_iter()
            .map(|r| id_of(&db.append(collection, r).unwrap()))
            .collect();
        let target = pick.get(&ids).clone();

        let removed = db.remove(collection, &target).unwrap();
        prop_assert_eq!(id_of(&removed), target.clone());

        let after = db.list(collection).unwrap();
        prop_assert_eq!(after.len(), ids.len() - 1);
        prop_assert!(after.iter().all(|r| r["id"] != Value::String(target.clone())));

        let err = db.remove(collection, &target).unwrap_err();
        let is_not_found = matches!(err, sitedata_core::Error::NotFound { .. });
        prop_assert!(is_not_found);
        prop_assert_eq!(db.list(collection).unwrap().len(), ids.len() - 1);
    }
}
