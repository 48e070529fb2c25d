//! Generic collection operations over an in-memory [`Document`].
//!
//! These functions only mutate the document they are handed. Loading and
//! persisting happen in [`Database`](crate::Database), which wraps every
//! mutation in one read-modify-write cycle.
//!
//! Collections are small (hundreds of records), so lookups are linear scans
//! on the exact `id` string.

use serde_json::{Map, Value};
use sitedata_core::{
    generate_id, now_iso, position_of, type_name, Document, Error, Record, Result,
    CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD,
};

/// Records of `collection`; empty if the collection is absent.
pub fn list(document: &Document, collection: &str) -> Vec<Value> {
    document.collection(collection).cloned().unwrap_or_default()
}

/// The record with `id`.
pub fn find(document: &Document, collection: &str, id: &str) -> Result<Record> {
    document
        .collection(collection)
        .and_then(|items| position_of(items, id).map(|pos| &items[pos]))
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| Error::not_found(collection, id))
}

/// Push `record` to the tail of `collection` and return it finalized.
///
/// An absent, null or empty `id` is replaced by a generated one placed
/// first in the record. `createdAt` is always the server's clock.
pub fn append(document: &mut Document, collection: &str, record: Record) -> Result<Record> {
    let items = document.collection_mut(collection)?;

    let needs_id = match record.get(ID_FIELD) {
        None | Some(Value::Null) => true,
        Some(Value::String(id)) if id.is_empty() => true,
        Some(Value::String(id)) => {
            if position_of(items, id).is_some() {
                return Err(Error::invalid_input(format!(
                    "a record with id {id} already exists in {collection}"
                )));
            }
            false
        }
        Some(other) => {
            return Err(Error::invalid_input(format!(
                "id must be a string, found {}",
                type_name(other)
            )))
        }
    };

    let mut record = if needs_id {
        with_id_first(generate_id(), record)
    } else {
        record
    };
    record.insert(CREATED_AT_FIELD.to_string(), Value::String(now_iso()));

    items.push(Value::Object(record.clone()));
    Ok(record)
}

/// Shallow-merge `partial` into the record with `id` and stamp `updatedAt`.
///
/// The record keeps its `id` and its position; an `id` key in `partial`
/// is ignored.
pub fn update(
    document: &mut Document,
    collection: &str,
    id: &str,
    partial: Record,
) -> Result<Record> {
    let record = record_mut(document, collection, id)?;
    for (key, value) in partial {
        if key != ID_FIELD {
            record.insert(key, value);
        }
    }
    record.insert(UPDATED_AT_FIELD.to_string(), Value::String(now_iso()));
    Ok(record.clone())
}

/// Delete the record with `id` and return it.
pub fn remove(document: &mut Document, collection: &str, id: &str) -> Result<Record> {
    let pos = locate(document, collection, id)?;
    match document.collection_mut(collection)?.remove(pos) {
        Value::Object(record) => Ok(record),
        _ => Err(Error::not_found(collection, id)),
    }
}

/// Content of singleton `name`; empty if absent.
pub fn singleton(document: &Document, name: &str) -> Record {
    document.singleton(name).cloned().unwrap_or_default()
}

/// Shallow-merge `partial` into singleton `name`, creating it if absent.
pub fn merge_singleton(document: &mut Document, name: &str, partial: Record) -> Result<Record> {
    let object = document.singleton_mut(name)?;
    object.extend(partial);
    Ok(object.clone())
}

fn record_mut<'a>(
    document: &'a mut Document,
    collection: &str,
    id: &str,
) -> Result<&'a mut Map<String, Value>> {
    let pos = locate(document, collection, id)?;
    document.collection_mut(collection)?[pos]
        .as_object_mut()
        .ok_or_else(|| Error::not_found(collection, id))
}

fn locate(document: &Document, collection: &str, id: &str) -> Result<usize> {
    document
        .collection(collection)
        .and_then(|items| position_of(items, id))
        .ok_or_else(|| Error::not_found(collection, id))
}

fn with_id_first(id: String, record: Record) -> Record {
    let mut out = Map::with_capacity(record.len() + 2);
    out.insert(ID_FIELD.to_string(), Value::String(id));
    out.extend(record.into_iter().filter(|(k, _)| k != ID_FIELD));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitedata_core::Schema;

    fn doc() -> Document {
        Schema::default().empty_document()
    }

    fn obj(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn append_generates_id_first_and_stamps_created_at() {
        let mut d = doc();
        let rec = append(
            &mut d,
            "clients",
            obj(json!({"fullName": "Jean Koffi", "email": "jean@x.tg"})),
        )
        .unwrap();

        let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "fullName", "email", "createdAt"]);
        assert_eq!(list(&d, "clients"), vec![Value::Object(rec)]);
    }

    #[test]
    fn append_keeps_supplied_id() {
        let mut d = doc();
        let rec = append(&mut d, "clients", obj(json!({"id": "c-1", "n": 1}))).unwrap();
        assert_eq!(rec["id"], json!("c-1"));
    }

    #[test]
    fn append_replaces_empty_or_null_id() {
        let mut d = doc();
        let a = append(&mut d, "clients", obj(json!({"id": ""}))).unwrap();
        let b = append(&mut d, "clients", obj(json!({"id": null}))).unwrap();
        assert!(!a["id"].as_str().unwrap().is_empty());
        assert!(b["id"].is_string());
    }

    #[test]
    fn append_rejects_duplicate_and_non_string_ids() {
        let mut d = doc();
        append(&mut d, "clients", obj(json!({"id": "dup"}))).unwrap();

        let dup = append(&mut d, "clients", obj(json!({"id": "dup"})));
        assert!(matches!(dup, Err(Error::InvalidInput(_))));

        let numeric = append(&mut d, "clients", obj(json!({"id": 7})));
        assert!(matches!(numeric, Err(Error::InvalidInput(_))));

        assert_eq!(list(&d, "clients").len(), 1);
    }

    #[test]
    fn append_server_clock_wins_for_created_at() {
        let mut d = doc();
        let rec = append(&mut d, "clients", obj(json!({"createdAt": "1999"}))).unwrap();
        assert_ne!(rec["createdAt"], json!("1999"));
    }

    #[test]
    fn append_creates_missing_collection() {
        let mut d = doc();
        append(&mut d, "invoices", obj(json!({"amount": 10}))).unwrap();
        assert_eq!(list(&d, "invoices").len(), 1);
    }

    #[test]
    fn append_preserves_order() {
        let mut d = doc();
        for i in 0..5 {
            append(&mut d, "clients", obj(json!({"id": format!("c{i}")}))).unwrap();
        }
        let ids: Vec<Value> = list(&d, "clients").into_iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("c0"), json!("c1"), json!("c2"), json!("c3"), json!("c4")]);
    }

    #[test]
    fn update_merges_and_stamps() {
        let mut d = doc();
        append(&mut d, "clients", obj(json!({"id": "c", "name": "A", "status": "active"}))).unwrap();

        let rec = update(&mut d, "clients", "c", obj(json!({"status": "inactive"}))).unwrap();
        assert_eq!(rec["name"], json!("A"));
        assert_eq!(rec["status"], json!("inactive"));
        assert!(rec["updatedAt"].is_string());
        assert_eq!(find(&d, "clients", "c").unwrap(), rec);
    }

    #[test]
    fn update_ignores_id_in_partial() {
        let mut d = doc();
        append(&mut d, "clients", obj(json!({"id": "c"}))).unwrap();
        let rec = update(&mut d, "clients", "c", obj(json!({"id": "other"}))).unwrap();
        assert_eq!(rec["id"], json!("c"));
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let mut d = doc();
        append(&mut d, "clients", obj(json!({"id": "c"}))).unwrap();
        let before = d.clone();

        let err = update(&mut d, "clients", "nope", obj(json!({"x": 1}))).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(d, before);
    }

    #[test]
    fn remove_deletes_exactly_one() {
        let mut d = doc();
        append(&mut d, "clients", obj(json!({"id": "a"}))).unwrap();
        append(&mut d, "clients", obj(json!({"id": "b"}))).unwrap();

        let removed = remove(&mut d, "clients", "a").unwrap();
        assert_eq!(removed["id"], json!("a"));
        assert_eq!(list(&d, "clients").len(), 1);
        assert!(find(&d, "clients", "a").is_err());

        assert!(matches!(
            remove(&mut d, "clients", "a"),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(list(&d, "clients").len(), 1);
    }

    #[test]
    fn list_of_unknown_collection_is_empty() {
        assert!(list(&doc(), "nothing").is_empty());
    }

    #[test]
    fn merge_singleton_is_shallow() {
        let mut d = doc();
        let stats = merge_singleton(&mut d, "websiteStats", obj(json!({"totalVisits": 3}))).unwrap();
        assert_eq!(stats["totalVisits"], json!(3));
        assert_eq!(stats["uniqueVisitorCount"], json!(0));
        assert_eq!(singleton(&d, "websiteStats"), stats);
    }
}
