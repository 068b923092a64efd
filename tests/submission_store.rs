//! Submission Store Tests
//!
//! - Listing defaults, clamping and ordering
//! - Rejected writes leave the store untouched
//! - Concurrent writers never lose a submission

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use chrono::{Duration, TimeZone, Utc};
use formbase::schema::employee_onboarding;
use formbase::store::{
    InMemorySubmissionStore, ListQuery, SortOrder, SteppingClock, SubmissionData, SubmissionStore,
    DEFAULT_LIMIT,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn stepping_store() -> InMemorySubmissionStore {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    InMemorySubmissionStore::with_clock(
        Arc::new(employee_onboarding()),
        Arc::new(SteppingClock::new(start, Duration::minutes(1))),
    )
}

fn payload(name: &str) -> SubmissionData {
    match json!({
        "fullName": name,
        "email": "person@example.com",
        "department": "finance",
        "skills": ["Rust"],
        "joiningDate": "2023-06-15"
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_empty_store_has_one_page() {
    let page = stepping_store()
        .list(&ListQuery::new(1, 5, SortOrder::Desc))
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_pages, 1);
}

#[test]
fn test_garbage_params_fall_back_to_defaults() {
    let query = ListQuery::from_params(&params(&[
        ("page", "first"),
        ("limit", "-3"),
        ("sortOrder", "sideways"),
    ]));
    assert_eq!(query, ListQuery::default());
    assert_eq!(query.limit, DEFAULT_LIMIT);
    assert_eq!(query.sort_order, SortOrder::Desc);
}

#[test]
fn test_page_clamped_to_last() {
    let store = stepping_store();
    for i in 0..8 {
        store.create(payload(&format!("Member {}", i))).unwrap();
    }

    let page = store
        .list(&ListQuery::from_params(&params(&[("page", "999")])))
        .unwrap();

    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.pagination.total_items, 8);
    // Newest first: the last page holds the three oldest.
    let names: Vec<_> = page.data.iter().map(|s| s.data["fullName"].clone()).collect();
    assert_eq!(names, [json!("Member 2"), json!("Member 1"), json!("Member 0")]);
}

#[test]
fn test_asc_and_desc_are_reversed() {
    let store = stepping_store();
    for name in ["Alpha", "Bravo", "Charlie"] {
        store.create(payload(name)).unwrap();
    }

    let ids = |order| -> Vec<String> {
        store
            .list(&ListQuery::new(1, 10, order))
            .unwrap()
            .data
            .into_iter()
            .map(|s| s.id)
            .collect()
    };

    let asc = ids(SortOrder::Asc);
    let mut desc = ids(SortOrder::Desc);
    desc.reverse();
    assert_eq!(asc.len(), 3);
    assert_eq!(asc, desc);
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_update_unknown_id_leaves_store_unchanged() {
    let store = stepping_store();
    let existing = store.create(payload("Existing Person")).unwrap();

    assert!(store
        .update("00000000-0000-0000-0000-000000000000", payload("Someone Else"))
        .unwrap_err()
        .is_not_found());

    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.get(&existing.id).unwrap(), existing);
}

#[test]
fn test_invalid_update_reports_all_failing_fields() {
    let store = stepping_store();
    let created = store.create(payload("Valid Name")).unwrap();

    let mut bad = payload("Valid Name");
    bad.insert("email".into(), json!("not-an-email"));
    bad.insert("age".into(), json!(99));

    let err = store.update(&created.id, bad).unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["email", "age"]);
    assert_eq!(store.get(&created.id).unwrap(), created);
}

#[test]
fn test_delete_twice() {
    let store = stepping_store();
    let created = store.create(payload("Short Lived")).unwrap();

    store.delete(&created.id).unwrap();
    assert!(store.delete(&created.id).unwrap_err().is_not_found());
    assert!(store.is_empty().unwrap());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_creates_are_all_kept() {
    let store = Arc::new(InMemorySubmissionStore::new(Arc::new(employee_onboarding())));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    store.create(payload(&format!("Worker {} #{}", t, i))).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len().unwrap(), 200);
    let page = store.list(&ListQuery::new(1, 500, SortOrder::Asc)).unwrap();
    assert_eq!(page.data.len(), 200);
}
