//! Structural comparison and reconciliation of JSON records.
//!
//! A settings file written by an older or newer build may have a different
//! key set than the current schema.  Before the file is turned into a typed
//! [`Settings`](super::settings::Settings) record it is *reconciled*: keys the
//! schema expects but the file lacks are filled from the defaults, and keys the
//! schema does not know are dropped.
//!
//! # Shape vs. type
//!
//! [`similar_structure`] only looks at the *shape* of two values: which keys
//! an object has, and whether each value is an object or not.  Every
//! non-object value (string, number, bool, array, null) counts as the same
//! shape as every other non-object value, so a list can stand in for an
//! integer without tripping it.  The per-field validators in
//! [`SettingKey::validate`](super::settings::SettingKey::validate) close that
//! gap; the shape check stays as the schema-drift guard for nested objects.

use serde_json::{Map, Value};

/// Outcome of [`reconcile`] (and of a full load, which also fills `replaced`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys that were missing and were inserted with their default value.
    pub added: Vec<String>,
    /// Keys that are not part of the schema and were removed.
    pub removed: Vec<String>,
    /// Keys whose value had the wrong type and were reset to the default.
    pub replaced: Vec<String>,
}

impl ReconcileReport {
    /// Returns `true` when reconciliation modified the record.
    pub fn changed(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.replaced.is_empty())
    }
}

/// Returns `true` if `a` and `b` have the same structure.
///
/// Two objects are similar when their key sets are identical and every pair
/// of corresponding values is similar.  Two non-objects are always similar.
/// An object is never similar to a non-object.
pub fn similar_structure(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => similar_objects(a, b),
        (Value::Object(_), _) | (_, Value::Object(_)) => false,
        _ => true,
    }
}

/// [`similar_structure`] for two JSON objects.
pub fn similar_objects(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, value)| match b.get(key) {
            Some(other) => similar_structure(value, other),
            None => false,
        })
}

/// Aligns the key set of `record` with `defaults`.
///
/// Every key in `defaults` that is absent from `record` is inserted with a
/// clone of its default value.  Every key in `record` that is absent from
/// `defaults` is removed.  Values of keys present in both are left untouched.
pub fn reconcile(record: &mut Map<String, Value>, defaults: &Map<String, Value>) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for (key, default_value) in defaults {
        if !record.contains_key(key) {
            record.insert(key.clone(), default_value.clone());
            report.added.push(key.clone());
        }
    }

    // Collect first: the map cannot be mutated while it is being iterated.
    let unknown: Vec<String> = record
        .keys()
        .filter(|key| !defaults.contains_key(key.as_str()))
        .cloned()
        .collect();
    for key in unknown {
        record.remove(&key);
        report.removed.push(key);
    }

    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Settings;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected a JSON object, got {other}"),
        }
    }

    // ── similar_structure ─────────────────────────────────────────────────────

    #[test]
    fn test_identical_records_are_similar() {
        let defaults = Value::Object(Settings::default_record());
        assert!(similar_structure(&defaults, &defaults.clone()));
    }

    #[test]
    fn test_scalars_of_different_types_are_similar() {
        // Scalar types are not part of the shape.
        assert!(similar_structure(&json!([1, 2]), &json!(15)));
        assert!(similar_structure(&json!("text"), &json!(true)));
        assert!(similar_structure(&json!(null), &json!(["a"])));
    }

    #[test]
    fn test_object_and_scalar_are_not_similar() {
        assert!(!similar_structure(&json!({}), &json!(1)));
        assert!(!similar_structure(&json!([]), &json!({ "a": 1 })));
    }

    #[test]
    fn test_objects_with_different_key_sets_are_not_similar() {
        let a = json!({ "a": 1, "b": 2 });
        let b = json!({ "a": 1, "c": 2 });
        assert!(!similar_structure(&a, &b));
    }

    #[test]
    fn test_objects_with_extra_key_are_not_similar() {
        let a = json!({ "a": 1 });
        let b = json!({ "a": 1, "b": 2 });
        assert!(!similar_structure(&a, &b));
        assert!(!similar_structure(&b, &a));
    }

    #[test]
    fn test_nested_shape_mismatch_is_detected() {
        let a = json!({ "outer": { "inner": 1 } });
        let b = json!({ "outer": 1 });
        assert!(!similar_structure(&a, &b));
    }

    #[test]
    fn test_nested_objects_with_matching_keys_are_similar() {
        let a = json!({ "outer": { "inner": [1, 2] } });
        let b = json!({ "outer": { "inner": "x" } });
        assert!(similar_structure(&a, &b));
    }

    // ── reconcile ─────────────────────────────────────────────────────────────

    #[test]
    fn test_reconcile_is_noop_for_complete_record() {
        // Arrange
        let defaults = Settings::default_record();
        let mut record = defaults.clone();

        // Act
        let report = reconcile(&mut record, &defaults);

        // Assert
        assert!(!report.changed());
        assert_eq!(record, defaults);
    }

    #[test]
    fn test_reconcile_fills_missing_keys_from_defaults() {
        // Arrange
        let defaults = Settings::default_record();
        let mut record = object(json!({ "directories": ["D:/Photos"] }));

        // Act
        let report = reconcile(&mut record, &defaults);

        // Assert
        assert!(report.changed());
        assert_eq!(report.added.len(), 3);
        assert!(report.removed.is_empty());
        assert_eq!(record["directories"], json!(["D:/Photos"]));
        assert_eq!(record["interval_seconds"], json!(15));
        assert_eq!(record["only_high_res"], json!(true));
    }

    #[test]
    fn test_reconcile_drops_unknown_keys() {
        // Arrange
        let defaults = Settings::default_record();
        let mut record = defaults.clone();
        record.insert("foo".to_string(), json!(1));

        // Act
        let report = reconcile(&mut record, &defaults);

        // Assert
        assert_eq!(report.removed, vec!["foo".to_string()]);
        assert!(!record.contains_key("foo"));
        assert!(similar_objects(&record, &defaults));
    }

    #[test]
    fn test_reconcile_keeps_existing_values_even_if_mistyped() {
        // Type repair is a separate step; reconcile only aligns keys.
        let defaults = Settings::default_record();
        let mut record = defaults.clone();
        record.insert("interval_seconds".to_string(), json!("soon"));

        let report = reconcile(&mut record, &defaults);

        assert!(!report.changed());
        assert_eq!(record["interval_seconds"], json!("soon"));
    }

    #[test]
    fn test_reconcile_empty_record_becomes_defaults() {
        let defaults = Settings::default_record();
        let mut record = Map::new();

        let report = reconcile(&mut record, &defaults);

        assert_eq!(report.added.len(), defaults.len());
        assert_eq!(record, defaults);
    }
}
