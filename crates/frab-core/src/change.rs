//! Per-refresh change map types.
//!
//! Every merge produces at most one [`TalkChanges`] per pre-existing talk:
//! a map from tracked field name to its old and new value. Brand-new talks
//! never appear in the change map — their creation is implicit.
//!
//! `BTreeMap` keeps the serialized JSON key order deterministic, so the
//! stored audit records are byte-stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Old/new value pair for one tracked field.
///
/// Values are JSON so string fields and the boolean `do_not_record` flag
/// share one representation; absent old values serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

/// Changed fields for a single talk, keyed by field name.
pub type TalkChanges = BTreeMap<String, FieldChange>;

/// All talk changes from one refresh, keyed by talk code.
pub type ChangeMap = BTreeMap<String, TalkChanges>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn change_map_serializes_with_stable_shape() {
        let mut talk = TalkChanges::new();
        talk.insert(
            "title".to_string(),
            FieldChange {
                old: Value::String("A".into()),
                new: Value::String("B".into()),
            },
        );
        let mut map = ChangeMap::new();
        map.insert("B-talk-code".to_string(), talk);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"B-talk-code":{"title":{"old":"A","new":"B"}}}"#
        );
    }

    #[test]
    fn null_old_value_roundtrips() {
        let change = FieldChange {
            old: Value::Null,
            new: Value::String("fresh".into()),
        };
        let json = serde_json::to_string(&change).unwrap();
        let back: FieldChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, change);
    }
}
