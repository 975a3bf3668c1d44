//! Partial record updates keyed by dotted paths.
//!
//! An [`UpdateSet`] is what the rules hand back to the host: a batch of field
//! assignments such as `system.resources.wounds.value = 3`, applied to one
//! record at once.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{RecordError, RecordResult};

/// A batch of dotted-path field assignments for a single record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    fields: BTreeMap<String, Value>,
}

impl UpdateSet {
    /// Create an empty update set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style assignment.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(path, value);
        self
    }

    /// Assign a field, replacing any earlier assignment to the same path.
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(path.into(), value.into());
    }

    /// The value assigned to a path, if any.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    /// Integer value assigned to a path, if any.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    /// Returns true if nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate assignments in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply every assignment to a JSON document, creating intermediate
    /// objects where a path does not exist yet.
    pub fn apply_to_value(&self, doc: &mut Value) -> RecordResult<()> {
        for (path, value) in &self.fields {
            set_path(doc, path, value.clone())?;
        }
        Ok(())
    }

    /// Apply every assignment to a typed record by way of its JSON shape.
    ///
    /// Either all assignments land or the record is left untouched.
    pub fn apply_to<T>(&self, record: &mut T) -> RecordResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut doc = serde_json::to_value(&*record)?;
        self.apply_to_value(&mut doc)?;
        *record = serde_json::from_value(doc)?;
        Ok(())
    }
}

impl FromIterator<(String, Value)> for UpdateSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn set_path(doc: &mut Value, path: &str, value: Value) -> RecordResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(RecordError::EmptyPath(path.to_string()));
    }
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| RecordError::EmptyPath(path.to_string()))?;

    let mut cursor = doc;
    for segment in parents {
        if cursor.is_null() {
            *cursor = Value::Object(Map::new());
        }
        let Value::Object(map) = cursor else {
            return Err(RecordError::InvalidPath {
                path: path.to_string(),
                segment: (*segment).to_string(),
            });
        };
        cursor = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if cursor.is_null() {
        *cursor = Value::Object(Map::new());
    }
    let Value::Object(map) = cursor else {
        return Err(RecordError::InvalidPath {
            path: path.to_string(),
            segment: parents.last().map_or_else(String::new, |s| (*s).to_string()),
        });
    };
    map.insert((*last).to_string(), value);
    Ok(())
}
