//! Typed field paths and the per-wizard form state.
//!
//! Form fields are addressed by a [`FieldPath`] rather than a raw dotted
//! string, so a typo'd path is a parse error instead of a silently no-op
//! validation. The dotted rendering (`medicalProviders.0.name`,
//! `signatures.clientSignature`) is the canonical key used both in
//! [`FormState`] and on the wire.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::dates::normalize_date;
use crate::error::CoreError;

/// Address of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldPath {
    /// A top-level field, e.g. `patientName`.
    Field(String),
    /// An entry field inside a repeated group, e.g. `medicalProviders.0.name`.
    Indexed {
        group: String,
        index: usize,
        field: String,
    },
    /// A key inside a grouped object (checkbox groups, signature blocks),
    /// e.g. `signatures.clientSignature`.
    Keyed { group: String, key: String },
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        FieldPath::Field(name.into())
    }

    pub fn indexed(group: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        FieldPath::Indexed {
            group: group.into(),
            index,
            field: field.into(),
        }
    }

    pub fn keyed(group: impl Into<String>, key: impl Into<String>) -> Self {
        FieldPath::Keyed {
            group: group.into(),
            key: key.into(),
        }
    }

    /// The canonical dotted rendering used as the FormState and wire key.
    pub fn dotted(&self) -> String {
        match self {
            FieldPath::Field(name) => name.clone(),
            FieldPath::Indexed {
                group,
                index,
                field,
            } => format!("{group}.{index}.{field}"),
            FieldPath::Keyed { group, key } => format!("{group}.{key}"),
        }
    }

    /// Parse a dotted key back into a typed path.
    ///
    /// Two segments are a keyed group; three segments with a numeric middle
    /// are a repeated-group entry. Anything else is malformed.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CoreError::MalformedPath(raw.to_string()));
        }
        match segments.as_slice() {
            [name] => Ok(FieldPath::field(*name)),
            [group, key] => Ok(FieldPath::keyed(*group, *key)),
            [group, index, field] => {
                let index: usize = index
                    .parse()
                    .map_err(|_| CoreError::MalformedPath(raw.to_string()))?;
                Ok(FieldPath::indexed(*group, index, *field))
            }
            _ => Err(CoreError::MalformedPath(raw.to_string())),
        }
    }

    /// The top-level field or group name this path belongs to.
    pub fn root(&self) -> &str {
        match self {
            FieldPath::Field(name) => name,
            FieldPath::Indexed { group, .. } => group,
            FieldPath::Keyed { group, .. } => group,
        }
    }
}

/// The complete in-memory field-value mapping for one wizard instance.
///
/// Flat: nested and repeated fields use dotted keys, matching the wire layout
/// of a persisted draft record. Owned exclusively by one wizard engine; never
/// shared across instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormState {
    fields: BTreeMap<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.fields.get(&path.dotted())
    }

    pub fn get_dotted(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, path: &FieldPath, value: Value) {
        self.fields.insert(path.dotted(), value);
    }

    pub fn set_dotted(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, path: &FieldPath) -> Option<Value> {
        self.fields.remove(&path.dotted())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of entries present in a repeated group: one past the highest
    /// index seen among `group.N.*` keys, or 0 if none are present.
    pub fn group_len(&self, group: &str) -> usize {
        self.group_indices(group)
            .last()
            .map_or(0, |max| max + 1)
    }

    /// The distinct entry indices actually present in a repeated group,
    /// sorted ascending. Groups can be sparse: deleting a middle entry
    /// leaves a gap, and a resumed record may carry stray high indices.
    pub fn group_indices(&self, group: &str) -> Vec<usize> {
        let prefix = format!("{group}.");
        let indices: BTreeSet<usize> = self
            .fields
            .keys()
            .filter_map(|key| {
                let rest = key.strip_prefix(&prefix)?;
                let (index, _) = rest.split_once('.')?;
                index.parse::<usize>().ok()
            })
            .collect();
        indices.into_iter().collect()
    }

    /// Merge a previously saved record into this state, field by field.
    ///
    /// Present keys override defaults; `null` values are skipped so the
    /// default survives. Keys satisfying `is_date_field` are normalized to
    /// `YYYY-MM-DD` when possible. Unknown keys are kept — the record may
    /// have been written by an earlier iteration of the form, and dropping
    /// them would lose data on the next save.
    pub fn merge_initial<F>(&mut self, initial: &serde_json::Map<String, Value>, is_date_field: F)
    where
        F: Fn(&str) -> bool,
    {
        for (key, value) in initial {
            if value.is_null() {
                continue;
            }
            let mut value = value.clone();
            if is_date_field(key)
                && let Some(raw) = value.as_str()
                && let Some(normalized) = normalize_date(raw)
            {
                value = Value::String(normalized);
            }
            self.fields.insert(key.clone(), value);
        }
    }

    /// All fields as a JSON object, the shape every save transmits.
    pub fn to_wire(&self) -> serde_json::Map<String, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for FormState {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
