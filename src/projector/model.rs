use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::dispatch::Projection;
use super::value::{ProjectionError, Value};

/// A single struct field. One declaration may introduce several names
/// sharing a type (`A, B int`); embedded fields have no names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw tag literal including its delimiters, empty when the field has none.
    pub tag: String,
}

impl Field {
    /// Tag contents without the surrounding backticks or double quotes.
    pub fn unquoted_tag(&self) -> &str {
        let tag = self.tag.as_str();
        for delim in ['`', '"'] {
            if tag.len() >= 2 && tag.starts_with(delim) && tag.ends_with(delim) {
                return &tag[1..tag.len() - 1];
            }
        }
        tag
    }

    /// Value stored under `key` in a conventional `key:"value"` tag.
    pub fn tag_lookup(&self, key: &str) -> Option<&str> {
        let mut rest = self.unquoted_tag();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                return None;
            }

            let colon = rest.find(':')?;
            let name = &rest[..colon];
            if name.is_empty() || name.contains(|c: char| c == ' ' || c == '"' || c.is_control()) {
                return None;
            }

            let value_part = rest[colon + 1..].strip_prefix('"')?;
            let close = closing_quote(value_part)?;
            if name == key {
                return Some(&value_part[..close]);
            }
            rest = &value_part[close + 1..];
        }
    }

    /// Whether this is an embedded field.
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// A named aggregate with its ordered fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    pub name: String,
    pub fields: Vec<Field>,
}

impl DataRecord {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.names.iter().any(|n| n == name))
    }
}

/// Record name to record. A later record with the same name replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCatalog {
    records: BTreeMap<String, DataRecord>,
}

impl RecordCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, record: DataRecord) -> Option<DataRecord> {
        let previous = self.records.insert(record.name.clone(), record);
        if let Some(previous) = &previous {
            debug!("record {} redeclared, keeping the later declaration", previous.name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&DataRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataRecord> {
        self.records.values()
    }
}

impl IntoIterator for RecordCatalog {
    type Item = (String, DataRecord);
    type IntoIter = std::collections::btree_map::IntoIter<String, DataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl Projection for RecordCatalog {
    const VISITS_ROUTINES: bool = false;

    fn type_spec(&mut self, name: String, underlying: Value) {
        if let Value::RecordShape(mut record) = underlying {
            info!("found model: {}", name);
            record.name = name;
            self.insert(record);
        }
    }

    fn field_list(&self, fields: Vec<Value>) -> Result<Value, ProjectionError> {
        let fields = fields
            .into_iter()
            .map(|value| value.into_field("field list entry"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Value::RecordShape(DataRecord {
            name: String::new(),
            fields,
        }))
    }

    fn field(
        &self,
        names: Vec<Value>,
        type_value: Value,
        tag: Option<Value>,
    ) -> Result<Value, ProjectionError> {
        let names = names
            .into_iter()
            .map(|value| value.into_text("field name"))
            .collect::<Result<Vec<_>, _>>()?;
        let type_name = type_value.into_text("field type")?;
        let tag = match tag {
            Some(tag) => tag.into_text("field tag")?,
            None => String::new(),
        };

        Ok(Value::Field(Field {
            names,
            type_name,
            tag,
        }))
    }

    fn absorb(&mut self, other: Self) {
        for (_, record) in other {
            self.insert(record);
        }
    }
}
