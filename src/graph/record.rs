//! Result records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::value::GraphValue;

/// One row of a query result: field names mapped to values, in order.
///
/// Records decoded from the Bolt driver are ordered by field name, not by
/// the `RETURN` clause: `return n,r,m` yields `m`, `n`, `r`. The driver
/// hands rows over as unordered maps.
///
/// # Example
///
/// ```
/// use boltrun::graph::{GraphValue, Record};
///
/// let record = Record::from_iter([
///     ("n", GraphValue::Int(1)),
///     ("m", GraphValue::Int(2)),
/// ]);
/// assert_eq!(record.keys().collect::<Vec<_>>(), ["n", "m"]);
/// assert_eq!(record.get("m"), Some(&GraphValue::Int(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, GraphValue)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A repeated name replaces the earlier value in place.
    pub fn push(&mut self, name: impl Into<String>, value: GraphValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&GraphValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GraphValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, GraphValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, GraphValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.push(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
