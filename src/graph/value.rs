//! Values flowing across the graph boundary.
//!
//! [`ParamValue`] goes in (statement parameters, usually straight from YAML);
//! [`GraphValue`] comes out (fields of a returned [`Record`](super::Record)).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A statement parameter value.
///
/// # Example
///
/// ```
/// use boltrun::graph::ParamValue;
///
/// let value: ParamValue = serde_yaml::from_str("[1, two, 3.5]").unwrap();
/// assert_eq!(
///     value,
///     ParamValue::List(vec![
///         ParamValue::Int(1),
///         ParamValue::String("two".to_string()),
///         ParamValue::Float(3.5),
///     ])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A vertex returned by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, GraphValue>,
}

/// An edge returned by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub id: i64,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start: i64,
    pub end: i64,
    pub properties: BTreeMap<String, GraphValue>,
}

/// A value held by a record field.
///
/// Driver types without a counterpart here (temporal, spatial, paths) are
/// carried as their textual form in [`GraphValue::String`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<GraphValue>),
    Map(BTreeMap<String, GraphValue>),
    Node(Node),
    Relationship(Relationship),
}

impl GraphValue {
    /// Borrow the node if this is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Borrow the relationship if this is one.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(rel) => Some(rel),
            _ => None,
        }
    }
}

fn write_properties(
    f: &mut fmt::Formatter<'_>,
    properties: &BTreeMap<String, GraphValue>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    write!(f, "}}")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        if !self.properties.is_empty() {
            if !self.labels.is_empty() {
                write!(f, " ")?;
            }
            write_properties(f, &self.properties)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}", self.rel_type)?;
        if !self.properties.is_empty() {
            write!(f, " ")?;
            write_properties(f, &self.properties)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for GraphValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::String(s) => write!(f, "{:?}", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => write_properties(f, map),
            Self::Node(node) => write!(f, "{}", node),
            Self::Relationship(rel) => write!(f, "{}", rel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i64, name: &str) -> Node {
        let mut properties = BTreeMap::new();
        properties.insert("id".to_string(), GraphValue::Int(id));
        properties.insert("name".to_string(), GraphValue::String(name.to_string()));
        Node {
            id: id + 100,
            labels: vec!["person".to_string()],
            properties,
        }
    }

    #[test]
    fn node_displays_cypher_style() {
        assert_eq!(
            person(1, "jack").to_string(),
            r#"(:person {id: 1, name: "jack"})"#
        );
    }

    #[test]
    fn node_without_properties() {
        let node = Node {
            id: 0,
            labels: vec!["a".into(), "b".into()],
            properties: BTreeMap::new(),
        };
        assert_eq!(node.to_string(), "(:a:b)");
    }

    #[test]
    fn relationship_displays_type() {
        let rel = Relationship {
            id: 7,
            rel_type: "is_friend".into(),
            start: 1,
            end: 2,
            properties: BTreeMap::new(),
        };
        assert_eq!(rel.to_string(), "[:is_friend]");
    }

    #[test]
    fn relationship_with_properties() {
        let mut properties = BTreeMap::new();
        properties.insert("since".to_string(), GraphValue::Int(2020));
        let rel = Relationship {
            id: 7,
            rel_type: "knows".into(),
            start: 1,
            end: 2,
            properties,
        };
        assert_eq!(rel.to_string(), "[:knows {since: 2020}]");
    }

    #[test]
    fn scalars_display() {
        assert_eq!(GraphValue::Null.to_string(), "null");
        assert_eq!(GraphValue::Float(1.0).to_string(), "1.0");
        assert_eq!(GraphValue::String("a\"b".into()).to_string(), r#""a\"b""#);
        assert_eq!(
            GraphValue::List(vec![GraphValue::Int(1), GraphValue::Bool(false)]).to_string(),
            "[1, false]"
        );
    }

    #[test]
    fn node_serializes_with_labels_and_properties() {
        let json = serde_json::to_value(GraphValue::Node(person(2, "lucy"))).unwrap();
        assert_eq!(json["labels"][0], "person");
        assert_eq!(json["properties"]["name"], "lucy");
        assert_eq!(json["id"], 102);
    }

    #[test]
    fn relationship_serializes_type_key() {
        let rel = Relationship {
            id: 1,
            rel_type: "is_friend".into(),
            start: 10,
            end: 11,
            properties: BTreeMap::new(),
        };
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["type"], "is_friend");
        assert_eq!(json["start"], 10);
    }

    #[test]
    fn param_value_parses_nested_yaml() {
        let value: ParamValue = serde_yaml::from_str("{name: jack, tags: [a, b], age: ~}").unwrap();
        let ParamValue::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["name"], ParamValue::String("jack".into()));
        assert_eq!(map["age"], ParamValue::Null);
        assert_eq!(map["tags"], ParamValue::from(vec!["a", "b"]));
    }

    #[test]
    fn param_value_conversions() {
        assert_eq!(ParamValue::from(3), ParamValue::Int(3));
        assert_eq!(ParamValue::from(true), ParamValue::Bool(true));
        assert_eq!(ParamValue::from("x"), ParamValue::String("x".into()));
    }

    #[test]
    fn accessors() {
        let value = GraphValue::Node(person(1, "jack"));
        assert!(value.as_node().is_some());
        assert!(value.as_relationship().is_none());
    }
}
