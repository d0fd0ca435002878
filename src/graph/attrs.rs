//! Attribute records attached to graphs, nodes and edges.
//!
//! Attributes are loosely typed key-value bags ([`Attrs`]). Node and graph records are
//! owned by the graph. Edge records are shared: the single [`EdgeRecord`] of an edge is
//! referenced from both adjacency entries that represent it, so an update made while
//! looking at `u`'s neighbors is observed when looking at `v`'s.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Free-form text
    Str(String),
}

impl AttrValue {
    /// Returns the value as a floating point number, if it is numeric.
    ///
    /// Integers are widened; booleans and strings yield `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(value) => Some(*value as f64),
            AttrValue::Float(value) => Some(*value),
            AttrValue::Bool(_) | AttrValue::Str(_) => None,
        }
    }

    /// Returns the contained string slice, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(value) => write!(f, "{value}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
            AttrValue::Str(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

/// A key-value attribute record.
pub type Attrs = HashMap<String, AttrValue>;

/// Shared handle to the attribute record of one edge.
///
/// Both adjacency entries of an edge hold a clone of the same `Rc`, which is what makes
/// `graph.edge_data(&u, &v)` and `graph.edge_data(&v, &u)` observe the same record.
pub type EdgeRecord = Rc<RefCell<Attrs>>;

/// Builds an [`Attrs`] record from `(key, value)` pairs.
///
/// # Examples
///
/// ```rust
/// use netgraph::{attrs, AttrValue};
///
/// let record = attrs([("weight", AttrValue::from(2.5)), ("color", "red".into())]);
/// assert_eq!(record["weight"], AttrValue::Float(2.5));
/// ```
pub fn attrs<K, I>(pairs: I) -> Attrs
where
    K: Into<String>,
    I: IntoIterator<Item = (K, AttrValue)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect()
}

/// Creates a fresh, unshared edge record holding a copy of `data`.
pub(crate) fn new_record(data: Attrs) -> EdgeRecord {
    Rc::new(RefCell::new(data))
}

/// Reads a numeric attribute from an edge record, defaulting to `1.0` when absent.
///
/// Returns `None` when the attribute exists but is not numeric.
pub(crate) fn numeric_attr(record: &EdgeRecord, key: &str) -> Option<f64> {
    match record.borrow().get(key) {
        None => Some(1.0),
        Some(value) => value.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_conversion() {
        assert_eq!(AttrValue::from(3).as_f64(), Some(3.0));
        assert_eq!(AttrValue::from(0.5).as_f64(), Some(0.5));
        assert_eq!(AttrValue::from(true).as_f64(), None);
        assert_eq!(AttrValue::from("x").as_f64(), None);
    }

    #[test]
    fn test_shared_record_visibility() {
        let record = new_record(Attrs::new());
        let alias = Rc::clone(&record);
        alias
            .borrow_mut()
            .insert("color".to_string(), AttrValue::from("blue"));
        assert_eq!(
            record.borrow().get("color").and_then(AttrValue::as_str),
            Some("blue")
        );
    }

    #[test]
    fn test_numeric_attr_defaults() {
        let record = new_record(attrs([("weight", AttrValue::from(4))]));
        assert_eq!(numeric_attr(&record, "weight"), Some(4.0));
        assert_eq!(numeric_attr(&record, "missing"), Some(1.0));

        record
            .borrow_mut()
            .insert("weight".to_string(), AttrValue::from("heavy"));
        assert_eq!(numeric_attr(&record, "weight"), None);
    }
}
