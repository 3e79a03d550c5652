use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::FromPrimitive};

/// A JSON document stored in a `jsonb` column.
///
/// Absence of a document (SQL `NULL`) is not a variant: it is modelled as
/// `Option<Document>::None` everywhere a column value can be unset, so a
/// present JSON `null` ([`Document::Null`]) can never be mistaken for it.
///
/// # Ordering and equality
///
/// Objects keep their insertion order so a document survives a round-trip
/// through the adapter unchanged, but key order plays no part in
/// [`Document::structural_eq`] or [`Document::contains`]. Array order does.
///
/// # Examples
///
/// ```
/// use jsonb_field::Document;
/// use serde_json::json;
///
/// let stored = Document::from(json!({"a": 1, "c": 2}));
/// let operand = Document::from(json!({"c": 2, "a": 1}));
/// assert!(stored.structural_eq(&operand));
///
/// let list = Document::from(json!([1, 2]));
/// assert!(!list.structural_eq(&Document::from(json!([2, 1]))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// JSON null (present, not absent)
    Null,

    /// JSON boolean
    Boolean(bool),

    /// Integer number (kept apart from floats so it prints back unchanged)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered array of documents
    Array(Vec<Document>),

    /// Object with unique string keys, in insertion order
    Object(IndexMap<String, Document>),
}

impl Document {
    /// The jsonb type name, as reported by `jsonb_typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Boolean(_) => "boolean",
            Document::Integer(_) | Document::Float(_) => "number",
            Document::String(_) => "string",
            Document::Array(_) => "array",
            Document::Object(_) => "object",
        }
    }

    /// True for objects and arrays.
    pub fn is_structured(&self) -> bool {
        matches!(self, Document::Array(_) | Document::Object(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Document>> {
        match self {
            Document::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Top-level key lookup. Anything but an object has no keys.
    pub fn get_key(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Array element lookup. Negative indices count from the end
    /// (`-1` is the last element). Anything but an array has no elements.
    pub fn get_index(&self, index: i64) -> Option<&Document> {
        let items = self.as_array()?;
        let position = if index < 0 {
            let back = index.unsigned_abs() as usize;
            if back > items.len() {
                return None;
            }
            items.len() - back
        } else {
            index as usize
        };
        items.get(position)
    }

    /// True when `self` is an object holding `key` at the top level.
    pub fn has_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }

    /// The text `->>` extraction yields for a scalar, or `None` for
    /// JSON null (which `->>` turns into SQL NULL).
    ///
    /// Structured documents extract as their compact JSON text.
    pub fn extract_text(&self) -> Option<String> {
        match self {
            Document::Null => None,
            Document::String(s) => Some(s.clone()),
            other => Some(crate::output::to_json(other)),
        }
    }

    /// Structural equality with jsonb semantics.
    ///
    /// - numbers compare by value (`1` equals `1.0`)
    /// - objects compare as unordered key sets with pairwise-equal values
    /// - arrays compare element by element, in order
    /// - `null` equals only `null`
    pub fn structural_eq(&self, other: &Document) -> bool {
        match (self, other) {
            (Document::Null, Document::Null) => true,
            (Document::Boolean(a), Document::Boolean(b)) => a == b,
            (Document::String(a), Document::String(b)) => a == b,
            (
                Document::Integer(_) | Document::Float(_),
                Document::Integer(_) | Document::Float(_),
            ) => numbers_equal(self, other),
            (Document::Array(a), Document::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structural_eq(y))
            }
            (Document::Object(a), Document::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|v| value.structural_eq(v)))
            }
            _ => false,
        }
    }

    /// jsonb containment (`self @> other`).
    ///
    /// An object contains another when every key of the operand is present
    /// and its value is contained recursively. An array contains another
    /// when every operand element is contained by some element, regardless
    /// of order or repetition. At the top level only, an array also
    /// contains a bare scalar that it holds as an element.
    pub fn contains(&self, other: &Document) -> bool {
        match (self, other) {
            (Document::Array(items), scalar) if !scalar.is_structured() => items
                .iter()
                .any(|item| !item.is_structured() && item.structural_eq(scalar)),
            _ => contains_nested(self, other),
        }
    }

    /// jsonb inverse containment (`self <@ other`).
    pub fn contained_by(&self, other: &Document) -> bool {
        other.contains(self)
    }
}

fn contains_nested(left: &Document, right: &Document) -> bool {
    match (left, right) {
        (Document::Object(lmap), Document::Object(rmap)) => rmap.iter().all(|(key, rvalue)| {
            lmap.get(key)
                .is_some_and(|lvalue| contains_nested(lvalue, rvalue))
        }),
        (Document::Array(larr), Document::Array(rarr)) => rarr
            .iter()
            .all(|rvalue| larr.iter().any(|lvalue| contains_nested(lvalue, rvalue))),
        (l, r) if l.is_structured() || r.is_structured() => false,
        (l, r) => l.structural_eq(r),
    }
}

fn numbers_equal(left: &Document, right: &Document) -> bool {
    match (left, right) {
        (Document::Integer(a), Document::Integer(b)) => a == b,
        _ => match (to_decimal(left), to_decimal(right)) {
            (Some(a), Some(b)) => a == b,
            // outside Decimal's range; fall back to float comparison
            _ => to_f64(left) == to_f64(right),
        },
    }
}

fn to_decimal(n: &Document) -> Option<Decimal> {
    match n {
        Document::Integer(i) => Some(Decimal::from(*i)),
        Document::Float(f) => Decimal::from_f64(*f).map(|d| d.normalize()),
        _ => None,
    }
}

fn to_f64(n: &Document) -> Option<f64> {
    match n {
        Document::Integer(i) => Some(*i as f64),
        Document::Float(f) => Some(*f),
        _ => None,
    }
}

impl From<serde_json::Value> for Document {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Document::Null,
            serde_json::Value::Bool(b) => Document::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Document::Integer(i),
                // u64 beyond i64 and all fractional numbers land here
                None => Document::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Document::String(s),
            serde_json::Value::Array(arr) => {
                Document::Array(arr.into_iter().map(Document::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Document::Object(obj.into_iter().map(|(k, v)| (k, Document::from(v))).collect())
            }
        }
    }
}

impl From<Document> for serde_json::Value {
    fn from(v: Document) -> Self {
        match v {
            Document::Null => serde_json::Value::Null,
            Document::Boolean(b) => serde_json::Value::Bool(b),
            Document::Integer(i) => serde_json::Value::Number(i.into()),
            Document::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Document::String(s) => serde_json::Value::String(s),
            Document::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Document::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Boolean(b)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Document::Integer(n)
    }
}

impl From<f64> for Document {
    fn from(n: f64) -> Self {
        Document::Float(n)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Array(items)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::output::to_json(self))
    }
}
