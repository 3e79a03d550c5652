//! Value coercion between documents and the driver's wire values.
//!
//! The driver adapter itself is external; [`encode`] and [`decode`] are the
//! minimal JSON text adapter the crate needs to state its round-trip
//! contract: whatever [`prepare_for_storage`] hands over comes back deep-equal
//! through [`decode`], and absence comes back as absence.

use crate::{error::LookupError, lookup::LookupKind, value::Document};

/// A value handed to the driver for binding.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Document marker: the adapter serializes the payload as a JSON literal
    Json(Document),
    /// Plain text parameter
    Text(String),
    /// Native text array parameter (`text[]`)
    TextArray(Vec<String>),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

/// Anything [`prepare_for_storage`] accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Storable {
    Absent,
    Document(Document),
    /// Already tagged for the wire, passed through untouched
    Wire(WireValue),
}

impl From<Option<Document>> for Storable {
    fn from(value: Option<Document>) -> Self {
        match value {
            Some(doc) => Storable::Document(doc),
            None => Storable::Absent,
        }
    }
}

impl From<Document> for Storable {
    fn from(doc: Document) -> Self {
        Storable::Document(doc)
    }
}

impl From<WireValue> for Storable {
    fn from(wire: WireValue) -> Self {
        Storable::Wire(wire)
    }
}

/// Operand of a lookup after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedOperand {
    /// Raw key name, compared against object keys
    Key(String),
    /// Raw key names, bound as a native text array
    Keys(Vec<String>),
    /// Object or array, bound with the document marker
    Document(Document),
    /// Scalar left to default preparation
    Scalar(Document),
    /// `isnull` flag
    Flag(bool),
}

impl PreparedOperand {
    /// The document value a structural comparison runs against, if any.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            PreparedOperand::Document(doc) | PreparedOperand::Scalar(doc) => Some(doc),
            _ => None,
        }
    }
}

/// Prepares a column value for storage.
///
/// Absence passes through as `None` (stored as SQL NULL). Documents are
/// wrapped with the document marker. Wire values are not re-wrapped.
///
/// ```
/// use jsonb_field::codec::{prepare_for_storage, WireValue};
/// use jsonb_field::Document;
///
/// assert_eq!(prepare_for_storage(None::<Document>), None);
/// assert_eq!(
///     prepare_for_storage(Document::Null),
///     Some(WireValue::Json(Document::Null))
/// );
/// ```
pub fn prepare_for_storage(value: impl Into<Storable>) -> Option<WireValue> {
    match value.into() {
        Storable::Absent => None,
        Storable::Document(doc) => Some(WireValue::Json(doc)),
        Storable::Wire(wire) => Some(wire),
    }
}

/// Prepares a lookup operand for `kind`.
///
/// Key-existence lookups take raw key names and skip JSON encoding.
/// Structural lookups wrap objects and arrays as documents and leave
/// scalars to default preparation.
pub fn prepare_lookup_operand(
    kind: LookupKind,
    operand: Document,
) -> Result<PreparedOperand, LookupError> {
    match kind {
        LookupKind::HasKey => match operand {
            Document::String(key) => Ok(PreparedOperand::Key(key)),
            other => Err(invalid(kind, "a string key", &other)),
        },
        LookupKind::HasKeys | LookupKind::HasAnyKeys => {
            let items = match operand {
                Document::Array(items) => items,
                other => return Err(invalid(kind, "an array of string keys", &other)),
            };
            items
                .into_iter()
                .map(|item| match item {
                    Document::String(key) => Ok(key),
                    other => Err(invalid(kind, "an array of string keys", &other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PreparedOperand::Keys)
        }
        LookupKind::IsNull => match operand {
            Document::Boolean(flag) => Ok(PreparedOperand::Flag(flag)),
            other => Err(invalid(kind, "a boolean", &other)),
        },
        LookupKind::Exact | LookupKind::Contains | LookupKind::ContainedBy => {
            if operand.is_structured() {
                Ok(PreparedOperand::Document(operand))
            } else {
                Ok(PreparedOperand::Scalar(operand))
            }
        }
    }
}

fn invalid(kind: LookupKind, expected: &'static str, found: &Document) -> LookupError {
    LookupError::InvalidOperand {
        lookup: kind.name(),
        expected,
        found: found.type_name(),
    }
}

/// Encodes a wire value as the text the adapter sends to the server.
///
/// Text arrays use the PostgreSQL array literal form.
pub fn encode(value: &WireValue) -> String {
    match value {
        WireValue::Json(doc) => crate::output::to_json(doc),
        WireValue::Text(s) => s.clone(),
        WireValue::TextArray(items) => {
            let quoted: Vec<String> = items
                .iter()
                .map(|item| format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\"")))
                .collect();
            format!("{{{}}}", quoted.join(","))
        }
        WireValue::Boolean(b) => b.to_string(),
        WireValue::Integer(n) => n.to_string(),
        WireValue::Float(n) => n.to_string(),
    }
}

/// Encodes a column value for storage; `None` means SQL NULL.
pub fn store(value: impl Into<Storable>) -> Option<String> {
    prepare_for_storage(value).as_ref().map(encode)
}

/// Decodes stored column text back into a document; SQL NULL stays absent.
///
/// ```
/// use jsonb_field::codec::{decode, store};
/// use jsonb_field::Document;
///
/// assert_eq!(decode(store(None::<Document>).as_deref()).unwrap(), None);
/// assert_eq!(
///     decode(store(Document::Null).as_deref()).unwrap(),
///     Some(Document::Null)
/// );
/// ```
pub fn decode(stored: Option<&str>) -> Result<Option<Document>, LookupError> {
    stored
        .map(|text| serde_json::from_str::<serde_json::Value>(text).map(Document::from))
        .transpose()
        .map_err(LookupError::from)
}
