use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::{
    codec::{self, Storable, WireValue},
    error::LookupError,
    lookup::{Lookup, LookupKind},
    transform::{ColumnRef, Target, TransformFactory},
    value::Document,
};

/// Separator between segments of a lookup path (`field__k__l__contains`).
pub const LOOKUP_SEP: &str = "__";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Lookups the relational layer provides for scalar columns that have no
/// meaning on a document column.
const REJECTED_BASE_LOOKUPS: &[&str] = &[
    "iexact",
    "gt",
    "gte",
    "lt",
    "lte",
    "in",
    "range",
    "icontains",
    "startswith",
    "istartswith",
    "endswith",
    "iendswith",
    "regex",
    "iregex",
];

/// A `jsonb` document column.
///
/// Holds configuration only; it is immutable once built and can be shared
/// across threads while many queries are built against it.
///
/// # Examples
///
/// ```
/// use jsonb_field::{DocumentColumn, SqlCompiler};
/// use serde_json::json;
///
/// let column = DocumentColumn::new("field").unwrap();
/// let lookup = column.filter("field__k__l", json!("m")).unwrap();
///
/// let mut compiler = SqlCompiler::new();
/// assert_eq!(
///     lookup.as_sql(&mut compiler),
///     r#"(jsonb_typeof("field" -> 'k' -> 'l') = 'string' AND "field" -> 'k' ->> 'l' = %s)"#
/// );
/// assert!(lookup.matches(Some(&json!({"k": {"l": "m"}}).into())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentColumn {
    name: String,
    table: Option<String>,
}

impl DocumentColumn {
    pub fn new(name: impl Into<String>) -> Result<Self, LookupError> {
        let name = name.into();
        if !IDENTIFIER.is_match(&name) {
            return Err(LookupError::InvalidColumnName(name));
        }
        Ok(DocumentColumn { name, table: None })
    }

    /// Qualifies rendered references with a table name or alias.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Storage type declared to the schema layer.
    pub fn db_type(&self) -> &'static str {
        "jsonb"
    }

    /// Registered lookup names.
    pub fn lookups(&self) -> impl Iterator<Item = &'static str> {
        LookupKind::ALL.into_iter().map(LookupKind::name)
    }

    /// First dispatch tier: the fixed lookup registry.
    pub fn get_lookup(&self, name: &str) -> Option<LookupKind> {
        LookupKind::from_name(name)
    }

    /// Second dispatch tier: every other name descends by key or index.
    pub fn get_transform(&self, name: &str) -> TransformFactory {
        TransformFactory::new(name)
    }

    /// The column itself as a lookup target.
    pub fn target(&self) -> Target {
        Target::Column(ColumnRef {
            table: self.table.clone(),
            name: self.name.clone(),
        })
    }

    pub fn prepare_for_storage(&self, value: impl Into<Storable>) -> Option<WireValue> {
        codec::prepare_for_storage(value)
    }

    /// Resolves a lookup path into a target and a lookup kind.
    ///
    /// The first segment must be this column. The last segment is tried
    /// against the lookup registry; base lookups the document type does not
    /// support are rejected. Every remaining segment becomes a key
    /// transform, so a path without a lookup ends in an implicit `exact`.
    pub fn resolve(&self, path: &str) -> Result<(Target, LookupKind), LookupError> {
        let segments: Vec<&str> = path.split(LOOKUP_SEP).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(LookupError::EmptySegment {
                path: path.to_string(),
            });
        }

        let (field, rest) = segments
            .split_first()
            .ok_or_else(|| LookupError::EmptySegment {
                path: path.to_string(),
            })?;
        if *field != self.name {
            return Err(LookupError::UnknownField {
                expected: self.name.clone(),
                found: field.to_string(),
            });
        }

        let (transforms, kind) = match rest.split_last() {
            Some((last, init)) => match self.get_lookup(last) {
                Some(kind) => (init, kind),
                None if REJECTED_BASE_LOOKUPS.contains(last) => {
                    return Err(LookupError::Unsupported {
                        lookup: last.to_string(),
                    });
                }
                None => (rest, LookupKind::Exact),
            },
            None => (rest, LookupKind::Exact),
        };

        let target = transforms.iter().fold(self.target(), |lhs, segment| {
            trace!(segment = %segment, "resolving segment as key transform");
            self.get_transform(segment).apply(lhs)
        });
        trace!(lookup = %kind, depth = target.depth(), "resolved lookup path");
        Ok((target, kind))
    }

    /// Builds a condition from a lookup path and an operand.
    pub fn filter(
        &self,
        path: &str,
        operand: impl Into<Document>,
    ) -> Result<Lookup, LookupError> {
        let (target, kind) = self.resolve(path)?;
        Lookup::new(target, kind, operand)
    }
}
