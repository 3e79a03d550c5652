use crate::{compiler::SqlCompiler, value::Document};

/// One step of descent into a document.
///
/// Segments are stored raw on [`KeyTransform`] and classified only when a
/// condition is compiled or evaluated, so `"3"` always becomes `Index(3)`
/// whatever the document turns out to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Object member access by name
    ///
    /// # Examples
    /// - `field__name` → `Field("name")`
    /// - `field__user__email` → `[Field("user"), Field("email")]`
    Field(String),

    /// Array element access by position
    ///
    /// # Examples
    /// - `field__0` → `Index(0)`
    /// - `field__-1` → `Index(-1)` (counts from the end)
    ///
    /// # Note
    /// An index never matches an object, even one with a numeric-string key.
    Index(i64),
}

impl PathSegment {
    /// Classifies a raw segment: anything that parses as an integer is an
    /// index, everything else a key.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Field(raw.to_string()),
        }
    }

    /// Descends one level. Shape mismatches are `None`, never errors.
    pub fn step<'a>(&self, doc: &'a Document) -> Option<&'a Document> {
        match self {
            PathSegment::Field(key) => doc.get_key(key),
            PathSegment::Index(index) => doc.get_index(*index),
        }
    }

    /// The right-hand side of a `->` / `->>` operator.
    fn render(&self) -> String {
        match self {
            PathSegment::Field(key) => SqlCompiler::quote_literal(key),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

/// A sequence of path segments, outermost first.
///
/// For `field__items__0__price` the path is:
/// - `PathSegment::Field("items")`
/// - `PathSegment::Index(0)`
/// - `PathSegment::Field("price")`
pub type KeyPath = Vec<PathSegment>;

/// How the deepest `->` of a key path extracts its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// `->`, yields jsonb
    Document,
    /// `->>`, yields text
    Text,
}

/// A reference to the column a condition starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn render(&self) -> String {
        match &self.table {
            Some(table) => format!(
                "{}.{}",
                SqlCompiler::quote_name(table),
                SqlCompiler::quote_name(&self.name)
            ),
            None => SqlCompiler::quote_name(&self.name),
        }
    }
}

/// Left-hand side of a lookup: the column itself or a key path into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Column(ColumnRef),
    Key(KeyTransform),
}

/// Descent by one segment from a parent target.
///
/// Chaining a transform onto a transform builds a deeper path; there is no
/// depth limit.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTransform {
    pub key_name: String,
    pub lhs: Box<Target>,
}

impl KeyTransform {
    pub fn new(key_name: impl Into<String>, lhs: Target) -> Self {
        KeyTransform {
            key_name: key_name.into(),
            lhs: Box::new(lhs),
        }
    }

    pub fn segment(&self) -> PathSegment {
        PathSegment::classify(&self.key_name)
    }
}

impl Target {
    /// Extends this target by one raw segment.
    pub fn key(self, key_name: impl Into<String>) -> Target {
        Target::Key(KeyTransform::new(key_name, self))
    }

    pub fn column(&self) -> &ColumnRef {
        match self {
            Target::Column(column) => column,
            Target::Key(transform) => transform.lhs.column(),
        }
    }

    pub fn is_key_path(&self) -> bool {
        matches!(self, Target::Key(_))
    }

    /// Number of key transforms between the column and this target.
    pub fn depth(&self) -> usize {
        match self {
            Target::Column(_) => 0,
            Target::Key(transform) => transform.lhs.depth() + 1,
        }
    }

    /// The classified path from the column down to this target.
    pub fn path(&self) -> KeyPath {
        let mut segments = Vec::with_capacity(self.depth());
        self.collect_path(&mut segments);
        segments
    }

    fn collect_path(&self, segments: &mut KeyPath) {
        if let Target::Key(transform) = self {
            transform.lhs.collect_path(segments);
            segments.push(transform.segment());
        }
    }

    /// SQL for this target with document extraction at every level.
    pub fn render(&self) -> String {
        self.render_as(Extraction::Document)
    }

    /// SQL for this target; `mode` applies to the deepest level only.
    ///
    /// ```
    /// use jsonb_field::transform::{ColumnRef, Extraction, Target};
    ///
    /// let target = Target::Column(ColumnRef { table: None, name: "field".into() })
    ///     .key("k")
    ///     .key("0");
    /// assert_eq!(target.render(), r#""field" -> 'k' -> 0"#);
    /// assert_eq!(target.render_as(Extraction::Text), r#""field" -> 'k' ->> 0"#);
    /// ```
    pub fn render_as(&self, mode: Extraction) -> String {
        match self {
            Target::Column(column) => column.render(),
            Target::Key(transform) => {
                let operator = match mode {
                    Extraction::Document => "->",
                    Extraction::Text => "->>",
                };
                format!(
                    "{} {} {}",
                    transform.lhs.render(),
                    operator,
                    transform.segment().render()
                )
            }
        }
    }

    /// Applies this target to a stored column value.
    ///
    /// `None` when the column is absent or any segment does not fit the
    /// shape it meets.
    pub fn resolve<'a>(&self, stored: Option<&'a Document>) -> Option<&'a Document> {
        match self {
            Target::Column(_) => stored,
            Target::Key(transform) => {
                let parent = transform.lhs.resolve(stored)?;
                transform.segment().step(parent)
            }
        }
    }
}

/// Builds a [`KeyTransform`] for a segment name once the parent is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformFactory {
    key_name: String,
}

impl TransformFactory {
    pub fn new(key_name: impl Into<String>) -> Self {
        TransformFactory {
            key_name: key_name.into(),
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn apply(&self, lhs: Target) -> Target {
        lhs.key(self.key_name.clone())
    }
}
