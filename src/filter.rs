use tracing::debug;

use crate::{
    codec::WireValue,
    column::DocumentColumn,
    compiler::{CompilerOptions, SqlCompiler},
    error::LookupError,
    lookup::Lookup,
    value::Document,
};

/// A conjunction of conditions on one document column.
///
/// # Examples
///
/// ```
/// use jsonb_field::{Document, DocumentColumn, Filter};
/// use serde_json::json;
///
/// let column = DocumentColumn::new("field").unwrap();
/// let filter = Filter::new(&column)
///     .and("field__has_key", json!("a"))
///     .unwrap()
///     .and("field__c", json!(1))
///     .unwrap();
///
/// let rows: Vec<Option<Document>> = vec![
///     None,
///     Some(json!({"a": "b", "c": 1}).into()),
///     Some(json!({"a": 1}).into()),
/// ];
/// assert_eq!(filter.apply(&rows), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct Filter<'c> {
    column: &'c DocumentColumn,
    conditions: Vec<Lookup>,
}

impl<'c> Filter<'c> {
    pub fn new(column: &'c DocumentColumn) -> Self {
        Filter {
            column,
            conditions: Vec::new(),
        }
    }

    /// Adds `path=operand` to the conjunction.
    pub fn and(mut self, path: &str, operand: impl Into<Document>) -> Result<Self, LookupError> {
        self.conditions.push(self.column.filter(path, operand)?);
        Ok(self)
    }

    pub fn conditions(&self) -> &[Lookup] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders the `WHERE` body. An empty filter renders `TRUE`.
    pub fn as_sql(&self, compiler: &mut SqlCompiler) -> String {
        if self.is_empty() {
            return "TRUE".to_string();
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|lookup| lookup.as_sql(compiler))
            .collect();
        parts.join(" AND ")
    }

    /// Renders with a fresh compiler, returning the SQL and its parameters.
    pub fn compile(&self, options: CompilerOptions) -> (String, Vec<WireValue>) {
        let mut compiler = SqlCompiler::with_options(options);
        let sql = self.as_sql(&mut compiler);
        (sql, compiler.into_params())
    }

    pub fn matches(&self, stored: Option<&Document>) -> bool {
        self.conditions.iter().all(|lookup| lookup.matches(stored))
    }

    /// Indices of the rows that satisfy every condition, in row order.
    pub fn apply(&self, rows: &[Option<Document>]) -> Vec<usize> {
        let matched: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row.as_ref()))
            .map(|(index, _)| index)
            .collect();
        debug!(
            column = self.column.name(),
            conditions = self.conditions.len(),
            rows = rows.len(),
            matched = matched.len(),
            "applied filter"
        );
        matched
    }
}
