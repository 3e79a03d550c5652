//! Render conditions to SQL

use super::{CliError, parse_condition};
use crate::{CompilerOptions, DocumentColumn, Filter, Placeholder, codec};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Column name
    pub column: String,
    /// Optional table qualifier
    pub table: Option<String>,
    /// Conditions of the form `path=operand`
    pub conditions: Vec<String>,
    /// Use `$n` placeholders instead of `%s`
    pub numbered: bool,
}

/// Rendered `WHERE` body and its parameters, encoded as the adapter sends them
#[derive(Debug, Clone, PartialEq)]
pub struct CompileResult {
    pub sql: String,
    pub params: Vec<String>,
}

/// Execute a compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileResult, CliError> {
    let mut column = DocumentColumn::new(options.column.as_str())?;
    if let Some(table) = &options.table {
        column = column.with_table(table.as_str());
    }

    let mut filter = Filter::new(&column);
    for condition in &options.conditions {
        let (path, operand) = parse_condition(condition)?;
        filter = filter.and(&path, operand)?;
    }

    let placeholder = if options.numbered {
        Placeholder::Numbered
    } else {
        Placeholder::Format
    };
    let (sql, params) = filter.compile(CompilerOptions { placeholder });

    Ok(CompileResult {
        sql,
        params: params.iter().map(codec::encode).collect(),
    })
}
