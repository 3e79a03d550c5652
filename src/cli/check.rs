//! Apply conditions to JSON rows in memory

use super::{CliError, parse_condition, parse_rows};
use crate::{Document, DocumentColumn, Filter, to_json, to_json_pretty};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Column name
    pub column: String,
    /// Conditions of the form `path=operand`
    pub conditions: Vec<String>,
    /// JSON array of row objects
    pub input: Option<String>,
    /// Only validate the conditions, don't read rows
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Conditions resolved and their operands are valid
    SyntaxValid,
    /// The rows that matched, in input order
    Matches(serde_json::Value),
}

impl CheckResult {
    /// Text printed for this result; matched rows keep their input key order.
    pub fn render(&self, pretty: bool) -> String {
        match self {
            CheckResult::SyntaxValid => "Conditions are valid".to_string(),
            CheckResult::Matches(rows) => {
                let rows = Document::from(rows.clone());
                if pretty {
                    to_json_pretty(&rows)
                } else {
                    to_json(&rows)
                }
            }
        }
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let column = DocumentColumn::new(options.column.as_str())?;

    let mut filter = Filter::new(&column);
    for condition in &options.conditions {
        let (path, operand) = parse_condition(condition)?;
        filter = filter.and(&path, operand)?;
    }

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let (records, stored): (Vec<_>, Vec<_>) = parse_rows(input, column.name())?.into_iter().unzip();

    let matched = filter
        .apply(&stored)
        .into_iter()
        .map(|index| records[index].clone())
        .collect();
    Ok(CheckResult::Matches(serde_json::Value::Array(matched)))
}
