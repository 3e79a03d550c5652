//! Parsing of CLI conditions and input rows

use std::sync::LazyLock;

use regex::Regex;

use super::CliError;
use crate::Document;

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>[^=\s]+)=(?P<operand>.*)$").expect("condition pattern is valid")
});

/// Splits `path=operand` into a lookup path and an operand document.
///
/// The operand is read as JSON; anything that is not valid JSON is taken
/// as a bare string, so `field__a=b` and `field__a="b"` are equivalent.
pub fn parse_condition(arg: &str) -> Result<(String, Document), CliError> {
    let captures = CONDITION
        .captures(arg)
        .ok_or_else(|| CliError::InvalidCondition(arg.to_string()))?;
    let path = captures["path"].to_string();
    let raw = &captures["operand"];
    let operand = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Document::from(value),
        Err(_) => Document::String(raw.to_string()),
    };
    Ok((path, operand))
}

/// Reads rows from a JSON array of objects.
///
/// Each row's value for `column` is the member of that name; a row without
/// the member has the column unset, which is distinct from `"column": null`.
pub fn parse_rows(
    input: &str,
    column: &str,
) -> Result<Vec<(serde_json::Value, Option<Document>)>, CliError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let serde_json::Value::Array(records) = value else {
        return Err(CliError::InvalidRows("expected a JSON array of rows".to_string()));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let stored = record
                .as_object()
                .ok_or_else(|| CliError::InvalidRows(format!("row {} is not an object", index)))?
                .get(column)
                .cloned()
                .map(Document::from);
            Ok((record, stored))
        })
        .collect()
}
