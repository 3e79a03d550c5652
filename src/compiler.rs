use crate::codec::WireValue;

/// How bound parameters appear in rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// `%s`, as used by format-style drivers
    #[default]
    Format,
    /// `$1`, `$2`, ... as used by the native protocol
    Numbered,
}

/// Compiler configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerOptions {
    pub placeholder: Placeholder,
}

/// Per-query compilation state.
///
/// Fragments render into text while their parameters accumulate here in
/// binding order. One compiler belongs to one query; columns and lookups
/// never hold compilation state, so they can be shared freely.
#[derive(Debug, Default)]
pub struct SqlCompiler {
    options: CompilerOptions,
    params: Vec<WireValue>,
}

impl SqlCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        SqlCompiler {
            options,
            params: Vec::new(),
        }
    }

    /// Binds `value` and returns the placeholder standing in for it.
    pub fn bind(&mut self, value: WireValue) -> String {
        self.params.push(value);
        match self.options.placeholder {
            Placeholder::Format => "%s".to_string(),
            Placeholder::Numbered => format!("${}", self.params.len()),
        }
    }

    /// Prepares rendered SQL text (no placeholders) for the driver.
    ///
    /// Format-style drivers read every `%` in the statement as a conversion
    /// directive, so a literal `%` in a key or identifier is written `%%`.
    pub fn fragment(&self, sql: &str) -> String {
        match self.options.placeholder {
            Placeholder::Format => sql.replace('%', "%%"),
            Placeholder::Numbered => sql.to_string(),
        }
    }

    /// Parameters bound so far, in placeholder order.
    pub fn params(&self) -> &[WireValue] {
        &self.params
    }

    pub fn into_params(self) -> Vec<WireValue> {
        self.params
    }

    /// Quotes an identifier (`"name"`, with embedded quotes doubled).
    pub fn quote_name(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Quotes a string literal (`'text'`, with embedded quotes doubled).
    pub fn quote_literal(text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }
}
