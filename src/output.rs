//! JSON text printing for documents.
//!
//! Used by the wire adapter to encode document parameters, by the
//! `Display` impl of [`Document`], and by the CLI for row output.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`], the form sent to the driver
//! - **Pretty output** via [`to_json_pretty()`] with 2-space indentation
//! - **Insertion order** - object keys print in the order they were stored
//! - **Type preservation** - integers stay integers, floats keep a fraction
//!
//! # Examples
//!
//! ```
//! use jsonb_field::Document;
//! use jsonb_field::output::to_json;
//! use serde_json::json;
//!
//! let doc = Document::from(json!({"b": 1, "a": [true, null, 1.0]}));
//! assert_eq!(to_json(&doc), r#"{"b":1,"a":[true,null,1.0]}"#);
//! ```

use indexmap::IndexMap;

use crate::value::Document;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Document) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Document, indent: usize) -> String {
        match value {
            Document::Null => "null".to_string(),
            Document::Boolean(b) => b.to_string(),
            Document::Integer(n) => n.to_string(),
            // JSON has no NaN or infinities
            Document::Float(n) if !n.is_finite() => "null".to_string(),
            Document::Float(n) => format!("{:?}", n),
            Document::String(s) => format!("\"{}\"", escape_string(s)),
            Document::Array(arr) => self.print_array(arr, indent),
            Document::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_array(&self, arr: &[Document], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(&self, obj: &IndexMap<String, Document>, indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        escape_string(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_string(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Converts a document to compact JSON text.
pub fn to_json(value: &Document) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a document to pretty-printed JSON text.
///
/// ```
/// use jsonb_field::Document;
/// use jsonb_field::output::to_json_pretty;
/// use serde_json::json;
///
/// let doc = Document::from(json!({"name": "Alice", "tags": ["x"]}));
/// assert_eq!(
///     to_json_pretty(&doc),
///     "{\n  \"name\": \"Alice\",\n  \"tags\": [\n    \"x\"\n  ]\n}"
/// );
/// ```
pub fn to_json_pretty(value: &Document) -> String {
    JsonPrinter::new(true).print(value)
}
