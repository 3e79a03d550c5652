use tracing::debug;

use crate::{
    codec::{PreparedOperand, WireValue, prepare_lookup_operand},
    compiler::SqlCompiler,
    error::LookupError,
    transform::{Extraction, Target},
    value::Document,
};

/// The lookups a document column registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Structural equality (`=`)
    Exact,
    /// Column or path is SQL NULL; never matches a present JSON null
    IsNull,
    /// Top-level key exists (`?`)
    HasKey,
    /// All keys exist (`?&`)
    HasKeys,
    /// At least one key exists (`?|`)
    HasAnyKeys,
    /// Left contains operand (`@>`)
    Contains,
    /// Left is contained by operand (`<@`)
    ContainedBy,
}

impl LookupKind {
    pub const ALL: [LookupKind; 7] = [
        LookupKind::Exact,
        LookupKind::IsNull,
        LookupKind::HasKey,
        LookupKind::HasKeys,
        LookupKind::HasAnyKeys,
        LookupKind::Contains,
        LookupKind::ContainedBy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LookupKind::Exact => "exact",
            LookupKind::IsNull => "isnull",
            LookupKind::HasKey => "has_key",
            LookupKind::HasKeys => "has_keys",
            LookupKind::HasAnyKeys => "has_any_keys",
            LookupKind::Contains => "contains",
            LookupKind::ContainedBy => "contained_by",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A lookup applied to a target: one boolean condition.
///
/// The operand is validated and coerced when the lookup is built, so any
/// operand error surfaces before a query is ever compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    target: Target,
    kind: LookupKind,
    operand: PreparedOperand,
}

impl Lookup {
    pub fn new(
        target: Target,
        kind: LookupKind,
        operand: impl Into<Document>,
    ) -> Result<Self, LookupError> {
        let operand = prepare_lookup_operand(kind, operand.into())?;
        Ok(Lookup {
            target,
            kind,
            operand,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub fn operand(&self) -> &PreparedOperand {
        &self.operand
    }

    /// Extraction mode for the deepest level of a key-path target.
    ///
    /// `exact` against a plain scalar extracts text (`->>`) guarded by the
    /// JSON type; numbers are then compared as `numeric`, strings and
    /// booleans as text. Everything else compares documents (`->`). A JSON
    /// null operand stays in document mode so it matches only a present null.
    pub fn extraction(&self) -> Extraction {
        match (&self.kind, &self.operand) {
            (LookupKind::Exact, PreparedOperand::Scalar(doc))
                if self.target.is_key_path() && *doc != Document::Null =>
            {
                Extraction::Text
            }
            _ => Extraction::Document,
        }
    }

    /// Renders the condition, binding its parameters on `compiler`.
    pub fn as_sql(&self, compiler: &mut SqlCompiler) -> String {
        let lhs = compiler.fragment(&self.target.render());
        let sql = match (&self.kind, &self.operand) {
            (LookupKind::IsNull, PreparedOperand::Flag(true)) => format!("{} IS NULL", lhs),
            (LookupKind::IsNull, _) => format!("{} IS NOT NULL", lhs),
            (LookupKind::HasKey, PreparedOperand::Key(key)) => {
                let placeholder = compiler.bind(WireValue::Text(key.clone()));
                key_check(&lhs, "?", &placeholder)
            }
            (LookupKind::HasKeys, PreparedOperand::Keys(keys)) => {
                let placeholder = compiler.bind(WireValue::TextArray(keys.clone()));
                key_check(&lhs, "?&", &placeholder)
            }
            (LookupKind::HasAnyKeys, PreparedOperand::Keys(keys)) => {
                let placeholder = compiler.bind(WireValue::TextArray(keys.clone()));
                key_check(&lhs, "?|", &placeholder)
            }
            (kind, operand) => {
                // exact, contains, contained_by: operand always holds a document
                let doc = operand.as_document().cloned().unwrap_or(Document::Null);
                match (kind, self.extraction()) {
                    (LookupKind::Exact, Extraction::Text) => {
                        let extracted =
                            compiler.fragment(&self.target.render_as(Extraction::Text));
                        let number = match doc {
                            Document::Integer(n) => Some(WireValue::Integer(n)),
                            Document::Float(n) => Some(WireValue::Float(n)),
                            _ => None,
                        };
                        match number {
                            // the cast only runs once the value is known to be a number
                            Some(wire) => format!(
                                "CASE WHEN jsonb_typeof({}) = 'number' THEN ({})::numeric = {}::numeric ELSE FALSE END",
                                lhs,
                                extracted,
                                compiler.bind(wire)
                            ),
                            None => {
                                let text = doc.extract_text().unwrap_or_default();
                                format!(
                                    "(jsonb_typeof({}) = {} AND {} = {})",
                                    lhs,
                                    SqlCompiler::quote_literal(doc.type_name()),
                                    extracted,
                                    compiler.bind(WireValue::Text(text))
                                )
                            }
                        }
                    }
                    (LookupKind::Contains, _) => {
                        format!("{} @> {}", lhs, compiler.bind(WireValue::Json(doc)))
                    }
                    (LookupKind::ContainedBy, _) => {
                        format!("{} <@ {}", lhs, compiler.bind(WireValue::Json(doc)))
                    }
                    _ => format!("{} = {}", lhs, compiler.bind(WireValue::Json(doc))),
                }
            }
        };
        debug!(lookup = %self.kind, depth = self.target.depth(), sql = %sql, "compiled lookup");
        sql
    }

    /// Evaluates the condition against a stored column value, with the same
    /// result the rendered SQL gives for that row.
    pub fn matches(&self, stored: Option<&Document>) -> bool {
        let resolved = self.target.resolve(stored);

        if let PreparedOperand::Flag(flag) = self.operand {
            return resolved.is_none() == flag;
        }
        // SQL NULL never satisfies a comparison
        let Some(value) = resolved else {
            return false;
        };

        match (&self.kind, &self.operand) {
            (LookupKind::HasKey, PreparedOperand::Key(key)) => value.has_key(key),
            (LookupKind::HasKeys, PreparedOperand::Keys(keys)) => {
                value.as_object().is_some() && keys.iter().all(|key| value.has_key(key))
            }
            (LookupKind::HasAnyKeys, PreparedOperand::Keys(keys)) => {
                keys.iter().any(|key| value.has_key(key))
            }
            (kind, operand) => {
                let Some(doc) = operand.as_document() else {
                    return false;
                };
                match (kind, self.extraction()) {
                    (LookupKind::Exact, Extraction::Text) => match doc {
                        Document::Integer(_) | Document::Float(_) => {
                            value.type_name() == "number" && value.structural_eq(doc)
                        }
                        _ => {
                            value.type_name() == doc.type_name()
                                && value.extract_text() == doc.extract_text()
                        }
                    },
                    (LookupKind::Exact, Extraction::Document) => value.structural_eq(doc),
                    (LookupKind::Contains, _) => value.contains(doc),
                    (LookupKind::ContainedBy, _) => value.contained_by(doc),
                    _ => false,
                }
            }
        }
    }
}

fn key_check(lhs: &str, operator: &str, placeholder: &str) -> String {
    format!(
        "(jsonb_typeof({}) = 'object' AND {} {} {})",
        lhs, lhs, operator, placeholder
    )
}
