use crate::error::PredicateError;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// The opaque capability a check runs: decide pass/fail for one fragment.
///
/// Implementations must be pure. The same fragment always yields the same answer.
pub trait FragmentPredicate: Send + Sync {
    fn test(&self, fragment: &Value) -> Result<bool, PredicateError>;

    /// Surface construction problems early. Built-in checks call this at catalog load.
    fn prepare(&self) -> Result<(), PredicateError> {
        Ok(())
    }
}

enum SchemaSource {
    Structured(Value),
    Text(String),
}

/// A predicate that passes when the fragment validates against a draft-07 JSON Schema.
///
/// The schema is compiled on first use and cached; a schema that fails to compile
/// fails every evaluation with the same error.
pub struct JsonSchemaPredicate {
    source: SchemaSource,
    compiled: OnceLock<Result<jsonschema::Validator, PredicateError>>,
}

impl JsonSchemaPredicate {
    pub fn from_value(schema: Value) -> Self {
        Self {
            source: SchemaSource::Structured(schema),
            compiled: OnceLock::new(),
        }
    }

    /// `text` is a JSON document; it is only parsed when the predicate is first used.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: SchemaSource::Text(text.into()),
            compiled: OnceLock::new(),
        }
    }

    fn validator(&self) -> Result<&jsonschema::Validator, PredicateError> {
        self.compiled
            .get_or_init(|| compile(&self.source))
            .as_ref()
            .map_err(Clone::clone)
    }
}

fn compile(source: &SchemaSource) -> Result<jsonschema::Validator, PredicateError> {
    let mut schema = match source {
        SchemaSource::Structured(value) => value.clone(),
        SchemaSource::Text(text) => serde_json::from_str(text)
            .map_err(|e| PredicateError::new(format!("schema is not valid JSON: {e}")))?,
    };
    // `$id` is a logical identifier here, not a resolvable URL.
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$id");
    }
    jsonschema::draft7::new(&schema)
        .map_err(|e| PredicateError::new(format!("schema does not compile: {e}")))
}

impl FragmentPredicate for JsonSchemaPredicate {
    fn test(&self, fragment: &Value) -> Result<bool, PredicateError> {
        Ok(self.validator()?.is_valid(fragment))
    }

    fn prepare(&self) -> Result<(), PredicateError> {
        self.validator().map(|_| ())
    }
}

impl fmt::Debug for JsonSchemaPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            SchemaSource::Structured(_) => "schema",
            SchemaSource::Text(_) => "jsonSchema",
        };
        f.debug_struct("JsonSchemaPredicate")
            .field("source", &source)
            .field("compiled", &self.compiled.get().map(|r| r.is_ok()))
            .finish()
    }
}
