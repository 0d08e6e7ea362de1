use thiserror::Error;

/// A predicate could not be built or could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PredicateError(pub String);

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A check definition is unusable. Fatal for built-ins.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("check {check_id}: failed to decode definition: {source}")]
    Decode {
        check_id: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("check {check_id}: {reason}")]
    InvalidDefinition { check_id: String, reason: String },

    #[error("check {check_id}: invalid predicate: {source}")]
    Predicate {
        check_id: String,
        #[source]
        source: PredicateError,
    },

    #[error("check {check_id}: defined more than once")]
    Duplicate { check_id: String },
}
