use thiserror::Error;

/// Errors that stop a pass. Skipped checks are not errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The configuration names a check that neither the custom set nor the catalog defines.
    #[error("check {check_id} not found")]
    CheckNotFound { check_id: String },

    /// The check exists but its predicate cannot be evaluated against this fragment.
    #[error("check {check_id} is malformed: {reason}")]
    MalformedCheck { check_id: String, reason: String },

    #[error("{object}: {source}")]
    Object {
        object: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// The check that stopped the pass.
    pub fn check_id(&self) -> &str {
        match self {
            ValidationError::CheckNotFound { check_id }
            | ValidationError::MalformedCheck { check_id, .. } => check_id,
            ValidationError::Object { source, .. } => source.check_id(),
        }
    }

    pub(crate) fn in_object(self, object: String) -> Self {
        ValidationError::Object {
            object,
            source: Box::new(self),
        }
    }
}
