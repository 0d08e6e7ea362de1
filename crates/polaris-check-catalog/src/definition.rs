use crate::error::CatalogError;
use crate::predicate::{FragmentPredicate, JsonSchemaPredicate};
use crate::spec::{CheckSpec, ContainerFilter, KindFilter};
use polaris_types::ids::{CONTAINER_KIND_INIT, CONTAINER_KIND_REGULAR};
use polaris_types::TargetKind;
use std::fmt;
use std::sync::Arc;

/// A predicate bound to the one fragment shape it evaluates.
#[derive(Clone)]
pub enum Predicate {
    Pod(Arc<dyn FragmentPredicate>),
    Controller(Arc<dyn FragmentPredicate>),
    Container(Arc<dyn FragmentPredicate>),
    Object(Arc<dyn FragmentPredicate>),
}

impl Predicate {
    pub fn bind(form: TargetKind, capability: Arc<dyn FragmentPredicate>) -> Self {
        match form {
            TargetKind::Pod => Predicate::Pod(capability),
            TargetKind::Controller => Predicate::Controller(capability),
            TargetKind::Container => Predicate::Container(capability),
            TargetKind::Other => Predicate::Object(capability),
        }
    }

    /// The fragment shape this predicate expects.
    pub fn form(&self) -> TargetKind {
        match self {
            Predicate::Pod(_) => TargetKind::Pod,
            Predicate::Controller(_) => TargetKind::Controller,
            Predicate::Container(_) => TargetKind::Container,
            Predicate::Object(_) => TargetKind::Other,
        }
    }

    pub fn capability(&self) -> &dyn FragmentPredicate {
        match self {
            Predicate::Pod(p)
            | Predicate::Controller(p)
            | Predicate::Container(p)
            | Predicate::Object(p) => p.as_ref(),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate::{}", self.form())
    }
}

#[derive(Clone, Debug)]
pub struct CheckDefinition {
    pub id: String,
    pub category: String,
    pub target: TargetKind,
    pub controllers: KindFilter,
    pub containers: ContainerFilter,
    pub success_message: String,
    pub failure_message: String,
    pub predicate: Predicate,
}

impl CheckDefinition {
    /// Decode a declarative spec. The JSON Schema is not compiled here.
    pub fn from_spec(id: &str, spec: CheckSpec) -> Result<Self, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidDefinition {
            check_id: id.to_string(),
            reason,
        };

        let form = spec.schema_target.unwrap_or(spec.target);
        if !form_matches_target(spec.target, form) {
            return Err(invalid(format!(
                "schemaTarget {form} cannot be used with target {}",
                spec.target
            )));
        }

        if let Some(class) = spec
            .containers
            .exclude
            .iter()
            .find(|c| *c != CONTAINER_KIND_INIT && *c != CONTAINER_KIND_REGULAR)
        {
            return Err(invalid(format!(
                "unknown container class `{class}` (expected {CONTAINER_KIND_INIT} or {CONTAINER_KIND_REGULAR})"
            )));
        }

        let capability = match (spec.schema, spec.json_schema) {
            (Some(schema), None) => JsonSchemaPredicate::from_value(schema),
            (None, Some(text)) => JsonSchemaPredicate::from_text(text),
            (Some(_), Some(_)) => {
                return Err(invalid("only one of schema or jsonSchema may be set".into()));
            }
            (None, None) => return Err(invalid("one of schema or jsonSchema is required".into())),
        };

        Ok(CheckDefinition {
            id: id.to_string(),
            category: spec.category,
            target: spec.target,
            controllers: spec.controllers,
            containers: spec.containers,
            success_message: spec.success_message,
            failure_message: spec.failure_message,
            predicate: Predicate::bind(form, Arc::new(capability)),
        })
    }

    /// Decode a YAML (or JSON) document into a definition for `id`.
    pub fn from_yaml(id: &str, text: &str) -> Result<Self, CatalogError> {
        let spec = CheckSpec::from_yaml(text).map_err(|source| CatalogError::Decode {
            check_id: id.to_string(),
            source,
        })?;
        Self::from_spec(id, spec)
    }

    /// Shape the predicate evaluates; may differ from `target` only for pod-shaped container checks.
    pub fn schema_target(&self) -> TargetKind {
        self.predicate.form()
    }

    pub fn message(&self, passed: bool) -> &str {
        if passed {
            &self.success_message
        } else {
            &self.failure_message
        }
    }
}

fn form_matches_target(target: TargetKind, form: TargetKind) -> bool {
    target == form || (target == TargetKind::Container && form == TargetKind::Pod)
}
