use crate::error::ValidationError;
use polaris_check_catalog::CheckDefinition;
use polaris_kube::{Container, PodSpec};
use polaris_types::TargetKind;
use serde_json::Value;
use std::cell::OnceCell;

/// The part of a manifest a predicate runs against.
#[derive(Clone, Copy, Debug)]
pub enum Fragment<'a> {
    Pod(&'a PodSpec),
    /// The original controller object as decoded.
    Controller(&'a Value),
    Container(&'a Container),
    Object(&'a Value),
}

impl<'a> Fragment<'a> {
    pub fn shape(&self) -> TargetKind {
        match self {
            Fragment::Pod(_) => TargetKind::Pod,
            Fragment::Controller(_) => TargetKind::Controller,
            Fragment::Container(_) => TargetKind::Container,
            Fragment::Object(_) => TargetKind::Other,
        }
    }
}

/// A fragment plus its JSON form, serialized on first use and reused for the rest of the pass.
#[derive(Debug)]
pub struct PassFragment<'a> {
    fragment: Fragment<'a>,
    serialized: OnceCell<Value>,
}

impl<'a> PassFragment<'a> {
    pub fn new(fragment: Fragment<'a>) -> Self {
        Self {
            fragment,
            serialized: OnceCell::new(),
        }
    }

    pub fn shape(&self) -> TargetKind {
        self.fragment.shape()
    }

    pub fn value(&self) -> Result<&Value, serde_json::Error> {
        if let Some(value) = self.serialized.get() {
            return Ok(value);
        }
        let value = match self.fragment {
            Fragment::Controller(value) | Fragment::Object(value) => return Ok(value),
            Fragment::Pod(pod) => serde_json::to_value(pod)?,
            Fragment::Container(container) => serde_json::to_value(container)?,
        };
        Ok(self.serialized.get_or_init(|| value))
    }
}

/// Run the definition's predicate against `fragment`.
///
/// The fragment must have the shape the predicate is bound to; anything else is a
/// malformed check, as is a predicate that cannot be compiled or evaluated.
pub fn evaluate(
    definition: &CheckDefinition,
    fragment: &PassFragment<'_>,
) -> Result<bool, ValidationError> {
    let malformed = |reason: String| ValidationError::MalformedCheck {
        check_id: definition.id.clone(),
        reason,
    };

    let expected = definition.schema_target();
    if fragment.shape() != expected {
        return Err(malformed(format!(
            "expects a {expected} fragment, got {}",
            fragment.shape()
        )));
    }

    let value = fragment
        .value()
        .map_err(|e| malformed(format!("fragment is not serializable: {e}")))?;
    definition
        .predicate
        .capability()
        .test(value)
        .map_err(|e| malformed(e.to_string()))
}

/// A copy of `pod` whose only container is `container` and which has no init containers.
pub fn single_container_pod(pod: &PodSpec, container: &Container) -> PodSpec {
    PodSpec {
        containers: vec![container.clone()],
        init_containers: Vec::new(),
        fields: pod.fields.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaris_check_catalog::CheckCatalog;
    use serde_json::json;

    fn definition(id: &str) -> CheckDefinition {
        CheckCatalog::builtin()
            .expect("catalog")
            .get(id)
            .cloned()
            .expect("built-in check")
    }

    #[test]
    fn pod_fragment_is_evaluated() {
        let def = definition("hostIPCSet");
        let clean = PodSpec::default();
        let bad = PodSpec::default().with_field("hostIPC", json!(true));

        assert!(evaluate(&def, &PassFragment::new(Fragment::Pod(&clean))).expect("eval"));
        assert!(!evaluate(&def, &PassFragment::new(Fragment::Pod(&bad))).expect("eval"));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let def = definition("hostIPCSet");
        let container = Container::new("app");
        let err = evaluate(&def, &PassFragment::new(Fragment::Container(&container))).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCheck { .. }));
        assert_eq!(err.check_id(), "hostIPCSet");
    }

    #[test]
    fn single_container_pod_drops_siblings_and_init_containers() {
        let pod = PodSpec {
            containers: vec![Container::new("a"), Container::new("b")],
            init_containers: vec![Container::new("init")],
            ..PodSpec::default()
        }
        .with_field("hostNetwork", json!(true));

        let synthetic = single_container_pod(&pod, &pod.containers[1]);
        assert_eq!(synthetic.containers, vec![Container::new("b")]);
        assert!(synthetic.init_containers.is_empty());
        assert_eq!(synthetic.fields.get("hostNetwork"), Some(&json!(true)));
    }

    #[test]
    fn typed_fragments_are_serialized_once_per_pass() {
        let container = Container::new("app").with_field("image", json!("nginx:1.25"));
        let fragment = PassFragment::new(Fragment::Container(&container));

        let first = fragment.value().expect("value");
        let second = fragment.value().expect("value");
        assert!(std::ptr::eq(first, second));
        assert_eq!(first["image"], json!("nginx:1.25"));

        let def = definition("tagNotSpecified");
        assert!(evaluate(&def, &fragment).expect("eval"));
        assert!(std::ptr::eq(fragment.value().expect("value"), first));
    }

    #[test]
    fn decoded_objects_are_borrowed_not_copied() {
        let object = json!({ "kind": "Ingress" });
        let fragment = PassFragment::new(Fragment::Object(&object));
        assert!(std::ptr::eq(fragment.value().expect("value"), &object));
    }
}
