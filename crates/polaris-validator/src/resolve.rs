use crate::error::ValidationError;
use crate::policy::Configuration;
use polaris_check_catalog::{CheckCatalog, CheckDefinition};
use polaris_kube::ObjectMeta;
use polaris_types::TargetKind;
use polaris_types::ids::{CONTAINER_KIND_INIT, CONTAINER_KIND_REGULAR};

/// What is being evaluated in one pass. Lives as long as the pass.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationContext<'a> {
    pub kind: &'a str,
    pub target: TargetKind,
    pub meta: &'a ObjectMeta,
    pub container_name: Option<&'a str>,
    pub is_init_container: bool,
}

impl<'a> EvaluationContext<'a> {
    pub fn object(kind: &'a str, target: TargetKind, meta: &'a ObjectMeta) -> Self {
        Self {
            kind,
            target,
            meta,
            container_name: None,
            is_init_container: false,
        }
    }

    pub fn container(kind: &'a str, meta: &'a ObjectMeta, name: &'a str, is_init: bool) -> Self {
        Self {
            kind,
            target: TargetKind::Container,
            meta,
            container_name: Some(name),
            is_init_container: is_init,
        }
    }
}

/// Find the definition for `check_id` and decide whether it applies here.
///
/// `Ok(None)` is a skip. An unknown ID is an error even when its severity is `ignore`.
pub fn resolve_check<'a>(
    conf: &'a Configuration,
    catalog: &'a CheckCatalog,
    check_id: &str,
    ctx: &EvaluationContext<'_>,
) -> Result<Option<&'a CheckDefinition>, ValidationError> {
    let definition = catalog
        .resolve(check_id, &conf.custom_checks)
        .ok_or_else(|| ValidationError::CheckNotFound {
            check_id: check_id.to_string(),
        })?;

    if !conf.is_actionable(check_id, &ctx.meta.namespace, &ctx.meta.name, ctx.container_name) {
        tracing::trace!(check = check_id, "skipped: not actionable by configuration");
        return Ok(None);
    }
    if !applies_to(definition, ctx) {
        tracing::trace!(check = check_id, scope = %ctx.target, kind = ctx.kind, "skipped: out of scope");
        return Ok(None);
    }
    Ok(Some(definition))
}

fn applies_to(definition: &CheckDefinition, ctx: &EvaluationContext<'_>) -> bool {
    if definition.target != ctx.target || !definition.controllers.admits(ctx.kind) {
        return false;
    }
    if ctx.target == TargetKind::Container {
        let class = if ctx.is_init_container {
            CONTAINER_KIND_INIT
        } else {
            CONTAINER_KIND_REGULAR
        };
        return !definition.containers.excludes(class);
    }
    true
}
