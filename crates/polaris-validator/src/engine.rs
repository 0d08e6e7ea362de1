use crate::error::ValidationError;
use crate::evaluate::{Fragment, PassFragment, evaluate, single_container_pod};
use crate::exemption::is_exempt;
use crate::policy::Configuration;
use crate::resolve::{EvaluationContext, resolve_check};
use crate::results::make_result;
use polaris_check_catalog::{CheckCatalog, CheckDefinition};
use polaris_kube::{Container, Resource, Workload};
use polaris_types::{ResultSet, TargetKind};
use std::cell::OnceCell;

/// One pass: every configured check, in ID order, through exemption, resolution,
/// evaluation and recording. The first error aborts the pass and discards partial results.
fn run_pass<'p, 'f: 'p>(
    conf: &Configuration,
    catalog: &CheckCatalog,
    ctx: &EvaluationContext<'_>,
    fragment_for: impl Fn(&CheckDefinition) -> &'p PassFragment<'f>,
) -> Result<ResultSet, ValidationError> {
    let mut results = ResultSet::new();
    for check_id in conf.check_ids() {
        if is_exempt(&ctx.meta.annotations, check_id, conf.disallow_exemptions) {
            tracing::trace!(check = check_id, "skipped: exempt by annotation");
            continue;
        }
        let Some(definition) = resolve_check(conf, catalog, check_id, ctx)? else {
            continue;
        };
        let passed = evaluate(definition, fragment_for(definition))?;
        results.insert(make_result(conf, definition, passed));
    }
    tracing::debug!(
        target_scope = %ctx.target,
        kind = ctx.kind,
        name = %ctx.meta.name,
        container = ctx.container_name,
        results = results.len(),
        "pass complete"
    );
    Ok(results)
}

/// Pod-scope checks against the workload's pod spec.
pub fn apply_pod_checks(
    conf: &Configuration,
    catalog: &CheckCatalog,
    workload: &Workload,
) -> Result<ResultSet, ValidationError> {
    let ctx = EvaluationContext::object(&workload.kind, TargetKind::Pod, &workload.meta);
    let pod = PassFragment::new(Fragment::Pod(&workload.pod_spec));
    run_pass(conf, catalog, &ctx, |_| &pod)
}

/// Controller-scope checks against the original controller object.
pub fn apply_controller_checks(
    conf: &Configuration,
    catalog: &CheckCatalog,
    workload: &Workload,
) -> Result<ResultSet, ValidationError> {
    let ctx = EvaluationContext::object(&workload.kind, TargetKind::Controller, &workload.meta);
    let controller = PassFragment::new(Fragment::Controller(&workload.original));
    run_pass(conf, catalog, &ctx, |_| &controller)
}

/// Container-scope checks against one container of the workload.
///
/// Pod-shaped container checks see a copy of the pod spec holding only `container`,
/// built the first time such a check runs.
pub fn apply_container_checks(
    conf: &Configuration,
    catalog: &CheckCatalog,
    workload: &Workload,
    container: &Container,
    is_init: bool,
) -> Result<ResultSet, ValidationError> {
    let ctx = EvaluationContext::container(&workload.kind, &workload.meta, &container.name, is_init);
    let synthetic = OnceCell::new();
    let pod = OnceCell::new();
    let own = PassFragment::new(Fragment::Container(container));
    run_pass(conf, catalog, &ctx, |definition| match definition.schema_target() {
        TargetKind::Pod => pod.get_or_init(|| {
            let spec = synthetic.get_or_init(|| single_container_pod(&workload.pod_spec, container));
            PassFragment::new(Fragment::Pod(spec))
        }),
        _ => &own,
    })
}

/// Other-object checks against an arbitrary resource.
pub fn apply_other_checks(
    conf: &Configuration,
    catalog: &CheckCatalog,
    resource: &Resource,
) -> Result<ResultSet, ValidationError> {
    let ctx = EvaluationContext::object(&resource.kind, TargetKind::Other, &resource.meta);
    let object = PassFragment::new(Fragment::Object(&resource.object));
    run_pass(conf, catalog, &ctx, |_| &object)
}
