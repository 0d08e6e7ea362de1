use polaris_check_catalog::{BUILTIN_CHECK_ORDER, CheckCatalog, CheckDefinition};
use polaris_test_util::{compliant_container, container_without_memory_limit, deployment, ingress};
use polaris_types::Severity;
use polaris_validator::{
    Configuration, ValidationError, apply_container_checks, apply_other_checks, apply_pod_checks,
    validate_workload,
};
use serde_json::json;

const MEMORY_EXEMPT: &str = "polaris.fairwinds.com/memoryLimitsMissing-exempt";

fn catalog() -> CheckCatalog {
    CheckCatalog::builtin().expect("built-in catalog")
}

fn default_config() -> Configuration {
    let mut checks: std::collections::BTreeMap<String, Severity> = BUILTIN_CHECK_ORDER
        .iter()
        .map(|id| (id.to_string(), Severity::Warning))
        .collect();
    checks.insert("pullPolicyNotAlways".into(), Severity::Ignore);
    Configuration {
        checks,
        ..Configuration::default()
    }
}

fn missing_memory_limit() -> polaris_test_util::ManifestBuilder {
    deployment("web")
        .replicas(2)
        .container(container_without_memory_limit("app"))
}

#[test]
fn missing_memory_limit_fails_the_container_pass() {
    let workload = missing_memory_limit().workload().expect("workload");
    let result = validate_workload(&default_config(), &catalog(), &workload).expect("validate");

    let container = &result.pod_result.expect("pod").container_results[0];
    assert_eq!(container.name, "app");
    let memory = container.results.get("memoryLimitsMissing").expect("evaluated");
    assert!(!memory.success);
    assert_eq!(memory.severity, Severity::Warning);
    assert_eq!(memory.message, "Memory limits should be set");
    assert_eq!(memory.category, "Efficiency");
}

#[test]
fn per_check_annotation_removes_only_that_result() {
    let workload = missing_memory_limit()
        .annotation(MEMORY_EXEMPT, "true")
        .workload()
        .expect("workload");
    let conf = default_config();
    let container = &workload.pod_spec.containers[0];

    let results = apply_container_checks(&conf, &catalog(), &workload, container, false).expect("pass");
    assert!(!results.contains("memoryLimitsMissing"));
    assert!(results.contains("cpuLimitsMissing"));
}

#[test]
fn disallowed_exemptions_bring_the_failure_back() {
    let workload = missing_memory_limit()
        .annotation(MEMORY_EXEMPT, "true")
        .workload()
        .expect("workload");
    let conf = Configuration {
        disallow_exemptions: true,
        ..default_config()
    };
    let container = &workload.pod_spec.containers[0];

    let results = apply_container_checks(&conf, &catalog(), &workload, container, false).expect("pass");
    let memory = results.get("memoryLimitsMissing").expect("evaluated");
    assert!(!memory.success);
}

#[test]
fn unknown_custom_check_aborts_the_pass() {
    let workload = missing_memory_limit().workload().expect("workload");
    let mut conf = default_config();
    conf.checks.insert("myOrgCheck".into(), Severity::Danger);

    let err = apply_pod_checks(&conf, &catalog(), &workload).unwrap_err();
    assert!(matches!(err, ValidationError::CheckNotFound { .. }));
    assert_eq!(err.check_id(), "myOrgCheck");

    let err = validate_workload(&conf, &catalog(), &workload).unwrap_err();
    assert_eq!(err.check_id(), "myOrgCheck");
    assert!(err.to_string().contains("Deployment default/web"));
    assert!(err.to_string().contains("myOrgCheck"));
}

#[test]
fn custom_check_shadows_the_built_in() {
    let custom = CheckDefinition::from_yaml(
        "hostIPCSet",
        r#"
successMessage: custom ok
failureMessage: custom fail
category: Custom
target: Pod
schema:
  type: object
  required: [priorityClassName]
"#,
    )
    .expect("custom check");
    let mut conf = default_config();
    conf.custom_checks.insert("hostIPCSet".into(), custom);

    let workload = deployment("web")
        .container(compliant_container("app"))
        .workload()
        .expect("workload");
    let results = apply_pod_checks(&conf, &catalog(), &workload).expect("pass");

    let host_ipc = results.get("hostIPCSet").expect("evaluated");
    assert_eq!(host_ipc.category, "Custom");
    assert_eq!(host_ipc.message, "custom fail");
}

#[test]
fn malformed_custom_check_is_reported_with_its_id() {
    let custom = CheckDefinition::from_yaml(
        "brokenCheck",
        r#"
successMessage: ok
failureMessage: bad
category: Custom
target: Container
jsonSchema: "{ not json"
"#,
    )
    .expect("definition decodes; schema is compiled lazily");
    let mut conf = default_config();
    conf.custom_checks.insert("brokenCheck".into(), custom);

    let workload = deployment("web")
        .container(compliant_container("app"))
        .workload()
        .expect("workload");
    let container = &workload.pod_spec.containers[0];

    assert!(apply_pod_checks(&conf, &catalog(), &workload).is_ok());
    let err = apply_container_checks(&conf, &catalog(), &workload, container, false).unwrap_err();
    assert!(matches!(err, ValidationError::MalformedCheck { .. }));
    assert_eq!(err.check_id(), "brokenCheck");
}

#[test]
fn severity_changes_without_touching_the_catalog() {
    let workload = deployment("web")
        .pod_field("hostIPC", json!(true))
        .container(compliant_container("app"))
        .workload()
        .expect("workload");
    let catalog = catalog();

    let mut conf = default_config();
    let warn = apply_pod_checks(&conf, &catalog, &workload).expect("pass");
    conf.checks.insert("hostIPCSet".into(), Severity::Danger);
    let danger = apply_pod_checks(&conf, &catalog, &workload).expect("pass");

    assert_eq!(warn.get("hostIPCSet").expect("r").severity, Severity::Warning);
    assert_eq!(danger.get("hostIPCSet").expect("r").severity, Severity::Danger);
    assert_eq!(danger.summary().dangers, 1);
}

#[test]
fn other_object_checks_run_against_matching_kinds() {
    let conf = default_config();
    let catalog = catalog();

    let without_tls = apply_other_checks(&conf, &catalog, &ingress("web", false).expect("ingress"))
        .expect("pass");
    assert!(!without_tls.get("tlsSettingsMissing").expect("r").success);
    assert!(!without_tls.contains("pdbDisruptionsAllowedGreaterThanZero"));

    let with_tls = apply_other_checks(&conf, &catalog, &ingress("web", true).expect("ingress"))
        .expect("pass");
    assert!(with_tls.get("tlsSettingsMissing").expect("r").success);
}

#[test]
fn init_containers_are_validated_after_regular_ones() {
    let workload = deployment("web")
        .replicas(2)
        .container(compliant_container("app"))
        .init_container(json!({ "name": "setup", "image": "busybox:1.36" }))
        .workload()
        .expect("workload");

    let result = validate_workload(&default_config(), &catalog(), &workload).expect("validate");
    let pod = result.pod_result.expect("pod");
    let names: Vec<&str> = pod.container_results.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["app", "setup"]);

    let init = &pod.container_results[1].results;
    assert!(!init.contains("memoryLimitsMissing"));
    assert!(!init.contains("readinessProbeMissing"));
    assert!(init.contains("runAsPrivileged"));
}

#[test]
fn compliant_deployment_has_no_failures() {
    let workload = deployment("web")
        .replicas(3)
        .pod_field("priorityClassName", json!("high"))
        .container(compliant_container("app"))
        .workload()
        .expect("workload");

    let result = validate_workload(&default_config(), &catalog(), &workload).expect("validate");
    let summary = result.summary();
    assert_eq!(summary.warnings, 0);
    assert_eq!(summary.dangers, 0);
    assert_eq!(summary.score(), 100);
}

#[test]
fn checks_excluding_regular_containers_run_only_on_init_containers() {
    let init_only = CheckDefinition::from_yaml(
        "initImagePinned",
        r#"
successMessage: Init image is pinned
failureMessage: Init image should be pinned
category: Reliability
target: Container
containers:
  exclude: [container]
schema:
  type: object
  required: [image]
"#,
    )
    .expect("custom check");
    let mut conf = default_config();
    conf.checks.insert("initImagePinned".into(), Severity::Warning);
    conf.custom_checks.insert("initImagePinned".into(), init_only);

    let workload = deployment("web")
        .container(compliant_container("app"))
        .init_container(json!({ "name": "setup", "image": "busybox:1.36" }))
        .workload()
        .expect("workload");
    let catalog = catalog();

    let regular =
        apply_container_checks(&conf, &catalog, &workload, &workload.pod_spec.containers[0], false)
            .expect("pass");
    let init = apply_container_checks(
        &conf,
        &catalog,
        &workload,
        &workload.pod_spec.init_containers[0],
        true,
    )
    .expect("pass");

    assert!(!regular.contains("initImagePinned"));
    assert!(init.get("initImagePinned").expect("evaluated").success);
}

#[test]
fn blanket_annotation_empties_other_object_results() {
    let mut resource = ingress("web", false).expect("ingress");
    resource
        .meta
        .annotations
        .insert("polaris.fairwinds.com/exempt".into(), "true".into());

    let results = apply_other_checks(&default_config(), &catalog(), &resource).expect("pass");
    assert!(results.is_empty());
}
