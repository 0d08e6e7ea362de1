//! Property tests for pass-level invariants: ordering, idempotence and exemptions.

use crate::engine::{apply_container_checks, apply_pod_checks};
use crate::test_support::{all_checks, catalog, only_checks};
use crate::workload::validate_workload;
use polaris_check_catalog::BUILTIN_CHECK_ORDER;
use polaris_kube::Workload;
use polaris_test_util::{compliant_container, container_without_memory_limit, deployment};
use polaris_types::Severity;
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_true_spelling() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), 4).prop_map(|upper| {
        "true"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn arb_check_subset() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(BUILTIN_CHECK_ORDER.to_vec(), 1..=BUILTIN_CHECK_ORDER.len())
        .prop_shuffle()
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Warning), Just(Severity::Danger)]
}

fn arb_security_context() -> impl Strategy<Value = Value> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(non_root, privileged, ro)| {
        json!({
            "runAsNonRoot": non_root,
            "privileged": privileged,
            "readOnlyRootFilesystem": ro
        })
    })
}

fn messy_workload() -> Workload {
    deployment("web")
        .pod_field("hostIPC", json!(true))
        .container(container_without_memory_limit("app"))
        .container(json!({ "name": "sidecar", "image": "busybox" }))
        .init_container(json!({ "name": "setup", "image": "busybox:1.36" }))
        .workload()
        .expect("workload")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn results_are_ordered_by_check_id(ids in arb_check_subset(), severity in arb_severity()) {
        let conf = only_checks(&ids, severity);
        let catalog = catalog();
        let workload = messy_workload();

        let pod = apply_pod_checks(&conf, &catalog, &workload).expect("pass");
        let container =
            apply_container_checks(&conf, &catalog, &workload, &workload.pod_spec.containers[0], false)
                .expect("pass");

        for set in [pod, container] {
            let seen: Vec<&str> = set.ids().collect();
            let mut sorted = seen.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&seen, &sorted);
            prop_assert!(seen.iter().all(|id| ids.iter().any(|i| i == id)));
        }
    }

    #[test]
    fn repeated_passes_are_identical(ids in arb_check_subset()) {
        let conf = only_checks(&ids, Severity::Warning);
        let catalog = catalog();
        let workload = messy_workload();

        let first = validate_workload(&conf, &catalog, &workload).expect("first");
        let second = validate_workload(&conf, &catalog, &workload).expect("second");
        prop_assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
    }

    #[test]
    fn blanket_exemption_in_any_case_empties_every_pass(value in arb_true_spelling()) {
        let conf = all_checks(Severity::Danger);
        let workload = deployment("web")
            .annotation("polaris.fairwinds.com/exempt", &value)
            .pod_field("hostPID", json!(true))
            .container(json!({ "name": "app", "image": "nginx" }))
            .workload()
            .expect("workload");

        let result = validate_workload(&conf, &catalog(), &workload).expect("validate");
        prop_assert!(result.results.is_empty());
        let pod = result.pod_result.expect("pod result");
        prop_assert!(pod.results.is_empty());
        prop_assert!(pod.container_results.iter().all(|c| c.results.is_empty()));
    }

    #[test]
    fn disallowed_exemptions_keep_every_result(value in arb_true_spelling()) {
        let mut conf = all_checks(Severity::Warning);
        let plain = deployment("web").container(compliant_container("app"));
        let annotated = plain.clone().annotation("polaris.fairwinds.com/exempt", &value);

        let catalog = catalog();
        let expected = validate_workload(&conf, &catalog, &plain.workload().expect("w")).expect("v");

        conf.disallow_exemptions = true;
        let got = validate_workload(&conf, &catalog, &annotated.workload().expect("w")).expect("v");
        prop_assert_eq!(expected.summary(), got.summary());
        prop_assert_eq!(expected.pod_result, got.pod_result);
    }

    #[test]
    fn pod_shaped_container_checks_ignore_siblings(sibling in arb_security_context()) {
        let conf = only_checks(&["runAsRootAllowed"], Severity::Warning);
        let workload = deployment("web")
            .container(compliant_container("app"))
            .container(json!({ "name": "other", "image": "busybox:1", "securityContext": sibling }))
            .workload()
            .expect("workload");

        let results =
            apply_container_checks(&conf, &catalog(), &workload, &workload.pod_spec.containers[0], false)
                .expect("pass");
        prop_assert!(results.get("runAsRootAllowed").expect("evaluated").success);
    }
}
