use polaris_types::ids::{EXEMPTION_ANNOTATION_KEY, exemption_annotation_for};
use std::collections::BTreeMap;

/// Whether the manifest's annotations opt out of `check_id`.
///
/// The blanket key and the per-check key both count when their value is `"true"` in
/// any letter case. `disallowed` bypasses annotations entirely.
pub fn is_exempt(annotations: &BTreeMap<String, String>, check_id: &str, disallowed: bool) -> bool {
    if disallowed {
        return false;
    }
    let is_true = |key: &str| {
        annotations
            .get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    };
    is_true(EXEMPTION_ANNOTATION_KEY) || is_true(&exemption_annotation_for(check_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn blanket_annotation_exempts_every_check() {
        let a = annotations(&[("polaris.fairwinds.com/exempt", "TRUE")]);
        assert!(is_exempt(&a, "hostIPCSet", false));
        assert!(is_exempt(&a, "anything", false));
    }

    #[test]
    fn per_check_annotation_only_exempts_that_check() {
        let a = annotations(&[("polaris.fairwinds.com/hostIPCSet-exempt", "True")]);
        assert!(is_exempt(&a, "hostIPCSet", false));
        assert!(!is_exempt(&a, "hostPIDSet", false));
    }

    #[test]
    fn other_values_are_not_exempt() {
        for value in ["false", "yes", "1", "", " true"] {
            let a = annotations(&[("polaris.fairwinds.com/exempt", value)]);
            assert!(!is_exempt(&a, "hostIPCSet", false), "{value:?}");
        }
        assert!(!is_exempt(&BTreeMap::new(), "hostIPCSet", false));
    }

    #[test]
    fn disallowed_ignores_annotations() {
        let a = annotations(&[("polaris.fairwinds.com/exempt", "true")]);
        assert!(!is_exempt(&a, "hostIPCSet", true));
    }
}
