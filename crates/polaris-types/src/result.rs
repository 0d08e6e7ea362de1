use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity is configured per check ID, never stored on the check itself.
///
/// `ignore` means "do not run": checks configured as ignored are never actionable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ignore,
    Warning,
    Danger,
}

impl Severity {
    pub fn is_actionable(self) -> bool {
        self != Severity::Ignore
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ignore => "ignore",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural scope a check runs against.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum TargetKind {
    Controller,
    Pod,
    Container,
    Other,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Controller => "Controller",
            TargetKind::Pod => "Pod",
            TargetKind::Container => "Container",
            TargetKind::Other => "Other",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check against one fragment of a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResultMessage {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "Severity")]
    pub severity: Severity,
    #[serde(rename = "Category")]
    pub category: String,
}

/// Results of one pass, keyed by check ID.
///
/// Backed by a `BTreeMap`, so iteration and serialization are always in
/// lexicographic check-ID order, regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<String, ResultMessage>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result under its own ID, replacing any previous result for that ID.
    pub fn insert(&mut self, result: ResultMessage) {
        self.0.insert(result.id.clone(), result);
    }

    pub fn get(&self, check_id: &str) -> Option<&ResultMessage> {
        self.0.get(check_id)
    }

    pub fn contains(&self, check_id: &str) -> bool {
        self.0.contains_key(check_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultMessage> {
        self.0.values()
    }

    pub fn summary(&self) -> CountSummary {
        let mut counts = CountSummary::default();
        for result in self.iter() {
            counts.add_result(result);
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultMessage;
    type IntoIter = std::collections::btree_map::Values<'a, String, ResultMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

impl FromIterator<ResultMessage> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ResultMessage>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for result in iter {
            set.insert(result);
        }
        set
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CountSummary {
    pub successes: u32,
    pub warnings: u32,
    pub dangers: u32,
}

impl CountSummary {
    pub fn add_result(&mut self, result: &ResultMessage) {
        if result.success {
            self.successes += 1;
            return;
        }
        match result.severity {
            Severity::Warning => self.warnings += 1,
            Severity::Danger => self.dangers += 1,
            Severity::Ignore => {}
        }
    }

    pub fn add(&mut self, other: CountSummary) {
        self.successes += other.successes;
        self.warnings += other.warnings;
        self.dangers += other.dangers;
    }

    /// Score in `0..=100`. Successes and dangers weigh double, warnings single.
    ///
    /// An empty summary scores 100.
    pub fn score(&self) -> u32 {
        let weighted_successes = u64::from(self.successes) * 2;
        let total = weighted_successes + u64::from(self.warnings) + u64::from(self.dangers) * 2;
        if total == 0 {
            return 100;
        }
        (weighted_successes * 100 / total) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, success: bool, severity: Severity) -> ResultMessage {
        ResultMessage {
            id: id.to_string(),
            message: String::new(),
            success,
            severity,
            category: "Security".to_string(),
        }
    }

    #[test]
    fn result_set_iterates_by_check_id() {
        let set: ResultSet = vec![
            result("tagNotSpecified", true, Severity::Danger),
            result("cpuLimitsMissing", false, Severity::Warning),
            result("hostIPCSet", true, Severity::Danger),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = set.ids().collect();
        assert_eq!(ids, vec!["cpuLimitsMissing", "hostIPCSet", "tagNotSpecified"]);
    }

    #[test]
    fn result_set_serializes_as_ordered_object() {
        let mut set = ResultSet::new();
        set.insert(result("b", true, Severity::Warning));
        set.insert(result("a", false, Severity::Danger));

        let json = serde_json::to_string(&set).expect("serialize");
        assert!(json.find("\"a\"").expect("a") < json.find("\"b\"").expect("b"));
        assert!(json.contains("\"ID\":\"a\""));
        assert!(json.contains("\"Severity\":\"danger\""));
    }

    #[test]
    fn summary_counts_failures_by_severity() {
        let set: ResultSet = vec![
            result("a", true, Severity::Danger),
            result("b", false, Severity::Warning),
            result("c", false, Severity::Danger),
            result("d", false, Severity::Danger),
        ]
        .into_iter()
        .collect();

        let summary = set.summary();
        assert_eq!(summary.successes, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.dangers, 2);
    }

    #[test]
    fn score_weights_successes_and_dangers_double() {
        let summary = CountSummary {
            successes: 3,
            warnings: 2,
            dangers: 1,
        };
        // 6 / (6 + 2 + 2)
        assert_eq!(summary.score(), 60);
        assert_eq!(CountSummary::default().score(), 100);
    }
}
