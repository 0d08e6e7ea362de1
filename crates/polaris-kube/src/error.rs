use thiserror::Error;

/// Failure to turn manifest text into polaris objects.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("document {index}: invalid YAML: {source}")]
    Yaml {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("document {index}: expected a mapping at the top level")]
    NotAnObject { index: usize },

    #[error("object is missing a string `kind`")]
    MissingKind,

    #[error("{kind}: invalid metadata: {source}")]
    Metadata {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} {name}: no pod spec at {pointer}")]
    MissingPodSpec {
        kind: String,
        name: String,
        pointer: &'static str,
    },

    #[error("{kind} {name}: invalid pod spec: {source}")]
    PodSpec {
        kind: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
