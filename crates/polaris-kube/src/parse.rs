use crate::error::ManifestError;
use crate::workload::KubeObject;
use serde::Deserialize;
use serde_json::Value;

/// Split multi-document YAML (or JSON) into objects.
///
/// Empty documents are dropped and `kind: List` documents are expanded into their items.
/// **Never panics** on any input.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, ManifestError> {
    let mut out = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value =
            Value::deserialize(document).map_err(|source| ManifestError::Yaml { index, source })?;
        match value {
            Value::Null => continue,
            Value::Object(_) => push_expanded(value, &mut out),
            _ => return Err(ManifestError::NotAnObject { index }),
        }
    }
    Ok(out)
}

/// Parse manifest text and classify every object as a workload or a plain resource.
pub fn parse_objects(text: &str) -> Result<Vec<KubeObject>, ManifestError> {
    parse_documents(text)?
        .into_iter()
        .map(KubeObject::from_value)
        .collect()
}

fn push_expanded(value: Value, out: &mut Vec<Value>) {
    let is_list = value.get("kind").and_then(Value::as_str) == Some("List");
    if !is_list {
        out.push(value);
        return;
    }
    if let Some(Value::Array(items)) = value.get("items") {
        for item in items.iter().filter(|i| i.is_object()) {
            push_expanded(item.clone(), out);
        }
    }
}
