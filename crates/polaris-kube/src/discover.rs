use crate::parse::parse_objects;
use crate::workload::KubeObject;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use walkdir::WalkDir;

const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Find manifest files under `root`.
///
/// A file path is returned as-is. A directory is walked recursively for `.yaml`, `.yml`
/// and `.json` files; hidden directories are skipped.
pub fn discover_manifests(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !root.exists() {
        anyhow::bail!("audit path does not exist: {root}");
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut out: Vec<Utf8PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext))
        })
        .collect();

    // Stable order.
    out.sort();
    Ok(out)
}

/// Discover and parse every manifest under `root`.
pub fn load_path(root: &Utf8Path) -> anyhow::Result<Vec<KubeObject>> {
    let mut objects = Vec::new();
    for path in discover_manifests(root).context("discover manifests")? {
        let text = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
        let parsed = parse_objects(&text).with_context(|| format!("parse {path}"))?;
        tracing::debug!(path = %path, objects = parsed.len(), "loaded manifest file");
        objects.extend(parsed);
    }
    Ok(objects)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn discover_filters_extensions_and_hidden_dirs() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("b/deploy.yaml"), "kind: Pod\n");
        write_file(&root.join("a.json"), "{}");
        write_file(&root.join("c.yml"), "");
        write_file(&root.join("README.md"), "# nope");
        write_file(&root.join(".git/config.yaml"), "kind: Pod\n");

        let found = discover_manifests(&root).expect("discover");
        let rel: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(&root).expect("prefix").as_str().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a.json", "b/deploy.yaml", "c.yml"]);
    }

    #[test]
    fn discover_single_file_returns_it() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let file = root.join("pod.txt");
        write_file(&file, "kind: Pod\n");

        let found = discover_manifests(&file).expect("discover");
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn discover_missing_path_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let err = discover_manifests(&root.join("missing")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn load_path_reports_the_failing_file() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("bad.yaml"), "- just\n- a list\n");

        let err = load_path(&root).unwrap_err();
        assert!(format!("{err:#}").contains("bad.yaml"));
    }
}
