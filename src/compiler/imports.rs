//! Transitive source collection for the compiler input.
//!
//! Solidity sources name their dependencies with `import` statements. The
//! compiler receives every source unit up front, so imports are resolved
//! here: relative paths against the importing unit, bare paths against the
//! local dependency store (the original toolchain read them from
//! `node_modules/`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extract the quoted path from one `import` statement line, if any.
///
/// Handles `import "x"`, `import 'x'`, and `import {A} from "x"`.
pub fn import_path(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if !line.starts_with("import") {
        return None;
    }
    let rest = &line["import".len()..];
    let open = rest.find(['"', '\''])?;
    let quote = rest.as_bytes()[open] as char;
    let body = &rest[open + 1..];
    let close = body.find(quote)?;
    Some(&body[..close])
}

/// Normalize a unit path: resolve `.` and `..` segments textually.
fn normalize_unit(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Resolve one import as seen from `importer` (a unit name) to a
/// `(unit_name, filesystem_path)` pair.
pub fn resolve_import(
    import: &str,
    importer: &str,
    importer_path: &Path,
    lib_dir: &Path,
) -> (String, PathBuf) {
    if import.starts_with("./") || import.starts_with("../") {
        let parent = match importer.rfind('/') {
            Some(idx) => &importer[..idx],
            None => "",
        };
        let unit = normalize_unit(&format!("{}/{}", parent, import));
        let base = importer_path.parent().unwrap_or(Path::new(""));
        (unit, base.join(import))
    } else {
        (import.to_string(), lib_dir.join(import))
    }
}

/// Read the named contracts and everything they transitively import.
///
/// Returns unit name → source text, keyed the way solc will key its output.
/// An import whose file cannot be read is logged and skipped; solc then
/// reports the unresolved name at error severity.
pub fn collect_sources(
    names: &[String],
    contracts_dir: &Path,
    lib_dir: &Path,
) -> Result<BTreeMap<String, String>, (PathBuf, std::io::Error)> {
    let mut sources: BTreeMap<String, String> = BTreeMap::new();
    let mut worklist: Vec<(String, PathBuf)> = names
        .iter()
        .map(|name| {
            (
                name.clone(),
                contracts_dir.join(format!("{}.sol", name)),
            )
        })
        .collect();
    while let Some((unit, path)) = worklist.pop() {
        if sources.contains_key(&unit) {
            continue;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            // A missing root contract is the caller's error; a missing
            // import becomes a solc diagnostic.
            Err(e) if names.iter().any(|name| *name == unit) => return Err((path, e)),
            Err(e) => {
                tracing::warn!(unit = %unit, path = %path.display(), error = %e, "Import not found");
                continue;
            }
        };

        for line in text.lines() {
            if let Some(import) = import_path(line) {
                let (dep_unit, dep_path) = resolve_import(import, &unit, &path, lib_dir);
                if !sources.contains_key(&dep_unit) {
                    worklist.push((dep_unit, dep_path));
                }
            }
        }

        sources.insert(unit, text);
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_path_forms() {
        assert_eq!(import_path(r#"import "./Base.sol";"#), Some("./Base.sol"));
        assert_eq!(import_path("import './Base.sol';"), Some("./Base.sol"));
        assert_eq!(
            import_path(r#"import {Role} from "@openzeppelin/contracts/access/Roles.sol";"#),
            Some("@openzeppelin/contracts/access/Roles.sol")
        );
        assert_eq!(import_path("pragma solidity ^0.8.0;"), None);
        assert_eq!(import_path(r#"// import "commented.sol";"#), None);
    }

    #[test]
    fn test_resolve_relative_vs_bare() {
        let lib = Path::new("node_modules");
        let importer_path = Path::new("contracts/MyToken.sol");

        let (unit, path) = resolve_import("./Base.sol", "MyToken", importer_path, lib);
        assert_eq!(unit, "Base.sol");
        assert_eq!(path, Path::new("contracts/./Base.sol"));

        let (unit, path) = resolve_import(
            "@openzeppelin/contracts/utils/Context.sol",
            "MyToken",
            importer_path,
            lib,
        );
        assert_eq!(unit, "@openzeppelin/contracts/utils/Context.sol");
        assert_eq!(
            path,
            Path::new("node_modules/@openzeppelin/contracts/utils/Context.sol")
        );
    }

    #[test]
    fn test_collect_transitive_sources() {
        let dir = TempDir::new().unwrap();
        let contracts = dir.path().join("contracts");
        std::fs::create_dir_all(&contracts).unwrap();
        std::fs::write(
            contracts.join("MyToken.sol"),
            "import \"./Base.sol\";\ncontract MyToken {}\n",
        )
        .unwrap();
        std::fs::write(contracts.join("Base.sol"), "contract Base {}\n").unwrap();

        let sources = collect_sources(
            &["MyToken".to_string()],
            &contracts,
            &dir.path().join("node_modules"),
        )
        .unwrap();

        assert_eq!(sources.len(), 2);
        assert!(sources.contains_key("MyToken"));
        assert!(sources.contains_key("Base.sol"));
    }

    #[test]
    fn test_missing_root_contract_fails() {
        let dir = TempDir::new().unwrap();
        let err = collect_sources(
            &["Ghost".to_string()],
            dir.path(),
            &dir.path().join("node_modules"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_import_is_skipped() {
        let dir = TempDir::new().unwrap();
        let contracts = dir.path().join("contracts");
        std::fs::create_dir_all(&contracts).unwrap();
        std::fs::write(
            contracts.join("MyToken.sol"),
            "import \"@vendor/Gone.sol\";\ncontract MyToken {}\n",
        )
        .unwrap();

        // The unresolved import is left for solc to diagnose.
        let sources = collect_sources(
            &["MyToken".to_string()],
            &contracts,
            &dir.path().join("node_modules"),
        )
        .unwrap();
        assert_eq!(sources.len(), 1);
    }
}
