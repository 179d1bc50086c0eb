//! Line-based import discovery. An import line is tokenized by whitespace:
//! the binding name is the second token and the relative path is the first
//! quoted substring of the last token. Relative paths resolve against the
//! project root, never against the importing file's directory.

use crate::error::{BundleWarning, WarningHandler};
use lazy_static::lazy_static;
use path_clean::PathClean;
use regex::Regex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::path::{Path, PathBuf};

/// A newly discovered component: symbolic label plus resolved absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub label: String,
    pub path: PathBuf,
}

pub type ImportList = SmallVec<[ImportBinding; 4]>;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"["'`]([^"'`]*)["'`]"#).unwrap();
}

/// Scan `source` for import declarations and return the ones whose label is
/// not yet known. `known` is the label-to-path view over the union of
/// worklist and store at call time; dedup is keyed on the label, not the
/// path, and the first
/// discovery wins. A same-label candidate arriving from a different path is
/// reported through `warnings` and discarded.
pub fn resolve_imports<W: WarningHandler>(
    source: &str,
    project_root: &Path,
    known: &FxHashMap<String, PathBuf>,
    warnings: &W,
) -> ImportList {
    let mut found = ImportList::new();
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("import") {
            continue;
        }
        let label = match tokens.next() {
            Some(label) => label,
            None => continue,
        };
        let path_token = match tokens.last() {
            Some(token) => token,
            None => continue,
        };
        let rel = match QUOTED.captures(path_token) {
            Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
            None => continue,
        };
        let path = project_root.join(rel).clean();
        let kept = known
            .get(label)
            .cloned()
            .or_else(|| {
                found
                    .iter()
                    .find(|binding| binding.label == label)
                    .map(|binding| binding.path.clone())
            });
        if let Some(kept) = kept {
            if kept != path {
                warnings.on_warning(BundleWarning::DuplicateLabel {
                    label: label.to_owned(),
                    kept,
                    ignored: path,
                });
            }
            continue;
        }
        found.push(ImportBinding {
            label: label.to_owned(),
            path,
        });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::test::TestWarningHandler;
    use crate::error::VecWarningHandler;

    fn resolve(source: &str, known: &FxHashMap<String, PathBuf>) -> ImportList {
        resolve_imports(source, Path::new("/proj"), known, &TestWarningHandler)
    }

    #[test]
    fn finds_single_import() {
        let found = resolve("import Child from './Child.vue'", &FxHashMap::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Child");
        assert_eq!(found[0].path, PathBuf::from("/proj/Child.vue"));
    }

    #[test]
    fn all_three_quote_characters_work() {
        let source = "import A from \"./A.vue\"\nimport B from './B.vue'\nimport C from `./C.vue`";
        let found = resolve(source, &FxHashMap::default());
        let labels: Vec<_> = found.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn import_must_be_the_first_token() {
        let source = "let x = 1\n  leading import A from './A.vue'\n<template>x</template>";
        assert!(resolve(source, &FxHashMap::default()).is_empty());
    }

    #[test]
    fn short_or_unquoted_lines_are_skipped() {
        let cases = ["import", "import Child", "import Child from", "import Child from ./Child.vue"];
        for case in cases {
            assert!(resolve(case, &FxHashMap::default()).is_empty());
        }
    }

    #[test]
    fn relative_paths_resolve_against_project_root_only() {
        let found = resolve("import Shared from '../lib/Shared.vue'", &FxHashMap::default());
        assert_eq!(found[0].path, PathBuf::from("/lib/Shared.vue"));
    }

    #[test]
    fn known_labels_are_discarded() {
        let mut known = FxHashMap::default();
        known.insert("Child".to_owned(), PathBuf::from("/proj/Child.vue"));
        let handler = VecWarningHandler::default();
        let found = resolve_imports(
            "import Child from './Child.vue'",
            Path::new("/proj"),
            &known,
            &handler,
        );
        assert!(found.is_empty());
        // same resolved path: a plain diamond, not worth a warning
        assert!(handler.warning_mut().is_empty());
    }

    #[test]
    fn same_label_from_another_path_warns_and_keeps_first() {
        let mut known = FxHashMap::default();
        known.insert("Child".to_owned(), PathBuf::from("/proj/a/Child.vue"));
        let handler = VecWarningHandler::default();
        let found = resolve_imports(
            "import Child from './b/Child.vue'",
            Path::new("/proj"),
            &known,
            &handler,
        );
        assert!(found.is_empty());
        let warnings = handler.warning_mut();
        assert_eq!(
            warnings[0],
            BundleWarning::DuplicateLabel {
                label: "Child".into(),
                kept: "/proj/a/Child.vue".into(),
                ignored: "/proj/b/Child.vue".into(),
            }
        );
    }

    #[test]
    fn duplicate_within_one_file_is_deduped_too() {
        let source = "import Child from './Child.vue'\nimport Child from './Child.vue'";
        let found = resolve(source, &FxHashMap::default());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn no_imports_is_not_an_error() {
        assert!(resolve("<template><div/></template>", &FxHashMap::default()).is_empty());
    }
}
