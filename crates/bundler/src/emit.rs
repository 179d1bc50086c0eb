//! Serializes the finalized store into the single output artifact.
//! Components are emitted in reverse finalization order, so dependencies
//! are registered before the components that use them.

use crate::error::{BundleError, BundleErrorKind, BundleResult};
use crate::store::ComponentStore;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Write every record's instance fragment, one per line, in reverse
/// finalization order. Appends are sequential and order-preserving.
pub fn write_bundle<W: Write>(store: &ComponentStore, writer: &mut W) -> io::Result<()> {
    for record in store.records_rev() {
        if let Some(instance) = &record.instance {
            writeln!(writer, "{}", instance)?;
        }
    }
    Ok(())
}

/// Produce the bundle artifact under the configured output directory and
/// return its path. The directory creation is idempotent and the file is
/// opened in append mode without truncation; clearing a previous artifact
/// is owned by the invocation layer. A failed build leaves whatever was
/// already appended in place; the artifact must be treated as unusable and
/// regenerated wholesale.
pub fn build(store: &ComponentStore) -> BundleResult<PathBuf> {
    let options = &store.context().options;
    fs::create_dir_all(&options.out_dir).map_err(|e| {
        BundleError::new(BundleErrorKind::OutputUnwritable)
            .with_additional_message(format!("{}: {}", options.out_dir.display(), e))
    })?;
    let path = options.out_dir.join(&options.out_file);
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .map_err(|e| {
            BundleError::new(BundleErrorKind::OutputUnwritable)
                .with_additional_message(format!("{}: {}", path.display(), e))
        })?;
    write_bundle(store, &mut file).map_err(|e| {
        BundleError::new(BundleErrorKind::OutputUnwritable)
            .with_additional_message(format!("{}: {}", path.display(), e))
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRecord;

    fn finalized(label: &str, is_root: bool) -> ComponentRecord {
        let mut record = if is_root {
            ComponentRecord::root(label, format!("/p/{}.vue", label).into())
        } else {
            ComponentRecord::new(label, format!("/p/{}.vue", label).into())
        };
        record.template = Some(format!("<{0}></{0}>", label.to_lowercase()));
        record.script = Some("data(){return{}}".into());
        record.style = Some(String::new());
        if let Some(form) = record.instance_form() {
            record.instance = Some(form.render());
        }
        record
    }

    #[test]
    fn emission_reverses_finalization_order() {
        let mut store = ComponentStore::default();
        store.put(finalized("App", true));
        store.put(finalized("Child", false));
        let mut out = Vec::new();
        write_bundle(&store, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("let Child = Vue.component(\"Child\""));
        assert!(lines[1].starts_with("new Vue({el:\"#app\""));
    }
}
