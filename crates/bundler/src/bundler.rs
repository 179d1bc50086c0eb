//! The worklist-driven build loop. One record is processed at a time:
//! load its source, extract the three sections, resolve fresh imports onto
//! the back of the queue, render the instance fragment and finalize the
//! record into the store. The loop terminates when the worklist is empty.

use crate::component::ComponentRecord;
use crate::error::{BundleError, BundleErrorKind, BundleResult, WarningHandler};
use crate::extract::{extract_script, extract_style, extract_template};
use crate::resolve::resolve_imports;
use crate::store::{BuildContext, BundleOptions, ComponentStore};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The pipeline's only I/O seam. File reads are one-shot: a failed load is
/// fatal to the whole build, never retried.
pub trait SourceLoader {
    fn load(&self, path: &Path) -> io::Result<String>;
}

#[derive(Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// FIFO queue of pending records plus a label-to-path map of everything
/// discovered so far. A label enters `discovered` exactly once and never
/// leaves, so the map always covers the union of worklist and store.
#[derive(Debug, Default)]
pub struct Worklist {
    queue: VecDeque<ComponentRecord>,
    discovered: FxHashMap<String, PathBuf>,
}

impl Worklist {
    pub fn seeded(root: ComponentRecord) -> Self {
        let mut worklist = Self::default();
        worklist.push(root);
        worklist
    }

    pub fn push(&mut self, record: ComponentRecord) {
        self.discovered
            .insert(record.label.clone(), record.path.clone());
        self.queue.push_back(record);
    }

    pub fn pop(&mut self) -> Option<ComponentRecord> {
        self.queue.pop_front()
    }

    pub fn discovered(&self) -> &FxHashMap<String, PathBuf> {
        &self.discovered
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// One build invocation. Constructed from explicit per-build state and
/// dropped with it; nothing is shared between builds.
pub struct Bundler<'a, L: SourceLoader, W: WarningHandler> {
    options: BundleOptions,
    loader: &'a L,
    warnings: &'a W,
}

impl<'a, L: SourceLoader, W: WarningHandler> Bundler<'a, L, W> {
    pub fn new(options: BundleOptions, loader: &'a L, warnings: &'a W) -> Self {
        Self {
            options,
            loader,
            warnings,
        }
    }

    /// Drain the import graph starting from `root` and return the fully
    /// finalized store. Discovery is breadth-first, which fixes the
    /// finalization order the emitter later reverses.
    pub fn bundle(&self, root: ComponentRecord) -> BundleResult<ComponentStore> {
        let mut store = ComponentStore::new(BuildContext::new(self.options.clone()));
        let mut worklist = Worklist::seeded(root);
        while let Some(mut record) = worklist.pop() {
            let source = self.loader.load(&record.path).map_err(|e| {
                BundleError::new(BundleErrorKind::UnreadableSource)
                    .with_additional_message(e.to_string())
                    .with_component(&record.label, &record.path)
            })?;
            let template = extract_template(&source)
                .map_err(|e| e.with_component(&record.label, &record.path))?;
            let script = extract_script(&source)
                .map_err(|e| e.with_component(&record.label, &record.path))?;
            let style = extract_style(&source)
                .map_err(|e| e.with_component(&record.label, &record.path))?;
            record.template = Some(template);
            record.script = Some(script);
            record.style = Some(style);
            let fresh = resolve_imports(
                &source,
                &self.options.project_root,
                worklist.discovered(),
                self.warnings,
            );
            for import in fresh {
                worklist.push(ComponentRecord::new(import.label, import.path));
            }
            let instance = record.instance_form().map(|form| form.render());
            record.instance = instance;
            store.put(record);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worklist_is_fifo_and_tracks_discovery() {
        let mut worklist = Worklist::seeded(ComponentRecord::root("App", "/p/App.vue".into()));
        worklist.push(ComponentRecord::new("A", "/p/A.vue".into()));
        worklist.push(ComponentRecord::new("B", "/p/B.vue".into()));
        assert_eq!(worklist.len(), 3);
        assert_eq!(worklist.pop().unwrap().label, "App");
        // popped records are being processed; they stay discovered
        assert!(worklist.discovered().contains_key("App"));
        assert_eq!(worklist.pop().unwrap().label, "A");
        assert_eq!(worklist.pop().unwrap().label, "B");
        assert!(worklist.pop().is_none());
        assert!(worklist.is_empty());
        assert_eq!(worklist.discovered().len(), 3);
    }
}
