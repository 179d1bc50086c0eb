use crate::component::ComponentRecord;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// Per-build configuration. Constructed by the invocation layer and handed
/// into the pipeline; no process-wide state survives between builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// base directory for resolving relative import paths; the CLI passes
    /// the process working directory
    pub project_root: PathBuf,
    pub out_dir: PathBuf,
    pub out_file: PathBuf,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            project_root: ".".into(),
            out_dir: "dist".into(),
            out_file: "build.js".into(),
        }
    }
}

/// Compile-time context shared across all components of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub options: BundleOptions,
}

impl BuildContext {
    pub fn new(options: BundleOptions) -> Self {
        Self { options }
    }
}

/// Keyed collection of finalized component records. Append-only: records
/// are never removed or replaced except by a same-label reinsertion, which
/// is last-writer-wins and not an error.
#[derive(Debug, Default)]
pub struct ComponentStore {
    records: FxHashMap<String, ComponentRecord>,
    /// labels in finalization order; the emitter walks this reversed
    order: Vec<String>,
    root: Option<String>,
    context: BuildContext,
    insertions: usize,
}

impl ComponentStore {
    pub fn new(context: BuildContext) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }

    pub fn put(&mut self, record: ComponentRecord) {
        if record.is_root {
            self.root = Some(record.label.clone());
        }
        self.insertions += 1;
        if !self.records.contains_key(&record.label) {
            self.order.push(record.label.clone());
        }
        self.records.insert(record.label.clone(), record);
    }

    pub fn get(&self, label: &str) -> Option<&ComponentRecord> {
        self.records.get(label)
    }

    pub fn root(&self) -> Option<&ComponentRecord> {
        self.root.as_deref().and_then(|label| self.records.get(label))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// incremented on every put, never decremented
    pub fn insertions(&self) -> usize {
        self.insertions
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// finalized records in finalization order
    pub fn records(&self) -> impl Iterator<Item = &ComponentRecord> + '_ {
        self.order.iter().filter_map(move |label| self.records.get(label))
    }

    /// finalized records in reverse finalization order, the emission order
    pub fn records_rev(&self) -> impl Iterator<Item = &ComponentRecord> + '_ {
        self.order
            .iter()
            .rev()
            .filter_map(move |label| self.records.get(label))
    }
}
