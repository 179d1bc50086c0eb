use super::SourceLocation;
use std::cell::{RefCell, RefMut};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BundleErrorKind {
    /// an expected section opening tag is absent from the component source
    MissingSection,
    /// the script body cannot be isolated as a braced object literal
    MalformedSection,
    /// the component's resolved path cannot be read
    UnreadableSource,
    /// the output directory or the bundle artifact cannot be written
    OutputUnwritable,
}

/// A fatal build failure. Every kind aborts the whole build; there is no
/// per-component partial-success mode.
#[derive(Debug)]
pub struct BundleError {
    pub kind: BundleErrorKind,
    pub label: Option<String>,
    pub path: Option<PathBuf>,
    pub additional_message: Option<String>,
    pub location: SourceLocation,
}

impl BundleError {
    pub fn new(kind: BundleErrorKind) -> Self {
        Self {
            kind,
            label: None,
            path: None,
            additional_message: None,
            location: Default::default(),
        }
    }
    pub fn with_location(mut self, loc: SourceLocation) -> Self {
        self.location = loc;
        self
    }
    pub fn with_additional_message(mut self, msg: String) -> Self {
        self.additional_message = Some(msg);
        self
    }
    pub fn with_component(mut self, label: &str, path: &Path) -> Self {
        self.label = Some(label.to_owned());
        self.path = Some(path.to_owned());
        self
    }

    fn msg(&self) -> &'static str {
        msg(&self.kind)
    }
}

#[cold]
#[inline(never)]
fn msg(kind: &BundleErrorKind) -> &'static str {
    use BundleErrorKind::*;
    match *kind {
        MissingSection => "Section opening tag was not found: ",
        MalformedSection => "Script section does not contain an object literal body.",
        UnreadableSource => "Component source could not be read: ",
        OutputUnwritable => "Bundle artifact could not be written: ",
    }
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let Some(additional) = &self.additional_message {
            write!(f, "{}", additional)?;
        }
        if let (Some(label), Some(path)) = (&self.label, &self.path) {
            write!(f, " (component {} at {})", label, path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for BundleError {}

pub type BundleResult<T> = Result<T, BundleError>;

/// A non-fatal finding surfaced during a build that still completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleWarning {
    /// two distinct paths mapped to the same component label; the first
    /// discovery wins and the later one is never read
    DuplicateLabel {
        label: String,
        kept: PathBuf,
        ignored: PathBuf,
    },
}

impl fmt::Display for BundleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleWarning::DuplicateLabel {
                label,
                kept,
                ignored,
            } => write!(
                f,
                "label {} already resolved to {}; ignoring {}",
                label,
                kept.display(),
                ignored.display()
            ),
        }
    }
}

/// This trait handles advisory findings raised during a build.
/// NB: clone bound is not required but implementers are shared across
/// the resolver and the scheduling loop, so Rc/RefCell is a good way to
/// implement WarningHandler if collecting warnings is desired.
pub trait WarningHandler {
    // cannot use mut ref due to borrow semantics
    // use RefCell as implementation
    fn on_warning(&self, _: BundleWarning) {}
}

#[derive(Clone)]
pub struct VecWarningHandler {
    warnings: Rc<RefCell<Vec<BundleWarning>>>,
}
impl Default for VecWarningHandler {
    fn default() -> Self {
        Self {
            warnings: Rc::new(RefCell::new(vec![])),
        }
    }
}

impl VecWarningHandler {
    pub fn warning_mut(&self) -> RefMut<'_, Vec<BundleWarning>> {
        self.warnings.borrow_mut()
    }
}

impl WarningHandler for VecWarningHandler {
    fn on_warning(&self, w: BundleWarning) {
        self.warnings.borrow_mut().push(w);
    }
}

#[cfg(test)]
pub mod test {
    use super::WarningHandler;
    #[derive(Clone)]
    pub struct TestWarningHandler;
    impl WarningHandler for TestWarningHandler {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_includes_component_identity() {
        let err = BundleError::new(BundleErrorKind::MissingSection)
            .with_additional_message("template".into())
            .with_component("Child", Path::new("/proj/Child.vue"));
        assert_eq!(
            err.to_string(),
            "Section opening tag was not found: template (component Child at /proj/Child.vue)"
        );
    }

    #[test]
    fn vec_handler_collects_warnings() {
        let handler = VecWarningHandler::default();
        handler.on_warning(BundleWarning::DuplicateLabel {
            label: "Child".into(),
            kept: "/a/Child.vue".into(),
            ignored: "/b/Child.vue".into(),
        });
        assert_eq!(handler.warning_mut().len(), 1);
    }
}
