use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One source file's parsed state. Created with only label/path set,
/// filled in while the record is dequeued, then finalized into the store
/// and never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComponentRecord {
    /// unique within a build; derived from the import binding name
    pub label: String,
    /// absolute filesystem path the source is read from
    pub path: PathBuf,
    /// selects the emitted instance form
    pub is_root: bool,
    pub template: Option<String>,
    pub script: Option<String>,
    pub style: Option<String>,
    /// derived output fragment, populated once template+script are known
    pub instance: Option<String>,
}

impl ComponentRecord {
    pub fn new(label: impl Into<String>, path: PathBuf) -> Self {
        Self {
            label: label.into(),
            path,
            is_root: false,
            template: None,
            script: None,
            style: None,
            instance: None,
        }
    }

    pub fn root(label: impl Into<String>, path: PathBuf) -> Self {
        Self {
            is_root: true,
            ..Self::new(label, path)
        }
    }

    /// A record is eligible for instance generation only after template
    /// and script extraction have run on it.
    pub fn instance_form(&self) -> Option<InstanceForm<'_>> {
        let template = self.template.as_deref()?;
        let script = self.script.as_deref()?;
        Some(if self.is_root {
            InstanceForm::Root { template, script }
        } else {
            InstanceForm::Named {
                label: &self.label,
                template,
                script,
            }
        })
    }
}

/// The two output fragment shapes, selected by `ComponentRecord::is_root`.
#[derive(Debug, PartialEq, Eq)]
pub enum InstanceForm<'a> {
    /// root construction binding template+script directly
    Root { template: &'a str, script: &'a str },
    /// registration using the label as both registry key and binding name
    Named {
        label: &'a str,
        template: &'a str,
        script: &'a str,
    },
}

impl InstanceForm<'_> {
    pub fn render(&self) -> String {
        match self {
            InstanceForm::Root { template, script } => format!(
                "new Vue({{el:\"#app\",template:`{}`,{}}});",
                template, script
            ),
            InstanceForm::Named {
                label,
                template,
                script,
            } => format!(
                "let {0} = Vue.component(\"{0}\", {{template:`{1}`,{2}}});",
                label, template, script
            ),
        }
    }
}
