use std::{
    env, fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use bundler::{BundleError, VecWarningHandler};
use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use path_clean::PathClean;

pub fn absolute_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    }
    .clean();

    Ok(absolute_path)
}

/// Render a fatal build error. When the error carries a source span and the
/// offending file is still readable, point at the span with a codespan
/// diagnostic; otherwise fall back to a plain line on stderr.
pub fn report_error(err: &BundleError) {
    let span: Range<usize> = err.location.clone().into();
    if span.end > span.start {
        if let Some(source) = err.path.as_ref().and_then(|p| fs::read_to_string(p).ok()) {
            if span.end <= source.len() {
                let mut files = SimpleFiles::new();
                let name = err
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_owned());
                let file_id = files.add(name, source);
                let diagnostic = Diagnostic::error()
                    .with_labels(vec![Label::primary(file_id, span).with_message(err.to_string())]);

                let writer = StandardStream::stderr(ColorChoice::Auto);
                let config = codespan_reporting::term::Config::default();

                if term::emit(&mut writer.lock(), &config, &files, &diagnostic).is_ok() {
                    return;
                }
            }
        }
    }
    eprintln!("error: {}", err);
}

pub fn report_warnings(handler: &VecWarningHandler) {
    for warning in handler.warning_mut().drain(..) {
        eprintln!("warning: {}", warning);
    }
}
