//! Core pipeline of the single-file-component bundler: discover component
//! files through their import graph, extract template/script/style sections
//! and assemble one dependency-ordered output artifact.

use std::ops::Range;

pub mod bundler;
pub mod component;
pub mod emit;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod store;
pub mod util;

pub use crate::bundler::{Bundler, FsLoader, SourceLoader, Worklist};
pub use crate::component::{ComponentRecord, InstanceForm};
pub use crate::error::{
    BundleError, BundleErrorKind, BundleResult, BundleWarning, VecWarningHandler, WarningHandler,
};
pub use crate::store::{BuildContext, BundleOptions, ComponentStore};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Position {
    /// the 0-indexed byte offset in the source str
    pub offset: usize,
    /// the line number in the source code
    pub line: usize,
    /// the column number in the source code
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;
        for c in source[..offset].chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            offset,
            line,
            column,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn from_span(source: &str, start: usize, end: usize) -> Self {
        Self {
            start: Position::from_offset(source, start),
            end: Position::from_offset(source, end),
        }
    }
}

impl From<SourceLocation> for Range<usize> {
    fn from(location: SourceLocation) -> Self {
        location.start.offset..location.end.offset
    }
}
