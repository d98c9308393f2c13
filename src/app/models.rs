use crate::app::globs::GlobList;
use regex::bytes::Regex;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Check pattern that accepts any content.
pub const UNIVERSAL_CHECK_REGEXP: &str = ".*";

/// Describes one search. Built once, then only read during traversal.
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Deepest level to look at, the root being 0. `None` means no limit.
    pub max_depth: Option<usize>,
    /// Directories whose path matches any of these are skipped with their subtree.
    pub excludes: GlobList,
    /// Never report the root, even if it matches.
    pub exclude_root: bool,
    /// A directory qualifies only if one of its files has a name matching these.
    pub flag_files: GlobList,
    /// File, relative to each candidate directory, whose content gets checked.
    pub check_file: Option<PathBuf>,
    pub check_regexp: Regex,
    /// Treat the check pattern not matching as the positive outcome.
    pub check_inverse: bool,
    /// Stop at the first read failure instead of skipping the unreadable directory.
    pub fail_fast: bool,
}

impl FindOptions {
    pub fn new(flag_files: GlobList) -> Self {
        Self {
            max_depth: None,
            excludes: GlobList::empty(),
            exclude_root: false,
            flag_files,
            check_file: None,
            check_regexp: universal_regexp(),
            check_inverse: false,
            fail_fast: false,
        }
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_excludes(mut self, excludes: GlobList) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_exclude_root(mut self, exclude_root: bool) -> Self {
        self.exclude_root = exclude_root;
        self
    }

    /// An empty path disables the content check.
    pub fn with_check_file(mut self, check_file: impl Into<PathBuf>) -> Self {
        let check_file = check_file.into();
        self.check_file = (!check_file.as_os_str().is_empty()).then_some(check_file);
        self
    }

    pub fn with_check_regexp(mut self, regexp: Regex) -> Self {
        self.check_regexp = regexp;
        self
    }

    pub fn with_check_inverse(mut self, inverse: bool) -> Self {
        self.check_inverse = inverse;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn check_regexp_is_universal(&self) -> bool {
        self.check_regexp.as_str() == UNIVERSAL_CHECK_REGEXP
    }

    pub(crate) fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

fn universal_regexp() -> Regex {
    Regex::new(UNIVERSAL_CHECK_REGEXP).expect("constant pattern compiles")
}

/// A directory child discovered during a scan.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub depth: usize,
    pub is_dir: bool,
}

/// A failure to look into part of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{}: {reason}", .path.display())]
    Stat { path: PathBuf, reason: String },
    #[error("{}: {reason}", .path.display())]
    ReadDir { path: PathBuf, reason: String },
}

impl ScanError {
    pub fn stat(path: &Path, err: &io::Error) -> Self {
        Self::Stat {
            path: path.to_path_buf(),
            reason: describe_io_error(err),
        }
    }

    pub fn read_dir(path: &Path, err: &io::Error) -> Self {
        Self::ReadDir {
            path: path.to_path_buf(),
            reason: describe_io_error(err),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Stat { path, .. } | Self::ReadDir { path, .. } => path,
        }
    }
}

/// Short lowercase reason, without the `(os error N)` suffix.
fn describe_io_error(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        io::ErrorKind::NotADirectory => "not a directory".to_string(),
        _ => err.to_string(),
    }
}

/// What a scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOutcome {
    /// Matching directories, ascending, without duplicates.
    pub matches: Vec<PathBuf>,
    /// Read failures in the order they were met.
    pub errors: Vec<ScanError>,
}

impl FindOutcome {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
