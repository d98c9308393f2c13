use crate::app::matcher;
use crate::app::models::{DirectoryEntry, FindOptions, FindOutcome, ScanError};
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Find directories under `root` satisfying `options`.
pub fn find(options: &FindOptions, root: impl AsRef<Path>) -> FindOutcome {
    Scanner::new(options).scan(root)
}

/// Depth-first, pre-order walker. A directory is evaluated before any of its
/// children are visited.
pub struct Scanner<'a> {
    options: &'a FindOptions,
}

/// Matches and errors gathered by a single scan.
#[derive(Default)]
struct Accumulator {
    found: Vec<PathBuf>,
    errors: Vec<ScanError>,
}

impl<'a> Scanner<'a> {
    pub fn new(options: &'a FindOptions) -> Self {
        Self { options }
    }

    pub fn scan(&self, root: impl AsRef<Path>) -> FindOutcome {
        let root = root.as_ref();
        let mut acc = Accumulator::default();

        // The outcome is the same whether or not the walk was cut short.
        let _ = self.visit_root(root, &mut acc);

        let mut matches = acc.found;
        matches.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        matches.dedup();

        log::info!(
            "Scanned {:?}: {} match(es), {} error(s)",
            root,
            matches.len(),
            acc.errors.len()
        );
        FindOutcome {
            matches,
            errors: acc.errors,
        }
    }

    fn visit_root(&self, root: &Path, acc: &mut Accumulator) -> ControlFlow<()> {
        let meta = match fs::metadata(root) {
            Ok(meta) => meta,
            Err(err) => return self.fail(ScanError::stat(root, &err), acc),
        };
        let entry = DirectoryEntry {
            path: root.to_path_buf(),
            name: root.file_name().unwrap_or(root.as_os_str()).to_os_string(),
            depth: 0,
            is_dir: meta.is_dir(),
        };
        if !entry.is_dir {
            // Reading it reports the problem the same way as for any other path.
            let err = fs::read_dir(root).err().unwrap_or_else(not_a_directory);
            return self.fail(ScanError::read_dir(root, &err), acc);
        }
        self.visit(&entry, acc)
    }

    fn visit(&self, dir: &DirectoryEntry, acc: &mut Accumulator) -> ControlFlow<()> {
        if !self.should_check(dir) {
            return ControlFlow::Continue(());
        }

        let children = match read_entries(&dir.path, dir.depth) {
            Ok(children) => children,
            Err(err) => return self.fail(err, acc),
        };

        let is_root = dir.depth == 0;
        if !(is_root && self.options.exclude_root)
            && matcher::is_match(self.options, &dir.path, &children)
        {
            log::debug!("Matched {:?}", dir.path);
            acc.found.push(dir.path.clone());
        }

        for child in &children {
            self.visit(child, acc)?;
        }
        ControlFlow::Continue(())
    }

    fn should_check(&self, dir: &DirectoryEntry) -> bool {
        if !dir.is_dir {
            return false;
        }
        if !self.options.within_depth(dir.depth) {
            log::trace!("Skipping {:?}: deeper than limit", dir.path);
            return false;
        }
        if self.options.excludes.is_match(&dir.path) {
            log::debug!("Skipping excluded {:?}", dir.path);
            return false;
        }
        true
    }

    /// Records `err`; breaks the walk only in fail-fast mode.
    fn fail(&self, err: ScanError, acc: &mut Accumulator) -> ControlFlow<()> {
        log::warn!("{}", err);
        acc.errors.push(err);
        if self.options.fail_fast {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Lists the immediate children of `dir`, which sits at `depth`, sorted by name.
pub fn read_entries(dir: &Path, depth: usize) -> Result<Vec<DirectoryEntry>, ScanError> {
    let read = fs::read_dir(dir).map_err(|e| ScanError::read_dir(dir, &e))?;

    let mut entries = Vec::new();
    for item in read {
        let item = item.map_err(|e| ScanError::read_dir(dir, &e))?;
        let name = item.file_name();
        // Symlinks are reported as such, never followed.
        let is_dir = item.file_type().is_ok_and(|t| t.is_dir());
        entries.push(DirectoryEntry {
            path: child_path(dir, &name),
            name,
            depth: depth + 1,
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn child_path(dir: &Path, name: &std::ffi::OsStr) -> PathBuf {
    if dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        dir.join(name)
    }
}

fn not_a_directory() -> std::io::Error {
    std::io::Error::from(std::io::ErrorKind::NotADirectory)
}
