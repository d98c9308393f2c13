use crate::app::models::{DirectoryEntry, FindOptions};
use std::fs;
use std::path::Path;

/// Decides whether `dir`, whose children were already read, belongs in the result.
pub fn is_match(options: &FindOptions, dir: &Path, children: &[DirectoryEntry]) -> bool {
    has_flag_file(options, children) && passes_content_check(options, dir)
}

fn has_flag_file(options: &FindOptions, children: &[DirectoryEntry]) -> bool {
    children
        .iter()
        .any(|child| options.flag_files.is_match(Path::new(&child.name)))
}

fn passes_content_check(options: &FindOptions, dir: &Path) -> bool {
    let Some(check_file) = &options.check_file else {
        return true;
    };
    let target = dir.join(check_file);

    let raw = match fs::metadata(&target) {
        Err(err) => {
            log::trace!("Check file {:?} unavailable: {}", target, err);
            false
        }
        // Nothing to read; only the accept-all pattern counts as matching.
        Ok(meta) if meta.is_dir() => options.check_regexp_is_universal(),
        Ok(_) => match fs::read(&target) {
            Ok(content) => options.check_regexp.is_match(&content),
            Err(err) => {
                log::trace!("Check file {:?} unreadable: {}", target, err);
                false
            }
        },
    };

    raw != options.check_inverse
}
