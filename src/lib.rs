//! List directories having specified flag files.
//!
//! The search walks a tree depth first, skipping excluded subtrees and
//! anything deeper than the depth limit. A directory is reported when one of
//! its files has a name matching a flag-file glob and, optionally, when a
//! check file inside it has content matching (or, inverted, not matching) a
//! regular expression.
//!
//! ```no_run
//! use ls_having::{find, FindOptions, GlobList};
//!
//! let options = FindOptions::new(GlobList::new(&["package.json"]).unwrap())
//!     .with_max_depth(Some(5))
//!     .with_excludes(GlobList::new(&["**/node_modules"]).unwrap());
//! let outcome = find(&options, ".");
//! for dir in &outcome.matches {
//!     println!("{}", dir.display());
//! }
//! ```

pub mod app;

pub use app::globs::GlobList;
pub use app::models::{DirectoryEntry, FindOptions, FindOutcome, ScanError};
pub use app::scanner::{find, read_entries, Scanner};
