pub mod git;
pub mod selector;

pub use git::GitRevisionSource;
pub use selector::{select_versions, Comparison, VersionedContent};

use crate::error::Result;
use std::path::Path;

/// Supplier of historical versions of a tracked file.
///
/// The core only needs the revision list for a path (newest first) and the
/// file content at a given revision; any version-control system can sit
/// behind this seam.
pub trait RevisionSource {
    /// Revision identifiers touching `path`, newest first.
    fn revisions(&self, path: &Path) -> Result<Vec<String>>;

    /// File content at one revision.
    fn content_at(&self, revision: &str, path: &Path) -> Result<String>;

    /// Current working-copy content of `path`.
    fn working_copy(&self, path: &Path) -> Result<String>;

    /// Short human-readable label for a revision identifier.
    fn short_label(&self, revision: &str) -> String {
        revision.chars().take(8).collect()
    }
}
