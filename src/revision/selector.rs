use std::path::Path;

use tracing::info;

use crate::error::{DriftError, Result};
use crate::revision::RevisionSource;

/// One side of a comparison: raw table content plus a short label.
#[derive(Debug, Clone)]
pub struct VersionedContent {
    pub content: String,
    pub label: String,
}

/// The two table versions to diff, current first.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub current: VersionedContent,
    pub previous: VersionedContent,
}

/// Pick the two versions of `path` to compare.
///
/// If the working copy differs from the latest committed revision, compare
/// those two; otherwise compare the latest commit against the one before it.
/// With no history this is `NoHistory`; with a clean working copy and a
/// single commit it is `InsufficientHistory`, which callers treat as a clean
/// informational exit rather than a failure.
pub fn select_versions(source: &dyn RevisionSource, path: &Path) -> Result<Comparison> {
    let revisions = source.revisions(path)?;
    let latest = revisions.first().ok_or_else(|| DriftError::NoHistory {
        path: path.display().to_string(),
    })?;

    let working = source.working_copy(path)?;
    let latest_content = source.content_at(latest, path)?;
    let latest_label = source.short_label(latest);

    if working != latest_content {
        info!("working copy differs from latest commit {}", latest_label);
        return Ok(Comparison {
            current: VersionedContent {
                content: working,
                label: "filesystem".to_string(),
            },
            previous: VersionedContent {
                content: latest_content,
                label: latest_label,
            },
        });
    }

    let previous = revisions.get(1).ok_or(DriftError::InsufficientHistory)?;
    let previous_label = source.short_label(previous);
    info!(
        "working copy matches latest commit; comparing {} with {}",
        latest_label, previous_label
    );

    Ok(Comparison {
        current: VersionedContent {
            content: latest_content,
            label: latest_label,
        },
        previous: VersionedContent {
            content: source.content_at(previous, path)?,
            label: previous_label,
        },
    })
}
