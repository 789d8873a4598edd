use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{DriftError, Result};
use crate::revision::RevisionSource;

/// Revision source backed by the `git` command line, matching how the survey
/// repository versions its coordinate table.
pub struct GitRevisionSource {
    repo_root: PathBuf,
}

impl GitRevisionSource {
    /// Open the repository containing `start_dir`, resolving the root via
    /// `git rev-parse --show-toplevel`.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let output = Command::new("git")
            .arg("-C")
            .arg(start_dir)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;

        if !output.status.success() {
            return Err(DriftError::VersionControl(format!(
                "not a git repository: {}",
                start_dir.display()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(root = %root, "discovered git repository");
        Ok(Self {
            repo_root: PathBuf::from(root),
        })
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Path of `file` relative to the repository root, as git refers to it.
    fn relative_path(&self, file: &Path) -> Result<PathBuf> {
        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            std::env::current_dir()?.join(file)
        };
        absolute
            .strip_prefix(&self.repo_root)
            .map(|p| p.to_path_buf())
            .map_err(|_| {
                DriftError::VersionControl(format!(
                    "{} is outside repository {}",
                    file.display(),
                    self.repo_root.display()
                ))
            })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(DriftError::VersionControl(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RevisionSource for GitRevisionSource {
    fn revisions(&self, path: &Path) -> Result<Vec<String>> {
        let relative = self.relative_path(path)?;
        let log = self.git(&[
            "log",
            "--pretty=format:%H",
            "--",
            &relative.to_string_lossy(),
        ])?;
        Ok(log
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    fn content_at(&self, revision: &str, path: &Path) -> Result<String> {
        let relative = self.relative_path(path)?;
        let spec = format!("{}:{}", revision, relative.to_string_lossy());
        self.git(&["show", &spec])
            .map_err(|e| DriftError::RevisionLookup {
                revision: revision.to_string(),
                message: e.to_string(),
            })
    }

    fn working_copy(&self, path: &Path) -> Result<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(fs::read_to_string(absolute)?)
    }
}
