//! Filesystem fetcher.
//!
//! # Responsibilities
//! - Strip the query string from the request URI
//! - Join the remaining path onto the base directory
//! - Reject paths that climb above the base directory
//! - Read whole regular files as UTF-8 text
//!
//! # Design Decisions
//! - Metadata is read without following symlinks, so links are not files
//! - No streaming and no size cap; intended for small static assets

use std::path::{Path, PathBuf};

use crate::origin::error::OriginError;
use crate::origin::upstream::FileResult;

/// Read the file addressed by `raw_uri` below `base_dir`.
pub async fn fetch(base_dir: &Path, raw_uri: &str) -> Result<FileResult, OriginError> {
    let target = resolve_target(base_dir, raw_uri)?;

    let metadata = match tokio::fs::symlink_metadata(&target).await {
        Ok(metadata) => metadata,
        Err(_) => {
            return Err(OriginError::NotFound(format!(
                "File {} does not exist",
                target.display()
            )))
        }
    };

    if !metadata.is_file() {
        return Err(OriginError::NotFound(format!(
            "{} is not a file.",
            target.display()
        )));
    }

    let contents = tokio::fs::read_to_string(&target).await?;
    tracing::debug!(path = %target.display(), bytes = contents.len(), "Read file from origin");

    Ok(FileResult { contents })
}

/// Map a request URI onto a path below `base_dir`.
///
/// `.` and empty segments are dropped; `..` pops a previously pushed segment
/// and is rejected when nothing is left to pop.
pub fn resolve_target(base_dir: &Path, raw_uri: &str) -> Result<PathBuf, OriginError> {
    let path = strip_query(raw_uri);
    let mut target = base_dir.to_path_buf();
    let mut depth = 0usize;

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if depth == 0 {
                    return Err(OriginError::NotFound(format!(
                        "Path {} escapes the origin directory",
                        path
                    )));
                }
                target.pop();
                depth -= 1;
            }
            segment => {
                target.push(segment);
                depth += 1;
            }
        }
    }

    Ok(target)
}

fn strip_query(raw_uri: &str) -> &str {
    let end = raw_uri.find(['?', '#']).unwrap_or(raw_uri.len());
    &raw_uri[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_joins_once() {
        let target = resolve_target(Path::new("/srv/site"), "/index.html?x=1").unwrap();
        assert_eq!(target, PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn nested_paths_and_dots() {
        let target = resolve_target(Path::new("/srv/site"), "/a/./b//c.css#top").unwrap();
        assert_eq!(target, PathBuf::from("/srv/site/a/b/c.css"));

        let target = resolve_target(Path::new("/srv/site"), "/a/../b.js").unwrap();
        assert_eq!(target, PathBuf::from("/srv/site/b.js"));
    }

    #[test]
    fn rejects_traversal_above_base() {
        let err = resolve_target(Path::new("/srv/site"), "/../etc/passwd").unwrap_err();
        assert!(matches!(err, OriginError::NotFound(_)));

        let err = resolve_target(Path::new("/srv/site"), "/a/../../secret").unwrap_err();
        assert!(matches!(err, OriginError::NotFound(_)));
    }

    #[test]
    fn root_uri_is_base_dir() {
        let target = resolve_target(Path::new("/srv/site"), "/?q").unwrap();
        assert_eq!(target, PathBuf::from("/srv/site"));
    }
}
