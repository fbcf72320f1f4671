use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Collapses `.` / `..` lexically while ensuring the path never climbs above the sandbox root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path attempted to escape sandbox via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not allowed in sandbox".into()),
                });
            },
        }
    }

    Ok(out)
}

/// Joins `path` to `root` and checks the result stays inside the sandbox.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let safe_rel = normalize_relative(path.as_ref())?;
    let joined = root.join(safe_rel);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(StorageError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Path resolves outside the sandbox".into()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => validate_ancestors(root, &joined),
        Err(e) => Err(StorageError::Io { source: e, context: None }),
    }
}

/// Physical location of a record: `<namespace>/<s1>/<s2>/<file>` where the shards are the
/// first two character pairs of the file name.
pub(crate) fn resolve_sharded(
    root: &Path,
    namespace: &str,
    file_name: &str,
) -> Result<PathBuf, StorageError> {
    let mut shard = PathBuf::from(namespace);
    if let (Some(first), Some(second)) = (file_name.get(0..2), file_name.get(2..4)) {
        shard.push(first);
        shard.push(second);
    }
    shard.push(file_name);

    resolve_path(root, shard)
}

/// Validates a path that does not exist yet through its first existing ancestor.
///
/// Canonicalizing the ancestor catches symlinks pointing outside the sandbox.
fn validate_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    if !joined.starts_with(root) {
        return Err(StorageError::PathTraversalAttempt {
            message: joined.display().to_string().into(),
            context: Some("Path is outside sandbox boundaries".into()),
        });
    }

    for ancestor in joined.ancestors() {
        if ancestor == root {
            return Ok(joined.to_path_buf());
        }
        if !ancestor.exists() {
            continue;
        }
        return match ancestor.canonicalize() {
            Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
            Ok(canonical) => Err(StorageError::PathTraversalAttempt {
                message: canonical.display().to_string().into(),
                context: Some("Existing parent directory is a symlink outside sandbox".into()),
            }),
            Err(e) => Err(StorageError::Io {
                source: e,
                context: Some("Failed to verify parent directory".into()),
            }),
        };
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("No valid parent directory found within sandbox".into()),
    })
}
