use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

pub(crate) const TMP_MARKER: &str = ".tplattmp.";
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes temporary files older than five minutes and prunes empty shard directories.
pub(crate) fn purge_tmp(root: &Path) {
    let (removed, failed) = remove_stale(root, SystemTime::now(), STALE_AFTER);
    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary files");
    }
}

fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    for entry in WalkDir::new(root).contents_first(true).into_iter().flatten() {
        let path = entry.path();
        if path == root {
            continue;
        }

        if entry.file_type().is_file() {
            if is_tmp(&entry) && is_stale(&entry, now, threshold) {
                match std::fs::remove_file(path) {
                    Ok(()) => removed += 1,
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Failed to remove temp file");
                        failed += 1;
                    },
                }
            }
        } else if entry.file_type().is_dir() {
            // Fails harmlessly on non-empty directories.
            let _ = std::fs::remove_dir(path);
        }
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_temp_files_are_removed() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let shard = tmp.path().join("ns").join("ab");
        std::fs::create_dir_all(&shard).expect("shard dir");
        let orphan = shard.join(format!("abcd{TMP_MARKER}7"));
        let record = shard.join("abcd");
        std::fs::write(&orphan, b"partial").expect("orphan");
        std::fs::write(&record, b"record").expect("record");

        let later = SystemTime::now() + Duration::from_secs(3600);
        let (removed, failed) = remove_stale(tmp.path(), later, STALE_AFTER);

        assert_eq!((removed, failed), (1, 0));
        assert!(!orphan.exists());
        assert!(record.exists());
    }

    #[test]
    fn fresh_temp_files_are_kept() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let orphan = tmp.path().join(format!("abcd{TMP_MARKER}1"));
        std::fs::write(&orphan, b"in flight").expect("orphan");

        let (removed, _) = remove_stale(tmp.path(), SystemTime::now(), STALE_AFTER);
        assert_eq!(removed, 0);
        assert!(orphan.exists());
    }
}
