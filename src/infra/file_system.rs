use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Lazily yields the direct entries of `directory`, at most `limit` of them,
/// in whatever order the filesystem returns them.
///
/// The limit is applied to entries examined, before any pattern filter
/// downstream, and the directory handle lives inside the iterator so it is
/// released as soon as the iterator is dropped. A missing or non-directory
/// target yields nothing rather than failing the run.
pub fn stream_entries(directory: &Path, limit: usize) -> Box<dyn Iterator<Item = DirEntry>> {
    if !directory.is_dir() {
        warn!(
            "Not a directory, nothing to list: {}",
            directory.display()
        );
        return Box::new(std::iter::empty());
    }

    debug!("Streaming entries of {}", directory.display());
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Error reading entry: {err}");
                None
            }
        })
        .take(limit);

    Box::new(walker)
}

/// Removes a single entry, file or directory. Best effort; the caller
/// decides whether a failure stops anything.
///
/// The entry type is read without following symlinks, so a link to a
/// directory is unlinked like any other file instead of being handed to
/// `remove_dir`.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    if path.symlink_metadata()?.file_type().is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Fills `directory` with empty files `<prefix>0`, `<prefix>1`, … until
/// `limit` files exist or creation fails. The first failure is the natural
/// stopping condition (out of inodes, disk full), not an error.
///
/// Returns how many files were created. Existing files with the same names
/// are simply reopened in append mode.
pub fn fill_directory(directory: &Path, prefix: &str, limit: usize) -> usize {
    let mut created = 0;

    for index in 0..limit {
        let path = directory.join(format!("{prefix}{index}"));
        match OpenOptions::new().append(true).create(true).open(&path) {
            Ok(_) => created += 1,
            Err(err) => {
                warn!(
                    "Stopping fill after {created} files, cannot create {}: {err}",
                    path.display()
                );
                break;
            }
        }
    }

    info!(
        "Created {created} files with prefix '{prefix}' in {}",
        directory.display()
    );
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_stream_yields_direct_entries_only() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.txt");
        touch(temp_dir.path(), "b.log");
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        touch(&temp_dir.path().join("sub"), "nested.txt");

        let names: Vec<String> = stream_entries(temp_dir.path(), usize::MAX)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();

        assert_eq!(names.len(), 3);
        assert!(names.contains(&"a.txt".to_string()));
        assert!(names.contains(&"b.log".to_string()));
        assert!(names.contains(&"sub".to_string()));
        assert!(!names.contains(&"nested.txt".to_string()));
    }

    #[test]
    fn test_stream_respects_limit() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..10 {
            touch(temp_dir.path(), &format!("file{i}"));
        }

        assert_eq!(stream_entries(temp_dir.path(), 4).count(), 4);
        assert_eq!(stream_entries(temp_dir.path(), 0).count(), 0);
        assert_eq!(stream_entries(temp_dir.path(), usize::MAX).count(), 10);
    }

    #[test]
    fn test_stream_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does_not_exist");
        assert_eq!(stream_entries(&missing, usize::MAX).count(), 0);

        // A plain file is not a directory either.
        touch(temp_dir.path(), "plain");
        assert_eq!(stream_entries(&temp_dir.path().join("plain"), usize::MAX).count(), 0);
    }

    #[test]
    fn test_remove_entry() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "victim");
        fs::create_dir(temp_dir.path().join("empty_dir")).unwrap();

        remove_entry(&temp_dir.path().join("victim")).unwrap();
        remove_entry(&temp_dir.path().join("empty_dir")).unwrap();
        assert!(!temp_dir.path().join("victim").exists());
        assert!(!temp_dir.path().join("empty_dir").exists());

        assert!(remove_entry(&temp_dir.path().join("gone")).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_remove_entry_symlink_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real_dir");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link_to_dir");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        remove_entry(&link).unwrap();

        // Only the link goes away, never what it points at.
        assert!(link.symlink_metadata().is_err());
        assert!(target.is_dir());
    }

    #[test]
    fn test_fill_creates_exact_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let created = fill_directory(temp_dir.path(), "tmp_file_", 5);

        assert_eq!(created, 5);
        let mut names: Vec<PathBuf> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| PathBuf::from(e.unwrap().file_name()))
            .collect();
        names.sort();
        let expected: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("tmp_file_{i}"))).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_fill_rerun_reopens_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(fill_directory(temp_dir.path(), "x", 3), 3);
        assert_eq!(fill_directory(temp_dir.path(), "x", 3), 3);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_fill_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does_not_exist");
        assert_eq!(fill_directory(&missing, "tmp_file_", 100), 0);
    }
}
