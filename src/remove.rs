//! File deletion and empty-directory pruning.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Predicate deciding whether a candidate file may be deleted.
/// Receives only the absolute path.
pub type Predicate<'a> = &'a dyn Fn(&Path) -> bool;

/// Delete each path the predicate approves (or all, without a predicate).
///
/// Fails fast on the first filesystem error: a missing or unwritable target
/// indicates a flaw in orphan detection, not a transient condition, so
/// remaining deletions are not attempted.
pub fn delete_files(paths: &[impl AsRef<Path>], predicate: Option<Predicate>, verbose: bool) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if let Some(approve) = predicate {
            if !approve(path) {
                continue;
            }
        }
        fs::remove_file(path)
            .with_context(|| format!("failed to remove \"{}\"", path.display()))?;
        if verbose {
            println!("Removed file \"{}\"", path.display());
        }
    }
    Ok(())
}

/// Remove every directory under `root` that is empty, deepest-first.
///
/// Deepest-first visiting means a parent emptied by the removal of its
/// children is itself removed in the same pass, so the end state matches
/// "repeat until no empty directory remains".
pub fn prune_empty_dirs(root: &Path, verbose: bool) -> Result<()> {
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: failed to access entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let is_empty = fs::read_dir(entry.path())
            .with_context(|| format!("failed to read \"{}\"", entry.path().display()))?
            .next()
            .is_none();
        if !is_empty {
            continue;
        }

        fs::remove_dir(entry.path())
            .with_context(|| format!("failed to remove \"{}\"", entry.path().display()))?;
        if verbose {
            let rel = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
            println!("Removed directory \"{}\"", rel.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_delete_files_all() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        delete_files(&[&a, &b], None, false).unwrap();
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_delete_files_predicate_veto() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("keep.js");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let keep_some: Predicate = &|p| !p.ends_with("keep.js");
        delete_files(&[&a, &b], Some(keep_some), false).unwrap();
        assert!(!a.exists());
        assert!(b.exists());
    }

    #[test]
    fn test_delete_files_missing_target_fails() {
        let dir = tempdir().unwrap();
        let ghost = dir.path().join("ghost.js");
        assert!(delete_files(&[&ghost], None, false).is_err());
    }

    #[test]
    fn test_prune_nested_empty_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::create_dir_all(dir.path().join("kept")).unwrap();
        fs::write(dir.path().join("kept/file.txt"), "x").unwrap();

        prune_empty_dirs(dir.path(), false).unwrap();
        // The whole empty chain goes in one pass; non-empty dirs stay.
        assert!(!dir.path().join("a").exists());
        assert!(dir.path().join("kept/file.txt").exists());
    }

    #[test]
    fn test_prune_keeps_root() {
        let dir = tempdir().unwrap();
        let root: PathBuf = dir.path().join("empty_root");
        fs::create_dir(&root).unwrap();

        prune_empty_dirs(&root, false).unwrap();
        assert!(root.exists());
    }
}
