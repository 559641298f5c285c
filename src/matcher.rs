//! Glob matching over a directory tree.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compile a set of glob patterns. An empty set matches nothing.
fn build_globset<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern \"{pattern}\""))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile glob patterns")
}

/// Find all files under `root` whose path relative to `root` matches at least
/// one of `patterns` and none of `exclude`.
///
/// Returns absolute paths, sorted lexically by relative path. Directories are
/// never returned. Fails if `root` does not exist; an empty pattern set
/// simply yields no matches.
pub fn match_files(root: &Path, patterns: &[&str], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot scan \"{}\"", root.display()))?;

    let include = build_globset(patterns.iter().copied())?;
    let exclude = build_globset(exclude.iter().map(String::as_str))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: failed to access entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let rel = match entry.path().strip_prefix(&root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        if include.is_match(rel) && !exclude.is_match(rel) {
            files.push(entry.path().to_path_buf());
        }
    }

    // All paths share the root prefix, so sorting the absolute paths orders
    // them by relative path as well.
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_match_files_only_files_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/two.js"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::create_dir_all(dir.path().join("c.js")).unwrap(); // directory, must not match

        let files = match_files(dir.path(), &["**/*.js"], &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path().canonicalize().unwrap()).unwrap())
            .collect();
        assert_eq!(names, [Path::new("a.js"), Path::new("b/two.js")]);
    }

    #[test]
    fn test_match_files_exclude() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();
        fs::write(dir.path().join("other.js"), "").unwrap();

        let files =
            match_files(dir.path(), &["**/*.js"], &[String::from("**/other.*")]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("index.js"));
    }

    #[test]
    fn test_match_files_brace_alternation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js.map"), "").unwrap();
        fs::write(dir.path().join("index.d.ts"), "").unwrap();
        fs::write(dir.path().join("index.ts"), "").unwrap();

        let files = match_files(dir.path(), &["**/*.{js.map,d.ts}"], &[]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_match_files_empty_patterns() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();

        let files = match_files(dir.path(), &[], &[]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_match_files_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        assert!(match_files(&missing, &["**/*"], &[]).is_err());
    }
}
