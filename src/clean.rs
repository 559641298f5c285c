//! Cleanup policies: which compiled outputs go, which stay.
//!
//! `clean_src` walks a mixed source tree and removes the compiled `.js`
//! output sitting next to its `.ts`/`.tsx` source, together with the
//! `.js.map`/`.d.ts` companions the compiler emitted for it. A `.js` file
//! with no source sibling is treated as hand-written JavaScript and kept.
//! `clean_match` is the blunt variant for a separate dist tree: everything
//! matching the pattern is presumed disposable.

use crate::matcher::match_files;
use crate::remove::{delete_files, prune_empty_dirs, Predicate};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Companion suffixes recognized as compiled output, keyed off a shared base
/// path. Order matters: suffix detection takes the first match.
pub const EXTENSIONS: [&str; 3] = [".js", ".js.map", ".d.ts"];

/// Options for [`clean_match`].
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Directory tree to scan.
    pub root: PathBuf,
    /// Glob patterns whose matches are never touched.
    pub exclude: Vec<String>,
    /// Remove directories left empty afterwards. `None` means the policy
    /// default: off for `clean_match`.
    pub remove_empty_dirs: Option<bool>,
    /// Log one line per removal.
    pub verbose: bool,
}

/// Options for [`clean_src`].
#[derive(Debug, Clone, Default)]
pub struct CleanSrcOptions {
    /// Directory tree to scan.
    pub root: PathBuf,
    /// Glob patterns whose matches are never touched.
    pub exclude: Vec<String>,
    /// Delete every matched `.js` file, whether or not a source sibling
    /// exists.
    pub remove_all_js: bool,
    /// Remove directories left empty afterwards. `None` means the policy
    /// default: on for `clean_src`.
    pub remove_empty_dirs: Option<bool>,
    /// Log one line per removal.
    pub verbose: bool,
}

/// Options for the composite [`cleanup`] entry point.
#[derive(Debug, Clone, Default)]
pub struct CleanupOptions {
    /// Base directory against which relative `src`/`dist` arguments are
    /// resolved. Absolute arguments are used as-is.
    pub root: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub remove_all_js: bool,
    pub remove_empty_dirs: Option<bool>,
    pub verbose: bool,
}

/// True if a TypeScript source exists for the given base path.
fn has_source(base: &str) -> bool {
    Path::new(&format!("{base}.ts")).exists() || Path::new(&format!("{base}.tsx")).exists()
}

/// The base path of `path` once its recognized companion suffix is stripped,
/// or `None` if no suffix matches (or the path is not UTF-8).
fn strip_known_suffix(path: &Path) -> Option<(String, &'static str)> {
    let s = path.to_str()?;
    let ext = EXTENSIONS.iter().find(|ext| s.ends_with(*ext))?;
    Some((s[..s.len() - ext.len()].to_string(), ext))
}

/// Remove compiled output from a source tree. See the module docs for the
/// retention rule.
pub fn clean_src(options: &CleanSrcOptions) -> Result<()> {
    clean_src_with(options, None)
}

/// [`clean_src`] with a caller-supplied predicate gating each deletion.
pub fn clean_src_with(options: &CleanSrcOptions, predicate: Option<Predicate>) -> Result<()> {
    // Pass 1: .js files. Delete when a source sibling exists (the file is
    // regenerable output) or when remove_all_js forces it.
    let js_files = match_files(&options.root, &["**/*.js"], &options.exclude)?;
    let doomed: Vec<PathBuf> = js_files
        .into_iter()
        .filter(|f| {
            if options.remove_all_js {
                return true;
            }
            match strip_known_suffix(f) {
                Some((base, _)) => has_source(&base),
                None => false,
            }
        })
        .collect();
    delete_files(&doomed, predicate, options.verbose)?;

    // Pass 2: companion files. Keep a companion only while its .js sibling
    // still exists (observing the deletions above) with no source sibling;
    // remove_all_js is deliberately not consulted here.
    let companions = match_files(&options.root, &["**/*.{js.map,d.ts}"], &options.exclude)?;
    let doomed: Vec<PathBuf> = companions
        .into_iter()
        .filter(|f| match strip_known_suffix(f) {
            Some((base, _)) => {
                !(Path::new(&format!("{base}.js")).exists() && !has_source(&base))
            }
            None => false,
        })
        .collect();
    delete_files(&doomed, predicate, options.verbose)?;

    if options.remove_empty_dirs.unwrap_or(true) {
        prune_empty_dirs(&options.root, options.verbose)?;
    }
    Ok(())
}

/// Delete every file under `options.root` matching one of `patterns`.
pub fn clean_match(patterns: &[&str], options: &CleanOptions) -> Result<()> {
    clean_match_with(patterns, options, None)
}

/// [`clean_match`] with a caller-supplied predicate gating each deletion.
pub fn clean_match_with(
    patterns: &[&str],
    options: &CleanOptions,
    predicate: Option<Predicate>,
) -> Result<()> {
    let files = match_files(&options.root, patterns, &options.exclude)?;
    delete_files(&files, predicate, options.verbose)?;

    if options.remove_empty_dirs.unwrap_or(false) {
        prune_empty_dirs(&options.root, options.verbose)?;
    }
    Ok(())
}

/// One-shot cleanup of a source tree and/or a distribution tree.
///
/// `src` gets the source policy ([`clean_src`]); `dist` gets an
/// unconditional sweep of all compiled output ([`clean_match`]).
pub fn cleanup(src: Option<&Path>, dist: Option<&Path>, options: &CleanupOptions) -> Result<()> {
    cleanup_with(src, dist, options, None)
}

/// [`cleanup`] with a caller-supplied predicate gating each deletion.
pub fn cleanup_with(
    src: Option<&Path>,
    dist: Option<&Path>,
    options: &CleanupOptions,
    predicate: Option<Predicate>,
) -> Result<()> {
    let resolve = |dir: &Path| match &options.root {
        Some(root) => root.join(dir),
        None => dir.to_path_buf(),
    };

    if let Some(src) = src {
        clean_src_with(
            &CleanSrcOptions {
                root: resolve(src),
                exclude: options.exclude.clone(),
                remove_all_js: options.remove_all_js,
                remove_empty_dirs: options.remove_empty_dirs,
                verbose: options.verbose,
            },
            predicate,
        )?;
    }

    if let Some(dist) = dist {
        clean_match_with(
            &["**/*.{js,js.map,d.ts}"],
            &CleanOptions {
                root: resolve(dist),
                exclude: options.exclude.clone(),
                remove_empty_dirs: options.remove_empty_dirs,
                verbose: options.verbose,
            },
            predicate,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_known_suffix() {
        let (base, ext) = strip_known_suffix(Path::new("/p/index.js")).unwrap();
        assert_eq!(base, "/p/index");
        assert_eq!(ext, ".js");

        let (base, ext) = strip_known_suffix(Path::new("/p/index.js.map")).unwrap();
        assert_eq!(base, "/p/index");
        assert_eq!(ext, ".js.map");

        let (base, ext) = strip_known_suffix(Path::new("/p/index.d.ts")).unwrap();
        assert_eq!(base, "/p/index");
        assert_eq!(ext, ".d.ts");

        assert!(strip_known_suffix(Path::new("/p/readme.md")).is_none());
        // Plain .ts is a source file, not a recognized output suffix.
        assert!(strip_known_suffix(Path::new("/p/index.ts")).is_none());
    }
}
