//! tsweep - Stale TypeScript Build-Output Cleaner
//!
//! tsweep removes compiled TypeScript output (`.js` files and their
//! `.js.map`/`.d.ts` companions) from a source tree, or sweeps a separate
//! dist tree outright, optionally pruning directories the deletions leave
//! empty. A watch mode deletes outputs live as their source file is removed.
//!
//! The retention rule for mixed source trees: a `.js` file is removed when a
//! `.ts`/`.tsx` sibling exists (the `.js` is regenerable compiler output);
//! a `.js` with no source sibling is treated as hand-written and kept.
//! Companion files follow their `.js` sibling.

pub mod clean;
pub mod matcher;
pub mod remove;
pub mod watch;

// Re-export commonly used items
pub use clean::{
    clean_match, clean_match_with, clean_src, clean_src_with, cleanup, cleanup_with, CleanOptions,
    CleanSrcOptions, CleanupOptions, EXTENSIONS,
};
pub use matcher::match_files;
pub use remove::{delete_files, prune_empty_dirs, Predicate};
pub use watch::{watch, WatchHandle, WatchOptions};
