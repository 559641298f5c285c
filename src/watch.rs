//! Live watch mode: mirror source-file removals into the output tree.

use crate::clean::EXTENSIONS;
use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::thread::{self, JoinHandle};

/// Options for [`watch`].
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Log one line per removal.
    pub verbose: bool,
}

/// A live watch subscription. The subscription stays active until the handle
/// is stopped, dropped, or the process terminates.
pub struct WatchHandle {
    watcher: RecommendedWatcher,
    thread: JoinHandle<()>,
}

impl WatchHandle {
    /// Cancel the subscription and wait for the event thread to drain.
    pub fn stop(self) {
        drop(self.watcher);
        let _ = self.thread.join();
    }

    /// Block until the subscription ends. Since nothing ends it from inside,
    /// this effectively parks the caller for the life of the process.
    pub fn wait(self) {
        let WatchHandle {
            watcher: _watcher,
            thread,
        } = self;
        let _ = thread.join();
    }
}

/// The output files under `dist` that correspond to the removed source file
/// `rel` (relative to the watched source root), or `None` if `rel` is not a
/// `.ts` file.
fn output_paths(rel: &Path, dist: &Path) -> Option<[PathBuf; 3]> {
    let base = rel.to_str()?.strip_suffix(".ts")?;
    Some(EXTENSIONS.map(|ext| dist.join(format!("{base}{ext}"))))
}

/// Watch `src` for removed `.ts` files and delete the corresponding
/// `.js`/`.js.map`/`.d.ts` outputs under `dist` as they become orphaned.
pub fn watch(src: &Path, dist: &Path, options: &WatchOptions) -> Result<WatchHandle> {
    let src = src
        .canonicalize()
        .with_context(|| format!("cannot watch \"{}\"", src.display()))?;
    let dist = dist.to_path_buf();
    let verbose = options.verbose;

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(err) => eprintln!("Warning: watch error: {}", err),
        },
        Config::default(),
    )
    .context("failed to create filesystem watcher")?;

    watcher
        .watch(&src, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch \"{}\"", src.display()))?;

    if verbose {
        println!("Watching in \"{}\"", src.display().to_string().yellow());
    }

    let thread = thread::spawn(move || {
        for event in rx {
            if !matches!(event.kind, EventKind::Remove(_)) {
                continue;
            }
            for path in &event.paths {
                let Ok(rel) = path.strip_prefix(&src) else {
                    continue;
                };
                let Some(outputs) = output_paths(rel, &dist) else {
                    continue;
                };
                for output in outputs {
                    if !output.exists() {
                        continue;
                    }
                    // One failed deletion must not block the remaining
                    // extension checks or kill the subscription.
                    match fs::remove_file(&output) {
                        Ok(()) => {
                            if verbose {
                                println!(
                                    "Removed \"{}\"",
                                    output.display().to_string().yellow()
                                );
                            }
                        }
                        Err(err) => eprintln!(
                            "Warning: failed to remove \"{}\": {}",
                            output.display(),
                            err
                        ),
                    }
                }
            }
        }
    });

    Ok(WatchHandle { watcher, thread })
}
