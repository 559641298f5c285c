use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process;
use tsweep::{cleanup, watch, CleanupOptions, WatchOptions};

#[derive(Parser, Debug)]
#[command(
    name = "tsweep",
    version,
    about = "Remove compiled .js/.js.map/.d.ts output left behind by TypeScript builds",
    long_about = None
)]
struct Args {
    /// Source folder with .ts files (required if --dist not given)
    #[arg(short, long, value_name = "DIR")]
    src: Option<PathBuf>,

    /// Distribution folder with compiled output (required if --src not given)
    #[arg(short, long, value_name = "DIR")]
    dist: Option<PathBuf>,

    /// Show a message for each file being deleted
    #[arg(short, long)]
    verbose: bool,

    /// Watch the source folder and delete outputs as sources are removed
    #[arg(short, long)]
    watch: bool,

    /// Remove every .js file, even without a matching .ts file
    #[arg(short, long)]
    all: bool,

    /// Remove directories left empty after cleanup
    #[arg(
        short = 'r',
        long,
        value_name = "BOOL",
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set
    )]
    remove_dirs: bool,

    /// Glob pattern to exclude from cleanup (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    exclude: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.src.is_none() && args.dist.is_none() {
        // Not enough to act on; show usage and touch nothing.
        Args::command().print_help()?;
        println!();
        process::exit(2);
    }

    let cwd = env::current_dir().context("cannot determine current directory")?;
    let src = args.src.map(|p| cwd.join(p));
    let dist = args.dist.map(|p| cwd.join(p));

    if args.watch {
        let Some(src) = src else {
            eprintln!(
                "{}",
                "watch mode requires a source directory (--src)".red()
            );
            process::exit(1);
        };
        let dist = dist.unwrap_or_else(|| src.clone());
        let handle = watch(
            &src,
            &dist,
            &WatchOptions {
                verbose: args.verbose,
            },
        )?;
        handle.wait();
        return Ok(());
    }

    cleanup(
        src.as_deref(),
        dist.as_deref(),
        &CleanupOptions {
            root: None,
            exclude: args.exclude,
            remove_all_js: args.all,
            remove_empty_dirs: Some(args.remove_dirs),
            verbose: args.verbose,
        },
    )
}
