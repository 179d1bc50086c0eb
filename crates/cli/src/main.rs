use anyhow::{Context, Result};
use clap::Parser;

use std::{env, fs, io, path::PathBuf, process};

use bundler::{emit, BundleOptions, Bundler, ComponentRecord, FsLoader, VecWarningHandler};
use vue_bundler_cli::{absolute_path, report_error, report_warnings};

/// Bundle a tree of single-file components into one script.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// The root component file; discovery starts here.
    root: PathBuf,

    /// Label the root component is registered under.
    #[arg(short, long, default_value = "App")]
    label: String,

    /// Directory the bundle is written into.
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,

    /// Bundle file name inside the output directory.
    #[arg(long, default_value = "build.js")]
    out_file: PathBuf,

    /// Print every finalized component record as YAML after the build.
    #[arg(long)]
    dump_records: bool,

    /// Keep a pre-existing bundle file instead of removing it first.
    /// The emitter appends without truncating, so keeping it accumulates.
    #[arg(long)]
    keep_output: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let root_path = absolute_path(&opts.root)?;
    let project_root = env::current_dir()?;
    let options = BundleOptions {
        project_root,
        out_dir: opts.out_dir,
        out_file: opts.out_file,
    };

    if !opts.keep_output {
        let stale = options.out_dir.join(&options.out_file);
        if stale.exists() {
            fs::remove_file(&stale)
                .with_context(|| format!("failed to remove stale bundle {}", stale.display()))?;
        }
    }

    let loader = FsLoader::default();
    let warnings = VecWarningHandler::default();
    let bundler = Bundler::new(options, &loader, &warnings);
    let root = ComponentRecord::root(opts.label, root_path);
    let store = match bundler.bundle(root) {
        Ok(store) => store,
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    };
    report_warnings(&warnings);

    if opts.dump_records {
        let records: Vec<_> = store.records().collect();
        serde_yaml::to_writer(io::stdout().lock(), &records)?;
    }

    let artifact = match emit::build(&store) {
        Ok(path) => path,
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    };
    println!("bundled {} components into {}", store.len(), artifact.display());

    Ok(())
}
