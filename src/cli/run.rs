use std::{
    env, fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};

use super::{
    args::{Arguments, STDIN_PATH},
    report::{Diagnostics, print_progress_to, print_report_to},
};
use crate::{
    catalog::{FsCatalogStore, MergeReport, Synchronizer},
    config::{Config, load_config},
    extract::Extractor,
};

/// Runs one extraction and synchronization pass.
///
/// The merged report is written to `out`; warnings and progress to `err`.
/// Catalog files are overwritten unless `--dry-run` or `--template` is given.
pub fn run<O: Write, E: Write>(args: Arguments, out: &mut O, err: &mut E) -> Result<()> {
    let cwd = env::current_dir().context("Failed to determine the current directory")?;
    let loaded = load_config(&cwd)?;
    if args.verbose
        && let Some(path) = &loaded.path
    {
        print_progress_to(&format!("Using config {}", path.display()), err);
    }

    let config = apply_overrides(loaded.config.clone(), &args);
    config.validate()?;

    let sources = read_sources(&args)?;
    let extractor = Extractor::new(&config.marker_function, config.mode, config.placeholder.clone())
        .context("Failed to build the extraction pattern")?;
    // Inputs form one stream, like `cat a b | strsync`
    let extracted = extractor.extract_str(&sources.concat());

    if args.verbose {
        let message = format!(
            "Extracted {} {} from {} {} ({} mode)",
            extracted.len(),
            if extracted.len() == 1 { "key" } else { "keys" },
            sources.len(),
            if sources.len() == 1 { "input" } else { "inputs" },
            config.mode
        );
        print_progress_to(&message, err);
    }

    if let Some(locale) = &args.template {
        let mut report = MergeReport::new();
        report.insert(locale.clone(), extracted.to_catalog());
        return print_report_to(&report, out);
    }

    let lang_dir = match &args.lang_dir {
        Some(dir) => cwd.join(dir),
        None => config.lang_dir_from(&loaded.base_dir),
    };
    let mut store = FsCatalogStore::new(lang_dir, &config.catalog_extension);
    let mut diagnostics = Diagnostics::new(err, args.verbose);
    let outcome = Synchronizer::new(&mut store)
        .dry_run(args.dry_run)
        .sync_with(&extracted, &mut diagnostics)?;

    if args.verbose && outcome.report.is_empty() {
        let message = format!("No catalogs found in {}", store.dir().display());
        print_progress_to(&message, err);
    }

    print_report_to(&outcome.report, out)
}

fn apply_overrides(mut config: Config, args: &Arguments) -> Config {
    if let Some(marker) = &args.marker {
        config.marker_function = marker.clone();
    }
    if let Some(placeholder) = &args.placeholder {
        config.placeholder = placeholder.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    config
}

fn read_sources(args: &Arguments) -> Result<Vec<String>> {
    if args.reads_stdin() {
        return Ok(vec![read_stdin()?]);
    }
    args.files.iter().map(|path| read_source(path)).collect()
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        return read_stdin();
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))
}

fn read_stdin() -> Result<String> {
    io::read_to_string(io::stdin()).context("Failed to read standard input")
}
