//! The `inspect` subcommand

use crate::utils::{has_extension, iter_files};
use anyhow::{Context, Result};
use clap::Args;
use lsdj::{
    project::Project,
    sav::{Sav, BLOCK_COUNT},
};
use std::path::{Path, PathBuf};

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Inspect LSDJ .sav and .lsdsng files, or even entire directories for their contents",
    long_about = None
)]
pub struct InspectArgs {
    /// The path(s) to inspect
    path: Vec<PathBuf>,

    /// Search the folder recursively
    #[clap(short, long)]
    recursive: bool,
}

/// Inspect LSDJ .sav and .lsdsng files
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let paths: Vec<_> = iter_files(&args.path, args.recursive, &["sav", "lsdsng"])
        .map(|entry| entry.into_path())
        .collect();

    if let Some((last, rest)) = paths.split_last() {
        for path in rest {
            print(path)?;
            println!();
        }

        print(last)?;
    }

    Ok(())
}

fn print(path: &Path) -> Result<()> {
    if has_extension(path, "sav") {
        print_sav(path)
    } else {
        print_lsdsng(path)
    }
}

fn print_sav(path: &Path) -> Result<()> {
    let sav = Sav::from_path(path)
        .context(format!("Could not read {}", path.to_string_lossy()))?;
    let used = sav
        .blocks_used()
        .context("Could not compress the projects")?;

    println!(
        "{:<32}Mem {used}/{BLOCK_COUNT}    [{}]",
        file_name(path),
        usage_bar(used, BLOCK_COUNT, 24)
    );

    for (index, project) in sav.projects() {
        println!(
            "{:>3} | {:<8} | v{:03} | f{:03}",
            u8::from(index),
            project.name().as_str(),
            project.version(),
            project.song().format_version().get()
        );
    }

    Ok(())
}

fn print_lsdsng(path: &Path) -> Result<()> {
    let project = Project::from_path(path)
        .context(format!("Could not read {}", path.to_string_lossy()))?;

    println!(
        "{:<32}{:<8} | v{:03} | f{:03}",
        file_name(path),
        project.name().as_str(),
        project.version(),
        project.song().format_version().get()
    );

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn usage_bar(used: usize, capacity: usize, width: usize) -> String {
    let filled = (used * width + capacity / 2) / capacity;
    format!("{:<width$}", "=".repeat(filled.min(width)))
}
