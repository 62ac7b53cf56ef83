//! The `export` subcommand

use crate::utils::check_for_overwrite;
use anyhow::{Context, Result};
use clap::Args;
use lsdj::{
    project::Project,
    sav::{Sav, PROJECT_COUNT},
};
use std::{
    env::current_dir,
    fs::create_dir_all,
    path::{Path, PathBuf},
};

/// Export songs from an LSDJ save file
#[derive(Args)]
#[clap(author, version, about = "Export .lsdsng's from .sav files", long_about = None)]
pub struct ExportArgs {
    /// The path to the save file to export from
    path: PathBuf,

    /// Indices of the songs that should be exported. No indices means all songs.
    index: Vec<usize>,

    /// The destination folder to place the songs
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Prepend the song position to the start of the filename
    #[clap(short = 'p', long)]
    output_pos: bool,

    /// Append the song version to the end of the filename
    #[clap(short = 'v', long)]
    output_version: bool,

    /// Use decimal version numbers, instead of hexadecimal
    #[clap(short, long)]
    decimal: bool,
}

/// Export .lsdsng's from a .sav file
pub fn export(mut args: ExportArgs) -> Result<()> {
    let sav = Sav::from_path(&args.path).context(format!(
        "Could not read {}",
        args.path.to_string_lossy()
    ))?;

    if args.index.is_empty() {
        args.index = (0..PROJECT_COUNT).collect();
    }

    let folder = match &args.output {
        Some(folder) => folder.clone(),
        None => current_dir().context("Could not fetch current working directory")?,
    };
    create_dir_all(&folder).context("Could not create output directory")?;

    for (index, project) in sav.projects() {
        let index = usize::from(u8::from(index));
        if !args.index.contains(&index) {
            continue;
        }

        let path = folder.join(file_name(&args, index, project));
        if !check_for_overwrite(&path)? {
            continue;
        }

        project.to_path(&path).context(format!(
            "Could not write {}",
            path.to_string_lossy()
        ))?;

        println!(
            "{:02}. {:8} => {}",
            index,
            project.name().as_str(),
            display_name(&path)
        );
    }

    Ok(())
}

fn file_name(args: &ExportArgs, index: usize, project: &Project) -> String {
    let mut filename = String::new();
    if args.output_pos {
        filename.push_str(&format!("{:02}_", index));
    }

    filename.push_str(project.name().as_str().trim_end());
    if args.output_version {
        if args.decimal {
            filename.push_str(&format!("_v{:03}", project.version()));
        } else {
            filename.push_str(&format!("_v{:02X}", project.version()));
        }
    }

    filename.push_str(".lsdsng");
    filename
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
