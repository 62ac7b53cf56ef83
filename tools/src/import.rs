//! The `import` subcommand

use crate::utils::{check_for_overwrite, has_extension, iter_files};
use anyhow::{bail, Context, Result};
use clap::Args;
use lsdj::{
    project::Project,
    sav::{Sav, PROJECT_COUNT},
    u5, Error,
};
use log::info;
use std::{fs::write, path::PathBuf};

/// Arguments for the `import` subcommand
#[derive(Args)]
#[clap(author, version, about = "Import .lsdsng's into a .sav file", long_about = None)]
pub struct ImportArgs {
    /// Paths to the songs that should be imported into a save
    song: Vec<PathBuf>,

    /// The output path
    #[clap(short, long)]
    output: PathBuf,
}

/// Import .lsdsng's into a .sav file
pub fn import(args: ImportArgs) -> Result<()> {
    let mut sav = Sav::new();
    let mut index = 0;

    for entry in iter_files(&args.song, true, &["lsdsng", "sav"]) {
        let path = entry.path();

        if has_extension(path, "lsdsng") {
            let project = Project::from_path(path)
                .context(format!("Could not read {}", path.to_string_lossy()))?;

            insert(&mut sav, &mut index, project)?;
            println!("{:02} => {}", index - 1, path.to_string_lossy());
        } else {
            let source = Sav::from_path(path)
                .context(format!("Could not read {}", path.to_string_lossy()))?;

            for (_, project) in source.projects() {
                let name = project.name().to_string();
                insert(&mut sav, &mut index, project.clone())?;
                println!("{:02} => {} - {}", index - 1, path.to_string_lossy(), name);
            }
        }
    }

    let bytes = match sav.to_bytes() {
        Err(Error::OutOfBlocks { index: Some(index) }) => {
            bail!("Ran out of space in the sav while adding song {index:02}")
        }
        result => result.context("Could not compress the songs")?,
    };

    if !check_for_overwrite(&args.output)? {
        info!("Not overwriting {}", args.output.to_string_lossy());
        return Ok(());
    }

    write(&args.output, bytes).context(format!(
        "Could not write {}",
        args.output.to_string_lossy()
    ))?;

    println!("Wrote {}", args.output.to_string_lossy());

    Ok(())
}

fn insert(sav: &mut Sav, index: &mut usize, project: Project) -> Result<()> {
    if *index == PROJECT_COUNT {
        bail!("Reached the maximum of {PROJECT_COUNT} songs. Aborting import.");
    }

    sav.set_project(u5::new(*index as u8), project);
    *index += 1;

    Ok(())
}
