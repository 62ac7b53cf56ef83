//! Reading, writing and editing LittleSoundDJ songs
//!
//! LSDJ keeps the song you're working on uncompressed in [`SongMemory`](song::SongMemory),
//! and stores other songs compressed into blocks, either inside a [`.sav`](sav::Sav) or on
//! their own as an [`.lsdsng`](project::Project). Everything is (de)serialized through
//! [`VirtualIo`](vio::VirtualIo), so files and memory buffers work the same way.
//!
//! ```no_run
//! use lsdj::{project::Project, sav::Sav, u5};
//!
//! let mut sav = Sav::from_path("bangers.sav")?;
//!
//! for (index, project) in sav.projects() {
//!     println!("{index}: {} v{}", project.name(), project.version());
//! }
//!
//! let project = Project::from_path("new.lsdsng")?;
//! sav.set_project(u5::new(3), project);
//! sav.to_path("bangers.sav")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! This crate does not handle ROM manipulation (which is where samples are stored).

pub mod bits;
pub mod name;
pub mod project;
pub mod sav;
pub mod serde;
pub mod song;
pub mod vio;

mod error;

pub use error::Error;
pub use ux::{u4, u5, u6};
