//! LittleSoundDJ SRAM/`.sav` file handling
//!
//! This module contains functionality for reading, writing and manipulating SRAM, which
//! is where LSDJ stores its songs. Usually people work with `.sav` files, which gameboy
//! emulators use to store the SRAM tied to a ROM. You can also download/upload `.sav`
//! files to flashcarts for playback on real hardware.

mod header;

use crate::{
    Error,
    name::Name,
    project::{PROJECT_NAME_LEN, Project},
    serde::{BLOCK_LEN, BlockJumps, BlockLayout},
    song::SongMemory,
    vio::{FileIo, MemoryIo, VirtualIo},
};
use header::{Header, NO_ACTIVE_PROJECT, UNUSED_BLOCK};
use log::{debug, warn};
use std::{io::SeekFrom, path::Path};
use ux::u5;

/// The number of project slots in a sav
pub const PROJECT_COUNT: usize = 32;

/// The number of blocks available for compressed projects
pub const BLOCK_COUNT: usize = BlockLayout::SAV.block_count;

/// The size of a `.sav` file, in bytes
pub const SAV_LEN: usize = SongMemory::LEN + BLOCK_LEN + BLOCK_COUNT * BLOCK_LEN;

/// Where the header block starts, relative to the start of the sav
const HEADER_START: u64 = SongMemory::LEN as u64;

/// Where the first compressed block starts, relative to the start of the sav
const FIRST_BLOCK_START: u64 = HEADER_START + BLOCK_LEN as u64;

/// A full representation of LittleSoundDJ SRAM
///
/// Every LSDJ save file consists of the same amount of bytes, in which both the song you're
/// currently working on is stored (uncompressed), as well as at most 32 (compressed) projects.
///
/// The first time you boot LSDJ it formats the SRAM to the expected structure, setting some
/// magic bytes for later verification as well. This crate allows you to do the same, but also
/// to read a [`Sav`] from disk or any other [`VirtualIo`].
///
/// ```no_run
/// # use lsdj::{sav::Sav, vio::FileIo};
/// // Construct a valid sav with the default/empty song and no projects
/// let sav = Sav::new();
///
/// // Load a sav from a path on disk
/// let sav = Sav::from_path("bangers.sav")?;
///
/// // Load a sav from any virtual I/O
/// let sav = Sav::read(FileIo::open("bangers.sav")?)?;
///
/// // And write it back
/// sav.to_path("bangers.sav")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sav {
    /// The song that's currently being worked on in LSDJ
    working_song: SongMemory,

    /// The slot the working song was loaded from, if any
    active_project: Option<u5>,

    /// Always [`PROJECT_COUNT`] slots long
    projects: Vec<Option<Project>>,

    /// Header bytes without a known purpose, kept so they survive a round trip
    reserved: [u8; header::RESERVED_LEN],
}

impl Sav {
    /// Construct a new sav, with a default song and no projects
    pub fn new() -> Self {
        Self {
            working_song: SongMemory::new(),
            active_project: None,
            projects: vec![None; PROJECT_COUNT],
            reserved: [0; header::RESERVED_LEN],
        }
    }

    /// Read a sav from any virtual I/O
    ///
    /// Reading starts at the current position. Afterwards the reader is positioned right
    /// after the last block.
    pub fn read<R>(mut reader: R) -> Result<Self, Error>
    where
        R: VirtualIo,
    {
        let begin = reader.tell()?;
        let working_song = SongMemory::from_reader(&mut reader)?;

        let header = Header::read(&mut reader)?.ok_or(Error::SramInitializationCheckFailed)?;

        let mut projects = vec![None; PROJECT_COUNT];
        let jumps = BlockJumps::Absolute {
            first_block_position: begin + FIRST_BLOCK_START,
        };

        for (block, slot) in header.block_allocations.iter().enumerate() {
            let slot = usize::from(*slot);
            if slot == usize::from(UNUSED_BLOCK) {
                continue;
            }

            if slot >= PROJECT_COUNT {
                warn!("Block {} belongs to non-existent project {slot}, skipping", block + 1);
                continue;
            }

            if projects[slot].is_some() {
                continue;
            }

            debug!("Project {slot} starts at block {}", block + 1);
            reader.seek(SeekFrom::Start(
                begin + FIRST_BLOCK_START + (block * BLOCK_LEN) as u64,
            ))?;
            let song = SongMemory::decompress(&mut reader, jumps)?;

            projects[slot] = Some(Project::new(
                header.project_name(slot),
                header.versions[slot],
                song,
            ));
        }

        for (slot, project) in projects.iter().enumerate() {
            if project.is_none() && !header.project_name(slot).is_empty() {
                warn!("Project {slot} has a name, but no blocks, skipping");
            }
        }

        let active_project = match header.active_project {
            NO_ACTIVE_PROJECT => None,
            index if usize::from(index) < PROJECT_COUNT => Some(u5::new(index)),
            index => {
                warn!("Active project {index} doesn't exist, treating it as none");
                None
            }
        };

        reader.seek(SeekFrom::Start(begin + SAV_LEN as u64))?;

        Ok(Self {
            working_song,
            active_project,
            projects,
            reserved: header.reserved,
        })
    }

    /// Write the sav to any virtual I/O
    ///
    /// The projects are compressed into consecutive blocks, in slot order. This fails with
    /// [`Error::OutOfBlocks`] if they don't all fit.
    pub fn write<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: VirtualIo,
    {
        let (header, blocks) = self.layout()?;

        self.working_song.to_writer(&mut writer)?;
        header.write(&mut writer)?;
        writer.write_all(&blocks)
    }

    /// Read a `.sav` file from disk
    pub fn from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        Self::read(FileIo::open(path)?)
    }

    /// Write a `.sav` file to disk, creating parent directories where needed
    pub fn to_path<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        self.write(FileIo::create(path)?)
    }

    /// Read a sav from bytes in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::read(MemoryIo::new(bytes))
    }

    /// Write the sav into [`SAV_LEN`] bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(SAV_LEN)?;
        bytes.resize(SAV_LEN, 0);

        let mut writer = MemoryIo::new(bytes);
        self.write(&mut writer)?;

        Ok(writer.into_inner())
    }

    /// The number of blocks the projects take up once compressed
    pub fn blocks_used(&self) -> Result<usize, Error> {
        let (header, _) = self.layout()?;

        Ok(header
            .block_allocations
            .iter()
            .filter(|slot| **slot != UNUSED_BLOCK)
            .count())
    }

    /// The song that's currently being worked on
    pub fn working_song(&self) -> &SongMemory {
        &self.working_song
    }

    pub fn working_song_mut(&mut self) -> &mut SongMemory {
        &mut self.working_song
    }

    /// Replace the working song
    ///
    /// The active project index is left as is.
    pub fn set_working_song(&mut self, song: SongMemory) {
        self.working_song = song;
    }

    /// Replace the working song with a factory-fresh one, unrelated to any project
    pub fn reset_working_song(&mut self) {
        self.working_song = SongMemory::new();
        self.active_project = None;
    }

    /// Load a project into the working song, making it the active project
    pub fn set_working_song_from_project(&mut self, index: u5) -> Result<(), Error> {
        let song = self
            .project(index)
            .ok_or(Error::NoProjectAtIndex(u8::from(index)))?
            .song()
            .clone();

        self.working_song = song;
        self.active_project = Some(index);

        Ok(())
    }

    /// The slot the working song belongs to, if any
    pub fn active_project(&self) -> Option<u5> {
        self.active_project
    }

    pub fn set_active_project(&mut self, index: Option<u5>) {
        self.active_project = index;
    }

    /// Turn the working song into a project
    ///
    /// The name and version are taken from the active project, or left empty if there is none.
    pub fn project_from_working_song(&self) -> Project {
        let (name, version) = self
            .active_project
            .and_then(|index| self.project(index))
            .map(|project| (*project.name(), project.version()))
            .unwrap_or_default();

        Project::new(name, version, self.working_song.clone())
    }

    pub fn project(&self, index: u5) -> Option<&Project> {
        self.projects[usize::from(u8::from(index))].as_ref()
    }

    pub fn project_mut(&mut self, index: u5) -> Option<&mut Project> {
        self.projects[usize::from(u8::from(index))].as_mut()
    }

    /// Store a project in a slot, returning the project that was there before
    pub fn set_project(&mut self, index: u5, project: Project) -> Option<Project> {
        self.projects[usize::from(u8::from(index))].replace(project)
    }

    /// Empty a slot, returning the project that was there
    pub fn erase_project(&mut self, index: u5) -> Option<Project> {
        self.projects[usize::from(u8::from(index))].take()
    }

    /// Iterate over the occupied slots
    pub fn projects(&self) -> impl Iterator<Item = (u5, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .filter_map(|(index, project)| Some((u5::new(index as u8), project.as_ref()?)))
    }

    /// Compress every project into the block area, and fill out the header to match
    fn layout(&self) -> Result<(Header, Vec<u8>), Error> {
        let mut header = Header {
            project_names: [0; PROJECT_COUNT * PROJECT_NAME_LEN],
            versions: [0; PROJECT_COUNT],
            reserved: self.reserved,
            active_project: self
                .active_project
                .map_or(NO_ACTIVE_PROJECT, u8::from),
            block_allocations: [UNUSED_BLOCK; BLOCK_COUNT],
        };

        let mut blocks = Vec::new();
        blocks.try_reserve_exact(BLOCK_COUNT * BLOCK_LEN)?;
        blocks.resize(BLOCK_COUNT * BLOCK_LEN, 0);
        let mut writer = MemoryIo::new(blocks);

        let mut next_block = 1;
        for (slot, project) in self.projects.iter().enumerate() {
            let Some(project) = project else {
                continue;
            };

            header.set_project_name(slot, project.name());
            header.versions[slot] = project.version();

            writer.seek(SeekFrom::Start(((next_block - 1) * BLOCK_LEN) as u64))?;
            let count = project
                .song()
                .compress(&mut writer, next_block, BlockLayout::SAV)?;

            if count == 0 {
                return Err(Error::OutOfBlocks {
                    index: Some(slot as u8),
                });
            }

            debug!(
                "Project {slot} ({}) takes up blocks {next_block}..{}",
                project.name(),
                next_block + count
            );

            header.block_allocations[next_block - 1..next_block - 1 + count].fill(slot as u8);
            next_block += count;
        }

        Ok((header, writer.into_inner()))
    }
}

impl Default for Sav {
    fn default() -> Self {
        Self::new()
    }
}

/// Does the data from `reader` look like a `.sav`?
///
/// The working song has to look valid, and the header needs its initialization check bytes.
/// The reader is moved back to where it was afterwards.
pub fn is_likely_valid<R>(mut reader: R) -> Result<bool, Error>
where
    R: VirtualIo,
{
    let begin = reader.tell()?;

    let valid = match SongMemory::from_reader(&mut reader) {
        Ok(song) if song.is_likely_valid() => match Header::read(&mut reader) {
            Ok(header) => header.is_some(),
            Err(Error::ReadFailed(_)) => false,
            Err(error) => return Err(error),
        },
        Ok(_) | Err(Error::ReadFailed(_)) => false,
        Err(error) => return Err(error),
    };

    reader.seek(SeekFrom::Start(begin))?;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, tempo: u16) -> Project {
        let mut song = SongMemory::new();
        song.set_tempo(tempo).unwrap();

        Project::new(name.parse().unwrap(), 1, song)
    }

    /// A song that barely compresses, taking up 65 blocks or more
    #[test]
    fn empty() -> anyhow::Result<()> {
        let sav = Sav::new();
        let bytes = sav.to_bytes()?;

        assert_eq!(bytes.len(), SAV_LEN);
        assert_eq!(&bytes[0x813E..0x8140], b"jk");
        assert_eq!(bytes[0x8140], NO_ACTIVE_PROJECT);
        assert!(bytes[0x8141..0x8200].iter().all(|byte| *byte == UNUSED_BLOCK));
        assert!(is_likely_valid(MemoryIo::new(bytes.as_slice()))?);
        assert_eq!(sav.blocks_used()?, 0);
        assert_eq!(Sav::from_bytes(&bytes)?, sav);

        Ok(())
    }

    #[test_log::test]
    fn round_trip() -> anyhow::Result<()> {
        let mut sav = Sav::new();
        sav.set_project(u5::new(0), project("FIRST", 100));
        sav.set_project(u5::new(31), project("LAST", 200));
        sav.set_working_song_from_project(u5::new(31))?;

        let bytes = sav.to_bytes()?;
        assert_eq!(&bytes[0x8000..0x8005], b"FIRST");
        assert_eq!(&bytes[0x80F8..0x80FC], b"LAST");
        assert_eq!(bytes[0x8140], 31);
        assert_eq!(bytes[0x8141], 0);

        let read = Sav::from_bytes(&bytes)?;
        assert_eq!(read, sav);
        assert_eq!(read.working_song().tempo(), 200);
        assert_eq!(read.active_project(), Some(u5::new(31)));
        assert_eq!(read.projects().count(), 2);
        assert!(read.blocks_used()? > 2);

        Ok(())
    }

    #[test]
    fn reserved_bytes_survive() -> anyhow::Result<()> {
        let mut bytes = Sav::new().to_bytes()?;
        bytes[0x8120..0x813E].fill(0x5A);

        let sav = Sav::from_bytes(&bytes)?;
        assert_eq!(sav.to_bytes()?, bytes);

        Ok(())
    }

    #[test_log::test]
    fn active_project_byte() -> anyhow::Result<()> {
        let mut sav = Sav::new();
        sav.set_active_project(Some(u5::new(0x1F)));
        let mut bytes = sav.to_bytes()?;
        assert_eq!(bytes[0x8140], 0x1F);
        assert_eq!(Sav::from_bytes(&bytes)?.active_project(), Some(u5::new(0x1F)));

        for index in [0x20, 0x25, 0xFE] {
            bytes[0x8140] = index;
            let sav = Sav::from_bytes(&bytes)?;
            assert_eq!(sav.active_project(), None);
            assert_eq!(sav.to_bytes()?[0x8140], NO_ACTIVE_PROJECT);
        }

        Ok(())
    }

    #[test]
    fn initialization_check() -> anyhow::Result<()> {
        let mut bytes = Sav::new().to_bytes()?;
        bytes[0x813E] = b'x';

        assert!(!is_likely_valid(MemoryIo::new(bytes.as_slice()))?);
        assert!(matches!(
            Sav::from_bytes(&bytes),
            Err(Error::SramInitializationCheckFailed)
        ));
        assert!(!is_likely_valid(MemoryIo::new(&bytes[..0x100]))?);

        Ok(())
    }

    #[test]
    fn out_of_blocks() {
        let mut sav = Sav::new();
        for index in 0..3 {
            sav.set_project(
                u5::new(index),
                Project::new(Name::default(), 0, SongMemory::noise()),
            );
        }

        assert!(matches!(
            sav.to_bytes(),
            Err(Error::OutOfBlocks { index: Some(2) })
        ));
    }

    #[test]
    fn slots() -> anyhow::Result<()> {
        let mut sav = Sav::new();
        assert!(matches!(
            sav.set_working_song_from_project(u5::new(4)),
            Err(Error::NoProjectAtIndex(4))
        ));

        assert_eq!(sav.set_project(u5::new(4), project("A", 120)), None);
        assert!(sav.set_project(u5::new(4), project("B", 130)).is_some());

        sav.set_working_song_from_project(u5::new(4))?;
        sav.working_song_mut().set_tempo(140)?;

        let project = sav.project_from_working_song();
        assert_eq!(project.name().as_str(), "B");
        assert_eq!(project.song().tempo(), 140);

        sav.project_mut(u5::new(4)).unwrap().set_version(7);
        assert_eq!(sav.project_from_working_song().version(), 7);

        assert!(sav.erase_project(u5::new(4)).is_some());
        assert_eq!(sav.project(u5::new(4)), None);
        assert!(sav.project_from_working_song().name().is_empty());

        sav.reset_working_song();
        assert_eq!(sav.active_project(), None);
        assert_eq!(sav.working_song(), &SongMemory::new());

        Ok(())
    }
}
