//! A single named song, and its `.lsdsng` file format

use crate::{
    Error,
    name::Name,
    serde::{BlockJumps, BlockLayout},
    song::SongMemory,
    vio::{FileIo, MemoryIo, VirtualIo},
};
use log::debug;
use std::path::Path;

/// The number of characters in a project name
pub const PROJECT_NAME_LEN: usize = 8;

/// The maximal size of an `.lsdsng` file, in bytes
///
/// That's the name and version, followed by as many compressed blocks as fit in a sav. Songs
/// that barely compress take up more room than their decompressed size.
pub const LSDSNG_MAX_LEN: usize =
    PROJECT_NAME_LEN + 1 + BlockLayout::SAV.block_len * BlockLayout::SAV.block_count;

/// A [`Name`], version and [`SongMemory`]
///
/// Every slot in a [`Sav`](crate::sav::Sav) holds a project. Because a sav holds multiple
/// projects, artists often export/import them to/from a format called `.lsdsng`. That's the
/// name and version, followed by the compressed song blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Project {
    name: Name<PROJECT_NAME_LEN>,
    version: u8,
    song: SongMemory,
}

impl Project {
    pub fn new(name: Name<PROJECT_NAME_LEN>, version: u8, song: SongMemory) -> Self {
        Self {
            name,
            version,
            song,
        }
    }

    pub fn name(&self) -> &Name<PROJECT_NAME_LEN> {
        &self.name
    }

    pub fn set_name(&mut self, name: Name<PROJECT_NAME_LEN>) {
        self.name = name;
    }

    /// The project version, which LSDJ increases with every save
    ///
    /// This is unrelated to the [format version](SongMemory::format_version()) of the song.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }

    pub fn song(&self) -> &SongMemory {
        &self.song
    }

    pub fn song_mut(&mut self) -> &mut SongMemory {
        &mut self.song
    }

    pub fn set_song(&mut self, song: SongMemory) {
        self.song = song;
    }

    pub fn into_song(self) -> SongMemory {
        self.song
    }

    /// Read a project in the `.lsdsng` format
    ///
    /// Names are read leniently (see [`Name::from_bytes_lossy()`]). The song blocks of an
    /// `.lsdsng` are stored back to back, so block jump targets are ignored.
    pub fn read_lsdsng<R>(mut reader: R) -> Result<Self, Error>
    where
        R: VirtualIo,
    {
        let mut name = [0; PROJECT_NAME_LEN];
        reader.read_exact(&mut name)?;
        let version = reader.read_byte()?;

        let song = SongMemory::decompress(&mut reader, BlockJumps::Sequential)?;

        Ok(Self {
            name: Name::from_bytes_lossy(&name),
            version,
            song,
        })
    }

    /// Write the project in the `.lsdsng` format
    pub fn write_lsdsng<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: VirtualIo,
    {
        writer.write_all(self.name.bytes())?;
        writer.write_byte(self.version)?;

        let blocks = self.song.compress(&mut writer, 1, BlockLayout::SAV)?;
        if blocks == 0 {
            return Err(Error::OutOfBlocks { index: None });
        }

        debug!("Compressed project {} into {blocks} blocks", self.name);
        Ok(())
    }

    /// Read an `.lsdsng` file from disk
    pub fn from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        Self::read_lsdsng(FileIo::open(path)?)
    }

    /// Write an `.lsdsng` file to disk, creating parent directories where needed
    pub fn to_path<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        self.write_lsdsng(FileIo::create(path)?)
    }

    /// Read a project from `.lsdsng` bytes in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::read_lsdsng(MemoryIo::new(bytes))
    }

    /// Write the project into `.lsdsng` bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(LSDSNG_MAX_LEN)?;
        bytes.resize(LSDSNG_MAX_LEN, 0);

        let mut writer = MemoryIo::new(bytes);
        self.write_lsdsng(&mut writer)?;

        let len = writer.position();
        let mut bytes = writer.into_inner();
        bytes.truncate(len);

        Ok(bytes)
    }
}

/// Does the data from `reader` look like an `.lsdsng`?
///
/// Only the name is checked: every byte before the first zero has to be a valid name character.
/// The reader is moved back to where it was afterwards.
pub fn is_likely_valid_lsdsng<R>(mut reader: R) -> Result<bool, Error>
where
    R: VirtualIo,
{
    let start = reader.tell()?;

    let mut name = [0; PROJECT_NAME_LEN];
    let valid = match reader.read_exact(&mut name) {
        Ok(()) => Name::<PROJECT_NAME_LEN>::is_valid(&name),
        Err(Error::ReadFailed(_)) => false,
        Err(error) => return Err(error),
    };

    reader.seek(std::io::SeekFrom::Start(start))?;
    Ok(valid)
}
