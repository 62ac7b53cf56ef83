//! Song memory and the entities (instruments, phrases, chains, ...) stored inside of it
//!
//! [`SongMemory`] is kept as raw bytes. The submodules add accessors to it that decode and
//! encode individual entities at their fixed offsets, such as [`SongMemory::instrument()`]
//! or [`SongMemory::phrase()`].

pub mod chain;
pub mod command;
pub mod groove;
pub mod instrument;
pub mod phrase;
pub mod settings;
pub mod synth;
pub mod table;
pub mod wave;
pub mod word;

mod format_version;
mod offsets;
mod song_memory;

pub use format_version::FormatVersion;
pub use song_memory::{FromBytesError, SongMemory};

use command::Command;
use thiserror::Error;

/// Errors that might be returned when changing entities in [`SongMemory`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    /// There is no entity at the given index
    #[error("Index {index} is out of range, there are only {count}")]
    IndexOutOfRange { index: usize, count: usize },

    /// A value lies outside of the range LSDJ can store
    #[error("{value} lies outside of the allowed range {min}..={max}")]
    ValueOutOfRange { value: usize, min: usize, max: usize },

    /// The command can't be stored in the song's format version
    #[error("Command {command:?} isn't supported in format version {version}")]
    UnsupportedCommand {
        command: Command,
        version: FormatVersion,
    },

    /// All bookmark slots for the channel are taken
    #[error("No bookmark slots left")]
    BookmarksFull,
}

/// Check an entity index against the number of entities there are
pub(crate) fn check_index(index: usize, count: usize) -> Result<(), SetError> {
    if index < count {
        Ok(())
    } else {
        Err(SetError::IndexOutOfRange { index, count })
    }
}

/// Read a flag from an allocation bitmap
///
/// Entity `index` lives at bit `index % 8` of byte `index / 8`.
pub(crate) fn read_allocation_bit(song: &SongMemory, offset: usize, index: usize) -> bool {
    crate::bits::read_bit(song.as_slice()[offset + index / 8], (index % 8) as u8)
}

pub(crate) fn write_allocation_bit(
    song: &mut SongMemory,
    offset: usize,
    index: usize,
    value: bool,
) {
    let byte = &mut song.as_mut_slice()[offset + index / 8];
    *byte = crate::bits::write_bit(*byte, (index % 8) as u8, value);
}
