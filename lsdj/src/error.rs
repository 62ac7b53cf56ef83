//! The crate-wide error type

use std::{collections::TryReserveError, io, path::PathBuf};
use thiserror::Error;

/// Errors that might be returned from (de)serializing songs, projects and savs
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from a [`VirtualIo`](crate::vio::VirtualIo) failed, or returned too few bytes
    #[error("Reading from I/O failed")]
    ReadFailed(#[source] io::Error),

    /// Writing to a [`VirtualIo`](crate::vio::VirtualIo) failed, or accepted too few bytes
    #[error("Writing to I/O failed")]
    WriteFailed(#[source] io::Error),

    /// Moving the position of a [`VirtualIo`](crate::vio::VirtualIo) failed
    #[error("Seeking within I/O failed")]
    SeekFailed(#[source] io::Error),

    /// Retrieving the position of a [`VirtualIo`](crate::vio::VirtualIo) failed
    #[error("Retrieving the I/O position failed")]
    TellFailed(#[source] io::Error),

    /// A buffer could not be allocated
    #[error("Memory allocation failed")]
    AllocationFailed(#[from] TryReserveError),

    /// Decompression ended without producing exactly one song worth of bytes
    #[error("Decompression produced {actual} bytes, expected {expected}")]
    DecompressionSizeMismatch { expected: usize, actual: u64 },

    /// Block jumps kept going after the last block a song could possibly use
    #[error("Decompression followed more than {max} block jumps")]
    TooManyBlockJumps { max: usize },

    /// A file could not be opened or created
    #[error("Could not open {}", .path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A project was requested from an empty (or non-existent) slot
    #[error("There is no project at index {0}")]
    NoProjectAtIndex(u8),

    /// The `jk` bytes in a sav header were missing
    #[error("The SRAM initialization check failed")]
    SramInitializationCheckFailed,

    /// Compressed songs needed more blocks than are available
    ///
    /// For savs, `index` is the slot of the first project that didn't fit.
    #[error("Ran out of blocks while compressing{}", project_suffix(.index))]
    OutOfBlocks { index: Option<u8> },
}

fn project_suffix(index: &Option<u8>) -> String {
    index
        .map(|index| format!(" project {index}"))
        .unwrap_or_default()
}
