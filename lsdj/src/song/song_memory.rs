use super::{FormatVersion, offsets};
use crate::{
    Error,
    serde::{self, BlockJumps, BlockLayout},
    vio::{MemoryIo, VirtualIo},
};
use std::fmt;
use thiserror::Error;

/// A contiguous block of memory that represents a decompressed song
///
/// The memory has a fixed size and a fixed layout: every instrument, phrase, chain, etc. lives
/// at a known offset. The accessors in the [`song`](crate::song) module read and write these
/// entities, using the [`FormatVersion`] stored in the last byte to interpret their bits.
#[derive(Clone, PartialEq, Eq)]
pub struct SongMemory {
    /// The bytes that make up the song
    bytes: [u8; Self::LEN],
}

impl SongMemory {
    /// The number of bytes taken up by a single LSDJ song
    pub const LEN: usize = 0x8000;

    /// Initialize a new song, creating a buffer containing necessary verification bytes.
    pub fn new() -> Self {
        let bytes = Self::make_empty_song();
        Self { bytes }
    }

    /// Construct a new, empty song, ready for use
    ///
    /// This is the song a recent LSDJ ROM creates, including the bytes LSDJ uses to check for
    /// memory corruption.
    pub fn make_empty_song() -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[0x0ff0..0x1000].fill(0xFF);
        for i in (0x1090..0x1290).step_by(16) {
            bytes[i..i + 2].fill(0x06);
        }
        bytes[0x1290..0x1690].fill(0xFF);
        let mut loops = 0;
        for i in (0x1dd0..0x1df9).step_by(6) {
            bytes[i..i + 6].copy_from_slice(&[0x57, 0x2d, 0x30 + loops, 0x57, 0x2d, 0x31 + loops]);
            loops += 2;
            if loops == 10 {
                loops += 7;
            }
        }
        bytes[0x1e78..0x1e7a].copy_from_slice(&[0x72, 0x62]);
        bytes[0x2080..0x2880].fill(0xFF);
        bytes[0x3e80..0x3e82].copy_from_slice(&[0x72, 0x62]);
        for i in (0x3eb0..0x3fb0).step_by(16) {
            bytes[i + 7] = 0x10;
            bytes[i + 8] = 0xff;
            bytes[i + 11] = 0x10;
            bytes[i + 12] = 0xff;
        }
        bytes[0x3fb4] = 0x80;
        bytes[0x3fba..0x3fbc].copy_from_slice(&[0x07, 0x02]);
        bytes[0x3fc0..0x3fc4].copy_from_slice(&[0x00, 0x20, 0x00, 0x01]);
        bytes[0x3fc6..0x3fca].fill(0xFF);
        for i in (0x6000..0x7000).step_by(16) {
            bytes[i..i + 16].copy_from_slice(&[
                0x71, 0x32, 0x33, 0x44, 0x45, 0x55, 0x66, 0x77, 0x78, 0x89, 0x99, 0xaa, 0xab, 0xbc,
                0xcd, 0xce,
            ]);
        }
        bytes[0x7000..0x7ff0].fill(0xFF);
        bytes[0x7ff0..0x7ff2].copy_from_slice(&[0x72, 0x62]);
        bytes[0x7fff] = FormatVersion::LATEST.get();
        bytes
    }

    /// Wrap raw song bytes, without checking them
    pub fn from_array(bytes: [u8; Self::LEN]) -> Self {
        Self { bytes }
    }

    /// Read raw (uncompressed) [`SongMemory`] from a [`VirtualIo`]
    ///
    /// The bytes aren't checked, see [`SongMemory::is_likely_valid()`] for that.
    pub fn from_reader<R>(mut reader: R) -> Result<Self, Error>
    where
        R: VirtualIo,
    {
        let mut bytes = [0; Self::LEN];
        reader.read_exact(bytes.as_mut_slice())?;

        Ok(Self { bytes })
    }

    /// Write raw (uncompressed) [`SongMemory`] to a [`VirtualIo`]
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: VirtualIo,
    {
        writer.write_all(&self.bytes)
    }

    /// Decompress [`SongMemory`] from LSDJ blocks
    ///
    /// See [`serde::decompress()`] for how the blocks are read.
    pub fn decompress<R>(reader: R, jumps: BlockJumps) -> Result<Self, Error>
    where
        R: VirtualIo,
    {
        let mut bytes = [0; Self::LEN];
        serde::decompress(
            reader,
            MemoryIo::new(bytes.as_mut_slice()),
            jumps,
            BlockLayout::SAV,
        )?;

        Ok(Self { bytes })
    }

    /// Compress [`SongMemory`] into LSDJ blocks
    ///
    /// Returns the number of blocks written, or 0 if the song didn't fit. See
    /// [`serde::compress()`] for more information.
    pub fn compress<W>(
        &self,
        writer: W,
        start_block: usize,
        layout: BlockLayout,
    ) -> Result<usize, Error>
    where
        W: VirtualIo,
    {
        serde::compress(&self.bytes, writer, start_block, layout)
    }

    /// Does the memory look like an actual song?
    ///
    /// LSDJ writes the letters `rb` at three places in song memory. This returns true if at
    /// least one of those is intact.
    pub fn is_likely_valid(&self) -> bool {
        let check = |offset: usize| self.bytes[offset..offset + 2] == *b"rb";
        check(offsets::RB1) || check(offsets::RB2) || check(offsets::RB3)
    }

    /// The version of the format the song is encoded in
    pub fn format_version(&self) -> FormatVersion {
        FormatVersion::new(self.bytes[offsets::FORMAT_VERSION])
    }

    /// Change the format version byte
    ///
    /// This does not convert any of the song's contents to the new format.
    pub fn set_format_version(&mut self, version: FormatVersion) {
        self.bytes[offsets::FORMAT_VERSION] = version.get();
    }

    /// Access the bytes that make up the song
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Access the bytes that make up the song
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Pseudo-random bytes that barely compress, spreading a song over more than 64 blocks
    #[cfg(test)]
    pub(crate) fn noise() -> Self {
        let mut state = 0x1234_5678u32;
        let mut bytes = [0; Self::LEN];
        for byte in bytes.iter_mut() {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            *byte = (state >> 24) as u8;
        }

        Self { bytes }
    }
}

/// Deserialize [`SongMemory`] from bytes
///
/// Unlike [`SongMemory::from_array()`], this checks whether the bytes are likely to be a song.
impl TryFrom<&[u8]> for SongMemory {
    type Error = FromBytesError;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; Self::LEN] = value
            .try_into()
            .map_err(|_| FromBytesError::IncorrectSize)?;

        let song = Self { bytes };
        if song.is_likely_valid() {
            Ok(song)
        } else {
            Err(FromBytesError::InitializationCheckIncorrect)
        }
    }
}

impl Default for SongMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SongMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SongMemory")
            .field("format_version", &self.format_version())
            .finish_non_exhaustive()
    }
}

/// Errors that might be returned from [`SongMemory::try_from()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FromBytesError {
    /// The passed in number of bytes isn't correct
    #[error("The slice isn't of the correct size")]
    IncorrectSize,

    /// All correctly initialized song memory has certain bytes set for
    /// verification against memory corruption.
    ///
    /// This error is returned when that those bytes are faulty during a read.
    #[error("The initialization check failed")]
    InitializationCheckIncorrect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde::BLOCK_LEN;

    #[test]
    fn empty_song() {
        let song = SongMemory::new();
        assert_eq!(song.format_version(), FormatVersion::LATEST);
        assert!(song.is_likely_valid());
        assert_eq!(&song.as_slice()[offsets::RB1..offsets::RB1 + 2], b"rb");
        assert_eq!(&song.as_slice()[offsets::RB3..offsets::RB3 + 2], b"rb");
    }

    #[test]
    fn try_from() {
        let mut bytes = SongMemory::make_empty_song();
        assert!(SongMemory::try_from(bytes.as_slice()).is_ok());

        assert_eq!(
            SongMemory::try_from(&bytes[1..]),
            Err(FromBytesError::IncorrectSize)
        );

        // One intact marker suffices
        bytes[offsets::RB1] = 0;
        bytes[offsets::RB2] = 0;
        assert!(SongMemory::try_from(bytes.as_slice()).is_ok());

        bytes[offsets::RB3] = 0;
        assert_eq!(
            SongMemory::try_from(bytes.as_slice()),
            Err(FromBytesError::InitializationCheckIncorrect)
        );
    }

    #[test]
    fn raw_round_trip() {
        let mut song = SongMemory::new();
        song.as_mut_slice()[0x1234] = 0x56;

        let mut io = MemoryIo::new(vec![0u8; SongMemory::LEN]);
        song.to_writer(&mut io).unwrap();
        io.seek(std::io::SeekFrom::Start(0)).unwrap();

        assert_eq!(SongMemory::from_reader(&mut io).unwrap(), song);
    }

    #[test]
    fn compressed_round_trip() {
        let song = SongMemory::new();

        let mut blocks = MemoryIo::new(vec![0u8; BLOCK_LEN * 191]);
        let count = song.compress(&mut blocks, 1, BlockLayout::SAV).unwrap();
        assert!(count >= 1);

        blocks.seek(std::io::SeekFrom::Start(0)).unwrap();
        let decompressed = SongMemory::decompress(&mut blocks, BlockJumps::Sequential).unwrap();
        assert_eq!(decompressed, song);
    }

    #[test]
    fn decompressing_too_much() {
        let mut blocks = [0xC0, 0x00, 0xFF].repeat(200);
        blocks.extend_from_slice(&[0xE0, 0xFF]);

        assert!(matches!(
            SongMemory::decompress(MemoryIo::new(blocks.as_slice()), BlockJumps::Sequential),
            Err(Error::DecompressionSizeMismatch {
                expected: SongMemory::LEN,
                ..
            })
        ));
    }
}
