//! Virtual I/O: the byte stream every codec in this crate reads from and writes to
//!
//! [`VirtualIo`] only needs reading, writing, telling and seeking, so songs,
//! projects and savs can be serialized to files, memory buffers or anything else that can
//! implement those four methods.

mod file;
mod memory;

pub use file::FileIo;
pub use memory::{MemoryIo, Storage};

use crate::Error;
use std::{
    io::{self, SeekFrom},
    slice,
};

/// A seekable byte stream
///
/// Implementors only provide the four primitives. Reads and writes may be short; the provided
/// helper methods turn short transfers into [`Error::ReadFailed`] and [`Error::WriteFailed`].
pub trait VirtualIo {
    /// Read up to `buffer.len()` bytes, returning how many were read
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error>;

    /// Write up to `buffer.len()` bytes, returning how many were written
    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error>;

    /// The current position in the stream
    fn tell(&mut self) -> Result<u64, Error>;

    /// Move to a new position in the stream, returning it
    fn seek(&mut self, position: SeekFrom) -> Result<u64, Error>;

    /// Fill the whole buffer, or fail
    fn read_exact(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.read(&mut buffer[filled..])? {
                0 => return Err(Error::ReadFailed(io::ErrorKind::UnexpectedEof.into())),
                count => filled += count,
            }
        }

        Ok(())
    }

    /// Read a single byte
    fn read_byte(&mut self) -> Result<u8, Error> {
        let mut byte = 0;
        self.read_exact(slice::from_mut(&mut byte))?;

        Ok(byte)
    }

    /// Write the whole buffer, or fail
    fn write_all(&mut self, buffer: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        while written < buffer.len() {
            match self.write(&buffer[written..])? {
                0 => return Err(Error::WriteFailed(io::ErrorKind::WriteZero.into())),
                count => written += count,
            }
        }

        Ok(())
    }

    /// Write a single byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.write_all(slice::from_ref(&byte))
    }

    /// Write the same sequence of bytes `count` times
    fn write_repeated(&mut self, bytes: &[u8], count: usize) -> Result<(), Error> {
        for _ in 0..count {
            self.write_all(bytes)?;
        }

        Ok(())
    }
}

impl<V> VirtualIo for &mut V
where
    V: VirtualIo + ?Sized,
{
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        (**self).write(buffer)
    }

    fn tell(&mut self) -> Result<u64, Error> {
        (**self).tell()
    }

    fn seek(&mut self, position: SeekFrom) -> Result<u64, Error> {
        (**self).seek(position)
    }
}
