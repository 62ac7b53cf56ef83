use super::VirtualIo;
use crate::Error;
use std::io::{self, SeekFrom};

/// Backing bytes for a [`MemoryIo`]
///
/// Shared slices are read-only: writing to a [`MemoryIo`] over them fails.
pub trait Storage {
    /// The bytes that can be read
    fn bytes(&self) -> &[u8];

    /// The bytes that can be written, if the storage is writable at all
    fn bytes_mut(&mut self) -> Option<&mut [u8]>;
}

impl Storage for &[u8] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        None
    }
}

impl Storage for &mut [u8] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(&mut **self)
    }
}

impl Storage for Vec<u8> {
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(self.as_mut_slice())
    }
}

impl<const N: usize> Storage for [u8; N] {
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(self.as_mut_slice())
    }
}

/// A [`VirtualIo`] over a fixed-size block of memory
///
/// Unlike [`std::io::Cursor`] the stream never grows: reads and writes are truncated at the
/// end of the storage, and seeking outside of `[0, len]` fails and leaves the position as is.
///
/// ```
/// use lsdj::vio::{MemoryIo, VirtualIo};
///
/// let mut io = MemoryIo::new([0u8; 4]);
/// io.write_all(&[1, 2, 3])?;
/// assert_eq!(io.write(&[4, 5])?, 1);
/// assert_eq!(io.into_inner(), [1, 2, 3, 4]);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryIo<S> {
    storage: S,
    position: usize,
}

impl<S> MemoryIo<S>
where
    S: Storage,
{
    /// Wrap storage, starting at position 0
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            position: 0,
        }
    }

    /// The number of bytes in the storage
    pub fn len(&self) -> usize {
        self.storage.bytes().len()
    }

    /// Is the storage zero bytes long?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current position, as a plain index
    pub fn position(&self) -> usize {
        self.position
    }

    /// Access the storage
    pub fn get_ref(&self) -> &S {
        &self.storage
    }

    /// Unwrap the storage
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S> VirtualIo for MemoryIo<S>
where
    S: Storage,
{
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        let bytes = &self.storage.bytes()[self.position..];
        let count = buffer.len().min(bytes.len());
        buffer[..count].copy_from_slice(&bytes[..count]);
        self.position += count;

        Ok(count)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        let position = self.position;
        let bytes = self.storage.bytes_mut().ok_or_else(|| {
            Error::WriteFailed(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "the memory is read-only",
            ))
        })?;

        let bytes = &mut bytes[position..];
        let count = buffer.len().min(bytes.len());
        bytes[..count].copy_from_slice(&buffer[..count]);
        self.position += count;

        Ok(count)
    }

    fn tell(&mut self) -> Result<u64, Error> {
        Ok(self.position as u64)
    }

    fn seek(&mut self, position: SeekFrom) -> Result<u64, Error> {
        let len = self.len() as i128;
        let target = match position {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::End(offset) => len + offset as i128,
            SeekFrom::Current(offset) => self.position as i128 + offset as i128,
        };

        if !(0..=len).contains(&target) {
            return Err(Error::SeekFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("position {target} lies outside of the memory (0..={len})"),
            )));
        }

        self.position = target as usize;
        Ok(self.position as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_truncates() {
        let bytes = [1u8, 2, 3];
        let mut io = MemoryIo::new(bytes.as_slice());

        let mut buffer = [0; 2];
        assert_eq!(io.read(&mut buffer).unwrap(), 2);
        assert_eq!(buffer, [1, 2]);

        assert_eq!(io.read(&mut buffer).unwrap(), 1);
        assert_eq!(buffer[0], 3);
        assert_eq!(io.read(&mut buffer).unwrap(), 0);

        io.seek(SeekFrom::Start(1)).unwrap();
        assert!(matches!(
            io.read_exact(&mut [0; 3]),
            Err(Error::ReadFailed(_))
        ));
    }

    #[test]
    fn write() {
        let mut io = MemoryIo::new(vec![0; 4]);
        io.write_all(&[0xAA, 0xBB]).unwrap();
        io.write_byte(0xCC).unwrap();
        assert_eq!(io.tell().unwrap(), 3);
        assert!(matches!(
            io.write_repeated(&[0xDD], 2),
            Err(Error::WriteFailed(_))
        ));
        assert_eq!(io.into_inner(), vec![0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn read_only() {
        let bytes = [0u8; 4];
        let mut io = MemoryIo::new(bytes.as_slice());
        assert!(matches!(io.write(&[1]), Err(Error::WriteFailed(_))));
        assert_eq!(io.position(), 0);
    }

    #[test]
    fn seek_bounds() {
        let mut io = MemoryIo::new([0u8; 16]);

        assert_eq!(io.seek(SeekFrom::Start(16)).unwrap(), 16);
        assert_eq!(io.seek(SeekFrom::Current(-4)).unwrap(), 12);
        assert_eq!(io.seek(SeekFrom::End(-16)).unwrap(), 0);

        io.seek(SeekFrom::Start(5)).unwrap();
        assert!(matches!(
            io.seek(SeekFrom::Start(17)),
            Err(Error::SeekFailed(_))
        ));
        assert!(matches!(
            io.seek(SeekFrom::Current(-6)),
            Err(Error::SeekFailed(_))
        ));
        assert_eq!(io.tell().unwrap(), 5);
    }
}
