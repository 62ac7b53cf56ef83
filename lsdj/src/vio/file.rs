use super::VirtualIo;
use crate::Error;
use std::{
    fs::{self, File},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

/// A [`VirtualIo`] over a file on disk
#[derive(Debug)]
pub struct FileIo {
    file: File,
}

impl FileIo {
    /// Open an existing file for reading
    pub fn open<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileOpenFailed {
            path: path.to_owned(),
            source,
        })?;

        Ok(Self { file })
    }

    /// Create (or truncate) a file for writing, including any missing parent folders
    pub fn create<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let open_failed = |source| Error::FileOpenFailed {
            path: path.to_owned(),
            source,
        };

        if let Some(folder) = path.parent() {
            fs::create_dir_all(folder).map_err(open_failed)?;
        }

        let file = File::create(path).map_err(open_failed)?;

        Ok(Self { file })
    }

    /// Unwrap the underlying file handle
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl From<File> for FileIo {
    fn from(file: File) -> Self {
        Self { file }
    }
}

impl VirtualIo for FileIo {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.file.read(buffer).map_err(Error::ReadFailed)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        self.file.write(buffer).map_err(Error::WriteFailed)
    }

    fn tell(&mut self) -> Result<u64, Error> {
        self.file.stream_position().map_err(Error::TellFailed)
    }

    fn seek(&mut self, position: SeekFrom) -> Result<u64, Error> {
        self.file.seek(position).map_err(Error::SeekFailed)
    }
}
