use super::{BLOCK_COUNT, PROJECT_COUNT};
use crate::{Error, name::Name, project::PROJECT_NAME_LEN, vio::VirtualIo};

pub const RESERVED_LEN: usize = 30;
pub const NO_ACTIVE_PROJECT: u8 = 0xFF;
pub const UNUSED_BLOCK: u8 = 0xFF;

const INITIALIZATION_CHECK: [u8; 2] = *b"jk";

/// The block following the working song, describing the projects in the blocks after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub project_names: [u8; PROJECT_COUNT * PROJECT_NAME_LEN],
    pub versions: [u8; PROJECT_COUNT],
    pub reserved: [u8; RESERVED_LEN],
    pub active_project: u8,

    /// For every block, the slot of the project it belongs to
    pub block_allocations: [u8; BLOCK_COUNT],
}

impl Header {
    /// Read a header, or `None` if it lacks the initialization check bytes
    pub fn read<R>(mut reader: R) -> Result<Option<Self>, Error>
    where
        R: VirtualIo,
    {
        let mut header = Header {
            project_names: [0; PROJECT_COUNT * PROJECT_NAME_LEN],
            versions: [0; PROJECT_COUNT],
            reserved: [0; RESERVED_LEN],
            active_project: NO_ACTIVE_PROJECT,
            block_allocations: [UNUSED_BLOCK; BLOCK_COUNT],
        };
        let mut initialization_check = [0; 2];

        reader.read_exact(&mut header.project_names)?;
        reader.read_exact(&mut header.versions)?;
        reader.read_exact(&mut header.reserved)?;
        reader.read_exact(&mut initialization_check)?;
        header.active_project = reader.read_byte()?;
        reader.read_exact(&mut header.block_allocations)?;

        Ok((initialization_check == INITIALIZATION_CHECK).then_some(header))
    }

    pub fn write<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: VirtualIo,
    {
        writer.write_all(&self.project_names)?;
        writer.write_all(&self.versions)?;
        writer.write_all(&self.reserved)?;
        writer.write_all(&INITIALIZATION_CHECK)?;
        writer.write_byte(self.active_project)?;
        writer.write_all(&self.block_allocations)
    }

    pub fn project_name(&self, slot: usize) -> Name<PROJECT_NAME_LEN> {
        let offset = slot * PROJECT_NAME_LEN;
        Name::from_bytes_lossy(&self.project_names[offset..offset + PROJECT_NAME_LEN])
    }

    pub fn set_project_name(&mut self, slot: usize, name: &Name<PROJECT_NAME_LEN>) {
        let offset = slot * PROJECT_NAME_LEN;
        self.project_names[offset..offset + PROJECT_NAME_LEN].copy_from_slice(name.bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serde::BLOCK_LEN, vio::MemoryIo};

    #[test]
    fn layout() -> anyhow::Result<()> {
        let mut header = Header {
            project_names: [0; PROJECT_COUNT * PROJECT_NAME_LEN],
            versions: [0; PROJECT_COUNT],
            reserved: [0; RESERVED_LEN],
            active_project: 3,
            block_allocations: [UNUSED_BLOCK; BLOCK_COUNT],
        };
        header.set_project_name(1, &"TUNE".parse()?);
        header.versions[1] = 0x11;
        header.block_allocations[0] = 1;

        let mut io = MemoryIo::new([0u8; BLOCK_LEN]);
        header.write(&mut io)?;
        assert_eq!(io.position(), BLOCK_LEN);

        let bytes = io.into_inner();
        assert_eq!(&bytes[8..12], b"TUNE");
        assert_eq!(bytes[0x101], 0x11);
        assert_eq!(&bytes[0x13E..0x140], b"jk");
        assert_eq!(bytes[0x140], 3);
        assert_eq!(bytes[0x141], 1);

        let read = Header::read(MemoryIo::new(bytes.as_slice()))?.unwrap();
        assert_eq!(read.project_name(1).as_str(), "TUNE");
        assert_eq!(read, header);

        let mut bytes = bytes;
        bytes[0x13F] = b'K';
        assert_eq!(Header::read(MemoryIo::new(bytes.as_slice()))?, None);

        Ok(())
    }
}
