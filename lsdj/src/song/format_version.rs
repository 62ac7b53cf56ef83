use std::fmt;

/// The version of the format a song is stored in
///
/// This lives in the last byte of [`SongMemory`](super::SongMemory) and changes whenever LSDJ
/// reinterprets some of the bits in a song. It is unrelated to the version counter of a
/// [`Project`](crate::project::Project).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(u8);

impl FormatVersion {
    /// The format version written by LSDJ 9.2 and newer
    pub const LATEST: Self = Self(0x16);

    /// Wrap a raw format version byte
    pub const fn new(version: u8) -> Self {
        Self(version)
    }

    /// The raw format version byte
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl From<u8> for FormatVersion {
    fn from(version: u8) -> Self {
        Self(version)
    }
}

impl From<FormatVersion> for u8 {
    fn from(version: FormatVersion) -> Self {
        version.0
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}
