//! Effect commands, as used in phrases and tables

use super::{FormatVersion, SetError};

/// An effect command
///
/// The discriminants are the bytes stored by songs older than format version 8. From version
/// 8 onwards, LSDJ stores [`Command::B`] right after [`Command::A`], moving every command after
/// it one place up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    #[default]
    None,
    A,
    C,
    D,
    E,
    F,
    G,
    H,
    K,
    L,
    M,
    O,
    P,
    R,
    S,
    T,
    V,
    W,
    Z,
    ArduinoboyN,
    ArduinoboyX,
    ArduinoboyQ,
    ArduinoboyY,
    B,

    /// A byte that doesn't map to any known command, kept as is
    Unknown(u8),
}

impl Command {
    const ORDERED: [Self; 23] = [
        Self::None,
        Self::A,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::K,
        Self::L,
        Self::M,
        Self::O,
        Self::P,
        Self::R,
        Self::S,
        Self::T,
        Self::V,
        Self::W,
        Self::Z,
        Self::ArduinoboyN,
        Self::ArduinoboyX,
        Self::ArduinoboyQ,
        Self::ArduinoboyY,
    ];

    /// Decode a command byte
    ///
    /// This never fails: bytes that aren't a command are returned as [`Command::Unknown`].
    pub fn from_byte(byte: u8, version: FormatVersion) -> Self {
        let index = if version.get() >= 8 {
            match byte {
                0 | 1 => byte,
                2 => return Self::B,
                _ => byte - 1,
            }
        } else {
            byte
        };

        Self::ORDERED
            .get(index as usize)
            .copied()
            .unwrap_or(Self::Unknown(byte))
    }

    /// Encode the command as a byte
    ///
    /// [`Command::B`] didn't exist before format version 8.
    pub fn to_byte(self, version: FormatVersion) -> Result<u8, SetError> {
        let index = match self {
            Self::Unknown(byte) => return Ok(byte),
            Self::B if version.get() >= 8 => return Ok(2),
            Self::B => {
                return Err(SetError::UnsupportedCommand {
                    command: self,
                    version,
                });
            }
            command => Self::ORDERED
                .iter()
                .position(|ordered| *ordered == command)
                .unwrap_or_default() as u8,
        };

        if version.get() >= 8 && index > 1 {
            Ok(index + 1)
        } else {
            Ok(index)
        }
    }
}
