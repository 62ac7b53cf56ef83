//! A null-terminated/length-restricted string based on a subset of ASCII
use std::{
    fmt,
    str::{self, FromStr},
};
use thiserror::Error;

/// A null-terminated/length-restricted string based on a subset of ASCII
///
/// Projects and instruments have names, which are encoded as null-terminated strings with a
/// maximal length (think [strnlen](https://en.cppreference.com/w/c/string/byte/strlen)).
/// Shorter names are padded with zeroes.
///
/// The allowed characters in a [`Name`] are (ASCII) `A-Z`, `0-9`, space and `x`. The `x` is
/// shown as a lightning glyph by the default LSDJ ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Name<N> {
    const LIGHTNING_BOLT_CHAR: u8 = b'x';

    /// Try to convert a byte slice to a name
    ///
    /// This function fails if the bytes are longer than the allowed length, or an invalid
    /// character is found before the first zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FromBytesError> {
        if bytes.len() > N {
            return Err(FromBytesError::TooLong);
        }

        let mut dest = [0; N];
        for (index, byte) in bytes.iter().enumerate() {
            match *byte {
                byte if Self::is_byte_allowed(byte) => dest[index] = byte,
                0 => break,
                _ => return Err(FromBytesError::InvalidByte { byte: *byte, index }),
            }
        }

        Ok(Self { bytes: dest })
    }

    /// Convert stored bytes to a name, repairing what isn't allowed
    ///
    /// Files in the wild contain all sorts of garbage in their names. Lowercase letters are
    /// turned into capitals (except for `x`), any other disallowed byte becomes a space and
    /// bytes past `N` are ignored. Reading stops at the first zero.
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        let mut dest = [0; N];
        for (dest, byte) in dest.iter_mut().zip(bytes.iter().take_while(|byte| **byte != 0)) {
            *dest = match *byte {
                byte if Self::is_byte_allowed(byte) => byte,
                byte if byte.is_ascii_lowercase() => byte.to_ascii_uppercase(),
                _ => b' ',
            };
        }

        Self { bytes: dest }
    }

    /// Access the underlying bytes that make up the name
    ///
    /// This includes any amount of 0's used for null-termination
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The maximal number of characters allowed in the name
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The number of characters up to the null-termination (or N)
    pub fn len(&self) -> usize {
        self.bytes.iter().position(|c| *c == 0).unwrap_or(N)
    }

    /// Are there _any_ characters in the name string?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a [`prim@str`] slice
    pub fn as_str(&self) -> &str {
        // SAFETY: Both constructors only ever store bytes from the ASCII subset allowed by
        // LSDJ (or zeroes after the name), which is per definition UTF8-safe.
        unsafe { str::from_utf8_unchecked(&self.bytes[..self.len()]) }
    }

    /// Is a specific byte within the subset of ASCII usable for name strings?
    pub fn is_byte_allowed(byte: u8) -> bool {
        byte.is_ascii_uppercase()
            || byte.is_ascii_digit()
            || byte == b' '
            || byte == Self::LIGHTNING_BOLT_CHAR
    }

    /// Could these stored bytes be a name, without needing repair?
    ///
    /// Only the bytes before the first zero are checked.
    pub fn is_valid(bytes: &[u8]) -> bool {
        bytes
            .iter()
            .take(N)
            .take_while(|byte| **byte != 0)
            .all(|byte| Self::is_byte_allowed(*byte))
    }
}

impl<const N: usize> Default for Name<N> {
    fn default() -> Self {
        Self { bytes: [0; N] }
    }
}

impl<const N: usize> fmt::Display for Name<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for Name<N> {
    type Error = FromBytesError;

    #[inline]
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl<'a, const N: usize> TryFrom<&'a str> for Name<N> {
    type Error = FromBytesError;

    #[inline]
    fn try_from(str: &'a str) -> Result<Self, Self::Error> {
        str.as_bytes().try_into()
    }
}

impl<const N: usize> FromStr for Name<N> {
    type Err = FromBytesError;

    #[inline]
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        str.try_into()
    }
}

/// Errors that can result from trying to convert a byte slice to a [`Name`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FromBytesError {
    /// Error case for when the source slice is too big to fit in the [`Name`] string
    #[error("The slice did not fit in the name array")]
    TooLong,

    /// An invalid byte was found during conversion from bytes
    #[error("Byte {byte} at position {index} is not allowed as a name character")]
    InvalidByte { byte: u8, index: usize },
}
