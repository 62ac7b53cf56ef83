//! Reading and writing ranges of bits within a single byte
//!
//! Positions count from the least significant bit, so `read_bits(byte, 4, 4)` returns the
//! high nibble.

/// Read `count` bits from `byte`, starting at bit `position`
///
/// # Panics
///
/// Panics if the range doesn't fit in a byte (`position + count > 8`).
pub const fn read_bits(byte: u8, position: u8, count: u8) -> u8 {
    assert!(position + count <= 8, "bit range exceeds a byte");
    ((byte as u16 >> position) & mask(count)) as u8
}

/// Replace `count` bits within `byte`, starting at bit `position`, with `value`
///
/// Bits of `value` that don't fit in `count` are discarded. All bits outside of the range are
/// left untouched.
///
/// # Panics
///
/// Panics if the range doesn't fit in a byte (`position + count > 8`).
pub const fn write_bits(byte: u8, position: u8, count: u8, value: u8) -> u8 {
    assert!(position + count <= 8, "bit range exceeds a byte");
    let mask = mask(count) << position;
    ((byte as u16 & !mask) | ((value as u16) << position & mask)) as u8
}

/// Read a single bit as a boolean
pub const fn read_bit(byte: u8, position: u8) -> bool {
    read_bits(byte, position, 1) != 0
}

/// Set or clear a single bit
pub const fn write_bit(byte: u8, position: u8, value: bool) -> u8 {
    write_bits(byte, position, 1, value as u8)
}

const fn mask(count: u8) -> u16 {
    (1 << count) - 1
}
