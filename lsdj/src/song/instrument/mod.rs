//! Instruments: 16-byte records whose layout depends on their kind and the format version

mod kit;
mod noise;
mod pulse;
mod wave;

pub use kit::{Kit, KitDistortion, KitLoop};
pub use noise::{Noise, NoiseStability};
pub use pulse::{Pulse, PulseWidth};
pub use wave::{PlaybackMode, Wave};

use super::{FormatVersion, SetError, SongMemory, check_index, offsets};
use crate::{bits, name::Name};
use ux::{u5, u6};

/// The bytes LSDJ stores for a default instrument, starting at its envelope
///
/// This pattern is special-cased by the [compression algorithm](crate::serde).
pub const DEFAULT_INSTRUMENT: [u8; 16] = [
    0xA8, 0, 0, 0xFF, 0, 0, 3, 0, 0, 0xD0, 0, 0, 0, 0xF3, 0, 0,
];

/// The number of instruments in a song
pub const INSTRUMENT_COUNT: usize = 0x40;

/// The number of bytes per instrument
pub const INSTRUMENT_LEN: usize = 16;

/// The number of characters in an instrument name
pub const INSTRUMENT_NAME_LEN: usize = 5;

/// A single instrument
///
/// The fields every kind of instrument has live here, the rest lives in [`InstrumentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instrument {
    /// The speakers the instrument plays through
    pub panning: Panning,

    /// The table that runs alongside the instrument, if any
    pub table: Option<u5>,

    /// Should the table step automatically?
    pub automate: bool,

    /// The kind-specific parameters
    pub kind: InstrumentKind,
}

/// The different kinds of instruments, each mapping to a channel of the Game Boy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Pulse(Pulse),
    Wave(Wave),
    Kit(Kit),
    Noise(Noise),
}

impl Default for InstrumentKind {
    fn default() -> Self {
        Self::Pulse(Pulse::default())
    }
}

impl Instrument {
    /// Decode an instrument from its 16 bytes
    ///
    /// Decoding never fails. Bits that have no meaning in `version` get their default values,
    /// and an unknown kind byte is read as a pulse instrument.
    pub fn from_bytes(bytes: &[u8; INSTRUMENT_LEN], version: FormatVersion) -> Self {
        let kind = match bytes[0] {
            1 => InstrumentKind::Wave(Wave::from_bytes(bytes, version)),
            2 => InstrumentKind::Kit(Kit::from_bytes(bytes, version)),
            3 => InstrumentKind::Noise(Noise::from_bytes(bytes)),
            _ => InstrumentKind::Pulse(Pulse::from_bytes(bytes, version)),
        };

        Self {
            panning: Panning::from_bits(bytes[7]),
            table: parse_table(bytes[6]),
            automate: bits::read_bit(bytes[5], 3),
            kind,
        }
    }

    /// Encode the instrument into 16 bytes
    ///
    /// Values too large for their bit ranges are saturated or truncated.
    pub fn to_bytes(&self, version: FormatVersion) -> [u8; INSTRUMENT_LEN] {
        let mut bytes = match &self.kind {
            InstrumentKind::Pulse(pulse) => pulse.to_bytes(version),
            InstrumentKind::Wave(wave) => wave.to_bytes(version),
            InstrumentKind::Kit(kit) => kit.to_bytes(version),
            InstrumentKind::Noise(noise) => noise.to_bytes(),
        };

        bytes[5] = bits::write_bit(bytes[5], 3, self.automate);
        bytes[6] = create_table(self.table);
        bytes[7] = bits::write_bits(bytes[7], 0, 2, self.panning as u8);

        bytes
    }
}

/// The speakers an instrument plays through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panning {
    None = 0,
    Right = 1,
    Left = 2,
    #[default]
    LeftRight = 3,
}

impl Panning {
    fn from_bits(byte: u8) -> Self {
        match byte & 3 {
            0 => Self::None,
            1 => Self::Right,
            2 => Self::Left,
            _ => Self::LeftRight,
        }
    }
}

/// The shape of the vibrato an instrument applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VibratoShape {
    #[default]
    Triangle,
    Sawtooth,
    Square,
}

/// How fast pitch effects (P, L and V commands) update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlvSpeed {
    #[default]
    Fast,
    Tick,
    Step,
}

/// Whether vibrato starts by going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VibratoDirection {
    #[default]
    Down,
    Up,
}

/// The vibrato settings pulse, wave and kit instruments share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vibrato {
    pub shape: VibratoShape,
    pub speed: PlvSpeed,
    pub direction: VibratoDirection,
}

impl Vibrato {
    /// Decode from byte 5 of a pulse or wave instrument
    fn from_byte(byte: u8, version: FormatVersion) -> Self {
        let direction = direction_from_byte(byte);

        if version.get() >= 4 {
            return Self::from_byte_v4(byte);
        }

        let (shape, speed) = match bits::read_bits(byte, 1, 2) {
            0 => (VibratoShape::Triangle, PlvSpeed::Fast),
            1 => (VibratoShape::Sawtooth, PlvSpeed::Tick),
            2 => (VibratoShape::Triangle, PlvSpeed::Tick),
            _ => (VibratoShape::Square, PlvSpeed::Tick),
        };

        Self {
            shape,
            speed,
            direction,
        }
    }

    /// Decode byte 5 the way format version 4 and up store it, for every kind
    fn from_byte_v4(byte: u8) -> Self {
        let shape = match bits::read_bits(byte, 1, 2) {
            1 => VibratoShape::Sawtooth,
            2 => VibratoShape::Square,
            _ => VibratoShape::Triangle,
        };

        Self {
            shape,
            speed: speed_from_byte(byte),
            direction: direction_from_byte(byte),
        }
    }

    /// Encode into the bits of byte 5 of a pulse or wave instrument
    ///
    /// Before format version 4 shape and speed share a single code, so not every combination
    /// can be stored. The shape takes precedence.
    fn to_bits(self, version: FormatVersion) -> u8 {
        if version.get() >= 4 {
            return self.to_bits_v4();
        }

        let code = match (self.shape, self.speed) {
            (VibratoShape::Triangle, PlvSpeed::Fast) => 0,
            (VibratoShape::Sawtooth, _) => 1,
            (VibratoShape::Triangle, _) => 2,
            (VibratoShape::Square, _) => 3,
        };

        code << 1 | self.direction as u8
    }

    fn to_bits_v4(self) -> u8 {
        let speed = match self.speed {
            PlvSpeed::Fast => 0,
            PlvSpeed::Tick => 0x10,
            PlvSpeed::Step => 0x80,
        };

        (self.shape as u8) << 1 | speed | self.direction as u8
    }
}

fn speed_from_byte(byte: u8) -> PlvSpeed {
    if byte & 0x80 != 0 {
        PlvSpeed::Step
    } else if byte & 0x10 != 0 {
        PlvSpeed::Tick
    } else {
        PlvSpeed::Fast
    }
}

fn direction_from_byte(byte: u8) -> VibratoDirection {
    if bits::read_bit(byte, 0) {
        VibratoDirection::Up
    } else {
        VibratoDirection::Down
    }
}

/// The length of a sound, in units of 1/64th
///
/// `None` means the sound plays until a new note is triggered.
fn parse_length(byte: u8) -> Option<u8> {
    if byte & 0x40 != 0 {
        Some(!byte & 0x3F)
    } else {
        None
    }
}

fn create_length(length: Option<u8>) -> u8 {
    match length {
        Some(length) if length < 0x40 => 0x40 | (!length & 0x3F),
        _ => 0,
    }
}

fn parse_table(byte: u8) -> Option<u5> {
    if byte & 0x20 != 0 {
        Some(u5::new(byte & 0x1F))
    } else {
        None
    }
}

fn create_table(table: Option<u5>) -> u8 {
    match table {
        Some(table) => 0x20 | u8::from(table),
        None => 0,
    }
}

/// Drum mode only exists from format version 3 onwards
fn parse_drum_mode(byte: u8, version: FormatVersion) -> bool {
    version.get() >= 3 && bits::read_bit(byte, 6)
}

fn create_drum_mode(drum_mode: bool, version: FormatVersion) -> u8 {
    if version.get() >= 3 && drum_mode { 0x40 } else { 0 }
}

/// Transposition is stored inverted, and only exists from format version 3 onwards
fn parse_transpose(byte: u8, version: FormatVersion) -> bool {
    version.get() >= 3 && !bits::read_bit(byte, 5)
}

fn create_transpose(transpose: bool, version: FormatVersion) -> u8 {
    if version.get() >= 3 && !transpose { 0x20 } else { 0 }
}

/// The bytes 8 to 15 of pulse and noise instruments
const PULSE_NOISE_TAIL: [u8; 8] = [0, 0, 0xD0, 0, 0, 0, 0xF3, 0];

impl SongMemory {
    /// Decode one of the song's instruments
    pub fn instrument(&self, index: u6) -> Instrument {
        let offset = offsets::INSTRUMENT_PARAMS + usize::from(u8::from(index)) * INSTRUMENT_LEN;
        let mut bytes = [0; INSTRUMENT_LEN];
        bytes.copy_from_slice(&self.as_slice()[offset..offset + INSTRUMENT_LEN]);

        Instrument::from_bytes(&bytes, self.format_version())
    }

    /// Encode one of the song's instruments, in the song's format version
    pub fn set_instrument(&mut self, index: u6, instrument: &Instrument) {
        let offset = offsets::INSTRUMENT_PARAMS + usize::from(u8::from(index)) * INSTRUMENT_LEN;
        let bytes = instrument.to_bytes(self.format_version());
        self.as_mut_slice()[offset..offset + INSTRUMENT_LEN].copy_from_slice(&bytes);
    }

    /// Is the instrument in use?
    pub fn is_instrument_allocated(&self, index: u6) -> bool {
        self.as_slice()[offsets::INSTRUMENT_ALLOCATIONS + usize::from(u8::from(index))] != 0
    }

    /// Mark the instrument as used or unused
    pub fn set_instrument_allocated(&mut self, index: u6, allocated: bool) {
        self.as_mut_slice()[offsets::INSTRUMENT_ALLOCATIONS + usize::from(u8::from(index))] =
            allocated as u8;
    }

    /// The name of an instrument
    ///
    /// Names are read leniently, see [`Name::from_bytes_lossy()`].
    pub fn instrument_name(&self, index: u6) -> Name<INSTRUMENT_NAME_LEN> {
        let offset = instrument_name_offset(index);
        Name::from_bytes_lossy(&self.as_slice()[offset..offset + INSTRUMENT_NAME_LEN])
    }

    /// Rename an instrument
    pub fn set_instrument_name(&mut self, index: u6, name: &Name<INSTRUMENT_NAME_LEN>) {
        let offset = instrument_name_offset(index);
        self.as_mut_slice()[offset..offset + INSTRUMENT_NAME_LEN].copy_from_slice(name.bytes());
    }

    /// Iterate over all instruments that are in use
    pub fn allocated_instruments(&self) -> impl Iterator<Item = (u6, Instrument)> + '_ {
        (0..INSTRUMENT_COUNT as u8)
            .map(u6::new)
            .filter(|index| self.is_instrument_allocated(*index))
            .map(|index| (index, self.instrument(index)))
    }

    /// Decode an instrument by plain index
    ///
    /// Returns `None` if `index` is out of range.
    pub fn instrument_at(&self, index: usize) -> Option<Instrument> {
        check_index(index, INSTRUMENT_COUNT)
            .ok()
            .map(|_| self.instrument(u6::new(index as u8)))
    }

    /// Encode an instrument by plain index
    pub fn set_instrument_at(
        &mut self,
        index: usize,
        instrument: &Instrument,
    ) -> Result<(), SetError> {
        check_index(index, INSTRUMENT_COUNT)?;
        self.set_instrument(u6::new(index as u8), instrument);
        Ok(())
    }
}

fn instrument_name_offset(index: u6) -> usize {
    offsets::INSTRUMENT_NAMES + usize::from(u8::from(index)) * INSTRUMENT_NAME_LEN
}
