//! Wavetable frames played by wave instruments and synths

use super::{SongMemory, offsets};
use ux::u4;

/// The number of waves in a song
pub const WAVE_COUNT: usize = 0x100;

/// The number of bytes per wave
pub const WAVE_LEN: usize = 16;

/// The number of waves that belong to each synth
pub const WAVES_PER_SYNTH: usize = 16;

/// The bytes of the wave LSDJ fills unused wave slots with
///
/// This pattern is special-cased by the [compression algorithm](crate::serde).
pub const DEFAULT_WAVE: [u8; WAVE_LEN] = [
    0x8E, 0xCD, 0xCC, 0xBB, 0xAA, 0xA9, 0x99, 0x88, 0x87, 0x76, 0x66, 0x55, 0x54, 0x43, 0x32, 0x31,
];

/// The bytes of a wave that is flat at equilibrium
pub const SILENT_WAVE: [u8; WAVE_LEN] = [0x88; WAVE_LEN];

/// A single value in a wavetable frame
///
/// Wavetable values are 4-bit integers, where:
///  - 0b0000 means full negative
///  - 0b1000 (8) is equilibrium (no amplitude).
///  - 0b1111 means full positive
///
/// This means the positive side has 1 value less available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaveValue(u4);

impl WaveValue {
    /// The minimum wave value
    pub const MIN: Self = Self(u4::new(0x0));

    /// The wave value representing silence (no amplitude)
    pub const SILENCE: Self = Self(u4::new(0x8));

    /// The maximum wave value
    pub const MAX: Self = Self(u4::new(0xF));

    pub const fn new(value: u4) -> Self {
        Self(value)
    }

    pub fn get(self) -> u4 {
        self.0
    }
}

impl From<u4> for WaveValue {
    fn from(value: u4) -> Self {
        Self(value)
    }
}

/// A full wavetable frame of 32 values
///
/// Values are stored two to a byte, with the first value in the high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wave {
    bytes: [u8; WAVE_LEN],
}

impl Wave {
    /// The number of values in a frame
    pub const STEPS: usize = 32;

    pub const fn from_bytes(bytes: [u8; WAVE_LEN]) -> Self {
        Self { bytes }
    }

    pub const fn bytes(&self) -> &[u8; WAVE_LEN] {
        &self.bytes
    }

    /// A frame that is silent across all of its steps
    pub const fn silent() -> Self {
        Self::from_bytes(SILENT_WAVE)
    }

    /// The value at one of the 32 steps
    ///
    /// # Panics
    ///
    /// Panics if `step` is 32 or higher.
    pub fn step(&self, step: usize) -> WaveValue {
        let byte = self.bytes[step / 2];
        let nibble = if step % 2 == 0 { byte >> 4 } else { byte & 0xF };
        WaveValue(u4::new(nibble))
    }

    /// Change the value at one of the 32 steps
    ///
    /// # Panics
    ///
    /// Panics if `step` is 32 or higher.
    pub fn set_step(&mut self, step: usize, value: WaveValue) {
        let byte = &mut self.bytes[step / 2];
        let value = u8::from(value.0);

        *byte = if step % 2 == 0 {
            (*byte & 0x0F) | value << 4
        } else {
            (*byte & 0xF0) | value
        };
    }

    /// Iterate over all 32 values
    pub fn steps(&self) -> impl Iterator<Item = WaveValue> + '_ {
        (0..Self::STEPS).map(|step| self.step(step))
    }

    /// Is this the wave LSDJ fills unused slots with?
    pub fn is_default(&self) -> bool {
        self.bytes == DEFAULT_WAVE
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::from_bytes(DEFAULT_WAVE)
    }
}

impl SongMemory {
    /// Retrieve a wave
    ///
    /// Every `u8` is a valid wave index.
    pub fn wave(&self, index: u8) -> Wave {
        let offset = wave_offset(index);
        let mut bytes = [0; WAVE_LEN];
        bytes.copy_from_slice(&self.as_slice()[offset..offset + WAVE_LEN]);

        Wave::from_bytes(bytes)
    }

    /// Overwrite a wave
    pub fn set_wave(&mut self, index: u8, wave: &Wave) {
        let offset = wave_offset(index);
        self.as_mut_slice()[offset..offset + WAVE_LEN].copy_from_slice(wave.bytes());
    }
}

fn wave_offset(index: u8) -> usize {
    offsets::WAVES + usize::from(index) * WAVE_LEN
}
