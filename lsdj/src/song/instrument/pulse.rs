use super::{
    PULSE_NOISE_TAIL, Vibrato, create_drum_mode, create_length, create_transpose,
    parse_drum_mode, parse_length, parse_transpose,
};
use crate::{bits, song::FormatVersion};

/// The duty cycle of a pulse wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseWidth {
    #[default]
    Eighth = 0,
    Quarter = 1,
    Half = 2,
    ThreeQuarters = 3,
}

/// Parameters specific to pulse instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Volume envelope, start volume in the high nibble and fade in the low one
    pub envelope: u8,

    /// Detune of the second pulse channel when both play the same instrument
    pub pulse2_tune: u8,

    /// How long the sound plays, or `None` to play until the next note
    pub length: Option<u8>,

    pub sweep: u8,
    pub pulse_width: PulseWidth,
    pub fine_tune: u8,
    pub vibrato: Vibrato,
    pub transpose: bool,
    pub drum_mode: bool,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            envelope: 0xA8,
            pulse2_tune: 0,
            length: None,
            sweep: 0xFF,
            pulse_width: PulseWidth::Eighth,
            fine_tune: 0,
            vibrato: Vibrato::default(),
            transpose: true,
            drum_mode: false,
        }
    }
}

impl Pulse {
    pub(super) fn from_bytes(bytes: &[u8; 16], version: FormatVersion) -> Self {
        let pulse_width = match bits::read_bits(bytes[7], 6, 2) {
            0 => PulseWidth::Eighth,
            1 => PulseWidth::Quarter,
            2 => PulseWidth::Half,
            _ => PulseWidth::ThreeQuarters,
        };

        Self {
            envelope: bytes[1],
            pulse2_tune: bytes[2],
            length: parse_length(bytes[3]),
            sweep: bytes[4],
            pulse_width,
            fine_tune: bits::read_bits(bytes[7], 2, 4),
            vibrato: Vibrato::from_byte(bytes[5], version),
            transpose: parse_transpose(bytes[5], version),
            drum_mode: parse_drum_mode(bytes[5], version),
        }
    }

    pub(super) fn to_bytes(&self, version: FormatVersion) -> [u8; 16] {
        let mut bytes = [0; 16];

        bytes[1] = self.envelope;
        bytes[2] = self.pulse2_tune;
        bytes[3] = create_length(self.length);
        bytes[4] = self.sweep;
        bytes[5] = self.vibrato.to_bits(version)
            | create_transpose(self.transpose, version)
            | create_drum_mode(self.drum_mode, version);
        bytes[7] = (self.pulse_width as u8) << 6 | (self.fine_tune & 0xF) << 2;
        bytes[8..].copy_from_slice(&PULSE_NOISE_TAIL);

        bytes
    }
}
