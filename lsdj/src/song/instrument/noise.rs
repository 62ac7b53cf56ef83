use super::{PULSE_NOISE_TAIL, create_length, parse_length};

/// Whether the noise channel's shape is reset on every note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseStability {
    #[default]
    Free,
    Stable,
}

/// Parameters specific to noise instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noise {
    pub envelope: u8,
    pub stability: NoiseStability,
    pub length: Option<u8>,
    pub shape: u8,
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            envelope: 0xA8,
            stability: NoiseStability::Free,
            length: None,
            shape: 0xFF,
        }
    }
}

impl Noise {
    pub(super) fn from_bytes(bytes: &[u8; 16]) -> Self {
        let stability = if bytes[2] & 1 != 0 {
            NoiseStability::Stable
        } else {
            NoiseStability::Free
        };

        Self {
            envelope: bytes[1],
            stability,
            length: parse_length(bytes[3]),
            shape: bytes[4],
        }
    }

    pub(super) fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0; 16];

        bytes[0] = 3;
        bytes[1] = self.envelope;
        bytes[2] = self.stability as u8;
        bytes[3] = create_length(self.length);
        bytes[4] = self.shape;
        bytes[8..].copy_from_slice(&PULSE_NOISE_TAIL);

        bytes
    }
}
