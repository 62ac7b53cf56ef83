use super::{Vibrato, create_drum_mode, create_transpose, parse_drum_mode, parse_transpose};
use crate::song::FormatVersion;
use ux::u4;

/// How a wave instrument steps through the frames of its synth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    #[default]
    Once,
    Loop,
    PingPong,
    Manual,
}

/// Parameters specific to wave instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    pub volume: u8,
    pub synth: u4,
    pub repeat: u4,
    pub playback_mode: PlaybackMode,

    /// The last frame the synth plays
    pub length: u4,

    /// The number of ticks per frame, starting at 1
    pub speed: u8,

    pub vibrato: Vibrato,
    pub transpose: bool,
    pub drum_mode: bool,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            volume: 3,
            synth: u4::new(0),
            repeat: u4::new(0),
            playback_mode: PlaybackMode::Once,
            length: u4::new(0xF),
            speed: 4,
            vibrato: Vibrato::default(),
            transpose: true,
            drum_mode: false,
        }
    }
}

impl Wave {
    pub(super) fn from_bytes(bytes: &[u8; 16], version: FormatVersion) -> Self {
        let playback_mode = match bytes[9] & 3 {
            0 => PlaybackMode::Once,
            1 => PlaybackMode::Loop,
            2 => PlaybackMode::PingPong,
            _ => PlaybackMode::Manual,
        };

        let (length, speed) = match version.get() {
            7.. => (0xF - (bytes[10] & 0xF), bytes[11].saturating_add(4)),
            6 => (bytes[10] & 0xF, bytes[11].saturating_add(1)),
            _ => (bytes[14] >> 4, (bytes[14] & 0xF) + 1),
        };

        Self {
            volume: bytes[1],
            synth: u4::new(bytes[2] >> 4),
            repeat: u4::new(bytes[2] & 0xF),
            playback_mode,
            length: u4::new(length),
            speed,
            vibrato: Vibrato::from_byte(bytes[5], version),
            transpose: parse_transpose(bytes[5], version),
            drum_mode: parse_drum_mode(bytes[5], version),
        }
    }

    pub(super) fn to_bytes(&self, version: FormatVersion) -> [u8; 16] {
        let mut bytes = [0; 16];
        let length = u8::from(self.length);

        bytes[0] = 1;
        bytes[1] = self.volume;
        bytes[2] = u8::from(self.synth) << 4 | u8::from(self.repeat);
        bytes[4] = 0xFF;
        bytes[5] = self.vibrato.to_bits(version)
            | create_transpose(self.transpose, version)
            | create_drum_mode(self.drum_mode, version);
        bytes[9] = self.playback_mode as u8;

        match version.get() {
            7.. => {
                bytes[10] = 0xF - length;
                bytes[11] = self.speed.saturating_sub(4);
            }
            6 => {
                bytes[10] = length;
                bytes[11] = self.speed.saturating_sub(1);
            }
            _ => bytes[14] = length << 4 | (self.speed.saturating_sub(1) & 0xF),
        }

        bytes
    }
}
