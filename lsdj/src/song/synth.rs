//! Soft synths that render frames into the wavetable

use super::{FormatVersion, SongMemory, offsets};
use crate::bits;
use ux::u4;

/// The number of synths in a song
pub const SYNTH_COUNT: usize = 0x10;

/// The number of bytes per synth
pub const SYNTH_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sawtooth,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    LowPass,
    HighPass,
    BandPass,
    AllPass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distortion {
    #[default]
    Clip,
    Wrap,
    Fold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseCompression {
    #[default]
    Normal,
    Resync,
    Resync2,
}

/// A parameter that is swept from a start to an end value over the synth's frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sweep<T> {
    pub start: T,
    pub end: T,
}

/// The parameters of a single synth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synth {
    pub waveform: Waveform,
    pub filter: Filter,

    /// Filter resonance
    ///
    /// Before format version 5 there is no end value, only the start is stored.
    pub resonance: Sweep<u4>,

    pub distortion: Distortion,
    pub phase_compression: PhaseCompression,
    pub volume: Sweep<u8>,
    pub cutoff: Sweep<u8>,
    pub phase: Sweep<u8>,
    pub vertical_shift: Sweep<u8>,
    pub limit: Sweep<u4>,
}

impl Default for Synth {
    fn default() -> Self {
        Self {
            waveform: Waveform::default(),
            filter: Filter::default(),
            resonance: Sweep::default(),
            distortion: Distortion::default(),
            phase_compression: PhaseCompression::default(),
            volume: Sweep {
                start: 0x10,
                end: 0x10,
            },
            cutoff: Sweep {
                start: 0xFF,
                end: 0xFF,
            },
            phase: Sweep::default(),
            vertical_shift: Sweep::default(),
            limit: Sweep {
                start: u4::new(0xF),
                end: u4::new(0xF),
            },
        }
    }
}

impl Synth {
    /// Decode a synth from its 16 bytes
    ///
    /// Out of range enumeration values decode as their defaults.
    pub fn from_bytes(bytes: &[u8; SYNTH_LEN], version: FormatVersion) -> Self {
        let waveform = match bytes[0] {
            1 => Waveform::Square,
            2 => Waveform::Triangle,
            _ => Waveform::Sawtooth,
        };

        let filter = match bytes[1] {
            1 => Filter::HighPass,
            2 => Filter::BandPass,
            3 => Filter::AllPass,
            _ => Filter::LowPass,
        };

        let distortion = match bytes[3] {
            1 => Distortion::Wrap,
            2 => Distortion::Fold,
            _ => Distortion::Clip,
        };

        let phase_compression = match bytes[4] {
            1 => PhaseCompression::Resync,
            2 => PhaseCompression::Resync2,
            _ => PhaseCompression::Normal,
        };

        let resonance = if version.get() >= 5 {
            Sweep {
                start: u4::new(bits::read_bits(bytes[2], 4, 4)),
                end: u4::new(bits::read_bits(bytes[2], 0, 4)),
            }
        } else {
            Sweep {
                start: u4::new(bits::read_bits(bytes[2], 0, 4)),
                end: u4::new(0),
            }
        };

        Self {
            waveform,
            filter,
            resonance,
            distortion,
            phase_compression,
            volume: Sweep {
                start: bytes[5],
                end: bytes[9],
            },
            cutoff: Sweep {
                start: bytes[6],
                end: bytes[10],
            },
            phase: Sweep {
                start: bytes[7],
                end: bytes[11],
            },
            vertical_shift: Sweep {
                start: bytes[8],
                end: bytes[12],
            },
            limit: Sweep {
                start: u4::new(0xF - bits::read_bits(bytes[13], 4, 4)),
                end: u4::new(0xF - bits::read_bits(bytes[13], 0, 4)),
            },
        }
    }

    /// Encode the synth into 16 bytes
    ///
    /// Bytes 14 and 15 are unused and left at zero.
    pub fn to_bytes(&self, version: FormatVersion) -> [u8; SYNTH_LEN] {
        let mut bytes = [0; SYNTH_LEN];

        bytes[0] = self.waveform as u8;
        bytes[1] = self.filter as u8;
        bytes[2] = if version.get() >= 5 {
            u8::from(self.resonance.start) << 4 | u8::from(self.resonance.end)
        } else {
            u8::from(self.resonance.start)
        };
        bytes[3] = self.distortion as u8;
        bytes[4] = self.phase_compression as u8;
        bytes[5] = self.volume.start;
        bytes[6] = self.cutoff.start;
        bytes[7] = self.phase.start;
        bytes[8] = self.vertical_shift.start;
        bytes[9] = self.volume.end;
        bytes[10] = self.cutoff.end;
        bytes[11] = self.phase.end;
        bytes[12] = self.vertical_shift.end;
        bytes[13] = (0xF - u8::from(self.limit.start)) << 4 | (0xF - u8::from(self.limit.end));

        bytes
    }
}

impl SongMemory {
    /// Decode one of the song's synths
    pub fn synth(&self, index: u4) -> Synth {
        let offset = synth_offset(index);
        let mut bytes = [0; SYNTH_LEN];
        bytes.copy_from_slice(&self.as_slice()[offset..offset + SYNTH_LEN]);

        Synth::from_bytes(&bytes, self.format_version())
    }

    /// Encode one of the song's synths, in the song's format version
    ///
    /// The two unused trailing bytes are left untouched.
    pub fn set_synth(&mut self, index: u4, synth: &Synth) {
        let offset = synth_offset(index);
        let bytes = synth.to_bytes(self.format_version());
        self.as_mut_slice()[offset..offset + 14].copy_from_slice(&bytes[..14]);
    }

    /// Have the synth's waves been edited by hand, since they were last rendered?
    pub fn is_synth_overwritten(&self, index: u4) -> bool {
        let (offset, bit) = overwrite_position(index);
        bits::read_bit(self.as_slice()[offset], bit)
    }

    pub fn set_synth_overwritten(&mut self, index: u4, overwritten: bool) {
        let (offset, bit) = overwrite_position(index);
        let byte = &mut self.as_mut_slice()[offset];
        *byte = bits::write_bit(*byte, bit, overwritten);
    }
}

fn synth_offset(index: u4) -> usize {
    offsets::SYNTH_PARAMS + usize::from(u8::from(index)) * SYNTH_LEN
}

fn overwrite_position(index: u4) -> (usize, u8) {
    let index = u8::from(index);
    (offsets::SYNTH_OVERWRITES + usize::from(index / 8), index % 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_synth_is_default() {
        let song = SongMemory::new();
        assert_eq!(song.synth(u4::new(0)), Synth::default());
        assert_eq!(song.synth(u4::new(0xF)), Synth::default());
    }

    #[test]
    fn resonance() {
        let synth = Synth {
            resonance: Sweep {
                start: u4::new(0xA),
                end: u4::new(0x3),
            },
            ..Default::default()
        };

        assert_eq!(synth.to_bytes(FormatVersion::new(5))[2], 0xA3);
        assert_eq!(synth.to_bytes(FormatVersion::new(4))[2], 0x0A);

        let mut bytes = [0; 16];
        bytes[2] = 0x3A;
        let old = Synth::from_bytes(&bytes, FormatVersion::new(4));
        assert_eq!(old.resonance.start, u4::new(0xA));
        assert_eq!(old.resonance.end, u4::new(0));
    }

    #[test]
    fn limit() {
        let synth = Synth {
            limit: Sweep {
                start: u4::new(0xF),
                end: u4::new(0x2),
            },
            ..Default::default()
        };

        let bytes = synth.to_bytes(FormatVersion::LATEST);
        assert_eq!(bytes[13], 0x0D);
        assert_eq!(Synth::from_bytes(&bytes, FormatVersion::LATEST), synth);
    }

    #[test]
    fn song_access() {
        let mut song = SongMemory::new();
        let synth = Synth {
            waveform: Waveform::Triangle,
            filter: Filter::AllPass,
            distortion: Distortion::Fold,
            phase_compression: PhaseCompression::Resync2,
            phase: Sweep { start: 1, end: 0x1F },
            ..Default::default()
        };

        song.set_synth(u4::new(3), &synth);
        assert_eq!(song.synth(u4::new(3)), synth);
        assert_eq!(song.synth(u4::new(2)), Synth::default());
    }

    #[test]
    fn overwritten() {
        let mut song = SongMemory::new();
        assert!(!song.is_synth_overwritten(u4::new(9)));

        song.set_synth_overwritten(u4::new(9), true);
        assert!(song.is_synth_overwritten(u4::new(9)));
        assert!(!song.is_synth_overwritten(u4::new(1)));
        assert_eq!(song.as_slice()[offsets::SYNTH_OVERWRITES + 1], 0b10);

        song.set_synth_overwritten(u4::new(9), false);
        assert!(!song.is_synth_overwritten(u4::new(9)));
    }
}
