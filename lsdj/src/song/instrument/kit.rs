use super::{PlvSpeed, Vibrato, VibratoShape, direction_from_byte};
use crate::{bits, song::FormatVersion};
use ux::u6;

/// How a kit sample loops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KitLoop {
    #[default]
    Off,
    On,

    /// Loop everything after the attack
    Attack,
}

/// How two kit samples are mixed when they clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KitDistortion {
    #[default]
    Clip,
    Shape,
    Shape2,
    Wrap,
}

/// Parameters specific to kit instruments
///
/// A kit instrument plays two samples from sample kits on the wave channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kit {
    pub volume: u8,
    pub kit1: u6,
    pub kit2: u6,
    pub offset1: u8,
    pub offset2: u8,
    pub length1: u8,
    pub length2: u8,
    pub loop1: KitLoop,
    pub loop2: KitLoop,
    pub pitch: u8,
    pub half_speed: bool,
    pub distortion: KitDistortion,
    pub vibrato: Vibrato,
}

impl Kit {
    pub(super) fn from_bytes(bytes: &[u8; 16], version: FormatVersion) -> Self {
        let loop1 = if bits::read_bit(bytes[2], 7) {
            KitLoop::Attack
        } else if bits::read_bit(bytes[5], 6) {
            KitLoop::On
        } else {
            KitLoop::Off
        };

        let loop2 = if bits::read_bit(bytes[9], 7) {
            KitLoop::Attack
        } else if bits::read_bit(bytes[5], 5) {
            KitLoop::On
        } else {
            KitLoop::Off
        };

        let distortion = match bytes[10] & 3 {
            0 => KitDistortion::Clip,
            1 => KitDistortion::Shape,
            2 => KitDistortion::Shape2,
            _ => KitDistortion::Wrap,
        };

        Self {
            volume: bytes[1],
            kit1: u6::new(bytes[2] & 0x3F),
            kit2: u6::new(bytes[9] & 0x3F),
            offset1: bytes[12],
            offset2: bytes[13],
            length1: bytes[3],
            length2: bytes[11],
            loop1,
            loop2,
            pitch: bytes[8],
            half_speed: bits::read_bit(bytes[2], 6),
            distortion,
            vibrato: vibrato_from_byte(bytes[5], version),
        }
    }

    pub(super) fn to_bytes(&self, version: FormatVersion) -> [u8; 16] {
        let mut bytes = [0; 16];

        bytes[0] = 2;
        bytes[1] = self.volume;
        bytes[2] = attack_bit(self.loop1) | (self.half_speed as u8) << 6 | u8::from(self.kit1);
        bytes[3] = self.length1;
        bytes[4] = 0xFF;
        bytes[5] = on_bit(self.loop1) << 6
            | on_bit(self.loop2) << 5
            | vibrato_to_bits(self.vibrato, version);
        bytes[8] = self.pitch;
        bytes[9] = attack_bit(self.loop2) | u8::from(self.kit2);
        bytes[10] = 0xD0 | self.distortion as u8;
        bytes[11] = self.length2;
        bytes[12] = self.offset1;
        bytes[13] = self.offset2;
        bytes[14] = 0xF3;

        bytes
    }
}

fn attack_bit(kit_loop: KitLoop) -> u8 {
    if kit_loop == KitLoop::Attack { 0x80 } else { 0 }
}

fn on_bit(kit_loop: KitLoop) -> u8 {
    (kit_loop == KitLoop::On) as u8
}

/// Kits had no vibrato shape before format version 4, only a speed
fn vibrato_from_byte(byte: u8, version: FormatVersion) -> Vibrato {
    if version.get() >= 4 {
        return Vibrato::from_byte_v4(byte);
    }

    let speed = match bits::read_bits(byte, 1, 2) {
        0 => PlvSpeed::Fast,
        1 => PlvSpeed::Tick,
        _ => PlvSpeed::Step,
    };

    Vibrato {
        shape: VibratoShape::Triangle,
        speed,
        direction: direction_from_byte(byte),
    }
}

fn vibrato_to_bits(vibrato: Vibrato, version: FormatVersion) -> u8 {
    if version.get() >= 4 {
        return vibrato.to_bits_v4();
    }

    (vibrato.speed as u8 & 3) << 1 | vibrato.direction as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loops() {
        let kit = Kit {
            loop1: KitLoop::On,
            loop2: KitLoop::Attack,
            ..Default::default()
        };

        let bytes = kit.to_bytes(FormatVersion::LATEST);
        assert_eq!(bytes[2] & 0x80, 0);
        assert_eq!(bytes[5] & 0x60, 0x40);
        assert_eq!(bytes[9] & 0x80, 0x80);
        assert_eq!(Kit::from_bytes(&bytes, FormatVersion::LATEST), kit);
    }

    #[test]
    fn speed_before_version_4() {
        let kit = Kit {
            vibrato: Vibrato {
                speed: PlvSpeed::Step,
                ..Default::default()
            },
            ..Default::default()
        };

        let version = FormatVersion::new(3);
        let bytes = kit.to_bytes(version);
        assert_eq!(bytes[5], 4);
        assert_eq!(Kit::from_bytes(&bytes, version), kit);
    }

    #[test]
    fn distortion() {
        let kit = Kit {
            distortion: KitDistortion::Wrap,
            ..Default::default()
        };

        let bytes = kit.to_bytes(FormatVersion::LATEST);
        assert_eq!(bytes[10], 0xD3);
        assert_eq!(Kit::from_bytes(&bytes, FormatVersion::LATEST).distortion, KitDistortion::Wrap);
    }
}
