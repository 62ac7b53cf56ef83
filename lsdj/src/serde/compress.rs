use super::{
    BlockLayout,
    utils::{DEFAULT_INSTRUMENT_BYTE, DEFAULT_WAVE_BYTE, EOF_BYTE, RLE_BYTE, SA_BYTE},
};
use crate::{
    Error,
    song::{instrument::DEFAULT_INSTRUMENT, wave::DEFAULT_WAVE},
    vio::VirtualIo,
};
use log::{debug, warn};
use std::io::SeekFrom;

/// Compress song bytes into a chain of LSDJ blocks
///
/// This function compresses `bytes` as described [here](https://littlesounddj.fandom.com/wiki/File_Management_Structure),
/// writing whole blocks of `layout.block_len` bytes starting at the writer's current position.
/// The first block written is numbered `start_block` (1-based), and every block ends in a jump
/// to the next one, except for the last, which ends in an end-of-file command.
///
/// Returns the number of blocks written. When the data doesn't fit in the blocks left
/// (`start_block..=layout.block_count`) everything written so far is zeroed out again, the
/// writer is moved back to where it started and `0` is returned.
pub fn compress<W>(
    bytes: &[u8],
    mut writer: W,
    start_block: usize,
    layout: BlockLayout,
) -> Result<usize, Error>
where
    W: VirtualIo,
{
    if start_block > layout.block_count {
        return Ok(0);
    }

    let write_start = writer.tell()?;

    let mut block = start_block;
    let mut block_size = 0;
    let mut read = 0;

    while read < bytes.len() {
        let (compression, consumed) = compress_step(&bytes[read..]);
        read += consumed;

        // Every block needs room for a trailing jump or end-of-file command
        if block_size + compression.len() + 2 >= layout.block_len {
            writer.write_all(&[SA_BYTE, (block + 1) as u8])?;
            writer.write_repeated(&[0], layout.block_len - block_size - 2)?;

            block += 1;
            block_size = 0;

            if block == layout.block_count + 1 {
                warn!("Ran out of blocks compressing from block {start_block}, rolling back");
                rollback(&mut writer, write_start)?;
                return Ok(0);
            }
        }

        compression.write(&mut writer)?;
        block_size += compression.len();
    }

    writer.write_all(&[SA_BYTE, EOF_BYTE])?;
    writer.write_repeated(&[0], layout.block_len - block_size - 2)?;

    let count = block - start_block + 1;
    debug!("Compressed {} bytes into {count} block(s)", bytes.len());

    Ok(count)
}

fn rollback<W>(mut writer: W, write_start: u64) -> Result<(), Error>
where
    W: VirtualIo,
{
    let write_end = writer.tell()?;
    writer.seek(SeekFrom::Start(write_start))?;
    writer.write_repeated(&[0], (write_end - write_start) as usize)?;
    writer.seek(SeekFrom::Start(write_start))?;

    Ok(())
}

/// Find the next compression event, returning it and the number of bytes it covers
///
/// `bytes` should not be empty.
fn compress_step(bytes: &[u8]) -> (Compression, usize) {
    if let count @ 1.. = count_matches(bytes, &DEFAULT_WAVE) {
        return (
            Compression::DefaultWave { count },
            count as usize * DEFAULT_WAVE.len(),
        );
    }

    if let count @ 1.. = count_matches(bytes, &DEFAULT_INSTRUMENT) {
        return (
            Compression::DefaultInstrument { count },
            count as usize * DEFAULT_INSTRUMENT.len(),
        );
    }

    match bytes[0] {
        RLE_BYTE => (Compression::RleLiteral, 1),
        SA_BYTE => (Compression::SaLiteral, 1),
        value if bytes.len() > 3 && bytes[1..4].iter().all(|byte| *byte == value) => {
            let count = bytes
                .iter()
                .take(u8::MAX as usize)
                .take_while(|byte| **byte == value)
                .count();

            (
                Compression::RunLengthEncoding {
                    value,
                    count: count as u8,
                },
                count,
            )
        }
        value => (Compression::Literal { value }, 1),
    }
}

/// Count how many times `pattern` repeats at the start of `bytes`
///
/// A repetition only counts if at least one byte follows it.
fn count_matches(bytes: &[u8], pattern: &[u8]) -> u8 {
    let mut count = 0;
    let mut rest = bytes;
    while rest.len() > pattern.len() && rest.starts_with(pattern) && count < u8::MAX {
        count += 1;
        rest = &rest[pattern.len()..];
    }
    count
}

#[derive(Debug, PartialEq, Eq)]
enum Compression {
    RunLengthEncoding { value: u8, count: u8 },
    DefaultInstrument { count: u8 },
    DefaultWave { count: u8 },
    RleLiteral,
    SaLiteral,
    Literal { value: u8 },
}

impl Compression {
    /// The number of bytes this event takes up in a block
    fn len(&self) -> usize {
        match self {
            Self::RunLengthEncoding { .. }
            | Self::DefaultInstrument { .. }
            | Self::DefaultWave { .. } => 3,
            Self::RleLiteral | Self::SaLiteral => 2,
            Self::Literal { .. } => 1,
        }
    }

    fn write<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: VirtualIo,
    {
        match *self {
            Self::RunLengthEncoding { value, count } => writer.write_all(&[RLE_BYTE, value, count]),
            Self::DefaultInstrument { count } => {
                writer.write_all(&[SA_BYTE, DEFAULT_INSTRUMENT_BYTE, count])
            }
            Self::DefaultWave { count } => writer.write_all(&[SA_BYTE, DEFAULT_WAVE_BYTE, count]),
            Self::RleLiteral => writer.write_all(&[RLE_BYTE, RLE_BYTE]),
            Self::SaLiteral => writer.write_all(&[SA_BYTE, SA_BYTE]),
            Self::Literal { value } => writer.write_byte(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serde::BLOCK_LEN, vio::MemoryIo};

    const TINY: BlockLayout = BlockLayout {
        block_len: 8,
        block_count: 3,
    };

    fn assert_write<const N: usize>(compression: Compression, expected: [u8; N]) {
        let mut dest = MemoryIo::new([0u8; N]);
        compression.write(&mut dest).unwrap();
        assert_eq!(compression.len(), N);
        assert_eq!(dest.into_inner(), expected);
    }

    #[test]
    fn matches() {
        assert_eq!(count_matches(&[5, 5, 5, 5, 6], &[5, 5]), 2);
        assert_eq!(count_matches(&[5, 5, 6], &[5, 5]), 1);

        // The pattern must be followed by at least one byte
        assert_eq!(count_matches(&[5, 5], &[5, 5]), 0);
        assert_eq!(count_matches(&[5, 5, 5, 5], &[5, 5]), 1);

        assert_eq!(count_matches(&[0; 600], &[0, 0]), u8::MAX);
    }

    /// Distinct bytes without control bytes, so that every one of them compresses to a literal
    fn literals(count: usize) -> Vec<u8> {
        (0..count).map(|i| (i % 0xB0 + 1) as u8).collect()
    }

    fn compress_two_blocks(bytes: &[u8]) -> Vec<u8> {
        let mut blocks = MemoryIo::new(vec![0xAAu8; BLOCK_LEN * 2]);
        assert_eq!(compress(bytes, &mut blocks, 1, BlockLayout::SAV).unwrap(), 2);
        blocks.into_inner()
    }

    #[test]
    fn sa_literal() {
        let (compression, consumed) = compress_step(&[0xE0, 0xE0, 0xE0, 0xE0, 0xE0]);
        assert_eq!(consumed, 1);
        assert_eq!(compression, Compression::SaLiteral);
        assert_write(compression, [0xE0, 0xE0]);
    }

    #[test]
    fn rle_literal() {
        let (compression, consumed) = compress_step(&[0xC0]);
        assert_eq!(consumed, 1);
        assert_eq!(compression, Compression::RleLiteral);
        assert_write(compression, [0xC0, 0xC0]);
    }

    #[test]
    fn rle() {
        let (compression, consumed) = compress_step(&[4, 4, 4, 4, 4, 4, 4, 9]);
        assert_eq!(consumed, 7);
        assert_eq!(
            compression,
            Compression::RunLengthEncoding { value: 4, count: 7 }
        );
        assert_write(compression, [0xC0, 0x04, 0x07]);

        // Three equal bytes aren't worth a run
        let (compression, _) = compress_step(&[4, 4, 4, 9]);
        assert_eq!(compression, Compression::Literal { value: 4 });

        let (compression, consumed) = compress_step(&[4; 300]);
        assert_eq!(consumed, 255);
        assert_eq!(
            compression,
            Compression::RunLengthEncoding {
                value: 4,
                count: 255
            }
        );
    }

    #[test]
    fn value() {
        let (compression, consumed) = compress_step(&[4, 9]);
        assert_eq!(consumed, 1);
        assert_eq!(compression, Compression::Literal { value: 4 });
        assert_write(compression, [0x04]);
    }

    #[test]
    fn default_instrument() {
        let mut bytes = DEFAULT_INSTRUMENT.repeat(3);
        *bytes.last_mut().unwrap() = 0xFF;

        let (compression, consumed) = compress_step(&bytes);
        assert_eq!(consumed, 32);
        assert_eq!(compression, Compression::DefaultInstrument { count: 2 });
        assert_write(compression, [0xE0, 0xF1, 0x02]);
    }

    #[test]
    fn default_wave() {
        let mut bytes = DEFAULT_WAVE.repeat(3);
        *bytes.last_mut().unwrap() = 0xFF;

        let (compression, consumed) = compress_step(&bytes);
        assert_eq!(consumed, 32);
        assert_eq!(compression, Compression::DefaultWave { count: 2 });
        assert_write(compression, [0xE0, 0xF0, 0x02]);
    }

    #[test]
    fn self_escapes() {
        let layout = BlockLayout {
            block_len: 16,
            block_count: 1,
        };

        let mut blocks = MemoryIo::new([0u8; 16]);
        assert_eq!(compress(&[0xC0; 5], &mut blocks, 1, layout).unwrap(), 1);
        assert_eq!(
            blocks.into_inner(),
            [0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xE0, 0xFF, 0, 0, 0, 0]
        );
    }

    #[test]
    fn block_boundary() {
        // A sixth literal would leave no room after the jump command
        let mut blocks = MemoryIo::new([0xAAu8; 16]);
        let count = compress(&[1, 2, 3, 4, 5, 6], &mut blocks, 1, TINY).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            blocks.into_inner(),
            [1, 2, 3, 4, 5, 0xE0, 2, 0, 6, 0xE0, 0xFF, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn events_never_straddle_blocks() {
        let mut blocks = MemoryIo::new([0xAAu8; 16]);
        let count = compress(&[1, 2, 3, 7, 7, 7, 7], &mut blocks, 1, TINY).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            blocks.into_inner(),
            [1, 2, 3, 0xE0, 2, 0, 0, 0, 0xC0, 7, 4, 0xE0, 0xFF, 0, 0, 0]
        );
    }

    #[test]
    fn run_at_the_end_of_a_block() {
        // The run ends at BLOCK_LEN - 3, which leaves just enough room for the jump
        let mut bytes = literals(506);
        bytes.extend_from_slice(&[7, 7, 7, 7, 7, 0x11]);

        let blocks = compress_two_blocks(&bytes);
        assert_eq!(&blocks[..506], &bytes[..506]);
        assert_eq!(&blocks[506..BLOCK_LEN], &[0xC0, 7, 5, 0xE0, 2, 0]);
        assert_eq!(&blocks[BLOCK_LEN..BLOCK_LEN + 3], &[0x11, 0xE0, 0xFF]);
        assert!(blocks[BLOCK_LEN + 3..].iter().all(|byte| *byte == 0));

        // One literal more and the run would end at BLOCK_LEN - 2, so it moves to the next block
        let mut bytes = literals(507);
        bytes.extend_from_slice(&[7, 7, 7, 7, 7, 0x11]);

        let blocks = compress_two_blocks(&bytes);
        assert_eq!(&blocks[..507], &bytes[..507]);
        assert_eq!(&blocks[507..BLOCK_LEN], &[0xE0, 2, 0, 0, 0]);
        assert_eq!(&blocks[BLOCK_LEN..BLOCK_LEN + 6], &[0xC0, 7, 5, 0x11, 0xE0, 0xFF]);
        assert!(blocks[BLOCK_LEN + 6..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn escape_at_the_end_of_a_block() {
        let mut bytes = literals(507);
        bytes.extend_from_slice(&[0xE0, 0x11]);

        let blocks = compress_two_blocks(&bytes);
        assert_eq!(&blocks[507..BLOCK_LEN], &[0xE0, 0xE0, 0xE0, 2, 0]);
        assert_eq!(&blocks[BLOCK_LEN..BLOCK_LEN + 3], &[0x11, 0xE0, 0xFF]);

        // Ending at BLOCK_LEN - 2 would leave no room for the jump
        let mut bytes = literals(508);
        bytes.push(0xE0);

        let blocks = compress_two_blocks(&bytes);
        assert_eq!(&blocks[508..BLOCK_LEN], &[0xE0, 2, 0, 0]);
        assert_eq!(&blocks[BLOCK_LEN..BLOCK_LEN + 4], &[0xE0, 0xE0, 0xE0, 0xFF]);
        assert!(blocks[BLOCK_LEN + 4..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn empty_input_fills_a_block() {
        let mut blocks = MemoryIo::new([0xAAu8; 8]);
        assert_eq!(compress(&[], &mut blocks, 1, TINY).unwrap(), 1);
        assert_eq!(blocks.into_inner(), [0xE0, 0xFF, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn exhaustion() {
        let mut blocks = MemoryIo::new(vec![0xAAu8; 40]);
        blocks.seek(SeekFrom::Start(4)).unwrap();

        let bytes: Vec<u8> = (1..=20).collect();
        assert_eq!(compress(&bytes, &mut blocks, 1, TINY).unwrap(), 0);
        assert_eq!(blocks.tell().unwrap(), 4);

        let blocks = blocks.into_inner();
        assert_eq!(&blocks[..4], &[0xAA; 4]);
        assert!(blocks[4..28].iter().all(|byte| *byte == 0));
        assert_eq!(&blocks[28..], &[0xAA; 12]);
    }

    #[test]
    fn no_blocks_left() {
        let mut blocks = MemoryIo::new([0xAAu8; 8]);
        assert_eq!(compress(&[1], &mut blocks, 4, TINY).unwrap(), 0);
        assert_eq!(blocks.into_inner(), [0xAA; 8]);
    }
}
