//! Implementation of the [LSDJ compression algorithm](https://littlesounddj.fandom.com/wiki/File_Management_Structure)
//!
//! Songs are stored as a run of fixed-size blocks. Within a block, bytes are either literal
//! or part of an escape sequence starting with [`RLE`](utils::RLE_BYTE) (run-length
//! encoding) or a special action byte (default waves and instruments, block jumps and
//! the end of the song).

mod compress;
mod decompress;
mod utils;

pub use compress::compress;
pub use decompress::{decompress, decompress_block};

/// The number of bytes in a single compression block
pub const BLOCK_LEN: usize = 0x200;

/// The shape of the block space compression writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// The number of bytes per block
    pub block_len: usize,

    /// The number of blocks that may be used, including the first one
    pub block_count: usize,
}

impl BlockLayout {
    /// The layout of the block space in a `.sav` file
    pub const SAV: Self = Self {
        block_len: BLOCK_LEN,
        block_count: 191,
    };
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self::SAV
    }
}

/// How block jumps are resolved during decompression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockJumps {
    /// Jump to block `n` at `first_block_position + (n - 1) * block_len`
    ///
    /// Blocks in a `.sav` are indexed from the first data block, so this is how projects are
    /// read from them.
    Absolute { first_block_position: u64 },

    /// Ignore the jump target and continue with the block following the current one
    ///
    /// `.lsdsng` files store their blocks contiguously, but keep the indices they had in the
    /// `.sav` they were exported from.
    Sequential,
}

/// The result of block compression/decompression
///
/// See [`decompress_block`] for more information on when this is returned
#[derive(Debug, PartialEq, Eq)]
pub enum End {
    /// A block-jump command has been written/read
    JumpToBlock(u8),

    /// An EOF command has been written/read
    EndOfFile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        song::{SongMemory, instrument::DEFAULT_INSTRUMENT, wave::DEFAULT_WAVE},
        vio::{MemoryIo, VirtualIo},
    };
    use std::io::SeekFrom;

    fn round_trip(song: &[u8], layout: BlockLayout) -> Vec<u8> {
        let mut blocks = MemoryIo::new(vec![0u8; layout.block_len * layout.block_count]);
        let count = compress(song, &mut blocks, 1, layout).unwrap();
        assert!(count > 0);

        blocks.seek(SeekFrom::Start(0)).unwrap();
        let mut plain = MemoryIo::new(vec![0u8; SongMemory::LEN]);
        decompress(&mut blocks, &mut plain, BlockJumps::Sequential, layout).unwrap();
        plain.into_inner()
    }

    #[test_log::test]
    fn factory_song() {
        let song = SongMemory::new();
        assert_eq!(round_trip(song.as_slice(), BlockLayout::SAV), song.as_slice());
    }

    #[test_log::test]
    fn default_waves() {
        let mut song = vec![0u8; SongMemory::LEN];
        for wave in song.chunks_exact_mut(16).take(20) {
            wave.copy_from_slice(&DEFAULT_WAVE);
        }

        let mut blocks = MemoryIo::new(vec![0u8; BLOCK_LEN * 4]);
        let count = compress(&song, &mut blocks, 1, BlockLayout::SAV).unwrap();
        assert_eq!(count, 1);

        // 20 waves take 320 bytes, leaving 0x7EC0 zeroes: 127 full runs and one of 0x3F
        let mut expected = vec![0xE0, 0xF0, 20];
        for _ in 0..127 {
            expected.extend_from_slice(&[0xC0, 0, 0xFF]);
        }
        expected.extend_from_slice(&[0xC0, 0, 0x3F, 0xE0, 0xFF]);
        expected.resize(BLOCK_LEN, 0);

        let blocks = blocks.into_inner();
        assert_eq!(&blocks[..BLOCK_LEN], expected.as_slice());
        assert!(blocks[BLOCK_LEN..].iter().all(|byte| *byte == 0));

        assert_eq!(round_trip(&song, BlockLayout::SAV), song);
    }

    #[test]
    fn rle_escapes() {
        let mut song = vec![0x11; SongMemory::LEN];
        song[100..105].fill(0xC0);
        song[200] = 0xE0;

        let mut blocks = MemoryIo::new(vec![0u8; BLOCK_LEN]);
        compress(&song, &mut blocks, 1, BlockLayout::SAV).unwrap();

        let blocks = blocks.into_inner();
        let escaped = [0xC0, 0xC0].repeat(5);
        assert!(blocks.windows(10).any(|window| window == escaped.as_slice()));
        assert!(blocks.windows(2).any(|window| window == [0xE0, 0xE0]));

        assert_eq!(round_trip(&song, BlockLayout::SAV), song);
    }

    #[test]
    fn instruments_and_noise() {
        // Bytes that barely compress force the song across many blocks
        let mut song: Vec<u8> = (0..SongMemory::LEN).map(|i| (i * 7 % 251) as u8).collect();
        song[0x3080..0x3080 + 48].copy_from_slice(&DEFAULT_INSTRUMENT.repeat(3));

        let plain = round_trip(&song, BlockLayout::SAV);
        assert_eq!(plain, song);
    }

    #[test_log::test]
    fn song_spanning_many_blocks() {
        let song = SongMemory::noise();

        let mut blocks = MemoryIo::new(vec![0u8; BLOCK_LEN * BlockLayout::SAV.block_count]);
        let count = compress(song.as_slice(), &mut blocks, 1, BlockLayout::SAV).unwrap();
        assert!(count > 64);

        let blocks = blocks.into_inner();
        for (index, block) in blocks.chunks_exact(BLOCK_LEN).take(count - 1).enumerate() {
            let jump = block.len() - block.iter().rev().take_while(|byte| **byte == 0).count();
            assert_eq!(&block[jump - 2..jump], &[0xE0, index as u8 + 2]);
        }

        let mut plain = MemoryIo::new(vec![0u8; SongMemory::LEN]);
        let jumps = BlockJumps::Absolute {
            first_block_position: 0,
        };
        decompress(MemoryIo::new(blocks.as_slice()), &mut plain, jumps, BlockLayout::SAV).unwrap();
        assert_eq!(plain.into_inner(), song.as_slice());
    }

    #[test]
    fn absolute_jumps() {
        let song: Vec<u8> = (0..SongMemory::LEN).map(|i| (i * 13 % 255) as u8).collect();

        // Leave block 1 empty, starting compression in block 2
        let mut blocks = MemoryIo::new(vec![0u8; BLOCK_LEN * 100]);
        blocks.seek(SeekFrom::Start(BLOCK_LEN as u64)).unwrap();
        let count = compress(&song, &mut blocks, 2, BlockLayout::SAV).unwrap();
        assert!(count > 1);

        blocks.seek(SeekFrom::Start(BLOCK_LEN as u64)).unwrap();
        let mut plain = MemoryIo::new(vec![0u8; SongMemory::LEN]);
        let jumps = BlockJumps::Absolute {
            first_block_position: 0,
        };
        decompress(&mut blocks, &mut plain, jumps, BlockLayout::SAV).unwrap();
        assert_eq!(plain.into_inner(), song);
    }
}
