//! Chains: sequences of up to 16 phrases, each with a transposition

use super::{
    SetError, SongMemory, check_index, offsets, read_allocation_bit, write_allocation_bit,
};

/// The number of chains in a song
pub const CHAIN_COUNT: usize = 0x80;

/// The number of steps in a chain
pub const CHAIN_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ChainStep {
    /// The phrase to play, or `None` to end the chain
    pub phrase: Option<u8>,

    /// Semitones added to every note in the phrase
    pub transposition: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Chain {
    pub steps: [ChainStep; CHAIN_LEN],
}

impl SongMemory {
    /// Decode a chain, or `None` if `index` is out of range
    pub fn chain(&self, index: u8) -> Option<Chain> {
        check_index(usize::from(index), CHAIN_COUNT).ok()?;

        let offset = usize::from(index) * CHAIN_LEN;
        let bytes = self.as_slice();
        let mut chain = Chain::default();

        for (step, slot) in chain.steps.iter_mut().enumerate() {
            let phrase = bytes[offsets::CHAIN_PHRASES + offset + step];
            *slot = ChainStep {
                phrase: (phrase != 0xFF).then_some(phrase),
                transposition: bytes[offsets::CHAIN_TRANSPOSITIONS + offset + step],
            };
        }

        Some(chain)
    }

    pub fn set_chain(&mut self, index: u8, chain: &Chain) -> Result<(), SetError> {
        check_index(usize::from(index), CHAIN_COUNT)?;

        let offset = usize::from(index) * CHAIN_LEN;
        let bytes = self.as_mut_slice();

        for (step, data) in chain.steps.iter().enumerate() {
            bytes[offsets::CHAIN_PHRASES + offset + step] = data.phrase.unwrap_or(0xFF);
            bytes[offsets::CHAIN_TRANSPOSITIONS + offset + step] = data.transposition;
        }

        Ok(())
    }

    /// Is the chain in use?
    ///
    /// Out of range indices are never allocated.
    pub fn is_chain_allocated(&self, index: u8) -> bool {
        usize::from(index) < CHAIN_COUNT
            && read_allocation_bit(self, offsets::CHAIN_ALLOCATIONS, usize::from(index))
    }

    pub fn set_chain_allocated(&mut self, index: u8, allocated: bool) -> Result<(), SetError> {
        check_index(usize::from(index), CHAIN_COUNT)?;
        write_allocation_bit(self, offsets::CHAIN_ALLOCATIONS, usize::from(index), allocated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let song = SongMemory::new();
        assert_eq!(song.chain(0), Some(Chain::default()));
        assert_eq!(song.chain(0x7F), Some(Chain::default()));
        assert_eq!(song.chain(0x80), None);
    }

    #[test]
    fn steps() -> anyhow::Result<()> {
        let mut song = SongMemory::new();
        let mut chain = Chain::default();
        chain.steps[0] = ChainStep {
            phrase: Some(0),
            transposition: 0x0C,
        };
        chain.steps[1].phrase = Some(0xFE);

        song.set_chain(0x10, &chain)?;
        song.set_chain_allocated(0x10, true)?;

        assert_eq!(song.chain(0x10), Some(chain));
        assert!(song.is_chain_allocated(0x10));
        assert!(!song.is_chain_allocated(0x11));
        assert_eq!(song.as_slice()[offsets::CHAIN_ALLOCATIONS + 2], 1);

        song.set_chain(0x7F, &chain)?;
        song.set_chain_allocated(0x7F, true)?;
        assert_eq!(song.chain(0x7F), Some(chain));
        assert!(song.is_chain_allocated(0x7F));
        assert_eq!(song.as_slice()[offsets::CHAIN_ALLOCATIONS + 15], 0x80);
        assert_eq!(song.as_slice()[offsets::CHAIN_PHRASES + 0x7F0], 0);
        assert_eq!(song.as_slice()[offsets::CHAIN_TRANSPOSITIONS + 0x7F0], 0x0C);

        assert_eq!(
            song.set_chain(0x80, &chain),
            Err(SetError::IndexOutOfRange {
                index: 0x80,
                count: CHAIN_COUNT
            })
        );
        assert!(!song.is_chain_allocated(0x80));

        Ok(())
    }
}
