//! Words for the speech synthesizer

use super::{SetError, SongMemory, check_index, offsets};

/// The number of words in a song
pub const WORD_COUNT: usize = 42;

/// The number of sounds in a word
pub const WORD_LEN: usize = 16;

/// The number of bytes in a word name
pub const WORD_NAME_LEN: usize = 4;

/// A word, made up of allophones (speech sounds) and how long each of them lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Word {
    pub allophones: [u8; WORD_LEN],
    pub durations: [u8; WORD_LEN],
}

impl SongMemory {
    /// Retrieve a word, or `None` if `index` is out of range
    pub fn word(&self, index: usize) -> Option<Word> {
        check_index(index, WORD_COUNT).ok()?;

        let offset = word_offset(index);
        let bytes = self.as_slice();
        let mut word = Word::default();
        word.allophones.copy_from_slice(&bytes[offset..offset + WORD_LEN]);
        word.durations.copy_from_slice(&bytes[offset + WORD_LEN..offset + 2 * WORD_LEN]);

        Some(word)
    }

    pub fn set_word(&mut self, index: usize, word: &Word) -> Result<(), SetError> {
        check_index(index, WORD_COUNT)?;

        let offset = word_offset(index);
        let bytes = self.as_mut_slice();
        bytes[offset..offset + WORD_LEN].copy_from_slice(&word.allophones);
        bytes[offset + WORD_LEN..offset + 2 * WORD_LEN].copy_from_slice(&word.durations);

        Ok(())
    }

    /// The raw name of a word
    ///
    /// Word names aren't restricted to the characters of a [`Name`](crate::name::Name); the
    /// factory names contain dashes, for example.
    pub fn word_name(&self, index: usize) -> Option<[u8; WORD_NAME_LEN]> {
        check_index(index, WORD_COUNT).ok()?;

        let offset = offsets::WORD_NAMES + index * WORD_NAME_LEN;
        let mut name = [0; WORD_NAME_LEN];
        name.copy_from_slice(&self.as_slice()[offset..offset + WORD_NAME_LEN]);

        Some(name)
    }

    pub fn set_word_name(
        &mut self,
        index: usize,
        name: [u8; WORD_NAME_LEN],
    ) -> Result<(), SetError> {
        check_index(index, WORD_COUNT)?;

        let offset = offsets::WORD_NAMES + index * WORD_NAME_LEN;
        self.as_mut_slice()[offset..offset + WORD_NAME_LEN].copy_from_slice(&name);

        Ok(())
    }
}

fn word_offset(index: usize) -> usize {
    offsets::WORDS + index * WORD_LEN * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words() -> anyhow::Result<()> {
        let mut song = SongMemory::new();
        assert_eq!(song.word(41), Some(Word::default()));
        assert_eq!(song.word(42), None);

        let word = Word {
            allophones: [0x12; WORD_LEN],
            durations: [3; WORD_LEN],
        };
        song.set_word(41, &word)?;

        assert_eq!(song.word(41), Some(word));
        assert_eq!(song.as_slice()[offsets::WORDS + 41 * 32 + 16], 3);
        assert_eq!(offsets::WORDS + WORD_COUNT * 32, offsets::WORD_NAMES);

        Ok(())
    }

    #[test]
    fn names() -> anyhow::Result<()> {
        let mut song = SongMemory::new();
        assert_eq!(song.word_name(0), Some(*b"W-0W"));

        song.set_word_name(1, *b"C 2 ")?;
        assert_eq!(song.word_name(1), Some(*b"C 2 "));
        assert!(song.set_word_name(42, *b"NOPE").is_err());

        Ok(())
    }
}
