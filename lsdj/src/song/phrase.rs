//! Phrases: 16 steps of notes, instruments and commands

use super::{
    SetError, SongMemory, check_index, command::Command, offsets, read_allocation_bit,
    write_allocation_bit,
};
use ux::u6;

/// The number of phrases in a song
pub const PHRASE_COUNT: usize = 0xFF;

/// The number of steps in a phrase
pub const PHRASE_LEN: usize = 16;

/// A single row of a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PhraseStep {
    /// The note to trigger, counting from the lowest C, or `None` for a rest
    pub note: Option<u8>,

    /// The instrument to play the note with
    pub instrument: Option<u6>,

    pub command: Command,
    pub command_value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Phrase {
    pub steps: [PhraseStep; PHRASE_LEN],
}

impl SongMemory {
    /// Decode a phrase, or `None` if `index` is out of range
    pub fn phrase(&self, index: u8) -> Option<Phrase> {
        let offset = usize::from(index) * PHRASE_LEN;
        check_index(usize::from(index), PHRASE_COUNT).ok()?;

        let version = self.format_version();
        let bytes = self.as_slice();
        let mut phrase = Phrase::default();

        for (step, slot) in phrase.steps.iter_mut().enumerate() {
            let note = bytes[offsets::PHRASE_NOTES + offset + step];
            let instrument = bytes[offsets::PHRASE_INSTRUMENTS + offset + step];

            *slot = PhraseStep {
                note: (note != 0).then_some(note),
                instrument: (instrument < 0x40).then(|| u6::new(instrument)),
                command: Command::from_byte(
                    bytes[offsets::PHRASE_COMMANDS + offset + step],
                    version,
                ),
                command_value: bytes[offsets::PHRASE_COMMAND_VALUES + offset + step],
            };
        }

        Some(phrase)
    }

    /// Encode a phrase
    ///
    /// Nothing is written if any of the commands can't be stored in the song's format version.
    pub fn set_phrase(&mut self, index: u8, phrase: &Phrase) -> Result<(), SetError> {
        check_index(usize::from(index), PHRASE_COUNT)?;

        let version = self.format_version();
        let mut commands = [0; PHRASE_LEN];
        for (byte, step) in commands.iter_mut().zip(&phrase.steps) {
            *byte = step.command.to_byte(version)?;
        }

        let offset = usize::from(index) * PHRASE_LEN;
        let bytes = self.as_mut_slice();

        for (step, (data, command)) in phrase.steps.iter().zip(commands).enumerate() {
            bytes[offsets::PHRASE_NOTES + offset + step] = data.note.unwrap_or(0);
            bytes[offsets::PHRASE_INSTRUMENTS + offset + step] =
                data.instrument.map_or(0xFF, u8::from);
            bytes[offsets::PHRASE_COMMANDS + offset + step] = command;
            bytes[offsets::PHRASE_COMMAND_VALUES + offset + step] = data.command_value;
        }

        Ok(())
    }

    /// Is the phrase in use?
    ///
    /// Out of range indices are never allocated.
    pub fn is_phrase_allocated(&self, index: u8) -> bool {
        usize::from(index) < PHRASE_COUNT
            && read_allocation_bit(self, offsets::PHRASE_ALLOCATIONS, usize::from(index))
    }

    pub fn set_phrase_allocated(&mut self, index: u8, allocated: bool) -> Result<(), SetError> {
        check_index(usize::from(index), PHRASE_COUNT)?;
        write_allocation_bit(self, offsets::PHRASE_ALLOCATIONS, usize::from(index), allocated);
        Ok(())
    }
}
