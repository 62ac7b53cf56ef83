//! Tables: 16 steps of envelopes, transpositions and two command columns

use super::{SetError, SongMemory, command::Command, offsets};
use ux::u5;

/// The number of tables in a song
pub const TABLE_COUNT: usize = 0x20;

/// The number of steps in a table
pub const TABLE_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TableStep {
    pub envelope: u8,
    pub transposition: u8,
    pub command1: Command,
    pub command1_value: u8,
    pub command2: Command,
    pub command2_value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Table {
    pub steps: [TableStep; TABLE_LEN],
}

impl SongMemory {
    pub fn table(&self, index: u5) -> Table {
        let offset = usize::from(u8::from(index)) * TABLE_LEN;
        let version = self.format_version();
        let bytes = self.as_slice();
        let mut table = Table::default();

        for (step, slot) in table.steps.iter_mut().enumerate() {
            let at = |column: usize| bytes[column + offset + step];

            *slot = TableStep {
                envelope: at(offsets::TABLE_ENVELOPES),
                transposition: at(offsets::TABLE_TRANSPOSITIONS),
                command1: Command::from_byte(at(offsets::TABLE_COMMAND1), version),
                command1_value: at(offsets::TABLE_COMMAND1_VALUES),
                command2: Command::from_byte(at(offsets::TABLE_COMMAND2), version),
                command2_value: at(offsets::TABLE_COMMAND2_VALUES),
            };
        }

        table
    }

    /// Encode a table
    ///
    /// Nothing is written if any of the commands can't be stored in the song's format version.
    pub fn set_table(&mut self, index: u5, table: &Table) -> Result<(), SetError> {
        let version = self.format_version();
        let mut commands = [(0, 0); TABLE_LEN];
        for (bytes, step) in commands.iter_mut().zip(&table.steps) {
            *bytes = (step.command1.to_byte(version)?, step.command2.to_byte(version)?);
        }

        let offset = usize::from(u8::from(index)) * TABLE_LEN;
        let bytes = self.as_mut_slice();

        for (step, (data, (command1, command2))) in table.steps.iter().zip(commands).enumerate() {
            let at = offset + step;
            bytes[offsets::TABLE_ENVELOPES + at] = data.envelope;
            bytes[offsets::TABLE_TRANSPOSITIONS + at] = data.transposition;
            bytes[offsets::TABLE_COMMAND1 + at] = command1;
            bytes[offsets::TABLE_COMMAND1_VALUES + at] = data.command1_value;
            bytes[offsets::TABLE_COMMAND2 + at] = command2;
            bytes[offsets::TABLE_COMMAND2_VALUES + at] = data.command2_value;
        }

        Ok(())
    }

    pub fn is_table_allocated(&self, index: u5) -> bool {
        self.as_slice()[offsets::TABLE_ALLOCATIONS + usize::from(u8::from(index))] != 0
    }

    pub fn set_table_allocated(&mut self, index: u5, allocated: bool) {
        let offset = offsets::TABLE_ALLOCATIONS + usize::from(u8::from(index));
        self.as_mut_slice()[offset] = allocated as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::FormatVersion;

    #[test]
    fn columns() -> anyhow::Result<()> {
        let mut song = SongMemory::new();
        let mut table = Table::default();
        table.steps[2] = TableStep {
            envelope: 0xA3,
            transposition: 0x0C,
            command1: Command::H,
            command1_value: 0x20,
            command2: Command::B,
            command2_value: 0x01,
        };

        let index = u5::new(0x1F);
        song.set_table(index, &table)?;
        song.set_table_allocated(index, true);

        assert_eq!(song.table(index), table);
        assert_eq!(song.table(u5::new(0)), Table::default());
        assert!(song.is_table_allocated(index));
        assert_eq!(song.as_slice()[offsets::TABLE_COMMAND2 + 0x1F * 16 + 2], 2);

        Ok(())
    }

    #[test]
    fn unsupported_command() {
        let mut song = SongMemory::new();
        song.set_format_version(FormatVersion::new(3));

        let mut table = Table::default();
        table.steps[15].command2 = Command::B;

        assert!(song.set_table(u5::new(0), &table).is_err());
    }
}
