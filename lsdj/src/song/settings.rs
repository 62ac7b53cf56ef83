//! Song-wide settings, the song arrangement and bookmarks

use super::{SetError, SongMemory, offsets};

/// The number of rows in the song screen
pub const ROW_COUNT: usize = 0x100;

/// The number of bookmarks each channel can hold
pub const BOOKMARKS_PER_CHANNEL: usize = 16;

/// The lowest tempo LSDJ can play at, in beats per minute
pub const MIN_TEMPO: u16 = 40;

/// The highest tempo LSDJ can play at, in beats per minute
pub const MAX_TEMPO: u16 = 295;

const NO_CHAIN: u8 = 0xFF;
const NO_BOOKMARK: u8 = 0xFF;

/// The four sound channels of the Game Boy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Pulse1,
    Pulse2,
    Wave,
    Noise,
}

impl Channel {
    pub const ALL: [Self; 4] = [Self::Pulse1, Self::Pulse2, Self::Wave, Self::Noise];
}

/// How LSDJ synchronizes with other devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    None,
    Lsdj,
    Midi,
    Keyboard,
    AnalogIn,
    AnalogOut,
}

impl SyncMode {
    fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::None,
            1 => Self::Lsdj,
            2 => Self::Midi,
            3 => Self::Keyboard,
            4 => Self::AnalogIn,
            5 => Self::AnalogOut,
            _ => return None,
        })
    }
}

/// Whether cloning a chain also clones its phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneMode {
    #[default]
    Deep,
    Slim,
}

impl SongMemory {
    /// The tempo in beats per minute
    ///
    /// Tempos above 255 wrap around in storage, which is why stored values below 40 mean 256 more.
    pub fn tempo(&self) -> u16 {
        let byte = self.byte(offsets::TEMPO);
        if u16::from(byte) < MIN_TEMPO {
            u16::from(byte) + 256
        } else {
            u16::from(byte)
        }
    }

    pub fn set_tempo(&mut self, bpm: u16) -> Result<(), SetError> {
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&bpm) {
            return Err(SetError::ValueOutOfRange {
                value: bpm.into(),
                min: MIN_TEMPO.into(),
                max: MAX_TEMPO.into(),
            });
        }

        self.set_byte(offsets::TEMPO, (bpm % 256) as u8);
        Ok(())
    }

    /// The number of semitones every note in the song is transposed by
    pub fn transposition(&self) -> u8 {
        self.byte(offsets::TRANSPOSITION)
    }

    pub fn set_transposition(&mut self, semitones: u8) {
        self.set_byte(offsets::TRANSPOSITION, semitones);
    }

    /// The sync mode, or `None` if the stored byte isn't one LSDJ knows
    pub fn sync_mode(&self) -> Option<SyncMode> {
        SyncMode::from_byte(self.byte(offsets::SYNC_MODE))
    }

    pub fn set_sync_mode(&mut self, mode: SyncMode) {
        self.set_byte(offsets::SYNC_MODE, mode as u8);
    }

    pub fn clone_mode(&self) -> CloneMode {
        match self.byte(offsets::CLONE_MODE) {
            0 => CloneMode::Deep,
            _ => CloneMode::Slim,
        }
    }

    pub fn set_clone_mode(&mut self, mode: CloneMode) {
        self.set_byte(offsets::CLONE_MODE, mode as u8);
    }

    pub fn font(&self) -> u8 {
        self.byte(offsets::FONT)
    }

    pub fn set_font(&mut self, font: u8) {
        self.set_byte(offsets::FONT, font);
    }

    pub fn color_palette(&self) -> u8 {
        self.byte(offsets::COLOR_PALETTE)
    }

    pub fn set_color_palette(&mut self, palette: u8) {
        self.set_byte(offsets::COLOR_PALETTE, palette);
    }

    pub fn key_delay(&self) -> u8 {
        self.byte(offsets::KEY_DELAY)
    }

    pub fn set_key_delay(&mut self, delay: u8) {
        self.set_byte(offsets::KEY_DELAY, delay);
    }

    pub fn key_repeat(&self) -> u8 {
        self.byte(offsets::KEY_REPEAT)
    }

    pub fn set_key_repeat(&mut self, repeat: u8) {
        self.set_byte(offsets::KEY_REPEAT, repeat);
    }

    /// Should notes sound while they're being entered?
    pub fn prelisten(&self) -> bool {
        self.byte(offsets::PRELISTEN) == 1
    }

    pub fn set_prelisten(&mut self, prelisten: bool) {
        self.set_byte(offsets::PRELISTEN, prelisten as u8);
    }

    /// The highest note drum mode instruments play
    pub fn drum_max(&self) -> u8 {
        self.byte(offsets::DRUM_MAX)
    }

    pub fn set_drum_max(&mut self, max: u8) {
        self.set_byte(offsets::DRUM_MAX, max);
    }

    /// Has the song been edited since it was last saved?
    pub fn has_changed(&self) -> bool {
        self.byte(offsets::FILE_CHANGED) == 1
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.set_byte(offsets::FILE_CHANGED, changed as u8);
    }

    /// The total time spent on the song, as (days, hours, minutes)
    pub fn total_time(&self) -> (u8, u8, u8) {
        (
            self.byte(offsets::TOTAL_DAYS),
            self.byte(offsets::TOTAL_HOURS),
            self.byte(offsets::TOTAL_MINUTES),
        )
    }

    pub fn set_total_time(&mut self, days: u8, hours: u8, minutes: u8) {
        self.set_byte(offsets::TOTAL_DAYS, days);
        self.set_byte(offsets::TOTAL_HOURS, hours);
        self.set_byte(offsets::TOTAL_MINUTES, minutes);
    }

    /// The time spent in the current session, as (hours, minutes)
    pub fn work_time(&self) -> (u8, u8) {
        (
            self.byte(offsets::WORK_HOURS),
            self.byte(offsets::WORK_MINUTES),
        )
    }

    pub fn set_work_time(&mut self, hours: u8, minutes: u8) {
        self.set_byte(offsets::WORK_HOURS, hours);
        self.set_byte(offsets::WORK_MINUTES, minutes);
    }

    /// The chain a row of the song screen plays on a channel
    pub fn row_chain(&self, row: u8, channel: Channel) -> Option<u8> {
        let chain = self.byte(row_offset(row, channel));
        (chain != NO_CHAIN).then_some(chain)
    }

    pub fn set_row_chain(&mut self, row: u8, channel: Channel, chain: Option<u8>) {
        self.set_byte(row_offset(row, channel), chain.unwrap_or(NO_CHAIN));
    }

    /// The rows bookmarked on a channel
    pub fn bookmarks(&self, channel: Channel) -> impl Iterator<Item = u8> + '_ {
        let offset = bookmark_offset(channel);
        self.as_slice()[offset..offset + BOOKMARKS_PER_CHANNEL]
            .iter()
            .copied()
            .filter(|row| *row != NO_BOOKMARK)
    }

    pub fn is_row_bookmarked(&self, row: u8, channel: Channel) -> bool {
        let offset = bookmark_offset(channel);
        self.as_slice()[offset..offset + BOOKMARKS_PER_CHANNEL].contains(&row)
    }

    /// Add or remove a bookmark
    ///
    /// Bookmarking an already bookmarked row (or clearing one that isn't) does nothing.
    pub fn set_row_bookmarked(
        &mut self,
        row: u8,
        channel: Channel,
        bookmarked: bool,
    ) -> Result<(), SetError> {
        if self.is_row_bookmarked(row, channel) == bookmarked {
            return Ok(());
        }

        let offset = bookmark_offset(channel);
        let (from, to) = if bookmarked {
            (NO_BOOKMARK, row)
        } else {
            (row, NO_BOOKMARK)
        };

        let slot = self.as_mut_slice()[offset..offset + BOOKMARKS_PER_CHANNEL]
            .iter_mut()
            .find(|slot| **slot == from)
            .ok_or(SetError::BookmarksFull)?;
        *slot = to;

        Ok(())
    }

    fn byte(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    fn set_byte(&mut self, offset: usize, value: u8) {
        self.as_mut_slice()[offset] = value;
    }
}

fn row_offset(row: u8, channel: Channel) -> usize {
    offsets::CHAIN_ASSIGNMENTS + usize::from(row) * Channel::ALL.len() + channel as usize
}

fn bookmark_offset(channel: Channel) -> usize {
    offsets::BOOKMARKS + channel as usize * BOOKMARKS_PER_CHANNEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory() {
        let song = SongMemory::new();
        assert_eq!(song.tempo(), 128);
        assert_eq!(song.sync_mode(), Some(SyncMode::None));
        assert_eq!(song.clone_mode(), CloneMode::Deep);
        assert_eq!(song.key_delay(), 7);
        assert_eq!(song.key_repeat(), 2);
        assert!(song.prelisten());
        assert_eq!(song.row_chain(0, Channel::Pulse1), None);
        assert_eq!(song.row_chain(0xFF, Channel::Noise), None);
        assert_eq!(song.bookmarks(Channel::Pulse1).count(), 0);
    }

    #[test]
    fn tempo() -> anyhow::Result<()> {
        let mut song = SongMemory::new();

        song.set_tempo(40)?;
        assert_eq!(song.tempo(), 40);

        song.set_tempo(295)?;
        assert_eq!(song.as_slice()[offsets::TEMPO], 39);
        assert_eq!(song.tempo(), 295);

        song.set_tempo(256)?;
        assert_eq!(song.tempo(), 256);

        assert_eq!(
            song.set_tempo(39),
            Err(SetError::ValueOutOfRange {
                value: 39,
                min: 40,
                max: 295
            })
        );
        assert!(song.set_tempo(296).is_err());

        Ok(())
    }

    #[test]
    fn settings() {
        let mut song = SongMemory::new();

        song.set_sync_mode(SyncMode::AnalogOut);
        song.set_clone_mode(CloneMode::Slim);
        song.set_prelisten(false);
        song.set_changed(true);
        song.set_total_time(3, 4, 5);
        song.set_work_time(1, 2);
        song.set_drum_max(0x6C);

        assert_eq!(song.sync_mode(), Some(SyncMode::AnalogOut));
        assert_eq!(song.clone_mode(), CloneMode::Slim);
        assert!(!song.prelisten());
        assert!(song.has_changed());
        assert_eq!(song.total_time(), (3, 4, 5));
        assert_eq!(song.work_time(), (1, 2));
        assert_eq!(song.drum_max(), 0x6C);

        song.as_mut_slice()[offsets::SYNC_MODE] = 9;
        assert_eq!(song.sync_mode(), None);
    }

    #[test]
    fn rows() {
        let mut song = SongMemory::new();
        song.set_row_chain(3, Channel::Wave, Some(0x12));

        assert_eq!(song.row_chain(3, Channel::Wave), Some(0x12));
        assert_eq!(song.as_slice()[offsets::CHAIN_ASSIGNMENTS + 3 * 4 + 2], 0x12);
        assert_eq!(song.row_chain(3, Channel::Noise), None);

        song.set_row_chain(3, Channel::Wave, None);
        assert_eq!(song.row_chain(3, Channel::Wave), None);
    }

    #[test]
    fn bookmarks() -> anyhow::Result<()> {
        let mut song = SongMemory::new();

        song.set_row_bookmarked(0x20, Channel::Pulse1, true)?;
        song.set_row_bookmarked(0x20, Channel::Pulse1, true)?;
        assert!(song.is_row_bookmarked(0x20, Channel::Pulse1));
        assert_eq!(song.bookmarks(Channel::Pulse1).collect::<Vec<_>>(), [0x20]);

        for row in 0..15 {
            song.set_row_bookmarked(row, Channel::Pulse1, true)?;
        }
        assert_eq!(
            song.set_row_bookmarked(0x30, Channel::Pulse1, true),
            Err(SetError::BookmarksFull)
        );

        song.set_row_bookmarked(0x20, Channel::Pulse1, false)?;
        assert!(!song.is_row_bookmarked(0x20, Channel::Pulse1));
        song.set_row_bookmarked(0x30, Channel::Pulse1, true)?;
        assert!(song.is_row_bookmarked(0x30, Channel::Pulse1));

        Ok(())
    }
}
