//! Grooves: the number of ticks each step of a phrase lasts

use super::{SetError, SongMemory, check_index, offsets};

/// The number of grooves in a song
pub const GROOVE_COUNT: usize = 0x20;

/// The number of steps in a groove
pub const GROOVE_LEN: usize = 16;

/// A groove, where every step is a tick count
///
/// `None` marks a step past the end of the groove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Groove {
    pub steps: [Option<u8>; GROOVE_LEN],
}

impl Groove {
    /// The steps up to the first unused one
    pub fn used_steps(&self) -> impl Iterator<Item = u8> + '_ {
        self.steps.iter().map_while(|step| *step)
    }
}

impl SongMemory {
    /// Decode a groove, or `None` if `index` is out of range
    pub fn groove(&self, index: u8) -> Option<Groove> {
        let offset = groove_offset(index).ok()?;
        let mut groove = Groove::default();

        let bytes = &self.as_slice()[offset..offset + GROOVE_LEN];

        for (slot, byte) in groove.steps.iter_mut().zip(bytes) {
            *slot = (*byte != 0).then_some(*byte);
        }

        Some(groove)
    }

    pub fn set_groove(&mut self, index: u8, groove: &Groove) -> Result<(), SetError> {
        let offset = groove_offset(index)?;

        let bytes = &mut self.as_mut_slice()[offset..offset + GROOVE_LEN];

        for (byte, step) in bytes.iter_mut().zip(groove.steps) {
            *byte = step.unwrap_or(0);
        }

        Ok(())
    }
}

fn groove_offset(index: u8) -> Result<usize, SetError> {
    check_index(usize::from(index), GROOVE_COUNT)?;
    Ok(offsets::GROOVES + usize::from(index) * GROOVE_LEN)
}
