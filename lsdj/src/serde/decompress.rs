use super::{
    BlockJumps, BlockLayout, End,
    utils::{DEFAULT_INSTRUMENT_BYTE, DEFAULT_WAVE_BYTE, EOF_BYTE, RLE_BYTE, SA_BYTE},
};
use crate::{
    Error,
    song::{SongMemory, instrument::DEFAULT_INSTRUMENT, wave::DEFAULT_WAVE},
    vio::VirtualIo,
};
use log::trace;
use std::io::{self, SeekFrom};

/// Decompress a full song from a chain of LSDJ blocks
///
/// Decompression starts at the reader's current position, which should be the start of a
/// block, and follows block jumps (as resolved by `jumps`) until an end-of-file command is
/// found. Exactly [`SongMemory::LEN`] bytes should be written, anything else results in
/// [`Error::DecompressionSizeMismatch`]. Streams that grow past a song are stopped as soon as
/// they do, in which case `actual` counts up to the end of the first write that didn't fit.
///
/// A song never spans more than `layout.block_count` blocks. Following more jumps than that
/// results in [`Error::TooManyBlockJumps`].
pub fn decompress<R, W>(
    mut reader: R,
    writer: W,
    jumps: BlockJumps,
    layout: BlockLayout,
) -> Result<(), Error>
where
    R: VirtualIo,
    W: VirtualIo,
{
    let mut writer = SongSizeLimit { writer, written: 0 };
    let mut blocks = 1;

    loop {
        let block_start = reader.tell()?;

        match decompress_block(&mut reader, &mut writer)? {
            End::EndOfFile => break,
            End::JumpToBlock(block) => {
                blocks += 1;
                if blocks > layout.block_count {
                    return Err(Error::TooManyBlockJumps {
                        max: layout.block_count - 1,
                    });
                }

                let position = match jumps {
                    BlockJumps::Absolute {
                        first_block_position,
                    } => {
                        let index = block.checked_sub(1).ok_or_else(|| {
                            Error::SeekFailed(io::Error::new(
                                io::ErrorKind::InvalidData,
                                "block indices start at 1",
                            ))
                        })?;

                        first_block_position + index as u64 * layout.block_len as u64
                    }
                    BlockJumps::Sequential => block_start + layout.block_len as u64,
                };

                trace!("Jumping to block {block} at {position:#X}");
                reader.seek(SeekFrom::Start(position))?;
            }
        }
    }

    if writer.written != SongMemory::LEN as u64 {
        return Err(Error::DecompressionSizeMismatch {
            expected: SongMemory::LEN,
            actual: writer.written,
        });
    }

    Ok(())
}

/// Forwards to a writer, refusing to write past the length of a song
struct SongSizeLimit<W> {
    writer: W,
    written: u64,
}

impl<W> VirtualIo for SongSizeLimit<W>
where
    W: VirtualIo,
{
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.writer.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        let end = self.written + buffer.len() as u64;
        if end > SongMemory::LEN as u64 {
            return Err(Error::DecompressionSizeMismatch {
                expected: SongMemory::LEN,
                actual: end,
            });
        }

        let count = self.writer.write(buffer)?;
        self.written += count as u64;

        Ok(count)
    }

    fn tell(&mut self) -> Result<u64, Error> {
        self.writer.tell()
    }

    fn seek(&mut self, position: SeekFrom) -> Result<u64, Error> {
        self.writer.seek(position)
    }
}

/// Decompress data from an LSDJ block reader to an arbitrary I/O writer
///
/// This function reads bytes and decompresses them as described [here](https://littlesounddj.fandom.com/wiki/File_Management_Structure). The call
/// returns when either:
///
///  * An EOF byte has been read, ending the decompression algorithm. This returns [`End::EndOfFile`]
///  * A block jump command has been read, returning [`End::JumpToBlock`]
pub fn decompress_block<R, W>(mut reader: R, mut writer: W) -> Result<End, Error>
where
    R: VirtualIo,
    W: VirtualIo,
{
    loop {
        match reader.read_byte()? {
            RLE_BYTE => decompress_rle_byte(&mut reader, &mut writer)?,
            SA_BYTE => match decompress_sa_byte(&mut reader, &mut writer)? {
                SaContinuation::Continue => (),
                SaContinuation::End(end) => return Ok(end),
            },
            value => writer.write_byte(value)?,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SaContinuation {
    Continue,
    End(End),
}

fn decompress_rle_byte<R, W>(mut reader: R, mut writer: W) -> Result<(), Error>
where
    R: VirtualIo,
    W: VirtualIo,
{
    match reader.read_byte()? {
        RLE_BYTE => writer.write_byte(RLE_BYTE),
        value => {
            let count = reader.read_byte()?;
            writer.write_repeated(&[value], count as usize)
        }
    }
}

fn decompress_sa_byte<R, W>(mut reader: R, mut writer: W) -> Result<SaContinuation, Error>
where
    R: VirtualIo,
    W: VirtualIo,
{
    match reader.read_byte()? {
        SA_BYTE => writer.write_byte(SA_BYTE)?,
        DEFAULT_WAVE_BYTE => {
            let count = reader.read_byte()?;
            writer.write_repeated(&DEFAULT_WAVE, count as usize)?
        }
        DEFAULT_INSTRUMENT_BYTE => {
            let count = reader.read_byte()?;
            writer.write_repeated(&DEFAULT_INSTRUMENT, count as usize)?
        }
        EOF_BYTE => return Ok(SaContinuation::End(End::EndOfFile)),
        block => return Ok(SaContinuation::End(End::JumpToBlock(block))),
    }

    Ok(SaContinuation::Continue)
}
