//! Where everything lives inside of [`SongMemory`](super::SongMemory)

pub const PHRASE_NOTES: usize = 0x0000;
pub const BOOKMARKS: usize = 0x0FF0;
pub const GROOVES: usize = 0x1090;
pub const CHAIN_ASSIGNMENTS: usize = 0x1290;
pub const TABLE_ENVELOPES: usize = 0x1690;
pub const WORDS: usize = 0x1890;
pub const WORD_NAMES: usize = 0x1DD0;
pub const RB1: usize = 0x1E78;
pub const INSTRUMENT_NAMES: usize = 0x1E7A;
pub const TABLE_ALLOCATIONS: usize = 0x2020;
pub const INSTRUMENT_ALLOCATIONS: usize = 0x2040;
pub const CHAIN_PHRASES: usize = 0x2080;
pub const CHAIN_TRANSPOSITIONS: usize = 0x2880;
pub const INSTRUMENT_PARAMS: usize = 0x3080;
pub const TABLE_TRANSPOSITIONS: usize = 0x3480;
pub const TABLE_COMMAND1: usize = 0x3680;
pub const TABLE_COMMAND1_VALUES: usize = 0x3880;
pub const TABLE_COMMAND2: usize = 0x3A80;
pub const TABLE_COMMAND2_VALUES: usize = 0x3C80;
pub const RB2: usize = 0x3E80;
pub const PHRASE_ALLOCATIONS: usize = 0x3E82;
pub const CHAIN_ALLOCATIONS: usize = 0x3EA2;
pub const SYNTH_PARAMS: usize = 0x3EB2;
pub const WORK_HOURS: usize = 0x3FB2;
pub const WORK_MINUTES: usize = 0x3FB3;
pub const TEMPO: usize = 0x3FB4;
pub const TRANSPOSITION: usize = 0x3FB5;
pub const TOTAL_DAYS: usize = 0x3FB6;
pub const TOTAL_HOURS: usize = 0x3FB7;
pub const TOTAL_MINUTES: usize = 0x3FB8;
pub const KEY_DELAY: usize = 0x3FBA;
pub const KEY_REPEAT: usize = 0x3FBB;
pub const FONT: usize = 0x3FBC;
pub const SYNC_MODE: usize = 0x3FBD;
pub const COLOR_PALETTE: usize = 0x3FBE;
pub const CLONE_MODE: usize = 0x3FC0;
pub const FILE_CHANGED: usize = 0x3FC1;
pub const PRELISTEN: usize = 0x3FC3;
pub const SYNTH_OVERWRITES: usize = 0x3FC4;
pub const DRUM_MAX: usize = 0x3FD0;
pub const PHRASE_COMMANDS: usize = 0x4000;
pub const PHRASE_COMMAND_VALUES: usize = 0x4FF0;
pub const WAVES: usize = 0x6000;
pub const PHRASE_INSTRUMENTS: usize = 0x7000;
pub const RB3: usize = 0x7FF0;
pub const FORMAT_VERSION: usize = 0x7FFF;
