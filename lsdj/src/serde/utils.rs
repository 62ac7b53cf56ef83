/// Starts a run-length encoded sequence (or escapes itself)
pub const RLE_BYTE: u8 = 0xC0;

/// Starts a special action (or escapes itself)
pub const SA_BYTE: u8 = 0xE0;

/// Special action: repeat the default wave
pub const DEFAULT_WAVE_BYTE: u8 = 0xF0;

/// Special action: repeat the default instrument
pub const DEFAULT_INSTRUMENT_BYTE: u8 = 0xF1;

/// Special action: the song has ended
pub const EOF_BYTE: u8 = 0xFF;
