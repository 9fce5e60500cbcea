/// Number of bytes stored in a record body for a serial type code.
///
/// Codes from 12 are BLOBs (even) or text (odd), with the length encoded in the code. Every other
/// code is treated as its own length. This does not match SQLite for the fixed width integer,
/// float and constant codes (5 to 9).
pub fn resolve(code: u64) -> u64 {
    match code {
        // Empty BLOB and empty text.
        12 | 13 => 0,
        code if code > 12 && code % 2 == 0 => (code - 12) / 2,
        code if code > 13 && code % 2 == 1 => (code - 13) / 2,
        code => code,
    }
}
