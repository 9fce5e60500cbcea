use std::io::Read;

use derive_more::{Deref, From};

use super::{DiskError, read_array};

/// Maximum number of bytes in an encoded [`VarInt`].
pub const MAX_LENGTH: u8 = 9;

/// A variable length integer, encoded in 1 to 9 bytes. The first 8 bytes each contribute their
/// lower 7 bits, with the high bit set if another byte follows. The 9th byte contributes all 8 of
/// its bits.
#[derive(Clone, Copy, Debug, Deref, From, PartialEq, Eq)]
pub struct VarInt(u64);

impl VarInt {
    /// Read a varint from the source, producing the value and the number of bytes consumed.
    pub fn read(source: &mut impl Read) -> Result<(Self, u8), DiskError> {
        let mut value: u64 = 0;

        for length in 1..MAX_LENGTH {
            let [byte] = read_array(source)?;
            value = (value << 7) | u64::from(byte & 0b0111_1111);

            if byte & 0b1000_0000 == 0 {
                return Ok((Self(value), length));
            }
        }

        let [byte] = read_array(source)?;
        value = (value << 8) | u64::from(byte);

        Ok((Self(value), MAX_LENGTH))
    }

    /// Read a varint from the start of the buffer, producing the value and the remaining bytes.
    #[cfg(test)]
    pub fn from_buffer(mut buf: &[u8]) -> Result<(Self, &[u8]), DiskError> {
        let (value, _) = Self::read(&mut buf)?;
        Ok((value, buf))
    }

    /// Encode with the fewest bytes possible.
    #[cfg(test)]
    pub fn encode(self) -> Vec<u8> {
        let n = self.0;

        if n >> 56 != 0 {
            // Only the 9 byte form can carry the top 8 bits.
            let high = n >> 8;

            return (0..8)
                .rev()
                .map(|group| ((high >> (group * 7)) & 0b0111_1111) as u8 | 0b1000_0000)
                .chain([n as u8])
                .collect();
        }

        let mut bytes = vec![(n & 0b0111_1111) as u8];
        let mut rest = n >> 7;
        while rest > 0 {
            bytes.push((rest & 0b0111_1111) as u8 | 0b1000_0000);
            rest >>= 7;
        }

        bytes.reverse();
        bytes
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(&[0b0000_0000], 0)]
    #[case::n127(&[0b0111_1111], 127)]
    #[case::n128(&[0b1000_0001, 0b0000_0000], 128)]
    #[case::n255(&[0b1000_0001, 0b0111_1111], 255)]
    #[case::nine_bytes(&[0xff; 9], u64::MAX)]
    fn read(#[case] bytes: &[u8], #[case] expected: u64) {
        let mut source = bytes;
        let (value, length) = VarInt::read(&mut source).unwrap();

        assert_eq!(*value, expected);
        assert_eq!(length as usize, bytes.len());
        assert!(source.is_empty());
    }

    #[test]
    fn ninth_byte_uses_all_bits() {
        let mut bytes = vec![0x80; 8];
        bytes.push(0xff);

        let (value, rest) = VarInt::from_buffer(&bytes).unwrap();
        assert_eq!(*value, 0xff);
        assert!(rest.is_empty());
    }

    #[test]
    fn stops_at_clear_high_bit() {
        let (value, rest) = VarInt::from_buffer(&[0x81, 0x00, 0x2a]).unwrap();

        assert_eq!(*value, 128);
        assert_eq!(rest, [0x2a]);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::unterminated(&[0x81, 0x81])]
    fn truncated(#[case] bytes: &[u8]) {
        assert!(matches!(
            VarInt::from_buffer(bytes),
            Err(DiskError::Truncated)
        ));
    }

    #[rstest]
    #[case::zero(0, 1)]
    #[case::n127(127, 1)]
    #[case::n128(128, 2)]
    #[case::three_bytes((1 << 21) - 1, 3)]
    #[case::nine_bytes(1 << 56, 9)]
    #[case::max(u64::MAX, 9)]
    fn round_trip(#[case] n: u64, #[case] length: usize) {
        let bytes = VarInt::from(n).encode();
        assert_eq!(bytes.len(), length);

        let (value, rest) = VarInt::from_buffer(&bytes).unwrap();
        assert_eq!(*value, n);
        assert!(rest.is_empty());
    }
}
