/// Assembles a big-endian register pair into a `u16` (`hi * 256 + lo`).
///
/// Every multi-byte value read from the sensor goes through here.
#[inline]
pub const fn decode_u16(hi: u8, lo: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// Splits a `u16` into the big-endian byte order the sensor expects.
#[inline]
pub const fn encode_u16(value: u16) -> [u8; 2] {
    [(value >> 8) as u8, (value & 0xFF) as u8]
}
