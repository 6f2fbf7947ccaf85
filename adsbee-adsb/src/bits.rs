//! Bit-level access to the 56-bit ME field.
//!
//! Bits are numbered MSB-first: bit 0 is the most significant bit of byte 0,
//! bit 55 the least significant bit of byte 6. Field offsets in the decoders
//! use this numbering, i.e. they are the 1-based ME bit numbers from the
//! standard minus one.

use std::fmt::Debug;

/// Length of the ME field in bytes.
pub const PAYLOAD_LENGTH: usize = 7;

/// Length of the ME field in bits.
pub const PAYLOAD_BITS: u32 = 56;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Bit range out of bounds: start={start}, width={width}")]
pub struct BitRangeError {
    pub start: u32,
    pub width: u32,
}

#[inline(always)]
fn check_range(start: u32, width: u32) -> Result<(), BitRangeError> {
    if width == 0 || width > 32 || start + width > PAYLOAD_BITS {
        Err(BitRangeError { start, width })
    }
    else {
        Ok(())
    }
}

#[inline(always)]
fn load(payload: &[u8; PAYLOAD_LENGTH]) -> u64 {
    let mut word = [0u8; 8];
    word[..PAYLOAD_LENGTH].copy_from_slice(payload);
    u64::from_be_bytes(word)
}

/// Reads `width` bits starting at bit `start`.
///
/// # Panics
///
/// Panics if `width` is not in `1..=32` or the range extends past bit 55.
/// Use [`try_extract_uint`] when the range isn't known statically.
pub fn extract_uint(payload: &[u8; PAYLOAD_LENGTH], start: u32, width: u32) -> u32 {
    match try_extract_uint(payload, start, width) {
        Ok(value) => value,
        Err(error) => panic!("bug: {error}"),
    }
}

pub fn try_extract_uint(
    payload: &[u8; PAYLOAD_LENGTH],
    start: u32,
    width: u32,
) -> Result<u32, BitRangeError> {
    check_range(start, width)?;

    // the payload occupies the upper 56 bits of the word
    let shift = 64 - start - width;
    let mask = (1u64 << width) - 1;
    Ok(((load(payload) >> shift) & mask) as u32)
}

/// Reads `width` bits starting at bit `start` and sign-extends the top bit of
/// the field.
///
/// # Panics
///
/// Same as [`extract_uint`].
pub fn extract_int(payload: &[u8; PAYLOAD_LENGTH], start: u32, width: u32) -> i32 {
    let value = extract_uint(payload, start, width);
    let unused = 32 - width;
    ((value << unused) as i32) >> unused
}

/// The 56-bit ME field of an extended squitter.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload([u8; PAYLOAD_LENGTH]);

impl Payload {
    pub const fn new(bytes: [u8; PAYLOAD_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns `None` unless `bytes` is exactly 7 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LENGTH] {
        &self.0
    }

    pub fn bits(&self, start: u32, width: u32) -> u32 {
        extract_uint(&self.0, start, width)
    }

    pub fn bit(&self, index: u32) -> bool {
        self.bits(index, 1) != 0
    }

    pub fn signed_bits(&self, start: u32, width: u32) -> i32 {
        extract_int(&self.0, start, width)
    }

    /// Composes a value from single bits at the given positions, the first
    /// position becoming the most significant bit of the result.
    pub fn gather(&self, positions: &[u32]) -> u32 {
        debug_assert!(positions.len() <= 32);
        positions
            .iter()
            .fold(0, |value, index| (value << 1) | u32::from(self.bit(*index)))
    }

    pub fn type_code(&self) -> u8 {
        self.0[0] >> 3
    }
}

impl From<[u8; PAYLOAD_LENGTH]> for Payload {
    fn from(value: [u8; PAYLOAD_LENGTH]) -> Self {
        Self(value)
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payload(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Moves `value` into place for a field at `start` with `width` bits. Only
/// used to build payloads in tests.
#[cfg(test)]
pub(crate) fn insert_uint(payload: &mut [u8; PAYLOAD_LENGTH], start: u32, width: u32, value: u32) {
    for i in 0..width {
        let bit = (value >> (width - 1 - i)) & 1;
        let index = start + i;
        let byte = &mut payload[(index / 8) as usize];
        let mask = 0x80 >> (index % 8);
        if bit != 0 {
            *byte |= mask;
        }
        else {
            *byte &= !mask;
        }
    }
}
