//! LSB-first bit cursors over CAN payloads.
//!
//! Keypad fields are packed little-endian at the bit level: the first bit of
//! a field lands in bit 0 of the current byte, and a field that crosses a
//! byte boundary continues in bit 0 of the next byte. The press mask spans
//! byte 0 and the low nibble of byte 1; the LED matrix packs three 12-bit
//! channel rows back to back.
use crate::error::BitError;

/// Validate a field against the buffer and the `u32` carrier width.
fn check_field(cursor: usize, width: u8, buffer_len: usize) -> Result<(), BitError> {
    if !(1..=32).contains(&width) {
        return Err(BitError::InvalidWidth(width));
    }
    let available = buffer_len * 8 - cursor;
    if width as usize > available {
        return Err(BitError::OutOfBounds {
            asked: width as usize,
            available,
        });
    }
    Ok(())
}

/// Sequential reader over a received payload.
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Read the next `width` bits (1..=32).
    pub fn read(&mut self, width: u8) -> Result<u32, BitError> {
        check_field(self.cursor, width, self.buffer.len())?;

        let mut value = 0u32;
        for i in 0..width as usize {
            let bit = self.cursor + i;
            let set = (self.buffer[bit / 8] >> (bit % 8)) & 1;
            value |= (set as u32) << i;
        }
        self.cursor += width as usize;
        Ok(value)
    }
}

/// Sequential writer filling an outbound payload.
pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    cursor: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Write the low `width` bits of `value` (1..=32). Target bits are overwritten.
    pub fn write(&mut self, value: u32, width: u8) -> Result<(), BitError> {
        check_field(self.cursor, width, self.buffer.len())?;

        for i in 0..width as usize {
            let bit = self.cursor + i;
            let mask = 1u8 << (bit % 8);
            if (value >> i) & 1 == 1 {
                self.buffer[bit / 8] |= mask;
            } else {
                self.buffer[bit / 8] &= !mask;
            }
        }
        self.cursor += width as usize;
        Ok(())
    }
}
