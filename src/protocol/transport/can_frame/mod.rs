//! In-memory representation of a classic CAN 2.0 data frame with an 11-bit identifier.
use crate::error::FrameError;
use embedded_can::{Id, StandardId};

/// Classic CAN payload capacity.
pub const MAX_DATA_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Raw frame as exchanged with the keypad.
pub struct CanFrame {
    /// 11-bit identifier.
    pub id: StandardId,
    /// Payload buffer, zero-filled past `len`.
    pub data: [u8; MAX_DATA_LEN],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Copy `payload` into a frame. Bytes past the eighth are dropped.
    pub fn new(id: StandardId, payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_DATA_LEN);
        let mut data = [0u8; MAX_DATA_LEN];
        data[..len].copy_from_slice(&payload[..len]);
        Self { id, data, len }
    }

    /// Same as [`CanFrame::new`] but always transmits the full eight bytes,
    /// zero-padding short payloads.
    pub fn padded(id: StandardId, payload: &[u8]) -> Self {
        Self {
            len: MAX_DATA_LEN,
            ..Self::new(id, payload)
        }
    }

    /// Build a frame from a raw identifier, rejecting values above `0x7FF`.
    pub fn from_raw(raw_id: u16, payload: &[u8]) -> Result<Self, FrameError> {
        let id = StandardId::new(raw_id).ok_or(FrameError::IdOutOfRange(raw_id))?;
        Ok(Self::new(id, payload))
    }

    /// Raw 11-bit identifier.
    #[inline]
    pub fn raw_id(&self) -> u16 {
        self.id.as_raw()
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CanFrame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CanFrame({=u16:#x}, {=[u8]:x})", self.raw_id(), self.payload())
    }
}

//==================================================================================EMBEDDED_CAN
/// Interop with HAL drivers. Extended and remote frames are not part of the
/// keypad protocol, so their constructors return `None`.
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_DATA_LEN {
            return None;
        }
        match id.into() {
            Id::Standard(id) => Some(CanFrame::new(id, data)),
            Id::Extended(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Standard(self.id)
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
