//! Error definitions shared across library modules.
//! None of them is fatal: the runtime logs each one and keeps servicing the bus.
use crate::core::PadLinkState;
use embedded_hal::digital::ErrorKind;
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures while interpreting an inbound payload.
pub enum DecodeError {
    /// The payload is too short to hold the expected field.
    #[error("Short frame: needed {needed} bytes, got {len}")]
    ShortFrame { needed: usize, len: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while building a CAN frame.
pub enum FrameError {
    /// The raw identifier does not fit in 11 bits.
    #[error("Standard identifier out of range (0..=0x7FF): {0:#X}")]
    IdOutOfRange(u16),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outbound queue rejections.
pub enum QueueError {
    /// The queue already holds its maximum number of frames; the new frame was dropped.
    #[error("Outbound queue full")]
    Full,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Keypad lifecycle errors.
pub enum LinkError {
    /// The requested state is not reachable from the current one.
    #[error("Invalid keypad transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: PadLinkState,
        to: PadLinkState,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Parking-brake sensor and actuator failures.
pub enum BrakeError {
    /// Neither sensor reports a position (or a sensor could not be read).
    #[error("Parking brake sensor fault")]
    SensorFault,
    /// A trigger output could not be driven.
    #[error("Parking brake output error: {0:?}")]
    Output(#[cfg_attr(feature = "defmt", defmt(Debug2Format))] ErrorKind),
}

//==================================================================================BIT_ERRORS
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised by the LSB-first bit cursor.
pub enum BitError {
    /// The field runs past the end of the buffer.
    #[error("Bit field out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Field width outside the 1..=32 range.
    #[error("Invalid bit field width: {0}")]
    InvalidWidth(u8),
}
