//! Keypad transport layer: CAN frame representation, bus identifiers,
//! the outbound frame queue, and the bus/timer abstraction traits.
//!
//! ## Bus identifiers
//!
//! All traffic uses 11-bit standard identifiers. The keypad speaks a
//! CANopen-style protocol (NMT start, heartbeat, PDOs) while the drive-shift
//! command targets the gear relay controller.
//!
//! | Identifier | Direction | Payload |
//! |---|---|---|
//! | `0x000` | TX | `[0x01]` start/wake the keypad |
//! | `0x195` | RX | 12-bit button press mask |
//! | `0x215` | TX | packed RGB LED matrix (5 bytes) |
//! | `0x715` | RX | heartbeat `0x00` / `0x7F` / `0x05` |
//! | `0x697` | TX | `[cmd, 0xBE, 0xEF]`, repeated |
use embedded_can::StandardId;

pub mod can_frame;
pub mod outbound_queue;
pub mod traits;

/// Build a standard identifier at compile time.
const fn standard_id(raw: u16) -> StandardId {
    match StandardId::new(raw) {
        Some(id) => id,
        None => panic!("standard identifiers are 11 bits"),
    }
}

/// NMT start command that wakes the keypad.
pub const KEYPAD_ACTIVATION_ID: StandardId = standard_id(0x000);
/// Button press bitfield sent by the keypad.
pub const BUTTON_PRESS_ID: StandardId = standard_id(0x195);
/// RGB LED matrix sent to the keypad.
pub const LED_MATRIX_ID: StandardId = standard_id(0x215);
/// Keypad heartbeat.
pub const HEARTBEAT_ID: StandardId = standard_id(0x715);
/// Gear relay command.
pub const DRIVE_SHIFT_ID: StandardId = standard_id(0x697);

/// Recommended bound on the inbound wait of a single tick (ms).
///
/// The receive is the only point where a tick suspends. Keeping it short
/// bounds the latency of the outbound drain, which releases exactly one
/// frame per tick.
pub const RECEIVE_TIMEOUT_MS: u32 = 100;

/// Recommended pause between two ticks (ms).
pub const TICK_PERIOD_MS: u32 = 100;

/// Number of times each drive-shift command is queued.
///
/// The gear relay controller does not acknowledge commands, so every
/// command is sent back to back several times to raise the delivery odds.
pub const DRIVE_SHIFT_REPEAT: u8 = 4;
