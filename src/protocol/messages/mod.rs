//! Keypad message codec: translates raw CAN payloads to and from domain values.
//!
//! Every function here is pure. Outbound frames are zero-padded to eight
//! bytes because the keypad firmware always expects a full DLC.
use crate::core::{ButtonLedState, ButtonSet, DriveState, HeartbeatKind, BUTTON_COUNT};
use crate::error::DecodeError;
use crate::infra::codec::bits::{BitReader, BitWriter};
use crate::protocol::transport::{
    can_frame::CanFrame, DRIVE_SHIFT_ID, KEYPAD_ACTIVATION_ID, LED_MATRIX_ID,
};

/// Bytes covering the 12-bit press mask.
const BUTTON_PRESS_MIN_LEN: usize = 2;
/// Packed LED matrix length: three 12-bit rows plus a 4-bit pad.
pub const LED_MATRIX_LEN: usize = 5;

/// Heartbeat payloads (CANopen NMT states).
const HEARTBEAT_BOOT_UP: u8 = 0x00;
const HEARTBEAT_PRE_OPERATIONAL: u8 = 0x7F;
const HEARTBEAT_OPERATIONAL: u8 = 0x05;

/// Trailer shared by every drive-shift command.
const DRIVE_SHIFT_TRAILER: [u8; 2] = [0xBE, 0xEF];

//==================================================================================OUTBOUND
/// NMT start command waking the keypad.
pub fn encode_button_activation() -> CanFrame {
    CanFrame::padded(KEYPAD_ACTIVATION_ID, &[0x01])
}

/// Pack the whole LED state into the keypad's RGB matrix frame.
///
/// Layout, LSB first: red row in bits 0..12, green row in bits 12..24, blue
/// row in bits 24..36, zero pad up to bit 40. On the wire this gives
///
/// | byte | high nibble | low nibble |
/// |---|---|---|
/// | 0 | red 7..4 | red 3..0 |
/// | 1 | green 3..0 | red 11..8 |
/// | 2 | green 11..8 | green 7..4 |
/// | 3 | blue 7..4 | blue 3..0 |
/// | 4 | `0000` | blue 11..8 |
///
/// where "red n" is the red channel of the button at bit position `n`.
pub fn encode_led_matrix(state: &ButtonLedState) -> CanFrame {
    CanFrame::padded(LED_MATRIX_ID, &pack_led_rows(state))
}

fn pack_led_rows(state: &ButtonLedState) -> [u8; LED_MATRIX_LEN] {
    let (red, green, blue) = state.rows();
    let mut payload = [0u8; LED_MATRIX_LEN];
    let mut writer = BitWriter::new(&mut payload);
    // 36 bits always fit in 40; the rows are masked to 12 bits.
    for row in [red, green, blue] {
        let _ = writer.write(row as u32, BUTTON_COUNT as u8);
    }
    payload
}

/// Gear relay command byte for `target`. Park has no command: the parking
/// brake holds the vehicle instead.
pub fn drive_shift_command(target: DriveState) -> Option<u8> {
    match target {
        DriveState::Park => None,
        DriveState::Reverse => Some(0x0F),
        DriveState::Neutral => Some(0x0E),
        DriveState::Drive => Some(0x0D),
    }
}

/// Drive-shift frame `[cmd, 0xBE, 0xEF]` for `target`, `None` for Park.
pub fn encode_drive_shift(target: DriveState) -> Option<CanFrame> {
    let command = drive_shift_command(target)?;
    let [b1, b2] = DRIVE_SHIFT_TRAILER;
    Some(CanFrame::padded(DRIVE_SHIFT_ID, &[command, b1, b2]))
}

//==================================================================================INBOUND
/// Decode the 12-bit press mask: byte 0 holds buttons 0..8, the low nibble
/// of byte 1 holds buttons 8..12. The high nibble of byte 1 is ignored.
pub fn decode_button_press(payload: &[u8]) -> Result<ButtonSet, DecodeError> {
    if payload.len() < BUTTON_PRESS_MIN_LEN {
        return Err(DecodeError::ShortFrame {
            needed: BUTTON_PRESS_MIN_LEN,
            len: payload.len(),
        });
    }
    let mut reader = BitReader::new(payload);
    let mask = reader
        .read(BUTTON_COUNT as u8)
        .map_err(|_| DecodeError::ShortFrame {
            needed: BUTTON_PRESS_MIN_LEN,
            len: payload.len(),
        })?;
    Ok(ButtonSet::from_bits(mask as u16))
}

/// Classify a heartbeat payload. Only exact single-byte payloads are recognized.
pub fn classify_heartbeat(payload: &[u8]) -> HeartbeatKind {
    match payload {
        [HEARTBEAT_BOOT_UP] => HeartbeatKind::BootUp,
        [HEARTBEAT_PRE_OPERATIONAL] => HeartbeatKind::PreOperational,
        [HEARTBEAT_OPERATIONAL] => HeartbeatKind::Operational,
        _ => HeartbeatKind::Unknown,
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
