//! Unit tests for the keypad message codec.
use super::*;
use crate::core::{ButtonId, Color};

fn led_payload(state: &ButtonLedState) -> [u8; LED_MATRIX_LEN] {
    let frame = encode_led_matrix(state);
    let mut payload = [0u8; LED_MATRIX_LEN];
    payload.copy_from_slice(&frame.payload()[..LED_MATRIX_LEN]);
    payload
}

//==================================================================================BUTTON_PRESS
#[test]
/// Each bit position decodes to exactly its own button.
fn test_decode_singletons() {
    for button in ButtonId::ALL {
        let mask = 1u16 << button.bit();
        let payload = mask.to_le_bytes();
        let set = decode_button_press(&payload).unwrap();
        assert_eq!(set.len(), 1, "button {:?}", button);
        assert!(set.contains(button));
    }
}

#[test]
/// A zero mask yields the empty set.
fn test_decode_empty() {
    assert!(decode_button_press(&[0x00, 0x00]).unwrap().is_empty());
}

#[test]
/// `[0x01, 0x00]` is a Hazard press.
fn test_decode_hazard() {
    let set = decode_button_press(&[0x01, 0x00]).unwrap();
    let mut pressed = set.iter();
    assert_eq!(pressed.next(), Some(ButtonId::Hazard));
    assert_eq!(pressed.next(), None);
}

#[test]
/// The high nibble of byte 1 and any trailing bytes are ignored.
fn test_decode_ignores_padding() {
    let set = decode_button_press(&[0x00, 0xF8, 0xAA, 0x55]).unwrap();
    assert_eq!(set.bits(), 0x800);
    assert!(set.contains(ButtonId::AutopilotSpeedDown));
}

#[test]
/// Multi-button masks keep every bit.
fn test_decode_multiple() {
    let set = decode_button_press(&[0x12, 0x01]).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains(ButtonId::Park));
    assert!(set.contains(ButtonId::Drive));
    assert!(set.contains(ButtonId::F2));
}

#[test]
/// Payloads under two bytes are rejected.
fn test_decode_short_frame() {
    assert_eq!(
        decode_button_press(&[0x01]),
        Err(DecodeError::ShortFrame { needed: 2, len: 1 })
    );
    assert_eq!(
        decode_button_press(&[]),
        Err(DecodeError::ShortFrame { needed: 2, len: 0 })
    );
}

//==================================================================================HEARTBEAT
#[test]
/// Known single-byte payloads map to their lifecycle phase.
fn test_classify_heartbeat() {
    assert_eq!(classify_heartbeat(&[0x00]), HeartbeatKind::BootUp);
    assert_eq!(classify_heartbeat(&[0x7F]), HeartbeatKind::PreOperational);
    assert_eq!(classify_heartbeat(&[0x05]), HeartbeatKind::Operational);
}

#[test]
/// Anything else is unknown, including recognized bytes followed by extra data.
fn test_classify_heartbeat_unknown() {
    assert_eq!(classify_heartbeat(&[0x04]), HeartbeatKind::Unknown);
    assert_eq!(classify_heartbeat(&[]), HeartbeatKind::Unknown);
    assert_eq!(classify_heartbeat(&[0x05, 0x00]), HeartbeatKind::Unknown);
}

//==================================================================================LED_MATRIX
#[test]
/// All-black state packs to zeros and is padded to eight bytes.
fn test_led_matrix_black() {
    let frame = encode_led_matrix(&ButtonLedState::new());
    assert_eq!(frame.id, LED_MATRIX_ID);
    assert_eq!(frame.payload(), &[0u8; 8]);
}

#[test]
/// Park white sets bit 1 of each channel row.
fn test_led_matrix_park_white() {
    let mut state = ButtonLedState::new();
    state.set(ButtonId::Park, Color::White);
    assert_eq!(led_payload(&state), [0x02, 0x20, 0x00, 0x02, 0x00]);
}

#[test]
/// Hazard yellow lights red and green of button 0.
fn test_led_matrix_hazard_yellow() {
    let mut state = ButtonLedState::new();
    state.set(ButtonId::Hazard, Color::Yellow);
    assert_eq!(led_payload(&state), [0x01, 0x10, 0x00, 0x00, 0x00]);
}

#[test]
/// Buttons past bit 7 cross into the nibble-shifted bytes.
fn test_led_matrix_high_buttons() {
    let mut state = ButtonLedState::new();
    state.set(ButtonId::F2, Color::Yellow);
    assert_eq!(led_payload(&state), [0x00, 0x01, 0x10, 0x00, 0x00]);

    let mut state = ButtonLedState::new();
    state.set(ButtonId::AutopilotSpeedDown, Color::Blue);
    assert_eq!(led_payload(&state), [0x00, 0x00, 0x00, 0x00, 0x08]);
}

#[test]
/// Combined state: Park and Drive blue, Regen green.
fn test_led_matrix_combined() {
    let mut state = ButtonLedState::new();
    state.set(ButtonId::Park, Color::Blue);
    state.set(ButtonId::Drive, Color::Blue);
    state.set(ButtonId::Regen, Color::Green);
    // green row 0x200 -> byte1 high nibble 0, byte2 = 0x20
    assert_eq!(led_payload(&state), [0x00, 0x00, 0x20, 0x12, 0x00]);
}

#[test]
/// Encoding the same state twice gives identical frames.
fn test_led_matrix_deterministic() {
    let mut state = ButtonLedState::new();
    state.set(ButtonId::ExhaustSound, Color::Magenta);
    state.set(ButtonId::AutopilotOn, Color::Cyan);
    assert_eq!(encode_led_matrix(&state), encode_led_matrix(&state));
}

//==================================================================================OUTBOUND_COMMANDS
#[test]
/// Activation is `[0x01]` on identifier zero, padded.
fn test_button_activation() {
    let frame = encode_button_activation();
    assert_eq!(frame.raw_id(), 0x000);
    assert_eq!(frame.payload(), &[0x01, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
/// Drive-shift payloads carry the gear command and the fixed trailer.
fn test_drive_shift() {
    let cases = [
        (DriveState::Reverse, 0x0F),
        (DriveState::Neutral, 0x0E),
        (DriveState::Drive, 0x0D),
    ];
    for (target, command) in cases {
        let frame = encode_drive_shift(target).unwrap();
        assert_eq!(frame.raw_id(), 0x697);
        assert_eq!(&frame.payload()[..3], &[command, 0xBE, 0xEF]);
        assert_eq!(frame.len, 8);
    }
    assert!(encode_drive_shift(DriveState::Park).is_none());
}
