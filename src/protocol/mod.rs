/// Keypad lifecycle (heartbeats, activation) and LED ownership.
pub mod keypad;
/// Pure encoders and decoders for every keypad frame.
pub mod messages;
/// CAN frames, identifiers, outbound queue and bus/timer traits.
pub mod transport;
