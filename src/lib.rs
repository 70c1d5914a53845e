//! `dashpad` library: control core of a vehicle dashboard driven by a
//! 12-button CAN keypad with RGB LEDs, in a `no_std` environment. The crate
//! exposes the keypad codec and transport, the keypad lifecycle, the vehicle
//! controller with its parking-brake interlock, and the tick loop tying them
//! to a CAN bus.
#![no_std]
//==================================================================================
/// Loop cadence and redundancy settings.
pub mod config;
/// Domain vocabulary: buttons, colors, LED state, lifecycle and drive states.
pub mod core;
/// Error types; none of them stops the loop.
pub mod error;
/// Low-level bit packing used by the keypad codec.
pub mod infra;
/// Keypad protocol: CAN transport, message codec, keypad lifecycle.
pub mod protocol;
/// Tick loop connecting the bus, the keypad link and the vehicle controller.
pub mod runtime;
/// Parking brake and vehicle controller.
pub mod vehicle;
//==================================================================================
