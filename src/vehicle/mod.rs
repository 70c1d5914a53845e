//! Vehicle side of the dashboard: the parking brake interlock and the
//! controller translating button presses into drive-state changes, device
//! toggles and keypad feedback.
pub mod brake_io;
pub mod controller;
pub mod parking_brake;

/// Device toggles and function-key flags at start-up.
///
/// The keypad LEDs for these entries are synchronized from this
/// structure whenever the keypad (re)boots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleConfig {
    pub hazard: bool,
    pub exhaust_sound: bool,
    pub regen: bool,
    pub f1: bool,
    pub f2: bool,
}

impl Default for VehicleConfig {
    /// Regenerative braking on, everything else off.
    fn default() -> Self {
        Self {
            hazard: false,
            exhaust_sound: false,
            regen: true,
            f1: false,
            f2: false,
        }
    }
}
