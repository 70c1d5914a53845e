//! Parking brake state and trigger control.
//!
//! The brake reports its position through two sensors and is moved by two
//! trigger outputs. After start-up the logical state is authoritative: the
//! triggers are assumed to act immediately and the sensors are not read back.
use crate::{error::BrakeError, vehicle::brake_io::BrakeIo};

/// Logical brake position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrakeState {
    Engaged,
    Disengaged,
}

pub struct ParkingBrake<B: BrakeIo> {
    io: B,
    state: BrakeState,
    sensor_fault: bool,
}

impl<B: BrakeIo> ParkingBrake<B> {
    /// Sense the current position and drive the triggers to match it.
    ///
    /// The engaged sensor is checked first, so both sensors asserted reads as
    /// Engaged. With neither sensor asserted, or a sensor that cannot be read,
    /// the brake is flagged as faulty and assumed Disengaged; the triggers are
    /// left untouched in that case.
    pub fn new(mut io: B) -> Self {
        let sensed = (io.engaged_sensor(), io.disengaged_sensor());
        let state = match sensed {
            (Ok(true), Ok(_disengaged)) => {
                #[cfg(feature = "defmt")]
                if _disengaged {
                    defmt::warn!("Both parking brake sensors asserted, assuming engaged");
                }
                Some(BrakeState::Engaged)
            }
            (Ok(false), Ok(true)) => Some(BrakeState::Disengaged),
            _ => None,
        };

        let mut brake = Self {
            io,
            state: state.unwrap_or(BrakeState::Disengaged),
            sensor_fault: state.is_none(),
        };

        match state {
            Some(position) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Parking brake sensed {}", position);
                if let Err(_err) = brake.drive_triggers(position) {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Parking brake trigger init failed: {}", _err);
                }
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::error!("{}, defaulting to disengaged", BrakeError::SensorFault);
            }
        }
        brake
    }

    /// Apply the brake. No-op when already engaged.
    pub fn engage(&mut self) -> Result<(), BrakeError> {
        self.move_to(BrakeState::Engaged)
    }

    /// Release the brake. No-op when already disengaged.
    pub fn disengage(&mut self) -> Result<(), BrakeError> {
        self.move_to(BrakeState::Disengaged)
    }

    pub fn is_engaged(&self) -> bool {
        self.state == BrakeState::Engaged
    }

    pub fn state(&self) -> BrakeState {
        self.state
    }

    /// Whether start-up sensing failed and the state is a fallback.
    pub fn has_sensor_fault(&self) -> bool {
        self.sensor_fault
    }

    /// Underlying I/O, mostly for inspection.
    pub fn io(&self) -> &B {
        &self.io
    }

    fn move_to(&mut self, target: BrakeState) -> Result<(), BrakeError> {
        if self.state == target {
            return Ok(());
        }
        self.drive_triggers(target)?;
        #[cfg(feature = "defmt")]
        defmt::info!("Parking brake {} -> {}", self.state, target);
        self.state = target;
        Ok(())
    }

    /// Release the opposite trigger before asserting the requested one.
    fn drive_triggers(&mut self, target: BrakeState) -> Result<(), BrakeError> {
        match target {
            BrakeState::Engaged => {
                self.io.set_disengage_trigger(false).map_err(BrakeError::Output)?;
                self.io.set_engage_trigger(true).map_err(BrakeError::Output)
            }
            BrakeState::Disengaged => {
                self.io.set_engage_trigger(false).map_err(BrakeError::Output)?;
                self.io.set_disengage_trigger(true).map_err(BrakeError::Output)
            }
        }
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
pub(crate) mod tests;
