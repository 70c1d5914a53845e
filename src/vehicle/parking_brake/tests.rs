//! Unit tests for the parking brake, plus the scripted I/O shared with the
//! controller tests.
use super::*;
use crate::vehicle::brake_io::BrakePins;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

/// Scripted sensors and recorded trigger levels.
#[derive(Debug, Default)]
pub(crate) struct MockBrakeIo {
    pub engaged: bool,
    pub disengaged: bool,
    pub engage_trigger: bool,
    pub disengage_trigger: bool,
    /// Number of trigger writes performed.
    pub writes: usize,
    /// Fail every trigger write.
    pub broken_outputs: bool,
    /// Fail every sensor read.
    pub broken_sensors: bool,
}

impl MockBrakeIo {
    pub fn engaged() -> Self {
        Self {
            engaged: true,
            ..Self::default()
        }
    }

    pub fn disengaged() -> Self {
        Self {
            disengaged: true,
            ..Self::default()
        }
    }
}

impl BrakeIo for MockBrakeIo {
    fn engaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        if self.broken_sensors {
            return Err(ErrorKind::Other);
        }
        Ok(self.engaged)
    }

    fn disengaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        if self.broken_sensors {
            return Err(ErrorKind::Other);
        }
        Ok(self.disengaged)
    }

    fn set_engage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.broken_outputs {
            return Err(ErrorKind::Other);
        }
        self.writes += 1;
        self.engage_trigger = high;
        Ok(())
    }

    fn set_disengage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.broken_outputs {
            return Err(ErrorKind::Other);
        }
        self.writes += 1;
        self.disengage_trigger = high;
        Ok(())
    }
}

#[test]
/// Engaged sensor at boot: state Engaged, engage trigger asserted.
fn test_init_engaged() {
    let brake = ParkingBrake::new(MockBrakeIo::engaged());
    assert!(brake.is_engaged());
    assert!(!brake.has_sensor_fault());
    assert!(brake.io().engage_trigger);
    assert!(!brake.io().disengage_trigger);
}

#[test]
/// Disengaged sensor at boot: state Disengaged, disengage trigger asserted.
fn test_init_disengaged() {
    let brake = ParkingBrake::new(MockBrakeIo::disengaged());
    assert_eq!(brake.state(), BrakeState::Disengaged);
    assert!(!brake.io().engage_trigger);
    assert!(brake.io().disengage_trigger);
}

#[test]
/// Both sensors asserted resolves to Engaged.
fn test_init_both_sensors() {
    let io = MockBrakeIo {
        engaged: true,
        disengaged: true,
        ..MockBrakeIo::default()
    };
    let brake = ParkingBrake::new(io);
    assert!(brake.is_engaged());
    assert!(!brake.has_sensor_fault());
}

#[test]
/// No sensor asserted is a fault falling back to Disengaged, triggers untouched.
fn test_init_sensor_fault() {
    let brake = ParkingBrake::new(MockBrakeIo::default());
    assert!(brake.has_sensor_fault());
    assert!(!brake.is_engaged());
    assert_eq!(brake.io().writes, 0);

    let io = MockBrakeIo {
        engaged: true,
        broken_sensors: true,
        ..MockBrakeIo::default()
    };
    assert!(ParkingBrake::new(io).has_sensor_fault());
}

#[test]
/// Engaging twice changes the triggers only once.
fn test_engage_idempotent() {
    let mut brake = ParkingBrake::new(MockBrakeIo::disengaged());
    let writes = brake.io().writes;

    brake.engage().unwrap();
    let after_first = brake.io().writes;
    assert!(after_first > writes);
    assert!(brake.io().engage_trigger);
    assert!(!brake.io().disengage_trigger);

    brake.engage().unwrap();
    assert!(brake.is_engaged());
    assert_eq!(brake.io().writes, after_first);
}

#[test]
/// Disengage is the symmetric inverse.
fn test_disengage_idempotent() {
    let mut brake = ParkingBrake::new(MockBrakeIo::engaged());
    brake.disengage().unwrap();
    let writes = brake.io().writes;
    brake.disengage().unwrap();

    assert!(!brake.is_engaged());
    assert!(brake.io().disengage_trigger);
    assert!(!brake.io().engage_trigger);
    assert_eq!(brake.io().writes, writes);
}

#[test]
/// A failed trigger write keeps the previous state.
fn test_output_failure_keeps_state() {
    let mut brake = ParkingBrake::new(MockBrakeIo::disengaged());
    brake.io.broken_outputs = true;
    assert_eq!(brake.engage(), Err(BrakeError::Output(ErrorKind::Other)));
    assert!(!brake.is_engaged());
}

//==================================================================================EMBEDDED_HAL
struct FakePin(bool);

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0)
    }
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0 = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0 = true;
        Ok(())
    }
}

#[test]
/// The HAL adapter reads sensors and drives triggers through the pins.
fn test_brake_pins_adapter() {
    let pins = BrakePins::new(FakePin(false), FakePin(true), FakePin(true), FakePin(false));
    let mut brake = ParkingBrake::new(pins);
    assert!(!brake.is_engaged());
    assert!(!brake.io().trigger_engage.0);
    assert!(brake.io().trigger_disengage.0);

    brake.engage().unwrap();
    assert!(brake.io().trigger_engage.0);
    assert!(!brake.io().trigger_disengage.0);
}
