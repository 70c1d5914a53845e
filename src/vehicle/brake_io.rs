//! Digital I/O seam of the parking brake: two position sensors, two trigger
//! outputs. [`BrakePins`] adapts any set of `embedded-hal` 1.0 pins.
use embedded_hal::digital::{Error as _, ErrorKind, InputPin, OutputPin, PinState};

/// Brake sensor/actuator access. Errors are reduced to the HAL's portable [`ErrorKind`].
pub trait BrakeIo {
    /// Sensor asserted while the brake is applied.
    fn engaged_sensor(&mut self) -> Result<bool, ErrorKind>;
    /// Sensor asserted while the brake is released.
    fn disengaged_sensor(&mut self) -> Result<bool, ErrorKind>;
    /// Drive the engage trigger.
    fn set_engage_trigger(&mut self, high: bool) -> Result<(), ErrorKind>;
    /// Drive the disengage trigger.
    fn set_disengage_trigger(&mut self, high: bool) -> Result<(), ErrorKind>;
}

/// Four GPIOs wired to the brake controller.
pub struct BrakePins<SE, SD, TE, TD> {
    pub sensor_engaged: SE,
    pub sensor_disengaged: SD,
    pub trigger_engage: TE,
    pub trigger_disengage: TD,
}

impl<SE, SD, TE, TD> BrakePins<SE, SD, TE, TD> {
    pub fn new(sensor_engaged: SE, sensor_disengaged: SD, trigger_engage: TE, trigger_disengage: TD) -> Self {
        Self {
            sensor_engaged,
            sensor_disengaged,
            trigger_engage,
            trigger_disengage,
        }
    }
}

impl<SE, SD, TE, TD> BrakeIo for BrakePins<SE, SD, TE, TD>
where
    SE: InputPin,
    SD: InputPin,
    TE: OutputPin,
    TD: OutputPin,
{
    fn engaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        self.sensor_engaged.is_high().map_err(|e| e.kind())
    }

    fn disengaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        self.sensor_disengaged.is_high().map_err(|e| e.kind())
    }

    fn set_engage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        self.trigger_engage
            .set_state(PinState::from(high))
            .map_err(|e| e.kind())
    }

    fn set_disengage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        self.trigger_disengage
            .set_state(PinState::from(high))
            .map_err(|e| e.kind())
    }
}
