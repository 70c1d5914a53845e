//! Button handling for the vehicle: gear selection with the parking brake
//! interlock, device toggles, and the LED feedback that goes with them.
use crate::{
    core::{ButtonId, ButtonSet, Color, Device, DriveState},
    error::{BrakeError, QueueError},
    protocol::{
        keypad::KeypadLink,
        messages::encode_drive_shift,
        transport::{outbound_queue::OutboundQueue, DRIVE_SHIFT_REPEAT},
    },
    vehicle::{brake_io::BrakeIo, parking_brake::ParkingBrake, VehicleConfig},
};

/// Color of a device or function key while enabled.
const TOGGLE_ON: Color = Color::Yellow;
const F1_ON: Color = Color::Cyan;
const F2_ON: Color = Color::Yellow;
const GEAR_SELECTED: Color = Color::Blue;

/// Owns the drive state, the device flags, the parking brake and the keypad link.
pub struct VehicleController<'q, B: BrakeIo> {
    keypad: KeypadLink<'q>,
    brake: ParkingBrake<B>,
    queue: &'q OutboundQueue,
    drive_state: DriveState,
    devices: VehicleConfig,
    drive_shift_repeat: u8,
}

impl<'q, B: BrakeIo> VehicleController<'q, B> {
    pub fn new(queue: &'q OutboundQueue, brake: ParkingBrake<B>, devices: VehicleConfig) -> Self {
        Self {
            keypad: KeypadLink::new(queue),
            brake,
            queue,
            drive_state: DriveState::Park,
            devices,
            drive_shift_repeat: DRIVE_SHIFT_REPEAT,
        }
    }

    /// Number of drive-shift frames queued per gear change (at least one).
    pub fn with_drive_shift_repeat(mut self, repeat: u8) -> Self {
        self.drive_shift_repeat = repeat.max(1);
        self
    }

    pub fn keypad(&self) -> &KeypadLink<'q> {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut KeypadLink<'q> {
        &mut self.keypad
    }

    pub fn brake(&self) -> &ParkingBrake<B> {
        &self.brake
    }

    pub fn drive_state(&self) -> DriveState {
        self.drive_state
    }

    /// Current device and function-key flags.
    pub fn devices(&self) -> &VehicleConfig {
        &self.devices
    }

    /// Whether `device` is currently on.
    pub fn is_enabled(&self, device: Device) -> bool {
        match device {
            Device::Hazard => self.devices.hazard,
            Device::ExhaustSound => self.devices.exhaust_sound,
            Device::Regen => self.devices.regen,
        }
    }

    //==================================================================================START_STATE
    /// Bring the keypad in line with the vehicle after it (re)booted: every
    /// device and function-key LED, then the gear LEDs.
    pub fn init_start_state(&mut self) {
        for device in [Device::Hazard, Device::ExhaustSound, Device::Regen] {
            let color = if self.is_enabled(device) { TOGGLE_ON } else { Color::Black };
            self.keypad.update_color(device.button(), color);
        }
        let f1 = if self.devices.f1 { F1_ON } else { Color::Black };
        let f2 = if self.devices.f2 { F2_ON } else { Color::Black };
        self.keypad.update_color(ButtonId::F1, f1);
        self.keypad.update_color(ButtonId::F2, f2);
        self.init_drive_state();
    }

    /// Derive the drive state from the brake at start-up.
    ///
    /// An engaged brake forces Park and lights PARK; Reverse, Neutral and
    /// Drive always start dark.
    pub fn init_drive_state(&mut self) {
        if self.brake.is_engaged() {
            self.drive_state = DriveState::Park;
            self.keypad.update_color(ButtonId::Park, GEAR_SELECTED);
            let result = self.brake.engage();
            self.log_brake(result);
        }
        for button in [ButtonId::Reverse, ButtonId::Neutral, ButtonId::Drive] {
            self.keypad.update_color(button, Color::Black);
        }
    }

    //==================================================================================DISPATCH
    /// Handle every button of a press frame in ascending bit order.
    pub fn process_buttons(&mut self, buttons: ButtonSet) {
        for button in buttons.iter() {
            self.process_button_pressed(button);
        }
    }

    pub fn process_button_pressed(&mut self, button: ButtonId) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Button pressed: {}", button);
        match button {
            ButtonId::Hazard => self.switch_device_state(Device::Hazard),
            ButtonId::Park => self.shift_gear(DriveState::Park),
            ButtonId::Reverse => self.shift_gear(DriveState::Reverse),
            ButtonId::Neutral => self.shift_gear(DriveState::Neutral),
            ButtonId::Drive => self.shift_gear(DriveState::Drive),
            ButtonId::ExhaustSound => self.switch_device_state(Device::ExhaustSound),
            ButtonId::Regen => self.switch_device_state(Device::Regen),
            ButtonId::F1 => self.select_f1(),
            ButtonId::F2 => self.select_f2(),
            ButtonId::AutopilotOn | ButtonId::AutopilotSpeedUp | ButtonId::AutopilotSpeedDown => {
                #[cfg(feature = "defmt")]
                defmt::info!("{} has no action yet", button);
            }
        }
    }

    //==================================================================================DRIVE
    /// Select a gear.
    ///
    /// 1. The brake is released when the target moves the vehicle (Reverse,
    ///    Drive) or when leaving Park.
    /// 2. On an actual change the gear LEDs are rewritten so that only the
    ///    target is lit.
    /// 3. Entering Park applies the brake; entering any other gear queues the
    ///    drive-shift command `drive_shift_repeat` times.
    ///
    /// A change is only applied when the queue can take its LED snapshot and
    /// every drive-shift frame. Otherwise nothing happens (brake included)
    /// and [`QueueError::Full`] is returned.
    pub fn process_drive_change(&mut self, target: DriveState) -> Result<(), QueueError> {
        let current = self.drive_state;
        let shift = encode_drive_shift(target);
        if target != current {
            let shift_frames = if shift.is_some() { self.drive_shift_repeat as usize } else { 0 };
            if self.queue.free() < shift_frames + 1 {
                return Err(QueueError::Full);
            }
        }

        let leaving_park = current == DriveState::Park && target != DriveState::Park;
        if target.requires_motion() || leaving_park {
            let result = self.brake.disengage();
            self.log_brake(result);
        }

        if target == current {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Drive state {} -> {}", current, target);
        self.drive_state = target;
        for gear in ButtonId::GEARS {
            let color = if gear == target.button() { GEAR_SELECTED } else { Color::Black };
            self.keypad.update_color(gear, color);
        }

        match shift {
            None => {
                let result = self.brake.engage();
                self.log_brake(result);
            }
            Some(frame) => {
                for _ in 0..self.drive_shift_repeat {
                    self.queue.push(frame)?;
                }
            }
        }
        Ok(())
    }

    fn shift_gear(&mut self, target: DriveState) {
        if let Err(_err) = self.process_drive_change(target) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Gear change to {} refused: {}", target, _err);
        }
    }

    //==================================================================================DEVICES
    /// Flip a device and light its button yellow (on) or black (off).
    pub fn switch_device_state(&mut self, device: Device) {
        let flag = match device {
            Device::Hazard => &mut self.devices.hazard,
            Device::ExhaustSound => &mut self.devices.exhaust_sound,
            Device::Regen => &mut self.devices.regen,
        };
        *flag = !*flag;
        let enabled = *flag;
        #[cfg(feature = "defmt")]
        defmt::info!("{} {}", device, if enabled { "on" } else { "off" });
        let color = if enabled { TOGGLE_ON } else { Color::Black };
        self.keypad.update_color(device.button(), color);
    }

    /// F1 and F2 are exclusive; F1 lights cyan.
    fn select_f1(&mut self) {
        if self.devices.f1 {
            return;
        }
        self.devices.f1 = true;
        self.devices.f2 = false;
        self.keypad.update_color(ButtonId::F1, F1_ON);
        self.keypad.update_color(ButtonId::F2, Color::Black);
    }

    /// F2 lights yellow.
    fn select_f2(&mut self) {
        if self.devices.f2 {
            return;
        }
        self.devices.f2 = true;
        self.devices.f1 = false;
        self.keypad.update_color(ButtonId::F2, F2_ON);
        self.keypad.update_color(ButtonId::F1, Color::Black);
    }

    fn log_brake(&self, result: Result<(), BrakeError>) {
        if let Err(_err) = result {
            #[cfg(feature = "defmt")]
            defmt::error!("Parking brake command failed: {}", _err);
        }
    }
}
