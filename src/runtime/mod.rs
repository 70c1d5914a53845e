//! Fixed-cadence dashboard loop.
//!
//! Each [`Dashboard::tick`] runs, in order:
//! 1. poll the controller bus state and log changes;
//! 2. wait at most `receive_timeout_ms` for one inbound frame;
//! 3. route it (button press to the controller, heartbeat to the keypad link);
//! 4. run the keypad activation step;
//! 5. transmit at most one queued frame.
//!
//! The bounded receive is the only suspension point. Nothing here is fatal:
//! bus, decode and brake errors are logged and the loop goes on.
use core::fmt::Debug;

use futures_util::future::{select, Either};
use futures_util::pin_mut;

use crate::{
    config::DashboardConfig,
    core::{ButtonSet, HeartbeatKind},
    error::DecodeError,
    protocol::{
        keypad::EnsureAction,
        transport::{
            can_frame::CanFrame,
            outbound_queue::OutboundQueue,
            traits::{
                can_bus::{BusState, CanBus},
                tick_timer::TickTimer,
            },
            BUTTON_PRESS_ID, HEARTBEAT_ID,
        },
    },
    vehicle::{brake_io::BrakeIo, controller::VehicleController, parking_brake::ParkingBrake, VehicleConfig},
};

/// Inbound frame after routing on its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// Button press frame with its decoded set.
    ButtonPress(ButtonSet),
    /// Keypad heartbeat.
    Heartbeat(HeartbeatKind),
    /// Button press frame too short to decode.
    Malformed(DecodeError),
    /// Identifier outside the keypad protocol (raw value).
    Unknown(u16),
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// New bus state, when it differs from the previous tick.
    pub bus_state_change: Option<BusState>,
    /// Frame received within the timeout, once classified.
    pub inbound: Option<Inbound>,
    /// Keypad activation step outcome.
    pub ensure: Option<EnsureAction>,
    /// Frame handed to the bus this tick.
    pub transmitted: Option<CanFrame>,
    /// The transmit attempt failed; the frame is lost.
    pub send_failed: bool,
}

pub struct Dashboard<'q, C: CanBus, T: TickTimer, B: BrakeIo> {
    can_bus: C,
    timer: T,
    controller: VehicleController<'q, B>,
    queue: &'q OutboundQueue,
    config: DashboardConfig,
    bus_state: Option<BusState>,
}

impl<'q, C, T, B> Dashboard<'q, C, T, B>
where
    C: CanBus,
    C::Error: Debug,
    T: TickTimer,
    B: BrakeIo,
{
    /// Assemble the loop. The queue is shared between the keypad link, the
    /// controller and the transmitter.
    pub fn new(
        can_bus: C,
        timer: T,
        brake: ParkingBrake<B>,
        queue: &'q OutboundQueue,
        vehicle: VehicleConfig,
        config: DashboardConfig,
    ) -> Self {
        let controller = VehicleController::new(queue, brake, vehicle)
            .with_drive_shift_repeat(config.drive_shift_repeat);
        Self {
            can_bus,
            timer,
            controller,
            queue,
            config,
            bus_state: None,
        }
    }

    pub fn controller(&self) -> &VehicleController<'q, B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut VehicleController<'q, B> {
        &mut self.controller
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Frames waiting for transmission.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run ticks forever, pausing `tick_period_ms` between them.
    pub async fn run(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Dashboard loop started: {}", self.config);
        loop {
            let _report = self.tick().await;
            self.timer.delay_ms(self.config.tick_period_ms).await;
        }
    }

    /// One pass of the loop.
    pub async fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            bus_state_change: self.poll_bus_state(),
            ..TickReport::default()
        };

        if let Some(frame) = self.receive().await {
            report.inbound = Some(self.route(&frame));
        }

        report.ensure = match self.controller.keypad_mut().ensure_operational() {
            EnsureAction::Idle => None,
            action @ EnsureAction::Bootstrap => {
                self.controller.init_start_state();
                Some(action)
            }
            action @ EnsureAction::Reactivate => {
                self.controller.init_drive_state();
                Some(action)
            }
        };

        if let Some(frame) = self.queue.pop() {
            report.transmitted = Some(frame);
            if let Err(_err) = self.can_bus.send(&frame).await {
                #[cfg(feature = "defmt")]
                defmt::error!("CAN send failed for {}: {:?}", frame, defmt::Debug2Format(&_err));
                report.send_failed = true;
            }
        }
        report
    }

    fn poll_bus_state(&mut self) -> Option<BusState> {
        let state = self.can_bus.bus_state();
        if self.bus_state == Some(state) {
            return None;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("CAN bus state: {}", state);
        self.bus_state = Some(state);
        Some(state)
    }

    /// Wait for one frame, bounded by the receive timeout.
    async fn receive(&mut self) -> Option<CanFrame> {
        let recv = self.can_bus.recv();
        let timeout = self.timer.delay_ms(self.config.receive_timeout_ms);
        pin_mut!(recv, timeout);

        match select(recv, timeout).await {
            Either::Left((Ok(frame), _)) => Some(frame),
            Either::Left((Err(_err), _)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("CAN receive error: {:?}", defmt::Debug2Format(&_err));
                None
            }
            Either::Right(_) => None,
        }
    }

    /// Hand a received frame to its owner: presses are decoded by the keypad
    /// link and applied by the controller, heartbeats drive the keypad link.
    fn route(&mut self, frame: &CanFrame) -> Inbound {
        if frame.id == BUTTON_PRESS_ID {
            match self.controller.keypad().decode_and_route(frame.payload()) {
                Ok(buttons) => {
                    self.controller.process_buttons(buttons);
                    Inbound::ButtonPress(buttons)
                }
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Dropping malformed button frame: {}", err);
                    Inbound::Malformed(err)
                }
            }
        } else if frame.id == HEARTBEAT_ID {
            Inbound::Heartbeat(self.controller.keypad_mut().on_heartbeat(frame.payload()))
        } else {
            #[cfg(feature = "defmt")]
            defmt::info!("Ignoring frame {}", frame);
            Inbound::Unknown(frame.raw_id())
        }
    }
}
