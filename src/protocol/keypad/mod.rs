//! Keypad lifecycle and LED ownership.
//!
//! [`KeypadLink`] follows the keypad through its heartbeats
//! (`Unknown -> BootUp -> Operational`, back to `BootUp` when the keypad
//! reboots) and owns the [`ButtonLedState`] mirrored on the device. It never
//! talks to the bus directly: activation and LED frames go through the shared
//! [`OutboundQueue`].
use crate::{
    core::{ButtonId, ButtonLedState, ButtonSet, Color, HeartbeatKind, PadLinkState},
    error::{DecodeError, LinkError},
    protocol::{
        messages::{classify_heartbeat, decode_button_press, encode_button_activation, encode_led_matrix},
        transport::{can_frame::CanFrame, outbound_queue::OutboundQueue},
    },
};

/// Outcome of [`KeypadLink::ensure_operational`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnsureAction {
    /// Nothing to do this tick.
    Idle,
    /// First activation of a keypad never seen before: the caller must push
    /// the whole vehicle start state (device LEDs, drive state).
    Bootstrap,
    /// Activation repeated while the keypad boots: the caller re-derives the
    /// drive state and its LEDs.
    Reactivate,
}

pub struct KeypadLink<'q> {
    state: PadLinkState,
    /// Set once the first-cycle activation went out while the state was Unknown.
    bootstrapped: bool,
    leds: ButtonLedState,
    queue: &'q OutboundQueue,
}

impl<'q> KeypadLink<'q> {
    /// Fresh link: state Unknown, every LED dark.
    pub fn new(queue: &'q OutboundQueue) -> Self {
        Self {
            state: PadLinkState::Unknown,
            bootstrapped: false,
            leds: ButtonLedState::new(),
            queue,
        }
    }

    pub fn state(&self) -> PadLinkState {
        self.state
    }

    /// LED state as last pushed to the keypad.
    pub fn leds(&self) -> &ButtonLedState {
        &self.leds
    }

    //==================================================================================HEARTBEAT
    /// Apply a heartbeat payload to the lifecycle.
    ///
    /// Pre-operational heartbeats carry no transition. Unrecognized payloads
    /// and transitions the table does not allow are logged and leave the
    /// state untouched. The classified kind is returned for reporting.
    pub fn on_heartbeat(&mut self, payload: &[u8]) -> HeartbeatKind {
        let kind = classify_heartbeat(payload);
        let outcome = match kind {
            HeartbeatKind::BootUp => self.to_boot_up(),
            HeartbeatKind::Operational => self.to_operational(),
            HeartbeatKind::PreOperational => Ok(()),
            HeartbeatKind::Unknown => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Unknown keypad heartbeat {=[u8]:x}", payload);
                Ok(())
            }
        };
        if let Err(_err) = outcome {
            #[cfg(feature = "defmt")]
            defmt::warn!("Heartbeat {} ignored: {}", kind, _err);
        }
        kind
    }

    /// Move to BootUp. Allowed from Unknown and Operational (keypad reboot).
    pub fn to_boot_up(&mut self) -> Result<(), LinkError> {
        match self.state {
            PadLinkState::BootUp => Ok(()),
            PadLinkState::Unknown | PadLinkState::Operational => {
                self.transition(PadLinkState::BootUp);
                Ok(())
            }
        }
    }

    /// Move to Operational. Only allowed from BootUp.
    pub fn to_operational(&mut self) -> Result<(), LinkError> {
        match self.state {
            PadLinkState::Operational => Ok(()),
            PadLinkState::BootUp => {
                self.transition(PadLinkState::Operational);
                Ok(())
            }
            from @ PadLinkState::Unknown => Err(LinkError::InvalidTransition {
                from,
                to: PadLinkState::Operational,
            }),
        }
    }

    /// Forget the keypad: back to Unknown with the first-cycle activation re-armed.
    pub fn reset(&mut self) {
        self.transition(PadLinkState::Unknown);
        self.bootstrapped = false;
    }

    fn transition(&mut self, next: PadLinkState) {
        if self.state != next {
            #[cfg(feature = "defmt")]
            defmt::info!("Keypad {} -> {}", self.state, next);
            self.state = next;
        }
    }

    //==================================================================================TICK
    /// Per-tick activation step.
    ///
    /// | state | action |
    /// |---|---|
    /// | Unknown, first cycle | queue activation, [`EnsureAction::Bootstrap`] |
    /// | Unknown, later cycles | none |
    /// | BootUp | queue activation, [`EnsureAction::Reactivate`] |
    /// | Operational | none |
    pub fn ensure_operational(&mut self) -> EnsureAction {
        match self.state {
            PadLinkState::Unknown if !self.bootstrapped => {
                self.bootstrapped = true;
                self.activate();
                EnsureAction::Bootstrap
            }
            PadLinkState::BootUp => {
                self.activate();
                EnsureAction::Reactivate
            }
            PadLinkState::Unknown | PadLinkState::Operational => EnsureAction::Idle,
        }
    }

    fn activate(&self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Queueing keypad activation");
        self.enqueue(encode_button_activation());
    }

    //==================================================================================LEDS
    /// Recolor one button and queue the complete LED matrix.
    ///
    /// The keypad has no partial-update command, so every change resends all
    /// twelve buttons. A matrix still waiting in the queue is overwritten
    /// with the new one.
    pub fn update_color(&mut self, button: ButtonId, color: Color) {
        self.leds.set(button, color);
        self.enqueue(encode_led_matrix(&self.leds));
    }

    /// Decode a button press payload.
    pub fn decode_and_route(&self, payload: &[u8]) -> Result<ButtonSet, DecodeError> {
        decode_button_press(payload)
    }

    /// Activation and LED frames are snapshots: a newer one supersedes a
    /// pending one instead of queuing behind it.
    fn enqueue(&self, frame: CanFrame) {
        // A full queue already logged the dropped frame.
        let _ = self.queue.push_latest(frame);
    }
}
