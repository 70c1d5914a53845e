//! # Simulated keypad
//!
//! Runs the dashboard loop against an in-process keypad:
//! - the keypad boots, receives its activation and reports Operational
//! - the driver presses HAZARD then DRIVE
//! - every frame the dashboard transmits is printed
//!
//! This demo uses `std` and tokio channels in place of a CAN peripheral.
//!
//! ```bash
//! cargo run --example simulated_keypad
//! ```

use dashpad::config::DashboardConfig;
use dashpad::core::{ButtonId, PadLinkState};
use dashpad::protocol::transport::{
    can_frame::CanFrame,
    outbound_queue::OutboundQueue,
    traits::{
        can_bus::{BusState, CanBus},
        tick_timer::TickTimer,
    },
};
use dashpad::runtime::Dashboard;
use dashpad::vehicle::{brake_io::BrakeIo, parking_brake::ParkingBrake, VehicleConfig};
use embedded_hal::digital::ErrorKind;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

/// Dashboard end of the simulated bus.
struct ChannelBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: mpsc::UnboundedReceiver<CanFrame>,
}

impl CanBus for ChannelBus {
    type Error = &'static str;

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.tx.send(*frame).map_err(|_| "keypad gone")
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        self.rx.recv().await.ok_or("keypad gone")
    }

    fn bus_state(&self) -> BusState {
        BusState::ErrorActive
    }
}

struct TokioTimer;

impl TickTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

/// Brake that starts applied and prints every trigger change.
struct ConsoleBrake;

impl BrakeIo for ConsoleBrake {
    fn engaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        Ok(true)
    }

    fn disengaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        Ok(false)
    }

    fn set_engage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        println!("   [brake] engage trigger -> {}", high);
        Ok(())
    }

    fn set_disengage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        println!("   [brake] disengage trigger -> {}", high);
        Ok(())
    }
}

fn describe(frame: &CanFrame) -> &'static str {
    match frame.raw_id() {
        0x000 => "activation",
        0x215 => "LED matrix",
        0x697 => "drive shift",
        _ => "other",
    }
}

fn press(keypad_tx: &mpsc::UnboundedSender<CanFrame>, button: ButtonId) {
    let mask = 1u16 << button.bit();
    if let Ok(frame) = CanFrame::from_raw(0x195, &mask.to_le_bytes()) {
        let _ = keypad_tx.send(frame);
    }
}

#[tokio::main]
async fn main() {
    println!("=== dashpad simulated keypad ===\n");

    let (dash_tx, mut keypad_rx) = mpsc::unbounded_channel();
    let (keypad_tx, dash_rx) = mpsc::unbounded_channel();
    let bus = ChannelBus {
        tx: dash_tx,
        rx: dash_rx,
    };

    let queue = OutboundQueue::new();
    let config = DashboardConfig::default()
        .with_receive_timeout_ms(20)
        .with_tick_period_ms(5);
    let mut dashboard = Dashboard::new(
        bus,
        TokioTimer,
        ParkingBrake::new(ConsoleBrake),
        &queue,
        VehicleConfig::default(),
        config,
    );

    // ======================================================================
    // Scripted session, one step per tick
    // ======================================================================
    for step in 0..40u32 {
        match step {
            1 => {
                println!("-> keypad heartbeat: boot-up");
                let _ = keypad_tx.send(CanFrame::from_raw(0x715, &[0x00]).expect("valid identifier"));
            }
            2 => {
                println!("-> keypad heartbeat: operational");
                let _ = keypad_tx.send(CanFrame::from_raw(0x715, &[0x05]).expect("valid identifier"));
            }
            20 => {
                println!("-> HAZARD pressed");
                press(&keypad_tx, ButtonId::Hazard);
            }
            22 => {
                println!("-> DRIVE pressed");
                press(&keypad_tx, ButtonId::Drive);
            }
            _ => {}
        }

        let report = dashboard.tick().await;
        if let Some(state) = report.bus_state_change {
            println!("   bus state: {:?}", state);
        }
        if let Some(inbound) = report.inbound {
            println!("   inbound: {:?}", inbound);
        }
        while let Ok(frame) = keypad_rx.try_recv() {
            println!("<- {:<12} {:03X} {:02X?}", describe(&frame), frame.raw_id(), frame.payload());
        }
    }

    let controller = dashboard.controller();
    println!("\nKeypad: {:?}", controller.keypad().state());
    println!("Drive state: {:?}", controller.drive_state());
    println!("Brake engaged: {}", controller.brake().is_engaged());
    assert_eq!(controller.keypad().state(), PadLinkState::Operational);
}
