/// Test doubles simulating the CAN bus, the timer and the brake I/O during integration tests.
use dashpad::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        can_bus::{BusState, CanBus},
        tick_timer::TickTimer,
    },
};
use dashpad::vehicle::brake_io::BrakeIo;
use embedded_hal::digital::ErrorKind;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, timeout, Duration};

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory CAN bus reproducing the `CanBus` trait behavior.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<CanFrame>>>,
    state: Arc<StdMutex<BusState>>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct a pair of interconnected buses (dashboard ↔ keypad). Both
    /// ends share the same controller state.
    pub fn create_pair() -> (Self, Self) {
        let (dut_tx, host_rx) = mpsc::unbounded_channel();
        let (host_tx, dut_rx) = mpsc::unbounded_channel();
        let state = Arc::new(StdMutex::new(BusState::ErrorActive));

        let dut_bus = Self {
            tx: dut_tx,
            rx: Arc::new(Mutex::new(dut_rx)),
            state: state.clone(),
        };

        let host_bus = Self {
            tx: host_tx,
            rx: Arc::new(Mutex::new(host_rx)),
            state,
        };

        (dut_bus, host_bus)
    }

    /// Force the controller state reported by both ends.
    pub fn set_state(&self, state: BusState) {
        *self.state.lock().unwrap() = state;
    }

    /// Inject a frame towards the other end.
    pub fn inject(&self, raw_id: u16, payload: &[u8]) {
        let frame = CanFrame::from_raw(raw_id, payload).unwrap();
        self.tx.send(frame).unwrap();
    }

    /// Next frame sent by the other end, if one arrives within 100 ms.
    pub async fn next_frame(&self) -> Option<CanFrame> {
        let mut rx = self.rx.lock().await;
        timeout(Duration::from_millis(100), rx.recv()).await.ok().flatten()
    }

    /// Frames already sent by the other end, without waiting.
    pub async fn drain(&self) -> Vec<CanFrame> {
        let mut rx = self.rx.lock().await;
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.tx.send(*frame).map_err(|_| ())?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        let mut rx = self.rx.lock().await;
        rx.recv().await.ok_or(())
    }

    fn bus_state(&self) -> BusState {
        *self.state.lock().unwrap()
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl TickTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[derive(Debug, Default, Clone)]
#[allow(dead_code)]
/// Brake I/O with scripted sensors; trigger writes are recorded.
pub struct MockBrakeIo {
    pub engaged: bool,
    pub disengaged: bool,
    pub engage_trigger: bool,
    pub disengage_trigger: bool,
}

#[allow(dead_code)]
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
        Ok(self.engaged)
    }

    fn disengaged_sensor(&mut self) -> Result<bool, ErrorKind> {
        Ok(self.disengaged)
    }

    fn set_engage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        self.engage_trigger = high;
        Ok(())
    }

    fn set_disengage_trigger(&mut self, high: bool) -> Result<(), ErrorKind> {
        self.disengage_trigger = high;
        Ok(())
    }
}
