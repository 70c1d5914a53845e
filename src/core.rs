//! Domain vocabulary shared by the codec, the keypad link and the vehicle
//! controller: buttons, colors, LED state, lifecycle and drive states.

/// Number of buttons on the keypad (one bit each in the press bitfield).
pub const BUTTON_COUNT: usize = 12;

//==================================================================================BUTTON_ID
/// Keypad button, valued by its bit position in the press bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonId {
    Hazard = 0,
    Park = 1,
    Reverse = 2,
    Neutral = 3,
    Drive = 4,
    AutopilotSpeedUp = 5,
    ExhaustSound = 6,
    F1 = 7,
    F2 = 8,
    Regen = 9,
    AutopilotOn = 10,
    AutopilotSpeedDown = 11,
}

impl ButtonId {
    /// Every button, in bit-position order.
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::Hazard,
        ButtonId::Park,
        ButtonId::Reverse,
        ButtonId::Neutral,
        ButtonId::Drive,
        ButtonId::AutopilotSpeedUp,
        ButtonId::ExhaustSound,
        ButtonId::F1,
        ButtonId::F2,
        ButtonId::Regen,
        ButtonId::AutopilotOn,
        ButtonId::AutopilotSpeedDown,
    ];

    /// The four gear buttons, lit mutually exclusively.
    pub const GEARS: [ButtonId; 4] = [
        ButtonId::Park,
        ButtonId::Reverse,
        ButtonId::Neutral,
        ButtonId::Drive,
    ];

    /// Bit position (0..=11) of the button in the press bitfield.
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

//==================================================================================BUTTON_SET
/// Set of pressed buttons, stored as the raw 12-bit press mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u16);

impl ButtonSet {
    const MASK: u16 = (1 << BUTTON_COUNT) - 1;

    /// Empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a raw press mask; bits above 11 are discarded.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw press mask.
    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub fn insert(&mut self, button: ButtonId) {
        self.0 |= 1 << button.bit();
    }

    pub fn contains(&self, button: ButtonId) -> bool {
        self.0 & (1 << button.bit()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the pressed buttons in ascending bit order.
    pub fn iter(&self) -> impl Iterator<Item = ButtonId> + '_ {
        ButtonId::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl FromIterator<ButtonId> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = ButtonId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for button in iter {
            set.insert(button);
        }
        set
    }
}

//==================================================================================COLOR
/// One LED color channel triple; each channel is a single on/off bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

/// Named button illumination colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Blue,
    Green,
    Magenta,
    Cyan,
    Yellow,
    White,
    Black,
}

impl Color {
    /// Channel bits driven for this color.
    pub const fn rgb(self) -> Rgb {
        match self {
            Color::Red => Rgb::new(true, false, false),
            Color::Blue => Rgb::new(false, false, true),
            Color::Green => Rgb::new(false, true, false),
            Color::Magenta => Rgb::new(true, false, true),
            Color::Cyan => Rgb::new(false, true, true),
            Color::Yellow => Rgb::new(true, true, false),
            Color::White => Rgb::new(true, true, true),
            Color::Black => Rgb::new(false, false, false),
        }
    }

    /// Name the color produced by a channel triple. Every triple has a name.
    pub const fn from_rgb(rgb: Rgb) -> Self {
        match (rgb.red, rgb.green, rgb.blue) {
            (true, false, false) => Color::Red,
            (false, false, true) => Color::Blue,
            (false, true, false) => Color::Green,
            (true, false, true) => Color::Magenta,
            (false, true, true) => Color::Cyan,
            (true, true, false) => Color::Yellow,
            (true, true, true) => Color::White,
            (false, false, false) => Color::Black,
        }
    }
}

//==================================================================================LED_STATE
/// Illumination of all twelve buttons, indexed by bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLedState {
    leds: [Rgb; BUTTON_COUNT],
}

impl ButtonLedState {
    /// All buttons dark.
    pub const fn new() -> Self {
        Self {
            leds: [Rgb::new(false, false, false); BUTTON_COUNT],
        }
    }

    pub fn set(&mut self, button: ButtonId, color: Color) {
        self.leds[button.bit() as usize] = color.rgb();
    }

    pub fn rgb(&self, button: ButtonId) -> Rgb {
        self.leds[button.bit() as usize]
    }

    pub fn color(&self, button: ButtonId) -> Color {
        Color::from_rgb(self.rgb(button))
    }

    /// One 12-bit row per channel: bit `i` holds the channel of button `i`.
    pub fn rows(&self) -> (u16, u16, u16) {
        self.leds
            .iter()
            .enumerate()
            .fold((0, 0, 0), |(r, g, b), (i, led)| {
                (
                    r | (led.red as u16) << i,
                    g | (led.green as u16) << i,
                    b | (led.blue as u16) << i,
                )
            })
    }
}

//==================================================================================STATES
/// Keypad lifecycle as seen from its heartbeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadLinkState {
    #[default]
    Unknown,
    BootUp,
    Operational,
}

/// Lifecycle phase announced by a keypad heartbeat payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeartbeatKind {
    BootUp,
    PreOperational,
    Operational,
    Unknown,
}

/// Logical gear selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveState {
    #[default]
    Park,
    Reverse,
    Neutral,
    Drive,
}

impl DriveState {
    /// Gear button lit while this state is selected.
    pub const fn button(self) -> ButtonId {
        match self {
            DriveState::Park => ButtonId::Park,
            DriveState::Reverse => ButtonId::Reverse,
            DriveState::Neutral => ButtonId::Neutral,
            DriveState::Drive => ButtonId::Drive,
        }
    }

    /// Reverse and Drive move the vehicle; the brake must be released for them.
    pub const fn requires_motion(self) -> bool {
        matches!(self, DriveState::Reverse | DriveState::Drive)
    }
}

/// On/off vehicle devices toggled from the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Device {
    Hazard,
    ExhaustSound,
    Regen,
}

impl Device {
    pub const fn button(self) -> ButtonId {
        match self {
            Device::Hazard => ButtonId::Hazard,
            Device::ExhaustSound => ButtonId::ExhaustSound,
            Device::Regen => ButtonId::Regen,
        }
    }
}
