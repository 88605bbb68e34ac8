/*
    This file is part of wiiclicker
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
pub mod cli;
pub mod clicker;
mod consts;
pub mod device;
mod error;
pub mod event_loop;
pub mod inject;
pub mod monitor;
mod read;
pub mod screen;
pub mod session;
pub mod show;
mod write;

pub use device::{Device, Transport};
pub use error::{Error, Result};
pub use read::Report;
pub use write::Action;

use bitflags::bitflags;
use consts::*;
use hidapi::HidDevice;
use log::debug;
use std::collections::VecDeque;

/// An open connection to one Wii Remote.
pub struct Wiimote<T = HidDevice> {
    device: T,
    kind: DeviceType,
    rumble: bool,
    out: VecDeque<Event>,
    buttons: ButtonState,
    status: Option<Status>,
    extension: Extension,
    motion_plus_active: bool,
    available: Interfaces,
    opened: Interfaces,
    reads: VecDeque<RegisterRead>,
}

/// Register reads in flight. The remote answers them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterRead {
    MotionPlusProbe,
    ExtensionId,
}

impl<T: Transport> Wiimote<T> {
    /// Creates wiimote abstraction over a HidDevice (which should be a wiimote)
    /// and starts probing for static attributes. The answers arrive as
    /// [`Event::Watch`].
    pub fn from_device(device: T, kind: DeviceType) -> Result<Self> {
        let mut w = Self {
            device,
            kind,
            rumble: false,
            out: VecDeque::new(),
            buttons: ButtonState::default(),
            status: None,
            extension: Extension::None,
            motion_plus_active: false,
            available: Interfaces::CORE | Interfaces::ACCEL | Interfaces::IR | Interfaces::WRITABLE,
            opened: Interfaces::WRITABLE,
            reads: VecDeque::new(),
        };
        debug!("opened {kind:?}, probing");
        w.request_read(RegisterRead::MotionPlusProbe, REG_MOTION_PLUS_ID, 6)?;
        w.request_status()?;
        Ok(w)
    }
}

/// Decoded input, one item per state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Key { key: Key, pressed: bool },
    Accel(Acceleration),
    Ir([Option<IRObject>; 4]),
    MotionPlus(MotionPlus),
    /// Static attributes or available interfaces may have changed.
    Watch,
}

/// Event tags, used for dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    Accel,
    Ir,
    MotionPlus,
    Watch,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Key { .. } => EventKind::Key,
            Event::Accel(_) => EventKind::Accel,
            Event::Ir(_) => EventKind::Ir,
            Event::MotionPlus(_) => EventKind::MotionPlus,
            Event::Watch => EventKind::Watch,
        }
    }
}

bitflags! {
    /// Feature subsets of a device that can be opened independently.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Interfaces: u8 {
        const CORE        = 1 << 0;
        const ACCEL       = 1 << 1;
        const IR          = 1 << 2;
        const MOTION_PLUS = 1 << 3;
        const WRITABLE    = 1 << 4;
    }
}

bitflags! {
    /// The four player LEDs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Leds: u8 {
        const LED1 = 1 << 0;
        const LED2 = 1 << 1;
        const LED3 = 1 << 2;
        const LED4 = 1 << 3;
    }
}

impl Leds {
    /// LED number `n` in 1..=4
    pub fn nth(n: u8) -> Option<Self> {
        match n {
            1..=4 => Some(Self::from_bits_truncate(1 << (n - 1))),
            _ => None,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingMode {
    Buttons = TY_CORE_BUTTONS,
    ButtonsAccel = TY_CORE_BUTTONS_ACCELEROMETER,
    ButtonsExt8 = TY_CORE_BUTTONS_EXTENSION8,
    ButtonsAccelExt16 = TY_CORE_BUTTONS_ACCELEROMETER_EXTENSION16,
    ButtonsIR10Ext9 = TY_CORE_BUTTONS_IR10_EXTENSION9,
    ButtonsAccelIR10Ext6 = TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6,
}

impl ReportingMode {
    /// Picks the smallest report that carries everything in `opened`.
    /// IR always uses the 10-byte basic format.
    pub fn for_interfaces(opened: Interfaces) -> Self {
        let accel = opened.contains(Interfaces::ACCEL);
        let ir = opened.contains(Interfaces::IR);
        let ext = opened.contains(Interfaces::MOTION_PLUS);
        match (accel, ir, ext) {
            (false, false, false) => Self::Buttons,
            (true, false, false) => Self::ButtonsAccel,
            (false, false, true) => Self::ButtonsExt8,
            (true, false, true) => Self::ButtonsAccelExt16,
            (false, true, _) => Self::ButtonsIR10Ext9,
            (true, true, _) => Self::ButtonsAccelIR10Ext6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Acceleration {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IRObject {
    pub x: u16,
    pub y: u16,
}

/// Gyro rates, centered on zero and scaled to slow-mode units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPlus {
    pub yaw: i32,
    pub roll: i32,
    pub pitch: i32,
}

impl std::ops::Sub for MotionPlus {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            yaw: self.yaw - rhs.yaw,
            roll: self.roll - rhs.roll,
            pitch: self.pitch - rhs.pitch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    B,
    Plus,
    Minus,
    Home,
    One,
    Two,
}

impl Key {
    pub const ALL: [Key; 11] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::A,
        Key::B,
        Key::Plus,
        Key::Minus,
        Key::Home,
        Key::One,
        Key::Two,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::A => "A",
            Key::B => "B",
            Key::Plus => "+",
            Key::Minus => "-",
            Key::Home => "Home",
            Key::One => "1",
            Key::Two => "2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub d_pad_left: bool,
    pub d_pad_right: bool,
    pub d_pad_down: bool,
    pub d_pad_up: bool,
    pub plus: bool,
    pub two: bool,
    pub one: bool,
    pub b: bool,
    pub a: bool,
    pub minus: bool,
    pub home: bool,
}

impl ButtonState {
    pub fn pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.d_pad_left,
            Key::Right => self.d_pad_right,
            Key::Up => self.d_pad_up,
            Key::Down => self.d_pad_down,
            Key::A => self.a,
            Key::B => self.b,
            Key::Plus => self.plus,
            Key::Minus => self.minus,
            Key::Home => self.home,
            Key::One => self.one,
            Key::Two => self.two,
        }
    }

    /// Keys whose state differs from `previous`, in [`Key::ALL`] order.
    pub fn changes(&self, previous: &ButtonState) -> impl Iterator<Item = Event> + '_ {
        let previous = *previous;
        Key::ALL.into_iter().filter_map(move |key| {
            let pressed = self.pressed(key);
            (pressed != previous.pressed(key)).then_some(Event::Key { key, pressed })
        })
    }
}

/// Contents of the last status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// Battery capacity in percent
    pub battery: u8,
    pub leds: Leds,
    pub extension_connected: bool,
    pub battery_low: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Gen10,
    Gen20,
}

impl DeviceType {
    pub fn from_product_id(product: u16) -> Option<Self> {
        match product {
            HID_PRODUCT_GEN10 => Some(Self::Gen10),
            HID_PRODUCT_GEN20 => Some(Self::Gen20),
            _ => None,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            DeviceType::Gen10 => "gen10",
            DeviceType::Gen20 => "gen20",
        }
    }
    pub fn model(&self) -> &'static str {
        match self {
            DeviceType::Gen10 => "Nintendo RVL-CNT-01",
            DeviceType::Gen20 => "Nintendo RVL-CNT-01-TR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    None,
    Nunchuk,
    ClassicController,
    MotionPlus,
    BalanceBoard,
    Guitar,
    Drums,
    Unknown([u8; 6]),
}

impl Extension {
    /// Identify an extension from the six id bytes at 0xa400fa.
    pub fn from_id(id: [u8; 6]) -> Self {
        match id {
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff] => Self::None,
            [_, _, 0xa4, 0x20, 0x00, 0x00] => Self::Nunchuk,
            [_, _, 0xa4, 0x20, 0x01, 0x01] => Self::ClassicController,
            [_, _, 0xa4, 0x20, 0x04, 0x02] => Self::BalanceBoard,
            [0x00, _, 0xa4, 0x20, 0x01, 0x03] => Self::Guitar,
            [0x01, _, 0xa4, 0x20, 0x01, 0x03] => Self::Drums,
            [_, _, 0xa4, 0x20, _, 0x05] => Self::MotionPlus,
            _ => Self::Unknown(id),
        }
    }
    pub fn name(&self) -> String {
        match self {
            Extension::None => "none".to_string(),
            Extension::Nunchuk => "Nunchuk".to_string(),
            Extension::ClassicController => "Classic Controller".to_string(),
            Extension::MotionPlus => "Motion Plus".to_string(),
            Extension::BalanceBoard => "Balance Board".to_string(),
            Extension::Guitar => "Guitar".to_string(),
            Extension::Drums => "Drums".to_string(),
            Extension::Unknown(id) => format!("unknown ({id:02x?})"),
        }
    }
}
