use crate::{Key, Result};
use log::debug;
use uinput::event::keyboard::{self, Misc};
use uinput::{event, Device};

static DEV_NAME: &str = "wiiclicker";

/// Keys the clicker can type into the focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keystroke {
    Left,
    Right,
    Up,
    Down,
    Space,
    F5,
    Escape,
    VolumeDown,
    VolumeUp,
    PageUp,
    PageDown,
}

impl Keystroke {
    pub const ALL: [Keystroke; 11] = [
        Keystroke::Left,
        Keystroke::Right,
        Keystroke::Up,
        Keystroke::Down,
        Keystroke::Space,
        Keystroke::F5,
        Keystroke::Escape,
        Keystroke::VolumeDown,
        Keystroke::VolumeUp,
        Keystroke::PageUp,
        Keystroke::PageDown,
    ];

    /// The presentation clicker binding for each remote button.
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::Left => Keystroke::Left,
            Key::Right => Keystroke::Right,
            Key::Up => Keystroke::Up,
            Key::Down => Keystroke::Down,
            Key::A => Keystroke::Space,
            Key::B => Keystroke::F5,
            Key::Home => Keystroke::Escape,
            Key::Minus => Keystroke::VolumeDown,
            Key::Plus => Keystroke::VolumeUp,
            Key::One => Keystroke::PageUp,
            Key::Two => Keystroke::PageDown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Keystroke::Left => "Left arrow",
            Keystroke::Right => "Right arrow",
            Keystroke::Up => "Up arrow",
            Keystroke::Down => "Down arrow",
            Keystroke::Space => "Space bar",
            Keystroke::F5 => "F5",
            Keystroke::Escape => "Escape",
            Keystroke::VolumeDown => "Volume down",
            Keystroke::VolumeUp => "Volume up",
            Keystroke::PageUp => "Page Up",
            Keystroke::PageDown => "Page Down",
        }
    }

    fn event(&self) -> event::Keyboard {
        match self {
            Keystroke::Left => event::Keyboard::Key(keyboard::Key::Left),
            Keystroke::Right => event::Keyboard::Key(keyboard::Key::Right),
            Keystroke::Up => event::Keyboard::Key(keyboard::Key::Up),
            Keystroke::Down => event::Keyboard::Key(keyboard::Key::Down),
            Keystroke::Space => event::Keyboard::Key(keyboard::Key::Space),
            Keystroke::F5 => event::Keyboard::Key(keyboard::Key::F5),
            Keystroke::Escape => event::Keyboard::Key(keyboard::Key::Esc),
            Keystroke::VolumeDown => event::Keyboard::Misc(Misc::VolumeDown),
            Keystroke::VolumeUp => event::Keyboard::Misc(Misc::VolumeUp),
            Keystroke::PageUp => event::Keyboard::Key(keyboard::Key::PageUp),
            Keystroke::PageDown => event::Keyboard::Key(keyboard::Key::PageDown),
        }
    }
}

/// Sends key events to whatever window has focus.
pub trait Injector {
    fn send(&mut self, key: Keystroke) -> Result<()>;
}

/// A uinput keyboard that can type every [`Keystroke`].
pub struct VirtualKeyboard(Device);

impl VirtualKeyboard {
    pub fn new() -> Result<Self> {
        let mut builder = uinput::default()?.name(DEV_NAME)?;
        for key in Keystroke::ALL {
            builder = builder.event(key.event())?;
        }
        Ok(Self(builder.create()?))
    }
}

impl Injector for VirtualKeyboard {
    fn send(&mut self, key: Keystroke) -> Result<()> {
        debug!("click {key:?}");
        self.0.click(&key.event())?;
        self.0.synchronize()?;
        Ok(())
    }
}
