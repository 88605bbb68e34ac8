//! wiiclicker: turns button presses into keystrokes for presentations.

use crate::event_loop::{Flow, Frontend};
use crate::inject::{Injector, Keystroke};
use crate::screen::{DisplayMode, Screen};
use crate::session::Session;
use crate::{Device, Event, Key, Result};
use log::info;

const HELP: &[(u16, &str)] = &[
    (1, "WiiClicker"),
    (3, "b: Show battery percentage"),
    (4, "r: Toggle rumble motor"),
    (5, "q: Quit application"),
];
const MESSAGE_ROW: u16 = 7;
const STATUS_ROW: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Rumble,
    Battery,
}

pub struct Clicker<I> {
    injector: I,
}

impl<I: Injector> Clicker<I> {
    pub fn new(injector: I) -> Self {
        Self { injector }
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    fn message<S: Screen>(&self, screen: &mut S, title: &str, detail: &str) -> Result<()> {
        screen.print_at(MESSAGE_ROW, 0, &format!("{title:<79}"))?;
        screen.print_at(MESSAGE_ROW + 1, 0, &format!("{detail:<79}"))?;
        Ok(())
    }

    fn battery<D: Device, S: Screen>(&self, session: &Session<D>, screen: &mut S) -> Result<()> {
        match session.device.battery() {
            Some(capacity) => self.message(screen, &format!("Battery: {capacity:3}%"), ""),
            None => self.message(screen, "Battery: unknown", ""),
        }
    }
}

pub fn button_name(key: Key) -> &'static str {
    match key {
        Key::Left => "D-Pad Left",
        Key::Right => "D-Pad Right",
        Key::Up => "D-Pad Up",
        Key::Down => "D-Pad Down",
        Key::A => "A button",
        Key::B => "B button",
        Key::Plus => "Plus button",
        Key::Minus => "Minus button",
        Key::Home => "Home button",
        Key::One => "One button",
        Key::Two => "Two button",
    }
}

impl<I: Injector> Frontend for Clicker<I> {
    type Command = Command;

    fn command(c: char) -> Option<Command> {
        match c {
            'q' => Some(Command::Quit),
            'r' => Some(Command::Rumble),
            'b' => Some(Command::Battery),
            _ => None,
        }
    }

    fn draw_layout<D: Device, S: Screen>(
        &mut self,
        _mode: DisplayMode,
        session: &mut Session<D>,
        screen: &mut S,
    ) -> Result<()> {
        for (row, text) in HELP {
            screen.print_at(*row, 0, text)?;
        }
        self.battery(session, screen)
    }

    fn on_event<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        event: Event,
    ) -> Result<()> {
        match event {
            Event::Key { key, pressed: true } => {
                let stroke = Keystroke::for_key(key);
                info!("{key:?} -> {stroke:?}");
                self.injector.send(stroke)?;
                let detail = format!("{} - {} key press simulated", button_name(key), stroke.label());
                self.message(screen, "Wii Remote button pressed:", &detail)
            }
            Event::Watch => self.battery(session, screen),
            _ => Ok(()),
        }
    }

    fn on_command<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        command: Command,
    ) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Rumble => {
                let on = session.toggle_rumble()?;
                let state = if on { "Rumble on" } else { "Rumble off" };
                self.message(screen, "Toggled Rumble:", state)?;
            }
            Command::Battery => {
                session.device.refresh()?;
                self.battery(session, screen)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn status<S: Screen>(&mut self, screen: &mut S, message: &str) -> Result<()> {
        screen.print_at(STATUS_ROW, 0, &format!("{message:<79.79}"))?;
        Ok(())
    }
}
