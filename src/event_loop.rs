//! The wait-dispatch-redraw loop shared by every front end.

use crate::screen::{DisplayMode, Screen};
use crate::session::Session;
use crate::{Device, Event, Result};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use log::{debug, trace};
use std::time::Duration;

/// How long one device read may block before the keyboard is checked again.
pub const DEVICE_SLICE: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Resize,
}

/// Source of terminal keypresses.
pub trait Keyboard {
    /// Waits at most `timeout` for one input, forever if `None`.
    fn poll_input(&mut self, timeout: Option<Duration>) -> std::io::Result<Option<Input>>;
}

/// Reads keys from the crossterm event queue. Ctrl-C counts as `q`.
pub struct TerminalKeyboard;

impl Keyboard for TerminalKeyboard {
    fn poll_input(&mut self, timeout: Option<Duration>) -> std::io::Result<Option<Input>> {
        loop {
            if let Some(t) = timeout {
                if !event::poll(t)? {
                    return Ok(None);
                }
            }
            match event::read()? {
                TermEvent::Resize(..) => return Ok(Some(Input::Resize)),
                TermEvent::Key(k) if k.kind != KeyEventKind::Release => match k.code {
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Some(Input::Char('q')))
                    }
                    KeyCode::Char(c) => return Ok(Some(Input::Char(c))),
                    _ => {}
                },
                _ => {}
            }
            // something we do not care about; only keep waiting if blocking
            if timeout.is_some() {
                return Ok(None);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One program built on the loop: its command table and its drawing.
pub trait Frontend {
    type Command: Copy + std::fmt::Debug;

    /// The keyboard dispatch table.
    fn command(c: char) -> Option<Self::Command>;

    /// Draws the static layout for `mode` on an erased screen.
    fn draw_layout<D: Device, S: Screen>(
        &mut self,
        mode: DisplayMode,
        session: &mut Session<D>,
        screen: &mut S,
    ) -> Result<()>;

    fn on_event<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        event: Event,
    ) -> Result<()>;

    fn on_command<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        command: Self::Command,
    ) -> Result<Flow>;

    /// Shows a one-line message, e.g. a recoverable error.
    fn status<S: Screen>(&mut self, screen: &mut S, message: &str) -> Result<()>;
}

enum Ready {
    Input(Input),
    Event(Event),
}

pub struct EventLoop<D, K, S> {
    pub session: Session<D>,
    pub keyboard: K,
    pub screen: S,
}

impl<D: Device, K: Keyboard, S: Screen> EventLoop<D, K, S> {
    pub fn new(session: Session<D>, keyboard: K, screen: S) -> Self {
        Self {
            session,
            keyboard,
            screen,
        }
    }

    /// Runs until the front end quits or a fatal error happens.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> Result<()> {
        self.redraw(frontend)?;
        loop {
            let ready = match self.wait() {
                Ok(r) => r,
                Err(e) if e.is_interrupted() => continue,
                Err(e) => return Err(e),
            };
            let res = match ready {
                Ready::Event(event) if self.session.freeze => {
                    trace!("frozen, dropping {event:?}");
                    Ok(Flow::Continue)
                }
                Ready::Event(event) => frontend
                    .on_event(&mut self.session, &mut self.screen, event)
                    .map(|_| Flow::Continue),
                Ready::Input(Input::Resize) => self.redraw(frontend).map(|_| Flow::Continue),
                Ready::Input(Input::Char(c)) => match F::command(c) {
                    Some(command) => {
                        debug!("command {command:?}");
                        frontend.on_command(&mut self.session, &mut self.screen, command)
                    }
                    None => Ok(Flow::Continue),
                },
            };
            match res {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => frontend.status(&mut self.screen, &e.to_string())?,
            }
            self.screen.flush()?;
        }
    }

    /// Recomputes the display mode and draws everything from scratch.
    fn redraw<F: Frontend>(&mut self, frontend: &mut F) -> Result<()> {
        let (cols, rows) = self.screen.size()?;
        let mode = DisplayMode::from_size(cols, rows);
        debug!("{cols}x{rows}: {mode:?}");
        self.screen.erase()?;
        frontend.draw_layout(mode, &mut self.session, &mut self.screen)?;
        self.screen.flush()?;
        Ok(())
    }

    /// Blocks until a key or a device event is ready.
    fn wait(&mut self) -> Result<Ready> {
        loop {
            if let Some(input) = self.keyboard.poll_input(Some(Duration::ZERO))? {
                return Ok(Ready::Input(input));
            }
            if let Some(event) = self.session.device.read_event(DEVICE_SLICE)? {
                return Ok(Ready::Event(event));
            }
        }
    }

    /// Keeps `message` on screen until any key is pressed.
    pub fn hold(&mut self, message: &str) -> Result<()> {
        let (_, rows) = self.screen.size()?;
        self.screen.print_at(rows.saturating_sub(1), 0, message)?;
        self.screen.flush()?;
        self.keyboard.poll_input(None)?;
        Ok(())
    }
}
