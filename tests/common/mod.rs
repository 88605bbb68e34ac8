#![allow(dead_code)]

use std::{collections::VecDeque, io, time::Duration};
use wiiclicker::{
    event_loop::{Input, Keyboard},
    inject::{Injector, Keystroke},
    DeviceType, Device, Error, Event, Extension, Interfaces, Leds, Result,
};

pub enum Step {
    Event(Event),
    Idle,
    Fail(io::ErrorKind),
}

/// Scripted controller. Reads return `Ok(None)` once the script runs out.
pub struct FakeDevice {
    pub script: VecDeque<Step>,
    pub available: Interfaces,
    pub opened: Interfaces,
    pub rumble: bool,
    pub fail_rumble: bool,
    pub leds: Option<Leds>,
    pub battery: Option<u8>,
    pub battery_low: bool,
    pub extension: Extension,
    pub refreshes: usize,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            available: Interfaces::CORE | Interfaces::ACCEL | Interfaces::IR | Interfaces::WRITABLE,
            opened: Interfaces::empty(),
            rumble: false,
            fail_rumble: false,
            leds: Some(Leds::LED1),
            battery: Some(87),
            battery_low: false,
            extension: Extension::None,
            refreshes: 0,
        }
    }

    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut d = Self::new();
        d.script = events.into_iter().map(Step::Event).collect();
        d
    }
}

impl Device for FakeDevice {
    fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        match self.script.pop_front() {
            Some(Step::Event(e)) => Ok(Some(e)),
            Some(Step::Idle) | None => Ok(None),
            Some(Step::Fail(kind)) => Err(Error::Io(kind.into())),
        }
    }
    fn available(&self) -> Interfaces {
        self.available
    }
    fn opened(&self) -> Interfaces {
        self.opened
    }
    fn open(&mut self, ifaces: Interfaces) -> Result<()> {
        let missing = ifaces - self.available;
        if !missing.is_empty() {
            return Err(Error::Unavailable(missing));
        }
        self.opened |= ifaces;
        Ok(())
    }
    fn close(&mut self, ifaces: Interfaces) -> Result<()> {
        self.opened -= ifaces;
        Ok(())
    }
    fn rumble(&mut self, on: bool) -> Result<()> {
        if self.fail_rumble {
            return Err(Error::NoSuchDevice("rumble".into()));
        }
        self.rumble = on;
        Ok(())
    }
    fn set_leds(&mut self, leds: Leds) -> Result<()> {
        self.leds = Some(leds);
        Ok(())
    }
    fn leds(&self) -> Option<Leds> {
        self.leds
    }
    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }
    fn battery(&self) -> Option<u8> {
        self.battery
    }
    fn battery_low(&self) -> bool {
        self.battery_low
    }
    fn device_type(&self) -> DeviceType {
        DeviceType::Gen20
    }
    fn extension(&self) -> Extension {
        self.extension
    }
}

/// Scripted keyboard. Once the script runs out it types `q`.
pub struct FakeKeyboard {
    pub script: VecDeque<io::Result<Option<Input>>>,
}

impl FakeKeyboard {
    pub fn new(inputs: impl IntoIterator<Item = Option<Input>>) -> Self {
        Self {
            script: inputs.into_iter().map(Ok).collect(),
        }
    }

    /// `n` idle polls, so the device gets `n` turns.
    pub fn idle(n: usize) -> Self {
        Self::new(std::iter::repeat(None).take(n))
    }
}

impl Keyboard for FakeKeyboard {
    fn poll_input(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Input>> {
        self.script
            .pop_front()
            .unwrap_or(Ok(Some(Input::Char('q'))))
    }
}

#[derive(Default)]
pub struct RecordingInjector {
    pub sent: Vec<Keystroke>,
}

impl Injector for RecordingInjector {
    fn send(&mut self, key: Keystroke) -> Result<()> {
        self.sent.push(key);
        Ok(())
    }
}

pub fn chars(s: &str) -> Vec<Option<Input>> {
    s.chars().map(|c| Some(Input::Char(c))).collect()
}
