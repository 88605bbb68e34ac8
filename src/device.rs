use crate::{Action, DeviceType, Event, Extension, Interfaces, Leds, Result, Wiimote};
use hidapi::HidDevice;
use std::time::Duration;

/// Raw report channel below a [`Wiimote`].
pub trait Transport {
    fn send(&mut self, report: &[u8]) -> Result<()>;
    /// Reads one input report into `buf`. Returns 0 when `timeout` passes first.
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

impl Transport for HidDevice {
    fn send(&mut self, report: &[u8]) -> Result<()> {
        self.write(report)?;
        Ok(())
    }
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let millis = timeout.as_millis().min(i32::MAX as u128) as i32;
        Ok(self.read_timeout(buf, millis)?)
    }
}

/// What the event loop and the front ends need from a controller.
pub trait Device {
    /// Pull one decoded event, waiting at most `timeout`.
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;

    fn available(&self) -> Interfaces;
    fn opened(&self) -> Interfaces;
    fn open(&mut self, ifaces: Interfaces) -> Result<()>;
    fn close(&mut self, ifaces: Interfaces) -> Result<()>;

    fn rumble(&mut self, on: bool) -> Result<()>;
    fn set_leds(&mut self, leds: Leds) -> Result<()>;
    /// Last known LED state, `None` until the first status report.
    fn leds(&self) -> Option<Leds>;

    /// Ask for fresh static values. They arrive with the next [`Event::Watch`].
    fn refresh(&mut self) -> Result<()>;
    /// Battery capacity in percent, `None` until the first status report.
    fn battery(&self) -> Option<u8>;
    fn battery_low(&self) -> bool;
    fn device_type(&self) -> DeviceType;
    fn extension(&self) -> Extension;
}

impl<T: Transport> Device for Wiimote<T> {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        self.read(timeout)
    }
    fn available(&self) -> Interfaces {
        self.available
    }
    fn opened(&self) -> Interfaces {
        self.opened
    }
    fn open(&mut self, ifaces: Interfaces) -> Result<()> {
        Wiimote::open(self, ifaces)
    }
    fn close(&mut self, ifaces: Interfaces) -> Result<()> {
        Wiimote::close(self, ifaces)
    }
    fn rumble(&mut self, on: bool) -> Result<()> {
        self.write(Action::RumbleEnable(on))
    }
    fn set_leds(&mut self, leds: Leds) -> Result<()> {
        self.write(Action::PlayerLeds(leds))
    }
    fn leds(&self) -> Option<Leds> {
        self.status.map(|s| s.leds)
    }
    fn refresh(&mut self) -> Result<()> {
        self.request_status()
    }
    fn battery(&self) -> Option<u8> {
        self.status.map(|s| s.battery)
    }
    fn battery_low(&self) -> bool {
        self.status.is_some_and(|s| s.battery_low)
    }
    fn device_type(&self) -> DeviceType {
        self.kind
    }
    fn extension(&self) -> Extension {
        self.extension
    }
}
