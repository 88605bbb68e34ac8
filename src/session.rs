use crate::{Device, Interfaces, Leds, MotionPlus, Result};
use log::debug;

/// Feature toggles cached by the session, so a toggle knows its previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggles {
    pub leds: Leds,
    pub rumble: bool,
    /// Offset subtracted from every Motion Plus sample while set.
    pub motion_plus_offset: Option<MotionPlus>,
}

/// The one live device handle plus everything the loop mutates around it.
pub struct Session<D> {
    pub device: D,
    pub freeze: bool,
    pub toggles: Toggles,
    /// Interfaces the user wants open. Re-applied when availability changes.
    wanted: Interfaces,
    last_motion_plus: Option<MotionPlus>,
}

impl<D: Device> Session<D> {
    pub fn new(device: D) -> Self {
        let toggles = Toggles {
            leds: device.leds().unwrap_or_default(),
            ..Default::default()
        };
        Self {
            device,
            freeze: false,
            toggles,
            wanted: Interfaces::empty(),
            last_motion_plus: None,
        }
    }

    /// Remembers `wanted` and opens the part of it the device offers now.
    /// The rest is opened by [`Session::reopen`] once it becomes available.
    pub fn open_wanted(&mut self, wanted: Interfaces) -> Result<()> {
        self.wanted = wanted;
        self.reopen()
    }

    /// Opens wanted interfaces that became available since the last call.
    pub fn reopen(&mut self) -> Result<()> {
        let missing = (self.wanted & self.device.available()) - self.device.opened();
        if missing.is_empty() {
            return Ok(());
        }
        debug!("reopening {missing:?}");
        self.device.open(missing)
    }

    /// Returns whether the interface is open afterwards.
    pub fn toggle_interface(&mut self, iface: Interfaces) -> Result<bool> {
        if self.device.opened().contains(iface) {
            self.wanted -= iface;
            self.device.close(iface)?;
            Ok(false)
        } else {
            self.device.open(iface)?;
            self.wanted |= iface;
            Ok(true)
        }
    }

    /// Flips rumble. The cached state only changes if the device accepted it.
    pub fn toggle_rumble(&mut self) -> Result<bool> {
        let on = !self.toggles.rumble;
        self.device.rumble(on)?;
        self.toggles.rumble = on;
        Ok(on)
    }

    pub fn toggle_led(&mut self, led: Leds) -> Result<Leds> {
        let leds = self.toggles.leds ^ led;
        self.device.set_leds(leds)?;
        self.toggles.leds = leds;
        Ok(leds)
    }

    /// Picks up LED state reported by the device itself.
    pub fn sync_leds(&mut self) {
        if let Some(leds) = self.device.leds() {
            self.toggles.leds = leds;
        }
    }

    pub fn toggle_freeze(&mut self) -> bool {
        self.freeze = !self.freeze;
        self.freeze
    }

    /// Uses the last sample as the new zero, or drops the offset if one is set.
    pub fn toggle_normalization(&mut self) -> bool {
        self.toggles.motion_plus_offset = match self.toggles.motion_plus_offset {
            Some(_) => None,
            None => Some(self.last_motion_plus.unwrap_or_default()),
        };
        self.toggles.motion_plus_offset.is_some()
    }

    /// Records a raw sample and returns it with the offset applied.
    pub fn normalize(&mut self, sample: MotionPlus) -> MotionPlus {
        self.last_motion_plus = Some(sample);
        match self.toggles.motion_plus_offset {
            Some(offset) => sample - offset,
            None => sample,
        }
    }
}
