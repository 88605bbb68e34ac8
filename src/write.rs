use crate::{
    consts::*, Error, Interfaces, Leds, RegisterRead, ReportingMode, Result, Transport, Wiimote,
};
use log::{debug, trace};
use std::{thread::sleep, time::Duration};

/// Actions control outputs like rumble, player leds, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Sets the reporting mode, required to receive the data you need.
    SetReporting(ReportingMode),
    /// Enables the IR Camera in basic mode, or disables it. Requires 50ms to perform.
    IRCameraEnable(bool),
    /// Activates the Motion Plus, or hands the extension port back to a plugged extension.
    MotionPlusEnable(bool),
    /// Set player LEDs.
    PlayerLeds(Leds),
    /// Enables/Disables rumble
    RumbleEnable(bool),
    /// Asks for a status report (battery, LEDs, extension).
    RequestStatus,
}

impl<T: Transport> Wiimote<T> {
    /// Sends a packet with the rumble bit set to `rumble`.
    fn send(&mut self, bytes: &mut [u8], rumble: bool) -> Result<()> {
        if rumble {
            bytes[1] |= 1;
        } else {
            bytes[1] &= !1;
        }
        trace!("send {bytes:02x?}");
        self.device.send(bytes)
    }

    /// Sends a packet to the wiimote and makes sure that we dont influence rumble :)
    fn write_inner(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.send(bytes, self.rumble)
    }

    /// Writes data to wiimotes internal registers or memory.
    pub fn write_registers(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        let mut bytes = [0; 22];
        bytes[0] = TY_WRITE_MEMORY_AND_REGISTERS;
        bytes[1] = 0x04;
        bytes[2..5].copy_from_slice(&addr.to_be_bytes()[1..]);
        let data_len = 16.min(data.len());
        bytes[5] = data_len as u8;
        bytes[6..6 + data_len].copy_from_slice(&data[0..data_len]);
        self.write_inner(&mut bytes)?;
        sleep(Duration::from_millis(10));
        Ok(())
    }

    /// Requests `size` bytes of registers. The answer is matched to `read` when it arrives.
    pub(crate) fn request_read(&mut self, read: RegisterRead, addr: u32, size: u16) -> Result<()> {
        let mut bytes = [0; 7];
        bytes[0] = TY_READ_MEMORY_AND_REGISTERS;
        bytes[1] = 0x04;
        bytes[2..5].copy_from_slice(&addr.to_be_bytes()[1..]);
        bytes[5..7].copy_from_slice(&size.to_be_bytes());
        self.write_inner(&mut bytes)?;
        self.reads.push_back(read);
        Ok(())
    }

    pub fn request_status(&mut self) -> Result<()> {
        self.write(Action::RequestStatus)
    }

    /// Enable/Disable a feature
    fn set_enabled(&mut self, feature: u8, enable: bool) -> Result<()> {
        self.write_inner(&mut [
            feature,
            if enable {
                VA_FEATURE_ENABLE
            } else {
                VA_FEATURE_DISABLE
            },
        ])
    }

    /// Re-sends the reporting mode matching the opened interfaces.
    pub(crate) fn apply_reporting(&mut self) -> Result<()> {
        self.write(Action::SetReporting(ReportingMode::for_interfaces(self.opened)))
    }

    /// Send an action to the wiimote. (Enabling the camera takes 50ms)
    /// Cached state only changes once the device took the report.
    pub fn write(&mut self, a: Action) -> Result<()> {
        debug!("{a:?}");
        match a {
            Action::RumbleEnable(enable) => {
                self.send(&mut [TY_RUMBLE, 0], enable)?;
                self.rumble = enable;
                Ok(())
            }
            Action::IRCameraEnable(true) => {
                self.set_enabled(TY_IR_CAMERA_PIXEL_CLOCK_ENABLE, true)?;
                self.set_enabled(TY_IR_CAMERA_CHIP_ENABLE, true)?;
                self.write_registers(REG_IR, &[0x01])?;
                sleep(Duration::from_millis(50)); // wiibrew wiki says this might help...
                self.write_registers(REG_IR_SENS_BLOCK1, &IR_SENS_BLOCK1)?;
                self.write_registers(REG_IR_SENS_BLOCK2, &IR_SENS_BLOCK2)?;
                self.write_registers(REG_IR_MODE, &[VA_IR_MODE_BASIC])?;
                self.write_registers(REG_IR, &[0x08])
            }
            Action::IRCameraEnable(false) => {
                self.set_enabled(TY_IR_CAMERA_CHIP_ENABLE, false)?;
                self.set_enabled(TY_IR_CAMERA_PIXEL_CLOCK_ENABLE, false)
            }
            Action::MotionPlusEnable(enable) => {
                if enable {
                    self.write_registers(REG_MOTION_PLUS_INIT, &[VA_EXTENSION_INIT1])?;
                    self.write_registers(REG_MOTION_PLUS_ACTIVATE, &[VA_MOTION_PLUS_STANDALONE])?;
                } else {
                    self.write_registers(REG_EXTENSION_INIT1, &[VA_EXTENSION_INIT1])?;
                }
                self.motion_plus_active = enable;
                Ok(())
            }
            Action::PlayerLeds(leds) => {
                self.write_inner(&mut [TY_PLAYER_LEDS, leds.bits() << 4])?;
                if let Some(status) = &mut self.status {
                    status.leds = leds;
                }
                Ok(())
            }
            Action::RequestStatus => self.write_inner(&mut [TY_STATUS_INFORMATION_REQUEST, 0x00]),
            Action::SetReporting(r) => {
                let continuous = if r == ReportingMode::Buttons {
                    0x00
                } else {
                    VA_REPORTING_CONTINUOUS
                };
                self.write_inner(&mut [TY_DATA_REPORTING_MODE, continuous, r as u8])
            }
        }
    }

    /// Opens the given interfaces. Everything must be in [`Wiimote::available`].
    pub fn open(&mut self, ifaces: Interfaces) -> Result<()> {
        let missing = ifaces - self.available;
        if !missing.is_empty() {
            return Err(Error::Unavailable(missing));
        }
        let new = ifaces - self.opened;
        if new.contains(Interfaces::IR) {
            self.write(Action::IRCameraEnable(true))?;
        }
        if new.contains(Interfaces::MOTION_PLUS) {
            self.write(Action::MotionPlusEnable(true))?;
        }
        self.opened |= new;
        self.apply_reporting()
    }

    pub fn close(&mut self, ifaces: Interfaces) -> Result<()> {
        let old = ifaces & self.opened;
        if old.contains(Interfaces::IR) {
            self.write(Action::IRCameraEnable(false))?;
        }
        if old.contains(Interfaces::MOTION_PLUS) {
            self.write(Action::MotionPlusEnable(false))?;
        }
        self.opened -= old;
        self.apply_reporting()
    }
}
