use crate::consts::*;
use crate::{
    Acceleration, ButtonState, Event, Extension, IRObject, Interfaces, Leds, MotionPlus,
    RegisterRead, Result, Status, Transport, Wiimote,
};
use log::{debug, trace, warn};
use std::time::Duration;

/// One input report, parsed but not yet applied to device state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    Data {
        buttons: ButtonState,
        accel: Option<Acceleration>,
        ir: Option<[Option<IRObject>; 4]>,
        extension: Option<[u8; 6]>,
    },
    Status {
        buttons: ButtonState,
        status: Status,
    },
    ReadData {
        buttons: ButtonState,
        address: u16,
        error: u8,
        data: [u8; 16],
        len: usize,
    },
    Ack {
        report: u8,
        error: u8,
    },
}

/// Byte offsets of accelerometer, IR and extension data per data report type.
fn data_layout(ty: u8) -> Option<(Option<usize>, Option<usize>, Option<usize>)> {
    Some(match ty {
        TY_CORE_BUTTONS => (None, None, None),
        TY_CORE_BUTTONS_ACCELEROMETER => (Some(3), None, None),
        TY_CORE_BUTTONS_EXTENSION8 => (None, None, Some(3)),
        TY_CORE_BUTTONS_ACCELEROMETER_EXTENSION16 => (Some(3), None, Some(6)),
        TY_CORE_BUTTONS_IR10_EXTENSION9 => (None, Some(3), Some(13)),
        TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6 => (Some(3), Some(6), Some(16)),
        _ => return None,
    })
}

impl Report {
    /// Parse a raw input report. Returns `None` for unknown or truncated reports.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let ty = *buf.first()?;
        let buttons = ButtonState::from_flags(buf.get(1..3)?.try_into().ok()?);
        match ty {
            TY_STATUS_INFORMATION => {
                let flags = *buf.get(3)?;
                let raw = *buf.get(6)?;
                Some(Report::Status {
                    buttons,
                    status: Status {
                        battery: (raw as u16 * 100 / 255) as u8,
                        leds: Leds::from_bits_truncate(flags >> 4),
                        extension_connected: flags & FL_STATUS_EXTENSION != 0,
                        battery_low: flags & FL_STATUS_BATTERY_LOW != 0,
                    },
                })
            }
            TY_READ_MEMORY_AND_REGISTERS_DATA => {
                let se = *buf.get(3)?;
                let address = u16::from_be_bytes(buf.get(4..6)?.try_into().ok()?);
                let len = ((se >> 4) as usize + 1).min(buf.len().saturating_sub(6));
                let mut data = [0; 16];
                data[..len].copy_from_slice(&buf[6..6 + len]);
                Some(Report::ReadData {
                    buttons,
                    address,
                    error: se & 0x0f,
                    data,
                    len,
                })
            }
            TY_RESULT => Some(Report::Ack {
                report: *buf.get(3)?,
                error: *buf.get(4)?,
            }),
            _ => {
                let (accel, ir, ext) = data_layout(ty)?;
                let accel = match accel {
                    Some(_) if buf.len() >= 6 => Some(Acceleration::from_report(buf)),
                    Some(_) => return None,
                    None => None,
                };
                let ir = match ir {
                    Some(o) => Some(IRObject::from_basic(buf.get(o..o + 10)?.try_into().ok()?)),
                    None => None,
                };
                let extension = match ext {
                    Some(o) => Some(<[u8; 6]>::try_from(buf.get(o..o + 6)?).ok()?),
                    None => None,
                };
                Some(Report::Data {
                    buttons,
                    accel,
                    ir,
                    extension,
                })
            }
        }
    }
}

impl<T: Transport> Wiimote<T> {
    /// Read one event from the wiimote, blocking for at most `timeout`.
    pub fn read(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if let Some(ev) = self.out.pop_front() {
            return Ok(Some(ev));
        }
        let mut buf = [0u8; 32];
        let size = self.device.recv(&mut buf, timeout)?;
        if size == 0 {
            return Ok(None);
        }
        trace!("recv {:02x?}", &buf[..size]);
        match Report::parse(&buf[..size]) {
            Some(report) => self.apply(report)?,
            None => warn!("unknown report type: {:02x}", buf[0]),
        }
        Ok(self.out.pop_front())
    }

    fn apply_buttons(&mut self, buttons: ButtonState) {
        if self.opened.contains(Interfaces::CORE) {
            self.out.extend(buttons.changes(&self.buttons));
        }
        self.buttons = buttons;
    }

    fn apply(&mut self, report: Report) -> Result<()> {
        match report {
            Report::Data {
                buttons,
                accel,
                ir,
                extension,
            } => {
                self.apply_buttons(buttons);
                if let Some(a) = accel.filter(|_| self.opened.contains(Interfaces::ACCEL)) {
                    self.out.push_back(Event::Accel(a));
                }
                if let Some(o) = ir.filter(|_| self.opened.contains(Interfaces::IR)) {
                    self.out.push_back(Event::Ir(o));
                }
                if let Some(e) = extension.filter(|_| self.motion_plus_active) {
                    if let Some(mp) = MotionPlus::from_extension(e) {
                        self.out.push_back(Event::MotionPlus(mp));
                    }
                }
            }
            Report::Status { buttons, status } => {
                self.apply_buttons(buttons);
                let was_connected = self.status.is_some_and(|s| s.extension_connected);
                debug!("status {status:?}");
                self.status = Some(status);
                if status.extension_connected && !was_connected {
                    if !self.motion_plus_active {
                        self.write_registers(REG_EXTENSION_INIT1, &[VA_EXTENSION_INIT1])?;
                        self.write_registers(REG_EXTENSION_INIT2, &[VA_EXTENSION_INIT2])?;
                    }
                    self.request_read(RegisterRead::ExtensionId, REG_EXTENSION_ID, 6)?;
                } else if !status.extension_connected {
                    self.extension = Extension::None;
                }
                // a status report resets the reporting mode
                self.apply_reporting()?;
                self.out.push_back(Event::Watch);
            }
            Report::ReadData {
                buttons,
                address,
                error,
                data,
                len,
            } => {
                self.apply_buttons(buttons);
                let Some(read) = self.reads.pop_front() else {
                    warn!("unexpected register data at {address:04x}");
                    return Ok(());
                };
                let id: Option<[u8; 6]> = (error == 0 && len >= 6)
                    .then(|| data[..6].try_into().ok())
                    .flatten();
                debug!("{read:?} at {address:04x}: error {error}, {id:02x?}");
                match read {
                    RegisterRead::MotionPlusProbe => {
                        if id.is_some_and(is_motion_plus_id) {
                            self.available |= Interfaces::MOTION_PLUS;
                        }
                    }
                    RegisterRead::ExtensionId => {
                        self.extension = id.map(Extension::from_id).unwrap_or(Extension::None);
                    }
                }
                self.out.push_back(Event::Watch);
            }
            Report::Ack { report, error } => {
                if error != 0 {
                    warn!("report {report:02x} failed with {error}");
                }
            }
        }
        Ok(())
    }
}

fn is_motion_plus_id(id: [u8; 6]) -> bool {
    id[3] == 0x20 && id[5] == 0x05
}

impl ButtonState {
    // Parse ButtonState from the first two bytes of the report
    #[rustfmt::skip]
    pub fn from_flags([x, y]: [u8; 2]) -> Self {
        Self {
            d_pad_left:  x & 0b00000001 != 0,
            d_pad_right: x & 0b00000010 != 0,
            d_pad_down:  x & 0b00000100 != 0,
            d_pad_up:    x & 0b00001000 != 0,
            plus:        x & 0b00010000 != 0,
            two:         y & 0b00000001 != 0,
            one:         y & 0b00000010 != 0,
            b:           y & 0b00000100 != 0,
            a:           y & 0b00001000 != 0,
            minus:       y & 0b00010000 != 0,
            home:        y & 0b10000000 != 0,
        }
    }
}

impl IRObject {
    // Parse a pair or detections from 5 bytes like in the 10-byte report.
    fn from_basic_pair(r: [u8; 5]) -> [Option<Self>; 2] {
        [
            if r[0] == 0xff && r[1] == 0xff {
                None
            } else {
                Some(Self {
                    x: r[0] as u16 | ((r[2] & 0b00110000) as u16) << 4,
                    y: r[1] as u16 | ((r[2] & 0b11000000) as u16) << 2,
                })
            },
            if r[3] == 0xff && r[4] == 0xff {
                None
            } else {
                Some(Self {
                    x: r[3] as u16 | ((r[2] & 0b00000011) as u16) << 8,
                    y: r[4] as u16 | ((r[2] & 0b00001100) as u16) << 6,
                })
            },
        ]
    }

    // Parse objects from 10-byte report
    pub fn from_basic(r: [u8; 10]) -> [Option<Self>; 4] {
        let [a, b] = Self::from_basic_pair([r[0], r[1], r[2], r[3], r[4]]);
        let [c, d] = Self::from_basic_pair([r[5], r[6], r[7], r[8], r[9]]);
        [a, b, c, d]
    }
}

impl Acceleration {
    /// Parse acceleration from report format
    pub fn from_report(r: &[u8]) -> Self {
        Acceleration {
            x: ((r[3] as i16 - 0x80) * 2) + (((r[1] & 0b01100000) as i16) >> 5),
            y: ((r[4] as i16 - 0x80) * 2) + (((r[2] & 0b00100000) as i16) >> 5),
            z: ((r[5] as i16 - 0x80) * 2) + (((r[2] & 0b01000000) as i16) >> 6),
        }
    }
}

const MOTION_PLUS_CENTER: i32 = 0x2000;

impl MotionPlus {
    /// Parse gyro rates from 6 extension bytes. Returns `None` when the bytes
    /// are pass-through extension data instead of Motion Plus data.
    pub fn from_extension(e: [u8; 6]) -> Option<Self> {
        if e[5] & 0b10 == 0 {
            return None;
        }
        let axis = |lo: u8, hi: u8, slow: bool| {
            let v = (lo as i32 | ((hi & 0b11111100) as i32) << 6) - MOTION_PLUS_CENTER;
            if slow {
                v
            } else {
                v * 2000 / 440
            }
        };
        Some(Self {
            yaw: axis(e[0], e[3], e[3] & 0b10 != 0),
            roll: axis(e[1], e[4], e[4] & 0b10 != 0),
            pitch: axis(e[2], e[5], e[3] & 0b01 != 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{wiimote, Wire};
    use crate::Key;

    fn read_data(id: [u8; 6], error: u8) -> Report {
        let mut data = [0; 16];
        data[..6].copy_from_slice(&id);
        Report::ReadData {
            buttons: ButtonState::default(),
            address: 0x00fa,
            error,
            data,
            len: 6,
        }
    }

    fn status(extension_connected: bool) -> Report {
        Report::Status {
            buttons: ButtonState::default(),
            status: Status {
                battery: 50,
                extension_connected,
                ..Default::default()
            },
        }
    }

    fn events(w: &mut Wiimote<Wire>) -> Vec<Event> {
        w.out.drain(..).collect()
    }

    #[test]
    fn parse_buttons() {
        let r = Report::parse(&[TY_CORE_BUTTONS, 0b00001001, 0b10001000]).unwrap();
        let Report::Data { buttons, accel, ir, extension } = r else {
            panic!("{r:?}")
        };
        assert!(buttons.pressed(Key::Left));
        assert!(buttons.pressed(Key::Up));
        assert!(buttons.pressed(Key::A));
        assert!(buttons.pressed(Key::Home));
        assert!(!buttons.pressed(Key::B));
        assert_eq!((accel, ir, extension), (None, None, None));
    }

    #[test]
    fn parse_accel_ir_ext() {
        let mut buf = [0u8; 22];
        buf[0] = TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6;
        buf[3..6].copy_from_slice(&[0x80, 0x81, 0x7f]);
        buf[6..16].copy_from_slice(&[0x10, 0x20, 0b0101_0000, 0xff, 0xff, 0xff, 0xff, 0, 0xff, 0xff]);
        buf[16..22].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        let Some(Report::Data { accel, ir, extension, .. }) = Report::parse(&buf) else {
            panic!()
        };
        assert_eq!(accel, Some(Acceleration { x: 0, y: 2, z: -2 }));
        let ir = ir.unwrap();
        assert_eq!(ir[0].map(|o| (o.x, o.y)), Some((0x110, 0x120)));
        assert_eq!(ir[1], None);
        assert_eq!(ir[2], None);
        assert_eq!(ir[3], None);
        assert_eq!(extension, Some([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn parse_truncated() {
        assert_eq!(Report::parse(&[]), None);
        assert_eq!(Report::parse(&[TY_CORE_BUTTONS]), None);
        assert_eq!(Report::parse(&[TY_CORE_BUTTONS_ACCELEROMETER, 0, 0, 0x80]), None);
        assert_eq!(Report::parse(&[0x99, 0, 0]), None);
    }

    #[test]
    fn parse_status() {
        let r = Report::parse(&[TY_STATUS_INFORMATION, 0, 0, 0b1001_0010, 0, 0, 0xff]);
        assert_eq!(
            r,
            Some(Report::Status {
                buttons: ButtonState::default(),
                status: Status {
                    battery: 100,
                    leds: Leds::LED1 | Leds::LED4,
                    extension_connected: true,
                    battery_low: false,
                },
            })
        );
    }

    #[test]
    fn parse_read_data() {
        let mut buf = [0u8; 22];
        buf[0] = TY_READ_MEMORY_AND_REGISTERS_DATA;
        buf[3] = 0x50;
        buf[4..6].copy_from_slice(&[0x00, 0xfa]);
        buf[6..12].copy_from_slice(&[0, 0, 0xa6, 0x20, 0, 0x05]);
        let Some(Report::ReadData { address, error, data, len, .. }) = Report::parse(&buf) else {
            panic!()
        };
        assert_eq!((address, error, len), (0x00fa, 0, 6));
        assert!(is_motion_plus_id(data[..6].try_into().unwrap()));
    }

    #[test]
    fn motion_plus_samples() {
        // centered, slow mode on every axis
        let e = [0x00, 0x00, 0x00, 0x80 | 0b11, 0x80 | 0b10, 0x80 | 0b10];
        assert_eq!(MotionPlus::from_extension(e), Some(MotionPlus::default()));

        // yaw +100 in fast mode
        let e = [100, 0x00, 0x00, 0x80 | 0b01, 0x80 | 0b10, 0x80 | 0b10];
        assert_eq!(MotionPlus::from_extension(e).unwrap().yaw, 100 * 2000 / 440);

        // pass-through data is not motion plus
        assert_eq!(MotionPlus::from_extension([0; 6]), None);
    }

    #[test]
    fn probes_on_open() {
        let w = wiimote();
        assert_eq!(
            w.device.sent[0],
            [TY_READ_MEMORY_AND_REGISTERS, 0x04, 0xa6, 0x00, 0xfa, 0x00, 0x06]
        );
        assert_eq!(w.device.sent[1], [TY_STATUS_INFORMATION_REQUEST, 0x00]);
        assert!(!w.available.contains(Interfaces::MOTION_PLUS));
    }

    #[test]
    fn motion_plus_available_after_probe() {
        let mut w = wiimote();
        w.apply(read_data([0, 0, 0xa6, 0x20, 0x00, 0x05], 0)).unwrap();
        assert!(w.available.contains(Interfaces::MOTION_PLUS));
        assert_eq!(events(&mut w), [Event::Watch]);
        assert!(w.reads.is_empty());
    }

    #[test]
    fn failed_probe_keeps_motion_plus_unavailable() {
        let mut w = wiimote();
        w.apply(read_data([0xff; 6], 7)).unwrap();
        assert!(!w.available.contains(Interfaces::MOTION_PLUS));
        assert_eq!(events(&mut w), [Event::Watch]);
    }

    #[test]
    fn extension_connect_initialises_and_reads_id() {
        let mut w = wiimote();
        w.device.sent.clear();
        w.apply(status(true)).unwrap();
        let sent = &w.device.sent;
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0][..7], [TY_WRITE_MEMORY_AND_REGISTERS, 0x04, 0xa4, 0x00, 0xf0, 1, 0x55]);
        assert_eq!(sent[1][..7], [TY_WRITE_MEMORY_AND_REGISTERS, 0x04, 0xa4, 0x00, 0xfb, 1, 0x00]);
        assert_eq!(sent[2], [TY_READ_MEMORY_AND_REGISTERS, 0x04, 0xa4, 0x00, 0xfa, 0x00, 0x06]);
        assert_eq!(sent[3], [TY_DATA_REPORTING_MODE, 0x00, TY_CORE_BUTTONS]);
        assert_eq!(events(&mut w), [Event::Watch]);

        // answers arrive in request order: the probe from opening, then the id
        w.apply(read_data([0xff; 6], 7)).unwrap();
        assert_eq!(w.extension, Extension::None);
        w.apply(read_data([0x00, 0x00, 0xa4, 0x20, 0x00, 0x00], 0)).unwrap();
        assert_eq!(w.extension, Extension::Nunchuk);
        assert!(!w.available.contains(Interfaces::MOTION_PLUS));
        assert_eq!(events(&mut w), [Event::Watch, Event::Watch]);

        w.apply(status(false)).unwrap();
        assert_eq!(w.extension, Extension::None);
    }

    #[test]
    fn extension_left_alone_while_motion_plus_is_active() {
        let mut w = wiimote();
        w.motion_plus_active = true;
        w.device.sent.clear();
        w.apply(status(true)).unwrap();
        assert_eq!(w.device.sent[0][0], TY_READ_MEMORY_AND_REGISTERS);
        assert!(w.device.sent.iter().all(|r| r[0] != TY_WRITE_MEMORY_AND_REGISTERS));
    }

    #[test]
    fn every_status_report_restores_reporting() {
        let mut w = wiimote();
        w.opened |= Interfaces::CORE | Interfaces::ACCEL;
        for _ in 0..2 {
            w.device.sent.clear();
            w.apply(status(false)).unwrap();
            assert_eq!(
                w.device.sent,
                [vec![TY_DATA_REPORTING_MODE, 0x04, TY_CORE_BUTTONS_ACCELEROMETER]]
            );
            assert_eq!(events(&mut w), [Event::Watch]);
        }
        assert_eq!(w.status.map(|s| s.battery), Some(50));
    }

    #[test]
    fn unexpected_register_data_is_dropped() {
        let mut w = wiimote();
        w.reads.clear();
        w.apply(read_data([0, 0, 0xa6, 0x20, 0x00, 0x05], 0)).unwrap();
        assert!(!w.available.contains(Interfaces::MOTION_PLUS));
        assert!(events(&mut w).is_empty());
    }

    #[test]
    fn data_follows_opened_interfaces() {
        let accel = Acceleration { x: 1, y: 2, z: 3 };
        let report = Report::Data {
            buttons: ButtonState {
                a: true,
                ..Default::default()
            },
            accel: Some(accel),
            ir: Some([None; 4]),
            extension: Some([0x00, 0x00, 0x00, 0x83, 0x82, 0x82]),
        };
        let mut w = wiimote();
        w.apply(report).unwrap();
        assert!(events(&mut w).is_empty());

        w.opened |= Interfaces::CORE | Interfaces::ACCEL;
        w.motion_plus_active = true;
        w.buttons = ButtonState::default();
        w.apply(report).unwrap();
        assert_eq!(
            events(&mut w),
            [
                Event::Key { key: Key::A, pressed: true },
                Event::Accel(accel),
                Event::MotionPlus(MotionPlus::default()),
            ]
        );

        // unchanged buttons produce no key events
        w.apply(report).unwrap();
        assert_eq!(events(&mut w).len(), 2);
    }
}
