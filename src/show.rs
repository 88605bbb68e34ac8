//! wiishow: draws the state of one remote in a fixed layout.

use crate::event_loop::{Flow, Frontend};
use crate::screen::{bar, scale, DisplayMode, Screen};
use crate::session::Session;
use crate::{Acceleration, Device, Event, IRObject, Interfaces, Key, Leds, MotionPlus, Result};

pub const ACCEL_RANGE: i32 = 128;
pub const MOTION_PLUS_RANGE: i32 = 8192;
pub const IR_WIDTH: i32 = 1024;
pub const IR_HEIGHT: i32 = 768;

const RULE: &str =
    "-------------------------------------------------------------------------------";

#[rustfmt::skip]
const LAYOUT: &[(u16, u16, &str)] = &[
    (0, 0, "wiishow - Wii Remote monitor"),
    (1, 0, RULE),
    (2, 1, "Keys"),
    (2, 32, "Accelerometer"),
    (3, 34, "X:"), (4, 34, "Y:"), (5, 34, "Z:"),
    (7, 32, "Motion Plus"),
    (8, 34, "Yaw:"), (9, 34, "Roll:"), (10, 34, "Pitch:"),
    (11, 0, RULE),
    (12, 1, "IR"),
    (13, 3, "#1"), (14, 3, "#2"), (15, 3, "#3"), (16, 3, "#4"),
    (12, 32, "Device"),
    (13, 34, "Battery:"), (14, 34, "LEDs:"), (15, 34, "Rumble:"),
    (16, 34, "Type:"), (17, 34, "Extension:"), (18, 34, "Open:"),
    (19, 0, RULE),
    (20, 1, "q quit   f freeze   s refresh   r rumble   1-4 LEDs"),
    (21, 1, "k keys   a accel    i IR        m motion plus   n normalize"),
];

#[rustfmt::skip]
const KEY_CELLS: [(Key, u16, u16); 11] = [
    (Key::Up, 3, 3), (Key::Down, 4, 3), (Key::Left, 5, 3), (Key::Right, 6, 3),
    (Key::Plus, 7, 3), (Key::Minus, 8, 3),
    (Key::A, 3, 16), (Key::B, 4, 16), (Key::One, 5, 16), (Key::Two, 6, 16),
    (Key::Home, 7, 16),
];
const KEY_MARK_OFFSET: u16 = 6;

const ACCEL_ROW: u16 = 3;
const MOTION_PLUS_ROW: u16 = 8;
const VALUE_COL: u16 = 41;
const BAR_COL: u16 = 49;
const BAR_WIDTH: u16 = 25;
const NORMALIZED: (u16, u16) = (7, 46);
const FROZEN: (u16, u16) = (0, 70);
const IR_ROW: u16 = 13;
const IR_COL: u16 = 7;
const STATIC_COL: u16 = 45;
const STATIC_ROW: u16 = 13;
const STATUS_ROW: u16 = 23;

// extended view
const IR_BOX: (u16, u16) = (0, 82);
const IR_PLOT_WIDTH: u16 = 64;
const IR_PLOT_HEIGHT: u16 = 20;
const WIDE_ACCEL_ROW: u16 = 25;
const WIDE_MOTION_PLUS_ROW: u16 = 30;
const WIDE_BAR_COL: u16 = 8;
const WIDE_BAR_WIDTH: u16 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Freeze,
    Refresh,
    Rumble,
    Led(u8),
    Toggle(Interfaces),
    Normalize,
}

pub struct Show {
    title: String,
    mode: DisplayMode,
    ir_marks: [Option<(u16, u16)>; 4],
}

impl Show {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mode: DisplayMode::Error,
            ir_marks: [None; 4],
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    fn visible(&self) -> bool {
        self.mode != DisplayMode::Error
    }

    fn draw_key<S: Screen>(&self, screen: &mut S, key: Key, pressed: bool) -> Result<()> {
        if let Some((_, row, col)) = KEY_CELLS.iter().find(|(k, _, _)| *k == key) {
            let mark = if pressed { "[X]" } else { "[ ]" };
            screen.print_at(*row, col + KEY_MARK_OFFSET, mark)?;
        }
        Ok(())
    }

    fn draw_accel<S: Screen>(&self, screen: &mut S, a: Acceleration) -> Result<()> {
        let axes = [a.x as i32, a.y as i32, a.z as i32];
        for (i, v) in axes.into_iter().enumerate() {
            let row = ACCEL_ROW + i as u16;
            screen.print_at(row, VALUE_COL, &format!("{v:+6}"))?;
            screen.print_at(row, BAR_COL, &bar(v, ACCEL_RANGE, BAR_WIDTH))?;
            if self.mode == DisplayMode::Extended {
                let wide = bar(v, ACCEL_RANGE, WIDE_BAR_WIDTH);
                screen.print_at(WIDE_ACCEL_ROW + i as u16, WIDE_BAR_COL, &wide)?;
            }
        }
        Ok(())
    }

    fn draw_motion_plus<S: Screen>(&self, screen: &mut S, mp: MotionPlus) -> Result<()> {
        for (i, v) in [mp.yaw, mp.roll, mp.pitch].into_iter().enumerate() {
            let row = MOTION_PLUS_ROW + i as u16;
            screen.print_at(row, VALUE_COL, &format!("{v:+6}"))?;
            screen.print_at(row, BAR_COL, &bar(v, MOTION_PLUS_RANGE, BAR_WIDTH))?;
            if self.mode == DisplayMode::Extended {
                let wide = bar(v, MOTION_PLUS_RANGE, WIDE_BAR_WIDTH);
                screen.print_at(WIDE_MOTION_PLUS_ROW + i as u16, WIDE_BAR_COL, &wide)?;
            }
        }
        Ok(())
    }

    fn draw_ir<S: Screen>(&mut self, screen: &mut S, objects: [Option<IRObject>; 4]) -> Result<()> {
        for (i, o) in objects.iter().enumerate() {
            let text = match o {
                Some(o) => format!("x={:<4} y={:<4}", o.x, o.y),
                None => "-".to_string(),
            };
            screen.print_at(IR_ROW + i as u16, IR_COL, &format!("{text:<16}"))?;
        }
        if self.mode != DisplayMode::Extended {
            return Ok(());
        }
        for (row, col) in self.ir_marks.iter().flatten() {
            screen.print_at(*row, *col, " ")?;
        }
        for (i, o) in objects.iter().enumerate() {
            self.ir_marks[i] = o.map(ir_cell);
            if let Some((row, col)) = self.ir_marks[i] {
                screen.print_at(row, col, &(i + 1).to_string())?;
            }
        }
        Ok(())
    }

    fn draw_static<D: Device, S: Screen>(&self, session: &Session<D>, screen: &mut S) -> Result<()> {
        if !self.visible() {
            return Ok(());
        }
        let device = &session.device;
        let row = |i: u16| STATIC_ROW + i;

        let battery = match device.battery() {
            Some(capacity) => {
                let low = if device.battery_low() { "low" } else { "" };
                format!("{capacity:3}%  {:<10} {low:<3}", battery_gauge(capacity))
            }
            None => format!("{:<20}", "?"),
        };
        screen.print_at(row(0), STATIC_COL, &battery)?;
        screen.print_at(row(1), STATIC_COL, &led_text(session.toggles.leds))?;
        let rumble = if session.toggles.rumble { "on " } else { "off" };
        screen.print_at(row(2), STATIC_COL, rumble)?;
        let kind = device.device_type();
        let kind = format!("{} ({})", kind.name(), kind.model());
        screen.print_at(row(3), STATIC_COL, &format!("{kind:<34.34}"))?;
        let ext = device.extension().name();
        screen.print_at(row(4), STATIC_COL, &format!("{ext:<34.34}"))?;
        screen.print_at(row(5), STATIC_COL, &interface_text(device.opened()))?;

        let frozen = if session.freeze { "FROZEN" } else { "      " };
        screen.print_at(FROZEN.0, FROZEN.1, frozen)?;
        let normalized = match session.toggles.motion_plus_offset {
            Some(_) => "[normalized]",
            None => "            ",
        };
        screen.print_at(NORMALIZED.0, NORMALIZED.1, normalized)?;
        Ok(())
    }

    fn draw_ir_box<S: Screen>(&self, screen: &mut S) -> Result<()> {
        let (top, left) = IR_BOX;
        let border = format!("+{}+", "-".repeat(IR_PLOT_WIDTH as usize));
        screen.print_at(top, left, &border)?;
        screen.print_at(top, left + 2, "IR camera")?;
        for row in 1..=IR_PLOT_HEIGHT {
            screen.print_at(top + row, left, "|")?;
            screen.print_at(top + row, left + IR_PLOT_WIDTH + 1, "|")?;
        }
        screen.print_at(top + IR_PLOT_HEIGHT + 1, left, &border)?;
        Ok(())
    }
}

/// Screen cell of an IR object inside the extended view's plot.
pub fn ir_cell(o: IRObject) -> (u16, u16) {
    let (top, left) = IR_BOX;
    let col = scale(o.x as i32, 0, IR_WIDTH - 1, IR_PLOT_WIDTH);
    let row = scale(o.y as i32, 0, IR_HEIGHT - 1, IR_PLOT_HEIGHT);
    (top + 1 + row, left + 1 + col)
}

/// One `#` per started 10%.
pub fn battery_gauge(capacity: u8) -> String {
    "#".repeat((capacity.min(100) as usize).div_ceil(10))
}

pub fn led_text(leds: Leds) -> String {
    (1..=4)
        .map(|n| match Leds::nth(n) {
            Some(l) if leds.contains(l) => n.to_string(),
            _ => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn interface_text(opened: Interfaces) -> String {
    [
        (Interfaces::CORE, "K"),
        (Interfaces::ACCEL, "A"),
        (Interfaces::IR, "I"),
        (Interfaces::MOTION_PLUS, "M"),
    ]
    .iter()
    .map(|(i, name)| if opened.contains(*i) { *name } else { "-" })
    .collect::<Vec<_>>()
    .join(" ")
}

fn interface_name(iface: Interfaces) -> &'static str {
    if iface == Interfaces::CORE {
        "keys"
    } else if iface == Interfaces::ACCEL {
        "accelerometer"
    } else if iface == Interfaces::IR {
        "IR"
    } else if iface == Interfaces::MOTION_PLUS {
        "motion plus"
    } else {
        "interface"
    }
}

impl Frontend for Show {
    type Command = Command;

    fn command(c: char) -> Option<Command> {
        Some(match c {
            'q' => Command::Quit,
            'f' => Command::Freeze,
            's' => Command::Refresh,
            'r' => Command::Rumble,
            '1'..='4' => Command::Led(c as u8 - b'0'),
            'k' => Command::Toggle(Interfaces::CORE),
            'a' => Command::Toggle(Interfaces::ACCEL),
            'i' => Command::Toggle(Interfaces::IR),
            'm' => Command::Toggle(Interfaces::MOTION_PLUS),
            'n' => Command::Normalize,
            _ => return None,
        })
    }

    fn draw_layout<D: Device, S: Screen>(
        &mut self,
        mode: DisplayMode,
        session: &mut Session<D>,
        screen: &mut S,
    ) -> Result<()> {
        self.mode = mode;
        self.ir_marks = [None; 4];
        if mode == DisplayMode::Error {
            screen.print_at(0, 0, "Error: Screen smaller than 80x24; no view")?;
            return Ok(());
        }
        for (row, col, text) in LAYOUT {
            screen.print_at(*row, *col, text)?;
        }
        screen.print_at(0, 32, &format!("{:<36.36}", self.title))?;
        for (key, row, col) in KEY_CELLS {
            screen.print_at(row, col, key.label())?;
            screen.print_at(row, col + KEY_MARK_OFFSET, "[ ]")?;
        }
        if mode == DisplayMode::Extended {
            self.draw_ir_box(screen)?;
            screen.print_at(WIDE_ACCEL_ROW - 1, 1, "Accelerometer")?;
            screen.print_at(WIDE_MOTION_PLUS_ROW - 1, 1, "Motion Plus")?;
            for (i, axis) in ["X", "Y", "Z"].iter().enumerate() {
                screen.print_at(WIDE_ACCEL_ROW + i as u16, 3, axis)?;
            }
            for (i, axis) in ["Yaw", "Roll", "Pitch"].iter().enumerate() {
                screen.print_at(WIDE_MOTION_PLUS_ROW + i as u16, 1, axis)?;
            }
        }
        self.draw_static(session, screen)
    }

    fn on_event<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        event: Event,
    ) -> Result<()> {
        let event = match event {
            Event::Watch => {
                session.sync_leds();
                session.reopen()?;
                return self.draw_static(session, screen);
            }
            // recorded even when hidden, `n` captures the latest sample
            Event::MotionPlus(mp) => Event::MotionPlus(session.normalize(mp)),
            event => event,
        };
        if !self.visible() {
            return Ok(());
        }
        match event {
            Event::Key { key, pressed } => self.draw_key(screen, key, pressed),
            Event::Accel(a) => self.draw_accel(screen, a),
            Event::Ir(objects) => self.draw_ir(screen, objects),
            Event::MotionPlus(mp) => self.draw_motion_plus(screen, mp),
            Event::Watch => Ok(()),
        }
    }

    fn on_command<D: Device, S: Screen>(
        &mut self,
        session: &mut Session<D>,
        screen: &mut S,
        command: Command,
    ) -> Result<Flow> {
        let message = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Freeze => {
                if session.toggle_freeze() {
                    "frozen".to_string()
                } else {
                    "unfrozen".to_string()
                }
            }
            Command::Refresh => {
                session.device.refresh()?;
                "refreshing".to_string()
            }
            Command::Rumble => match session.toggle_rumble()? {
                true => "rumble on".to_string(),
                false => "rumble off".to_string(),
            },
            Command::Led(n) => {
                let Some(led) = Leds::nth(n) else {
                    return Ok(Flow::Continue);
                };
                let leds = session.toggle_led(led)?;
                let state = if leds.contains(led) { "on" } else { "off" };
                format!("LED {n} {state}")
            }
            Command::Toggle(iface) => {
                let name = interface_name(iface);
                match session.toggle_interface(iface)? {
                    true => format!("{name} opened"),
                    false => format!("{name} closed"),
                }
            }
            Command::Normalize => match session.toggle_normalization() {
                true => "motion plus normalized".to_string(),
                false => "motion plus normalization off".to_string(),
            },
        };
        self.draw_static(session, screen)?;
        self.status(screen, &message)?;
        Ok(Flow::Continue)
    }

    fn status<S: Screen>(&mut self, screen: &mut S, message: &str) -> Result<()> {
        if self.visible() {
            screen.print_at(STATUS_ROW, 0, &format!("{message:<79.79}"))?;
        }
        Ok(())
    }
}
