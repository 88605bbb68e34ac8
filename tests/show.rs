mod common;

use common::*;
use wiiclicker::{
    event_loop::{EventLoop, Input},
    screen::{BufferScreen, DisplayMode},
    session::Session,
    show::{ir_cell, Show},
    Acceleration, Event, IRObject, Interfaces, Key, Leds, MotionPlus,
};

type ShowLoop = EventLoop<FakeDevice, FakeKeyboard, BufferScreen>;

fn run(device: FakeDevice, keys: Vec<Option<Input>>, size: (u16, u16)) -> (ShowLoop, Show) {
    let mut session = Session::new(device);
    session.open_wanted(Interfaces::all()).unwrap();
    let mut el = EventLoop::new(session, FakeKeyboard::new(keys), BufferScreen::new(size.0, size.1));
    let mut show = Show::new("/dev/hidraw0");
    el.run(&mut show).unwrap();
    (el, show)
}

fn idle(n: usize) -> Vec<Option<Input>> {
    vec![None; n]
}

#[test]
fn small_terminal_shows_only_the_error() {
    let device = FakeDevice::with_events([Event::Key { key: Key::A, pressed: true }]);
    let (el, show) = run(device, idle(1), (79, 30));
    assert_eq!(show.mode(), DisplayMode::Error);
    assert_eq!(el.screen.line(0), "Error: Screen smaller than 80x24; no view");
    assert!(!el.screen.contains("[X]"));
}

#[test]
fn static_layout() {
    let (el, show) = run(FakeDevice::new(), vec![], (80, 24));
    assert_eq!(show.mode(), DisplayMode::Normal);
    let s = &el.screen;
    assert!(s.line(0).contains("/dev/hidraw0"));
    assert!(s.line(13).contains("87%  #########"));
    assert!(s.line(14).contains("1 - - -"));
    assert!(s.line(16).contains("gen20 (Nintendo RVL-CNT-01-TR)"));
    assert!(s.line(17).contains("none"));
    assert!(s.line(18).contains("K A I -"));
    assert!(!s.contains("IR camera"));
}

#[test]
fn key_presses_and_releases() {
    let device = FakeDevice::with_events([
        Event::Key { key: Key::A, pressed: true },
        Event::Key { key: Key::Up, pressed: true },
        Event::Key { key: Key::Up, pressed: false },
    ]);
    let (el, _) = run(device, idle(3), (80, 24));
    assert!(el.screen.line(3).contains("Up    [ ]"));
    assert!(el.screen.line(3).contains("A     [X]"));
}

#[test]
fn accelerometer_values() {
    let device = FakeDevice::with_events([Event::Accel(Acceleration { x: 10, y: -20, z: 128 })]);
    let (el, _) = run(device, idle(1), (80, 24));
    assert!(el.screen.line(3).contains("+10"));
    assert!(el.screen.line(4).contains("-20"));
    assert!(el.screen.line(5).contains("+128"));
    assert!(el.screen.line(5).ends_with('#'));
}

#[test]
fn ir_objects_are_listed_and_plotted() {
    let o = IRObject { x: 100, y: 200 };
    let device = FakeDevice::with_events([Event::Ir([Some(o), None, None, None])]);
    let (el, _) = run(device, idle(1), (160, 48));
    assert!(el.screen.line(13).contains("x=100  y=200"));
    assert!(el.screen.line(14).contains("#2  -"));
    assert!(el.screen.contains("IR camera"));
    let (row, col) = ir_cell(o);
    assert_eq!(el.screen.line(row).chars().nth(col as usize), Some('1'));
}

#[test]
fn ir_marks_move() {
    let a = IRObject { x: 0, y: 0 };
    let b = IRObject { x: 1000, y: 700 };
    let device = FakeDevice::with_events([
        Event::Ir([Some(a), None, None, None]),
        Event::Ir([Some(b), None, None, None]),
    ]);
    let (el, _) = run(device, idle(2), (160, 48));
    let at = |(row, col): (u16, u16)| el.screen.line(row).chars().nth(col as usize);
    assert_eq!(at(ir_cell(a)), Some(' '));
    assert_eq!(at(ir_cell(b)), Some('1'));
}

#[test]
fn freeze_stops_drawing() {
    let device = FakeDevice::with_events([Event::Key { key: Key::B, pressed: true }]);
    let (el, _) = run(device, chars("f").into_iter().chain(idle(1)).collect(), (80, 24));
    assert!(el.session.freeze);
    assert!(el.screen.line(0).contains("FROZEN"));
    assert!(el.screen.line(4).contains("B     [ ]"));
    assert_eq!(el.screen.line(23), "frozen");
}

#[test]
fn rumble_toggle() {
    let (el, _) = run(FakeDevice::new(), chars("r"), (80, 24));
    assert!(el.session.device.rumble);
    assert!(el.session.toggles.rumble);
    assert!(el.screen.line(15).contains("on"));
    assert_eq!(el.screen.line(23), "rumble on");
}

#[test]
fn failed_rumble_keeps_state_and_reports() {
    let mut device = FakeDevice::new();
    device.fail_rumble = true;
    let (el, _) = run(device, chars("r"), (80, 24));
    assert!(!el.session.toggles.rumble);
    assert!(el.screen.line(15).contains("off"));
    assert!(el.screen.line(23).contains("no wii remote"));
}

#[test]
fn led_toggles() {
    let (el, _) = run(FakeDevice::new(), chars("231"), (80, 24));
    assert_eq!(el.session.device.leds, Some(Leds::LED2 | Leds::LED3));
    assert!(el.screen.line(14).contains("- 2 3 -"));
    assert_eq!(el.screen.line(23), "LED 1 off");
}

#[test]
fn interface_toggles() {
    let (el, _) = run(FakeDevice::new(), chars("im"), (80, 24));
    assert!(!el.session.device.opened.contains(Interfaces::IR));
    assert!(el.screen.line(18).contains("K A - -"));
    assert!(el.screen.line(23).contains("interface not available"));
}

#[test]
fn refresh_requests_status() {
    let (el, _) = run(FakeDevice::new(), chars("ss"), (80, 24));
    assert_eq!(el.session.device.refreshes, 2);
}

#[test]
fn motion_plus_normalization() {
    let mut device = FakeDevice::with_events([
        Event::MotionPlus(MotionPlus { yaw: 100, roll: -40, pitch: 0 }),
        Event::MotionPlus(MotionPlus { yaw: 150, roll: -40, pitch: 7 }),
    ]);
    device.available |= Interfaces::MOTION_PLUS;
    let (el, _) = run(device, vec![None, Some(Input::Char('n')), None], (80, 24));
    assert!(el.screen.line(7).contains("[normalized]"));
    assert!(el.screen.line(8).contains("+50"));
    assert!(!el.screen.line(8).contains("+150"));
    assert!(el.screen.line(9).contains("+0"));
    assert!(el.screen.line(10).contains("+7"));
}

#[test]
fn low_battery_is_flagged() {
    let mut device = FakeDevice::new();
    device.battery = Some(12);
    device.battery_low = true;
    let (el, _) = run(device, vec![], (80, 24));
    assert!(el.screen.line(13).contains(" 12%  ##         low"));
}

#[test]
fn motion_plus_samples_count_while_hidden() {
    let sample = MotionPlus { yaw: 30, roll: -5, pitch: 2 };
    let mut device = FakeDevice::with_events([Event::MotionPlus(sample)]);
    device.available |= Interfaces::MOTION_PLUS;
    let (el, show) = run(device, vec![None, Some(Input::Char('n'))], (40, 10));
    assert_eq!(show.mode(), DisplayMode::Error);
    assert_eq!(el.session.toggles.motion_plus_offset, Some(sample));
}
