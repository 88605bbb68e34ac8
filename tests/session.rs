mod common;

use common::*;
use wiiclicker::{session::Session, Error, Interfaces, Leds, MotionPlus};

#[test]
fn starts_from_device_leds() {
    let session = Session::new(FakeDevice::new());
    assert_eq!(session.toggles.leds, Leds::LED1);
    assert!(!session.toggles.rumble);
    assert!(!session.freeze);
}

#[test]
fn wanted_interfaces_open_once_available() {
    let mut session = Session::new(FakeDevice::new());
    session.open_wanted(Interfaces::all()).unwrap();
    assert!(!session.device.opened.contains(Interfaces::MOTION_PLUS));
    assert!(session.device.opened.contains(Interfaces::IR));

    session.device.available |= Interfaces::MOTION_PLUS;
    session.reopen().unwrap();
    assert!(session.device.opened.contains(Interfaces::MOTION_PLUS));
}

#[test]
fn closed_interfaces_stay_closed_on_reopen() {
    let mut session = Session::new(FakeDevice::new());
    session.open_wanted(Interfaces::all()).unwrap();
    assert!(!session.toggle_interface(Interfaces::ACCEL).unwrap());
    session.reopen().unwrap();
    assert!(!session.device.opened.contains(Interfaces::ACCEL));
    assert!(session.toggle_interface(Interfaces::ACCEL).unwrap());
    assert!(session.device.opened.contains(Interfaces::ACCEL));
}

#[test]
fn unavailable_interface() {
    let mut session = Session::new(FakeDevice::new());
    let err = session.toggle_interface(Interfaces::MOTION_PLUS).unwrap_err();
    assert!(matches!(err, Error::Unavailable(i) if i == Interfaces::MOTION_PLUS));
}

#[test]
fn rumble_state_follows_the_device() {
    let mut session = Session::new(FakeDevice::new());
    assert!(session.toggle_rumble().unwrap());
    assert!(!session.toggle_rumble().unwrap());
    session.device.fail_rumble = true;
    assert!(session.toggle_rumble().is_err());
    assert!(!session.toggles.rumble);
}

#[test]
fn leds_toggle_independently() {
    let mut session = Session::new(FakeDevice::new());
    assert_eq!(session.toggle_led(Leds::LED4).unwrap(), Leds::LED1 | Leds::LED4);
    assert_eq!(session.toggle_led(Leds::LED1).unwrap(), Leds::LED4);
    assert_eq!(session.device.leds, Some(Leds::LED4));

    session.device.leds = Some(Leds::LED2);
    session.sync_leds();
    assert_eq!(session.toggles.leds, Leds::LED2);
}

#[test]
fn normalization_uses_the_last_sample() {
    let mut session = Session::new(FakeDevice::new());
    let a = MotionPlus { yaw: 10, roll: 20, pitch: 30 };
    assert_eq!(session.normalize(a), a);
    assert!(session.toggle_normalization());
    assert_eq!(session.normalize(a), MotionPlus::default());
    let b = MotionPlus { yaw: 11, roll: 18, pitch: 30 };
    assert_eq!(session.normalize(b), MotionPlus { yaw: 1, roll: -2, pitch: 0 });
    assert!(!session.toggle_normalization());
    assert_eq!(session.normalize(b), b);
}

#[test]
fn freeze_toggles() {
    let mut session = Session::new(FakeDevice::new());
    assert!(session.toggle_freeze());
    assert!(!session.toggle_freeze());
}
