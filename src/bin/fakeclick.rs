/*
    This file is part of wiiclicker
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use std::{process::ExitCode, thread::sleep, time::Duration};
use wiiclicker::inject::{Injector, Keystroke, VirtualKeyboard};

fn main() -> ExitCode {
    env_logger::init_from_env("LOG");
    let mut keyboard = match VirtualKeyboard::new() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("fakeclick: {e}");
            return ExitCode::FAILURE;
        }
    };
    loop {
        println!("simulating Right keypress");
        if let Err(e) = keyboard.send(Keystroke::Right) {
            eprintln!("fakeclick: {e}");
            return ExitCode::FAILURE;
        }
        sleep(Duration::from_secs(10));
    }
}
