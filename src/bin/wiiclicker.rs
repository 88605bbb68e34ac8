/*
    This file is part of wiiclicker
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use std::process::ExitCode;
use wiiclicker::{cli::Program, clicker::Clicker, inject::VirtualKeyboard, Interfaces};

const PROGRAM: Program = Program {
    name: "wiiclicker",
    not_found: "WiiClicker - Please connect a Wii Remote to Bluetooth and try again.",
    commands: &[
        ("b", "Show battery percentage"),
        ("r", "Toggle rumble motor"),
        ("q", "Quit application"),
    ],
    interfaces: Interfaces::CORE.union(Interfaces::WRITABLE),
};

fn main() -> ExitCode {
    PROGRAM.launch(|_| Ok(Clicker::new(VirtualKeyboard::new()?)))
}
