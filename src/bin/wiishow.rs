/*
    This file is part of wiiclicker
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use std::process::ExitCode;
use wiiclicker::{cli::Program, show::Show, Interfaces};

const PROGRAM: Program = Program {
    name: "wiishow",
    not_found: "Cannot find device.",
    commands: &[
        ("q", "Quit application"),
        ("f", "Freeze/Unfreeze screen"),
        ("s", "Refresh static values (like battery or extension)"),
        ("r", "Toggle rumble motor"),
        ("1-4", "Toggle player LED"),
        ("k", "Toggle key events"),
        ("a", "Toggle accelerometer"),
        ("i", "Toggle IR camera"),
        ("m", "Toggle Motion Plus"),
        ("n", "Toggle Motion Plus normalization"),
    ],
    interfaces: Interfaces::all(),
};

fn main() -> ExitCode {
    PROGRAM.launch(|entry| Ok(Show::new(entry.path_lossy())))
}
