//! Argument handling and startup shared by the binaries.

use crate::event_loop::{EventLoop, Frontend, TerminalKeyboard};
use crate::monitor::{DeviceEntry, Monitor};
use crate::screen::Terminal;
use crate::session::Session;
use crate::{Interfaces, Result};
use log::{error, warn};
use std::process::ExitCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args {
    Help,
    List,
    Show(Target),
}

/// Which remote to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    First,
    /// 1-based, as printed by `list`
    Index(usize),
    Path(String),
}

/// Parses the arguments after the program name.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Args {
    match args.into_iter().next() {
        None => Args::Show(Target::First),
        Some(a) => match a.as_str() {
            "-h" | "--help" => Args::Help,
            "list" => Args::List,
            _ => match a.parse() {
                Ok(n) => Args::Show(Target::Index(n)),
                Err(_) => Args::Show(Target::Path(a)),
            },
        },
    }
}

/// Static description of one binary.
pub struct Program {
    pub name: &'static str,
    /// Printed when no remote is connected.
    pub not_found: &'static str,
    pub commands: &'static [(&'static str, &'static str)],
    /// Interfaces the program opens on start.
    pub interfaces: Interfaces,
}

impl Program {
    pub fn usage(&self) -> String {
        let mut s = format!(
            "Usage:\n\
             \t{0} [-h]: Show help\n\
             \t{0} list: List connected devices\n\
             \t{0} <num>: Show device with number #num\n\
             \t{0} /path/to/device: Show given device\n\
             UI commands:\n",
            self.name
        );
        for (key, what) in self.commands {
            s += &format!("\t{key}: {what}\n");
        }
        s
    }

    /// Parses the command line, opens a remote and runs `frontend` on it.
    pub fn launch<F: Frontend>(
        &self,
        frontend: impl FnOnce(&DeviceEntry) -> Result<F>,
    ) -> ExitCode {
        env_logger::init_from_env("LOG");
        match self.launch_inner(frontend) {
            Ok(code) => code,
            Err(e) => {
                error!("{e}");
                eprintln!("{}: {e}", self.name);
                ExitCode::FAILURE
            }
        }
    }

    fn launch_inner<F: Frontend>(
        &self,
        frontend: impl FnOnce(&DeviceEntry) -> Result<F>,
    ) -> Result<ExitCode> {
        let target = match parse(std::env::args().skip(1)) {
            Args::Help => {
                print!("{}", self.usage());
                return Ok(ExitCode::SUCCESS);
            }
            Args::List => {
                let monitor = Monitor::new()?;
                for (i, entry) in monitor.devices().iter().enumerate() {
                    println!("  Found device #{}: {}", i + 1, entry.path_lossy());
                }
                return Ok(ExitCode::SUCCESS);
            }
            Args::Show(target) => target,
        };

        let monitor = Monitor::new()?;
        let entry = match target {
            Target::First => match monitor.first() {
                Some(entry) => entry,
                None => {
                    println!("{}", self.not_found);
                    return Ok(ExitCode::SUCCESS);
                }
            },
            Target::Index(n) => monitor.nth(n)?,
            Target::Path(path) => monitor.find(&path)?,
        };
        let wiimote = monitor.open(&entry)?;
        let mut frontend = frontend(&entry)?;
        let mut session = Session::new(wiimote);
        session.open_wanted(self.interfaces)?;

        let mut event_loop = EventLoop::new(session, TerminalKeyboard, Terminal::enter()?);
        match event_loop.run(&mut frontend) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(e) => {
                if let Err(held) = event_loop.hold(&format!("Error: {e} (press any key)")) {
                    warn!("{held}");
                }
                drop(event_loop);
                eprintln!("{}: {e}", self.name);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
