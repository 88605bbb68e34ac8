use crate::Interfaces;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("hid: {0}")]
    Hid(#[from] hidapi::HidError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("keystroke injection: {0}")]
    Inject(#[from] uinput::Error),
    #[error("no wii remote found")]
    NotFound,
    #[error("no wii remote at {0}")]
    NoSuchDevice(String),
    #[error("invalid device path {0:?}")]
    InvalidPath(String),
    #[error("no permission to open {0}; run as root or add a udev rule for it")]
    PermissionDenied(String),
    #[error("interface not available: {0:?}")]
    Unavailable(Interfaces),
}

impl Error {
    /// Fatal errors end the event loop, everything else ends up on the status line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::Interrupted)
    }
}
