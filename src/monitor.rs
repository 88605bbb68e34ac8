use crate::{consts::*, DeviceType, Error, Result, Wiimote};
use hidapi::{DeviceInfo, HidApi, HidError};
use log::{debug, info, warn};
use std::ffi::CString;
use std::fs::OpenOptions;
use std::io;

/// One enumerated controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub path: CString,
    pub kind: DeviceType,
}

impl DeviceEntry {
    fn from_info(info: &DeviceInfo) -> Option<Self> {
        if info.vendor_id() != HID_VENDOR {
            return None;
        }
        Some(Self {
            path: info.path().to_owned(),
            kind: DeviceType::from_product_id(info.product_id())?,
        })
    }

    pub fn path_lossy(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Enumerates wii remotes via hidapi.
pub struct Monitor {
    api: HidApi,
}

impl Monitor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            api: HidApi::new()?,
        })
    }

    /// All connected wii remotes in enumeration order.
    pub fn devices(&self) -> Vec<DeviceEntry> {
        self.api
            .device_list()
            .inspect(|device| debug!("dev: {device:?}"))
            .filter_map(DeviceEntry::from_info)
            .inspect(|entry| info!("wiimote found at {}", entry.path_lossy()))
            .collect()
    }

    pub fn first(&self) -> Option<DeviceEntry> {
        self.devices().into_iter().next()
    }

    /// The `n`-th device, counting from 1 like the `list` output.
    pub fn nth(&self, n: usize) -> Result<DeviceEntry> {
        n.checked_sub(1)
            .and_then(|i| self.devices().into_iter().nth(i))
            .ok_or_else(|| Error::NoSuchDevice(format!("#{n}")))
    }

    pub fn find(&self, path: &str) -> Result<DeviceEntry> {
        let c = CString::new(path).map_err(|_| Error::InvalidPath(path.to_owned()))?;
        self.devices()
            .into_iter()
            .find(|e| e.path == c)
            .ok_or_else(|| Error::NoSuchDevice(path.to_owned()))
    }

    /// Finds and opens a wiimote.
    pub fn open(&self, entry: &DeviceEntry) -> Result<Wiimote> {
        let device = self.api.open_path(&entry.path).map_err(|e| {
            let path = entry.path_lossy();
            let access = OpenOptions::new().read(true).write(true).open(&path);
            open_failure(&path, access.map(drop), e)
        })?;
        Wiimote::from_device(device, entry.kind)
    }
}

/// hidraw nodes are root only unless a udev rule says otherwise.
fn open_failure(path: &str, access: io::Result<()>, err: HidError) -> Error {
    match access {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!("{path}: {err}");
            Error::PermissionDenied(path.to_owned())
        }
        _ => Error::Hid(err),
    }
}
