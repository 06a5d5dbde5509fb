// display.rs
//! Cross-platform enumeration of the display adapters known to the OS.
//! Returns an empty list where no backend exists.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDevice {
    pub index: u32, // 1-based
    pub name: String,
    pub description: String,
    pub id: String,
    pub primary: bool,
}

/// All display devices, in the order the OS reports them.
pub fn enumerate_displays() -> Vec<DisplayDevice> {
    let devices = enumerate_impl();
    tracing::debug!(count = devices.len(), "enumerated display devices");
    devices
}

/// Marketing name for a PCI vendor id.
pub fn vendor_name(vendor_id: u32) -> Option<&'static str> {
    match vendor_id {
        0x1002 => Some("AMD"),
        0x1010 => Some("ImgTec"),
        0x10DE => Some("NVIDIA"),
        0x13B5 => Some("ARM"),
        0x5143 => Some("Qualcomm"),
        0x8086 => Some("Intel"),
        _ => None,
    }
}

/* -------------------------- Windows -------------------------- */

#[cfg(target_os = "windows")]
fn enumerate_impl() -> Vec<DisplayDevice> {
    use windows_sys::Win32::Graphics::Gdi::{
        EnumDisplayDevicesA, DISPLAY_DEVICEA, DISPLAY_DEVICE_PRIMARY_DEVICE,
    };

    fn fixed_str<T: Copy + Into<i16>>(raw: &[T]) -> String {
        let bytes: Vec<u8> = raw
            .iter()
            .map(|&c| c.into() as u8)
            .take_while(|&c| c != 0)
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    let mut devices = Vec::new();
    let mut index = 0u32;
    loop {
        let mut device: DISPLAY_DEVICEA = unsafe { std::mem::zeroed() };
        device.cb = std::mem::size_of::<DISPLAY_DEVICEA>() as u32;
        if unsafe { EnumDisplayDevicesA(std::ptr::null(), index, &mut device, 0) } == 0 {
            break;
        }
        index += 1;
        devices.push(DisplayDevice {
            index,
            name: fixed_str(&device.DeviceName),
            description: fixed_str(&device.DeviceString),
            id: fixed_str(&device.DeviceID),
            primary: device.StateFlags & DISPLAY_DEVICE_PRIMARY_DEVICE != 0,
        });
    }
    devices
}

/* --------------------- Linux / Android --------------------- */

#[cfg(any(target_os = "linux", target_os = "android"))]
fn enumerate_impl() -> Vec<DisplayDevice> {
    sysfs::scan(std::path::Path::new("/sys/class/drm"))
}

#[cfg(any(target_os = "linux", target_os = "android", test))]
mod sysfs {
    use std::path::Path;

    use super::{vendor_name, DisplayDevice};

    /// Sysfs ids look like "0x10de\n"
    pub(super) fn parse_hex_id(s: &str) -> Option<u32> {
        let t = s.trim();
        let digits = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
        u32::from_str_radix(digits, 16).ok()
    }

    /// `DRIVER=` line of a uevent file
    pub(super) fn uevent_driver(uevent: &str) -> Option<&str> {
        uevent.lines().find_map(|line| line.strip_prefix("DRIVER="))
    }

    fn read(path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    /// DRM card nodes ("card0", not connectors like "card0-HDMI-A-1").
    fn card_number(name: &str) -> Option<u32> {
        name.strip_prefix("card")?.parse().ok()
    }

    pub(super) fn scan(root: &Path) -> Vec<DisplayDevice> {
        let Ok(entries) = std::fs::read_dir(root) else {
            return Vec::new();
        };

        let mut cards: Vec<(u32, String)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                Some((card_number(&name)?, name))
            })
            .collect();
        cards.sort();

        cards
            .into_iter()
            .enumerate()
            .map(|(i, (_, name))| {
                let device = root.join(&name).join("device");
                let vendor = read(&device.join("vendor")).and_then(|s| parse_hex_id(&s));
                let product = read(&device.join("device")).and_then(|s| parse_hex_id(&s));
                let driver = read(&device.join("uevent"))
                    .and_then(|uevent| uevent_driver(&uevent).map(str::to_owned));
                let primary = read(&device.join("boot_vga")).is_some_and(|s| s.trim() == "1");

                let vendor_label = match vendor {
                    Some(id) => vendor_name(id).map_or_else(|| format!("{id:#06x}"), str::to_owned),
                    None => "Unknown".to_owned(),
                };
                let description = match driver {
                    Some(driver) => format!("{vendor_label} ({driver})"),
                    None => vendor_label,
                };
                let id = match (vendor, product) {
                    (Some(vendor), Some(product)) => format!("{vendor:04x}:{product:04x}"),
                    _ => String::new(),
                };

                DisplayDevice {
                    index: i as u32 + 1,
                    name,
                    description,
                    id,
                    primary,
                }
            })
            .collect()
    }
}

/* --------------------- Other / Fallbacks --------------------- */

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "android")))]
fn enumerate_impl() -> Vec<DisplayDevice> {
    Vec::new()
}
