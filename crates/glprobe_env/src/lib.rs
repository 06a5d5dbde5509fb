//! glprobe Env
//!
//! Host environment queries: display adapters known to the OS and the
//! hybrid-GPU driver hints.

pub mod accel;
pub mod display;

pub use accel::{acceleration_hints, set_acceleration, Acceleration, ParseAccelerationError};
pub use display::{enumerate_displays, vendor_name, DisplayDevice};
