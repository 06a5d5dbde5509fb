// accel.rs
//! Hybrid-GPU driver hints. NVIDIA Optimus and AMD PowerXpress drivers read
//! these exported symbols when the process loads to pick the discrete adapter.

use std::str::FromStr;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use thiserror::Error;

#[no_mangle]
#[allow(non_upper_case_globals)]
pub static NvOptimusEnablement: AtomicU32 = AtomicU32::new(0);

#[no_mangle]
#[allow(non_upper_case_globals)]
pub static AmdPowerXpressRequestHighPerformance: AtomicI32 = AtomicI32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceleration {
    On,
    Off,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected `on` or `off`, got `{0}`")]
pub struct ParseAccelerationError(pub String);

impl FromStr for Acceleration {
    type Err = ParseAccelerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Acceleration::On),
            "off" => Ok(Acceleration::Off),
            other => Err(ParseAccelerationError(other.to_owned())),
        }
    }
}

impl Acceleration {
    pub fn is_on(self) -> bool {
        matches!(self, Acceleration::On)
    }
}

/// Set both driver hints. Must run before the first context is created.
pub fn set_acceleration(mode: Acceleration) {
    let flag = u32::from(mode.is_on());
    NvOptimusEnablement.store(flag, Ordering::SeqCst);
    AmdPowerXpressRequestHighPerformance.store(flag as i32, Ordering::SeqCst);
    tracing::info!(?mode, "discrete GPU preference set");
}

/// Current hint values as `(nvidia, amd)`.
pub fn acceleration_hints() -> (u32, i32) {
    (
        NvOptimusEnablement.load(Ordering::SeqCst),
        AmdPowerXpressRequestHighPerformance.load(Ordering::SeqCst),
    )
}
