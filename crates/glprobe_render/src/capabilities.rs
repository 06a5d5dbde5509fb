//! Capability probe against a live context

use glprobe_core::AdapterReport;

use crate::context::ContextHandle;
use crate::platform::Platform;

/// Capture the adapter report from a live context.
///
/// The handle is only borrowed for the duration of the call; the report
/// holds no reference to it.
pub fn probe_capabilities<P: Platform>(handle: &ContextHandle<P>) -> AdapterReport {
    debug_assert!(handle.state().is_live());
    AdapterReport::capture(handle.gl())
}
