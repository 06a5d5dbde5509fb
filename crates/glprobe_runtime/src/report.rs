use std::io;

use glprobe_core::AdapterReport;
use glprobe_env::DisplayDevice;
use serde::Serialize;

/// Everything one run found, for `--json` output.
#[derive(Debug, Serialize)]
pub struct GpuReport {
    pub acceleration: bool,
    pub displays: Vec<DisplayDevice>,
    pub adapter: Option<AdapterReport>,
}

impl GpuReport {
    pub fn into_json(self, output: impl io::Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(output, &self)
    }
}
