//! The probe run: displays, acceleration hint, context, report, teardown.

use std::io;

use anyhow::Result;
use glprobe_core::AdapterReport;
use glprobe_env::{Acceleration, DisplayDevice};
use glprobe_render::{probe_capabilities, ContextHandle, Platform};

use crate::human;
use crate::report::GpuReport;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human { verbose_extensions: bool },
    Json,
}

pub struct Run<'a, O, E> {
    pub settings: &'a Settings,
    pub acceleration: Acceleration,
    pub format: OutputFormat,
    pub output: O,
    pub errors: E,
    displays: Vec<DisplayDevice>,
}

impl<'a, O: io::Write, E: io::Write> Run<'a, O, E> {
    /// Enumerate displays and set the acceleration hint. Both happen before
    /// any context exists.
    pub fn prepare(
        settings: &'a Settings,
        acceleration: Acceleration,
        format: OutputFormat,
        mut output: O,
        errors: E,
    ) -> Result<Self> {
        let displays = glprobe_env::enumerate_displays();
        if matches!(format, OutputFormat::Human { .. }) {
            human::print_displays(&mut output, &displays)?;
        }
        glprobe_env::set_acceleration(acceleration);

        Ok(Self {
            settings,
            acceleration,
            format,
            output,
            errors,
            displays,
        })
    }

    /// Bootstrap a context on `platform`, report on it and tear it down.
    /// A failed bootstrap is reported on the error stream and is not an
    /// error of the run.
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    pub fn probe<P: Platform>(mut self, platform: P) -> Result<()> {
        let handle = match ContextHandle::create(platform, &self.settings.context) {
            Ok(handle) => handle,
            Err(err) => {
                writeln!(self.errors, "error: {:#}", anyhow::Error::new(err))?;
                return match self.format {
                    OutputFormat::Json => self.render(None),
                    OutputFormat::Human { .. } => Ok(()),
                };
            }
        };

        let report = probe_capabilities(&handle);
        let rendered = self.render(Some(report));

        // Teardown warnings are written even when rendering failed
        for warning in handle.destroy() {
            writeln!(self.errors, "warning: {:#}", anyhow::Error::new(warning))?;
        }
        rendered
    }

    /// No OpenGL backend on this OS; only the displays can be reported.
    #[cfg_attr(target_os = "windows", allow(dead_code))]
    pub fn without_context(mut self) -> Result<()> {
        writeln!(self.errors, "error: no native OpenGL platform on this operating system")?;
        match self.format {
            OutputFormat::Json => self.render(None),
            OutputFormat::Human { .. } => Ok(()),
        }
    }

    fn render(&mut self, adapter: Option<AdapterReport>) -> Result<()> {
        match self.format {
            OutputFormat::Human { verbose_extensions } => {
                if let Some(adapter) = &adapter {
                    human::print_report(&mut self.output, adapter, verbose_extensions)?;
                }
            }
            OutputFormat::Json => {
                let report = GpuReport {
                    acceleration: self.acceleration.is_on(),
                    displays: std::mem::take(&mut self.displays),
                    adapter,
                };
                report.into_json(&mut self.output)?;
                writeln!(self.output)?;
            }
        }
        self.output.flush()?;
        Ok(())
    }
}
