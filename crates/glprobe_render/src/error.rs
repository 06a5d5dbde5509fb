use thiserror::Error;

/// A failed platform call together with the OS error it left behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed (os error {code})")]
pub struct PlatformError {
    pub operation: &'static str,
    pub code: u32,
}

impl PlatformError {
    pub fn new(operation: &'static str, code: u32) -> Self {
        Self { operation, code }
    }
}

/// Acquisition steps, in the order the bootstrap runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquireStep {
    RegisterClass,
    CreateWindow,
    AcquireSurface,
    ChooseFormat,
    ApplyFormat,
    CreateContext,
    MakeCurrent,
    LoadFunctions,
}

impl AcquireStep {
    pub const ALL: [AcquireStep; 8] = [
        AcquireStep::RegisterClass,
        AcquireStep::CreateWindow,
        AcquireStep::AcquireSurface,
        AcquireStep::ChooseFormat,
        AcquireStep::ApplyFormat,
        AcquireStep::CreateContext,
        AcquireStep::MakeCurrent,
        AcquireStep::LoadFunctions,
    ];

    /// Wrap a platform failure at this step.
    pub fn fail(self, source: PlatformError) -> BootstrapError {
        match self {
            AcquireStep::RegisterClass => BootstrapError::ClassRegistrationFailed(source),
            AcquireStep::CreateWindow => BootstrapError::WindowCreationFailed(source),
            AcquireStep::AcquireSurface => BootstrapError::SurfaceAcquisitionFailed(source),
            AcquireStep::ChooseFormat => BootstrapError::FormatSelectionFailed(source),
            AcquireStep::ApplyFormat => BootstrapError::FormatApplicationFailed(source),
            AcquireStep::CreateContext => BootstrapError::ContextCreationFailed(source),
            AcquireStep::MakeCurrent => BootstrapError::ContextActivationFailed(source),
            AcquireStep::LoadFunctions => BootstrapError::FunctionLoadFailed(source),
        }
    }
}

/// Errors that abort context creation. Everything acquired before the failing
/// step has already been released when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("can't register the window class")]
    ClassRegistrationFailed(#[source] PlatformError),

    #[error("window creation error")]
    WindowCreationFailed(#[source] PlatformError),

    #[error("can't create a GL device context")]
    SurfaceAcquisitionFailed(#[source] PlatformError),

    #[error("can't find a suitable pixel format")]
    FormatSelectionFailed(#[source] PlatformError),

    #[error("can't set the pixel format")]
    FormatApplicationFailed(#[source] PlatformError),

    #[error("can't create a GL rendering context")]
    ContextCreationFailed(#[source] PlatformError),

    #[error("can't activate the GL rendering context")]
    ContextActivationFailed(#[source] PlatformError),

    #[error("can't load the OpenGL entry points")]
    FunctionLoadFailed(#[source] PlatformError),
}

impl BootstrapError {
    /// The acquisition step that failed.
    pub fn step(&self) -> AcquireStep {
        match self {
            BootstrapError::ClassRegistrationFailed(_) => AcquireStep::RegisterClass,
            BootstrapError::WindowCreationFailed(_) => AcquireStep::CreateWindow,
            BootstrapError::SurfaceAcquisitionFailed(_) => AcquireStep::AcquireSurface,
            BootstrapError::FormatSelectionFailed(_) => AcquireStep::ChooseFormat,
            BootstrapError::FormatApplicationFailed(_) => AcquireStep::ApplyFormat,
            BootstrapError::ContextCreationFailed(_) => AcquireStep::CreateContext,
            BootstrapError::ContextActivationFailed(_) => AcquireStep::MakeCurrent,
            BootstrapError::FunctionLoadFailed(_) => AcquireStep::LoadFunctions,
        }
    }
}

/// Release steps, in the order teardown runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseStep {
    MakeNotCurrent,
    DeleteContext,
    ReleaseSurface,
    DestroyWindow,
    UnregisterClass,
}

impl ReleaseStep {
    pub fn describe(self) -> &'static str {
        match self {
            ReleaseStep::MakeNotCurrent => "release of device context and rendering context failed",
            ReleaseStep::DeleteContext => "release of rendering context failed",
            ReleaseStep::ReleaseSurface => "release of device context failed",
            ReleaseStep::DestroyWindow => "could not destroy the window",
            ReleaseStep::UnregisterClass => "could not unregister the window class",
        }
    }
}

/// A release step that failed during teardown. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .step.describe())]
pub struct TeardownWarning {
    pub step: ReleaseStep,
    #[source]
    pub source: PlatformError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_round_trips_through_error() {
        for step in AcquireStep::ALL {
            assert_eq!(step.fail(PlatformError::new("Call", 5)).step(), step);
        }
    }

    #[test]
    fn error_chain_keeps_os_code() {
        let err = AcquireStep::ApplyFormat.fail(PlatformError::new("SetPixelFormat", 2000));
        let source = std::error::Error::source(&err).unwrap();

        assert_eq!(err.to_string(), "can't set the pixel format");
        assert_eq!(source.to_string(), "SetPixelFormat failed (os error 2000)");
    }
}
