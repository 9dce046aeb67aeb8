pub mod types;

pub use types::{ForegroundApp, ForegroundProbe, InstalledApp};

/// Probe used when no host adapter has been wired in.
///
/// It reports no foreground information and no launchable applications,
/// so enforcement stays fail-open and the registry stays empty until a
/// real adapter is injected.
pub struct NativeProbe;

impl NativeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundProbe for NativeProbe {
    fn foreground_app(&self) -> Option<ForegroundApp> {
        None
    }

    fn launchable_apps(&self) -> Vec<InstalledApp> {
        Vec::new()
    }
}
