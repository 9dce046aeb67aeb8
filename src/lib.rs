//! KidSafe enforcement engine.
//!
//! Watches the application in the device foreground and interrupts it
//! when it is on the blocklist: a [`registry`] of per-application
//! allow/block records reconciled against the installed set, a polling
//! [`monitor`] that samples foreground identity through an injected
//! platform probe, and a [`lifecycle`] controller that starts and stops
//! monitoring on screen power events.
//!
//! Presentation is out of scope: the host supplies a
//! [`platform::ForegroundProbe`] for OS queries and a
//! [`monitor::RemediationSink`] to carry out the navigate-home request
//! and advisory notification.

pub mod constants;
pub mod error;
pub mod lifecycle;
mod models;
pub mod monitor;
pub mod platform;
pub mod registry;
#[cfg(test)]
mod test_utils;

pub use error::AppError;
pub use lifecycle::{PowerEvent, ScreenChangeController, ScreenChangeListener};
pub use models::AppRecord;
pub use monitor::{EnforcementMonitor, MonitorConfig, RemediationSink};
pub use platform::{ForegroundApp, ForegroundProbe, InstalledApp, NativeProbe};
pub use registry::{default_registry_path, AppRegistry};

use std::sync::Arc;

/// Wire a controller over the registry at its default app-scoped
/// location, seeding the registry on first use.
pub fn default_controller(
    probe: Arc<dyn ForegroundProbe>,
    sink: Arc<dyn RemediationSink>,
) -> Result<ScreenChangeController, AppError> {
    let path = default_registry_path()?;
    let registry = Arc::new(AppRegistry::open(path, Arc::clone(&probe))?);
    Ok(ScreenChangeController::new(
        registry,
        probe,
        sink,
        MonitorConfig::default(),
    ))
}
