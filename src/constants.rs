// src/constants.rs

use std::time::Duration;

/// Base interval between foreground samples.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Extra pause after a remediation so the navigate-home request can
/// take effect before the next sample.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Interval at which the screen change listener re-checks its stop flag
/// while waiting for power events.
pub const LISTENER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// File name of the persisted registry artifact.
pub const REGISTRY_FILE_NAME: &str = "kidsafe_runnable_apps";

/// Advisory shown to the user when a blocked application is interrupted.
pub const BLOCKED_NOTICE: &str = "This app is blocked by KidSafe.";
