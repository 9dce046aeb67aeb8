#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundApp {
    pub package: String,
    pub component: String,
}

#[derive(Debug, Clone)]
pub struct InstalledApp {
    pub label: String,
    pub package: String,
    pub component: String,
}

/// Host OS query surface consumed by the engine.
///
/// Implementors swallow their own query failures: `None` / an empty
/// list is the degraded answer, never an error.
pub trait ForegroundProbe: Send + Sync {
    /// Identity of the application currently in the foreground.
    /// `None` means no foreground information is available; callers
    /// treat it as "allow".
    fn foreground_app(&self) -> Option<ForegroundApp>;

    /// Every launchable application on the host.
    fn launchable_apps(&self) -> Vec<InstalledApp>;
}
