//! Shared test utilities for KidSafe.
//!
//! Provides the fake probe and recording sink used across module tests.

#![cfg(test)]

use crate::models::AppRecord;
use crate::monitor::RemediationSink;
use crate::platform::{ForegroundApp, ForegroundProbe, InstalledApp};
use crate::registry::AppRegistry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

/// Scripted stand-in for the host OS probe.
pub struct FakeProbe {
    foreground: Mutex<Option<ForegroundApp>>,
    installed: Mutex<Vec<InstalledApp>>,
    queries: AtomicUsize,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self {
            foreground: Mutex::new(None),
            installed: Mutex::new(Vec::new()),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn set_foreground(&self, app: Option<ForegroundApp>) {
        *self.foreground.lock().expect("foreground lock") = app;
    }

    pub fn install(&self, app: InstalledApp) {
        self.installed.lock().expect("installed lock").push(app);
    }

    /// Number of foreground queries the probe has answered.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ForegroundProbe for FakeProbe {
    fn foreground_app(&self) -> Option<ForegroundApp> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.foreground.lock().expect("foreground lock").clone()
    }

    fn launchable_apps(&self) -> Vec<InstalledApp> {
        self.installed.lock().expect("installed lock").clone()
    }
}

/// Remediation sink that records every call it receives.
pub struct RecordingSink {
    calls: Mutex<Vec<(ForegroundApp, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn last(&self) -> Option<ForegroundApp> {
        self.calls
            .lock()
            .expect("calls lock")
            .last()
            .map(|(offender, _)| offender.clone())
    }
}

impl RemediationSink for RecordingSink {
    fn remediate(&self, offender: &ForegroundApp, notice: &str) {
        self.calls
            .lock()
            .expect("calls lock")
            .push((offender.clone(), notice.to_string()));
    }
}

pub fn installed(label: &str, package: &str, component: &str) -> InstalledApp {
    InstalledApp {
        label: label.to_string(),
        package: package.to_string(),
        component: component.to_string(),
    }
}

pub fn foreground(package: &str, component: &str) -> ForegroundApp {
    ForegroundApp {
        package: package.to_string(),
        component: component.to_string(),
    }
}

pub fn record(label: &str, package: &str, component: &str, blocked: bool) -> AppRecord {
    AppRecord::new(label, package, component, blocked)
}

/// Open a registry backed by a scratch file. Keep the `TempDir` alive
/// for the duration of the test.
pub fn setup_registry(probe: Arc<dyn ForegroundProbe>) -> (AppRegistry, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for registry");
    let path = dir.path().join("registry");
    let registry = AppRegistry::open(path, probe).expect("Failed to open test registry");
    (registry, dir)
}
