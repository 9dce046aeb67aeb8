use crate::constants::{BLOCKED_NOTICE, POLL_INTERVAL, SETTLE_INTERVAL};
use crate::platform::{ForegroundApp, ForegroundProbe};
use crate::registry::AppRegistry;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Capability the host injects to carry out a remediation: bring a
/// neutral/home surface to the foreground and show `notice` to the
/// user. Fire-and-forget from the monitor's point of view.
pub trait RemediationSink: Send + Sync {
    fn remediate(&self, offender: &ForegroundApp, notice: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Base interval between foreground samples.
    pub poll_interval: Duration,
    /// Extra pause after a remediation before sampling resumes.
    pub settle_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            settle_interval: SETTLE_INTERVAL,
        }
    }
}

/// Cancellable polling task that interrupts blocked foreground
/// applications.
///
/// Each instance carries its own cancellation token, so stopping one
/// monitor never affects another. Cancellation is cooperative: the
/// token is checked at the top of every cycle, so latency after
/// [`stop`](Self::stop) is bounded by one poll interval plus at most
/// one settle interval.
pub struct EnforcementMonitor {
    config: MonitorConfig,
    cancelled: Arc<AtomicBool>,
    registry: Arc<AppRegistry>,
    probe: Arc<dyn ForegroundProbe>,
    sink: Arc<dyn RemediationSink>,
}

impl EnforcementMonitor {
    pub fn new(
        registry: Arc<AppRegistry>,
        probe: Arc<dyn ForegroundProbe>,
        sink: Arc<dyn RemediationSink>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(true)),
            registry,
            probe,
            sink,
        }
    }

    /// Spawn the polling thread.
    pub fn start(&self) -> thread::JoinHandle<()> {
        self.cancelled.store(false, Ordering::SeqCst);

        let cancelled = Arc::clone(&self.cancelled);
        let registry = Arc::clone(&self.registry);
        let probe = Arc::clone(&self.probe);
        let sink = Arc::clone(&self.sink);
        let config = self.config;

        thread::spawn(move || {
            info!("enforcement monitor started");

            while !cancelled.load(Ordering::SeqCst) {
                thread::sleep(config.poll_interval);

                // Unknown foreground is "allow": keep polling.
                let Some(current) = probe.foreground_app() else {
                    continue;
                };

                // Any entry point of a blocked package counts, not just
                // the recorded launcher component.
                let is_blocked = registry
                    .load_blocked()
                    .iter()
                    .any(|record| record.package == current.package);

                if is_blocked {
                    info!(
                        "blocked application {} is in the foreground, remediating",
                        current.package
                    );
                    sink.remediate(&current, BLOCKED_NOTICE);

                    // Let the navigate-home request settle before
                    // re-sampling, so the offender is not flagged again
                    // while still on its way out.
                    thread::sleep(config.settle_interval);
                }
            }

            info!("enforcement monitor stopped");
        })
    }

    /// Request cancellation. Does not block waiting for the thread; the
    /// loop observes the token within one cycle.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }

    /// Component of the current foreground entry point, if known.
    pub fn foreground_component(&self) -> Option<String> {
        self.probe.foreground_app().map(|app| app.component)
    }
}
