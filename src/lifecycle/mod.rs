use crate::constants::LISTENER_POLL_INTERVAL;
use crate::monitor::{EnforcementMonitor, MonitorConfig, RemediationSink};
use crate::platform::ForegroundProbe;
use crate::registry::AppRegistry;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Power-state transition of the device screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    ScreenOn,
    ScreenOff,
}

struct ActiveMonitor {
    monitor: EnforcementMonitor,
    // Held so the thread can be observed; the controller never blocks
    // on it, cancellation is fire-and-forget.
    _handle: JoinHandle<()>,
}

/// Starts and stops the enforcement monitor as the screen turns on and
/// off, so nothing polls while the device is asleep.
///
/// Event delivery is out of the controller's hands: duplicate or
/// out-of-order events are absorbed (a repeated screen-on is an
/// idempotent restart, a repeated screen-off a no-op). Dropping the
/// controller stops any monitor it still owns.
pub struct ScreenChangeController {
    registry: Arc<AppRegistry>,
    probe: Arc<dyn ForegroundProbe>,
    sink: Arc<dyn RemediationSink>,
    config: MonitorConfig,
    active: Option<ActiveMonitor>,
}

impl ScreenChangeController {
    pub fn new(
        registry: Arc<AppRegistry>,
        probe: Arc<dyn ForegroundProbe>,
        sink: Arc<dyn RemediationSink>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            registry,
            probe,
            sink,
            config,
            active: None,
        }
    }

    /// Begin monitoring immediately, ahead of the first power event.
    pub fn start(&mut self) {
        self.start_monitor();
    }

    pub fn handle_event(&mut self, event: PowerEvent) {
        match event {
            PowerEvent::ScreenOn => {
                debug!("screen on, starting enforcement monitor");
                self.start_monitor();
            }
            PowerEvent::ScreenOff => {
                debug!("screen off, stopping enforcement monitor");
                self.stop_monitor();
            }
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.monitor.is_running())
    }

    fn start_monitor(&mut self) {
        // A monitor may already be running if screen-on arrives twice;
        // cancel it and start fresh.
        self.stop_monitor();

        let monitor = EnforcementMonitor::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.probe),
            Arc::clone(&self.sink),
            self.config,
        );
        let handle = monitor.start();
        self.active = Some(ActiveMonitor {
            monitor,
            _handle: handle,
        });
    }

    fn stop_monitor(&mut self) {
        if let Some(active) = self.active.take() {
            active.monitor.stop();
        }
    }
}

impl Drop for ScreenChangeController {
    fn drop(&mut self) {
        self.stop_monitor();
    }
}

/// Scoped subscription to a stream of power events.
///
/// Spawning registers the subscription; dropping (or calling
/// [`shutdown`](Self::shutdown)) releases it exactly once and waits for
/// the listener thread, so no subscription outlives its owning session.
pub struct ScreenChangeListener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ScreenChangeListener {
    /// Spawn a thread that feeds `events` into `controller` until the
    /// sender disconnects or the listener is shut down.
    pub fn spawn(events: Receiver<PowerEvent>, mut controller: ScreenChangeController) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            info!("screen change listener registered");

            loop {
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }
                match events.recv_timeout(LISTENER_POLL_INTERVAL) {
                    Ok(event) => controller.handle_event(event),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            info!("screen change listener deregistered");
            // Dropping the controller here stops any running monitor.
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Release the subscription and wait for the listener to exit.
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("screen change listener thread panicked");
            }
        }
    }
}

impl Drop for ScreenChangeListener {
    fn drop(&mut self) {
        self.release();
    }
}
