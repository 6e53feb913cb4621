//! # Traffic Light Controller
//!
//! Owns the phase, the phase channel and the toggling thread.
//!
//! ## Lifecycle
//!
//! ```text
//!   new() ──> [Idle, red] ──start()──> [Running] ──stop()/drop──> [Stopped]
//!                 │                        │
//!                 └──stop()────────────────┴──> start() is an error
//! ```
//!
//! ## Thread Safety
//!
//! - Phase: one lock, written only by the toggling loop
//! - Channel: its own lock, written by the loop, drained by waiters
//! - The two are never held together, so there is no lock ordering to get wrong
//!
//! `current_phase` may run fractionally ahead of a waiter being released;
//! the channel is the authoritative transition path.

use crate::config::LightConfig;
use crate::error::{LightError, LightResult};
use crate::phase::Phase;
use crate::stats::LightStats;
use crate::timer::CycleTimer;
use intersection_core::{PhaseChannel, ShutdownSignal};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// State shared between the controller and its toggling thread.
struct Shared {
    phase: Mutex<Phase>,
    channel: PhaseChannel<Phase>,
    stats: Mutex<LightStats>,
}

/// A traffic light that toggles red/green on a randomized cycle.
///
/// Share it between threads with `Arc`. Every method takes `&self`.
///
/// ## Usage
///
/// ```rust,no_run
/// use intersection::TrafficLight;
/// use std::sync::Arc;
/// use std::thread;
///
/// let light = Arc::new(TrafficLight::new());
/// light.start()?;
///
/// let car = {
///     let light = Arc::clone(&light);
///     thread::spawn(move || light.wait_for_green())
/// };
/// car.join().unwrap();
/// # Ok::<(), intersection::LightError>(())
/// ```
pub struct TrafficLight {
    config: LightConfig,
    shared: Arc<Shared>,
    shutdown: ShutdownSignal,
    started: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TrafficLight {
    /// Creates a red light with the default 4-6 second cycle.
    ///
    /// The light does not toggle until [`start`](Self::start) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::from_validated(LightConfig::default())
    }

    /// Creates a red light with custom timing.
    ///
    /// # Errors
    ///
    /// Returns [`LightError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: LightConfig) -> LightResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: LightConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                phase: Mutex::new(Phase::Red),
                channel: PhaseChannel::new(),
                stats: Mutex::new(LightStats::default()),
            }),
            shutdown: ShutdownSignal::new(),
            started: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    /// Returns a snapshot of the current phase. Never blocks on the loop.
    #[inline]
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        *self.shared.phase.lock()
    }

    /// Spawns the toggling loop and returns immediately.
    ///
    /// A light runs at most one loop over its lifetime.
    ///
    /// # Errors
    ///
    /// - [`LightError::AlreadyStarted`] if called a second time
    /// - [`LightError::Stopped`] if called after [`stop`](Self::stop)
    /// - [`LightError::Spawn`] if the OS cannot create the thread; the light
    ///   stays idle and `start` may be retried
    pub fn start(&self) -> LightResult<()> {
        if self.shutdown.is_triggered() {
            return Err(LightError::Stopped);
        }
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::warn!(light = %self.config.name, "start rejected, toggling loop already running");
            return Err(LightError::AlreadyStarted);
        }

        let shared = Arc::clone(&self.shared);
        let shutdown = self.shutdown.clone();
        let timer = CycleTimer::new(&self.config);
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name(format!("light-{}", self.config.name))
            .spawn(move || cycle_through_phases(&shared, &shutdown, timer, &config));

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.started.store(false, Ordering::Release);
                return Err(LightError::Spawn(e));
            }
        };
        *self.worker.lock() = Some(handle);

        tracing::info!(
            light = %self.config.name,
            min_cycle_ms = self.config.min_cycle_ms,
            max_cycle_ms = self.config.max_cycle_ms,
            "traffic light started"
        );
        Ok(())
    }

    /// Stops the toggling loop and joins its thread.
    ///
    /// Idempotent. Threads already blocked in [`wait_for_green`](Self::wait_for_green)
    /// stay blocked; use [`wait_for_green_timeout`](Self::wait_for_green_timeout)
    /// where a waiter must outlive the light's loop.
    pub fn stop(&self) {
        self.shutdown.trigger();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!(light = %self.config.name, "toggling loop panicked");
            } else {
                tracing::info!(light = %self.config.name, "traffic light stopped");
            }
        }
    }

    /// Returns true while the toggling loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::Acquire) && !self.shutdown.is_triggered()
    }

    /// Blocks until the next transition to green is received.
    ///
    /// Observes transitions, not the steady state: a light that is already
    /// green does not release the caller until it goes red and back.
    /// Every received red is discarded.
    ///
    /// Each green transition releases one caller; concurrent callers are
    /// served by successive green transitions.
    pub fn wait_for_green(&self) {
        while !self.shared.channel.receive().is_green() {}
    }

    /// Like [`wait_for_green`](Self::wait_for_green), bounded by `timeout`.
    ///
    /// Returns true if a green transition was received in time.
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait_for_green();
            return true;
        };

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.shared.channel.receive_timeout(remaining) {
                Some(Phase::Green) => return true,
                Some(Phase::Red) => {}
                None => return false,
            }
        }
    }

    /// Returns this light's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Returns a snapshot of the loop statistics.
    #[must_use]
    pub fn stats(&self) -> LightStats {
        self.shared.stats.lock().clone()
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficLight")
            .field("name", &self.config.name)
            .field("phase", &self.current_phase())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Toggling loop body. Runs until `shutdown` is triggered.
fn cycle_through_phases(
    shared: &Shared,
    shutdown: &ShutdownSignal,
    mut timer: CycleTimer,
    config: &LightConfig,
) {
    let poll_slice = config.poll_slice();
    let mut cycle = timer.next_cycle();
    let mut last_update = Instant::now();

    while !shutdown.wait_timeout(poll_slice) {
        let elapsed = last_update.elapsed();
        if elapsed < cycle {
            continue;
        }

        let phase = {
            let mut current = shared.phase.lock();
            *current = current.toggled();
            *current
        };

        let now = Instant::now();
        // Recorded before publishing so a released waiter sees its own toggle.
        shared.stats.lock().record(phase, now.duration_since(last_update), now);
        shared.channel.send(phase);

        tracing::debug!(
            light = %config.name,
            %phase,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "phase changed"
        );

        last_update = now;
        cycle = timer.next_cycle();
    }
}
