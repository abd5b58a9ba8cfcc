//! Timeline controller
//!
//! Gives widgets one coherent handle on a [`TimelineManager`]: imperative
//! controls (play, pause, seek...) plus a derived, read-only [`TimelineState`].
//!
//! Failures never cross this boundary. Errors from the manager, and control
//! calls made before initialization, are written to `TimelineState::error`.
//!
//! # State freshness
//!
//! Position (progress and current phase) reaches the state through two paths:
//! manager progress callbacks and a background poller sampling the manager
//! while playing. Both deliver a [`PositionSample`] and go through one filter:
//!
//! - the manager tags each sample with its jump counter. A sample older than
//!   the newest counter seen is dropped, and a newer one is taken as is, even
//!   when it moves backwards (a rewind before replaying);
//! - every jump requested through the controller bumps a position epoch, and a
//!   poll that read the manager under an older epoch is dropped;
//! - within one counter, progress never moves backwards.
//!
//! `current_phase` is derived from the accepted progress.
//!
//! Lifecycle flags (`is_playing`) are owned by the play/pause/complete/restart
//! callbacks only.

use crate::manager::{PositionSample, TimelineCallbacks, TimelineManager};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use synapse_core::{
    get_phase, phase_at, MotionPreference, Result, SceneNode, SynapseError, TimelineConfig,
    TimelineState, Viewport,
};

/// Builds a fresh manager for each `initialize`
pub type ManagerFactory = Box<dyn Fn() -> Box<dyn TimelineManager> + Send + Sync>;

/// Controller behavior knobs
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineOptions {
    /// Start playing as soon as initialization succeeds
    pub autoplay: bool,
    /// Poller cadence while playing
    pub poll_interval: Duration,
    /// Speed applied right after initialization
    pub initial_speed: f64,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            poll_interval: Duration::from_millis(50),
            initial_speed: 1.0,
        }
    }
}

impl From<&TimelineConfig> for TimelineOptions {
    fn from(config: &TimelineConfig) -> Self {
        Self {
            autoplay: config.autoplay,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            initial_speed: config.speed,
        }
    }
}

/// State shared between the controller, manager callbacks and the poller
struct ControllerShared {
    manager: Mutex<Option<Box<dyn TimelineManager>>>,
    state: Mutex<TimelineState>,
    /// Bumped on every position jump
    epoch: AtomicU64,
    /// Newest manager jump counter accepted; written under the state lock
    position_seq: AtomicU64,
    /// Bumped whenever the manager is replaced or destroyed
    generation: AtomicU64,
    reduced_motion_applied: AtomicBool,
}

impl ControllerShared {
    fn record_error(&self, operation: &str, error: &SynapseError) {
        tracing::warn!("TimelineController: {} failed: {}", operation, error);
        self.state.lock().unwrap().error = Some(error.to_string());
    }

    /// Apply a position sample unless it predates a known jump
    fn apply_sample(&self, epoch: u64, sample: PositionSample) -> bool {
        let mut state = self.state.lock().unwrap();
        if self.epoch.load(Ordering::SeqCst) != epoch || !state.is_initialized {
            return false;
        }
        let seen = self.position_seq.load(Ordering::SeqCst);
        let progress = sample.progress.clamp(0.0, 1.0);
        if sample.seq < seen || (sample.seq == seen && progress < state.progress) {
            return false;
        }
        self.position_seq.store(sample.seq, Ordering::SeqCst);
        state.progress = progress;
        state.current_phase = phase_at((progress * state.duration_ms as f64) as u64);
        true
    }

    /// Write a jump target, invalidating in-flight samples
    ///
    /// `seq` is the manager's jump counter after the jump, when known.
    fn jump_to(&self, progress: f64, phase: usize, seq: Option<u64>) {
        let mut state = self.state.lock().unwrap();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(seq) = seq {
            self.position_seq.fetch_max(seq, Ordering::SeqCst);
        }
        state.progress = progress.clamp(0.0, 1.0);
        state.current_phase = phase;
    }

    fn poll_once(&self) -> bool {
        if !self.state.lock().unwrap().is_playing {
            return false;
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let sample = {
            let manager = self.manager.lock().unwrap();
            manager.as_ref().map(|m| m.position())
        };
        match sample {
            Some(sample) => self.apply_sample(epoch, sample),
            None => false,
        }
    }
}

/// Imperative + reactive handle on an animation timeline
///
/// Dropping the controller destroys the manager and stops the poller.
///
/// # Example
///
/// ```ignore
/// let controller = TimelineController::new(
///     Box::new(|| Box::new(PhaseTimeline::new().with_clock(Duration::from_millis(16)))),
///     TimelineOptions { autoplay: true, ..Default::default() },
/// );
/// pollster::block_on(controller.initialize(&nodes, Viewport::new(1280.0, 720.0)));
///
/// let state = controller.state();
/// if let Some(error) = state.error {
///     tracing::warn!("animation unavailable: {}", error);
/// }
/// ```
pub struct TimelineController {
    factory: ManagerFactory,
    options: TimelineOptions,
    shared: Arc<ControllerShared>,
    poller: Mutex<Option<PollerHandle>>,
}

impl TimelineController {
    pub fn new(factory: ManagerFactory, options: TimelineOptions) -> Self {
        Self {
            factory,
            options,
            shared: Arc::new(ControllerShared {
                manager: Mutex::new(None),
                state: Mutex::new(TimelineState::default()),
                epoch: AtomicU64::new(0),
                position_seq: AtomicU64::new(0),
                generation: AtomicU64::new(0),
                reduced_motion_applied: AtomicBool::new(false),
            }),
            poller: Mutex::new(None),
        }
    }

    /// Snapshot of the observable state
    pub fn state(&self) -> TimelineState {
        self.shared.state.lock().unwrap().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.state.lock().unwrap().is_initialized
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    /// Build (or rebuild) the manager and prepare playback
    ///
    /// Never fails: errors end up in `state().error` with `is_playing` false,
    /// and the controller stays usable for another attempt.
    pub async fn initialize(&self, nodes: &[SceneNode], viewport: Viewport) {
        self.teardown();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut manager = (self.factory)();
        manager.set_callbacks(self.callbacks(generation));

        if let Err(error) = manager.initialize(nodes, viewport).await {
            manager.destroy();
            if self.shared.generation.load(Ordering::SeqCst) == generation {
                let mut state = self.shared.state.lock().unwrap();
                *state = TimelineState {
                    error: Some(error.to_string()),
                    ..TimelineState::default()
                };
            }
            tracing::warn!("TimelineController: initialization failed: {}", error);
            return;
        }

        // A concurrent initialize or destroy superseded this attempt
        if self.shared.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("TimelineController: discarding superseded initialization");
            manager.destroy();
            return;
        }

        if self.options.initial_speed != 1.0 {
            if let Err(error) = manager.set_speed(self.options.initial_speed) {
                self.shared.record_error("set_speed", &error);
            }
        }

        let duration_ms = manager.duration_ms();
        let phase = manager.current_phase();
        let position = manager.position();
        {
            let mut slot = self.shared.manager.lock().unwrap();
            *slot = Some(manager);
            let mut state = self.shared.state.lock().unwrap();
            self.shared.epoch.fetch_add(1, Ordering::SeqCst);
            self.shared
                .position_seq
                .store(position.seq, Ordering::SeqCst);
            *state = TimelineState {
                is_initialized: true,
                is_playing: false,
                current_phase: phase.index,
                progress: position.progress,
                duration_ms,
                error: None,
            };
        }

        *self.poller.lock().unwrap() = Some(PollerHandle::spawn(
            Arc::downgrade(&self.shared),
            self.options.poll_interval,
        ));

        tracing::info!(
            "TimelineController: initialized ({} nodes, {}ms)",
            nodes.len(),
            duration_ms
        );

        if self.options.autoplay {
            self.play();
        }
    }

    /// Callback bundle that ignores events from superseded managers
    fn callbacks(&self, generation: u64) -> TimelineCallbacks {
        let weak = Arc::downgrade(&self.shared);
        let with_current = move |f: &dyn Fn(&ControllerShared)| {
            if let Some(shared) = weak.upgrade() {
                if shared.generation.load(Ordering::SeqCst) == generation {
                    f(&shared);
                }
            }
        };
        let with_current = Arc::new(with_current);

        let on_play = Arc::clone(&with_current);
        let on_pause = Arc::clone(&with_current);
        let on_complete = Arc::clone(&with_current);
        let on_restart = Arc::clone(&with_current);
        let on_progress = Arc::clone(&with_current);
        let on_phase = with_current;

        TimelineCallbacks {
            on_play: Some(Arc::new(move || {
                on_play(&|shared| shared.state.lock().unwrap().is_playing = true)
            })),
            on_pause: Some(Arc::new(move || {
                on_pause(&|shared| shared.state.lock().unwrap().is_playing = false)
            })),
            on_complete: Some(Arc::new(move || {
                on_complete(&|shared| {
                    let mut state = shared.state.lock().unwrap();
                    state.is_playing = false;
                    state.progress = 1.0;
                    state.current_phase = phase_at(state.duration_ms);
                })
            })),
            on_restart: Some(Arc::new(move || {
                on_restart(&|shared| {
                    shared.jump_to(0.0, 0, None);
                    shared.state.lock().unwrap().is_playing = true;
                })
            })),
            on_progress: Some(Arc::new(move |sample| {
                on_progress(&|shared| {
                    let epoch = shared.epoch.load(Ordering::SeqCst);
                    shared.apply_sample(epoch, sample);
                })
            })),
            // The phase itself follows the progress sample emitted with it
            on_phase_change: Some(Arc::new(move |info| {
                on_phase(&|_| {
                    tracing::debug!("TimelineController: entered phase {} ({})", info.index, info.name);
                })
            })),
        }
    }

    /// Run an operation on the live manager, recording failures
    fn with_manager<R, F>(&self, operation: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn TimelineManager) -> Result<R>,
    {
        let mut slot = self.shared.manager.lock().unwrap();
        let result = match slot.as_mut() {
            Some(manager) => f(&mut **manager),
            None => Err(SynapseError::NotInitialized),
        };
        drop(slot);
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.shared.record_error(operation, &error);
                None
            }
        }
    }

    /// Start playback; `is_playing` flips when the manager confirms
    pub fn play(&self) {
        self.with_manager("play", |m| m.play());
    }

    pub fn pause(&self) {
        self.with_manager("pause", |m| m.pause());
    }

    /// Back to the first phase, playing
    pub fn restart(&self) {
        let seq = self.with_manager("restart", |m| {
            m.restart()?;
            Ok(m.position().seq)
        });
        if let Some(seq) = seq {
            self.shared.jump_to(0.0, 0, Some(seq));
        }
    }

    /// Jump to `time_ms`; progress updates immediately rather than on the next poll
    pub fn seek(&self, time_ms: f64) {
        let seq = self.with_manager("seek", |m| {
            m.seek(time_ms)?;
            Ok(m.position().seq)
        });
        if let Some(seq) = seq {
            let duration = self.shared.state.lock().unwrap().duration_ms;
            if duration > 0 {
                let clamped = time_ms.clamp(0.0, duration as f64);
                self.shared.jump_to(
                    clamped / duration as f64,
                    phase_at(clamped as u64),
                    Some(seq),
                );
            }
        }
    }

    /// Jump to the start of a phase
    pub fn go_to_phase(&self, index: usize) {
        let start_ms = match get_phase(index) {
            Ok(phase) => phase.start_ms,
            Err(error) => {
                if self.is_initialized() {
                    self.shared.record_error("go_to_phase", &error);
                } else {
                    self.shared
                        .record_error("go_to_phase", &SynapseError::NotInitialized);
                }
                return;
            }
        };
        let seq = self.with_manager("go_to_phase", |m| {
            m.go_to_phase(index)?;
            Ok(m.position().seq)
        });
        if let Some(seq) = seq {
            let duration = self.shared.state.lock().unwrap().duration_ms;
            if duration > 0 {
                self.shared
                    .jump_to(start_ms as f64 / duration as f64, index, Some(seq));
            }
        }
    }

    /// Change playback rate
    pub fn set_speed(&self, multiplier: f64) {
        if !(multiplier.is_finite() && multiplier > 0.0) && self.is_initialized() {
            self.shared
                .record_error("set_speed", &SynapseError::InvalidSpeed(multiplier));
            return;
        }
        self.with_manager("set_speed", |m| m.set_speed(multiplier));
    }

    pub fn enable_reduced_motion(&self) {
        if self
            .with_manager("enable_reduced_motion", |m| m.enable_reduced_motion())
            .is_some()
        {
            tracing::info!("TimelineController: reduced motion enabled");
        }
    }

    /// Enable reduced motion once if the platform asks for it
    ///
    /// Returns whether reduced motion was applied by this call.
    pub fn apply_motion_preference(&self, preference: &dyn MotionPreference) -> bool {
        if !self.is_initialized() || !preference.prefers_reduced_motion() {
            return false;
        }
        if self.shared.reduced_motion_applied.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.enable_reduced_motion();
        true
    }

    /// Clear a previously recorded error
    pub fn clear_error(&self) {
        self.shared.state.lock().unwrap().error = None;
    }

    /// Sample the manager once; returns whether the state changed
    ///
    /// The background poller calls this on its own; hosts with a frame loop
    /// may call it directly.
    pub fn poll_once(&self) -> bool {
        self.shared.poll_once()
    }

    /// Manager internals plus controller state; never fails
    pub fn get_debug_info(&self) -> serde_json::Value {
        let manager = self
            .shared
            .manager
            .lock()
            .unwrap()
            .as_ref()
            .map(|m| m.debug_info())
            .unwrap_or(serde_json::Value::Null);
        let state = serde_json::to_value(self.state()).unwrap_or(serde_json::Value::Null);
        json!({
            "manager": manager,
            "state": state,
            "epoch": self.shared.epoch.load(Ordering::SeqCst),
            "positionSeq": self.shared.position_seq.load(Ordering::SeqCst),
            "generation": self.shared.generation.load(Ordering::SeqCst),
            "pollerRunning": self.poller.lock().unwrap().is_some(),
            "reducedMotionApplied": self.shared.reduced_motion_applied.load(Ordering::SeqCst),
        })
    }

    /// Stop the poller and destroy the manager without touching state
    fn teardown(&self) {
        if let Some(poller) = self.poller.lock().unwrap().take() {
            poller.stop();
        }
        let previous = self.shared.manager.lock().unwrap().take();
        if let Some(mut manager) = previous {
            manager.destroy();
        }
    }

    /// Tear everything down and reset state; safe to call repeatedly
    pub fn destroy(&self) {
        self.teardown();
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        self.shared
            .reduced_motion_applied
            .store(false, Ordering::SeqCst);
        *self.shared.state.lock().unwrap() = TimelineState::default();
    }
}

impl Drop for TimelineController {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Background thread sampling the manager while playing
struct PollerHandle {
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PollerHandle {
    fn spawn(shared: Weak<ControllerShared>, interval: Duration) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_flag);

        let thread = thread::spawn(move || loop {
            thread::park_timeout(interval);
            if thread_stop.load(Ordering::Relaxed) {
                break;
            }
            let Some(shared) = shared.upgrade() else {
                break;
            };
            shared.poll_once();
        });

        Self {
            stop_flag,
            thread: Some(thread),
        }
    }

    fn stop(mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
            if thread.thread().id() != thread::current().id() {
                let _ = thread.join();
            }
        }
    }
}
