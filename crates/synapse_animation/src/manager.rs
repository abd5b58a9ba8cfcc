//! Timeline managers
//!
//! A timeline manager owns the actual animation clock: node layout, phase
//! position and playback rate. The [`TimelineController`](crate::controller::TimelineController)
//! drives one imperatively and mirrors its state for widgets.
//!
//! [`PhaseTimeline`] is the built-in manager. It walks the phase table either
//! from explicit `tick(dt_ms)` calls or from its own background clock thread.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use synapse_core::{
    get_phase, phase_at, PhaseInfo, Result, SceneNode, SynapseError, Viewport, PHASES,
    TOTAL_DURATION_MS,
};

/// Called with the phase the timeline just entered
pub type PhaseChangeCallback = Arc<dyn Fn(PhaseInfo) + Send + Sync>;

/// Called with the new position after it moved
pub type ProgressCallback = Arc<dyn Fn(PositionSample) + Send + Sync>;

/// Called for lifecycle events (complete, play, pause, restart)
pub type EventCallback = Arc<dyn Fn() + Send + Sync>;

/// A progress reading tagged with the manager's jump counter
///
/// `seq` grows on every discontinuous move (seek, phase jump, restart, a
/// rewind before replaying). Readings sharing a `seq` never move backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionSample {
    pub progress: f64,
    pub seq: u64,
}

/// Callback bundle a manager reports through
#[derive(Clone, Default)]
pub struct TimelineCallbacks {
    pub on_phase_change: Option<PhaseChangeCallback>,
    pub on_progress: Option<ProgressCallback>,
    pub on_complete: Option<EventCallback>,
    pub on_play: Option<EventCallback>,
    pub on_pause: Option<EventCallback>,
    pub on_restart: Option<EventCallback>,
}

impl TimelineCallbacks {
    fn emit(&self, event: &TimelineEvent) {
        match event {
            TimelineEvent::PhaseChange(info) => {
                if let Some(cb) = &self.on_phase_change {
                    cb(info.clone());
                }
            }
            TimelineEvent::Progress(sample) => {
                if let Some(cb) = &self.on_progress {
                    cb(*sample);
                }
            }
            TimelineEvent::Complete => call(&self.on_complete),
            TimelineEvent::Play => call(&self.on_play),
            TimelineEvent::Pause => call(&self.on_pause),
            TimelineEvent::Restart => call(&self.on_restart),
        }
    }
}

fn call(callback: &Option<EventCallback>) {
    if let Some(cb) = callback {
        cb();
    }
}

/// The animation clock driven by the timeline controller
///
/// Operations other than `initialize` are synchronous and may invoke the
/// registered callbacks before returning. Implementations must not hold
/// internal locks while invoking callbacks.
#[async_trait]
pub trait TimelineManager: Send {
    /// Lay out the scene and prepare playback
    async fn initialize(&mut self, nodes: &[SceneNode], viewport: Viewport) -> Result<()>;

    /// Replace the callback bundle
    fn set_callbacks(&mut self, callbacks: TimelineCallbacks);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Return to the first phase and resume playing
    fn restart(&mut self) -> Result<()>;

    /// Jump to an absolute time in milliseconds
    fn seek(&mut self, time_ms: f64) -> Result<()>;

    /// Jump to the start of a phase
    fn go_to_phase(&mut self, index: usize) -> Result<()>;

    /// Change the playback rate; phase boundaries keep their proportions
    fn set_speed(&mut self, multiplier: f64) -> Result<()>;

    /// Collapse motion for users who prefer reduced motion
    fn enable_reduced_motion(&mut self) -> Result<()>;

    /// Release every resource; must be safe to call repeatedly
    fn destroy(&mut self);

    /// Fraction of the total duration elapsed
    fn progress(&self) -> f64;

    /// Progress together with the jump counter it was read under
    ///
    /// Managers that never jump on their own may keep the default, which
    /// reports every reading under `seq` 0.
    fn position(&self) -> PositionSample {
        PositionSample {
            progress: self.progress(),
            seq: 0,
        }
    }

    fn current_phase(&self) -> PhaseInfo;

    /// Total duration in milliseconds
    fn duration_ms(&self) -> u64;

    /// Diagnostic snapshot of manager internals
    fn debug_info(&self) -> serde_json::Value;
}

/// Events produced while the timeline state is locked, emitted after unlock
#[derive(Clone, Debug, PartialEq)]
enum TimelineEvent {
    PhaseChange(PhaseInfo),
    Progress(PositionSample),
    Complete,
    Play,
    Pause,
    Restart,
}

/// Effective speed boost applied once reduced motion is enabled
const REDUCED_MOTION_SPEEDUP: f64 = 4.0;

struct TimelineInner {
    initialized: bool,
    playing: bool,
    position_ms: f64,
    seq: u64,
    speed: f64,
    reduced_motion: bool,
    loop_playback: bool,
    current_phase: usize,
    node_count: usize,
    viewport: Option<Viewport>,
    callbacks: TimelineCallbacks,
    last_frame: Instant,
    frames: u64,
}

impl TimelineInner {
    fn progress(&self) -> f64 {
        (self.position_ms / TOTAL_DURATION_MS as f64).clamp(0.0, 1.0)
    }

    fn sample(&self) -> PositionSample {
        PositionSample {
            progress: self.progress(),
            seq: self.seq,
        }
    }

    fn phase_info(&self) -> PhaseInfo {
        PhaseInfo {
            index: self.current_phase,
            name: PHASES[self.current_phase].id.to_string(),
        }
    }

    fn require_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(SynapseError::NotInitialized)
        }
    }

    /// Move to `position_ms`, collecting phase and progress events
    fn move_to(&mut self, position_ms: f64, events: &mut Vec<TimelineEvent>) {
        self.position_ms = position_ms.clamp(0.0, TOTAL_DURATION_MS as f64);
        let phase = phase_at(self.position_ms as u64);
        if phase != self.current_phase {
            self.current_phase = phase;
            events.push(TimelineEvent::PhaseChange(self.phase_info()));
        }
        events.push(TimelineEvent::Progress(self.sample()));
    }

    /// Discontinuous move; readings taken before it become stale
    fn jump_to(&mut self, position_ms: f64, events: &mut Vec<TimelineEvent>) {
        self.seq += 1;
        self.move_to(position_ms, events);
    }

    fn advance(&mut self, dt_ms: f64) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        if !self.playing || dt_ms <= 0.0 {
            return events;
        }
        self.frames += 1;

        let rate = if self.reduced_motion {
            self.speed * REDUCED_MOTION_SPEEDUP
        } else {
            self.speed
        };
        let target = self.position_ms + dt_ms * rate;
        let total = TOTAL_DURATION_MS as f64;

        if target < total {
            self.move_to(target, &mut events);
        } else if self.loop_playback {
            self.seq += 1;
            self.current_phase = 0;
            self.position_ms = 0.0;
            events.push(TimelineEvent::Restart);
            events.push(TimelineEvent::PhaseChange(self.phase_info()));
            events.push(TimelineEvent::Progress(self.sample()));
        } else {
            self.move_to(total, &mut events);
            self.playing = false;
            events.push(TimelineEvent::Complete);
        }
        events
    }
}

/// Built-in timeline manager walking the phase table
///
/// # Example
///
/// ```ignore
/// let mut timeline = PhaseTimeline::new();
/// pollster::block_on(timeline.initialize(&nodes, Viewport::new(800.0, 600.0)))?;
/// timeline.play()?;
/// timeline.tick(16.0);
/// ```
pub struct PhaseTimeline {
    inner: Arc<Mutex<TimelineInner>>,
    clock_interval: Option<Duration>,
    clock: Option<ClockHandle>,
}

impl PhaseTimeline {
    /// A timeline advanced only by explicit [`tick`](Self::tick) calls
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimelineInner {
                initialized: false,
                playing: false,
                position_ms: 0.0,
                seq: 0,
                speed: 1.0,
                reduced_motion: false,
                loop_playback: false,
                current_phase: 0,
                node_count: 0,
                viewport: None,
                callbacks: TimelineCallbacks::default(),
                last_frame: Instant::now(),
                frames: 0,
            })),
            clock_interval: None,
            clock: None,
        }
    }

    /// Advance automatically from a background clock once initialized
    pub fn with_clock(mut self, frame_interval: Duration) -> Self {
        self.clock_interval = Some(frame_interval);
        self
    }

    /// Restart from the first phase instead of completing
    pub fn with_loop(self, loop_playback: bool) -> Self {
        self.inner.lock().unwrap().loop_playback = loop_playback;
        self
    }

    /// Advance the timeline by `dt_ms` of wall-clock time
    pub fn tick(&self, dt_ms: f64) {
        advance_and_emit(&self.inner, dt_ms);
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock().unwrap().playing
    }

    pub fn position_ms(&self) -> f64 {
        self.inner.lock().unwrap().position_ms
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Run a locked operation and emit the events it produced
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut TimelineInner, &mut Vec<TimelineEvent>) -> Result<()>,
    {
        let mut events = Vec::new();
        let callbacks = {
            let mut inner = self.inner.lock().unwrap();
            inner.require_initialized()?;
            f(&mut inner, &mut events)?;
            inner.callbacks.clone()
        };
        for event in &events {
            callbacks.emit(event);
        }
        Ok(())
    }

    fn stop_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.stop();
        }
    }
}

impl Default for PhaseTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PhaseTimeline {
    fn drop(&mut self) {
        self.stop_clock();
    }
}

fn advance_and_emit(inner: &Mutex<TimelineInner>, dt_ms: f64) {
    let (events, callbacks) = {
        let mut inner = inner.lock().unwrap();
        (inner.advance(dt_ms), inner.callbacks.clone())
    };
    for event in &events {
        callbacks.emit(event);
    }
}

#[async_trait]
impl TimelineManager for PhaseTimeline {
    async fn initialize(&mut self, nodes: &[SceneNode], viewport: Viewport) -> Result<()> {
        if viewport.is_empty() {
            return Err(SynapseError::Initialization(format!(
                "viewport {}x{} has no area",
                viewport.width, viewport.height
            )));
        }
        self.stop_clock();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.initialized = true;
            inner.playing = false;
            inner.position_ms = 0.0;
            inner.seq += 1;
            inner.current_phase = 0;
            inner.node_count = nodes.len();
            inner.viewport = Some(viewport);
            inner.last_frame = Instant::now();
        }
        if let Some(interval) = self.clock_interval {
            self.clock = Some(ClockHandle::spawn(Arc::downgrade(&self.inner), interval));
        }
        tracing::debug!(
            "PhaseTimeline: initialized with {} nodes on {}x{}",
            nodes.len(),
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    fn set_callbacks(&mut self, callbacks: TimelineCallbacks) {
        self.inner.lock().unwrap().callbacks = callbacks;
    }

    fn play(&mut self) -> Result<()> {
        self.update(|inner, events| {
            if inner.position_ms >= TOTAL_DURATION_MS as f64 {
                inner.jump_to(0.0, events);
            }
            inner.playing = true;
            inner.last_frame = Instant::now();
            events.push(TimelineEvent::Play);
            Ok(())
        })
    }

    fn pause(&mut self) -> Result<()> {
        self.update(|inner, events| {
            inner.playing = false;
            events.push(TimelineEvent::Pause);
            Ok(())
        })
    }

    fn restart(&mut self) -> Result<()> {
        self.update(|inner, events| {
            inner.jump_to(0.0, events);
            inner.playing = true;
            inner.last_frame = Instant::now();
            events.push(TimelineEvent::Restart);
            events.push(TimelineEvent::Play);
            Ok(())
        })
    }

    fn seek(&mut self, time_ms: f64) -> Result<()> {
        if !time_ms.is_finite() {
            return Err(SynapseError::Manager(format!("cannot seek to {}", time_ms)));
        }
        self.update(|inner, events| {
            inner.jump_to(time_ms, events);
            Ok(())
        })
    }

    fn go_to_phase(&mut self, index: usize) -> Result<()> {
        let start = get_phase(index)?.start_ms as f64;
        self.update(|inner, events| {
            inner.jump_to(start, events);
            Ok(())
        })
    }

    fn set_speed(&mut self, multiplier: f64) -> Result<()> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(SynapseError::InvalidSpeed(multiplier));
        }
        self.update(|inner, _| {
            inner.speed = multiplier;
            Ok(())
        })
    }

    fn enable_reduced_motion(&mut self) -> Result<()> {
        self.update(|inner, _| {
            inner.reduced_motion = true;
            Ok(())
        })
    }

    fn destroy(&mut self) {
        self.stop_clock();
        let mut inner = self.inner.lock().unwrap();
        inner.initialized = false;
        inner.playing = false;
        inner.position_ms = 0.0;
        inner.current_phase = 0;
        inner.callbacks = TimelineCallbacks::default();
    }

    fn progress(&self) -> f64 {
        self.inner.lock().unwrap().progress()
    }

    fn position(&self) -> PositionSample {
        self.inner.lock().unwrap().sample()
    }

    fn current_phase(&self) -> PhaseInfo {
        self.inner.lock().unwrap().phase_info()
    }

    fn duration_ms(&self) -> u64 {
        TOTAL_DURATION_MS
    }

    fn debug_info(&self) -> serde_json::Value {
        let inner = self.inner.lock().unwrap();
        json!({
            "manager": "PhaseTimeline",
            "initialized": inner.initialized,
            "playing": inner.playing,
            "positionMs": inner.position_ms,
            "positionSeq": inner.seq,
            "speed": inner.speed,
            "reducedMotion": inner.reduced_motion,
            "loop": inner.loop_playback,
            "currentPhase": inner.current_phase,
            "nodeCount": inner.node_count,
            "viewport": inner.viewport.map(|v| json!({ "width": v.width, "height": v.height })),
            "frames": inner.frames,
            "clockRunning": self.clock.is_some(),
        })
    }
}

/// Background thread advancing a [`PhaseTimeline`] at a fixed frame cadence
struct ClockHandle {
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ClockHandle {
    fn spawn(inner: Weak<Mutex<TimelineInner>>, frame_interval: Duration) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_flag);

        let thread = thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                let start = Instant::now();

                let Some(inner) = inner.upgrade() else {
                    break;
                };
                let dt_ms = {
                    let mut guard = inner.lock().unwrap();
                    let now = Instant::now();
                    let dt = (now - guard.last_frame).as_secs_f64() * 1000.0;
                    guard.last_frame = now;
                    dt
                };
                advance_and_emit(&inner, dt_ms);
                drop(inner);

                let elapsed = start.elapsed();
                if elapsed < frame_interval {
                    thread::sleep(frame_interval - elapsed);
                }
            }
        });

        Self {
            stop_flag,
            thread: Some(thread),
        }
    }

    fn stop(mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.thread().id() != thread::current().id() {
                let _ = thread.join();
            }
        }
    }
}
