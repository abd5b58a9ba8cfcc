//! Single-owner flow timer for the hero transformation widget
//!
//! The hero widget cycles through the five [`FlowState`]s on a fixed-cadence
//! interval. Hosts may mount the widget twice in quick succession (double
//! mounting during development, fast route transitions), and two intervals
//! driving the same visual state would double the animation speed. A
//! [`TimerGuard`] therefore owns the one live interval:
//!
//! - `install` atomically cancels whatever interval exists (logging a takeover
//!   when it belonged to another instance) and starts a new one owned by the
//!   caller;
//! - `release` only succeeds for the current owner;
//! - every interval carries a generation number, and an interval ticks only
//!   while the guard is locked and its generation is current. A takeover
//!   waits for an in-flight tick, so a cancelled interval never produces
//!   another one.
//!
//! # Progress and transitions
//!
//! Each tick adds `100 * tick_ms / effective_duration` percent, where the
//! effective duration is the base duration times the current state's
//! multiplier (the specification state lingers). When progress reaches 100
//! the flow advances to the next state and takes the transition lock. A second
//! overflow while the lock is held only resets progress. The interval driver
//! releases the lock with [`TransformationFlow::settle`] right after the tick
//! that advanced has been published.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use synapse_core::{FlowConfig, FlowState};

/// Progress (in percent) that completes a flow state
const FULL_PROGRESS: f64 = 100.0;

/// Absorbs accumulated rounding when summing fractional increments
const PROGRESS_EPSILON: f64 = 1e-9;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

static GLOBAL_GUARD: OnceLock<Arc<TimerGuard>> = OnceLock::new();

/// Opaque identifier of a widget instance
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    /// A process-unique id
    pub fn next() -> Self {
        Self(format!(
            "flow-{}",
            NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A running interval
///
/// Cancelling only signals the thread; it exits at its next wake-up without
/// ticking. It is never joined, so cancellation is safe from inside a tick
/// callback.
pub struct IntervalHandle {
    generation: u64,
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl IntervalHandle {
    /// An interval with no thread behind it, ticked by the host
    pub fn manual(generation: u64) -> Self {
        Self {
            generation,
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_threaded(&self) -> bool {
        self.thread.is_some()
    }

    fn cancel(mut self) {
        self.stop_flag.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
        }
    }
}

struct GuardRecord {
    owner: Option<InstanceId>,
    interval: Option<IntervalHandle>,
    next_generation: u64,
}

/// Result of [`TimerGuard::install`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Installation {
    pub generation: u64,
    /// Instance whose interval was cancelled to make room, if any
    pub displaced: Option<InstanceId>,
}

/// Process-wide record of the one interval allowed to drive the flow
///
/// All operations run under one mutex, so claim, release and takeover are
/// each atomic with respect to every other instance.
pub struct TimerGuard {
    record: Mutex<GuardRecord>,
}

impl TimerGuard {
    pub fn new() -> Self {
        Self {
            record: Mutex::new(GuardRecord {
                owner: None,
                interval: None,
                next_generation: 1,
            }),
        }
    }

    /// The guard shared by every widget in the process
    pub fn global() -> Arc<TimerGuard> {
        Arc::clone(GLOBAL_GUARD.get_or_init(|| Arc::new(TimerGuard::new())))
    }

    /// Cancel any live interval and start one owned by `owner`
    ///
    /// `start` receives the generation of the new interval and runs while the
    /// guard is locked; it must not call back into the guard.
    pub fn install<F>(&self, owner: &InstanceId, start: F) -> Installation
    where
        F: FnOnce(u64) -> IntervalHandle,
    {
        let mut record = self.record.lock().unwrap();
        let displaced = Self::take_interval(&mut record, owner);

        let generation = record.next_generation;
        record.next_generation += 1;
        record.interval = Some(start(generation));
        record.owner = Some(owner.clone());
        tracing::debug!("TimerGuard: {} claimed interval #{}", owner, generation);

        Installation {
            generation,
            displaced,
        }
    }

    /// Cancel any live interval on behalf of `requester`, whoever owns it
    ///
    /// Returns the displaced owner when it was a different instance.
    pub fn clear(&self, requester: &InstanceId) -> Option<InstanceId> {
        let mut record = self.record.lock().unwrap();
        Self::take_interval(&mut record, requester)
    }

    /// Cancel the interval if `owner` holds it; other owners are untouched
    pub fn release(&self, owner: &InstanceId) -> bool {
        let mut record = self.record.lock().unwrap();
        if record.owner.as_ref() != Some(owner) {
            return false;
        }
        record.owner = None;
        if let Some(interval) = record.interval.take() {
            tracing::debug!("TimerGuard: {} released interval #{}", owner, interval.generation);
            interval.cancel();
        }
        true
    }

    pub fn owner(&self) -> Option<InstanceId> {
        self.record.lock().unwrap().owner.clone()
    }

    pub fn is_running(&self) -> bool {
        self.record.lock().unwrap().interval.is_some()
    }

    /// Whether the interval with `generation` is still the live one
    pub fn is_current(&self, generation: u64) -> bool {
        self.record
            .lock()
            .unwrap()
            .interval
            .as_ref()
            .is_some_and(|i| i.generation == generation)
    }

    /// Run `f` while the interval with `generation` is live
    ///
    /// The guard stays locked while `f` runs, so no install, clear or release
    /// can interleave with it. `f` must not call back into the guard.
    pub fn run_if_current<R>(&self, generation: u64, f: impl FnOnce() -> R) -> Option<R> {
        let record = self.record.lock().unwrap();
        let current = record
            .interval
            .as_ref()
            .is_some_and(|i| i.generation == generation);
        current.then(f)
    }

    fn take_interval(record: &mut GuardRecord, requester: &InstanceId) -> Option<InstanceId> {
        let previous_owner = record.owner.take();
        if let Some(interval) = record.interval.take() {
            interval.cancel();
        }
        match previous_owner {
            Some(previous) if &previous != requester => {
                tracing::warn!(
                    "TimerGuard: {} took over the flow interval from {}",
                    requester,
                    previous
                );
                Some(previous)
            }
            _ => None,
        }
    }
}

impl Default for TimerGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// How a flow is driven once it owns the interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowDriver {
    /// A background thread ticks every `tick_ms`
    #[default]
    Interval,
    /// The host calls `tick` and `settle` itself
    Manual,
}

/// Outcome of a single tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlowTick {
    /// Not playing; nothing changed
    Idle,
    /// Progress grew to the given percentage
    Progressed(f64),
    /// Progress overflowed and the flow moved to a new state
    Advanced(FlowState),
    /// Progress overflowed while a transition was unsettled
    Suppressed,
}

/// Observable state of the flow
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowSnapshot {
    pub flow_state: FlowState,
    /// Stage index consumed by the renderer
    pub stage: usize,
    /// Sub-phase index consumed by the renderer
    pub sub_phase: usize,
    /// Percent of the current state elapsed
    pub progress: f64,
    pub is_playing: bool,
    pub duration_ms: u64,
    pub transition_locked: bool,
}

/// Called with the new flow state after every advance or reset
pub type StageCallback = Arc<dyn Fn(FlowState) + Send + Sync>;

struct FlowInner {
    flow_state: FlowState,
    progress: f64,
    is_playing: bool,
    duration_ms: u64,
    transition_lock: bool,
    listeners: Vec<StageCallback>,
}

struct FlowCore {
    inner: Mutex<FlowInner>,
    tick_ms: u64,
    specification_multiplier: f64,
}

impl FlowCore {
    fn increment(&self, inner: &FlowInner) -> f64 {
        let multiplier = inner
            .flow_state
            .duration_multiplier(self.specification_multiplier);
        let effective_ms = inner.duration_ms as f64 * multiplier;
        FULL_PROGRESS * self.tick_ms as f64 / effective_ms
    }

    fn tick(&self) -> FlowTick {
        let (outcome, listeners) = self.step();
        self.notify(outcome, &listeners);
        outcome
    }

    /// Apply one tick to the state; listeners are returned, not called
    fn step(&self) -> (FlowTick, Vec<StageCallback>) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.is_playing {
            return (FlowTick::Idle, Vec::new());
        }
        inner.progress += self.increment(&inner);
        if inner.progress + PROGRESS_EPSILON < FULL_PROGRESS {
            return (FlowTick::Progressed(inner.progress), Vec::new());
        }

        inner.progress = 0.0;
        if inner.transition_lock {
            tracing::debug!("TransformationFlow: overflow during transition, not advancing");
            return (FlowTick::Suppressed, Vec::new());
        }
        inner.transition_lock = true;
        inner.flow_state = inner.flow_state.next();
        tracing::debug!(
            "TransformationFlow: advanced to {} {:?}",
            inner.flow_state.name(),
            inner.flow_state.coordinates()
        );
        (
            FlowTick::Advanced(inner.flow_state),
            inner.listeners.clone(),
        )
    }

    fn notify(&self, outcome: FlowTick, listeners: &[StageCallback]) {
        if let FlowTick::Advanced(state) = outcome {
            for listener in listeners {
                listener(state);
            }
        }
    }

    fn settle(&self) {
        self.inner.lock().unwrap().transition_lock = false;
    }
}

/// Five-state flow driven by a single guarded interval
///
/// # Example
///
/// ```ignore
/// let flow = TransformationFlow::new(TimerGuard::global(), &config.flow);
/// flow.on_stage_change(|state| renderer.show(state.coordinates()));
/// flow.play();
/// ```
pub struct TransformationFlow {
    id: InstanceId,
    guard: Arc<TimerGuard>,
    core: Arc<FlowCore>,
    driver: FlowDriver,
}

impl TransformationFlow {
    /// A flow ticked by a background interval
    pub fn new(guard: Arc<TimerGuard>, config: &FlowConfig) -> Self {
        Self::with_driver(guard, config, FlowDriver::Interval)
    }

    pub fn with_driver(guard: Arc<TimerGuard>, config: &FlowConfig, driver: FlowDriver) -> Self {
        Self {
            id: InstanceId::next(),
            guard,
            core: Arc::new(FlowCore {
                inner: Mutex::new(FlowInner {
                    flow_state: FlowState::default(),
                    progress: 0.0,
                    is_playing: false,
                    duration_ms: config.base_duration_ms.max(1),
                    transition_lock: false,
                    listeners: Vec::new(),
                }),
                tick_ms: config.tick_ms.max(1),
                specification_multiplier: config.specification_multiplier,
            }),
            driver,
        }
    }

    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    /// Whether this instance holds the guard's interval
    pub fn owns_timer(&self) -> bool {
        self.guard.owner().as_ref() == Some(&self.id)
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let inner = self.core.inner.lock().unwrap();
        let (stage, sub_phase) = inner.flow_state.coordinates();
        FlowSnapshot {
            flow_state: inner.flow_state,
            stage,
            sub_phase,
            progress: inner.progress,
            is_playing: inner.is_playing,
            duration_ms: inner.duration_ms,
            transition_locked: inner.transition_lock,
        }
    }

    /// Register a listener for flow state changes
    pub fn on_stage_change<F>(&self, callback: F)
    where
        F: Fn(FlowState) + Send + Sync + 'static,
    {
        self.core
            .inner
            .lock()
            .unwrap()
            .listeners
            .push(Arc::new(callback));
    }

    pub fn play(&self) {
        self.set_playing(true);
    }

    /// Stop ticking; progress and flow state are preserved
    pub fn pause(&self) {
        self.set_playing(false);
    }

    pub fn set_playing(&self, playing: bool) {
        self.core.inner.lock().unwrap().is_playing = playing;
        self.sync_interval();
    }

    /// Change the base duration of a flow state
    pub fn set_duration(&self, duration_ms: u64) {
        self.core.inner.lock().unwrap().duration_ms = duration_ms.max(1);
        self.sync_interval();
    }

    /// Stop, release the interval and return to the first state
    pub fn reset(&self) {
        self.guard.release(&self.id);
        let listeners = {
            let mut inner = self.core.inner.lock().unwrap();
            inner.flow_state = FlowState::default();
            inner.progress = 0.0;
            inner.is_playing = false;
            inner.transition_lock = false;
            inner.listeners.clone()
        };
        for listener in &listeners {
            listener(FlowState::default());
        }
    }

    /// Advance progress by one tick
    pub fn tick(&self) -> FlowTick {
        self.core.tick()
    }

    /// Release the transition lock once an advance has been published
    pub fn settle(&self) {
        self.core.settle();
    }

    /// Re-evaluate interval ownership after `is_playing` or the duration changed
    fn sync_interval(&self) {
        let playing = self.core.inner.lock().unwrap().is_playing;
        if !playing {
            self.guard.clear(&self.id);
            return;
        }

        let core = Arc::downgrade(&self.core);
        let guard = Arc::downgrade(&self.guard);
        let tick = Duration::from_millis(self.core.tick_ms);
        let driver = self.driver;
        self.guard.install(&self.id, move |generation| match driver {
            FlowDriver::Manual => IntervalHandle::manual(generation),
            FlowDriver::Interval => spawn_interval(core, guard, generation, tick),
        });
    }
}

impl Drop for TransformationFlow {
    fn drop(&mut self) {
        self.guard.release(&self.id);
    }
}

fn spawn_interval(
    core: Weak<FlowCore>,
    guard: Weak<TimerGuard>,
    generation: u64,
    tick: Duration,
) -> IntervalHandle {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop_flag);

    let thread = thread::spawn(move || loop {
        thread::park_timeout(tick);
        if thread_stop.load(Ordering::Acquire) {
            break;
        }
        let Some(guard) = guard.upgrade() else {
            break;
        };
        let Some(core) = core.upgrade() else {
            break;
        };
        // Listeners run after the guard is unlocked; they may pause or reset
        let Some((outcome, listeners)) = guard.run_if_current(generation, || core.step()) else {
            break;
        };
        drop(guard);
        core.notify(outcome, &listeners);
        core.settle();
    });

    IntervalHandle {
        generation,
        stop_flag,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_duration_ms: u64) -> FlowConfig {
        FlowConfig {
            tick_ms: 200,
            base_duration_ms,
            specification_multiplier: 1.5,
        }
    }

    fn manual_flow(guard: &Arc<TimerGuard>) -> TransformationFlow {
        TransformationFlow::with_driver(Arc::clone(guard), &config(4_000), FlowDriver::Manual)
    }

    /// Ticks (settling after each) until the flow advances
    fn ticks_to_advance(flow: &TransformationFlow) -> usize {
        for n in 1..=1_000 {
            let outcome = flow.tick();
            flow.settle();
            if matches!(outcome, FlowTick::Advanced(_)) {
                return n;
            }
        }
        panic!("flow never advanced");
    }

    #[test]
    fn test_idle_when_paused() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        assert_eq!(flow.tick(), FlowTick::Idle);
        assert!(!guard.is_running());
    }

    #[test]
    fn test_twenty_ticks_per_regular_state() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        flow.play();
        assert_eq!(flow.tick(), FlowTick::Progressed(5.0));
        for _ in 0..18 {
            flow.tick();
        }
        assert_eq!(flow.tick(), FlowTick::Advanced(FlowState::Specification));
        assert_eq!(flow.snapshot().progress, 0.0);
    }

    #[test]
    fn test_specification_lingers() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        flow.play();

        let intention = ticks_to_advance(&flow);
        assert_eq!(flow.snapshot().flow_state, FlowState::Specification);
        let specification = ticks_to_advance(&flow);
        let sketchy = ticks_to_advance(&flow);

        assert_eq!(intention, 20);
        assert_eq!(sketchy, 20);
        assert!((specification as i64 - 30).abs() <= 1, "got {specification}");
    }

    #[test]
    fn test_five_cycles_visit_every_state_in_order() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        flow.play();

        let mut visited = vec![flow.snapshot().flow_state.index()];
        for _ in 0..5 {
            ticks_to_advance(&flow);
            visited.push(flow.snapshot().flow_state.index());
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_overflow_during_transition_does_not_advance() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        flow.play();

        ticks_to_advance(&flow);
        // Advance to the next overflow without settling in between
        let mut outcome = FlowTick::Idle;
        for _ in 0..30 {
            outcome = flow.tick();
            if !matches!(outcome, FlowTick::Progressed(_)) {
                break;
            }
        }
        assert_eq!(outcome, FlowTick::Advanced(FlowState::Sketchy));
        assert!(flow.snapshot().transition_locked);

        // Still unsettled: the next overflow only resets progress
        for _ in 0..19 {
            flow.tick();
        }
        assert_eq!(flow.tick(), FlowTick::Suppressed);
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.flow_state, FlowState::Sketchy);
        assert_eq!(snapshot.progress, 0.0);

        flow.settle();
        assert!(!flow.snapshot().transition_locked);
    }

    #[test]
    fn test_pause_preserves_position() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        flow.play();
        ticks_to_advance(&flow);
        flow.tick();
        flow.pause();

        let snapshot = flow.snapshot();
        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.flow_state, FlowState::Specification);
        assert!(snapshot.progress > 0.0);
        assert!(!guard.is_running());
        assert_eq!(guard.owner(), None);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let guard = Arc::new(TimerGuard::new());
        let flow = manual_flow(&guard);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        flow.on_stage_change(move |state| sink.lock().unwrap().push(state.coordinates()));

        flow.play();
        ticks_to_advance(&flow);
        ticks_to_advance(&flow);
        flow.reset();

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.flow_state, FlowState::Intention);
        assert_eq!((snapshot.stage, snapshot.sub_phase), (0, 0));
        assert_eq!(snapshot.progress, 0.0);
        assert!(!snapshot.is_playing);
        assert_eq!(guard.owner(), None);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 0), (2, 0), (0, 0)]);
    }

    #[test]
    fn test_second_instance_takes_over() {
        let guard = Arc::new(TimerGuard::new());
        let first = manual_flow(&guard);
        let second = manual_flow(&guard);

        first.play();
        assert!(first.owns_timer());
        second.play();

        assert_eq!(guard.owner().as_ref(), Some(second.id()));
        assert!(!first.owns_timer());
        assert!(guard.is_running());
    }

    #[test]
    fn test_unmount_of_non_owner_keeps_interval() {
        let guard = Arc::new(TimerGuard::new());
        let first = manual_flow(&guard);
        let second = manual_flow(&guard);
        first.play();
        second.play();

        drop(first);
        assert_eq!(guard.owner().as_ref(), Some(second.id()));
        assert!(guard.is_running());

        drop(second);
        assert_eq!(guard.owner(), None);
        assert!(!guard.is_running());
    }

    #[test]
    fn test_release_requires_ownership() {
        let guard = TimerGuard::new();
        let owner = InstanceId::next();
        let other = InstanceId::next();
        let installed = guard.install(&owner, IntervalHandle::manual);
        assert_eq!(installed.displaced, None);
        assert!(guard.is_current(installed.generation));

        assert!(!guard.release(&other));
        assert!(guard.is_running());
        assert!(guard.release(&owner));
        assert!(!guard.is_current(installed.generation));
    }

    #[test]
    fn test_install_reports_displaced_owner() {
        let guard = TimerGuard::new();
        let a = InstanceId::next();
        let b = InstanceId::next();
        let first = guard.install(&a, IntervalHandle::manual);
        let second = guard.install(&b, IntervalHandle::manual);
        assert_eq!(second.displaced, Some(a.clone()));
        assert!(second.generation > first.generation);
        assert!(!guard.is_current(first.generation));

        // Re-installing for the same owner is not a takeover
        assert_eq!(guard.install(&b, IntervalHandle::manual).displaced, None);
    }

    #[test]
    fn test_takeover_waits_for_in_flight_tick() {
        let guard = Arc::new(TimerGuard::new());
        let a = InstanceId::next();
        let b = InstanceId::next();
        let first = guard.install(&a, IntervalHandle::manual);

        let ticked = Arc::new(AtomicBool::new(false));
        let (started_tx, started_rx) = std::sync::mpsc::channel();
        let worker = {
            let guard = Arc::clone(&guard);
            let ticked = Arc::clone(&ticked);
            thread::spawn(move || {
                guard.run_if_current(first.generation, || {
                    started_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(50));
                    ticked.store(true, Ordering::SeqCst);
                })
            })
        };

        started_rx.recv().unwrap();
        let second = guard.install(&b, IntervalHandle::manual);
        // The displaced tick finished before the takeover completed
        assert!(ticked.load(Ordering::SeqCst));
        assert_eq!(worker.join().unwrap(), Some(()));

        assert_eq!(guard.run_if_current(first.generation, || ()), None);
        assert_eq!(guard.run_if_current(second.generation, || 7), Some(7));
    }

    #[test]
    fn test_interval_driver_ticks() {
        let guard = Arc::new(TimerGuard::new());
        let flow = TransformationFlow::new(
            Arc::clone(&guard),
            &FlowConfig {
                tick_ms: 2,
                base_duration_ms: 20,
                specification_multiplier: 1.5,
            },
        );
        let advances = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&advances);
        flow.on_stage_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        flow.play();
        thread::sleep(Duration::from_millis(300));
        flow.pause();
        assert!(advances.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_displaced_interval_stops_ticking() {
        let guard = Arc::new(TimerGuard::new());
        let fast = FlowConfig {
            tick_ms: 2,
            base_duration_ms: 1_000_000,
            specification_multiplier: 1.5,
        };
        let first = TransformationFlow::new(Arc::clone(&guard), &fast);
        let second = TransformationFlow::new(Arc::clone(&guard), &fast);

        first.play();
        thread::sleep(Duration::from_millis(50));
        second.play();
        thread::sleep(Duration::from_millis(30));

        let before = first.snapshot().progress;
        thread::sleep(Duration::from_millis(50));
        assert_eq!(first.snapshot().progress, before);
        assert!(second.snapshot().progress > 0.0);
    }
}
