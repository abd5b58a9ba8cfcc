//! Synapse Animation Engine
//!
//! Drives the neural assembly animation and the hero transformation flow.
//!
//! # Features
//!
//! - **TimelineManager**: async contract for the component that owns the animation clock
//! - **PhaseTimeline**: built-in manager walking the five-phase table
//! - **TimelineController**: imperative controls plus a derived, never-failing state
//! - **TransformationFlow**: five-state cycle driven by a single guarded interval
//! - **TimerGuard**: process-wide single-owner record for the flow interval

pub mod controller;
pub mod flow_timer;
pub mod manager;

pub use controller::{ManagerFactory, TimelineController, TimelineOptions};
pub use flow_timer::{
    FlowDriver, FlowSnapshot, FlowTick, InstanceId, Installation, IntervalHandle, StageCallback,
    TimerGuard, TransformationFlow,
};
pub use manager::{
    EventCallback, PhaseChangeCallback, PhaseTimeline, PositionSample, ProgressCallback,
    TimelineCallbacks, TimelineManager,
};
