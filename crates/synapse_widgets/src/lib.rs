//! Synapse Widgets
//!
//! Headless control and display widgets for the neural assembly animation.
//! Each widget owns only ephemeral UI state (an open menu, a drag in
//! progress, a pending tap) and reports intents through optional callbacks;
//! timeline state always comes from the caller.
//!
//! # Widgets
//!
//! - **PlaybackControls**: play/pause, restart, optional skip and speed selector
//! - **ProgressScrubber**: track seeking with a drag FSM and phase markers
//! - **PhaseNavigator**: phase list with completed/current/upcoming status
//! - **QualitySelector**: quality modes with one-shot device detection
//! - **ViewModeToggle**: automatic vs interactive presentation
//! - **PhaseExplainer**: translated phase description with auto-hide
//! - **ResponsiveControls**: swipe and tap gestures for touch screens
//! - **InteractiveControls**: keyboard shortcuts bound to a timeline controller

pub mod device;
pub mod interactive_controls;
pub mod phase_explainer;
pub mod phase_navigator;
pub mod playback_controls;
pub mod progress_scrubber;
pub mod quality_selector;
pub mod responsive_controls;
pub mod view_mode;

pub use device::{
    classify_user_agent, detect_gpu_adapter, recommend_quality, DeviceCapabilities, DeviceClass,
    DeviceProbe, GpuCheck, NativeProbe, StaticProbe,
};
pub use interactive_controls::{ControlAction, InteractiveControls};
pub use phase_explainer::{ExplainerView, PhaseExplainer};
pub use phase_navigator::{PhaseItem, PhaseNavigator, PhaseStatus};
pub use playback_controls::{format_time, PlaybackControl, PlaybackControls, SKIP_MS, SPEED_OPTIONS};
pub use progress_scrubber::{HoverPreview, PhaseMarker, ProgressScrubber, ScrubberState, Track};
pub use quality_selector::{QualitySelector, QUALITY_OPTIONS};
pub use responsive_controls::{Gesture, GestureConfig, ResponsiveControls};
pub use view_mode::{ViewMode, ViewModeToggle};
