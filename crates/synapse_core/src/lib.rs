//! Synapse Core
//!
//! Shared data and contracts for the Synapse neural assembly animation:
//!
//! - **Phase table**: the immutable, contiguous segments of the main timeline
//! - **Flow states**: the five-state cycle of the hero transformation widget
//! - **Timeline state**: what the timeline controller exposes to widgets
//! - **Input events**: pointer, touch and keyboard events for the controls
//! - **Boundaries**: session gating, translation lookup, reduced-motion signal
//! - **Configuration**: `synapse.toml` loading and validation
//!
//! # Example
//!
//! ```rust
//! use synapse_core::{phase_at, FlowState, PHASES};
//!
//! assert_eq!(phase_at(PHASES[2].start_ms), 2);
//! assert_eq!(FlowState::Polished.next(), FlowState::Intention);
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod input;
pub mod motion;
pub mod phase;
pub mod quality;
pub mod session;
pub mod timeline;

pub use config::{DisplayConfig, FlowConfig, SynapseConfig, TimelineConfig, CONFIG_FILE};
pub use error::{Result, SynapseError};
pub use flow::{FlowState, Stage};
pub use i18n::{Catalog, Locale, Translator};
pub use input::{Key, KeyState, KeyboardEvent, Modifiers, PointerEvent, TouchEvent, TouchPhase};
pub use motion::{EnvMotion, FixedMotion, MotionPreference};
pub use phase::{
    get_phase, phase_at, phase_for_progress, phase_start, validate_table, Color, Phase,
    PHASES, PHASE_COUNT, TOTAL_DURATION_MS,
};
pub use quality::{QualityMode, QualityTier};
pub use session::{SectionAccess, SectionGate, SessionStatus};
pub use timeline::{PhaseInfo, SceneNode, TimelineState, Viewport};
