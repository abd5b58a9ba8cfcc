//! Phase table for the neural assembly timeline
//!
//! Phases are contiguous, non-overlapping segments of the main animation.
//! The table is immutable and shared by every display component:
//!
//! ```text
//! 0        3000        7000        11000        15000     18000
//! |- chaos -|- organization -|- connection -|- activation -|- emergence -|
//! ```

use crate::error::{Result, SynapseError};
use serde::{Deserialize, Serialize};

/// An RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Format as `#rrggbb`
    pub fn to_hex_string(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

/// A named segment of the animation timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    /// Fixed ordinal in the table
    pub index: usize,
    /// Stable identifier, also the translation key segment
    pub id: &'static str,
    /// Start offset in milliseconds (inclusive)
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive, except for the last phase)
    pub end_ms: u64,
    /// Accent color used by markers and the navigator
    pub primary_color: Color,
    /// Background tint behind the scene during this phase
    pub background_color: Color,
}

impl Phase {
    pub const fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Translation key for the display name
    pub fn name_key(&self) -> String {
        format!("neuralAnimation.phases.{}.name", self.id)
    }

    /// Translation key for the long description
    pub fn description_key(&self) -> String {
        format!("neuralAnimation.phases.{}.description", self.id)
    }

    /// Whether `t_ms` falls inside this phase
    pub fn contains(&self, t_ms: u64) -> bool {
        t_ms >= self.start_ms && t_ms < self.end_ms
    }
}

/// Total length of the timeline in milliseconds
pub const TOTAL_DURATION_MS: u64 = 18_000;

/// The phase table
pub const PHASES: [Phase; 5] = [
    Phase {
        index: 0,
        id: "chaos",
        start_ms: 0,
        end_ms: 3_000,
        primary_color: Color::from_hex(0x6B7280),
        background_color: Color::from_hex(0x0B0F19),
    },
    Phase {
        index: 1,
        id: "organization",
        start_ms: 3_000,
        end_ms: 7_000,
        primary_color: Color::from_hex(0x3B82F6),
        background_color: Color::from_hex(0x0A1228),
    },
    Phase {
        index: 2,
        id: "connection",
        start_ms: 7_000,
        end_ms: 11_000,
        primary_color: Color::from_hex(0x8B5CF6),
        background_color: Color::from_hex(0x140C2A),
    },
    Phase {
        index: 3,
        id: "activation",
        start_ms: 11_000,
        end_ms: 15_000,
        primary_color: Color::from_hex(0xF59E0B),
        background_color: Color::from_hex(0x1F1405),
    },
    Phase {
        index: 4,
        id: "emergence",
        start_ms: 15_000,
        end_ms: 18_000,
        primary_color: Color::from_hex(0x10B981),
        background_color: Color::from_hex(0x041A14),
    },
];

/// Number of phases in the table
pub const PHASE_COUNT: usize = PHASES.len();

/// Index of the phase containing `t_ms`
///
/// Times at or past the end of the timeline map to the last phase.
pub fn phase_at(t_ms: u64) -> usize {
    phase_at_in(&PHASES, t_ms)
}

/// Same as [`phase_at`] over an arbitrary contiguous table
pub fn phase_at_in(phases: &[Phase], t_ms: u64) -> usize {
    phases
        .iter()
        .position(|p| p.contains(t_ms))
        .unwrap_or_else(|| phases.len().saturating_sub(1))
}

/// Index of the phase at a progress fraction of the whole timeline
pub fn phase_for_progress(progress: f64) -> usize {
    let clamped = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    phase_at((clamped * TOTAL_DURATION_MS as f64) as u64)
}

/// Start offset of a phase, if the index is valid
pub fn phase_start(index: usize) -> Option<u64> {
    PHASES.get(index).map(|p| p.start_ms)
}

/// Look up a phase by index
pub fn get_phase(index: usize) -> Result<&'static Phase> {
    PHASES.get(index).ok_or(SynapseError::InvalidPhase(index))
}

/// Check that a table starts at zero, is contiguous and has no empty phases
pub fn validate_table(phases: &[Phase]) -> Result<()> {
    let mut expected_start = 0;
    for (i, phase) in phases.iter().enumerate() {
        if phase.index != i {
            return Err(SynapseError::Config(format!(
                "phase '{}' has index {} at position {}",
                phase.id, phase.index, i
            )));
        }
        if phase.start_ms != expected_start || phase.end_ms <= phase.start_ms {
            return Err(SynapseError::Config(format!(
                "phase '{}' does not continue the timeline at {}ms",
                phase.id, expected_start
            )));
        }
        expected_start = phase.end_ms;
    }
    Ok(())
}
