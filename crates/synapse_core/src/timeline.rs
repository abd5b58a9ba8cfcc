//! Observable timeline state and manager inputs

use serde::{Deserialize, Serialize};

/// Externally observable state of the running animation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    pub is_initialized: bool,
    pub is_playing: bool,
    /// Index into the phase table
    pub current_phase: usize,
    /// Fraction of the total duration elapsed, in `0.0..=1.0`
    pub progress: f64,
    /// Total duration in milliseconds
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl TimelineState {
    /// Elapsed time implied by `progress`
    pub fn elapsed_ms(&self) -> f64 {
        self.progress * self.duration_ms as f64
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Phase reported by a timeline manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub index: usize,
    pub name: String,
}

/// Dimensions of the drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A node of the neural scene handed to the timeline manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Network layer the node belongs to (input, hidden, output...)
    pub layer: u32,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, x: f32, y: f32, layer: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            layer,
        }
    }
}
