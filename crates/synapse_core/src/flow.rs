//! Flow states of the hero transformation visualization
//!
//! The hero widget cycles through five states drawn from three visual stages.
//! Only the autonomy stage has meaningful sub-phases (sketchy, structured,
//! polished); the other two stages always sit at sub-phase 0. Modelling the
//! cycle as a single enum keeps stage, sub-phase and flow index from drifting
//! apart.

use serde::{Deserialize, Serialize};

/// Visual stage of the transformation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The raw idea
    Intention,
    /// Method and specification
    Method,
    /// Autonomous completion
    Autonomy,
}

impl Stage {
    pub fn index(self) -> usize {
        match self {
            Stage::Intention => 0,
            Stage::Method => 1,
            Stage::Autonomy => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Intention => "intention",
            Stage::Method => "method",
            Stage::Autonomy => "autonomy",
        }
    }
}

/// One of the five states of the transformation cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowState {
    #[default]
    Intention,
    Specification,
    Sketchy,
    Structured,
    Polished,
}

impl FlowState {
    /// Every state in cycle order
    pub const ALL: [FlowState; 5] = [
        FlowState::Intention,
        FlowState::Specification,
        FlowState::Sketchy,
        FlowState::Structured,
        FlowState::Polished,
    ];

    /// Number of states in the cycle
    pub const COUNT: usize = Self::ALL.len();

    /// Position in the cycle
    pub fn index(self) -> usize {
        match self {
            FlowState::Intention => 0,
            FlowState::Specification => 1,
            FlowState::Sketchy => 2,
            FlowState::Structured => 3,
            FlowState::Polished => 4,
        }
    }

    /// State at a cycle position, wrapping out-of-range indices
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Next state in the cycle; the last state wraps to the first
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn stage(self) -> Stage {
        match self {
            FlowState::Intention => Stage::Intention,
            FlowState::Specification => Stage::Method,
            FlowState::Sketchy | FlowState::Structured | FlowState::Polished => Stage::Autonomy,
        }
    }

    /// Sub-phase within the stage
    pub fn sub_phase(self) -> usize {
        match self {
            FlowState::Structured => 1,
            FlowState::Polished => 2,
            _ => 0,
        }
    }

    /// `(stage, sub_phase)` pair consumed by the renderer
    pub fn coordinates(self) -> (usize, usize) {
        (self.stage().index(), self.sub_phase())
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowState::Intention => "intention",
            FlowState::Specification => "specification",
            FlowState::Sketchy => "sketchy",
            FlowState::Structured => "structured",
            FlowState::Polished => "polished",
        }
    }

    /// Duration multiplier for this state
    ///
    /// The specification state lingers so its text can be read.
    pub fn duration_multiplier(self, specification_multiplier: f64) -> f64 {
        match self {
            FlowState::Specification => specification_multiplier,
            _ => 1.0,
        }
    }
}
