//! Keyboard shortcuts for interactive mode
//!
//! | Key | Action |
//! |---|---|
//! | Space | play / pause |
//! | ArrowLeft / ArrowRight | previous / next phase |
//! | Home | restart |
//! | 1-5 | jump to phase |
//! | + / - | step speed through [`SPEED_OPTIONS`] |
//!
//! Presses with Ctrl, Alt or Meta held are left to the host.

use crate::playback_controls::SPEED_OPTIONS;
use std::sync::Arc;
use synapse_animation::TimelineController;
use synapse_core::{Key, KeyState, KeyboardEvent, PHASE_COUNT};

/// What a shortcut asks the timeline to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    TogglePlay,
    PreviousPhase,
    NextPhase,
    Restart,
    GoToPhase(usize),
    SpeedUp,
    SlowDown,
}

impl ControlAction {
    /// Shortcut bound to a keyboard event
    pub fn for_event(event: &KeyboardEvent) -> Option<Self> {
        let modifiers = event.modifiers;
        if event.state != KeyState::Pressed || modifiers.ctrl || modifiers.alt || modifiers.meta {
            return None;
        }
        match event.key {
            Key::Space => Some(ControlAction::TogglePlay),
            Key::ArrowLeft => Some(ControlAction::PreviousPhase),
            Key::ArrowRight => Some(ControlAction::NextPhase),
            Key::Home => Some(ControlAction::Restart),
            Key::Digit(d) if (1..=PHASE_COUNT as u8).contains(&d) => {
                Some(ControlAction::GoToPhase(d as usize - 1))
            }
            Key::Plus => Some(ControlAction::SpeedUp),
            Key::Minus => Some(ControlAction::SlowDown),
            _ => None,
        }
    }
}

/// Keyboard surface driving a [`TimelineController`]
pub struct InteractiveControls {
    controller: Arc<TimelineController>,
    speed_index: usize,
    enabled: bool,
}

impl InteractiveControls {
    pub fn new(controller: Arc<TimelineController>) -> Self {
        Self {
            controller,
            speed_index: default_speed_index(),
            enabled: true,
        }
    }

    /// Shortcuts are ignored while disabled (e.g. in automatic mode)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn speed(&self) -> f64 {
        SPEED_OPTIONS[self.speed_index]
    }

    /// Handle a key event; returns the action taken
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> Option<ControlAction> {
        if !self.enabled {
            return None;
        }
        let action = ControlAction::for_event(event)?;
        self.apply(action);
        Some(action)
    }

    pub fn apply(&mut self, action: ControlAction) {
        let state = self.controller.state();
        match action {
            ControlAction::TogglePlay => {
                if state.is_playing {
                    self.controller.pause();
                } else {
                    self.controller.play();
                }
            }
            ControlAction::PreviousPhase => {
                self.controller
                    .go_to_phase(state.current_phase.saturating_sub(1));
            }
            ControlAction::NextPhase => {
                self.controller
                    .go_to_phase((state.current_phase + 1).min(PHASE_COUNT - 1));
            }
            ControlAction::Restart => self.controller.restart(),
            ControlAction::GoToPhase(index) => self.controller.go_to_phase(index),
            ControlAction::SpeedUp => {
                if self.speed_index + 1 < SPEED_OPTIONS.len() {
                    self.speed_index += 1;
                    self.controller.set_speed(self.speed());
                }
            }
            ControlAction::SlowDown => {
                if self.speed_index > 0 {
                    self.speed_index -= 1;
                    self.controller.set_speed(self.speed());
                }
            }
        }
    }
}

fn default_speed_index() -> usize {
    SPEED_OPTIONS
        .iter()
        .position(|&speed| speed == 1.0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_animation::{PhaseTimeline, TimelineOptions};
    use synapse_core::{Modifiers, SceneNode, Viewport};

    fn initialized_controls() -> (InteractiveControls, Arc<TimelineController>) {
        let controller = Arc::new(TimelineController::new(
            Box::new(|| Box::new(PhaseTimeline::new())),
            TimelineOptions::default(),
        ));
        pollster::block_on(controller.initialize(
            &[SceneNode::new("n0", 0.0, 0.0, 0)],
            Viewport::new(640.0, 480.0),
        ));
        (InteractiveControls::new(Arc::clone(&controller)), controller)
    }

    #[test]
    fn test_key_bindings() {
        let press = |key| ControlAction::for_event(&KeyboardEvent::pressed(key));
        assert_eq!(press(Key::Space), Some(ControlAction::TogglePlay));
        assert_eq!(press(Key::Home), Some(ControlAction::Restart));
        assert_eq!(press(Key::Digit(1)), Some(ControlAction::GoToPhase(0)));
        assert_eq!(press(Key::Digit(5)), Some(ControlAction::GoToPhase(4)));
        assert_eq!(press(Key::Digit(6)), None);
        assert_eq!(press(Key::Digit(0)), None);
        assert_eq!(press(Key::from_char('+')), Some(ControlAction::SpeedUp));
        assert_eq!(press(Key::Escape), None);

        let mut event = KeyboardEvent::pressed(Key::Space);
        event.modifiers = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(ControlAction::for_event(&event), None);
        event.modifiers = Modifiers::default();
        event.state = KeyState::Released;
        assert_eq!(ControlAction::for_event(&event), None);
    }

    #[test]
    fn test_space_toggles_playback() {
        let (mut controls, controller) = initialized_controls();
        controls.handle_key(&KeyboardEvent::pressed(Key::Space));
        assert!(controller.state().is_playing);
        controls.handle_key(&KeyboardEvent::pressed(Key::Space));
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn test_phase_navigation_clamps() {
        let (mut controls, controller) = initialized_controls();
        controls.handle_key(&KeyboardEvent::pressed(Key::ArrowLeft));
        assert_eq!(controller.state().current_phase, 0);

        controls.handle_key(&KeyboardEvent::pressed(Key::Digit(4)));
        assert_eq!(controller.state().current_phase, 3);
        controls.handle_key(&KeyboardEvent::pressed(Key::ArrowRight));
        controls.handle_key(&KeyboardEvent::pressed(Key::ArrowRight));
        assert_eq!(controller.state().current_phase, 4);
        controls.handle_key(&KeyboardEvent::pressed(Key::ArrowLeft));
        assert_eq!(controller.state().current_phase, 3);
        assert_eq!(controller.state().error, None);
    }

    #[test]
    fn test_speed_steps_stop_at_ends() {
        let (mut controls, _controller) = initialized_controls();
        assert_eq!(controls.speed(), 1.0);
        for _ in 0..5 {
            controls.apply(ControlAction::SpeedUp);
        }
        assert_eq!(controls.speed(), 2.0);
        for _ in 0..5 {
            controls.apply(ControlAction::SlowDown);
        }
        assert_eq!(controls.speed(), 0.5);
    }

    #[test]
    fn test_disabled_ignores_keys() {
        let (mut controls, controller) = initialized_controls();
        controls.set_enabled(false);
        assert_eq!(controls.handle_key(&KeyboardEvent::pressed(Key::Space)), None);
        assert!(!controller.state().is_playing);
    }
}
