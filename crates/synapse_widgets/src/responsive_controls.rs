//! Touch control surface for small screens
//!
//! Gestures are recognized from the start and end of a single touch:
//!
//! - a vertical swipe (dominant axis travel of at least `swipe_threshold_px`
//!   within `swipe_window_ms`) expands the panel when upward and collapses it
//!   when downward;
//! - a tap landing within `double_tap_ms` of the previous one toggles
//!   play/pause;
//! - any other tap toggles the panel, in automatic mode only.
//!
//! Single taps are applied immediately. The second tap of a double tap does
//! not toggle the panel again.

use crate::view_mode::ViewMode;
use synapse_core::{DisplayConfig, TouchEvent, TouchPhase};

/// Maximum travel, in pixels, for a touch to count as a tap
const TAP_SLOP_PX: f32 = 10.0;

/// Gesture thresholds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub swipe_threshold_px: f32,
    pub swipe_window_ms: u64,
    pub double_tap_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for GestureConfig {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            swipe_threshold_px: config.swipe_threshold_px,
            swipe_window_ms: config.swipe_window_ms,
            double_tap_ms: config.double_tap_ms,
        }
    }
}

/// Recognized gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    SwipeUp,
    SwipeDown,
    Tap,
    DoubleTap,
}

/// Mobile control panel state
pub struct ResponsiveControls {
    config: GestureConfig,
    mode: ViewMode,
    expanded: bool,
    touch_start: Option<TouchEvent>,
    last_tap_ms: Option<u64>,
    on_toggle_play: Option<Box<dyn FnMut() + Send>>,
    on_expanded_change: Option<Box<dyn FnMut(bool) + Send>>,
}

impl ResponsiveControls {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            mode: ViewMode::Automatic,
            expanded: false,
            touch_start: None,
            last_tap_ms: None,
            on_toggle_play: None,
            on_expanded_change: None,
        }
    }

    pub fn on_toggle_play<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_toggle_play = Some(Box::new(callback));
        self
    }

    pub fn on_expanded_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_expanded_change = Some(Box::new(callback));
        self
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Translation key for the expand/collapse affordance
    pub fn toggle_label_key(&self) -> &'static str {
        if self.expanded {
            "neuralAnimation.controls.collapse"
        } else {
            "neuralAnimation.controls.expand"
        }
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        if self.expanded == expanded {
            return;
        }
        self.expanded = expanded;
        if let Some(callback) = self.on_expanded_change.as_mut() {
            callback(expanded);
        }
    }

    /// Feed a touch event; returns the gesture it completed, if any
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Gesture> {
        match event.phase {
            TouchPhase::Started => {
                self.touch_start = Some(event);
                None
            }
            TouchPhase::Moved => None,
            TouchPhase::Cancelled => {
                self.touch_start = None;
                None
            }
            TouchPhase::Ended => {
                let start = self.touch_start.take()?;
                let gesture = self.recognize(&start, &event)?;
                self.apply(gesture, event.timestamp_ms);
                Some(gesture)
            }
        }
    }

    fn recognize(&self, start: &TouchEvent, end: &TouchEvent) -> Option<Gesture> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let elapsed = end.timestamp_ms.saturating_sub(start.timestamp_ms);

        if elapsed <= self.config.swipe_window_ms
            && dy.abs() > dx.abs()
            && dy.abs() >= self.config.swipe_threshold_px
        {
            return Some(if dy < 0.0 {
                Gesture::SwipeUp
            } else {
                Gesture::SwipeDown
            });
        }

        if dx.abs() <= TAP_SLOP_PX && dy.abs() <= TAP_SLOP_PX {
            let double = self
                .last_tap_ms
                .is_some_and(|last| end.timestamp_ms.saturating_sub(last) <= self.config.double_tap_ms);
            return Some(if double { Gesture::DoubleTap } else { Gesture::Tap });
        }

        None
    }

    fn apply(&mut self, gesture: Gesture, timestamp_ms: u64) {
        match gesture {
            Gesture::SwipeUp => self.set_expanded(true),
            Gesture::SwipeDown => self.set_expanded(false),
            Gesture::DoubleTap => {
                self.last_tap_ms = None;
                if let Some(callback) = self.on_toggle_play.as_mut() {
                    callback();
                }
            }
            Gesture::Tap => {
                self.last_tap_ms = Some(timestamp_ms);
                if self.mode == ViewMode::Automatic {
                    self.set_expanded(!self.expanded);
                }
            }
        }
    }
}

impl Default for ResponsiveControls {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn touch(controls: &mut ResponsiveControls, from: (f32, f32), to: (f32, f32), t0: u64, t1: u64) -> Option<Gesture> {
        controls.handle_touch(TouchEvent::started(from.0, from.1, t0));
        controls.handle_touch(TouchEvent::ended(to.0, to.1, t1))
    }

    #[test]
    fn test_vertical_swipes() {
        let mut controls = ResponsiveControls::default();
        assert_eq!(
            touch(&mut controls, (100.0, 400.0), (110.0, 300.0), 0, 200),
            Some(Gesture::SwipeUp)
        );
        assert!(controls.is_expanded());
        assert_eq!(
            touch(&mut controls, (100.0, 300.0), (95.0, 380.0), 1_000, 1_300),
            Some(Gesture::SwipeDown)
        );
        assert!(!controls.is_expanded());
    }

    #[test]
    fn test_slow_or_short_swipes_ignored() {
        let mut controls = ResponsiveControls::default();
        // Too slow
        assert_eq!(touch(&mut controls, (0.0, 400.0), (0.0, 300.0), 0, 900), None);
        // Too short
        assert_eq!(touch(&mut controls, (0.0, 400.0), (0.0, 370.0), 2_000, 2_100), None);
        // Horizontal
        assert_eq!(touch(&mut controls, (0.0, 400.0), (200.0, 340.0), 3_000, 3_100), None);
        assert!(!controls.is_expanded());
    }

    #[test]
    fn test_double_tap_toggles_play() {
        let toggles = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&toggles);
        let mut controls = ResponsiveControls::default().on_toggle_play(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        controls.set_mode(ViewMode::Interactive);

        assert_eq!(touch(&mut controls, (50.0, 50.0), (50.0, 50.0), 0, 50), Some(Gesture::Tap));
        assert_eq!(
            touch(&mut controls, (52.0, 50.0), (52.0, 50.0), 200, 250),
            Some(Gesture::DoubleTap)
        );
        assert_eq!(toggles.load(Ordering::SeqCst), 1);

        // A third tap starts a new sequence
        assert_eq!(touch(&mut controls, (50.0, 50.0), (50.0, 50.0), 400, 450), Some(Gesture::Tap));
        // Too late for a double tap
        assert_eq!(touch(&mut controls, (50.0, 50.0), (50.0, 50.0), 800, 800), Some(Gesture::Tap));
        assert_eq!(toggles.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_tap_expands_only_in_automatic_mode() {
        let mut controls = ResponsiveControls::default();
        controls.set_mode(ViewMode::Interactive);
        touch(&mut controls, (0.0, 0.0), (0.0, 0.0), 0, 10);
        assert!(!controls.is_expanded());

        controls.set_mode(ViewMode::Automatic);
        touch(&mut controls, (0.0, 0.0), (0.0, 0.0), 1_000, 1_010);
        assert!(controls.is_expanded());
        assert_eq!(controls.toggle_label_key(), "neuralAnimation.controls.collapse");
    }

    #[test]
    fn test_cancelled_touch_is_dropped() {
        let mut controls = ResponsiveControls::default();
        controls.handle_touch(TouchEvent::started(0.0, 400.0, 0));
        controls.handle_touch(TouchEvent::new(TouchPhase::Cancelled, 0.0, 300.0, 50));
        assert_eq!(controls.handle_touch(TouchEvent::ended(0.0, 300.0, 100)), None);
    }
}
