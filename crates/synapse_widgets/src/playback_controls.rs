//! Playback control bar
//!
//! Play/pause and restart are always present. The speed selector and the
//! skip buttons only appear when their callback is supplied, so hosts opt
//! into them by wiring the callback.

use synapse_core::TimelineState;

/// Speed multipliers offered by the speed selector
pub const SPEED_OPTIONS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Distance covered by the skip buttons
pub const SKIP_MS: u64 = 5_000;

/// Buttons the control bar can render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackControl {
    PlayPause,
    Restart,
    SkipBack,
    SkipForward,
    Speed,
}

/// Format milliseconds as `m:ss`
pub fn format_time(ms: f64) -> String {
    let total_seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Playback control bar state
pub struct PlaybackControls {
    disabled: bool,
    speed: f64,
    speed_menu_open: bool,
    on_play_pause: Option<Box<dyn FnMut(bool) + Send>>,
    on_restart: Option<Box<dyn FnMut() + Send>>,
    on_seek: Option<Box<dyn FnMut(f64) + Send>>,
    on_speed_change: Option<Box<dyn FnMut(f64) + Send>>,
}

impl PlaybackControls {
    pub fn new() -> Self {
        Self {
            disabled: false,
            speed: 1.0,
            speed_menu_open: false,
            on_play_pause: None,
            on_restart: None,
            on_seek: None,
            on_speed_change: None,
        }
    }

    /// Render every button inert
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Called with `true` to play and `false` to pause
    pub fn on_play_pause<F>(mut self, callback: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_play_pause = Some(Box::new(callback));
        self
    }

    pub fn on_restart<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_restart = Some(Box::new(callback));
        self
    }

    /// Enables the skip buttons; called with the target time in ms
    pub fn on_seek<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_seek = Some(Box::new(callback));
        self
    }

    /// Enables the speed selector
    pub fn on_speed_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_speed_change = Some(Box::new(callback));
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Currently selected speed
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_speed_menu_open(&self) -> bool {
        self.speed_menu_open
    }

    /// Buttons to render, in display order
    pub fn visible_controls(&self) -> Vec<PlaybackControl> {
        let mut controls = Vec::with_capacity(5);
        if self.on_seek.is_some() {
            controls.push(PlaybackControl::SkipBack);
        }
        controls.push(PlaybackControl::PlayPause);
        if self.on_seek.is_some() {
            controls.push(PlaybackControl::SkipForward);
        }
        controls.push(PlaybackControl::Restart);
        if self.on_speed_change.is_some() {
            controls.push(PlaybackControl::Speed);
        }
        controls
    }

    /// Translation key of the play/pause button label
    pub fn play_pause_label_key(&self, state: &TimelineState) -> &'static str {
        if state.is_playing {
            "neuralAnimation.controls.pause"
        } else {
            "neuralAnimation.controls.play"
        }
    }

    /// `elapsed / total` caption
    pub fn time_caption(&self, state: &TimelineState) -> String {
        format!(
            "{} / {}",
            format_time(state.elapsed_ms()),
            format_time(state.duration_ms as f64)
        )
    }

    /// Returns whether a callback ran
    pub fn toggle_play(&mut self, state: &TimelineState) -> bool {
        if self.disabled {
            return false;
        }
        match self.on_play_pause.as_mut() {
            Some(callback) => {
                callback(!state.is_playing);
                true
            }
            None => false,
        }
    }

    pub fn restart(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        match self.on_restart.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn skip_back(&mut self, state: &TimelineState) -> bool {
        let target = (state.elapsed_ms() - SKIP_MS as f64).max(0.0);
        self.seek(target)
    }

    pub fn skip_forward(&mut self, state: &TimelineState) -> bool {
        let target = (state.elapsed_ms() + SKIP_MS as f64).min(state.duration_ms as f64);
        self.seek(target)
    }

    fn seek(&mut self, target_ms: f64) -> bool {
        if self.disabled {
            return false;
        }
        match self.on_seek.as_mut() {
            Some(callback) => {
                callback(target_ms);
                true
            }
            None => false,
        }
    }

    pub fn toggle_speed_menu(&mut self) {
        if !self.disabled && self.on_speed_change.is_some() {
            self.speed_menu_open = !self.speed_menu_open;
        }
    }

    /// Pick one of [`SPEED_OPTIONS`]; other values are ignored
    pub fn select_speed(&mut self, speed: f64) -> bool {
        if self.disabled || !SPEED_OPTIONS.contains(&speed) {
            return false;
        }
        let Some(callback) = self.on_speed_change.as_mut() else {
            return false;
        };
        self.speed_menu_open = false;
        if speed != self.speed {
            self.speed = speed;
            callback(speed);
        }
        true
    }
}

impl Default for PlaybackControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn playing_at(elapsed_ms: f64) -> TimelineState {
        TimelineState {
            is_initialized: true,
            is_playing: true,
            current_phase: 0,
            progress: elapsed_ms / 18_000.0,
            duration_ms: 18_000,
            error: None,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5_999.0), "0:05");
        assert_eq!(format_time(18_000.0), "0:18");
        assert_eq!(format_time(125_000.0), "2:05");
        assert_eq!(format_time(-10.0), "0:00");
    }

    #[test]
    fn test_optional_controls_hidden_without_callbacks() {
        let controls = PlaybackControls::new();
        assert_eq!(
            controls.visible_controls(),
            vec![PlaybackControl::PlayPause, PlaybackControl::Restart]
        );

        let controls = PlaybackControls::new().on_seek(|_| {}).on_speed_change(|_| {});
        assert_eq!(
            controls.visible_controls(),
            vec![
                PlaybackControl::SkipBack,
                PlaybackControl::PlayPause,
                PlaybackControl::SkipForward,
                PlaybackControl::Restart,
                PlaybackControl::Speed,
            ]
        );
    }

    #[test]
    fn test_toggle_play_requests_opposite_state() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&requested);
        let mut controls =
            PlaybackControls::new().on_play_pause(move |play| sink.lock().unwrap().push(play));

        let mut state = playing_at(1_000.0);
        assert!(controls.toggle_play(&state));
        state.is_playing = false;
        assert!(controls.toggle_play(&state));
        assert_eq!(*requested.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn test_skip_clamps_to_bounds() {
        let targets = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&targets);
        let mut controls =
            PlaybackControls::new().on_seek(move |ms| sink.lock().unwrap().push(ms));

        controls.skip_back(&playing_at(3_000.0));
        controls.skip_back(&playing_at(9_000.0));
        controls.skip_forward(&playing_at(9_000.0));
        controls.skip_forward(&playing_at(16_000.0));
        assert_eq!(*targets.lock().unwrap(), vec![0.0, 4_000.0, 14_000.0, 18_000.0]);
    }

    #[test]
    fn test_disabled_is_inert() {
        let calls = Arc::new(Mutex::new(0));
        let (a, b, c) = (Arc::clone(&calls), Arc::clone(&calls), Arc::clone(&calls));
        let mut controls = PlaybackControls::new()
            .disabled(true)
            .on_play_pause(move |_| *a.lock().unwrap() += 1)
            .on_restart(move || *b.lock().unwrap() += 1)
            .on_seek(move |_| *c.lock().unwrap() += 1);

        let state = playing_at(6_000.0);
        assert!(!controls.toggle_play(&state));
        assert!(!controls.restart());
        assert!(!controls.skip_forward(&state));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_speed_selection() {
        let speeds = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&speeds);
        let mut controls =
            PlaybackControls::new().on_speed_change(move |s| sink.lock().unwrap().push(s));

        controls.toggle_speed_menu();
        assert!(controls.is_speed_menu_open());
        assert!(controls.select_speed(1.5));
        assert!(!controls.is_speed_menu_open());
        assert!(!controls.select_speed(3.0));
        // Re-selecting the current speed closes the menu without a callback
        assert!(controls.select_speed(1.5));
        assert_eq!(controls.speed(), 1.5);
        assert_eq!(*speeds.lock().unwrap(), vec![1.5]);
    }

    #[test]
    fn test_labels() {
        let controls = PlaybackControls::new();
        let mut state = playing_at(0.0);
        state.duration_ms = 130_000;
        state.progress = 0.5;
        assert_eq!(controls.play_pause_label_key(&state), "neuralAnimation.controls.pause");
        assert_eq!(controls.time_caption(&state), "1:05 / 2:10");
    }
}
