//! Progress scrubber with clickable phase markers
//!
//! The scrubber maps a pointer position on its track to a fraction of the
//! timeline and reports absolute seek times through `on_seek`. Phase markers
//! sit on top of the track and report the phase index through
//! `on_phase_click` instead of a seek time.
//!
//! Interaction is a small FSM in the manner of a slider thumb:
//!
//! ```text
//! Idle --move--> Hovering --press--> Dragging --release--> Hovering
//!   ^               |                   |
//!   +-----leave-----+                   +-- leave is ignored while dragging
//! ```
//!
//! While dragging, the hover preview is suppressed.

use synapse_core::{phase_at, PointerEvent, PHASES, TOTAL_DURATION_MS};

/// Horizontal extent of the track in widget-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub x: f32,
    pub width: f32,
}

impl Track {
    pub fn new(x: f32, width: f32) -> Self {
        Self { x, width }
    }

    /// Fraction of the track at `x`, clamped to `0.0..=1.0`
    pub fn fraction_at(&self, x: f32) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (((x - self.x) / self.width) as f64).clamp(0.0, 1.0)
    }

    /// Position of `fraction` along the track
    pub fn x_at(&self, fraction: f64) -> f32 {
        self.x + self.width * fraction.clamp(0.0, 1.0) as f32
    }
}

/// Scrubber interaction state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrubberState {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

impl ScrubberState {
    /// Next state for a pointer event, or `None` to stay put
    pub fn on_event(&self, event: &PointerEvent) -> Option<Self> {
        match (self, event) {
            (ScrubberState::Idle, PointerEvent::Moved { .. }) => Some(ScrubberState::Hovering),
            (ScrubberState::Idle, PointerEvent::Pressed { .. }) => Some(ScrubberState::Dragging),

            (ScrubberState::Hovering, PointerEvent::Pressed { .. }) => {
                Some(ScrubberState::Dragging)
            }
            (ScrubberState::Hovering, PointerEvent::Left) => Some(ScrubberState::Idle),

            (ScrubberState::Dragging, PointerEvent::Released { .. }) => {
                Some(ScrubberState::Hovering)
            }

            _ => None,
        }
    }
}

/// Tooltip shown while hovering the track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverPreview {
    pub time_ms: u64,
    pub phase: usize,
    pub x: f32,
}

/// A clickable phase boundary on the track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseMarker {
    pub phase: usize,
    pub fraction: f64,
    pub x: f32,
}

/// Scrubber state and callbacks
pub struct ProgressScrubber {
    track: Track,
    duration_ms: u64,
    state: ScrubberState,
    hover: Option<HoverPreview>,
    marker_radius: f32,
    disabled: bool,
    on_seek: Option<Box<dyn FnMut(f64) + Send>>,
    on_phase_click: Option<Box<dyn FnMut(usize) + Send>>,
}

impl ProgressScrubber {
    pub fn new(track: Track, duration_ms: u64) -> Self {
        Self {
            track,
            duration_ms,
            state: ScrubberState::Idle,
            hover: None,
            marker_radius: 6.0,
            disabled: false,
            on_seek: None,
            on_phase_click: None,
        }
    }

    /// Called with the absolute seek time in ms
    pub fn on_seek<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_seek = Some(Box::new(callback));
        self
    }

    /// Called with the index of a clicked phase marker
    pub fn on_phase_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_phase_click = Some(Box::new(callback));
        self
    }

    /// Hit radius of phase markers, in pixels
    pub fn marker_radius(mut self, radius: f32) -> Self {
        self.marker_radius = radius.max(0.0);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Track moved or resized
    pub fn set_track(&mut self, track: Track) {
        self.track = track;
        self.hover = None;
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn state(&self) -> ScrubberState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == ScrubberState::Dragging
    }

    pub fn hover_preview(&self) -> Option<HoverPreview> {
        self.hover
    }

    /// Filled width of the track for `progress`
    pub fn fill_width(&self, progress: f64) -> f32 {
        self.track.width * progress.clamp(0.0, 1.0) as f32
    }

    /// Phase boundaries, positioned proportionally to the phase table
    pub fn markers(&self) -> Vec<PhaseMarker> {
        PHASES
            .iter()
            .map(|phase| {
                let fraction = phase.start_ms as f64 / TOTAL_DURATION_MS as f64;
                PhaseMarker {
                    phase: phase.index,
                    fraction,
                    x: self.track.x_at(fraction),
                }
            })
            .collect()
    }

    /// The marker under `x`, if any
    pub fn marker_at(&self, x: f32) -> Option<usize> {
        self.markers()
            .into_iter()
            .map(|marker| (marker.phase, (marker.x - x).abs()))
            .filter(|(_, distance)| *distance <= self.marker_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(phase, _)| phase)
    }

    /// Seek time for a pointer at `x`
    pub fn time_at(&self, x: f32) -> f64 {
        self.track.fraction_at(x) * self.duration_ms as f64
    }

    /// Feed a pointer event; returns whether the scrubber state changed
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.disabled {
            return false;
        }

        // Markers take the press before the track does
        if let (ScrubberState::Idle | ScrubberState::Hovering, PointerEvent::Pressed { x, .. }) =
            (self.state, event)
        {
            if let Some(phase) = self.marker_at(x) {
                if let Some(callback) = self.on_phase_click.as_mut() {
                    callback(phase);
                    return false;
                }
            }
        }

        let previous = self.state;
        if let Some(next) = self.state.on_event(&event) {
            self.state = next;
        }

        match event {
            PointerEvent::Pressed { x, .. } | PointerEvent::Moved { x, .. }
                if self.state == ScrubberState::Dragging =>
            {
                self.hover = None;
                self.seek(x);
            }
            PointerEvent::Released { x, .. } if previous == ScrubberState::Dragging => {
                self.seek(x);
                self.hover = Some(self.preview(x));
            }
            PointerEvent::Moved { x, .. } => {
                self.hover = Some(self.preview(x));
            }
            PointerEvent::Left if self.state == ScrubberState::Idle => {
                self.hover = None;
            }
            _ => {}
        }

        previous != self.state
    }

    fn preview(&self, x: f32) -> HoverPreview {
        let time_ms = self.time_at(x) as u64;
        let table_time =
            (self.track.fraction_at(x) * TOTAL_DURATION_MS as f64) as u64;
        HoverPreview {
            time_ms,
            phase: phase_at(table_time),
            x: self.track.x_at(self.track.fraction_at(x)),
        }
    }

    fn seek(&mut self, x: f32) {
        let time_ms = self.time_at(x);
        if let Some(callback) = self.on_seek.as_mut() {
            callback(time_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_scrubber() -> (ProgressScrubber, Arc<Mutex<Vec<f64>>>, Arc<Mutex<Vec<usize>>>) {
        let seeks = Arc::new(Mutex::new(Vec::new()));
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let (seek_sink, click_sink) = (Arc::clone(&seeks), Arc::clone(&clicks));
        let scrubber = ProgressScrubber::new(Track::new(100.0, 900.0), 18_000)
            .on_seek(move |ms| seek_sink.lock().unwrap().push(ms))
            .on_phase_click(move |phase| click_sink.lock().unwrap().push(phase));
        (scrubber, seeks, clicks)
    }

    #[test]
    fn test_fraction_clamped() {
        let track = Track::new(100.0, 200.0);
        assert_eq!(track.fraction_at(100.0), 0.0);
        assert_eq!(track.fraction_at(200.0), 0.5);
        assert_eq!(track.fraction_at(50.0), 0.0);
        assert_eq!(track.fraction_at(500.0), 1.0);
        assert_eq!(Track::new(0.0, 0.0).fraction_at(10.0), 0.0);
    }

    #[test]
    fn test_click_on_track_seeks() {
        let (mut scrubber, seeks, _) = recording_scrubber();
        scrubber.handle_pointer(PointerEvent::Pressed { x: 325.0, y: 0.0 });
        assert!(scrubber.is_dragging());
        scrubber.handle_pointer(PointerEvent::Released { x: 325.0, y: 0.0 });
        assert_eq!(scrubber.state(), ScrubberState::Hovering);
        assert_eq!(*seeks.lock().unwrap(), vec![4_500.0, 4_500.0]);
    }

    #[test]
    fn test_drag_suppresses_hover_preview() {
        let (mut scrubber, seeks, _) = recording_scrubber();
        scrubber.handle_pointer(PointerEvent::Moved { x: 550.0, y: 0.0 });
        let preview = scrubber.hover_preview().expect("hovering shows a preview");
        assert_eq!(preview.time_ms, 9_000);
        assert_eq!(preview.phase, 2);

        scrubber.handle_pointer(PointerEvent::Pressed { x: 550.0, y: 0.0 });
        scrubber.handle_pointer(PointerEvent::Moved { x: 1_000.0, y: 0.0 });
        assert_eq!(scrubber.hover_preview(), None);

        // Leaving the widget mid-drag keeps the drag alive
        scrubber.handle_pointer(PointerEvent::Left);
        assert!(scrubber.is_dragging());
        scrubber.handle_pointer(PointerEvent::Moved { x: 2_000.0, y: 0.0 });
        assert_eq!(seeks.lock().unwrap().last(), Some(&18_000.0));
    }

    #[test]
    fn test_marker_click_reports_phase() {
        let (mut scrubber, seeks, clicks) = recording_scrubber();
        let markers = scrubber.markers();
        assert_eq!(markers.len(), 5);
        assert_eq!(markers[2].fraction, 7_000.0 / 18_000.0);

        let x = markers[3].x + 2.0;
        scrubber.handle_pointer(PointerEvent::Pressed { x, y: 0.0 });
        assert_eq!(*clicks.lock().unwrap(), vec![3]);
        assert!(seeks.lock().unwrap().is_empty());
        assert!(!scrubber.is_dragging());
    }

    #[test]
    fn test_leave_clears_hover() {
        let (mut scrubber, _, _) = recording_scrubber();
        scrubber.handle_pointer(PointerEvent::Moved { x: 300.0, y: 0.0 });
        assert!(scrubber.hover_preview().is_some());
        assert!(scrubber.handle_pointer(PointerEvent::Left));
        assert_eq!(scrubber.state(), ScrubberState::Idle);
        assert_eq!(scrubber.hover_preview(), None);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (scrubber, seeks, _) = recording_scrubber();
        let mut scrubber = scrubber.disabled(true);
        assert!(!scrubber.handle_pointer(PointerEvent::Pressed { x: 500.0, y: 0.0 }));
        assert!(seeks.lock().unwrap().is_empty());
    }

    #[test]
    fn test_fill_width() {
        let (scrubber, _, _) = recording_scrubber();
        assert_eq!(scrubber.fill_width(0.5), 450.0);
        assert_eq!(scrubber.fill_width(2.0), 900.0);
    }
}
