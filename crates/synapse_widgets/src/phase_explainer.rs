//! Phase explainer panel
//!
//! A read model over `(current_phase, progress, is_playing)`. In automatic
//! mode the panel hides itself `hide_after_ms` after it was last shown; every
//! phase change shows it again and restarts that delay.

use crate::view_mode::ViewMode;
use synapse_core::{DisplayConfig, Phase, TimelineState, Translator, PHASES, PHASE_COUNT};

/// Rendered explainer content
#[derive(Clone, Debug, PartialEq)]
pub struct ExplainerView {
    pub phase: usize,
    pub title: String,
    pub description: String,
    /// Screen reader announcement, e.g. "Phase 2 of 5: Organization"
    pub announcement: String,
    /// Fraction of the current phase elapsed
    pub phase_progress: f64,
    pub is_playing: bool,
    pub visible: bool,
}

/// Explainer visibility state
pub struct PhaseExplainer {
    hide_after_ms: u64,
    auto_hide: bool,
    visible: bool,
    shown_at_ms: u64,
    last_phase: Option<usize>,
}

impl PhaseExplainer {
    pub fn new(hide_after_ms: u64) -> Self {
        Self {
            hide_after_ms,
            auto_hide: true,
            visible: true,
            shown_at_ms: 0,
            last_phase: None,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.explainer_hide_ms)
    }

    /// Disable auto-hide entirely
    pub fn auto_hide(mut self, enabled: bool) -> Self {
        self.auto_hide = enabled;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the panel and restart the hide delay
    pub fn show(&mut self, now_ms: u64) {
        self.visible = true;
        self.shown_at_ms = now_ms;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Advance visibility to `now_ms`; returns whether visibility changed
    pub fn update(&mut self, state: &TimelineState, mode: ViewMode, now_ms: u64) -> bool {
        let was_visible = self.visible;

        if self.last_phase != Some(state.current_phase) {
            self.last_phase = Some(state.current_phase);
            self.show(now_ms);
        }

        if mode == ViewMode::Automatic
            && self.auto_hide
            && self.visible
            && now_ms.saturating_sub(self.shown_at_ms) >= self.hide_after_ms
        {
            tracing::trace!("PhaseExplainer: auto-hiding after {}ms", self.hide_after_ms);
            self.visible = false;
        }

        was_visible != self.visible
    }

    /// Content for the current state
    pub fn view(&self, state: &TimelineState, translator: &dyn Translator) -> ExplainerView {
        let index = state.current_phase.min(PHASE_COUNT - 1);
        let phase = &PHASES[index];
        let title = translator.t(&phase.name_key(), &[]);
        let number = (index + 1).to_string();
        let total = PHASE_COUNT.to_string();
        let announcement = translator.t(
            "neuralAnimation.phases.phaseAnnouncement",
            &[("number", &number), ("total", &total), ("name", &title)],
        );

        ExplainerView {
            phase: index,
            description: translator.t(&phase.description_key(), &[]),
            title,
            announcement,
            phase_progress: phase_progress(phase, state),
            is_playing: state.is_playing,
            visible: self.visible,
        }
    }
}

/// Fraction of `phase` covered by the state's position on the phase table
fn phase_progress(phase: &Phase, state: &TimelineState) -> f64 {
    let table_ms = state.progress.clamp(0.0, 1.0) * PHASES[PHASE_COUNT - 1].end_ms as f64;
    let into = table_ms - phase.start_ms as f64;
    (into / phase.duration_ms() as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::{Catalog, Locale};

    fn state(phase: usize, progress: f64) -> TimelineState {
        TimelineState {
            is_initialized: true,
            is_playing: true,
            current_phase: phase,
            progress,
            duration_ms: 18_000,
            error: None,
        }
    }

    #[test]
    fn test_auto_hides_in_automatic_mode() {
        let mut explainer = PhaseExplainer::new(8_000);
        let s = state(0, 0.0);
        explainer.update(&s, ViewMode::Automatic, 1_000);
        assert!(explainer.is_visible());
        assert!(!explainer.update(&s, ViewMode::Automatic, 8_999));
        assert!(explainer.update(&s, ViewMode::Automatic, 9_000));
        assert!(!explainer.is_visible());
    }

    #[test]
    fn test_phase_change_restarts_delay() {
        let mut explainer = PhaseExplainer::new(8_000);
        explainer.update(&state(0, 0.0), ViewMode::Automatic, 0);
        explainer.update(&state(0, 0.1), ViewMode::Automatic, 9_000);
        assert!(!explainer.is_visible());

        assert!(explainer.update(&state(1, 0.2), ViewMode::Automatic, 10_000));
        assert!(explainer.is_visible());
        explainer.update(&state(1, 0.3), ViewMode::Automatic, 17_000);
        assert!(explainer.is_visible());
        explainer.update(&state(1, 0.35), ViewMode::Automatic, 18_000);
        assert!(!explainer.is_visible());
    }

    #[test]
    fn test_interactive_mode_stays_visible() {
        let mut explainer = PhaseExplainer::new(100);
        explainer.update(&state(2, 0.5), ViewMode::Interactive, 0);
        explainer.update(&state(2, 0.5), ViewMode::Interactive, 60_000);
        assert!(explainer.is_visible());
    }

    #[test]
    fn test_view_content() {
        let catalog = Catalog::load(Locale::En).unwrap();
        let explainer = PhaseExplainer::new(8_000);
        // 9000ms is halfway through connection (7000..11000)
        let view = explainer.view(&state(2, 0.5), &catalog);
        assert_eq!(view.title, "Connections");
        assert_eq!(view.announcement, "Phase 3 of 5: Connections");
        assert_eq!(view.phase_progress, 0.5);
        assert!(view.is_playing);
        assert!(view.visible);
    }
}
