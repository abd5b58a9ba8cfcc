//! Automatic / interactive view mode toggle

use synapse_core::Translator;

/// How the animation is presented
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Plays on its own; secondary panels auto-hide
    #[default]
    Automatic,
    /// The viewer drives playback with the controls
    Interactive,
}

impl ViewMode {
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Automatic => "automatic",
            ViewMode::Interactive => "interactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Automatic => ViewMode::Interactive,
            ViewMode::Interactive => ViewMode::Automatic,
        }
    }

    pub fn label(self, translator: &dyn Translator) -> String {
        translator.t(&format!("neuralAnimation.viewMode.{}", self.name()), &[])
    }
}

/// Two-state toggle reporting mode changes
pub struct ViewModeToggle {
    mode: ViewMode,
    disabled: bool,
    on_change: Option<Box<dyn FnMut(ViewMode) + Send>>,
}

impl ViewModeToggle {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            disabled: false,
            on_change: None,
        }
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ViewMode) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.set(self.mode.toggled());
        self.mode
    }

    /// Switch to `mode`; returns whether it changed
    pub fn set(&mut self, mode: ViewMode) -> bool {
        if self.disabled || mode == self.mode {
            return false;
        }
        self.mode = mode;
        if let Some(callback) = self.on_change.as_mut() {
            callback(mode);
        }
        true
    }
}

impl Default for ViewModeToggle {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use synapse_core::{Catalog, Locale};

    #[test]
    fn test_toggle_reports_changes() {
        let modes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&modes);
        let mut toggle = ViewModeToggle::default().on_change(move |m| sink.lock().unwrap().push(m));

        assert_eq!(toggle.toggle(), ViewMode::Interactive);
        assert!(!toggle.set(ViewMode::Interactive));
        assert_eq!(toggle.toggle(), ViewMode::Automatic);
        assert_eq!(
            *modes.lock().unwrap(),
            vec![ViewMode::Interactive, ViewMode::Automatic]
        );
    }

    #[test]
    fn test_disabled_keeps_mode() {
        let mut toggle = ViewModeToggle::new(ViewMode::Interactive).disabled(true);
        assert_eq!(toggle.toggle(), ViewMode::Interactive);
    }

    #[test]
    fn test_labels() {
        let catalog = Catalog::load(Locale::Fr).unwrap();
        assert!(!ViewMode::Automatic.label(&catalog).contains("viewMode"));
        assert_eq!(ViewMode::Interactive.name(), "interactive");
    }
}
