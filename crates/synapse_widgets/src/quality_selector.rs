//! Quality selector
//!
//! Detection runs once per selector. In `Auto` mode the recommendation
//! becomes the effective tier; an explicit choice wins until the user picks
//! something else, including `Auto` again.

use crate::device::{recommend_quality, DeviceProbe};
use synapse_core::{QualityMode, QualityTier, Translator};

/// Modes offered by the selector, in display order
pub const QUALITY_OPTIONS: [QualityMode; 4] = [
    QualityMode::Auto,
    QualityMode::Low,
    QualityMode::Medium,
    QualityMode::High,
];

/// Quality dropdown state
pub struct QualitySelector {
    mode: QualityMode,
    recommended: Option<QualityTier>,
    open: bool,
    on_change: Option<Box<dyn FnMut(QualityTier) + Send>>,
}

impl QualitySelector {
    pub fn new(mode: QualityMode) -> Self {
        Self {
            mode,
            recommended: None,
            open: false,
            on_change: None,
        }
    }

    /// Called with the new effective tier
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(QualityTier) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> QualityMode {
        self.mode
    }

    pub fn recommended(&self) -> Option<QualityTier> {
        self.recommended
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Tier the renderer should use right now
    pub fn effective_tier(&self) -> QualityTier {
        self.mode
            .tier()
            .or(self.recommended)
            .unwrap_or(QualityTier::Medium)
    }

    /// Run detection once and return the recommendation
    ///
    /// In `Auto` mode a recommendation that changes the effective tier is
    /// reported through `on_change`. Later calls reuse the first result.
    pub fn detect(&mut self, probe: &dyn DeviceProbe) -> QualityTier {
        if let Some(tier) = self.recommended {
            return tier;
        }
        let before = self.effective_tier();
        let tier = recommend_quality(probe);
        self.recommended = Some(tier);
        if self.mode == QualityMode::Auto && tier != before {
            self.notify();
        }
        tier
    }

    /// Explicit user choice
    pub fn select(&mut self, mode: QualityMode) {
        self.open = false;
        if mode == self.mode {
            return;
        }
        let before = self.effective_tier();
        self.mode = mode;
        tracing::debug!("QualitySelector: mode set to {}", mode.name());
        if self.effective_tier() != before {
            self.notify();
        }
    }

    /// Translated label for an option
    pub fn option_label(&self, mode: QualityMode, translator: &dyn Translator) -> String {
        translator.t(&format!("neuralAnimation.quality.{}", mode.name()), &[])
    }

    /// Translated "Recommended: ..." hint, once detection has run
    pub fn recommendation_label(&self, translator: &dyn Translator) -> Option<String> {
        self.recommended.map(|tier| {
            let quality = self.option_label(QualityMode::from(tier), translator);
            translator.t("neuralAnimation.quality.recommended", &[("quality", &quality)])
        })
    }

    fn notify(&mut self) {
        let tier = self.effective_tier();
        if let Some(callback) = self.on_change.as_mut() {
            callback(tier);
        }
    }
}

impl Default for QualitySelector {
    fn default() -> Self {
        Self::new(QualityMode::Auto)
    }
}
