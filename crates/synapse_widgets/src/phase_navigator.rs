//! Phase navigator
//!
//! A list of the five phases with a status derived only from the current
//! phase index. Items are activated by click or by Enter/Space on a focused
//! item; focus moves with the host's native tab order, not with arrow keys.

use synapse_core::{Color, Key, Translator, PHASES};

/// Status of a phase relative to the current one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseStatus {
    Completed,
    Current,
    Upcoming,
}

impl PhaseStatus {
    pub fn of(index: usize, current_phase: usize) -> Self {
        match index.cmp(&current_phase) {
            std::cmp::Ordering::Less => PhaseStatus::Completed,
            std::cmp::Ordering::Equal => PhaseStatus::Current,
            std::cmp::Ordering::Greater => PhaseStatus::Upcoming,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            PhaseStatus::Completed => "neuralAnimation.phases.completed",
            PhaseStatus::Current => "neuralAnimation.phases.current",
            PhaseStatus::Upcoming => "neuralAnimation.phases.upcoming",
        }
    }
}

/// One rendered navigator entry
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseItem {
    pub index: usize,
    pub name: String,
    pub status: PhaseStatus,
    pub status_label: String,
    pub color: Color,
}

/// Phase list with selection callback
pub struct PhaseNavigator {
    disabled: bool,
    on_select: Option<Box<dyn FnMut(usize) + Send>>,
}

impl PhaseNavigator {
    pub fn new() -> Self {
        Self {
            disabled: false,
            on_select: None,
        }
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// View model for every phase
    pub fn items(&self, current_phase: usize, translator: &dyn Translator) -> Vec<PhaseItem> {
        PHASES
            .iter()
            .map(|phase| {
                let status = PhaseStatus::of(phase.index, current_phase);
                PhaseItem {
                    index: phase.index,
                    name: translator.t(&phase.name_key(), &[]),
                    status,
                    status_label: translator.t(status.label_key(), &[]),
                    color: phase.primary_color,
                }
            })
            .collect()
    }

    /// Returns whether the selection was dispatched
    pub fn click(&mut self, index: usize) -> bool {
        if self.disabled || index >= PHASES.len() {
            return false;
        }
        match self.on_select.as_mut() {
            Some(callback) => {
                callback(index);
                true
            }
            None => false,
        }
    }

    /// Key press on the focused item at `index`
    pub fn key(&mut self, index: usize, key: &Key) -> bool {
        if key.is_activation() {
            self.click(index)
        } else {
            false
        }
    }
}

impl Default for PhaseNavigator {
    fn default() -> Self {
        Self::new()
    }
}
