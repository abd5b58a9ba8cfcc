//! Session gating for the authenticated curriculum sections
//!
//! The session itself comes from an external provider; this module only maps
//! its status to what a section page should show.

use serde::{Deserialize, Serialize};

/// Status reported by the session provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What a gated section should render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionAccess {
    /// Session still resolving; show a placeholder
    Loading,
    /// Render the section content
    Render,
    /// Send the visitor to sign in, then back to the section
    Redirect(String),
}

/// Resolves section access from a session status
#[derive(Clone, Debug)]
pub struct SectionGate {
    sign_in_path: String,
}

impl Default for SectionGate {
    fn default() -> Self {
        Self::new("/auth/signin")
    }
}

impl SectionGate {
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
        }
    }

    pub fn resolve(&self, status: SessionStatus, section_path: &str) -> SectionAccess {
        match status {
            SessionStatus::Loading => SectionAccess::Loading,
            SessionStatus::Authenticated => SectionAccess::Render,
            SessionStatus::Unauthenticated => SectionAccess::Redirect(format!(
                "{}?callbackUrl={}",
                self.sign_in_path,
                urlencoding::encode(section_path)
            )),
        }
    }
}
