#![forbid(unsafe_code)]

//! Viewport-width based device adaptation.

use crate::dom::DomCommand;

/// Whether a viewport of `width` CSS pixels counts as mobile.
#[must_use]
pub fn is_mobile(width: f64, mobile_max_width_px: f64) -> bool {
    width <= mobile_max_width_px
}

/// Document-wide transition switch, derived from the current viewport width.
///
/// Unlike a one-way override, growing the viewport back past the threshold
/// re-enables transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevicePolicy {
    transitions_disabled: Option<bool>,
}

impl DevicePolicy {
    #[must_use]
    pub fn transitions_disabled(&self) -> bool {
        self.transitions_disabled.unwrap_or(false)
    }

    /// Recompute from `width`; emits a command only when the state flips
    /// (or on the first evaluation).
    pub fn update(&mut self, width: f64, mobile_max_width_px: f64, out: &mut Vec<DomCommand>) {
        let disabled = is_mobile(width, mobile_max_width_px);
        if self.transitions_disabled != Some(disabled) {
            self.transitions_disabled = Some(disabled);
            out.push(DomCommand::SetTransitionsDisabled { disabled });
        }
    }
}
