#![forbid(unsafe_code)]

//! Decorative cursor follower (desktop only).

use crate::dom::{DomCommand, Target};

/// Half the follower's diameter; the element is centred on the pointer.
const HALF_SIZE_PX: f64 = 10.0;

const SCALE_HOVER: &str = "scale(1.5)";
const SCALE_REST: &str = "scale(1)";

/// Tracks whether the follower exists and emits its position updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorFollower {
    enabled: bool,
}

impl CursorFollower {
    /// Decide once, at mount time, whether the follower exists.
    pub fn mount(&mut self, desktop: bool, out: &mut Vec<DomCommand>) {
        self.enabled = desktop;
        if desktop {
            out.push(DomCommand::CreateCursor);
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn moved(&self, x: f64, y: f64, out: &mut Vec<DomCommand>) {
        if !self.enabled {
            return;
        }
        out.push(style("left", format!("{}px", x - HALF_SIZE_PX)));
        out.push(style("top", format!("{}px", y - HALF_SIZE_PX)));
    }

    pub fn hover(&self, entered: bool, out: &mut Vec<DomCommand>) {
        if !self.enabled {
            return;
        }
        let scale = if entered { SCALE_HOVER } else { SCALE_REST };
        out.push(style("transform", scale.to_string()));
    }
}

fn style(property: &'static str, value: String) -> DomCommand {
    DomCommand::SetStyle {
        target: Target::Cursor,
        property,
        value,
    }
}
