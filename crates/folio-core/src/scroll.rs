#![forbid(unsafe_code)]

//! Scroll-driven styling: the navbar background and the profile parallax.

use crate::dom::{DomCommand, Target};

/// Navbar appearance, a pure function of the vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    /// At or below the threshold: translucent, no shadow.
    Translucent,
    /// Scrolled past the threshold: opaque with a drop shadow.
    Solid,
}

impl NavbarStyle {
    #[must_use]
    pub fn for_offset(offset_y: f64, solid_after_px: f64) -> Self {
        if offset_y > solid_after_px {
            Self::Solid
        } else {
            Self::Translucent
        }
    }

    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Translucent => "rgba(16, 16, 125, 0.95)",
            Self::Solid => "rgba(16, 16, 125, 0.98)",
        }
    }

    #[must_use]
    pub const fn box_shadow(self) -> &'static str {
        match self {
            Self::Translucent => "none",
            Self::Solid => "0 2px 20px rgba(0,0,0,0.1)",
        }
    }

    pub fn emit(self, out: &mut Vec<DomCommand>) {
        out.push(DomCommand::SetStyle {
            target: Target::Navbar,
            property: "background",
            value: self.background().to_string(),
        });
        out.push(DomCommand::SetStyle {
            target: Target::Navbar,
            property: "box-shadow",
            value: self.box_shadow().to_string(),
        });
    }
}

/// Remembers the last applied navbar style so unchanged bands emit nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavbarTracker {
    applied: Option<NavbarStyle>,
}

impl NavbarTracker {
    #[must_use]
    pub const fn applied(&self) -> Option<NavbarStyle> {
        self.applied
    }

    pub fn update(&mut self, offset_y: f64, solid_after_px: f64, out: &mut Vec<DomCommand>) {
        let style = NavbarStyle::for_offset(offset_y, solid_after_px);
        if self.applied != Some(style) {
            self.applied = Some(style);
            style.emit(out);
        }
    }
}

/// Vertical parallax offset of the profile image.
#[must_use]
pub fn parallax_offset(offset_y: f64, rate: f64) -> f64 {
    let offset = offset_y * rate;
    // Avoid rendering "-0px".
    if offset == 0.0 { 0.0 } else { offset }
}

#[must_use]
pub fn parallax_transform(offset_y: f64, rate: f64) -> String {
    format!("translateY({}px) scale(1)", parallax_offset(offset_y, rate))
}
