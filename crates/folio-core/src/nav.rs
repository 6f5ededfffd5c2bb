#![forbid(unsafe_code)]

//! Responsive navigation: the mobile menu toggle and smooth in-page scrolling.

use crate::dom::{DomCommand, SectionLayout, Target};

/// Class carried by the hamburger control and the menu while open.
pub const ACTIVE_CLASS: &str = "active";

/// Open/closed state of the mobile menu.
///
/// The hamburger control and the menu always share the same state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and emit the class updates for both elements.
    pub fn toggle(&mut self, out: &mut Vec<DomCommand>) {
        self.open = !self.open;
        self.emit(out);
    }

    /// Force the menu closed, whatever its prior state.
    pub fn close(&mut self, out: &mut Vec<DomCommand>) {
        self.open = false;
        self.emit(out);
    }

    fn emit(&self, out: &mut Vec<DomCommand>) {
        for target in [Target::Hamburger, Target::NavMenu] {
            out.push(DomCommand::SetClass {
                target,
                class: ACTIVE_CLASS,
                present: self.open,
            });
        }
    }
}

/// Element id referenced by an in-page link (`"#about"` → `"about"`).
///
/// Returns `None` for links that do not point into the page.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Scroll offset that puts a section's top edge just below the fixed navbar.
#[must_use]
pub fn scroll_target(layout: SectionLayout) -> f64 {
    layout.section_top - layout.nav_height
}

/// Scroll command for an optional layout; absent anchors yield nothing.
#[must_use]
pub fn scroll_command(layout: Option<SectionLayout>) -> Option<DomCommand> {
    layout.map(|layout| DomCommand::ScrollTo {
        top: scroll_target(layout),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_closed_state() {
        let mut menu = MenuState::default();
        let mut out = Vec::new();
        menu.toggle(&mut out);
        assert!(menu.is_open());
        menu.toggle(&mut out);
        assert!(!menu.is_open());
        assert_eq!(
            out.last(),
            Some(&DomCommand::SetClass {
                target: Target::NavMenu,
                class: ACTIVE_CLASS,
                present: false,
            })
        );
    }

    #[test]
    fn close_is_unconditional() {
        let mut menu = MenuState::default();
        let mut out = Vec::new();
        menu.close(&mut out);
        assert!(!menu.is_open());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn fragments_resolve_to_ids() {
        assert_eq!(fragment_target("#sobre-mi"), Some("sobre-mi"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("https://example.com"), None);
    }

    #[test]
    fn target_offset_subtracts_navbar_height() {
        let layout = SectionLayout {
            section_top: 1_200.0,
            nav_height: 70.0,
        };
        assert_eq!(scroll_target(layout), 1_130.0);
        assert_eq!(scroll_command(None), None);
    }
}
