#![forbid(unsafe_code)]

//! Host boundary: events in, commands out.
//!
//! The controller never touches the document. The host translates DOM events
//! into [`PageEvent`]s, including whatever measurements a handler needs, and
//! applies the resulting [`DomCommand`]s. Commands addressing an element the
//! host cannot find are dropped silently.

use crate::form::ContactFields;
use crate::notification::NotificationKind;

/// Index into the card collection (reveal + hover targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// Identity of an ephemeral node (notification or modal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EphemeralId(pub u32);

/// An element the controller addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Navbar,
    Hamburger,
    NavMenu,
    SubmitButton,
    /// The message control pre-filled by the project modal.
    MessageField,
    HeroTitle,
    ProfileImage,
    Cursor,
    Card(CardId),
    Notification(EphemeralId),
    ModalOverlay(EphemeralId),
    ModalPanel(EphemeralId),
}

const CARD_KEY_PREFIX: &str = "card-";

impl Target {
    /// Value of the `data-folio-id` attribute the host stamps on cards so that
    /// observer callbacks can be mapped back to a [`CardId`].
    #[must_use]
    pub fn card_key(card: CardId) -> String {
        format!("{CARD_KEY_PREFIX}{}", card.0)
    }

    /// Inverse of [`Target::card_key`].
    #[must_use]
    pub fn parse_card_key(key: &str) -> Option<CardId> {
        key.strip_prefix(CARD_KEY_PREFIX)?
            .parse()
            .ok()
            .map(CardId)
    }
}

/// A single DOM mutation requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    /// Add (`present`) or remove a class.
    SetClass {
        target: Target,
        class: &'static str,
        present: bool,
    },
    /// Set an inline style property (CSS property name, kebab-case).
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    /// Replace an element's text content.
    SetText { target: Target, text: String },
    SetDisabled { target: Target, disabled: bool },
    /// Replace the value of a form control.
    SetValue { target: Target, value: String },
    /// Clear every field of the contact form.
    ResetForm,
    /// Smooth-scroll the viewport to an absolute vertical offset.
    ScrollTo { top: f64 },
    /// Create and append a notification banner in its off-screen state.
    CreateNotification {
        id: EphemeralId,
        message: String,
        kind: NotificationKind,
    },
    /// Create and append a modal overlay in its hidden state.
    CreateModal {
        id: EphemeralId,
        title: String,
        description: String,
        close_label: String,
        contact_label: String,
    },
    /// Create the decorative cursor follower.
    CreateCursor,
    /// Detach an element from the document.
    Remove { target: Target },
    /// Stop watching a card for visibility changes.
    Unobserve { target: Target },
    /// Toggle the document-wide "no transitions" rule.
    SetTransitionsDisabled { disabled: bool },
}

/// Offsets needed to smooth-scroll to a section under the fixed navbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    /// `offsetTop` of the target section.
    pub section_top: f64,
    /// Rendered height of the fixed navbar.
    pub nav_height: f64,
}

/// State of the document when the controller is mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub viewport_width: f64,
    pub scroll_y: f64,
    /// Number of elements matching the card selectors.
    pub card_count: usize,
    /// Full text of the hero heading, if present.
    pub hero_text: Option<String>,
    pub has_profile_image: bool,
}

/// A DOM event, already reduced to what the handlers need.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    HamburgerClicked,
    /// A navigation link was activated. `layout` is `None` when the link's
    /// section or the navbar cannot be found.
    NavLinkClicked { layout: Option<SectionLayout> },
    FormSubmitted {
        fields: ContactFields,
        /// Current label of the submit control, restored after feedback.
        submit_label: String,
    },
    Scrolled { offset_y: f64 },
    Resized { viewport_width: f64 },
    CardIntersected { card: CardId },
    CardHover { card: CardId, entered: bool },
    ProjectButtonClicked { title: String, description: String },
    ModalCloseClicked,
    /// A click that landed on the overlay backdrop itself.
    ModalBackdropClicked,
    /// The modal's contact action. `layout` locates the contact section.
    ModalContactClicked { layout: Option<SectionLayout> },
    PointerMoved { x: f64, y: f64 },
    InteractiveHover { entered: bool },
    /// A CSS transition finished on `target` itself (not a descendant).
    TransitionEnded { target: Target },
}

/// What the host must do with the originating DOM event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the DOM event.
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PROCEED: Self = Self {
        prevent_default: false,
    };
    pub const PREVENT: Self = Self {
        prevent_default: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_keys_map_back_to_ids() {
        let key = Target::card_key(CardId(7));
        assert_eq!(key, "card-7");
        assert_eq!(Target::parse_card_key(&key), Some(CardId(7)));
    }

    #[test]
    fn foreign_keys_are_ignored() {
        assert_eq!(Target::parse_card_key("modal-1"), None);
        assert_eq!(Target::parse_card_key("card-"), None);
        assert_eq!(Target::parse_card_key("card-x"), None);
    }
}
