#![forbid(unsafe_code)]

//! Inline styles for the elements the page creates at runtime.

use crate::notification::{HIDDEN_TRANSFORM, NotificationKind};

/// Initial inline style of a notification banner (off-screen, to the right).
#[must_use]
pub fn notification_css(kind: NotificationKind) -> String {
    format!(
        "position: fixed; top: 100px; right: 20px; background: {bg}; color: white; \
         padding: 15px 20px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.3); \
         z-index: 10000; transform: {HIDDEN_TRANSFORM}; transition: transform 0.3s ease; \
         max-width: 300px; font-family: 'Poppins', Arial, sans-serif;",
        bg = kind.background(),
    )
}

pub const MODAL_OVERLAY_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     background: rgba(0,0,0,0.8); z-index: 10000; display: flex; justify-content: center; \
     align-items: center; opacity: 0; transition: opacity 0.3s ease;";

pub const MODAL_PANEL_CSS: &str = "background: linear-gradient(135deg, #1a1a9a, #10107D); \
     padding: 2rem; border-radius: 15px; max-width: 500px; width: 90%; \
     border: 1px solid rgba(235, 223, 225, 0.3); transform: scale(0.8); \
     transition: transform 0.3s ease;";

pub const MODAL_TITLE_CSS: &str = "color: #EBDFE1; margin-bottom: 1rem; font-size: 1.5rem;";
pub const MODAL_TEXT_CSS: &str = "color: #E0DFEB; line-height: 1.6; margin-bottom: 2rem;";
pub const MODAL_ACTIONS_CSS: &str = "text-align: center;";
pub const MODAL_CLOSE_BUTTON_CSS: &str = "margin-right: 1rem;";

pub const CURSOR_CSS: &str = "position: fixed; width: 20px; height: 20px; \
     background: linear-gradient(45deg, #EBDFE1, #E5DFEB); border-radius: 50%; \
     pointer-events: none; z-index: 10000; mix-blend-mode: difference; \
     transition: transform 0.1s ease;";

/// Class put on the root element while transitions are disabled.
pub const NO_TRANSITIONS_CLASS: &str = "folio-no-transitions";

/// Stylesheet rule backing [`NO_TRANSITIONS_CLASS`].
#[must_use]
pub fn no_transitions_rule() -> String {
    format!(".{NO_TRANSITIONS_CLASS}, .{NO_TRANSITIONS_CLASS} * {{ transition: none !important; }}")
}
