#![forbid(unsafe_code)]

//! Reveal-on-scroll for cards.
//!
//! Cards start transparent and shifted down. The first time a card is
//! reported in view it transitions to its resting state and is unobserved;
//! leaving the viewport never hides it again.

use std::collections::BTreeSet;

use crate::config::Thresholds;
use crate::dom::{CardId, DomCommand, Target};

const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Fire-once reveal bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    card_count: usize,
    revealed: BTreeSet<CardId>,
}

impl RevealTracker {
    /// Put every card in its hidden starting state.
    pub fn prepare(&mut self, card_count: usize, thresholds: &Thresholds, out: &mut Vec<DomCommand>) {
        self.card_count = card_count;
        self.revealed.clear();
        let hidden = format!("translateY({}px)", thresholds.reveal_offset_px);
        for card in (0..card_count).map(CardId) {
            let target = Target::Card(card);
            out.extend([
                style(target, "opacity", "0"),
                style(target, "transform", &hidden),
                style(target, "transition", REVEAL_TRANSITION),
            ]);
        }
    }

    /// A card entered the viewport. Returns `true` if this revealed it.
    pub fn on_intersect(&mut self, card: CardId, out: &mut Vec<DomCommand>) -> bool {
        if card.0 >= self.card_count || !self.revealed.insert(card) {
            return false;
        }
        let target = Target::Card(card);
        out.extend([
            style(target, "opacity", "1"),
            style(target, "transform", "translateY(0)"),
            DomCommand::Unobserve { target },
        ]);
        true
    }

    #[must_use]
    pub fn is_revealed(&self, card: CardId) -> bool {
        self.revealed.contains(&card)
    }

    /// Cards still waiting to be revealed.
    pub fn pending(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..self.card_count)
            .map(CardId)
            .filter(|card| !self.revealed.contains(card))
    }
}

/// Geometry fallback for hosts without `IntersectionObserver`.
///
/// `top` and `height` are the element's bounding box relative to the viewport.
/// The viewport's bottom edge is raised by the reveal margin, and at least the
/// reveal ratio of the element must lie inside.
#[must_use]
pub fn is_in_view(top: f64, height: f64, viewport_height: f64, thresholds: &Thresholds) -> bool {
    let view_bottom = viewport_height - thresholds.reveal_bottom_margin_px;
    let bottom = top + height;
    if view_bottom <= 0.0 || bottom <= 0.0 || top >= view_bottom {
        return false;
    }
    if height <= 0.0 {
        return true;
    }
    let visible = bottom.min(view_bottom) - top.max(0.0);
    visible / height >= thresholds.reveal_visible_ratio
}

fn style(target: Target, property: &'static str, value: &str) -> DomCommand {
    DomCommand::SetStyle {
        target,
        property,
        value: value.to_string(),
    }
}
