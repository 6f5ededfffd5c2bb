#![forbid(unsafe_code)]

//! Auto-dismissing notification banners.
//!
//! Each banner slides in shortly after creation, slides out once its visible
//! time is up and is detached when the exit transition ends (or when the
//! fallback timer fires, whichever comes first). Banners stack; past the
//! configured cap the oldest one is dismissed early.
//!
//! # Invariants
//!
//! - Every created banner is eventually removed exactly once.
//! - A removed or evicted banner has no pending timers left.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::controller::{Ctx, Task};
use crate::dom::{DomCommand, EphemeralId, Target};
use crate::timer::TimerId;

pub const HIDDEN_TRANSFORM: &str = "translateX(400px)";
pub const SHOWN_TRANSFORM: &str = "translateX(0)";

/// Notification flavour, also used as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Success => "#4CAF50",
            Self::Error => "#f44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone)]
struct Live {
    id: EphemeralId,
    phase: Phase,
    timers: Vec<TimerId>,
}

/// Tracks live banners and drives their lifecycle.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    live: VecDeque<Live>,
}

impl NotificationCenter {
    /// Banners currently attached to the document (including leaving ones).
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Banners not yet on their way out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.live.iter().filter(|n| n.phase != Phase::Leaving).count()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<EphemeralId> {
        self.live.iter().map(|n| n.id).collect()
    }

    /// Create a banner, evicting the oldest active one if the stack is full.
    pub(crate) fn show(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId, message: &str, kind: NotificationKind) {
        let cap = ctx.config.notifications.max_stacked;
        while self.active_count() >= cap {
            let Some(oldest) = self.live.iter().find(|n| n.phase != Phase::Leaving).map(|n| n.id)
            else {
                break;
            };
            tracing::debug!(id = oldest.0, "evicting oldest notification");
            self.begin_exit(ctx, oldest);
        }

        ctx.out.push(DomCommand::CreateNotification {
            id,
            message: message.to_string(),
            kind,
        });
        let timings = ctx.config.timings;
        let enter = ctx
            .timers
            .schedule(ctx.now, timings.enter_delay(), Task::NotificationEnter(id));
        let exit = ctx.timers.schedule(
            ctx.now,
            timings.notification_visible(),
            Task::NotificationExit(id),
        );
        self.live.push_back(Live {
            id,
            phase: Phase::Entering,
            timers: vec![enter, exit],
        });
    }

    pub(crate) fn on_enter(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        let Some(live) = self.find_mut(id) else {
            return;
        };
        if live.phase != Phase::Entering {
            return;
        }
        live.phase = Phase::Visible;
        ctx.out.push(transform(id, SHOWN_TRANSFORM));
    }

    /// Start the exit transition. Idempotent.
    pub(crate) fn begin_exit(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        let Some(live) = self.find_mut(id) else {
            return;
        };
        if live.phase == Phase::Leaving {
            return;
        }
        live.phase = Phase::Leaving;
        for timer in live.timers.drain(..) {
            ctx.timers.cancel(timer);
        }
        ctx.out.push(transform(id, HIDDEN_TRANSFORM));
        let remove = ctx.timers.schedule(
            ctx.now,
            ctx.config.timings.exit_transition(),
            Task::NotificationRemove(id),
        );
        live.timers.push(remove);
    }

    /// The banner's own transition finished. Only meaningful while leaving.
    pub(crate) fn on_transition_end(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        if self.find_mut(id).is_some_and(|n| n.phase == Phase::Leaving) {
            self.remove(ctx, id);
        }
    }

    /// Detach the banner and cancel whatever it still had scheduled.
    pub(crate) fn remove(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        let Some(pos) = self.live.iter().position(|n| n.id == id) else {
            return;
        };
        if let Some(live) = self.live.remove(pos) {
            for timer in live.timers {
                ctx.timers.cancel(timer);
            }
            ctx.out.push(DomCommand::Remove {
                target: Target::Notification(id),
            });
        }
    }

    fn find_mut(&mut self, id: EphemeralId) -> Option<&mut Live> {
        self.live.iter_mut().find(|n| n.id == id)
    }
}

fn transform(id: EphemeralId, value: &str) -> DomCommand {
    DomCommand::SetStyle {
        target: Target::Notification(id),
        property: "transform",
        value: value.to_string(),
    }
}
