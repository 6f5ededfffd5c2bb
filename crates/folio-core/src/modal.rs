#![forbid(unsafe_code)]

//! Project details modal.
//!
//! At most one modal exists at a time. Opening a new one while another is
//! open (or still closing) detaches the old overlay immediately and cancels
//! its timers before the new one is created.

use crate::config::PROJECT_PLACEHOLDER;
use crate::controller::{Ctx, Task};
use crate::dom::{DomCommand, EphemeralId, Target};
use crate::timer::TimerId;

pub const PANEL_HIDDEN: &str = "scale(0.8)";
pub const PANEL_SHOWN: &str = "scale(1)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Entering,
    Open,
    Closing,
}

#[derive(Debug, Clone)]
struct OpenModal {
    id: EphemeralId,
    title: String,
    phase: ModalPhase,
    timer: Option<TimerId>,
}

/// Owner of the single modal slot.
#[derive(Debug, Clone, Default)]
pub struct ModalHost {
    current: Option<OpenModal>,
}

impl ModalHost {
    #[must_use]
    pub fn current(&self) -> Option<(EphemeralId, ModalPhase)> {
        self.current.as_ref().map(|m| (m.id, m.phase))
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.title.as_str())
    }

    pub(crate) fn open(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId, title: &str, description: &str) {
        if let Some((old, _)) = self.current() {
            tracing::debug!(old = old.0, new = id.0, "replacing open modal");
            self.detach(ctx);
        }
        ctx.out.push(DomCommand::CreateModal {
            id,
            title: title.to_string(),
            description: description.to_string(),
            close_label: ctx.config.messages.modal_close.clone(),
            contact_label: ctx.config.messages.modal_contact.clone(),
        });
        let timer = ctx
            .timers
            .schedule(ctx.now, ctx.config.timings.enter_delay(), Task::ModalEnter(id));
        self.current = Some(OpenModal {
            id,
            title: title.to_string(),
            phase: ModalPhase::Entering,
            timer: Some(timer),
        });
    }

    pub(crate) fn on_enter(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        let Some(modal) = self.current.as_mut().filter(|m| m.id == id) else {
            return;
        };
        if modal.phase != ModalPhase::Entering {
            return;
        }
        modal.phase = ModalPhase::Open;
        modal.timer = None;
        ctx.out.extend(visual_state(id, "1", PANEL_SHOWN));
    }

    /// Start the exit transition. No-op without a modal or while closing.
    pub(crate) fn close(&mut self, ctx: &mut Ctx<'_>) {
        let Some(modal) = self.current.as_mut() else {
            return;
        };
        if modal.phase == ModalPhase::Closing {
            return;
        }
        modal.phase = ModalPhase::Closing;
        if let Some(timer) = modal.timer.take() {
            ctx.timers.cancel(timer);
        }
        let id = modal.id;
        ctx.out.extend(visual_state(id, "0", PANEL_HIDDEN));
        modal.timer = Some(ctx.timers.schedule(
            ctx.now,
            ctx.config.timings.exit_transition(),
            Task::ModalRemove(id),
        ));
    }

    /// Fallback removal timer or transition end for a closing modal.
    pub(crate) fn finish_close(&mut self, ctx: &mut Ctx<'_>, id: EphemeralId) {
        let closing = self
            .current
            .as_ref()
            .is_some_and(|m| m.id == id && m.phase == ModalPhase::Closing);
        if closing {
            self.detach(ctx);
        }
    }

    fn detach(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(modal) = self.current.take() {
            if let Some(timer) = modal.timer {
                ctx.timers.cancel(timer);
            }
            ctx.out.push(DomCommand::Remove {
                target: Target::ModalOverlay(modal.id),
            });
        }
    }
}

/// Message pre-filled when asking about a project.
#[must_use]
pub fn contact_message(template: &str, project_title: &str) -> String {
    template.replace(PROJECT_PLACEHOLDER, project_title)
}

fn visual_state(id: EphemeralId, opacity: &str, panel: &str) -> [DomCommand; 2] {
    [
        DomCommand::SetStyle {
            target: Target::ModalOverlay(id),
            property: "opacity",
            value: opacity.to_string(),
        },
        DomCommand::SetStyle {
            target: Target::ModalPanel(id),
            property: "transform",
            value: panel.to_string(),
        },
    ]
}
