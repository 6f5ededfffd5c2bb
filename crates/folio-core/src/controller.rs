#![forbid(unsafe_code)]

//! The page interaction controller.
//!
//! [`PageController`] owns every piece of transient page state and is driven
//! entirely by its host:
//!
//! 1. [`PageController::mount`] once, with a [`PageSnapshot`] of the document.
//! 2. [`PageController::handle`] for each DOM event; honour the returned
//!    [`EventOutcome`].
//! 3. [`PageController::set_time`] / [`PageController::advance_time`] whenever
//!    the host clock moves; re-arm the host timer for
//!    [`PageController::next_deadline`].
//! 4. Apply [`PageController::take_commands`] after each of the above.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use folio_core::{ContactFields, PageConfig, PageController, PageEvent, PageSnapshot};
//!
//! let mut page = PageController::new(PageConfig::default());
//! page.mount(PageSnapshot { viewport_width: 1280.0, ..PageSnapshot::default() });
//! let outcome = page.handle(PageEvent::FormSubmitted {
//!     fields: ContactFields::new("Ana", "ana@x.com", "Hola"),
//!     submit_label: "Enviar".into(),
//! });
//! assert!(!outcome.prevent_default);
//! page.advance_time(Duration::from_secs(1));
//! let commands = page.take_commands();
//! assert!(!commands.is_empty());
//! ```

use core::time::Duration;

use tracing::{debug, info, trace};

use crate::config::PageConfig;
use crate::cursor::CursorFollower;
use crate::device::{DevicePolicy, is_mobile};
use crate::dom::{
    CardId, DomCommand, EphemeralId, EventOutcome, PageEvent, PageSnapshot, SectionLayout, Target,
};
use crate::error::ValidationError;
use crate::form::{self, ContactFields, SubmissionState};
use crate::modal::{ModalHost, contact_message};
use crate::nav::{MenuState, scroll_command};
use crate::notification::{NotificationCenter, NotificationKind};
use crate::reveal::RevealTracker;
use crate::scroll::{NavbarTracker, parallax_transform};
use crate::timer::{DeterministicClock, TimerId, TimerQueue};
use crate::typewriter::Typewriter;

const CARD_LIFTED: &str = "translateY(-10px) scale(1.02)";
const CARD_RESTING: &str = "translateY(0) scale(1)";

/// Deferred work scheduled on the controller's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    NotificationEnter(EphemeralId),
    NotificationExit(EphemeralId),
    NotificationRemove(EphemeralId),
    ModalEnter(EphemeralId),
    ModalRemove(EphemeralId),
    SubmissionFeedback,
    TypewriterTick,
}

/// Mutable view handed to sub-components while handling one event or timer.
pub(crate) struct Ctx<'a> {
    pub now: Duration,
    pub timers: &'a mut TimerQueue<Task>,
    pub out: &'a mut Vec<DomCommand>,
    pub config: &'a PageConfig,
}

/// Single controller instance for the whole page.
#[derive(Debug)]
pub struct PageController {
    config: PageConfig,
    clock: DeterministicClock,
    timers: TimerQueue<Task>,
    commands: Vec<DomCommand>,
    mounted: bool,
    next_ephemeral: u32,

    menu: MenuState,
    submission: SubmissionState,
    notifications: NotificationCenter,
    navbar: NavbarTracker,
    reveal: RevealTracker,
    modal: ModalHost,
    has_profile_image: bool,
    typewriter: Option<(Typewriter, TimerId)>,
    device: DevicePolicy,
    cursor: CursorFollower,
}

macro_rules! ctx {
    ($self:ident) => {
        Ctx {
            now: $self.clock.now(),
            timers: &mut $self.timers,
            out: &mut $self.commands,
            config: &$self.config,
        }
    };
}

impl PageController {
    #[must_use]
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
            commands: Vec::new(),
            mounted: false,
            next_ephemeral: 0,
            menu: MenuState::default(),
            submission: SubmissionState::default(),
            notifications: NotificationCenter::default(),
            navbar: NavbarTracker::default(),
            reveal: RevealTracker::default(),
            modal: ModalHost::default(),
            has_profile_image: false,
            typewriter: None,
            device: DevicePolicy::default(),
            cursor: CursorFollower::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Wire up the page. Later calls are ignored.
    pub fn mount(&mut self, snapshot: PageSnapshot) {
        if self.mounted {
            debug!("mount called twice; ignoring");
            return;
        }
        self.mounted = true;
        let th = self.config.thresholds;
        info!(
            cards = snapshot.card_count,
            width = snapshot.viewport_width,
            "{}",
            self.config.messages.loaded
        );

        self.navbar
            .update(snapshot.scroll_y, th.navbar_solid_after_px, &mut self.commands);
        self.reveal
            .prepare(snapshot.card_count, &th, &mut self.commands);

        self.has_profile_image = snapshot.has_profile_image;
        if let Some(text) = snapshot.hero_text {
            self.commands.push(DomCommand::SetText {
                target: Target::HeroTitle,
                text: String::new(),
            });
            let timer = self.timers.schedule_repeating(
                self.clock.now(),
                self.config.timings.typewriter_interval(),
                Task::TypewriterTick,
            );
            self.typewriter = Some((Typewriter::new(text), timer));
        }

        self.device
            .update(snapshot.viewport_width, th.mobile_max_width_px, &mut self.commands);
        let desktop = !is_mobile(snapshot.viewport_width, th.mobile_max_width_px);
        self.cursor.mount(desktop, &mut self.commands);
    }

    /// React to one DOM event.
    pub fn handle(&mut self, event: PageEvent) -> EventOutcome {
        trace!(?event, "page event");
        let th = self.config.thresholds;
        match event {
            PageEvent::HamburgerClicked => self.menu.toggle(&mut self.commands),
            PageEvent::NavLinkClicked { layout } => {
                self.menu.close(&mut self.commands);
                self.commands.extend(scroll_command(layout));
                return EventOutcome::PREVENT;
            }
            PageEvent::FormSubmitted {
                fields,
                submit_label,
            } => return self.submit(&fields, submit_label),
            PageEvent::Scrolled { offset_y } => {
                self.navbar
                    .update(offset_y, th.navbar_solid_after_px, &mut self.commands);
                if self.has_profile_image {
                    self.commands.push(DomCommand::SetStyle {
                        target: Target::ProfileImage,
                        property: "transform",
                        value: parallax_transform(offset_y, th.parallax_rate),
                    });
                }
            }
            PageEvent::Resized { viewport_width } => {
                self.device
                    .update(viewport_width, th.mobile_max_width_px, &mut self.commands);
            }
            PageEvent::CardIntersected { card } => {
                self.reveal.on_intersect(card, &mut self.commands);
            }
            PageEvent::CardHover { card, entered } => self.card_hover(card, entered),
            PageEvent::ProjectButtonClicked { title, description } => {
                self.open_project_modal(&title, &description);
            }
            PageEvent::ModalCloseClicked | PageEvent::ModalBackdropClicked => self.close_modal(),
            PageEvent::ModalContactClicked { layout } => {
                match self.modal.title().map(str::to_owned) {
                    Some(title) => self.contact_about_project(&title, layout),
                    None => self.commands.extend(scroll_command(layout)),
                }
            }
            PageEvent::PointerMoved { x, y } => self.cursor.moved(x, y, &mut self.commands),
            PageEvent::InteractiveHover { entered } => {
                self.cursor.hover(entered, &mut self.commands);
            }
            PageEvent::TransitionEnded { target } => self.transition_ended(target),
        }
        EventOutcome::PROCEED
    }

    /// Show a banner. Never fails.
    pub fn show_notification(&mut self, message: &str, kind: NotificationKind) {
        let id = self.alloc_id();
        let mut ctx = ctx!(self);
        self.notifications.show(&mut ctx, id, message, kind);
    }

    pub fn open_project_modal(&mut self, title: &str, description: &str) {
        let id = self.alloc_id();
        let mut ctx = ctx!(self);
        self.modal.open(&mut ctx, id, title, description);
    }

    /// Close the modal if one is open.
    pub fn close_modal(&mut self) {
        let mut ctx = ctx!(self);
        self.modal.close(&mut ctx);
    }

    /// Close the modal, pre-fill the contact message about `project_title`
    /// and scroll to the contact section when `layout` locates it.
    pub fn contact_about_project(&mut self, project_title: &str, layout: Option<SectionLayout>) {
        self.close_modal();
        self.commands.push(DomCommand::SetValue {
            target: Target::MessageField,
            value: contact_message(&self.config.messages.contact_template, project_title),
        });
        self.commands.extend(scroll_command(layout));
    }

    /// Move the clock forward by `dt` and run due timers.
    pub fn advance_time(&mut self, dt: Duration) {
        self.run_until(self.clock.now().saturating_add(dt));
    }

    /// Move the clock to absolute host time `now` and run due timers.
    pub fn set_time(&mut self, now: Duration) {
        self.run_until(now.max(self.clock.now()));
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest pending timer deadline, in controller time.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drain the commands accumulated since the last call.
    pub fn take_commands(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    #[must_use]
    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    #[must_use]
    pub fn modal(&self) -> &ModalHost {
        &self.modal
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    #[must_use]
    pub fn transitions_disabled(&self) -> bool {
        self.device.transitions_disabled()
    }

    #[must_use]
    pub fn cursor_enabled(&self) -> bool {
        self.cursor.is_enabled()
    }

    fn submit(&mut self, fields: &ContactFields, submit_label: String) -> EventOutcome {
        if self.submission.is_sending() {
            debug!("submission already in flight; blocking resubmit");
            return EventOutcome::PREVENT;
        }
        if let Err(err) = form::validate(fields) {
            debug!(%err, "contact form rejected");
            let message = match err {
                ValidationError::MissingFields => &self.config.messages.missing_fields,
                ValidationError::InvalidEmail => &self.config.messages.invalid_email,
            }
            .clone();
            self.show_notification(&message, NotificationKind::Error);
            return EventOutcome::PREVENT;
        }

        self.submission.begin(submit_label);
        self.commands.push(DomCommand::SetText {
            target: Target::SubmitButton,
            text: self.config.messages.sending_label.clone(),
        });
        self.commands.push(DomCommand::SetDisabled {
            target: Target::SubmitButton,
            disabled: true,
        });
        self.timers.schedule(
            self.clock.now(),
            self.config.timings.submit_feedback(),
            Task::SubmissionFeedback,
        );
        EventOutcome::PROCEED
    }

    fn card_hover(&mut self, card: CardId, entered: bool) {
        let value = if entered { CARD_LIFTED } else { CARD_RESTING };
        self.commands.push(DomCommand::SetStyle {
            target: Target::Card(card),
            property: "transform",
            value: value.to_string(),
        });
    }

    fn transition_ended(&mut self, target: Target) {
        let mut ctx = ctx!(self);
        match target {
            Target::Notification(id) => self.notifications.on_transition_end(&mut ctx, id),
            Target::ModalOverlay(id) => self.modal.finish_close(&mut ctx, id),
            _ => {}
        }
    }

    /// Fire due timers in order, stepping the clock to each deadline so that
    /// follow-up timers are scheduled relative to when their parent fired.
    fn run_until(&mut self, target: Duration) {
        while let Some(fired) = self.timers.pop_due(target) {
            self.clock.set(fired.deadline);
            trace!(task = ?fired.task, at = ?fired.deadline, "timer fired");
            self.run_task(fired.task);
        }
        self.clock.set(target);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SubmissionFeedback => {
                let sent = self.config.messages.sent.clone();
                self.show_notification(&sent, NotificationKind::Success);
                self.commands.push(DomCommand::ResetForm);
                if let Some(label) = self.submission.finish() {
                    self.commands.push(DomCommand::SetText {
                        target: Target::SubmitButton,
                        text: label,
                    });
                }
                self.commands.push(DomCommand::SetDisabled {
                    target: Target::SubmitButton,
                    disabled: false,
                });
            }
            Task::TypewriterTick => self.typewriter_tick(),
            Task::NotificationEnter(id) => {
                let mut ctx = ctx!(self);
                self.notifications.on_enter(&mut ctx, id);
            }
            Task::NotificationExit(id) => {
                let mut ctx = ctx!(self);
                self.notifications.begin_exit(&mut ctx, id);
            }
            Task::NotificationRemove(id) => {
                let mut ctx = ctx!(self);
                self.notifications.remove(&mut ctx, id);
            }
            Task::ModalEnter(id) => {
                let mut ctx = ctx!(self);
                self.modal.on_enter(&mut ctx, id);
            }
            Task::ModalRemove(id) => {
                let mut ctx = ctx!(self);
                self.modal.finish_close(&mut ctx, id);
            }
        }
    }

    fn typewriter_tick(&mut self) {
        let Some((typewriter, timer)) = self.typewriter.as_mut() else {
            return;
        };
        if let Some(prefix) = typewriter.tick() {
            self.commands.push(DomCommand::SetText {
                target: Target::HeroTitle,
                text: prefix.to_string(),
            });
        }
        if typewriter.is_done() {
            self.timers.cancel(*timer);
            debug!("typewriter finished");
        }
    }

    fn alloc_id(&mut self) -> EphemeralId {
        let id = EphemeralId(self.next_ephemeral);
        self.next_ephemeral = self.next_ephemeral.wrapping_add(1);
        id
    }
}
