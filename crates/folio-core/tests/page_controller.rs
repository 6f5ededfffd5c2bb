//! End-to-end scenarios for the page controller, driven the way the web host
//! drives it: events in, deterministic time forward, commands out.

use core::time::Duration;

use folio_core::config::PageConfig;
use folio_core::modal::ModalPhase;
use folio_core::{
    CardId, ContactFields, DomCommand, EphemeralId, NotificationKind, PageController, PageEvent,
    PageSnapshot, SectionLayout, Target,
};
use pretty_assertions::assert_eq;

const MS: Duration = Duration::from_millis(1);

fn page(snapshot: PageSnapshot) -> PageController {
    let mut page = PageController::new(PageConfig::default());
    page.mount(snapshot);
    page.take_commands();
    page
}

fn plain_page(width: f64) -> PageController {
    page(PageSnapshot {
        viewport_width: width,
        ..PageSnapshot::default()
    })
}

fn submit(page: &mut PageController, name: &str, email: &str, message: &str) -> bool {
    page.handle(PageEvent::FormSubmitted {
        fields: ContactFields::new(name, email, message),
        submit_label: "Enviar".to_string(),
    })
    .prevent_default
}

fn style(target: Target, property: &'static str, value: &str) -> DomCommand {
    DomCommand::SetStyle {
        target,
        property,
        value: value.to_string(),
    }
}

// ── Navigation ────────────────────────────────────────────────────────

#[test]
fn hamburger_toggle_twice_restores_inactive_classes() {
    let mut page = plain_page(400.0);
    page.handle(PageEvent::HamburgerClicked);
    assert!(page.menu().is_open());
    page.handle(PageEvent::HamburgerClicked);
    assert!(!page.menu().is_open());

    let commands = page.take_commands();
    assert_eq!(
        &commands[2..],
        &[
            DomCommand::SetClass {
                target: Target::Hamburger,
                class: "active",
                present: false,
            },
            DomCommand::SetClass {
                target: Target::NavMenu,
                class: "active",
                present: false,
            },
        ]
    );
}

#[test]
fn nav_link_closes_menu_and_scrolls_below_navbar() {
    let mut page = plain_page(400.0);
    page.handle(PageEvent::HamburgerClicked);
    page.take_commands();

    let outcome = page.handle(PageEvent::NavLinkClicked {
        layout: Some(SectionLayout {
            section_top: 900.0,
            nav_height: 72.0,
        }),
    });
    assert!(outcome.prevent_default);
    assert!(!page.menu().is_open());
    assert_eq!(
        page.take_commands().last(),
        Some(&DomCommand::ScrollTo { top: 828.0 })
    );
}

#[test]
fn nav_link_without_anchor_is_a_safe_noop_scroll() {
    let mut page = plain_page(1280.0);
    let outcome = page.handle(PageEvent::NavLinkClicked { layout: None });
    assert!(outcome.prevent_default);
    let commands = page.take_commands();
    assert!(
        !commands
            .iter()
            .any(|c| matches!(c, DomCommand::ScrollTo { .. }))
    );
}

// ── Contact form ──────────────────────────────────────────────────────

#[test]
fn valid_submission_shows_sending_then_success() {
    let mut page = plain_page(1280.0);
    assert!(!submit(&mut page, "Ana", "ana@x.com", "Hola"));
    assert!(page.submission().is_sending());
    assert_eq!(
        page.take_commands(),
        vec![
            DomCommand::SetText {
                target: Target::SubmitButton,
                text: "Enviando...".to_string(),
            },
            DomCommand::SetDisabled {
                target: Target::SubmitButton,
                disabled: true,
            },
        ]
    );

    page.advance_time(MS * 999);
    assert!(page.take_commands().is_empty());

    page.advance_time(MS);
    assert_eq!(
        page.take_commands(),
        vec![
            DomCommand::CreateNotification {
                id: EphemeralId(0),
                message: "¡Mensaje enviado correctamente! Te contactaremos pronto.".to_string(),
                kind: NotificationKind::Success,
            },
            DomCommand::ResetForm,
            DomCommand::SetText {
                target: Target::SubmitButton,
                text: "Enviar".to_string(),
            },
            DomCommand::SetDisabled {
                target: Target::SubmitButton,
                disabled: false,
            },
        ]
    );
    assert!(!page.submission().is_sending());
}

#[test]
fn malformed_email_blocks_and_keeps_fields() {
    let mut page = plain_page(1280.0);
    assert!(submit(&mut page, "Ana", "ana@@x", "Hola"));
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::CreateNotification {
            id: EphemeralId(0),
            message: "Por favor, ingresa un email válido".to_string(),
            kind: NotificationKind::Error,
        }]
    );

    page.advance_time(Duration::from_secs(10));
    assert!(
        !page
            .take_commands()
            .iter()
            .any(|c| matches!(c, DomCommand::ResetForm))
    );
}

#[test]
fn every_incomplete_form_is_blocked_with_an_error() {
    let full = ["Ana", "ana@x.com", "Hola"];
    for mask in 0..7u8 {
        let value = |i: usize| if mask & (1 << i) != 0 { full[i] } else { "" };
        let mut page = plain_page(1280.0);
        assert!(submit(&mut page, value(0), value(1), value(2)), "mask {mask}");
        let commands = page.take_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            DomCommand::CreateNotification {
                kind: NotificationKind::Error,
                message,
                ..
            } if message == "Por favor, completa todos los campos"
        ));
        assert!(!page.submission().is_sending());
    }
}

#[test]
fn resubmitting_while_sending_is_blocked_silently() {
    let mut page = plain_page(1280.0);
    assert!(!submit(&mut page, "Ana", "ana@x.com", "Hola"));
    page.take_commands();
    assert!(submit(&mut page, "Ana", "ana@x.com", "Hola"));
    assert!(page.take_commands().is_empty());
}

// ── Notifications ─────────────────────────────────────────────────────

#[test]
fn notification_slides_in_out_and_is_removed() {
    let mut page = plain_page(1280.0);
    page.show_notification("hola", NotificationKind::Success);
    page.take_commands();

    page.advance_time(MS * 100);
    assert_eq!(
        page.take_commands(),
        vec![style(
            Target::Notification(EphemeralId(0)),
            "transform",
            "translateX(0)"
        )]
    );

    page.advance_time(MS * 4_900);
    assert_eq!(
        page.take_commands(),
        vec![style(
            Target::Notification(EphemeralId(0)),
            "transform",
            "translateX(400px)"
        )]
    );

    page.advance_time(MS * 300);
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::Remove {
            target: Target::Notification(EphemeralId(0)),
        }]
    );
    assert_eq!(page.notifications().live_count(), 0);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn transition_end_removes_leaving_notification_early() {
    let mut page = plain_page(1280.0);
    page.show_notification("hola", NotificationKind::Error);
    page.advance_time(MS * 5_000);
    page.take_commands();

    page.handle(PageEvent::TransitionEnded {
        target: Target::Notification(EphemeralId(0)),
    });
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::Remove {
            target: Target::Notification(EphemeralId(0)),
        }]
    );
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn entrance_transition_end_does_not_remove() {
    let mut page = plain_page(1280.0);
    page.show_notification("hola", NotificationKind::Error);
    page.advance_time(MS * 100);
    page.handle(PageEvent::TransitionEnded {
        target: Target::Notification(EphemeralId(0)),
    });
    assert_eq!(page.notifications().live_count(), 1);
}

#[test]
fn rapid_notifications_are_capped_and_fully_cleaned_up() {
    let mut page = plain_page(1280.0);
    for _ in 0..6 {
        page.show_notification("spam", NotificationKind::Error);
        assert!(page.notifications().active_count() <= 3);
    }
    page.advance_time(Duration::from_secs(6));

    let removed = page
        .take_commands()
        .iter()
        .filter(|c| matches!(c, DomCommand::Remove { .. }))
        .count();
    assert_eq!(removed, 6);
    assert_eq!(page.notifications().live_count(), 0);
    assert_eq!(page.pending_timers(), 0);
}

// ── Scroll effects ────────────────────────────────────────────────────

#[test]
fn navbar_style_follows_threshold_and_reverts_exactly() {
    let mut page = PageController::new(PageConfig::default());
    page.mount(PageSnapshot {
        viewport_width: 1280.0,
        ..PageSnapshot::default()
    });
    let navbar = |commands: Vec<DomCommand>| -> Vec<DomCommand> {
        commands
            .into_iter()
            .filter(|c| matches!(c, DomCommand::SetStyle { target: Target::Navbar, .. }))
            .collect()
    };
    let initial = navbar(page.take_commands());
    assert_eq!(
        initial,
        vec![
            style(Target::Navbar, "background", "rgba(16, 16, 125, 0.95)"),
            style(Target::Navbar, "box-shadow", "none"),
        ]
    );

    page.handle(PageEvent::Scrolled { offset_y: 150.0 });
    assert_eq!(
        navbar(page.take_commands()),
        vec![
            style(Target::Navbar, "background", "rgba(16, 16, 125, 0.98)"),
            style(Target::Navbar, "box-shadow", "0 2px 20px rgba(0,0,0,0.1)"),
        ]
    );

    page.handle(PageEvent::Scrolled { offset_y: 40.0 });
    assert_eq!(navbar(page.take_commands()), initial);
}

#[test]
fn parallax_tracks_scroll_only_with_profile_image() {
    let mut with = page(PageSnapshot {
        viewport_width: 1280.0,
        has_profile_image: true,
        ..PageSnapshot::default()
    });
    with.handle(PageEvent::Scrolled { offset_y: 200.0 });
    assert!(with.take_commands().contains(&style(
        Target::ProfileImage,
        "transform",
        "translateY(-100px) scale(1)"
    )));

    let mut without = plain_page(1280.0);
    without.handle(PageEvent::Scrolled { offset_y: 200.0 });
    assert!(
        !without
            .take_commands()
            .iter()
            .any(|c| matches!(c, DomCommand::SetStyle { target: Target::ProfileImage, .. }))
    );
}

#[test]
fn cards_reveal_once_and_hover_independently() {
    let mut page = PageController::new(PageConfig::default());
    page.mount(PageSnapshot {
        viewport_width: 1280.0,
        card_count: 2,
        ..PageSnapshot::default()
    });
    let mounted = page.take_commands();
    assert!(mounted.contains(&style(Target::Card(CardId(0)), "opacity", "0")));
    assert!(mounted.contains(&style(Target::Card(CardId(1)), "transform", "translateY(30px)")));

    page.handle(PageEvent::CardIntersected { card: CardId(1) });
    page.handle(PageEvent::CardIntersected { card: CardId(1) });
    assert_eq!(
        page.take_commands(),
        vec![
            style(Target::Card(CardId(1)), "opacity", "1"),
            style(Target::Card(CardId(1)), "transform", "translateY(0)"),
            DomCommand::Unobserve {
                target: Target::Card(CardId(1)),
            },
        ]
    );
    assert!(page.reveal().is_revealed(CardId(1)));
    assert!(!page.reveal().is_revealed(CardId(0)));

    page.handle(PageEvent::CardHover {
        card: CardId(0),
        entered: true,
    });
    page.handle(PageEvent::CardHover {
        card: CardId(0),
        entered: false,
    });
    assert_eq!(
        page.take_commands(),
        vec![
            style(Target::Card(CardId(0)), "transform", "translateY(-10px) scale(1.02)"),
            style(Target::Card(CardId(0)), "transform", "translateY(0) scale(1)"),
        ]
    );
}

// ── Project modal ─────────────────────────────────────────────────────

#[test]
fn modal_renders_texts_and_contact_prefills_message() {
    let mut page = plain_page(1280.0);
    page.handle(PageEvent::ProjectButtonClicked {
        title: "Proyecto X".to_string(),
        description: "Desc".to_string(),
    });
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::CreateModal {
            id: EphemeralId(0),
            title: "Proyecto X".to_string(),
            description: "Desc".to_string(),
            close_label: "Cerrar".to_string(),
            contact_label: "Contactar sobre este proyecto".to_string(),
        }]
    );

    page.advance_time(MS * 100);
    assert_eq!(
        page.take_commands(),
        vec![
            style(Target::ModalOverlay(EphemeralId(0)), "opacity", "1"),
            style(Target::ModalPanel(EphemeralId(0)), "transform", "scale(1)"),
        ]
    );

    page.handle(PageEvent::ModalContactClicked {
        layout: Some(SectionLayout {
            section_top: 2_000.0,
            nav_height: 80.0,
        }),
    });
    let commands = page.take_commands();
    assert_eq!(
        &commands[..2],
        &[
            style(Target::ModalOverlay(EphemeralId(0)), "opacity", "0"),
            style(Target::ModalPanel(EphemeralId(0)), "transform", "scale(0.8)"),
        ]
    );
    match &commands[2] {
        DomCommand::SetValue {
            target: Target::MessageField,
            value,
        } => assert!(value.contains("Proyecto X"), "{value}"),
        other => panic!("expected message prefill, got {other:?}"),
    }
    assert_eq!(commands[3], DomCommand::ScrollTo { top: 1_920.0 });

    page.advance_time(MS * 300);
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::Remove {
            target: Target::ModalOverlay(EphemeralId(0)),
        }]
    );
    assert_eq!(page.modal().current(), None);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn closing_without_modal_is_a_noop() {
    let mut page = plain_page(1280.0);
    page.handle(PageEvent::ModalCloseClicked);
    page.close_modal();
    assert!(page.take_commands().is_empty());
}

#[test]
fn contact_about_project_works_without_a_modal() {
    let mut page = plain_page(1280.0);
    page.contact_about_project("Lab \"Beta\"", None);
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::SetValue {
            target: Target::MessageField,
            value: "Hola Gerson, me interesa conocer más detalles sobre el proyecto: \
                    Lab \"Beta\". ¿Podrías proporcionarme más información?"
                .to_string(),
        }]
    );
}

#[test]
fn backdrop_click_closes_and_transition_end_removes_early() {
    let mut page = plain_page(1280.0);
    page.open_project_modal("A", "B");
    page.advance_time(MS * 100);
    page.handle(PageEvent::ModalBackdropClicked);
    assert_eq!(
        page.modal().current(),
        Some((EphemeralId(0), ModalPhase::Closing))
    );
    page.take_commands();

    page.handle(PageEvent::TransitionEnded {
        target: Target::ModalOverlay(EphemeralId(0)),
    });
    assert_eq!(
        page.take_commands(),
        vec![DomCommand::Remove {
            target: Target::ModalOverlay(EphemeralId(0)),
        }]
    );
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn opening_a_second_modal_replaces_the_first() {
    let mut page = plain_page(1280.0);
    page.open_project_modal("Uno", "1");
    page.open_project_modal("Dos", "2");

    let commands = page.take_commands();
    assert_eq!(
        commands[1],
        DomCommand::Remove {
            target: Target::ModalOverlay(EphemeralId(0)),
        }
    );
    assert!(matches!(
        &commands[2],
        DomCommand::CreateModal { id: EphemeralId(1), title, .. } if title == "Dos"
    ));
    assert_eq!(page.modal().title(), Some("Dos"));
    assert_eq!(page.pending_timers(), 1);
}

// ── Decorative animations ─────────────────────────────────────────────

#[test]
fn typewriter_reveals_hero_one_character_per_tick() {
    let mut page = PageController::new(PageConfig::default());
    page.mount(PageSnapshot {
        viewport_width: 1280.0,
        hero_text: Some("Hola".to_string()),
        ..PageSnapshot::default()
    });
    let mounted = page.take_commands();
    assert!(mounted.contains(&DomCommand::SetText {
        target: Target::HeroTitle,
        text: String::new(),
    }));

    let mut seen = Vec::new();
    for _ in 0..6 {
        page.advance_time(MS * 100);
        for command in page.take_commands() {
            if let DomCommand::SetText {
                target: Target::HeroTitle,
                text,
            } = command
            {
                seen.push(text);
            }
        }
    }
    assert_eq!(seen, ["H", "Ho", "Hol", "Hola"]);
    assert_eq!(page.pending_timers(), 0);
}

// ── Device adaptation & cursor ────────────────────────────────────────

#[test]
fn resizing_across_breakpoint_gates_transitions_both_ways() {
    let mut page = PageController::new(PageConfig::default());
    page.mount(PageSnapshot {
        viewport_width: 1024.0,
        ..PageSnapshot::default()
    });
    assert!(
        page.take_commands()
            .contains(&DomCommand::SetTransitionsDisabled { disabled: false })
    );

    page.handle(PageEvent::Resized {
        viewport_width: 768.0,
    });
    assert!(page.transitions_disabled());
    page.handle(PageEvent::Resized {
        viewport_width: 700.0,
    });
    page.handle(PageEvent::Resized {
        viewport_width: 769.0,
    });
    assert!(!page.transitions_disabled());
    assert_eq!(
        page.take_commands(),
        vec![
            DomCommand::SetTransitionsDisabled { disabled: true },
            DomCommand::SetTransitionsDisabled { disabled: false },
        ]
    );
}

#[test]
fn cursor_exists_only_when_mounted_on_desktop() {
    let mut desktop = PageController::new(PageConfig::default());
    desktop.mount(PageSnapshot {
        viewport_width: 1280.0,
        ..PageSnapshot::default()
    });
    assert!(desktop.take_commands().contains(&DomCommand::CreateCursor));
    desktop.handle(PageEvent::InteractiveHover { entered: true });
    assert_eq!(
        desktop.take_commands(),
        vec![style(Target::Cursor, "transform", "scale(1.5)")]
    );

    let mut phone = plain_page(390.0);
    assert!(!phone.cursor_enabled());
    phone.handle(PageEvent::Resized {
        viewport_width: 1920.0,
    });
    phone.handle(PageEvent::PointerMoved { x: 10.0, y: 10.0 });
    assert!(!phone.cursor_enabled());
    assert!(
        !phone
            .take_commands()
            .iter()
            .any(|c| matches!(c, DomCommand::SetStyle { target: Target::Cursor, .. }))
    );
}

#[test]
fn second_mount_is_ignored() {
    let mut page = plain_page(1280.0);
    page.mount(PageSnapshot {
        viewport_width: 1280.0,
        card_count: 4,
        ..PageSnapshot::default()
    });
    assert!(page.take_commands().is_empty());
}
