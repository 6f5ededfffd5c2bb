#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::device::is_mobile;
use folio_core::nav::fragment_target;
use folio_core::reveal::is_in_view;
use folio_core::{
    CardId, ContactFields, DomCommand, EphemeralId, NotificationKind, PageConfig,
    PageController, PageEvent, PageSnapshot, SectionLayout, Target,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, EventTarget, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
};

use crate::dom::{CARD_KEY_ATTR, Created, DomBinding, query_all};
use crate::{CONFIG_ELEMENT_ID, banner_args, load_config, logging};

type ObserverCallback = Closure<dyn FnMut(Array)>;

struct Shared {
    controller: PageController,
    dom: DomBinding,
    /// Listeners attached to notification and modal nodes, dropped with them.
    ephemeral: HashMap<EphemeralId, Vec<EventListener>>,
    /// Browser timeout armed for the controller's next deadline.
    wake: Option<Timeout>,
    /// Reveal cards from scroll geometry (no `IntersectionObserver`).
    geometry_reveal: bool,
}

type SharedRef = Rc<RefCell<Shared>>;

thread_local! {
    static PAGE: RefCell<Option<FolioPage>> = const { RefCell::new(None) };
}

/// The mounted page: controller, element bindings and every long-lived
/// listener. Dropping it detaches all handlers.
#[wasm_bindgen]
pub struct FolioPage {
    shared: SharedRef,
    _listeners: Vec<EventListener>,
    _observer_callback: Option<ObserverCallback>,
}

impl FolioPage {
    fn mount(config: PageConfig) -> Result<Self, JsValue> {
        let document = gloo::utils::document();
        let dom = DomBinding::resolve(&document, &config);
        dom.install_stylesheet()?;

        let snapshot = PageSnapshot {
            viewport_width: viewport_width(),
            scroll_y: scroll_y(),
            card_count: dom.cards.len(),
            hero_text: dom.hero_title.as_ref().and_then(|h| h.text_content()),
            has_profile_image: dom.profile_image.is_some(),
        };
        let mut controller = PageController::new(config);
        controller.set_time(host_now());
        controller.mount(snapshot);

        let shared = Rc::new(RefCell::new(Shared {
            controller,
            dom,
            ephemeral: HashMap::new(),
            wake: None,
            geometry_reveal: false,
        }));
        flush(&shared);

        let listeners = install_listeners(&shared);
        let observer_callback = observe_cards(&shared)?;
        if observer_callback.is_none() {
            tracing::debug!("IntersectionObserver unavailable; revealing from scroll geometry");
            shared.borrow_mut().geometry_reveal = true;
            reveal_visible_cards(&shared);
        }

        Ok(Self {
            shared,
            _listeners: listeners,
            _observer_callback: observer_callback,
        })
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}

fn boot() {
    let embedded = gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let (config, config_error) = match load_config(embedded.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    };
    logging::init(&config.log_level);
    if let Some(err) = config_error {
        tracing::warn!(%err, "invalid page config; using defaults");
    }
    for (format, css) in banner_args(&config.banner) {
        web_sys::console::log_2(&JsValue::from_str(&format), &JsValue::from_str(css));
    }

    match FolioPage::mount(config) {
        Ok(page) => PAGE.with(|slot| *slot.borrow_mut() = Some(page)),
        Err(err) => tracing::error!(?err, "failed to mount page"),
    }
}

// ---------------------------------------------------------------------------
// JS-facing helpers
// ---------------------------------------------------------------------------

fn current_page() -> Option<SharedRef> {
    PAGE.with(|slot| slot.borrow().as_ref().map(|page| Rc::clone(&page.shared)))
}

fn with_page<R>(f: impl FnOnce(&mut PageController) -> R) -> Option<R> {
    drive(&current_page()?, f)
}

/// Show a notification banner. `kind` is `"success"` (default) or `"error"`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) {
    let kind = match kind.as_deref() {
        Some("error") => NotificationKind::Error,
        _ => NotificationKind::Success,
    };
    with_page(|page| page.show_notification(message, kind));
}

#[wasm_bindgen(js_name = openProjectModal)]
pub fn open_project_modal(title: &str, description: &str) {
    with_page(|page| page.open_project_modal(title, description));
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() {
    with_page(PageController::close_modal);
}

/// Close the modal, pre-fill the contact message and scroll to the form.
#[wasm_bindgen(js_name = contactAboutProject)]
pub fn contact_about_project(project_title: &str) {
    let Some(shared) = current_page() else {
        return;
    };
    let layout = contact_layout(&shared);
    drive(&shared, |page| page.contact_about_project(project_title, layout));
}

/// Whether the viewport currently counts as mobile.
#[wasm_bindgen(js_name = isMobile)]
pub fn is_mobile_viewport() -> bool {
    let max = PAGE
        .with(|slot| {
            let slot = slot.borrow();
            let state = slot.as_ref()?.shared.try_borrow().ok()?;
            Some(state.controller.config().thresholds.mobile_max_width_px)
        })
        .unwrap_or_else(|| PageConfig::default().thresholds.mobile_max_width_px);
    is_mobile(viewport_width(), max)
}

// ---------------------------------------------------------------------------
// Driving the controller
// ---------------------------------------------------------------------------

fn host_now() -> Duration {
    let ms = gloo::utils::window()
        .performance()
        .map_or(0.0, |perf| perf.now());
    Duration::from_secs_f64(ms.max(0.0) / 1_000.0)
}

fn viewport_width() -> f64 {
    gloo::utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

fn viewport_height() -> f64 {
    gloo::utils::window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn scroll_y() -> f64 {
    gloo::utils::window().scroll_y().unwrap_or(0.0)
}

/// Sync the controller clock, run `f`, then apply whatever it produced.
fn drive<R>(shared: &SharedRef, f: impl FnOnce(&mut PageController) -> R) -> Option<R> {
    let Ok(mut state) = shared.try_borrow_mut() else {
        tracing::warn!("page busy; dropping re-entrant call");
        return None;
    };
    state.controller.set_time(host_now());
    let result = f(&mut state.controller);
    drop(state);
    flush(shared);
    Some(result)
}

fn flush(shared: &SharedRef) {
    let Ok(mut guard) = shared.try_borrow_mut() else {
        return;
    };
    let state = &mut *guard;
    for command in state.controller.take_commands() {
        let removed = match &command {
            DomCommand::Remove {
                target: Target::Notification(id) | Target::ModalOverlay(id),
            } => Some(*id),
            _ => None,
        };
        match state.dom.apply(command) {
            Ok(Some(created)) => {
                let (id, listeners) = ephemeral_listeners(shared, created);
                state.ephemeral.insert(id, listeners);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(?err, "DOM command failed"),
        }
        if let Some(id) = removed {
            state.ephemeral.remove(&id);
        }
    }
    rearm(shared, state);
}

fn rearm(shared: &SharedRef, state: &mut Shared) {
    state.wake = state.controller.next_deadline().map(|deadline| {
        let delay = deadline.saturating_sub(state.controller.now());
        let millis = u32::try_from(delay.as_micros().div_ceil(1_000)).unwrap_or(u32::MAX);
        let weak = Rc::downgrade(shared);
        Timeout::new(millis, move || {
            if let Some(shared) = weak.upgrade() {
                drive(&shared, |_| ());
            }
        })
    });
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// Attach a listener that maps the DOM event to a [`PageEvent`] and honours
/// the controller's [`folio_core::EventOutcome`].
fn listen<F>(
    shared: &SharedRef,
    target: &EventTarget,
    event_type: &'static str,
    options: EventListenerOptions,
    to_page_event: F,
) -> EventListener
where
    F: Fn(&Event, &SharedRef) -> Option<PageEvent> + 'static,
{
    let weak = Rc::downgrade(shared);
    EventListener::new_with_options(target, event_type, options, move |event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Some(page_event) = to_page_event(event, &shared) else {
            return;
        };
        let outcome = drive(&shared, |page| page.handle(page_event));
        if outcome.is_some_and(|o| o.prevent_default) {
            event.prevent_default();
        }
    })
}

fn is_event_on(event: &Event, node: &HtmlElement) -> bool {
    event.target().is_some_and(|target| Object::is(&target, node))
}

fn section_layout(shared: &SharedRef, section_id: &str) -> Option<SectionLayout> {
    let state = shared.try_borrow().ok()?;
    let section = gloo::utils::document()
        .get_element_by_id(section_id)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let navbar = state.dom.navbar.as_ref()?;
    Some(SectionLayout {
        section_top: f64::from(section.offset_top()),
        nav_height: f64::from(navbar.offset_height()),
    })
}

fn contact_layout(shared: &SharedRef) -> Option<SectionLayout> {
    let section_id = shared
        .try_borrow()
        .ok()?
        .controller
        .config()
        .form
        .contact_section_id
        .clone();
    section_layout(shared, &section_id)
}

fn read_fields(form: &HtmlFormElement, config: &PageConfig) -> ContactFields {
    let data = FormData::new_with_form(form).ok();
    let field = |name: &str| data.as_ref().and_then(|d| d.get(name).as_string());
    ContactFields {
        name: field(&config.form.name_field),
        email: field(&config.form.email_field),
        message: field(&config.form.message_field),
    }
}

fn install_listeners(shared: &SharedRef) -> Vec<EventListener> {
    let document = gloo::utils::document();
    let window = gloo::utils::window();
    let state = shared.borrow();
    let selectors = state.controller.config().selectors.clone();
    let passive = EventListenerOptions::default;
    let mut listeners = Vec::new();

    if let Some(hamburger) = &state.dom.hamburger {
        listeners.push(listen(shared, hamburger, "click", passive(), |_, _| {
            Some(PageEvent::HamburgerClicked)
        }));
    }

    for link in query_all(&document, &selectors.nav_links) {
        let anchor = link.clone();
        listeners.push(listen(
            shared,
            &link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |_, shared| {
                let layout = anchor
                    .get_attribute("href")
                    .as_deref()
                    .and_then(fragment_target)
                    .and_then(|id| section_layout(shared, id));
                Some(PageEvent::NavLinkClicked { layout })
            },
        ));
    }

    if let Some(form) = &state.dom.form {
        let form_el = form.clone();
        listeners.push(listen(
            shared,
            form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |_, shared| {
                let state = shared.try_borrow().ok()?;
                let fields = read_fields(&form_el, state.controller.config());
                let submit_label = state
                    .dom
                    .submit
                    .as_ref()
                    .and_then(|button| button.text_content())
                    .unwrap_or_default();
                Some(PageEvent::FormSubmitted {
                    fields,
                    submit_label,
                })
            },
        ));
    }

    listeners.push(listen(shared, &window, "scroll", passive(), |_, _| {
        Some(PageEvent::Scrolled {
            offset_y: scroll_y(),
        })
    }));
    listeners.push({
        let weak = Rc::downgrade(shared);
        EventListener::new(&window, "scroll", move |_| {
            if let Some(shared) = weak.upgrade() {
                reveal_visible_cards(&shared);
            }
        })
    });
    listeners.push(listen(shared, &window, "resize", passive(), |_, _| {
        Some(PageEvent::Resized {
            viewport_width: viewport_width(),
        })
    }));

    for (index, card) in state.dom.cards.iter().enumerate() {
        let card_id = CardId(index);
        listeners.push(listen(shared, card, "mouseenter", passive(), move |_, _| {
            Some(PageEvent::CardHover {
                card: card_id,
                entered: true,
            })
        }));
        listeners.push(listen(shared, card, "mouseleave", passive(), move |_, _| {
            Some(PageEvent::CardHover {
                card: card_id,
                entered: false,
            })
        }));
    }

    for button in query_all(&document, &selectors.project_buttons) {
        let source = button.clone();
        let selectors = selectors.clone();
        listeners.push(listen(shared, &button, "click", passive(), move |_, _| {
            let card = source.closest(&selectors.project_card).ok()??;
            let text_of = |selector: &str| {
                card.query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|el| el.text_content())
                    .unwrap_or_default()
            };
            Some(PageEvent::ProjectButtonClicked {
                title: text_of(&selectors.project_title),
                description: text_of(&selectors.project_description),
            })
        }));
    }

    if state.controller.cursor_enabled() {
        listeners.push(listen(shared, &document, "mousemove", passive(), |event, _| {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(PageEvent::PointerMoved {
                x: f64::from(mouse.client_x()),
                y: f64::from(mouse.client_y()),
            })
        }));
        for element in query_all(&document, &selectors.interactive) {
            listeners.push(listen(shared, &element, "mouseenter", passive(), |_, _| {
                Some(PageEvent::InteractiveHover { entered: true })
            }));
            listeners.push(listen(shared, &element, "mouseleave", passive(), |_, _| {
                Some(PageEvent::InteractiveHover { entered: false })
            }));
        }
    }

    tracing::debug!(count = listeners.len(), "page listeners installed");
    listeners
}

fn ephemeral_listeners(shared: &SharedRef, created: Created) -> (EphemeralId, Vec<EventListener>) {
    let passive = EventListenerOptions::default;
    match created {
        Created::Notification { id, node } => {
            let own = node.clone();
            let listener = listen(shared, &node, "transitionend", passive(), move |event, _| {
                is_event_on(event, &own).then_some(PageEvent::TransitionEnded {
                    target: Target::Notification(id),
                })
            });
            (id, vec![listener])
        }
        Created::Modal {
            id,
            overlay,
            close,
            contact,
        } => {
            let backdrop = overlay.clone();
            let own = overlay.clone();
            let listeners = vec![
                listen(shared, &close, "click", passive(), |_, _| {
                    Some(PageEvent::ModalCloseClicked)
                }),
                listen(shared, &contact, "click", passive(), |_, shared| {
                    Some(PageEvent::ModalContactClicked {
                        layout: contact_layout(shared),
                    })
                }),
                listen(shared, &overlay, "click", passive(), move |event, _| {
                    is_event_on(event, &backdrop).then_some(PageEvent::ModalBackdropClicked)
                }),
                listen(shared, &overlay, "transitionend", passive(), move |event, _| {
                    is_event_on(event, &own).then_some(PageEvent::TransitionEnded {
                        target: Target::ModalOverlay(id),
                    })
                }),
            ];
            (id, listeners)
        }
    }
}

// ---------------------------------------------------------------------------
// Reveal
// ---------------------------------------------------------------------------

fn observe_cards(shared: &SharedRef) -> Result<Option<ObserverCallback>, JsValue> {
    let window = gloo::utils::window();
    if !Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))? {
        return Ok(None);
    }

    let weak: Weak<RefCell<Shared>> = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let cards: Vec<CardId> = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .filter(IntersectionObserverEntry::is_intersecting)
            .filter_map(|entry| entry.target().get_attribute(CARD_KEY_ATTR))
            .filter_map(|key| Target::parse_card_key(&key))
            .collect();
        reveal(&shared, cards);
    });

    let mut state = shared.borrow_mut();
    let thresholds = state.controller.config().thresholds;
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(thresholds.reveal_visible_ratio));
    init.set_root_margin(&thresholds.reveal_root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for card in &state.dom.cards {
        observer.observe(card);
    }
    state.dom.observer = Some(observer);
    Ok(Some(callback))
}

fn reveal(shared: &SharedRef, cards: Vec<CardId>) {
    if cards.is_empty() {
        return;
    }
    drive(shared, |page| {
        for card in cards {
            page.handle(PageEvent::CardIntersected { card });
        }
    });
}

/// Scroll-geometry stand-in for `IntersectionObserver`.
fn reveal_visible_cards(shared: &SharedRef) {
    let visible: Vec<CardId> = {
        let Ok(state) = shared.try_borrow() else {
            return;
        };
        if !state.geometry_reveal {
            return;
        }
        let thresholds = state.controller.config().thresholds;
        let viewport = viewport_height();
        state
            .controller
            .reveal()
            .pending()
            .filter(|card| {
                state.dom.cards.get(card.0).is_some_and(|el| {
                    let rect = el.get_bounding_client_rect();
                    is_in_view(rect.top(), rect.height(), viewport, &thresholds)
                })
            })
            .collect()
    };
    reveal(shared, visible);
}
