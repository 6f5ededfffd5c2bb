#![forbid(unsafe_code)]

//! Element registry and command applier.

use std::collections::HashMap;

use folio_core::config::PageConfig;
use folio_core::style::{
    self, CURSOR_CSS, MODAL_ACTIONS_CSS, MODAL_CLOSE_BUTTON_CSS, MODAL_OVERLAY_CSS,
    MODAL_PANEL_CSS, MODAL_TEXT_CSS, MODAL_TITLE_CSS, NO_TRANSITIONS_CLASS,
};
use folio_core::{CardId, DomCommand, EphemeralId, Target};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, ScrollBehavior, ScrollToOptions,
};

/// Attribute stamped on cards so observer entries map back to a [`CardId`].
pub(crate) const CARD_KEY_ATTR: &str = "data-folio-id";

/// Nodes of a freshly created ephemeral element that need listeners.
pub(crate) enum Created {
    Notification {
        id: EphemeralId,
        node: HtmlElement,
    },
    Modal {
        id: EphemeralId,
        overlay: HtmlElement,
        close: HtmlElement,
        contact: HtmlElement,
    },
}

struct ModalNodes {
    overlay: HtmlElement,
    panel: HtmlElement,
}

/// The page's elements, resolved once at mount, plus the ephemeral nodes
/// created since.
pub(crate) struct DomBinding {
    document: Document,
    pub navbar: Option<HtmlElement>,
    pub hamburger: Option<HtmlElement>,
    nav_menu: Option<HtmlElement>,
    pub form: Option<HtmlFormElement>,
    pub submit: Option<HtmlButtonElement>,
    message_field: Option<Element>,
    pub hero_title: Option<HtmlElement>,
    pub profile_image: Option<HtmlElement>,
    pub cards: Vec<HtmlElement>,
    cursor: Option<HtmlElement>,
    notifications: HashMap<EphemeralId, HtmlElement>,
    modals: HashMap<EphemeralId, ModalNodes>,
    pub observer: Option<IntersectionObserver>,
}

pub(crate) fn query(root: &Document, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl DomBinding {
    pub fn resolve(document: &Document, config: &PageConfig) -> Self {
        let sel = &config.selectors;
        let form = document
            .get_element_by_id(&config.form.form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        let submit = form.as_ref().and_then(|form| {
            form.query_selector("button[type=\"submit\"], button:not([type])")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        });
        let cards = query_all(document, &sel.cards);
        for (index, card) in cards.iter().enumerate() {
            let _ = card.set_attribute(CARD_KEY_ATTR, &Target::card_key(CardId(index)));
        }
        Self {
            document: document.clone(),
            navbar: query(document, &sel.navbar),
            hamburger: query(document, &sel.hamburger),
            nav_menu: query(document, &sel.nav_menu),
            form,
            submit,
            message_field: document.get_element_by_id(&config.form.message_input_id),
            hero_title: query(document, &sel.hero_title),
            profile_image: query(document, &sel.profile_image),
            cards,
            cursor: None,
            notifications: HashMap::new(),
            modals: HashMap::new(),
            observer: None,
        }
    }

    /// Inject the stylesheet rule behind [`DomCommand::SetTransitionsDisabled`].
    pub fn install_stylesheet(&self) -> Result<(), JsValue> {
        let style_el = self.document.create_element("style")?;
        style_el.set_text_content(Some(&style::no_transitions_rule()));
        if let Some(head) = self.document.head() {
            head.append_child(&style_el)?;
        }
        Ok(())
    }

    fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Navbar => self.navbar.as_ref(),
            Target::Hamburger => self.hamburger.as_ref(),
            Target::NavMenu => self.nav_menu.as_ref(),
            Target::SubmitButton => self.submit.as_deref(),
            Target::MessageField => self.message_field.as_ref().and_then(|el| el.dyn_ref()),
            Target::HeroTitle => self.hero_title.as_ref(),
            Target::ProfileImage => self.profile_image.as_ref(),
            Target::Cursor => self.cursor.as_ref(),
            Target::Card(CardId(index)) => self.cards.get(index),
            Target::Notification(id) => self.notifications.get(&id),
            Target::ModalOverlay(id) => self.modals.get(&id).map(|m| &m.overlay),
            Target::ModalPanel(id) => self.modals.get(&id).map(|m| &m.panel),
        }
    }

    /// Apply one command. Commands for elements that are not on the page are
    /// dropped.
    pub fn apply(&mut self, command: DomCommand) -> Result<Option<Created>, JsValue> {
        match command {
            DomCommand::SetClass {
                target,
                class,
                present,
            } => {
                if let Some(el) = self.element(target) {
                    el.class_list().toggle_with_force(class, present)?;
                }
            }
            DomCommand::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(el) = self.element(target) {
                    el.style().set_property(property, &value)?;
                }
            }
            DomCommand::SetText { target, text } => {
                if let Some(el) = self.element(target) {
                    el.set_text_content(Some(&text));
                }
            }
            DomCommand::SetDisabled { target, disabled } => match target {
                Target::SubmitButton => {
                    if let Some(button) = &self.submit {
                        button.set_disabled(disabled);
                    }
                }
                other => {
                    if let Some(el) = self.element(other) {
                        el.toggle_attribute_with_force("disabled", disabled)?;
                    }
                }
            },
            DomCommand::SetValue { target, value } => {
                if target == Target::MessageField {
                    self.set_message_value(&value);
                }
            }
            DomCommand::ResetForm => {
                if let Some(form) = &self.form {
                    form.reset();
                }
            }
            DomCommand::ScrollTo { top } => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                gloo::utils::window().scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::CreateNotification { id, message, kind } => {
                let node = self.create("div")?;
                node.set_class_name(&format!("notification {}", kind.class_name()));
                node.set_attribute("style", &style::notification_css(kind))?;
                node.set_text_content(Some(&message));
                self.body()?.append_child(&node)?;
                self.notifications.insert(id, node.clone());
                return Ok(Some(Created::Notification { id, node }));
            }
            DomCommand::CreateModal {
                id,
                title,
                description,
                close_label,
                contact_label,
            } => return self.create_modal(id, &title, &description, &close_label, &contact_label),
            DomCommand::CreateCursor => {
                if self.cursor.is_none() {
                    let cursor = self.create("div")?;
                    cursor.set_class_name("custom-cursor");
                    cursor.set_attribute("style", CURSOR_CSS)?;
                    self.body()?.append_child(&cursor)?;
                    self.cursor = Some(cursor);
                }
            }
            DomCommand::Remove { target } => {
                let node = match target {
                    Target::Notification(id) => self.notifications.remove(&id),
                    Target::ModalOverlay(id) => self.modals.remove(&id).map(|m| m.overlay),
                    Target::Cursor => self.cursor.take(),
                    other => self.element(other).cloned(),
                };
                if let Some(node) = node {
                    node.remove();
                }
            }
            DomCommand::Unobserve { target } => {
                if let (Some(observer), Some(el)) = (&self.observer, self.element(target)) {
                    observer.unobserve(el);
                }
            }
            DomCommand::SetTransitionsDisabled { disabled } => {
                if let Some(root) = self.document.document_element() {
                    root.class_list()
                        .toggle_with_force(NO_TRANSITIONS_CLASS, disabled)?;
                }
            }
        }
        Ok(None)
    }

    fn create_modal(
        &mut self,
        id: EphemeralId,
        title: &str,
        description: &str,
        close_label: &str,
        contact_label: &str,
    ) -> Result<Option<Created>, JsValue> {
        let overlay = self.create("div")?;
        overlay.set_class_name("modal-overlay");
        overlay.set_attribute("style", MODAL_OVERLAY_CSS)?;

        let panel = self.create("div")?;
        panel.set_class_name("modal-content");
        panel.set_attribute("style", MODAL_PANEL_CSS)?;

        let heading = self.create("h3")?;
        heading.set_attribute("style", MODAL_TITLE_CSS)?;
        heading.set_text_content(Some(title));

        let text = self.create("p")?;
        text.set_attribute("style", MODAL_TEXT_CSS)?;
        text.set_text_content(Some(description));

        let actions = self.create("div")?;
        actions.set_attribute("style", MODAL_ACTIONS_CSS)?;

        let close = self.create("button")?;
        close.set_class_name("btn btn-primary");
        close.set_attribute("style", MODAL_CLOSE_BUTTON_CSS)?;
        close.set_text_content(Some(close_label));

        let contact = self.create("button")?;
        contact.set_class_name("btn btn-secondary");
        contact.set_text_content(Some(contact_label));

        actions.append_child(&close)?;
        actions.append_child(&contact)?;
        panel.append_child(&heading)?;
        panel.append_child(&text)?;
        panel.append_child(&actions)?;
        overlay.append_child(&panel)?;
        self.body()?.append_child(&overlay)?;

        self.modals.insert(
            id,
            ModalNodes {
                overlay: overlay.clone(),
                panel,
            },
        );
        Ok(Some(Created::Modal {
            id,
            overlay,
            close,
            contact,
        }))
    }

    fn set_message_value(&self, value: &str) {
        let Some(field) = &self.message_field else {
            return;
        };
        if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn create(&self, tag: &str) -> Result<HtmlElement, JsValue> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)
    }

    fn body(&self) -> Result<HtmlElement, JsValue> {
        self.document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no <body>"))
    }
}
