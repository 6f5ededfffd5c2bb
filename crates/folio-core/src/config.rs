#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default matching the stock portfolio markup, so an empty
//! JSON object (or no config at all) yields a working page. The host embeds
//! overrides as an inline JSON script element; there are no files or
//! environment variables involved.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Placeholder replaced by the project title in [`Messages::contact_template`].
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub timings: Timings,
    pub thresholds: Thresholds,
    pub notifications: NotificationPolicy,
    pub selectors: Selectors,
    pub form: FormConfig,
    pub messages: Messages,
    pub banner: Vec<BannerLine>,
    /// `tracing` filter directive, e.g. `"info"` or `"folio_core=debug"`.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            thresholds: Thresholds::default(),
            notifications: NotificationPolicy::default(),
            selectors: Selectors::default(),
            form: FormConfig::default(),
            messages: Messages::default(),
            banner: default_banner(),
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timings;
        for (name, ms) in [
            ("typewriter_interval_ms", t.typewriter_interval_ms),
            ("notification_visible_ms", t.notification_visible_ms),
            ("exit_transition_ms", t.exit_transition_ms),
            ("submit_feedback_ms", t.submit_feedback_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroTiming { name });
            }
        }
        if self.notifications.max_stacked == 0 {
            return Err(ConfigError::EmptyNotificationStack);
        }
        if !self.messages.contact_template.contains(PROJECT_PLACEHOLDER) {
            return Err(ConfigError::MissingProjectPlaceholder);
        }
        let th = &self.thresholds;
        if !(0.0..=1.0).contains(&th.reveal_visible_ratio) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "reveal_visible_ratio",
                value: th.reveal_visible_ratio,
            });
        }
        for (name, value) in [
            ("navbar_solid_after_px", th.navbar_solid_after_px),
            ("mobile_max_width_px", th.mobile_max_width_px),
            ("reveal_bottom_margin_px", th.reveal_bottom_margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Delays and durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay between inserting an ephemeral node and starting its entrance.
    pub enter_delay_ms: u64,
    pub notification_visible_ms: u64,
    /// Duration of the exit transition of notifications and the modal.
    pub exit_transition_ms: u64,
    /// Simulated submission round trip.
    pub submit_feedback_ms: u64,
    pub typewriter_interval_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            notification_visible_ms: 5_000,
            exit_transition_ms: 300,
            submit_feedback_ms: 1_000,
            typewriter_interval_ms: 100,
        }
    }
}

impl Timings {
    #[must_use]
    pub const fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    #[must_use]
    pub const fn notification_visible(&self) -> Duration {
        Duration::from_millis(self.notification_visible_ms)
    }

    #[must_use]
    pub const fn exit_transition(&self) -> Duration {
        Duration::from_millis(self.exit_transition_ms)
    }

    #[must_use]
    pub const fn submit_feedback(&self) -> Duration {
        Duration::from_millis(self.submit_feedback_ms)
    }

    #[must_use]
    pub const fn typewriter_interval(&self) -> Duration {
        Duration::from_millis(self.typewriter_interval_ms)
    }
}

/// Geometric thresholds and rates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// The navbar turns opaque strictly above this scroll offset.
    pub navbar_solid_after_px: f64,
    /// Viewports at most this wide count as mobile.
    pub mobile_max_width_px: f64,
    /// Profile image offset per scrolled pixel.
    pub parallax_rate: f64,
    /// Fraction of an element that must be visible before it is revealed.
    pub reveal_visible_ratio: f64,
    /// The viewport's bottom edge is pulled up by this much for reveal checks.
    pub reveal_bottom_margin_px: f64,
    /// Initial downward offset of unrevealed elements.
    pub reveal_offset_px: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            navbar_solid_after_px: 100.0,
            mobile_max_width_px: 768.0,
            parallax_rate: -0.5,
            reveal_visible_ratio: 0.1,
            reveal_bottom_margin_px: 50.0,
            reveal_offset_px: 30.0,
        }
    }
}

impl Thresholds {
    /// Root margin string for `IntersectionObserver`.
    #[must_use]
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin_px)
    }
}

/// Stacking policy for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationPolicy {
    /// Live notifications beyond this count evict the oldest.
    pub max_stacked: usize,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self { max_stacked: 3 }
    }
}

/// CSS selectors the host resolves against the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub hamburger: String,
    pub nav_menu: String,
    pub nav_links: String,
    /// Cards that get the reveal and hover effects.
    pub cards: String,
    pub project_buttons: String,
    pub project_card: String,
    pub project_title: String,
    pub project_description: String,
    pub hero_title: String,
    pub profile_image: String,
    /// Elements that enlarge the custom cursor.
    pub interactive: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: ".navbar".to_string(),
            hamburger: ".hamburger".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_links: ".nav-link".to_string(),
            cards: ".experience-card, .project-card, .skill-item".to_string(),
            project_buttons: ".project-btn".to_string(),
            project_card: ".project-card".to_string(),
            project_title: "h3".to_string(),
            project_description: ".project-description".to_string(),
            hero_title: ".hero-title".to_string(),
            profile_image: ".profile-img".to_string(),
            interactive: "a, button, .project-card, .experience-card".to_string(),
        }
    }
}

/// Contact form wiring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_id: String,
    pub name_field: String,
    pub email_field: String,
    pub message_field: String,
    /// Element id of the message control pre-filled by the project modal.
    pub message_input_id: String,
    pub contact_section_id: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            name_field: "nombre".to_string(),
            email_field: "correo".to_string(),
            message_field: "mensaje".to_string(),
            message_input_id: "mensaje".to_string(),
            contact_section_id: "contacto".to_string(),
        }
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub missing_fields: String,
    pub invalid_email: String,
    pub sent: String,
    pub sending_label: String,
    pub modal_close: String,
    pub modal_contact: String,
    /// Message pre-filled by the modal's contact action.
    pub contact_template: String,
    pub loaded: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_fields: "Por favor, completa todos los campos".to_string(),
            invalid_email: "Por favor, ingresa un email válido".to_string(),
            sent: "¡Mensaje enviado correctamente! Te contactaremos pronto.".to_string(),
            sending_label: "Enviando...".to_string(),
            modal_close: "Cerrar".to_string(),
            modal_contact: "Contactar sobre este proyecto".to_string(),
            contact_template: "Hola Gerson, me interesa conocer más detalles sobre el proyecto: \
                               {project}. ¿Podrías proporcionarme más información?"
                .to_string(),
            loaded: "Portafolio de Gerson Jaimes cargado correctamente".to_string(),
        }
    }
}

/// One styled console line printed when the page loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BannerLine {
    pub text: String,
    pub css: String,
}

fn default_banner() -> Vec<BannerLine> {
    [
        (
            "🚀 Portafolio de Gerson Jaimes",
            "color: #EBDFE1; font-size: 20px; font-weight: bold;",
        ),
        ("💼 Ingeniero Industrial", "color: #E5DFEB; font-size: 16px;"),
        (
            "📧 Contacto: gerson.jaimes@email.com",
            "color: #E0DFEB; font-size: 14px;",
        ),
        (
            "🌟 ¡Gracias por visitar mi portafolio!",
            "color: #EBDFE1; font-size: 14px;",
        ),
    ]
    .into_iter()
    .map(|(text, css)| BannerLine {
        text: text.to_string(),
        css: css.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PageConfig::from_json_str("{}").expect("empty config parses");
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json_str(
            r#"{"timings": {"typewriter_interval_ms": 40}, "form": {"name_field": "name"}}"#,
        )
        .expect("partial config parses");
        assert_eq!(config.timings.typewriter_interval_ms, 40);
        assert_eq!(config.timings.submit_feedback_ms, 1_000);
        assert_eq!(config.form.name_field, "name");
        assert_eq!(config.form.email_field, "correo");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = PageConfig::from_json_str(r#"{"timings": {"typewriter_interval_ms": 0}}"#)
            .expect_err("zero interval must fail");
        assert!(matches!(
            err,
            ConfigError::ZeroTiming {
                name: "typewriter_interval_ms"
            }
        ));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = PageConfig::from_json_str(r#"{"messages": {"contact_template": "hola"}}"#)
            .expect_err("template must reference the project");
        assert!(matches!(err, ConfigError::MissingProjectPlaceholder));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PageConfig::from_json_str("{").expect_err("truncated JSON");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reveal_ratio_must_be_a_fraction() {
        let err = PageConfig::from_json_str(r#"{"thresholds": {"reveal_visible_ratio": 1.5}}"#)
            .expect_err("ratio above one");
        assert!(matches!(err, ConfigError::ThresholdOutOfRange { .. }));
    }

    #[test]
    fn root_margin_pulls_bottom_edge_up() {
        assert_eq!(
            Thresholds::default().reveal_root_margin(),
            "0px 0px -50px 0px"
        );
    }
}
