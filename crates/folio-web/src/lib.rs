#![forbid(unsafe_code)]

//! WASM frontend for the folio portfolio page.
//!
//! The page logic lives in `folio-core` and never touches the DOM. This crate
//! is the browser host: it reads the embedded configuration, translates DOM
//! events into `PageEvent`s, applies the resulting `DomCommand`s and arms one
//! browser timeout for the controller's next deadline.
//!
//! Everything that needs `web-sys` is compiled for `wasm32` only; the helpers
//! below are target-independent so they can be tested natively.

pub mod logging;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioPage;

use folio_core::config::BannerLine;
use folio_core::{ConfigError, PageConfig};

/// Id of the `<script type="application/json">` element holding the config.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Resolve the page configuration from the embedded JSON, if any.
///
/// A missing or blank config block yields the defaults.
pub fn load_config(json: Option<&str>) -> Result<PageConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json_str(json),
    }
}

/// `console.log` arguments for each banner line: a `%c` format string and
/// the CSS applied to it.
pub fn banner_args(lines: &[BannerLine]) -> impl Iterator<Item = (String, &str)> + '_ {
    lines
        .iter()
        .map(|line| (format!("%c{}", line.text), line.css.as_str()))
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioPage;

#[cfg(not(target_arch = "wasm32"))]
impl FolioPage {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_or_blank_config_uses_defaults() {
        assert_eq!(load_config(None).ok(), Some(PageConfig::default()));
        assert_eq!(load_config(Some("  \n")).ok(), Some(PageConfig::default()));
    }

    #[test]
    fn embedded_config_overrides_defaults() {
        let config = load_config(Some(r#"{ "notifications": { "max_stacked": 5 } }"#))
            .expect("valid config");
        assert_eq!(config.notifications.max_stacked, 5);
        assert_eq!(config.timings, PageConfig::default().timings);
    }

    #[test]
    fn invalid_config_is_reported() {
        assert!(matches!(load_config(Some("{")), Err(ConfigError::Parse(_))));
        assert!(matches!(
            load_config(Some(r#"{ "notifications": { "max_stacked": 0 } }"#)),
            Err(ConfigError::EmptyNotificationStack)
        ));
    }

    #[test]
    fn banner_lines_are_styled_with_percent_c() {
        let lines = vec![BannerLine {
            text: "Hola".into(),
            css: "color: red".into(),
        }];
        let args: Vec<_> = banner_args(&lines).collect();
        assert_eq!(args, vec![("%cHola".to_string(), "color: red")]);
    }
}
