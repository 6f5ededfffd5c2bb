#![forbid(unsafe_code)]

//! Core: deterministic, host-independent interaction logic for the folio
//! portfolio page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes DOM events and
//!   applies the resulting [`DomCommand`]s; nothing here touches a document.
//! - **Deterministic time**: every delay runs on a [`timer::TimerQueue`]
//!   advanced explicitly by the host.
//! - **Graceful degradation**: commands for missing elements are dropped by
//!   the host; handlers never fail on absent markup.
//!
//! The `folio-web` crate wraps this with `wasm-bindgen`/`web-sys` bindings.

pub mod config;
pub mod controller;
pub mod cursor;
pub mod device;
pub mod dom;
pub mod error;
pub mod form;
pub mod modal;
pub mod nav;
pub mod notification;
pub mod reveal;
pub mod scroll;
pub mod style;
pub mod timer;
pub mod typewriter;

pub use config::PageConfig;
pub use controller::PageController;
pub use dom::{
    CardId, DomCommand, EphemeralId, EventOutcome, PageEvent, PageSnapshot, SectionLayout, Target,
};
pub use error::{ConfigError, ValidationError};
pub use form::ContactFields;
pub use notification::NotificationKind;
