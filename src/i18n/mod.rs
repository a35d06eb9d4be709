//! Internationalization (i18n) module.
//!
//! All locale-related logic and user-facing strings live here. English is
//! the canonical locale; views look strings up by the dotted catalog key
//! (e.g. `"homeView.title"`).
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their metadata
//! - `language`: Type-safe Language type validated against the registry
//! - `strings`: The string catalog, one struct per locale
//!
//! # Example
//!
//! ```rust,ignore
//! use backwave::i18n::Language;
//!
//! let lang = Language::from_code("en")?;
//! let title = lang.lookup("header.title"); // Some("Backwave")
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LocaleStrings, ENGLISH_STRINGS};
