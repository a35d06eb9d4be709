//! Language type: validated locale representation.
//!
//! A `Language` can only be constructed for codes the registry knows and has
//! enabled, so every instance is guaranteed to have a string catalog.

use crate::i18n::strings::{LocaleStrings, ENGLISH_STRINGS};
use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en")
    code: &'static str,
}

impl Language {
    /// The canonical English locale.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and the locale is enabled
    /// * `Err` if the code is unknown or the locale is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (fallback) locale.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not found in the registry. This should never
    /// happen if the Language was constructed properly (via `from_code` or
    /// the constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the string catalog for this locale.
    ///
    /// Every enabled locale carries a catalog; disabled registry entries can
    /// never reach this point because `from_code` rejects them.
    pub fn strings(&self) -> &'static LocaleStrings {
        match self.code {
            "en" => &ENGLISH_STRINGS,
            other => unreachable!("No string catalog for enabled locale '{}'", other),
        }
    }

    /// Look up a catalog string by dotted key, falling back to the canonical
    /// locale when this locale does not define the key.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings()
            .lookup(key)
            .or_else(|| Language::canonical().strings().lookup(key))
    }

    /// Get the English name of the locale.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the locale.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical locale.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}
