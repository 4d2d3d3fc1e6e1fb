//! Fixed vocabularies and lookup tables used by the normalizers.
//!
//! These are configuration, not logic: each table is an immutable value with
//! a [`Default`] carrying the standard entries, handed to the normalizer
//! that uses it. Deployments can deserialize replacements from config files
//! or extend the defaults through the builder methods.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canonical "yes" value of the active-flag vocabulary.
pub const FLAG_YES: &str = "Sim";
/// Canonical "no" value of the active-flag vocabulary.
pub const FLAG_NO: &str = "Não";
/// Replacement for a missing phone number.
pub const PHONE_DEFAULT: &str = "N/A";
/// Replacement for an empty review comment.
pub const COMMENT_DEFAULT: &str = "Sem comentário";

/// City → state lookup used to correct mistyped state codes.
///
/// A recognized city overrides whatever state is stored on the row; an
/// unrecognized city leaves the stored state untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityStates {
    entries: HashMap<String, String>,
}

impl Default for CityStates {
    fn default() -> Self {
        let entries = [
            ("Rio de Janeiro", "RJ"),
            ("São Paulo", "SP"),
            ("Belo Horizonte", "MG"),
            ("Brasília", "DF"),
            ("Salvador", "BA"),
            ("Fortaleza", "CE"),
            ("Recife", "PE"),
            ("Porto Alegre", "RS"),
            ("Curitiba", "PR"),
            ("Manaus", "AM"),
        ]
        .into_iter()
        .map(|(city, state)| (city.to_string(), state.to_string()))
        .collect();
        Self { entries }
    }
}

impl CityStates {
    /// Returns the state for a recognized city.
    #[must_use]
    pub fn lookup(&self, city: &str) -> Option<&str> {
        self.entries.get(city).map(String::as_str)
    }

    /// Adds or overrides one city → state entry.
    #[must_use]
    pub fn with_entry(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.entries.insert(city.into(), state.into());
        self
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Active-flag vocabulary: the spellings accepted as "yes" and "no".
///
/// Matching is case-insensitive. Anything outside both lists — including
/// missing values and non-text columns — normalizes to the empty string;
/// the original value is deliberately discarded so downstream consumers
/// only ever see the three-value vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagVocab {
    yes: Vec<String>,
    no: Vec<String>,
}

impl Default for FlagVocab {
    fn default() -> Self {
        Self {
            yes: vec!["yes".to_string(), "sim".to_string(), "s".to_string()],
            no: vec!["no".to_string(), "não".to_string(), "n".to_string()],
        }
    }
}

impl FlagVocab {
    /// Normalizes a raw flag value to `"Sim"`, `"Não"`, or `""`.
    #[must_use]
    pub fn normalize(&self, raw: Option<&str>) -> &'static str {
        let Some(raw) = raw else { return "" };
        let lowered = raw.to_lowercase();
        if self.yes.iter().any(|accepted| *accepted == lowered) {
            FLAG_YES
        } else if self.no.iter().any(|accepted| *accepted == lowered) {
            FLAG_NO
        } else {
            ""
        }
    }
}

/// Category consolidation table: aliases rewritten to one canonical name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRollup {
    canonical: String,
    aliases: Vec<String>,
}

impl Default for CategoryRollup {
    fn default() -> Self {
        Self {
            canonical: "Eletrônicos".to_string(),
            aliases: vec![
                "Informática".to_string(),
                "Telefonia".to_string(),
                "Acessórios".to_string(),
            ],
        }
    }
}

impl CategoryRollup {
    /// Rewrites an alias to the canonical category; other values pass
    /// through unchanged.
    #[must_use]
    pub fn consolidate<'a>(&'a self, category: &'a str) -> &'a str {
        if self.aliases.iter().any(|alias| alias == category) {
            &self.canonical
        } else {
            category
        }
    }
}

/// Maps a raw recommendation flag to a boolean.
///
/// Exact-match `"Sim"` is `true`; everything else — `"Não"`, garbage,
/// missing — is `false`.
#[must_use]
pub fn recommends_flag(raw: Option<&str>) -> bool {
    raw == Some(FLAG_YES)
}
