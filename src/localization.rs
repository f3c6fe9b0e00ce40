//! Localization keys and the text lookup interface.
//!
//! Records reference display text through a [`LocalizationKey`] rather than a
//! plain string. Resolving a key for a language is done by a [`Localizer`];
//! caching loaded tables is left to whoever owns them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::{DataStore, VersionKey};
use crate::error::{ErrorKind, IResult};

/// Reference into a localization table.
///
/// Either carries an `InvariantString`, or a namespace/key pair with English text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationKey {
    #[serde(rename = "Key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "TableNamespace", default, skip_serializing_if = "Option::is_none")]
    pub table_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(rename = "InvariantString", default, skip_serializing_if = "Option::is_none")]
    pub invariant_string: Option<String>,
}

impl LocalizationKey {
    pub fn new(
        table_namespace: impl Into<String>,
        key: impl Into<String>,
        en: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            table_namespace: Some(table_namespace.into()),
            en: Some(en.into()),
            invariant_string: None,
        }
    }

    pub fn invariant(text: impl Into<String>) -> Self {
        Self {
            invariant_string: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text to show when no translation is available: the invariant string if
    /// present and non-empty, otherwise the English text.
    pub fn default_string(&self) -> IResult<&str> {
        [&self.invariant_string, &self.en]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .ok_or(ErrorKind::MissingDefaultString)
    }
}

/// [`LocalizationKey::default_string`] for an optional key.
pub fn default_string(key: Option<&LocalizationKey>) -> IResult<Option<&str>> {
    key.map(LocalizationKey::default_string).transpose()
}

/// Looks up translated text for a localization key.
pub trait Localizer {
    fn localize(&self, namespace: &str, key: &str) -> Option<&str>;
}

/// One language's strings for one version: namespace -> key -> text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocalizationTable(HashMap<String, HashMap<String, String>>);

impl Localizer for LocalizationTable {
    fn localize(&self, namespace: &str, key: &str) -> Option<&str> {
        self.0
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }
}

/// Resolves `key` through `localizer`, falling back to the key's default
/// string and finally to the raw key name.
pub fn localized_or_default(key: &LocalizationKey, localizer: &dyn Localizer) -> IResult<String> {
    let translated = key
        .table_namespace
        .as_deref()
        .zip(key.key.as_deref())
        .and_then(|(namespace, name)| localizer.localize(namespace, name))
        .filter(|text| !text.is_empty());
    if let Some(text) = translated {
        return Ok(text.to_string());
    }

    match (key.default_string(), key.key.as_deref()) {
        (Ok(text), _) => Ok(text.to_string()),
        (Err(_), Some(name)) => Ok(name.to_string()),
        (Err(err), None) => Err(err),
    }
}

impl DataStore {
    /// Loads the strings for `language` in `version`, if that table exists.
    pub fn load_localization(
        &self,
        version: &VersionKey,
        language: &str,
    ) -> IResult<Option<LocalizationTable>> {
        let path = self.layout().localization_path(version, language);
        self.read_json_optional(&path)
    }
}
