//! The version catalog: every known game-data snapshot and its metadata.
//!
//! `versions.json` is written newest-first, and that order is kept as-is; the
//! first entry is the latest version.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::{Collection, DataStore, VersionKey};
use crate::error::IResult;

/// Metadata for a specific version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub title: String,
    pub date_utc: String,
    pub manifest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_notes_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_season_release: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionCatalog {
    versions: Collection<VersionInfo, VersionKey>,
}

/// All versions, plus the entry for one requested version if it exists.
#[derive(Debug, Clone, Copy)]
pub struct VersionsData<'a> {
    pub versions: &'a VersionCatalog,
    pub version_info: Option<&'a VersionInfo>,
}

impl VersionCatalog {
    /// Reads `versions.json`. The file is required.
    pub fn load(store: &DataStore) -> IResult<Self> {
        let catalog: VersionCatalog = store.read_json(&store.layout().versions_path())?;

        for key in catalog.keys().filter(|key| !key.is_well_formed()) {
            warn!("version key {key} is not a YYYY-MM-DD date");
        }

        Ok(catalog)
    }

    /// The first version in catalog order.
    pub fn latest(&self) -> Option<&VersionKey> {
        self.versions.first().map(|(key, _)| key)
    }

    pub fn get(&self, key: &str) -> Option<&VersionInfo> {
        self.versions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.versions.contains_key(key)
    }

    /// The whole catalog together with the entry for `key`. An unknown key
    /// still returns the full catalog, just without a specific entry.
    pub fn lookup(&self, key: &str) -> VersionsData<'_> {
        VersionsData {
            versions: self,
            version_info: self.get(key),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &VersionKey> {
        self.versions.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VersionKey, &VersionInfo)> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(VersionKey, VersionInfo)> for VersionCatalog {
    fn from_iter<I: IntoIterator<Item = (VersionKey, VersionInfo)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::data::test_support::fixture_store;
    use crate::error::ErrorKind;

    fn catalog_json() -> serde_json::Value {
        json!({
            "2025-12-09": {
                "title": "Season 3 Update",
                "date_utc": "2025-12-09",
                "manifest_id": "4110276577853539612",
                "patch_notes_url": "https://example.invalid/notes",
                "is_season_release": true
            },
            "2025-11-25": {
                "title": "Hotfix",
                "date_utc": "2025-11-25",
                "manifest_id": "1208834871240000001"
            },
            "2025-11-18": {
                "title": "Balance Patch",
                "date_utc": "2025-11-18",
                "manifest_id": "5309125551234000002"
            }
        })
    }

    #[test]
    fn latest_is_first_key() {
        let store = fixture_store(&[("versions.json", catalog_json())]);
        let catalog = VersionCatalog::load(&store).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.latest().map(VersionKey::as_str), Some("2025-12-09"));
        let keys: Vec<_> = catalog.keys().map(VersionKey::as_str).collect();
        assert_eq!(keys, ["2025-12-09", "2025-11-25", "2025-11-18"]);

        let latest = catalog.get("2025-12-09").unwrap();
        assert_eq!(latest.is_season_release, Some(true));
        assert_eq!(catalog.get("2025-11-25").unwrap().patch_notes_url, None);
    }

    #[test]
    fn catalog_order_is_not_resorted() {
        let store = fixture_store(&[(
            "versions.json",
            json!({
                "2025-01-01": {"title": "a", "date_utc": "2025-01-01", "manifest_id": "1"},
                "2025-06-01": {"title": "b", "date_utc": "2025-06-01", "manifest_id": "2"}
            }),
        )]);
        let catalog = VersionCatalog::load(&store).unwrap();
        assert_eq!(catalog.latest().map(VersionKey::as_str), Some("2025-01-01"));
    }

    #[test]
    fn lookup_unknown_version_still_returns_catalog() {
        let store = fixture_store(&[("versions.json", catalog_json())]);
        let catalog = VersionCatalog::load(&store).unwrap();

        let found = catalog.lookup("2025-11-25");
        assert_eq!(found.version_info.unwrap().title, "Hotfix");
        assert_eq!(found.versions.len(), 3);

        let missing = catalog.lookup("2000-01-01");
        assert!(missing.version_info.is_none());
        assert_eq!(missing.versions.len(), 3);
        assert!(missing.versions.contains("2025-11-18"));
    }

    #[test]
    fn missing_or_malformed_catalog_fails() {
        let err = VersionCatalog::load(&fixture_store(&[])).unwrap_err();
        assert!(matches!(err, ErrorKind::DatafileNotFound { .. }));

        let store = fixture_store(&[("versions.json", json!({"2025-12-09": {"title": 3}}))]);
        let err = VersionCatalog::load(&store).unwrap_err();
        assert!(matches!(err, ErrorKind::ParseError { path, .. } if path == "versions.json"));
    }

    #[test]
    fn empty_catalog_has_no_latest() {
        let store = fixture_store(&[("versions.json", json!({}))]);
        let catalog = VersionCatalog::load(&store).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.latest().is_none());
    }
}
