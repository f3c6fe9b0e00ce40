//! Which versions each object appears in.
//!
//! Every object page is generated once per version it exists in, and each of
//! those pages links to its siblings. [`DataStore::index_changes`] builds that
//! list from the precomputed per-collection summary, while
//! [`DataStore::scan_changes`] derives it by reading every version directly.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::Rc;
use crate::data::{Collection, DataStore, VersionKey};
use crate::error::IResult;
use crate::objects::{CollectionType, ParseObject, TaggedRecord};
use crate::versions::VersionCatalog;

/// Summary file contents: object id -> versions that object appears in.
pub type ChangeSummary = Collection<Vec<VersionKey>>;

/// One generated page: an object in a version, with every version of that object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPath {
    pub id: String,
    pub version: VersionKey,
    pub versions: Rc<[VersionKey]>,
}

/// Per-call cache of collections loaded for readiness checks.
struct ReadinessCheck<'a> {
    store: &'a DataStore,
    collection: &'a str,
    loaded: HashMap<VersionKey, Collection<TaggedRecord>>,
}

impl<'a> ReadinessCheck<'a> {
    fn new(store: &'a DataStore, collection: &'a str) -> Self {
        Self {
            store,
            collection,
            loaded: HashMap::new(),
        }
    }

    fn is_ready(&mut self, id: &str, version: &VersionKey) -> IResult<bool> {
        if !self.loaded.contains_key(version) {
            let records = self.store.load_collection(self.collection, version)?;
            self.loaded.insert(version.clone(), records);
        }

        Ok(self
            .loaded
            .get(version)
            .and_then(|records| records.get(id))
            .is_some_and(|record| record.is_production_ready()))
    }
}

impl DataStore {
    /// Reads `summaries/<Collection>.json`, if present. `collection` is
    /// resolved the same way as in [`DataStore::load_collection`].
    pub fn load_summary(&self, collection: &str) -> IResult<Option<ChangeSummary>> {
        let collection_type = CollectionType::from_name(collection);
        let path = self.layout().summary_path(collection_type.name());
        self.read_json_optional(&path)
    }

    /// Enumerates every `(id, version)` page of `collection`, each carrying the
    /// full list of versions that id appears in.
    ///
    /// Ids listed in the summary produce one entry per listed version. Ids found
    /// in the latest version but missing from the summary produce a single entry
    /// for the latest version. With `prod_ready_only`, entries whose record in
    /// that version is not production-ready are skipped.
    pub fn index_changes(&self, collection: &str, prod_ready_only: bool) -> IResult<Vec<ObjectPath>> {
        let catalog = VersionCatalog::load(self)?;
        let Some(latest) = catalog.latest().cloned() else {
            warn!("version catalog is empty, nothing to index for {collection}");
            return Ok(Vec::new());
        };

        let summary = match self.load_summary(collection) {
            Ok(summary) => summary.unwrap_or_default(),
            Err(err) => {
                warn!("ignoring unreadable {collection} summary: {err}");
                ChangeSummary::new()
            }
        };
        debug!("{collection} summary lists {} objects", summary.len());

        let mut readiness = ReadinessCheck::new(self, collection);
        let mut stale_versions = HashSet::new();
        let mut paths = Vec::new();

        for (id, versions) in summary.iter() {
            let shared: Rc<[VersionKey]> = versions.as_slice().into();
            for version in versions {
                if !catalog.contains(version.as_str()) && stale_versions.insert(version.clone()) {
                    warn!("{collection} summary references version {version} missing from the catalog");
                }
                if prod_ready_only && !readiness.is_ready(id, version)? {
                    continue;
                }
                paths.push(ObjectPath {
                    id: id.clone(),
                    version: version.clone(),
                    versions: shared.clone(),
                });
            }
        }

        let latest_records = self.load_collection(collection, &latest)?;
        let latest_only: Rc<[VersionKey]> = Rc::from(vec![latest.clone()]);
        for (id, record) in latest_records.iter() {
            if summary.contains_key(id.as_str()) {
                continue;
            }
            if prod_ready_only && !record.is_production_ready() {
                continue;
            }
            debug!("{collection} {id} is not in the summary, using latest version only");
            paths.push(ObjectPath {
                id: id.clone(),
                version: latest.clone(),
                versions: latest_only.clone(),
            });
        }

        Ok(paths)
    }

    /// Like [`DataStore::index_changes`], but ignores the summary and reads the
    /// collection from every version in the catalog.
    ///
    /// Entries come out in catalog order, and each id's version list holds the
    /// versions it was found in (production-ready ones only, if requested).
    pub fn scan_changes(&self, collection: &str, prod_ready_only: bool) -> IResult<Vec<ObjectPath>> {
        let catalog = VersionCatalog::load(self)?;

        let mut found: Vec<(String, VersionKey)> = Vec::new();
        let mut versions_by_id: Collection<Vec<VersionKey>> = Collection::new();
        for version in catalog.keys() {
            let records = self.load_collection(collection, version)?;
            for (id, record) in records.iter() {
                if prod_ready_only && !record.is_production_ready() {
                    continue;
                }
                found.push((id.clone(), version.clone()));
                match versions_by_id.get_mut(id.as_str()) {
                    Some(versions) => versions.push(version.clone()),
                    None => {
                        versions_by_id.insert(id.clone(), vec![version.clone()]);
                    }
                }
            }
        }

        let shared: HashMap<&str, Rc<[VersionKey]>> = versions_by_id
            .iter()
            .map(|(id, versions)| (id.as_str(), Rc::from(versions.as_slice())))
            .collect();

        Ok(found
            .into_iter()
            .map(|(id, version)| {
                let versions = shared[id.as_str()].clone();
                ObjectPath {
                    id,
                    version,
                    versions,
                }
            })
            .collect())
    }

    /// The last version listed for `id` in the collection's summary.
    pub fn latest_version_for_object(&self, id: &str, collection: &str) -> Option<VersionKey> {
        let summary = match self.load_summary(collection) {
            Ok(summary) => summary?,
            Err(err) => {
                warn!("failed to read {collection} summary: {err}");
                return None;
            }
        };
        summary.get(id)?.last().cloned()
    }
}

#[cfg(test)]
mod test {
    use serde_json::{Value, json};

    use super::*;
    use crate::data::test_support::fixture_store;

    const LATEST: &str = "2025-12-09";
    const MIDDLE: &str = "2025-11-25";
    const OLDEST: &str = "2025-11-18";

    fn versions_json() -> Value {
        json!({
            LATEST: {"title": "c", "date_utc": LATEST, "manifest_id": "3"},
            MIDDLE: {"title": "b", "date_utc": MIDDLE, "manifest_id": "2"},
            OLDEST: {"title": "a", "date_utc": OLDEST, "manifest_id": "1"}
        })
    }

    fn class(id: &str, ready: bool) -> Value {
        let mut value = json!({
            "id": id,
            "name": {"InvariantString": id},
            "badge": {"image_path": "/Textures/badge.png", "hex": "#123456"}
        });
        if ready {
            value["production_status"] = json!("Ready");
        }
        value
    }

    fn store() -> DataStore {
        fixture_store(&[
            ("versions.json", versions_json()),
            (
                "summaries/PilotClass.json",
                json!({
                    "PC_Scout": [OLDEST, MIDDLE, LATEST],
                    "PC_Tank": [MIDDLE]
                }),
            ),
            (
                "archive/2025-11-18/Objects/PilotClass.json",
                json!({"PC_Scout": class("PC_Scout", false)}),
            ),
            (
                "archive/2025-11-25/Objects/PilotClass.json",
                json!({
                    "PC_Scout": class("PC_Scout", true),
                    "PC_Tank": class("PC_Tank", true)
                }),
            ),
            (
                "archive/2025-12-09/Objects/PilotClass.json",
                json!({
                    "PC_Scout": class("PC_Scout", true),
                    "PC_Sniper": class("PC_Sniper", true),
                    "PC_Draft": class("PC_Draft", false)
                }),
            ),
        ])
    }

    fn pairs(paths: &[ObjectPath]) -> Vec<(&str, &str)> {
        paths
            .iter()
            .map(|path| (path.id.as_str(), path.version.as_str()))
            .collect()
    }

    fn versions(path: &ObjectPath) -> Vec<&str> {
        path.versions.iter().map(VersionKey::as_str).collect()
    }

    #[test]
    fn summary_entries_expand_per_version() {
        let paths = store().index_changes("PilotClass", false).unwrap();

        assert_eq!(
            pairs(&paths),
            [
                ("PC_Scout", OLDEST),
                ("PC_Scout", MIDDLE),
                ("PC_Scout", LATEST),
                ("PC_Tank", MIDDLE),
                ("PC_Sniper", LATEST),
                ("PC_Draft", LATEST),
            ]
        );
        for path in paths.iter().filter(|path| path.id == "PC_Scout") {
            assert_eq!(versions(path), [OLDEST, MIDDLE, LATEST]);
        }
    }

    #[test]
    fn ids_missing_from_summary_use_latest_only() {
        let paths = store().index_changes("PilotClass", false).unwrap();

        let sniper: Vec<_> = paths.iter().filter(|path| path.id == "PC_Sniper").collect();
        assert_eq!(sniper.len(), 1);
        assert_eq!(sniper[0].version.as_str(), LATEST);
        assert_eq!(versions(sniper[0]), [LATEST]);
    }

    #[test]
    fn prod_ready_filter_checks_each_version() {
        let paths = store().index_changes("PilotClass", true).unwrap();

        assert_eq!(
            pairs(&paths),
            [
                ("PC_Scout", MIDDLE),
                ("PC_Scout", LATEST),
                ("PC_Tank", MIDDLE),
                ("PC_Sniper", LATEST),
            ]
        );
        // the summary's list is kept whole even when some versions are filtered out
        assert_eq!(versions(&paths[0]), [OLDEST, MIDDLE, LATEST]);
    }

    #[test]
    fn unknown_collection_is_empty() {
        assert!(store().index_changes("Ability", false).unwrap().is_empty());
        assert!(store().scan_changes("Ability", true).unwrap().is_empty());
    }

    #[test]
    fn stale_summary_versions_are_kept() {
        let store = fixture_store(&[
            ("versions.json", versions_json()),
            ("summaries/Rarity.json", json!({"R_Old": ["2024-01-01"]})),
        ]);

        let paths = store.index_changes("Rarity", false).unwrap();
        assert_eq!(pairs(&paths), [("R_Old", "2024-01-01")]);
    }

    #[test]
    fn missing_summary_falls_back_to_latest() {
        let store = fixture_store(&[
            ("versions.json", versions_json()),
            (
                "archive/2025-12-09/Objects/PilotClass.json",
                json!({"PC_Scout": class("PC_Scout", true)}),
            ),
        ]);

        let paths = store.index_changes("PilotClass", true).unwrap();
        assert_eq!(pairs(&paths), [("PC_Scout", LATEST)]);
        assert_eq!(versions(&paths[0]), [LATEST]);
    }

    #[test]
    fn scan_reads_every_version() {
        let paths = store().scan_changes("PilotClass", false).unwrap();

        assert_eq!(
            pairs(&paths),
            [
                ("PC_Scout", LATEST),
                ("PC_Sniper", LATEST),
                ("PC_Draft", LATEST),
                ("PC_Scout", MIDDLE),
                ("PC_Tank", MIDDLE),
                ("PC_Scout", OLDEST),
            ]
        );
        assert_eq!(versions(&paths[0]), [LATEST, MIDDLE, OLDEST]);
        assert_eq!(versions(&paths[4]), [MIDDLE]);
    }

    #[test]
    fn scan_with_filter_only_counts_ready_versions() {
        let paths = store().scan_changes("PilotClass", true).unwrap();

        let scout: Vec<_> = paths.iter().filter(|path| path.id == "PC_Scout").collect();
        assert_eq!(scout.len(), 2);
        assert_eq!(versions(scout[0]), [LATEST, MIDDLE]);
        assert!(paths.iter().all(|path| path.id != "PC_Draft"));
    }

    #[test]
    fn latest_version_from_summary() {
        let store = store();
        assert_eq!(
            store.latest_version_for_object("PC_Scout", "PilotClass"),
            Some(VersionKey::new(LATEST))
        );
        assert_eq!(store.latest_version_for_object("PC_Missing", "PilotClass"), None);
        assert_eq!(store.latest_version_for_object("PC_Scout", "Rarity"), None);
    }

    #[test]
    fn snake_case_name_finds_the_summary() {
        let store = store();
        let canonical = store.index_changes("PilotClass", false).unwrap();
        let snake = store.index_changes("pilot_class", false).unwrap();

        assert_eq!(snake, canonical);
        let scout = snake.iter().find(|path| path.id == "PC_Scout").unwrap();
        assert_eq!(versions(scout), [OLDEST, MIDDLE, LATEST]);
        assert_eq!(
            store.latest_version_for_object("PC_Scout", "pilot_class"),
            Some(VersionKey::new(LATEST))
        );
    }
}
