/// Ordered id-keyed collections read from JSON objects
pub mod collection;

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use bon::Builder;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;
use vfs::{PhysicalFS, VfsPath};

use crate::error::{ErrorKind, IResult};

pub use collection::Collection;

static VERSION_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("version key pattern is valid"));

/// Date-formatted identifier of one snapshot of the game data (e.g. `2025-12-09`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VersionKey(String);

impl VersionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Like [`VersionKey::new`], but rejects keys that are not `YYYY-MM-DD`.
    pub fn parse(key: &str) -> IResult<Self> {
        let key = Self::new(key);
        if key.is_well_formed() {
            Ok(key)
        } else {
            Err(ErrorKind::InvalidVersionKey(key.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        VERSION_KEY_PATTERN.is_match(&self.0)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for VersionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VersionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Where things live underneath a data root.
#[derive(Builder, Debug, Clone)]
pub struct StoreLayout {
    #[builder(into, default = String::from("versions.json"))]
    versions_file: String,
    #[builder(into, default = String::from("archive"))]
    archive_dir: String,
    #[builder(into, default = String::from("Objects"))]
    objects_dir: String,
    #[builder(into, default = String::from("Localization"))]
    localization_dir: String,
    #[builder(into, default = String::from("summaries"))]
    summaries_dir: String,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StoreLayout {
    pub fn versions_path(&self) -> String {
        self.versions_file.clone()
    }

    /// e.g. `archive/2025-12-09/Objects/Module.json`
    pub fn collection_path(&self, version: &VersionKey, collection: &str) -> String {
        format!(
            "{}/{version}/{}/{collection}.json",
            self.archive_dir, self.objects_dir
        )
    }

    /// e.g. `archive/2025-12-09/Localization/en.json`
    pub fn localization_path(&self, version: &VersionKey, language: &str) -> String {
        format!(
            "{}/{version}/{}/{language}.json",
            self.archive_dir, self.localization_dir
        )
    }

    /// e.g. `summaries/Module.json`
    pub fn summary_path(&self, collection: &str) -> String {
        format!("{}/{collection}.json", self.summaries_dir)
    }
}

pub trait DataFileLoader {
    /// Returns `Ok(None)` when the file does not exist.
    fn get(&self, path: &str) -> Result<Option<Cow<'static, str>>, ErrorKind>;
}

pub struct DataFileWithCallback<F> {
    callback: F,
}

impl<F> DataFileWithCallback<F>
where
    F: Fn(&str) -> Result<Option<Cow<'static, str>>, ErrorKind>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> DataFileLoader for DataFileWithCallback<F>
where
    F: Fn(&str) -> Result<Option<Cow<'static, str>>, ErrorKind>,
{
    fn get(&self, path: &str) -> Result<Option<Cow<'static, str>>, ErrorKind> {
        (self.callback)(path)
    }
}

/// Reads data files relative to a [`VfsPath`] root.
pub struct VfsLoader {
    root: VfsPath,
}

impl VfsLoader {
    pub fn new(root: VfsPath) -> Self {
        Self { root }
    }
}

impl DataFileLoader for VfsLoader {
    fn get(&self, path: &str) -> Result<Option<Cow<'static, str>>, ErrorKind> {
        let file = self.root.join(path)?;
        if !file.exists()? {
            return Ok(None);
        }
        Ok(Some(Cow::Owned(file.read_to_string()?)))
    }
}

/// Read-only access to a versioned game-data root.
pub struct DataStore {
    loader: Box<dyn DataFileLoader>,
    layout: StoreLayout,
}

impl DataStore {
    pub fn new(loader: impl DataFileLoader + 'static, layout: StoreLayout) -> Self {
        Self {
            loader: Box::new(loader),
            layout,
        }
    }

    /// Opens a data root on the local filesystem.
    pub fn open(data_dir: &Path, layout: StoreLayout) -> Self {
        let root = VfsPath::new(PhysicalFS::new(data_dir));
        Self::new(VfsLoader::new(root), layout)
    }

    pub fn from_vfs(root: VfsPath, layout: StoreLayout) -> Self {
        Self::new(VfsLoader::new(root), layout)
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Reads and parses a JSON file, returning `Ok(None)` if it does not exist.
    pub fn read_json_optional<T: DeserializeOwned>(&self, path: &str) -> IResult<Option<T>> {
        debug!("requesting file: {path}");

        let Some(contents) = self.loader.get(path)? else {
            return Ok(None);
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| ErrorKind::ParseError {
                path: path.to_string(),
                detail: err.to_string(),
            })
    }

    /// Reads and parses a JSON file that must exist.
    pub fn read_json<T: DeserializeOwned>(&self, path: &str) -> IResult<T> {
        self.read_json_optional(path)?
            .ok_or_else(|| ErrorKind::DatafileNotFound {
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;

    use vfs::{MemoryFS, VfsPath};

    use super::{DataStore, StoreLayout};

    /// Builds an in-memory data root from `(path, json)` pairs.
    pub(crate) fn fixture_store(files: &[(&str, serde_json::Value)]) -> DataStore {
        let root = VfsPath::new(MemoryFS::new());
        for (path, contents) in files {
            let file = root.join(path).unwrap();
            file.parent().create_dir_all().unwrap();
            let mut writer = file.create_file().unwrap();
            writer
                .write_all(serde_json::to_string(contents).unwrap().as_bytes())
                .unwrap();
        }
        DataStore::from_vfs(root, StoreLayout::default())
    }
}
