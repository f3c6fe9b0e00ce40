use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::data::{Collection, DataStore, VersionKey};
use crate::error::{ErrorKind, IResult};

use super::{CollectionType, TaggedRecord};

impl DataStore {
    /// Loads every record of `collection` in `version`, keyed by id in file order.
    ///
    /// Not every collection exists in every version, so a missing file yields
    /// an empty collection. Malformed files are still an error.
    pub fn load_collection(
        &self,
        collection: &str,
        version: &VersionKey,
    ) -> IResult<Collection<TaggedRecord>> {
        let collection_type = CollectionType::from_name(collection);
        let path = self.layout().collection_path(version, collection_type.name());

        let Some(raw) = self.read_json_optional::<Collection<Value>>(&path)? else {
            warn!("no {collection} data for version {version} ({path})");
            return Ok(Collection::new());
        };

        let mut records = Collection::with_capacity(raw.len());
        for (id, value) in raw {
            let Value::Object(fields) = value else {
                return Err(ErrorKind::ParseError {
                    path,
                    detail: format!("record {id} is not an object"),
                });
            };
            let record = TaggedRecord::new(collection_type.clone(), id.clone(), fields);
            records.insert(id, record);
        }
        Ok(records)
    }

    /// Loads a single record, failing with [`ErrorKind::NotFound`] if it is absent.
    pub fn load_one(&self, id: &str, version: &VersionKey, collection: &str) -> IResult<TaggedRecord> {
        self.load_collection(collection, version)?
            .get(id)
            .cloned()
            .ok_or_else(|| ErrorKind::NotFound {
                id: id.to_string(),
                collection: collection.to_string(),
                version: version.to_string(),
            })
    }

    /// Loads a collection straight into a typed record shape.
    pub fn load_typed<T: DeserializeOwned>(
        &self,
        collection: &str,
        version: &VersionKey,
    ) -> IResult<Collection<T>> {
        self.load_collection(collection, version)?
            .into_iter()
            .map(|(id, record)| {
                let typed = serde_json::from_value(Value::Object(record.fields().clone()))?;
                Ok::<_, ErrorKind>((id, typed))
            })
            .collect()
    }
}
