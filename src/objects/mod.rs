/// The closed table of known collections and their URL segments
pub mod collection_type;
/// Loading collections and single objects from the data root
pub mod store;
/// Typed record shapes and the [`types::GameObject`] sum type
pub mod types;

use serde_json::{Map, Value};
use tracing::warn;

use crate::recognized::Recognized;

pub use collection_type::CollectionType;
pub use types::{GameObject, ParseObject, ProductionStatus};

/// A raw record as loaded from a collection file, tagged with the collection
/// it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRecord {
    collection_type: Recognized<CollectionType>,
    collection_url: Option<&'static str>,
    id: String,
    production_status: Option<ProductionStatus>,
    fields: Map<String, Value>,
}

impl TaggedRecord {
    pub fn new(
        collection_type: Recognized<CollectionType>,
        id: String,
        fields: Map<String, Value>,
    ) -> Self {
        let collection_url = collection_type.url_slug();
        let production_status = fields.get("production_status").and_then(|status| {
            match serde_json::from_value(status.clone()) {
                Ok(status) => Some(status),
                Err(err) => {
                    warn!(
                        "{} {id} has an unreadable production_status {status}: {err}",
                        collection_type.name()
                    );
                    None
                }
            }
        });

        Self {
            collection_type,
            collection_url,
            id,
            production_status,
            fields,
        }
    }

    pub fn collection_type(&self) -> &Recognized<CollectionType> {
        &self.collection_type
    }

    /// URL segment for the record's pages, `None` for unrecognized collections.
    pub fn collection_url(&self) -> Option<&'static str> {
        self.collection_url
    }

    /// The record exactly as it appears in the data file.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Typed view of this record. See [`GameObject::from_record`].
    pub fn to_object(&self) -> crate::error::IResult<GameObject> {
        GameObject::from_record(self)
    }

    /// The record with its tag fields added, as handed to page templates.
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 2);
        object.insert(
            "collection_type".to_string(),
            Value::String(self.collection_type.name().to_string()),
        );
        if let Some(url) = self.collection_url {
            object.insert("collection_url".to_string(), Value::String(url.to_string()));
        }
        object.extend(self.fields.clone());
        Value::Object(object)
    }
}

impl ParseObject for TaggedRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn production_status(&self) -> Option<&ProductionStatus> {
        self.production_status.as_ref()
    }
}
